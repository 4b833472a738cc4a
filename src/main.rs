use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use colloquy::{
    analyze_interview, build_flow_graph, continuity_score, detect_missed_follow_ups,
    identify_branches, pair_exchanges, parse_analysis_file, write_report_json, EdgeKind,
    HumanReport, PipelineConfig,
};

#[derive(Parser)]
#[command(name = "colloquy")]
#[command(author, version, about = "Interview quality analysis from model judgments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile judgments for an interview and write the full report
    Analyze {
        /// Input analysis file (turns, raw judgments, answer tags)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the machine-readable report (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for the human-readable report (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print conversation-flow statistics without writing a report
    Inspect {
        /// Input analysis file
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            human_readable,
            verbose,
        } => {
            setup_logging(verbose);
            run_analyze(input, output, human_readable)
        }
        Commands::Inspect { input, verbose } => {
            setup_logging(verbose);
            run_inspect(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn run_analyze(input: PathBuf, output: PathBuf, human_readable: Option<PathBuf>) -> Result<()> {
    info!("Loading analysis input from {:?}", input);
    let analysis_input = parse_analysis_file(&input).context("Failed to parse analysis input")?;

    info!(
        "Loaded {} turns, {} raw judgments",
        analysis_input.turns.len(),
        analysis_input.raw_judgments.len()
    );

    let report = analyze_interview(&analysis_input, &PipelineConfig::default());

    write_report_json(&report, &output)?;
    info!("Report written to {:?}", output);

    if let Some(human_path) = human_readable {
        HumanReport::new(&report).write_file(&human_path)?;
        info!("Human-readable report written to {:?}", human_path);
    }

    info!(
        "Complete: rating {}, continuity {:.1}, {} missed follow-ups",
        report.training.rating.label(),
        report.flow.continuity_score,
        report.missed_follow_ups.len()
    );

    Ok(())
}

fn run_inspect(input: PathBuf) -> Result<()> {
    info!("Inspecting analysis input from {:?}", input);
    let analysis_input = parse_analysis_file(&input).context("Failed to parse analysis input")?;

    let (questions, answers) = pair_exchanges(&analysis_input.turns);
    let config = PipelineConfig::default();
    let graph = build_flow_graph(&questions, &answers, &config.continuity);
    let branches = identify_branches(&graph);
    let missed = detect_missed_follow_ups(&graph, &analysis_input.answer_tags);

    println!("Conversation Flow");
    println!("=================");
    println!("Turns: {}", analysis_input.turns.len());
    println!("Questions: {}, answers: {}", questions.len(), answers.len());
    println!(
        "Nodes: {}, edges: {}",
        graph.nodes().len(),
        graph.edges().len()
    );
    println!("Continuity score: {:.1}/100", continuity_score(graph.edges()));
    println!();

    println!("Edges");
    println!("-----");
    let mut direct = 0;
    let mut follow_up = 0;
    let mut topic_shift = 0;
    let mut disconnected = 0;
    for edge in graph.edges() {
        match edge.kind {
            EdgeKind::DirectResponse => direct += 1,
            EdgeKind::FollowUp => follow_up += 1,
            EdgeKind::TopicShift => topic_shift += 1,
            EdgeKind::Disconnected => disconnected += 1,
        }
    }
    println!("Direct responses: {}", direct);
    println!("Follow-ups: {}", follow_up);
    println!("Topic shifts: {}", topic_shift);
    println!("Disconnected: {}", disconnected);
    println!();

    println!("Branches");
    println!("--------");
    for (i, branch) in branches.iter().enumerate() {
        let first = graph.node(branch[0]);
        let preview: String = first.text.chars().take(60).collect();
        println!(
            "Branch {}: {} nodes, opens with \"{}\"",
            i + 1,
            branch.len(),
            preview
        );
    }
    println!();

    println!("Missed follow-ups: {}", missed.len());
    for record in &missed {
        println!("  [{:?}] {}", record.importance, record.suggested_question);
    }

    Ok(())
}
