use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::InterviewReport;

/// Write the machine-readable report as pretty-printed JSON
pub fn write_report_json(report: &InterviewReport, path: &Path) -> Result<()> {
    let file =
        std::fs::File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, report).context("Failed to write report JSON")?;
    Ok(())
}

/// Human-readable rendering of a report
pub struct HumanReport<'a> {
    report: &'a InterviewReport,
}

impl<'a> HumanReport<'a> {
    pub fn new(report: &'a InterviewReport) -> Self {
        Self { report }
    }

    /// Format the report as readable text
    pub fn format(&self) -> String {
        let report = self.report;
        let mut output = String::new();

        output.push_str("Interview Analysis\n");
        output.push_str("==================\n");
        output.push_str(&format!(
            "Questions: {}, answers: {}\n",
            report.metadata.question_count, report.metadata.answer_count
        ));
        output.push_str(&format!(
            "Judgments recovered: {} ({} defaulted)\n\n",
            report.metadata.judgments_recovered, report.metadata.judgments_defaulted
        ));

        output.push_str("Sentiment\n");
        output.push_str("---------\n");
        for (label, judgment) in [
            ("Interviewer", &report.sentiment.interviewer),
            ("Respondent", &report.sentiment.respondent),
        ] {
            output.push_str(&format!(
                "{}: {:.0}% positive / {:.0}% neutral / {:.0}% negative, score {:.1}/10\n",
                label,
                judgment.positive * 100.0,
                judgment.neutral * 100.0,
                judgment.negative * 100.0,
                judgment.overall_score
            ));
            if !judgment.rationale.is_empty() {
                output.push_str(&format!("  {}\n", judgment.rationale));
            }
        }
        output.push('\n');

        output.push_str("Flow\n");
        output.push_str("----\n");
        output.push_str(&format!(
            "Continuity score: {:.1}/100\n",
            report.flow.continuity_score
        ));
        output.push_str(&format!(
            "{} nodes, {} edges, {} branches\n\n",
            report.flow.node_count, report.flow.edge_count, report.flow.branch_count
        ));

        if !report.missed_follow_ups.is_empty() {
            output.push_str("Missed follow-ups\n");
            output.push_str("-----------------\n");
            for missed in &report.missed_follow_ups {
                output.push_str(&format!(
                    "[{:?}] {}\n  {}\n",
                    missed.importance, missed.suggested_question, missed.rationale
                ));
            }
            output.push('\n');
        }

        output.push_str("Training\n");
        output.push_str("--------\n");
        output.push_str(&format!("Overall rating: {}\n", report.training.rating.label()));
        for strength in &report.training.strengths {
            output.push_str(&format!("  + {}\n", strength));
        }
        for gap in &report.training.gaps {
            output.push_str(&format!(
                "  - {}: {:.0} below target {:.0} ({:?})\n",
                gap.metric, gap.score, gap.target, gap.severity
            ));
        }
        if !report.training.recommendations.is_empty() {
            output.push_str("Recommendations:\n");
            for (i, recommendation) in report.training.recommendations.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, recommendation));
            }
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Speaker;
    use crate::pipeline::{analyze_interview, AnalysisInput, PipelineConfig};

    fn sample_report() -> InterviewReport {
        let input = AnalysisInput {
            turns: vec![
                crate::models::Turn {
                    speaker: Speaker::Interviewer,
                    text: "What is your experience with Java?".to_string(),
                    timestamp: 0,
                },
                crate::models::Turn {
                    speaker: Speaker::Respondent,
                    text: "I have 7 years of Java experience".to_string(),
                    timestamp: 1,
                },
                crate::models::Turn {
                    speaker: Speaker::Interviewer,
                    text: "Describe your experience with Spring Boot projects?".to_string(),
                    timestamp: 2,
                },
            ],
            raw_judgments: Vec::new(),
            answer_tags: Vec::new(),
            relevance_score: Some(70.0),
        };
        analyze_interview(&input, &PipelineConfig::default())
    }

    #[test]
    fn test_human_format_sections() {
        let report = sample_report();
        let text = HumanReport::new(&report).format();

        assert!(text.contains("Interview Analysis"));
        assert!(text.contains("Continuity score: 80.0/100"));
        assert!(text.contains("Overall rating:"));
    }

    #[test]
    fn test_report_json_round_trip() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_report_json(&report, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: InterviewReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.flow.continuity_score, report.flow.continuity_score);
        assert_eq!(parsed.training.rating, report.training.rating);
    }

    #[test]
    fn test_human_report_write_file() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        HumanReport::new(&report).write_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Flow"));
    }
}
