use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::pipeline::AnalysisInput;

/// Parse an analysis input file: transcript turns plus the raw model
/// judgment blocks and answer tags collected by the surrounding system
pub fn parse_analysis_file(path: &Path) -> Result<AnalysisInput> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_analysis_json(&content)
}

/// Parse an analysis input JSON string
pub fn parse_analysis_json(json: &str) -> Result<AnalysisInput> {
    let input: AnalysisInput =
        serde_json::from_str(json).context("Failed to parse analysis input JSON")?;

    for (i, turn) in input.turns.iter().enumerate() {
        if turn.text.trim().is_empty() {
            bail!("Turn {} has empty text", i);
        }
    }

    Ok(input)
}
