pub mod input;
pub mod output;

pub use input::{parse_analysis_file, parse_analysis_json};
pub use output::{write_report_json, HumanReport};
