pub mod judgment;
pub mod report;
pub mod turn;

pub use judgment::*;
pub use report::*;
pub use turn::*;
