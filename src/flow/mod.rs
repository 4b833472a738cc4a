pub mod branches;
pub mod continuity;
pub mod followups;
pub mod graph;

pub use branches::*;
pub use continuity::*;
pub use followups::*;
pub use graph::*;
