//! The interactive projection of a repository tree: which directories are
//! expanded, and which rows that leaves visible.

mod expansion;
pub use expansion::ExpansionState;

mod rows;
pub use rows::{rows, Affordance, Row, Rows};
