mod aggregation;
pub mod format;

pub use aggregation::{count_by_first_seen, group_by_first_seen};
