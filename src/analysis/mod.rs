mod breakdown;
mod commits;
mod stats;


pub use breakdown::{language_breakdown, LanguageShare};
pub use commits::{hour_fraction, process_commits};
pub use stats::{summarize, CommitSummary};
