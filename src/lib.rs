//! # Folio
//!
//! `folio` is a personal portfolio viewer. It loads a project list, a
//! per-line commit log of the portfolio itself and a GitHub profile, and
//! presents them in three views with interactive charts.
//!
//! ## Features
//!
//! - Aggregate the per-line commit log into per-commit records
//! - Summary statistics and per-language line breakdowns
//! - Commit scatter plot (time against hour of day) with brushing
//! - Year pie chart over the projects, combined with free-text search
//! - Light/dark theme switching, persisted between runs
//!
//! ## Example
//!
//! ```no_run
//! use folio::app::{App, AppWrapper};
//! use folio::config::{PreferenceStore, Settings};
//! use std::sync::{Arc, Mutex};
//! use eframe::NativeOptions;
//!
//! // Create a new application instance
//! let app = App::new(Settings::from_env(), PreferenceStore::in_config_dir());
//! let app_wrapper = AppWrapper { app: Arc::new(Mutex::new(app)) };
//!
//! // Run the application with eframe
//! eframe::run_native(
//!     "Folio",
//!     NativeOptions::default(),
//!     Box::new(|_cc| Ok(Box::new(app_wrapper))),
//! ).unwrap();
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod loader;
pub mod plotting;
pub mod selection;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::App as FolioApp;
pub use error::{LoadError, LoadResult};
pub use types::{Commit, GitHubProfile, LogLine, Project};
