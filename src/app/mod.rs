//! egui front end: navigation, the three views and chart interaction.

mod state;
mod ui;

pub use state::{App, AppWrapper, ChartTexture, Page, LATEST_PROJECT_COUNT};
pub use ui::apply_theme;
