//! Portfolio viewer
//!
//! A GUI application showing projects, a GitHub profile and the history of
//! the portfolio's own source.

use anyhow::Context as _;
use eframe::egui;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use folio::app::{apply_theme, App, AppWrapper};
use folio::config::{PreferenceStore, Settings};

#[cfg(feature = "dev")]
const DEFAULT_FILTER: &str = "folio=debug";
#[cfg(not(feature = "dev"))]
const DEFAULT_FILTER: &str = "folio=info";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();

    let settings = Settings::from_env();
    let preferences = PreferenceStore::in_config_dir();
    tracing::info!(
        site_root = %settings.site_root.display(),
        preferences = %preferences.path().display(),
        "starting"
    );

    // Loading tasks are spawned from the UI thread, so it has to be inside
    // the runtime context
    let rt = Runtime::new().context("creating tokio runtime")?;
    let _guard = rt.enter();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Folio"),
        ..Default::default()
    };

    eframe::run_native(
        "Folio",
        options,
        Box::new(|cc| {
            let app = App::new(settings, preferences);
            apply_theme(&cc.egui_ctx, app.color_scheme);

            let app: Arc<Mutex<App>> = Arc::new(Mutex::new(app));
            Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow::anyhow!("running application: {e}"))
}
