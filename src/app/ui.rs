use egui::{Color32, ComboBox, Context, Response, Sense, Ui};
use plotters::style::RGBColor;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::state::{App, ChartTexture, Page};
use crate::config::ColorScheme;
use crate::loader::load_site;
use crate::plotting::{ChartTheme, PlotError, HEIGHT, PIE_SIZE, WIDTH};
use crate::selection::ScreenPoint;
use crate::types::Project;
use crate::utils::format::full_date;

const SCATTER_SIZE: [u32; 2] = [WIDTH, HEIGHT];
const PIE_CANVAS: [u32; 2] = [PIE_SIZE, PIE_SIZE];

/// Map the persisted colour scheme onto egui's theme preference.
pub fn apply_theme(ctx: &Context, scheme: ColorScheme) {
    let preference = match scheme {
        ColorScheme::Automatic => egui::ThemePreference::System,
        ColorScheme::Light => egui::ThemePreference::Light,
        ColorScheme::Dark => egui::ThemePreference::Dark,
    };
    ctx.set_theme(preference);
}

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    if !app.loaded && !app.is_loading {
        start_loading(app, ctx, app_arc);
    }
    let dark = ctx.style().visuals.dark_mode;

    egui::TopBottomPanel::top("nav").show(ctx, |ui| {
        ui.horizontal(|ui| {
            for page in Page::ALL {
                ui.selectable_value(&mut app.page, page, page.label());
            }
            ui.hyperlink_to("GitHub", app.settings.github_page_url());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut scheme = app.color_scheme;
                ComboBox::new("theme_select", "Theme:")
                    .selected_text(scheme.label())
                    .show_ui(ui, |ui| {
                        for option in ColorScheme::ALL {
                            ui.selectable_value(&mut scheme, option, option.label());
                        }
                    });
                if app.set_color_scheme(scheme) {
                    apply_theme(ctx, scheme);
                }
            });
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        if app.is_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading...");
            });
        }

        egui::ScrollArea::vertical().show(ui, |ui| match app.page {
            Page::Home => draw_home(app, ui),
            Page::Projects => draw_projects(app, ui, dark),
            Page::Meta => draw_meta(app, ui, dark),
        });
    });

    if app.page == Page::Meta {
        draw_tooltip(app, ctx);
    }

    let now = Instant::now();
    if app.scatter.tick(now) {
        ctx.request_repaint();
    }
    if let Some(deadline) = app.scatter.tooltip().hide_deadline() {
        ctx.request_repaint_after(deadline.saturating_duration_since(now));
    }
}

fn start_loading(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    app.is_loading = true;
    let settings = app.settings.clone();
    let ctx = ctx.clone();

    tokio::spawn(async move {
        let data = load_site(&settings).await;
        match app_arc.lock() {
            Ok(mut app) => app.update_with_site_data(data),
            Err(e) => tracing::error!("failed to acquire app lock after loading: {e}"),
        }
        ctx.request_repaint();
    });
}

fn draw_home(app: &mut App, ui: &mut Ui) {
    ui.heading("Latest Projects");
    let latest = app.latest_projects();
    if latest.is_empty() {
        if app.loaded {
            ui.label("No projects to display at the moment.");
        }
    } else {
        for project in latest {
            project_card(ui, project);
        }
    }

    ui.separator();
    draw_profile(app, ui);
}

fn draw_profile(app: &mut App, ui: &mut Ui) {
    if let Some(image) = app.pending_avatar.take() {
        let size = [image.width() as usize, image.height() as usize];
        let pixels = image.as_flat_samples();
        app.avatar_texture = Some(ui.ctx().load_texture(
            "github_avatar",
            egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
            egui::TextureOptions::LINEAR,
        ));
    }

    let Some(profile) = &app.profile else {
        return;
    };

    ui.horizontal(|ui| {
        if let Some(texture) = &app.avatar_texture {
            ui.add(egui::Image::new(texture).fit_to_exact_size(egui::vec2(64.0, 64.0)));
        }
        ui.heading(&profile.login);
    });

    egui::Grid::new("github_stats").num_columns(2).show(ui, |ui| {
        for (label, value) in [
            ("Public Repos:", profile.public_repos),
            ("Public Gists:", profile.public_gists),
            ("Followers:", profile.followers),
            ("Following:", profile.following),
        ] {
            ui.strong(label);
            ui.label(value.to_string());
            ui.end_row();
        }
    });
}

fn project_card(ui: &mut Ui, project: &Project) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        match &project.link {
            Some(link) => {
                ui.hyperlink_to(egui::RichText::new(&project.title).heading(), link);
            }
            None => {
                ui.heading(&project.title);
            }
        }
        ui.label(&project.description);
        ui.weak(format!("c. {}", project.year.trim()));
    });
}

fn draw_projects(app: &mut App, ui: &mut Ui, dark: bool) {
    ui.heading(app.pie.title());

    let search = ui.add(
        egui::TextEdit::singleline(&mut app.search).hint_text("Search projects..."),
    );
    // the heading above was laid out with the old query
    if search.changed() && app.apply_search() {
        ui.ctx().request_repaint();
    }

    let theme = ChartTheme::for_dark_mode(dark);
    refresh_chart(
        ui.ctx(),
        &mut app.pie_texture,
        "pie_chart",
        app.pie.selection().revision(),
        dark,
        PIE_CANVAS,
        || app.pie.render_rgb(&theme),
    );

    ui.horizontal(|ui| {
        if let Some(response) = show_chart(ui, &app.pie_texture, PIE_CANVAS, PIE_SIZE as f32) {
            if response.clicked() {
                let hit = response
                    .interact_pointer_pos()
                    .and_then(|pos| app.pie.hit_test(to_chart_point(&response, pos, PIE_CANVAS)));
                if hit.is_some_and(|index| app.pie.toggle_bucket(index)) {
                    ui.ctx().request_repaint();
                }
            }
        }
        draw_legend(app, ui, &theme);
    });

    ui.separator();
    if let Some(message) = app.projects_message() {
        ui.label(message);
    }
    for project in app.pie.filtered_projects() {
        project_card(ui, project);
    }
}

fn draw_legend(app: &mut App, ui: &mut Ui, theme: &ChartTheme) {
    let mut clicked = None;
    ui.vertical(|ui| {
        for (index, bucket) in app.pie.buckets().iter().enumerate() {
            ui.horizontal(|ui| {
                let RGBColor(r, g, b) = app.pie.slice_color(index, theme);
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                ui.painter().rect_filled(swatch, 2.0, Color32::from_rgb(r, g, b));

                let selected = app.pie.selected_index() == Some(index);
                let label = format!("{} ({})", bucket.label, bucket.value);
                if ui.selectable_label(selected, label).clicked() {
                    clicked = Some(index);
                }
            });
        }
    });

    if clicked.is_some_and(|index| app.pie.toggle_bucket(index)) {
        ui.ctx().request_repaint();
    }
}

fn draw_meta(app: &mut App, ui: &mut Ui, dark: bool) {
    ui.heading("Summary");
    egui::Grid::new("commit_summary")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for (label, value) in app.summary.entries() {
                ui.strong(label);
                ui.label(value);
                ui.end_row();
            }
        });

    ui.separator();
    ui.heading("Commits by time of day");
    if app.scatter.is_empty() {
        ui.label("No commit data to display.");
        return;
    }

    let theme = ChartTheme::for_dark_mode(dark);
    refresh_chart(
        ui.ctx(),
        &mut app.scatter_texture,
        "scatter_plot",
        app.scatter.visual_revision(),
        dark,
        SCATTER_SIZE,
        || app.scatter.render_rgb(&theme),
    );

    let width = ui.available_width();
    if let Some(response) = show_chart(ui, &app.scatter_texture, SCATTER_SIZE, width) {
        if handle_scatter_input(app, &response) {
            ui.ctx().request_repaint();
        }
    }

    ui.label(app.scatter.selection_count_label());
    egui::Grid::new("language_breakdown")
        .num_columns(2)
        .show(ui, |ui| {
            for share in app.scatter.language_breakdown() {
                ui.strong(share.label());
                ui.label(share.summary());
                ui.end_row();
            }
        });
}

/// Feed pointer input to the scatter plot. Returns `true` when the brush or
/// hover changed after the chart texture was refreshed this frame.
fn handle_scatter_input(app: &mut App, response: &Response) -> bool {
    let now = Instant::now();
    let mut changed = false;

    if response.drag_started() {
        let origin = response
            .ctx
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        if let Some(pos) = origin {
            changed |= app.scatter.pointer_down(to_chart_point(response, pos, SCATTER_SIZE));
        }
    } else if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            changed |= app.scatter.pointer_drag(to_chart_point(response, pos, SCATTER_SIZE));
        }
    }
    if response.drag_stopped() {
        if let Some(pos) = response.interact_pointer_pos() {
            changed |= app.scatter.pointer_up(to_chart_point(response, pos, SCATTER_SIZE));
        }
    }
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            changed |= app.scatter.click(to_chart_point(response, pos, SCATTER_SIZE));
        }
    }

    let hit = response
        .hover_pos()
        .map(|pos| (app.scatter.hit_test(to_chart_point(response, pos, SCATTER_SIZE)), pos));
    changed |= match hit {
        Some((hit, pos)) => app.scatter.hover(hit, [pos.x, pos.y], now),
        None => app.scatter.hover(None, [0.0, 0.0], now),
    };
    changed
}

fn draw_tooltip(app: &App, ctx: &Context) {
    let tooltip = app.scatter.tooltip();
    if !tooltip.is_visible() {
        return;
    }
    let Some(commit) = tooltip.commit().and_then(|i| app.scatter.commits().get(i)) else {
        return;
    };

    let [x, y] = tooltip.position();
    egui::Area::new(egui::Id::new("commit_tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(egui::pos2(x, y))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                egui::Grid::new("commit_tooltip_grid").num_columns(2).show(ui, |ui| {
                    ui.strong("Commit");
                    ui.hyperlink_to(commit.id.as_str(), &commit.url);
                    ui.end_row();
                    ui.strong("Date");
                    ui.label(full_date(commit.date));
                    ui.end_row();
                    ui.strong("Time");
                    ui.label(&commit.time);
                    ui.end_row();
                    ui.strong("Author");
                    ui.label(&commit.author);
                    ui.end_row();
                    ui.strong("Lines edited");
                    ui.label(commit.total_lines.to_string());
                    ui.end_row();
                });
            });
        });
}

/// Re-render a chart into its texture when its revision or the UI's dark
/// mode changed since the last upload.
fn refresh_chart<F>(
    ctx: &Context,
    chart: &mut ChartTexture,
    name: &str,
    revision: u64,
    dark: bool,
    size: [u32; 2],
    render: F,
) where
    F: FnOnce() -> Result<Vec<u8>, PlotError>,
{
    if !chart.is_stale(revision, dark) {
        return;
    }

    match render() {
        Ok(rgb) => {
            let image = egui::ColorImage::from_rgb([size[0] as usize, size[1] as usize], &rgb);
            match &mut chart.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                None => {
                    chart.texture = Some(ctx.load_texture(name, image, egui::TextureOptions::LINEAR));
                }
            }
            tracing::debug!(chart = name, revision, "chart rendered");
        }
        Err(e) => tracing::error!(chart = name, error = %e, "chart render failed"),
    }
}

/// Show a chart texture scaled to `max_width`, sensing clicks and drags.
fn show_chart(ui: &mut Ui, chart: &ChartTexture, size: [u32; 2], max_width: f32) -> Option<Response> {
    let texture = chart.texture.as_ref()?;
    let width = max_width.min(size[0] as f32);
    let display = egui::vec2(width, width * size[1] as f32 / size[0] as f32);
    Some(ui.add(
        egui::Image::new(texture)
            .fit_to_exact_size(display)
            .sense(Sense::click_and_drag()),
    ))
}

/// Screen position inside a chart image to chart pixel space.
fn to_chart_point(response: &Response, pos: egui::Pos2, size: [u32; 2]) -> ScreenPoint {
    let rect = response.rect;
    ScreenPoint::new(
        ((pos.x - rect.min.x) / rect.width() * size[0] as f32) as f64,
        ((pos.y - rect.min.y) / rect.height() * size[1] as f32) as f64,
    )
}
