use chrono::{DateTime, Duration, FixedOffset};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::time::Instant;

use super::styles::{ChartStyle, ChartTheme};
use super::tooltip::Tooltip;
use super::{render_to_rgb, PlotError};
use crate::analysis::{language_breakdown, LanguageShare};
use crate::selection::{BrushFilter, BrushGesture, BrushRegion, Filter, ScreenPoint, SelectionModel};
use crate::types::Commit;
use crate::utils::format::hour_label;

pub const WIDTH: u32 = 1000;
pub const HEIGHT: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

pub const MARGIN: Margin = Margin {
    top: 10,
    right: 10,
    bottom: 30,
    left: 50,
};

/// Commit time across, hour of day (0 at the bottom) up.
pub type ScatterCoord = Cartesian2d<RangedDateTime<DateTime<FixedOffset>>, RangedCoordf64>;

/// Pixel ranges of the plotting area, as `build_cartesian_2d` derives them
/// from the margins: the last column and row stay inside and y is flipped.
fn plot_pixels() -> (Range<i32>, Range<i32>) {
    let (left, right) = (MARGIN.left as i32, (WIDTH - MARGIN.right) as i32);
    let (top, bottom) = (MARGIN.top as i32, (HEIGHT - MARGIN.bottom) as i32);
    (left..right - 1, bottom - 1..top)
}

/// Position and size scales, fitted once to the full commit set.
#[derive(Clone)]
pub struct ScatterScales {
    time: Range<DateTime<FixedOffset>>,
    coord: ScatterCoord,
    /// Square roots of the smallest and largest line counts
    sqrt_lines: (f64, f64),
    radii: (f64, f64),
}

impl ScatterScales {
    /// `None` when there are no commits to fit.
    pub fn fit(commits: &[Commit], style: &ChartStyle) -> Option<Self> {
        let first = commits.first()?;
        let (mut earliest, mut latest) = (first.datetime, first.datetime);
        let (mut fewest, mut most) = (first.total_lines, first.total_lines);
        for c in commits {
            earliest = earliest.min(c.datetime);
            latest = latest.max(c.datetime);
            fewest = fewest.min(c.total_lines);
            most = most.max(c.total_lines);
        }
        if earliest == latest {
            earliest = earliest - Duration::hours(1);
            latest = latest + Duration::hours(1);
        }

        let time = earliest..latest;
        Some(Self {
            coord: Cartesian2d::new(time.clone(), 0f64..24f64, plot_pixels()),
            time,
            sqrt_lines: ((fewest as f64).sqrt(), (most as f64).sqrt()),
            radii: (style.min_radius, style.max_radius),
        })
    }

    pub fn time_range(&self) -> Range<DateTime<FixedOffset>> {
        self.time.clone()
    }

    /// Pixel position of `(datetime, hour)` on the canvas.
    pub fn pixel(&self, datetime: DateTime<FixedOffset>, hour: f64) -> ScreenPoint {
        let (x, y) = self.coord.translate(&(datetime, hour));
        ScreenPoint::new(x as f64, y as f64)
    }

    pub fn position(&self, commit: &Commit) -> ScreenPoint {
        self.pixel(commit.datetime, commit.hour_frac)
    }

    /// Radius grows with the square root of the line count, so mark area is
    /// proportional to it.
    pub fn radius(&self, commit: &Commit) -> f64 {
        let (lo, hi) = self.sqrt_lines;
        let (r0, r1) = self.radii;
        let t = if hi == lo {
            0.5
        } else {
            ((commit.total_lines as f64).sqrt() - lo) / (hi - lo)
        };
        r0 + t * (r1 - r0)
    }
}

/// One drawn circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mark {
    /// Index into the plot's commits
    pub commit: usize,
    pub center: ScreenPoint,
    pub radius: f64,
}

impl Mark {
    fn contains(&self, p: ScreenPoint) -> bool {
        let (dx, dy) = (p.x - self.center.x, p.y - self.center.y);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Commit scatter plot: time of commit against hour of day, one circle per
/// commit with area proportional to its line count.
pub struct ScatterPlot {
    commits: Vec<Commit>,
    scales: Option<ScatterScales>,
    /// Largest first, so smaller marks are drawn on top
    marks: Vec<Mark>,
    selection: SelectionModel<BrushFilter>,
    gesture: BrushGesture,
    hovered: Option<usize>,
    hover_revision: u64,
    tooltip: Tooltip,
    style: ChartStyle,
}

impl ScatterPlot {
    pub fn new(commits: Vec<Commit>) -> Self {
        Self::with_style(commits, ChartStyle::default())
    }

    pub fn with_style(commits: Vec<Commit>, style: ChartStyle) -> Self {
        let scales = ScatterScales::fit(&commits, &style);

        let mut marks: Vec<Mark> = match &scales {
            Some(scales) => commits
                .iter()
                .enumerate()
                .map(|(i, c)| Mark {
                    commit: i,
                    center: scales.position(c),
                    radius: scales.radius(c),
                })
                .collect(),
            None => Vec::new(),
        };
        marks.sort_by(|a, b| commits[b.commit].total_lines.cmp(&commits[a.commit].total_lines));

        let extent = BrushRegion::from_corners(
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(WIDTH as f64, HEIGHT as f64),
        );

        Self {
            commits,
            scales,
            marks,
            selection: SelectionModel::default(),
            gesture: BrushGesture::new(extent),
            hovered: None,
            hover_revision: 0,
            tooltip: Tooltip::default(),
            style,
        }
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn scales(&self) -> Option<&ScatterScales> {
        self.scales.as_ref()
    }

    /// Marks in drawing order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn selection(&self) -> &SelectionModel<BrushFilter> {
        &self.selection
    }

    pub fn brush(&self) -> Option<BrushRegion> {
        self.selection.current_filter().region
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Changes whenever anything drawn on the chart changes.
    pub fn visual_revision(&self) -> u64 {
        self.selection.revision() + self.hover_revision
    }

    /// Whether the commit's mark lies inside the brush. Nothing is selected
    /// without a brush.
    pub fn is_commit_selected(&self, commit: &Commit) -> bool {
        let filter = self.selection.current_filter();
        match &self.scales {
            Some(scales) if filter.is_active() => filter.matches(&scales.position(commit)),
            _ => false,
        }
    }

    /// Commits inside the brush; none when there is no brush.
    pub fn selected_commits(&self) -> Vec<&Commit> {
        self.commits
            .iter()
            .filter(|c| self.is_commit_selected(c))
            .collect()
    }

    pub fn selection_count_label(&self) -> String {
        match self.selected_commits().len() {
            0 => "No commits selected".to_string(),
            n => format!("{n} commits selected"),
        }
    }

    /// Language shares of the selected commits, or of every commit when
    /// nothing is selected.
    pub fn language_breakdown(&self) -> Vec<LanguageShare> {
        let selected = self.selected_commits();
        if selected.is_empty() {
            language_breakdown(&self.commits)
        } else {
            language_breakdown(selected)
        }
    }

    pub fn set_brush(&mut self, region: Option<BrushRegion>) -> bool {
        self.selection.apply(BrushFilter::new(region))
    }

    /// Brush `region`, or clear the brush if it is exactly `region` already.
    pub fn toggle_brush(&mut self, region: BrushRegion) -> bool {
        self.selection.toggle(BrushFilter::new(Some(region)))
    }

    /// Press and release without a drag. Clicking inside the brush selects
    /// its region again, which clears it. Clicking elsewhere clears it too.
    pub fn click(&mut self, p: ScreenPoint) -> bool {
        match self.brush() {
            Some(region) if region.contains(p) => self.toggle_brush(region),
            _ => {
                let pressed = self.pointer_down(p);
                self.pointer_up(p) || pressed
            }
        }
    }

    pub fn pointer_down(&mut self, p: ScreenPoint) -> bool {
        let region = self.gesture.begin(p, self.brush());
        self.set_brush(region)
    }

    pub fn pointer_drag(&mut self, p: ScreenPoint) -> bool {
        let region = self.gesture.drag(p, self.brush());
        self.set_brush(region)
    }

    pub fn pointer_up(&mut self, p: ScreenPoint) -> bool {
        let region = self.gesture.end(p, self.brush());
        self.set_brush(region)
    }

    /// The commit whose mark is topmost under `p`.
    pub fn hit_test(&self, p: ScreenPoint) -> Option<usize> {
        self.marks.iter().rev().find(|m| m.contains(p)).map(|m| m.commit)
    }

    /// Feed the mark under the pointer (if any) and the pointer's screen
    /// position. Returns `true` when the hovered mark changed.
    pub fn hover(&mut self, hit: Option<usize>, pointer: [f32; 2], now: Instant) -> bool {
        if hit == self.hovered {
            if hit.is_some() {
                self.tooltip.move_to(pointer);
            }
            return false;
        }

        if self.hovered.is_some() {
            self.tooltip.leave(now);
        }
        if let Some(commit) = hit {
            self.tooltip.enter(commit, pointer);
        }
        self.hovered = hit;
        self.hover_revision += 1;
        true
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.tooltip.tick(now)
    }

    pub fn render(
        &self,
        root: &DrawingArea<BitMapBackend, Shift>,
        theme: &ChartTheme,
    ) -> Result<(), PlotError> {
        root.fill(&theme.background_color)?;

        let Some(scales) = &self.scales else {
            let style = ("sans-serif", self.style.font_size as f64 * 1.5)
                .into_font()
                .color(&theme.text_color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new(
                "No commit data",
                ((WIDTH / 2) as i32, (HEIGHT / 2) as i32),
                style,
            ))?;
            return Ok(());
        };

        self.draw_axes(root, scales, theme)?;

        for mark in &self.marks {
            let commit = &self.commits[mark.commit];
            let color = if self.is_commit_selected(commit) {
                theme.highlight_color
            } else {
                theme.mark_color
            };
            let opacity = if self.hovered == Some(mark.commit) {
                1.0
            } else {
                self.style.mark_opacity
            };
            root.draw(&Circle::new(
                px(mark.center),
                mark.radius.round() as i32,
                color.mix(opacity).filled(),
            ))?;
        }

        if let Some(region) = self.brush() {
            let corners = [
                px(ScreenPoint::new(region.x0, region.y0)),
                px(ScreenPoint::new(region.x1, region.y1)),
            ];
            root.draw(&Rectangle::new(corners, theme.brush_fill.filled()))?;
            root.draw(&Rectangle::new(corners, ShapeStyle::from(&theme.brush_stroke).stroke_width(1)))?;
        }

        Ok(())
    }

    fn draw_axes(
        &self,
        root: &DrawingArea<BitMapBackend, Shift>,
        scales: &ScatterScales,
        theme: &ChartTheme,
    ) -> Result<(), PlotError> {
        let mut chart = build_chart(root, scales)?;

        let span = scales.time.end - scales.time.start;
        let date_format = if span > Duration::days(90) { "%b %Y" } else { "%b %-d" };
        let x_label_formatter = |t: &DateTime<FixedOffset>| t.format(date_format).to_string();
        let font = ("sans-serif", self.style.font_size as f64).into_font();

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(theme.grid_color)
            .axis_style(theme.axis_color)
            .x_labels(self.style.tick_count)
            .y_labels(13)
            .label_style(font.color(&theme.text_color))
            .x_label_formatter(&x_label_formatter)
            .y_label_formatter(&|h| hour_label(*h))
            .draw()?;
        Ok(())
    }

    /// Render the whole chart into a fresh RGB buffer of
    /// `WIDTH x HEIGHT` pixels.
    pub fn render_rgb(&self, theme: &ChartTheme) -> Result<Vec<u8>, PlotError> {
        render_to_rgb(WIDTH, HEIGHT, |root| self.render(root, theme))
    }
}

fn px(p: ScreenPoint) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

/// The plotters chart whose mesh frames the marks. Its mapping is the one
/// `ScatterScales` places marks and brushes with.
pub(super) fn build_chart<'a, 'b>(
    root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    scales: &ScatterScales,
) -> Result<ChartContext<'a, BitMapBackend<'b>, ScatterCoord>, PlotError> {
    let chart = ChartBuilder::on(root)
        .margin_top(MARGIN.top)
        .margin_right(MARGIN.right)
        .x_label_area_size(MARGIN.bottom)
        .y_label_area_size(MARGIN.left)
        .build_cartesian_2d(scales.time_range(), 0f64..24f64)?;
    Ok(chart)
}
