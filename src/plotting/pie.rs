use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::HashMap;
use std::f64::consts::TAU;

use super::styles::{ChartTheme, TABLEAU10};
use super::{render_to_rgb, PlotError};
use crate::selection::{ProjectFilter, ScreenPoint, SelectionModel};
use crate::types::Project;
use crate::utils::count_by_first_seen;

/// Side of the square pie canvas, in pixels.
pub const PIE_SIZE: u32 = 240;
pub const PIE_RADIUS: f64 = 110.0;

/// Arc segments are at most this many radians apart.
const ARC_STEP: f64 = TAU / 180.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieBucket {
    pub label: String,
    pub value: usize,
}

/// Count projects per trimmed year, in first-seen order.
pub fn bucket_by_year<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Vec<PieBucket> {
    count_by_first_seen(projects, |p| p.year.trim().to_string())
        .into_iter()
        .map(|(label, value)| PieBucket { label, value })
        .collect()
}

/// Angles in radians, clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    /// Index of the bucket this slice draws
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    fn contains_angle(&self, angle: f64) -> bool {
        self.start_angle <= angle && angle < self.end_angle
    }
}

/// Lay buckets out around the circle. Larger buckets get their angles
/// first (ties keep bucket order); the result is in bucket order.
pub fn pie_layout(buckets: &[PieBucket]) -> Vec<PieSlice> {
    let total: usize = buckets.iter().map(|b| b.value).sum();
    let mut slices: Vec<PieSlice> = (0..buckets.len())
        .map(|index| PieSlice {
            index,
            start_angle: 0.0,
            end_angle: 0.0,
        })
        .collect();
    if total == 0 {
        return slices;
    }

    let mut order: Vec<usize> = (0..buckets.len()).collect();
    order.sort_by(|&a, &b| buckets[b].value.cmp(&buckets[a].value));

    let mut cursor = 0.0;
    for index in order {
        let span = buckets[index].value as f64 / total as f64 * TAU;
        slices[index].start_angle = cursor;
        slices[index].end_angle = cursor + span;
        cursor += span;
    }
    slices
}

fn point_at(center: (f64, f64), radius: f64, angle: f64) -> (i32, i32) {
    (
        (center.0 + radius * angle.sin()).round() as i32,
        (center.1 - radius * angle.cos()).round() as i32,
    )
}

/// Year pie chart over the project list, with the year and query filters
/// that drive the project list next to it.
pub struct PieChart {
    projects: Vec<Project>,
    palette: HashMap<String, usize>,
    selection: SelectionModel<ProjectFilter>,
    buckets: Vec<PieBucket>,
    slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn new(projects: Vec<Project>) -> Self {
        let palette = bucket_by_year(&projects)
            .into_iter()
            .enumerate()
            .map(|(i, bucket)| (bucket.label, i))
            .collect();

        let mut chart = Self {
            projects,
            palette,
            selection: SelectionModel::default(),
            buckets: Vec::new(),
            slices: Vec::new(),
        };
        chart.rebucket();
        chart
    }

    fn rebucket(&mut self) {
        let filter = self.selection.current_filter();
        self.buckets = bucket_by_year(self.projects.iter().filter(|p| filter.matches_query(p)));
        self.slices = pie_layout(&self.buckets);
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn buckets(&self) -> &[PieBucket] {
        &self.buckets
    }

    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    pub fn selection(&self) -> &SelectionModel<ProjectFilter> {
        &self.selection
    }

    pub fn query(&self) -> &str {
        &self.selection.current_filter().query
    }

    pub fn selected_year(&self) -> Option<&str> {
        self.selection.current_filter().year.as_deref()
    }

    /// Index of the selected year among the current buckets. `None` when
    /// the selected year has been filtered out by the query.
    pub fn selected_index(&self) -> Option<usize> {
        let year = self.selected_year()?;
        self.buckets.iter().position(|b| b.label == year)
    }

    /// Change the search query. The selected year is kept.
    pub fn set_query(&mut self, query: &str) -> bool {
        let changed = self.selection.update(|f| f.query = query.to_string());
        if changed {
            self.rebucket();
        }
        changed
    }

    /// Select the bucket at `index`, or clear the year if it is already
    /// selected.
    pub fn toggle_bucket(&mut self, index: usize) -> bool {
        let Some(bucket) = self.buckets.get(index) else {
            return false;
        };
        let year = if self.selected_index() == Some(index) {
            None
        } else {
            Some(bucket.label.clone())
        };
        self.selection.update(|f| f.year = year)
    }

    pub fn filtered_projects(&self) -> Vec<&Project> {
        self.selection.filter_items(&self.projects)
    }

    pub fn title(&self) -> String {
        let count = self.filtered_projects().len();
        match self.selected_year() {
            Some(year) => format!("Projects ({count}) in {year}"),
            None => format!("Projects ({count})"),
        }
    }

    /// Palette colour of the bucket at `index`, independent of selection.
    pub fn bucket_color(&self, index: usize) -> RGBColor {
        let slot = self
            .buckets
            .get(index)
            .and_then(|b| self.palette.get(&b.label))
            .copied()
            .unwrap_or(index);
        TABLEAU10[slot % TABLEAU10.len()]
    }

    /// Colour the bucket is drawn with, including selection highlight.
    pub fn slice_color(&self, index: usize, theme: &ChartTheme) -> RGBColor {
        if self.selected_index() == Some(index) {
            theme.highlight_color
        } else {
            self.bucket_color(index)
        }
    }

    /// Bucket index of the slice under `p`, in pie canvas pixels.
    pub fn hit_test(&self, p: ScreenPoint) -> Option<usize> {
        let center = PIE_SIZE as f64 / 2.0;
        let (dx, dy) = (p.x - center, p.y - center);
        if dx * dx + dy * dy > PIE_RADIUS * PIE_RADIUS {
            return None;
        }
        let angle = dx.atan2(-dy).rem_euclid(TAU);
        self.slices
            .iter()
            .find(|s| s.contains_angle(angle))
            .map(|s| s.index)
    }

    pub fn render(
        &self,
        root: &DrawingArea<BitMapBackend, Shift>,
        theme: &ChartTheme,
    ) -> Result<(), PlotError> {
        root.fill(&theme.background_color)?;

        let center = (PIE_SIZE as f64 / 2.0, PIE_SIZE as f64 / 2.0);
        for slice in &self.slices {
            if slice.span() <= 0.0 {
                continue;
            }
            let steps = (slice.span() / ARC_STEP).ceil().max(1.0) as usize;
            let mut points = Vec::with_capacity(steps + 2);
            points.push(point_at(center, 0.0, 0.0));
            for step in 0..=steps {
                let angle = slice.start_angle + slice.span() * step as f64 / steps as f64;
                points.push(point_at(center, PIE_RADIUS, angle));
            }

            let color = self.slice_color(slice.index, theme);
            root.draw(&Polygon::new(points, color.filled()))?;
        }
        Ok(())
    }

    pub fn render_rgb(&self, theme: &ChartTheme) -> Result<Vec<u8>, PlotError> {
        render_to_rgb(PIE_SIZE, PIE_SIZE, |root| self.render(root, theme))
    }
}
