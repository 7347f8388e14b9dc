//! # Plotting
//!
//! Charts draw with plotters into in-memory RGB buffers which the UI uploads
//! as textures. Pointer input comes back in chart pixel coordinates and is
//! hit-tested with the same plotters coordinate mapping that placed the marks.

mod pie;
mod scatter;
pub mod styles;
mod tooltip;


use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;

pub use pie::{bucket_by_year, pie_layout, PieBucket, PieChart, PieSlice, PIE_RADIUS, PIE_SIZE};
pub use scatter::{Margin, Mark, ScatterCoord, ScatterPlot, ScatterScales, HEIGHT, MARGIN, WIDTH};
pub use styles::{ChartStyle, ChartTheme};
pub use tooltip::{Tooltip, HIDE_DELAY, POINTER_OFFSET};

pub type PlotError = Box<dyn Error + Send + Sync>;

/// Run `draw` against a fresh `width x height` bitmap and return its pixels
/// as packed RGB.
pub fn render_to_rgb<F>(width: u32, height: u32, draw: F) -> Result<Vec<u8>, PlotError>
where
    F: FnOnce(&DrawingArea<BitMapBackend, Shift>) -> Result<(), PlotError>,
{
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw(&root)?;
        root.present()?;
    }
    Ok(buffer)
}
