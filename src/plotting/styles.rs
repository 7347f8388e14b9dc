use plotters::style::{RGBAColor, RGBColor};

/// Categorical palette used for pie slices (Tableau 10).
pub const TABLEAU10: [RGBColor; 10] = [
    RGBColor(0x4e, 0x79, 0xa7),
    RGBColor(0xf2, 0x8e, 0x2c),
    RGBColor(0xe1, 0x57, 0x59),
    RGBColor(0x76, 0xb7, 0xb2),
    RGBColor(0x59, 0xa1, 0x4f),
    RGBColor(0xed, 0xc9, 0x49),
    RGBColor(0xaf, 0x7a, 0xa1),
    RGBColor(0xff, 0x9d, 0xa7),
    RGBColor(0x9c, 0x75, 0x5f),
    RGBColor(0xba, 0xb0, 0xab),
];

/// Chart theme configuration
#[derive(Clone, Copy)]
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    /// Fill of unselected scatter marks
    pub mark_color: RGBColor,
    /// Fill of selected marks and the selected pie slice
    pub highlight_color: RGBColor,
    pub brush_fill: RGBAColor,
    pub brush_stroke: RGBAColor,
}

impl ChartTheme {
    pub fn dark() -> Self {
        Self {
            background_color: RGBAColor(27, 27, 27, 1.0),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
            mark_color: RGBColor(70, 130, 180),
            highlight_color: RGBColor(0xff, 0x6b, 0x6b),
            brush_fill: RGBAColor(119, 119, 119, 0.3),
            brush_stroke: RGBAColor(255, 255, 255, 0.9),
        }
    }

    pub fn light() -> Self {
        Self {
            background_color: RGBAColor(248, 248, 248, 1.0),
            text_color: RGBAColor(0, 0, 0, 0.85),
            grid_color: RGBAColor(0, 0, 0, 0.12),
            axis_color: RGBAColor(0, 0, 0, 0.85),
            brush_stroke: RGBAColor(40, 40, 40, 0.9),
            ..Self::dark()
        }
    }

    pub fn for_dark_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Chart style configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub font_size: u32,
    /// Opacity of marks that are not hovered
    pub mark_opacity: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Number of ticks requested per axis
    pub tick_count: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_size: 13,
            mark_opacity: 0.7,
            min_radius: 2.0,
            max_radius: 30.0,
            tick_count: 10,
        }
    }
}
