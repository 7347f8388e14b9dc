use super::Filter;

/// A point in chart pixel space (origin top-left, y pointing down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in chart pixel space with `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRegion {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRegion {
    /// The rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, p: ScreenPoint) -> bool {
        self.x0 <= p.x && p.x <= self.x1 && self.y0 <= p.y && p.y <= self.y1
    }

    pub fn is_empty(&self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn clamp_point(&self, p: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(p.x.clamp(self.x0, self.x1), p.y.clamp(self.y0, self.y1))
    }

    fn translated_within(&self, dx: f64, dy: f64, extent: &BrushRegion) -> Self {
        // bounds cross when the region is wider than the extent, so no clamp()
        let dx = dx.max(extent.x0 - self.x0).min(extent.x1 - self.x1);
        let dy = dy.max(extent.y0 - self.y0).min(extent.y1 - self.y1);
        Self {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }
}

/// Scatter plot filter: the last brushed rectangle, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrushFilter {
    pub region: Option<BrushRegion>,
}

impl BrushFilter {
    pub fn new(region: Option<BrushRegion>) -> Self {
        Self { region }
    }
}

impl Filter<ScreenPoint> for BrushFilter {
    fn matches(&self, p: &ScreenPoint) -> bool {
        self.region.map_or(true, |r| r.contains(*p))
    }

    fn is_active(&self) -> bool {
        self.region.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Idle,
    Drawing { anchor: ScreenPoint },
    Moving { origin: ScreenPoint, start: BrushRegion },
}

/// Turns pointer down/drag/up into brush regions.
///
/// Pressing outside the current region starts a new one (clearing the old
/// one immediately); pressing inside it drags it around. A press released
/// without moving leaves no region at all. Every point is clamped to the
/// brushable extent.
#[derive(Debug, Clone, Copy)]
pub struct BrushGesture {
    extent: BrushRegion,
    mode: Mode,
}

impl BrushGesture {
    pub fn new(extent: BrushRegion) -> Self {
        Self {
            extent,
            mode: Mode::Idle,
        }
    }

    pub fn begin(&mut self, p: ScreenPoint, current: Option<BrushRegion>) -> Option<BrushRegion> {
        let p = self.extent.clamp_point(p);
        match current {
            Some(region) if region.contains(p) => {
                self.mode = Mode::Moving {
                    origin: p,
                    start: region,
                };
                Some(region)
            }
            _ => {
                self.mode = Mode::Drawing { anchor: p };
                None
            }
        }
    }

    pub fn drag(&mut self, p: ScreenPoint, current: Option<BrushRegion>) -> Option<BrushRegion> {
        let p = self.extent.clamp_point(p);
        match self.mode {
            Mode::Idle => current,
            Mode::Drawing { anchor } => {
                let region = BrushRegion::from_corners(anchor, p);
                (!region.is_empty()).then_some(region)
            }
            Mode::Moving { origin, start } => {
                Some(start.translated_within(p.x - origin.x, p.y - origin.y, &self.extent))
            }
        }
    }

    pub fn end(&mut self, p: ScreenPoint, current: Option<BrushRegion>) -> Option<BrushRegion> {
        let region = self.drag(p, current);
        self.mode = Mode::Idle;
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extent() -> BrushRegion {
        BrushRegion::from_corners(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 50.0))
    }

    #[test]
    fn test_region_is_normalized_and_inclusive() {
        let r = BrushRegion::from_corners(ScreenPoint::new(30.0, 40.0), ScreenPoint::new(10.0, 20.0));
        assert_eq!((r.x0, r.y0, r.x1, r.y1), (10.0, 20.0, 30.0, 40.0));
        assert!(r.contains(ScreenPoint::new(10.0, 40.0)));
        assert!(!r.contains(ScreenPoint::new(9.99, 30.0)));
    }

    #[test]
    fn test_filter_without_region_keeps_everything() {
        let filter = BrushFilter::default();
        assert!(!filter.is_active());
        assert!(filter.matches(&ScreenPoint::new(-5.0, 1e6)));
    }

    #[test]
    fn test_draw_new_region() {
        let mut gesture = BrushGesture::new(extent());
        assert_eq!(gesture.begin(ScreenPoint::new(10.0, 10.0), None), None);
        let r = gesture.drag(ScreenPoint::new(40.0, 30.0), None).unwrap();
        assert_eq!((r.width(), r.height()), (30.0, 20.0));
        let r = gesture.end(ScreenPoint::new(200.0, 30.0), Some(r)).unwrap();
        assert_eq!(r.x1, 100.0);
        // released: further drags leave the region alone
        assert_eq!(gesture.drag(ScreenPoint::new(0.0, 0.0), Some(r)), Some(r));
    }

    #[test]
    fn test_click_outside_clears() {
        let mut gesture = BrushGesture::new(extent());
        let current = Some(BrushRegion::from_corners(
            ScreenPoint::new(10.0, 10.0),
            ScreenPoint::new(20.0, 20.0),
        ));
        assert_eq!(gesture.begin(ScreenPoint::new(50.0, 40.0), current), None);
        assert_eq!(gesture.end(ScreenPoint::new(50.0, 40.0), None), None);
    }

    #[test]
    fn test_drag_inside_moves_region_within_extent() {
        let mut gesture = BrushGesture::new(extent());
        let start = BrushRegion::from_corners(ScreenPoint::new(10.0, 10.0), ScreenPoint::new(30.0, 20.0));

        assert_eq!(gesture.begin(ScreenPoint::new(15.0, 15.0), Some(start)), Some(start));
        let moved = gesture.drag(ScreenPoint::new(25.0, 20.0), Some(start)).unwrap();
        assert_eq!((moved.x0, moved.y0, moved.x1, moved.y1), (20.0, 15.0, 40.0, 25.0));

        let pinned = gesture.end(ScreenPoint::new(500.0, 500.0), Some(moved)).unwrap();
        assert_eq!((pinned.x1, pinned.y1), (100.0, 50.0));
        assert_eq!((pinned.width(), pinned.height()), (20.0, 10.0));
    }

    #[test]
    fn test_drag_while_idle_keeps_current() {
        let mut gesture = BrushGesture::new(extent());
        let r = BrushRegion::from_corners(ScreenPoint::new(1.0, 1.0), ScreenPoint::new(2.0, 2.0));
        assert_eq!(gesture.drag(ScreenPoint::new(9.0, 9.0), Some(r)), Some(r));
    }
}
