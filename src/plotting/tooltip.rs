use std::time::{Duration, Instant};

/// How long the tooltip lingers after the pointer leaves a mark.
pub const HIDE_DELAY: Duration = Duration::from_secs(1);

/// Offset of the tooltip from the pointer, in screen points.
pub const POINTER_OFFSET: f32 = 10.0;

/// Hover tooltip for scatter marks.
///
/// Leaving a mark only schedules the hide; entering another mark before the
/// deadline cancels it, so moving between neighbouring marks doesn't flicker.
#[derive(Debug, Clone, Default)]
pub struct Tooltip {
    /// Index of the commit whose details are shown
    commit: Option<usize>,
    visible: bool,
    position: [f32; 2],
    hide_at: Option<Instant>,
}

impl Tooltip {
    pub fn commit(&self) -> Option<usize> {
        self.commit
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hide_at
    }

    pub fn enter(&mut self, commit: usize, pointer: [f32; 2]) {
        self.hide_at = None;
        self.commit = Some(commit);
        self.visible = true;
        self.move_to(pointer);
    }

    pub fn move_to(&mut self, pointer: [f32; 2]) {
        self.position = [pointer[0] + POINTER_OFFSET, pointer[1] + POINTER_OFFSET];
    }

    pub fn leave(&mut self, now: Instant) {
        self.hide_at = Some(now + HIDE_DELAY);
    }

    /// Hide if the deadline has passed. Returns `true` when this call hid it.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide_at = None;
                self.visible = false;
                true
            }
            _ => false,
        }
    }
}
