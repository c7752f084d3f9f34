use crate::constants::{WHEEL_LINE_PX, WHEEL_PAGE_PX};
use crate::note::Note;
use std::collections::VecDeque;

/// Platform input, already converted to canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    DragStart { x: f32, y: f32 },
    DragMove { x: f32, y: f32 },
    DragEnd,
    Scroll { delta_y: f32 },
    /// Pointer click that did not turn into a drag; resolved by picking.
    Click { x: f32, y: f32 },
    /// DOM-style key name, e.g. `"q"`, `"Enter"`.
    KeyDown { key: String, repeat: bool },
    NoteTriggered { note: Note },
}

/// Events pushed by platform callbacks, drained once per frame in arrival order.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}

/// Wheel delta units, matching `WheelEvent.deltaMode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelUnit {
    Pixel,
    Line,
    Page,
}

impl WheelUnit {
    pub fn from_dom_mode(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

/// Normalize a wheel delta to DOM pixels, positive meaning "scroll down / zoom out".
#[inline]
pub fn wheel_delta_px(delta: f32, unit: WheelUnit) -> f32 {
    match unit {
        WheelUnit::Pixel => delta,
        WheelUnit::Line => delta * WHEEL_LINE_PX,
        WheelUnit::Page => delta * WHEEL_PAGE_PX,
    }
}

/// Tracks whether a pointer press moved far enough to count as a drag.
#[derive(Default, Clone, Copy, Debug)]
pub struct ClickTracker {
    down_at: Option<(f32, f32)>,
    moved: bool,
}

impl ClickTracker {
    pub const SLOP_PX: f32 = 4.0;

    pub fn down(&mut self, x: f32, y: f32) {
        self.down_at = Some((x, y));
        self.moved = false;
    }

    pub fn moved_to(&mut self, x: f32, y: f32) {
        if let Some((x0, y0)) = self.down_at {
            if (x - x0).hypot(y - y0) > Self::SLOP_PX {
                self.moved = true;
            }
        }
    }

    /// True when the press ended without leaving the slop radius.
    pub fn up(&mut self) -> bool {
        let was_click = self.down_at.is_some() && !self.moved;
        self.down_at = None;
        self.moved = false;
        was_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut q = InputQueue::new();
        q.push(InputEvent::DragStart { x: 1.0, y: 2.0 });
        q.push(InputEvent::Scroll { delta_y: 3.0 });
        q.push(InputEvent::DragEnd);
        let got: Vec<_> = q.drain().collect();
        assert_eq!(got.len(), 3);
        assert_eq!(got[2], InputEvent::DragEnd);
        assert!(q.is_empty());
    }

    #[test]
    fn wheel_units_scale() {
        assert_eq!(wheel_delta_px(3.0, WheelUnit::Line), 120.0);
        assert_eq!(wheel_delta_px(-2.0, WheelUnit::Pixel), -2.0);
        assert_eq!(WheelUnit::from_dom_mode(2), WheelUnit::Page);
    }

    #[test]
    fn click_tracker_separates_clicks_from_drags() {
        let mut t = ClickTracker::default();
        t.down(10.0, 10.0);
        t.moved_to(12.0, 11.0);
        assert!(t.up());
        t.down(10.0, 10.0);
        t.moved_to(30.0, 10.0);
        t.moved_to(10.0, 10.0);
        assert!(!t.up());
        assert!(!t.up());
    }
}
