//! 49-key keyboard layout (C2..C6) and the key-press animation.

use crate::constants::*;
use crate::note::Note;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    White,
    Black,
}

#[derive(Clone, Debug)]
pub struct PianoKey {
    pub note: Note,
    pub kind: KeyKind,
    pub rest_position: Vec3,
    pub size: Vec3,
    pressed_for: Option<f32>,
}

impl PianoKey {
    pub fn is_pressed(&self) -> bool {
        self.pressed_for.is_some()
    }

    /// Rest position, lowered while the press animation runs.
    pub fn position(&self) -> Vec3 {
        if self.is_pressed() {
            self.rest_position - Vec3::Y * KEY_PRESS_DEPTH
        } else {
            self.rest_position
        }
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }
}

pub struct Piano {
    keys: Vec<PianoKey>,
}

impl Default for Piano {
    fn default() -> Self {
        Self::new()
    }
}

impl Piano {
    pub fn new() -> Self {
        let mut keys = Vec::with_capacity(49);
        let mut white_index = 0usize;
        // White keys first, then black keys, each keyed to its left white neighbour.
        for midi in 36u8..=84 {
            let Some(note) = Note::from_midi(midi) else {
                continue;
            };
            if note.is_sharp() {
                continue;
            }
            keys.push(PianoKey {
                note,
                kind: KeyKind::White,
                rest_position: Vec3::new(
                    (white_index as f32 - KEY_CENTER_INDEX) * KEY_SPACING,
                    WHITE_KEY_Y,
                    0.0,
                ),
                size: Vec3::from(WHITE_KEY_SIZE),
                pressed_for: None,
            });
            white_index += 1;
        }
        let mut slot = 0usize;
        for midi in 36u8..84 {
            let Some(note) = Note::from_midi(midi) else {
                continue;
            };
            if !note.is_sharp() {
                slot += 1;
                continue;
            }
            // `slot` has already advanced past the white key to the left.
            let left = slot as f32 - 1.0;
            keys.push(PianoKey {
                note,
                kind: KeyKind::Black,
                rest_position: Vec3::new(
                    (left - KEY_CENTER_INDEX) * KEY_SPACING + KEY_SPACING * 0.5,
                    BLACK_KEY_Y,
                    BLACK_KEY_Z,
                ),
                size: Vec3::from(BLACK_KEY_SIZE),
                pressed_for: None,
            });
        }
        Self { keys }
    }

    pub fn keys(&self) -> &[PianoKey] {
        &self.keys
    }

    pub fn key_index(&self, note: Note) -> Option<usize> {
        self.keys.iter().position(|k| k.note == note)
    }

    pub fn key(&self, note: Note) -> Option<&PianoKey> {
        self.keys.iter().find(|k| k.note == note)
    }

    /// Start (or restart) the press animation. Returns the lowered key position.
    pub fn press(&mut self, note: Note) -> Option<Vec3> {
        let key = self.keys.iter_mut().find(|k| k.note == note)?;
        key.pressed_for = Some(0.0);
        Some(key.position())
    }

    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        for key in &mut self.keys {
            if let Some(t) = key.pressed_for.as_mut() {
                *t += dt;
                if *t >= KEY_PRESS_SEC {
                    key.pressed_for = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(s: &str) -> Note {
        s.parse().unwrap()
    }

    #[test]
    fn forty_nine_unique_keys() {
        let piano = Piano::new();
        assert_eq!(piano.keys().len(), 49);
        let whites = piano.keys().iter().filter(|k| k.kind == KeyKind::White).count();
        assert_eq!(whites, 29);
        let mut notes: Vec<_> = piano.keys().iter().map(|k| k.note).collect();
        notes.sort();
        notes.dedup();
        assert_eq!(notes.len(), 49);
    }

    #[test]
    fn layout_matches_reference_positions() {
        let piano = Piano::new();
        let c4 = piano.key(note("C4")).unwrap();
        assert_eq!(c4.rest_position, Vec3::new(0.0, 0.1, 0.0));
        let c2 = piano.key(note("C2")).unwrap();
        assert!((c2.rest_position.x - (-14.0 * 0.9)).abs() < 1e-5);
        let c_sharp2 = piano.key(note("C#2")).unwrap();
        assert!((c_sharp2.rest_position.x - (-14.0 * 0.9 + 0.45)).abs() < 1e-5);
        assert_eq!(c_sharp2.rest_position.z, -0.75);
        let a_sharp5 = piano.key(note("A#5")).unwrap();
        assert!((a_sharp5.rest_position.x - ((26.0 - 14.0) * 0.9 + 0.45)).abs() < 1e-5);
    }

    #[test]
    fn press_animation_returns_after_delay() {
        let mut piano = Piano::new();
        let pressed = piano.press(note("E3")).unwrap();
        let key = piano.key(note("E3")).unwrap();
        assert!((pressed.y - (key.rest_position.y - 0.05)).abs() < 1e-6);
        assert_eq!(key.position(), pressed);
        piano.tick(0.1);
        assert!(piano.key(note("E3")).unwrap().is_pressed());
        piano.tick(0.06);
        assert!(!piano.key(note("E3")).unwrap().is_pressed());
    }

    #[test]
    fn pressing_unknown_note_is_none() {
        let mut piano = Piano::new();
        assert!(piano.press(note("C7")).is_none());
    }
}
