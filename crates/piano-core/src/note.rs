use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A pitch in scientific notation, e.g. `C#4`. Middle C is `C4` (MIDI 60).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Note {
    midi: u8,
}

impl Note {
    /// `pitch_class` is 0..12 starting at C.
    pub fn new(pitch_class: u8, octave: i8) -> Option<Self> {
        if pitch_class >= 12 {
            return None;
        }
        let midi = (octave as i32 + 1) * 12 + pitch_class as i32;
        u8::try_from(midi).ok().filter(|m| *m <= 127).map(|midi| Self { midi })
    }

    pub fn from_midi(midi: u8) -> Option<Self> {
        (midi <= 127).then_some(Self { midi })
    }

    pub fn midi(self) -> u8 {
        self.midi
    }

    pub fn pitch_class(self) -> u8 {
        self.midi % 12
    }

    pub fn octave(self) -> i8 {
        (self.midi / 12) as i8 - 1
    }

    pub fn is_sharp(self) -> bool {
        NAMES[self.pitch_class() as usize].len() == 2
    }

    pub fn frequency_hz(self) -> f32 {
        midi_to_hz(self.midi as f32)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", NAMES[self.pitch_class() as usize], self.octave())
    }
}

impl FromStr for Note {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::InvalidNote(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(bad)?.to_ascii_uppercase();
        let base: i32 = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(bad()),
        };
        let rest = chars.as_str();
        let (accidental, octave_str) = match rest.as_bytes().first() {
            Some(b'#') => (1, &rest[1..]),
            Some(b'b') => (-1, &rest[1..]),
            _ => (0, rest),
        };
        let octave: i32 = octave_str.parse().map_err(|_| bad())?;
        let midi = (octave + 1) * 12 + base + accidental;
        u8::try_from(midi)
            .ok()
            .and_then(Note::from_midi)
            .ok_or_else(bad)
    }
}

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_round_names() {
        for name in ["C2", "C#4", "A4", "B5", "C6", "G#2"] {
            let n: Note = name.parse().unwrap();
            assert_eq!(n.to_string(), name);
        }
    }

    #[test]
    fn middle_c_and_a440() {
        assert_eq!("C4".parse::<Note>().unwrap().midi(), 60);
        let a4: Note = "A4".parse().unwrap();
        assert!((a4.frequency_hz() - 440.0).abs() < 1e-3);
    }

    #[test]
    fn flats_map_to_sharps() {
        assert_eq!("Db4".parse::<Note>(), "C#4".parse::<Note>());
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "H4", "C", "C#", "Cx4", "G9999"] {
            assert!(bad.parse::<Note>().is_err(), "{bad} should not parse");
        }
    }
}
