use crate::note::Note;

// Computer keyboard rows → piano octaves. Shifted digits give the sharps of
// the top row; the other rows alternate naturals and sharps chromatically.
const KEY_TABLE: &[(&str, &str)] = &[
    ("1", "C5"),
    ("!", "C#5"),
    ("2", "D5"),
    ("@", "D#5"),
    ("3", "E5"),
    ("4", "F5"),
    ("$", "F#5"),
    ("5", "G5"),
    ("%", "G#5"),
    ("6", "A5"),
    ("^", "A#5"),
    ("7", "B5"),
    ("8", "C6"),
    ("q", "C4"),
    ("w", "C#4"),
    ("e", "D4"),
    ("r", "D#4"),
    ("t", "E4"),
    ("y", "F4"),
    ("u", "F#4"),
    ("i", "G4"),
    ("o", "G#4"),
    ("p", "A4"),
    ("[", "A#4"),
    ("]", "B4"),
    ("a", "C3"),
    ("s", "C#3"),
    ("d", "D3"),
    ("f", "D#3"),
    ("g", "E3"),
    ("h", "F3"),
    ("j", "F#3"),
    ("k", "G3"),
    ("l", "G#3"),
    (";", "A3"),
    ("'", "A#3"),
    ("Enter", "B3"),
    ("z", "C2"),
    ("x", "C#2"),
    ("c", "D2"),
    ("v", "D#2"),
    ("b", "E2"),
    ("n", "F2"),
    ("m", "F#2"),
    (",", "G2"),
    (".", "G#2"),
    ("/", "A2"),
    ("`", "A#2"),
    ("Tab", "B2"),
];

/// Resolve a DOM-style key name (`KeyboardEvent.key`) to a note.
///
/// Single letters match in either case; named keys must match exactly.
pub fn note_for_key(key: &str) -> Option<Note> {
    let lowered;
    let lookup = if key.chars().count() == 1 {
        lowered = key.to_lowercase();
        lowered.as_str()
    } else {
        key
    };
    KEY_TABLE
        .iter()
        .find(|(k, _)| *k == lookup)
        .and_then(|(_, note)| note.parse().ok())
}

pub fn mapped_keys() -> impl Iterator<Item = &'static str> {
    KEY_TABLE.iter().map(|(k, _)| *k)
}
