use crate::constants::*;
use crate::note::Note;

/// Receiver of note-on requests; implemented by the WebAudio and cpal synths.
pub trait NoteSink {
    fn play_note(&mut self, note: Note, duration_sec: f32);
}

/// Collects requests; useful when audio is unavailable or in tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<(Note, f32)>,
}

impl NoteSink for RecordingSink {
    fn play_note(&mut self, note: Note, duration_sec: f32) {
        self.played.push((note, duration_sec));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    #[default]
    Triangle,
}

/// ADSR amplitude envelope. Times in seconds, sustain as a level in 0..1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            attack: ENVELOPE_ATTACK_SEC,
            decay: ENVELOPE_DECAY_SEC,
            sustain: ENVELOPE_SUSTAIN_LEVEL,
            release: ENVELOPE_RELEASE_SEC,
        }
    }
}

impl Envelope {
    /// Level at `t` seconds after note-on for a note held `hold` seconds.
    pub fn amplitude_at(&self, t: f32, hold: f32) -> f32 {
        if t < 0.0 {
            return 0.0;
        }
        if t < hold {
            return self.held_level(t);
        }
        let from = self.held_level(hold);
        let since = t - hold;
        if since >= self.release || self.release <= 0.0 {
            return 0.0;
        }
        from * (1.0 - since / self.release)
    }

    fn held_level(&self, t: f32) -> f32 {
        if t < self.attack {
            return t / self.attack.max(1e-6);
        }
        let td = t - self.attack;
        if td < self.decay {
            return 1.0 - (1.0 - self.sustain) * (td / self.decay.max(1e-6));
        }
        self.sustain
    }

    /// Total audible length of a note held for `hold` seconds.
    pub fn total_duration(&self, hold: f32) -> f32 {
        hold.max(0.0) + self.release
    }
}

pub fn render_wave_sample(phase: f32, wave: Waveform) -> f32 {
    use std::f32::consts::PI;
    let saw = {
        let t = phase / (2.0 * PI);
        2.0 * (t - t.floor()) - 1.0
    };
    match wave {
        Waveform::Sine => phase.sin(),
        Waveform::Square => {
            if phase.sin() >= 0.0 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Saw => saw,
        Waveform::Triangle => 2.0 * saw.abs() - 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shape() {
        let env = Envelope::default();
        assert_eq!(env.amplitude_at(-0.1, 1.5), 0.0);
        assert!((env.amplitude_at(0.01, 1.5) - 0.5).abs() < 1e-4);
        assert!((env.amplitude_at(0.02, 1.5) - 1.0).abs() < 1e-4);
        assert!((env.amplitude_at(1.0, 1.5) - 0.4).abs() < 1e-6);
        assert!((env.amplitude_at(1.9, 1.5) - 0.2).abs() < 1e-4);
        assert!(env.amplitude_at(2.3, 1.5) < 1e-6);
        assert_eq!(env.amplitude_at(2.5, 1.5), 0.0);
        assert!((env.total_duration(1.5) - 2.3).abs() < 1e-6);
    }

    #[test]
    fn release_starts_from_current_level_when_cut_short() {
        let env = Envelope::default();
        let at_release = env.amplitude_at(0.01, 0.01);
        assert!(at_release <= 1.0);
        assert!(env.amplitude_at(0.02, 0.01) < at_release);
    }

    #[test]
    fn waves_stay_in_unit_range() {
        for wave in [Waveform::Sine, Waveform::Square, Waveform::Saw, Waveform::Triangle] {
            for i in 0..64 {
                let phase = i as f32 * 0.2;
                let v = render_wave_sample(phase, wave);
                assert!((-1.0..=1.0).contains(&v), "{wave:?} at {phase}: {v}");
            }
        }
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::default();
        sink.play_note("C4".parse().unwrap(), 1.5);
        sink.play_note("D4".parse().unwrap(), 0.5);
        assert_eq!(sink.played.len(), 2);
        assert_eq!(sink.played[1].0.to_string(), "D4");
    }
}
