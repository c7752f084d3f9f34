// ---------------- Native audio (cpal) ----------------
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use piano_core::audio::{render_wave_sample, Envelope, NoteSink, Waveform};
use piano_core::constants::MASTER_GAIN;
use piano_core::note::Note;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug)]
struct Voice {
    phase: f32,     // radians
    phase_inc: f32, // radians per sample
    elapsed: f32,   // seconds since note-on
    hold: f32,
}

struct SynthState {
    sample_rate: f32,
    envelope: Envelope,
    wave: Waveform,
    voices: Vec<Voice>,
}

impl SynthState {
    fn mix_sample(&mut self) -> f32 {
        let dt = 1.0 / self.sample_rate;
        let env = self.envelope;
        let wave = self.wave;
        let mut out = 0.0f32;
        self.voices.retain_mut(|v| {
            out += render_wave_sample(v.phase, wave) * env.amplitude_at(v.elapsed, v.hold);
            v.phase = (v.phase + v.phase_inc) % std::f32::consts::TAU;
            v.elapsed += dt;
            v.elapsed < env.total_duration(v.hold)
        });
        (out * MASTER_GAIN).tanh()
    }
}

/// cpal output stream fed by a shared voice list. Without an output device
/// the synth stays silent.
pub struct CpalSynth {
    state: Arc<Mutex<SynthState>>,
    _stream: Option<cpal::Stream>,
}

impl CpalSynth {
    pub fn start() -> Self {
        let state = Arc::new(Mutex::new(SynthState {
            sample_rate: 48_000.0,
            envelope: Envelope::default(),
            wave: Waveform::Triangle,
            voices: Vec::new(),
        }));
        let stream = match open_stream(Arc::clone(&state)) {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("[audio] disabled: {e:#}");
                None
            }
        };
        Self {
            state,
            _stream: stream,
        }
    }
}

impl NoteSink for CpalSynth {
    fn play_note(&mut self, note: Note, duration_sec: f32) {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let sr = guard.sample_rate;
        guard.voices.push(Voice {
            phase: 0.0,
            phase_inc: std::f32::consts::TAU * note.frequency_hz() / sr,
            elapsed: 0.0,
            hold: duration_sec.max(0.0),
        });
    }
}

fn open_stream(state: Arc<Mutex<SynthState>>) -> anyhow::Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("no output device"))?;
    let config = device.default_output_config()?;
    let channels = config.channels() as usize;
    {
        let mut guard = state.lock().unwrap_or_else(|e| e.into_inner());
        guard.sample_rate = config.sample_rate().0 as f32;
    }
    log::info!(
        "[audio] {} Hz, {} ch, {:?}",
        config.sample_rate().0,
        channels,
        config.sample_format()
    );

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), channels, state)?,
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), channels, state)?,
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), channels, state)?,
        other => anyhow::bail!("unsupported sample format {other:?}"),
    };
    stream.play()?;
    Ok(stream)
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    state: Arc<Mutex<SynthState>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let err_fn = |err| log::error!("[audio] stream error: {err}");
    device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            let mut guard = state.lock().unwrap_or_else(|e| e.into_inner());
            for frame in data.chunks_mut(channels.max(1)) {
                let v = T::from_sample(guard.mix_sample());
                for sample in frame.iter_mut() {
                    *sample = v;
                }
            }
        },
        err_fn,
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SynthState {
        SynthState {
            sample_rate: 1000.0,
            envelope: Envelope::default(),
            wave: Waveform::Sine,
            voices: Vec::new(),
        }
    }

    #[test]
    fn voices_retire_after_release() {
        let mut s = state();
        s.voices.push(Voice {
            phase: 0.0,
            phase_inc: 0.3,
            elapsed: 0.0,
            hold: 0.1,
        });
        // 0.1 s hold + 0.8 s release at 1 kHz
        for _ in 0..=900 {
            let v = s.mix_sample();
            assert!(v.abs() <= 1.0);
        }
        assert!(s.voices.is_empty());
    }

    #[test]
    fn silence_without_voices() {
        let mut s = state();
        assert_eq!(s.mix_sample(), 0.0);
    }
}
