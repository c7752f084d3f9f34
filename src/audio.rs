//! WebAudio synth: one triangle oscillator per note with an ADSR gain ramp,
//! mixed dry and through a short procedural reverb.

use piano_core::audio::{Envelope, NoteSink, Waveform};
use piano_core::constants::{MASTER_GAIN, REVERB_SECONDS};
use piano_core::note::Note;
use web_sys as web;

const REVERB_WET: f32 = 0.35;
const START_LEAD_SEC: f64 = 0.005;

struct Graph {
    ctx: web::AudioContext,
    master: web::GainNode,
    reverb_in: web::GainNode,
}

pub struct WebSynth {
    graph: Option<Graph>,
    envelope: Envelope,
    waveform: Waveform,
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(ctx).map_err(|e| anyhow::anyhow!("{} GainNode: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

fn build_graph() -> anyhow::Result<Graph> {
    let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext: {:?}", e))?;
    let master = create_gain(&ctx, MASTER_GAIN, "master")?;
    master
        .connect_with_audio_node(&ctx.destination())
        .map_err(|e| anyhow::anyhow!("connect master: {:?}", e))?;

    let reverb_in = create_gain(&ctx, REVERB_WET, "reverb send")?;
    let reverb =
        web::ConvolverNode::new(&ctx).map_err(|e| anyhow::anyhow!("ConvolverNode: {:?}", e))?;
    reverb.set_normalize(true);
    // Stereo noise with an exponential tail
    let sr = ctx.sample_rate();
    let len = (sr * REVERB_SECONDS) as u32;
    if let Ok(ir) = ctx.create_buffer(2, len.max(1), sr) {
        let mut seeds: [u32; 2] = [0x1234_ABCD, 0x7890_FEDC];
        for (ch, seed) in seeds.iter_mut().enumerate() {
            let mut buf = vec![0.0_f32; len as usize];
            for (i, sample) in buf.iter_mut().enumerate() {
                let mut x = *seed;
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                *seed = x;
                let n = (x as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let t = i as f32 / sr;
                *sample = n * (1.0 - t / REVERB_SECONDS).max(0.0).powi(2);
            }
            _ = ir.copy_to_channel(&mut buf, ch as i32);
        }
        reverb.set_buffer(Some(&ir));
    }
    _ = reverb_in.connect_with_audio_node(&reverb);
    _ = reverb.connect_with_audio_node(&master);

    log::info!("[audio] graph ready at {} Hz", sr);
    Ok(Graph {
        ctx,
        master,
        reverb_in,
    })
}

impl WebSynth {
    /// A synth without a working AudioContext stays silent instead of failing.
    pub fn new() -> Self {
        let graph = match build_graph() {
            Ok(g) => Some(g),
            Err(e) => {
                log::warn!("[audio] disabled: {:?}", e);
                None
            }
        };
        Self {
            graph,
            envelope: Envelope::default(),
            waveform: Waveform::Triangle,
        }
    }

    /// Browsers start contexts suspended until a user gesture.
    pub fn resume(&self) {
        if let Some(g) = &self.graph {
            if g.ctx.state() != web::AudioContextState::Running {
                _ = g.ctx.resume();
                log::info!("[audio] resumed");
            }
        }
    }

    fn oscillator_type(&self) -> web::OscillatorType {
        match self.waveform {
            Waveform::Sine => web::OscillatorType::Sine,
            Waveform::Square => web::OscillatorType::Square,
            Waveform::Saw => web::OscillatorType::Sawtooth,
            Waveform::Triangle => web::OscillatorType::Triangle,
        }
    }
}

impl Default for WebSynth {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteSink for WebSynth {
    fn play_note(&mut self, note: Note, duration_sec: f32) {
        self.resume();
        let Some(g) = &self.graph else {
            return;
        };
        let Ok(src) = web::OscillatorNode::new(&g.ctx) else {
            log::warn!("[audio] OscillatorNode failed for {}", note);
            return;
        };
        src.set_type(self.oscillator_type());
        src.frequency().set_value(note.frequency_hz());
        let Ok(amp) = web::GainNode::new(&g.ctx) else {
            return;
        };

        let env = self.envelope;
        let hold = duration_sec.max(0.0) as f64;
        let t0 = g.ctx.current_time() + START_LEAD_SEC;
        let attack_end = t0 + env.attack as f64;
        let decay_end = attack_end + env.decay as f64;
        let release_start = (t0 + hold).max(decay_end);
        let end = release_start + env.release as f64;
        let gain = amp.gain();
        _ = gain.set_value_at_time(0.0, t0);
        _ = gain.linear_ramp_to_value_at_time(1.0, attack_end);
        _ = gain.linear_ramp_to_value_at_time(env.sustain, decay_end);
        _ = gain.set_value_at_time(env.sustain, release_start);
        _ = gain.linear_ramp_to_value_at_time(0.0, end);

        _ = src.connect_with_audio_node(&amp);
        _ = amp.connect_with_audio_node(&g.master);
        _ = amp.connect_with_audio_node(&g.reverb_in);
        _ = src.start_with_when(t0);
        _ = src.stop_with_when(end + 0.05);
    }
}
