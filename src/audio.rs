use crate::constants::{DRONE_VOLUME, MASTER_GAIN, REVERB_SECONDS, REVERB_SEND, TONE_VOLUME};
use crate::core::{synthesize, FlipEvent, ToneSpec, TONE_BASE_FREQUENCIES};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio context: {0}")]
    Context(String),
    #[error("audio node: {0}")]
    Node(String),
    #[error("audio buffer: {0}")]
    Buffer(String),
    #[error("playback: {0}")]
    Playback(String),
}

fn js_err(e: JsValue) -> String {
    format!("{:?}", e)
}

#[derive(Clone, Copy, Debug)]
pub struct PlayOptions {
    pub looping: bool,
    pub volume: f32,
    pub offset_sec: f64,
    pub playback_rate: f32,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            looping: false,
            volume: 1.0,
            offset_sec: 0.0,
            playback_rate: 1.0,
        }
    }
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, AudioError> {
    let g = web::GainNode::new(audio_ctx).map_err(|e| AudioError::Node(format!("{label}: {}", js_err(e))))?;
    g.gain().set_value(value);
    Ok(g)
}

/// WebAudio graph: sources -> master -> destination, with a reverb send.
pub struct AudioEngine {
    ctx: web::AudioContext,
    master: web::GainNode,
    reverb_in: web::GainNode,
    tones: Vec<web::AudioBuffer>,
    pad: Option<web::AudioBuffer>,
    drone_started: Rc<Cell<bool>>,
}

impl AudioEngine {
    pub fn new() -> Result<Self, AudioError> {
        let ctx = web::AudioContext::new().map_err(|e| AudioError::Context(js_err(e)))?;
        let master = create_gain(&ctx, MASTER_GAIN, "master")?;
        _ = master.connect_with_audio_node(&ctx.destination());

        let reverb_in = create_gain(&ctx, REVERB_SEND, "reverb in")?;
        let reverb = web::ConvolverNode::new(&ctx).map_err(|e| AudioError::Node(js_err(e)))?;
        reverb.set_normalize(true);
        match build_impulse_response(&ctx, REVERB_SECONDS) {
            Ok(ir) => reverb.set_buffer(Some(&ir)),
            Err(e) => log::warn!("[audio] reverb disabled: {}", e),
        }
        let damp = web::BiquadFilterNode::new(&ctx).map_err(|e| AudioError::Node(js_err(e)))?;
        damp.set_type(web::BiquadFilterType::Lowpass);
        damp.frequency().set_value(2400.0);
        _ = reverb_in.connect_with_audio_node(&damp);
        _ = damp.connect_with_audio_node(&reverb);
        _ = reverb.connect_with_audio_node(&master);

        let mut engine = Self {
            ctx,
            master,
            reverb_in,
            tones: Vec::with_capacity(TONE_BASE_FREQUENCIES.len()),
            pad: None,
            drone_started: Rc::new(Cell::new(false)),
        };
        for freq in TONE_BASE_FREQUENCIES {
            let buf = engine.tone_buffer(&ToneSpec::chime(freq))?;
            engine.tones.push(buf);
        }
        engine.pad = engine.tone_buffer(&ToneSpec::pad()).ok();
        Ok(engine)
    }

    /// Synthesize `tone` into a mono buffer at the context's sample rate.
    pub fn tone_buffer(&self, tone: &ToneSpec) -> Result<web::AudioBuffer, AudioError> {
        let sr = self.ctx.sample_rate();
        let mut samples = synthesize(tone, sr);
        let len = samples.len().max(1) as u32;
        let buf = self
            .ctx
            .create_buffer(1, len, sr)
            .map_err(|e| AudioError::Buffer(js_err(e)))?;
        if !samples.is_empty() {
            buf.copy_to_channel(&mut samples, 0)
                .map_err(|e| AudioError::Buffer(js_err(e)))?;
        }
        Ok(buf)
    }

    pub fn play(&self, buffer: &web::AudioBuffer, opts: PlayOptions) -> Result<(), AudioError> {
        let src = self
            .ctx
            .create_buffer_source()
            .map_err(|e| AudioError::Node(js_err(e)))?;
        src.set_buffer(Some(buffer));
        src.set_loop(opts.looping);
        src.playback_rate().set_value(opts.playback_rate);
        let gain = create_gain(&self.ctx, opts.volume, "voice")?;
        _ = src.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(&self.master);
        _ = gain.connect_with_audio_node(&self.reverb_in);
        src.start_with_when_and_grain_offset(self.ctx.current_time(), opts.offset_sec.max(0.0))
            .map_err(|e| AudioError::Playback(js_err(e)))
    }

    /// Chime for a flip; failures are logged and dropped.
    pub fn play_flip(&self, ev: &FlipEvent) {
        let Some(buf) = self.tones.get(ev.tone_index) else {
            return;
        };
        let opts = PlayOptions {
            volume: TONE_VOLUME,
            playback_rate: ev.playback_rate,
            ..PlayOptions::default()
        };
        if let Err(e) = self.play(buf, opts) {
            log::debug!("[audio] flip tone dropped: {}", e);
        }
    }

    /// Ask the browser to start audio. Safe to call on every gesture; errors
    /// (autoplay policy) are swallowed and the next gesture tries again.
    pub fn resume(self: &Rc<Self>) {
        if self.ctx.state() == web::AudioContextState::Running {
            self.start_drone();
            return;
        }
        let promise: js_sys::Promise = match self.ctx.resume() {
            Ok(p) => p,
            Err(e) => {
                log::debug!("[audio] resume refused: {:?}", e);
                return;
            }
        };
        let engine = self.clone();
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => engine.start_drone(),
                Err(e) => log::debug!("[audio] resume failed: {:?}", e),
            }
        });
    }

    fn start_drone(&self) {
        if self.drone_started.get() {
            return;
        }
        let Some(pad) = &self.pad else {
            return;
        };
        let opts = PlayOptions {
            looping: true,
            volume: DRONE_VOLUME,
            ..PlayOptions::default()
        };
        match self.play(pad, opts) {
            Ok(()) => {
                self.drone_started.set(true);
                log::info!("[audio] running");
            }
            Err(e) => log::debug!("[audio] drone not started: {}", e),
        }
    }
}

// Long, dark stereo impulse response from deterministic noise
fn build_impulse_response(ctx: &web::AudioContext, seconds: f32) -> Result<web::AudioBuffer, AudioError> {
    let sr = ctx.sample_rate();
    let len = (sr * seconds) as u32;
    let ir = ctx
        .create_buffer(2, len, sr)
        .map_err(|e| AudioError::Buffer(js_err(e)))?;
    // simple xorshift32 per channel
    let mut seeds: [u32; 2] = [0x1234ABCD, 0x7890FEDC];
    for (ch, seed) in seeds.iter_mut().enumerate() {
        let mut buf: Vec<f32> = vec![0.0; len as usize];
        let dt = 1.0_f32 / sr;
        for (i, v) in buf.iter_mut().enumerate() {
            let mut x = *seed;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            *seed = x;
            let n = (x as f32 / u32::MAX as f32) * 2.0 - 1.0;
            let t = i as f32 * dt;
            let decay = (-t / (seconds * 0.35)).exp();
            *v = n * decay;
        }
        ir.copy_to_channel(&mut buf, ch as i32)
            .map_err(|e| AudioError::Buffer(js_err(e)))?;
    }
    Ok(ir)
}
