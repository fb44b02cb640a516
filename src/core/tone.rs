use std::f32::consts::TAU;

/// Envelope and pitch for a synthesized one-shot tone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneSpec {
    pub duration_sec: f32,
    pub frequency_hz: f32,
    pub gain: f32,
    pub attack_sec: f32,
    pub release_sec: f32,
}

impl ToneSpec {
    /// Short bell-like chime played on a flip.
    pub fn chime(frequency_hz: f32) -> Self {
        Self {
            duration_sec: 0.9,
            frequency_hz,
            gain: 0.35,
            attack_sec: 0.01,
            release_sec: 0.75,
        }
    }

    /// Long low tone looped underneath everything.
    pub fn pad() -> Self {
        Self {
            duration_sec: 4.0,
            frequency_hz: 65.0, // whole cycles over the 4 s loop
            gain: 0.12,
            attack_sec: 0.0,
            release_sec: 0.0,
        }
    }
}

// Partial weights relative to the fundamental
const PARTIALS: [(f32, f32); 3] = [(1.0, 1.0), (2.0, 0.3), (3.0, 0.12)];

/// Render `tone` into mono samples at `sample_rate`.
///
/// Linear attack, then an exponential release that lands on exact silence at
/// the last sample. A zero attack/release gives a flat envelope, which loops
/// cleanly when the duration holds a whole number of cycles.
pub fn synthesize(tone: &ToneSpec, sample_rate: f32) -> Vec<f32> {
    let len = (tone.duration_sec.max(0.0) * sample_rate).round() as usize;
    let norm: f32 = PARTIALS.iter().map(|(_, w)| w).sum();
    let release_start = (tone.duration_sec - tone.release_sec).max(0.0);
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let t = i as f32 / sample_rate;
        let mut s = 0.0;
        for (mult, weight) in PARTIALS {
            s += (TAU * tone.frequency_hz * mult * t).sin() * weight;
        }
        out.push(s / norm * tone.gain * envelope(tone, t, release_start));
    }
    if tone.release_sec > 0.0 {
        if let Some(last) = out.last_mut() {
            *last = 0.0;
        }
    }
    out
}

#[inline]
fn envelope(tone: &ToneSpec, t: f32, release_start: f32) -> f32 {
    let attack = if tone.attack_sec > 0.0 {
        (t / tone.attack_sec).min(1.0)
    } else {
        1.0
    };
    let release = if tone.release_sec > 0.0 && t > release_start {
        let x = ((t - release_start) / tone.release_sec).clamp(0.0, 1.0);
        // exp curve rescaled to hit 0 at x = 1
        ((-5.0 * x).exp() - (-5.0f32).exp()) / (1.0 - (-5.0f32).exp())
    } else {
        1.0
    };
    attack * release
}
