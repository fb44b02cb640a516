// Host-side tests for tone synthesis.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod tone {
    include!("../src/core/tone.rs");
}

use tone::*;

const SR: f32 = 44_100.0;

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
}

#[test]
fn chime_has_requested_length_and_silent_ends() {
    let tone = ToneSpec::chime(440.0);
    let s = synthesize(&tone, SR);
    assert_eq!(s.len(), (tone.duration_sec * SR).round() as usize);
    assert_eq!(s[0], 0.0);
    assert_eq!(*s.last().unwrap(), 0.0);
    assert!(peak(&s) <= tone.gain + 1e-6);
    assert!(peak(&s) > tone.gain * 0.3);
}

#[test]
fn chime_decays_over_the_release() {
    let tone = ToneSpec::chime(523.25);
    let s = synthesize(&tone, SR);
    let window = (0.05 * SR) as usize;
    let early = peak(&s[window..2 * window]);
    let late = peak(&s[s.len() - 2 * window..s.len() - window]);
    assert!(late < early * 0.25, "early {early} late {late}");
}

#[test]
fn pad_loops_without_a_click() {
    let tone = ToneSpec::pad();
    let s = synthesize(&tone, SR);
    assert_eq!(s.len(), (4.0 * SR) as usize);
    // the sample after the last one would be the first again
    let step = (s[1] - s[0]).abs();
    let seam = (s[0] - s[s.len() - 1]).abs();
    assert!(seam <= step * 1.5 + 1e-6, "seam {seam} step {step}");
    assert!(peak(&s) <= tone.gain + 1e-6);
}

#[test]
fn empty_and_negative_durations_give_no_samples() {
    let mut tone = ToneSpec::chime(440.0);
    tone.duration_sec = 0.0;
    assert!(synthesize(&tone, SR).is_empty());
    tone.duration_sec = -1.0;
    assert!(synthesize(&tone, SR).is_empty());
}

#[test]
fn output_is_finite() {
    for f in [65.0, 261.63, 329.63, 392.0, 523.25] {
        let s = synthesize(&ToneSpec::chime(f), 22_050.0);
        assert!(s.iter().all(|x| x.is_finite()));
    }
}
