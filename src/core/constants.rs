// Deck, animation and camera tuning shared by the controller and the web frontend.
// Per-frame factors are expressed at a 60 Hz reference rate; see `frame_lerp`.

// Deck layout
pub const CARD_COUNT_MIN: usize = 10;
pub const CARD_COUNT_MAX: usize = 15; // inclusive
pub const RING_RADIUS: f32 = 3.4;
pub const RING_RADIUS_JITTER: f32 = 0.35; // +/- radial
pub const RING_HEIGHT_JITTER: f32 = 0.3; // +/- vertical
pub const CARD_WIDTH: f32 = 1.0;
pub const CARD_HEIGHT: f32 = 1.4;

// Round
pub const FLIPS_BEFORE_RESET: u32 = 5;
pub const RESET_DELAY_SEC: f32 = 1.4;

// Flip
pub const FLIP_DURATION_SEC: f32 = 0.55;
pub const FLIP_RATE_PER_SEC: f32 = 1.0 / FLIP_DURATION_SEC;
pub const REVEAL_PROGRESS: f32 = 0.5; // label becomes visible past this point
pub const LABEL_LINGER_SEC: f32 = 1.5; // delay before spin/label snap to hidden

// Idle smoothing (fraction per 60 Hz frame)
pub const IDLE_SPIN_DECAY: f32 = 0.08;
pub const IDLE_LABEL_DECAY: f32 = 0.04;
pub const WOBBLE_SLERP: f32 = 0.08;
pub const RING_EASE: f32 = 0.02;
pub const HOVER_EASE: f32 = 0.15;

// Idle motion
pub const WOBBLE_ANGLE: f32 = 0.12; // radians
pub const WOBBLE_SPEED_MIN: f32 = 0.4;
pub const WOBBLE_SPEED_MAX: f32 = 0.9;
pub const DRIFT_MAGNITUDE: f32 = 0.18;
pub const DRIFT_FREQUENCY: f32 = 0.25; // rad/sec of the drift sine
pub const BOB_AMPLITUDE: f32 = 0.06;
pub const BOB_FREQUENCY: f32 = 1.1;
pub const RING_DRIFT_AMPLITUDE: f32 = 0.06; // radians of yaw sway
pub const RING_DRIFT_FREQUENCY: f32 = 0.15;
pub const HOVER_LIFT: f32 = 0.18;

// Camera
pub const CAMERA_BASE_EYE: [f32; 3] = [0.0, 1.6, 8.5];
pub const CAMERA_LOOK_AT: [f32; 3] = [0.0, 0.0, 0.0];
pub const CAMERA_FOVY_DEG: f32 = 50.0;
pub const CAMERA_NUDGE: f32 = 0.12; // drift added per flip, along direction to card
pub const CAMERA_DRIFT_DECAY: f32 = 0.92; // geometric per 60 Hz frame
pub const CAMERA_DRIFT_FOLLOW: f32 = 0.05; // fraction of drift applied per frame
pub const CAMERA_OFFSET_RELAX: f32 = 0.02;
pub const CAMERA_ORBIT_AMPLITUDE: f32 = 0.9;
pub const CAMERA_ORBIT_FREQUENCY: f32 = 0.12;

// Bursts
pub const BURST_PARTICLES: usize = 20;
pub const BURST_LIFETIME_SEC: f32 = 1.0;
pub const BURST_JITTER: f32 = 0.02; // per-frame random displacement
pub const BURST_RISE: f32 = 0.012; // upward bias per frame
pub const BURST_FADE: f32 = 0.06;
pub const BURST_OPACITY_FLOOR: f32 = 0.05;
pub const BURST_SIZE_START: f32 = 0.09;
pub const BURST_SIZE_FLOOR: f32 = 0.02;

// Ambient dust
pub const DUST_COUNT: usize = 240;
pub const DUST_EXTENT: [f32; 3] = [7.0, 3.0, 7.0]; // half extents of the wrap box
pub const DUST_SPEED: f32 = 0.08;
pub const DUST_SIZE: f32 = 0.025;

// Tones (C major chord, Hz)
pub const TONE_BASE_FREQUENCIES: [f32; 4] = [261.63, 329.63, 392.0, 523.25];
pub const TONE_PITCH_MIN: f32 = 0.8;
pub const TONE_PITCH_MAX: f32 = 1.2;

// Frame clamp
pub const MAX_TICK_SEC: f32 = 0.1;
pub const REFERENCE_FPS: f32 = 60.0;

/// Convert a per-frame smoothing factor at `REFERENCE_FPS` into the factor
/// for a step of `dt_sec`.
#[inline]
pub fn frame_lerp(per_frame: f32, dt_sec: f32) -> f32 {
    1.0 - (1.0 - per_frame).powf(dt_sec * REFERENCE_FPS)
}

/// Geometric decay by `per_frame` over `dt_sec`.
#[inline]
pub fn frame_decay(per_frame: f32, dt_sec: f32) -> f32 {
    per_frame.powf(dt_sec * REFERENCE_FPS)
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
