// Rendering, texture and audio tuning for the web frontend.
// Deck/animation tuning lives in `core::constants`.

// Card face rasterization (matches the 1 x 1.4 card aspect)
pub const CARD_TEXTURE_WIDTH: u32 = 256;
pub const CARD_TEXTURE_HEIGHT: u32 = 358;
pub const LABEL_FONT: &str = "600 52px Georgia, 'Times New Roman', serif";

// Scene lighting and fog
pub const CLEAR_COLOR: [f64; 3] = [0.02, 0.02, 0.035];
pub const FOG_COLOR: [f32; 3] = [0.04, 0.04, 0.07];
pub const FOG_DENSITY: f32 = 0.075;
pub const LIGHT_POSITION: [f32; 3] = [2.5, 4.0, 6.0];
pub const LIGHT_COLOR: [f32; 3] = [1.0, 0.95, 0.9];
pub const AMBIENT_LIGHT: f32 = 0.35;
pub const HOVER_GLOW: f32 = 0.25;

// Particles
pub const DUST_COLOR: [f32; 3] = [0.75, 0.8, 1.0];
pub const DUST_ALPHA: f32 = 0.35;
pub const PARTICLE_INITIAL_CAPACITY: usize = 512;

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.8;
pub const BLOOM_THRESHOLD: f32 = 0.65;

// Audio levels
pub const MASTER_GAIN: f32 = 0.6;
pub const REVERB_SEND: f32 = 0.35;
pub const REVERB_SECONDS: f32 = 2.5;
pub const DRONE_VOLUME: f32 = 0.18;
pub const TONE_VOLUME: f32 = 0.8;

// Keys
pub const RESET_KEYS: [&str; 2] = ["r", "R"];
pub const HINT_KEYS: [&str; 2] = ["h", "H"];
