pub mod burst;
pub mod camera;
pub mod config;
pub mod constants;
pub mod controller;
pub mod deck;
pub mod dust;
pub mod palette;
pub mod pick;
pub mod rng;
pub mod schedule;
pub mod tone;
pub mod words;

pub use burst::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use controller::*;
pub use deck::*;
pub use dust::DustField;
pub use palette::*;
pub use rng::*;
pub use tone::*;
pub use words::*;

// Shaders bundled as string constants
pub static BACKGROUND_WGSL: &str = include_str!("../../shaders/background.wgsl");
pub static CARD_WGSL: &str = include_str!("../../shaders/card.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../../shaders/particles.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
