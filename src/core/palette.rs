use super::rng::RandomSource;

pub type Rgb = [f32; 3];

/// Gradient stops for a card face plus the accent used by its particle burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub stops: [Rgb; 3],
    pub accent: Rgb,
}

impl Palette {
    /// Stops for the back face: same colors, reversed.
    pub fn back_stops(&self) -> [Rgb; 3] {
        [self.stops[2], self.stops[1], self.stops[0]]
    }
}

pub const PALETTES: &[Palette] = &[
    // ember
    Palette {
        stops: [[0.98, 0.45, 0.09], [0.86, 0.15, 0.33], [0.36, 0.07, 0.38]],
        accent: [1.0, 0.62, 0.25],
    },
    // lagoon
    Palette {
        stops: [[0.13, 0.83, 0.75], [0.05, 0.46, 0.72], [0.06, 0.12, 0.38]],
        accent: [0.45, 0.95, 0.92],
    },
    // orchid
    Palette {
        stops: [[0.93, 0.55, 0.96], [0.55, 0.27, 0.86], [0.18, 0.09, 0.42]],
        accent: [0.96, 0.74, 1.0],
    },
    // moss
    Palette {
        stops: [[0.75, 0.93, 0.36], [0.25, 0.65, 0.35], [0.06, 0.26, 0.2]],
        accent: [0.82, 1.0, 0.5],
    },
    // dusk
    Palette {
        stops: [[0.99, 0.82, 0.45], [0.95, 0.45, 0.45], [0.28, 0.18, 0.45]],
        accent: [1.0, 0.88, 0.6],
    },
    // glacier
    Palette {
        stops: [[0.88, 0.95, 1.0], [0.5, 0.7, 0.95], [0.16, 0.24, 0.5]],
        accent: [0.85, 0.93, 1.0],
    },
    // rust
    Palette {
        stops: [[0.94, 0.63, 0.35], [0.62, 0.28, 0.16], [0.2, 0.1, 0.08]],
        accent: [1.0, 0.7, 0.42],
    },
    // neon
    Palette {
        stops: [[0.2, 1.0, 0.6], [0.1, 0.55, 1.0], [0.75, 0.1, 0.9]],
        accent: [0.4, 1.0, 0.8],
    },
];

pub fn random_palette(rng: &mut impl RandomSource) -> Palette {
    PALETTES[rng.index(PALETTES.len())]
}

/// `#rrggbb` for handing colors to a 2D canvas.
pub fn rgb_to_css(c: Rgb) -> String {
    let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", ch(c[0]), ch(c[1]), ch(c[2]))
}
