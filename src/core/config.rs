use super::constants::*;

/// Runtime knobs for a session. Defaults come from `constants`.
#[derive(Clone, Debug, PartialEq)]
pub struct ToyConfig {
    /// Fixed card count; `None` draws one from `CARD_COUNT_MIN..=CARD_COUNT_MAX`.
    pub card_count: Option<usize>,
    pub flips_before_reset: u32,
    pub reset_delay_sec: f32,
    pub label_linger_sec: f32,
    pub flip_rate_per_sec: f32,
    pub dust_count: usize,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ToyConfig {
    fn default() -> Self {
        Self {
            card_count: None,
            flips_before_reset: FLIPS_BEFORE_RESET,
            reset_delay_sec: RESET_DELAY_SEC,
            label_linger_sec: LABEL_LINGER_SEC,
            flip_rate_per_sec: FLIP_RATE_PER_SEC,
            dust_count: DUST_COUNT,
            seed: None,
        }
    }
}

impl ToyConfig {
    /// Read overrides from a URL query string such as `?seed=7&cards=12`.
    /// Unknown keys and unparsable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut cfg = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let mut kv = pair.splitn(2, '=');
            let key = kv.next().unwrap_or("");
            let value = kv.next().unwrap_or("");
            match key {
                "seed" => {
                    if let Ok(seed) = value.parse::<u64>() {
                        cfg.seed = Some(seed);
                    }
                }
                "cards" => {
                    if let Ok(n) = value.parse::<usize>() {
                        cfg.card_count = Some(n.clamp(CARD_COUNT_MIN, CARD_COUNT_MAX));
                    }
                }
                "dust" => {
                    if let Ok(n) = value.parse::<usize>() {
                        cfg.dust_count = n.min(4096);
                    }
                }
                _ => {}
            }
        }
        cfg
    }

    /// Clamp values into ranges the controller can work with.
    pub fn sanitized(mut self) -> Self {
        self.flips_before_reset = self.flips_before_reset.max(1);
        self.reset_delay_sec = self.reset_delay_sec.max(0.0);
        self.label_linger_sec = self.label_linger_sec.max(0.0);
        if !(self.flip_rate_per_sec > 0.0) {
            self.flip_rate_per_sec = FLIP_RATE_PER_SEC;
        }
        self.card_count = self.card_count.map(|n| n.max(1));
        self
    }
}
