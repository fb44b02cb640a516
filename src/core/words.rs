use super::rng::RandomSource;
use fnv::FnvHashSet;

pub const DEFAULT_WORDS: &[&str] = &[
    "ember", "drift", "hollow", "lumen", "quiet", "tide", "velvet", "orbit", "bloom", "cinder",
    "hush", "mirage", "ripple", "static", "thread", "wander", "glass", "signal", "fable", "nectar",
    "pulse", "vapor", "willow", "zenith",
];

/// Shuffled, without-replacement source of card labels.
///
/// Labels are popped from the end of `remaining`; once it runs dry the full
/// set is reshuffled and drawing continues. No label repeats within one pass,
/// but a word may come back right after a reshuffle.
#[derive(Clone, Debug)]
pub struct WordPool {
    all: Vec<String>,
    remaining: Vec<String>,
}

impl WordPool {
    /// Build a pool from `words`, dropping duplicates and blanks while keeping
    /// first-seen order. Falls back to `DEFAULT_WORDS` if nothing is left.
    pub fn new<S: AsRef<str>>(words: &[S]) -> Self {
        let mut seen = FnvHashSet::default();
        let mut all = Vec::with_capacity(words.len());
        for w in words {
            let w = w.as_ref().trim();
            if !w.is_empty() && seen.insert(w.to_string()) {
                all.push(w.to_string());
            }
        }
        if all.is_empty() {
            all = DEFAULT_WORDS.iter().map(|w| w.to_string()).collect();
        }
        Self {
            all,
            remaining: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_WORDS)
    }

    pub fn reshuffle(&mut self, rng: &mut impl RandomSource) {
        self.remaining.clear();
        self.remaining.extend(self.all.iter().cloned());
        rng.shuffle(&mut self.remaining);
    }

    pub fn draw(&mut self, rng: &mut impl RandomSource) -> String {
        if self.remaining.is_empty() {
            self.reshuffle(rng);
        }
        // `all` is never empty, so a reshuffled pool always has a word
        self.remaining.pop().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

impl Default for WordPool {
    fn default() -> Self {
        Self::with_defaults()
    }
}
