//! High score slot
//!
//! A single non-negative integer stored as decimal text under one key.

use crate::persistence::KeyValueStore;

pub struct HighScore;

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highscore";

    /// Read the stored high score. Missing or corrupt values count as zero.
    pub fn load(store: &impl KeyValueStore) -> u64 {
        match store.get(Self::STORAGE_KEY) {
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
            Some(text) => match text.trim().parse::<u64>() {
                Ok(score) => {
                    log::info!("Loaded high score {}", score);
                    score
                }
                Err(err) => {
                    log::warn!("Ignoring corrupt high score {:?}: {}", text, err);
                    0
                }
            },
        }
    }

    pub fn save(store: &mut impl KeyValueStore, score: u64) {
        store.set(Self::STORAGE_KEY, &score.to_string());
        log::debug!("High score saved ({})", score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn missing_is_zero() {
        assert_eq!(HighScore::load(&MemoryStore::new()), 0);
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        HighScore::save(&mut store, 9_870);
        assert_eq!(store.get("highscore").as_deref(), Some("9870"));
        assert_eq!(HighScore::load(&store), 9_870);
    }

    #[test]
    fn corrupt_is_zero() {
        for bad in ["", "abc", "-40", "12.5", "99999999999999999999999"] {
            let mut store = MemoryStore::new();
            store.set(HighScore::STORAGE_KEY, bad);
            assert_eq!(HighScore::load(&store), 0, "{bad:?}");
        }
    }

    #[test]
    fn surrounding_whitespace_tolerated() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, " 350\n");
        assert_eq!(HighScore::load(&store), 350);
    }
}
