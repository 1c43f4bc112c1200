//! High score cell
//!
//! A single integer persisted under the `highScore` key.

use crate::persistence::KeyValueStore;

/// Storage key (kept compatible with earlier browser builds)
pub const STORAGE_KEY: &str = "highScore";

/// Read the stored high score, 0 if absent or unreadable
pub fn load(store: &impl KeyValueStore) -> u64 {
    match store.get(STORAGE_KEY) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(_) => {
                log::warn!("Ignoring unreadable high score {:?}", raw);
                0
            }
        },
        None => {
            log::info!("No high score found, starting fresh");
            0
        }
    }
}

/// Persist a new high score
pub fn save(store: &mut impl KeyValueStore, score: u64) {
    store.set(STORAGE_KEY, &score.to_string());
    log::debug!("High score saved ({})", score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_defaults_to_zero() {
        assert_eq!(load(&MemoryStore::new()), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save(&mut store, 250);
        assert_eq!(store.get(STORAGE_KEY).as_deref(), Some("250"));
        assert_eq!(load(&store), 250);
    }

    #[test]
    fn test_garbage_defaults_to_zero() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "NaN");
        assert_eq!(load(&store), 0);
        store.set(STORAGE_KEY, "-5");
        assert_eq!(load(&store), 0);
    }
}
