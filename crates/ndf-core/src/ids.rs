//! Identifier generation.
//!
//! IDs are ULIDs drawn from a single monotonic generator shared by every task
//! of a run. Within one process each ID is strictly greater than the previous
//! one, so two records can never share an ID.

use std::sync::{Arc, Mutex};

use ulid::Generator;

use crate::errors::CoreError;

/// Length of a rendered ID (Crockford base32 ULID).
pub const ID_LEN: usize = 26;

/// Cheaply cloneable handle to a shared monotonic ULID generator.
#[derive(Clone)]
pub struct IdGenerator {
    inner: Arc<Mutex<Generator>>,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Generator::new())),
        }
    }

    /// Mint a new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IdGeneration`] if the generator lock is poisoned or
    /// the random component overflows within a single millisecond.
    pub fn next_id(&self) -> Result<String, CoreError> {
        let mut generator = self
            .inner
            .lock()
            .map_err(|_| CoreError::IdGeneration("generator lock poisoned".to_string()))?;
        generator
            .generate()
            .map(|ulid| ulid.to_string())
            .map_err(|e| CoreError::IdGeneration(e.to_string()))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_have_ulid_shape() {
        let id = IdGenerator::new().next_id().unwrap();
        assert_eq!(id.len(), ID_LEN, "unexpected ID length: {id}");
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let ids = IdGenerator::new();
        let first = ids.next_id().unwrap();
        let second = ids.next_id().unwrap();
        assert!(second > first, "{second} should sort after {first}");
    }

    #[test]
    fn clones_share_one_sequence_across_threads() {
        let ids = IdGenerator::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || {
                    (0..1_000)
                        .map(|_| ids.next_id().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate ID minted");
            }
        }
        assert_eq!(seen.len(), 8_000);
    }
}
