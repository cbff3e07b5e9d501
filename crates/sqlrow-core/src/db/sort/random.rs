use crate::{
    config::ExecutionConfig,
    db::{expr::VariableArray, row::Row, sort::ComparerError},
    error::InternalError,
    obs::sink::{MetricsEvent, record},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{RngCore, SeedableRng},
};
use std::{
    cmp::Ordering,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering as AtomicOrdering},
    },
    time::{SystemTime, UNIX_EPOCH},
};
use xxhash_rust::xxh3::xxh3_64_with_seed;

static SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

///
/// RandomComparer
///
/// ORDER BY RANDOM. Each row draws one random key on first comparison and
/// keeps it, so repeated comparisons of the same pair stay consistent for
/// the whole sort pass.
///

#[derive(Debug)]
pub struct RandomComparer {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomComparer {
    /// Comparer with a fresh, unpredictable random source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(fresh_seed())
    }

    /// Comparer with a deterministic random source.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Seeded from `random_seed` when configured, fresh otherwise.
    #[must_use]
    pub fn from_config(config: &ExecutionConfig) -> Self {
        config.random_seed.map_or_else(Self::new, Self::with_seed)
    }

    pub fn compare(&self, left: &Row, right: &Row) -> Result<Ordering, InternalError> {
        let left = self.key_for(left)?;
        let right = self.key_for(right)?;

        Ok(left.cmp(&right))
    }

    /// Copies never share a random source, even with a seeded original.
    #[must_use]
    pub fn clone_with(&self, _variables: &Arc<VariableArray>) -> Self {
        Self::new()
    }

    fn key_for(&self, row: &Row) -> Result<u32, InternalError> {
        if let Some(key) = row.random_key() {
            return Ok(key);
        }

        let key = self
            .rng
            .lock()
            .map_err(|_| ComparerError::RandomSourcePoisoned)?
            .next_u32();
        row.set_random_key(key);
        record(MetricsEvent::RandomKeyAssigned);

        Ok(key)
    }
}

impl Default for RandomComparer {
    fn default() -> Self {
        Self::new()
    }
}

// Mix wall-clock time with a process-wide counter so comparers created in
// the same instant still diverge.
fn fresh_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let counter = SEED_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);

    xxh3_64_with_seed(&nanos.to_le_bytes(), counter)
}
