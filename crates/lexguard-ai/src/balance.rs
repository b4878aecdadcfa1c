//! Seeded downsampling of the Safe class.
//!
//! Keeps every risky row and at most `safe_ratio` Safe rows per risky row,
//! then shuffles. The result stays skewed toward Safe on purpose, mirroring
//! how most of a real contract is unremarkable boilerplate.

use lexguard_core::{BalancePolicy, CorpusError, CorpusRow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::{SliceRandom, index};
use tracing::debug;

/// Balance labelled rows under `policy`.
///
/// Sampling and shuffling each use a fresh RNG seeded with `policy.seed`, so
/// the output is identical for identical input order and seed.
pub fn balance(
    rows: Vec<CorpusRow>,
    policy: &BalancePolicy,
) -> Result<Vec<CorpusRow>, CorpusError> {
    let total = rows.len();
    let (mut risky, safe): (Vec<CorpusRow>, Vec<CorpusRow>) =
        rows.into_iter().partition(|row| row.label.is_risky());

    if risky.is_empty() {
        return Err(CorpusError::EmptyPositiveSet { total });
    }

    let safe_target = risky.len().saturating_mul(policy.safe_ratio);
    let available = safe.len();

    let sampled: Vec<CorpusRow> = if available <= safe_target {
        safe
    } else {
        let mut rng = StdRng::seed_from_u64(policy.seed);
        let picks = index::sample(&mut rng, available, safe_target);
        let mut slots: Vec<Option<CorpusRow>> = safe.into_iter().map(Some).collect();
        picks
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect()
    };

    debug!(
        risky = risky.len(),
        safe_available = available,
        safe_kept = sampled.len(),
        "balanced corpus"
    );

    risky.extend(sampled);
    let mut rng = StdRng::seed_from_u64(policy.seed);
    risky.shuffle(&mut rng);
    Ok(risky)
}
