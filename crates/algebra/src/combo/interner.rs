use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use tracing::debug;

use crate::base::SpeciesIndex;

/// Number of insertions between full sweeps of dead entries.
const PRUNE_INTERVAL: usize = 4096;

/// Immutable content of an allele combo.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct ComboData {
    pub(crate) species_index: SpeciesIndex,
    pub(crate) bit_mask: u64,
    pub(crate) num_loci: usize,
    pub(crate) possible_genomes: Box<[u64]>,
}

impl ComboData {
    fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// Content-addressed store of live combos.
///
/// Entries are held weakly: a combo is freed when its last handle drops and
/// its slot is reclaimed on the next touch of its bucket or the next sweep.
#[derive(Default)]
struct ComboInterner {
    buckets: HashMap<u64, Vec<Weak<ComboData>>>,
    inserted_since_prune: usize,
}

impl ComboInterner {
    fn intern(&mut self, data: ComboData) -> Rc<ComboData> {
        let bucket = self.buckets.entry(data.content_hash()).or_default();
        bucket.retain(|weak| weak.strong_count() > 0);

        if let Some(existing) = bucket
            .iter()
            .filter_map(Weak::upgrade)
            .find(|existing| **existing == data)
        {
            return existing;
        }

        let shared = Rc::new(data);
        bucket.push(Rc::downgrade(&shared));

        self.inserted_since_prune += 1;
        if self.inserted_since_prune >= PRUNE_INTERVAL {
            self.prune();
        }
        shared
    }

    fn prune(&mut self) {
        let before = self.buckets.len();
        self.buckets.retain(|_, bucket| {
            bucket.retain(|weak| weak.strong_count() > 0);
            !bucket.is_empty()
        });
        self.inserted_since_prune = 0;
        debug!(
            before,
            after = self.buckets.len(),
            "pruned allele combo interner"
        );
    }

    fn live(&self) -> usize {
        self.buckets
            .values()
            .flatten()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

thread_local! {
    static INTERNER: RefCell<ComboInterner> = RefCell::new(ComboInterner::default());
}

/// Return the shared handle for `data`, creating it if no equal combo is live.
pub(crate) fn intern(data: ComboData) -> Rc<ComboData> {
    INTERNER.with(|interner| interner.borrow_mut().intern(data))
}

/// Number of distinct combos currently alive on this thread.
pub fn live_combos() -> usize {
    INTERNER.with(|interner| interner.borrow().live())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(mask: u64, genomes: &[u64]) -> ComboData {
        ComboData {
            species_index: 0,
            bit_mask: mask,
            num_loci: 1,
            possible_genomes: genomes.into(),
        }
    }

    #[test]
    fn test_equal_content_shares_allocation() {
        let a = intern(data(0b111, &[1, 2]));
        let b = intern(data(0b111, &[1, 2]));
        let c = intern(data(0b111, &[1, 3]));

        assert!(Rc::ptr_eq(&a, &b));
        assert!(!Rc::ptr_eq(&a, &c));
    }

    #[test]
    fn test_dropped_combo_is_released() {
        let mut interner = ComboInterner::default();
        let kept = interner.intern(data(0b111, &[5]));
        {
            let _dropped = interner.intern(data(0b111, &[6]));
            assert_eq!(interner.live(), 2);
        }
        assert_eq!(interner.live(), 1);

        interner.prune();
        assert_eq!(interner.buckets.len(), 1);
        assert_eq!(kept.possible_genomes.as_ref(), &[5]);
    }
}
