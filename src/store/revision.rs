//! Sequence-number guard for re-fetched collections.
//!
//! Every re-fetch takes a revision ticket from the coordinator before it
//! suspends. When two fetches of the same collection race, the response
//! holding the older ticket is dropped instead of overwriting newer data.

/// A server-owned value tagged with the revision that last replaced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Synced<T> {
    value: T,
    revision: u64,
}

impl<T> Synced<T> {
    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the value if `revision` is newer than the applied one.
    /// Returns whether the value was replaced.
    pub fn apply(&mut self, revision: u64, value: T) -> bool {
        if revision <= self.revision {
            tracing::debug!(
                stale = revision,
                current = self.revision,
                "Dropping superseded response"
            );
            return false;
        }
        self.value = value;
        self.revision = revision;
        true
    }

    /// Empty value that still rejects tickets up to `floor`.
    pub fn cleared(floor: u64) -> Self
    where
        T: Default,
    {
        Self {
            value: T::default(),
            revision: floor,
        }
    }

    /// Local edit that does not count as a server snapshot.
    pub fn modify(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_revision_replaces() {
        let mut synced = Synced::<Vec<u32>>::default();
        assert!(synced.apply(1, vec![1]));
        assert!(synced.apply(3, vec![3]));
        assert_eq!(synced.get(), &vec![3]);
        assert_eq!(synced.revision(), 3);
    }

    #[test]
    fn stale_revision_is_ignored() {
        let mut synced = Synced::<Vec<u32>>::default();
        synced.apply(5, vec![5]);
        assert!(!synced.apply(4, vec![4]));
        assert_eq!(synced.get(), &vec![5]);
    }

    #[test]
    fn cleared_rejects_older_tickets() {
        let mut synced = Synced::<Vec<u32>>::cleared(7);
        assert!(synced.get().is_empty());
        assert!(!synced.apply(6, vec![6]));
        assert!(synced.apply(8, vec![8]));
    }

    #[test]
    fn local_modify_keeps_revision() {
        let mut synced = Synced::<Vec<u32>>::default();
        synced.apply(2, vec![1, 2]);
        synced.modify(Vec::clear);
        assert!(synced.get().is_empty());
        assert_eq!(synced.revision(), 2);
    }
}
