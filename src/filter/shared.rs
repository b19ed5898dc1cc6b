//! Atomically replaceable class filter
//!
//! A [`ClassList`] is never mutated after construction. When the rules
//! change, a new filter is built off to the side and published by swapping
//! the shared pointer; readers holding the previous snapshot keep using it
//! until they ask for a fresh one.

use std::sync::{Arc, PoisonError, RwLock};

use super::ClassList;

#[derive(Debug)]
pub struct SharedClassList {
    current: RwLock<Arc<ClassList>>,
}

impl SharedClassList {
    pub fn new(list: ClassList) -> Self {
        Self {
            current: RwLock::new(Arc::new(list)),
        }
    }

    /// Snapshot of the filter in effect right now
    pub fn current(&self) -> Arc<ClassList> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the filter; returns the one it supersedes
    pub fn publish(&self, list: ClassList) -> Arc<ClassList> {
        let next = Arc::new(list);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(
            "Publishing class filter with {} nodes",
            next.tree().node_count()
        );
        std::mem::replace(&mut *guard, next)
    }

    /// Shorthand for `current().should_process(..)`
    pub fn should_process(&self, class_name: &str) -> bool {
        self.current().should_process(class_name)
    }
}

impl From<ClassList> for SharedClassList {
    fn from(list: ClassList) -> Self {
        Self::new(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_publish_swaps_filter() {
        let shared = SharedClassList::new(ClassList::for_package("a"));
        assert!(shared.should_process("a/X"));
        assert!(!shared.should_process("b/X"));

        let previous = shared.publish(ClassList::for_package("b"));
        assert!(previous.should_process("a/X"));
        assert!(!shared.should_process("a/X"));
        assert!(shared.should_process("b/X"));
    }

    #[test]
    fn test_snapshot_outlives_publish() {
        let shared = SharedClassList::new(ClassList::for_package("a"));
        let snapshot = shared.current();

        shared.publish(ClassList::for_package("b"));

        assert!(snapshot.should_process("a/X"));
        assert!(!snapshot.should_process("b/X"));
    }

    #[test]
    fn test_concurrent_readers_see_complete_filters() {
        let shared = Arc::new(SharedClassList::new(ClassList::for_package("a")));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        let list = shared.current();
                        // Exactly one of the two packages is included in every published filter
                        assert_ne!(list.should_process("a/X"), list.should_process("b/X"));
                    }
                })
            })
            .collect();

        for i in 0..100 {
            let package = if i % 2 == 0 { "b" } else { "a" };
            shared.publish(ClassList::for_package(package));
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
