// ── Reactive entity collection ──
//
// Concurrent storage keyed by remote identity, with a `watch` snapshot
// that subscribers receive after every mutation.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

/// A concurrent, observable collection for one entity kind.
///
/// Snapshots are sorted by key so repeated reads list items in a stable order.
pub(crate) struct EntityCollection<K, T>
where
    K: Eq + Hash + Ord + Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    by_key: DashMap<K, Arc<T>>,
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<K, T> EntityCollection<K, T>
where
    K: Eq + Hash + Ord + Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            by_key: DashMap::new(),
            snapshot,
        }
    }

    /// Insert or replace an entity. Returns `true` if the key was new.
    pub(crate) fn upsert(&self, key: K, entity: T) -> bool {
        let is_new = self.by_key.insert(key, Arc::new(entity)).is_none();
        self.rebuild_snapshot();
        is_new
    }

    /// Insert or replace many entities with a single snapshot rebuild.
    pub(crate) fn upsert_many(&self, entities: impl IntoIterator<Item = (K, T)>) {
        for (key, entity) in entities {
            self.by_key.insert(key, Arc::new(entity));
        }
        self.rebuild_snapshot();
    }

    pub(crate) fn remove(&self, key: &K) -> Option<Arc<T>> {
        let removed = self.by_key.remove(key).map(|(_, v)| v);
        if removed.is_some() {
            self.rebuild_snapshot();
        }
        removed
    }

    /// Drop every entity matching `predicate`, e.g. all variations of one product.
    pub(crate) fn remove_where(&self, predicate: impl Fn(&K) -> bool) {
        let before = self.by_key.len();
        self.by_key.retain(|key, _| !predicate(key));
        if self.by_key.len() != before {
            self.rebuild_snapshot();
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<Arc<T>> {
        self.by_key.get(key).map(|r| Arc::clone(r.value()))
    }

    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }

    fn rebuild_snapshot(&self) {
        let mut entries: Vec<(K, Arc<T>)> = self
            .by_key
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let values = entries.into_iter().map(|(_, v)| v).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn upsert_reports_new_keys() {
        let col: EntityCollection<(i64, i64), String> = EntityCollection::new();
        assert!(col.upsert((1, 10), "a".into()));
        assert!(!col.upsert((1, 10), "b".into()));
        assert_eq!(col.len(), 1);
        assert_eq!(*col.get(&(1, 10)).unwrap(), "b");
    }

    #[test]
    fn snapshot_is_sorted_by_key() {
        let col: EntityCollection<(i64, i64), &str> = EntityCollection::new();
        col.upsert_many([((1, 30), "c"), ((1, 10), "a"), ((1, 20), "b")]);
        let snap = col.snapshot();
        let values: Vec<&str> = snap.iter().map(|v| **v).collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_where_filters_by_key() {
        let col: EntityCollection<(i64, i64, i64), u8> = EntityCollection::new();
        col.upsert_many([((1, 5, 1), 0), ((1, 5, 2), 0), ((1, 6, 1), 0)]);
        col.remove_where(|(_, product, _)| *product == 5);
        assert_eq!(col.len(), 1);
        assert!(col.get(&(1, 6, 1)).is_some());
    }

    #[test]
    fn subscribers_see_mutations() {
        let col: EntityCollection<(i64, i64), u8> = EntityCollection::new();
        let mut rx = col.subscribe();
        col.upsert((1, 1), 7);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
        col.remove(&(1, 1));
        assert!(rx.borrow_and_update().is_empty());
    }
}
