//! In-memory [`NoteStore`] keyed by id, listed in insertion order.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use uuid::Uuid;

use super::{NewNote, Note, NoteStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    by_id: HashMap<Uuid, Arc<Note>>,
    order: Vec<Uuid>,
}

/// Thread-safe in-memory note store.
///
/// Wraps an `Arc<RwLock<_>>` so that:
/// - Concurrent readers (list, get, count) never block each other.
/// - A writer holds the lock only for one map insert and one push.
#[derive(Clone, Debug)]
pub struct MemoryNoteStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryNoteStore {
    /// Create a new, empty [`MemoryNoteStore`].
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }
}

impl Default for MemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("note store lock poisoned".into())
}

impl NoteStore for MemoryNoteStore {
    fn create(&self, note: NewNote) -> Result<Note, StoreError> {
        let stored = Note {
            id: Uuid::new_v4(),
            title: note.title,
            content: note.content,
            date: Utc::now(),
        };
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.order.push(stored.id);
        inner.by_id.insert(stored.id, Arc::new(stored.clone()));
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<Note>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.by_id.get(id))
            .map(|n| (**n).clone())
            .collect())
    }

    fn get(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.by_id.get(&id).map(|n| (**n).clone()))
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().map_err(poisoned)?.order.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_note(title: &str) -> NewNote {
        NewNote {
            title: Some(title.into()),
            content: format!("{title}-sealed"),
        }
    }

    #[test]
    fn starts_empty() {
        let store = MemoryNoteStore::new();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn create_assigns_id_and_keeps_content_opaque() {
        let store = MemoryNoteStore::new();
        let a = store.create(new_note("a")).unwrap();
        let b = store.create(new_note("b")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.content, "a-sealed");
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = MemoryNoteStore::new();
        for t in ["first", "second", "third"] {
            store.create(new_note(t)).unwrap();
        }
        let titles: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .filter_map(|n| n.title)
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn get_by_id() {
        let store = MemoryNoteStore::new();
        let created = store.create(new_note("x")).unwrap();
        assert_eq!(store.get(created.id).unwrap(), Some(created));
        assert_eq!(store.get(Uuid::new_v4()).unwrap(), None);
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryNoteStore::new();
        let other = store.clone();
        store.create(new_note("shared")).unwrap();
        assert_eq!(other.count().unwrap(), 1);
    }

    #[test]
    fn many_creates_stay_addressable() {
        let store = MemoryNoteStore::new();
        let created: Vec<_> = (0..5_000)
            .map(|i| store.create(new_note(&i.to_string())).unwrap())
            .collect();
        assert_eq!(store.count().unwrap(), 5_000);
        for note in created.iter().step_by(97) {
            assert_eq!(store.get(note.id).unwrap().as_ref(), Some(note));
        }
        let listed = store.list().unwrap();
        assert_eq!(listed.first(), created.first());
        assert_eq!(listed.last(), created.last());
    }

    #[test]
    fn concurrent_creates_are_all_kept() {
        let store = MemoryNoteStore::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for j in 0..25 {
                        store.create(new_note(&format!("{i}-{j}"))).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.count().unwrap(), 200);
        assert_eq!(store.list().unwrap().len(), 200);
    }

    #[test]
    fn poisoned_lock_surfaces_as_backend_error() {
        let store = MemoryNoteStore::new();
        let inner = Arc::clone(&store.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(matches!(store.count(), Err(StoreError::Backend(_))));
        assert!(matches!(
            store.create(new_note("x")),
            Err(StoreError::Backend(_))
        ));
    }
}
