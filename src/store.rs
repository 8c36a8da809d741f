//! In-memory show store.
//!
//! [`Collection`] is the generic id-to-record table; [`ShowStore`] is the
//! cloneable, lock-guarded handle the HTTP layer gets as router state. Nothing
//! here is durable: state lives exactly as long as the process.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Store-assigned record identifier.
pub type Id = u64;

/// One tracked show.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Show {
    pub id: Id,
    pub name: String,
    pub episodes_seen: u32,
}

/// Fields for a show that has no id yet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewShow {
    pub name: String,
    pub episodes_seen: u32,
}

/// A partial update. `None` fields leave the stored value alone.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ShowPatch {
    pub name: Option<String>,
    pub episodes_seen: Option<u32>,
}

impl ShowPatch {
    fn apply(self, show: &mut Show) {
        if let Some(name) = self.name {
            show.name = name;
        }
        if let Some(episodes_seen) = self.episodes_seen {
            show.episodes_seen = episodes_seen;
        }
    }
}

/// Anything stored in a [`Collection`] carries its own id.
pub trait Record: Clone {
    fn id(&self) -> Id;
}

impl Record for Show {
    fn id(&self) -> Id {
        self.id
    }
}

// ── Collection ────────────────────────────────────────────────────────────────

/// Records of one kind keyed by id.
///
/// Ids are handed out from a counter that only moves forward, so iteration
/// in id order is insertion order and a deleted id is never reused.
#[derive(Debug)]
pub struct Collection<T> {
    records: BTreeMap<Id, T>,
    next_id: Id,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { records: BTreeMap::new(), next_id: 1 }
    }
}

impl<T: Record> Collection<T> {
    /// Builds a collection from existing records. The next id is one past the
    /// largest id present. A later record with a duplicate id replaces the
    /// earlier one.
    pub fn from_records(initial: impl IntoIterator<Item = T>) -> Self {
        let records: BTreeMap<Id, T> = initial.into_iter().map(|r| (r.id(), r)).collect();
        let next_id = records.keys().next_back().map_or(1, |max| max + 1);
        Self { records, next_id }
    }

    pub fn list(&self) -> Vec<T> {
        self.records.values().cloned().collect()
    }

    pub fn get(&self, id: Id) -> Option<T> {
        self.records.get(&id).cloned()
    }

    /// Allocates the next id, builds the record from it, stores it.
    pub fn create(&mut self, build: impl FnOnce(Id) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let record = build(id);
        self.records.insert(id, record.clone());
        record
    }

    /// Mutates the record in place. `None` if there is no record with `id`.
    pub fn update(&mut self, id: Id, apply: impl FnOnce(&mut T)) -> Option<T> {
        let record = self.records.get_mut(&id)?;
        apply(record);
        Some(record.clone())
    }

    pub fn delete(&mut self, id: Id) -> Option<T> {
        self.records.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── ShowStore ─────────────────────────────────────────────────────────────────

/// Shared handle to the "shows" collection.
///
/// Cloning is cheap and every clone sees the same data. Each method takes the
/// lock once, so a lookup and the mutation that depends on it cannot be split
/// by another request.
#[derive(Clone, Debug, Default)]
pub struct ShowStore {
    shows: Arc<Mutex<Collection<Show>>>,
}

impl ShowStore {
    pub fn new(initial: impl IntoIterator<Item = Show>) -> Self {
        Self { shows: Arc::new(Mutex::new(Collection::from_records(initial))) }
    }

    /// A store holding the demo catalogue the service starts with.
    pub fn seeded() -> Self {
        Self::new(seed_shows())
    }

    pub fn list(&self) -> Vec<Show> {
        self.shows.lock().list()
    }

    pub fn get(&self, id: Id) -> Option<Show> {
        self.shows.lock().get(id)
    }

    pub fn create(&self, new: NewShow) -> Show {
        let show = self.shows.lock().create(|id| Show {
            id,
            name: new.name,
            episodes_seen: new.episodes_seen,
        });
        debug!(id = show.id, name = %show.name, "show created");
        show
    }

    pub fn update(&self, id: Id, patch: ShowPatch) -> Option<Show> {
        let updated = self.shows.lock().update(id, |show| patch.apply(show));
        if updated.is_some() {
            debug!(id, "show updated");
        }
        updated
    }

    pub fn delete(&self, id: Id) -> Option<Show> {
        let removed = self.shows.lock().delete(id);
        if removed.is_some() {
            debug!(id, "show deleted");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.shows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.lock().is_empty()
    }
}

fn seed_shows() -> Vec<Show> {
    [
        (1, "Game of Thrones", 0),
        (2, "Naruto", 220),
        (3, "Black Mirror", 3),
        (4, "Avatar: The Last Airbender", 56),
        (5, "Hunter X Hunter", 148),
    ]
    .into_iter()
    .map(|(id, name, episodes_seen)| Show { id, name: name.to_owned(), episodes_seen })
    .collect()
}
