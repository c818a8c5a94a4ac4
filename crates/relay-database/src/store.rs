//! Typed document collections.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;
use tracing::info;

use relay_core::traits::Document;
use relay_entity::application::Application;
use relay_entity::delivery::DeliveryRecord;
use relay_entity::group::Group;
use relay_entity::history::EditHistoryEntry;
use relay_entity::notification::Notification;
use relay_entity::recipient::Recipient;
use relay_entity::user::User;

/// A collection of documents keyed by their sequence id.
#[derive(Debug)]
pub struct Collection<T: Document> {
    records: DashMap<i64, T>,
    sequence: AtomicI64,
}

impl<T: Document> Collection<T> {
    /// Creates an empty collection whose first id is 1.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            sequence: AtomicI64::new(0),
        }
    }

    fn key(id: T::Id) -> i64 {
        id.into()
    }

    /// Reserves the next id without inserting anything.
    pub fn next_id(&self) -> T::Id {
        T::Id::from(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Allocates an id, builds the document with it, and stores it.
    pub fn insert_with(&self, build: impl FnOnce(T::Id) -> T) -> T {
        let doc = build(self.next_id());
        self.records.insert(Self::key(doc.id()), doc.clone());
        doc
    }

    /// Stores a document that already carries its id, advancing the
    /// sequence past it.
    pub fn insert_existing(&self, doc: T) {
        let id = Self::key(doc.id());
        self.sequence.fetch_max(id, Ordering::SeqCst);
        self.records.insert(id, doc);
    }

    /// Returns a copy of the document.
    pub fn get(&self, id: T::Id) -> Option<T> {
        self.records.get(&Self::key(id)).map(|entry| entry.value().clone())
    }

    /// Whether a document with this id exists.
    pub fn contains(&self, id: T::Id) -> bool {
        self.records.contains_key(&Self::key(id))
    }

    /// Runs `f` on the stored document while holding its entry lock.
    ///
    /// `f` must not touch this collection again.
    pub fn modify<R>(&self, id: T::Id, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.records
            .get_mut(&Self::key(id))
            .map(|mut entry| f(entry.value_mut()))
    }

    /// Replaces an existing document. Returns `false` if it does not exist.
    pub fn replace(&self, doc: T) -> bool {
        match self.records.get_mut(&Self::key(doc.id())) {
            Some(mut entry) => {
                *entry.value_mut() = doc;
                true
            }
            None => false,
        }
    }

    /// Removes and returns the document.
    pub fn remove(&self, id: T::Id) -> Option<T> {
        self.records.remove(&Self::key(id)).map(|(_, doc)| doc)
    }

    /// Documents matching `predicate`, ordered by id.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let mut docs: Vec<T> = self
            .records
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        docs.sort_by_key(|doc| Self::key(doc.id()));
        docs
    }

    /// All documents, ordered by id.
    pub fn all(&self) -> Vec<T> {
        self.filter(|_| true)
    }

    /// Applies `f` to every document matching `predicate`. Returns the
    /// number of documents changed.
    pub fn modify_where(&self, predicate: impl Fn(&T) -> bool, f: impl Fn(&mut T)) -> usize {
        let mut changed = 0;
        for mut entry in self.records.iter_mut() {
            if predicate(entry.value()) {
                f(entry.value_mut());
                changed += 1;
            }
        }
        changed
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Document> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to every collection of the relay. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    /// Login accounts.
    pub users: Arc<Collection<User>>,
    /// Direct recipients.
    pub recipients: Arc<Collection<Recipient>>,
    /// Fan-out groups.
    pub groups: Arc<Collection<Group>>,
    /// External applications.
    pub applications: Arc<Collection<Application>>,
    /// Notifications.
    pub notifications: Arc<Collection<Notification>>,
    /// Delivery records.
    pub deliveries: Arc<Collection<DeliveryRecord>>,
    /// Edit history.
    pub edit_history: Arc<Collection<EditHistoryEntry>>,
}

impl DocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let store = Self::default();
        info!("Document store initialized");
        store
    }
}
