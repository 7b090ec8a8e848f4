use std::collections::{BTreeMap, HashSet};

use parking_lot::Mutex;
use rand::{distr::Alphanumeric, Rng};

use crate::{
    course::{Course, CourseDraft},
    error::Error,
    store::DocumentStore,
};

const GENERATED_ID_LEN: usize = 20;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FailOn {
    List,
    Get,
    Delete,
    Create,
    Update,
}

#[derive(Default)]
struct Inner {
    collections: BTreeMap<String, Vec<Course>>,
    failing: HashSet<FailOn>,
    requests: usize,
}

/// In-process document store.  Keeps insertion order per collection and can
/// be told to reject specific kinds of requests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_courses(collection: &str, courses: impl IntoIterator<Item = Course>) -> Self {
        let store = Self::new();
        store
            .inner
            .lock()
            .collections
            .insert(collection.to_string(), courses.into_iter().collect());
        store
    }

    /// Make every following request of `kind` fail until `recover` is called.
    pub fn fail(&self, kind: FailOn) {
        self.inner.lock().failing.insert(kind);
    }

    pub fn recover(&self, kind: FailOn) {
        self.inner.lock().failing.remove(&kind);
    }

    /// Number of requests served so far, failed ones included.
    pub fn requests(&self) -> usize {
        self.inner.lock().requests
    }

    fn begin(&self, kind: FailOn) -> Result<parking_lot::MutexGuard<'_, Inner>, Error> {
        let mut inner = self.inner.lock();
        inner.requests += 1;
        if inner.failing.contains(&kind) {
            log::debug!("memory store rejecting {:?}", kind);
            return Err(Error::StoreError(format!("{kind:?} request rejected")));
        }
        Ok(inner)
    }
}

fn generate_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_ID_LEN)
        .map(char::from)
        .collect()
}

fn not_found(collection: &str, id: &str) -> Error {
    Error::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

impl DocumentStore for MemoryStore {
    fn list_all(&self, collection: &str) -> Result<Vec<Course>, Error> {
        let inner = self.begin(FailOn::List)?;
        Ok(inner
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    fn get_one(&self, collection: &str, id: &str) -> Result<Course, Error> {
        let inner = self.begin(FailOn::Get)?;
        inner
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|c| &*c.id == id))
            .cloned()
            .ok_or_else(|| not_found(collection, id))
    }

    fn delete_one(&self, collection: &str, id: &str) -> Result<(), Error> {
        let mut inner = self.begin(FailOn::Delete)?;
        // Deleting a missing document succeeds, as it does on Firestore.
        if let Some(docs) = inner.collections.get_mut(collection) {
            docs.retain(|c| &*c.id != id);
        }
        Ok(())
    }

    fn create_one(&self, collection: &str, draft: &CourseDraft) -> Result<Course, Error> {
        let mut inner = self.begin(FailOn::Create)?;
        let course = draft.clone().into_course(generate_id());
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(course.clone());
        Ok(course)
    }

    fn update_one(&self, collection: &str, id: &str, draft: &CourseDraft) -> Result<(), Error> {
        let mut inner = self.begin(FailOn::Update)?;
        let course = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|c| &*c.id == id))
            .ok_or_else(|| not_found(collection, id))?;
        *course = draft.clone().into_course(course.id.clone());
        Ok(())
    }
}
