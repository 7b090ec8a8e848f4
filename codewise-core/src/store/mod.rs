mod firestore;
mod memory;

pub use firestore::{FirestoreConfig, FirestoreStore};
pub use memory::{FailOn, MemoryStore};

use std::sync::Arc;

use crate::{
    course::{Course, CourseDraft},
    error::Error,
};

/// Hosted document collection holding courses.
///
/// Every call is a single remote request (or a sequence of page requests for
/// `list_all`); implementations do not retry.
pub trait DocumentStore: Send + Sync {
    /// All documents of `collection`, in the order the store returns them.
    fn list_all(&self, collection: &str) -> Result<Vec<Course>, Error>;

    fn get_one(&self, collection: &str, id: &str) -> Result<Course, Error>;

    fn delete_one(&self, collection: &str, id: &str) -> Result<(), Error>;

    /// Insert a new document and return it with its store-assigned id.
    fn create_one(&self, collection: &str, draft: &CourseDraft) -> Result<Course, Error>;

    /// Overwrite the fields of an existing document.
    fn update_one(&self, collection: &str, id: &str, draft: &CourseDraft) -> Result<(), Error>;
}

pub type StoreHandle = Arc<dyn DocumentStore>;

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn list_all(&self, collection: &str) -> Result<Vec<Course>, Error> {
        (**self).list_all(collection)
    }

    fn get_one(&self, collection: &str, id: &str) -> Result<Course, Error> {
        (**self).get_one(collection, id)
    }

    fn delete_one(&self, collection: &str, id: &str) -> Result<(), Error> {
        (**self).delete_one(collection, id)
    }

    fn create_one(&self, collection: &str, draft: &CourseDraft) -> Result<Course, Error> {
        (**self).create_one(collection, draft)
    }

    fn update_one(&self, collection: &str, id: &str, draft: &CourseDraft) -> Result<(), Error> {
        (**self).update_one(collection, id, draft)
    }
}
