//! Admin course list: the last fetched snapshot plus the search and page
//! state derived from it.
//!
//! The snapshot is only ever replaced by a successful `load()`, or shrunk by
//! one entry after the store confirms a delete.  Filtered and paged views are
//! recomputed from it on every read.

use std::collections::HashSet;

use crate::{
    config::Config,
    course::{Course, CourseDraft},
    error::Error,
    find::{filter_matching, FindQuery},
    paging::Pager,
    store::DocumentStore,
};

pub struct CourseCatalog<S> {
    store: S,
    collection: String,
    courses: Vec<Course>,
    loading: bool,
    query: FindQuery,
    pager: Pager,
    editing: Option<Course>,
    last_error: Option<Error>,
}

impl<S: DocumentStore> CourseCatalog<S> {
    pub fn new(store: S, collection: impl Into<String>, page_size: usize) -> Self {
        Self {
            store,
            collection: collection.into(),
            courses: Vec::new(),
            loading: true,
            query: FindQuery::default(),
            pager: Pager::new(page_size),
            editing: None,
            last_error: None,
        }
    }

    pub fn with_config(store: S, config: &Config) -> Self {
        Self::new(store, config.collection.clone(), config.page_size)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the whole collection and replace the snapshot.  A failed fetch
    /// keeps whatever was loaded before.
    pub fn load(&mut self) -> Result<(), Error> {
        self.loading = true;
        let result = self.store.list_all(&self.collection);
        self.loading = false;
        match result {
            Ok(courses) => {
                self.courses = dedup_by_id(courses);
                self.pager.clamp(self.filtered_len());
                self.last_error = None;
                log::debug!("loaded {} courses", self.courses.len());
                Ok(())
            }
            Err(err) => {
                log::error!("failed to load courses: {}", err);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn search_term(&self) -> &str {
        self.query.as_str()
    }

    /// Changing the search always goes back to the first page.
    pub fn set_search_term(&mut self, term: &str) {
        self.query = FindQuery::new(term);
        self.pager.reset();
    }

    pub fn filtered(&self) -> Vec<&Course> {
        filter_matching(&self.courses, &self.query)
    }

    fn filtered_len(&self) -> usize {
        self.courses
            .iter()
            .filter(|course| self.query.matches_str(&course.title))
            .count()
    }

    pub fn page_size(&self) -> usize {
        self.pager.page_size()
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count(self.filtered_len())
    }

    pub fn current_page(&self) -> usize {
        self.pager.current()
    }

    pub fn set_page(&mut self, index: usize) -> bool {
        let len = self.filtered_len();
        self.pager.set(index, len)
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.current_page() + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.current_page().checked_sub(1) {
            Some(index) => self.set_page(index),
            None => false,
        }
    }

    /// Courses on the current page, in snapshot order.
    pub fn paged(&self) -> Vec<&Course> {
        let filtered = self.filtered();
        self.pager.slice(&filtered).to_vec()
    }

    /// Nothing to show: the fetch finished and the current page is empty.
    pub fn is_empty_view(&self) -> bool {
        !self.loading && self.paged().is_empty()
    }

    /// Delete a course from the store.  The local copy is only dropped once
    /// the store confirms; on failure the snapshot is left as it was.
    pub fn request_delete(&mut self, id: &str) -> Result<(), Error> {
        if let Err(err) = self.store.delete_one(&self.collection, id) {
            log::error!("failed to delete course {}: {}", id, err);
            self.last_error = Some(err.clone());
            return Err(err);
        }
        match self.courses.iter().position(|course| &*course.id == id) {
            Some(index) => {
                self.courses.remove(index);
            }
            None => log::warn!("deleted course {} was not in the snapshot", id),
        }
        self.pager.clamp(self.filtered_len());
        self.last_error = None;
        log::info!("course deleted: {}", id);
        Ok(())
    }

    pub fn editing(&self) -> Option<&Course> {
        self.editing.as_ref()
    }

    pub fn request_edit(&mut self, course: &Course) {
        self.editing = Some(course.clone());
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Close the edit flow and reload everything from the store instead of
    /// patching the snapshot.
    pub fn on_edit_complete(&mut self) -> Result<(), Error> {
        self.editing = None;
        self.load()
    }

    /// Save the course being edited.  The edit stays open if the store
    /// rejects the update.
    pub fn submit_edit(&mut self, draft: &CourseDraft) -> Result<(), Error> {
        let id = match &self.editing {
            Some(course) => course.id.clone(),
            None => {
                return Err(Error::InvalidStateError(
                    "no course is being edited".to_string(),
                ))
            }
        };
        if let Err(err) = self.store.update_one(&self.collection, &id, draft) {
            log::error!("failed to update course {}: {}", id, err);
            self.last_error = Some(err.clone());
            return Err(err);
        }
        log::info!("course updated: {}", id);
        self.on_edit_complete()
    }

    pub fn create(&mut self, draft: &CourseDraft) -> Result<Course, Error> {
        let course = match self.store.create_one(&self.collection, draft) {
            Ok(course) => course,
            Err(err) => {
                log::error!("failed to create course: {}", err);
                self.last_error = Some(err.clone());
                return Err(err);
            }
        };
        log::info!("course created: {}", course.id);
        self.load()?;
        Ok(course)
    }

    pub fn find(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| &*course.id == id)
    }
}

fn dedup_by_id(courses: Vec<Course>) -> Vec<Course> {
    let mut seen = HashSet::with_capacity(courses.len());
    courses
        .into_iter()
        .filter(|course| {
            let fresh = seen.insert(course.id.clone());
            if !fresh {
                log::warn!("dropping duplicate course id {}", course.id);
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::{FailOn, MemoryStore};

    const COLLECTION: &str = "cursos";

    fn catalog(titles: &[&str], page_size: usize) -> CourseCatalog<Arc<MemoryStore>> {
        let courses = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Course::new(i.to_string(), *title, ""));
        let store = Arc::new(MemoryStore::with_courses(COLLECTION, courses));
        let mut catalog = CourseCatalog::new(store, COLLECTION, page_size);
        catalog.load().unwrap();
        catalog
    }

    fn ids(courses: &[&Course]) -> Vec<String> {
        courses.iter().map(|c| c.id.to_string()).collect()
    }

    #[test]
    fn starts_loading() {
        let store = MemoryStore::new();
        let catalog = CourseCatalog::new(store, COLLECTION, 5);
        assert!(catalog.is_loading());
        assert!(!catalog.is_empty_view());
    }

    #[test]
    fn search_resets_page() {
        let mut catalog = catalog(&["a", "b", "c", "d"], 2);
        assert!(catalog.set_page(1));
        catalog.set_search_term("c");
        assert_eq!(catalog.current_page(), 0);
        assert_eq!(ids(&catalog.paged()), vec!["2"]);
    }

    #[test]
    fn next_and_previous_stay_in_range() {
        let mut catalog = catalog(&["a", "b", "c"], 2);
        assert!(!catalog.previous_page());
        assert!(catalog.next_page());
        assert!(!catalog.next_page());
        assert_eq!(catalog.current_page(), 1);
        assert!(catalog.previous_page());
        assert_eq!(catalog.current_page(), 0);
    }

    #[test]
    fn delete_on_last_page_clamps() {
        let mut catalog = catalog(&["a", "b", "c"], 2);
        assert!(catalog.set_page(1));
        catalog.request_delete("2").unwrap();
        assert_eq!(catalog.current_page(), 0);
        assert_eq!(ids(&catalog.paged()), vec!["0", "1"]);
    }

    #[test]
    fn failed_delete_keeps_snapshot() {
        let mut catalog = catalog(&["a", "b"], 5);
        catalog.store().fail(FailOn::Delete);
        let before = catalog.courses().to_vec();
        assert!(catalog.request_delete("0").is_err());
        assert_eq!(catalog.courses(), before.as_slice());
        assert!(catalog.last_error().is_some());
    }

    #[test]
    fn duplicate_ids_are_dropped() {
        let store = MemoryStore::with_courses(
            COLLECTION,
            [
                Course::new("x", "first", ""),
                Course::new("x", "second", ""),
                Course::new("y", "third", ""),
            ],
        );
        let mut catalog = CourseCatalog::new(store, COLLECTION, 5);
        catalog.load().unwrap();
        let titles: Vec<_> = catalog.courses().iter().map(|c| &*c.title).collect();
        assert_eq!(titles, vec!["first", "third"]);
    }

    #[test]
    fn refresh_failure_keeps_previous_snapshot() {
        let mut catalog = catalog(&["a", "b"], 5);
        catalog.store().fail(FailOn::List);
        assert!(catalog.load().is_err());
        assert!(!catalog.is_loading());
        assert_eq!(catalog.courses().len(), 2);
        catalog.store().recover(FailOn::List);
        catalog.load().unwrap();
        assert!(catalog.last_error().is_none());
    }

    #[test]
    fn submit_without_edit_is_rejected() {
        let mut catalog = catalog(&["a"], 5);
        assert!(matches!(
            catalog.submit_edit(&CourseDraft::new("b", "")),
            Err(Error::InvalidStateError(_))
        ));
    }

    #[test]
    fn failed_update_keeps_edit_open() {
        let mut catalog = catalog(&["a"], 5);
        let course = catalog.courses()[0].clone();
        catalog.request_edit(&course);
        catalog.store().fail(FailOn::Update);
        assert!(catalog.submit_edit(&CourseDraft::new("b", "")).is_err());
        assert_eq!(catalog.editing(), Some(&course));
        catalog.cancel_edit();
        assert_eq!(catalog.editing(), None);
        assert_eq!(&*catalog.courses()[0].title, "a");
    }
}
