use rand::{seq::SliceRandom, Rng};

use crate::{carousel::Carousel, course::Course, promise::Promise, store::DocumentStore};

pub const BADGES: [&str; 12] = [
    "💻", "👨‍💻", "👩‍💻", "🖥️", "📱", "🧑‍💻", "🔧", "🛠️", "📊", "📈", "💡", "🧩",
];

/// Landing page state: the featured courses and which one the carousel
/// currently shows.
#[derive(Default)]
pub struct Landing {
    pub courses: Promise<Vec<Course>>,
    carousel: Carousel,
    badges: Vec<Option<&'static str>>,
}

impl Landing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, store: &impl DocumentStore, collection: &str) {
        self.load_with_rng(store, collection, &mut rand::rng());
    }

    pub fn load_with_rng(
        &mut self,
        store: &impl DocumentStore,
        collection: &str,
        rng: &mut impl Rng,
    ) {
        let result = store.list_all(collection);
        if let Err(err) = &result {
            log::error!("failed to load featured courses: {}", err);
        }
        self.courses.resolve_or_reject(result);

        let len = self.featured_count();
        self.carousel.resize(len);
        self.badges = assign_badges(len, rng);
    }

    pub fn is_loading(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn featured_count(&self) -> usize {
        self.courses.resolved().map_or(0, Vec::len)
    }

    /// Loaded, but there is nothing to feature.
    pub fn is_empty_view(&self) -> bool {
        !self.is_loading() && self.featured_count() == 0
    }

    pub fn index(&self) -> usize {
        self.carousel.index()
    }

    pub fn current(&self) -> Option<&Course> {
        self.courses
            .resolved()
            .and_then(|courses| courses.get(self.carousel.index()))
    }

    pub fn badge(&self, index: usize) -> Option<&'static str> {
        self.badges.get(index).copied().flatten()
    }

    pub fn next(&mut self) -> usize {
        self.carousel.next()
    }

    pub fn previous(&mut self) -> usize {
        self.carousel.previous()
    }

    pub fn rotate_to(&mut self, index: usize) -> bool {
        self.carousel.select(index)
    }
}

/// Give each course a distinct badge.  Courses past the size of the badge
/// set get none.
fn assign_badges(len: usize, rng: &mut impl Rng) -> Vec<Option<&'static str>> {
    let mut pool = BADGES.to_vec();
    pool.shuffle(rng);
    (0..len).map(|i| pool.get(i).copied()).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::store::{FailOn, MemoryStore};

    fn store(count: usize) -> MemoryStore {
        MemoryStore::with_courses(
            "cursos",
            (0..count).map(|i| Course::new(i.to_string(), format!("Course {i}"), "")),
        )
    }

    #[test]
    fn rotates_through_featured_courses() {
        let mut landing = Landing::new();
        assert!(landing.is_loading());
        landing.load(&store(3), "cursos");
        assert!(!landing.is_loading());
        assert_eq!(landing.current().map(|c| &*c.id), Some("0"));
        landing.next();
        landing.next();
        assert_eq!(landing.current().map(|c| &*c.id), Some("2"));
        landing.next();
        assert_eq!(landing.index(), 0);
        landing.previous();
        assert_eq!(landing.index(), 2);
    }

    #[test]
    fn failed_load_shows_nothing() {
        let store = store(2);
        store.fail(FailOn::List);
        let mut landing = Landing::new();
        landing.load(&store, "cursos");
        assert!(landing.courses.is_rejected());
        assert!(landing.is_empty_view());
        assert_eq!(landing.current(), None);
        assert_eq!(landing.next(), 0);
    }

    #[test]
    fn badges_do_not_repeat() {
        let mut landing = Landing::new();
        landing.load(&store(14), "cursos");
        let badges: Vec<_> = (0..14).filter_map(|i| landing.badge(i)).collect();
        assert_eq!(badges.len(), BADGES.len());
        assert_eq!(badges.iter().collect::<HashSet<_>>().len(), BADGES.len());
        assert_eq!(landing.badge(12), None);
        assert_eq!(landing.badge(13), None);
    }

    #[test]
    fn reload_keeps_index_in_range() {
        let store = store(5);
        let mut landing = Landing::new();
        landing.load(&store, "cursos");
        assert!(landing.rotate_to(4));
        store.delete_one("cursos", "4").unwrap();
        store.delete_one("cursos", "3").unwrap();
        landing.load(&store, "cursos");
        assert_eq!(landing.index(), 0);
        assert!(!landing.rotate_to(3));
    }
}
