use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::find::{FindQuery, MatchFindQuery};

pub const COURSES_COLLECTION: &str = "cursos";

#[derive(Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Course {
    pub id: Arc<str>,
    pub title: Arc<str>,
    pub description: Arc<str>,
}

impl Course {
    pub fn new(
        id: impl Into<Arc<str>>,
        title: impl Into<Arc<str>>,
        description: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Route of the course detail page.
    pub fn route(&self) -> String {
        course_route(&self.id)
    }
}

impl MatchFindQuery for Course {
    fn matches_query(&self, query: &FindQuery) -> bool {
        query.matches_str(&self.title)
    }
}

/// Editable part of a course, sent on create and update.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
}

impl CourseDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn into_course(self, id: impl Into<Arc<str>>) -> Course {
        Course::new(id, self.title, self.description)
    }
}

pub fn course_route(id: &str) -> String {
    format!("/{COURSES_COLLECTION}/{id}")
}
