use std::io::{self, Write};

use codewise_core::{catalog::CourseCatalog, landing::Landing, store::DocumentStore};
use itertools::Itertools;

const SKELETON_CARDS: usize = 6;
const NOTHING_AVAILABLE: &str = "No courses available at the moment.";

fn skeleton(out: &mut impl Write) -> io::Result<()> {
    for _ in 0..SKELETON_CARDS {
        writeln!(out, "  ░░░░░░░░░░░░░░░░░░░░")?;
    }
    Ok(())
}

pub fn catalog<S: DocumentStore>(
    catalog: &CourseCatalog<S>,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "Course list")?;
    writeln!(
        out,
        "Explore our selection of courses and start your learning journey"
    )?;
    if catalog.is_loading() {
        return skeleton(out);
    }
    if !catalog.search_term().is_empty() {
        writeln!(out, "search: {:?}", catalog.search_term())?;
    }
    writeln!(out)?;

    if catalog.is_empty_view() {
        writeln!(out, "  {}", NOTHING_AVAILABLE)?;
    } else {
        for course in catalog.paged() {
            writeln!(out, "  {}  [{}]  {}", course.title, course.id, course.route())?;
            for line in course.description.lines() {
                writeln!(out, "      {}", line)?;
            }
        }
        writeln!(out)?;
        writeln!(
            out,
            "  < {} >",
            page_indicator(catalog.current_page(), catalog.page_count())
        )?;
    }

    if let Some(course) = catalog.editing() {
        writeln!(out, "editing {}: {}", course.id, course.title)?;
    }
    if let Some(err) = catalog.last_error() {
        writeln!(out, "last error: {}", err)?;
    }
    Ok(())
}

fn page_indicator(current: usize, count: usize) -> String {
    (0..count)
        .map(|page| {
            if page == current {
                format!("[{}]", page + 1)
            } else {
                (page + 1).to_string()
            }
        })
        .join(" ")
}

pub fn landing(landing: &Landing, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "CodeWise: learn to code, calmly")?;
    if landing.is_loading() {
        return skeleton(out);
    }
    match landing.current() {
        Some(course) => {
            let badge = landing.badge(landing.index()).unwrap_or(" ");
            writeln!(
                out,
                "{} {}  ({}/{})",
                badge,
                course.title,
                landing.index() + 1,
                landing.featured_count()
            )?;
            writeln!(out, "   {}", course.description)?;
            writeln!(out, "   {}", course.route())?;
        }
        None => writeln!(out, "  {}", NOTHING_AVAILABLE)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use codewise_core::{
        course::Course,
        store::{FailOn, MemoryStore},
    };

    use super::*;

    fn rendered<S: DocumentStore>(c: &CourseCatalog<S>) -> String {
        let mut out = Vec::new();
        catalog(c, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn marks_current_page() {
        assert_eq!(page_indicator(1, 3), "1 [2] 3");
        assert_eq!(page_indicator(0, 1), "[1]");
        assert_eq!(page_indicator(0, 0), "");
    }

    #[test]
    fn skeleton_while_loading() {
        let c = CourseCatalog::new(MemoryStore::new(), "cursos", 5);
        assert_eq!(rendered(&c).matches('░').count(), 20 * SKELETON_CARDS);
    }

    #[test]
    fn empty_and_failed_lists_say_so() {
        let store = MemoryStore::new();
        store.fail(FailOn::List);
        let mut c = CourseCatalog::new(store, "cursos", 5);
        let _ = c.load();
        let text = rendered(&c);
        assert!(text.contains(NOTHING_AVAILABLE));
        assert!(text.contains("last error"));
    }

    #[test]
    fn lists_current_page() {
        let store = MemoryStore::with_courses(
            "cursos",
            [
                Course::new("a", "Intro to X", "first\nsecond"),
                Course::new("b", "Advanced Y", ""),
            ],
        );
        let mut c = CourseCatalog::new(store, "cursos", 1);
        c.load().unwrap();
        c.set_page(1);
        let text = rendered(&c);
        assert!(text.contains("Advanced Y  [b]  /cursos/b"));
        assert!(!text.contains("Intro to X"));
        assert!(text.contains("< 1 [2] >"));
    }
}
