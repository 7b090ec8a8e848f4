/// Case-insensitive substring query.  Both sides are lowercased before
/// comparing, and the input is matched literally.
#[derive(Clone, Debug, Default)]
pub struct FindQuery {
    input: String,
    lowered: String,
}

impl FindQuery {
    pub fn new(query: &str) -> Self {
        Self {
            input: query.to_string(),
            lowered: query.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.input
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn matches_str(&self, s: &str) -> bool {
        s.to_lowercase().contains(&self.lowered)
    }
}

pub trait MatchFindQuery {
    fn matches_query(&self, query: &FindQuery) -> bool;
}

/// Keep the items matching `query`, preserving their order.
pub fn filter_matching<'a, T: MatchFindQuery>(
    items: impl IntoIterator<Item = &'a T>,
    query: &FindQuery,
) -> Vec<&'a T>
where
    T: 'a,
{
    items
        .into_iter()
        .filter(|item| item.matches_query(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Title(&'static str);

    impl MatchFindQuery for Title {
        fn matches_query(&self, query: &FindQuery) -> bool {
            query.matches_str(self.0)
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = FindQuery::default();
        assert!(query.is_empty());
        assert!(query.matches_str(""));
        assert!(query.matches_str("anything"));
    }

    #[test]
    fn ignores_case() {
        let query = FindQuery::new("InTrO");
        assert!(query.matches_str("Intro to X"));
        assert!(query.matches_str("an INTRODUCTION"));
        assert!(!query.matches_str("Advanced Y"));
    }

    #[test]
    fn metacharacters_are_literal() {
        let query = FindQuery::new("c++ (2nd ed.)");
        assert!(query.matches_str("Learn C++ (2nd Ed.) fast"));
        assert!(!query.matches_str("Learn C (2nd ed)"));
    }

    #[test]
    fn folds_case_by_lowercasing() {
        // Lowercasing maps the final capital sigma to 'ς', not 'σ'.
        assert!(!FindQuery::new("σ").matches_str("ΟΔΟΣ"));
        assert!(FindQuery::new("ς").matches_str("ΟΔΟΣ"));
        assert!(FindQuery::new("ΟΔΟΣ").matches_str("η οδος"));
    }

    #[test]
    fn filter_keeps_order() {
        let items = [Title("Rust b"), Title("Go"), Title("rust a")];
        let matched: Vec<_> = filter_matching(&items, &FindQuery::new("rust"))
            .into_iter()
            .map(|t| t.0)
            .collect();
        assert_eq!(matched, vec!["Rust b", "rust a"]);
    }
}
