use crate::error::Error;

/// Outcome of a one-shot fetch.  `Empty` until the fetch settles.
#[derive(Clone, Debug)]
pub enum Promise<T, E = Error> {
    Empty,
    Resolved(T),
    Rejected(E),
}

impl<T, E> Promise<T, E> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Self::Resolved(val) => Some(val),
            _ => None,
        }
    }

    pub fn rejected(&self) -> Option<&E> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }

    pub fn resolve_or_reject(&mut self, res: Result<T, E>) {
        *self = match res {
            Ok(ok) => Self::Resolved(ok),
            Err(err) => Self::Rejected(err),
        };
    }
}

impl<T, E> Default for Promise<T, E> {
    fn default() -> Self {
        Self::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_once_resolved() {
        let mut promise: Promise<u32> = Promise::default();
        assert!(promise.is_empty());
        promise.resolve_or_reject(Ok(2));
        assert!(!promise.is_empty());
        assert_eq!(promise.resolved(), Some(&2));
        assert_eq!(promise.rejected(), None);
    }

    #[test]
    fn rejection_replaces_value() {
        let mut promise: Promise<u32> = Promise::default();
        promise.resolve_or_reject(Ok(1));
        let err = Error::StoreError("offline".to_string());
        promise.resolve_or_reject(Err(err.clone()));
        assert!(promise.is_rejected());
        assert_eq!(promise.resolved(), None);
        assert_eq!(promise.rejected(), Some(&err));
    }
}
