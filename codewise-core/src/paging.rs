use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Client-side page window over a sequence of known length.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Pager {
    page_size: usize,
    current: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            // A zero page size would make every page count undefined.
            page_size: page_size.max(1),
            current: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Select `index` if it is a valid page for a sequence of `len` items.
    pub fn set(&mut self, index: usize, len: usize) -> bool {
        if index < self.page_count(len) {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Pull the current page back into range after the sequence shrank.
    pub fn clamp(&mut self, len: usize) {
        let count = self.page_count(len);
        if self.current >= count {
            self.current = count.saturating_sub(1);
        }
    }

    pub fn offset(&self) -> usize {
        self.current * self.page_size
    }

    /// Index range of the current page, clipped to `len`.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = self.offset().min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.window(items.len())]
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        let pager = Pager::new(5);
        assert_eq!(pager.page_count(0), 0);
        assert_eq!(pager.page_count(1), 1);
        assert_eq!(pager.page_count(5), 1);
        assert_eq!(pager.page_count(6), 2);
        assert_eq!(pager.page_count(11), 3);
    }

    #[test]
    fn out_of_range_page_is_ignored() {
        let mut pager = Pager::new(5);
        assert!(pager.set(1, 6));
        assert!(!pager.set(2, 6));
        assert_eq!(pager.current(), 1);
        assert!(!pager.set(0, 0));
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn last_page_is_partial() {
        let items: Vec<u32> = (0..12).collect();
        let mut pager = Pager::new(5);
        assert!(pager.set(2, items.len()));
        assert_eq!(pager.slice(&items), &[10, 11]);
        assert!(pager.set(1, items.len()));
        assert_eq!(pager.slice(&items), &[5, 6, 7, 8, 9]);
    }

    #[test]
    fn clamps_when_sequence_shrinks() {
        let mut pager = Pager::new(2);
        assert!(pager.set(2, 6));
        pager.clamp(3);
        assert_eq!(pager.current(), 1);
        pager.clamp(0);
        assert_eq!(pager.current(), 0);
    }

    #[test]
    fn window_never_overruns() {
        let mut pager = Pager::new(3);
        assert!(pager.set(3, 10));
        assert_eq!(pager.window(4), 4..4);
        assert_eq!(pager.window(10), 9..10);
    }

    #[test]
    fn zero_page_size_is_one() {
        assert_eq!(Pager::new(0).page_size(), 1);
    }
}
