//! Lazy concatenation of several iterators into one.

use std::iter::FusedIterator;

/// Chains an ordered collection of iterators into a single lazy,
/// forward-only pass.
///
/// Each source is exhausted before the next one is started; empty
/// sources are skipped transparently. The sequence is single-pass and
/// not restartable: once [`Iterator::next`] has returned `None` it keeps
/// returning `None`.
pub struct ChainedIter<'a, T> {
    sources: std::vec::IntoIter<Box<dyn Iterator<Item = T> + 'a>>,
    current: Option<Box<dyn Iterator<Item = T> + 'a>>,
    item: Option<T>,
}

impl<'a, T> ChainedIter<'a, T> {
    pub fn new(sources: Vec<Box<dyn Iterator<Item = T> + 'a>>) -> Self {
        let mut chained = Self {
            sources: sources.into_iter(),
            current: None,
            item: None,
        };
        chained.seek();
        chained
    }

    pub fn pair(
        first: impl Iterator<Item = T> + 'a,
        second: impl Iterator<Item = T> + 'a,
    ) -> Self {
        Self::new(vec![Box::new(first), Box::new(second)])
    }

    /// Advance to the next available item, crossing source boundaries.
    fn seek(&mut self) {
        while self.item.is_none() {
            match self.current.as_mut().and_then(Iterator::next) {
                Some(item) => self.item = Some(item),
                None => match self.sources.next() {
                    Some(source) => self.current = Some(source),
                    None => break,
                },
            }
        }
    }
}

impl<T> Iterator for ChainedIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.item.take();
        if item.is_some() {
            self.seek();
        }
        item
    }
}

impl<T> FusedIterator for ChainedIter<'_, T> {}
