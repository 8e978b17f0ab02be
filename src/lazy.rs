//! Restartable lazy sequences.
//!
//! A [`LazySeq`] wraps a factory that produces a *fresh* iterator every time it is pulled, so the
//! same logical sequence can be read any number of times by independent consumers. Nothing is
//! computed until a terminal call ([`LazySeq::to_vec`], [`LazySeq::count`], iteration) is made.
//!
//! [`LazySeq::bake`] is the one place where evaluation is forced: it stores the elements in a
//! shared array and later pulls clone out of that array instead of re-running the factory.

use std::fmt;
use std::sync::Arc;

/// Iterator handed out by a [`LazySeq`] pull.
pub type SeqIter<T> = Box<dyn Iterator<Item = T> + Send>;

type Factory<T> = Arc<dyn Fn() -> SeqIter<T> + Send + Sync>;

enum Source<T> {
    Baked(Arc<[T]>),
    Deferred(Factory<T>),
}

/// A cheaply cloneable handle to a re-evaluable sequence of `T`.
pub struct LazySeq<T> {
    source: Source<T>,
}

impl<T> Clone for LazySeq<T> {
    fn clone(&self) -> Self {
        let source = match &self.source {
            Source::Baked(data) => Source::Baked(Arc::clone(data)),
            Source::Deferred(factory) => Source::Deferred(Arc::clone(factory)),
        };
        Self { source }
    }
}

impl<T> fmt::Debug for LazySeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::Baked(data) => f
                .debug_struct("LazySeq")
                .field("baked_len", &data.len())
                .finish(),
            Source::Deferred(_) => f.debug_struct("LazySeq").field("deferred", &true).finish(),
        }
    }
}

impl<T> LazySeq<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap already materialized values. The result counts as baked.
    pub fn from_vec(values: Vec<T>) -> Self {
        Self {
            source: Source::Baked(Arc::from(values)),
        }
    }

    /// Wrap a factory. It is invoked once per pull and must start from the beginning each time.
    pub fn from_fn<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: Iterator<Item = T> + Send + 'static,
    {
        Self {
            source: Source::Deferred(Arc::new(move || Box::new(factory()) as SeqIter<T>)),
        }
    }

    pub fn empty() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Pull a fresh iterator over the sequence.
    pub fn iter(&self) -> SeqIter<T> {
        match &self.source {
            Source::Baked(data) => {
                let data = Arc::clone(data);
                Box::new((0..data.len()).map(move |i| data[i].clone()))
            }
            Source::Deferred(factory) => factory(),
        }
    }

    /// Materialize into a new vector.
    pub fn to_vec(&self) -> Vec<T> {
        match &self.source {
            Source::Baked(data) => data.to_vec(),
            Source::Deferred(factory) => factory().collect(),
        }
    }

    /// Number of elements. Runs the factory unless baked.
    pub fn count(&self) -> usize {
        match &self.source {
            Source::Baked(data) => data.len(),
            Source::Deferred(factory) => factory().count(),
        }
    }

    /// First element, pulling at most one item.
    pub fn first(&self) -> Option<T> {
        self.iter().next()
    }

    /// Lazily transform each element. `f` runs again on every pull of the derived sequence.
    pub fn map<U, F>(&self, f: F) -> LazySeq<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        LazySeq::from_fn(move || {
            let f = Arc::clone(&f);
            source.iter().map(move |v| f(v))
        })
    }

    /// Force evaluation into shared storage.
    ///
    /// Baking an already baked sequence returns a handle to the same storage.
    pub fn bake(&self) -> Self {
        match &self.source {
            Source::Baked(_) => self.clone(),
            Source::Deferred(factory) => Self::from_vec(factory().collect()),
        }
    }

    pub fn is_baked(&self) -> bool {
        matches!(self.source, Source::Baked(_))
    }

    /// `true` when both handles point at the same storage or factory.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.source, &other.source) {
            (Source::Baked(a), Source::Baked(b)) => Arc::ptr_eq(a, b),
            (Source::Deferred(a), Source::Deferred(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T> From<Vec<T>> for LazySeq<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::LazySeq;

    fn counted(calls: Arc<AtomicUsize>) -> LazySeq<i64> {
        LazySeq::from_fn(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            1..=3
        })
    }

    #[test]
    fn factory_is_not_run_until_pulled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seq = counted(Arc::clone(&calls));
        let doubled = seq.map(|v| v * 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn every_pull_restarts_from_the_beginning() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seq = counted(Arc::clone(&calls));

        let mut first = seq.iter();
        assert_eq!(first.next(), Some(1));
        // A second reader is unaffected by the partially consumed first one.
        assert_eq!(seq.to_vec(), vec![1, 2, 3]);
        assert_eq!(first.next(), Some(2));
        assert_eq!(seq.count(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn bake_runs_factory_once_and_is_idempotent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seq = counted(Arc::clone(&calls));
        assert!(!seq.is_baked());

        let baked = seq.bake();
        assert!(baked.is_baked());
        assert_eq!(baked.to_vec(), vec![1, 2, 3]);
        assert_eq!(baked.count(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let again = baked.bake();
        assert!(again.ptr_eq(&baked));
        assert!(!seq.ptr_eq(&baked));
    }

    #[test]
    fn from_vec_is_baked_and_empty_has_no_items() {
        let seq = LazySeq::from_vec(vec!["a".to_string()]);
        assert!(seq.is_baked());
        assert_eq!(seq.first(), Some("a".to_string()));
        assert_eq!(LazySeq::<i64>::empty().count(), 0);
    }
}
