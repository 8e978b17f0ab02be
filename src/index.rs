//! Row labels for [`crate::Series`] and [`crate::DataFrame`].

use crate::lazy::{LazySeq, SeqIter};
use crate::types::Value;

/// Variant of an [`Index`], chosen from the type of its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Integer or float labels (including the implicit `0..n` index).
    Number,
    /// Date/time labels.
    Date,
    /// Any other labels (strings, booleans, mixed).
    Generic,
}

impl IndexKind {
    /// Pick the variant matching `value`.
    pub fn for_value(value: &Value) -> Self {
        match value {
            Value::Int64(_) | Value::Float64(_) => Self::Number,
            Value::Date(_) => Self::Date,
            _ => Self::Generic,
        }
    }
}

/// An ordered, lazily evaluated sequence of labels.
///
/// Cloning an `Index` shares the underlying sequence, so every series projected out of a data
/// frame refers to the frame's index rather than a copy of it.
#[derive(Debug, Clone)]
pub struct Index {
    kind: Option<IndexKind>,
    values: LazySeq<Value>,
}

impl Index {
    /// Index over explicit labels. The variant is inferred from the first label.
    pub fn new(values: Vec<Value>) -> Self {
        Self::from_lazy(LazySeq::from_vec(values))
    }

    /// Index over a lazy label sequence. The variant is inferred on demand.
    pub fn from_lazy(values: LazySeq<Value>) -> Self {
        Self { kind: None, values }
    }

    /// Index with an explicit variant tag.
    pub fn with_kind(kind: IndexKind, values: LazySeq<Value>) -> Self {
        Self {
            kind: Some(kind),
            values,
        }
    }

    pub fn number(values: Vec<Value>) -> Self {
        Self::with_kind(IndexKind::Number, LazySeq::from_vec(values))
    }

    pub fn date(values: Vec<Value>) -> Self {
        Self::with_kind(IndexKind::Date, LazySeq::from_vec(values))
    }

    /// `0..count` integer index.
    pub fn implicit(count: usize) -> Self {
        Self::with_kind(
            IndexKind::Number,
            LazySeq::from_fn(move || (0..count).map(|i| Value::Int64(i as i64))),
        )
    }

    /// `0..n` integer index where `n` is the eventual length of `seq`.
    ///
    /// Nothing is pulled from `seq` until the index itself is read.
    pub fn positional_for<T>(seq: &LazySeq<T>) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let seq = seq.clone();
        Self::with_kind(
            IndexKind::Number,
            LazySeq::from_fn(move || seq.iter().enumerate().map(|(i, _)| Value::Int64(i as i64))),
        )
    }

    /// The variant of this index. Reads the first label when no variant was given.
    pub fn kind(&self) -> IndexKind {
        match self.kind {
            Some(kind) => kind,
            None => self
                .values
                .first()
                .map_or(IndexKind::Generic, |v| IndexKind::for_value(&v)),
        }
    }

    /// Materialize the labels into a new vector.
    pub fn values(&self) -> Vec<Value> {
        self.values.to_vec()
    }

    /// Alias of [`Index::values`].
    pub fn to_values(&self) -> Vec<Value> {
        self.values()
    }

    pub fn iter(&self) -> SeqIter<Value> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.count()
    }

    pub fn is_empty(&self) -> bool {
        self.values.first().is_none()
    }

    /// The underlying label sequence.
    pub fn as_lazy(&self) -> &LazySeq<Value> {
        &self.values
    }

    /// Force the labels into memory. Returns a shared handle if already baked.
    pub fn bake(&self) -> Self {
        Self {
            kind: self.kind,
            values: self.values.bake(),
        }
    }

    pub fn is_baked(&self) -> bool {
        self.values.is_baked()
    }

    /// `true` when both indices share the same label storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.values.ptr_eq(&other.values)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    use super::{Index, IndexKind};
    use crate::lazy::LazySeq;
    use crate::types::Value;

    #[test]
    fn kind_is_inferred_from_first_value() {
        assert_eq!(Index::new(vec![Value::Int64(100)]).kind(), IndexKind::Number);
        assert_eq!(Index::new(vec![Value::Float64(1.5)]).kind(), IndexKind::Number);
        let date = NaiveDate::from_ymd_opt(2015, 11, 23)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Index::new(vec![Value::Date(date)]).kind(), IndexKind::Date);
        assert_eq!(Index::new(vec![Value::from("foo")]).kind(), IndexKind::Generic);
        assert_eq!(Index::new(Vec::new()).kind(), IndexKind::Generic);
    }

    #[test]
    fn explicit_kind_wins_over_inference() {
        let idx = Index::date(vec![Value::from("not a date")]);
        assert_eq!(idx.kind(), IndexKind::Date);
    }

    #[test]
    fn implicit_index_counts_from_zero() {
        let idx = Index::implicit(3);
        assert_eq!(idx.kind(), IndexKind::Number);
        assert_eq!(
            idx.values(),
            vec![Value::Int64(0), Value::Int64(1), Value::Int64(2)]
        );
    }

    #[test]
    fn positional_index_defers_evaluation_of_its_source() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = Arc::clone(&calls);
        let seq = LazySeq::from_fn(move || {
            calls2.fetch_add(1, Ordering::SeqCst);
            vec!["a", "b"].into_iter()
        });

        let idx = Index::positional_for(&seq);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(idx.kind(), IndexKind::Number);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(idx.to_values(), vec![Value::Int64(0), Value::Int64(1)]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn values_returns_a_new_vector_each_call() {
        let idx = Index::new(vec![Value::Int64(5)]);
        let mut first = idx.values();
        first.push(Value::Int64(6));
        assert_eq!(idx.values(), vec![Value::Int64(5)]);
        assert_eq!(idx.len(), 1);
        assert!(!idx.is_empty());
    }
}
