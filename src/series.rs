//! One-dimensional, indexed, lazily evaluated sequences.

use crate::index::Index;
use crate::lazy::{LazySeq, SeqIter};
use crate::types::Value;

/// A named (or anonymous) sequence of [`Value`]s paired with an [`Index`].
///
/// Values and index are both lazy; pairing is positional. Their lengths are expected to match but
/// are not checked, since checking would force evaluation.
#[derive(Debug, Clone)]
pub struct Series {
    name: Option<String>,
    index: Index,
    values: LazySeq<Value>,
}

impl Series {
    /// Series over `values` with an implicit `0..n` index.
    pub fn new(values: Vec<Value>) -> Self {
        let values = LazySeq::from_vec(values);
        Self {
            name: None,
            index: Index::positional_for(&values),
            values,
        }
    }

    /// Series over `values` labelled by `index`.
    pub fn with_index(index: Index, values: Vec<Value>) -> Self {
        Self::from_lazy(index, LazySeq::from_vec(values))
    }

    /// Series over a lazy value sequence labelled by `index`.
    pub fn from_lazy(index: Index, values: LazySeq<Value>) -> Self {
        Self {
            name: None,
            index,
            values,
        }
    }

    /// Series over a lazy value sequence with an implicit `0..n` index.
    pub fn from_lazy_values(values: LazySeq<Value>) -> Self {
        let index = Index::positional_for(&values);
        Self::from_lazy(index, values)
    }

    /// Attach a name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Materialize the values in index order.
    pub fn values(&self) -> Vec<Value> {
        self.values.to_vec()
    }

    pub fn iter(&self) -> SeqIter<Value> {
        self.values.iter()
    }

    /// The underlying value sequence.
    pub fn as_lazy(&self) -> &LazySeq<Value> {
        &self.values
    }

    /// `(index value, value)` pairs in order.
    pub fn to_pairs(&self) -> Vec<(Value, Value)> {
        self.index.iter().zip(self.values.iter()).collect()
    }

    /// Lazy view of [`Series::to_pairs`].
    pub fn pairs(&self) -> LazySeq<(Value, Value)> {
        let index = self.index.clone();
        let values = self.values.clone();
        LazySeq::from_fn(move || index.iter().zip(values.iter()))
    }

    /// First value whose index label equals `label`.
    pub fn get(&self, label: &Value) -> Option<Value> {
        let key = label.key();
        self.index
            .iter()
            .zip(self.values.iter())
            .find(|(l, _)| l.key() == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.values.count()
    }

    pub fn is_empty(&self) -> bool {
        self.values.first().is_none()
    }

    /// Force values and index into memory.
    ///
    /// A series that is already baked is returned as-is (sharing its storage), so
    /// `s.bake().bake()` is the same series as `s.bake()`.
    pub fn bake(&self) -> Self {
        if self.is_baked() {
            return self.clone();
        }
        Self {
            name: self.name.clone(),
            index: self.index.bake(),
            values: self.values.bake(),
        }
    }

    pub fn is_baked(&self) -> bool {
        self.values.is_baked() && self.index.is_baked()
    }

    /// `true` when both series share index and value storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.index.ptr_eq(&other.index) && self.values.ptr_eq(&other.values)
    }
}

/// Series of `count` consecutive integers starting at `start`, indexed `0..count`.
pub fn range(start: i64, count: usize) -> Series {
    let values = LazySeq::from_fn(move || (0..count).map(move |i| Value::Int64(start + i as i64)));
    Series::from_lazy(Index::implicit(count), values)
}
