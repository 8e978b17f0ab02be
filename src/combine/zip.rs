//! Position-wise combination of series and data frames.

use std::sync::Arc;

use crate::dataframe::DataFrame;
use crate::index::Index;
use crate::lazy::{LazySeq, SeqIter};
use crate::series::Series;
use crate::types::{Record, Row, Value};

/// Walk every input in lock-step and yield one item per position until the shortest input ends.
fn lock_step<T, U, F>(sources: Vec<SeqIter<T>>, combine: Arc<F>) -> impl Iterator<Item = U> + Send
where
    T: Send + 'static,
    U: 'static,
    F: Fn(&[T]) -> U + Send + Sync + 'static,
{
    let mut sources = sources;
    std::iter::from_fn(move || {
        if sources.is_empty() {
            return None;
        }
        let mut items = Vec::with_capacity(sources.len());
        for source in sources.iter_mut() {
            items.push(source.next()?);
        }
        Some(combine(&items))
    })
}

/// Combine the values of `series` position by position.
///
/// `combiner` receives one value per input series. The output stops at the length of the shortest
/// input and is indexed by position (`0..n`).
pub fn zip_series<F>(series: &[Series], combiner: F) -> Series
where
    F: Fn(&[Value]) -> Value + Send + Sync + 'static,
{
    let series: Arc<[Series]> = Arc::from(series.to_vec());
    let combiner = Arc::new(combiner);
    let values = LazySeq::from_fn(move || {
        let sources = series.iter().map(Series::iter).collect();
        lock_step(sources, Arc::clone(&combiner))
    });
    Series::from_lazy_values(values)
}

/// Combine the rows of `frames` position by position.
///
/// `combiner` receives one [`Record`] per input frame and returns the output record. The output
/// stops at the length of the shortest input, is indexed by position (`0..n`), and takes its
/// columns from the first combined record; later records missing one of those names get
/// [`Value::Null`] there.
pub fn zip<F>(frames: &[DataFrame], combiner: F) -> DataFrame
where
    F: Fn(&[Record]) -> Record + Send + Sync + 'static,
{
    let frames: Arc<[DataFrame]> = Arc::from(frames.to_vec());
    let combiner = Arc::new(combiner);
    let records: LazySeq<Record> = LazySeq::from_fn(move || {
        let sources = frames.iter().map(|f| f.records().iter()).collect();
        lock_step(sources, Arc::clone(&combiner))
    });

    let columns = {
        let records = records.clone();
        LazySeq::from_fn(move || first_record_names(&records).into_iter())
    };
    let rows = {
        let records = records.clone();
        LazySeq::from_fn(move || {
            let names = first_record_names(&records);
            records.iter().map(move |record| {
                names
                    .iter()
                    .map(|name| record.get(name).cloned().unwrap_or_default())
                    .collect::<Row>()
            })
        })
    };
    let index = Index::positional_for(&records);

    DataFrame::from_parts(columns, index, rows)
}

fn first_record_names(records: &LazySeq<Record>) -> Vec<String> {
    records
        .first()
        .map(|r| r.names().map(str::to_owned).collect())
        .unwrap_or_default()
}
