use chrono::NaiveDate;

use rust_data_forge::{
    matrix, range, DataFrame, ErrorKind, IndexKind, LazySeq, Record, Series, Value,
};

fn date(y: i32, m: u32, d: u32) -> Value {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(Value::Date)
        .unwrap()
}

fn sales() -> DataFrame {
    DataFrame::new(
        ["when", "amount"],
        vec![
            vec![date(2024, 1, 1), Value::Int64(10)],
            vec![date(2024, 1, 2), Value::Int64(20)],
        ],
    )
}

#[test]
fn set_index_by_date_column_builds_a_date_index() {
    let indexed = sales().set_index("when").unwrap();

    assert_eq!(indexed.index().kind(), IndexKind::Date);
    assert_eq!(indexed.index().values(), vec![date(2024, 1, 1), date(2024, 1, 2)]);
    assert_eq!(indexed.column_names(), vec!["when", "amount"]);

    let amounts = indexed.get_series("amount").unwrap();
    assert_eq!(amounts.get(&date(2024, 1, 2)), Some(Value::Int64(20)));
}

#[test]
fn set_index_then_drop_moves_the_column() {
    let moved = sales().set_index("amount").unwrap().drop_series("amount");
    assert_eq!(moved.index().kind(), IndexKind::Number);
    assert_eq!(moved.column_names(), vec!["when"]);
    assert_eq!(
        moved.to_pairs(),
        vec![
            (Value::Int64(10), Record::from_pairs([("when", date(2024, 1, 1))])),
            (Value::Int64(20), Record::from_pairs([("when", date(2024, 1, 2))])),
        ]
    );
}

#[test]
fn missing_columns_are_lookup_errors() {
    assert_eq!(sales().set_index("nope").unwrap_err().kind(), ErrorKind::Lookup);
    assert_eq!(sales().get_series("nope").unwrap_err().kind(), ErrorKind::Lookup);
    assert_eq!(sales().drop_series("nope").column_names(), vec!["when", "amount"]);
}

#[test]
fn projected_series_share_the_frame_index() {
    let df = sales().bake();
    let amounts = df.get_series("amount").unwrap();
    assert!(amounts.index().ptr_eq(df.index()));
}

#[test]
fn bake_twice_returns_the_same_storage() {
    let lazy = range(5, 4);
    assert!(!lazy.is_baked());

    let once = lazy.bake();
    let twice = once.bake();
    assert!(once.is_baked());
    assert!(once.ptr_eq(&twice));
    assert_eq!(
        twice.values(),
        vec![Value::Int64(5), Value::Int64(6), Value::Int64(7), Value::Int64(8)]
    );

    let frame = matrix(3, 2, 0, 1).bake();
    assert!(frame.ptr_eq(&frame.bake()));
}

#[test]
fn matrix_names_columns_from_one() {
    let df = matrix(3, 2, 100, 10);
    assert_eq!(df.column_names(), vec!["1", "2", "3"]);
    assert_eq!(
        df.to_rows(),
        vec![
            vec![Value::Int64(100), Value::Int64(110), Value::Int64(120)],
            vec![Value::Int64(130), Value::Int64(140), Value::Int64(150)],
        ]
    );
    assert_eq!(df.index().values(), vec![Value::Int64(0), Value::Int64(1)]);
}

#[test]
fn lazy_series_reads_are_independent() {
    let values = LazySeq::from_fn(|| (0..3).map(Value::Int64));
    let series = Series::from_lazy_values(values);

    let mut first = series.iter();
    assert_eq!(first.next(), Some(Value::Int64(0)));
    // A second read starts from the beginning regardless of the first cursor.
    assert_eq!(series.values(), vec![Value::Int64(0), Value::Int64(1), Value::Int64(2)]);
    assert_eq!(first.next(), Some(Value::Int64(1)));
}

#[test]
fn records_fill_missing_keys_with_null() {
    let df = DataFrame::from_records(vec![
        Record::from_pairs([("a", 1), ("b", 2)]),
        Record::from_pairs([("b", 3), ("c", 4)]),
    ]);
    assert_eq!(df.column_names(), vec!["a", "b"]);
    assert_eq!(
        df.to_rows(),
        vec![
            vec![Value::Int64(1), Value::Int64(2)],
            vec![Value::Null, Value::Int64(3)],
        ]
    );
}
