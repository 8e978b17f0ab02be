use rust_data_forge::ingestion::csv::{from_csv_path, from_csv_reader, from_csv_str};
use rust_data_forge::ingestion::BuildOptions;
use rust_data_forge::{ErrorKind, IndexKind, Value};

#[test]
fn from_csv_path_happy_path() {
    let df = from_csv_path("tests/fixtures/people.csv", &BuildOptions::default()).unwrap();

    assert_eq!(df.column_names(), vec!["id", "name", "score", "active"]);
    assert_eq!(df.row_count(), 2);
    assert_eq!(
        df.to_rows()[0],
        vec![
            Value::Int64(1),
            Value::Utf8("Ada".to_string()),
            Value::Utf8("98.5".to_string()),
            Value::Utf8("true".to_string()),
        ]
    );
}

#[test]
fn index_col_moves_the_column_into_the_index() {
    let options = BuildOptions {
        index_col: Some("id".to_string()),
        ..Default::default()
    };
    let df = from_csv_path("tests/fixtures/people.csv", &options).unwrap();

    assert_eq!(df.column_names(), vec!["name", "score", "active"]);
    assert_eq!(df.index().kind(), IndexKind::Number);
    assert_eq!(df.index().values(), vec![Value::Int64(1), Value::Int64(2)]);
}

#[test]
fn unknown_index_col_is_a_lookup_error() {
    let options = BuildOptions {
        index_col: Some("missing".to_string()),
        ..Default::default()
    };
    let err = from_csv_str("a,b\n1,2\n", &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lookup);
    assert!(err.to_string().contains("column not found: 'missing'"));
}

#[test]
fn empty_cells_become_null() {
    let df = from_csv_str("a,b\n1,\n,x\n", &BuildOptions::default()).unwrap();
    assert_eq!(
        df.to_rows(),
        vec![
            vec![Value::Int64(1), Value::Null],
            vec![Value::Null, Value::from("x")],
        ]
    );
}

#[test]
fn reader_with_custom_delimiter() {
    let input = "name;id\nAda;1\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b';')
        .from_reader(input.as_bytes());

    let df = from_csv_reader(&mut rdr, &BuildOptions::default()).unwrap();
    assert_eq!(df.to_rows(), vec![vec![Value::from("Ada"), Value::Int64(1)]]);
}

#[test]
fn ragged_rows_are_csv_errors() {
    let err = from_csv_path("tests/fixtures/ragged.csv", &BuildOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn empty_header_cells_are_named_by_position() {
    let df = from_csv_str("id,,name\n1,2,Ada\n", &BuildOptions::default()).unwrap();

    assert_eq!(df.column_names(), vec!["id", "2", "name"]);
    assert_eq!(
        df.to_rows(),
        vec![vec![Value::Int64(1), Value::Int64(2), Value::from("Ada")]]
    );
}
