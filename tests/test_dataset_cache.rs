use shoplens::dataset::{self, Dataset};
use shoplens::export;
use std::io::Write;
use std::sync::Arc;

#[test]
fn test_cached_load_and_csv_round_trip() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        " Canal ,Nota\nOnline,4\n\"Loja física\",2\nOnline,5\n"
    )
    .expect("write fixture");

    // Two loads of the same path share one parsed dataset
    let first = dataset::load_cached(file.path()).expect("first load");
    let second = dataset::load_cached(file.path()).expect("second load");
    assert!(Arc::ptr_eq(&first, &second));

    // Headers were trimmed on load
    assert_eq!(first.headers(), &["Canal".to_string(), "Nota".to_string()]);
    assert_eq!(first.len(), 3);

    // The exported CSV re-parses to an identical dataset
    let mut buffer = Vec::new();
    export::write_dataset_csv(&first, &mut buffer).expect("export succeeds");
    let reloaded = Dataset::from_reader(buffer.as_slice()).expect("exported CSV reparses");
    assert_eq!(reloaded.headers(), first.headers());
    assert_eq!(reloaded.rows(), first.rows());
}

#[test]
fn test_load_failure_reports_missing_file() {
    let err = dataset::load_cached("/definitely/not/here.csv").unwrap_err();
    assert!(err.to_string().contains("not found"));
}
