use super::common::*;
use crate::ideas::export::ideas_to_csv;

#[test]
fn csv_export_quotes_embedded_delimiters() {
    let (service, _) = build_service();
    let mut tricky = submission("founder, \"the\" first");
    tricky.title = None;
    tricky.fields.problem = Some("Clinics, labs and \"urgent care\"\nall lose claims".to_string());
    let record = service.submit(tricky).expect("submitted");

    let csv = ideas_to_csv(&[record.clone()]).expect("export");
    let mut reader = csv::Reader::from_reader(csv.as_bytes());

    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.len(), 10);
    assert_eq!(&headers[4], "Revenue Model");

    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(&row[0], "Clinics, labs and \"urgent care\"\nall lose claims");
    assert_eq!(&row[1], record.content.problem.as_str());
    assert_eq!(&row[6], "41");
    assert_eq!(&row[7], "Moderate");
    assert_eq!(&row[8], "founder, \"the\" first");
    assert_eq!(&row[9], record.created_at.to_rfc3339().as_str());
}

#[test]
fn fallback_title_truncates_problem() {
    let (service, _) = build_service();
    let mut long = submission("founder-1");
    long.title = None;
    long.fields.problem = Some(thorough_text());
    let record = service.submit(long).expect("submitted");

    assert_eq!(record.display_title().chars().count(), 50);
    assert!(thorough_text().starts_with(&record.display_title()));
}

#[test]
fn empty_export_still_has_header() {
    let csv = ideas_to_csv(&[]).expect("export");
    assert_eq!(
        csv,
        "Title,Problem,Solution,Market,Revenue Model,Team,Score,Classification,Owner,Created At\n"
    );
}
