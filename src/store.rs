//! CSV persistence for course records.
//!
//! File format: header `semester,code,name,credits,grade`, one record per
//! line, UTF-8. Loading is lenient about malformed lines (skipped with a
//! warning, as hand-edited files tend to contain them) but strict about
//! the credit invariant.

use anyhow::Result;
use tracing::{debug, warn};

use crate::record::CourseRecord;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::OpenOptions;
use std::path::Path;

/// Loads all course records from the CSV file at `path`.
///
/// Blank lines and rows that do not deserialize (too few fields,
/// non-numeric credits) are skipped with a warning. Rows that parse but
/// carry non-positive credits abort the load: those are data errors to
/// fix, not noise to drop.
pub fn load_records(path: &str) -> Result<Vec<CourseRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<CourseRecord>().enumerate() {
        match result {
            Ok(record) => {
                record.validate()?;
                records.push(record);
            }
            Err(e) => {
                // +2: one for the header line, one for zero-based indexing
                warn!(path, line = index + 2, error = %e, "Skipping malformed CSV line");
            }
        }
    }

    debug!(path, count = records.len(), "Course records loaded");
    Ok(records)
}

/// Appends a [`CourseRecord`] as a row to the CSV file at `path`.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &CourseRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending course record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}

/// Rewrites the whole data file from `records`, header first.
pub fn save_records(path: &str, records: &[CourseRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug!(path, count = records.len(), "Course records saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn data_path(dir: &TempDir) -> String {
        dir.path().join("data.csv").to_str().unwrap().to_string()
    }

    fn sample() -> CourseRecord {
        CourseRecord::new("2021-1", "MA101", "Calculus 1", 3, "A")
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);

        append_record(&path, &sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("semester,code,name,credits,grade"));
        assert!(content.contains("2021-1,MA101,Calculus 1,3,A"));
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);

        append_record(&path, &sample()).unwrap();
        append_record(&path, &sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.contains("semester")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        let records = vec![
            sample(),
            CourseRecord::new("2021-2", "PH102", "Physics 2", 4, "B+"),
        ];

        save_records(&path, &records).unwrap();
        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_load_skips_short_and_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        fs::write(
            &path,
            "semester,code,name,credits,grade\n\
             2021-1,MA101,Calculus 1,3,A\n\
             \n\
             2021-1,PH101\n\
             2021-1,CH101,Chemistry 1,two,B\n\
             2021-2,PH102,Physics 2,4,B+\n",
        )
        .unwrap();

        let loaded = load_records(&path).unwrap();
        let codes: Vec<&str> = loaded.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["MA101", "PH102"]);
    }

    #[test]
    fn test_load_trims_field_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        fs::write(
            &path,
            "semester,code,name,credits,grade\n 2021-1 , MA101 ,Calculus 1, 3 , A \n",
        )
        .unwrap();

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded, vec![sample()]);
    }

    #[test]
    fn test_load_rejects_non_positive_credits() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        fs::write(
            &path,
            "semester,code,name,credits,grade\n2021-1,MA101,Calculus 1,0,A\n",
        )
        .unwrap();

        assert!(load_records(&path).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        assert!(load_records(&path).is_err());
    }
}
