//! The college directory: one cost record per college, loaded once from CSV.
//!
//! Expected layout, header row first:
//!
//! ```text
//! College,Tuition (in-state),Tuition (out-of-state),Room & Board
//! Test U,10000,20000,5000
//! "Smith College, Northampton",56000,56000,18000
//! ```
//!
//! Cost fields are kept exactly as they appear in the file and only parsed
//! when a lookup needs them. A record with an unparseable field is still
//! loaded; the failure surfaces on the request that touches it.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::Error;

// ---------------------------------------------------------------------------
// CostRecord
// ---------------------------------------------------------------------------

/// One college's cost profile, as text from the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostRecord {
    tuition_in: String,
    tuition_out: String,
    room_and_board: String,
}

/// Which cost column a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostField {
    TuitionInState,
    TuitionOutOfState,
    RoomAndBoard,
}

impl CostField {
    /// The dataset column header.
    pub fn column(self) -> &'static str {
        match self {
            CostField::TuitionInState => "Tuition (in-state)",
            CostField::TuitionOutOfState => "Tuition (out-of-state)",
            CostField::RoomAndBoard => "Room & Board",
        }
    }
}

impl fmt::Display for CostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A cost field that is not a finite decimal number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} value {raw:?} is not a number")]
pub struct MalformedField {
    pub field: CostField,
    pub raw: String,
}

impl CostRecord {
    pub fn new(
        tuition_in: impl Into<String>,
        tuition_out: impl Into<String>,
        room_and_board: impl Into<String>,
    ) -> Self {
        Self {
            tuition_in: tuition_in.into(),
            tuition_out: tuition_out.into(),
            room_and_board: room_and_board.into(),
        }
    }

    pub fn tuition_in(&self) -> Result<f64, MalformedField> {
        parse_cost(CostField::TuitionInState, &self.tuition_in)
    }

    /// Present in the dataset; the lookup does not use it.
    pub fn tuition_out(&self) -> Result<f64, MalformedField> {
        parse_cost(CostField::TuitionOutOfState, &self.tuition_out)
    }

    pub fn room_and_board(&self) -> Result<f64, MalformedField> {
        parse_cost(CostField::RoomAndBoard, &self.room_and_board)
    }

    /// The raw text of `field`, untouched.
    pub fn raw(&self, field: CostField) -> &str {
        match field {
            CostField::TuitionInState => &self.tuition_in,
            CostField::TuitionOutOfState => &self.tuition_out,
            CostField::RoomAndBoard => &self.room_and_board,
        }
    }

    /// True when the fields a lookup reads both parse.
    fn is_well_formed(&self) -> bool {
        self.tuition_in().is_ok() && self.room_and_board().is_ok()
    }
}

fn parse_cost(field: CostField, raw: &str) -> Result<f64, MalformedField> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MalformedField { field, raw: raw.to_owned() })
}

// ---------------------------------------------------------------------------
// CSV row
// ---------------------------------------------------------------------------

/// One dataset row. Short rows deserialize with empty trailing fields.
#[derive(Debug, Deserialize)]
struct CostRow {
    #[serde(rename = "College")]
    college: String,
    #[serde(rename = "Tuition (in-state)", default)]
    tuition_in: String,
    #[serde(rename = "Tuition (out-of-state)", default)]
    tuition_out: String,
    #[serde(rename = "Room & Board", default)]
    room_and_board: String,
}

// ---------------------------------------------------------------------------
// CollegeDirectory
// ---------------------------------------------------------------------------

/// Read-only mapping from exact, case-sensitive college name to its costs.
///
/// Built once before the server starts and shared behind an `Arc`.
#[derive(Debug, Default, Clone)]
pub struct CollegeDirectory {
    colleges: HashMap<String, CostRecord>,
}

impl CollegeDirectory {
    /// Load the dataset at `path`.
    ///
    /// Fails if the file cannot be read, is not valid CSV, lacks the
    /// `College` column, or yields no colleges at all.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let with_path = |source| Error::Dataset { path: path.to_path_buf(), source };

        let reader = csv_builder().from_path(path).map_err(with_path)?;
        let directory = Self::from_csv(reader).map_err(with_path)?;

        if directory.is_empty() {
            return Err(Error::EmptyDataset { path: path.to_path_buf() });
        }
        info!(path = %path.display(), colleges = directory.len(), "college directory loaded");
        Ok(directory)
    }

    /// Read a dataset from any byte source. An empty result is not an error
    /// here; [`load`](Self::load) enforces that.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, Error> {
        Ok(Self::from_csv(csv_builder().from_reader(reader))?)
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self, csv::Error> {
        let mut colleges = HashMap::new();
        let mut malformed = 0usize;

        for result in reader.deserialize::<CostRow>() {
            let row = result?;
            if row.college.is_empty() {
                debug!("skipping row without a college name");
                continue;
            }
            let record = CostRecord::new(row.tuition_in, row.tuition_out, row.room_and_board);
            if !record.is_well_formed() {
                malformed += 1;
            }
            if colleges.insert(row.college.clone(), record).is_some() {
                debug!(college = %row.college, "duplicate college, later row wins");
            }
        }

        if malformed > 0 {
            warn!(rows = malformed, "dataset rows with non-numeric costs; lookups on them will fail");
        }
        Ok(Self { colleges })
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, college: &str) -> Option<&CostRecord> {
        self.colleges.get(college)
    }

    pub fn len(&self) -> usize {
        self.colleges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
    }
}

impl FromIterator<(String, CostRecord)> for CollegeDirectory {
    fn from_iter<I: IntoIterator<Item = (String, CostRecord)>>(iter: I) -> Self {
        Self { colleges: iter.into_iter().collect() }
    }
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "College,Tuition (in-state),Tuition (out-of-state),Room & Board\n";

    fn directory(rows: &str) -> CollegeDirectory {
        CollegeDirectory::from_reader(format!("{HEADER}{rows}").as_bytes()).unwrap()
    }

    #[test]
    fn loads_rows_verbatim() {
        let dir = directory("Test U,10000,20000,5000\n");
        let rec = dir.get("Test U").unwrap();
        assert_eq!(rec.raw(CostField::TuitionInState), "10000");
        assert_eq!(rec.tuition_in(), Ok(10000.0));
        assert_eq!(rec.tuition_out(), Ok(20000.0));
        assert_eq!(rec.room_and_board(), Ok(5000.0));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let dir = directory("Test U,1,2,3\n");
        assert!(dir.get("test u").is_none());
        assert!(dir.get("Test U ").is_none());
    }

    #[test]
    fn quoted_names_keep_their_commas() {
        let dir = directory("\"Smith College, Northampton\",56000,56000,18000\n");
        assert!(dir.get("Smith College, Northampton").is_some());
    }

    #[test]
    fn last_duplicate_wins() {
        let dir = directory("Test U,1,2,3\nTest U,10,20,30\n");
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.get("Test U").unwrap().tuition_in(), Ok(10.0));
    }

    #[test]
    fn column_order_follows_header() {
        let csv = "Room & Board,College,Tuition (out-of-state),Tuition (in-state)\n5000,Test U,20000,10000\n";
        let dir = CollegeDirectory::from_reader(csv.as_bytes()).unwrap();
        let rec = dir.get("Test U").unwrap();
        assert_eq!(rec.tuition_in(), Ok(10000.0));
        assert_eq!(rec.room_and_board(), Ok(5000.0));
    }

    #[test]
    fn malformed_costs_are_kept_and_fail_on_parse() {
        let dir = directory("Bad U,n/a,20000,\nNan U,NaN,1,1\n");
        let bad = dir.get("Bad U").unwrap();
        assert_eq!(
            bad.tuition_in(),
            Err(MalformedField { field: CostField::TuitionInState, raw: "n/a".to_owned() })
        );
        assert!(bad.room_and_board().is_err());
        assert!(dir.get("Nan U").unwrap().tuition_in().is_err());
    }

    #[test]
    fn short_rows_get_empty_fields() {
        let dir = directory("Short U,9000\n");
        let rec = dir.get("Short U").unwrap();
        assert_eq!(rec.tuition_in(), Ok(9000.0));
        assert_eq!(rec.raw(CostField::RoomAndBoard), "");
    }

    #[test]
    fn rows_without_a_name_are_skipped() {
        let dir = directory(",1,2,3\nTest U,1,2,3\n");
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn whitespace_around_numbers_is_tolerated() {
        let dir = directory("Test U, 10000 ,20000, 5000.5\n");
        assert_eq!(dir.get("Test U").unwrap().room_and_board(), Ok(5000.5));
    }

    #[test]
    fn missing_college_column_is_an_error() {
        let csv = "Name,Tuition (in-state)\nTest U,1\n";
        assert!(CollegeDirectory::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{HEADER}Test U,10000,20000,5000\n").unwrap();
        let dir = CollegeDirectory::load(file.path()).unwrap();
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn load_missing_file_is_fatal() {
        let err = CollegeDirectory::load("/nonexistent/college_costs.csv").unwrap_err();
        assert!(matches!(err, Error::Dataset { .. }));
    }

    #[test]
    fn load_header_only_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{HEADER}").unwrap();
        let err = CollegeDirectory::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset { .. }));
    }
}
