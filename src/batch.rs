// 📦 Batch Generation - CSV in, CSV out
// Each row is an identity; each output row gets a dl_number (or an error).
//
// Input columns:  state,last_name,birthdate,gender,ssn
// Output columns: state,last_name,birthdate,gender,ssn,dl_number,error
//
// birthdate/gender/ssn may be blank or missing (1990-01-01, M, "").

use crate::error::Result;
use crate::identity::{default_birthdate, parse_birthdate, Gender, IdentityInput};
use crate::rules::{generate, GeneratedDl, PLACEHOLDER_DL};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

// ============================================================================
// ROWS
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct BatchRow {
    pub state: String,
    pub last_name: String,

    #[serde(default)]
    pub birthdate: String,

    #[serde(default)]
    pub gender: String,

    #[serde(default)]
    pub ssn: String,
}

impl BatchRow {
    /// Turn raw CSV text into a typed input, applying blank-field defaults
    pub fn to_input(&self) -> Result<IdentityInput> {
        let birthdate = if self.birthdate.trim().is_empty() {
            default_birthdate()
        } else {
            parse_birthdate(&self.birthdate)?
        };

        let gender = if self.gender.trim().is_empty() {
            Gender::default()
        } else {
            self.gender.parse()?
        };

        Ok(IdentityInput::new(&self.state, &self.last_name)
            .with_birthdate(birthdate)
            .with_gender(gender)
            .with_ssn(&self.ssn))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutputRow {
    pub state: String,
    pub last_name: String,
    pub birthdate: String,
    pub gender: String,
    pub ssn: String,
    pub dl_number: String,
    pub error: String,
}

impl BatchOutputRow {
    fn from_row(row: BatchRow, outcome: &Result<GeneratedDl>) -> Self {
        let (dl_number, error) = match outcome {
            Ok(dl) => (dl.number.clone(), String::new()),
            Err(e) => (String::new(), e.to_string()),
        };

        BatchOutputRow {
            state: row.state,
            last_name: row.last_name,
            birthdate: row.birthdate,
            gender: row.gender,
            ssn: row.ssn,
            dl_number,
            error,
        }
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub generated: usize,
    pub placeholders: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} rows: {} generated, {} without a state format, {} failed",
            self.total, self.generated, self.placeholders, self.failed
        )
    }
}

// ============================================================================
// BATCH RUNNER
// ============================================================================

/// Read identity rows from `reader`, write rows with DL numbers to `writer`
///
/// Row-level failures (empty last name, bad date or gender) are written with
/// an `error` column and counted; only CSV/I/O failures abort the batch.
pub fn generate_batch<R: Read, W: Write>(reader: R, writer: W) -> Result<BatchSummary> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let mut wtr = csv::Writer::from_writer(writer);
    let mut summary = BatchSummary::default();

    for (line_num, result) in rdr.deserialize::<BatchRow>().enumerate() {
        let row = result?;
        let outcome = row.to_input().and_then(|input| generate(&input));
        summary.total += 1;

        match &outcome {
            Ok(dl) if dl.number == PLACEHOLDER_DL => summary.placeholders += 1,
            Ok(_) => summary.generated += 1,
            Err(e) => {
                // +2: 1-indexed plus header row
                warn!(line = line_num + 2, state = %row.state, error = %e, "Row failed");
                summary.failed += 1;
            }
        }

        wtr.serialize(BatchOutputRow::from_row(row, &outcome))?;
    }

    wtr.flush()?;
    info!(
        total = summary.total,
        generated = summary.generated,
        placeholders = summary.placeholders,
        failed = summary.failed,
        "Batch complete"
    );

    Ok(summary)
}

/// File-to-file variant of `generate_batch`
pub fn generate_batch_file(input: &Path, output: &Path) -> Result<BatchSummary> {
    let reader = File::open(input)?;
    let writer = File::create(output)?;
    generate_batch(reader, writer)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DlError;

    fn run(input: &str) -> (BatchSummary, String) {
        let mut out = Vec::new();
        let summary = generate_batch(input.as_bytes(), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_batch_generates_each_row() {
        let input = "\
state,last_name,birthdate,gender,ssn
Florida,Smith,1990-05-15,M,123-45-6789
Georgia,Smith,1990-05-15,M,123-45-6789
Illinois,Smith,1990-05-15,F,
";
        let (summary, output) = run(input);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "state,last_name,birthdate,gender,ssn,dl_number,error");
        assert_eq!(lines[1], "Florida,Smith,1990-05-15,M,123-45-6789,S530901750,");
        assert_eq!(lines[2], "Georgia,Smith,1990-05-15,M,123-45-6789,123456789,");
        assert_eq!(lines[3], "Illinois,Smith,1990-05-15,F,,S530905515,");
        assert_eq!(
            summary,
            BatchSummary { total: 3, generated: 3, placeholders: 0, failed: 0 }
        );
    }

    #[test]
    fn test_batch_blank_fields_use_defaults() {
        let input = "state,last_name,birthdate,gender,ssn\nWisconsin,Smith,,,\n";
        let (_, output) = run(input);

        assert!(output.contains(",S530900101,"));
    }

    #[test]
    fn test_batch_missing_optional_columns() {
        let input = "state,last_name\nWashington,Smith\n";
        let (summary, output) = run(input);

        assert_eq!(summary.generated, 1);
        assert!(output.contains(",S53090X,"));
    }

    #[test]
    fn test_batch_row_errors_do_not_abort() {
        let input = "\
state,last_name,birthdate,gender,ssn
Florida,,1990-05-15,M,
Illinois,Smith,05/15/1990,M,
Wisconsin,Smith,1990-05-15,X,
Texas,Smith,1990-05-15,M,
Washington,Smith,1990-05-15,M,
";
        let (summary, output) = run(input);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            summary,
            BatchSummary { total: 5, generated: 1, placeholders: 1, failed: 3 }
        );
        assert!(lines[1].ends_with(",,Invalid input: last name must not be empty"));
        assert!(lines[2].contains("Invalid birthdate"));
        assert!(lines[3].contains("Invalid gender"));
        assert!(lines[4].contains(PLACEHOLDER_DL));
        assert!(lines[5].contains(",S53090X,"));
    }

    #[test]
    fn test_batch_malformed_csv_aborts() {
        let input = "state,last_name\nFlorida,Smith,extra\n";
        let mut out = Vec::new();
        let result = generate_batch(input.as_bytes(), &mut out);

        assert!(matches!(result, Err(DlError::Csv(_))));
    }

    #[test]
    fn test_batch_summary_text() {
        let summary = BatchSummary { total: 4, generated: 2, placeholders: 1, failed: 1 };
        assert_eq!(
            summary.summary(),
            "4 rows: 2 generated, 1 without a state format, 1 failed"
        );
    }

    #[test]
    fn test_batch_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("people.csv");
        let output = dir.path().join("dl_numbers.csv");
        std::fs::write(&input, "state,last_name,ssn\nGeorgia,Doe,987-65-4321\n").unwrap();

        let summary = generate_batch_file(&input, &output).unwrap();
        let written = std::fs::read_to_string(&output).unwrap();

        assert_eq!(summary.generated, 1);
        assert!(written.contains(",987654321,"));
    }

    #[test]
    fn test_batch_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = generate_batch_file(&dir.path().join("nope.csv"), &dir.path().join("out.csv"));

        assert!(matches!(result, Err(DlError::Io(_))));
    }
}
