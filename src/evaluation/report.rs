use crate::evaluation::EvaluationOutcome;
use csv::{Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Tsv,
    Json,
}

impl ReportFormat {
    /// Guesses the format from a file extension, defaulting to JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => ReportFormat::Csv,
            Some("tsv") | Some("tab") => ReportFormat::Tsv,
            _ => ReportFormat::Json,
        }
    }
}

/// Writes `outcome` to `path`.
///
/// CSV and TSV hold the confusion matrix as a table (actual labels down,
/// predicted labels across); JSON holds the whole outcome.
pub fn export_outcome<P: AsRef<Path>>(
    outcome: &EvaluationOutcome,
    path: P,
    fmt: ReportFormat,
) -> Result<(), Error> {
    let mut w = BufWriter::new(File::create(path)?);
    match fmt {
        ReportFormat::Csv => write_matrix(outcome, &mut w, b',')?,
        ReportFormat::Tsv => write_matrix(outcome, &mut w, b'\t')?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut w, outcome)?;
            writeln!(w)?;
        }
    }
    w.flush()
}

fn write_matrix<W: Write>(
    outcome: &EvaluationOutcome,
    w: &mut W,
    delimiter: u8,
) -> Result<(), Error> {
    let matrix = outcome.confusion_matrix();
    let mut table = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(w);

    let header = std::iter::once("actual\\predicted").chain(matrix.labels());
    table.write_record(header)?;
    for actual in matrix.labels() {
        let mut row = vec![actual.to_string()];
        row.extend(
            matrix
                .labels()
                .map(|predicted| matrix.count(actual, predicted).to_string()),
        );
        table.write_record(&row)?;
    }
    table.flush()
}
