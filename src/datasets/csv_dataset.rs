use crate::core::instances::LabeledSample;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset has no header row")]
    MissingHeader,

    #[error("dataset is missing required column `{0}`")]
    MissingColumn(String),

    #[error("dataset layout needs at least one feature column")]
    NoFeatureColumns,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// Which columns hold the features and the label, and which labels count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub feature_columns: Vec<String>,
    pub label_column: String,
    /// Rows whose label lacks this substring are skipped.
    pub label_must_contain: Option<String>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            feature_columns: vec!["LATITUDE".to_string(), "LONGITUDE".to_string()],
            label_column: "DELIVERY ZONE CODE".to_string(),
            label_must_contain: Some("-".to_string()),
        }
    }
}

/// Counts of what happened to each data row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadSummary {
    pub rows: usize,
    pub accepted: usize,
    pub bad_feature: usize,
    pub empty_label: usize,
    pub rejected_label: usize,
}

impl ReadSummary {
    pub fn skipped(&self) -> usize {
        self.rows - self.accepted
    }
}

struct ColumnIndexes {
    features: Vec<usize>,
    label: usize,
}

impl ColumnIndexes {
    fn resolve(header: &StringRecord, layout: &ColumnLayout) -> Result<Self, DatasetError> {
        if layout.feature_columns.is_empty() {
            return Err(DatasetError::NoFeatureColumns);
        }
        let by_name: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (normalize(name), i))
            .collect();
        let find = |name: &str| {
            by_name
                .get(&normalize(name))
                .copied()
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };
        let features = layout
            .feature_columns
            .iter()
            .map(|c| find(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            features,
            label: find(&layout.label_column)?,
        })
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

fn parse_feature(cell: Option<&str>) -> Option<f64> {
    let value: f64 = cell?.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Picks `,`, `;` or tab, whichever occurs most often in the header line.
/// Falls back to `,`.
fn sniff_delimiter(header: &str) -> u8 {
    [b';', b'\t']
        .into_iter()
        .fold((b',', header.matches(',').count()), |best, d| {
            let count = header.matches(char::from(d)).count();
            if count > best.1 { (d, count) } else { best }
        })
        .0
}

/// Reads labeled samples from delimited text with a header row.
///
/// The delimiter (`,`, `;` or tab) is sniffed from the header. Column names
/// match case-insensitively after trimming. Blank lines are ignored; rows with
/// a missing or non-numeric feature, an empty label, or a label without
/// `label_must_contain` are skipped and counted in the summary.
pub fn parse_labeled_csv<R: Read>(
    mut reader: R,
    layout: &ColumnLayout,
) -> Result<(Vec<LabeledSample>, ReadSummary), DatasetError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let text = text.trim_start_matches('\u{feff}');

    let Some(header_line) = text.lines().find(|line| !line.trim().is_empty()) else {
        return Err(DatasetError::MissingHeader);
    };
    let start = text.find(header_line).unwrap_or(0);
    let text = &text[start..];

    let mut rows = ReaderBuilder::new()
        .delimiter(sniff_delimiter(header_line))
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());
    let columns = ColumnIndexes::resolve(rows.headers()?, layout)?;

    let mut samples = Vec::new();
    let mut summary = ReadSummary::default();
    for record in rows.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        summary.rows += 1;

        let features: Option<Vec<f64>> = columns
            .features
            .iter()
            .map(|&i| parse_feature(record.get(i)))
            .collect();
        let Some(features) = features else {
            summary.bad_feature += 1;
            continue;
        };

        let label = record.get(columns.label).unwrap_or("");
        if label.is_empty() {
            summary.empty_label += 1;
            continue;
        }
        if let Some(required) = &layout.label_must_contain {
            if !label.contains(required.as_str()) {
                summary.rejected_label += 1;
                continue;
            }
        }

        samples.push(LabeledSample::new(features, label));
        summary.accepted += 1;
    }
    Ok((samples, summary))
}

pub fn read_labeled_csv<P: AsRef<Path>>(
    path: P,
    layout: &ColumnLayout,
) -> Result<(Vec<LabeledSample>, ReadSummary), DatasetError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let (samples, summary) = parse_labeled_csv(BufReader::new(file), layout)?;
    log::info!(
        "read {} samples from {} ({} rows, {} skipped)",
        summary.accepted,
        path.display(),
        summary.rows,
        summary.skipped()
    );
    if summary.skipped() > 0 {
        log::debug!(
            "skipped rows: {} bad feature, {} empty label, {} rejected label",
            summary.bad_feature,
            summary.empty_label,
            summary.rejected_label
        );
    }
    Ok((samples, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;
    use std::io::Write;

    fn parse(text: &str) -> Result<(Vec<LabeledSample>, ReadSummary), DatasetError> {
        parse_labeled_csv(Cursor::new(text), &ColumnLayout::default())
    }

    #[test]
    fn reads_valid_rows_in_feature_column_order() {
        let text = "ID,Longitude, latitude ,Delivery Zone Code\n\
                    1,114.1,22.3,K-01\n\
                    2,114.2,22.4,K-02\n";
        let (samples, summary) = parse(text).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].features().values(), &[22.3, 114.1]);
        assert_eq!(samples[1].label(), "K-02");
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.skipped(), 0);
    }

    #[test]
    fn skips_and_counts_invalid_rows() {
        let text = "LATITUDE;LONGITUDE;DELIVERY ZONE CODE\n\
                    22.3;114.1;K-01\n\
                    abc;114.1;K-01\n\
                    22.3;;K-01\n\
                    22.3;114.1;\n\
                    22.3;114.1;K01\n\
                    \n\
                    NaN;114.1;K-01\n";
        let (samples, summary) = parse(text).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(summary.rows, 6);
        assert_eq!(summary.bad_feature, 3);
        assert_eq!(summary.empty_label, 1);
        assert_eq!(summary.rejected_label, 1);
    }

    #[test]
    fn quoted_cells_are_unquoted() {
        let text = "LATITUDE,LONGITUDE,DELIVERY ZONE CODE\n\"22.5\",\"114.0\",\"A-1, north\"\n";
        let (samples, _) = parse(text).unwrap();
        assert_eq!(samples[0].label(), "A-1, north");
        assert_eq!(samples[0].features().values(), &[22.5, 114.0]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = parse("LATITUDE,ZONE\n1,A-1\n").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(c) if c == "LONGITUDE"));
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(parse("\n\n"), Err(DatasetError::MissingHeader)));
    }

    #[test]
    fn label_filter_can_be_disabled() {
        let layout = ColumnLayout {
            feature_columns: vec!["x".into(), "y".into()],
            label_column: "class".into(),
            label_must_contain: None,
        };
        let (samples, _) =
            parse_labeled_csv(Cursor::new("x\ty\tclass\n1\t2\tred\n"), &layout).unwrap();
        assert_eq!(samples[0].label(), "red");
    }

    #[test]
    fn apostrophes_are_plain_text() {
        let text = "ADDRESS,LATITUDE,LONGITUDE,DELIVERY ZONE CODE\nKing's Road,22.3,114.1,K-01\n";
        let (samples, summary) = parse(text).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(summary.rows, 1);
        assert_eq!(samples[0].label(), "K-01");
    }

    #[test]
    fn doubled_quotes_are_unescaped() {
        let text = "LATITUDE,LONGITUDE,DELIVERY ZONE CODE\n22.3,114.1,\"K-01 \"\"east\"\"\"\n";
        let (samples, _) = parse(text).unwrap();
        assert_eq!(samples[0].label(), "K-01 \"east\"");
    }

    #[test]
    fn leading_blank_lines_and_bom_are_skipped() {
        let text = "\u{feff}\n  \nLATITUDE,LONGITUDE,DELIVERY ZONE CODE\r\n1,2,A-1\r\n";
        let (samples, _) = parse(text).unwrap();
        assert_eq!(samples[0].features().values(), &[1.0, 2.0]);
        assert_eq!(samples[0].label(), "A-1");
    }

    #[test]
    fn sniffs_common_delimiters() {
        assert_eq!(sniff_delimiter("LATITUDE,LONGITUDE,ZONE"), b',');
        assert_eq!(sniff_delimiter("LATITUDE;LONGITUDE;ZONE"), b';');
        assert_eq!(sniff_delimiter("LATITUDE\tLONGITUDE\tZONE"), b'\t');
        assert_eq!(sniff_delimiter("ZONE"), b',');
    }

    #[test]
    fn reads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "LATITUDE,LONGITUDE,DELIVERY ZONE CODE").unwrap();
        writeln!(file, "1.0,2.0,Z-9").unwrap();
        let (samples, summary) = read_labeled_csv(file.path(), &ColumnLayout::default()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(summary.rows, 1);
    }
}
