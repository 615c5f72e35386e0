mod csv_dataset;

pub use csv_dataset::{
    ColumnLayout, DatasetError, ReadSummary, parse_labeled_csv, read_labeled_csv,
};
