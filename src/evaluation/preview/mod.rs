mod snapshot;

pub use snapshot::FoldSnapshot;
