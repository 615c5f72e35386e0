use serde::Serialize;

/// Named scalar metric taken from an evaluation outcome.
///
/// Typical examples: `"accuracy"`, `"f1_score"`, `"r2_score"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
}

impl Measurement {
    /// Convenience constructor
    #[inline]
    pub fn new<N: Into<String>>(name: N, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
