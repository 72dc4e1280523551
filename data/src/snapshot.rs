//! Selection of the intermediate iterations worth keeping
//!
//! A full run produces far more states than a dataset should store. A
//! snapshot spec is a small declarative description of which iterations to
//! retain, compiled once per run into a predicate over iteration indices.

use thiserror::Error;

/// One rule of a snapshot spec
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SnapshotRule {
    /// Capture iterations 1..=n
    First(usize),

    /// Capture every iteration that is a positive multiple of m
    Interval(usize),
}

/// Ordered list of rules, combined by logical OR
pub type SnapshotSpec = Vec<SnapshotRule>;

/// Malformed snapshot spec entries
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum SnapshotError {
    /// An interval rule with period zero matches nothing and is most likely
    /// a configuration mistake
    #[error("snapshot interval must be positive")]
    ZeroInterval,
}

/// Compiled snapshot spec
///
/// Stateless: whether an iteration is captured depends on its index alone,
/// never on how the predicate was queried before.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SnapshotPredicate {
    /// Validated rules from the source spec
    rules: Vec<SnapshotRule>,
}
//
impl SnapshotPredicate {
    /// Validate a spec and compile it into a predicate
    ///
    /// An empty spec is legal and yields a predicate that never matches,
    /// i.e. a record with no intermediate frames.
    pub fn build(spec: &[SnapshotRule]) -> Result<Self, SnapshotError> {
        if spec.contains(&SnapshotRule::Interval(0)) {
            return Err(SnapshotError::ZeroInterval);
        }
        Ok(Self {
            rules: spec.to_vec(),
        })
    }

    /// Truth that the state after `iteration` should be captured
    pub fn matches(&self, iteration: usize) -> bool {
        self.rules.iter().any(|rule| match *rule {
            SnapshotRule::First(n) => (1..=n).contains(&iteration),
            SnapshotRule::Interval(m) => iteration > 0 && iteration % m == 0,
        })
    }
}
