//! Data format used by the Gray-Scott texture dataset generator

pub mod concentration;
pub mod parameters;
pub mod record;
pub mod snapshot;

use thiserror::Error;

/// Computation precision
pub type Precision = f32;

/// Configuration errors caught before a simulation starts
///
/// These are fatal: the caller gets the error before any field has been
/// allocated, there is never a partial result.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// The grid cannot fit a single patch away from its edges
    #[error("grid length {grid_length} must exceed twice the patch radius {patch_radius}")]
    GridTooSmall {
        /// Side length of the square grid
        grid_length: usize,

        /// Radius of the seeding patches
        patch_radius: usize,
    },

    /// Patch placement probability outside [0, 1]
    #[error("patch probability {0} is not within [0, 1]")]
    PatchProbability(f64),

    /// Seeding patches must have a positive radius
    #[error("patch radius must be positive")]
    ZeroPatchRadius,
}
