//! Computation parameters and the pattern preset catalog

use crate::Precision;
use rand::Rng;

/// Computation parameters
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Parameters {
    /// Diffusion rate of species U
    pub diffusion_rate_u: Precision,

    /// Diffusion rate of species V
    pub diffusion_rate_v: Precision,

    /// Speed of the chemical reaction that feeds U and kills V
    pub feed_rate: Precision,

    /// Rate of conversion from V to the inert product
    pub kill_rate: Precision,
}

/// Named parameter presets known to produce recognizable pattern classes
///
/// All presets share the same diffusion rates; the feed/kill pair is what
/// selects the visual regime.
pub const PATTERNS: [(&str, Parameters); 5] = [
    (
        "labyrinthine",
        Parameters {
            diffusion_rate_u: 0.16,
            diffusion_rate_v: 0.08,
            feed_rate: 0.037,
            kill_rate: 0.060,
        },
    ),
    (
        "spots",
        Parameters {
            diffusion_rate_u: 0.16,
            diffusion_rate_v: 0.08,
            feed_rate: 0.029,
            kill_rate: 0.062,
        },
    ),
    (
        "holes",
        Parameters {
            diffusion_rate_u: 0.16,
            diffusion_rate_v: 0.08,
            feed_rate: 0.039,
            kill_rate: 0.058,
        },
    ),
    (
        "worms",
        Parameters {
            diffusion_rate_u: 0.16,
            diffusion_rate_v: 0.08,
            feed_rate: 0.078,
            kill_rate: 0.061,
        },
    ),
    (
        "coral_growth",
        Parameters {
            diffusion_rate_u: 0.16,
            diffusion_rate_v: 0.08,
            feed_rate: 0.055,
            kill_rate: 0.062,
        },
    ),
];

/// Draw one preset uniformly from the catalog
///
/// The catalog is a non-empty const table, so unlike most randomized
/// operations in this crate there is no error path here.
pub fn random_pattern(rng: &mut impl Rng) -> (&'static str, Parameters) {
    PATTERNS[rng.gen_range(0..PATTERNS.len())]
}
