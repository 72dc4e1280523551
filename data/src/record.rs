//! Simulation output records
//!
//! A record is the sole artifact a run hands over to the (external)
//! persistence and visualization layers. Its frame naming scheme,
//! `{species}_state_initial` / `{species}_state_final` /
//! `{species}_state_{iteration}`, is the stable contract those layers
//! depend on.

use crate::concentration::ScalarConcentration;
use crate::parameters::Parameters;
use std::collections::BTreeMap;

/// Configuration and provenance of one simulation run
#[derive(Clone, Debug, PartialEq)]
pub struct Metadata {
    /// Seed of the run's random number generator
    pub random_seed: u64,

    /// Side length of the square concentration grids
    pub grid_length: usize,

    /// Number of Euler steps the run was asked to perform
    pub max_iterations: usize,

    /// Number of Euler steps actually performed
    ///
    /// Always equals `max_iterations`: this design has no early termination.
    /// Kept separate so records stay self-describing if that ever changes.
    pub total_iterations: usize,

    /// Radius of the initial seeding patches
    pub patch_radius: usize,

    /// Probability driving the expected patch density
    pub patch_prob: f64,

    /// Name of the pattern preset that was drawn for this run
    pub pattern_name: &'static str,

    /// The preset's feed/kill/diffusion parameters
    pub parameters: Parameters,
}

/// Captured states of a single species across one run
#[derive(Clone, Debug, PartialEq)]
pub struct FieldFrames {
    /// State before the first Euler step
    pub initial: ScalarConcentration,

    /// State after the last Euler step
    pub last: ScalarConcentration,

    /// Intermediate states, keyed by iteration index
    pub snapshots: BTreeMap<usize, ScalarConcentration>,
}
//
impl FieldFrames {
    /// Frames under their stable record keys, e.g. `u_state_initial`
    ///
    /// Intermediate frames come out in ascending iteration order.
    pub fn named_frames<'a>(
        &'a self,
        species: &'a str,
    ) -> impl Iterator<Item = (String, &'a ScalarConcentration)> + 'a {
        std::iter::once((format!("{species}_state_initial"), &self.initial))
            .chain(std::iter::once((
                format!("{species}_state_final"),
                &self.last,
            )))
            .chain(
                self.snapshots
                    .iter()
                    .map(move |(iteration, frame)| (format!("{species}_state_{iteration}"), frame)),
            )
    }
}

/// Full output of one simulation run
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationRecord {
    /// Configuration and provenance
    pub meta: Metadata,

    /// Captured substrate states
    pub u: FieldFrames,

    /// Captured activator states
    pub v: FieldFrames,
}
//
impl SimulationRecord {
    /// Every image of the record under its stable key, U frames first
    pub fn named_frames(&self) -> impl Iterator<Item = (String, &ScalarConcentration)> {
        self.u.named_frames("u").chain(self.v.named_frames("v"))
    }
}
