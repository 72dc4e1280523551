//! Gray-Scott reaction computation
//!
//! One explicit Euler step over a pair of concentration grids, with
//! diffusion modeled by the five-point discrete Laplacian under periodic
//! boundary conditions (the grid is a torus). No stability guard is
//! applied: parameter choices that diverge produce diverging fields, which
//! downstream consumers receive as-is.

use data::{
    concentration::{ScalarConcentration, Species},
    parameters::Parameters,
};
use ndarray::azip;

/// Five-point discrete Laplacian under periodic boundary conditions
///
/// Each cell receives `-4 * center` plus its four axis-aligned neighbors,
/// with neighbor lookups wrapping around the grid edges. Periodicity
/// conserves total flux: the result always sums to zero.
pub fn laplacian(field: &ScalarConcentration) -> ScalarConcentration {
    let (rows, cols) = field.dim();
    let mut result = ScalarConcentration::zeros((rows, cols));
    for row in 0..rows {
        let up = if row == 0 { rows - 1 } else { row - 1 };
        let down = if row + 1 == rows { 0 } else { row + 1 };
        for col in 0..cols {
            let left = if col == 0 { cols - 1 } else { col - 1 };
            let right = if col + 1 == cols { 0 } else { col + 1 };
            result[[row, col]] = -4.0 * field[[row, col]]
                + field[[up, col]]
                + field[[down, col]]
                + field[[row, left]]
                + field[[row, right]];
        }
    }
    result
}

/// Gray-Scott reaction simulation
#[derive(Debug)]
pub struct Simulation {
    /// Simulation parameters
    params: Parameters,
}
//
impl Simulation {
    /// Set up the simulation
    pub fn new(params: Parameters) -> Self {
        Self { params }
    }

    /// Perform one explicit Euler step, updating both species in place
    ///
    /// The reaction term is evaluated against the pre-step concentrations,
    /// then both fields are overwritten:
    ///
    /// ```text
    /// u += du * lap(u) - u * v^2 + feed * (1 - u)
    /// v += dv * lap(v) + u * v^2 - (feed + kill) * v
    /// ```
    pub fn perform_step(&self, species: &mut Species) {
        // Compute diffusion gradients from the pre-step state
        let lap_u = laplacian(&species.u);
        let lap_v = laplacian(&species.v);

        // Deduce change in u and v
        let params = &self.params;
        azip!((u in &mut species.u, v in &mut species.v, &full_u in &lap_u, &full_v in &lap_v) {
            let uv_square = *u * *v * *v;
            let du = params.diffusion_rate_u * full_u - uv_square + params.feed_rate * (1.0 - *u);
            let dv = params.diffusion_rate_v * full_v + uv_square
                - (params.feed_rate + params.kill_rate) * *v;
            *u += du;
            *v += dv;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::parameters::PATTERNS;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_field(side: usize, seed: u64) -> ScalarConcentration {
        let mut rng = StdRng::seed_from_u64(seed);
        ScalarConcentration::from_shape_fn((side, side), |_| rng.gen_range(0.0..1.0))
    }

    #[test]
    fn laplacian_conserves_total_flux() {
        for seed in [1, 42, 999] {
            let field = random_field(16, seed);
            let total = laplacian(&field).sum();
            assert!(total.abs() < 1e-3, "leaked flux {total}");
        }
    }

    #[test]
    fn laplacian_of_a_uniform_field_is_zero() {
        // 0.25 and its small multiples are exactly representable, so the
        // cancellation is exact rather than approximate
        let field = ScalarConcentration::from_elem((8, 8), 0.25);
        assert!(laplacian(&field).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn laplacian_wraps_around_edges() {
        let mut field = ScalarConcentration::zeros((4, 4));
        field[[0, 0]] = 1.0;
        let lap = laplacian(&field);
        assert_eq!(lap[[0, 0]], -4.0);
        // Axis-aligned neighbors, including the wrapped-around ones
        for neighbor in [[0, 1], [1, 0], [0, 3], [3, 0]] {
            assert_eq!(lap[neighbor], 1.0);
        }
        // Diagonals take no part in the stencil
        for untouched in [[1, 1], [3, 3], [1, 3], [3, 1], [2, 2]] {
            assert_eq!(lap[untouched], 0.0);
        }
    }

    #[test]
    fn uniform_base_state_is_a_fixed_point() {
        // U = 1, V = 0 zeroes both the reaction and the feed term
        let mut species = Species {
            u: ScalarConcentration::ones((8, 8)),
            v: ScalarConcentration::zeros((8, 8)),
        };
        let simulation = Simulation::new(PATTERNS[0].1);
        simulation.perform_step(&mut species);
        assert!(species.u.iter().all(|&u| u == 1.0));
        assert!(species.v.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn perturbed_state_evolves() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut species = Species::generate(32, 2, 0.5, &mut rng).unwrap();
        let before = species.clone();
        let simulation = Simulation::new(PATTERNS[0].1);
        simulation.perform_step(&mut species);
        assert_ne!(species, before);
        assert_eq!(species.shape(), before.shape());
    }
}
