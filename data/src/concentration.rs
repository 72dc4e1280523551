//! Concentration of chemical species
//!
//! Initial conditions are not a fixed center square but a randomized set of
//! disk-shaped patches, sampled independently for each species so that the
//! two layouts need not align. This is what makes every seed produce a
//! different texture.

use crate::{Error, Precision};
use ndarray::Array2;
use rand::Rng;
use rand_distr::{Binomial, Distribution};
use std::ops::Range;

/// Tabulated concentration of a single chemical species
pub type ScalarConcentration = Array2<Precision>;

/// Fraction of the grid area that seeding patches may cover
///
/// Also reused as the fraction of the patch radius that defines the
/// "effective diameter" of the packing estimate below.
const COVERAGE_RATIO: f64 = 0.1;

/// Minimum center-to-center patch spacing, in units of the patch radius
const SPACING_FACTOR: f64 = 2.5;

/// Substrate concentration painted inside a U patch
const U_PATCH_VALUES: Range<Precision> = 0.35..0.85;

/// Activator concentration painted inside a V patch
const V_PATCH_VALUES: Range<Precision> = 0.30..0.60;

/// Concentration of all species involved in the reaction
#[derive(Clone, Debug, PartialEq)]
pub struct Species {
    /// Concentration of species U (substrate)
    pub u: ScalarConcentration,

    /// Concentration of species V (activator)
    pub v: ScalarConcentration,
}
//
impl Species {
    /// Set up randomized initial concentrations
    ///
    /// U starts uniformly at 1.0 and V at 0.0, then disk-shaped patches of
    /// altered concentration are painted over each field at independently
    /// sampled centers. One uniform fill value is drawn per patch.
    ///
    /// Fails on configurations that cannot fit a patch away from the grid
    /// edges, before any field is allocated.
    pub fn generate(
        grid_length: usize,
        patch_radius: usize,
        patch_prob: f64,
        rng: &mut impl Rng,
    ) -> Result<Self, Error> {
        // Reject broken configurations before doing any work
        if patch_radius == 0 {
            return Err(Error::ZeroPatchRadius);
        }
        if grid_length <= 2 * patch_radius {
            return Err(Error::GridTooSmall {
                grid_length,
                patch_radius,
            });
        }
        if !(0.0..=1.0).contains(&patch_prob) {
            return Err(Error::PatchProbability(patch_prob));
        }

        // Decide how many patches to attempt
        let num_patches = patch_budget(grid_length, patch_radius, patch_prob, rng);

        // Start from the uniform base state
        let mut u = ScalarConcentration::ones((grid_length, grid_length));
        let mut v = ScalarConcentration::zeros((grid_length, grid_length));

        // Sample patch centers for U and for V independently
        let centers_u = sample_centers(num_patches, grid_length, patch_radius, rng);
        let centers_v = sample_centers(num_patches, grid_length, patch_radius, rng);

        // Paint the patches
        for center in centers_u {
            Patch {
                center,
                radius: patch_radius,
                value: rng.gen_range(U_PATCH_VALUES),
            }
            .paint(&mut u);
        }
        for center in centers_v {
            Patch {
                center,
                radius: patch_radius,
                value: rng.gen_range(V_PATCH_VALUES),
            }
            .paint(&mut v);
        }

        Ok(Self { u, v })
    }

    /// Check out the shape of the concentration matrices
    pub fn shape(&self) -> [usize; 2] {
        let [rows, cols] = self.u.shape() else {
            panic!("Expected 2D shape")
        };
        [*rows, *cols]
    }
}

/// Disk-shaped seeding region, used only while building initial fields
#[derive(Copy, Clone, Debug)]
struct Patch {
    /// Center of the disk, as (row, col)
    center: [usize; 2],

    /// Radius of the disk
    radius: usize,

    /// Concentration painted over the disk interior
    value: Precision,
}
//
impl Patch {
    /// Overwrite the disk interior, leaving the rest of the field untouched
    ///
    /// Centers are sampled at least one radius away from every edge, so the
    /// bounding box never leaves the grid.
    fn paint(&self, field: &mut ScalarConcentration) {
        let [row, col] = self.center;
        let radius2 = (self.radius * self.radius) as i64;
        for r in (row - self.radius)..=(row + self.radius) {
            for c in (col - self.radius)..=(col + self.radius) {
                let dr = r as i64 - row as i64;
                let dc = c as i64 - col as i64;
                if dr * dr + dc * dc <= radius2 {
                    field[[r, c]] = self.value;
                }
            }
        }
    }
}

/// Estimate how many patches to attempt for a given grid and density
///
/// A binomial draw over a dense packing estimate proposes a count, which is
/// then clamped to the area coverage cap. At least one patch is always
/// attempted.
fn patch_budget(
    grid_length: usize,
    patch_radius: usize,
    patch_prob: f64,
    rng: &mut impl Rng,
) -> usize {
    let effective_diameter = COVERAGE_RATIO * patch_radius as f64;
    let patches_per_row = (grid_length as f64 / effective_diameter) as u64;
    let max_possible = patches_per_row * patches_per_row;
    let proposed = Binomial::new(max_possible, patch_prob)
        .expect("patch_prob was validated by the caller")
        .sample(rng) as usize;

    let grid_area = (grid_length * grid_length) as f64;
    let patch_area = std::f64::consts::PI * (patch_radius * patch_radius) as f64;
    let max_allowed = (COVERAGE_RATIO * grid_area / patch_area) as usize;

    proposed.min(max_allowed).max(1)
}

/// Rejection-sample patch centers with a pairwise spacing guarantee
///
/// Candidates are drawn uniformly over the grid interior and accepted when
/// their squared distance to every previously accepted center reaches the
/// spacing threshold. The attempt budget may run out first, in which case
/// fewer centers are returned and pattern density silently degrades.
fn sample_centers(
    count: usize,
    grid_length: usize,
    patch_radius: usize,
    rng: &mut impl Rng,
) -> Vec<[usize; 2]> {
    let mut centers = Vec::<[usize; 2]>::with_capacity(count);
    let max_tries = 10 * count;
    let min_dist2 = (SPACING_FACTOR * patch_radius as f64).powi(2);
    let coords = patch_radius..(grid_length - patch_radius);

    let mut tries = 0;
    while centers.len() < count && tries < max_tries {
        let row = rng.gen_range(coords.clone());
        let col = rng.gen_range(coords.clone());
        let spaced = centers.iter().all(|&[r, c]| {
            let dr = row as f64 - r as f64;
            let dc = col as f64 - c as f64;
            dr * dr + dc * dc >= min_dist2
        });
        if spaced {
            centers.push([row, col]);
        }
        tries += 1;
    }

    if centers.len() < count {
        log::warn!(
            "patch sampling exhausted its budget, placing {}/{count} patches",
            centers.len(),
        );
    }
    centers
}
