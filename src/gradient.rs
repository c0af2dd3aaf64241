use crate::bondi::BondiProfile;
use crate::boundary;
use crate::config::Configuration;
use crate::grid::Grid;
use crate::state::{Gradients, Primitives};
use crate::vector::Vec3;




// ============================================================================
/// Produces per-cell primitive gradients from a cell's own state and its
/// neighbours' (§4.F). The concrete Green-Gauss estimator below is the only
/// implementation the core ships; hosts may supply another by implementing
/// this trait themselves, but nothing in this crate calls any implementation
/// but the one it owns.
pub trait GradientEstimator: Sync {
    fn estimate<G: Grid>(
        &self,
        grid: &G,
        config: &Configuration,
        bondi_profile: Option<&dyn BondiProfile>,
        cell: G::CellId,
    ) -> Gradients;
}




// ============================================================================
/// Green-Gauss cell-gradient estimator: ∇φ_i = (1/V_i) Σ_f φ_f A_f n̂_f, where
/// the face value φ_f is the arithmetic mean of the two cells (or cell and
/// boundary state) bracketing the face.
pub struct GreenGaussGradient;

impl GradientEstimator for GreenGaussGradient {
    fn estimate<G: Grid>(
        &self,
        grid: &G,
        config: &Configuration,
        bondi_profile: Option<&dyn BondiProfile>,
        cell: G::CellId,
    ) -> Gradients {
        let left = grid.state(cell);
        let left_midpoint = grid.midpoint(cell);
        let volume = grid.volume(cell);

        let mut sum_density = Vec3::zero();
        let mut sum_velocity = [Vec3::zero(); 3];
        let mut sum_pressure = Vec3::zero();

        for face in grid.neighbor_faces(cell) {
            let right = boundary::resolve(grid, config, bondi_profile, cell, &left, left_midpoint, &face);
            let face_value = average_primitives(left.primitives, right.primitives);
            let weight = face.outward_normal * face.face_area;

            sum_density = sum_density + weight * face_value.density;
            for i in 0..3 {
                sum_velocity[i] = sum_velocity[i] + weight * face_value.velocity[i];
            }
            sum_pressure = sum_pressure + weight * face_value.pressure;
        }

        if volume <= 0.0 {
            return Gradients::zero();
        }

        Gradients {
            d_density: sum_density / volume,
            d_velocity: [sum_velocity[0] / volume, sum_velocity[1] / volume, sum_velocity[2] / volume],
            d_pressure: sum_pressure / volume,
        }
    }
}

fn average_primitives(left: Primitives, right: Primitives) -> Primitives {
    Primitives {
        density: 0.5 * (left.density + right.density),
        velocity: (left.velocity + right.velocity) * 0.5,
        pressure: 0.5 * (left.pressure + right.pressure),
    }
}
