use crate::state::{Gradients, Primitives};
use crate::vector::Vec3;

const PSI_1: f64 = 0.5;
const PSI_2: f64 = 0.25;




// ============================================================================
/// Slope-limited reconstruction of a single scalar quantity at a face
/// midpoint (§4.C). `phi_l`/`phi_r` are the cell-centred values on either
/// side of the face; `phi_self`/`grad_self` are this side's own value and
/// gradient; `displacement` is the vector from this cell's centre to the
/// face; `d_ratio` is `|displacement| / |x_L - x_R|`.
pub fn limited_reconstruct(
    phi_self: f64,
    grad_self: Vec3,
    displacement: Vec3,
    phi_neighbor: f64,
    d_ratio: f64,
    phi_l: f64,
    phi_r: f64,
) -> f64 {
    let phi_prime = phi_self + grad_self.dot(&displacement);
    let phi_bar = phi_self + d_ratio * (phi_neighbor - phi_self);

    if phi_l == phi_r {
        return phi_l;
    }

    let delta_1 = PSI_1 * (phi_l - phi_r).abs();
    let delta_2 = PSI_2 * (phi_l - phi_r).abs();
    let phi_min = phi_l.min(phi_r);
    let phi_max = phi_l.max(phi_r);

    let phi_plus = bounded_extreme(phi_max, delta_1);
    let phi_minus = bounded_extreme(phi_min, -delta_1);

    if phi_l < phi_r {
        phi_minus.max((phi_bar + delta_2).min(phi_prime))
    } else {
        phi_plus.min((phi_bar - delta_2).max(phi_prime))
    }
}




/// One side (plus or minus) of the limiter window (§4.C): given an extreme
/// value `phi_extreme` (φ_max or φ_min) and a signed offset `delta` (+δ₁ for
/// the upper bound, −δ₁ for the lower), return φ⁺ or φ⁻.
fn bounded_extreme(phi_extreme: f64, delta: f64) -> f64 {
    let shifted = phi_extreme + delta;
    if shifted.signum() == phi_extreme.signum() {
        shifted
    } else {
        phi_extreme * phi_extreme.abs() / (phi_extreme.abs() + delta.abs() + f64::MIN_POSITIVE)
    }
}




// ============================================================================
/// Reconstruct the full primitive state on one side of a face (§4.C, applied
/// component-wise to ρ, each velocity component, and p).
pub fn reconstruct_primitives(
    self_primitives: Primitives,
    self_gradients: Gradients,
    displacement: Vec3,
    neighbor_primitives: Primitives,
    d_ratio: f64,
    left_primitives: Primitives,
    right_primitives: Primitives,
) -> Primitives {
    let density = limited_reconstruct(
        self_primitives.density, self_gradients.d_density, displacement,
        neighbor_primitives.density, d_ratio,
        left_primitives.density, right_primitives.density,
    );

    let mut velocity = Vec3::zero();
    for i in 0..3 {
        velocity[i] = limited_reconstruct(
            self_primitives.velocity[i], self_gradients.d_velocity[i], displacement,
            neighbor_primitives.velocity[i], d_ratio,
            left_primitives.velocity[i], right_primitives.velocity[i],
        );
    }

    let pressure = limited_reconstruct(
        self_primitives.pressure, self_gradients.d_pressure, displacement,
        neighbor_primitives.pressure, d_ratio,
        left_primitives.pressure, right_primitives.pressure,
    );

    Primitives { density, velocity, pressure }
}
