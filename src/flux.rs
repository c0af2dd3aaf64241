use crate::bondi::BondiProfile;
use crate::boundary;
use crate::config::Configuration;
use crate::grid::Grid;
use crate::reconstruction::reconstruct_primitives;
use crate::riemann::RiemannSolver;
use crate::state::{CellState, Conserved};
use crate::vector::Vec3;

/// A single face's flux is never allowed to move more than this multiple of
/// a cell's current conserved inventory in one step (§4.D).
pub const FLUX_LIMITER: f64 = 2.0;




// ============================================================================
/// Accumulate the net conservative update ΔC for one cell over all of its
/// faces (§4.D): reconstruct both sides, clamp non-physical reconstructed
/// density/pressure, solve the Riemann problem, integrate by `area * dt`,
/// and scale by a flux-limiter factor bounding the drain against either
/// side's own inventory.
pub fn accumulate_cell_flux<G: Grid>(
    grid: &G,
    config: &Configuration,
    bondi_profile: Option<&dyn BondiProfile>,
    riemann_solver: &dyn RiemannSolver,
    cell: G::CellId,
    left: &CellState,
    dt: f64,
) -> Conserved {
    let left_midpoint = grid.midpoint(cell);
    let mut total = Conserved::default();

    for face in grid.neighbor_faces(cell) {
        let right = boundary::resolve(grid, config, bondi_profile, cell, left, left_midpoint, &face);

        let separation = face_separation(&face, left_midpoint);
        let separation_norm = separation.norm().max(f64::MIN_POSITIVE);

        let left_displacement = face.face_midpoint - left_midpoint;
        let left_d_ratio = left_displacement.norm() / separation_norm;
        let right_midpoint = left_midpoint + separation;
        let right_displacement = face.face_midpoint - right_midpoint;
        let right_d_ratio = right_displacement.norm() / separation_norm;

        let mut left_face_state = reconstruct_primitives(
            left.primitives, left.gradients, left_displacement,
            right.primitives, left_d_ratio,
            left.primitives, right.primitives,
        );
        let mut right_face_state = reconstruct_primitives(
            right.primitives, right.gradients, right_displacement,
            left.primitives, right_d_ratio,
            left.primitives, right.primitives,
        );

        left_face_state.density = left_face_state.density.max(0.0);
        left_face_state.pressure = left_face_state.pressure.max(0.0);
        right_face_state.density = right_face_state.density.max(0.0);
        right_face_state.pressure = right_face_state.pressure.max(0.0);

        let raw_flux = riemann_solver.solve_for_flux(
            left_face_state, right_face_state, face.outward_normal, right.frame_velocity, config.gamma,
        );

        let integrated_flux = Conserved {
            mass: raw_flux.mass_flux,
            momentum: raw_flux.momentum_flux,
            energy: raw_flux.energy_flux,
        } * (face.face_area * dt);

        let left_limiter = LimiterInventory {
            mass: left.conserved.mass,
            momentum: left.conserved.momentum,
            energy: left.conserved.energy,
            density: left.primitives.density,
            pressure: left.primitives.pressure,
        };
        let right_limiter = LimiterInventory {
            mass: right.conserved_for_limiter.mass,
            momentum: right.conserved_for_limiter.momentum,
            energy: right.conserved_for_limiter.energy,
            density: right.primitives.density,
            pressure: right.primitives.pressure,
        };
        let f = flux_limiter_factor(&integrated_flux, config.gamma, left_limiter, right_limiter);

        total = total + integrated_flux * f;
    }

    total
}

/// Displacement from `left_midpoint` to the other side of the face: the
/// grid-supplied offset for an interior neighbour, or the mirror
/// displacement across the face for a boundary (§4.B "face offset").
fn face_separation(face: &crate::grid::NeighborFace<impl Copy>, left_midpoint: Vec3) -> Vec3 {
    if face.neighbor.is_some() {
        face.neighbor_midpoint_offset
    } else {
        (face.face_midpoint - left_midpoint) * 2.0
    }
}




/// The per-cell quantities the flux limiter (§4.D step 5) compares the raw
/// integrated flux against.
struct LimiterInventory {
    mass: f64,
    momentum: Vec3,
    energy: f64,
    density: f64,
    pressure: f64,
}

/// Whether a cell's kinetic energy density dominates its thermal pressure
/// (§4.D: `|p⃗|²·ρ > γ·m²·P`) — the momentum cap is skipped for cells where
/// this is false.
fn kinetic_dominates(inventory: &LimiterInventory, gamma: f64) -> bool {
    inventory.momentum.norm2() * inventory.density > gamma * inventory.mass.powi(2) * inventory.pressure
}

/// Scalar flux-limiter factor f ∈ [0, 1] for one face (§4.D step 5): caps
/// the integrated flux so that neither side's mass, energy, or momentum
/// budget can be drained beyond `FLUX_LIMITER` times its current inventory.
fn flux_limiter_factor(flux: &Conserved, gamma: f64, left: LimiterInventory, right: LimiterInventory) -> f64 {
    let mut f = 1.0_f64;

    let m_l_limit = FLUX_LIMITER * left.mass;
    let m_r_limit = FLUX_LIMITER * right.mass;
    if flux.mass > m_l_limit && flux.mass > 0.0 {
        f = f.min(m_l_limit / flux.mass);
    }
    if -flux.mass > m_r_limit && -flux.mass > 0.0 {
        f = f.min(m_r_limit / -flux.mass);
    }

    if gamma != 1.0 {
        let e_l_limit = FLUX_LIMITER * left.energy;
        let e_r_limit = FLUX_LIMITER * right.energy;
        if flux.energy > e_l_limit && flux.energy > 0.0 {
            f = f.min(e_l_limit / flux.energy);
        }
        if -flux.energy > e_r_limit && -flux.energy > 0.0 {
            f = f.min(e_r_limit / -flux.energy);
        }
    }

    let flux_momentum_norm2 = flux.momentum.norm2();
    if flux_momentum_norm2 > 0.0 {
        if kinetic_dominates(&left, gamma) {
            let p_l_limit_sq = (FLUX_LIMITER * left.momentum.norm()).powi(2);
            if flux_momentum_norm2 > p_l_limit_sq {
                f = f.min((p_l_limit_sq / flux_momentum_norm2).sqrt());
            }
        }
        if kinetic_dominates(&right, gamma) {
            let p_r_limit_sq = (FLUX_LIMITER * right.momentum.norm()).powi(2);
            if flux_momentum_norm2 > p_r_limit_sq {
                f = f.min((p_r_limit_sq / flux_momentum_norm2).sqrt());
            }
        }
    }

    f.max(0.0).min(1.0)
}
