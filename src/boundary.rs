use crate::bondi::BondiProfile;
use crate::config::{Axis, BoundaryPolicy, Configuration, Side};
use crate::grid::{Grid, NeighborFace};
use crate::state::{CellState, Conserved, Gradients, Primitives};
use crate::vector::Vec3;




// ============================================================================
/// Everything the flux kernel and gradient estimator need about the
/// right-hand side of a face (§4.B).
#[derive(Clone, Copy, Debug)]
pub struct RightState {
    pub primitives: Primitives,
    pub gradients: Gradients,
    /// The conserved state used to build the right-side flux-limiter caps
    /// (§4.D); at a boundary this reuses the left cell's own conserved state.
    pub conserved_for_limiter: Conserved,
    pub frame_velocity: Vec3,
}




/// Derive which face of which axis an outward normal belongs to: the axis
/// with the largest-magnitude component, and `Low`/`High` from its sign
/// (§4.B, §9: "a 6-element array of policy tags indexed by axis*2 + side").
pub fn axis_and_side(outward_normal: Vec3) -> (Axis, Side) {
    let (mut best_axis, mut best_magnitude) = (0usize, outward_normal[0].abs());
    for i in 1..3 {
        let magnitude = outward_normal[i].abs();
        if magnitude > best_magnitude {
            best_axis = i;
            best_magnitude = magnitude;
        }
    }
    let side = if outward_normal[best_axis] < 0.0 { Side::Low } else { Side::High };
    (Axis::from_index(best_axis), side)
}




/// Resolve the right state across an interior face.
pub fn resolve_interior<G: Grid>(grid: &G, cell: G::CellId, neighbor: G::CellId, face_midpoint: Vec3) -> RightState {
    let right = grid.state(neighbor);
    let frame_velocity = grid.interface_velocity(cell, Some(neighbor), face_midpoint);
    RightState {
        primitives: right.primitives,
        gradients: right.gradients,
        conserved_for_limiter: right.conserved,
        frame_velocity,
    }
}




/// Resolve the right state across a domain-boundary face, given the left
/// cell's own state and midpoint (§4.B table). `frame_velocity` is supplied
/// by the caller since it comes from the grid.
pub fn resolve_boundary(
    config: &Configuration,
    bondi_profile: Option<&dyn BondiProfile>,
    left: &CellState,
    left_midpoint: Vec3,
    face: &NeighborFace<impl Copy>,
    frame_velocity: Vec3,
) -> RightState {
    let (axis, side) = axis_and_side(face.outward_normal);
    let policy = config.boundary.get(axis, side);
    let i = axis.index();

    match policy {
        BoundaryPolicy::Periodic => {
            unreachable!("a periodic face must be resolved by the grid as an interior neighbour, not the oracle")
        }

        // Inflow is a documented synonym of reflective (spec §9 open question).
        BoundaryPolicy::Reflective | BoundaryPolicy::Inflow => {
            let mut primitives = left.primitives;
            primitives.velocity = primitives.velocity.negate_component(i);
            let gradients = left.gradients.mirrored_across(i);
            RightState { primitives, gradients, conserved_for_limiter: left.conserved, frame_velocity }
        }

        BoundaryPolicy::Outflow => {
            let normal_velocity = left.primitives.velocity.dot(&face.outward_normal);
            if normal_velocity < 0.0 {
                let mut primitives = left.primitives;
                primitives.velocity = primitives.velocity.negate_component(i);
                let gradients = left.gradients.zeroed_velocity_row(i);
                RightState { primitives, gradients, conserved_for_limiter: left.conserved, frame_velocity }
            } else {
                RightState {
                    primitives: left.primitives,
                    gradients: left.gradients,
                    conserved_for_limiter: left.conserved,
                    frame_velocity,
                }
            }
        }

        BoundaryPolicy::Bondi => {
            let profile = bondi_profile
                .expect("bondi boundary face without a profile; Configuration::validate should have rejected this");
            // x_R = x_L + face offset, with the face offset taken as the
            // mirror displacement 2*(x_f - x_L) since there is no real
            // neighbour cell to offset from.
            let x_r = face.face_midpoint * 2.0 - left_midpoint;
            let (density, velocity, pressure, _neutral_fraction) = profile.hydrodynamic_variables(x_r);

            // The limiter caps need a conserved inventory consistent with
            // this density/velocity/pressure, not the left cell's own — the
            // only volume available here is the left cell's, used as a
            // stand-in reference volume for the profile-sourced state.
            let reference_volume = left.conserved.mass / left.primitives.density.max(f64::MIN_POSITIVE);
            let mass = density * reference_volume;
            let momentum = velocity * mass;
            let energy = if config.gamma > 1.0 {
                pressure * reference_volume / (config.gamma - 1.0) + 0.5 * momentum.dot(&velocity)
            } else {
                0.5 * momentum.dot(&velocity)
            };

            RightState {
                primitives: Primitives { density, velocity, pressure },
                gradients: Gradients::zero(),
                conserved_for_limiter: Conserved { mass, momentum, energy },
                frame_velocity,
            }
        }
    }
}




/// Resolve the right state across any face, interior or boundary.
pub fn resolve<G: Grid>(
    grid: &G,
    config: &Configuration,
    bondi_profile: Option<&dyn BondiProfile>,
    cell: G::CellId,
    left: &CellState,
    left_midpoint: Vec3,
    face: &NeighborFace<G::CellId>,
) -> RightState {
    match face.neighbor {
        Some(neighbor) => resolve_interior(grid, cell, neighbor, face.face_midpoint),
        None => {
            let frame_velocity = grid.interface_velocity(cell, None, face.face_midpoint);
            resolve_boundary(config, bondi_profile, left, left_midpoint, face, frame_velocity)
        }
    }
}
