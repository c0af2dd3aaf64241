use crate::state::CellState;
use crate::vector::Vec3;




// ============================================================================
/// One neighbour face of a cell, as yielded by `Grid::neighbor_faces` (§6).
#[derive(Clone, Copy, Debug)]
pub struct NeighborFace<Id> {
    /// `None` marks a domain-boundary face (no interior neighbour); the
    /// boundary oracle (§4.B) resolves the right state in that case.
    pub neighbor: Option<Id>,
    pub face_midpoint: Vec3,
    /// Outward-pointing unit normal of this face, from the cell's perspective.
    pub outward_normal: Vec3,
    pub face_area: f64,
    /// Displacement from this cell's midpoint to the neighbour's midpoint
    /// (accounts for periodic wrap-around); `Vec3::zero()` at a domain boundary.
    pub neighbor_midpoint_offset: Vec3,
}




// ============================================================================
/// The grid capability the core consumes (§6): cell iteration, geometry
/// queries, per-cell state storage, neighbour topology and grid motion. The
/// concrete container (structured, unstructured, or moving-mesh) is owned
/// entirely outside this crate.
///
/// Mutating methods take `&self`: implementors provide interior mutability
/// (e.g. one lock or atomic slot per cell) so the core's parallel traversals
/// (§5) can write disjoint cells concurrently without the trait itself
/// needing `&mut self`. Callers must never target the same cell from two
/// threads within a single parallel phase.
pub trait Grid: Sync {
    type CellId: Copy + Eq + std::hash::Hash + Send + Sync + std::fmt::Debug;

    /// All cell identifiers, in an implementation-defined but stable order.
    fn cell_ids(&self) -> Vec<Self::CellId>;

    fn midpoint(&self, cell: Self::CellId) -> Vec3;
    fn volume(&self, cell: Self::CellId) -> f64;

    fn state(&self, cell: Self::CellId) -> CellState;
    fn set_state(&self, cell: Self::CellId, state: CellState);

    /// Every neighbour face of `cell`, interior or domain-boundary.
    fn neighbor_faces(&self, cell: Self::CellId) -> Vec<NeighborFace<Self::CellId>>;

    /// Interface-frame velocity for the face between `cell` and `neighbor`
    /// (or a boundary face, when `neighbor` is `None`) at `face_midpoint`.
    fn interface_velocity(&self, cell: Self::CellId, neighbor: Option<Self::CellId>, face_midpoint: Vec3) -> Vec3;

    /// Recompute grid-motion (generator point) velocities, called once after
    /// `initialise` and again at the end of `do_step` (§4.E).
    fn set_grid_velocity(&self, gamma: f64, velocity_unit_si: f64);

    /// Move the grid (generator points / mesh vertices) forward by `dt_si`.
    fn evolve(&self, dt_si: f64);

    /// Debug-only: clear the per-cell access bitmap before a parallel pass.
    fn reset_access_flags(&self);
    /// Debug-only: true iff every cell was visited exactly once since the
    /// last `reset_access_flags` (§5).
    fn check_access(&self) -> bool;

    /// `(origin, side_lengths, periodicity[x,y,z])`.
    fn get_box(&self) -> (Vec3, Vec3, [bool; 3]);
}
