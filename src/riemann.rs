use crate::state::Primitives;
use crate::vector::Vec3;




// ============================================================================
/// Raw Riemann fluxes in the interface frame, before the face integrates them
/// over `area * dt` and the flux limiter is applied (§4.D).
#[derive(Clone, Copy, Debug, Default)]
pub struct RiemannFlux {
    pub mass_flux: f64,
    pub momentum_flux: Vec3,
    /// Left unpopulated (0.0) by isothermal solvers; the flux kernel never
    /// reads it when `gamma == 1.0`.
    pub energy_flux: f64,
}




// ============================================================================
/// The Riemann solver the core consumes (§6). The concrete solver
/// implementation is out of scope for this crate: hosts register one by name
/// through a `RiemannSolverFactory`.
pub trait RiemannSolver: Sync {
    /// Solve the Riemann problem between `left` and `right` states across a
    /// face with outward normal `normal`, in a frame moving at
    /// `frame_velocity`, for a gas with polytropic index `gamma`.
    fn solve_for_flux(
        &self,
        left: Primitives,
        right: Primitives,
        normal: Vec3,
        frame_velocity: Vec3,
        gamma: f64,
    ) -> RiemannFlux;
}




/// A factory resolving a configuration's `riemann_solver` name to a boxed
/// solver instance; hosts supply this (§6, §7 "unknown solver name").
pub type RiemannSolverFactory<'a> = dyn Fn(&str) -> Option<Box<dyn RiemannSolver + 'a>> + 'a;
