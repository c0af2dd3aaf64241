use crate::vector::Vec3;




// ============================================================================
/// Analytic spherical-accretion profile consulted at `bondi` boundary faces
/// (§6, §3 glossary). Out of scope to implement concretely; the core only
/// consumes this trait.
pub trait BondiProfile: Sync {
    /// `(density, velocity, pressure, neutral_fraction)` at `position` (SI or
    /// internal units, matching whatever unit system the caller stored the
    /// profile in — the core queries it only after converting `position` to
    /// the same units the profile itself expects).
    fn hydrodynamic_variables(&self, position: Vec3) -> (f64, Vec3, f64, f64);
}
