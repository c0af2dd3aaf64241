use serde::{Serialize, Deserialize};
use crate::error::Error;
use crate::riemann::RiemannSolverFactory;




// ============================================================================
/// One of the three Cartesian axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis { X, Y, Z }




/// Which face of an axis (low coordinate vs. high coordinate).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side { Low, High }




impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn from_index(i: usize) -> Self {
        match i {
            0 => Axis::X,
            1 => Axis::Y,
            2 => Axis::Z,
            _ => panic!("axis index out of range: {}", i),
        }
    }
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Low, Side::High];
}

/// `(axis, side)` -> flat index into a 6-element boundary table, per the
/// design note recommending a `axis*2 + side` layout.
pub fn face_index(axis: Axis, side: Side) -> usize {
    axis.index() * 2 + match side { Side::Low => 0, Side::High => 1 }
}




// ============================================================================
/// Per-face boundary policy (§3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    Periodic,
    Reflective,
    Inflow,
    Outflow,
    Bondi,
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        BoundaryPolicy::Reflective
    }
}




// ============================================================================
/// The six boundary policies, one per `(axis, side)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryTable([BoundaryPolicy; 6]);

impl Default for BoundaryTable {
    fn default() -> Self {
        Self([BoundaryPolicy::Reflective; 6])
    }
}

impl BoundaryTable {
    pub fn get(&self, axis: Axis, side: Side) -> BoundaryPolicy {
        self.0[face_index(axis, side)]
    }

    pub fn set(&mut self, axis: Axis, side: Side, policy: BoundaryPolicy) {
        self.0[face_index(axis, side)] = policy;
    }
}




// ============================================================================
/// Immutable simulation configuration (§6). Parsing a configuration file or
/// command line into this struct is the caller's responsibility; the core
/// only validates and consumes it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Polytropic index γ.
    #[serde(default = "Configuration::default_gamma")]
    pub gamma: f64,

    /// Whether the radiative heating term is applied.
    #[serde(default = "Configuration::default_true")]
    pub do_heating: bool,

    /// Whether the radiative cooling term is applied.
    #[serde(default)]
    pub do_cooling: bool,

    /// CFL safety factor.
    #[serde(default = "Configuration::default_cfl")]
    pub cfl: f64,

    /// Name of the Riemann solver to request from the host factory.
    #[serde(default = "Configuration::default_solver")]
    pub riemann_solver: String,

    /// Neutral-gas temperature floor (K).
    #[serde(default = "Configuration::default_t_neutral")]
    pub t_neutral: f64,

    /// Fully-ionised gas temperature (K).
    #[serde(default = "Configuration::default_t_ionised")]
    pub t_ionised: f64,

    /// Temperature above which a cell is considered shock-heated (K).
    #[serde(default = "Configuration::default_t_shock")]
    pub t_shock: f64,

    /// Velocity cap (m/s). Defaults to an effectively unbounded sentinel.
    #[serde(default = "Configuration::default_v_max")]
    pub v_max: f64,

    /// Per-face boundary policy table.
    #[serde(default)]
    pub boundary: BoundaryTable,

    /// Whether a Bondi profile handle was supplied by the host program.
    #[serde(default)]
    pub has_bondi_profile: bool,
}




// ============================================================================
impl Configuration {
    fn default_gamma() -> f64 { 5.0 / 3.0 }
    fn default_true() -> bool { true }
    fn default_cfl() -> f64 { 0.2 }
    fn default_solver() -> String { "Exact".to_string() }
    fn default_t_neutral() -> f64 { 100.0 }
    fn default_t_ionised() -> f64 { 1.0e4 }
    fn default_t_shock() -> f64 { 3.0e4 }
    fn default_v_max() -> f64 { 1.0e99 }

    pub fn is_isothermal(&self) -> bool {
        self.gamma == 1.0
    }

    /// Resolves `riemann_solver` against a host-supplied factory (§7:
    /// "unknown solver name is fatal at construction").
    pub fn validate_solver_name(&self, factory: &RiemannSolverFactory) -> Result<(), Error> {
        if factory(&self.riemann_solver).is_none() {
            return Err(Error::UnknownSolver(self.riemann_solver.clone()));
        }
        Ok(())
    }

    /// Checks that do not require knowledge of the grid: field ranges,
    /// per-axis periodicity symmetry, and Bondi-profile presence.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.gamma >= 1.0 && self.gamma <= 2.0) {
            return Err(Error::OutOfRange { field: "gamma", low: 1.0, high: 2.0, value: self.gamma });
        }
        if !(self.cfl > 0.0 && self.cfl <= 0.7) {
            return Err(Error::OutOfRange { field: "cfl", low: 0.0, high: 0.7, value: self.cfl });
        }
        if self.v_max <= 0.0 {
            return Err(Error::OutOfRange { field: "v_max", low: 0.0, high: f64::INFINITY, value: self.v_max });
        }

        for axis in Axis::ALL {
            let low = self.boundary.get(axis, Side::Low);
            let high = self.boundary.get(axis, Side::High);
            let low_periodic = low == BoundaryPolicy::Periodic;
            let high_periodic = high == BoundaryPolicy::Periodic;
            if low_periodic != high_periodic {
                let (side, _) = if low_periodic { (Side::High, high) } else { (Side::Low, low) };
                return Err(Error::AsymmetricPeriodicity { axis, side });
            }
        }

        if !self.has_bondi_profile {
            for axis in Axis::ALL {
                for side in Side::ALL {
                    if self.boundary.get(axis, side) == BoundaryPolicy::Bondi {
                        return Err(Error::MissingBondiProfile { axis, side });
                    }
                }
            }
        }

        Ok(())
    }

    /// Checks the boundary table's periodicity against the grid's own
    /// periodicity flags (§3: "must match the grid's own periodicity flags").
    pub fn validate_against_grid(&self, grid_periodicity: [bool; 3]) -> Result<(), Error> {
        for axis in Axis::ALL {
            let config_periodic = self.boundary.get(axis, Side::Low) == BoundaryPolicy::Periodic;
            if config_periodic != grid_periodicity[axis.index()] {
                return Err(Error::PeriodicityMismatchWithGrid { axis, side: Side::Low });
            }
        }
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            gamma: Self::default_gamma(),
            do_heating: true,
            do_cooling: false,
            cfl: Self::default_cfl(),
            riemann_solver: Self::default_solver(),
            t_neutral: Self::default_t_neutral(),
            t_ionised: Self::default_t_ionised(),
            t_shock: Self::default_t_shock(),
            v_max: Self::default_v_max(),
            boundary: BoundaryTable::default(),
            has_bondi_profile: false,
        }
    }
}
