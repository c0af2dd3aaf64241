use serde::{Serialize, Deserialize};
use crate::vector::Vec3;




// ============================================================================
/// Primitive hydro variables P = (ρ, v⃗, p) (§3).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Primitives {
    pub density: f64,
    pub velocity: Vec3,
    pub pressure: f64,
}

impl Primitives {
    pub fn vacuum() -> Self {
        Self { density: 0.0, velocity: Vec3::zero(), pressure: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.density.is_finite() && self.velocity.is_finite() && self.pressure.is_finite()
    }
}




// ============================================================================
/// Primitive gradients G = (∇ρ, ∇vₓ, ∇vᵧ, ∇vᵤ, ∇p) (§3): five three-vectors,
/// one per scalar component of the primitive state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gradients {
    pub d_density: Vec3,
    /// Gradient of each velocity component: `d_velocity[i]` is ∇(v⃗·ê_i).
    pub d_velocity: [Vec3; 3],
    pub d_pressure: Vec3,
}

impl Gradients {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Divergence of the velocity field: ∂vₓ/∂x + ∂vᵧ/∂y + ∂vᵤ/∂z.
    pub fn velocity_divergence(&self) -> f64 {
        self.d_velocity[0].x() + self.d_velocity[1].y() + self.d_velocity[2].z()
    }

    /// Mirror this gradient set across a reflective/outflow face whose
    /// outward-normal axis is `axis` (§4.B).
    pub fn mirrored_across(&self, axis: usize) -> Self {
        let mut out = *self;
        out.d_density = out.d_density.negate_component(axis);
        out.d_pressure = out.d_pressure.negate_component(axis);
        for j in 0..3 {
            if j != axis {
                out.d_velocity[j] = out.d_velocity[j].negate_component(axis);
            }
        }
        out
    }

    /// Zero the gradient row for velocity component `axis` (used by the
    /// outflow policy when the normal velocity would flow inward).
    pub fn zeroed_velocity_row(&self, axis: usize) -> Self {
        let mut out = *self;
        out.d_velocity[axis] = Vec3::zero();
        out
    }
}

impl std::ops::Add for Gradients {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            d_density: self.d_density + rhs.d_density,
            d_velocity: [
                self.d_velocity[0] + rhs.d_velocity[0],
                self.d_velocity[1] + rhs.d_velocity[1],
                self.d_velocity[2] + rhs.d_velocity[2],
            ],
            d_pressure: self.d_pressure + rhs.d_pressure,
        }
    }
}

impl std::ops::Sub for Gradients {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            d_density: self.d_density - rhs.d_density,
            d_velocity: [
                self.d_velocity[0] - rhs.d_velocity[0],
                self.d_velocity[1] - rhs.d_velocity[1],
                self.d_velocity[2] - rhs.d_velocity[2],
            ],
            d_pressure: self.d_pressure - rhs.d_pressure,
        }
    }
}

impl std::ops::Mul<f64> for Gradients {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            d_density: self.d_density * rhs,
            d_velocity: [self.d_velocity[0] * rhs, self.d_velocity[1] * rhs, self.d_velocity[2] * rhs],
            d_pressure: self.d_pressure * rhs,
        }
    }
}

impl std::ops::Div<f64> for Gradients {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self {
            d_density: self.d_density / rhs,
            d_velocity: [self.d_velocity[0] / rhs, self.d_velocity[1] / rhs, self.d_velocity[2] / rhs],
            d_pressure: self.d_pressure / rhs,
        }
    }
}





// ============================================================================
/// Conserved hydro variables C = (m, p⃗, E) (§3), also used as the shape of
/// the flux accumulator ΔC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Conserved {
    pub mass: f64,
    pub momentum: Vec3,
    pub energy: f64,
}

impl Conserved {
    pub fn is_finite(&self) -> bool {
        self.mass.is_finite() && self.momentum.is_finite() && self.energy.is_finite()
    }
}

impl std::ops::Add for Conserved {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { mass: self.mass + rhs.mass, momentum: self.momentum + rhs.momentum, energy: self.energy + rhs.energy }
    }
}

impl std::ops::Sub for Conserved {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { mass: self.mass - rhs.mass, momentum: self.momentum - rhs.momentum, energy: self.energy - rhs.energy }
    }
}

impl std::ops::Mul<f64> for Conserved {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { mass: self.mass * rhs, momentum: self.momentum * rhs, energy: self.energy * rhs }
    }
}

impl std::ops::Div<f64> for Conserved {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self { mass: self.mass / rhs, momentum: self.momentum / rhs, energy: self.energy / rhs }
    }
}





// ============================================================================
/// Per-cell ionisation variables (§3): read by the radiation source term and
/// mean-molecular-mass bookkeeping, written back (T, n) after each step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IonizationState {
    /// Hydrogen neutral fraction, x_H ∈ [0, 1].
    pub neutral_fraction: f64,
    /// Gas temperature (K).
    pub temperature: f64,
    /// Number density (1/m^3 in SI, internal units thereafter).
    pub number_density: f64,
}

impl IonizationState {
    /// μ = ½(1 + x_H): interpolates between fully ionised (μ≈½) and fully
    /// neutral (μ≈1) hydrogen.
    pub fn mean_molecular_mass_fraction(&self) -> f64 {
        0.5 * (1.0 + self.neutral_fraction)
    }
}




// ============================================================================
/// Full per-cell hydrodynamic state carried by the core (§3).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellState {
    pub primitives: Primitives,
    pub gradients: Gradients,
    pub conserved: Conserved,
    pub flux_delta: Conserved,
    /// Power applied over Δt, written by an external energy-injection subsystem.
    pub energy_rate: f64,
    /// One-shot energy applied once, written by an external subsystem.
    pub energy: f64,
    /// Gravitational acceleration, read-only from the core's perspective.
    pub gravity: Vec3,
    pub ionization: IonizationState,
}

impl CellState {
    /// True exactly when this cell is a vacuum cell: m=0 implies p⃗=0 and
    /// ρ=v=p=T=0 (§3 invariant).
    pub fn is_vacuum(&self) -> bool {
        self.conserved.mass <= 0.0
    }

    pub fn set_vacuum(&mut self) {
        self.primitives = Primitives::vacuum();
        self.conserved.mass = 0.0;
        self.conserved.momentum = Vec3::zero();
        self.ionization.temperature = 0.0;
        self.ionization.number_density = 0.0;
    }

    /// Clamp non-physical state produced under SAFE_HYDRO policy (§7): a
    /// negative density or pressure collapses the cell to vacuum instead of
    /// raising a contract violation.
    pub fn enforce_safe_hydro(&mut self) {
        if self.primitives.density <= 0.0 || self.primitives.pressure <= 0.0 || self.conserved.mass <= 0.0 {
            self.set_vacuum();
        }
    }
}
