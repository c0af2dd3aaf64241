//! MUSCL-Hancock finite-volume hydrodynamics core for radiation-hydrodynamics
//! of ionised astrophysical gas.
//!
//! This crate implements the integrator only: unit-system bookkeeping
//! (`units`), the boundary-condition oracle (`boundary`), slope-limited
//! reconstruction (`reconstruction`), gradient estimation (`gradient`), the
//! flux kernel (`flux`) and the step driver (`step`). The grid container, the
//! Riemann solver, the ionisation/radiative-transfer subsystem and gravity
//! are consumed through the traits in `grid`, `riemann` and `bondi`; hosts
//! supply concrete implementations.

pub mod bondi;
pub mod boundary;
pub mod config;
pub mod error;
pub mod flux;
pub mod gradient;
pub mod grid;
pub mod reconstruction;
pub mod riemann;
pub mod state;
pub mod step;
pub mod units;
pub mod vector;

pub use bondi::BondiProfile;
pub use config::{Axis, BoundaryPolicy, BoundaryTable, Configuration, Side};
pub use error::Error;
pub use grid::{Grid, NeighborFace};
pub use riemann::{RiemannFlux, RiemannSolver, RiemannSolverFactory};
pub use state::{CellState, Conserved, Gradients, IonizationState, Primitives};
pub use step::StepDriver;
pub use units::{Quantity, UnitSystem};
pub use vector::Vec3;
