//! In-crate test fixtures driving the end-to-end scenarios from outside the
//! crate boundary: a uniform 1-D Cartesian grid, a Rusanov (local
//! Lax-Friedrichs) Riemann solver, and a constant Bondi stand-in. None of
//! this is part of the library's production surface.

use std::sync::Mutex;

use hydro_core::{BondiProfile, CellState, Grid, NeighborFace, Primitives, RiemannFlux, RiemannSolver, Vec3};

/// A row of `n` cubic cells of side `dx` along x, optionally periodic.
pub struct LineGrid {
    pub dx: f64,
    pub periodic: bool,
    cells: Vec<Mutex<CellState>>,
}

impl LineGrid {
    pub fn new(n: usize, dx: f64, periodic: bool) -> Self {
        Self { dx, periodic, cells: (0..n).map(|_| Mutex::new(CellState::default())).collect() }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

impl Grid for LineGrid {
    type CellId = usize;

    fn cell_ids(&self) -> Vec<usize> {
        (0..self.cells.len()).collect()
    }

    fn midpoint(&self, cell: usize) -> Vec3 {
        Vec3::new((cell as f64 + 0.5) * self.dx, 0.0, 0.0)
    }

    fn volume(&self, _cell: usize) -> f64 {
        self.dx * self.dx * self.dx
    }

    fn state(&self, cell: usize) -> CellState {
        *self.cells[cell].lock().unwrap()
    }

    fn set_state(&self, cell: usize, state: CellState) {
        *self.cells[cell].lock().unwrap() = state;
    }

    fn neighbor_faces(&self, cell: usize) -> Vec<NeighborFace<usize>> {
        let n = self.cells.len();
        let right_normal = Vec3::new(1.0, 0.0, 0.0);
        let left_normal = Vec3::new(-1.0, 0.0, 0.0);
        let area = self.dx * self.dx;

        let right = if cell + 1 < n {
            Some(cell + 1)
        } else if self.periodic {
            Some(0)
        } else {
            None
        };
        let left = if cell > 0 {
            Some(cell - 1)
        } else if self.periodic {
            Some(n - 1)
        } else {
            None
        };

        vec![
            NeighborFace {
                neighbor: right,
                face_midpoint: Vec3::new((cell as f64 + 1.0) * self.dx, 0.0, 0.0),
                outward_normal: right_normal,
                face_area: area,
                neighbor_midpoint_offset: Vec3::new(self.dx, 0.0, 0.0),
            },
            NeighborFace {
                neighbor: left,
                face_midpoint: Vec3::new(cell as f64 * self.dx, 0.0, 0.0),
                outward_normal: left_normal,
                face_area: area,
                neighbor_midpoint_offset: Vec3::new(-self.dx, 0.0, 0.0),
            },
        ]
    }

    fn interface_velocity(&self, _cell: usize, _neighbor: Option<usize>, _face_midpoint: Vec3) -> Vec3 {
        Vec3::zero()
    }

    fn set_grid_velocity(&self, _gamma: f64, _velocity_unit_si: f64) {}
    fn evolve(&self, _dt_si: f64) {}
    fn reset_access_flags(&self) {}
    fn check_access(&self) -> bool {
        true
    }

    fn get_box(&self) -> (Vec3, Vec3, [bool; 3]) {
        // Only x-normal faces are ever produced, so y/z periodicity is
        // reported as false to match the boundary table's reflective default.
        (Vec3::zero(), Vec3::new(self.cells.len() as f64 * self.dx, self.dx, self.dx), [self.periodic, false, false])
    }
}

/// Rusanov (local Lax-Friedrichs) flux for the polytropic Euler equations,
/// projected onto the face normal. Robust and positivity-preserving, which
/// is all the end-to-end scenarios below require of a Riemann solver.
pub struct RusanovSolver;

impl RiemannSolver for RusanovSolver {
    fn solve_for_flux(&self, left: Primitives, right: Primitives, normal: Vec3, frame_velocity: Vec3, gamma: f64) -> RiemannFlux {
        let v_n_left = (left.velocity - frame_velocity).dot(&normal);
        let v_n_right = (right.velocity - frame_velocity).dot(&normal);

        let sound_speed = |density: f64, pressure: f64| -> f64 {
            if gamma > 1.0 && density > 0.0 {
                (gamma * pressure / density).sqrt()
            } else {
                0.0
            }
        };
        let c_left = sound_speed(left.density, left.pressure);
        let c_right = sound_speed(right.density, right.pressure);
        let signal_speed = (v_n_left.abs() + c_left).max(v_n_right.abs() + c_right);

        let energy_density = |p: &Primitives| -> f64 {
            if gamma > 1.0 {
                p.pressure / (gamma - 1.0) + 0.5 * p.density * p.velocity.norm2()
            } else {
                0.0
            }
        };
        let e_left = energy_density(&left);
        let e_right = energy_density(&right);

        let mass_flux_left = left.density * v_n_left;
        let mass_flux_right = right.density * v_n_right;
        let momentum_flux_left = left.velocity * (left.density * v_n_left) + normal * left.pressure;
        let momentum_flux_right = right.velocity * (right.density * v_n_right) + normal * right.pressure;
        let energy_flux_left = (e_left + left.pressure) * v_n_left;
        let energy_flux_right = (e_right + right.pressure) * v_n_right;

        RiemannFlux {
            mass_flux: 0.5 * (mass_flux_left + mass_flux_right) - 0.5 * signal_speed * (right.density - left.density),
            momentum_flux: (momentum_flux_left + momentum_flux_right) * 0.5
                - (right.velocity * right.density - left.velocity * left.density) * (0.5 * signal_speed),
            energy_flux: if gamma > 1.0 {
                0.5 * (energy_flux_left + energy_flux_right) - 0.5 * signal_speed * (e_right - e_left)
            } else {
                0.0
            },
        }
    }
}

/// A spatially uniform Bondi stand-in: every queried position returns the
/// same (density, velocity, pressure, neutral_fraction) tuple.
pub struct ConstantBondiProfile {
    pub density: f64,
    pub velocity: Vec3,
    pub pressure: f64,
    pub neutral_fraction: f64,
}

impl BondiProfile for ConstantBondiProfile {
    fn hydrodynamic_variables(&self, _position: Vec3) -> (f64, Vec3, f64, f64) {
        (self.density, self.velocity, self.pressure, self.neutral_fraction)
    }
}
