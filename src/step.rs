use rayon::prelude::*;

use crate::bondi::BondiProfile;
use crate::config::Configuration;
use crate::error::Error;
use crate::flux;
use crate::gradient::{GradientEstimator, GreenGaussGradient};
use crate::grid::Grid;
use crate::riemann::RiemannSolver;
use crate::state::{CellState, Conserved, Gradients, Primitives};
use crate::units::{Quantity, UnitSystem};
use crate::vector::Vec3;

const BOLTZMANN_CONSTANT: f64 = 1.380649e-23;
const HYDROGEN_MASS: f64 = 1.6735575e-27;




// ============================================================================
/// Orchestrates one hydro step (Component E, §4.E): `initialise` once, then
/// `max_timestep`/`do_step` each cycle. Generic over the gradient estimator
/// so hosts may substitute a different scheme (§4.F); defaults to the
/// Green-Gauss estimator the core ships.
pub struct StepDriver<E: GradientEstimator = GreenGaussGradient> {
    config: Configuration,
    gradient_estimator: E,
    units: Option<UnitSystem>,
    /// u_fac = k_B / ((γ−1)·m_H), rescaled into internal units.
    u_fac: f64,
    /// T_fac = m_H / k_B, rescaled into internal units.
    t_fac: f64,
    /// P_fac = k_B / m_H, rescaled into internal units.
    p_fac: f64,
    /// n_fac = 1 / m_H, rescaled so that n_H(SI) = ρ_internal · n_fac.
    n_fac: f64,
}

impl StepDriver<GreenGaussGradient> {
    pub fn new(config: Configuration) -> Self {
        Self::with_gradient_estimator(config, GreenGaussGradient)
    }
}

impl<E: GradientEstimator> StepDriver<E> {
    pub fn with_gradient_estimator(config: Configuration, gradient_estimator: E) -> Self {
        Self { config, gradient_estimator, units: None, u_fac: 0.0, t_fac: 0.0, p_fac: 0.0, n_fac: 0.0 }
    }

    pub fn units(&self) -> Option<UnitSystem> {
        self.units
    }

    fn units_or_panic(&self) -> UnitSystem {
        self.units.expect("StepDriver::initialise must run before max_timestep/do_step")
    }

    // ------------------------------------------------------------------
    /// §4.E.1: derive density/pressure/conserved state from each cell's
    /// (externally supplied) ionisation variables and velocity, cap |v|,
    /// derive the unit system from the resulting averages, and rescale
    /// everything into internal units.
    pub fn initialise<G: Grid>(&mut self, grid: &G) -> Result<(), Error> {
        let (_, sides, periodicity) = grid.get_box();
        self.config.validate()?;
        self.config.validate_against_grid(periodicity)?;

        let cells = grid.cell_ids();
        let mut sum_density_v = 0.0;
        let mut sum_pressure_v = 0.0;
        let mut sum_volume = 0.0;

        for &cell in &cells {
            let mut state = grid.state(cell);
            let volume = grid.volume(cell);

            let mut density = state.ionization.number_density * HYDROGEN_MASS;
            let mut pressure = density * (BOLTZMANN_CONSTANT / HYDROGEN_MASS) * state.ionization.temperature;
            if state.ionization.temperature >= self.config.t_ionised {
                pressure *= 2.0;
            }
            density = density.max(0.0);
            pressure = pressure.max(0.0);

            let velocity = state.primitives.velocity.capped_to(self.config.v_max);
            let mass = density * volume;
            let momentum = velocity * mass;
            let energy = if !self.config.is_isothermal() {
                volume * pressure / (self.config.gamma - 1.0) + 0.5 * momentum.dot(&velocity)
            } else {
                0.5 * momentum.dot(&velocity)
            };

            state.primitives = Primitives { density, velocity, pressure };
            state.conserved = Conserved { mass, momentum, energy };
            state.gradients = Gradients::zero();
            state.flux_delta = Conserved::default();
            grid.set_state(cell, state);

            sum_density_v += density * volume;
            sum_pressure_v += pressure * volume;
            sum_volume += volume;
        }

        let length_scale = (sides.x() + sides.y() + sides.z()) / 3.0;
        let (density_scale, pressure_scale) = if sum_volume > 0.0 {
            (sum_density_v / sum_volume, sum_pressure_v / sum_volume)
        } else {
            (1.0, 1.0)
        };
        let units = UnitSystem::from_averages(length_scale, density_scale, pressure_scale);
        let velocity_scale = units.unit_internal(Quantity::Velocity);

        let u_fac_si = if !self.config.is_isothermal() {
            BOLTZMANN_CONSTANT / ((self.config.gamma - 1.0) * HYDROGEN_MASS)
        } else {
            0.0
        };
        self.u_fac = u_fac_si / velocity_scale.powi(2);
        self.t_fac = (HYDROGEN_MASS / BOLTZMANN_CONSTANT) * velocity_scale.powi(2);
        self.p_fac = (BOLTZMANN_CONSTANT / HYDROGEN_MASS) / velocity_scale.powi(2);
        self.n_fac = (1.0 / HYDROGEN_MASS) * density_scale;
        self.units = Some(units);

        for &cell in &cells {
            let mut state = grid.state(cell);
            state.primitives.density = units.to_internal(Quantity::Density, state.primitives.density);
            state.primitives.velocity = to_internal_vec(&units, Quantity::Velocity, state.primitives.velocity);
            state.primitives.pressure = units.to_internal(Quantity::Pressure, state.primitives.pressure);
            state.conserved.mass = units.to_internal(Quantity::Mass, state.conserved.mass);
            state.conserved.momentum = to_internal_vec(&units, Quantity::Momentum, state.conserved.momentum);
            state.conserved.energy = units.to_internal(Quantity::Energy, state.conserved.energy);
            grid.set_state(cell, state);
        }

        grid.set_grid_velocity(self.config.gamma, velocity_scale);
        Ok(())
    }

    // ------------------------------------------------------------------
    /// §4.E.2: CFL-limited timestep, returned in SI.
    pub fn max_timestep<G: Grid>(&self, grid: &G) -> f64 {
        let units = self.units_or_panic();
        let mut min_stability_time = f64::INFINITY;

        for cell in grid.cell_ids() {
            let state = grid.state(cell);
            let sound_speed = self.sound_speed(&state);
            let speed = state.primitives.velocity.norm();
            let volume = units.to_internal(Quantity::Volume, grid.volume(cell));
            let radius = (3.0 * volume / (4.0 * std::f64::consts::PI)).cbrt();
            let stability_time = radius / (sound_speed + speed).max(f64::MIN_POSITIVE);
            min_stability_time = min_stability_time.min(stability_time);
        }

        let dt_internal = self.config.cfl * min_stability_time;
        units.to_si(Quantity::Time, dt_internal)
    }

    fn sound_speed(&self, state: &CellState) -> f64 {
        if !self.config.is_isothermal() {
            if state.primitives.density > 0.0 {
                (self.config.gamma * state.primitives.pressure / state.primitives.density).sqrt()
            } else {
                f64::MIN_POSITIVE
            }
        } else {
            let mu = state.ionization.mean_molecular_mass_fraction();
            (self.p_fac * state.ionization.temperature / mu.max(f64::MIN_POSITIVE)).sqrt()
        }
    }

    // ------------------------------------------------------------------
    /// §4.E.3: advance every cell by `dt_si`.
    pub fn do_step<G: Grid>(
        &self,
        grid: &G,
        dt_si: f64,
        riemann_solver: &dyn RiemannSolver,
        bondi_profile: Option<&dyn BondiProfile>,
    ) -> Result<(), Error>
    where
        G::CellId: Send,
    {
        let units = self.units_or_panic();
        let dt = units.to_internal(Quantity::Time, dt_si);
        let cells = grid.cell_ids();

        if cfg!(debug_assertions) {
            grid.reset_access_flags();
        }

        // Step 2: gradient pass, parallel.
        cells.par_iter().for_each(|&cell| {
            let mut state = grid.state(cell);
            state.gradients = self.gradient_estimator.estimate(grid, &self.config, bondi_profile, cell);
            grid.set_state(cell, state);
        });

        // Step 3: Hancock half-step predictor, serial.
        for &cell in &cells {
            let mut state = grid.state(cell);
            if state.primitives.density > 0.0 {
                self.predict_half_step(&mut state, &units, dt);
                grid.set_state(cell, state);
            }
        }

        // Step 4: flux pass, parallel.
        cells.par_iter().for_each(|&cell| {
            let mut state = grid.state(cell);
            state.flux_delta = flux::accumulate_cell_flux(grid, &self.config, bondi_profile, riemann_solver, cell, &state, dt);
            grid.set_state(cell, state);
        });

        if cfg!(debug_assertions) && !grid.check_access() {
            return Err(Error::ContractViolation {
                operation: "flux_pass",
                message: "not every cell was visited exactly once during the flux pass".to_string(),
            });
        }

        // Step 5: radiative heating/cooling source term, serial.
        if self.config.do_heating || self.config.do_cooling {
            for &cell in &cells {
                let mut state = grid.state(cell);
                self.apply_radiation_source(&mut state);
                grid.set_state(cell, state);
            }
        }

        // Step 6: conservative update, serial.
        for &cell in &cells {
            let mut state = grid.state(cell);
            self.conservative_update(&mut state, &units, dt);
            grid.set_state(cell, state);
        }

        // Step 7: grid motion.
        grid.evolve(dt_si);

        // Step 8: primitive recovery, serial.
        for &cell in &cells {
            let mut state = grid.state(cell);
            self.recover_primitives(&mut state, &units, grid.volume(cell));
            grid.set_state(cell, state);
        }

        // Step 9: recompute grid motion velocities.
        grid.set_grid_velocity(self.config.gamma, units.unit_internal(Quantity::Velocity));

        Ok(())
    }

    fn predict_half_step(&self, state: &mut CellState, units: &UnitSystem, dt: f64) {
        let div_v = state.gradients.velocity_divergence();
        let density = state.primitives.density;
        let velocity = state.primitives.velocity;
        let pressure = state.primitives.pressure;
        let gravity = to_internal_vec(units, Quantity::Acceleration, state.gravity);

        let density_new = density - 0.5 * dt * (density * div_v + velocity.dot(&state.gradients.d_density));
        let velocity_new = velocity
            - (state.gradients.d_pressure / density.max(f64::MIN_POSITIVE) - gravity + velocity * div_v) * (0.5 * dt);
        let pressure_new = pressure - 0.5 * dt * (self.config.gamma * pressure * div_v + velocity.dot(&state.gradients.d_pressure));

        state.primitives = Primitives { density: density_new, velocity: velocity_new, pressure: pressure_new };
    }

    /// §4.E.3 step 5: push the per-cell gas temperature toward
    /// `T_target = T_ionised(1−x_H) + T_neutral·x_H`, unless the cell is
    /// shock-heated (external energy injection pending, or already above
    /// `t_shock`).
    fn apply_radiation_source(&self, state: &mut CellState) {
        let target_temperature =
            self.config.t_ionised * (1.0 - state.ionization.neutral_fraction) + self.config.t_neutral * state.ionization.neutral_fraction;

        if self.config.is_isothermal() || state.primitives.density <= 0.0 {
            state.ionization.temperature = target_temperature;
            return;
        }

        let old_temperature = 0.5
            * (1.0 + state.ionization.neutral_fraction)
            * self.t_fac
            * state.primitives.pressure
            / (state.primitives.density + f64::MIN_POSITIVE);

        if state.energy > 0.0 || old_temperature > self.config.t_shock {
            return;
        }

        let u_fac_prime = 2.0 * self.u_fac / (1.0 + state.ionization.neutral_fraction);
        let mut delta_energy = state.conserved.mass * u_fac_prime * (target_temperature - old_temperature);

        if self.config.do_heating && delta_energy > 0.0 {
            state.flux_delta.energy -= delta_energy;
        }
        if self.config.do_cooling && delta_energy < 0.0 {
            let floor = 2.0 * u_fac_prime * (self.config.t_neutral - self.config.t_ionised) * state.conserved.mass;
            delta_energy = delta_energy.max(floor);
            state.flux_delta.energy -= 0.5 * delta_energy;
        }
    }

    /// §4.E.3 step 6: fold the flux accumulator, gravity and the external
    /// source buffers into `C`, then zero the scratch fields.
    fn conservative_update(&self, state: &mut CellState, units: &UnitSystem, dt: f64) {
        state.conserved = state.conserved - state.flux_delta;
        state.conserved.mass = state.conserved.mass.max(0.0);

        let gravity = to_internal_vec(units, Quantity::Acceleration, state.gravity);
        state.conserved.momentum = state.conserved.momentum + gravity * (state.conserved.mass * dt);
        state.conserved.energy += dt * state.conserved.momentum.dot(&gravity);

        let power_scale = units.unit_internal(Quantity::Energy) / units.unit_internal(Quantity::Time);
        state.conserved.energy += dt * (state.energy_rate / power_scale) + units.to_internal(Quantity::Energy, state.energy);
        state.energy_rate = 0.0;
        state.energy = 0.0;

        state.conserved.energy = state.conserved.energy.max(0.0);
        if !self.config.is_isothermal() && state.conserved.energy == 0.0 {
            state.conserved.momentum = Vec3::zero();
        }
        state.flux_delta = Conserved::default();
        state.enforce_safe_hydro();
    }

    /// §4.E.3 step 8: rebuild primitives from the updated conserved state,
    /// then re-apply the velocity cap and sound-speed ceiling.
    fn recover_primitives(&self, state: &mut CellState, units: &UnitSystem, volume_si: f64) {
        let volume = units.to_internal(Quantity::Volume, volume_si);
        if volume <= 0.0 {
            return;
        }
        if state.conserved.mass <= 0.0 {
            state.set_vacuum();
            return;
        }

        let density = state.conserved.mass / volume;
        let velocity = state.conserved.momentum / state.conserved.mass;
        let mu = state.ionization.mean_molecular_mass_fraction();

        let (pressure, temperature) = if !self.config.is_isothermal() {
            let pressure =
                (self.config.gamma - 1.0) * (state.conserved.energy - 0.5 * velocity.dot(&state.conserved.momentum)) / volume;
            let temperature = mu * self.t_fac * pressure / density.max(f64::MIN_POSITIVE);
            (pressure, temperature)
        } else {
            let temperature = state.ionization.temperature;
            let pressure = self.p_fac * density * temperature / mu.max(f64::MIN_POSITIVE);
            (pressure, temperature)
        };

        state.primitives = Primitives { density, velocity, pressure };
        state.ionization.temperature = temperature;

        if state.primitives.density <= 0.0 || state.primitives.pressure <= 0.0 {
            state.set_vacuum();
            return;
        }

        let v_max = units.to_internal(Quantity::Velocity, self.config.v_max);
        state.primitives.velocity = state.primitives.velocity.capped_to(v_max);

        let sound_speed = self.sound_speed(state);
        if sound_speed > v_max {
            state.primitives.pressure *= (v_max / sound_speed).powi(2);
        }

        state.ionization.number_density = state.primitives.density * self.n_fac;
    }
}

fn to_internal_vec(units: &UnitSystem, q: Quantity, v: Vec3) -> Vec3 {
    v * units.unit_si(q)
}
