mod fixtures;

use approx::assert_relative_eq;
use fixtures::{LineGrid, RusanovSolver};
use hydro_core::{Configuration, Grid, StepDriver};

const HYDROGEN_MASS: f64 = 1.6735575e-27;
const BOLTZMANN_CONSTANT: f64 = 1.380649e-23;

/// §8 invariants: under fully periodic boundaries with heating, cooling and
/// gravity disabled, total mass and total momentum are conserved.
#[test]
fn mass_and_momentum_are_conserved_under_periodic_advection() {
    let n = 40;
    let grid = LineGrid::new(n, 0.01, true);
    let density = 1.0;
    let pressure = 1.0;
    let temperature = pressure * HYDROGEN_MASS / (BOLTZMANN_CONSTANT * density);

    for cell in grid.cell_ids() {
        let mut state = grid.state(cell);
        state.ionization.number_density = density / HYDROGEN_MASS;
        state.ionization.temperature = temperature;
        state.primitives.velocity = hydro_core::Vec3::new(1.0, 0.0, 0.0);
        grid.set_state(cell, state);
    }

    let mut config = Configuration::default();
    config.do_heating = false;
    config.do_cooling = false;
    config.boundary.set(hydro_core::Axis::X, hydro_core::Side::Low, hydro_core::BoundaryPolicy::Periodic);
    config.boundary.set(hydro_core::Axis::X, hydro_core::Side::High, hydro_core::BoundaryPolicy::Periodic);
    let mut driver = StepDriver::new(config);
    driver.initialise(&grid).unwrap();

    let total_mass_and_momentum = |grid: &LineGrid| -> (f64, f64) {
        grid.cell_ids().into_iter().map(|c| grid.state(c).conserved).fold((0.0, 0.0), |(m, p), c| (m + c.mass, p + c.momentum.x()))
    };

    let (mass_before, momentum_before) = total_mass_and_momentum(&grid);

    for _ in 0..30 {
        let dt = driver.max_timestep(&grid);
        driver.do_step(&grid, dt, &RusanovSolver, None).unwrap();
    }

    let (mass_after, momentum_after) = total_mass_and_momentum(&grid);

    assert_relative_eq!(mass_after, mass_before, max_relative = 1e-8);
    assert_relative_eq!(momentum_after, momentum_before, max_relative = 1e-6);
}
