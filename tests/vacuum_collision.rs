mod fixtures;

use fixtures::{LineGrid, RusanovSolver};
use hydro_core::flux::FLUX_LIMITER;
use hydro_core::{Configuration, Grid, StepDriver};

const HYDROGEN_MASS: f64 = 1.6735575e-27;

/// Scenario 3: one dense cell surrounded by vacuum. After one step the
/// neighbours pick up bounded mass and the donor's mass never goes negative.
#[test]
fn a_single_dense_cell_feeds_its_vacuum_neighbours_without_going_negative() {
    let grid = LineGrid::new(7, 0.01, false);
    let donor = 3usize;

    let mut state = grid.state(donor);
    state.ionization.number_density = 1.0 / HYDROGEN_MASS;
    state.ionization.temperature = 1.0e4;
    grid.set_state(donor, state);

    let mut config = Configuration::default();
    config.do_heating = false;
    let mut driver = StepDriver::new(config);
    driver.initialise(&grid).unwrap();

    let donor_mass_before = grid.state(donor).conserved.mass;
    assert!(donor_mass_before > 0.0);
    for cell in grid.cell_ids() {
        if cell != donor {
            assert!(grid.state(cell).is_vacuum());
        }
    }

    let dt = driver.max_timestep(&grid);
    driver.do_step(&grid, dt, &RusanovSolver, None).unwrap();

    let donor_mass_after = grid.state(donor).conserved.mass;
    assert!(donor_mass_after >= 0.0);

    for &neighbor in &[donor - 1, donor + 1] {
        let mass_gained = grid.state(neighbor).conserved.mass;
        assert!(mass_gained >= 0.0);
        assert!(mass_gained <= FLUX_LIMITER * donor_mass_before + 1e-12);
    }
}
