use dense_life::denselife::{ParamsError, SimParams, Simulation, legal_scale_factors};

fn params(scale_factor: u32) -> SimParams {
    SimParams {
        scale_factor,
        ..SimParams::default()
    }
}

#[test]
fn board_dimensions_come_from_screen_and_scale() {
    let sim = Simulation::new(1920, 1080, params(4)).unwrap();
    assert_eq!(sim.engine().width(), 480);
    assert_eq!(sim.engine().height(), 270);
    assert_eq!(sim.pixels().as_bytes().len(), 4 * 480 * 270);
}

#[test]
fn legal_scale_factors_divide_both_dimensions() {
    assert_eq!(
        legal_scale_factors(1920, 1080),
        vec![1, 2, 3, 4, 5, 6, 8, 10, 12, 15, 20, 24, 30, 40, 60, 120]
    );
    assert_eq!(legal_scale_factors(7, 13), vec![1]);
}

#[test]
fn invalid_parameters_are_rejected() {
    assert_eq!(
        Simulation::new(0, 1080, params(2)).err(),
        Some(ParamsError::EmptyScreen {
            width: 0,
            height: 1080
        })
    );
    assert_eq!(
        Simulation::new(1920, 1080, params(0)).err(),
        Some(ParamsError::ZeroScale)
    );
    assert_eq!(
        Simulation::new(1920, 1080, params(7)).err(),
        Some(ParamsError::UnevenScale {
            scale: 7,
            width: 1920,
            height: 1080
        })
    );
}

#[test]
fn density_and_speed_are_clamped_at_the_boundary() {
    let sim = Simulation::new(120, 80, SimParams {
        density_pct: 150.0,
        speed: 99,
        scale_factor: 2,
        ..SimParams::default()
    })
    .unwrap();
    assert_eq!(sim.params().density_pct, 100.0);
    assert_eq!(sim.speed(), 20);
    assert_eq!(sim.engine().population(), 60 * 40);

    let mut sim = Simulation::new(120, 80, SimParams {
        density_pct: -3.0,
        ..SimParams::default()
    })
    .unwrap();
    assert_eq!(sim.params().density_pct, 0.0);
    assert!(sim.engine().is_empty());

    sim.set_speed(-99);
    assert_eq!(sim.speed(), -20);
}

#[test]
fn nonnegative_speed_runs_two_to_the_speed_generations_per_frame() {
    let mut sim = Simulation::new(60, 40, SimParams {
        scale_factor: 1,
        speed: 0,
        ..SimParams::default()
    })
    .unwrap();
    assert_eq!(sim.advance_frame(), 1);
    assert_eq!(sim.engine().generation(), 1);

    sim.set_speed(2);
    assert_eq!(sim.advance_frame(), 4);
    assert_eq!(sim.engine().generation(), 5);
}

#[test]
fn negative_speed_skips_frames() {
    let mut sim = Simulation::new(60, 40, SimParams {
        scale_factor: 1,
        speed: -2,
        ..SimParams::default()
    })
    .unwrap();

    let mut ran = Vec::new();
    for _ in 0..8 {
        ran.push(sim.advance_frame());
    }
    assert_eq!(ran, vec![0, 0, 0, 1, 0, 0, 0, 1]);
    assert_eq!(sim.engine().generation(), 2);
}

#[test]
fn restart_applies_new_parameters_atomically() {
    let mut sim = Simulation::new(120, 80, params(2)).unwrap();
    sim.advance_frame();
    assert_eq!(sim.engine().generation(), 1);

    // A rejected restart leaves the running simulation untouched.
    let before = sim.engine().population();
    assert!(sim.restart(params(7)).is_err());
    assert_eq!(sim.engine().width(), 60);
    assert_eq!(sim.engine().generation(), 1);
    assert_eq!(sim.engine().population(), before);

    // An accepted one swaps board size, rules and seed together.
    sim.restart(SimParams {
        scale_factor: 4,
        rules: "B36/S23".parse().unwrap(),
        seed: 9,
        ..SimParams::default()
    })
    .unwrap();
    assert_eq!(sim.engine().width(), 30);
    assert_eq!(sim.engine().height(), 20);
    assert_eq!(sim.engine().generation(), 0);
    assert_eq!(sim.engine().rules().to_string(), "B36/S23");
}

#[test]
fn restart_with_the_same_seed_reproduces_the_board() {
    let start = SimParams {
        scale_factor: 2,
        seed: 77,
        ..SimParams::default()
    };
    let mut sim = Simulation::new(120, 80, start.clone()).unwrap();
    let initial = sim.engine().grid().cells().to_vec();

    for _ in 0..5 {
        sim.advance_frame();
    }
    assert_ne!(sim.engine().grid().cells(), initial.as_slice());

    sim.restart(start).unwrap();
    assert_eq!(sim.engine().grid().cells(), initial.as_slice());
}
