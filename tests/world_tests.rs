use approx::assert_abs_diff_eq;
use cloth_sim::*;

fn two_by_two(damping_mode: DampingMode, gravity: f32) -> ClothWorld {
    let config = ClothConfig::new()
        .with_grid(2, 2)
        .with_gravity(gravity)
        .with_damping(0.99, damping_mode);
    ClothWorld::new(config).expect("valid config")
}

fn y_of(world: &ClothWorld, col: usize, row: usize) -> f32 {
    world.particle_at(col, row).expect("in grid").position.y
}

#[test]
fn default_world_matches_grid_layout() {
    let world = ClothWorld::new(ClothConfig::default()).expect("defaults are valid");
    assert_eq!(world.particles().len(), 100);
    assert_eq!(world.constraints().len(), 180);
    assert_eq!(world.active_constraint_count(), 180);

    let origin = world.particle_at(0, 0).unwrap().position;
    assert_eq!(origin, Vec2::new(360.0, 640.0 / 3.0));
    let corner = world.particle_at(9, 9).unwrap().position;
    assert_abs_diff_eq!(corner.x, 360.0 + 270.0, epsilon = 1e-3);
    assert_abs_diff_eq!(corner.y, origin.y + 270.0, epsilon = 1e-3);
    assert!(world.particle_at(10, 0).is_none());
}

#[test]
fn default_two_by_two_hangs_below_its_pins() {
    let mut world = ClothWorld::new(ClothConfig::new().with_grid(2, 2)).expect("valid config");
    let rest = world.config().rest_distance;
    let mut last = [y_of(&world, 0, 1), y_of(&world, 1, 1)];

    for _ in 0..400 {
        world.step();
        for col in 0..2 {
            let anchor_y = y_of(&world, col, 0);
            let y = y_of(&world, col, 1);
            assert!(y > anchor_y, "column {col} folded up to {y}, pin is at {anchor_y}");
            assert!(y >= last[col] - 1e-3, "column {col} rose from {} to {y}", last[col]);
            last[col] = y;
        }
    }

    for col in 0..2 {
        let anchor = world.particle_at(col, 0).unwrap().position;
        let free = world.particle_at(col, 1).unwrap().position;
        assert_abs_diff_eq!(free.x, anchor.x, epsilon = 0.01);
        assert_abs_diff_eq!(free.y, anchor.y + rest, epsilon = 0.01);
    }
    for c in world.constraints() {
        let length = c.current_length(world.particles());
        assert_abs_diff_eq!(length, c.rest_length(), epsilon = 0.01);
    }
}

#[test]
fn released_cloth_descends_strictly_until_it_hangs() {
    let config = ClothConfig::new().with_grid(2, 2);
    let mut mesh = ClothMesh::grid(&config).expect("valid config");
    let lift = Vec2::new(0.0, -15.0);
    for col in 0..2 {
        let id = mesh.index(col, 1);
        let particle = mesh.particles.get_mut(id).expect("in grid");
        particle.position += lift;
        particle.previous_position += lift;
    }
    let mut world = ClothWorld::from_mesh(mesh, config).expect("valid mesh");
    let hanging_y = y_of(&world, 0, 0) + world.config().rest_distance;

    let mut last = y_of(&world, 0, 1);
    let mut descending_steps = 0;
    for _ in 0..200 {
        world.step();
        let y = y_of(&world, 0, 1);
        if last < hanging_y - 1e-3 {
            assert!(y > last, "released particle must descend: {last} -> {y}");
            descending_steps += 1;
        } else {
            assert_abs_diff_eq!(y, hanging_y, epsilon = 1e-3);
        }
        assert_abs_diff_eq!(y_of(&world, 1, 1), y, epsilon = 1e-4);
        last = y;
    }
    assert!(descending_steps > 0);
    assert_abs_diff_eq!(last, hanging_y, epsilon = 1e-3);
}

#[test]
fn cut_strands_fall_until_the_floor_clamp() {
    let mut world = two_by_two(DampingMode::ScaleVelocity, 1000.0);
    // Links are (0,0)-(1,0), (0,0)-(0,1), (1,0)-(1,1), (0,1)-(1,1).
    assert!(world.deactivate(ConstraintId::new(1)));
    assert!(world.deactivate(ConstraintId::new(2)));
    let floor = world.config().bounds.y;

    let mut last = y_of(&world, 0, 1);
    for _ in 0..300 {
        world.step();
        let y = y_of(&world, 0, 1);
        if last < floor {
            assert!(y > last, "falling particle must keep descending: {last} -> {y}");
        }
        assert!(y <= floor);
        last = y;
    }
    assert_eq!(last, floor);
    assert_eq!(y_of(&world, 1, 1), floor);
}

#[test]
fn pinned_row_holds_under_default_damping() {
    let mut world = ClothWorld::new(ClothConfig::default()).expect("defaults are valid");
    let anchors: Vec<_> = (0..world.cols())
        .map(|col| world.particle_at(col, 0).unwrap().position)
        .collect();
    let bounds = world.config().bounds;

    world.step_frames(600);

    for (col, anchor) in anchors.iter().enumerate() {
        assert_eq!(world.particle_at(col, 0).unwrap().position, *anchor);
        for row in 1..world.rows() {
            assert!(
                y_of(&world, col, row) > y_of(&world, col, row - 1),
                "row {row} of column {col} is not below the row above it"
            );
        }
    }
    for p in world.particles().iter() {
        assert!(p.position.is_finite());
        assert!(p.position.x >= 0.0 && p.position.x <= bounds.x);
        assert!(p.position.y >= 0.0 && p.position.y <= bounds.y);
    }
    assert_eq!(world.frame_count(), 600);
}

#[test]
fn deactivated_link_stops_holding_its_endpoints() {
    let mut world = two_by_two(DampingMode::ScaleVelocity, 1000.0);
    let cut = ConstraintId::new(1);
    world.deactivate(cut);
    world.deactivate(cut);

    world.step_frames(600);

    let constraint = world.constraint(cut).unwrap();
    assert!(!constraint.is_active());
    let length = constraint.current_length(world.particles());
    assert!(
        length > constraint.rest_length() + 10.0,
        "cut link should drift from its rest length, got {length}"
    );
    assert!(world.visible_segments().all(|view| view.id != cut));
    assert_eq!(world.last_metrics().constraints_relaxed, 3 * 5);
}

#[test]
fn click_cuts_and_hover_highlights() {
    let mut world = ClothWorld::new(ClothConfig::default()).expect("defaults are valid");
    let a = world.particle_at(0, 0).unwrap().position;
    let b = world.particle_at(1, 0).unwrap().position;
    let mid = (a + b) * 0.5;

    let outcome = world.handle_event(InputEvent::PointerMoved { x: mid.x, y: mid.y + 2.0 });
    assert_eq!(outcome, EventOutcome::Highlighted(Some(ConstraintId::new(0))));
    let highlighted: Vec<_> = world
        .constraint_views()
        .filter(|view| view.highlighted)
        .map(|view| view.id)
        .collect();
    assert_eq!(highlighted, vec![ConstraintId::new(0)]);
    assert_eq!(world.active_constraint_count(), 180, "hover must not cut");

    let outcome = world.handle_event(InputEvent::PrimaryClick { x: mid.x, y: mid.y });
    assert_eq!(outcome, EventOutcome::Cut(ConstraintId::new(0)));
    assert_eq!(world.active_constraint_count(), 179);
    assert_eq!(world.visible_segments().count(), 179);

    // The cut strand is still the nearest one, so a second click is a no-op.
    let outcome = world.handle_event(InputEvent::PrimaryClick { x: mid.x, y: mid.y });
    assert_eq!(outcome, EventOutcome::Cut(ConstraintId::new(0)));
    assert_eq!(world.active_constraint_count(), 179);

    let outcome = world.handle_event(InputEvent::PrimaryClick { x: 5.0, y: 5.0 });
    assert_eq!(outcome, EventOutcome::Missed);
    let outcome = world.handle_event(InputEvent::PointerMoved { x: 5.0, y: 5.0 });
    assert_eq!(outcome, EventOutcome::Highlighted(None));
    assert_eq!(world.highlighted(), None);
}

#[test]
fn particle_views_expose_pins_and_radius() {
    let world = two_by_two(DampingMode::ScalePosition, 10.0);
    let views: Vec<_> = world.particle_views().collect();
    assert_eq!(views.len(), 4);
    assert_eq!(
        views.iter().map(|v| v.pinned).collect::<Vec<_>>(),
        vec![true, true, false, false]
    );
    assert!(views.iter().all(|v| v.radius == world.config().particle_radius));
}

#[test]
fn identical_sessions_are_bitwise_deterministic() {
    let run = || {
        let mut session = ClothSession::new(ClothConfig::default()).expect("defaults are valid");
        for frame in 0..120 {
            let events = if frame == 30 {
                vec![InputEvent::PrimaryClick { x: 375.0, y: 213.0 }]
            } else {
                Vec::new()
            };
            session.frame(events);
        }
        session
            .world()
            .particles()
            .iter()
            .map(|p| p.position)
            .collect::<Vec<_>>()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn close_request_ends_the_session() {
    let mut session = ClothSession::new(ClothConfig::default()).expect("defaults are valid");
    let (_, running) = session.frame(Vec::new());
    assert!(running);
    assert_eq!(session.world().frame_count(), 1);

    let (outcomes, running) = session.frame(vec![InputEvent::CloseRequested]);
    assert_eq!(outcomes, vec![EventOutcome::Close]);
    assert!(!running);
    assert_eq!(session.world().frame_count(), 1);

    let (outcomes, running) = session.frame(vec![InputEvent::PrimaryClick { x: 0.0, y: 0.0 }]);
    assert!(outcomes.is_empty());
    assert!(!running);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let err = ClothWorld::new(ClothConfig::new().with_time_step(0.0)).err();
    assert_eq!(
        err,
        Some(ClothError::InvalidParameter {
            name: "time_step",
            value: 0.0
        })
    );
}

#[test]
fn partial_config_document_falls_back_to_defaults() {
    let config: ClothConfig =
        serde_json::from_str(r#"{ "rows": 4, "cols": 6, "damping_mode": "ScalePosition" }"#)
            .expect("valid json");
    assert_eq!((config.rows, config.cols), (4, 6));
    assert_eq!(config.damping_mode, DampingMode::ScalePosition);
    assert_eq!(config.rest_distance, 30.0);
    assert_eq!(config.constraint_iterations, 5);
    assert!(config.origin.is_none());

    let world = ClothWorld::new(config).expect("valid config");
    assert_eq!(world.constraints().len(), ClothMesh::link_count(4, 6));
}

#[test]
fn extra_forces_apply_alongside_gravity() {
    struct Wind(Vec2);
    impl ForceGenerator for Wind {
        fn apply(&self, particle: &mut Particle, _dt: f32) {
            particle.apply_force(self.0);
        }
    }

    let mut world = two_by_two(DampingMode::ScaleVelocity, 0.0);
    world.force_registry.add_force(Wind(Vec2::new(500.0, 0.0)));
    assert_eq!(world.force_registry.len(), 2);
    let start_x = world.particle_at(1, 1).unwrap().position.x;

    world.step_frames(10);

    assert!(world.particle_at(1, 1).unwrap().position.x > start_x);
    assert_eq!(world.particle_at(0, 0).unwrap().position.x, 360.0);
}

#[test]
fn mesh_with_mismatched_store_is_rejected() {
    let config = ClothConfig::new().with_grid(2, 2);
    let mut mesh = ClothMesh::grid(&config).expect("valid config");
    mesh.particles = FixedStore::from_vec(vec![Particle::pinned(Vec2::ZERO); 3]);

    let err = ClothWorld::from_mesh(mesh, config).err();
    assert_eq!(
        err,
        Some(ClothError::GridSizeMismatch {
            rows: 2,
            cols: 2,
            particles: 3
        })
    );
}
