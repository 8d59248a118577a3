use cloth_sim::*;

fn lowest_free_y(world: &ClothWorld) -> f32 {
    world
        .particles()
        .iter()
        .filter(|p| !p.is_pinned())
        .map(|p| p.position.y)
        .fold(f32::MIN, f32::max)
}

fn main() {
    let mut session = match ClothSession::new(ClothConfig::default()) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("invalid cloth config: {err}");
            return;
        }
    };

    let top_left = session.world().particle_at(0, 0).map(|p| p.position);
    let top_right = session.world().particle_at(1, 0).map(|p| p.position);
    let target = match (top_left, top_right) {
        (Some(a), Some(b)) => (a + b) * 0.5,
        _ => return,
    };

    for frame in 0..240 {
        let events = match frame {
            60 => vec![InputEvent::PointerMoved { x: target.x, y: target.y + 1.0 }],
            61 => vec![InputEvent::PrimaryClick { x: target.x, y: target.y }],
            _ => Vec::new(),
        };
        let (outcomes, running) = session.frame(events);
        for outcome in outcomes {
            println!("frame {frame}: {outcome:?}");
        }
        if !running {
            break;
        }
    }

    let world = session.world();
    println!(
        "after {} frames: lowest free particle at y = {:.2}, {}/{} strands intact",
        world.frame_count(),
        lowest_free_y(world),
        world.active_constraint_count(),
        world.constraints().len()
    );
    println!("last solver pass: {:?}", world.last_metrics());
    world.profiler().report();
}
