// demos/disc_collapse.rs

use quadgrav::simulation::Simulation;
use quadgrav::utils::SimConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SimConfig {
        particle_count: 2_000,
        ..SimConfig::default()
    };

    let mut sim = Simulation::new(config)?;
    println!(
        "simulating {} particles in a {}-unit domain (theta = {})",
        config.particle_count, config.domain_radius, config.theta
    );

    for checkpoint in 1..=5 {
        sim.run(100)?;

        let tracked: Vec<(f64, f64)> = sim.positions().take(3).collect();
        println!("after {} steps:", checkpoint * 100);
        for (i, (x, y)) in tracked.iter().enumerate() {
            println!("  particle {}: ({:.6}, {:.6})", i, x, y);
        }
        println!("  tree nodes: {}", sim.tree().len());
    }

    Ok(())
}
