use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use vivarium_core::Habitat;
use vivarium_creature::{Cod, Food, Shark, Steerable};

mod config;

use config::SimConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// RNG seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Path to a RON run configuration; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured cod count
    #[arg(long)]
    cod: Option<usize>,

    /// Override the configured shark count
    #[arg(long)]
    sharks: Option<usize>,

    /// Override the configured food drop interval in ticks (0 disables)
    #[arg(long)]
    food_interval: Option<u64>,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(cod) = args.cod {
        config.cod_count = cod;
    }
    if let Some(sharks) = args.sharks {
        config.shark_count = sharks;
    }
    if let Some(interval) = args.food_interval {
        config.food_interval = interval;
    }

    if args.print_config {
        println!("{}", config.to_ron_pretty()?);
        return Ok(());
    }

    log::info!("Starting vivarium (seed {})", args.seed);
    run(&config, args.ticks, args.seed)
}

fn run(config: &SimConfig, ticks: u64, seed: u64) -> anyhow::Result<()> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let mut habitat = Habitat::new(config.tank_dimensions, config.steering.clone());

    for _ in 0..config.cod_count {
        let position = spawn_position(
            &mut rng,
            config.tank_dimensions,
            Cod::BASE_RADIUS * config.cod_scale,
        );
        let mut cod = Cod::build(habitat.scene_mut(), position, &mut rng)?;
        cod.body_mut()
            .set_uniform_scale(config.cod_scale, habitat.scene_mut());
        habitat.spawn(Box::new(cod))?;
    }
    for _ in 0..config.shark_count {
        let position = spawn_position(
            &mut rng,
            config.tank_dimensions,
            Shark::BASE_RADIUS * config.shark_scale,
        );
        let mut shark = Shark::build(habitat.scene_mut(), position, &mut rng)?;
        shark
            .body_mut()
            .set_uniform_scale(config.shark_scale, habitat.scene_mut());
        habitat.spawn(Box::new(shark))?;
    }

    for tick in 0..ticks {
        if config.food_interval > 0 && tick % config.food_interval == 0 {
            drop_food(&mut habitat, config, &mut rng)?;
        }
        habitat.tick();
        if tick % 100 == 0 {
            log::info!(
                "tick {}: {} creatures, {} draw commands",
                tick,
                habitat.steerable_count(),
                habitat.draw_commands().len(),
            );
        }
    }

    log::info!(
        "Finished after {} ticks with {} creatures in the tank",
        ticks,
        habitat.steerable_count(),
    );
    Ok(())
}

/// Uniform position inside the tank, kept a boundary radius away from walls
fn spawn_position(rng: &mut impl Rng, tank: Vec3, radius: f32) -> Vec3 {
    let half = tank / 2.0 - Vec3::splat(radius);
    Vec3::new(
        rng.gen_range(-half.x..=half.x),
        rng.gen_range(-half.y..=half.y),
        rng.gen_range(-half.z..=half.z),
    )
}

/// Release a food pellet near the tank ceiling; it sinks on its own
fn drop_food(
    habitat: &mut Habitat,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> anyhow::Result<()> {
    let tank = config.tank_dimensions;
    let radius = config.food_scale;
    let position = Vec3::new(
        rng.gen_range(-tank.x / 2.0 + radius..=tank.x / 2.0 - radius),
        tank.y / 2.0 - radius * 2.0,
        rng.gen_range(-tank.z / 2.0 + radius..=tank.z / 2.0 - radius),
    );
    let food = Food::build(habitat.scene_mut(), position, config.food_scale, rng)?;
    habitat.spawn(Box::new(food))?;
    Ok(())
}
