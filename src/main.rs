use std::env;
use std::time::Duration;

use anyhow::{Context, anyhow};
use ::rand::{SeedableRng, rngs::StdRng};
use macroquad::file::load_file;
use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use life_loader::{
    Scheduler, SimulationConfig, Viewport,
    application::seed_from_bytes,
    input, rendering,
};

const DEFAULT_IMAGE: &str = "assets/logo.png";

fn window_conf() -> Conf {
    Conf {
        window_title: "Loading".to_owned(),
        window_width: 1000,
        window_height: 600,
        window_resizable: true,
        ..Default::default()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Noise is reproducible when `LIFE_LOADER_SEED` is set
fn make_rng() -> anyhow::Result<StdRng> {
    match env::var("LIFE_LOADER_SEED") {
        Ok(seed) => {
            let seed = seed.parse::<u64>().context("LIFE_LOADER_SEED must be a u64")?;
            Ok(StdRng::seed_from_u64(seed))
        }
        Err(_) => Ok(StdRng::from_os_rng()),
    }
}

async fn run() -> anyhow::Result<()> {
    let config = SimulationConfig::default();
    let image_path = env::var("LIFE_LOADER_IMAGE").unwrap_or_else(|_| DEFAULT_IMAGE.to_owned());
    let mut rng = make_rng()?;

    let mut scheduler = Scheduler::new(config.clone(), Viewport::new(screen_width(), screen_height()));

    // Seeding: wait for the image, then build the first generation.
    let bytes = load_file(&image_path)
        .await
        .map_err(|err| anyhow!("reading seed image {image_path}: {err:?}"))?;
    let grid = seed_from_bytes(&bytes, &config, scheduler.grid_dimensions(), &mut rng)
        .with_context(|| format!("seeding from {image_path}"))?;
    scheduler.complete_seeding(grid);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let viewport = Viewport::new(screen_width(), screen_height());
        if viewport != scheduler.viewport() {
            scheduler.set_viewport(viewport);
        }

        input::handle_click(&mut scheduler);
        input::handle_keys(&mut scheduler, |w, h| {
            seed_from_bytes(&bytes, &config, (w, h), &mut rng)
        })
        .context("reseeding")?;

        scheduler.tick(Duration::from_secs_f32(get_frame_time()))?;
        rendering::draw_frame(&scheduler);

        next_frame().await;
    }

    scheduler.stop();
    info!(generation = scheduler.generation(), "Loading screen closed");
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        error!("{err:#}");
        std::process::exit(1);
    }
}
