use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use ballpit_kernel::{PhysicsWorld, WorldConfig};
use ballpit_render::{DebugTextRenderer, HtmlRenderer, Renderer};
use ballpit_tools::{FrameTimer, WorldInspector};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ballpit-cli", about = "Headless runner for the ballpit simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the simulation headless and print a summary
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// RNG seed; overrides the config file
        #[arg(short, long)]
        seed: Option<u64>,
        /// Exact body count instead of drawing one from the config range
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// YAML world config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print final body snapshots as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Run some ticks and print one rendered frame
    Render {
        /// Number of ticks to simulate before rendering
        #[arg(short, long, default_value = "0")]
        ticks: u64,
        /// RNG seed; overrides the config file
        #[arg(short, long)]
        seed: Option<u64>,
        /// YAML world config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Print the default world config as YAML
    DefaultConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Html,
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> anyhow::Result<WorldConfig> {
    let mut config = match path {
        Some(path) => WorldConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WorldConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

fn build_world(config: &WorldConfig, count: Option<usize>) -> anyhow::Result<PhysicsWorld> {
    let Some(count) = count else {
        return Ok(PhysicsWorld::from_config(config)?);
    };
    config.validate()?;
    let (seed, mut rng) = config.seeded_rng();
    tracing::info!(seed, count, "initializing world with fixed body count");
    Ok(PhysicsWorld::initialize(count, config, &mut rng))
}

fn run(world: &mut PhysicsWorld, ticks: u64) -> FrameTimer {
    let mut timer = FrameTimer::new(256);
    let report_every = (ticks / 10).max(1);
    for _ in 0..ticks {
        let start = Instant::now();
        world.tick();
        timer.record(start.elapsed());

        if world.tick_count() % report_every == 0 {
            tracing::debug!("{}", WorldInspector::summary(world));
        }
    }
    timer
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("ballpit-cli v{}", env!("CARGO_PKG_VERSION"));
            let config = WorldConfig::default();
            println!(
                "kernel: boundary={}x{} bodies={}..={}",
                config.boundary.width,
                config.boundary.height,
                config.body_count.min,
                config.body_count.max
            );
            println!("render: {}", ballpit_render::crate_info());
            println!("tools: {}", ballpit_tools::crate_info());
        }
        Commands::Run {
            ticks,
            seed,
            count,
            config,
            json,
        } => {
            let config = load_config(config.as_deref(), seed)?;
            let mut world = build_world(&config, count)?;
            let initial = WorldInspector::summary(&world);

            let timer = run(&mut world, ticks);
            let summary = WorldInspector::summary(&world);
            if summary.out_of_bounds > 0 {
                tracing::warn!(count = summary.out_of_bounds, "bodies outside the boundary");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&world.snapshots())?);
            } else {
                println!("Start: {initial}");
                println!("End:   {summary}");
                println!(
                    "Energy drift: {:.3e}",
                    summary.kinetic_energy - initial.kinetic_energy
                );
                println!(
                    "Tick time: avg {:?}, min {:?}, max {:?} (last {} ticks)",
                    timer.average(),
                    timer.min(),
                    timer.max(),
                    timer.count()
                );
            }
        }
        Commands::Render {
            ticks,
            seed,
            config,
            format,
        } => {
            let config = load_config(config.as_deref(), seed)?;
            let mut world = build_world(&config, None)?;
            for _ in 0..ticks {
                world.tick();
            }
            let frame = match format {
                Format::Text => DebugTextRenderer::new().render(&world),
                Format::Html => HtmlRenderer::default().render(&world),
            };
            print!("{frame}");
        }
        Commands::DefaultConfig => {
            print!("{}", WorldConfig::default().to_yaml()?);
        }
    }

    Ok(())
}
