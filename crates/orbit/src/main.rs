use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use orbit::{IndicatorAnimator, IndicatorConfig, IndicatorOptions, ItemFrame, ManualClock, Size};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "orbit", version, about, long_about = None)]
struct Cli {
    /// Indicator settings (TOML). Defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print every item at one point in time.
    Frames {
        /// Seconds since the animation started
        #[arg(short, long, default_value_t = 0.0)]
        time: f64,

        /// Width of the drawing area; the circle is centered in it
        #[arg(long, default_value_t = 0.0)]
        width: f64,

        #[arg(long, default_value_t = 0.0)]
        height: f64,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Print the trajectory of a single item over time.
    Sample {
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        #[arg(long, default_value_t = 0.0)]
        from: f64,

        /// Defaults to one cycle
        #[arg(long)]
        to: Option<f64>,

        #[arg(long, default_value_t = 0.05)]
        step: f64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = match &cli.config {
        Some(path) => load_options(path)?,
        None => IndicatorOptions::default(),
    };
    let config = IndicatorConfig::try_from(options)?;
    let mut animator = IndicatorAnimator::with_config(ManualClock::default(), config);

    match cli.command {
        Commands::Frames {
            time,
            width,
            height,
            format,
        } => {
            animator.layout(Size::new(width, height));
            let frames = animator.tick(time);
            match format {
                Format::Table => print_table(&frames),
                Format::Json => println!("{}", serde_json::to_string_pretty(&frames)?),
            }
        }
        Commands::Sample {
            index,
            from,
            to,
            step,
        } => {
            let count = animator.config().item_count();
            if index >= count {
                anyhow::bail!("item {} does not exist, indicator has {} items", index, count);
            }
            let to = to.unwrap_or(from + animator.config().cycle_duration());
            check_sample_range(from, to, step)?;

            println!("{:>8} {:>10} {:>10} {:>10}", "time", "raw", "eased", "angle");
            let mut time = from;
            while time <= to {
                let frame = animator.tick(time)[index];
                println!(
                    "{:>8.3} {:>10.4} {:>10.4} {:>10.4}",
                    time, frame.raw_phase, frame.eased_phase, frame.angle
                );
                time += step;
            }
        }
    }

    Ok(())
}

/// Rejects ranges the sampling loop would never finish.
fn check_sample_range(from: f64, to: f64, step: f64) -> anyhow::Result<()> {
    if !from.is_finite() || !to.is_finite() {
        anyhow::bail!("sample range must be finite, got {}..{}", from, to);
    }
    if step.is_nan() || step <= 0.0 {
        anyhow::bail!("step must be positive, got {}", step);
    }
    if from + step <= from {
        anyhow::bail!("step {} is too small to advance from {}", step, from);
    }
    Ok(())
}

fn load_options(path: &Path) -> anyhow::Result<IndicatorOptions> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(settings.try_deserialize()?)
}

fn print_table(frames: &[ItemFrame]) {
    println!(
        "{:>5} {:>6} {:>8} {:>8} {:>8} {:>15} {:>17}",
        "item", "speed", "raw", "eased", "angle", "size", "position"
    );
    for f in frames {
        println!(
            "{:>5} {:>6.3} {:>8.4} {:>8.4} {:>8.4} {:>7.2}x{:<7.2} ({:>7.2}, {:>7.2})",
            f.index,
            f.speed,
            f.raw_phase,
            f.eased_phase,
            f.angle,
            f.size.width,
            f.size.height,
            f.position.x,
            f.position.y
        );
    }
}
