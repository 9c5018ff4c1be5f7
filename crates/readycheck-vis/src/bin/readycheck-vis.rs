//! Ready Check Visualizer
//!
//! Run a scripted ready check and play it back as a terminal bar chart.
//!
//! ```text
//! readycheck-vis [CONFIG_JSON|-] [SPEED]
//! ```

use std::env;
use std::io::{self, Write};
use std::time::Duration;

use readycheck_vis::{roster, BarChart, Playback, PlaybackSpeed, Simulation, SimulationConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they don't tear the chart on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "readycheck_vis=info,readycheck_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1).map(String::as_str) {
        Some(path) if path != "-" => {
            tracing::info!(path, "loading simulation config");
            SimulationConfig::from_json_file(path)?
        }
        _ => SimulationConfig::default(),
    };

    let speed: PlaybackSpeed = match args.get(2) {
        Some(s) => s.parse()?,
        None => PlaybackSpeed::Normal,
    };

    tracing::info!(
        players = config.players,
        activation = config.activation,
        start = config.start,
        "running ready check"
    );

    let mut sim = Simulation::new(config)?;
    let outcome = sim.run()?;

    let chart = BarChart::new(sim.config().bar_scale, sim.group().thresholds());
    let step = Duration::from_secs_f64(sim.config().step);
    let mut playback = Playback::new(sim.frames().to_vec(), speed);

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", chart.header())?;

    let mut redraw = false;
    while let Some(frame) = playback.step_forward() {
        write!(stdout, "{}", chart.frame(frame, redraw))?;
        stdout.flush()?;
        redraw = true;
        if let Some(delay) = speed.frame_delay(step).filter(|d| !d.is_zero()) {
            tokio::time::sleep(delay).await;
        }
    }

    if outcome.started {
        if let Some(last) = playback.last() {
            writeln!(stdout, "{}", roster(last))?;
        }
    } else {
        writeln!(
            stdout,
            "No start after {:.2}s ({} startable players).",
            outcome.elapsed,
            outcome.players.len()
        )?;
    }

    tracing::info!(
        started = outcome.started,
        elapsed = outcome.elapsed,
        frames = outcome.frames,
        "ready check finished"
    );

    Ok(())
}
