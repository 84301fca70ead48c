mod logging;
mod trace;

use std::{fs, path::Path, path::PathBuf, process};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use gesture_engine::{
    Gesture, GestureConfig, GestureManager, GesturePayload, PanSide, TouchEvent,
};

use trace::TraceLine;

/// Tick spacing used to flush timers when `--tick-ms` is not given.
const DEFAULT_TAIL_TICK_MS: u64 = 16;

const OUTPUT_HEADER: &str = "gesture,ms,type,state,payload";

#[derive(Debug, Parser)]
#[command(name = "gesture_replay")]
#[command(about = "Replay a recorded touch trace through the gesture engine")]
struct Cli {
    /// Trace file with touch, tick and bounds lines.
    trace: PathBuf,
    /// Gesture config TOML; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Expected output lines to compare against.
    #[arg(long)]
    expect: Option<PathBuf>,
    /// Timer flush window after the last trace line.
    #[arg(long = "tail-ms", default_value_t = 1_000)]
    tail_ms: u64,
    /// Insert synthetic ticks this far apart between trace lines.
    #[arg(long = "tick-ms", value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: Option<u64>,
    /// Log engine decisions to stderr; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug)]
struct ReplayOptions {
    tick_ms: Option<u64>,
    tail_ms: u64,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("error: {err:?}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => GestureConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GestureConfig::default(),
    };
    let lines = trace::parse_trace(&cli.trace)?;
    let options = ReplayOptions {
        tick_ms: cli.tick_ms,
        tail_ms: cli.tail_ms,
    };

    let output = replay(&config, &lines, options);
    println!("{OUTPUT_HEADER}");
    for line in &output {
        println!("{line}");
    }

    if let Some(expect_path) = &cli.expect {
        let expected = read_expected(expect_path)?;
        compare(&expected, &output)
            .with_context(|| format!("output differs from {}", expect_path.display()))?;
    }
    Ok(())
}

fn replay(config: &GestureConfig, lines: &[TraceLine], options: ReplayOptions) -> Vec<String> {
    let mut manager = GestureManager::from_config(config);
    let mut out = Vec::new();
    let mut last_ms: Option<u64> = None;

    for line in lines {
        if let (Some(step), Some(from), Some(to)) = (options.tick_ms, last_ms, line.ms()) {
            let mut tick_ms = from + step;
            while tick_ms < to {
                dispatch(&mut manager, None, tick_ms, &mut out);
                tick_ms += step;
            }
        }
        match line {
            TraceLine::Bounds(bounds) => manager.set_edge_bounds(*bounds),
            TraceLine::Tick { ms } => dispatch(&mut manager, None, *ms, &mut out),
            TraceLine::Touch(sample) => {
                let event = sample.to_event();
                dispatch(&mut manager, Some(&event), sample.ms, &mut out);
            }
        }
        last_ms = line.ms().or(last_ms);
    }

    if let Some(last_ms) = last_ms {
        let step = options.tick_ms.unwrap_or(DEFAULT_TAIL_TICK_MS);
        let end_ms = last_ms.saturating_add(options.tail_ms);
        let mut tick_ms = last_ms + step;
        while tick_ms <= end_ms {
            dispatch(&mut manager, None, tick_ms, &mut out);
            tick_ms += step;
        }
    }
    out
}

fn dispatch(
    manager: &mut GestureManager,
    event: Option<&TouchEvent>,
    ms: u64,
    out: &mut Vec<String>,
) {
    if let Some(gesture) = manager.send_event(event, ms) {
        out.push(format_gesture(ms, gesture));
    }
    let trace = manager.last_trace();
    if !trace.claims.is_empty() {
        log::debug!(
            "{ms} {:?}: claims {:?}, winner {:?}",
            trace.input,
            trace.claims,
            trace.winner
        );
    }
}

fn format_gesture(ms: u64, gesture: &Gesture) -> String {
    let payload = match *gesture.payload() {
        GesturePayload::None => String::new(),
        GesturePayload::Tap(tap) => format!(
            "{},{},{},{}",
            tap.x, tap.y, tap.vertical_radius, tap.horizontal_radius
        ),
        GesturePayload::DoubleTap(double_tap) => format!("{},{}", double_tap.x, double_tap.y),
        GesturePayload::LongPress(long_press) => format!("{},{}", long_press.x, long_press.y),
        GesturePayload::Pan(pan) => format!(
            "{},{},{},{},{}",
            pan.x,
            pan.y,
            pan.delta_x,
            pan.delta_y,
            side_label(pan.side)
        ),
        GesturePayload::Pinch(pinch) | GesturePayload::Pinch3f(pinch) => format!(
            "{:.3},{},{}",
            pinch.scale, pinch.center_x, pinch.center_y
        ),
    };
    format!(
        "gesture,{ms},{},{},{payload}",
        gesture.gesture_type().label(),
        gesture.state().label()
    )
}

fn side_label(side: PanSide) -> String {
    if side.is_none() {
        return "none".to_string();
    }
    let names = [
        (PanSide::LEFT, "left"),
        (PanSide::RIGHT, "right"),
        (PanSide::TOP, "top"),
        (PanSide::BOTTOM, "bottom"),
    ];
    names
        .iter()
        .filter(|(edge, _)| side.contains(*edge))
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join("+")
}

fn read_expected(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && *line != OUTPUT_HEADER)
        .map(str::to_string)
        .collect())
}

fn compare(expected: &[String], actual: &[String]) -> Result<()> {
    for (index, (want, got)) in expected.iter().zip(actual).enumerate() {
        if want != got {
            bail!("line {}: expected `{want}`, got `{got}`", index + 1);
        }
    }
    if expected.len() != actual.len() {
        bail!(
            "expected {} gesture lines, got {}",
            expected.len(),
            actual.len()
        );
    }
    Ok(())
}
