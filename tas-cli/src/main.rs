// rust/tas-cli/src/main.rs
// Demo driver: load a core configuration, replay a frame trace through the
// Time-Aware Shaper, report dispatch/drop stats.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod frame;
mod kernel;
mod tracing_init;

use std::path::PathBuf;

use clap::Parser;
use tas_core::{TasConfig, TasQueueDisc};

use error::{CliError, Result};
use frame::{parse_trace_line, DemoFrame};
use kernel::EventKernel;

#[derive(Parser)]
#[command(name = "tas-cli")]
#[command(about = "Replay a frame trace through a Time-Aware Shaper and report stats")]
struct Cli {
    /// Path to the TOML core configuration (schedule, trust_qostag, max_size, data_rate_bps).
    #[arg(short, long)]
    config: PathBuf,

    /// Path to a frame trace file: one line per frame,
    /// `<arrival_ns> <size_bytes> [priority_tag]`.
    #[arg(short, long)]
    frames: PathBuf,
}

fn main() -> Result<()> {
    tracing_init::init_tracing();
    let cli = Cli::parse();

    let config_file = tas_config::CoreConfigFile::load(&cli.config)?;
    let schedule = config_file.resolve_schedule()?;
    let mut arrivals = load_frame_trace(&cli.frames)?;
    arrivals.sort_by_key(|f| f.arrival);

    let config = TasConfig {
        schedule,
        filters: vec![],
        trust_qostag: config_file.trust_qostag,
        max_size: config_file.max_size,
        data_rate_bps: config_file.data_rate_bps,
        time_source: None,
    };
    let mut disc: TasQueueDisc<DemoFrame, u64> = TasQueueDisc::initialize(config);
    let mut kernel = EventKernel::new(0);

    run(&mut disc, &mut kernel, arrivals);

    let stats = disc.stats();
    println!("dispatched: {}", stats.dispatched);
    println!("dropped:    {}", stats.dropped);
    if let Some(reason) = stats.last_drop_reason {
        println!("last drop reason: {reason}");
    }
    for q in (0..tas_core::TOTAL_QOS_TAGS).rev() {
        println!(
            "  queue {q}: dispatched={} dropped={} backlog={}",
            stats.dispatched_on(q),
            stats.dropped_on(q),
            disc.queue_len(q)
        );
    }

    Ok(())
}

fn run(disc: &mut TasQueueDisc<DemoFrame, u64>, kernel: &mut EventKernel, arrivals: Vec<DemoFrame>) {
    let mut arrivals = arrivals.into_iter().peekable();

    loop {
        let next_arrival = arrivals.peek().map(|f| f.arrival);
        let next_wakeup = kernel.peek_next_wakeup();

        let arrival_is_next = match (next_arrival, next_wakeup) {
            (Some(a), Some(w)) => a <= w,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        if arrival_is_next {
            // unwrap: arrival_is_next only true when next_arrival is Some.
            let frame = match arrivals.next() {
                Some(frame) => frame,
                None => break,
            };
            kernel.advance_to(frame.arrival);
            tracing::debug!(time = frame.arrival, size = frame.size_bytes, "frame arrived");
            disc.enqueue(frame);
        } else {
            kernel.pop_next_wakeup();
        }

        // Drain every frame dispatchable at this instant before advancing
        // the clock again — several priorities can be open at once.
        while let Some(frame) = disc.dequeue(kernel) {
            tracing::debug!(time = kernel.now(), size = frame.size_bytes, "frame dispatched");
        }
    }
}

fn load_frame_trace(path: &std::path::Path) -> Result<Vec<DemoFrame>> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::FrameTrace {
        path: path.display().to_string(),
        source,
    })?;

    let mut frames = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let frame = parse_trace_line(line).ok_or_else(|| CliError::MalformedFrameLine {
            line_number: index + 1,
            line: line.to_string(),
        })?;
        frames.push(frame);
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tas_core::{GateMask, Schedule, Window};

    const OPEN: GateMask = [true; 8];

    #[test]
    fn drains_a_single_frame_on_an_always_open_schedule() {
        let mut s = Schedule::empty();
        s.append(Window::full(1_000_000_000, OPEN).unwrap());
        let config = TasConfig {
            schedule: s,
            filters: vec![],
            trust_qostag: false,
            max_size: 800,
            data_rate_bps: 5_000_000,
            time_source: None,
        };
        let mut disc: TasQueueDisc<DemoFrame, u64> = TasQueueDisc::initialize(config);
        let mut kernel = EventKernel::new(0);

        run(
            &mut disc,
            &mut kernel,
            vec![DemoFrame { arrival: 0, size_bytes: 64, tag: Some(3) }],
        );

        assert_eq!(disc.stats().dispatched, 1);
    }

    #[test]
    fn frame_trace_skips_blank_and_comment_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("trace.txt");
        std::fs::write(&path, "# comment\n\n1000 64 3\n2000 128\n").expect("write trace");

        let frames = load_frame_trace(&path).expect("load trace");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].arrival, 1000);
        assert_eq!(frames[1].tag, None);
    }
}
