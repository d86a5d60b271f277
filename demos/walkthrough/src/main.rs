//! walkthrough: drive the lift simulator with a hand-written controller.
//!
//! Runs one episode, logs progress through `env_logger`, writes `steps.csv`
//! and `trips.csv` into the output directory, and prints a short summary.
//!
//! ```text
//! RUST_LOG=debug walkthrough --policy nearest --steps 5000 --config lift.toml
//! ```

mod policies;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use lift_core::{Action, LiftConfig, LiftState, Step};
use lift_output::{CsvWriter, OutputWriter, SessionOutputObserver};
use lift_queue::QueueStore;
use lift_sim::{Policy, Session, SessionObserver, StepOutcome};

use policies::PolicyKind;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[clap(name = "walkthrough", about = "Run a scripted controller against the lift simulator")]
struct Args {
    /// Controller driving the lift.
    #[clap(long, value_enum, default_value = "nearest")]
    policy: PolicyKind,

    /// Number of steps to simulate after the reset.
    #[clap(long, default_value_t = 1_000)]
    steps: u64,

    /// Overrides the seed from the config file.
    #[clap(long)]
    seed: Option<u64>,

    /// Overrides the cabin capacity from the config file.
    #[clap(long)]
    capacity: Option<usize>,

    /// TOML file with a `LiftConfig`; the built-in building is used otherwise.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Directory receiving `steps.csv` and `trips.csv`.
    #[clap(long, default_value = "output/walkthrough")]
    output: PathBuf,
}

fn load_config(path: &Path) -> Result<LiftConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: LiftConfig = toml::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

// ── Observer wrapper collecting the summary ──────────────────────────────────

struct SummaryObserver<W: OutputWriter> {
    inner:       SessionOutputObserver<W>,
    initial:     usize,
    spawned:     usize,
    boarded:     usize,
    delivered:   usize,
    trip_steps:  u64,
    door_openings: usize,
}

impl<W: OutputWriter> SummaryObserver<W> {
    fn new(inner: SessionOutputObserver<W>) -> Self {
        Self {
            inner,
            initial:     0,
            spawned:     0,
            boarded:     0,
            delivered:   0,
            trip_steps:  0,
            door_openings: 0,
        }
    }

    fn mean_trip(&self) -> f64 {
        if self.delivered == 0 {
            0.0
        } else {
            self.trip_steps as f64 / self.delivered as f64
        }
    }
}

impl<W: OutputWriter> SessionObserver for SummaryObserver<W> {
    fn on_reset(&mut self, state: &LiftState, queues: &QueueStore) {
        self.initial = queues.active_count();
        info!(
            "reset: floor {} with {} passengers ({} aboard)",
            state.floor,
            self.initial,
            queues.cabin_len()
        );
        self.inner.on_reset(state, queues);
    }

    fn on_step(&mut self, outcome: &StepOutcome, queues: &QueueStore) {
        self.spawned += outcome.spawned.len();
        self.boarded += outcome.boarded;
        self.delivered += outcome.delivered.len();
        self.trip_steps += outcome
            .delivered
            .iter()
            .map(|p| outcome.step.since(p.spawned_at()))
            .sum::<u64>();
        if outcome.action == Action::Door && !outcome.state.door_open() {
            self.door_openings += 1;
        }
        if outcome.step.0 % 500 == 0 {
            info!(
                "{}: floor {} {}, {} active, {} delivered so far",
                outcome.step,
                outcome.next.floor,
                outcome.next.direction.as_str(),
                outcome.active_after,
                self.delivered
            );
        }
        self.inner.on_step(outcome, queues);
    }

    fn on_run_end(&mut self, final_step: Step) {
        self.inner.on_run_end(final_step);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // 1. Configuration: file or built-in building, then CLI overrides.
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => LiftConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(capacity) = args.capacity {
        config.max_capacity = capacity;
    }

    println!("=== walkthrough: single lift simulation ===");
    println!(
        "Floors: {}  |  Capacity: {}  |  Seed: {}  |  Expected arrivals/step: {:.3}",
        config.floors(),
        config.max_capacity,
        config.seed,
        config.arrivals.expected_arrivals()
    );

    // 2. Session and controller.
    let mut session = Session::new(config)?;
    let mut policy = args.policy.build();
    println!("Policy: {}  |  Steps: {}", policy.name(), args.steps);
    println!();

    // 3. Output.
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let writer = CsvWriter::new(&args.output)?;
    let mut observer = SummaryObserver::new(SessionOutputObserver::new(writer));

    // 4. Run.
    let t0 = Instant::now();
    session.run_episode(&mut policy, args.steps, &mut observer)?;
    let elapsed = t0.elapsed();

    if let Some(e) = observer.inner.take_error() {
        warn!("output error: {e}");
        return Err(e.into());
    }

    // 5. Summary.
    let queues = session.queues();
    println!("Simulated {} steps in {:.2?}", session.clock().0, elapsed);
    println!("Initial backlog:    {}", observer.initial);
    println!("Arrivals:           {}", observer.spawned);
    println!("Boarded:            {}", observer.boarded);
    println!("Delivered:          {}", observer.delivered);
    println!("Mean trip (steps):  {:.1}", observer.mean_trip());
    println!("Door openings:      {}", observer.door_openings);
    println!(
        "Still active:       {} ({} waiting, {} aboard)",
        queues.active_count(),
        queues.waiting_count(),
        queues.cabin_len()
    );
    println!("Final state:        {}", session.state());
    println!();
    println!(
        "Wrote {} step rows and {} trip rows to {}",
        observer.inner.steps_written(),
        observer.inner.trips_written(),
        args.output.display()
    );

    Ok(())
}
