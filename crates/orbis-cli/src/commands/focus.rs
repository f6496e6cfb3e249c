use clap::Subcommand;
use orbis_core::{format_duration, Config, FocusOutcome, PolicyKind, SessionMode, SessionSummary};
use rand::SeedableRng;
use rand_pcg::Pcg64;

#[derive(Subcommand)]
pub enum FocusAction {
    /// Evaluate a finished session
    Evaluate {
        /// Elapsed session duration in seconds
        #[arg(long)]
        elapsed: f64,
        /// Override the configured policy (fixed | randomized)
        #[arg(long)]
        policy: Option<String>,
        /// Declared target duration in seconds (defined-time sessions)
        #[arg(long)]
        target: Option<u64>,
        /// RNG seed for reproducible randomized rewards
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Format a second count as HH:MM:SS
    Format {
        /// Seconds to format
        #[arg(long)]
        seconds: f64,
    },
    /// Summarize a JSON array of outcomes
    Summary {
        /// Path to a JSON array of outcomes, or - for stdin
        #[arg(long, default_value = "-")]
        outcomes: String,
    },
}

pub fn run(action: FocusAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        FocusAction::Evaluate {
            elapsed,
            policy,
            target,
            seed,
        } => {
            let mut config = Config::load_or_default();
            if let Some(name) = policy {
                config.focus.policy = match name.as_str() {
                    "fixed" => PolicyKind::Fixed,
                    "randomized" => PolicyKind::Randomized,
                    other => return Err(format!("unknown policy: {other}").into()),
                };
            }

            let evaluator = config.evaluator();
            let mode = match target {
                Some(target_secs) => SessionMode::Defined { target_secs },
                None => SessionMode::Open,
            };
            let outcome = match seed {
                Some(seed) => {
                    let mut rng = Pcg64::seed_from_u64(seed);
                    evaluator.evaluate_session_with_rng(elapsed, mode, &mut rng)
                }
                None => evaluator.evaluate_session(elapsed, mode),
            };
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        FocusAction::Format { seconds } => {
            println!("{}", format_duration(seconds));
        }
        FocusAction::Summary { outcomes } => {
            let raw = if outcomes == "-" {
                let mut buf = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
                buf
            } else {
                std::fs::read_to_string(&outcomes)?
            };
            let outcomes: Vec<FocusOutcome> = serde_json::from_str(&raw)?;
            let summary = SessionSummary::from_outcomes(&outcomes);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
