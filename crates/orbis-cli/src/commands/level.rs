use clap::Subcommand;
use orbis_core::{Config, ProgressTracker};

#[derive(Subcommand)]
pub enum LevelAction {
    /// Resolve a lifetime XP total to level and progress
    Resolve {
        /// Lifetime XP total
        #[arg(long)]
        xp: f64,
    },
    /// Print the XP requirement table
    Curve {
        /// Number of levels to print
        #[arg(long, default_value = "10")]
        levels: u32,
    },
    /// Apply an XP delta to a total and show the resulting progress
    Apply {
        /// Current XP total
        #[arg(long)]
        xp: f64,
        /// XP delta, may be negative
        #[arg(long, allow_hyphen_values = true)]
        delta: i64,
    },
}

pub fn run(action: LevelAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let curve = config.curve()?;

    match action {
        LevelAction::Resolve { xp } => {
            let progress = curve.resolve(xp);
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
        LevelAction::Curve { levels } => {
            for level in 1..=levels.max(1) {
                println!(
                    "level {:>3}  begins at {:>14}  spans {:>14}",
                    level,
                    curve.level_floor(level),
                    curve.requirement_for(level)
                );
            }
        }
        LevelAction::Apply { xp, delta } => {
            let mut tracker = ProgressTracker::with_curve(curve);
            tracker.hydrate(xp);
            let events = tracker.apply_delta(delta);
            let output = serde_json::json!({
                "total_xp": tracker.total_xp(),
                "progress": tracker.progress(),
                "events": events,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
