//! CLI for the distributional stress index engine.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "distress")]
#[command(about = "distress — distributional economic stress index calculator")]
#[command(version = distress_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the index, contribution breakdown, and summary for one period
    Compute {
        /// Price level table: JSON array of {"period", "<category>": level, ...}
        #[arg(long)]
        prices: String,

        /// Expenditure weights: JSON array of {"group", "category", "weight"}
        #[arg(long)]
        weights: String,

        /// Slack series: JSON array of {"period", "geography"?, "value"}
        #[arg(long)]
        slack: String,

        /// Reference period, YYYY-MM
        #[arg(long)]
        period: String,

        /// Comparison horizon in months
        #[arg(long, default_value = "12")]
        horizon: u32,

        /// Geography for the slack lookup
        #[arg(long, default_value = "US")]
        geography: String,

        /// Weight on inflation versus slack in the index formula
        #[arg(long, default_value = "0.5")]
        alpha: f64,

        /// Index scale factor
        #[arg(long, default_value = "2.0")]
        scale: f64,

        /// Lowest,highest boundary group labels for dispersion
        #[arg(long, default_value = "Q1,Q5")]
        bounds: String,

        /// Run QA gate checks; exit nonzero if any hard check fails
        #[arg(long)]
        qa: bool,

        /// Write the full snapshot as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Bootstrap confidence intervals by resampling expenditure weights
    Bootstrap {
        /// Price level table: JSON array of {"period", "<category>": level, ...}
        #[arg(long)]
        prices: String,

        /// Expenditure weights: JSON array of {"group", "category", "weight"}
        #[arg(long)]
        weights: String,

        /// Slack series: JSON array of {"period", "geography"?, "value"}
        #[arg(long)]
        slack: String,

        /// Reference period, YYYY-MM
        #[arg(long)]
        period: String,

        /// Comparison horizon in months
        #[arg(long, default_value = "12")]
        horizon: u32,

        /// Geography for the slack lookup
        #[arg(long, default_value = "US")]
        geography: String,

        /// Weight on inflation versus slack in the index formula
        #[arg(long, default_value = "0.5")]
        alpha: f64,

        /// Index scale factor
        #[arg(long, default_value = "2.0")]
        scale: f64,

        /// Number of bootstrap iterations
        #[arg(long, default_value = "1000")]
        iterations: usize,

        /// Assumed coefficient of variation for weight perturbation
        #[arg(long, default_value = "0.05")]
        weight_cv: f64,

        /// Base random seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Include the raw sample matrices in JSON output
        #[arg(long)]
        samples: bool,

        /// Write intervals (and optionally samples) as JSON
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compute {
            prices,
            weights,
            slack,
            period,
            horizon,
            geography,
            alpha,
            scale,
            bounds,
            qa,
            output,
        } => commands::compute::run(commands::compute::ComputeCommandConfig {
            prices_path: &prices,
            weights_path: &weights,
            slack_path: &slack,
            period: &period,
            horizon,
            geography,
            alpha,
            scale,
            bounds: &bounds,
            qa,
            output_path: output.as_deref(),
        }),
        Commands::Bootstrap {
            prices,
            weights,
            slack,
            period,
            horizon,
            geography,
            alpha,
            scale,
            iterations,
            weight_cv,
            seed,
            samples,
            output,
        } => commands::bootstrap::run(commands::bootstrap::BootstrapCommandConfig {
            prices_path: &prices,
            weights_path: &weights,
            slack_path: &slack,
            period: &period,
            horizon,
            geography,
            alpha,
            scale,
            iterations,
            weight_cv,
            seed,
            include_samples: samples,
            output_path: output.as_deref(),
        }),
    }
}
