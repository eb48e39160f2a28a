use serde::Serialize;

use distress_core::{BootstrapConfig, BootstrapRun, IndexParams, SampleMatrix};

pub struct BootstrapCommandConfig<'a> {
    pub prices_path: &'a str,
    pub weights_path: &'a str,
    pub slack_path: &'a str,
    pub period: &'a str,
    pub horizon: u32,
    pub geography: String,
    pub alpha: f64,
    pub scale: f64,
    pub iterations: usize,
    pub weight_cv: f64,
    pub seed: Option<u64>,
    pub include_samples: bool,
    pub output_path: Option<&'a str>,
}

/// JSON output shape; samples are bulky and included only on request.
#[derive(Serialize)]
struct BootstrapReport<'a> {
    reference_period: &'a str,
    config: &'a BootstrapConfig,
    base_seed: u64,
    slack: f64,
    intervals: &'a [distress_core::GroupInterval],
    #[serde(skip_serializing_if = "Option::is_none")]
    samples: Option<&'a SampleMatrix>,
}

pub fn run(cfg: BootstrapCommandConfig<'_>) {
    let prices = super::load_prices(cfg.prices_path);
    let weights = super::load_weights(cfg.weights_path);
    let slack = super::load_slack(cfg.slack_path);

    let bootstrap_cfg = BootstrapConfig {
        n_iterations: cfg.iterations,
        weight_cv: cfg.weight_cv,
        params: IndexParams {
            alpha: cfg.alpha,
            scale: cfg.scale,
        },
        horizon_months: cfg.horizon,
        geography: cfg.geography,
        seed: cfg.seed,
    };

    println!(
        "Running {} bootstrap iterations (weight CV {:.1}%)...",
        cfg.iterations,
        cfg.weight_cv * 100.0
    );

    let run: BootstrapRun =
        match distress_core::bootstrap(&prices, &weights, &slack, cfg.period, &bootstrap_cfg) {
            Ok(run) => run,
            Err(err) => super::fail(&err.to_string()),
        };

    println!(
        "Period {}, slack {:.2}, base seed {}\n",
        cfg.period, run.slack, run.base_seed
    );
    for interval in &run.intervals {
        println!(
            "  {}: index {:.2} [{:.2}, {:.2}] (SE={:.3})",
            interval.group,
            interval.index.point,
            interval.index.lower,
            interval.index.upper,
            interval.index.std_error
        );
        println!(
            "      inflation {:.2}% [{:.2}%, {:.2}%] (SE={:.3})",
            interval.inflation.point,
            interval.inflation.lower,
            interval.inflation.upper,
            interval.inflation.std_error
        );
    }

    if let Some(path) = cfg.output_path {
        let report = BootstrapReport {
            reference_period: cfg.period,
            config: &bootstrap_cfg,
            base_seed: run.base_seed,
            slack: run.slack,
            intervals: &run.intervals,
            samples: cfg.include_samples.then_some(&run.samples),
        };
        super::write_json(path, &report);
    }
}
