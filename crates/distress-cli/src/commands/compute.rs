use distress_core::{CheckStatus, IndexParams, SnapshotConfig, hard_checks, release_gate, soft_checks};

pub struct ComputeCommandConfig<'a> {
    pub prices_path: &'a str,
    pub weights_path: &'a str,
    pub slack_path: &'a str,
    pub period: &'a str,
    pub horizon: u32,
    pub geography: String,
    pub alpha: f64,
    pub scale: f64,
    pub bounds: &'a str,
    pub qa: bool,
    pub output_path: Option<&'a str>,
}

pub fn run(cfg: ComputeCommandConfig<'_>) {
    let prices = super::load_prices(cfg.prices_path);
    let weights = super::load_weights(cfg.weights_path);
    let slack = super::load_slack(cfg.slack_path);
    let bounds = super::parse_bounds(cfg.bounds);

    let snapshot_cfg = SnapshotConfig {
        horizon_months: cfg.horizon,
        geography: cfg.geography,
        params: IndexParams {
            alpha: cfg.alpha,
            scale: cfg.scale,
        },
        bounds: bounds.clone(),
    };

    let snapshot =
        match distress_core::compute_snapshot(&prices, &weights, &slack, cfg.period, &snapshot_cfg)
        {
            Ok(snapshot) => snapshot,
            Err(err) => super::fail(&err.to_string()),
        };

    println!(
        "Reference period: {} (base {})",
        snapshot.reference_period, snapshot.base_period
    );
    println!("Slack: {:.2}\n", snapshot.slack);

    println!("  {:<12} {:>8} {:>10}", "group", "index", "inflation");
    for record in &snapshot.index {
        println!(
            "  {:<12} {:>8.2} {:>9.2}%",
            record.group, record.index, record.inflation_pct
        );
    }

    println!(
        "\nSummary: median {:.2}, max {:.2}{}",
        snapshot.summary.median,
        snapshot.summary.max,
        match snapshot.summary.dispersion {
            Some(d) => format!(
                ", dispersion ({} - {}): {:.2}",
                bounds.highest, bounds.lowest, d
            ),
            None => String::new(),
        }
    );

    if !snapshot.unscaled_groups.is_empty() {
        println!(
            "\nNote: unscaled contribution breakdowns for {:?} (zero log change)",
            snapshot.unscaled_groups
        );
    }

    let gate_failed = if cfg.qa {
        let expected: Vec<String> = weights.groups().iter().map(|g| g.to_string()).collect();
        let mut checks = hard_checks(&snapshot, &weights, &expected, (0.0, 100.0));
        checks.extend(soft_checks(&snapshot, &bounds));

        println!("\nQA checks:");
        for check in &checks {
            let status = match check.status {
                CheckStatus::Pass => "PASS",
                CheckStatus::Warn => "WARN",
                CheckStatus::Fail => "FAIL",
            };
            println!("  [{status}] {:<26} {}", check.id, check.message);
        }
        !release_gate(&checks)
    } else {
        false
    };

    if let Some(path) = cfg.output_path {
        super::write_json(path, &snapshot);
    }

    if gate_failed {
        eprintln!("\nQA gate failed");
        std::process::exit(1);
    }
}
