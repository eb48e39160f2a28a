//! Bootstrap uncertainty quantification over expenditure-weight sampling
//! error.
//!
//! Each iteration perturbs the weight table, reruns the aggregation and index
//! composition against the fixed price relatives and slack, and records the
//! per-group results at its iteration index. The iteration → seed mapping is
//! `base_seed + i`, so the sample matrices are reproducible regardless of
//! how the loop would be scheduled.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::index::{IndexParams, compose_index};
use crate::inflation::aggregate_inflation;
use crate::period::{DEFAULT_HORIZON_MONTHS, period_back};
use crate::relatives::price_relatives;
use crate::sampling::perturb_weights;
use crate::slack::resolve_slack;
use crate::table::{PriceLevelTable, SlackSeries, WeightTable};

/// Bootstrap run configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BootstrapConfig {
    /// Number of resampling iterations.
    pub n_iterations: usize,
    /// Assumed coefficient of variation of each expenditure weight.
    pub weight_cv: f64,
    /// Index formula parameters, shared by every iteration.
    pub params: IndexParams,
    /// Comparison horizon in months for the base period.
    pub horizon_months: u32,
    /// Geography for the slack lookup.
    pub geography: String,
    /// Base seed; iteration `i` uses `base_seed + i`. Absent means one is
    /// drawn from the OS, making the run non-reproducible.
    pub seed: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            n_iterations: 1000,
            weight_cv: 0.05,
            params: IndexParams::default(),
            horizon_months: DEFAULT_HORIZON_MONTHS,
            geography: "US".to_string(),
            seed: None,
        }
    }
}

/// Point estimate with a 95% interval and standard error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IntervalEstimate {
    /// Median of the resampled values.
    pub point: f64,
    /// 2.5th percentile.
    pub lower: f64,
    /// 97.5th percentile.
    pub upper: f64,
    /// Sample standard deviation of the resampled values.
    pub std_error: f64,
}

/// Per-group interval estimates for index and inflation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupInterval {
    pub group: String,
    pub index: IntervalEstimate,
    pub inflation: IntervalEstimate,
    /// Shared slack value, constant across iterations.
    pub slack: f64,
}

/// Raw resampled values, `n_iterations` rows by `groups.len()` columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleMatrix {
    pub groups: Vec<String>,
    pub index: Vec<Vec<f64>>,
    pub inflation: Vec<Vec<f64>>,
}

/// Full bootstrap output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BootstrapRun {
    pub intervals: Vec<GroupInterval>,
    pub samples: SampleMatrix,
    pub slack: f64,
    /// The base seed actually used (drawn from the OS when none was given).
    pub base_seed: u64,
}

/// Run the bootstrap: perturb → aggregate → compose, `n_iterations` times,
/// then reduce each group's columns to interval estimates.
///
/// Slack is resolved once — only weight uncertainty is modeled. Any failure
/// inside an iteration aborts the whole run; after renormalization the
/// perturbed table must always validate, so a failure there signals a sampler
/// defect and is never skipped.
pub fn bootstrap(
    prices: &PriceLevelTable,
    weights: &WeightTable,
    slack_series: &SlackSeries,
    reference_period: &str,
    cfg: &BootstrapConfig,
) -> Result<BootstrapRun, EngineError> {
    weights.validate()?;
    let base_period = period_back(reference_period, cfg.horizon_months)?;
    let relatives = price_relatives(prices, reference_period, &base_period)?;
    let slack = resolve_slack(slack_series, reference_period, &cfg.geography)?;

    let groups: Vec<String> = weights.groups().iter().map(|g| g.to_string()).collect();
    let base_seed = match cfg.seed {
        Some(seed) => seed,
        None => rand::rng().random(),
    };

    let n = cfg.n_iterations;
    let mut index_samples = vec![vec![0.0f64; groups.len()]; n];
    let mut inflation_samples = vec![vec![0.0f64; groups.len()]; n];

    for i in 0..n {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
        let perturbed = perturb_weights(weights, cfg.weight_cv, &mut rng);
        perturbed.validate()?;

        let aggregate = aggregate_inflation(&relatives, &perturbed)?;
        let records = compose_index(&aggregate.inflation, slack, &cfg.params);

        // Perturbation preserves row order, so records line up with `groups`.
        debug_assert_eq!(records.len(), groups.len());
        for (j, record) in records.iter().enumerate() {
            debug_assert_eq!(record.group, groups[j]);
            index_samples[i][j] = record.index;
            inflation_samples[i][j] = record.inflation_pct;
        }
    }

    let mut intervals = Vec::with_capacity(groups.len());
    for (j, group) in groups.iter().enumerate() {
        let index_col: Vec<f64> = index_samples.iter().map(|row| row[j]).collect();
        let inflation_col: Vec<f64> = inflation_samples.iter().map(|row| row[j]).collect();
        intervals.push(GroupInterval {
            group: group.clone(),
            index: reduce_column(&index_col),
            inflation: reduce_column(&inflation_col),
            slack,
        });
    }

    Ok(BootstrapRun {
        intervals,
        samples: SampleMatrix {
            groups,
            index: index_samples,
            inflation: inflation_samples,
        },
        slack,
        base_seed,
    })
}

fn reduce_column(values: &[f64]) -> IntervalEstimate {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    IntervalEstimate {
        point: percentile(&sorted, 50.0),
        lower: percentile(&sorted, 2.5),
        upper: percentile(&sorted, 97.5),
        std_error: sample_std(values),
    }
}

/// Percentile with linear interpolation between closest ranks.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
        }
    }
}

/// Sample standard deviation (n − 1 denominator).
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}
