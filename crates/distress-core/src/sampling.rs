//! Weight perturbation under a multiplicative-noise model.
//!
//! The sampler draws each weight from a normal distribution centered at the
//! original value with standard deviation `weight × cv`, floors it at a small
//! positive value, then renormalizes every group back to sum one. The caller
//! owns the generator, so reproducibility is a matter of seeding it — there
//! is no process-global random state anywhere in the engine.

use rand::Rng;
use std::f64::consts::PI;

use crate::table::{WeightRow, WeightTable};

/// Floor applied to perturbed weights before renormalization.
pub const MIN_WEIGHT: f64 = 0.001;

/// Standard normal draw via the Box-Muller transform.
fn sample_standard_normal(rng: &mut impl Rng) -> f64 {
    let u1 = rng.random::<f64>().clamp(f64::MIN_POSITIVE, 1.0);
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Draw one perturbed copy of the weight table.
///
/// `weight_cv` is the assumed coefficient of variation (std/mean) of each
/// weight. Rows keep their order and identifiers; only the weights change.
/// Given the same generator state the output is bit-identical.
pub fn perturb_weights(
    weights: &WeightTable,
    weight_cv: f64,
    rng: &mut impl Rng,
) -> WeightTable {
    let mut rows: Vec<WeightRow> = weights
        .rows()
        .iter()
        .map(|row| {
            let std_dev = row.weight * weight_cv;
            let drawn = row.weight + std_dev * sample_standard_normal(rng);
            WeightRow {
                group: row.group.clone(),
                category: row.category.clone(),
                weight: drawn.max(MIN_WEIGHT),
            }
        })
        .collect();

    // Renormalize each group to sum one.
    for group in weights.groups() {
        let sum: f64 = rows
            .iter()
            .filter(|r| r.group == group)
            .map(|r| r.weight)
            .sum();
        for row in rows.iter_mut().filter(|r| r.group == group) {
            row.weight /= sum;
        }
    }

    WeightTable::new(rows)
}
