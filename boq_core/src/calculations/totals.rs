//! # Cost Roll-up
//!
//! Overhead, profit and tax compound: each is charged on the running total
//! of the stage before it, never on the bare subtotal.
//!
//! ```text
//! overhead = subtotal x o/100
//! profit   = (subtotal + overhead) x p/100
//! tax      = (subtotal + overhead + profit) x t/100
//! grand    = subtotal + overhead + profit + tax
//! ```

use serde::{Deserialize, Serialize};

use crate::rates::{percent_factor, EstimationRates, ResolvedRates};

/// Running totals after each adjustment stage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdjustedTotal {
    pub with_overhead: f64,
    pub with_profit: f64,
    /// With tax
    pub total: f64,
}

/// Compound overhead, profit and tax onto `subtotal`.
pub fn apply_adjustments(subtotal: f64, rates: &ResolvedRates) -> AdjustedTotal {
    let with_overhead = subtotal * percent_factor(rates.overhead_percent);
    let with_profit = with_overhead * percent_factor(rates.profit_percent);
    let total = with_profit * percent_factor(rates.tax_percent);
    AdjustedTotal {
        with_overhead,
        with_profit,
        total,
    }
}

/// Project-level cost breakdown.
///
/// ## JSON Example
///
/// ```json
/// {
///   "subtotal": 300.0,
///   "overhead": 30.0,
///   "profit": 23.1,
///   "tax": 17.655,
///   "grand_total": 370.755
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectTotals {
    pub subtotal: f64,
    pub overhead: f64,
    pub profit: f64,
    pub tax: f64,
    pub grand_total: f64,
}

/// Sum item subtotals and layer the project adjustments on top.
///
/// Works purely on already-computed subtotals; an empty slice gives all
/// zeros.
///
/// # Example
///
/// ```rust
/// use boq_core::calculations::compute_project_totals;
/// use boq_core::rates::EstimationRates;
///
/// let totals = compute_project_totals(&[100.0, 200.0], &EstimationRates::default());
/// assert!((totals.grand_total - 370.755).abs() < 1e-9);
/// ```
pub fn compute_project_totals(subtotals: &[f64], rates: &EstimationRates) -> ProjectTotals {
    let rates = rates.resolved();
    let subtotal: f64 = subtotals.iter().sum();
    let overhead = subtotal * rates.overhead_percent / 100.0;
    let profit = (subtotal + overhead) * rates.profit_percent / 100.0;
    let tax = (subtotal + overhead + profit) * rates.tax_percent / 100.0;
    ProjectTotals {
        subtotal,
        overhead,
        profit,
        tax,
        grand_total: subtotal + overhead + profit + tax,
    }
}
