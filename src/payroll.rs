//! Combines aggregated tours, the tour price, and the penalty map into
//! per-driver payroll amounts and grand totals.
//!
//! One asymmetry is preserved on purpose: [`PayrollTotals::total_penalties`]
//! sums every entry of the penalty map, including entries keyed by drivers
//! absent from the current records, while each driver line only subtracts
//! its own entry. Totals therefore reconcile against the full map rather
//! than against the visible lines. This is long-standing observed behavior
//! that can surprise users when a re-import leaves stale penalties behind;
//! clearing stale entries requires a reset.

use crate::aggregate::DriverStat;
use crate::model::PenaltyMap;

/// Payroll figures for a single driver.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollLine {
    /// Driver the line belongs to.
    pub driver: String,
    /// Tours credited to the driver.
    pub tour_count: usize,
    /// `tour_count * price_per_tour`, before any deduction.
    pub gross_pay: f64,
    /// The driver's penalty entry, or zero without one.
    pub penalty: f64,
    /// Gross pay minus the penalty.
    pub net_pay: f64,
}

/// Grand totals across the whole payroll run.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollTotals {
    /// Sum of tour counts over all drivers.
    pub total_tours: usize,
    /// `total_tours * price_per_tour`.
    pub total_gross: f64,
    /// Sum over the entire penalty map, stale entries included.
    pub total_penalties: f64,
    /// `total_gross - total_penalties`.
    pub total_payout: f64,
}

/// Per-driver lines plus grand totals; a pure function of the state.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollSummary {
    /// One line per driver, in aggregation order.
    pub lines: Vec<PayrollLine>,
    /// Grand totals, reconciling as `total_payout ==
    /// total_tours * price - sum(penalty map)`.
    pub totals: PayrollTotals,
}

/// Computes payroll lines and grand totals for the given stats, price, and
/// penalties. Lines keep the order of `stats`.
pub fn compute_summary(
    stats: &[DriverStat],
    price_per_tour: f64,
    penalties: &PenaltyMap,
) -> PayrollSummary {
    let lines: Vec<PayrollLine> = stats
        .iter()
        .map(|stat| {
            let gross_pay = stat.tour_count() as f64 * price_per_tour;
            let penalty = penalties.get(&stat.name).copied().unwrap_or(0.0);
            PayrollLine {
                driver: stat.name.clone(),
                tour_count: stat.tour_count(),
                gross_pay,
                penalty,
                net_pay: gross_pay - penalty,
            }
        })
        .collect();

    let total_tours: usize = stats.iter().map(DriverStat::tour_count).sum();
    let total_gross = total_tours as f64 * price_per_tour;
    let total_penalties: f64 = penalties.values().sum();

    PayrollSummary {
        lines,
        totals: PayrollTotals {
            total_tours,
            total_gross,
            total_penalties,
            total_payout: total_gross - total_penalties,
        },
    }
}

/// Coerces user-entered price text into an amount.
///
/// The price may be any finite float, negative included; anything that does
/// not parse as one (garbage text, `NaN`, infinities) becomes `0.0`. Edits
/// are never rejected: the coerced value is what takes effect.
pub fn coerce_price(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Coerces user-entered penalty text into an amount.
///
/// Penalties are non-negative: unparseable text, `NaN`, infinities, and
/// negative values all become `0.0`. The entry is still written, so an
/// invalid edit overwrites any previous amount with zero rather than being
/// dropped.
pub fn coerce_penalty(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}
