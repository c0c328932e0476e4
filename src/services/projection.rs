//! Weighted trend projection
//!
//! Projects income and expenses forward from recent actuals. Month-over-month
//! deltas are averaged with extra weight on the most recent transitions and
//! the average delta is extended linearly from the anchor month.

use crate::config::{ProjectionSettings, WeightNormalization};
use crate::models::{Money, MonthPeriod};

use super::ledger::TransactionLedger;

/// Projected figures for one future month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectedPeriod {
    pub period: MonthPeriod,
    pub income: Money,
    pub expenses: Money,
    /// Projected income minus projected expenses
    pub net: Money,
}

/// Project `horizon` months past `anchor` from the ledger's history.
///
/// History is the `settings.history_months` months ending at `anchor`
/// (inclusive); months without transactions count as zero.
pub fn project(
    ledger: &TransactionLedger,
    anchor: MonthPeriod,
    horizon: u32,
    settings: &ProjectionSettings,
) -> Vec<ProjectedPeriod> {
    let history: Vec<_> = anchor
        .trailing(settings.history_months.max(1))
        .into_iter()
        .map(|period| ledger.monthly_summary(period))
        .collect();

    let incomes: Vec<f64> = history.iter().map(|s| s.total_income.to_units()).collect();
    let expenses: Vec<f64> = history.iter().map(|s| s.total_expenses.to_units()).collect();

    let income_delta = weighted_average_delta(&incomes, settings);
    let expense_delta = weighted_average_delta(&expenses, settings);

    let base_income = incomes.last().copied().unwrap_or(0.0);
    let base_expenses = expenses.last().copied().unwrap_or(0.0);

    tracing::debug!(
        %anchor,
        income_delta,
        expense_delta,
        "projecting {} months",
        horizon
    );

    (1..=horizon)
        .map(|step| {
            let step_f = f64::from(step);
            let income = Money::from_units_rounded((base_income + step_f * income_delta).max(0.0));
            let expenses =
                Money::from_units_rounded((base_expenses + step_f * expense_delta).max(0.0));
            ProjectedPeriod {
                period: anchor.offset(step as i32),
                income,
                expenses,
                net: income - expenses,
            }
        })
        .collect()
}

/// Weighted mean of month-over-month changes in `values` (oldest first).
///
/// The last `recent_transitions` changes get `recent_weight`, the rest
/// `older_weight`. Fewer than two values means no trend.
pub fn weighted_average_delta(values: &[f64], settings: &ProjectionSettings) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let transitions = values.len() - 1;
    let recent = (settings.recent_transitions as usize).min(transitions);
    let first_recent = transitions - recent;

    let weighted_sum: f64 = values
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let weight = if index >= first_recent {
                settings.recent_weight
            } else {
                settings.older_weight
            };
            (pair[1] - pair[0]) * weight
        })
        .sum();

    let denominator = match settings.normalization {
        WeightNormalization::WeightSum => {
            recent as f64 * settings.recent_weight + (transitions - recent) as f64 * settings.older_weight
        }
        WeightNormalization::Legacy => (transitions + recent) as f64,
    };

    if denominator == 0.0 {
        0.0
    } else {
        weighted_sum / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TransactionEntry, TransactionKind};
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn ledger(points: &[(i32, u32, TransactionKind, i64)]) -> TransactionLedger {
        let records = points
            .iter()
            .map(|(year, month, kind, units)| {
                let on = NaiveDate::from_ymd_opt(*year, *month, 15).unwrap();
                Transaction::new(TransactionEntry::new("t", Money::from_units(*units), *kind, on))
            })
            .collect();
        TransactionLedger::load(Box::new(MemoryStore::with_records(records))).unwrap()
    }

    #[test]
    fn test_delta_needs_two_points() {
        let settings = ProjectionSettings::default();
        assert_eq!(weighted_average_delta(&[], &settings), 0.0);
        assert_eq!(weighted_average_delta(&[100.0], &settings), 0.0);
    }

    #[test]
    fn test_recent_transitions_weigh_more() {
        let settings = ProjectionSettings::default();
        // deltas: +10, +10, +40, +40, +40; weights 1, 1, 2, 2, 2
        let values = [0.0, 10.0, 20.0, 60.0, 100.0, 140.0];
        let delta = weighted_average_delta(&values, &settings);

        assert!((delta - 260.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalizations_agree_on_default_weights() {
        let weight_sum = ProjectionSettings::default();
        let legacy = ProjectionSettings {
            normalization: WeightNormalization::Legacy,
            ..ProjectionSettings::default()
        };
        let values = [5.0, 25.0, 15.0, 40.0];

        let a = weighted_average_delta(&values, &weight_sum);
        let b = weighted_average_delta(&values, &legacy);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_normalizations_differ_on_custom_weights() {
        let custom = ProjectionSettings {
            recent_weight: 3.0,
            ..ProjectionSettings::default()
        };
        let legacy = ProjectionSettings {
            normalization: WeightNormalization::Legacy,
            ..custom.clone()
        };
        let values = [0.0, 10.0, 20.0];

        assert!((weighted_average_delta(&values, &custom) - 10.0).abs() < 1e-9);
        assert!((weighted_average_delta(&values, &legacy) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_income_trend() {
        use TransactionKind::Income;
        let ledger = ledger(&[
            (2024, 1, Income, 1000),
            (2024, 2, Income, 1100),
            (2024, 3, Income, 1200),
            (2024, 4, Income, 1300),
            (2024, 5, Income, 1400),
            (2024, 6, Income, 1500),
        ]);

        let projected = project(&ledger, MonthPeriod::new(2024, 6), 3, &ProjectionSettings::default());

        assert_eq!(projected.len(), 3);
        assert_eq!(projected[0].period, MonthPeriod::new(2024, 7));
        assert_eq!(projected[0].income, Money::from_units(1600));
        assert_eq!(projected[2].income, Money::from_units(1800));
        assert_eq!(projected[2].expenses, Money::zero());
        assert_eq!(projected[2].net, Money::from_units(1800));
    }

    #[test]
    fn test_projection_floors_at_zero() {
        use TransactionKind::Expense;
        let ledger = ledger(&[
            (2024, 3, Expense, 900),
            (2024, 4, Expense, 600),
            (2024, 5, Expense, 300),
            (2024, 6, Expense, 100),
        ]);

        // deltas 0, +900, -300, -300, -200 weighted 1, 1, 2, 2, 2 -> -87.5 per month
        let projected = project(&ledger, MonthPeriod::new(2024, 6), 6, &ProjectionSettings::default());

        assert_eq!(projected.len(), 6);
        assert_eq!(projected[0].expenses, Money::from_cents(1250));
        assert!(projected[1..].iter().all(|p| p.expenses == Money::zero()));
        assert_eq!(projected[5].period, MonthPeriod::new(2024, 12));
    }

    #[test]
    fn test_projection_crosses_year_boundary() {
        let ledger = ledger(&[]);
        let projected = project(&ledger, MonthPeriod::new(2024, 11), 3, &ProjectionSettings::default());

        let periods: Vec<_> = projected.iter().map(|p| p.period).collect();
        assert_eq!(
            periods,
            vec![
                MonthPeriod::new(2024, 12),
                MonthPeriod::new(2025, 1),
                MonthPeriod::new(2025, 2)
            ]
        );
    }
}
