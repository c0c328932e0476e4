//! End-to-end flow over file-backed stores: plan a month, record what
//! happened, reconcile, reopen from disk and report.

use chrono::NaiveDate;
use fintrack::config::{FinTrackPaths, Settings};
use fintrack::models::{GoalKind, Money, MonthPeriod, TransactionEntry, TransactionKind};
use fintrack::services::{BudgetStatus, FinanceTracker};
use tempfile::TempDir;

const MARCH: MonthPeriod = MonthPeriod::new(2024, 3);

fn entry(name: &str, units: i64, kind: TransactionKind, category: &str, day: u32) -> TransactionEntry {
    let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
    TransactionEntry::new(name, Money::from_units(units), kind, date).with_category(category)
}

fn open(paths: &FinTrackPaths) -> FinanceTracker {
    FinanceTracker::open(paths, Settings::default()).unwrap()
}

#[test]
fn plan_record_reconcile_and_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());

    let goal_id = {
        let mut tracker = open(&paths);

        for planned in [
            entry("Salary", 3000, TransactionKind::Income, "Salary", 1),
            entry("Rent", 1000, TransactionKind::Expense, "Housing", 1),
            entry("Food", 400, TransactionKind::Expense, "Food", 15),
        ] {
            tracker.forecasts_mut().add(planned, "").unwrap().unwrap();
        }

        // Recorded straight into the ledger, so only reconcile can match them.
        tracker
            .ledger_mut()
            .add(entry("Paycheck", 3000, TransactionKind::Income, "Salary", 1))
            .unwrap()
            .unwrap();
        tracker
            .ledger_mut()
            .add(entry("Market", 380, TransactionKind::Expense, "Food", 20))
            .unwrap()
            .unwrap();

        let outcome = tracker.reconcile_month(MARCH).unwrap();
        assert_eq!(outcome.matched_count, 2);
        assert_eq!(outcome.unrealized_before, 3);

        let recorded = tracker
            .record_transaction(entry("Rent March", 1050, TransactionKind::Expense, "Housing", 2))
            .unwrap()
            .unwrap();
        assert!(recorded.matched_forecast.is_some());

        let goal = tracker
            .goals_mut()
            .add("Keep spending down", Money::from_units(1500), GoalKind::Expense, MARCH)
            .unwrap()
            .unwrap();
        goal.id
    };

    let mut tracker = open(&paths);
    assert_eq!(tracker.ledger().len(), 3);
    assert!(tracker.forecasts().unrealized().is_empty());

    let again = tracker.reconcile_month(MARCH).unwrap();
    assert_eq!(again.matched_count, 0);
    assert_eq!(again.unrealized_before, 0);

    let comparison = tracker.compare(MARCH);
    assert_eq!(comparison.income.variance, Money::zero());
    assert_eq!(comparison.expenses.forecast, Money::from_units(1400));
    assert_eq!(comparison.expenses.actual, Money::from_units(1430));
    assert_eq!(comparison.expenses.variance, Money::from_units(30));
    assert!((comparison.expenses.variance_pct - 30.0 / 1400.0 * 100.0).abs() < 1e-9);
    assert_eq!(
        comparison.expense_categories["Food"].variance,
        Money::from_units(-20)
    );

    let progress = tracker.goal_progress(goal_id);
    assert_eq!(progress.current_amount, Money::from_units(1430));
    assert_eq!(progress.remaining, Money::from_units(70));
    assert_eq!(progress.budget_status(), Some(BudgetStatus::AtOrOverBudget));
}

#[test]
fn converted_month_becomes_next_plan() {
    let temp_dir = TempDir::new().unwrap();
    let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
    let mut tracker = open(&paths);

    tracker
        .record_transaction(entry("Paycheck", 3000, TransactionKind::Income, "Salary", 1))
        .unwrap();
    tracker
        .record_transaction(entry("Rent", 1000, TransactionKind::Expense, "Housing", 2))
        .unwrap();

    let march: Vec<_> = tracker
        .ledger()
        .list_by_month(MARCH)
        .into_iter()
        .cloned()
        .collect();
    let created = tracker.forecasts_mut().bulk_convert(&march).unwrap();
    assert_eq!(created, 2);

    let reopened = open(&paths);
    let names: Vec<&str> = reopened
        .forecasts()
        .list_by_month(MARCH)
        .iter()
        .map(|f| f.entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["[Forecast] Paycheck", "[Forecast] Rent"]);
    assert_eq!(reopened.forecasts().monthly_summary(MARCH).net, Money::from_units(2000));
}
