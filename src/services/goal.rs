//! Goal tracker
//!
//! Monthly goals and their progress against the transaction ledger.

use crate::error::FinTrackResult;
use crate::models::{FinancialGoal, GoalId, GoalKind, Money, MonthPeriod};
use crate::storage::RecordStore;

use super::ledger::TransactionLedger;

/// Partial update for a goal; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target_amount: Option<Money>,
    pub kind: Option<GoalKind>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub active: Option<bool>,
}

impl GoalUpdate {
    fn is_valid(&self) -> bool {
        self.target_amount.map_or(true, |amount| amount.is_positive())
            && self.month.map_or(true, |month| (1..=12).contains(&month))
    }

    fn apply_to(&self, goal: &mut FinancialGoal) {
        if let Some(name) = &self.name {
            goal.name = name.clone();
        }
        if let Some(amount) = self.target_amount {
            goal.target_amount = amount;
        }
        if let Some(kind) = self.kind {
            goal.kind = kind;
        }
        if let Some(year) = self.year {
            goal.year = year;
        }
        if let Some(month) = self.month {
            goal.month = month;
        }
        if let Some(active) = self.active {
            goal.active = active;
        }
    }
}

/// How an expense goal's spending compares to its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Under 75% of the budget used
    UnderBudget,
    /// 75% up to 90%
    Approaching,
    /// 90% or more
    AtOrOverBudget,
}

/// Progress of one goal in its month
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    /// `None` when the goal id was not found; all numbers are then zero
    pub goal: Option<FinancialGoal>,
    pub current_amount: Money,
    /// 0 to 100
    pub percentage: f64,
    /// Headroom left before the target, never negative
    pub remaining: Money,
}

impl GoalProgress {
    fn missing() -> Self {
        Self {
            goal: None,
            current_amount: Money::zero(),
            percentage: 0.0,
            remaining: Money::zero(),
        }
    }

    fn compute(goal: &FinancialGoal, ledger: &TransactionLedger) -> Self {
        let summary = ledger.monthly_summary(goal.period());
        let current_amount = match goal.kind {
            GoalKind::Income => summary.total_income,
            GoalKind::Expense => summary.total_expenses,
            GoalKind::Savings => summary.net,
        };

        let percentage = if goal.target_amount.is_positive() {
            current_amount
                .percent_of(goal.target_amount)
                .clamp(0.0, 100.0)
        } else {
            0.0
        };
        let remaining = (goal.target_amount - current_amount).max(Money::zero());

        Self {
            goal: Some(goal.clone()),
            current_amount,
            percentage,
            remaining,
        }
    }

    pub fn is_found(&self) -> bool {
        self.goal.is_some()
    }

    /// Spending status for expense goals; `None` for other kinds
    pub fn budget_status(&self) -> Option<BudgetStatus> {
        match self.goal.as_ref()?.kind {
            GoalKind::Expense if self.percentage < 75.0 => Some(BudgetStatus::UnderBudget),
            GoalKind::Expense if self.percentage < 90.0 => Some(BudgetStatus::Approaching),
            GoalKind::Expense => Some(BudgetStatus::AtOrOverBudget),
            GoalKind::Income | GoalKind::Savings => None,
        }
    }

    /// How far spending went past an expense budget
    pub fn overage(&self) -> Money {
        match &self.goal {
            Some(goal) if goal.kind == GoalKind::Expense => {
                (self.current_amount - goal.target_amount).max(Money::zero())
            }
            _ => Money::zero(),
        }
    }
}

/// The set of financial goals
pub struct GoalTracker {
    store: Box<dyn RecordStore<FinancialGoal>>,
    goals: Vec<FinancialGoal>,
}

impl GoalTracker {
    pub fn load(store: Box<dyn RecordStore<FinancialGoal>>) -> FinTrackResult<Self> {
        let goals = store.load()?;
        Ok(Self { store, goals })
    }

    /// Add an active goal for `period`.
    ///
    /// Returns `None` for a non-positive target or a month outside 1 to 12.
    pub fn add(
        &mut self,
        name: &str,
        target_amount: Money,
        kind: GoalKind,
        period: MonthPeriod,
    ) -> FinTrackResult<Option<FinancialGoal>> {
        if !target_amount.is_positive() || !(1..=12).contains(&period.month) {
            return Ok(None);
        }

        let goal = FinancialGoal::new(name, target_amount, kind, period.year, period.month);
        self.goals.push(goal.clone());
        self.flush()?;
        Ok(Some(goal))
    }

    pub fn update(&mut self, id: GoalId, update: &GoalUpdate) -> FinTrackResult<bool> {
        if !update.is_valid() {
            return Ok(false);
        }
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(false);
        };

        update.apply_to(goal);
        self.flush()?;
        Ok(true)
    }

    /// Keep the goal but stop listing it
    pub fn deactivate(&mut self, id: GoalId) -> FinTrackResult<bool> {
        self.update(
            id,
            &GoalUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
    }

    pub fn remove(&mut self, id: GoalId) -> FinTrackResult<bool> {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        if self.goals.len() == before {
            return Ok(false);
        }

        self.flush()?;
        Ok(true)
    }

    pub fn get(&self, id: GoalId) -> Option<&FinancialGoal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn all(&self) -> &[FinancialGoal] {
        &self.goals
    }

    /// Active goals for one month, in storage order
    pub fn list_by_month(&self, period: MonthPeriod) -> Vec<&FinancialGoal> {
        self.goals
            .iter()
            .filter(|g| g.active && g.period() == period)
            .collect()
    }

    pub fn progress(&self, id: GoalId, ledger: &TransactionLedger) -> GoalProgress {
        match self.get(id) {
            Some(goal) => GoalProgress::compute(goal, ledger),
            None => GoalProgress::missing(),
        }
    }

    /// Progress for every active goal of a month, newest first
    pub fn progress_for_month(
        &self,
        period: MonthPeriod,
        ledger: &TransactionLedger,
    ) -> Vec<GoalProgress> {
        self.list_by_month(period)
            .into_iter()
            .rev()
            .map(|goal| GoalProgress::compute(goal, ledger))
            .collect()
    }

    fn flush(&self) -> FinTrackResult<()> {
        self.store.save(&self.goals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TransactionEntry, TransactionKind};
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    const MARCH: MonthPeriod = MonthPeriod::new(2024, 3);

    fn tracker() -> (GoalTracker, MemoryStore<FinancialGoal>) {
        let store = MemoryStore::new();
        let tracker = GoalTracker::load(Box::new(store.clone())).unwrap();
        (tracker, store)
    }

    fn ledger_with(entries: &[(TransactionKind, i64)]) -> TransactionLedger {
        let on = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let records = entries
            .iter()
            .map(|(kind, units)| {
                Transaction::new(TransactionEntry::new("t", Money::from_units(*units), *kind, on))
            })
            .collect();
        TransactionLedger::load(Box::new(MemoryStore::with_records(records))).unwrap()
    }

    #[test]
    fn test_add_and_list_active_only() {
        let (mut tracker, store) = tracker();
        let first = tracker
            .add("Food", Money::from_units(400), GoalKind::Expense, MARCH)
            .unwrap()
            .unwrap();
        tracker
            .add("Save", Money::from_units(300), GoalKind::Savings, MARCH)
            .unwrap()
            .unwrap();
        tracker
            .add("April", Money::from_units(300), GoalKind::Savings, MonthPeriod::new(2024, 4))
            .unwrap()
            .unwrap();

        assert_eq!(tracker.list_by_month(MARCH).len(), 2);
        assert!(tracker.deactivate(first.id).unwrap());
        assert_eq!(tracker.list_by_month(MARCH).len(), 1);
        assert_eq!(tracker.all().len(), 3);
        assert_eq!(store.save_count(), 4);
    }

    #[test]
    fn test_add_validation() {
        let (mut tracker, _store) = tracker();
        assert!(tracker
            .add("Zero", Money::zero(), GoalKind::Income, MARCH)
            .unwrap()
            .is_none());
        assert!(tracker
            .add("Bad month", Money::from_units(1), GoalKind::Income, MonthPeriod::new(2024, 13))
            .unwrap()
            .is_none());
        assert!(tracker.all().is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let (mut tracker, _store) = tracker();
        let goal = tracker
            .add("Earn", Money::from_units(2000), GoalKind::Income, MARCH)
            .unwrap()
            .unwrap();

        let update = GoalUpdate {
            target_amount: Some(Money::from_units(2500)),
            ..Default::default()
        };
        assert!(tracker.update(goal.id, &update).unwrap());
        assert_eq!(tracker.get(goal.id).unwrap().target_amount, Money::from_units(2500));
        assert_eq!(tracker.get(goal.id).unwrap().name, "Earn");

        assert!(!tracker.update(GoalId::new(), &update).unwrap());
        assert!(tracker.remove(goal.id).unwrap());
        assert!(!tracker.remove(goal.id).unwrap());
    }

    #[test]
    fn test_expense_progress_clamps() {
        let (mut tracker, _store) = tracker();
        let goal = tracker
            .add("Budget", Money::from_units(500), GoalKind::Expense, MARCH)
            .unwrap()
            .unwrap();
        let ledger = ledger_with(&[(TransactionKind::Expense, 800)]);

        let progress = tracker.progress(goal.id, &ledger);
        assert_eq!(progress.current_amount, Money::from_units(800));
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.remaining, Money::zero());
        assert_eq!(progress.overage(), Money::from_units(300));
        assert_eq!(progress.budget_status(), Some(BudgetStatus::AtOrOverBudget));
    }

    #[test]
    fn test_savings_progress_uses_net() {
        let (mut tracker, _store) = tracker();
        let goal = tracker
            .add("Save", Money::from_units(1000), GoalKind::Savings, MARCH)
            .unwrap()
            .unwrap();
        let ledger = ledger_with(&[(TransactionKind::Income, 2000), (TransactionKind::Expense, 1750)]);

        let progress = tracker.progress(goal.id, &ledger);
        assert_eq!(progress.current_amount, Money::from_units(250));
        assert!((progress.percentage - 25.0).abs() < 1e-9);
        assert_eq!(progress.remaining, Money::from_units(750));
        assert_eq!(progress.budget_status(), None);
    }

    #[test]
    fn test_negative_savings_clamps_to_zero_percent() {
        let (mut tracker, _store) = tracker();
        let goal = tracker
            .add("Save", Money::from_units(100), GoalKind::Savings, MARCH)
            .unwrap()
            .unwrap();
        let ledger = ledger_with(&[(TransactionKind::Expense, 50)]);

        let progress = tracker.progress(goal.id, &ledger);
        assert_eq!(progress.current_amount, Money::from_units(-50));
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.remaining, Money::from_units(150));
    }

    #[test]
    fn test_missing_goal_sentinel() {
        let (tracker, _store) = tracker();
        let progress = tracker.progress(GoalId::new(), &ledger_with(&[]));

        assert!(!progress.is_found());
        assert_eq!(progress.current_amount, Money::zero());
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.remaining, Money::zero());
    }

    #[test]
    fn test_budget_status_thresholds() {
        let (mut tracker, _store) = tracker();
        let goal = tracker
            .add("Budget", Money::from_units(100), GoalKind::Expense, MARCH)
            .unwrap()
            .unwrap();

        let under = tracker.progress(goal.id, &ledger_with(&[(TransactionKind::Expense, 74)]));
        let near = tracker.progress(goal.id, &ledger_with(&[(TransactionKind::Expense, 75)]));
        let over = tracker.progress(goal.id, &ledger_with(&[(TransactionKind::Expense, 90)]));

        assert_eq!(under.budget_status(), Some(BudgetStatus::UnderBudget));
        assert_eq!(near.budget_status(), Some(BudgetStatus::Approaching));
        assert_eq!(over.budget_status(), Some(BudgetStatus::AtOrOverBudget));
    }

    #[test]
    fn test_progress_for_month_newest_first() {
        let (mut tracker, _store) = tracker();
        tracker
            .add("Older", Money::from_units(100), GoalKind::Income, MARCH)
            .unwrap();
        tracker
            .add("Newer", Money::from_units(100), GoalKind::Income, MARCH)
            .unwrap();

        let progress = tracker.progress_for_month(MARCH, &ledger_with(&[]));
        let names: Vec<_> = progress
            .iter()
            .map(|p| p.goal.as_ref().unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }
}
