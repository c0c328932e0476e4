use assert_cmd::Command;
use predicates::prelude::*;
use std::error::Error;
use std::path::Path;
use tempfile::TempDir;

fn fintrack(data_dir: &Path) -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("fintrack")?;
    cmd.env("FINTRACK_DATA_DIR", data_dir).env_remove("RUST_LOG");
    Ok(cmd)
}

/// Pull the short id out of an "  ID: xxx" output line
fn printed_id(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID: ").map(str::to_string))
        .expect("command printed an id")
}

#[test]
fn records_and_lists_transactions() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;

    fintrack(dir.path())?
        .args(["txn", "add", "Paycheck", "2500", "-k", "income", "-c", "Salary", "-d", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded transaction: 2024-03-01 Paycheck $2500.00"));

    fintrack(dir.path())?
        .args(["txn", "add", "Groceries", "120.50", "-c", "Food", "-d", "2024-03-04"])
        .assert()
        .success();

    fintrack(dir.path())?
        .args(["txn", "list", "-m", "2024-03"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Paycheck")
                .and(predicate::str::contains("Groceries"))
                .and(predicate::str::contains("2 transaction(s), net $2379.50")),
        );

    fintrack(dir.path())?
        .args(["txn", "list", "-m", "2024-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));

    Ok(())
}

#[test]
fn rejects_zero_amount() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;

    fintrack(dir.path())?
        .args(["txn", "add", "Nothing", "0", "-d", "2024-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than zero"));

    Ok(())
}

#[test]
fn transaction_realizes_matching_forecast() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;

    fintrack(dir.path())?
        .args(["forecast", "add", "Rent", "1000", "-c", "Housing", "-d", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added forecast: Rent $1000.00"));

    fintrack(dir.path())?
        .args(["txn", "add", "Rent March", "1080", "-c", "Housing", "-d", "2024-03-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Realized forecast: fc-"));

    fintrack(dir.path())?
        .args(["forecast", "list", "--pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No forecasts"));

    fintrack(dir.path())?
        .args(["forecast", "compare", "-m", "2024-03"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Forecast vs Actual: March 2024")
                .and(predicate::str::contains("Housing")),
        );

    Ok(())
}

#[test]
fn transaction_outside_tolerance_leaves_forecast_pending() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;

    fintrack(dir.path())?
        .args(["forecast", "add", "Rent", "1000", "-c", "Housing", "-d", "2024-03-01"])
        .assert()
        .success();

    fintrack(dir.path())?
        .args(["txn", "add", "Rent March", "1200", "-c", "Housing", "-d", "2024-03-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Realized forecast").not());

    fintrack(dir.path())?
        .args(["forecast", "reconcile", "-m", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 forecast(s) matched, 1 were pending"));

    Ok(())
}

#[test]
fn duplicate_category_fails() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;

    fintrack(dir.path())?
        .args(["category", "add", "Travel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense category: Travel"));

    fintrack(dir.path())?
        .args(["category", "add", "Salary", "-k", "income"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category already exists: Salary"));

    fintrack(dir.path())?
        .args(["category", "list", "-k", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Travel").and(predicate::str::contains("Salary").not()));

    Ok(())
}

#[test]
fn goal_progress_tracks_month_spending() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;

    let added = fintrack(dir.path())?
        .args(["goal", "add", "Groceries budget", "500", "-k", "expense", "-m", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense budget for March 2024"));
    let goal_id = printed_id(&added.get_output().stdout);

    fintrack(dir.path())?
        .args(["txn", "add", "Market", "200", "-c", "Food", "-d", "2024-03-10"])
        .assert()
        .success();

    fintrack(dir.path())?
        .args(["goal", "progress", &goal_id])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Current:   $200.00")
                .and(predicate::str::contains("Remaining: $300.00"))
                .and(predicate::str::contains("40%")),
        );

    fintrack(dir.path())?
        .args(["goal", "progress", "goal-ffffffff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Goal not found"));

    Ok(())
}

#[test]
fn reports_distribution_and_years() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;

    for (name, amount, category) in [("Rent", "900", "Housing"), ("Bus", "100", "Transport")] {
        fintrack(dir.path())?
            .args(["txn", "add", name, amount, "-c", category, "-d", "2023-11-05"])
            .assert()
            .success();
    }

    fintrack(dir.path())?
        .args(["report", "distribution", "-m", "2023-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Housing").and(predicate::str::contains("90.0%")));

    fintrack(dir.path())?
        .args(["report", "years"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2023\n"));

    Ok(())
}

#[test]
fn config_shows_data_directory() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;

    fintrack(dir.path())?
        .arg("config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Match tolerance:      10%")
                .and(predicate::str::contains(dir.path().to_string_lossy().as_ref())),
        );

    Ok(())
}
