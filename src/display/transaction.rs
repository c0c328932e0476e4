//! Transaction display formatting

use tabled::Tabled;

use crate::models::{Money, Transaction};

use super::{render_table, truncate};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format transactions as a register, with a total line underneath.
///
/// Expenses are shown negative.
pub fn format_transaction_list(transactions: &[&Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut total = Money::zero();
    let rows = transactions
        .iter()
        .map(|txn| {
            let amount = if txn.entry.is_expense() {
                -txn.entry.amount
            } else {
                txn.entry.amount
            };
            total += amount;
            TransactionRow {
                id: txn.id.to_string(),
                date: txn.entry.date.format("%Y-%m-%d").to_string(),
                name: truncate(&txn.entry.name, 30),
                category: txn.entry.category_label().to_string(),
                amount: amount.to_string(),
            }
        })
        .collect();

    let mut output = render_table(rows);
    output.push_str(&format!(
        "{} transaction(s), net {}\n",
        transactions.len(),
        total
    ));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Full ID:  {}\n", txn.id.as_uuid()));
    output.push_str(&format!("  Name:     {}\n", txn.entry.name));
    output.push_str(&format!("  Date:     {}\n", txn.entry.date.format("%Y-%m-%d")));
    output.push_str(&format!("  Type:     {}\n", txn.entry.kind));
    output.push_str(&format!("  Amount:   {}\n", txn.entry.amount));
    match &txn.entry.category {
        Some(category) => output.push_str(&format!("  Category: {}\n", category)),
        None => output.push_str("  Category: (uncategorized)\n"),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionEntry, TransactionKind};
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, units: i64) -> Transaction {
        Transaction::new(
            TransactionEntry::new(
                "Groceries",
                Money::from_units(units),
                kind,
                NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            )
            .with_category("Food"),
        )
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_transaction_list(&[]), "No transactions found.\n");
    }

    #[test]
    fn test_format_list_shows_signed_total() {
        let income = txn(TransactionKind::Income, 100);
        let expense = txn(TransactionKind::Expense, 40);
        let output = format_transaction_list(&[&income, &expense]);

        assert!(output.contains("2024-03-09"));
        assert!(output.contains("-$40.00"));
        assert!(output.contains("2 transaction(s), net $60.00"));
    }

    #[test]
    fn test_format_details() {
        let t = txn(TransactionKind::Expense, 40);
        let output = format_transaction_details(&t);
        assert!(output.contains("Category: Food"));
        assert!(output.contains("Amount:   $40.00"));
    }
}
