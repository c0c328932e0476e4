//! Category display formatting

use tabled::Tabled;

use crate::models::Category;

use super::render_table;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
}

/// Format categories as a table, in registry order
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let rows = categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            kind: c.kind.to_string(),
        })
        .collect();
    render_table(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    #[test]
    fn test_format_empty() {
        assert!(format_category_list(&[]).contains("No categories found"));
    }

    #[test]
    fn test_format_list() {
        let output = format_category_list(&Category::defaults());
        assert!(output.contains("Salary"));
        assert!(output.contains("Parental Expenses"));
        assert!(output.contains(&TransactionKind::Expense.to_string()));
    }
}
