//! Category CLI commands

use clap::Subcommand;

use crate::display::category::format_category_list;
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{Category, TransactionKind};
use crate::services::FinanceTracker;

use super::args::parse_kind_arg;
use super::ensure;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Only income or only expense categories
        #[arg(short, long, value_parser = parse_kind_arg)]
        kind: Option<TransactionKind>,
    },

    /// Add a category
    Add {
        /// Category name (case-sensitive, must be unique)
        name: String,
        /// income or expense
        #[arg(short, long, default_value = "expense", value_parser = parse_kind_arg)]
        kind: TransactionKind,
    },

    /// Rename a category and/or change its type.
    ///
    /// Existing transactions keep the category name they were recorded with.
    #[command(alias = "edit")]
    Rename {
        /// Current name
        name: String,
        /// New name (defaults to the current name)
        #[arg(short = 'n', long = "to")]
        new_name: Option<String>,
        #[arg(short, long, value_parser = parse_kind_arg)]
        kind: Option<TransactionKind>,
    },

    /// Remove a category
    Remove {
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    tracker: &mut FinanceTracker,
    cmd: CategoryCommands,
) -> FinTrackResult<()> {
    match cmd {
        CategoryCommands::List { kind } => {
            let categories: Vec<Category> = tracker
                .categories()
                .all()
                .iter()
                .filter(|c| kind.map_or(true, |k| c.kind == k))
                .cloned()
                .collect();
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Add { name, kind } => {
            ensure(tracker.categories_mut().add(&name, kind)?, || {
                FinTrackError::Duplicate {
                    entity_type: "Category",
                    identifier: name.clone(),
                }
            })?;
            println!("Added {} category: {}", kind.to_string().to_lowercase(), name.trim());
        }

        CategoryCommands::Rename {
            name,
            new_name,
            kind,
        } => {
            let current_kind = tracker
                .categories()
                .get_kind(&name)
                .ok_or_else(|| FinTrackError::category_not_found(&name))?;
            let new_name = new_name.unwrap_or_else(|| name.clone());
            let kind = kind.unwrap_or(current_kind);

            ensure(
                tracker.categories_mut().update(&name, &new_name, kind)?,
                || FinTrackError::Duplicate {
                    entity_type: "Category",
                    identifier: new_name.clone(),
                },
            )?;
            println!("Updated category: {} -> {} ({})", name, new_name.trim(), kind);
        }

        CategoryCommands::Remove { name } => {
            ensure(tracker.categories_mut().remove(&name)?, || {
                FinTrackError::category_not_found(&name)
            })?;
            println!("Removed category: {}", name);
        }
    }

    Ok(())
}
