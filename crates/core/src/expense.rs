//! Expense records, the target of the bulk-import workflow.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fathom_shared::types::{CategoryId, ExpenseId, PaymentMethodId};

/// An expense record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Expense amount.
    pub amount: Decimal,
    /// Date of the underlying transaction.
    pub transaction_date: NaiveDate,
    /// Vendor name.
    pub vendor: String,
    /// Expense category.
    pub category_id: Option<CategoryId>,
    /// Payment method used.
    pub payment_method_id: Option<PaymentMethodId>,
    /// Short description.
    pub description: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Normalized tags (lower-case, no duplicates, first-seen order).
    pub tags: Vec<String>,
    /// Deductible for tax purposes.
    pub tax_deductible: bool,
    /// Reimbursable to an employee.
    pub reimbursable: bool,
    /// Billable to a client.
    pub billable: bool,
}

/// Normalizes a set of raw tag inputs.
///
/// Tags are lower-cased and trimmed, empties are dropped, and duplicates are
/// removed. Order is insignificant for matching but first-seen order is
/// preserved for display.
#[must_use]
pub fn normalize_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let normalized = tag.as_ref().trim().to_lowercase();
        if !normalized.is_empty() && !tags.contains(&normalized) {
            tags.push(normalized);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(
            normalize_tags(["  Travel ", "SOFTWARE"]),
            vec!["travel", "software"]
        );
    }

    #[test]
    fn test_normalize_dedupes_preserving_order() {
        assert_eq!(
            normalize_tags(["office", "Travel", "OFFICE", "travel", "meals"]),
            vec!["office", "travel", "meals"]
        );
    }

    #[test]
    fn test_normalize_drops_empties() {
        assert_eq!(normalize_tags(["", "  ", "one"]), vec!["one"]);
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize_tags(Vec::<String>::new()).is_empty());
    }
}
