//! How far an edit or delete reaches across a recurring series.
//!
//! The backend interprets the scope; this side only picks a value and
//! decides whether the choice is offered at all.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use crate::transactions::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurrenceScope {
    /// Only the selected occurrence.
    #[default]
    CurrentOnly,
    /// The selected occurrence and every later one.
    CurrentAndFuture,
    /// The whole series.
    All,
}

impl RecurrenceScope {
    pub fn as_str(self) -> &'static str {
        match self {
            RecurrenceScope::CurrentOnly => "CURRENT_ONLY",
            RecurrenceScope::CurrentAndFuture => "CURRENT_AND_FUTURE",
            RecurrenceScope::All => "ALL",
        }
    }
}

impl fmt::Display for RecurrenceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CURRENT_ONLY" => Ok(RecurrenceScope::CurrentOnly),
            "CURRENT_AND_FUTURE" => Ok(RecurrenceScope::CurrentAndFuture),
            "ALL" => Ok(RecurrenceScope::All),
            other => Err(ValidationError::InvalidRecurrenceScope(other.to_string()).into()),
        }
    }
}

/// Mutation a scope is being chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceAction {
    Edit,
    Delete,
}

/// The scope to use and whether the user may change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeChoice {
    pub scope: RecurrenceScope,
    pub selectable: bool,
}

impl ScopeChoice {
    /// Resolves the scope for `tx`.
    ///
    /// Transactions outside a series always get `CURRENT_ONLY` and the
    /// selector is disabled, whatever was requested.
    pub fn for_transaction(tx: &Transaction, requested: Option<RecurrenceScope>) -> Self {
        if tx.is_recurring() {
            Self {
                scope: requested.unwrap_or_default(),
                selectable: true,
            }
        } else {
            Self {
                scope: RecurrenceScope::CurrentOnly,
                selectable: false,
            }
        }
    }
}

/// Scope to send as `recurrenceScope`, if any.
///
/// DELETE always carries the parameter; PATCH omits it for transactions that
/// are not part of a series.
pub fn scope_query(
    tx: &Transaction,
    requested: Option<RecurrenceScope>,
    action: RecurrenceAction,
) -> Option<RecurrenceScope> {
    let choice = ScopeChoice::for_transaction(tx, requested);
    match action {
        RecurrenceAction::Delete => Some(choice.scope),
        RecurrenceAction::Edit if choice.selectable => Some(choice.scope),
        RecurrenceAction::Edit => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::TransactionType;
    use chrono::NaiveDate;

    fn tx(recurrence: Option<&str>, parent: Option<&str>) -> Transaction {
        Transaction {
            id: "tx-1".to_string(),
            user_id: "user-1".to_string(),
            label: "Gym".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            value: 30.0,
            transaction_type: TransactionType::Subscription,
            category_id: None,
            goal_id: None,
            recurrence: recurrence.map(str::to_string),
            is_paid: None,
            parent_transaction_id: parent.map(str::to_string),
            occurrence_number: None,
        }
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(
            serde_json::to_string(&RecurrenceScope::CurrentAndFuture).unwrap(),
            "\"CURRENT_AND_FUTURE\""
        );
        assert_eq!("ALL".parse::<RecurrenceScope>().unwrap(), RecurrenceScope::All);
        assert!("all".parse::<RecurrenceScope>().is_err());
        assert_eq!(RecurrenceScope::default(), RecurrenceScope::CurrentOnly);
    }

    #[test]
    fn test_non_recurring_disables_selection() {
        let single = tx(None, None);
        let choice = ScopeChoice::for_transaction(&single, Some(RecurrenceScope::All));
        assert_eq!(choice.scope, RecurrenceScope::CurrentOnly);
        assert!(!choice.selectable);

        assert_eq!(
            scope_query(&single, Some(RecurrenceScope::All), RecurrenceAction::Delete),
            Some(RecurrenceScope::CurrentOnly)
        );
        assert_eq!(
            scope_query(&single, Some(RecurrenceScope::All), RecurrenceAction::Edit),
            None
        );
    }

    #[test]
    fn test_recurring_passes_choice_through() {
        let monthly = tx(Some("MONTHLY"), None);
        let choice = ScopeChoice::for_transaction(&monthly, None);
        assert_eq!(choice.scope, RecurrenceScope::CurrentOnly);
        assert!(choice.selectable);

        let occurrence = tx(None, Some("tx-0"));
        assert_eq!(
            scope_query(
                &occurrence,
                Some(RecurrenceScope::CurrentAndFuture),
                RecurrenceAction::Edit
            ),
            Some(RecurrenceScope::CurrentAndFuture)
        );
    }
}
