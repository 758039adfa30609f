mod recurrence_scope;

pub use recurrence_scope::{scope_query, RecurrenceAction, RecurrenceScope, ScopeChoice};
