//! OAuth scope sets requested when a session authenticates.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Scopes requested by sessions serving accounting reads and writes.
pub const DEFAULT_ACCOUNTING_SCOPES: &[&str] = &[
    "accounting.transactions",
    "accounting.contacts",
    "accounting.settings",
    "accounting.reports.read",
];

/// Scopes requested by sessions serving payroll calls.
pub const DEFAULT_PAYROLL_SCOPES: &[&str] = &[
    "payroll.settings",
    "payroll.employees",
    "payroll.timesheets",
];

/// Scope a session must hold before it may call the payroll employees endpoint.
pub const PAYROLL_EMPLOYEES_SCOPE: &str = "payroll.employees";

/// Which scope profile a handler authenticates with.
///
/// A session authenticated for accounting scopes cannot serve payroll calls,
/// so every handler picks its profile explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionProfile {
    /// Contacts, quotes, tax rates, invoices, organisation.
    Accounting,
    /// Payroll employees.
    Payroll,
}

impl SessionProfile {
    /// Built-in scope set for this profile.
    #[must_use]
    pub fn default_scopes(self) -> ScopeSet {
        match self {
            Self::Accounting => ScopeSet::accounting(),
            Self::Payroll => ScopeSet::payroll(),
        }
    }
}

/// An ordered, de-duplicated set of OAuth scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    /// Default accounting scope set.
    #[must_use]
    pub fn accounting() -> Self {
        DEFAULT_ACCOUNTING_SCOPES.iter().copied().collect()
    }

    /// Default payroll scope set.
    #[must_use]
    pub fn payroll() -> Self {
        DEFAULT_PAYROLL_SCOPES.iter().copied().collect()
    }

    /// Parse a space- or comma-delimited scope string. Blank entries are dropped.
    #[must_use]
    pub fn from_delimited(raw: &str) -> Self {
        raw.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Space-delimited form used in the token request `scope` parameter.
    #[must_use]
    pub fn to_scope_param(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_scope_param())
    }
}
