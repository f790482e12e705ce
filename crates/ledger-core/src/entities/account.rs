//! Account entity - a checking, savings, credit, or investment account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{AccountId, UserId};

/// Kind of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    #[default]
    Checking,
    Savings,
    Credit,
    Investment,
    Cash,
    Loan,
}

impl AccountKind {
    /// Database representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Credit => "credit",
            Self::Investment => "investment",
            Self::Cash => "cash",
            Self::Loan => "loan",
        }
    }

    /// Liabilities count negatively toward net worth
    #[must_use]
    pub fn is_liability(self) -> bool {
        matches!(self, Self::Credit | Self::Loan)
    }
}

impl From<&str> for AccountKind {
    fn from(value: &str) -> Self {
        match value {
            "savings" => Self::Savings,
            "credit" => Self::Credit,
            "investment" => Self::Investment,
            "cash" => Self::Cash,
            "loan" => Self::Loan,
            _ => Self::Checking,
        }
    }
}

/// Account entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub user_id: UserId,
    pub name: String,
    pub kind: AccountKind,
    /// Current balance in minor units (cents)
    pub balance_cents: i64,
    /// Display order chosen by the user
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account
    #[must_use]
    pub fn new(user_id: UserId, name: String, kind: AccountKind, balance_cents: i64) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            user_id,
            name,
            kind,
            balance_cents,
            position: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Contribution of this account to net worth
    #[must_use]
    pub fn net_worth_cents(&self) -> i64 {
        if self.kind.is_liability() {
            -self.balance_cents.abs()
        } else {
            self.balance_cents
        }
    }
}

/// Column-wise patch for an account; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub kind: Option<AccountKind>,
    pub balance_cents: Option<i64>,
}

impl AccountChanges {
    /// Apply to an in-memory copy
    pub fn apply(&self, account: &mut Account) {
        if let Some(name) = &self.name {
            account.name.clone_from(name);
        }
        if let Some(kind) = self.kind {
            account.kind = kind;
        }
        if let Some(balance) = self.balance_cents {
            account.balance_cents = balance;
        }
    }
}
