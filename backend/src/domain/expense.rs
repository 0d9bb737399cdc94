//! Expense data model and its command/query values.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Maximum description length in characters.
pub const DESCRIPTION_MAX: usize = 255;

/// Validation errors returned by the expense value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("expense id must be a valid UUID")]
    InvalidId,
}

/// Stable expense identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Parse an identifier from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ExpenseValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ExpenseValidationError::InvalidId)
    }

    /// Generate a new random [`ExpenseId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text description, trimmed and bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ExpenseValidationError> {
        let normalized = raw.as_ref().trim();
        if normalized.is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if normalized.chars().count() > DESCRIPTION_MAX {
            return Err(ExpenseValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl TryFrom<String> for Description {
    type Error = ExpenseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Monetary amount in minor units (cents). Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Amount(i64);

impl Amount {
    pub const fn new(cents: i64) -> Result<Self, ExpenseValidationError> {
        if cents <= 0 {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        Ok(Self(cents))
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl From<Amount> for i64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = ExpenseValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A single expense owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    id: ExpenseId,
    user_id: UserId,
    description: Description,
    amount: Amount,
    date: NaiveDate,
}

impl Expense {
    #[must_use]
    pub const fn new(
        id: ExpenseId,
        user_id: UserId,
        description: Description,
        amount: Amount,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            user_id,
            description,
            amount,
            date,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ExpenseId {
        &self.id
    }

    /// Owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }

    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    /// Calendar date the expense was incurred on.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Command: record an expense for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddExpenseCommand {
    pub user_id: UserId,
    pub description: String,
    pub amount_cents: i64,
    pub date: NaiveDate,
}

/// Query: fetch one of a user's expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetExpenseQuery {
    pub user_id: UserId,
    pub expense_id: ExpenseId,
}
