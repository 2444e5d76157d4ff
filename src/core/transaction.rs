//! The transaction record and the inputs used to create or change one.

use crate::core::category::Category;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Canonical stored date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date layouts accepted on input besides RFC 3339 timestamps.
const INPUT_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

// Older data may carry numeric ids; they are kept as their decimal text.
impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Integer(n) => n.to_string(),
        };
        if id.trim().is_empty() {
            return Err(serde::de::Error::custom("transaction id is empty"));
        }
        Ok(Self(id))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    Expense,
    Income,
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Kind::Expense => "expense",
                Kind::Income => "income",
            }
        )
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Kind::Expense),
            "income" => Ok(Kind::Income),
            _ => Err(format!("Invalid kind: {s} (expected expense or income)")),
        }
    }
}

/// A single recorded expense or income event.
///
/// Deserialization is lenient so that data written by older versions still
/// loads: amounts may be numeric strings (anything non-numeric reads as zero),
/// and a missing category, kind, description or date takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Category,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_kind")]
    pub kind: Kind,
}

impl Transaction {
    pub fn new(
        id: impl Into<TransactionId>,
        description: &str,
        amount: f64,
        category: Category,
        date: &str,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.to_string(),
            amount,
            category,
            date: date.to_string(),
            kind: Kind::Expense,
        }
    }

    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns true if `date` is a well-formed `YYYY-MM-DD` calendar date.
    pub fn has_valid_date(&self) -> bool {
        self.date.len() == 10 && NaiveDate::parse_from_str(&self.date, DATE_FORMAT).is_ok()
    }

    /// The `YYYY-MM` key of the record, if its date is valid.
    pub fn year_month(&self) -> Option<&str> {
        if self.has_valid_date() {
            self.date.get(..7)
        } else {
            None
        }
    }
}

impl From<String> for TransactionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(amount.filter(|a| a.is_finite()).unwrap_or(0.0))
}

fn lenient_category<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Category, D::Error> {
    let tag: Option<String> = Option::deserialize(deserializer)?;
    Ok(tag.map(Category::from).unwrap_or_default())
}

fn lenient_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Kind, D::Error> {
    let kind: Option<String> = Option::deserialize(deserializer)?;
    Ok(kind.and_then(|k| k.parse().ok()).unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("description is empty")]
    EmptyDescription,
    #[error("amount is missing")]
    MissingAmount,
    #[error("amount is not a number: {0}")]
    NonNumericAmount(String),
    #[error("category is missing")]
    MissingCategory,
    #[error("date is missing")]
    MissingDate,
    #[error("date is not a valid calendar date: {0}")]
    InvalidDate(String),
}

/// User input for a new transaction, as entered.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub kind: Kind,
}

impl TransactionDraft {
    /// Validates every field and builds the record under the given id.
    pub fn into_transaction(self, id: TransactionId) -> Result<Transaction, ValidationError> {
        Ok(Transaction {
            id,
            description: validate_description(&self.description)?,
            amount: parse_amount(&self.amount)?,
            category: validate_category(&self.category)?,
            date: normalize_date(&self.date)?,
            kind: self.kind,
        })
    }
}

/// A partial update. Fields left as `None` keep their current value.
#[derive(Debug, Clone)]
pub struct TransactionPatch {
    pub id: TransactionId,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub kind: Option<Kind>,
}

impl TransactionPatch {
    pub fn new(id: impl Into<TransactionId>) -> Self {
        Self {
            id: id.into(),
            description: None,
            amount: None,
            category: None,
            date: None,
            kind: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.kind.is_none()
    }

    /// Merges the patch over `current`, validating only the supplied fields.
    pub fn apply(&self, current: &Transaction) -> Result<Transaction, ValidationError> {
        let mut updated = current.clone();
        if let Some(description) = &self.description {
            updated.description = validate_description(description)?;
        }
        if let Some(amount) = &self.amount {
            updated.amount = parse_amount(amount)?;
        }
        if let Some(category) = &self.category {
            updated.category = validate_category(category)?;
        }
        if let Some(date) = &self.date {
            updated.date = normalize_date(date)?;
        }
        if let Some(kind) = self.kind {
            updated.kind = kind;
        }
        Ok(updated)
    }
}

fn validate_description(description: &str) -> Result<String, ValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

/// Parses user-entered amount text. Non-numeric and non-finite values are rejected.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingAmount);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| ValidationError::NonNumericAmount(trimmed.to_string()))
}

fn validate_category(category: &str) -> Result<Category, ValidationError> {
    if category.trim().is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    Ok(Category::from(category))
}

/// Normalizes a user-supplied date to the canonical local `YYYY-MM-DD` form.
pub fn normalize_date(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDate);
    }

    let date = INPUT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.with_timezone(&Local).date_naive())
        })
        .ok_or_else(|| ValidationError::InvalidDate(trimmed.to_string()))?;

    Ok(date.format(DATE_FORMAT).to_string())
}
