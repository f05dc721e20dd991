//! Billing month key type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`MonthKey`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum MonthKeyError {
    /// The input string is empty.
    #[error("month cannot be empty")]
    Empty,
    /// The input is not in `YYYY-MM` form.
    #[error("month must be in YYYY-MM form")]
    BadFormat,
    /// The month number is outside 01-12.
    #[error("month number must be between 01 and 12")]
    MonthOutOfRange,
}

/// A billing period key in `YYYY-MM` form.
///
/// Month keys identify the billing period a customer record belongs to and
/// double as the grouping key for monthly balance reports. The string form
/// sorts lexicographically in chronological order, so "most recent first"
/// is a plain descending sort.
///
/// ## Constraints
///
/// - Exactly 7 characters: four year digits, a hyphen, two month digits
/// - Month number between 01 and 12
///
/// ## Examples
///
/// ```
/// use wavelink_core::MonthKey;
///
/// assert!(MonthKey::parse("2024-03").is_ok());
///
/// assert!(MonthKey::parse("").is_err());        // empty
/// assert!(MonthKey::parse("2024-3").is_err());  // missing zero padding
/// assert!(MonthKey::parse("2024-13").is_err()); // month out of range
/// assert!(MonthKey::parse("202403").is_err());  // no separator
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    /// Parse a `MonthKey` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not exactly `YYYY-MM` (four digits, hyphen, two digits)
    /// - Has a month number outside 01-12
    pub fn parse(s: &str) -> Result<Self, MonthKeyError> {
        if s.is_empty() {
            return Err(MonthKeyError::Empty);
        }

        let Some((year, month)) = s.split_once('-') else {
            return Err(MonthKeyError::BadFormat);
        };

        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MonthKeyError::BadFormat);
        }

        if month.len() != 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MonthKeyError::BadFormat);
        }

        let month_num: u8 = month.parse().map_err(|_| MonthKeyError::BadFormat)?;
        if !(1..=12).contains(&month_num) {
            return Err(MonthKeyError::MonthOutOfRange);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the month key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `MonthKey` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<MonthKey> for String {
    fn from(month: MonthKey) -> Self {
        month.0
    }
}

impl AsRef<str> for MonthKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for MonthKey {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for MonthKey {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for MonthKey {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
