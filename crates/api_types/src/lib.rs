use serde::{Deserialize, Deserializer, Serialize};

pub use rust_decimal::Decimal;

/// Envelope returned by every list endpoint.
///
/// `next` and `previous` are full URLs. Treat them as opaque cursors and pass
/// them back verbatim to fetch the neighbouring page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> Paginated<T> {
    /// Maps the results while keeping the cursors untouched.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub mod account_type {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct AccountType {
        pub id: i64,
        pub name: String,
        /// Assigned by the backend. Used instead of `id` in update/delete URLs.
        pub slug: String,
        pub is_default: bool,
        #[serde(default, deserialize_with = "null_as_empty")]
        pub description: String,
    }

    /// Request body for create and update (always the full field set).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct AccountTypeInput {
        pub name: String,
        pub is_default: bool,
        pub description: String,
    }
}

pub mod account {
    use super::*;
    use crate::account_type::AccountType;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Account {
        pub id: i64,
        pub balance: Decimal,
        pub account_type: AccountType,
        /// Denormalized display name of `account_type`.
        pub account_type_name: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct AccountInput {
        /// Account type id. The only writable reference on an account.
        pub account_type: i64,
        pub balance: Decimal,
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Category {
        pub id: i64,
        pub name: String,
        #[serde(default, deserialize_with = "null_as_empty")]
        pub description: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryInput {
        pub name: String,
        pub description: String,
    }
}

pub mod transaction {
    use chrono::NaiveDate;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: i64,
        /// Account id.
        pub account: i64,
        #[serde(default, deserialize_with = "null_as_empty")]
        pub account_name: String,
        pub amount: Decimal,
        /// Free text on the wire (`income`, `expense`, ...); the backend owns
        /// the accepted set.
        pub transaction_type: String,
        #[serde(deserialize_with = "date_prefix")]
        pub date: NaiveDate,
        #[serde(default, deserialize_with = "null_as_empty")]
        pub description: String,
        pub category: Option<i64>,
        #[serde(default)]
        pub category_name: Option<String>,
    }

    /// Accepts `YYYY-MM-DD` or a full timestamp and keeps its calendar date.
    fn date_prefix<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let date = raw.get(..10).unwrap_or(&raw);
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(serde::de::Error::custom)
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionInput {
        pub account: i64,
        pub amount: Decimal,
        pub transaction_type: String,
        pub date: NaiveDate,
        pub description: String,
        pub category: Option<i64>,
    }
}
