//! Type-safe price representation.
//!
//! Prices are Indonesian rupiah, which has no minor unit in practice, so
//! the amount is a plain integer. Formatting uses comma thousands grouping
//! (`Rp 50,000`), matching what the checkout message sends to the buyer.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A price in whole rupiah.
///
/// ## Examples
///
/// ```
/// use warung_core::Price;
///
/// let price = Price::new(50000);
/// assert_eq!(price.formatted(), "Rp 50,000");
/// assert_eq!((price * 2).formatted(), "Rp 100,000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Create a new price from a rupiah amount.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the underlying rupiah amount.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Format for display with the `Rp` prefix and thousands grouping.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("Rp {}", group_thousands(self.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

impl std::ops::Mul<i64> for Price {
    type Output = Self;

    fn mul(self, quantity: i64) -> Self {
        Self(self.0 * quantity)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(feature = "postgres")]
impl ::sqlx::Type<::sqlx::Postgres> for Price {
    fn type_info() -> ::sqlx::postgres::PgTypeInfo {
        <i64 as ::sqlx::Type<::sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for Price {
    fn decode(
        value: ::sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, ::sqlx::error::BoxDynError> {
        let amount = <i64 as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl ::sqlx::Encode<'_, ::sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut ::sqlx::postgres::PgArgumentBuffer,
    ) -> Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
        <i64 as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

/// Insert comma separators every three digits.
fn group_thousands(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
