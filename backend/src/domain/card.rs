//! Cash card data model.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use pagination::Sort;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::PrincipalId;

/// Number of decimal places every stored amount is held at.
const AMOUNT_SCALE: u32 = 2;

/// Largest accepted amount magnitude.
///
/// Amounts are exchanged as JSON numbers; within this bound a two-place
/// decimal survives the float round-trip with its digits intact.
pub const AMOUNT_MAGNITUDE_LIMIT: i64 = 1_000_000_000_000;

/// Validation errors returned by the card constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    NonFiniteAmount,
    AmountPrecisionTooFine { max_places: u32 },
    AmountOutOfRange { limit: i64 },
}

impl fmt::Display for CardValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteAmount => write!(f, "amount must be a finite number"),
            Self::AmountPrecisionTooFine { max_places } => {
                write!(f, "amount must have at most {max_places} decimal places")
            }
            Self::AmountOutOfRange { limit } => {
                write!(f, "amount magnitude must not exceed {limit}")
            }
        }
    }
}

impl std::error::Error for CardValidationError {}

/// Stable card identifier assigned by the store.
///
/// Identifiers come from a single global sequence: they are unique across all
/// owners and never reused once a card is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(i64);

impl CardId {
    /// Wrap a raw identifier value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw identifier value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signed currency amount held at exactly two decimal places.
///
/// ## Invariants
/// - At most two decimal places of precision; `123.456` is rejected rather
///   than rounded.
/// - Magnitude bounded by [`AMOUNT_MAGNITUDE_LIMIT`] so the JSON number form
///   round-trips exactly: `123.45` never becomes `123.4` or `123.450001`.
///
/// # Examples
/// ```
/// use backend::domain::Amount;
///
/// let amount = Amount::try_from(123.45).expect("two decimal places");
/// assert_eq!(amount.to_string(), "123.45");
/// assert!(Amount::try_from(123.456).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(Decimal);

impl Amount {
    /// Validate and construct an [`Amount`] from a decimal value.
    pub fn new(amount: Decimal) -> Result<Self, CardValidationError> {
        let normalized = amount.normalize();
        if normalized.scale() > AMOUNT_SCALE {
            return Err(CardValidationError::AmountPrecisionTooFine {
                max_places: AMOUNT_SCALE,
            });
        }
        if normalized.abs() > Decimal::from(AMOUNT_MAGNITUDE_LIMIT) {
            return Err(CardValidationError::AmountOutOfRange {
                limit: AMOUNT_MAGNITUDE_LIMIT,
            });
        }

        let mut rescaled = normalized;
        rescaled.rescale(AMOUNT_SCALE);
        Ok(Self(rescaled))
    }

    /// The underlying decimal value, always at two decimal places.
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = CardValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(CardValidationError::NonFiniteAmount);
        }

        // The shortest round-trip rendering recovers the digits the client
        // wrote, so `123.45` parses as the decimal 123.45 rather than the
        // nearest binary float expansion.
        let text = value.to_string();
        let decimal = Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|_| CardValidationError::AmountOutOfRange {
                limit: AMOUNT_MAGNITUDE_LIMIT,
            })?;
        Self::new(decimal)
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        // Total for two-place decimals within the magnitude bound.
        value.0.to_f64().unwrap_or_default()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sort keys accepted by card listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardSortKey {
    /// Order by card identifier.
    #[default]
    Id,
    /// Order by amount.
    Amount,
}

impl FromStr for CardSortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "amount" => Ok(Self::Amount),
            _ => Err(()),
        }
    }
}

/// A cash card owned by exactly one principal.
///
/// ## Invariants
/// - `id` and `owner` are immutable once the card exists; only the amount
///   may change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CashCard {
    id: CardId,
    amount: Amount,
    owner: PrincipalId,
}

impl CashCard {
    /// Build a card from validated components.
    pub fn new(id: CardId, amount: Amount, owner: PrincipalId) -> Self {
        Self { id, amount, owner }
    }

    /// Stable card identifier.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Current amount.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Principal the card belongs to.
    pub fn owner(&self) -> &PrincipalId {
        &self.owner
    }

    /// Replace the amount, leaving id and owner untouched.
    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }

    /// Total order used by listings.
    ///
    /// The requested key orders first; ties always fall back to ascending id
    /// so paging windows never skip or duplicate a card across consecutive
    /// requests on an unchanged dataset.
    pub fn listing_order(&self, other: &Self, sort: Sort<CardSortKey>) -> Ordering {
        let primary = match sort.key() {
            CardSortKey::Id => self.id.cmp(&other.id),
            CardSortKey::Amount => self.amount.cmp(&other.amount),
        };
        sort.direction()
            .apply(primary)
            .then_with(|| self.id.cmp(&other.id))
    }
}
