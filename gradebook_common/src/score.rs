use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::{
    database::{HasArguments, HasValueRef},
    encode::IsNull,
    error::BoxDynError,
    sqlite::SqliteTypeInfo,
    Decode,
    Encode,
    Sqlite,
    Type,
};
use thiserror::Error;

/// Grades at or above this value are a pass.
pub const PASSING_SCORE: i64 = 6;

//--------------------------------------       Score         ---------------------------------------------------------
/// A decimal grade value.
///
/// Scores are stored as TEXT so that no precision is lost in the database, and are rendered as exact JSON numbers
/// (never via `f64`), so a client comparing `calificacion` against the pass mark reaches the same verdict as
/// [`Score::is_passing`]. Whole numbers are rendered with one decimal place (`6.0`).
/// No range is enforced; whatever the grading workflow recorded is reported back as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(Decimal);

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a score: {0}")]
pub struct ScoreConversionError(String);

impl Score {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// `true` iff the score meets the fixed pass threshold of [`PASSING_SCORE`].
    pub fn is_passing(&self) -> bool {
        self.0 >= Decimal::from(PASSING_SCORE)
    }
}

impl From<Decimal> for Score {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Score {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for Score {
    type Err = ScoreConversionError;

    /// Accepts plain decimals and the exponent form SQLite uses when rendering REAL values (`1.0e-05`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Decimal::from_str(value)
            .or_else(|_| Decimal::from_scientific(value))
            .map(Self)
            .map_err(|e| ScoreConversionError(format!("{s}: {e}")))
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut value = self.0;
        if value.scale() == 0 {
            value.rescale(1);
        }
        rust_decimal::serde::arbitrary_precision::serialize(&value, serializer)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::arbitrary_precision::deserialize(deserializer).map(Self)
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Type<Sqlite> for Score {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <String as Type<Sqlite>>::compatible(ty)
            || <f64 as Type<Sqlite>>::compatible(ty)
            || <i64 as Type<Sqlite>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Sqlite> for Score {
    fn decode(value: <Sqlite as HasValueRef<'r>>::ValueRef) -> Result<Self, BoxDynError> {
        let text = <&str as Decode<Sqlite>>::decode(value)?;
        let score = Score::from_str(text)?;
        Ok(score)
    }
}

impl<'q> Encode<'q, Sqlite> for Score {
    fn encode_by_ref(&self, buf: &mut <Sqlite as HasArguments<'q>>::ArgumentBuffer) -> IsNull {
        <String as Encode<'q, Sqlite>>::encode(self.0.to_string(), buf)
    }
}
