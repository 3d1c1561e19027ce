use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::Type;
use thiserror::Error;

//--------------------------------------     TokenAmount     ---------------------------------------------------------
/// A non-negative decimal amount, kept as text so that wei-sized integers and fixed-point prices survive without any
/// loss of precision. The original formatting is preserved verbatim, so `"10.00"` stays `"10.00"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize)]
#[sqlx(transparent)]
pub struct TokenAmount(String);

#[derive(Debug, Clone, Error)]
#[error("Value is not a valid token amount: {0}")]
pub struct TokenAmountConversionError(String);

impl TokenAmount {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for TokenAmount {
    type Err = TokenAmountConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, fraction) = match s.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (s, None),
        };
        let digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
        if !digits(whole) || fraction.is_some_and(|f| !digits(f)) {
            return Err(TokenAmountConversionError(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for TokenAmount {
    type Error = TokenAmountConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        let input = AmountInput::deserialize(deserializer)?;
        input.into_text().parse().map_err(serde::de::Error::custom)
    }
}

//--------------------------------------     AmountInput     ---------------------------------------------------------
/// Amounts arrive from browser clients either as JSON strings or as bare numbers. `AmountInput` accepts both so that
/// validation can happen later with a meaningful error message.
///
/// Only string amounts are kept verbatim. A JSON number goes through `serde_json::Number`, so `10.00` becomes `"10.0"`
/// and integers beyond `u64` (e.g. `1000000000000000000000`) come out in exponent form, which [`TokenAmount`] rejects.
/// Clients that need exact formatting or wei-sized values must send strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Text(String),
    Number(serde_json::Number),
}

impl AmountInput {
    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
