use std::fmt;

use serde_json::{Map, Value};

use super::{
    amount::{CurrencyAmount, json_codec, required_str},
    error::DecodeError,
    grammar::{check_currency, check_issuer},
};

/// Currency identity of an issued token, without any quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssuedAsset {
    pub currency: String,
    pub issuer: String,
}

impl IssuedAsset {
    pub fn new(
        currency: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Result<Self, DecodeError> {
        let asset = Self {
            currency: currency.into(),
            issuer: issuer.into(),
        };
        asset.validate()?;
        Ok(asset)
    }

    pub fn validate(&self) -> Result<(), DecodeError> {
        check_currency(&self.currency)?;
        check_issuer(&self.issuer)
    }

    pub fn decode(node: &Value) -> Result<Self, DecodeError> {
        match Asset::decode(node)? {
            Asset::Token(asset) => Ok(asset),
            Asset::Xrp => Err(DecodeError::malformed("expected an issued asset, found XRP")),
        }
    }

    pub fn encode(&self) -> Result<Value, DecodeError> {
        self.validate()?;

        let mut fields = Map::new();
        fields.insert("currency".into(), Value::String(self.currency.clone()));
        fields.insert("issuer".into(), Value::String(self.issuer.clone()));
        Ok(Value::Object(fields))
    }
}

impl fmt::Display for IssuedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.currency, self.issuer)
    }
}

/// Asset descriptor used by lookups such as `amm_info` and `book_offers`.
///
/// Unlike amount fields these never use the bare-string shorthand: XRP is
/// `{"currency": "XRP"}` (or `{}`), a token is `{"currency", "issuer"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Asset {
    Xrp,
    Token(IssuedAsset),
}

impl Asset {
    pub fn token(
        currency: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Result<Self, DecodeError> {
        IssuedAsset::new(currency, issuer).map(Asset::Token)
    }

    pub fn is_xrp(&self) -> bool {
        matches!(self, Asset::Xrp)
    }

    pub fn decode(node: &Value) -> Result<Self, DecodeError> {
        match node {
            Value::Object(fields) => Self::from_object(fields),
            other => Err(DecodeError::shape("asset object", other)),
        }
    }

    pub fn encode(&self) -> Result<Value, DecodeError> {
        match self {
            Asset::Xrp => {
                let mut fields = Map::new();
                fields.insert("currency".into(), Value::String("XRP".into()));
                Ok(Value::Object(fields))
            }
            Asset::Token(asset) => asset.encode(),
        }
    }

    fn from_object(fields: &Map<String, Value>) -> Result<Self, DecodeError> {
        if fields.contains_key("value") {
            return Err(DecodeError::UnexpectedShape {
                expected: "asset object",
                found: "amount object",
            });
        }

        let has_issuer = fields.contains_key("issuer");
        match fields.get("currency") {
            None if has_issuer => Err(DecodeError::malformed("issuer given without currency")),
            None => Ok(Asset::Xrp),
            Some(Value::String(currency)) if currency == "XRP" => {
                if has_issuer {
                    Err(DecodeError::malformed("XRP cannot have an issuer"))
                } else {
                    Ok(Asset::Xrp)
                }
            }
            Some(Value::String(_)) => {
                let currency = required_str(fields, "currency")?;
                let issuer = required_str(fields, "issuer")?;
                IssuedAsset::new(currency, issuer).map(Asset::Token)
            }
            Some(_) => Err(DecodeError::malformed("currency must be a string")),
        }
    }
}

impl From<IssuedAsset> for Asset {
    fn from(asset: IssuedAsset) -> Self {
        Asset::Token(asset)
    }
}

impl From<&CurrencyAmount> for Asset {
    fn from(amount: &CurrencyAmount) -> Self {
        amount.asset()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Xrp => f.write_str("XRP"),
            Asset::Token(asset) => fmt::Display::fmt(asset, f),
        }
    }
}

json_codec!(IssuedAsset, Asset);
