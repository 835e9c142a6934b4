use std::{fmt, str::FromStr};

use bigdecimal::BigDecimal;
use serde_json::{Map, Value};

use super::{
    asset::{Asset, IssuedAsset},
    error::DecodeError,
    grammar::{check_currency, check_decimal, check_drops, check_issuer, hex_currency_prefix},
};

pub const DROPS_PER_XRP: u64 = 1_000_000;

/// Total XRP ever issued. No amount can exceed it.
pub const MAX_XRP: u64 = 100_000_000_000;

/// Integer digits in `MAX_XRP`.
const MAX_XRP_DIGITS: i64 = 12;

/// Currency prefix rippled gives the share tokens an AMM mints.
const LP_TOKEN_PREFIX: u8 = 0x03;

/// An XRP amount in drops, carried as the integer string the wire uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XrpAmount(pub String);

impl XrpAmount {
    pub fn new(drops: impl Into<String>) -> Result<Self, DecodeError> {
        let drops = drops.into();
        check_drops(&drops)?;
        Ok(Self(drops))
    }

    pub fn from_drops(drops: u64) -> Self {
        Self(drops.to_string())
    }

    /// Converts a decimal XRP figure ("1.5") into drops. Precision finer than
    /// one drop is rejected rather than rounded, as is anything beyond
    /// [`MAX_XRP`].
    pub fn from_xrp(xrp: &str) -> Result<Self, DecodeError> {
        let value = BigDecimal::from_str(xrp)
            .map_err(|e| DecodeError::malformed(format!("invalid XRP amount {xrp:?}: {e}")))?
            .normalized();

        // Bound the magnitude from the digit count and exponent before any
        // rescaling, which is linear in the exponent.
        let (digits, scale) = value.as_bigint_and_exponent();
        let digits = digits.to_string();
        let digit_count = digits.trim_start_matches('-').len() as i64;
        if scale > 6 {
            return Err(DecodeError::malformed(format!(
                "{xrp} XRP is not a whole number of drops"
            )));
        }
        if digits != "0"
            && (digit_count - scale > MAX_XRP_DIGITS || value.abs() > BigDecimal::from(MAX_XRP))
        {
            return Err(DecodeError::malformed(format!(
                "{xrp} XRP exceeds the {MAX_XRP} XRP supply"
            )));
        }

        let drops = value * BigDecimal::from(DROPS_PER_XRP);
        let whole = drops.with_scale(0);
        if whole != drops {
            return Err(DecodeError::malformed(format!(
                "{xrp} XRP is not a whole number of drops"
            )));
        }

        let (digits, _) = whole.into_bigint_and_scale();
        Ok(Self(digits.to_string()))
    }

    pub fn drops(&self) -> &str {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.starts_with('-')
    }

    pub fn to_xrp(&self) -> Result<BigDecimal, DecodeError> {
        check_drops(&self.0)?;
        let drops = BigDecimal::from_str(&self.0)
            .map_err(|e| DecodeError::malformed(format!("invalid drops {:?}: {e}", self.0)))?;
        Ok(drops / BigDecimal::from(DROPS_PER_XRP))
    }

    pub fn decode(node: &Value) -> Result<Self, DecodeError> {
        match node {
            Value::String(drops) => Self::new(drops.as_str()),
            other => Err(DecodeError::shape("drops string", other)),
        }
    }

    pub fn encode(&self) -> Result<Value, DecodeError> {
        check_drops(&self.0)?;
        Ok(Value::String(self.0.clone()))
    }

    pub(crate) fn ensure_non_negative(&self) -> Result<(), DecodeError> {
        if self.is_negative() {
            Err(DecodeError::malformed(format!(
                "negative drops {:?} not allowed in a request",
                self.0
            )))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for XrpAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} drops", self.0)
    }
}

/// A fungible token amount. Every field stays a string: `"0"` and `"0.0"`
/// are different values on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenAmount {
    pub currency: String,
    pub issuer: String,
    pub value: String,
}

impl TokenAmount {
    pub fn new(
        currency: impl Into<String>,
        issuer: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, DecodeError> {
        let amount = Self {
            currency: currency.into(),
            issuer: issuer.into(),
            value: value.into(),
        };
        amount.validate()?;
        Ok(amount)
    }

    pub fn validate(&self) -> Result<(), DecodeError> {
        check_currency(&self.currency)?;
        check_issuer(&self.issuer)?;
        check_decimal(&self.value)
    }

    pub fn asset(&self) -> IssuedAsset {
        IssuedAsset {
            currency: self.currency.clone(),
            issuer: self.issuer.clone(),
        }
    }

    pub fn is_negative(&self) -> bool {
        self.value.starts_with('-')
    }

    pub fn decimal_value(&self) -> Result<BigDecimal, DecodeError> {
        check_decimal(&self.value)?;
        BigDecimal::from_str(&self.value)
            .map_err(|e| DecodeError::malformed(format!("invalid value {:?}: {e}", self.value)))
    }

    pub fn decode(node: &Value) -> Result<Self, DecodeError> {
        match node {
            Value::Object(fields) => Self::from_object(fields),
            other => Err(DecodeError::shape("token amount object", other)),
        }
    }

    pub fn encode(&self) -> Result<Value, DecodeError> {
        self.validate()?;

        let mut fields = Map::new();
        fields.insert("currency".into(), Value::String(self.currency.clone()));
        fields.insert("issuer".into(), Value::String(self.issuer.clone()));
        fields.insert("value".into(), Value::String(self.value.clone()));
        Ok(Value::Object(fields))
    }

    fn from_object(fields: &Map<String, Value>) -> Result<Self, DecodeError> {
        let currency = required_str(fields, "currency")?;
        let issuer = required_str(fields, "issuer")?;
        let value = required_str(fields, "value")?;

        Self::new(currency, issuer, value)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.value, self.currency, self.issuer)
    }
}

/// Any value that can sit in an amount-bearing field (`Amount`, `SendMax`,
/// `TakerPays`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CurrencyAmount {
    Xrp(XrpAmount),
    Token(TokenAmount),
}

impl CurrencyAmount {
    pub fn xrp_drops(drops: u64) -> Self {
        CurrencyAmount::Xrp(XrpAmount::from_drops(drops))
    }

    pub fn token(
        currency: impl Into<String>,
        issuer: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, DecodeError> {
        TokenAmount::new(currency, issuer, value).map(CurrencyAmount::Token)
    }

    /// Reads an amount field. A JSON string is XRP drops, an object is a
    /// token amount; there is no discriminator on the wire.
    pub fn decode(node: &Value) -> Result<Self, DecodeError> {
        match node {
            Value::String(drops) => XrpAmount::new(drops.as_str()).map(CurrencyAmount::Xrp),
            Value::Object(fields) => TokenAmount::from_object(fields).map(CurrencyAmount::Token),
            other => Err(DecodeError::shape("drops string or token object", other)),
        }
    }

    pub fn encode(&self) -> Result<Value, DecodeError> {
        match self {
            CurrencyAmount::Xrp(drops) => drops.encode(),
            CurrencyAmount::Token(token) => token.encode(),
        }
    }

    pub fn is_xrp(&self) -> bool {
        matches!(self, CurrencyAmount::Xrp(_))
    }

    pub fn asset(&self) -> Asset {
        match self {
            CurrencyAmount::Xrp(_) => Asset::Xrp,
            CurrencyAmount::Token(token) => Asset::Token(token.asset()),
        }
    }

    /// Request fields never carry negative values.
    pub(crate) fn ensure_non_negative(&self) -> Result<(), DecodeError> {
        match self {
            CurrencyAmount::Xrp(drops) => drops.ensure_non_negative(),
            CurrencyAmount::Token(token) if token.is_negative() => Err(DecodeError::malformed(
                format!("negative value {:?} not allowed in a request", token.value),
            )),
            CurrencyAmount::Token(_) => Ok(()),
        }
    }
}

impl From<XrpAmount> for CurrencyAmount {
    fn from(drops: XrpAmount) -> Self {
        CurrencyAmount::Xrp(drops)
    }
}

impl From<TokenAmount> for CurrencyAmount {
    fn from(token: TokenAmount) -> Self {
        CurrencyAmount::Token(token)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyAmount::Xrp(drops) => fmt::Display::fmt(drops, f),
            CurrencyAmount::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

/// Share tokens minted by an AMM. Same wire shape as a token amount but kept
/// apart so pool shares never mix with ordinary issued currencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LpTokenAmount(TokenAmount);

impl LpTokenAmount {
    pub fn new(token: TokenAmount) -> Result<Self, DecodeError> {
        token.validate()?;
        if hex_currency_prefix(&token.currency) != Some(LP_TOKEN_PREFIX) {
            return Err(DecodeError::malformed(format!(
                "{:?} is not an LP token currency",
                token.currency
            )));
        }
        Ok(Self(token))
    }

    pub fn as_token(&self) -> &TokenAmount {
        &self.0
    }

    pub fn into_token(self) -> TokenAmount {
        self.0
    }

    pub fn decode(node: &Value) -> Result<Self, DecodeError> {
        Self::new(TokenAmount::decode(node)?)
    }

    pub fn encode(&self) -> Result<Value, DecodeError> {
        self.0.encode()
    }
}

impl fmt::Display for LpTokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} LP", self.0)
    }
}

/// Fetches a string member. Absent, non-string and empty members are all
/// malformed: every key an amount object carries is mandatory.
pub(crate) fn required_str<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a str, DecodeError> {
    match fields.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        Some(Value::String(_)) => Err(DecodeError::malformed(format!("{key} must not be empty"))),
        Some(other) => Err(DecodeError::malformed(format!(
            "{key} must be a string, found {}",
            super::error::node_kind(other)
        ))),
        None => Err(DecodeError::malformed(format!("missing {key}"))),
    }
}

macro_rules! json_codec {
    ($($ty:ty),+ $(,)?) => {$(
        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                let node = self.encode().map_err(<S::Error as ::serde::ser::Error>::custom)?;
                ::serde::Serialize::serialize(&node, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let node: ::serde_json::Value = ::serde::Deserialize::deserialize(deserializer)?;
                Self::decode(&node).map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    )+};
}

json_codec!(XrpAmount, TokenAmount, CurrencyAmount, LpTokenAmount);
pub(crate) use json_codec;

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    const ISSUER: &str = "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B";

    fn usd(value: &str) -> CurrencyAmount {
        CurrencyAmount::token("USD", ISSUER, value).unwrap()
    }

    #[test]
    fn string_decodes_as_xrp() {
        let amount = CurrencyAmount::decode(&json!("1000000")).unwrap();
        assert_eq!(amount, CurrencyAmount::Xrp(XrpAmount("1000000".into())));
    }

    #[test]
    fn signed_drops_are_accepted_when_decoding() {
        let amount = CurrencyAmount::decode(&json!("-15")).unwrap();
        assert!(matches!(amount, CurrencyAmount::Xrp(ref d) if d.is_negative()));
    }

    #[test]
    fn object_with_value_decodes_as_token() {
        let node = json!({ "currency": "USD", "issuer": ISSUER, "value": "100.5" });
        assert_eq!(CurrencyAmount::decode(&node).unwrap(), usd("100.5"));
    }

    #[test]
    fn object_without_value_is_not_an_amount() {
        let node = json!({ "currency": "USD", "issuer": ISSUER });
        assert!(matches!(
            CurrencyAmount::decode(&node),
            Err(DecodeError::MalformedAmount(_))
        ));
    }

    #[test]
    fn fractional_drops_are_malformed() {
        assert!(matches!(
            CurrencyAmount::decode(&json!("12.5")),
            Err(DecodeError::MalformedAmount(_))
        ));
    }

    #[test]
    fn bad_decimal_is_malformed() {
        let node = json!({ "currency": "USD", "issuer": "rX1", "value": "1.2.3" });
        assert!(matches!(
            CurrencyAmount::decode(&node),
            Err(DecodeError::MalformedAmount(_))
        ));
    }

    #[test]
    fn xrp_as_issued_currency_is_malformed() {
        let node = json!({ "currency": "XRP", "issuer": "rX1", "value": "1" });
        assert!(matches!(
            CurrencyAmount::decode(&node),
            Err(DecodeError::MalformedAmount(_))
        ));
    }

    #[test]
    fn xrp_hex_codes_are_malformed() {
        for code in [
            "0000000000000000000000000000000000000000",
            "0000000000000000000000005852500000000000",
        ] {
            let node = json!({ "currency": code, "issuer": "rA", "value": "1" });
            assert!(matches!(
                CurrencyAmount::decode(&node),
                Err(DecodeError::MalformedAmount(_))
            ));
        }
    }

    #[test]
    fn empty_issuer_and_non_string_fields_are_malformed() {
        let empty = json!({ "currency": "USD", "issuer": "", "value": "1" });
        let numeric = json!({ "currency": "USD", "issuer": ISSUER, "value": 1 });
        assert!(matches!(
            CurrencyAmount::decode(&empty),
            Err(DecodeError::MalformedAmount(_))
        ));
        assert!(matches!(
            CurrencyAmount::decode(&numeric),
            Err(DecodeError::MalformedAmount(_))
        ));
    }

    #[test]
    fn other_node_kinds_are_unexpected() {
        for node in [json!(100), json!(true), json!(null), json!(["1"])] {
            assert!(matches!(
                CurrencyAmount::decode(&node),
                Err(DecodeError::UnexpectedShape { .. })
            ));
        }
    }

    #[test]
    fn token_encodes_with_canonical_keys() {
        let raw = format!(r#"{{"currency":"USD","issuer":"{ISSUER}","value":"100.5"}}"#);
        let node: Value = serde_json::from_str(&raw).unwrap();
        let amount = CurrencyAmount::decode(&node).unwrap();

        let encoded = serde_json::to_string(&amount.encode().unwrap()).unwrap();
        assert_eq!(encoded, raw);
    }

    #[test]
    fn round_trips_preserve_every_field() {
        let samples = [
            CurrencyAmount::xrp_drops(0),
            CurrencyAmount::Xrp(XrpAmount("-42".into())),
            usd("1.23e11"),
            usd("-0.5"),
            CurrencyAmount::token("0158415500000000C1F76FF6ECB0BAC600000000", ISSUER, "7")
                .unwrap(),
        ];
        for amount in samples {
            let back = CurrencyAmount::decode(&amount.encode().unwrap()).unwrap();
            assert_eq!(back, amount);
        }
    }

    #[test]
    fn token_equality_is_textual() {
        assert_ne!(usd("0"), usd("0.0"));
        assert_eq!(usd("0"), usd("0"));
        assert_ne!(usd("1"), CurrencyAmount::xrp_drops(1));
    }

    #[test]
    fn encode_fails_closed_on_invalid_values() {
        let drops = CurrencyAmount::Xrp(XrpAmount("1.5".into()));
        assert!(matches!(drops.encode(), Err(DecodeError::MalformedAmount(_))));

        let token = CurrencyAmount::Token(TokenAmount {
            currency: "USD".into(),
            issuer: ISSUER.into(),
            value: "1,000".into(),
        });
        assert!(matches!(token.encode(), Err(DecodeError::MalformedAmount(_))));
        assert!(serde_json::to_string(&token).is_err());
    }

    #[test]
    fn xrp_conversions() {
        assert_eq!(XrpAmount::from_xrp("1.5").unwrap().drops(), "1500000");
        assert_eq!(XrpAmount::from_xrp("25").unwrap().drops(), "25000000");
        assert_eq!(XrpAmount::from_xrp("0.000001").unwrap().drops(), "1");
        assert!(XrpAmount::from_xrp("0.0000001").is_err());
        assert!(XrpAmount::from_xrp("abc").is_err());

        let xrp = XrpAmount::from_drops(2_500_000).to_xrp().unwrap();
        assert_eq!(xrp, BigDecimal::from_str("2.5").unwrap());
    }

    #[test]
    fn xrp_conversion_is_capped_at_total_supply() {
        assert_eq!(
            XrpAmount::from_xrp("100000000000").unwrap().drops(),
            "100000000000000000"
        );
        assert_eq!(
            XrpAmount::from_xrp("-1e11").unwrap().drops(),
            "-100000000000000000"
        );
        assert_eq!(XrpAmount::from_xrp("1.500000000").unwrap().drops(), "1500000");

        for bad in ["100000000000.000001", "100000000001", "1e12", "1e100000", "1e-100000"] {
            assert!(
                matches!(XrpAmount::from_xrp(bad), Err(DecodeError::MalformedAmount(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn token_decimal_value_handles_exponents() {
        let CurrencyAmount::Token(token) = usd("1.23e11") else {
            panic!("expected token");
        };
        assert_eq!(
            token.decimal_value().unwrap(),
            BigDecimal::from_str("123000000000").unwrap()
        );
    }

    #[test]
    fn serde_goes_through_the_codec() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Holder {
            amount: CurrencyAmount,
        }

        let holder: Holder = serde_json::from_value(json!({ "amount": "10" })).unwrap();
        assert_eq!(holder.amount, CurrencyAmount::xrp_drops(10));

        let err = serde_json::from_value::<Holder>(json!({ "amount": 10 })).unwrap_err();
        assert!(err.to_string().contains("Unexpected JSON shape"));
    }

    #[test]
    fn lp_tokens_require_amm_currency() {
        let lp = json!({
            "currency": "039C99CD9AB0B70B32ECDA51EAAE471625608EA2",
            "issuer": "rp9E3FN3gNmvePGhYnf414T2TkUuoxu8vM",
            "value": "71150.53584131501"
        });
        let decoded = LpTokenAmount::decode(&lp).unwrap();
        assert_eq!(decoded.as_token().value, "71150.53584131501");
        assert_eq!(decoded.encode().unwrap(), lp);

        let plain = json!({ "currency": "USD", "issuer": ISSUER, "value": "1" });
        assert!(matches!(
            LpTokenAmount::decode(&plain),
            Err(DecodeError::MalformedAmount(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(CurrencyAmount::xrp_drops(12).to_string(), "12 drops");
        assert_eq!(usd("3").to_string(), format!("3 USD/{ISSUER}"));
    }
}
