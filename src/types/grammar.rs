use std::sync::LazyLock;

use regex::Regex;

use super::error::DecodeError;

static DROPS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?$").unwrap());

/// Characters rippled accepts in a three-letter currency code.
const STANDARD_CURRENCY_CHARS: &str = "?!@#$%^&*<>(){}[]|";

pub(crate) fn check_drops(drops: &str) -> Result<(), DecodeError> {
    if DROPS.is_match(drops) {
        Ok(())
    } else {
        Err(DecodeError::malformed(format!(
            "drops must be an integer string, got {drops:?}"
        )))
    }
}

pub(crate) fn check_decimal(value: &str) -> Result<(), DecodeError> {
    if DECIMAL.is_match(value) {
        Ok(())
    } else {
        Err(DecodeError::malformed(format!(
            "token value is not a decimal number: {value:?}"
        )))
    }
}

/// Accepts a standard three-character code or a 160-bit hex code. Every
/// spelling of XRP is rejected: it never names an issued currency.
pub(crate) fn check_currency(currency: &str) -> Result<(), DecodeError> {
    if currency.is_empty() {
        return Err(DecodeError::malformed("currency must not be empty"));
    }
    if is_xrp_code(currency) {
        return Err(DecodeError::malformed(format!(
            "{currency:?} is XRP and cannot be an issued currency"
        )));
    }

    let standard = currency.len() == 3
        && currency
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || STANDARD_CURRENCY_CHARS.contains(c));
    if standard || is_hex_currency(currency) {
        Ok(())
    } else {
        Err(DecodeError::malformed(format!(
            "unrecognised currency code {currency:?}"
        )))
    }
}

pub(crate) fn check_issuer(issuer: &str) -> Result<(), DecodeError> {
    if issuer.is_empty() {
        Err(DecodeError::malformed("issuer must not be empty"))
    } else {
        Ok(())
    }
}

pub(crate) fn is_hex_currency(currency: &str) -> bool {
    currency.len() == 40 && hex::decode(currency).is_ok()
}

/// `XRP` itself, the all-zero 160-bit code, or `XRP` packed into the
/// standard-code slot (bytes 12..15) of a 160-bit code.
pub(crate) fn is_xrp_code(currency: &str) -> bool {
    if currency == "XRP" {
        return true;
    }
    if !is_hex_currency(currency) {
        return false;
    }
    match hex::decode(currency) {
        Ok(bytes) => {
            let outside_slot_zero = bytes[..12].iter().chain(&bytes[15..]).all(|b| *b == 0);
            outside_slot_zero && (bytes[12..15] == [0u8; 3] || &bytes[12..15] == b"XRP")
        }
        Err(_) => false,
    }
}

/// Leading byte of the 160-bit code, if the currency is in hex form.
pub(crate) fn hex_currency_prefix(currency: &str) -> Option<u8> {
    if !is_hex_currency(currency) {
        return None;
    }
    hex::decode(&currency[..2]).ok().and_then(|b| b.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_grammar() {
        assert!(check_drops("0").is_ok());
        assert!(check_drops("1000000").is_ok());
        assert!(check_drops("-25").is_ok());
        assert!(check_drops("12.5").is_err());
        assert!(check_drops("1e6").is_err());
        assert!(check_drops("").is_err());
        assert!(check_drops(" 1").is_err());
    }

    #[test]
    fn decimal_grammar() {
        for ok in ["1", "-1", "100.5", "1.23e11", "9.99E-15", "0.0", "5e+3"] {
            assert!(check_decimal(ok).is_ok(), "{ok}");
        }
        for bad in ["1.2.3", "1,000", ".5", "1.", "e5", "--1", "1e", "NaN", ""] {
            assert!(check_decimal(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn currency_codes() {
        assert!(check_currency("USD").is_ok());
        assert!(check_currency("a?!").is_ok());
        assert!(check_currency("0158415500000000C1F76FF6ECB0BAC600000000").is_ok());
        assert!(check_currency("XRP").is_err());
        assert!(check_currency("").is_err());
        assert!(check_currency("USDC").is_err());
        assert!(check_currency("0158415500000000C1F76FF6ECB0BAC60000000Z").is_err());
    }

    #[test]
    fn xrp_in_hex_form_is_not_a_currency() {
        let all_zero = "0000000000000000000000000000000000000000";
        let packed = "0000000000000000000000005852500000000000";
        for code in ["XRP", all_zero, packed, packed.to_lowercase().as_str()] {
            assert!(is_xrp_code(code), "{code}");
            assert!(check_currency(code).is_err(), "{code}");
        }

        // USD in the standard slot, and XRP bytes with a nonzero prefix
        assert!(check_currency("0000000000000000000000005553440000000000").is_ok());
        assert!(check_currency("0100000000000000000000005852500000000000").is_ok());
        assert!(!is_xrp_code("xrp"));
    }

    #[test]
    fn hex_prefix() {
        assert_eq!(
            hex_currency_prefix("039C99CD9AB0B70B32ECDA51EAAE471625608EA2"),
            Some(0x03)
        );
        assert_eq!(hex_currency_prefix("USD"), None);
    }
}
