use crate::types::{CurrencyAmount, DecodeError, XrpAmount};

pub trait AmountExt: Sized {
    /// Builds an XRP amount from a decimal XRP figure such as `"1.5"`.
    fn xrp_amount(value: impl Into<String>) -> Result<Self, DecodeError>;
}

impl AmountExt for CurrencyAmount {
    fn xrp_amount(value: impl Into<String>) -> Result<Self, DecodeError> {
        let value_string = value.into();
        XrpAmount::from_xrp(&value_string).map(CurrencyAmount::Xrp)
    }
}
