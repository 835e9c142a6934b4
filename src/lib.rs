//! Typed models for the XRP Ledger JSON-RPC protocol.
//!
//! The core is the amount and asset model in [`types`]: amount fields are
//! either an XRP drops string or a `{currency, issuer, value}` object, told
//! apart by JSON shape alone. [`xrpl_http`] builds requests, transactions and
//! a small HTTP client on top of it.
//!
//! ```
//! use serde_json::json;
//! use xrpl_models::types::{Asset, CurrencyAmount, PairKind, build_pair};
//!
//! let amount = CurrencyAmount::decode(&json!("1000000")).unwrap();
//! assert!(amount.is_xrp());
//!
//! let usd = Asset::token("USD", "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B").unwrap();
//! let pair = build_pair(Asset::Xrp, usd).unwrap();
//! assert_eq!(pair.kind(), PairKind::XrpToken);
//! ```

pub mod error;
pub mod ext;
pub mod types;
pub mod xrpl_http;

pub use error::{Error, Result};
pub use ext::AmountExt;
pub use types::{
    Asset, AssetPair, CurrencyAmount, DecodeError, InvalidPair, IssuedAsset, LpTokenAmount,
    PairKind, TokenAmount, XrpAmount, build_pair,
};
