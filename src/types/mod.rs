pub mod amount;
pub mod asset;
pub mod error;
mod grammar;
pub mod pair;

pub use amount::{CurrencyAmount, DROPS_PER_XRP, LpTokenAmount, MAX_XRP, TokenAmount, XrpAmount};
pub use asset::{Asset, IssuedAsset};
pub use error::{DecodeError, InvalidPair};
pub use pair::{AssetLike, AssetPair, PairKind, build_pair};
