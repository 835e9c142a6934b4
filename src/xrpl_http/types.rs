use derive_new::new;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use super::rpc::RpcRequest;
use crate::types::{
    Asset, AssetPair, CurrencyAmount, DecodeError, InvalidPair, LpTokenAmount, TokenAmount,
    XrpAmount, build_pair,
};

/// `amm_info`: look a pool up by its asset pair or by its account.
///
/// The asset sides only come from a validated [`AssetPair`]:
///
/// ```compile_fail
/// use xrpl_models::{Asset, xrpl_http::AmmInfoRequest};
///
/// let request = AmmInfoRequest {
///     asset: Some(Asset::Xrp),
///     asset2: Some(Asset::Xrp),
///     amm_account: None,
///     ledger_index: None,
/// };
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmmInfoRequest {
    asset: Option<Asset>,
    asset2: Option<Asset>,
    amm_account: Option<String>,
    pub ledger_index: Option<String>,
}

impl AmmInfoRequest {
    pub fn for_pair(pair: AssetPair<Asset>) -> Self {
        let (asset, asset2) = pair.into_parts();
        Self {
            asset: Some(asset),
            asset2: Some(asset2),
            amm_account: None,
            ledger_index: None,
        }
    }

    pub fn for_account(amm_account: impl Into<String>) -> Self {
        Self {
            asset: None,
            asset2: None,
            amm_account: Some(amm_account.into()),
            ledger_index: None,
        }
    }

    pub fn at_ledger(mut self, ledger_index: impl Into<String>) -> Self {
        self.ledger_index = Some(ledger_index.into());
        self
    }

    pub fn asset(&self) -> Option<&Asset> {
        self.asset.as_ref()
    }

    pub fn asset2(&self) -> Option<&Asset> {
        self.asset2.as_ref()
    }

    pub fn amm_account(&self) -> Option<&str> {
        self.amm_account.as_deref()
    }
}

impl RpcRequest for AmmInfoRequest {
    const METHOD: &'static str = "amm_info";
    type Response = AmmInfoResponse;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AmmInfoResponse {
    pub amm: AmmDescription,
    pub ledger_current_index: Option<u32>,
    pub ledger_index: Option<u32>,
    #[serde(default)]
    pub validated: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AmmDescription {
    pub account: String,
    pub amount: CurrencyAmount,
    pub amount2: CurrencyAmount,
    #[serde(default)]
    pub asset_frozen: bool,
    #[serde(default)]
    pub asset2_frozen: bool,
    pub auction_slot: Option<AuctionSlot>,
    pub lp_token: LpTokenAmount,
    pub trading_fee: u16,
    #[serde(default)]
    pub vote_slots: Vec<VoteSlot>,
}

impl AmmDescription {
    /// Pool balances as a pair. A well-formed pool always passes; a server
    /// reporting two identical sides does not.
    pub fn pool(&self) -> Result<AssetPair<CurrencyAmount>, InvalidPair> {
        build_pair(self.amount.clone(), self.amount2.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuctionSlot {
    pub account: String,
    #[serde(default)]
    pub auth_accounts: Vec<AuthAccount>,
    pub discounted_fee: u32,
    pub expiration: String,
    pub price: LpTokenAmount,
    pub time_interval: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthAccount {
    pub account: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VoteSlot {
    pub account: String,
    pub trading_fee: u16,
    pub vote_weight: u32,
}

/// `book_offers`: offers that pay out `taker_gets` in exchange for `taker_pays`.
///
/// ```compile_fail
/// use xrpl_models::{Asset, xrpl_http::BookOffersRequest};
///
/// let request = BookOffersRequest {
///     taker_gets: Asset::Xrp,
///     taker_pays: Asset::Xrp,
///     taker: None,
///     limit: None,
///     ledger_index: None,
/// };
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookOffersRequest {
    taker_gets: Asset,
    taker_pays: Asset,
    pub taker: Option<String>,
    pub limit: Option<u32>,
    pub ledger_index: Option<String>,
}

impl BookOffersRequest {
    /// The pair's first side is what the taker gets, the second what it pays.
    pub fn new(book: AssetPair<Asset>) -> Self {
        let (taker_gets, taker_pays) = book.into_parts();
        Self {
            taker_gets,
            taker_pays,
            taker: None,
            limit: None,
            ledger_index: None,
        }
    }

    pub fn with_taker(mut self, taker: impl Into<String>) -> Self {
        self.taker = Some(taker.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn taker_gets(&self) -> &Asset {
        &self.taker_gets
    }

    pub fn taker_pays(&self) -> &Asset {
        &self.taker_pays
    }
}

impl RpcRequest for BookOffersRequest {
    const METHOD: &'static str = "book_offers";
    type Response = BookOffersResponse;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookOffersResponse {
    pub offers: Vec<BookOffer>,
    pub ledger_current_index: Option<u32>,
    pub ledger_index: Option<u32>,
    #[serde(default)]
    pub validated: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BookOffer {
    pub account: String,
    pub book_directory: Option<String>,
    #[serde(default)]
    pub flags: u32,
    pub sequence: u32,
    pub taker_gets: CurrencyAmount,
    pub taker_pays: CurrencyAmount,
    #[serde(rename = "owner_funds")]
    pub owner_funds: Option<String>,
    #[serde(rename = "quality")]
    pub quality: Option<String>,
    #[serde(rename = "taker_gets_funded")]
    pub taker_gets_funded: Option<CurrencyAmount>,
    #[serde(rename = "taker_pays_funded")]
    pub taker_pays_funded: Option<CurrencyAmount>,
}

impl BookOffer {
    pub fn pair(&self) -> Result<AssetPair<CurrencyAmount>, InvalidPair> {
        build_pair(self.taker_gets.clone(), self.taker_pays.clone())
    }
}

/// `account_info`
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, new)]
pub struct AccountInfoRequest {
    #[new(into)]
    pub account: String,
    #[new(default)]
    pub ledger_index: Option<String>,
    #[new(default)]
    pub strict: Option<bool>,
}

impl RpcRequest for AccountInfoRequest {
    const METHOD: &'static str = "account_info";
    type Response = AccountInfoResponse;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountInfoResponse {
    pub account_data: AccountRoot,
    pub ledger_current_index: Option<u32>,
    pub ledger_index: Option<u32>,
    #[serde(default)]
    pub validated: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRoot {
    pub account: String,
    pub balance: XrpAmount,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub owner_count: u32,
    pub sequence: u32,
}

/// `account_lines`
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, new)]
pub struct AccountLinesRequest {
    #[new(into)]
    pub account: String,
    #[new(default)]
    pub peer: Option<String>,
    #[new(default)]
    pub limit: Option<u32>,
    #[new(default)]
    pub marker: Option<Value>,
    #[new(default)]
    pub ledger_index: Option<String>,
}

impl RpcRequest for AccountLinesRequest {
    const METHOD: &'static str = "account_lines";
    type Response = AccountLinesResponse;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountLinesResponse {
    pub account: String,
    pub lines: Vec<TrustLine>,
    pub marker: Option<Value>,
}

/// One trust line as `account_lines` reports it. `balance` is from the
/// perspective of the requesting account and may be negative.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrustLine {
    pub account: String,
    pub balance: String,
    pub currency: String,
    pub limit: String,
    pub limit_peer: String,
    #[serde(default)]
    pub quality_in: u32,
    #[serde(default)]
    pub quality_out: u32,
    #[serde(default)]
    pub no_ripple: bool,
    #[serde(default)]
    pub no_ripple_peer: bool,
    #[serde(default)]
    pub freeze: bool,
}

impl TrustLine {
    /// The line's balance as an amount issued by the peer account.
    pub fn balance_amount(&self) -> Result<TokenAmount, DecodeError> {
        TokenAmount::new(
            self.currency.as_str(),
            self.account.as_str(),
            self.balance.as_str(),
        )
    }

    pub fn limit_amount(&self) -> Result<TokenAmount, DecodeError> {
        TokenAmount::new(
            self.currency.as_str(),
            self.account.as_str(),
            self.limit.as_str(),
        )
    }
}
