//! Unsigned transaction models. Signing and submission live outside this
//! crate; these types only fix the wire shape of amount-bearing fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;
use strum_macros::{AsRefStr, Display};

use super::rpc::RpcRequest;
use crate::{
    error::{Error, Result},
    types::{
        Asset, AssetPair, CurrencyAmount, DecodeError, InvalidPair, LpTokenAmount,
        TokenAmount, XrpAmount, build_pair,
    },
};

/// Seconds between the Unix epoch and the XRPL epoch (2000-01-01).
pub const XRPL_EPOCH_OFFSET: u64 = 946_684_800;

/// Highest `TradingFee` an AMM accepts: 1000 units of 1/100,000, i.e. 1%.
pub const MAX_TRADING_FEE: u16 = 1000;

pub const TF_PARTIAL_PAYMENT: u32 = 0x0002_0000;
pub const TF_LP_TOKEN: u32 = 0x0001_0000;
pub const TF_SINGLE_ASSET: u32 = 0x0008_0000;
pub const TF_TWO_ASSET: u32 = 0x0010_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum TransactionType {
    Payment,
    OfferCreate,
    TrustSet,
    #[strum(serialize = "AMMCreate")]
    AmmCreate,
    #[strum(serialize = "AMMDeposit")]
    AmmDeposit,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommonFields {
    pub account: String,
    pub fee: Option<XrpAmount>,
    pub sequence: Option<u32>,
    pub flags: Option<u32>,
    pub last_ledger_sequence: Option<u32>,
    pub source_tag: Option<u32>,
}

impl CommonFields {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            ..Default::default()
        }
    }

    fn set_flag(&mut self, flag: u32) {
        self.flags = Some(self.flags.unwrap_or(0) | flag);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "TransactionType")]
pub enum Transaction {
    Payment(Payment),
    OfferCreate(OfferCreate),
    TrustSet(TrustSet),
    #[serde(rename = "AMMCreate")]
    AmmCreate(AmmCreate),
    #[serde(rename = "AMMDeposit")]
    AmmDeposit(AmmDeposit),
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Transaction::Payment(_) => TransactionType::Payment,
            Transaction::OfferCreate(_) => TransactionType::OfferCreate,
            Transaction::TrustSet(_) => TransactionType::TrustSet,
            Transaction::AmmCreate(_) => TransactionType::AmmCreate,
            Transaction::AmmDeposit(_) => TransactionType::AmmDeposit,
        }
    }

    pub fn common(&self) -> &CommonFields {
        match self {
            Transaction::Payment(tx) => &tx.common,
            Transaction::OfferCreate(tx) => &tx.common,
            Transaction::TrustSet(tx) => &tx.common,
            Transaction::AmmCreate(tx) => &tx.common,
            Transaction::AmmDeposit(tx) => &tx.common,
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    #[serde(flatten)]
    pub common: CommonFields,
    amount: CurrencyAmount,
    pub destination: String,
    pub destination_tag: Option<u32>,
    send_max: Option<CurrencyAmount>,
    deliver_min: Option<CurrencyAmount>,
}

impl Payment {
    pub fn new(
        account: impl Into<String>,
        destination: impl Into<String>,
        amount: CurrencyAmount,
    ) -> Result<Self> {
        amount.ensure_non_negative()?;
        Ok(Self {
            common: CommonFields::new(account),
            amount,
            destination: destination.into(),
            destination_tag: None,
            send_max: None,
            deliver_min: None,
        })
    }

    /// XRP-to-XRP payments cannot carry `SendMax`.
    pub fn with_send_max(mut self, send_max: CurrencyAmount) -> Result<Self> {
        send_max.ensure_non_negative()?;
        if self.amount.is_xrp() && send_max.is_xrp() {
            return Err(InvalidPair::BothXrp.into());
        }
        self.send_max = Some(send_max);
        Ok(self)
    }

    /// Sets `DeliverMin`, which rippled only honours on partial payments, so
    /// the flag is raised along with it.
    pub fn with_deliver_min(mut self, deliver_min: CurrencyAmount) -> Result<Self> {
        deliver_min.ensure_non_negative()?;
        if deliver_min.asset() != self.amount.asset() {
            return Err(Error::InvalidRequest(
                "DeliverMin must be in the same asset as Amount".into(),
            ));
        }
        self.deliver_min = Some(deliver_min);
        self.common.set_flag(TF_PARTIAL_PAYMENT);
        Ok(self)
    }

    pub fn with_destination_tag(mut self, tag: u32) -> Self {
        self.destination_tag = Some(tag);
        self
    }

    pub fn amount(&self) -> &CurrencyAmount {
        &self.amount
    }

    pub fn send_max(&self) -> Option<&CurrencyAmount> {
        self.send_max.as_ref()
    }

    pub fn deliver_min(&self) -> Option<&CurrencyAmount> {
        self.deliver_min.as_ref()
    }
}

/// Both sides are set together from an [`AssetPair`], so an offer built here
/// never trades XRP for XRP or a token for itself. One read off the wire can,
/// which [`OfferCreate::pair`] reports.
///
/// ```compile_fail
/// use xrpl_models::{CurrencyAmount, build_pair, xrpl_http::OfferCreate};
///
/// let pair = build_pair(
///     CurrencyAmount::xrp_drops(1),
///     CurrencyAmount::token("USD", "rA", "1").unwrap(),
/// )
/// .unwrap();
/// let mut offer = OfferCreate::new("rB", pair).unwrap();
/// offer.taker_pays = CurrencyAmount::xrp_drops(2);
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferCreate {
    #[serde(flatten)]
    pub common: CommonFields,
    taker_gets: CurrencyAmount,
    taker_pays: CurrencyAmount,
    pub expiration: Option<u32>,
    pub offer_sequence: Option<u32>,
}

impl OfferCreate {
    /// The pair's first side is what the offer gives away (`TakerGets`), the
    /// second what it wants in return (`TakerPays`).
    pub fn new(account: impl Into<String>, offer: AssetPair<CurrencyAmount>) -> Result<Self> {
        let (taker_gets, taker_pays) = offer.into_parts();
        taker_gets.ensure_non_negative()?;
        taker_pays.ensure_non_negative()?;

        Ok(Self {
            common: CommonFields::new(account),
            taker_gets,
            taker_pays,
            expiration: None,
            offer_sequence: None,
        })
    }

    pub fn taker_gets(&self) -> &CurrencyAmount {
        &self.taker_gets
    }

    pub fn taker_pays(&self) -> &CurrencyAmount {
        &self.taker_pays
    }

    pub fn pair(&self) -> std::result::Result<AssetPair<CurrencyAmount>, InvalidPair> {
        build_pair(self.taker_gets.clone(), self.taker_pays.clone())
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrustSet {
    #[serde(flatten)]
    pub common: CommonFields,
    pub limit_amount: TokenAmount,
    pub quality_in: Option<u32>,
    pub quality_out: Option<u32>,
}

impl TrustSet {
    pub fn new(account: impl Into<String>, limit_amount: TokenAmount) -> Result<Self> {
        limit_amount.validate()?;
        if limit_amount.is_negative() {
            return Err(DecodeError::malformed("trust line limit cannot be negative").into());
        }

        Ok(Self {
            common: CommonFields::new(account),
            limit_amount,
            quality_in: None,
            quality_out: None,
        })
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmmCreate {
    #[serde(flatten)]
    pub common: CommonFields,
    amount: CurrencyAmount,
    amount2: CurrencyAmount,
    trading_fee: u16,
}

impl AmmCreate {
    pub fn new(
        account: impl Into<String>,
        pool: AssetPair<CurrencyAmount>,
        trading_fee: u16,
    ) -> Result<Self> {
        if trading_fee > MAX_TRADING_FEE {
            return Err(Error::InvalidRequest(format!(
                "trading fee {trading_fee} exceeds {MAX_TRADING_FEE}"
            )));
        }

        let (amount, amount2) = pool.into_parts();
        amount.ensure_non_negative()?;
        amount2.ensure_non_negative()?;

        Ok(Self {
            common: CommonFields::new(account),
            amount,
            amount2,
            trading_fee,
        })
    }

    pub fn amount(&self) -> &CurrencyAmount {
        &self.amount
    }

    pub fn amount2(&self) -> &CurrencyAmount {
        &self.amount2
    }

    pub fn trading_fee(&self) -> u16 {
        self.trading_fee
    }

    pub fn pool(&self) -> std::result::Result<AssetPair<CurrencyAmount>, InvalidPair> {
        build_pair(self.amount.clone(), self.amount2.clone())
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmmDeposit {
    #[serde(flatten)]
    pub common: CommonFields,
    asset: Asset,
    asset2: Asset,
    amount: Option<CurrencyAmount>,
    amount2: Option<CurrencyAmount>,
    #[serde(rename = "LPTokenOut")]
    lp_token_out: Option<LpTokenAmount>,
}

impl AmmDeposit {
    fn base(account: impl Into<String>, pool: AssetPair<Asset>, flag: u32) -> Self {
        let (asset, asset2) = pool.into_parts();
        let mut common = CommonFields::new(account);
        common.set_flag(flag);
        Self {
            common,
            asset,
            asset2,
            amount: None,
            amount2: None,
            lp_token_out: None,
        }
    }

    /// Deposit whatever both assets it takes to receive `lp_token_out` shares.
    pub fn lp_token(
        account: impl Into<String>,
        pool: AssetPair<Asset>,
        lp_token_out: LpTokenAmount,
    ) -> Result<Self> {
        if lp_token_out.as_token().is_negative() {
            return Err(DecodeError::malformed("LPTokenOut cannot be negative").into());
        }
        let mut deposit = Self::base(account, pool, TF_LP_TOKEN);
        deposit.lp_token_out = Some(lp_token_out);
        Ok(deposit)
    }

    /// Deposit a single pool asset.
    pub fn single_asset(
        account: impl Into<String>,
        pool: AssetPair<Asset>,
        amount: CurrencyAmount,
    ) -> Result<Self> {
        amount.ensure_non_negative()?;
        let asset = amount.asset();
        if &asset != pool.first() && &asset != pool.second() {
            return Err(Error::InvalidRequest(format!(
                "{asset} is not one of the pool assets"
            )));
        }

        let mut deposit = Self::base(account, pool, TF_SINGLE_ASSET);
        deposit.amount = Some(amount);
        Ok(deposit)
    }

    /// Deposit both assets; `amounts` must follow the pool's side order.
    pub fn two_asset(
        account: impl Into<String>,
        pool: AssetPair<Asset>,
        amounts: AssetPair<CurrencyAmount>,
    ) -> Result<Self> {
        if amounts.assets() != pool {
            return Err(Error::InvalidRequest(
                "deposit amounts do not match the pool assets in order".into(),
            ));
        }

        let (amount, amount2) = amounts.into_parts();
        amount.ensure_non_negative()?;
        amount2.ensure_non_negative()?;

        let mut deposit = Self::base(account, pool, TF_TWO_ASSET);
        deposit.amount = Some(amount);
        deposit.amount2 = Some(amount2);
        Ok(deposit)
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn asset2(&self) -> &Asset {
        &self.asset2
    }

    pub fn amount(&self) -> Option<&CurrencyAmount> {
        self.amount.as_ref()
    }

    pub fn amount2(&self) -> Option<&CurrencyAmount> {
        self.amount2.as_ref()
    }

    pub fn lp_token_out(&self) -> Option<&LpTokenAmount> {
        self.lp_token_out.as_ref()
    }

    pub fn pool(&self) -> std::result::Result<AssetPair<Asset>, InvalidPair> {
        build_pair(self.asset.clone(), self.asset2.clone())
    }
}

/// `tx`: fetch a transaction by hash.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxRequest {
    pub transaction: String,
    pub binary: Option<bool>,
}

impl TxRequest {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            transaction: hash.into(),
            binary: Some(false),
        }
    }
}

impl RpcRequest for TxRequest {
    const METHOD: &'static str = "tx";
    type Response = TxResponse;
}

/// A looked-up transaction. The transaction body stays generic until asked
/// for, so unmodelled transaction types still decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TxResponse {
    pub hash: String,
    pub date: Option<u64>,
    pub ledger_index: Option<u32>,
    pub meta: Option<TxMeta>,
    #[serde(default)]
    pub validated: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TxMeta {
    #[serde(rename = "TransactionResult")]
    pub transaction_result: String,
    pub delivered_amount: Option<Value>,
}

impl TxMeta {
    /// rippled reports `"unavailable"` for payments from ledgers predating the
    /// field; that reads as `None`.
    pub fn delivered_amount(&self) -> std::result::Result<Option<CurrencyAmount>, DecodeError> {
        match &self.delivered_amount {
            None => Ok(None),
            Some(Value::String(s)) if s == "unavailable" => Ok(None),
            Some(node) => CurrencyAmount::decode(node).map(Some),
        }
    }
}

/// What a payment cost and delivered, pulled from a `tx` lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSummary {
    pub account: String,
    pub destination: String,
    pub amount: CurrencyAmount,
    pub send_max: Option<CurrencyAmount>,
    pub delivered: Option<CurrencyAmount>,
    pub fee: Option<XrpAmount>,
    pub unix_timestamp: Option<u64>,
}

impl TxResponse {
    pub fn transaction_type(&self) -> Option<&str> {
        self.fields.get("TransactionType").and_then(Value::as_str)
    }

    pub fn transaction(&self) -> Result<Transaction> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }

    pub fn payment_summary(&self) -> Result<PaymentSummary> {
        let Transaction::Payment(payment) = self.transaction()? else {
            return Err(Error::InvalidResponse(format!(
                "{} is not a payment",
                self.hash
            )));
        };

        let delivered = match &self.meta {
            Some(meta) => meta.delivered_amount()?,
            None => None,
        };

        Ok(PaymentSummary {
            account: payment.common.account,
            destination: payment.destination,
            amount: payment.amount,
            send_max: payment.send_max,
            delivered,
            fee: payment.common.fee,
            unix_timestamp: self.date.map(|d| d + XRPL_EPOCH_OFFSET),
        })
    }
}
