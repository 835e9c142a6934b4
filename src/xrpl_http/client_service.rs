use serde_json::Value;
use tracing::{debug, info, warn};

use super::{
    config::ClientConfig,
    rpc::{RpcRequest, decode_result, envelope},
    transactions::{PaymentSummary, TxRequest, TxResponse},
    types::{
        AccountInfoRequest, AccountInfoResponse, AccountLinesRequest, AccountLinesResponse,
        AmmInfoRequest, AmmInfoResponse, BookOffersRequest, BookOffersResponse,
    },
};
use crate::{
    error::{Error, Result},
    types::{Asset, AssetPair},
};

/// Read-only JSON-RPC calls against a rippled endpoint
#[derive(Debug, Clone)]
pub struct ClientService {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ClientService {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST one request and decode its typed result
    pub async fn call<R: RpcRequest>(&self, request: &R) -> Result<R::Response> {
        let body = envelope(request)?;
        debug!(method = R::METHOD, %body, "Sending request");

        let response: Value = self
            .client
            .post(self.config.url.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        decode_result::<R>(response).inspect_err(|e| {
            warn!(method = R::METHOD, "Request failed: {e}");
        })
    }

    /// Look up the AMM trading a pair of assets
    pub async fn get_amm_info(&self, pair: AssetPair<Asset>) -> Result<AmmInfoResponse> {
        info!("Getting AMM info for {} / {}", pair.first(), pair.second());
        self.call(&AmmInfoRequest::for_pair(pair)).await
    }

    /// Get offers that give `first` in exchange for `second`
    pub async fn get_book_offers(
        &self,
        book: AssetPair<Asset>,
        limit: Option<u32>,
    ) -> Result<BookOffersResponse> {
        info!("Getting book offers for {} / {}", book.first(), book.second());
        let mut request = BookOffersRequest::new(book);
        if let Some(limit) = limit {
            request = request.with_limit(limit);
        }
        self.call(&request).await
    }

    /// Get account information including balance and sequence number
    pub async fn get_account_info(&self, address: &str) -> Result<AccountInfoResponse> {
        info!("Getting account info for address: {}", address);
        self.call(&AccountInfoRequest::new(address)).await
    }

    /// Get account trust lines
    pub async fn get_account_lines(&self, address: &str) -> Result<AccountLinesResponse> {
        info!("Getting account lines for address: {}", address);
        self.call(&AccountLinesRequest::new(address)).await
    }

    pub async fn inspect_tx(&self, tx_hash: &str) -> Result<TxResponse> {
        self.call(&TxRequest::new(tx_hash)).await
    }

    /// What a payment sent and delivered
    pub async fn payment_summary(&self, tx_hash: &str) -> Result<PaymentSummary> {
        let tx = self.inspect_tx(tx_hash).await?;
        if tx.transaction_type() != Some("Payment") {
            warn!("Not a payment tx: {}", tx_hash);
        }
        tx.payment_summary()
    }

    /// Check if an account exists on the ledger
    pub async fn account_exists(&self, address: &str) -> Result<bool> {
        match self.get_account_info(address).await {
            Ok(_) => Ok(true),
            Err(Error::Rpc { error, .. }) if error == "actNotFound" => Ok(false),
            Err(e) => Err(e),
        }
    }
}
