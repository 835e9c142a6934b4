pub mod client_service;
pub mod config;
pub mod rpc;
pub mod transactions;
pub mod types;

pub use client_service::ClientService;
pub use config::{ClientConfig, Network};
pub use rpc::RpcRequest;
pub use transactions::{
    AmmCreate, AmmDeposit, OfferCreate, Payment, PaymentSummary, Transaction, TrustSet,
};
pub use types::{
    AccountInfoRequest, AccountLinesRequest, AmmInfoRequest, AmmInfoResponse, BookOffersRequest,
    BookOffersResponse,
};
