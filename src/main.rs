use ::tracing::{error, info};
use clap::{Parser, Subcommand};
use serde_json::Value;

pub mod tracing;

use xrpl_models::{
    AmountExt, Asset, CurrencyAmount, Error, Result, build_pair,
    xrpl_http::{ClientConfig, ClientService, Network},
};

#[derive(Debug, Parser)]
#[command(about = "Inspect XRPL amounts and query a rippled JSON-RPC endpoint")]
struct Cli {
    /// RPC endpoint (URL, `mainnet` or `testnet`). Defaults to $XRPL_RPC_URL.
    #[arg(long, global = true)]
    url: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode an amount field: a drops string or a token object
    DecodeAmount { json: String },
    /// Decode an asset descriptor such as {"currency":"XRP"}
    DecodeAsset { json: String },
    /// Convert a decimal XRP figure to drops
    Drops { xrp: String },
    /// Validate two asset descriptors as a pair
    Pair { asset: String, asset2: String },
    /// Query amm_info for an asset pair
    AmmInfo { asset: String, asset2: String },
    /// Query book_offers: offers giving `taker_gets` for `taker_pays`
    BookOffers {
        taker_gets: String,
        taker_pays: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Query account_info
    AccountInfo { address: String },
    /// Summarise a payment transaction by hash
    Payment { hash: String },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = tracing::init(cli.verbose) {
        eprintln!("Error initializing tracing: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::DecodeAmount { json } => {
            let amount = CurrencyAmount::decode(&parse_json(&json)?)?;
            info!("Decoded amount: {amount}");
            println!("{}", serde_json::to_string_pretty(&amount)?);
        }
        Command::DecodeAsset { json } => {
            let asset = Asset::decode(&parse_json(&json)?)?;
            info!("Decoded asset: {asset}");
            println!("{}", serde_json::to_string_pretty(&asset)?);
        }
        Command::Drops { xrp } => {
            let amount = CurrencyAmount::xrp_amount(xrp)?;
            println!("{}", serde_json::to_string(&amount)?);
        }
        Command::Pair { asset, asset2 } => {
            let pair = build_pair(parse_asset(&asset)?, parse_asset(&asset2)?)?;
            println!("{:?}: {} / {}", pair.kind(), pair.first(), pair.second());
        }
        Command::AmmInfo { asset, asset2 } => {
            let pair = build_pair(parse_asset(&asset)?, parse_asset(&asset2)?)?;
            let info = client(cli.url)?.get_amm_info(pair).await?;
            let amm = &info.amm;
            info!("AMM account: {}", amm.account);
            println!("pool: {} + {}", amm.amount, amm.amount2);
            println!("lp token: {}", amm.lp_token);
            println!("trading fee: {}", amm.trading_fee);
        }
        Command::BookOffers {
            taker_gets,
            taker_pays,
            limit,
        } => {
            let book = build_pair(parse_asset(&taker_gets)?, parse_asset(&taker_pays)?)?;
            let offers = client(cli.url)?.get_book_offers(book, limit).await?;
            info!("Found {} offers", offers.offers.len());
            for offer in offers.offers {
                println!(
                    "{} #{}: gets {} for {}",
                    offer.account, offer.sequence, offer.taker_gets, offer.taker_pays
                );
            }
        }
        Command::AccountInfo { address } => {
            let info = client(cli.url)?.get_account_info(&address).await?;
            let balance = info.account_data.balance.to_xrp()?;
            println!("{address}: {balance} XRP, sequence {}", info.account_data.sequence);
        }
        Command::Payment { hash } => {
            let summary = client(cli.url)?.payment_summary(&hash).await?;
            println!("{summary:#?}");
        }
    }

    Ok(())
}

fn client(url: Option<String>) -> Result<ClientService> {
    let config = match url {
        Some(url) => {
            let Ok(network) = url.parse::<Network>();
            ClientConfig::new(&network)?
        }
        None => ClientConfig::from_env()?,
    };
    info!("Using RPC endpoint {}", config.url);
    ClientService::new(config)
}

fn parse_json(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(Error::from)
}

fn parse_asset(raw: &str) -> Result<Asset> {
    Ok(Asset::decode(&parse_json(raw)?)?)
}
