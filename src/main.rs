use crex24::core::config::ConfigError;
use crex24::{build_client, Crex24Config};

#[cfg(feature = "env-file")]
fn load_config() -> Result<Crex24Config, ConfigError> {
    Crex24Config::from_env_file("CREX24")
}

#[cfg(not(feature = "env-file"))]
fn load_config() -> Result<Crex24Config, ConfigError> {
    Crex24Config::from_env("CREX24")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Falls back to public endpoints only when CREX24_API_KEY/CREX24_SECRET_KEY are unset
    let config = load_config().unwrap_or_else(|e| {
        println!("No credentials loaded ({}), using public endpoints only", e);
        Crex24Config::read_only()
    });
    let has_credentials = config.has_credentials();

    let client = build_client(config)?;

    println!("Fetching tickers...");
    let tickers = client.market.tickers(&["BTC-USDT", "ETH-BTC"]).await?;
    for ticker in &tickers {
        println!(
            "{}: last={:?} bid={:?} ask={:?} 24h change={:?}%",
            ticker.instrument, ticker.last, ticker.bid, ticker.ask, ticker.percent_change
        );
    }

    if has_credentials {
        println!("Fetching non-zero balances...");
        let balances = client.account.balances(&[], Some(true)).await?;
        for balance in &balances {
            println!(
                "{}: available={} reserved={}",
                balance.currency, balance.available, balance.reserved
            );
        }
    }

    Ok(())
}
