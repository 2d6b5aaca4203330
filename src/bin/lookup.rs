//! One-shot lookup from the command line.
//!
//! Usage: `lookup <mobile number>`. Words are joined, so `lookup 0300 1234567` works.

use sim_lookup_api::client::LookupClient;
use sim_lookup_api::config::Config;
use sim_lookup_api::models::LookupOutcome;

/// Loads the configuration, runs a single search and prints the records.
///
/// Exits with status 1 when the search fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout only carries results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sim_lookup_api=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mobile_number = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let config = Config::from_env()?;
    let client = LookupClient::from_config(&config)?;

    match client.search(&mobile_number).await {
        LookupOutcome::Success { records } => {
            println!("Search Results:");
            for record in records {
                println!();
                println!("Name:     {}", record.name);
                println!("Number:   {}", record.mobile);
                println!("Address:  {}", record.address);
                println!("ID Card:  {}", record.cnic);
                if let Some(operator) = record.operator {
                    println!("Operator: {}", operator);
                }
            }
            Ok(())
        }
        LookupOutcome::Failure(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
