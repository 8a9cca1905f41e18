//! xrpl-wallet-connect CLI
//!
//! Lists the supported wallets and checks whether one can be selected and
//! signed in on this host.

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use xrpl_wallet_connect::{Config, WalletConnect, WalletConnectError, WalletType};

/// xrpl-wallet-connect: one interface over XRPL browser wallets
#[derive(Parser)]
#[command(name = "xrpl-wallet-connect")]
#[command(about = "Sign in and sign XRPL transactions with any supported wallet", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported wallets
    ListWallets,

    /// Select a wallet and attempt a sign-in with the host's SDKs
    Check {
        /// Wallet identifier (gemwallet, crossmark, xaman)
        #[arg(value_name = "WALLET")]
        wallet: String,

        /// Xaman public API key
        #[arg(long, env = "XAMAN_API_KEY", hide_env_values = true)]
        xaman_api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    match cli.command {
        Commands::ListWallets => list_wallets(),
        Commands::Check {
            wallet,
            xaman_api_key,
        } => {
            let mut config = Config::new();
            if let Some(key) = xaman_api_key {
                config = config.with_xaman_api_key(key);
            }
            info!("Checking wallet: {}", wallet);
            if let Err(err) = check_wallet(config, &wallet).await {
                eprintln!("{}: {}", wallet, err);
                std::process::exit(exit_code(&err));
            }
        }
    }
}

async fn check_wallet(config: Config, wallet: &str) -> Result<(), WalletConnectError> {
    let mut connect = WalletConnect::new(config);
    connect.select_wallet(wallet)?;
    let signed_in = connect.sign_in().await?;
    println!("{} signed in as {}", signed_in.wallet.display_name(), signed_in.address);
    connect.logout().await
}

/// Distinct exit codes for the conditions callers branch on
fn exit_code(err: &WalletConnectError) -> i32 {
    match err {
        WalletConnectError::UnsupportedWallet(_) | WalletConnectError::Configuration(_) => 2,
        WalletConnectError::NotInstalled { .. } | WalletConnectError::SdkUnavailable { .. } => 3,
        _ => 1,
    }
}

fn list_wallets() {
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│  SUPPORTED WALLETS                                          │");
    println!("├─────────────────────────────────────────────────────────────┤");
    println!("│  Identifier   │ Name        │ Requires                      │");
    println!("│  ─────────────┼─────────────┼────────────────────────────── │");
    for wallet in WalletType::ALL {
        let requires = if wallet.requires_api_key() {
            "API key (XAMAN_API_KEY)"
        } else {
            "browser extension"
        };
        println!(
            "│  {:<12} │ {:<11} │ {:<29} │",
            wallet.as_str(),
            wallet.display_name(),
            requires
        );
    }
    println!("└─────────────────────────────────────────────────────────────┘");
}
