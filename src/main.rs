use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use lora_client::{
    ClientConfig, IntDecoding, SuggestedParams, TransactionDraft, TransactionResolver, decode,
    domain::{
        AlgorandAddressValidator, Network, NetworkConfig, PessimisticSizeEstimator,
        encode_address,
    },
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lora - precision-safe Algorand API client
#[derive(Parser)]
#[command(version = VERSION, about, long_about = None)]
struct Cli {
    /// Network to use instead of the configured one (mainnet, testnet, localnet)
    #[arg(short, long, global = true)]
    network: Option<Network>,

    /// Integer decoding policy (default, safe, mixed, bigint)
    #[arg(short, long, global = true)]
    int_decoding: Option<IntDecoding>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a JSON document and print the result
    Decode {
        /// File to read, or `-` for stdin
        file: PathBuf,
    },
    /// Fetch suggested transaction parameters from algod
    Params,
    /// Resolve the fee of a payment against the network's suggested params
    Fee {
        /// Encoded size in bytes; estimated from the draft when omitted
        #[arg(short, long)]
        size: Option<u64>,

        /// Exact fee in microAlgos
        #[arg(short, long)]
        flat_fee: Option<u64>,
    },
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load();
    if let Some(network) = cli.network {
        config.network = NetworkConfig::BuiltIn(network);
    }
    if let Some(policy) = cli.int_decoding {
        config.int_decoding = policy;
    }

    match cli.command {
        Commands::Decode { file } => run_decode(&file, config.int_decoding),
        Commands::Params => {
            let params = fetch_params(&config).await?;
            print_params(&params);
            Ok(())
        }
        Commands::Fee { size, flat_fee } => run_fee(&config, size, flat_fee).await,
    }
}

fn run_decode(file: &Path, policy: IntDecoding) -> Result<()> {
    let text = if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .wrap_err("Failed to read stdin")?;
        text
    } else {
        std::fs::read_to_string(file)
            .wrap_err_with(|| format!("Failed to read {}", file.display()))?
    };

    let value = decode(&text, policy)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

async fn fetch_params(config: &ClientConfig) -> Result<SuggestedParams> {
    let node = config.node_client()?;
    node.suggested_params()
        .await
        .wrap_err_with(|| format!("Failed to fetch params from {}", config.network.name()))
}

fn print_params(params: &SuggestedParams) {
    println!("genesis-id:   {}", params.genesis_id);
    println!("genesis-hash: {}", params.genesis_hash_b64());
    println!("fee:          {} per byte", params.fee);
    println!("min-fee:      {}", params.min_fee);
    println!("first-round:  {}", params.first_round);
    println!("last-round:   {}", params.last_round);
}

async fn run_fee(config: &ClientConfig, size: Option<u64>, flat_fee: Option<u64>) -> Result<()> {
    let params = fetch_params(config).await?;

    let account = encode_address(&[0u8; 32]);
    let mut draft = TransactionDraft::payment(account.as_str(), account.as_str(), 0);
    draft.flat_fee = flat_fee;

    let resolved = match size {
        Some(size) => {
            TransactionResolver::new(AlgorandAddressValidator, move |_: &TransactionDraft| size)
                .resolve(&draft, &params, None)?
        }
        None => TransactionResolver::new(AlgorandAddressValidator, PessimisticSizeEstimator)
            .resolve(&draft, &params, None)?,
    };

    println!("fee:    {} microAlgos", resolved.fee());
    println!("window: [{}, {}]", resolved.first_round(), resolved.last_round());
    Ok(())
}
