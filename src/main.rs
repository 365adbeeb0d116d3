use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::WrapErr;

use send_receive::{
    artifact::Artifact,
    calls::{parse_address, parse_amount, MultiSend},
    config::{Config, DEFAULT_CONFIG_PATH},
    deploy::Deployer,
    interact::{Interactor, Transfer, MAX_DECIMALS},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Chain configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Chain to use. Defaults to the first entry in the config
    #[arg(long)]
    chain: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deploy the SendReceive contract
    Deploy(DeployArgs),
    /// Approve the token and call multiSend on a deployed contract
    Interact(InteractArgs),
}

#[derive(Args, Debug)]
struct DeployArgs {
    /// Compiled SendReceive artifact (ABI + bytecode)
    #[arg(long)]
    artifact: PathBuf,

    /// Second constructor argument. Falls back to the chain's `gas_service`, then zero
    #[arg(long)]
    gas_service: Option<String>,
}

#[derive(Args, Debug)]
struct InteractArgs {
    /// Deployed SendReceive contract
    #[arg(long, default_value = "")]
    contract: String,

    /// ERC-20 token moved by multiSend
    #[arg(long, default_value = "")]
    token: String,

    #[arg(long, default_value = "")]
    dest_chain: String,

    #[arg(long, default_value = "")]
    dest_address: String,

    /// Receiver on the destination chain, repeatable
    #[arg(long = "receiver")]
    receivers: Vec<String>,

    #[arg(long, default_value = "")]
    symbol: String,

    /// Token amount in base units
    #[arg(long, default_value = "1000000")]
    amount: String,

    /// Allowance to grant. Defaults to `amount`
    #[arg(long)]
    approve_amount: Option<String>,

    /// Native value sent with multiSend, in wei
    #[arg(long, default_value = "0")]
    gas_payment: String,

    /// Token decimals used to display the balance
    #[arg(
        long,
        default_value_t = 6,
        value_parser = clap::value_parser!(u8).range(0..=MAX_DECIMALS as i64)
    )]
    decimals: u8,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    use tracing_subscriber::{fmt, EnvFilter};
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt().with_env_filter(env_filter).with_target(false).init();

    let config = Config::from_file(&cli.config)
        .wrap_err_with(|| format!("loading {}", cli.config.display()))?;
    let chain = config.chain(cli.chain.as_deref())?;
    tracing::info!(chain = %chain.name, url = %chain.url, "loaded configuration");

    match cli.command {
        Command::Deploy(args) => {
            let gas_service = match args.gas_service.as_deref() {
                Some(value) => parse_address("gas service", value)?,
                None => chain.gas_service(),
            };
            let artifact = Artifact::from_file(&args.artifact)?;

            let provider = chain.connect(chain.signer()?)?;
            chain.ensure_chain_id(&provider).await?;

            let address = Deployer::new(provider)
                .deploy(&artifact, chain.gateway, gas_service)
                .await?;
            println!("send receive contract deployed on {address}");
        }
        Command::Interact(args) => {
            // Everything is validated before the first request goes out.
            let contract = parse_address("contract", &args.contract)?;
            let token = parse_address("token", &args.token)?;
            let amount = parse_amount("amount", &args.amount)?;
            let send = MultiSend::new(
                &args.dest_chain,
                &args.dest_address,
                &args.receivers,
                &args.symbol,
                amount,
            )?;
            let transfer = Transfer {
                approve_amount: match args.approve_amount.as_deref() {
                    Some(value) => parse_amount("approve amount", value)?,
                    None => amount,
                },
                gas_payment: parse_amount("gas payment", &args.gas_payment)?,
                decimals: args.decimals,
                send,
            };

            let signer = chain.signer()?;
            let owner = signer.address();
            let provider = chain.connect(signer)?;
            chain.ensure_chain_id(&provider).await?;

            let hash = Interactor::new(provider, contract, token)
                .run(owner, transfer)
                .await?;
            println!("transaction hash is {hash}");
        }
    }

    Ok(())
}
