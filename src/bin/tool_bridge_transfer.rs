use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use stargate_bridge::chain::{TransactionSigner, WalletSigner};
use stargate_bridge::config::{load_config_from_path, Config, CONFIG_FILE_PATH};
use stargate_bridge::credentials::resolve_private_key;
use stargate_bridge::logger::{self, LogTag};
use stargate_bridge::quotes::{BridgeApi, StargateApi, TransferIntent};
use stargate_bridge::tokens;
use stargate_bridge::{BridgeClient, TransferRequest};

fn transfer_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("src_token")
                .long("src-token")
                .value_name("TOKEN")
                .help("Source token address or symbol (e.g. USDC)")
                .required(true),
        )
        .arg(
            Arg::new("dst_token")
                .long("dst-token")
                .value_name("TOKEN")
                .help("Destination token address or symbol")
                .required(true),
        )
        .arg(
            Arg::new("src_chain")
                .long("src-chain")
                .value_name("CHAIN_KEY")
                .help("Source chain key (e.g. ethereum)")
                .required(true),
        )
        .arg(
            Arg::new("dst_chain")
                .long("dst-chain")
                .value_name("CHAIN_KEY")
                .help("Destination chain key (e.g. polygon)")
                .required(true),
        )
        .arg(
            Arg::new("amount")
                .long("amount")
                .value_name("AMOUNT")
                .help("Amount in the token's smallest unit (1000000 = 1 USDC)")
                .required(true),
        )
        .arg(
            Arg::new("slippage")
                .long("slippage")
                .value_name("FRACTION")
                .value_parser(clap::value_parser!(f64))
                .help("Slippage tolerance, 0.05 = 5% (defaults to config)"),
        )
        .arg(
            Arg::new("src_address")
                .long("src-address")
                .value_name("ADDRESS")
                .help("Sender address (defaults to the signer)"),
        )
        .arg(
            Arg::new("dst_address")
                .long("dst-address")
                .value_name("ADDRESS")
                .help("Recipient address (defaults to the signer)"),
        )
}

fn build_cli() -> Command {
    Command::new("Bridge Transfer")
        .version("1.0")
        .about("Quote and execute Stargate cross-chain transfers")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Config file path (default data/config.toml)"),
        )
        .arg(
            Arg::new("private_key")
                .long("private-key")
                .value_name("HEX")
                .global(true)
                .help("Signing key (defaults to the configured environment variable)"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("TAG")
                .action(ArgAction::Append)
                .global(true)
                .help("Enable debug logs for a tag (system, config, quotes, executor, rpc, signer, transfer)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable verbose logs for all tags"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Only show warnings and errors"),
        )
        .subcommand(Command::new("chains").about("List chains supported by the bridge"))
        .subcommand(transfer_args(
            Command::new("quote").about("Fetch quotes for a transfer without executing"),
        ))
        .subcommand(transfer_args(
            Command::new("transfer").about("Quote, select a route and execute it on chain"),
        ))
        .subcommand_required(true)
}

/// Translate CLI flags into the logger's `--debug-<tag>` form
fn init_logger(matches: &ArgMatches) -> Result<()> {
    let mut flags = Vec::new();
    if matches.get_flag("verbose") {
        flags.push("--verbose".to_string());
    }
    if matches.get_flag("quiet") {
        flags.push("--quiet".to_string());
    }
    if let Some(tags) = matches.get_many::<String>("debug") {
        for tag in tags {
            let key = tag.trim().to_lowercase();
            if key == "all" {
                flags.push("--debug-all".to_string());
            } else if LogTag::from_debug_key(&key).is_some() {
                flags.push(format!("--debug-{}", key));
            } else {
                bail!("unknown log tag '{}'", tag);
            }
        }
    }
    logger::init_from_args(flags);
    Ok(())
}

fn resolve_token_arg(chain_key: &str, token: &str) -> Result<String> {
    tokens::resolve_token(chain_key, token).with_context(|| {
        format!(
            "'{}' is neither an address nor a known token on {} (known: {:?})",
            token,
            chain_key,
            tokens::symbols_for_chain(chain_key)
        )
    })
}

fn transfer_request(matches: &ArgMatches) -> Result<TransferRequest> {
    let required = |name: &str| -> Result<String> {
        matches
            .get_one::<String>(name)
            .cloned()
            .with_context(|| format!("missing --{}", name.replace('_', "-")))
    };

    let src_chain = required("src_chain")?;
    let dst_chain = required("dst_chain")?;
    let src_token = resolve_token_arg(&src_chain, &required("src_token")?)?;
    let dst_token = resolve_token_arg(&dst_chain, &required("dst_token")?)?;

    let mut request = TransferRequest::new(src_token, dst_token, src_chain, dst_chain, required("amount")?);
    if let Some(address) = matches.get_one::<String>("src_address") {
        request = request.with_src_address(address.clone());
    }
    if let Some(address) = matches.get_one::<String>("dst_address") {
        request = request.with_dst_address(address.clone());
    }
    if let Some(slippage) = matches.get_one::<f64>("slippage") {
        request = request.with_slippage_tolerance(*slippage);
    }
    Ok(request)
}

fn connect(matches: &ArgMatches, config: &Config) -> Result<BridgeClient> {
    let key = resolve_private_key(
        matches.get_one::<String>("private_key").map(String::as_str),
        &config.transfer.private_key_env,
    )?;
    Ok(BridgeClient::new(config, key)?)
}

/// Refuse to sign against a node on a different chain than --src-chain
async fn check_source_chain(client: &BridgeClient, src_chain_key: &str) -> Result<()> {
    let Some(expected) = tokens::chain_id(src_chain_key) else {
        logger::warning(
            LogTag::System,
            &format!("Unknown chain key '{}', skipping RPC chain check", src_chain_key),
        );
        return Ok(());
    };

    let actual = client.executor().chain_id().await?;
    if actual != expected {
        bail!(
            "RPC endpoint is on chain {} but --src-chain {} is chain {}",
            actual,
            src_chain_key,
            expected
        );
    }
    Ok(())
}

fn print_intent(intent: &TransferIntent) {
    println!("  From:       {} on {}", intent.src_token, intent.src_chain_key);
    println!("  To:         {} on {}", intent.dst_token, intent.dst_chain_key);
    println!("  Amount:     {}", intent.src_amount);
    println!("  Min out:    {}", intent.dst_amount_min);
    println!("  Recipient:  {}", intent.dst_address);
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    init_logger(&matches)?;

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(CONFIG_FILE_PATH);
    let config = load_config_from_path(config_path)?;

    match matches.subcommand() {
        Some(("chains", _)) => {
            // Listing chains needs no signing key
            let api = StargateApi::new(&config.api)?;
            let chains = api.get_supported_chains().await?;
            println!("{}", serde_json::to_string_pretty(&chains)?);
        }

        Some(("quote", sub_matches)) => {
            let request = transfer_request(sub_matches)?;

            // With an explicit --src-address quoting needs no signing key
            let account = match request.src_address {
                Some(_) => None,
                None => {
                    let key = resolve_private_key(
                        matches.get_one::<String>("private_key").map(String::as_str),
                        &config.transfer.private_key_env,
                    )
                    .context("pass --src-address or provide a signing key")?;
                    Some(WalletSigner::from_private_key(&key)?.address())
                }
            };
            let intent = request.to_intent(account, config.transfer.default_slippage_tolerance)?;

            println!("Requesting quotes...");
            print_intent(&intent);

            let api = StargateApi::new(&config.api)?;
            let quotes = api.get_quotes(&intent).await?;
            if quotes.is_empty() {
                println!("\nNo quotes available for this transfer");
            }
            for (i, route) in quotes.quotes.iter().enumerate() {
                println!(
                    "\n#{} {}: {} steps, dstAmount {}",
                    i + 1,
                    route.name().unwrap_or("unnamed"),
                    route.steps.len(),
                    route
                        .dst_amount()
                        .map(|a| a.to_string())
                        .unwrap_or_else(|| "?".to_string())
                );
            }
        }

        Some(("transfer", sub_matches)) => {
            let client = connect(&matches, &config)?;
            let request = transfer_request(sub_matches)?;
            check_source_chain(&client, &request.src_chain_key).await?;

            println!("Starting transfer from account {}", client.address());
            print_intent(&client.build_intent(&request)?);

            let hashes = client.transfer(&request).await?;

            println!("\nTransfer completed successfully!");
            for (i, tx_hash) in hashes.iter().enumerate() {
                println!("  Step {}: {}", i + 1, tx_hash);
            }
            client.close();
        }

        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}
