//! Ledger command-line client

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::StreamExt;
use ledger_client::{
    exercise_contract_choice, ClientConfig, ContractId, Identifier, LedgerSession, Package,
    Record, SubmitOptions, Transaction,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ledger-cli")]
#[command(about = "Command-line client for a ledger participant")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ledger API address (overrides config)
    #[arg(long, env = "LEDGER_ADDRESS")]
    ledger_address: Option<String>,

    /// Application id (overrides config)
    #[arg(long, env = "LEDGER_APPLICATION_ID")]
    application_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone)]
enum Command {
    /// Ledger API version
    Version,
    /// Current ledger end offset
    LedgerEnd,
    /// All known parties
    ListParties,
    /// Parties hosted by this participant
    ListLocalParties,
    /// Uploaded package ids
    ListPackages,
    /// Allocate a party unless one exists for the hint
    AllocateParty {
        /// Party id hint
        hint: String,
    },
    /// Active contracts visible to a local party
    ListContracts {
        /// Local party base name
        party: String,
    },
    /// Transactions up to the current ledger end
    ListUpdates {
        /// Local party base name
        party: String,
    },
    /// Follow new transactions until interrupted
    StreamUpdates {
        /// Local party base name
        party: String,
    },
    /// Create an asset owned by its issuer
    IssueAsset {
        /// Issuing party base name
        issuer: String,
        /// Asset name
        name: String,
    },
    /// Transfer an asset to a new owner
    GiveAsset {
        /// Asset contract id
        asset_cid: String,
        /// Current owner base name
        owner: String,
        /// New owner base name
        new_owner: String,
    },
    /// Archive an asset
    ArchiveAsset {
        /// Asset contract id
        asset_cid: String,
        /// Issuer base name
        issuer: String,
    },
    /// Run a command several times
    Repeatedly {
        /// Number of runs
        count: u32,
        /// Command to run
        #[command(subcommand)]
        command: Box<Command>,
    },
}

fn asset_id() -> Identifier {
    Package::new("#asset-model").id("Main", "Asset")
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_transaction(tx: &Transaction) -> anyhow::Result<()> {
    println!(
        "===== Transaction ofs: {}, command_id: {}, wfid: {}",
        tx.offset, tx.command_id, tx.workflow_id
    );
    print_json(tx)
}

async fn run(session: &LedgerSession, command: &Command) -> anyhow::Result<()> {
    let (count, command) = flatten_repeats(command)?;
    for _ in 0..count {
        run_once(session, command).await?;
    }
    Ok(())
}

async fn run_once(session: &LedgerSession, command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Version => println!("{}", session.get_ledger_version().await?),
        Command::LedgerEnd => println!("{}", session.get_ledger_end().await?),
        Command::ListParties => print_json(&session.list_parties().await?)?,
        Command::ListLocalParties => print_json(&session.list_local_parties().await?)?,
        Command::ListPackages => print_json(&session.list_packages().await?)?,
        Command::AllocateParty { hint } => print_json(&session.allocate_party(hint).await?)?,
        Command::ListContracts { party } => {
            let party = session.require_local_party_id(party).await?;
            let contracts = session.get_active_contracts(&party, &[]).await?;
            print_json(&contracts)?;
            println!("n= {}", contracts.len());
        }
        Command::ListUpdates { party } => {
            let party = session.require_local_party_id(party).await?;
            let mut updates = session.get_updates(&party, &[]).await?;
            while let Some(tx) = updates.next().await {
                print_transaction(&tx?)?;
            }
        }
        Command::StreamUpdates { party } => {
            let party = session.require_local_party_id(party).await?;
            let mut updates = session.get_update_stream(&party, &[]).await?;
            loop {
                tokio::select! {
                    next = updates.next() => match next {
                        Some(tx) => print_transaction(&tx?)?,
                        None => break,
                    },
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
        Command::IssueAsset { issuer, name } => {
            let issuer = session.require_local_party_id(issuer).await?;
            let args = Record::new()
                .field("issuer", issuer.clone())
                .field("owner", issuer.clone())
                .field("name", name.as_str());
            let cmd = session.codec().create_contract(&asset_id(), &args)?;
            print_json(&session.submit(issuer, cmd, SubmitOptions::default()).await?)?;
        }
        Command::GiveAsset {
            asset_cid,
            owner,
            new_owner,
        } => {
            let owner = session.require_local_party_id(owner).await?;
            let new_owner = session.require_local_party_id(new_owner).await?;
            let cmd = exercise_contract_choice(
                &asset_id(),
                &ContractId::new(asset_cid.as_str()),
                "Give",
                Record::new().field("newOwner", new_owner),
            )?;
            print_json(&session.submit(owner, cmd, SubmitOptions::default()).await?)?;
        }
        Command::ArchiveAsset { asset_cid, issuer } => {
            let issuer = session.require_local_party_id(issuer).await?;
            let cmd = exercise_contract_choice(
                &asset_id(),
                &ContractId::new(asset_cid.as_str()),
                "Archive",
                Record::new(),
            )?;
            print_json(&session.submit(issuer, cmd, SubmitOptions::default()).await?)?;
        }
        Command::Repeatedly { .. } => anyhow::bail!("repeats are expanded before dispatch"),
    }

    Ok(())
}

/// Nested repeats multiply; returns the total count and the innermost command
fn flatten_repeats(mut command: &Command) -> anyhow::Result<(u64, &Command)> {
    let mut count = 1u64;
    while let Command::Repeatedly { count: n, command: inner } = command {
        count = match count.checked_mul(u64::from(*n)) {
            Some(count) => count,
            None => anyhow::bail!("nested repeat counts overflow"),
        };
        command = inner.as_ref();
    }
    Ok((count, command))
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClientConfig::from_env()?,
    };

    if let Some(addr) = &cli.ledger_address {
        config.ledger_address = addr.clone();
    }
    if let Some(application_id) = &cli.application_id {
        config.application_id = application_id.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut session = LedgerSession::from_config(&config);
    session.open().await?;

    let result = run(&session, &cli.command).await;

    session.close()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeatedly(count: u32, command: Command) -> Command {
        Command::Repeatedly {
            count,
            command: Box::new(command),
        }
    }

    #[test]
    fn test_nested_repeats_multiply() {
        let command = repeatedly(3, repeatedly(4, Command::Version));
        let (count, inner) = flatten_repeats(&command).unwrap();
        assert_eq!(count, 12);
        assert!(matches!(inner, Command::Version));

        let (count, _) = flatten_repeats(&Command::LedgerEnd).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_overflowing_repeat_count_is_rejected() {
        let command = repeatedly(
            u32::MAX,
            repeatedly(u32::MAX, repeatedly(u32::MAX, Command::Version)),
        );
        assert!(flatten_repeats(&command).is_err());

        let command = repeatedly(u32::MAX, repeatedly(u32::MAX, Command::Version));
        let (count, _) = flatten_repeats(&command).unwrap();
        assert_eq!(count, u64::from(u32::MAX) * u64::from(u32::MAX));
    }

    #[test]
    fn test_cli_parses_nested_repeat() {
        let cli = Cli::try_parse_from(["ledger-cli", "repeatedly", "2", "repeatedly", "5", "version"])
            .unwrap();
        let (count, inner) = flatten_repeats(&cli.command).unwrap();
        assert_eq!(count, 10);
        assert!(matches!(inner, Command::Version));
    }
}
