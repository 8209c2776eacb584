mod app;
mod config;
mod console;
mod error;
mod event;
mod remediation;
mod theme;
mod ui;
mod wifi;

use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, eyre};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{IconSet, Messages},
    console::{ConsoleFeedback, ConsoleNotifier},
    event::TerminalDialog,
    remediation::{ConfirmationRouter, RemediationWorkflow, Services},
    wifi::{LoggingScanTrigger, NetworkId, NetworkProfile, SecurityType, XmlProfileStore},
};

/// Turn off MAC randomization for networks that refuse randomized addresses
#[derive(Parser, Debug)]
#[command(
    name = "wifi-remedy",
    about = "Offers to turn off MAC randomization for a saved network that rejects randomized addresses.",
    long_about = None,
    version = env!("CARGO_PKG_VERSION"),
)]
struct Args {
    /// Profile store to read and update
    #[arg(long, default_value = config::DEFAULT_STORE_PATH)]
    store: std::path::PathBuf,

    /// Use ASCII icons (no Nerd Fonts required)
    #[arg(long)]
    ascii: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long = "log-level", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save a network profile
    Add {
        ssid: String,
        #[arg(long, value_enum, default_value_t = SecurityArg::Wpa2)]
        security: SecurityArg,
        #[arg(long)]
        passphrase: Option<String>,
        #[arg(long)]
        hidden: bool,
    },
    /// List saved profiles
    List,
    /// Report that a network rejected its randomized MAC and offer to fix it
    Notify {
        network_id: NetworkId,
        /// Only post the notification, don't open it
        #[arg(long = "no-tap")]
        no_tap: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SecurityArg {
    Open,
    Wep,
    Wpa,
    Wpa2,
    Wpa3,
    Enterprise,
}

impl From<SecurityArg> for SecurityType {
    fn from(arg: SecurityArg) -> Self {
        match arg {
            SecurityArg::Open => SecurityType::Open,
            SecurityArg::Wep => SecurityType::Wep,
            SecurityArg::Wpa => SecurityType::Wpa,
            SecurityArg::Wpa2 => SecurityType::Wpa2,
            SecurityArg::Wpa3 => SecurityType::Wpa3,
            SecurityArg::Enterprise => SecurityType::Enterprise,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = Arc::new(XmlProfileStore::open(&args.store)?);
    let icons = if args.ascii {
        IconSet::Ascii
    } else {
        IconSet::Nerd
    };

    match args.command {
        Command::Add {
            ssid,
            security,
            passphrase,
            hidden,
        } => {
            let mut profile = NetworkProfile::new(0, ssid, security.into());
            profile.passphrase = passphrase.map(SecretString::from);
            profile.hidden = hidden;
            let network_id = store.add(profile)?;
            println!("Saved as network {network_id}");
        }
        Command::List => {
            println!("Profiles in {}", store.path().display());
            for profile in store.list() {
                println!(
                    "{:>4}  {:<32} {:?}",
                    profile.network_id,
                    profile.identity(),
                    profile.mac_randomization
                );
            }
        }
        Command::Notify { network_id, no_tap } => {
            remediate(store, network_id, no_tap, icons).await?;
        }
    }
    Ok(())
}

async fn remediate(
    store: Arc<XmlProfileStore>,
    network_id: NetworkId,
    no_tap: bool,
    icons: IconSet,
) -> Result<()> {
    let notifier = Arc::new(ConsoleNotifier::new());
    let services = Services {
        store,
        notifier: notifier.clone(),
        dialog: Arc::new(TerminalDialog::new(icons)),
        feedback: Arc::new(ConsoleFeedback),
        scanner: Arc::new(LoggingScanTrigger),
    };
    let (workflow, _worker) = RemediationWorkflow::spawn(services, Messages::default());

    let mut router = ConfirmationRouter::new();
    let listener = router.register(Arc::new(workflow.clone()))?;
    let events = router
        .sender()
        .ok_or_else(|| eyre!("confirmation router has no event channel"))?;
    router.close();

    if workflow.notify(network_id).is_none() {
        println!("Network {network_id} is not saved");
        return Ok(());
    }
    if no_tap {
        return Ok(());
    }

    // Open the notification straight away
    if let Some(notification) = notifier.take(config::NOTE_NETWORK_NO_MAC_RANDOMIZATION_SUPPORT) {
        events.send(notification.tap_action)?;
    }
    drop(events);
    listener.await?;
    workflow.flush().await?;
    Ok(())
}
