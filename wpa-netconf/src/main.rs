// wpa_supplicant network configuration tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use wpa_netconf::{
    builder::build_network_record,
    config::{load_config, validate_country_code},
    deriver::WpaPassphrase,
    reconfigure::reconfigure,
    request::{parse_priority, NetworkRequest},
    store::WpaConfigStore,
    types::Config,
};

/// Location of the tool's own configuration file
const DEFAULT_CONFIG_PATH: &str = "/etc/wpa-netconf/config.toml";

#[derive(Parser)]
#[command(name = "wpa-netconf")]
#[command(about = "Manage wpa_supplicant network configuration", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct FileArgs {
    /// wpa_supplicant configuration file (defaults to general.wpa_config_file)
    #[arg(short = 'f', long)]
    config_file: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ReconfigureArgs {
    /// Interface to reconfigure (defaults to general.interface)
    #[arg(short, long)]
    interface: Option<String>,

    /// Do not ask wpa_supplicant to re-read its configuration
    #[arg(long)]
    no_reconfigure: bool,
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct PasswordArgs {
    /// Network does not require a password
    #[arg(short = 'n', long)]
    no_password: bool,

    /// Password for the network
    #[arg(short, long)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Add a network to auto-connect to
    Add {
        /// SSID of the network
        ssid: String,

        #[command(flatten)]
        password: PasswordArgs,

        /// Priority (number or low/medium/high); higher is joined first
        #[arg(long, value_parser = parse_priority)]
        priority: Option<u32>,

        /// Write the network configuration to stdout
        #[arg(short = 'o', long)]
        std_out: bool,

        /// Do not update the configuration file (implies --std-out)
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        file: FileArgs,

        #[command(flatten)]
        reconfigure: ReconfigureArgs,
    },

    /// Add the network described by a key=value request file
    AddFromFile {
        /// Request file with ssid=, password= and priority= lines
        request: PathBuf,

        #[command(flatten)]
        file: FileArgs,

        #[command(flatten)]
        reconfigure: ReconfigureArgs,
    },

    /// Delete a network by SSID (case sensitive)
    Delete {
        /// SSID of the network
        ssid: String,

        /// Delete every network with this SSID instead of only the first
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        file: FileArgs,

        #[command(flatten)]
        reconfigure: ReconfigureArgs,
    },

    /// Get or update the country code
    Country {
        #[command(subcommand)]
        action: CountryCommand,
    },

    /// Ask wpa_supplicant to re-read its configuration file
    Reconfigure {
        /// Interface to reconfigure (defaults to general.interface)
        #[arg(short, long)]
        interface: Option<String>,
    },
}

#[derive(Subcommand)]
enum CountryCommand {
    /// Print the current country code; fails if there is none
    Get {
        #[command(flatten)]
        file: FileArgs,
    },

    /// Set the country code
    Update {
        /// ISO 3166-1 alpha-2 country code
        country: String,

        #[command(flatten)]
        file: FileArgs,

        #[command(flatten)]
        reconfigure: ReconfigureArgs,
    },
}

/// Load the tool configuration, falling back to defaults when the default
/// file is absent
fn read_config(path: &Path) -> Result<(Config, bool)> {
    if path == Path::new(DEFAULT_CONFIG_PATH) && !path.exists() {
        return Ok((Config::default(), false));
    }

    let config =
        load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?;
    Ok((config, true))
}

/// Open the wpa_supplicant file selected on the command line or in the config
fn open_store(config: &Config, file: &FileArgs) -> Result<WpaConfigStore> {
    let path = file
        .config_file
        .clone()
        .unwrap_or_else(|| config.general.wpa_config_file.clone());

    if !path.is_file() {
        anyhow::bail!("\"{}\" is not a valid file", path.display());
    }

    log::debug!("Using wpa_supplicant configuration {}", path.display());
    Ok(WpaConfigStore::new(path))
}

/// Send the reconfiguration signal unless disabled
fn signal_reconfigure(config: &Config, args: &ReconfigureArgs) -> Result<()> {
    if args.no_reconfigure {
        log::debug!("Skipping wpa_supplicant reconfigure");
        return Ok(());
    }

    let interface = args
        .interface
        .as_deref()
        .or(config.general.interface.as_deref());

    let acknowledged = reconfigure(&config.tools.wpa_cli, interface)
        .context("Failed to reconfigure wpa_supplicant")?;
    if acknowledged {
        log::info!("wpa_supplicant reconfigured");
    } else {
        log::warn!("wpa_supplicant did not acknowledge the reconfigure request");
    }
    Ok(())
}

/// Build the record for one network, deriving credentials if needed
fn build_record(
    config: &Config,
    ssid: &str,
    password: Option<&str>,
    priority: Option<u32>,
) -> Result<String> {
    let deriver = WpaPassphrase::new(config.tools.wpa_passphrase.as_str());
    build_network_record(&deriver, ssid, password, priority)
        .with_context(|| format!("Failed to build network configuration for '{}'", ssid))
}

/// Append a network record, then make sure the file names a country.
/// Returns true if the file changed.
fn write_network(
    config: &Config,
    store: &WpaConfigStore,
    ssid: &str,
    record: &str,
) -> Result<bool> {
    let mut changed = store
        .append(record)
        .context("Failed to add network configuration")?;
    if changed {
        log::info!("Network '{}' added", ssid);
    } else {
        log::info!("Network '{}' is already configured", ssid);
    }

    if store.country()?.is_none() {
        log::info!(
            "No country set, using default country {}",
            config.general.default_country
        );
        store.upsert_country(&config.general.default_country)?;
        changed = true;
    }

    Ok(changed)
}

fn run(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Add {
            ssid,
            password,
            priority,
            std_out,
            dry_run,
            file,
            reconfigure: signal,
        } => {
            let password = if password.no_password {
                None
            } else {
                password.password
            };

            let record = build_record(config, &ssid, password.as_deref(), priority)?;
            if std_out || dry_run {
                print!("{}", record);
                if dry_run {
                    return Ok(());
                }
            }

            let store = open_store(config, &file)?;
            if write_network(config, &store, &ssid, &record)? {
                signal_reconfigure(config, &signal)?;
            }
        }

        Command::AddFromFile {
            request,
            file,
            reconfigure: signal,
        } => {
            let text = fs::read_to_string(&request)
                .with_context(|| format!("Failed to read request file {:?}", request))?;
            let request = NetworkRequest::parse(&text)
                .with_context(|| format!("Invalid request file {:?}", request))?;

            let record = build_record(
                config,
                &request.ssid,
                request.password.as_deref(),
                request.priority,
            )?;

            let store = open_store(config, &file)?;
            if write_network(config, &store, &request.ssid, &record)? {
                signal_reconfigure(config, &signal)?;
            }
        }

        Command::Delete {
            ssid,
            all,
            file,
            reconfigure: signal,
        } => {
            let store = open_store(config, &file)?;

            let count = store.ssid_count(&ssid)?;
            if count == 0 {
                anyhow::bail!("No network with SSID '{}'", ssid);
            }
            if count > 1 && !all {
                log::warn!(
                    "{} networks with SSID '{}'; deleting the first only (use --all to delete every one)",
                    count,
                    ssid
                );
            }

            let removed = if all {
                store.delete_all_by_ssid(&ssid)?
            } else {
                usize::from(store.delete_by_ssid(&ssid)?)
            };
            println!("{} deleted! ({} network(s))", ssid, removed);

            signal_reconfigure(config, &signal)?;
        }

        Command::Country { action } => match action {
            CountryCommand::Get { file } => {
                let store = open_store(config, &file)?;
                match store.country()? {
                    Some(country) => println!("{}", country),
                    None => anyhow::bail!("No country set in {}", store.path().display()),
                }
            }
            CountryCommand::Update {
                country,
                file,
                reconfigure: signal,
            } => {
                validate_country_code(&country)?;
                let store = open_store(config, &file)?;
                store.upsert_country(&country)?;
                signal_reconfigure(config, &signal)?;
            }
        },

        Command::Reconfigure { interface } => {
            let args = ReconfigureArgs {
                interface,
                no_reconfigure: false,
            };
            signal_reconfigure(config, &args)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let (config, from_file) = read_config(&args.config)?;

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.general.log_level),
    )
    .init();

    if !from_file {
        log::debug!("{} not found, using built-in defaults", DEFAULT_CONFIG_PATH);
    }

    run(&config, args.command)
}
