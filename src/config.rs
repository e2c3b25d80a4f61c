//! Command-line and environment configuration.
//!
//! Flags win over environment variables; a `.env` file is loaded into the
//! environment before either is read.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;

use crate::backend::{BackendKind, RoutingTable};

pub const ENV_FOLDER: &str = "OPENLIST_REFRESH_FOLDER";
pub const ENV_PASSWORDS: &str = "OPENLIST_REFRESH_PASSWORDS";
pub const ENV_COMMAND: &str = "OPENLIST_REFRESH_COMMAND";

#[derive(Parser, Debug, Default)]
#[command(
    name = "openlist-refresh",
    version,
    about = "Invalidate an OpenList server's directory cache for the folder being browsed"
)]
pub struct Args {
    /// URL of the folder being browsed (http, https, dav or davs)
    #[arg(long)]
    pub folder: Option<String>,

    /// Network-locations store to search for credentials
    #[arg(long)]
    pub passwords_file: Option<PathBuf>,

    /// Command that makes the host reload its current view
    #[arg(long)]
    pub refresh_command: Option<String>,

    /// Additional port served by an OpenList instance (repeatable)
    #[arg(long = "openlist-port")]
    pub openlist_ports: Vec<u16>,

    /// Refresh every subdirectory as well
    #[arg(long)]
    pub recursive: bool,

    /// Script parameters in `key=value` form, e.g. `recursive=true`
    #[arg(value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub folder: String,
    pub passwords_file: Option<PathBuf>,
    pub refresh_command: Option<String>,
    pub openlist_ports: Vec<u16>,
    pub recursive: bool,
}

impl Config {
    /// Resolve `args` against the process environment.
    pub fn from_args(args: Args) -> Self {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolve `args`, looking up unset values through `env`.
    pub fn resolve<F>(args: Args, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let params = parse_params(&args.params);
        let recursive = args.recursive || params.get("recursive").is_some_and(|v| parse_bool(v));

        let folder = args
            .folder
            .or_else(|| env(ENV_FOLDER))
            .unwrap_or_default();

        let passwords_file = args
            .passwords_file
            .or_else(|| env(ENV_PASSWORDS).filter(|p| !p.is_empty()).map(PathBuf::from))
            .or_else(default_passwords_file);

        let refresh_command = args.refresh_command.or_else(|| env(ENV_COMMAND));

        Self {
            folder,
            passwords_file,
            refresh_command,
            openlist_ports: args.openlist_ports,
            recursive,
        }
    }

    /// Default routes plus the configured OpenList ports.
    pub fn routing_table(&self) -> RoutingTable {
        self.openlist_ports
            .iter()
            .fold(RoutingTable::default(), |table, port| {
                table.with_route(*port, BackendKind::OpenList)
            })
    }
}

/// `<home>/.kodi/userdata/passwords.xml`, if a home directory is known.
pub fn default_passwords_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".kodi").join("userdata").join("passwords.xml"))
}

/// Parse `key=value` parameters. Keys are lowercased; later keys override
/// earlier ones. Parameters without `=` are ignored.
pub fn parse_params<S: AsRef<str>>(params: &[S]) -> HashMap<String, String> {
    let mut parsed = HashMap::new();
    for param in params {
        let param = param.as_ref();
        match param.split_once('=') {
            Some((key, value)) => {
                parsed.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
            }
            None => log::warn!("Ignoring parameter without '=': {}", param),
        }
    }
    parsed
}

fn parse_bool(value: &str) -> bool {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" | "" => false,
        other => {
            log::warn!("Unrecognized boolean '{}', using false", other);
            false
        }
    }
}
