//! Entry point for the **aeromanager** command-line tool.
//!
//! Parses the command line, loads the configuration and runs a single
//! [`Command`] against AeroSpace.  The outcome is printed on stdout; any
//! error is logged and turns into exit status 1.

use aeromanager::aerospace::wm::AerospaceWm;
use aeromanager::command::Command;
use aeromanager::config::Config;
use aeromanager::manager::WorkspaceManager;
use clap::{ArgAction, Parser};
use log::{error, info};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "aeromanager", version)]
#[command(about = "Monitor-aware workspace switching for AeroSpace", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/aeromanager`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("aeromanager")
}

/// Load the config from `path`, or from `$XDG_CONFIG_HOME/aeromanager/config.json`,
/// falling back to compiled-in defaults.
fn load_config(path: Option<&Path>) -> Config {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config_dir().join("config.json"));
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit with 1; --help and --version exit with 0.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    let wm = AerospaceWm::with_binary(config.aerospace_bin.clone());
    let manager = WorkspaceManager::from_config(wm, &config);

    match manager.handle(cli.command) {
        Ok(report) => println!("{}", report),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("aeromanager").chain(args.iter().copied()))
    }

    #[test]
    fn parses_rearrange() {
        assert_eq!(parse(&["rearrange"]).unwrap().command, Command::Rearrange);
    }

    #[test]
    fn parses_workspace_number() {
        let cli = parse(&["hyprworkspace", "0"]).unwrap();
        assert_eq!(cli.command, Command::Hyprworkspace { number: 0 });
    }

    #[test]
    fn negative_numbers_reach_validation() {
        let cli = parse(&["hyprworkspace", "-1"]).unwrap();
        assert_eq!(cli.command, Command::Hyprworkspace { number: -1 });
        let cli = parse(&["hyprmove", "-1"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Hyprmove {
                number: Some(-1),
                visible: false
            }
        );
    }

    #[test]
    fn non_numeric_workspace_is_a_usage_error() {
        let err = parse(&["hyprworkspace", "abc"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn hyprmove_visible_flag() {
        let cli = parse(&["hyprmove", "--visible"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Hyprmove {
                number: None,
                visible: true
            }
        );
        assert!(parse(&["hyprmove"]).is_err());
        assert!(parse(&["hyprmove", "3", "--visible"]).is_err());
    }

    #[test]
    fn missing_or_unknown_command_is_an_error() {
        assert!(parse(&[]).unwrap_err().use_stderr());
        assert!(parse(&["shuffle"]).unwrap_err().use_stderr());
    }

    #[test]
    fn global_flags() {
        let cli = parse(&["-vv", "status", "--config", "/tmp/aero.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/aero.json")));
        assert_eq!(cli.command, Command::Status);
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let cfg = load_config(Some(Path::new("/nonexistent/aeromanager.json")));
        assert_eq!(cfg.aerospace_bin, "aerospace");
    }
}
