//! Command-line interface for lms.
//!
//! Runs the interactive menu (the default) or prints the resolved
//! configuration. Profile flags override the config file and environment.

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{self, OutputFormat, ProfileConfig, ResolvedConfig};

pub mod menu;

pub use menu::{Menu, MenuError};

/// lms - in-memory library book inventory manager
#[derive(Parser, Debug)]
#[command(name = "lms")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Library name (prompted for if not configured)
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Library address (prompted for if not configured)
    #[arg(long, global = true)]
    pub address: Option<String>,

    /// 6-digit library pincode (prompted for if not configured)
    #[arg(long, global = true)]
    pub pincode: Option<i64>,

    /// How book records are printed
    #[arg(long, value_enum, global = true)]
    pub format: Option<FormatArg>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Show resolved configuration (debug)
    Config,
}

/// Output format for CLI (maps to OutputFormat)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Human-readable record lines
    Text,

    /// One JSON object per record
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let resolved = self.apply_overrides(config::config()?);

        match self.command {
            None | Some(Commands::Menu) => run_menu(&resolved),
            Some(Commands::Config) => show_config(&resolved),
        }
    }

    /// Layer command-line flags over the loaded configuration
    pub fn apply_overrides(&self, base: &ResolvedConfig) -> ResolvedConfig {
        ResolvedConfig {
            profile: ProfileConfig {
                name: self.name.clone().or_else(|| base.profile.name.clone()),
                address: self.address.clone().or_else(|| base.profile.address.clone()),
                pincode: self.pincode.or(base.profile.pincode),
            },
            format: self.format.map(OutputFormat::from).unwrap_or(base.format),
            config_file: base.config_file.clone(),
        }
    }
}

/// Run the menu on stdin/stdout
fn run_menu(resolved: &ResolvedConfig) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut menu = Menu::new(stdin.lock(), stdout.lock(), resolved.format);
    if menu
        .run(&resolved.profile)
        .context("Console session failed")?
        .is_none()
    {
        tracing::info!("Input ended before the library was set up");
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(resolved: &ResolvedConfig) -> Result<()> {
    let or_prompt = |value: Option<String>| value.unwrap_or_else(|| "(prompted)".to_string());

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("  LMS Configuration");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "Config file: {}",
        resolved
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Library profile:");
    println!("  Name:    {}", or_prompt(resolved.profile.name.clone()));
    println!("  Address: {}", or_prompt(resolved.profile.address.clone()));
    println!(
        "  Pincode: {}",
        or_prompt(resolved.profile.pincode.map(|p| p.to_string()))
    );
    println!();
    println!("Output format: {}", resolved.format);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let base = ResolvedConfig {
            profile: ProfileConfig {
                name: Some("From Config".into()),
                address: Some("Config Street".into()),
                pincode: Some(560_001),
            },
            format: OutputFormat::Text,
            config_file: None,
        };

        let cli = Cli::parse_from(["lms", "--name", "From Flag", "--format", "json", "menu"]);
        let resolved = cli.apply_overrides(&base);

        assert_eq!(resolved.profile.name.as_deref(), Some("From Flag"));
        assert_eq!(resolved.profile.address.as_deref(), Some("Config Street"));
        assert_eq!(resolved.profile.pincode, Some(560_001));
        assert_eq!(resolved.format, OutputFormat::Json);
        assert!(matches!(cli.command, Some(Commands::Menu)));
    }

    #[test]
    fn test_no_subcommand_defaults_to_menu() {
        let cli = Cli::parse_from(["lms", "--pincode", "110001"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.pincode, Some(110_001));
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::parse_from(["lms", "config"]);
        assert!(matches!(cli.command, Some(Commands::Config)));
    }
}
