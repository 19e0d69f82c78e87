use anyhow::Result;
use clap::Parser;
use devlink::commands;
use devlink::config::{ConfigOverrides, DEFAULT_CONFIG_KEY};
use devlink::io::ConsoleIo;
use std::path::PathBuf;

/// devlink - link local working copies into the vendor directory
///
/// Packages listed under `extra.symlinker.local-packages` in composer.json are
/// replaced by symlinks to their local working copy.
///
/// Examples:
///   devlink status              # Show link state of every local package
///   devlink link acme/widget    # Link one package
///   devlink unlink              # Remove all links
#[derive(Parser, Debug)]
#[command(author, version = env!("DEVLINK_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Root manifest (also via COMPOSER)
    #[arg(
        long = "manifest",
        short = 'm',
        env = "COMPOSER",
        value_name = "PATH",
        default_value = "composer.json",
        global = true
    )]
    pub manifest: PathBuf,

    /// Vendor directory (overrides config.vendor-dir; also via COMPOSER_VENDOR_DIR)
    #[arg(
        long = "vendor-dir",
        env = "COMPOSER_VENDOR_DIR",
        value_name = "PATH",
        global = true
    )]
    pub vendor_dir: Option<PathBuf>,

    /// Key under `extra` holding the local-packages mapping
    #[arg(
        long = "config-key",
        value_name = "KEY",
        default_value = DEFAULT_CONFIG_KEY,
        global = true
    )]
    pub config_key: String,

    /// Show local paths and unlink details
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the link state of local packages
    Status(PackageArgs),

    /// Link local packages into the vendor directory
    Link(PackageArgs),

    /// Remove links created for local packages
    Unlink(PackageArgs),
}

#[derive(clap::Args, Debug)]
pub struct PackageArgs {
    /// Packages to act on, as "vendor/name" (default: all configured)
    #[arg(value_name = "VENDOR/NAME")]
    pub packages: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = devlink::runtime::RealRuntime;
    let io = ConsoleIo::new(cli.verbose);
    let overrides = ConfigOverrides {
        vendor_dir: cli.vendor_dir,
        config_key: Some(cli.config_key),
    };

    match cli.command {
        Commands::Status(args) => {
            commands::status(&runtime, &io, &cli.manifest, overrides, &args.packages)?
        }
        Commands::Link(args) => {
            commands::link(&runtime, &io, &cli.manifest, overrides, &args.packages)?
        }
        Commands::Unlink(args) => {
            commands::unlink(&runtime, &io, &cli.manifest, overrides, &args.packages)?
        }
    }
    Ok(())
}
