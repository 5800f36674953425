mod assistant;
mod cli;
mod config;
mod display;
mod error;
mod logging;
mod prompts;
mod renderer;
mod scaffold;
mod stats;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::assistant::Runner;
use crate::cli::analyze::AnalyzeArgs;
use crate::cli::bootstrap::BootstrapArgs;
use crate::cli::dashboard::DashboardArgs;
use crate::cli::demo::DemoArgs;
use crate::cli::document::DocumentArgs;
use crate::cli::optimize::OptimizeArgs;
use crate::cli::refactor::RefactorArgs;
use crate::cli::setup::SetupArgs;
use crate::cli::transmute::TransmuteArgs;
use crate::display::status;
use crate::error::{AlchemistError, Result};

#[derive(Parser)]
#[command(name = "code-alchemist")]
#[command(about = "Code Alchemist - Transform chaotic code into gold", long_about = None)]
struct Cli {
    /// Path to config file (default: ./alchemist.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze code quality and structure
    Analyze(AnalyzeArgs),
    /// Generate documentation
    Document(DocumentArgs),
    /// Suggest code refactoring
    Refactor(RefactorArgs),
    /// Suggest performance and security improvements
    Optimize(OptimizeArgs),
    /// Generate project dashboard
    Dashboard(DashboardArgs),
    /// Setup project structure and config files
    Setup(SetupArgs),
    /// Run all transformations at once
    Transmute(TransmuteArgs),
    /// Check dependencies, link the binary, log in, and scaffold a workspace
    Bootstrap(BootstrapArgs),
    /// Walk through every command on a sample file, then clean up
    Demo(DemoArgs),
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize alchemist.toml configuration file
    Init {
        /// Path where to create the config file
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config { command } = cli.command {
        return match command {
            ConfigCommands::Init { path } => cli::config::init(path),
        };
    }

    let config = config::resolve(cli.config.as_deref())?;
    let runner = Runner::new(&config.assistant);

    match cli.command {
        Commands::Analyze(args) => cli::analyze::run(&config, &runner, &args).await,
        Commands::Document(args) => cli::document::run(&config, &runner, &args).await,
        Commands::Refactor(args) => cli::refactor::run(&runner, &args).await,
        Commands::Optimize(args) => cli::optimize::run(&runner, &args).await,
        Commands::Dashboard(args) => cli::dashboard::run(&config, &runner, &args).await,
        Commands::Setup(args) => cli::setup::run(&runner, &args).await,
        Commands::Transmute(args) => cli::transmute::run(&config, &runner, &args).await,
        Commands::Bootstrap(args) => {
            cli::bootstrap::run(&config, cli.config.as_deref(), &runner, &args).await
        }
        Commands::Demo(args) => cli::demo::run(&config, &runner, &args).await,
        Commands::Config { .. } => unreachable!("handled before config is loaded"),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        status::failure(&format!("Error: {}", e));
        let code = match e {
            AlchemistError::Interrupted => 130,
            _ => 1,
        };
        std::process::exit(code);
    }
}
