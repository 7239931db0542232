use anyhow::Result;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tc_cli::commands::{self, CheckOptions};
use tc_typeck::InterfaceResolution;
use tracing_subscriber::EnvFilter;

/// tinycheck: parameter type checking for a tiny typed language.
#[derive(Parser, Debug)]
#[command(name = "tinycheck", author = "tinycheck contributors", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Type check a source file and report diagnostics.
    Check {
        /// Path to the source file.
        path: Utf8PathBuf,
        /// Emit diagnostics as JSON on stdout.
        #[arg(long)]
        json: bool,
        /// TOML file with checker configuration.
        #[arg(long)]
        config: Option<Utf8PathBuf>,
        /// How interface annotations find their declaration.
        #[arg(long, value_enum)]
        interfaces: Option<InterfaceMode>,
    },
    /// Print the parsed syntax tree as JSON.
    Ast {
        /// Path to the source file.
        path: Utf8PathBuf,
    },
    /// List the registered type annotations.
    Registry {
        /// TOML file with checker configuration.
        #[arg(long)]
        config: Option<Utf8PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum InterfaceMode {
    /// First interface declared in the program.
    First,
    /// Interface named by the annotation.
    ByName,
}

impl From<InterfaceMode> for InterfaceResolution {
    fn from(mode: InterfaceMode) -> Self {
        match mode {
            InterfaceMode::First => InterfaceResolution::FirstDeclared,
            InterfaceMode::ByName => InterfaceResolution::ByName,
        }
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check {
            path,
            json,
            config,
            interfaces,
        } => {
            let opts = CheckOptions {
                path,
                config,
                interfaces: interfaces.map(Into::into),
                json,
            };
            let count = commands::check(&opts)?;
            Ok(if count == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Ast { path } => {
            commands::print_ast(&path)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Registry { config } => {
            let config = commands::load_config(config.as_deref())?;
            commands::print_registry(&config.registry());
            Ok(ExitCode::SUCCESS)
        }
    }
}
