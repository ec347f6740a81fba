//! rubric CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rubric_cli::commands;
use rubric_cli::commands::render::OutputFormat;

#[derive(Parser)]
#[command(name = "rubric")]
#[command(version)]
#[command(about = "Markdown with callouts, highlights and ruby annotations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown file to an HTML body
    Render {
        /// Input markdown file
        input: PathBuf,

        /// Write output to FILE (use '--output -' for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Config file (default: rubric.yml next to the input or in a parent directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short = 't', long, value_enum, default_value_t = OutputFormat::Html)]
        to: OutputFormat,
    },

    /// Transform a JSON document tree and print the result
    Transform {
        /// JSON tree file (default: stdin)
        input: Option<PathBuf>,

        /// Config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Report the rewrites each transform makes on a markdown file
    Check {
        /// Input markdown file
        input: PathBuf,

        /// Config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging; stdout carries the command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rubric=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            config,
            to,
        } => commands::render::execute(commands::render::RenderArgs {
            input,
            output,
            config,
            to,
        }),
        Commands::Transform { input, config } => {
            commands::transform::execute(commands::transform::TransformArgs { input, config })
        }
        Commands::Check { input, config } => {
            commands::check::execute(commands::check::CheckArgs { input, config })
        }
    }
}
