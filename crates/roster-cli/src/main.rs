//! roster CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "roster", version, about = "Student roster reporting and export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a roster to XML or JSON
    Export {
        /// Path to a .toml roster file or a directory of them
        #[arg(long)]
        roster: PathBuf,

        /// Output file (default: <output_dir>/students.<format>)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: xml, json
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print aggregate statistics for a roster
    Stats {
        /// Path to a .toml roster file or a directory of them
        #[arg(long)]
        roster: PathBuf,

        /// Also report the average for one major
        #[arg(long)]
        major: Option<String>,

        /// Number of top performers to list
        #[arg(long)]
        top: Option<usize>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write an HTML report to this path
        #[arg(long)]
        html: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run the built-in demonstration roster
    Demo {
        /// Where to write the XML export
        #[arg(long, default_value = "students.xml")]
        output: PathBuf,
    },

    /// Create starter config and example roster
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roster=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            roster,
            output,
            format,
            config,
        } => commands::export::execute(roster, output, format, config),
        Commands::Stats {
            roster,
            major,
            top,
            format,
            html,
            config,
        } => commands::stats::execute(roster, major, top, format, html, config),
        Commands::Demo { output } => commands::demo::execute(output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
