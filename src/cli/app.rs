//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{self, ReportArgs};
use specaudit::output::OutputMode;

/// specaudit - Specification assertion coverage for conformance test suites
#[derive(Parser, Debug)]
#[command(
    name = "specaudit",
    version,
    about = "Specification assertion coverage for conformance test suites",
    long_about = "Correlate the assertions of a specification audit document with the \
                  tests that reference them.\n\n\
                  Audit documents list every testable statement of a specification. \
                  References link test methods to (section, assertion) pairs."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Correlate audit documents with test references
    Report {
        /// Audit documents (files or glob patterns)
        #[arg(required = true)]
        audits: Vec<String>,

        /// Reference files or directories of *.json files
        #[arg(short, long = "references", required = true)]
        references: Vec<PathBuf>,

        /// Configuration file (default: ./specaudit.toml, then the user config)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Version references must declare (default: each document's version)
        #[arg(long)]
        target_version: Option<String>,

        /// Pass threshold in percent
        #[arg(long)]
        pass: Option<f64>,

        /// Fail threshold in percent
        #[arg(long)]
        fail: Option<f64>,

        /// Test groups whose tests do not count as implemented
        #[arg(long, value_delimiter = ',')]
        unimplemented: Vec<String>,

        /// Include a row per section
        #[arg(long)]
        sections: bool,

        /// Include every assertion with its status
        #[arg(long)]
        details: bool,
    },

    /// List the sections of an audit document
    Sections {
        /// Audit document
        audit: PathBuf,
    },

    /// Show one assertion
    Lookup {
        /// Audit document
        audit: PathBuf,

        /// Section id as written in the document
        section: String,

        /// Assertion id
        assertion: String,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Report {
            audits,
            references,
            config,
            target_version,
            pass,
            fail,
            unimplemented,
            sections,
            details,
        }) => commands::report(
            ReportArgs {
                audits,
                references,
                config,
                target_version,
                pass,
                fail,
                unimplemented,
                sections,
                details,
            },
            output_mode,
        ),
        Some(Command::Sections { audit }) => commands::sections(&audit, output_mode),
        Some(Command::Lookup {
            audit,
            section,
            assertion,
        }) => commands::lookup(&audit, &section, &assertion, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": specaudit::VERSION
                    })
                );
            } else {
                println!("specaudit v{}", specaudit::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": specaudit::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("specaudit v{}", specaudit::VERSION);
                println!("\nRun 'specaudit --help' for usage");
            }
            Ok(())
        },
    }
}
