use std::path::PathBuf;

use anyhow::{Context, Result};
use autobind::Config;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "autobind")]
#[command(about = "Generate KJSEmbed bindings from Doxygen XML", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file
    #[arg(short, long, global = true, env = "AUTOBIND_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate binding files from a Doxygen XML directory
    Generate {
        /// Directory containing index.xml
        xml_dir: PathBuf,

        /// Directory the bindings are written to
        out_dir: PathBuf,

        /// Only generate these classes (repeatable)
        #[arg(long = "class", value_name = "NAME")]
        classes: Vec<String>,

        /// Bind these classes as variants (repeatable)
        #[arg(long = "variant", value_name = "NAME")]
        variants: Vec<String>,
    },

    /// Create a class header and source from templates
    Scaffold {
        class_name: String,

        /// Directory holding template.h and template.cpp
        #[arg(long)]
        templates: Option<PathBuf>,

        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// List the backend methods invoked by frontend sources
    Signatures {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the list to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Generate {
            xml_dir,
            out_dir,
            classes,
            variants,
        } => {
            let config = config.with_overrides(&classes, &variants);
            let artifacts = autobind::generate_bindings(&xml_dir, &out_dir, &config)
                .with_context(|| format!("Failed to generate bindings from {}", xml_dir.display()))?;

            let skipped: usize = artifacts.iter().map(|a| a.report.skipped.len()).sum();
            info!(bindings = artifacts.len(), skipped, "generation finished");
        }
        Commands::Scaffold {
            class_name,
            templates,
            out,
        } => {
            let output = autobind::scaffold_class(&class_name, templates.as_deref(), &out)
                .with_context(|| format!("Failed to scaffold {class_name}"))?;
            println!("{}", output.header.display());
            println!("{}", output.source.display());
        }
        Commands::Signatures { files, output } => {
            let rendered = autobind::extract_signatures(&files, output.as_deref())
                .context("Failed to extract signatures")?;
            if output.is_none() {
                print!("{rendered}");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if verbose {
        EnvFilter::new("autobind=debug,autobind_doxygen=debug,autobind_generator=debug,autobind_sigscan=debug,autobind_scaffold=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
