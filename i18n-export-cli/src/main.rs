use std::path::PathBuf;

use clap::{Parser, Subcommand};
use i18n_export_cli::{build_registry, expand_inputs, host, load_config, plan_rows};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log rendering and writing details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a configuration file against every registered plugin.
    Validate {
        /// The configuration file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Show which templates would be rendered for which files.
    Plan {
        /// The configuration file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Exported translation files (glob patterns are expanded)
        #[arg(required = true)]
        files: Vec<String>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the post-export hooks on already exported translation files.
    Export {
        /// The configuration file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Exported translation files (glob patterns are expanded)
        #[arg(required = true)]
        files: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "i18n_export=debug"
    } else {
        "i18n_export=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("❌ {}", message);
    std::process::exit(1);
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let registry = build_registry().unwrap_or_else(|e| fail(e));

    match args.commands {
        Commands::Validate { config } => {
            load_config(&registry, &config).unwrap_or_else(|e| fail(e));
            println!("✅ {} is valid", config.display());
        }
        Commands::Plan {
            config,
            files,
            json,
        } => {
            let document = load_config(&registry, &config).unwrap_or_else(|e| fail(e));
            let files = expand_inputs(&files).unwrap_or_else(|e| fail(e));
            let rows = plan_rows(&document, &files).unwrap_or_else(|e| fail(e));

            if json {
                let out = serde_json::to_string_pretty(&rows).unwrap_or_else(|e| fail(e));
                println!("{}", out);
            } else if rows.is_empty() {
                println!("Nothing to render: export_files is missing or disabled");
            } else {
                for row in &rows {
                    println!(
                        "{} -> {} -> {}",
                        row.file.display(),
                        row.template.display(),
                        row.output
                    );
                }
            }
        }
        Commands::Export { config, files } => {
            let document = load_config(&registry, &config).unwrap_or_else(|e| fail(e));
            let files = expand_inputs(&files).unwrap_or_else(|e| fail(e));

            registry
                .after_export(&files, &document)
                .unwrap_or_else(|e| fail(e));
            if host::export_enabled(&document) {
                println!("✅ Processed {} file(s)", files.len());
            } else {
                println!("export_files is disabled; no artifacts generated");
            }
        }
    }
}
