//! Pressmark command-line interface
//!
//! ```text
//! pressmark convert export.xml --output site/content --year-folders
//! pressmark inspect export.xml --post-types post
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pressmark::output::write_posts;
use pressmark::{ConversionConfig, ConversionOutput, FailurePolicy, convert_file};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pressmark", version)]
#[command(about = "Convert WordPress exports to Markdown", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an export and write Markdown files
    Convert {
        /// WXR export file
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        selection: Selection,

        /// Don't collect images declared by attachment items
        #[arg(long)]
        no_attached_images: bool,

        /// Don't collect images found in post bodies
        #[arg(long)]
        no_scraped_images: bool,

        /// Nest posts under a year folder
        #[arg(long)]
        year_folders: bool,

        /// Nest posts under a month folder
        #[arg(long)]
        month_folders: bool,

        /// Prefix file names with the publish date
        #[arg(long)]
        prefix_date: bool,

        /// Write every post as `<slug>.md` directly under the output directory
        #[arg(long)]
        flat: bool,

        /// Abort on the first item that can't be converted
        #[arg(long)]
        fail_fast: bool,
    },

    /// Convert an export and print the posts as JSON
    Inspect {
        /// WXR export file
        input: PathBuf,

        #[command(flatten)]
        selection: Selection,
    },
}

#[derive(Args)]
struct Selection {
    /// Post types to convert (comma-separated)
    #[arg(short = 't', long)]
    post_types: Option<String>,

    /// Configuration file (TOML, YAML or JSON); defaults to a discovered pressmark.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Selection {
    fn load_config(&self) -> Result<ConversionConfig> {
        let mut config = match &self.config {
            Some(path) => ConversionConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => ConversionConfig::discover()?.unwrap_or_default(),
        };

        if let Some(post_types) = &self.post_types {
            config.post_types = post_types.clone();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            selection,
            no_attached_images,
            no_scraped_images,
            year_folders,
            month_folders,
            prefix_date,
            flat,
            fail_fast,
        } => {
            let mut config = selection.load_config()?;

            if let Some(dir) = output {
                config.output.dir = dir;
            }
            config.save_attached_images &= !no_attached_images;
            config.save_scraped_images &= !no_scraped_images;
            config.output.year_folders |= year_folders;
            config.output.month_folders |= month_folders;
            config.output.prefix_date |= prefix_date;
            if flat {
                config.output.type_folders = false;
                config.output.post_folders = false;
            }
            if fail_fast {
                config.failure_policy = FailurePolicy::FailFast;
            }

            let output = convert_file(&input, &config)
                .await
                .with_context(|| format!("Failed to convert {}", input.display()))?;
            report_failures(&output);

            let summary = write_posts(&output.posts, &config.output)?;
            println!(
                "Wrote {} post(s) to {} ({} skipped)",
                summary.count(),
                config.output.dir.display(),
                output.failures.len()
            );
            Ok(())
        }

        Commands::Inspect { input, selection } => {
            let config = selection.load_config()?;

            let output = convert_file(&input, &config)
                .await
                .with_context(|| format!("Failed to convert {}", input.display()))?;
            report_failures(&output);

            println!("{}", serde_json::to_string_pretty(&output.posts)?);
            Ok(())
        }
    }
}

fn report_failures(output: &ConversionOutput) {
    for failure in &output.failures {
        tracing::warn!("Skipped item: {}", failure.message);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
