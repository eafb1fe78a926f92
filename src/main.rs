use clap::{Parser, Subcommand};
use lightwork::{config, lister, output, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "lightwork")]
#[command(about = "Gallery pipeline and media-listing service for the LightWork portfolio")]
#[command(long_about = "\
Gallery pipeline and media-listing service for the LightWork portfolio

The backing store is the data source. Project directories become gallery
categories; media files under the content root become gallery items.

Content structure:

  Portfolio-Content/
  ├── Bothead/                 # Project directory = filter category
  │   ├── ANIMATED3.gif
  │   └── Bothead.mp4
  ├── Degen-Legends/
  │   └── banner.gif
  └── notes.txt                # Non-media files are ignored

Commands:
  serve       Run the media lister over a local content directory
  scan        Emit the fallback data array (JSON) from a local directory
  check       Validate config and content without serving
  gen-config  Print a stock config.toml with all options documented

Run 'lightwork gen-config' to see every option and its default.")]
#[command(version = version_string())]
struct Cli {
    /// Path to config.toml
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the media lister over a local content directory
    Serve {
        /// Directory standing in for the bucket (its subdirectories are
        /// object prefixes)
        #[arg(long, default_value = ".")]
        store: PathBuf,
    },
    /// Scan a local content directory into the fallback data array
    Scan {
        /// The local Portfolio-Content directory
        #[arg(long, default_value = "Portfolio-Content")]
        content: PathBuf,
        /// Print the listing summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Validate config and content without serving
    Check {
        /// The local Portfolio-Content directory
        #[arg(long, default_value = "Portfolio-Content")]
        content: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let site_config = config::load_config(&cli.config)?;

    match cli.command {
        Command::Serve { store } => {
            lister::serve_dir(&store, site_config)?;
        }
        Command::Scan { content, summary } => {
            let items = scan::scan_content(&content, &site_config.content_root)?;
            if summary {
                output::print_scan_output(&items);
            } else {
                println!("{}", scan::to_fallback_json(&items));
            }
        }
        Command::Check { content } => {
            println!("==> Checking {}", content.display());
            let items = scan::scan_content(&content, &site_config.content_root)?;
            output::print_scan_output(&items);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
