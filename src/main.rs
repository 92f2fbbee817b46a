use clap::{Parser, Subcommand};
use script_meta::assets::Assets;
use script_meta::config::{self, DEFAULT_CONFIG_FILE};
use script_meta::emit::{self, EmitOptions};
use script_meta::{logging, output};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "script-meta")]
#[command(about = "Generate meta.json documents for a built script bundle")]
#[command(long_about = "\
Generate meta.json documents for a built script bundle

Every directory of the build output gets a meta.json listing its scripts and
subfolders. Scripts describe themselves with a comment before their first
statement, and opt out with @ignore:

  // @description Restart the dev server
  // @ignore

Output layout:

  dist/
  ├── meta.json                    # Root document, named after the package
  ├── README.md                    # Copy of readmeFile (optional)
  ├── icons/                       # Local icons, renamed <stem>-<token>.<ext>
  ├── deploy.js
  └── tools/
      ├── meta.json                # Description/icon from folderDescriptionList
      └── restart.js

Run 'script-meta gen-config' to print a documented script-meta.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Build output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Directory local icon and README paths are relative to
    /// (defaults to the configuration file's directory)
    #[arg(long, global = true)]
    context: Option<PathBuf>,

    /// More diagnostics on stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate documents, icons, and README into the output directory
    Build,
    /// Validate config and show what would be generated, without writing
    Check,
    /// Print a stock script-meta.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            let plugin_config = config::load_config(&cli.config)?;
            let context = resolve_context(cli.context.as_deref(), &cli.config);
            println!("==> Reading {}", cli.output.display());
            let mut assets = Assets::load_dir(&cli.output)?;
            let report = emit::emit(
                &plugin_config,
                &mut assets,
                EmitOptions {
                    context: &context,
                    output_dir: Some(&cli.output),
                },
            )?;
            assets.write_paths(&cli.output, report.written_paths())?;
            output::print_emit_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let plugin_config = config::load_config(&cli.config)?;
            let context = resolve_context(cli.context.as_deref(), &cli.config);
            println!("==> Checking {}", cli.output.display());
            let mut assets = Assets::load_dir(&cli.output)?;
            let report = emit::emit(
                &plugin_config,
                &mut assets,
                EmitOptions {
                    context: &context,
                    output_dir: None,
                },
            )?;
            output::print_emit_output(&report);
            println!("==> Configuration is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolve the directory local references are relative to.
fn resolve_context(cli_context: Option<&Path>, config_path: &Path) -> PathBuf {
    match cli_context {
        Some(dir) => dir.to_path_buf(),
        None => config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}
