use clap::{Parser, Subcommand};
use rack_site::{config, output, site};
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    let hash = env!("RACK_SITE_GIT_HASH");
    if hash.is_empty() {
        return env!("CARGO_PKG_VERSION");
    }
    let dirty = if env!("RACK_SITE_GIT_DIRTY") == "true" {
        "-dirty"
    } else {
        ""
    };
    // Leaked once at startup
    Box::leak(format!("{} ({hash}{dirty})", env!("CARGO_PKG_VERSION")).into_boxed_str())
}

#[derive(Parser)]
#[command(name = "rack-site")]
#[command(about = "Build the Rack Storage Solutions static site")]
#[command(long_about = "\
Build the Rack Storage Solutions static site

Each entry of the page table pairs an HTML fragment with an output path,
a title and a description. Fragments are merged into the shared shell with
the brand stylesheet inlined, and root-relative links are rewritten for the
deployment prefix.

Project structure:

  ./
  ├── site.toml                    # Optional overrides (see gen-config)
  ├── css/brand.css                # Inlined into every page
  ├── pages/                       # Fragments
  │   ├── core/home.html           # → docs/index.html
  │   ├── core/about.html          # → docs/about.html
  │   └── services/...
  └── docs/                        # Output, served by GitHub Pages

Run without a subcommand to build. The exit status is non-zero when any
page could not be built.")]
#[command(version = version_string())]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file, relative to the project root
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Output directory (overrides paths.output)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build every page in the table (default)
    Build,
    /// Verify the stylesheet and fragments exist without building
    Check,
    /// List the page table with canonical URLs
    Pages,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Command::Build) => {
            let site_config = load_site_config(&cli)?;
            let report = site::build_site(&cli.root, &site_config, &mut |event| {
                output::print_build_event(&event)
            })?;
            output::print_build_summary(&report, &site_config.paths.output);
            if !report.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Command::Check) => {
            let site_config = load_site_config(&cli)?;
            let report = site::check_site(&cli.root, &site_config);
            output::print_check_output(&report, &site_config);
            if !report.is_ok() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Command::Pages) => {
            let site_config = load_site_config(&cli)?;
            output::print_page_table(&site_config);
        }
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Load `site.toml` from the project root and apply the `--output` override.
fn load_site_config(cli: &Cli) -> Result<config::SiteConfig, config::ConfigError> {
    let mut site_config = config::load_config(&cli.root.join(&cli.config))?;
    if let Some(output) = &cli.output {
        site_config.paths.output = output.clone();
    }
    Ok(site_config)
}
