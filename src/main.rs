use aapt_lite::{partition_layouts, AaptLiteCommand, Config, FileFinder};
use clap::Parser;
use colored::Colorize;
use miette::{miette, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// aapt-lite - compile-only R classes and data-binding stubs for Android
#[derive(Parser, Debug)]
#[command(name = "aapt-lite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Package of the generated classes
    #[arg(short, long)]
    package: Option<String>,

    /// Resource files (comma-separated)
    #[arg(long, value_delimiter = ',')]
    resource_files: Vec<PathBuf>,

    /// `res/` directories to scan for resource files (can be specified multiple times)
    #[arg(long = "res-dir")]
    res_dir: Vec<PathBuf>,

    /// Data-binding class info JSON files of dependencies (comma-separated)
    #[arg(long, value_delimiter = ',')]
    class_infos: Vec<PathBuf>,

    /// Dependency R.txt files (comma-separated)
    #[arg(long, value_delimiter = ',')]
    r_txts: Vec<PathBuf>,

    /// Exclude dependency symbols from the generated R class
    #[arg(long)]
    non_transitive_r_class: bool,

    /// Output directory for R.java and BR.java
    #[arg(short, long)]
    r_class_output: Option<PathBuf>,

    /// Output directory for binding stubs
    #[arg(short, long)]
    stubs_output: Option<PathBuf>,

    /// Patterns to exclude from discovery (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("aapt-lite v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let command = build_command(&config)?;
    let summary = command.run()?;

    if !cli.quiet {
        println!(
            "{} {} symbols, {} layouts, {} binding stubs for {}",
            "✓ Generated".green().bold(),
            summary.symbols.to_string().cyan(),
            summary.layouts.to_string().cyan(),
            summary.stubs.to_string().cyan(),
            command.package.bold()
        );
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(Path::new("."))?
    };

    // Override with CLI arguments
    if cli.package.is_some() {
        config.package = cli.package.clone();
    }
    if !cli.resource_files.is_empty() {
        config.resource_files = cli.resource_files.clone();
    }
    if !cli.res_dir.is_empty() {
        config.resource_dirs = cli.res_dir.clone();
    }
    if !cli.class_infos.is_empty() {
        config.class_infos = cli.class_infos.clone();
    }
    if !cli.r_txts.is_empty() {
        config.r_txts = cli.r_txts.clone();
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if cli.non_transitive_r_class {
        config.non_transitive_r_class = true;
    }
    if let Some(r_class) = &cli.r_class_output {
        config.output.r_class = r_class.clone();
    }
    if let Some(stubs) = &cli.stubs_output {
        config.output.stubs = stubs.clone();
    }

    Ok(config)
}

fn build_command(config: &Config) -> Result<AaptLiteCommand> {
    let package = config
        .package
        .clone()
        .ok_or_else(|| miette!("No package given: pass --package or set `package` in the config file"))?;

    let mut resource_files = config.resource_files.clone();
    if !config.resource_dirs.is_empty() {
        info!("Discovering resources...");
        let finder = FileFinder::new(config);
        resource_files.extend(finder.find_resources(&config.resource_dirs));
    }
    info!("Found {} resource files", resource_files.len());

    let layout_files = partition_layouts(&resource_files);
    Ok(AaptLiteCommand {
        package,
        resource_files,
        layout_files,
        class_infos: config.class_infos.clone(),
        r_txts: config.r_txts.clone(),
        non_transitive: config.non_transitive_r_class,
        r_class_output: config.output.r_class.clone(),
        stubs_output: config.output.stubs.clone(),
    })
}
