/*!
 * dpiwatch CLI - Command Line Interface
 *
 * Watches SOURCE for density-suffixed PNG assets and routes each one into
 * DEST/<prefix>-<qualifier>. Runs until killed.
 */

use clap::{Parser, ValueEnum};
use dpiwatch::{
    config::{LogLevel, TransferMode, WatchConfig},
    core::{parse_size_override, CaseStyle},
    error::{Result, EXIT_SUCCESS},
    logging, watch, LocalSystem,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dpiwatch")]
#[command(version, about = "Route density-suffixed PNG assets into resource directories", long_about = None)]
struct Cli {
    /// Directory to watch (default: current directory)
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Resource root receiving <prefix>-<qualifier> directories (default: current directory)
    #[arg(value_name = "DEST")]
    destination: Option<PathBuf>,

    /// Copy files instead of moving them
    #[arg(short = 'c', long = "copy")]
    copy: bool,

    /// Convert base file names to snake_case
    #[arg(long = "convert-case")]
    convert_case: bool,

    /// Size alias override, e.g. @2x=xhdpi or =nodpi (repeatable)
    #[arg(short = 's', long = "size", value_name = "TOKEN=QUALIFIER")]
    sizes: Vec<String>,

    /// Place the resource root at this path under SOURCE
    #[arg(long = "relative-dest", value_name = "DIR")]
    relative_dest: Option<PathBuf>,

    /// Output directory prefix
    #[arg(long = "prefix", value_name = "NAME")]
    prefix: Option<String>,

    /// Extra glob pattern to ignore, relative to SOURCE (repeatable)
    #[arg(long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,

    /// Log every raw event and classification match
    #[arg(long)]
    debug: bool,

    /// Log level
    #[arg(long = "log-level", value_enum)]
    log_level: Option<LogLevelArg>,

    /// Write JSON logs to FILE instead of stderr
    #[arg(long = "log", value_name = "FILE")]
    log: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

fn main() {
    let code = match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let base_config = match cli.config {
        Some(ref config_path) => WatchConfig::from_file(config_path)?,
        None => WatchConfig::default(),
    };
    let cwd = std::env::current_dir()?;
    let config = apply_cli(base_config, cli)?.absolutize(&cwd);
    config.validate()?;

    logging::init_logging(&config)?;

    // Cooperative scheduling: every event task shares this one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let config = Arc::new(config);
    runtime
        .block_on(watch::run(config, Arc::new(LocalSystem::new())))
        .map(|_| ())
}

/// Layer command-line flags over the file configuration
fn apply_cli(mut config: WatchConfig, cli: Cli) -> Result<WatchConfig> {
    if let Some(source) = cli.source {
        config.watch_root = source;
    }
    if let Some(destination) = cli.destination {
        config.dest_root = destination;
    }
    if cli.relative_dest.is_some() {
        config.relative_dest = cli.relative_dest;
    }
    if cli.copy {
        config.transfer_mode = TransferMode::Copy;
    }
    if cli.convert_case {
        config.case_style = CaseStyle::Snake;
    }
    if let Some(prefix) = cli.prefix {
        config.dir_prefix = prefix;
    }
    for raw in &cli.sizes {
        let (token, qualifier) = parse_size_override(raw)?;
        config.sizes.insert(token, qualifier);
    }
    config.ignore_patterns.extend(cli.ignore);
    config.debug |= cli.debug;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    if cli.log.is_some() {
        config.log_file = cli.log;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dpiwatch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = apply_cli(WatchConfig::default(), parse(&[])).unwrap();
        assert_eq!(config.transfer_mode, TransferMode::Move);
        assert_eq!(config.case_style, CaseStyle::Preserve);
        assert_eq!(config.dir_prefix, "drawable");
        assert_eq!(config.log_level, LogLevel::Info);

        let config = config.absolutize(Path::new("/home/dev"));
        assert_eq!(config.watch_root, PathBuf::from("/home/dev/."));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "design",
            "/app/res",
            "--copy",
            "--convert-case",
            "-s",
            "@2x=xhdpi-v24",
            "--size",
            "=nodpi",
            "--prefix",
            "mipmap",
            "--ignore",
            "drafts/*",
            "--debug",
        ]);
        let config = apply_cli(WatchConfig::default(), cli).unwrap();

        assert_eq!(config.watch_root, PathBuf::from("design"));
        assert_eq!(config.dest_root, PathBuf::from("/app/res"));
        assert_eq!(config.transfer_mode, TransferMode::Copy);
        assert_eq!(config.case_style, CaseStyle::Snake);
        assert_eq!(config.sizes.get("@2x").map(String::as_str), Some("xhdpi-v24"));
        assert_eq!(config.sizes.get("").map(String::as_str), Some("nodpi"));
        assert_eq!(config.dir_prefix, "mipmap");
        assert_eq!(config.ignore_patterns, vec!["drafts/*".to_string()]);
        assert!(config.debug);
    }

    #[test]
    fn test_relative_dest() {
        let cli = parse(&["/work/design", "--relative-dest", "res"]);
        let config = apply_cli(WatchConfig::default(), cli).unwrap();
        assert_eq!(config.destination_root(), PathBuf::from("/work/design/res"));
    }

    #[test]
    fn test_malformed_size_is_rejected() {
        let cli = parse(&["--size", "@2x"]);
        assert!(apply_cli(WatchConfig::default(), cli).is_err());
    }
}
