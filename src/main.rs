//! Strands Agents MCP Server - Entry Point
//!
//! This is the main entry point for the strands-mcp-server binary.
//! It sets up logging, parses arguments, loads the topic registry and
//! starts the server.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rmcp::{ServiceExt, transport::stdio};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use strands_mcp_server::config;
use strands_mcp_server::docs::{ResolverConfig, TopicRegistry, bundle, resolver};
use strands_mcp_server::mcp::StrandsDocs;

/// MCP server for Strands Agents documentation.
#[derive(Parser, Debug)]
#[command(name = "strands-mcp-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory of markdown topic files to serve instead of the built-in docs.
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Number of matches `get_topic` returns when the client sets no limit.
    #[arg(long, default_value_t = resolver::DEFAULT_LIMIT)]
    default_limit: usize,

    /// Minimum score (0.0 - 1.0) for fuzzy matches.
    #[arg(long, default_value_t = resolver::DEFAULT_FUZZY_THRESHOLD)]
    fuzzy_threshold: f64,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add this server to .mcp.json in the current directory.
    Config {
        /// Extra arguments the MCP client should pass to the server.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        server_args: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl Args {
    /// Parses the log level string into a tracing Level.
    fn parse_log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => anyhow::bail!("invalid log level: {}", other),
        }
    }

    /// Builds the resolver settings from the command line.
    fn resolver_config(&self) -> Result<ResolverConfig> {
        if self.default_limit == 0 {
            anyhow::bail!("--default-limit must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            anyhow::bail!(
                "--fuzzy-threshold must be between 0.0 and 1.0, got {}",
                self.fuzzy_threshold
            );
        }
        let defaults = ResolverConfig::default();
        Ok(ResolverConfig {
            default_limit: self.default_limit,
            fuzzy_threshold: self.fuzzy_threshold,
            max_limit: defaults.max_limit.max(self.default_limit),
        })
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(level: Level, format: LogFormat) -> Result<()> {
    // Create an env filter that respects RUST_LOG but has a default level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strands_mcp_server={level},rmcp={level}")));

    // Note: We write logs to stderr to keep stdout clean for MCP communication
    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            )
            .try_init(),
    };
    result.context("failed to initialize tracing subscriber")?;

    Ok(())
}

/// Loads the topic registry from `--content-dir` or the built-in bundle.
fn load_registry(content_dir: Option<&PathBuf>) -> Result<TopicRegistry> {
    let registry = match content_dir {
        Some(dir) => bundle::registry_from_dir(dir)
            .with_context(|| format!("failed to load topics from {}", dir.display()))?,
        None => bundle::builtin_registry().context("failed to load built-in topics")?,
    };
    if registry.is_empty() {
        anyhow::bail!("no documentation topics found");
    }
    Ok(registry)
}

/// Main entry point.
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    if let Some(Command::Config { server_args }) = &args.command {
        return config::configure(server_args);
    }

    // Initialize tracing
    let log_level = args.parse_log_level()?;
    init_tracing(log_level, args.log_format)?;

    let resolver_config = args.resolver_config()?;

    // Any inconsistency in the bundle stops us before the transport opens
    let registry = load_registry(args.content_dir.as_ref())?;

    info!(
        topics = registry.len(),
        content_dir = ?args.content_dir,
        default_limit = resolver_config.default_limit,
        fuzzy_threshold = resolver_config.fuzzy_threshold,
        "starting strands-mcp-server"
    );

    let server = StrandsDocs::new(registry).with_resolver_config(resolver_config);

    info!("starting MCP server with stdio transport");

    // Start the MCP server with stdio transport
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;

    info!("MCP server started, waiting for messages");

    // Wait for the service to complete (handles graceful shutdown)
    service.waiting().await?;

    info!("MCP server shut down gracefully");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_log_level() {
        let args = Args::parse_from(["strands-mcp-server", "--log-level", "DEBUG"]);
        assert_eq!(args.parse_log_level().unwrap(), Level::DEBUG);

        let args = Args::parse_from(["strands-mcp-server", "--log-level", "loud"]);
        assert!(args.parse_log_level().is_err());
    }

    #[test]
    fn test_args_resolver_config() {
        let args = Args::parse_from([
            "strands-mcp-server",
            "--default-limit",
            "3",
            "--fuzzy-threshold",
            "0.5",
        ]);
        let config = args.resolver_config().unwrap();
        assert_eq!(config.default_limit, 3);
        assert!((config.fuzzy_threshold - 0.5).abs() < f64::EPSILON);

        let args = Args::parse_from(["strands-mcp-server", "--fuzzy-threshold", "1.5"]);
        assert!(args.resolver_config().is_err());

        let args = Args::parse_from(["strands-mcp-server", "--default-limit", "0"]);
        assert!(args.resolver_config().is_err());
    }

    #[test]
    fn test_config_subcommand_collects_server_args() {
        let args =
            Args::parse_from(["strands-mcp-server", "config", "--content-dir", "docs"]);
        match args.command {
            Some(Command::Config { server_args }) => {
                assert_eq!(server_args, vec!["--content-dir", "docs"]);
            }
            other => panic!("expected config subcommand, got {other:?}"),
        }
    }

    #[test]
    fn test_load_registry_builtin() {
        let registry = load_registry(None).unwrap();
        assert!(registry.get("agent-loop").is_ok());
    }
}
