//! Configuration helper for MCP clients.
//!
//! This module provides functionality to create/update `.mcp.json` in the
//! project root with a strands-mcp-server entry.

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// Key of the server entry under `mcpServers`.
pub const SERVER_ENTRY: &str = "strands-agents";

/// Executable name written into the entry.
pub const SERVER_COMMAND: &str = "strands-mcp-server";

/// Configure strands-mcp-server by creating/updating .mcp.json in the current directory.
///
/// ## Errors
/// See [`configure_in`].
pub fn configure(server_args: &[String]) -> Result<()> {
    configure_in(Path::new("."), server_args)?;

    println!("\n{}", "=".repeat(60));
    println!("✓ Updated .mcp.json");
    println!("{}", "=".repeat(60));
    println!("\nNext steps:");
    println!("  1. Restart your MCP client if it's running");
    println!("  2. {SERVER_COMMAND} will start automatically");
    println!("  3. Try: \"How do I add hooks to a Strands agent?\"\n");

    Ok(())
}

/// Adds the server entry to `dir/.mcp.json`, creating the file if needed.
///
/// `server_args` are passed to the server on every start, e.g.
/// `["--content-dir", "docs"]`.
///
/// ## Errors
/// Returns an error if:
/// - File I/O fails
/// - Existing .mcp.json contains invalid JSON, or `mcpServers` is not an object
/// - strands-mcp-server is already configured
pub fn configure_in(dir: &Path, server_args: &[String]) -> Result<()> {
    let config_file = dir.join(".mcp.json");

    // Read existing config or create new
    let config: Value = if config_file.exists() {
        let content = fs::read_to_string(&config_file).context("failed to read .mcp.json")?;
        serde_json::from_str(&content).context("failed to parse .mcp.json - invalid JSON")?
    } else {
        json!({})
    };

    let Value::Object(mut config_obj) = config else {
        bail!(".mcp.json must contain a JSON object");
    };

    let mcp_servers = config_obj
        .entry("mcpServers")
        .or_insert_with(|| json!({}));
    let Some(mcp_servers_obj) = mcp_servers.as_object_mut() else {
        bail!("mcpServers in .mcp.json is not an object");
    };

    if mcp_servers_obj.contains_key(SERVER_ENTRY) {
        bail!(
            "{SERVER_ENTRY} is already configured in .mcp.json\n\n\
            To reconfigure, first remove the existing entry, then run:\n  \
            {SERVER_COMMAND} config"
        );
    }

    mcp_servers_obj.insert(
        SERVER_ENTRY.to_string(),
        json!({
            "command": SERVER_COMMAND,
            "args": server_args,
        }),
    );

    // Write atomically (temp file + rename)
    let temp_file = config_file.with_extension("tmp");
    let json_str = serde_json::to_string_pretty(&Value::Object(config_obj))
        .context("failed to serialize JSON")?;

    fs::write(&temp_file, json_str).context("failed to write temporary config file")?;
    fs::rename(&temp_file, &config_file).context("failed to rename temporary config file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn read_config(dir: &Path) -> Value {
        let content = fs::read_to_string(dir.join(".mcp.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn test_configure_creates_new_file() {
        let dir = tempfile::tempdir().unwrap();

        configure_in(dir.path(), &[]).unwrap();

        let config = read_config(dir.path());
        assert_eq!(
            config["mcpServers"][SERVER_ENTRY]["command"],
            SERVER_COMMAND
        );
        assert_eq!(config["mcpServers"][SERVER_ENTRY]["args"], json!([]));
        assert!(!dir.path().join(".mcp.tmp").exists());
    }

    #[test]
    fn test_configure_keeps_other_servers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".mcp.json"),
            r#"{"mcpServers": {"other": {"command": "other-server"}}}"#,
        )
        .unwrap();

        let args = vec!["--content-dir".to_string(), "docs".to_string()];
        configure_in(dir.path(), &args).unwrap();

        let config = read_config(dir.path());
        assert_eq!(config["mcpServers"]["other"]["command"], "other-server");
        assert_eq!(
            config["mcpServers"][SERVER_ENTRY]["args"],
            json!(["--content-dir", "docs"])
        );
    }

    #[test]
    fn test_configure_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".mcp.json"), "{not json").unwrap();

        let err = configure_in(dir.path(), &[]).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_configure_rejects_non_object_servers() {
        let dir = tempfile::tempdir().unwrap();
        let original = r#"{"mcpServers": ["other-server"]}"#;
        fs::write(dir.path().join(".mcp.json"), original).unwrap();

        let err = configure_in(dir.path(), &[]).unwrap_err();
        assert!(err.to_string().contains("not an object"));
        assert_eq!(
            fs::read_to_string(dir.path().join(".mcp.json")).unwrap(),
            original
        );

        fs::write(dir.path().join(".mcp.json"), "[]").unwrap();
        assert!(configure_in(dir.path(), &[]).is_err());
    }

    #[test]
    #[serial]
    fn test_configure_fails_if_already_exists() {
        let original_dir = std::env::current_dir().unwrap();
        let temp_dir = tempfile::tempdir().unwrap();
        std::env::set_current_dir(temp_dir.path()).unwrap();

        configure(&[]).unwrap();

        let result = configure(&[]);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("already configured")
        );

        // Restore original directory before cleanup
        std::env::set_current_dir(&original_dir).unwrap();
    }
}
