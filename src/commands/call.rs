use anyhow::{Context, Result};
use serde_json::Value;

use obsidian_mcp::{VaultConfig, VaultTools};

/// Runs a single tool call and prints its JSON result.
pub fn run(config: &VaultConfig, tool: &str, args: Option<&str>) -> Result<()> {
    let arguments = match args {
        Some(raw) => serde_json::from_str::<Value>(raw)
            .with_context(|| format!("--args is not valid JSON: {}", raw))?,
        None => Value::Null,
    };

    let output = VaultTools::new(config).call(tool, arguments);
    println!("{}", output.to_json());

    if output.is_error() {
        std::process::exit(1);
    }

    Ok(())
}
