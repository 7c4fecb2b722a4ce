mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use obsidian_mcp::core::config::default_vault_path;
use obsidian_mcp::{logging, VaultConfig};

#[derive(Parser)]
#[command(name = "obsidian-mcp")]
#[command(about = "MCP server with read/write access to a local Obsidian vault", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "OBSIDIAN_VAULT_PATH",
        help = "Vault root (default: ~/Obsidian Vault)"
    )]
    vault: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = "OBSIDIAN_MCP_LOG",
        default_value = "warn",
        help = "Log level written to stderr"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server on stdio (default)
    Mcp {
        #[arg(long, help = "Show host configuration instructions")]
        install: bool,
    },
    /// Invoke one tool and print its JSON result
    Call {
        #[arg(help = "Tool name, e.g. list_notes")]
        tool: String,
        #[arg(long, help = "Tool arguments as a JSON object")]
        args: Option<String>,
    },
    /// Show vault summary
    Status {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let config = VaultConfig::new(cli.vault.unwrap_or_else(default_vault_path));

    match cli.command.unwrap_or(Commands::Mcp { install: false }) {
        Commands::Mcp { install } => {
            if install {
                print_mcp_install_instructions(&config);
                Ok(())
            } else {
                run_mcp_server(config)
            }
        }
        Commands::Call { tool, args } => commands::call::run(&config, &tool, args.as_deref()),
        Commands::Status { json } => commands::status::run(&config, json),
    }
}

#[cfg(feature = "mcp")]
fn run_mcp_server(config: VaultConfig) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(obsidian_mcp::mcp::run_mcp_server(config))
}

#[cfg(not(feature = "mcp"))]
fn run_mcp_server(_config: VaultConfig) -> anyhow::Result<()> {
    anyhow::bail!("obsidian-mcp was built without the `mcp` feature")
}

fn print_mcp_install_instructions(config: &VaultConfig) {
    use colored::Colorize;

    let vault_path = config.root.to_string_lossy().to_string();
    let binary_path = std::env::current_exe()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| "obsidian-mcp".to_string());
    let server_config = serde_json::json!({
        "mcpServers": {
            "obsidian": {
                "command": binary_path,
                "args": ["mcp"],
                "env": { "OBSIDIAN_VAULT_PATH": vault_path }
            }
        }
    });
    let server_config = serde_json::to_string_pretty(&server_config).unwrap_or_default();

    println!("{}", "MCP Server Installation Guide".bold().cyan());
    println!();
    println!("Add the following to your MCP host configuration:");
    println!();
    println!(
        "{}",
        "For Claude Desktop (~/.config/claude/claude_desktop_config.json):".dimmed()
    );
    println!("{}", server_config);
    println!();
    println!("{}", "Available tools:".bold());
    println!("  • {} - List notes, newest first", "list_notes".green());
    println!("  • {} - Read a note", "get_note".green());
    println!("  • {} / {} - Write a note", "create_note".green(), "update_note".green());
    println!("  • {} - Search note titles", "search_notes".green());
    println!("  • {} - Search note content", "full_text_search".green());
    println!("  • {} - List folders", "list_folders".green());
    println!("  • {} - Collect #tags", "get_tags".green());
    println!("  • {} - Move a note to .trash", "delete_note".green());
    println!("  • {} - Vault statistics", "get_vault_info".green());
}
