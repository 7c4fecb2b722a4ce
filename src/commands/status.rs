use anyhow::Result;
use chrono::Local;
use colored::*;
use serde::Serialize;

use obsidian_mcp::core::note::NoteSummary;
use obsidian_mcp::{VaultConfig, VaultTools};

const RECENT_NOTES: usize = 5;
const TOP_TAGS: usize = 10;

#[derive(Serialize)]
struct VaultStatus {
    timestamp: String,
    vault_path: String,
    note_count: usize,
    folder_count: usize,
    recent_notes: Vec<NoteSummary>,
    top_tags: Vec<TagCount>,
}

#[derive(Serialize)]
struct TagCount {
    tag: String,
    count: usize,
}

pub fn run(config: &VaultConfig, json: bool) -> Result<()> {
    let tools = VaultTools::new(config);
    let engine = tools.engine();

    let info = engine.vault_info()?;
    let recent_notes = engine.list_notes(None, RECENT_NOTES)?;

    let mut top_tags: Vec<TagCount> = engine
        .tags()
        .into_iter()
        .map(|(tag, notes)| TagCount {
            tag,
            count: notes.len(),
        })
        .collect();
    top_tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    top_tags.truncate(TOP_TAGS);

    let status = VaultStatus {
        timestamp: Local::now().to_rfc3339(),
        vault_path: info.vault_path,
        note_count: info.note_count,
        folder_count: info.folder_count,
        recent_notes,
        top_tags,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print_status(&status);
    }

    Ok(())
}

fn print_status(status: &VaultStatus) {
    println!("{}", "Vault Status".bold());
    println!("{}", "=".repeat(50));
    println!();
    println!("Vault:   {}", status.vault_path.cyan());
    println!("Checked: {}", status.timestamp);
    println!();
    println!("   {:<12} {:>6}", "Notes", status.note_count);
    println!("   {:<12} {:>6}", "Folders", status.folder_count);
    println!();

    println!("{}", "Recently modified".cyan());
    println!("{}", "-".repeat(30));
    if status.recent_notes.is_empty() {
        println!("   {}", "No notes yet.".yellow());
    }
    for note in &status.recent_notes {
        println!(
            "   {} {}",
            note.modified.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            note.path
        );
    }
    println!();

    println!("{}", "Top tags".cyan());
    println!("{}", "-".repeat(30));
    for usage in &status.top_tags {
        println!("   {:>4} × #{}", usage.count, usage.tag);
    }

    println!();
    println!("{}", "=".repeat(50));
}
