use colored::Colorize;

use crate::registry::NetworkEntry;

pub fn display_header(title: &str) {
    println!("\n{}", "=".repeat(100).bright_cyan());
    println!("{}", title.bright_white().bold());
    println!("{}", "=".repeat(100).bright_cyan());
}

pub fn display_info(label: &str, value: &str) {
    println!("{}: {}", label.bright_blue(), value.white());
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn display_error(message: &str) {
    println!("{} {}", "✗".red().bold(), message.red());
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

pub fn truncate(value: &str, max: usize) -> String {
    if value.len() > max {
        format!("{}...", &value[..max - 3])
    } else {
        value.to_string()
    }
}

pub fn display_networks(entries: &[NetworkEntry]) {
    if entries.is_empty() {
        display_warning("No networks registered");
        return;
    }

    println!(
        "{:<8} │ {:<9} │ {:<20} │ {}",
        " Env".bright_blue().bold(),
        "Network".bright_blue().bold(),
        "Chain ID".bright_blue().bold(),
        "RPC URL".bright_blue().bold()
    );
    println!("{}", "─".repeat(100).bright_black());

    for entry in entries {
        let chain_id = match &entry.hex_chain_id {
            Some(hex) => format!("{} ({})", entry.chain_id, hex),
            None => entry.chain_id.clone(),
        };
        println!(
            " {:<7} │ {:<9} │ {:<20} │ {}",
            entry.environment.to_string().white(),
            entry.name.white(),
            chain_id.white(),
            truncate(&entry.rpc_url, 52).bright_black()
        );
        for link in &entry.explorer_links {
            println!(
                " {:<7} │ {:<9} │ {:<20} │ {} {}",
                "", "", "",
                format!("{}:", link.name).bright_black(),
                truncate(&link.url, 45).bright_black()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_values_intact() {
        assert_eq!(truncate("pacific-1", 20), "pacific-1");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }
}
