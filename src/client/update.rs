use colored::Colorize;
use update_informer::{registry, Check};

/// Prints a notice when a newer she-pal release exists on crates.io.
/// Set SHEPAL_NO_UPDATE_CHECK to skip the lookup entirely.
pub fn check_for_update() {
    if std::env::var("SHEPAL_NO_UPDATE_CHECK").is_ok() {
        return;
    }

    let informer = update_informer::new(
        registry::Crates,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );

    let Ok(Some(version)) = informer.check_version() else {
        return;
    };

    println!(
        "\n{} {}",
        "New version available:".bright_green().bold(),
        version.to_string().bright_yellow().bold()
    );
    println!(
        "  {} {}",
        "Update with:".bright_cyan(),
        format!("cargo install {}", env!("CARGO_PKG_NAME")).bright_white()
    );
    println!(
        "  {} {}\n",
        "Disable check:".bright_black(),
        "export SHEPAL_NO_UPDATE_CHECK=1".bright_black()
    );
}
