#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "runcat",
    version,
    about = "A running cat in the Windows tray that speeds up with CPU load"
)]
struct Cli {
    /// Runs the tray icon when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Manage launching RunCat at logon
    Autostart {
        #[command(subcommand)]
        command: AutostartCommands,
    },
    /// Print the current CPU usage measured over one second
    Sample,
}

#[derive(Subcommand)]
enum AutostartCommands {
    /// Launch RunCat at logon
    Enable,
    /// Stop launching RunCat at logon
    Disable,
    /// Show whether RunCat launches at logon
    Status,
}

fn main() {
    #[cfg(windows)]
    runcat_windows::console::attach_parent();

    let cli = Cli::parse();

    match cli.command {
        None => commands::tray::execute(),
        Some(Commands::Init) => commands::init::execute(),
        Some(Commands::Sample) => commands::sample::execute(),
        Some(Commands::Autostart { command }) => match command {
            AutostartCommands::Enable => commands::autostart::enable(),
            AutostartCommands::Disable => commands::autostart::disable(),
            AutostartCommands::Status => commands::autostart::status(),
        },
    }
}
