pub mod autostart;
pub mod init;
pub mod sample;
pub mod tray;

/// Exits with an error on targets without a tray host.
#[cfg(not(windows))]
pub(crate) fn unsupported() -> ! {
    eprintln!("Error: this command is only available on Windows.");
    std::process::exit(1);
}
