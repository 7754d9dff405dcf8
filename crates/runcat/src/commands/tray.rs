/// Runs the tray icon until the user picks "Exit".
#[cfg(windows)]
pub fn execute() {
    if let Err(e) = runcat_windows::app::run() {
        runcat_core::log_error!("Tray error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
pub fn execute() {
    super::unsupported();
}
