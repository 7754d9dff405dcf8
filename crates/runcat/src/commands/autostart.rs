/// Manages automatic startup when the user logs on.
///
/// Delegates to [`runcat_windows::autostart`] for registry operations.
#[cfg(windows)]
pub fn enable() {
    match runcat_windows::autostart::enable() {
        Ok(()) => println!("Autostart enabled."),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(windows)]
pub fn disable() {
    match runcat_windows::autostart::disable() {
        Ok(()) => println!("Autostart disabled."),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(windows)]
pub fn status() {
    if runcat_windows::autostart::is_enabled() {
        println!("Autostart is currently enabled.");
    } else {
        println!("Autostart is currently disabled.");
    }
}

#[cfg(not(windows))]
pub fn enable() {
    super::unsupported();
}

#[cfg(not(windows))]
pub fn disable() {
    super::unsupported();
}

#[cfg(not(windows))]
pub fn status() {
    super::unsupported();
}
