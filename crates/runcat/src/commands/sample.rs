/// Prints one CPU usage measurement along with the frame interval the
/// tray animation would use for it.
#[cfg(windows)]
pub fn execute() {
    let config = runcat_core::config::load();
    match runcat_windows::cpu::measure(std::time::Duration::from_secs(1)) {
        Ok(usage) => {
            println!("{}", runcat_core::animation::tooltip(usage));
            println!(
                "Frame interval: {:.1} ms",
                config.animation.interval_ms(usage)
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(windows))]
pub fn execute() {
    super::unsupported();
}
