use windows::Win32::System::Console::{ATTACH_PARENT_PROCESS, AttachConsole};

/// Attaches to the console of the launching process, if any.
///
/// Release builds use the GUI subsystem so the tray launch does not
/// open a console window. CLI subcommands call this first so their
/// output reaches the terminal they were started from.
pub fn attach_parent() {
    // SAFETY: AttachConsole fails harmlessly when there is no parent
    // console or one is already attached.
    unsafe {
        let _ = AttachConsole(ATTACH_PARENT_PROCESS);
    }
}
