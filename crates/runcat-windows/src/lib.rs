//! Windows host for RunCat. Every module is Win32-only; on other
//! targets this crate is empty.

/// Tray application: window, timers, message pump.
#[cfg(windows)]
pub mod app;

/// Launch-at-logon registration in the HKCU Run key.
#[cfg(windows)]
pub mod autostart;

/// Console attachment for CLI subcommands.
#[cfg(windows)]
pub mod console;

/// `GetSystemTimes` counter source.
#[cfg(windows)]
pub mod cpu;

#[cfg(windows)]
mod dpi;

/// Icon frames as `HICON`s.
#[cfg(windows)]
pub mod icon;

/// Native popup menu.
#[cfg(windows)]
pub mod menu;

/// Notification-area icon.
#[cfg(windows)]
pub mod tray;
