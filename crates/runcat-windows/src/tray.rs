//! Notification-area icon via `Shell_NotifyIconW`.

use std::mem;

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Shell::{
    NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NIM_MODIFY, NOTIFY_ICON_DATA_FLAGS,
    NOTIFY_ICON_MESSAGE, NOTIFYICONDATAW, Shell_NotifyIconW,
};
use windows::Win32::UI::WindowsAndMessaging::{HICON, WM_APP};

/// Message posted to the owner window for mouse events on the icon.
pub const TRAY_CALLBACK_MSG: u32 = WM_APP + 1;

const TRAY_ID: u32 = 1;

/// The tray icon owned by a hidden window. Removed on drop.
pub struct TrayIcon {
    hwnd: HWND,
    icon: HICON,
    tooltip: String,
    shown: bool,
}

impl TrayIcon {
    /// Adds the icon to the notification area.
    ///
    /// At logon the notification area may not exist yet. A failed add is
    /// logged and the icon state kept, so the `TaskbarCreated` broadcast
    /// can add it later through [`restore`](Self::restore).
    pub fn add(hwnd: HWND, icon: HICON, tooltip: &str) -> Self {
        let mut tray = Self {
            hwnd,
            icon,
            tooltip: tooltip.to_string(),
            shown: false,
        };
        tray.shown = tray.notify(NIM_ADD, NIF_ICON | NIF_MESSAGE | NIF_TIP);
        if !tray.shown {
            runcat_core::log_warn!("Tray icon not added yet, waiting for the taskbar");
        }
        tray
    }

    /// Adds the icon again after Explorer (re)created the taskbar.
    pub fn restore(&mut self) {
        self.shown = self.notify(NIM_ADD, NIF_ICON | NIF_MESSAGE | NIF_TIP);
        if !self.shown {
            runcat_core::log_warn!("Could not restore tray icon");
        }
    }

    pub fn set_icon(&mut self, icon: HICON) {
        if icon == self.icon {
            return;
        }
        self.icon = icon;
        self.notify(NIM_MODIFY, NIF_ICON);
    }

    pub fn set_tooltip(&mut self, tooltip: &str) {
        if tooltip == self.tooltip {
            return;
        }
        self.tooltip = tooltip.to_string();
        self.notify(NIM_MODIFY, NIF_TIP);
    }

    fn notify(&self, message: NOTIFY_ICON_MESSAGE, flags: NOTIFY_ICON_DATA_FLAGS) -> bool {
        let mut data = NOTIFYICONDATAW {
            cbSize: mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: self.hwnd,
            uID: TRAY_ID,
            uFlags: flags,
            uCallbackMessage: TRAY_CALLBACK_MSG,
            hIcon: self.icon,
            ..Default::default()
        };
        // Leave room for the terminating NUL.
        let max = data.szTip.len() - 1;
        for (dst, src) in data.szTip.iter_mut().zip(self.tooltip.encode_utf16().take(max)) {
            *dst = src;
        }
        // SAFETY: `data` is fully initialised and lives across the call.
        unsafe { Shell_NotifyIconW(message, &data) }.as_bool()
    }
}

impl Drop for TrayIcon {
    fn drop(&mut self) {
        if self.shown {
            self.notify(NIM_DELETE, NOTIFY_ICON_DATA_FLAGS(0));
        }
    }
}
