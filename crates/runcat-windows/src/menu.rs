//! Native popup menu built from [`runcat_core::menu::layout`].

use runcat_core::menu::{self, MenuCommand, MenuEntry, MenuState};
use windows::Win32::Foundation::{HWND, LPARAM, POINT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, HMENU, MENU_ITEM_FLAGS, MF_CHECKED,
    MF_GRAYED, MF_POPUP, MF_SEPARATOR, MF_STRING, MFT_RADIOCHECK, PostMessageW, SetForegroundWindow,
    TPM_NONOTIFY, TPM_RETURNCMD, TPM_RIGHTBUTTON, TrackPopupMenuEx, WM_NULL,
};
use windows::core::PCWSTR;

/// Shows the tray menu at the cursor and returns the chosen command.
///
/// Blocks in a modal loop until the menu closes. Timer messages are
/// still dispatched to `hwnd` while it is open.
pub fn show(hwnd: HWND, state: &MenuState) -> Option<MenuCommand> {
    let popup = build(&menu::layout(state))?;

    let mut point = POINT::default();
    // SAFETY: all handles are valid for the duration of the calls; the
    // menu (and its submenus) is destroyed before returning.
    let chosen = unsafe {
        let _ = GetCursorPos(&mut point);
        // Required so the menu closes when the user clicks elsewhere.
        let _ = SetForegroundWindow(hwnd);
        let id = TrackPopupMenuEx(
            popup,
            (TPM_RETURNCMD | TPM_RIGHTBUTTON | TPM_NONOTIFY).0,
            point.x,
            point.y,
            hwnd,
            None,
        );
        let _ = PostMessageW(Some(hwnd), WM_NULL, WPARAM(0), LPARAM(0));
        let _ = DestroyMenu(popup);
        id.0 as u32
    };

    MenuCommand::from_id(chosen)
}

/// Creates a popup menu (recursively) from layout entries.
fn build(entries: &[MenuEntry]) -> Option<HMENU> {
    // SAFETY: CreatePopupMenu has no preconditions.
    let popup = unsafe { CreatePopupMenu() }.ok()?;
    for entry in entries {
        if !append(popup, entry) {
            runcat_core::log_warn!("Could not append menu entry {entry:?}");
        }
    }
    Some(popup)
}

fn append(popup: HMENU, entry: &MenuEntry) -> bool {
    match entry {
        MenuEntry::Separator => {
            // SAFETY: `popup` is a live menu handle.
            unsafe { AppendMenuW(popup, MF_SEPARATOR, 0, PCWSTR::null()) }.is_ok()
        }
        MenuEntry::Item {
            label,
            command,
            checked,
            enabled,
            radio,
        } => {
            let flags = MF_STRING | check_flags(*checked, *enabled, *radio);
            append_labeled(popup, flags, command.id() as usize, label)
        }
        MenuEntry::Submenu {
            label,
            entries,
            enabled,
        } => {
            let Some(sub) = build(entries) else {
                return false;
            };
            let flags = MF_POPUP | MF_STRING | check_flags(false, *enabled, false);
            // The parent takes ownership of `sub` and destroys it with itself.
            append_labeled(popup, flags, sub.0 as usize, label)
        }
    }
}

fn append_labeled(popup: HMENU, flags: MENU_ITEM_FLAGS, id: usize, label: &str) -> bool {
    let wide: Vec<u16> = label.encode_utf16().chain(std::iter::once(0)).collect();
    // SAFETY: `wide` is NUL-terminated and outlives the call.
    unsafe { AppendMenuW(popup, flags, id, PCWSTR(wide.as_ptr())) }.is_ok()
}

fn check_flags(checked: bool, enabled: bool, radio: bool) -> MENU_ITEM_FLAGS {
    let mut flags = MENU_ITEM_FLAGS(0);
    if radio {
        // Draws the check mark as a bullet.
        flags |= MENU_ITEM_FLAGS(MFT_RADIOCHECK.0);
    }
    if checked {
        flags |= MF_CHECKED;
    }
    if !enabled {
        flags |= MF_GRAYED;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radio_items_use_bullet_marks() {
        let flags = check_flags(true, true, true);
        assert_eq!(flags.0 & MFT_RADIOCHECK.0, MFT_RADIOCHECK.0);
        assert_eq!(flags.0 & MF_CHECKED.0, MF_CHECKED.0);
    }

    #[test]
    fn plain_items_keep_check_marks() {
        let flags = check_flags(true, false, false);
        assert_eq!(flags.0 & MFT_RADIOCHECK.0, 0);
        assert_eq!(flags.0 & MF_GRAYED.0, MF_GRAYED.0);
    }
}
