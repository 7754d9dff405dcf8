//! Windows autostart registration via the HKCU Run registry key.
//!
//! Writes a value under
//! `HKEY_CURRENT_USER\Software\Microsoft\Windows\CurrentVersion\Run`
//! named after the executable (see [`runcat_core::startup::value_name`])
//! so that RunCat is launched on user logon. No elevation is required
//! since HKCU is per-user.

use std::path::PathBuf;

use runcat_core::startup;
use windows::Win32::Foundation::ERROR_FILE_NOT_FOUND;
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_SAM_FLAGS, REG_SZ, RegCloseKey,
    RegDeleteValueW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW,
};
use windows::core::PCWSTR;

const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

/// Registers RunCat to start on Windows logon.
///
/// Writes the quoted executable path to the registry Run key.
pub fn enable() -> Result<(), String> {
    let exe = current_exe()?;
    let name = value_name(&exe)?;
    let key = open_run_key(KEY_SET_VALUE)?;
    let result = set_string_value(key, &name, &startup::command_line(&exe));
    close_key(key);
    result
}

/// Removes the RunCat autostart entry from the registry.
///
/// Returns `Ok(())` if the value was removed or didn't exist.
pub fn disable() -> Result<(), String> {
    let name = value_name(&current_exe()?)?;
    let key = open_run_key(KEY_SET_VALUE)?;
    let result = delete_value(key, &name);
    close_key(key);
    result
}

/// Checks whether the RunCat autostart entry exists in the registry.
pub fn is_enabled() -> bool {
    let Ok(name) = current_exe().and_then(|exe| value_name(&exe)) else {
        return false;
    };
    let Ok(key) = open_run_key(KEY_QUERY_VALUE) else {
        return false;
    };
    let exists = query_value_exists(key, &name);
    close_key(key);
    exists
}

/// Flips the autostart entry and returns the new state.
pub fn toggle() -> Result<bool, String> {
    if is_enabled() {
        disable().map(|()| false)
    } else {
        enable().map(|()| true)
    }
}

fn current_exe() -> Result<PathBuf, String> {
    std::env::current_exe().map_err(|e| format!("could not resolve exe path: {e}"))
}

fn value_name(exe: &std::path::Path) -> Result<String, String> {
    startup::value_name_for(exe)
        .ok_or_else(|| format!("no usable value name for {}", exe.display()))
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Opens the HKCU Run key with the given access rights.
fn open_run_key(access: REG_SAM_FLAGS) -> Result<HKEY, String> {
    let wide_key = wide(RUN_KEY);
    let mut key = HKEY::default();
    // SAFETY: RegOpenKeyExW is a standard Win32 registry API. We pass valid
    // pointers and close the key after use.
    let status = unsafe {
        RegOpenKeyExW(
            HKEY_CURRENT_USER,
            PCWSTR(wide_key.as_ptr()),
            None,
            access,
            &mut key,
        )
    };
    if status.is_err() {
        return Err(format!("could not open registry key: {status:?}"));
    }
    Ok(key)
}

/// Writes a REG_SZ value under the opened key.
fn set_string_value(key: HKEY, name: &str, value: &str) -> Result<(), String> {
    let wide_name = wide(name);
    let wide_value = wide(value);
    // SAFETY: reinterpreting a &[u16] as &[u8] is safe; the layout is
    // contiguous and we compute the correct byte length.
    let bytes: &[u8] =
        unsafe { std::slice::from_raw_parts(wide_value.as_ptr().cast(), wide_value.len() * 2) };
    // SAFETY: RegSetValueExW is a standard Win32 registry API. We pass the
    // correct byte length for the wide-string value.
    let status =
        unsafe { RegSetValueExW(key, PCWSTR(wide_name.as_ptr()), None, REG_SZ, Some(bytes)) };
    if status.is_err() {
        return Err(format!("could not write registry value: {status:?}"));
    }
    Ok(())
}

/// Deletes the named value from the opened key.
fn delete_value(key: HKEY, name: &str) -> Result<(), String> {
    let wide_name = wide(name);
    // SAFETY: RegDeleteValueW is a standard Win32 registry API.
    let status = unsafe { RegDeleteValueW(key, PCWSTR(wide_name.as_ptr())) };
    if status.is_err() && status != ERROR_FILE_NOT_FOUND {
        return Err(format!("could not delete registry value: {status:?}"));
    }
    Ok(())
}

/// Checks if the named value exists under the opened key.
fn query_value_exists(key: HKEY, name: &str) -> bool {
    let wide_name = wide(name);
    // SAFETY: RegQueryValueExW with null data buffer just checks existence.
    let status =
        unsafe { RegQueryValueExW(key, PCWSTR(wide_name.as_ptr()), None, None, None, None) };
    status.is_ok()
}

/// Closes an open registry key handle.
fn close_key(key: HKEY) {
    // SAFETY: RegCloseKey is safe to call on any valid HKEY.
    let _ = unsafe { RegCloseKey(key) };
}
