//! Tray icon frames as `HICON`s.
//!
//! Frames come from `<runner>_<frame>.ico` files when an icon directory
//! is configured, otherwise from [`runcat_core::sprite`]. Each frame is
//! created on first use and kept until the cache is dropped.

use std::collections::HashMap;
use std::path::Path;

use runcat_core::Runner;
use runcat_core::config::IconConfig;
use runcat_core::sprite::{self, GLYPH_COLOR};
use windows::Win32::Graphics::Gdi::{CreateBitmap, DeleteObject};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateIconIndirect, DestroyIcon, GetSystemMetrics, HICON, ICONINFO, IMAGE_ICON,
    LR_LOADFROMFILE, LoadImageW, SM_CXSMICON,
};
use windows::core::PCWSTR;

/// Lazily created icons keyed by runner and frame index.
pub struct IconCache {
    config: IconConfig,
    size: i32,
    icons: HashMap<(Runner, usize), HICON>,
}

impl IconCache {
    pub fn new(config: IconConfig) -> Self {
        // SAFETY: GetSystemMetrics has no preconditions.
        let size = unsafe { GetSystemMetrics(SM_CXSMICON) }.max(16);
        Self {
            config,
            size,
            icons: HashMap::new(),
        }
    }

    /// Returns the icon for one frame, creating it if needed.
    pub fn get(&mut self, runner: Runner, frame: usize) -> Option<HICON> {
        if let Some(icon) = self.icons.get(&(runner, frame)) {
            return Some(*icon);
        }
        let icon = self
            .config
            .frame_path(runner, frame)
            .filter(|path| path.exists())
            .and_then(|path| load_file(&path, self.size))
            .or_else(|| from_sprite(&sprite::render(runner, frame, self.size as usize)))?;
        self.icons.insert((runner, frame), icon);
        Some(icon)
    }
}

impl Drop for IconCache {
    fn drop(&mut self) {
        for icon in self.icons.values() {
            // SAFETY: every cached handle was created by this cache and is
            // no longer shown once the tray icon has been removed.
            let _ = unsafe { DestroyIcon(*icon) };
        }
    }
}

/// Loads an `.ico` file at the given square size.
fn load_file(path: &Path, size: i32) -> Option<HICON> {
    let wide: Vec<u16> = path
        .as_os_str()
        .to_string_lossy()
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect();
    // SAFETY: the path buffer is NUL-terminated and outlives the call.
    match unsafe {
        LoadImageW(
            None,
            PCWSTR(wide.as_ptr()),
            IMAGE_ICON,
            size,
            size,
            LR_LOADFROMFILE,
        )
    } {
        Ok(handle) if !handle.is_invalid() => Some(HICON(handle.0)),
        _ => {
            runcat_core::log_warn!("Could not load icon {}", path.display());
            None
        }
    }
}

/// Builds an alpha icon from a coverage sprite.
fn from_sprite(sprite: &sprite::Sprite) -> Option<HICON> {
    let size = sprite.size() as i32;
    let pixels = sprite.to_bgra(GLYPH_COLOR);
    // Monochrome rows are padded to 16 bits. An all-zero mask lets the
    // color bitmap's alpha channel decide transparency.
    let mask_stride = sprite.size().div_ceil(16) * 2;
    let mask_bits = vec![0u8; mask_stride * sprite.size()];

    // SAFETY: both pixel buffers match the dimensions and bit depths
    // passed to CreateBitmap, and the bitmaps are deleted after
    // CreateIconIndirect has copied them.
    unsafe {
        let color = CreateBitmap(size, size, 1, 32, Some(pixels.as_ptr().cast()));
        let mask = CreateBitmap(size, size, 1, 1, Some(mask_bits.as_ptr().cast()));
        let info = ICONINFO {
            fIcon: true.into(),
            xHotspot: 0,
            yHotspot: 0,
            hbmMask: mask,
            hbmColor: color,
        };
        let icon = CreateIconIndirect(&info);
        let _ = DeleteObject(color.into());
        let _ = DeleteObject(mask.into());
        icon.ok()
    }
}
