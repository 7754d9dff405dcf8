//! Tray application: hidden window, timers, and message pump.
//!
//! Everything runs on the thread that calls [`run`]. Both timers deliver
//! `WM_TIMER` to the hidden window, whose procedure forwards them as
//! [`Tick`]s to the [`AnimationDriver`] and applies the returned
//! [`Effect`]s. Application state lives in a thread-local slot that is
//! only borrowed for the duration of one message.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use runcat_core::menu::{MenuCommand, MenuState};
use runcat_core::{
    AnimationDriver, AppResult, Config, CpuSampler, Effect, SAMPLE_INTERVAL, Theme, Tick,
    timer_millis,
};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DispatchMessageW, GetMessageW, KillTimer, MSG,
    PostMessageW, PostQuitMessage, RegisterClassW, RegisterWindowMessageW, SetTimer,
    TranslateMessage, WM_CLOSE, WM_CONTEXTMENU, WM_DESTROY, WM_RBUTTONUP, WM_TIMER, WNDCLASSW,
    WS_EX_TOOLWINDOW,
};
use windows::core::w;

use crate::autostart;
use crate::cpu::Win32SystemTimes;
use crate::dpi;
use crate::icon::IconCache;
use crate::menu;
use crate::tray::{TRAY_CALLBACK_MSG, TrayIcon};

const FRAME_TIMER_ID: usize = 1;
const SAMPLE_TIMER_ID: usize = 2;

/// Tooltip shown until the first measurement completes.
const INITIAL_TOOLTIP: &str = "RunCat";

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static TASKBAR_CREATED: Cell<u32> = const { Cell::new(0) };
}

/// State owned by the UI thread.
struct App {
    hwnd: HWND,
    driver: AnimationDriver,
    sampler: CpuSampler<Win32SystemTimes>,
    // Declared before `icons` so the tray icon is removed before the
    // handles it shows are destroyed.
    tray: TrayIcon,
    icons: IconCache,
    theme: Theme,
}

/// Runs the tray application until the user picks "Exit".
pub fn run() -> AppResult<()> {
    let config = runcat_core::config::load();
    runcat_core::log::init(&config.logging);
    runcat_core::log_info!("RunCat started (PID: {})", std::process::id());
    runcat_core::log_info!(
        "Config: runner={}, base_interval_ms={}, icons={:?}",
        config.runner.name(),
        config.animation.base_interval_ms,
        config.icons.directory
    );

    dpi::enable_dpi_awareness();
    let hwnd = create_window()?;

    let app = App::new(hwnd, config)?;
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    with_app(|app| app.restart_frame_timer(app.driver.interval()));
    // SAFETY: `hwnd` is the live window created above.
    unsafe {
        let _ = SetTimer(Some(hwnd), SAMPLE_TIMER_ID, timer_millis(SAMPLE_INTERVAL), None);
    }

    run_message_pump();

    // Dropping the state removes the tray icon and frees the icons.
    drop(APP.with(|cell| cell.borrow_mut().take()));
    runcat_core::log_info!("RunCat exited");
    Ok(())
}

impl App {
    fn new(hwnd: HWND, config: Config) -> AppResult<Self> {
        let mut sampler = CpuSampler::new(Win32SystemTimes);
        if let Err(e) = sampler.sample() {
            runcat_core::log_warn!("Initial CPU sample failed: {e}");
        }

        let driver = AnimationDriver::new(config.runner, config.animation);
        let mut icons = IconCache::new(config.icons);
        let first = icons
            .get(driver.runner(), driver.frame())
            .ok_or("could not create the first tray icon")?;
        let tray = TrayIcon::add(hwnd, first, INITIAL_TOOLTIP);

        Ok(Self {
            hwnd,
            driver,
            sampler,
            tray,
            icons,
            theme: Theme::default(),
        })
    }

    fn on_tick(&mut self, tick: Tick) {
        let effects = self.driver.handle(tick);
        for effect in effects {
            self.apply(effect);
        }
    }

    fn on_sample_timer(&mut self) {
        let result = self.sampler.sample();
        self.on_tick(Tick::Sample(result));
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::SetIcon { runner, frame } => {
                if let Some(icon) = self.icons.get(runner, frame) {
                    self.tray.set_icon(icon);
                }
            }
            Effect::SetTooltip(text) => self.tray.set_tooltip(&text),
            Effect::RestartFrameTimer(interval) => self.restart_frame_timer(interval),
        }
    }

    fn restart_frame_timer(&self, interval: Duration) {
        // SAFETY: reusing FRAME_TIMER_ID on the same window replaces the
        // pending timer, so at most one frame timer is outstanding.
        unsafe {
            let _ = SetTimer(
                Some(self.hwnd),
                FRAME_TIMER_ID,
                timer_millis(interval),
                None,
            );
        }
    }

    fn menu_state(&self) -> MenuState {
        MenuState {
            runner: self.driver.runner(),
            theme: self.theme,
            startup: autostart::is_enabled(),
        }
    }

    fn on_command(&mut self, command: MenuCommand) {
        match command {
            MenuCommand::SelectRunner(runner) => {
                runcat_core::log_info!("Runner switched to {}", runner.name());
                let effect = self.driver.select_runner(runner);
                self.apply(effect);
            }
            MenuCommand::SelectTheme(theme) => {
                if Theme::is_supported() {
                    self.theme = theme;
                }
            }
            MenuCommand::ToggleStartup => match autostart::toggle() {
                Ok(enabled) => runcat_core::log_info!("Autostart enabled: {enabled}"),
                Err(e) => runcat_core::log_error!("Autostart toggle failed: {e}"),
            },
            MenuCommand::Exit => {
                // Posted rather than destroyed inline so WM_DESTROY runs
                // after this borrow of the app state ends.
                // SAFETY: `hwnd` is our live window.
                unsafe {
                    let _ = PostMessageW(Some(self.hwnd), WM_CLOSE, WPARAM(0), LPARAM(0));
                }
            }
        }
    }
}

/// Runs `f` on the app state if it exists and is not already borrowed.
///
/// Re-entrant messages (e.g. a timer firing inside a nested modal loop
/// while the state is borrowed) are dropped instead of panicking.
fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| {
        let mut slot = cell.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    })
}

/// Opens the context menu without holding the app state, since the
/// menu's modal loop keeps dispatching timer messages.
fn show_menu(hwnd: HWND) {
    let Some(state) = with_app(|app| app.menu_state()) else {
        return;
    };
    if let Some(command) = menu::show(hwnd, &state) {
        with_app(|app| app.on_command(command));
    }
}

/// Creates the hidden window that owns the timers and the tray icon.
///
/// Must NOT be a message-only window (`HWND_MESSAGE` parent) because those
/// do not receive the `TaskbarCreated` broadcast sent when Explorer
/// restarts. Instead we create a regular hidden window with
/// `WS_EX_TOOLWINDOW` to keep it out of the taskbar.
fn create_window() -> AppResult<HWND> {
    unsafe {
        let class_name = w!("RunCatTrayWindow");
        let wc = WNDCLASSW {
            lpfnWndProc: Some(window_proc),
            lpszClassName: class_name,
            ..Default::default()
        };

        if RegisterClassW(&wc) == 0 {
            return Err("failed to register RunCatTrayWindow class".into());
        }

        TASKBAR_CREATED.with(|c| c.set(RegisterWindowMessageW(w!("TaskbarCreated"))));

        // WS_EX_TOOLWINDOW: no taskbar entry.
        // No WS_VISIBLE: window stays hidden.
        let hwnd = CreateWindowExW(
            WS_EX_TOOLWINDOW,
            class_name,
            w!("RunCat"),
            Default::default(),
            0,
            0,
            0,
            0,
            None,
            None,
            None,
            None,
        )?;

        if hwnd.is_invalid() {
            return Err("failed to create RunCatTrayWindow".into());
        }
        Ok(hwnd)
    }
}

/// The Win32 message pump. Blocks until WM_QUIT is received.
fn run_message_pump() {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// WNDPROC for the hidden window.
unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_TIMER if wparam.0 == FRAME_TIMER_ID => {
            with_app(|app| app.on_tick(Tick::Frame));
            LRESULT(0)
        }
        WM_TIMER if wparam.0 == SAMPLE_TIMER_ID => {
            with_app(|app| app.on_sample_timer());
            LRESULT(0)
        }
        TRAY_CALLBACK_MSG => {
            let event = (lparam.0 & 0xFFFF) as u32;
            if event == WM_RBUTTONUP || event == WM_CONTEXTMENU {
                show_menu(hwnd);
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            unsafe {
                let _ = KillTimer(Some(hwnd), FRAME_TIMER_ID);
                let _ = KillTimer(Some(hwnd), SAMPLE_TIMER_ID);
                PostQuitMessage(0);
            }
            LRESULT(0)
        }
        _ if msg != 0 && msg == TASKBAR_CREATED.with(Cell::get) => {
            runcat_core::log_info!("Taskbar recreated, restoring tray icon");
            with_app(|app| app.tray.restore());
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}
