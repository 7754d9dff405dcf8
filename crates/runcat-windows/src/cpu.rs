//! `GetSystemTimes`-backed counter source.

use std::thread;
use std::time::Duration;

use runcat_core::{CpuSampler, CpuTimes, SampleError, SystemTimes};
use windows::Win32::Foundation::FILETIME;
use windows::Win32::System::Threading::GetSystemTimes;

/// Reads system-wide idle, kernel, and user times as 100 ns tick counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32SystemTimes;

impl SystemTimes for Win32SystemTimes {
    fn read(&mut self) -> Result<CpuTimes, SampleError> {
        let mut idle = FILETIME::default();
        let mut kernel = FILETIME::default();
        let mut user = FILETIME::default();

        // SAFETY: GetSystemTimes writes into the three FILETIMEs we own.
        unsafe { GetSystemTimes(Some(&mut idle), Some(&mut kernel), Some(&mut user)) }
            .map_err(|e| SampleError::Unavailable(e.to_string()))?;

        Ok(CpuTimes {
            idle: ft_to_u64(idle),
            kernel: ft_to_u64(kernel),
            user: ft_to_u64(user),
        })
    }
}

/// Measures CPU usage over `window` by taking two samples.
pub fn measure(window: Duration) -> Result<f64, SampleError> {
    let mut sampler = CpuSampler::new(Win32SystemTimes);
    sampler.sample()?;
    thread::sleep(window);
    Ok(sampler.sample()?.unwrap_or(0.0))
}

fn ft_to_u64(ft: FILETIME) -> u64 {
    u64::from(ft.dwLowDateTime) | (u64::from(ft.dwHighDateTime) << 32)
}
