//! System report source: free memory share and user-mode CPU time.

use sysinfo::System;
use tracing::debug;

use crate::broadcast::ReportSource;
use statline_protocol::DEFAULT_SENTINEL;

/// Source behind the system-data server (default port 8081).
///
/// Samples the machine-wide free memory percentage via `sysinfo` and this
/// process's cumulative user-mode CPU time via `getrusage`.
pub struct SystemSource {
    system: System,
}

impl SystemSource {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SystemSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSource for SystemSource {
    fn name(&self) -> &'static str {
        "system"
    }

    fn labels(&self) -> [&'static str; 2] {
        ["Current Memory", "User Time"]
    }

    fn sample(&mut self) -> [String; 2] {
        [self.free_memory_percentage(), user_mode_time()]
    }
}

impl SystemSource {
    /// Available memory as a whole percentage of total, e.g. `42%`.
    fn free_memory_percentage(&mut self) -> String {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            debug!("Total memory reported as 0, cannot compute percentage");
            return DEFAULT_SENTINEL.to_string();
        }

        let available = self.system.available_memory();
        let percentage = (available as f64 / total as f64) * 100.0;
        format!("{}%", percentage as u32)
    }
}

/// Cumulative user-mode CPU time of this process as `sec.usec` seconds.
#[cfg(unix)]
fn user_mode_time() -> String {
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return DEFAULT_SENTINEL.to_string();
    }
    format!("{}.{}s", usage.ru_utime.tv_sec, usage.ru_utime.tv_usec)
}

#[cfg(not(unix))]
fn user_mode_time() -> String {
    DEFAULT_SENTINEL.to_string()
}
