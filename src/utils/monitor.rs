use crate::domain::model::Stage;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct SystemStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub memory_usage_percent: f32,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: System,
    pid: Option<Pid>,
    start_time: Instant,
    peak_memory: u64,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = if enabled {
            System::new_with_specifics(RefreshKind::everything())
        } else {
            System::new()
        };

        let pid = sysinfo::get_current_pid().ok();
        if enabled {
            if pid.is_none() {
                tracing::warn!("Could not determine current PID, process stats disabled");
            }
            system.refresh_all();
        }

        Self {
            system,
            pid,
            start_time: Instant::now(),
            peak_memory: 0,
            enabled: enabled && pid.is_some(),
        }
    }

    pub fn get_stats(&mut self) -> Option<SystemStats> {
        if !self.enabled {
            return None;
        }

        self.system.refresh_all();

        let process = self.system.process(self.pid?)?;
        let memory_mb = process.memory() / 1024 / 1024;
        let total_memory = self.system.total_memory() / 1024 / 1024;
        let memory_percent = if total_memory > 0 {
            (memory_mb as f32 / total_memory as f32) * 100.0
        } else {
            0.0
        };

        self.peak_memory = self.peak_memory.max(memory_mb);

        Some(SystemStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            memory_usage_percent: memory_percent,
            peak_memory_mb: self.peak_memory,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&mut self, stage: Stage) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB ({:.1}%), Peak: {}MB, Time: {:?}",
                stage,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.memory_usage_percent,
                stats.peak_memory_mb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&mut self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// no-op when built without the cli feature
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&mut self, _stage: Stage) {}

    pub fn log_final_stats(&mut self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
