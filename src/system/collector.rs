use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::error::CollectionError;
use super::platform::{HostOs, root_mount_point};
use super::process::{TOP_PROCESS_LIMIT, top_processes};
use super::provider::{DiskReading, MetricsProvider};
use super::snapshot::{
    CpuFrequency, CpuStats, DiskStats, MemoryStats, NetworkStats, PlatformInfo, SwapStats,
    SystemSnapshot, Uptime,
};

/// Every collection blocks for this long to measure CPU utilization.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

pub struct Collector<P> {
    provider: P,
    host_os: HostOs,
}

impl<P: MetricsProvider> Collector<P> {
    pub fn new(provider: P) -> Self {
        Self::with_host_os(provider, HostOs::current())
    }

    pub fn with_host_os(provider: P, host_os: HostOs) -> Self {
        Collector { provider, host_os }
    }

    pub fn collect(&mut self) -> Result<SystemSnapshot, CollectionError> {
        self.collect_at(SystemTime::now())
    }

    /// Collect with `now` as the reference instant for uptime.
    pub fn collect_at(&mut self, now: SystemTime) -> Result<SystemSnapshot, CollectionError> {
        let _span = tracing::debug_span!("collector.collect").entered();

        let cpu = self.provider.sample_cpu(CPU_SAMPLE_WINDOW)?;
        let memory = self.provider.memory()?;
        let swap = self.provider.swap()?;

        let mount_point = root_mount_point(self.host_os);
        let disk = self.provider.disk_usage(mount_point)?;
        let disk_percent = disk_percent(&disk).ok_or_else(|| CollectionError::EmptyFilesystem {
            mount_point: mount_point.to_path_buf(),
        })?;

        let network = self.provider.network()?;
        let boot_time = self.provider.boot_time()?;
        let processes = top_processes(self.provider.processes()?, TOP_PROCESS_LIMIT);
        let platform = self.provider.platform()?;

        Ok(SystemSnapshot {
            cpu: CpuStats {
                percent: cpu.percent,
                count: cpu.logical_cores,
                frequency: CpuFrequency {
                    current: cpu.current_mhz.unwrap_or(0.0),
                    min: cpu.min_mhz.unwrap_or(0.0),
                    max: cpu.max_mhz.unwrap_or(0.0),
                },
            },
            memory: MemoryStats {
                total: memory.total,
                available: memory.available,
                used: memory.used,
                percent: memory.percent,
                free: memory.free,
            },
            swap: SwapStats {
                total: swap.total,
                used: swap.used,
                free: swap.free,
                percent: swap.percent,
            },
            disk: DiskStats {
                total: disk.total,
                used: disk.used,
                free: disk.free,
                percent: disk_percent,
            },
            network: NetworkStats {
                bytes_sent: network.bytes_sent,
                bytes_recv: network.bytes_recv,
                packets_sent: network.packets_sent,
                packets_recv: network.packets_recv,
            },
            uptime: Uptime::from_secs(seconds_since(boot_time, now)),
            processes,
            platform: PlatformInfo {
                system: platform.system,
                release: platform.release,
                version: platform.version,
                machine: platform.machine,
            },
        })
    }
}

/// `used / total * 100`, regardless of what the provider computed.
pub fn disk_percent(disk: &DiskReading) -> Option<f64> {
    if disk.total == 0 {
        return None;
    }
    Some(disk.used as f64 / disk.total as f64 * 100.0)
}

fn seconds_since(boot_time: u64, now: SystemTime) -> u64 {
    let now = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    now.saturating_sub(boot_time)
}
