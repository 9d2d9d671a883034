//! Raw readings and the trait every metrics source implements.
//!
//! A provider reports counters as the OS exposes them. Anything derived
//! (uptime parts, disk percent, process ranking) is left to the collector.

use std::path::Path;
use std::time::Duration;

use super::error::CollectionError;

#[derive(Clone, Debug, PartialEq)]
pub struct CpuReading {
    /// Average utilization across all cores over the sample window.
    pub percent: f32,
    pub logical_cores: usize,
    pub current_mhz: Option<f64>,
    pub min_mhz: Option<f64>,
    pub max_mhz: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemoryReading {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwapReading {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiskReading {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    /// The provider's own notion of usage. Not trusted by the collector.
    pub percent: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkReading {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProcessReading {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
}

/// Why a listed process produced no reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessUnavailable {
    Vanished { pid: u32 },
    AccessDenied { pid: u32 },
}

pub type ProcessSample = Result<ProcessReading, ProcessUnavailable>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlatformReading {
    pub system: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

pub trait MetricsProvider {
    /// Blocks for `window` and reports CPU utilization over it.
    fn sample_cpu(&mut self, window: Duration) -> Result<CpuReading, CollectionError>;

    fn memory(&mut self) -> Result<MemoryReading, CollectionError>;

    fn swap(&mut self) -> Result<SwapReading, CollectionError>;

    fn disk_usage(&mut self, mount_point: &Path) -> Result<DiskReading, CollectionError>;

    /// Counters since boot, summed over all interfaces.
    fn network(&mut self) -> Result<NetworkReading, CollectionError>;

    /// Boot instant in seconds since the unix epoch.
    fn boot_time(&mut self) -> Result<u64, CollectionError>;

    fn processes(&mut self) -> Result<Vec<ProcessSample>, CollectionError>;

    fn platform(&mut self) -> Result<PlatformReading, CollectionError>;
}

impl<P: MetricsProvider + ?Sized> MetricsProvider for Box<P> {
    fn sample_cpu(&mut self, window: Duration) -> Result<CpuReading, CollectionError> {
        (**self).sample_cpu(window)
    }

    fn memory(&mut self) -> Result<MemoryReading, CollectionError> {
        (**self).memory()
    }

    fn swap(&mut self) -> Result<SwapReading, CollectionError> {
        (**self).swap()
    }

    fn disk_usage(&mut self, mount_point: &Path) -> Result<DiskReading, CollectionError> {
        (**self).disk_usage(mount_point)
    }

    fn network(&mut self) -> Result<NetworkReading, CollectionError> {
        (**self).network()
    }

    fn boot_time(&mut self) -> Result<u64, CollectionError> {
        (**self).boot_time()
    }

    fn processes(&mut self) -> Result<Vec<ProcessSample>, CollectionError> {
        (**self).processes()
    }

    fn platform(&mut self) -> Result<PlatformReading, CollectionError> {
        (**self).platform()
    }
}
