#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use sysdash::server::ProviderFactory;
use sysdash::system::CollectionError;
use sysdash::system::provider::{
    CpuReading, DiskReading, MemoryReading, MetricsProvider, NetworkReading, PlatformReading,
    ProcessReading, ProcessSample, ProcessUnavailable, SwapReading,
};

pub const BOOT_TIME: u64 = 1_700_000_000;

/// Deterministic provider with fixed readings; optionally fails the disk read.
#[derive(Clone, Default)]
pub struct FixtureProvider {
    pub disk_error: Option<String>,
}

impl FixtureProvider {
    pub fn failing(message: &str) -> Self {
        FixtureProvider {
            disk_error: Some(message.to_string()),
        }
    }

    pub fn factory(self) -> ProviderFactory {
        Arc::new(move || Box::new(self.clone()) as Box<dyn MetricsProvider + Send>)
    }
}

impl MetricsProvider for FixtureProvider {
    fn sample_cpu(&mut self, _window: Duration) -> Result<CpuReading, CollectionError> {
        Ok(CpuReading {
            percent: 12.5,
            logical_cores: 8,
            current_mhz: Some(2400.0),
            min_mhz: None,
            max_mhz: Some(4800.0),
        })
    }

    fn memory(&mut self) -> Result<MemoryReading, CollectionError> {
        Ok(MemoryReading {
            total: 16_000_000_000,
            available: 6_000_000_000,
            used: 8_000_000_000,
            free: 9_000_000_000,
            percent: 62.5,
        })
    }

    fn swap(&mut self) -> Result<SwapReading, CollectionError> {
        Ok(SwapReading {
            total: 4_000_000_000,
            used: 1_000_000_000,
            free: 3_000_000_000,
            percent: 25.0,
        })
    }

    fn disk_usage(&mut self, _mount_point: &Path) -> Result<DiskReading, CollectionError> {
        if let Some(message) = &self.disk_error {
            return Err(CollectionError::Provider(message.clone()));
        }
        Ok(DiskReading {
            total: 500_000_000_000,
            used: 125_000_000_000,
            free: 350_000_000_000,
            // Percent as a provider that excludes reserved blocks would report it.
            percent: 26.3,
        })
    }

    fn network(&mut self) -> Result<NetworkReading, CollectionError> {
        Ok(NetworkReading {
            bytes_sent: 1_048_576,
            bytes_recv: 5_242_880,
            packets_sent: 1200,
            packets_recv: 4800,
        })
    }

    fn boot_time(&mut self) -> Result<u64, CollectionError> {
        Ok(BOOT_TIME)
    }

    fn processes(&mut self) -> Result<Vec<ProcessSample>, CollectionError> {
        Ok(vec![
            Ok(process(1, "init", 0.0, 0.5)),
            Ok(process(42, "postgres", 37.5, 12.5)),
            Err(ProcessUnavailable::Vanished { pid: 77 }),
            Ok(process(108, "nginx", 4.0, 1.5)),
            Err(ProcessUnavailable::AccessDenied { pid: 200 }),
            Ok(process(311, "sysdash", 4.0, 0.25)),
        ])
    }

    fn platform(&mut self) -> Result<PlatformReading, CollectionError> {
        Ok(PlatformReading {
            system: "Linux".into(),
            release: "6.8.0".into(),
            version: "Linux 24.04 Ubuntu".into(),
            machine: "x86_64".into(),
        })
    }
}

fn process(pid: u32, name: &str, cpu: f32, memory: f32) -> ProcessReading {
    ProcessReading {
        pid,
        name: name.to_string(),
        cpu_percent: cpu,
        memory_percent: memory,
    }
}
