use serde::Serialize;

use super::error::CollectionError;

/// One point-in-time read of every tracked host metric.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SystemSnapshot {
    pub cpu: CpuStats,
    pub memory: MemoryStats,
    pub swap: SwapStats,
    pub disk: DiskStats,
    pub network: NetworkStats,
    pub uptime: Uptime,
    pub processes: Vec<ProcessEntry>,
    pub platform: PlatformInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CpuStats {
    pub percent: f32,
    pub count: usize,
    pub frequency: CpuFrequency,
}

/// Clock speeds in MHz; zero where the host does not report them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CpuFrequency {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemoryStats {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub percent: f32,
    pub free: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SwapStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiskStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NetworkStats {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Uptime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Uptime {
    const SECS_PER_DAY: u64 = 86_400;

    pub fn from_secs(total: u64) -> Self {
        let rest = total % Self::SECS_PER_DAY;
        Uptime {
            days: total / Self::SECS_PER_DAY,
            hours: rest / 3600,
            minutes: (rest % 3600) / 60,
            seconds: rest % 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub cpu: f32,
    pub memory: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlatformInfo {
    pub system: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

/// Body of `/api/system`: the snapshot itself, or an object whose only key is `error`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SnapshotResponse {
    Snapshot(Box<SystemSnapshot>),
    Error { error: String },
}

impl SnapshotResponse {
    pub fn error(message: impl Into<String>) -> Self {
        SnapshotResponse::Error {
            error: message.into(),
        }
    }
}

impl From<Result<SystemSnapshot, CollectionError>> for SnapshotResponse {
    fn from(result: Result<SystemSnapshot, CollectionError>) -> Self {
        match result {
            Ok(snapshot) => SnapshotResponse::Snapshot(Box::new(snapshot)),
            Err(err) => SnapshotResponse::error(err.to_string()),
        }
    }
}
