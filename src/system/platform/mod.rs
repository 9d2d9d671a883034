use std::path::Path;

/// Minimum and maximum CPU frequency in MHz.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyBounds {
    pub min_mhz: f64,
    pub max_mhz: f64,
}

pub trait PlatformExtensions {
    fn cpu_frequency_bounds() -> Option<FrequencyBounds>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod other;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
use other as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn cpu_frequency_bounds() -> Option<FrequencyBounds> {
    platform_impl::Platform::cpu_frequency_bounds()
}

/// Operating system family of the host, as far as the collector cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
    Other(&'static str),
}

impl HostOs {
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            HostOs::Linux
        } else if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else if cfg!(target_os = "windows") {
            HostOs::Windows
        } else {
            HostOs::Other(std::env::consts::OS)
        }
    }

    /// Kernel family name as reported by `uname -s` (or `Windows`).
    pub fn system_name(self) -> &'static str {
        match self {
            HostOs::Linux => "Linux",
            HostOs::MacOs => "Darwin",
            HostOs::Windows => "Windows",
            HostOs::Other(name) => name,
        }
    }
}

/// Mount point of the filesystem that holds the operating system.
pub fn root_mount_point(os: HostOs) -> &'static Path {
    match os {
        HostOs::Windows => Path::new("C:\\"),
        HostOs::Linux | HostOs::MacOs | HostOs::Other(_) => Path::new("/"),
    }
}
