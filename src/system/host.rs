use std::path::Path;
use std::thread;
use std::time::Duration;

use sysinfo::{
    Disks, MINIMUM_CPU_UPDATE_INTERVAL, Networks, Pid, Process, ProcessRefreshKind,
    ProcessesToUpdate, System,
};

use super::error::CollectionError;
use super::platform::{self, HostOs};
use super::provider::{
    CpuReading, DiskReading, MemoryReading, MetricsProvider, NetworkReading, PlatformReading,
    ProcessReading, ProcessSample, ProcessUnavailable, SwapReading,
};

/// Metrics provider backed by `sysinfo`. One instance serves one collection.
pub struct HostProvider {
    sys: System,
    host_os: HostOs,
    /// Processes alive when the CPU window opened, in ascending pid order.
    listed: Vec<Pid>,
}

impl Default for HostProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProvider {
    pub fn new() -> Self {
        HostProvider {
            sys: System::new(),
            host_os: HostOs::current(),
            listed: Vec::new(),
        }
    }

    fn refresh_processes(&mut self) {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
    }

    fn list_processes(&mut self) {
        self.refresh_processes();
        // Linux reports every task of a process as its own entry.
        let mut pids: Vec<Pid> = self
            .sys
            .processes()
            .iter()
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(&pid, _)| pid)
            .collect();
        pids.sort_unstable();
        self.listed = pids;
    }

    fn process_sample(&self, pid: Pid, total_memory: u64) -> ProcessSample {
        let Some(process) = self.sys.process(pid) else {
            return Err(ProcessUnavailable::Vanished { pid: pid.as_u32() });
        };
        let name = process.name().to_string_lossy().to_string();
        if name.is_empty() {
            return Err(ProcessUnavailable::AccessDenied { pid: pid.as_u32() });
        }
        Ok(ProcessReading {
            pid: pid.as_u32(),
            name,
            cpu_percent: finite_or_zero(process.cpu_usage()),
            memory_percent: memory_share(process, total_memory),
        })
    }
}

impl MetricsProvider for HostProvider {
    fn sample_cpu(&mut self, window: Duration) -> Result<CpuReading, CollectionError> {
        self.sys.refresh_cpu_usage();
        self.list_processes();

        thread::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL));

        self.sys.refresh_cpu_all();
        self.refresh_processes();

        let cpus = self.sys.cpus();
        let current_mhz = cpus
            .first()
            .map(|cpu| cpu.frequency())
            .filter(|&mhz| mhz > 0)
            .map(|mhz| mhz as f64);
        let bounds = platform::cpu_frequency_bounds();

        Ok(CpuReading {
            percent: finite_or_zero(self.sys.global_cpu_usage()),
            logical_cores: cpus.len(),
            current_mhz,
            min_mhz: bounds.map(|b| b.min_mhz),
            max_mhz: bounds.map(|b| b.max_mhz),
        })
    }

    fn memory(&mut self) -> Result<MemoryReading, CollectionError> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        let available = self.sys.available_memory();
        Ok(MemoryReading {
            total,
            available,
            used: self.sys.used_memory(),
            free: self.sys.free_memory(),
            percent: percent_of(total.saturating_sub(available), total) as f32,
        })
    }

    fn swap(&mut self) -> Result<SwapReading, CollectionError> {
        self.sys.refresh_memory();
        let total = self.sys.total_swap();
        let used = self.sys.used_swap();
        Ok(SwapReading {
            total,
            used,
            free: self.sys.free_swap(),
            percent: percent_of(used, total) as f32,
        })
    }

    fn disk_usage(&mut self, mount_point: &Path) -> Result<DiskReading, CollectionError> {
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == mount_point)
            .ok_or_else(|| CollectionError::RootFilesystemUnavailable {
                mount_point: mount_point.to_path_buf(),
            })?;

        let total = disk.total_space();
        let free = disk.available_space();
        let used = total.saturating_sub(free);
        Ok(DiskReading {
            total,
            used,
            free,
            percent: percent_of(used, used.saturating_add(free)),
        })
    }

    fn network(&mut self) -> Result<NetworkReading, CollectionError> {
        let networks = Networks::new_with_refreshed_list();
        let totals = networks
            .list()
            .values()
            .fold(NetworkReading::default(), |acc, data| NetworkReading {
                bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
                bytes_recv: acc.bytes_recv.saturating_add(data.total_received()),
                packets_sent: acc
                    .packets_sent
                    .saturating_add(data.total_packets_transmitted()),
                packets_recv: acc
                    .packets_recv
                    .saturating_add(data.total_packets_received()),
            });
        Ok(totals)
    }

    fn boot_time(&mut self) -> Result<u64, CollectionError> {
        Ok(System::boot_time())
    }

    fn processes(&mut self) -> Result<Vec<ProcessSample>, CollectionError> {
        if self.listed.is_empty() {
            self.list_processes();
        }
        self.sys.refresh_memory();
        let total_memory = self.sys.total_memory();
        Ok(self
            .listed
            .iter()
            .map(|&pid| self.process_sample(pid, total_memory))
            .collect())
    }

    fn platform(&mut self) -> Result<PlatformReading, CollectionError> {
        Ok(PlatformReading {
            system: self.host_os.system_name().to_string(),
            release: System::kernel_version().unwrap_or_default(),
            version: System::long_os_version().unwrap_or_default(),
            machine: std::env::consts::ARCH.to_string(),
        })
    }
}

fn memory_share(process: &Process, total_memory: u64) -> f32 {
    if total_memory == 0 {
        return 0.0;
    }
    (process.memory() as f64 / total_memory as f64 * 100.0) as f32
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Percentage rounded to one decimal, zero when `total` is zero.
fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use std::process::{Command, Stdio};

    use super::*;

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(percent_of(1, 3), 33.3);
        assert_eq!(percent_of(2, 3), 66.7);
        assert_eq!(percent_of(5, 0), 0.0);
    }

    #[test]
    fn non_finite_cpu_is_zero() {
        assert_eq!(finite_or_zero(f32::NAN), 0.0);
        assert_eq!(finite_or_zero(f32::INFINITY), 0.0);
        assert_eq!(finite_or_zero(3.5), 3.5);
    }

    #[test]
    fn host_processes_are_listed_in_pid_order() {
        let mut provider = HostProvider::new();
        let samples = provider.processes().unwrap();
        let pids: Vec<u32> = samples
            .iter()
            .map(|s| match s {
                Ok(reading) => reading.pid,
                Err(ProcessUnavailable::Vanished { pid })
                | Err(ProcessUnavailable::AccessDenied { pid }) => *pid,
            })
            .collect();
        assert!(pids.windows(2).all(|w| w[0] < w[1]));
        assert!(pids.contains(&std::process::id()));
    }

    fn sampled_pids(samples: &[ProcessSample]) -> Vec<u32> {
        samples
            .iter()
            .filter_map(|s| s.as_ref().ok().map(|reading| reading.pid))
            .collect()
    }

    #[test]
    fn host_processes_exclude_threads() {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let rx = std::sync::Arc::new(std::sync::Mutex::new(rx));
        let workers: Vec<_> = (0..3)
            .map(|_| {
                let rx = std::sync::Arc::clone(&rx);
                thread::spawn(move || {
                    let _ = rx.lock().map(|rx| rx.recv());
                })
            })
            .collect();

        let mut provider = HostProvider::new();
        let samples = provider.processes().unwrap();
        let pids = sampled_pids(&samples);

        // Task ids of this process; only exposed where /proc exists.
        let own_pid = std::process::id();
        let task_ids: Vec<u32> = std::fs::read_dir("/proc/self/task")
            .map(|entries| {
                entries
                    .flatten()
                    .filter_map(|e| e.file_name().to_str()?.parse().ok())
                    .filter(|&tid| tid != own_pid)
                    .collect()
            })
            .unwrap_or_default();

        let leaked: Vec<u32> = task_ids.into_iter().filter(|tid| pids.contains(tid)).collect();

        drop(tx);
        for worker in workers {
            worker.join().unwrap();
        }

        assert!(leaked.is_empty(), "threads reported as processes: {leaked:?}");
        assert!(pids.contains(&own_pid));
    }

    #[test]
    fn exited_process_is_reported_vanished() {
        #[cfg(windows)]
        let mut cmd = {
            let mut c = Command::new("powershell");
            c.args(["-NoProfile", "-NonInteractive", "-Command", "Start-Sleep -Seconds 30"]);
            c
        };
        #[cfg(not(windows))]
        let mut cmd = {
            let mut c = Command::new("sh");
            c.args(["-c", "sleep 30"]);
            c
        };
        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to spawn child process");
        let child_pid = child.id();

        let reaper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            let _ = child.kill();
            let _ = child.wait();
        });

        let mut provider = HostProvider::new();
        provider.sample_cpu(Duration::from_secs(1)).unwrap();
        reaper.join().unwrap();
        let samples = provider.processes().unwrap();

        assert!(samples.contains(&Err(ProcessUnavailable::Vanished { pid: child_pid })));
        assert!(!sampled_pids(&samples).contains(&child_pid));
    }

    #[test]
    fn sampled_own_process_has_memory_share() {
        let mut provider = HostProvider::new();
        provider.sample_cpu(MINIMUM_CPU_UPDATE_INTERVAL).unwrap();
        let samples = provider.processes().unwrap();

        let own_pid = std::process::id();
        let own = samples
            .iter()
            .filter_map(|s| s.as_ref().ok())
            .find(|reading| reading.pid == own_pid)
            .expect("test process is listed");
        assert!(own.memory_percent > 0.0);
    }

    #[test]
    fn host_platform_names_the_os_family() {
        let mut provider = HostProvider::new();
        let platform = provider.platform().unwrap();
        assert_eq!(platform.system, HostOs::current().system_name());
        assert_eq!(platform.machine, std::env::consts::ARCH);
    }
}
