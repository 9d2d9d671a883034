use super::{FrequencyBounds, PlatformExtensions};

const CPUFREQ_DIR: &str = "/sys/devices/system/cpu/cpu0/cpufreq";

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cpu_frequency_bounds() -> Option<FrequencyBounds> {
        // cpuinfo_{min,max}_freq hold the hardware limits in kHz.
        let min = std::fs::read_to_string(format!("{CPUFREQ_DIR}/cpuinfo_min_freq")).ok()?;
        let max = std::fs::read_to_string(format!("{CPUFREQ_DIR}/cpuinfo_max_freq")).ok()?;
        Some(FrequencyBounds {
            min_mhz: parse_khz(&min)?,
            max_mhz: parse_khz(&max)?,
        })
    }
}

fn parse_khz(contents: &str) -> Option<f64> {
    let khz: u64 = contents.trim().parse().ok()?;
    Some(khz as f64 / 1000.0)
}
