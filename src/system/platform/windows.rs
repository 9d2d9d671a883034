use super::{FrequencyBounds, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cpu_frequency_bounds() -> Option<FrequencyBounds> {
        // Only the current clock is exposed without WMI.
        None
    }
}
