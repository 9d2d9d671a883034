use super::{FrequencyBounds, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cpu_frequency_bounds() -> Option<FrequencyBounds> {
        // Apple Silicon does not publish frequency limits through sysctl.
        None
    }
}
