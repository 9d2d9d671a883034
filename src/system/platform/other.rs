use super::{FrequencyBounds, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cpu_frequency_bounds() -> Option<FrequencyBounds> {
        None
    }
}
