use crate::error::{GraphError, Result};

/// Average driving speed used for trip durations
pub const AVERAGE_SPEED_KMH: u32 = 60;

/// Converts the distance of a single route into travel minutes.
///
/// Durations are accumulated route by route along a path, so a model is free
/// to be non-linear per route.
pub trait TravelModel {
    fn minutes_for(&self, distance_km: u32) -> u64;
}

/// Constant average speed; minutes are truncated, not rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AverageSpeed {
    kmh: u32,
}

impl AverageSpeed {
    pub fn new(kmh: u32) -> Result<Self> {
        if kmh == 0 {
            return Err(GraphError::InvalidSpeed(kmh));
        }
        Ok(Self { kmh })
    }

    pub fn kmh(&self) -> u32 {
        self.kmh
    }
}

impl Default for AverageSpeed {
    fn default() -> Self {
        Self {
            kmh: AVERAGE_SPEED_KMH,
        }
    }
}

impl TravelModel for AverageSpeed {
    fn minutes_for(&self, distance_km: u32) -> u64 {
        u64::from(distance_km) * 60 / u64::from(self.kmh)
    }
}

/// Minutes needed for one route at [`AVERAGE_SPEED_KMH`]
pub fn edge_duration(distance_km: u32) -> u64 {
    AverageSpeed::default().minutes_for(distance_km)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_speed_maps_km_to_minutes() {
        assert_eq!(edge_duration(0), 0);
        assert_eq!(edge_duration(15), 15);
        assert_eq!(edge_duration(300), 300);
    }

    #[test]
    fn slower_speed_truncates() {
        let speed = AverageSpeed::new(45).unwrap();
        assert_eq!(speed.kmh(), 45);
        assert_eq!(AverageSpeed::default().kmh(), AVERAGE_SPEED_KMH);
        // 10 km at 45 km/h = 13.33 min
        assert_eq!(speed.minutes_for(10), 13);
        assert_eq!(speed.minutes_for(0), 0);
    }

    #[test]
    fn zero_speed_is_rejected() {
        assert_eq!(AverageSpeed::new(0), Err(GraphError::InvalidSpeed(0)));
    }

    proptest! {
        #[test]
        fn proptest_duration_is_monotonic(a in 0u32..100_000, b in 0u32..100_000, kmh in 1u32..200) {
            let speed = AverageSpeed::new(kmh).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(speed.minutes_for(lo) <= speed.minutes_for(hi));
        }
    }
}
