//! Scalar alert parameters.

use horde_core::Extent;

/// Numeric knobs read by the dispatcher and the perception monitors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AlertParameters {
    /// Minimum time between two alerts involving the same mob.
    pub cooldown_ms: u64,

    /// Half-extent of the perception box and the "close enough" distance.
    pub aggression_radius: f64,

    /// Floor that an alerted mob's follow range is raised to.
    pub follow_range_boost: f64,

    /// Ticks between two perception checks of one monitor.
    pub monitor_interval_ticks: u64,
}

impl AlertParameters {
    pub const DEFAULT_COOLDOWN_MS: u64 = 10_000;
    pub const DEFAULT_AGGRESSION_RADIUS: f64 = 10.0;
    pub const DEFAULT_FOLLOW_RANGE: f64 = 64.0;
    pub const DEFAULT_MONITOR_INTERVAL_TICKS: u64 = 20;

    /// Box searched for players around a monitored mob.
    #[inline]
    pub fn perception_box(&self) -> Extent {
        Extent::perception(self.aggression_radius)
    }

    #[inline]
    pub fn aggression_radius_sq(&self) -> f64 {
        self.aggression_radius * self.aggression_radius
    }
}

impl Default for AlertParameters {
    fn default() -> Self {
        Self {
            cooldown_ms:            Self::DEFAULT_COOLDOWN_MS,
            aggression_radius:      Self::DEFAULT_AGGRESSION_RADIUS,
            follow_range_boost:     Self::DEFAULT_FOLLOW_RANGE,
            monitor_interval_ticks: Self::DEFAULT_MONITOR_INTERVAL_TICKS,
        }
    }
}
