//! Plain data row types written by journal backends.

/// One alert that was not suppressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertRow {
    pub tick:         u64,
    pub at_ms:        u64,
    pub trigger:      u32,
    pub player:       u32,
    pub dest_x:       f64,
    pub dest_y:       f64,
    pub dest_z:       f64,
    pub alerted:      u32,
    pub failed_moves: u32,
}

/// One perception monitor that stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorEndRow {
    pub tick:   u64,
    pub agent:  u32,
    /// `acquired`, `already_targeted`, `agent_gone` or `cancelled`.
    pub reason: &'static str,
    /// Acquired player; `u32::MAX` for every other reason.
    pub player: u32,
}

/// Summary for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    pub at_ms:     u64,
    pub evaluated: u64,
}
