//! Wall-clock cooldown gate for firing and spawning

use serde::{Deserialize, Serialize};

/// Allows an action once more than `interval_ms` has passed since the last one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub interval_ms: f64,
    /// Timestamp of the last triggered action (`None` = never triggered)
    pub last_ms: Option<f64>,
}

impl Cooldown {
    /// A gate that opens on the first request
    pub fn ready(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// A gate that behaves as if it last fired at `now_ms`
    pub fn started_at(interval_ms: f64, now_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: Some(now_ms),
        }
    }

    /// Whether the gate would open at `now_ms`
    pub fn is_ready(&self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) => now_ms - last > self.interval_ms,
            None => true,
        }
    }

    /// Open the gate if ready, recording `now_ms` as the new last timestamp
    pub fn try_trigger(&mut self, now_ms: f64) -> bool {
        if self.is_ready(now_ms) {
            self.last_ms = Some(now_ms);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_gate_opens_immediately() {
        let mut gate = Cooldown::ready(100.0);
        assert!(gate.try_trigger(0.0));
        assert!(!gate.try_trigger(50.0));
    }

    #[test]
    fn test_interval_is_strict() {
        let mut gate = Cooldown::started_at(100.0, 0.0);
        assert!(!gate.try_trigger(100.0));
        assert!(gate.try_trigger(100.5));
        assert_eq!(gate.last_ms, Some(100.5));
    }

    #[test]
    fn test_failed_trigger_keeps_timestamp() {
        let mut gate = Cooldown::started_at(400.0, 0.0);
        assert!(!gate.try_trigger(399.0));
        assert_eq!(gate.last_ms, Some(0.0));
        assert!(gate.is_ready(401.0));
    }
}
