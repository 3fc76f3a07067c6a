//! Time window units for rate limiting.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time window for rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WindowUnit {
    /// Per-second rate limiting
    Second,
    /// Per-minute rate limiting
    Minute,
    /// Per-hour rate limiting
    Hour,
    /// Per-day rate limiting
    Day,
}

impl WindowUnit {
    /// Get the duration of this time window.
    pub fn duration(&self) -> Duration {
        match self {
            WindowUnit::Second => Duration::from_secs(1),
            WindowUnit::Minute => Duration::from_secs(60),
            WindowUnit::Hour => Duration::from_secs(3600),
            WindowUnit::Day => Duration::from_secs(86400),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_unit_duration() {
        assert_eq!(WindowUnit::Second.duration(), Duration::from_secs(1));
        assert_eq!(WindowUnit::Minute.duration(), Duration::from_secs(60));
        assert_eq!(WindowUnit::Hour.duration(), Duration::from_secs(3600));
        assert_eq!(WindowUnit::Day.duration(), Duration::from_secs(86400));
    }

    #[test]
    fn test_window_unit_serde_lowercase() {
        let unit: WindowUnit = serde_yaml::from_str("minute").unwrap();
        assert_eq!(unit, WindowUnit::Minute);
        assert_eq!(serde_yaml::to_string(&WindowUnit::Hour).unwrap().trim(), "hour");
    }
}
