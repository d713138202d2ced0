//! Reachability classification from distance and time budget.

use serde::Serialize;

/// Average walking speed in metres per second.
pub const WALK_SPEED_MPS: f64 = 1.4;

/// Average running speed in metres per second.
pub const RUN_SPEED_MPS: f64 = 4.0;

/// Slack required on top of the walking ETA to call it safe.
pub const WALK_BUFFER_SECS: f64 = 60.0;

/// Slack required on top of the running ETA to call it a warning.
pub const RUN_BUFFER_SECS: f64 = 10.0;

/// Rush-alert outcome.
///
/// [`classify`] only ever produces `Safe`, `Warning` or `Danger`; `Unknown`
/// is used when no position is available and classification is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RushTier {
    Danger,
    Warning,
    Safe,
    Unknown,
}

impl RushTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RushTier::Safe => "safe",
            RushTier::Warning => "warning",
            RushTier::Danger => "danger",
            RushTier::Unknown => "unknown",
        }
    }
}

/// Result of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub tier: RushTier,
    pub eta_walk_secs: f64,
    pub eta_run_secs: f64,
}

impl Classification {
    /// Walking ETA rounded up to whole minutes.
    pub fn walk_minutes(&self) -> u64 {
        ceil_minutes(self.eta_walk_secs)
    }

    /// Running ETA rounded up to whole minutes.
    pub fn run_minutes(&self) -> u64 {
        ceil_minutes(self.eta_run_secs)
    }
}

fn ceil_minutes(secs: f64) -> u64 {
    (secs / 60.0).ceil().max(0.0) as u64
}

/// Classify whether a station `distance_m` away can be reached before a
/// train leaving in `seconds_until` seconds.
///
/// Rules are checked in order:
/// - `Safe` if walking leaves at least a minute to spare,
/// - `Warning` if running leaves at least ten seconds to spare,
/// - `Danger` otherwise.
///
/// Both comparisons are strict.
///
/// # Examples
///
/// ```
/// use rush_runner::rush::{classify, RushTier};
///
/// assert_eq!(classify(200.0, 600.0).tier, RushTier::Safe);
/// assert_eq!(classify(500.0, 180.0).tier, RushTier::Warning);
/// assert_eq!(classify(1000.0, 60.0).tier, RushTier::Danger);
/// ```
pub fn classify(distance_m: f64, seconds_until: f64) -> Classification {
    let eta_walk_secs = distance_m / WALK_SPEED_MPS;
    let eta_run_secs = distance_m / RUN_SPEED_MPS;

    let tier = if seconds_until > eta_walk_secs + WALK_BUFFER_SECS {
        RushTier::Safe
    } else if seconds_until > eta_run_secs + RUN_BUFFER_SECS {
        RushTier::Warning
    } else {
        RushTier::Danger
    };

    Classification {
        tier,
        eta_walk_secs,
        eta_run_secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn short_walk_plenty_of_time_is_safe() {
        let c = classify(200.0, 600.0);
        assert_eq!(c.tier, RushTier::Safe);
        assert!(approx(c.eta_walk_secs, 200.0 / 1.4));
        assert!(approx(c.eta_run_secs, 50.0));
        assert_eq!(c.walk_minutes(), 3);
    }

    #[test]
    fn running_distance_is_warning() {
        let c = classify(500.0, 180.0);
        assert_eq!(c.tier, RushTier::Warning);
        assert!(approx(c.eta_run_secs, 125.0));
        assert_eq!(c.run_minutes(), 3);
    }

    #[test]
    fn too_far_is_danger() {
        let c = classify(1000.0, 60.0);
        assert_eq!(c.tier, RushTier::Danger);
        assert!(approx(c.eta_run_secs, 250.0));
    }

    #[test]
    fn buffers_are_strict() {
        // eta_walk = 140s; exactly 200s budget is not enough for Safe
        assert_eq!(classify(196.0, 140.0 + 60.0).tier, RushTier::Warning);
        assert_eq!(classify(196.0, 200.5).tier, RushTier::Safe);

        // eta_run = 100s; exactly 110s budget is Danger
        assert_eq!(classify(400.0, 110.0).tier, RushTier::Danger);
        assert_eq!(classify(400.0, 110.5).tier, RushTier::Warning);
    }

    #[test]
    fn zero_distance() {
        assert_eq!(classify(0.0, 61.0).tier, RushTier::Safe);
        assert_eq!(classify(0.0, 60.0).tier, RushTier::Warning);
        assert_eq!(classify(0.0, 10.0).tier, RushTier::Danger);
    }

    #[test]
    fn departed_train_is_danger() {
        assert_eq!(classify(10.0, -5.0).tier, RushTier::Danger);
    }

    #[test]
    fn minutes_round_up() {
        assert_eq!(classify(0.0, 0.0).walk_minutes(), 0);
        // 70m is 50s on foot, 85m just over a minute
        assert_eq!(classify(70.0, 0.0).walk_minutes(), 1);
        assert_eq!(classify(85.0, 0.0).walk_minutes(), 2);
        // 500m is 125s running
        assert_eq!(classify(500.0, 0.0).run_minutes(), 3);
    }

    #[test]
    fn tier_names() {
        assert_eq!(RushTier::Safe.as_str(), "safe");
        assert_eq!(serde_json::to_string(&RushTier::Unknown).unwrap(), "\"unknown\"");
    }
}
