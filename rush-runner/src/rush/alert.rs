//! User-facing rush-alert state.

use serde::Serialize;

use super::classify::{Classification, RushTier};

/// What the rush-alert panel currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RushAlert {
    /// Nothing to show: no next train, or no evaluation yet.
    Hidden,

    /// Position unavailable; the user is prompted to enable location.
    Unknown,

    /// A classified reachability estimate.
    Assessed {
        #[serde(flatten)]
        classification: Classification,
        distance_m: f64,
        seconds_until: f64,
    },
}

impl RushAlert {
    /// The tier shown, if the panel is visible.
    pub fn tier(&self) -> Option<RushTier> {
        match self {
            RushAlert::Hidden => None,
            RushAlert::Unknown => Some(RushTier::Unknown),
            RushAlert::Assessed { classification, .. } => Some(classification.tier),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, RushAlert::Hidden)
    }

    /// Message for the panel.
    pub fn message(&self) -> Option<String> {
        match self {
            RushAlert::Hidden => None,
            RushAlert::Unknown => {
                Some("Turn on location to see if you can make it".to_string())
            }
            RushAlert::Assessed { classification, .. } => Some(match classification.tier {
                RushTier::Safe => format!(
                    "Plenty of time (about {} min walk to the station)",
                    classification.walk_minutes()
                ),
                RushTier::Warning => format!(
                    "Run and you might make it (about {} min running)",
                    classification.run_minutes()
                ),
                RushTier::Danger | RushTier::Unknown => {
                    "Aim for the next train".to_string()
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rush::classify;

    fn assessed(distance_m: f64, seconds_until: f64) -> RushAlert {
        RushAlert::Assessed {
            classification: classify(distance_m, seconds_until),
            distance_m,
            seconds_until,
        }
    }

    #[test]
    fn hidden_has_no_message() {
        assert!(!RushAlert::Hidden.is_visible());
        assert_eq!(RushAlert::Hidden.tier(), None);
        assert_eq!(RushAlert::Hidden.message(), None);
    }

    #[test]
    fn unknown_prompts_for_location() {
        let alert = RushAlert::Unknown;
        assert!(alert.is_visible());
        assert_eq!(alert.tier(), Some(RushTier::Unknown));
        assert!(alert.message().unwrap().contains("location"));
    }

    #[test]
    fn messages_per_tier() {
        let safe = assessed(200.0, 600.0);
        assert_eq!(safe.tier(), Some(RushTier::Safe));
        assert_eq!(
            safe.message().unwrap(),
            "Plenty of time (about 3 min walk to the station)"
        );

        let warning = assessed(500.0, 180.0);
        assert_eq!(
            warning.message().unwrap(),
            "Run and you might make it (about 3 min running)"
        );

        let danger = assessed(1000.0, 60.0);
        assert_eq!(danger.message().unwrap(), "Aim for the next train");
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(assessed(200.0, 600.0)).unwrap();
        assert_eq!(json["state"], "assessed");
        assert_eq!(json["tier"], "safe");
        assert_eq!(json["distance_m"], 200.0);

        let json = serde_json::to_value(RushAlert::Unknown).unwrap();
        assert_eq!(json["state"], "unknown");
    }
}
