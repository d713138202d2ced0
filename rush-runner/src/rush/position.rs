//! Position providers for the rush alert.
//!
//! Position fixes arrive asynchronously and may fail. Requests are tagged
//! with the session [`Generation`] they were issued for, so a fix that
//! lands after the user switched station or day-type can be recognised as
//! stale and dropped.

use std::future::Future;
use std::str::FromStr;

use crate::countdown::Generation;
use crate::domain::Coordinates;

/// Why a position could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The user declined location access
    #[error("location permission denied")]
    PermissionDenied,

    /// The provider could not determine a position
    #[error("position unavailable: {0}")]
    Unavailable(String),

    /// No fix arrived in time
    #[error("position request timed out")]
    Timeout,

    /// No provider is available on this platform
    #[error("geolocation unsupported")]
    Unsupported,
}

impl FromStr for PositionError {
    type Err = std::convert::Infallible;

    /// Map a client-reported failure reason to an error.
    ///
    /// Unrecognised reasons become [`PositionError::Unavailable`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "denied" | "permission_denied" => PositionError::PermissionDenied,
            "timeout" => PositionError::Timeout,
            "unsupported" => PositionError::Unsupported,
            other => PositionError::Unavailable(other.to_string()),
        })
    }
}

/// Source of the user's current position.
pub trait PositionProvider: Send + Sync {
    /// Obtain a position fix.
    fn locate(&self) -> impl Future<Output = Result<Coordinates, PositionError>> + Send;
}

/// A provider that always reports the same position.
///
/// Used when the widget host is stationary (e.g. a configured home
/// location on a kiosk display).
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl PositionProvider for FixedPosition {
    async fn locate(&self) -> Result<Coordinates, PositionError> {
        Ok(self.0)
    }
}

/// A provider that never has a position.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPosition;

impl PositionProvider for NoPosition {
    async fn locate(&self) -> Result<Coordinates, PositionError> {
        Err(PositionError::Unsupported)
    }
}

/// A position request issued for one session generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRequest {
    pub generation: Generation,

    /// Where the selected station is.
    pub station: Coordinates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_client_reasons() {
        assert_eq!(
            "denied".parse::<PositionError>().unwrap(),
            PositionError::PermissionDenied
        );
        assert_eq!(
            "PERMISSION_DENIED".parse::<PositionError>().unwrap(),
            PositionError::PermissionDenied
        );
        assert_eq!(
            "timeout".parse::<PositionError>().unwrap(),
            PositionError::Timeout
        );
        assert_eq!(
            "no satellites".parse::<PositionError>().unwrap(),
            PositionError::Unavailable("no satellites".to_string())
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(
            PositionError::PermissionDenied.to_string(),
            "location permission denied"
        );
        assert_eq!(
            PositionError::Unavailable("gps off".into()).to_string(),
            "position unavailable: gps off"
        );
    }

    #[tokio::test]
    async fn fixed_and_missing_providers() {
        let home = Coordinates::new(35.0, 139.0).unwrap();
        assert_eq!(FixedPosition(home).locate().await, Ok(home));
        assert_eq!(NoPosition.locate().await, Err(PositionError::Unsupported));
    }
}
