//! Geolocation seam.
//!
//! Platform positioning and permission prompts live outside this crate; a
//! [`Geolocator`] hands back coordinates or says why it cannot.

use crate::types::{Coordinates, LocationError};

pub trait Geolocator: Send + Sync {
    fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Rejects NaN, infinite and out-of-range coordinates
pub fn validate(coords: Coordinates) -> Result<Coordinates, LocationError> {
    let Coordinates {
        latitude,
        longitude,
    } = coords;
    let valid = latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude);

    if valid {
        Ok(coords)
    } else {
        Err(LocationError::InvalidCoordinates {
            latitude,
            longitude,
        })
    }
}

/// Geolocator backed by a fixed position, e.g. from configuration.
///
/// `None` behaves like a device whose location service is switched off.
#[derive(Debug, Clone, Default)]
pub struct StaticGeolocator {
    position: Option<Coordinates>,
}

impl StaticGeolocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl Geolocator for StaticGeolocator {
    fn locate(&self) -> Result<Coordinates, LocationError> {
        let coords = self.position.ok_or(LocationError::ServiceUnavailable)?;
        validate(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_locator_returns_position() {
        let zagreb = Coordinates {
            latitude: 45.815,
            longitude: 15.982,
        };
        let locator = StaticGeolocator::new(Some(zagreb));
        assert_eq!(locator.locate().ok(), Some(zagreb));
    }

    #[test]
    fn test_static_locator_without_position() {
        let locator = StaticGeolocator::default();
        assert!(matches!(
            locator.locate(),
            Err(LocationError::ServiceUnavailable)
        ));
    }

    #[test]
    fn test_invalid_coordinates() {
        let bad = [
            Coordinates {
                latitude: f64::NAN,
                longitude: 0.0,
            },
            Coordinates {
                latitude: 91.0,
                longitude: 0.0,
            },
            Coordinates {
                latitude: 0.0,
                longitude: -180.5,
            },
        ];
        for coords in bad {
            assert!(matches!(
                validate(coords),
                Err(LocationError::InvalidCoordinates { .. })
            ));
        }
    }
}
