//! Points to plot and the record format they are read from.

use serde::Deserialize;

use crate::error::CityMapError;
use crate::favorites::FavoriteCity;

/// One labeled marker on the map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PointRecord")]
pub struct RenderPoint {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl RenderPoint {
    pub fn new(label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            label: label.into(),
            latitude,
            longitude,
        }
    }
}

impl From<&FavoriteCity> for RenderPoint {
    fn from(city: &FavoriteCity) -> Self {
        Self::new(city.name.clone(), city.latitude, city.longitude)
    }
}

/// A point as supplied by callers.
///
/// The longitude may be given as `lon` or `lng`; `lon` wins when both are
/// present. The label may be given as `label`, `city` or `name`, and an
/// absent label draws the marker alone.
#[derive(Debug, Clone, Deserialize)]
pub struct PointRecord {
    #[serde(default, alias = "city", alias = "name")]
    pub label: Option<String>,
    pub lat: f64,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl TryFrom<PointRecord> for RenderPoint {
    type Error = CityMapError;

    fn try_from(record: PointRecord) -> Result<Self, Self::Error> {
        let label = record.label.unwrap_or_default();
        match record.lon.or(record.lng) {
            Some(longitude) => Ok(RenderPoint::new(label, record.lat, longitude)),
            None => Err(CityMapError::MissingLongitude { label }),
        }
    }
}

/// Parse a JSON array of point records.
///
/// One malformed record fails the whole list.
pub fn points_from_json(text: &str) -> serde_json::Result<Vec<RenderPoint>> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lng_is_accepted_in_place_of_lon() {
        let with_lon: RenderPoint =
            serde_json::from_str(r#"{"label": "X", "lat": 10.0, "lon": 20.0}"#).unwrap();
        let with_lng: RenderPoint =
            serde_json::from_str(r#"{"label": "X", "lat": 10.0, "lng": 20.0}"#).unwrap();

        assert_eq!(with_lon, with_lng);
        assert_eq!(with_lon.longitude, 20.0);
    }

    #[test]
    fn test_lon_wins_over_lng() {
        let point: RenderPoint =
            serde_json::from_str(r#"{"label": "X", "lat": 1.0, "lon": 2.0, "lng": 3.0}"#).unwrap();
        assert_eq!(point.longitude, 2.0);
    }

    #[test]
    fn test_missing_longitude_is_rejected() {
        let record = PointRecord {
            label: Some("Nowhere".to_string()),
            lat: 1.0,
            lon: None,
            lng: None,
        };

        match RenderPoint::try_from(record) {
            Err(CityMapError::MissingLongitude { label }) => assert_eq!(label, "Nowhere"),
            other => panic!("expected MissingLongitude, got {:?}", other),
        }
    }

    #[test]
    fn test_label_aliases() {
        let from_city: RenderPoint =
            serde_json::from_str(r#"{"city": "Lima", "lat": -12.06, "lng": -77.04}"#).unwrap();
        let from_name: RenderPoint =
            serde_json::from_str(r#"{"name": "Lima", "lat": -12.06, "lng": -77.04}"#).unwrap();
        let unlabeled: RenderPoint = serde_json::from_str(r#"{"lat": -12.06, "lng": -77.04}"#).unwrap();

        assert_eq!(from_city.label, "Lima");
        assert_eq!(from_name.label, "Lima");
        assert_eq!(unlabeled.label, "");
    }

    #[test]
    fn test_one_bad_record_fails_the_list() {
        let result = points_from_json(
            r#"[{"label": "A", "lat": 1.0, "lon": 1.0}, {"label": "B", "lat": 2.0}]"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("\"B\""), "unexpected error: {}", err);
    }

    #[test]
    fn test_from_favorite() {
        let city = FavoriteCity {
            name: "Oslo".to_string(),
            latitude: 59.9133,
            longitude: 10.7389,
            country: "Norway".to_string(),
        };
        assert_eq!(RenderPoint::from(&city), RenderPoint::new("Oslo", 59.9133, 10.7389));
    }
}
