//! Advisory plume overlays.
//!
//! Each facility gets a triangle pointing downwind. This is a coarse visual
//! cue and not a dispersion model: wind speed, stability and terrain are all
//! ignored.

use crate::feeds::{FacilityRecord, WindState};
use crate::geo::heading::{compute_heading, indicator_rotation};

/// Half-angle of the plume triangle, in degrees.
pub const PLUME_SPREAD_DEG: f64 = 20.0;
/// Distance from apex to base points, in coordinate degrees.
pub const PLUME_LENGTH: f64 = 0.08;
/// Aspect correction for degree coordinates around 30°N.
pub const LAT_SCALE: f64 = 1.0;
pub const LON_SCALE: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlumeStyle {
    pub stroke: (u8, u8, u8),
    pub fill_opacity: f64,
}

pub const RISK_STYLE: PlumeStyle = PlumeStyle {
    stroke: (0xff, 0x33, 0x33),
    fill_opacity: 0.35,
};

pub const CLEAR_STYLE: PlumeStyle = PlumeStyle {
    stroke: (0x33, 0xcc, 0x66),
    fill_opacity: 0.15,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PlumePolygon {
    pub facility: String,
    pub apex: GeoPoint,
    pub left: GeoPoint,
    pub right: GeoPoint,
    pub style: PlumeStyle,
}

impl PlumePolygon {
    pub const fn vertices(&self) -> [GeoPoint; 3] {
        [self.apex, self.left, self.right]
    }
}

pub const fn plume_style(risk: bool) -> PlumeStyle {
    if risk {
        RISK_STYLE
    } else {
        CLEAR_STYLE
    }
}

/// Triangle with its apex at `origin`, opening downwind of `heading`.
pub fn plume_polygon(origin: GeoPoint, heading: f64) -> [GeoPoint; 3] {
    let downwind = indicator_rotation(heading);
    let base = |bearing: f64| {
        let radians = bearing.to_radians();
        GeoPoint {
            lat: (PLUME_LENGTH * radians.cos()).mul_add(LAT_SCALE, origin.lat),
            lon: (PLUME_LENGTH * radians.sin()).mul_add(LON_SCALE, origin.lon),
        }
    };

    [
        origin,
        base(downwind - PLUME_SPREAD_DEG),
        base(downwind + PLUME_SPREAD_DEG),
    ]
}

/// Rebuilds the whole plume layer. Empty when the overlay is switched off or
/// there is no wind reading. Facilities without coordinates get no plume.
pub fn plume_layer(
    facilities: &[FacilityRecord],
    wind: Option<&WindState>,
    show: bool,
) -> Vec<PlumePolygon> {
    let Some(wind) = wind.filter(|_| show) else {
        return Vec::new();
    };

    let heading = compute_heading(&wind.direction);
    let style = plume_style(wind.risk);

    facilities
        .iter()
        .filter_map(|facility| {
            let (lat, lon) = facility.position()?;
            let [apex, left, right] = plume_polygon(GeoPoint::new(lat, lon), heading);
            Some(PlumePolygon {
                facility: facility.name.clone(),
                apex,
                left,
                right,
                style,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn facility(name: &str, lat: f64, lon: f64) -> FacilityRecord {
        FacilityRecord {
            name: name.to_string(),
            lat: Some(lat),
            lon: Some(lon),
            category: "refinery".to_string(),
        }
    }

    fn wind(direction: &str, risk: bool) -> WindState {
        WindState {
            direction: direction.to_string(),
            speed: "10 mph".to_string(),
            temperature: "80".to_string(),
            risk,
            forecast: None,
        }
    }

    #[test]
    fn north_wind_plume_opens_south() {
        let origin = GeoPoint::new(29.8, -95.1);
        let [apex, left, right] = plume_polygon(origin, 0.0);

        assert_eq!(apex, origin);
        assert!(left.lat < origin.lat && right.lat < origin.lat);
        // symmetric about the downwind axis
        assert!((left.lat - right.lat).abs() < EPS);
        assert!(((left.lon - origin.lon) + (right.lon - origin.lon)).abs() < EPS);
    }

    #[test]
    fn base_points_sit_at_plume_length_after_unscaling() {
        let origin = GeoPoint::new(29.7, -95.0);
        for heading in [0.0, 45.0, 202.5, 337.5] {
            let [_, left, right] = plume_polygon(origin, heading);
            for point in [left, right] {
                let dlat = (point.lat - origin.lat) / LAT_SCALE;
                let dlon = (point.lon - origin.lon) / LON_SCALE;
                assert!((dlat.hypot(dlon) - PLUME_LENGTH).abs() < EPS);
            }
        }
    }

    #[test]
    fn spread_between_base_points_is_twice_the_half_angle() {
        let origin = GeoPoint::new(29.7, -95.0);
        let [_, left, right] = plume_polygon(origin, 90.0);
        let bearing = |p: GeoPoint| {
            ((p.lon - origin.lon) / LON_SCALE)
                .atan2((p.lat - origin.lat) / LAT_SCALE)
                .to_degrees()
                .rem_euclid(360.0)
        };

        // wind from the east drifts west: 270 ± 20
        assert!((bearing(left) - 250.0).abs() < 1e-6);
        assert!((bearing(right) - 290.0).abs() < 1e-6);
    }

    #[test]
    fn layer_is_empty_when_toggled_off_or_without_wind() {
        let facilities = vec![facility("A", 29.8, -95.1)];
        let reading = wind("NE", true);

        assert!(plume_layer(&facilities, Some(&reading), false).is_empty());
        assert!(plume_layer(&facilities, None, true).is_empty());
    }

    #[test]
    fn layer_has_one_polygon_per_facility_styled_by_risk() {
        let facilities = vec![facility("A", 29.8, -95.1), facility("B", 29.7, -95.0)];

        let risky = plume_layer(&facilities, Some(&wind("NE", true)), true);
        assert_eq!(risky.len(), 2);
        assert!(risky.iter().all(|p| p.style == RISK_STYLE));
        assert_eq!(risky[1].facility, "B");

        let clear = plume_layer(&facilities, Some(&wind("SW", false)), true);
        assert!(clear.iter().all(|p| p.style == CLEAR_STYLE));
    }

    #[test]
    fn facilities_without_coordinates_are_skipped() {
        let unplaced = FacilityRecord {
            lon: None,
            ..facility("Unplaced", 29.9, -95.2)
        };
        let facilities = vec![unplaced, facility("B", 29.7, -95.0)];

        let layer = plume_layer(&facilities, Some(&wind("N", false)), true);
        assert_eq!(layer.len(), 1);
        assert_eq!(layer[0].facility, "B");
    }
}
