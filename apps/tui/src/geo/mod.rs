pub mod heading;
pub mod plume;

pub use heading::{arrow_glyph, compute_heading, indicator_rotation};
pub use plume::{plume_layer, plume_polygon, plume_style, GeoPoint, PlumePolygon, PlumeStyle};
