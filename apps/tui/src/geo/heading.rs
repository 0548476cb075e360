const COMPASS_POINTS: [(&str, f64); 16] = [
    ("N", 0.0),
    ("NNE", 22.5),
    ("NE", 45.0),
    ("ENE", 67.5),
    ("E", 90.0),
    ("ESE", 112.5),
    ("SE", 135.0),
    ("SSE", 157.5),
    ("S", 180.0),
    ("SSW", 202.5),
    ("SW", 225.0),
    ("WSW", 247.5),
    ("W", 270.0),
    ("WNW", 292.5),
    ("NW", 315.0),
    ("NNW", 337.5),
];

const ARROWS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];

/// Compass label to degrees clockwise from north. Unknown labels give 0.
pub fn compute_heading(label: &str) -> f64 {
    let label = label.trim();
    COMPASS_POINTS
        .iter()
        .find(|(point, _)| point.eq_ignore_ascii_case(label))
        .map_or(0.0, |(_, degrees)| *degrees)
}

/// Wind labels give the direction the wind comes *from*; the indicator points
/// where it is going.
pub fn indicator_rotation(heading: f64) -> f64 {
    (heading + 180.0).rem_euclid(360.0)
}

/// Nearest eight-way arrow for a rotation in compass degrees.
pub fn arrow_glyph(rotation: f64) -> char {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let sector = ((rotation.rem_euclid(360.0) + 22.5) / 45.0) as usize % ARROWS.len();
    ARROWS[sector]
}
