use hazard_watch::geo::{arrow_glyph, compute_heading, indicator_rotation, GeoPoint, PlumePolygon};
use hazard_watch::feeds::FacilityRecord;
use hazard_watch::{DashboardState, FeedPanel};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

/// Map extent used before anything with coordinates has loaded: the Houston
/// ship channel.
const DEFAULT_LAT: [f64; 2] = [29.55, 30.0];
const DEFAULT_LON: [f64; 2] = [-95.45, -94.85];
/// Margin around the plotted points, in degrees.
const BOUNDS_PADDING: f64 = 0.05;

const MARKER_RADIUS: f64 = 0.004;
const HIGHLIGHT_RADIUS: f64 = 0.012;

pub const fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Extent covering every facility, incident marker and plume vertex.
pub fn map_bounds(points: &[GeoPoint]) -> ([f64; 2], [f64; 2]) {
    if points.is_empty() {
        return (DEFAULT_LON, DEFAULT_LAT);
    }

    let (mut min_lat, mut max_lat) = (f64::MAX, f64::MIN);
    let (mut min_lon, mut max_lon) = (f64::MAX, f64::MIN);
    for point in points {
        min_lat = min_lat.min(point.lat);
        max_lat = max_lat.max(point.lat);
        min_lon = min_lon.min(point.lon);
        max_lon = max_lon.max(point.lon);
    }

    (
        [min_lon - BOUNDS_PADDING, max_lon + BOUNDS_PADDING],
        [min_lat - BOUNDS_PADDING, max_lat + BOUNDS_PADDING],
    )
}

/// Hatch lines drawn inside a plume to stand in for its fill opacity.
pub fn hatch_count(fill_opacity: f64) -> usize {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (fill_opacity.clamp(0.0, 1.0) * 10.0).round() as usize;
    count
}

fn draw_plume(ctx: &mut Context<'_>, plume: &PlumePolygon) {
    let color = rgb(plume.style.stroke);
    let [apex, left, right] = plume.vertices();

    for (from, to) in [(apex, left), (left, right), (right, apex)] {
        ctx.draw(&CanvasLine {
            x1: from.lon,
            y1: from.lat,
            x2: to.lon,
            y2: to.lat,
            color,
        });
    }

    let hatches = hatch_count(plume.style.fill_opacity);
    for i in 1..=hatches {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 / (hatches + 1) as f64;
        ctx.draw(&CanvasLine {
            x1: apex.lon,
            y1: apex.lat,
            x2: (right.lon - left.lon).mul_add(t, left.lon),
            y2: (right.lat - left.lat).mul_add(t, left.lat),
            color,
        });
    }
}

pub fn render_map(dashboard: &DashboardState, f: &mut Frame<'_>, area: Rect) {
    let plumes = dashboard.plumes();
    let markers = dashboard.visible_markers();

    let mut extent = dashboard
        .facilities
        .iter()
        .filter_map(FacilityRecord::position)
        .map(|(lat, lon)| GeoPoint::new(lat, lon))
        .chain(markers.iter().map(|marker| GeoPoint::new(marker.lat, marker.lon)))
        .collect::<Vec<_>>();
    extent.extend(plumes.iter().flat_map(PlumePolygon::vertices));
    let (x_bounds, y_bounds) = map_bounds(&extent);

    let facility_points = dashboard
        .facilities
        .iter()
        .filter_map(FacilityRecord::position)
        .map(|(lat, lon)| (lon, lat))
        .collect::<Vec<_>>();

    let wind_label = match &dashboard.wind {
        FeedPanel::Ready(wind) => {
            let rotation = indicator_rotation(compute_heading(&wind.direction));
            format!("{} {} {}", arrow_glyph(rotation), wind.direction, wind.speed)
        }
        FeedPanel::Loading => "wind ...".to_string(),
        FeedPanel::Unavailable { .. } => "wind --".to_string(),
    };

    let title = if dashboard.show_plumes {
        "Map (plumes on)"
    } else {
        "Map (plumes off)"
    };

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for plume in &plumes {
                draw_plume(ctx, plume);
            }
            ctx.layer();

            ctx.draw(&Points {
                coords: &facility_points,
                color: Color::White,
            });

            for marker in &markers {
                let color = if marker.industrial {
                    Color::LightRed
                } else {
                    Color::LightBlue
                };
                ctx.draw(&Circle {
                    x: marker.lon,
                    y: marker.lat,
                    radius: MARKER_RADIUS,
                    color,
                });

                if dashboard.highlighted.as_ref() == Some(&marker.key) {
                    ctx.draw(&Circle {
                        x: marker.lon,
                        y: marker.lat,
                        radius: HIGHLIGHT_RADIUS,
                        color: Color::Yellow,
                    });
                }
            }

            ctx.print(
                x_bounds[0],
                y_bounds[1],
                Span::styled(wind_label.clone(), Style::default().fg(Color::Yellow)),
            );
        });

    f.render_widget(canvas, area);
}
