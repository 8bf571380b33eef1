use ratatui::{
    layout::Rect,
    style::{Color, Stylize},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Paragraph,
    },
    Frame,
};

use crate::data::Geolocated;

/// World map with one marker per item.
#[derive(Debug, Default)]
pub struct ItemsMap;

/// Canvas coordinates (x = longitude, y = latitude), clamped to the world bounds.
pub fn marker_points<T: Geolocated>(items: &[T]) -> Vec<(f64, f64)> {
    items
        .iter()
        .map(|item| {
            let (lat, lng) = item.coordinates();
            (lng.clamp(-180.0, 180.0), lat.clamp(-90.0, 90.0))
        })
        .collect()
}

impl ItemsMap {
    pub fn new() -> Self {
        Self
    }

    pub fn render<T: Geolocated>(
        &self,
        frame: &mut Frame,
        area: Rect,
        items: &[T],
        selected: Option<&T>,
    ) {
        let block = Block::bordered().title("Map");
        if items.is_empty() {
            frame.render_widget(
                Paragraph::new("No items to display").block(block).dark_gray(),
                area,
            );
            return;
        }

        let points = marker_points(items);
        let highlight = selected.map(|item| {
            let (lat, lng) = item.coordinates();
            (lng.clamp(-180.0, 180.0), lat.clamp(-90.0, 90.0), item.map_label())
        });

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([-180.0, 180.0])
            .y_bounds([-90.0, 90.0])
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: Color::DarkGray,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                ctx.draw(&Points {
                    coords: &points,
                    color: Color::Yellow,
                });
                if let Some((x, y, label)) = &highlight {
                    ctx.print(*x, *y, Line::from(format!("X {label}")).red().bold());
                }
            });
        frame.render_widget(canvas, area);
    }
}
