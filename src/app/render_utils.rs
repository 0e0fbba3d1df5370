use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, pos2, vec2};
use glam::DVec2;

use crate::sim::{GridLines, Indicator};

pub(super) const BACKGROUND: Color32 = Color32::BLACK;
pub(super) const GRID_COLOR: Color32 = Color32::from_rgb(70, 70, 70);
pub(super) const TEXT_COLOR: Color32 = Color32::WHITE;
pub(super) const MIN_BODY_RADIUS: f64 = 2.0;
const INDICATOR_WIDTH: f32 = 2.0;

pub(super) fn body_color([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

pub(super) fn to_pos2(rect: Rect, screen: DVec2) -> Pos2 {
    pos2(rect.left() + screen.x as f32, rect.top() + screen.y as f32)
}

pub(super) fn to_screen(rect: Rect, position: Pos2) -> DVec2 {
    DVec2::new(
        (position.x - rect.left()) as f64,
        (position.y - rect.top()) as f64,
    )
}

pub(super) fn draw_grid(painter: &Painter, rect: Rect, grid: &GridLines) {
    let stroke = Stroke::new(1.0, GRID_COLOR);
    for &x in &grid.vertical {
        let x = rect.left() + x as f32;
        painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], stroke);
    }
    for &y in &grid.horizontal {
        let y = rect.top() + y as f32;
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], stroke);
    }
}

pub(super) fn draw_indicator(painter: &Painter, rect: Rect, indicator: Indicator, color: Color32) {
    painter.line_segment(
        [to_pos2(rect, indicator.start), to_pos2(rect, indicator.end)],
        Stroke::new(INDICATOR_WIDTH, color),
    );
}

pub(super) fn draw_text_block(painter: &Painter, origin: Pos2, lines: &[String]) {
    for (index, line) in lines.iter().enumerate() {
        painter.text(
            origin + vec2(0.0, index as f32 * 30.0),
            Align2::LEFT_TOP,
            line,
            FontId::proportional(18.0),
            TEXT_COLOR,
        );
    }
}
