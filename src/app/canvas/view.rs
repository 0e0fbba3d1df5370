use eframe::egui::{Painter, Rect, Sense, Ui, pos2, vec2};
use glam::DVec2;

use crate::sim::BodyId;
use crate::util::{format_duration, format_kilo, format_speed_kms};

use super::super::OrbitViewApp;
use super::super::render_utils::{
    BACKGROUND, MIN_BODY_RADIUS, body_color, draw_grid, draw_indicator, draw_text_block, to_pos2,
    to_screen,
};

impl OrbitViewApp {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.sim
            .resize(DVec2::new(rect.width() as f64, rect.height() as f64));
        self.handle_canvas_zoom(ui, rect, &response);
        self.handle_canvas_pan(&response);
        self.handle_canvas_click(rect, &response);

        let elapsed = ui.ctx().input(|input| input.stable_dt) as f64;
        self.last_steps = self.sim.advance_frame(elapsed);
        self.update_hovered(ui, rect);

        painter.rect_filled(rect, 0.0, BACKGROUND);
        if self.show_grid {
            draw_grid(&painter, rect, &self.sim.grid_lines());
        }
        self.draw_bodies(&painter, rect);

        if self.show_labels {
            let mut labelled = Vec::with_capacity(self.hovered.len() + 1);
            labelled.extend(self.sim.follow_target());
            labelled.extend(
                self.hovered
                    .iter()
                    .copied()
                    .filter(|id| Some(*id) != self.sim.follow_target()),
            );
            for id in labelled {
                self.draw_body_info(&painter, rect, id);
            }
        }

        self.draw_overlay(ui, &painter, rect);
    }

    fn draw_bodies(&self, painter: &Painter, rect: Rect) {
        let viewport = self.sim.viewport();
        for body in self.sim.bodies() {
            let color = body_color(body.color());
            match viewport.world_to_screen(body.position(), false) {
                Some(screen) => {
                    let radius = viewport.size_to_screen(body.radius()).max(MIN_BODY_RADIUS);
                    painter.circle_filled(to_pos2(rect, screen), radius as f32, color);
                }
                None if self.show_indicators => {
                    if let Some(indicator) = viewport.offscreen_indicator(body.position()) {
                        draw_indicator(painter, rect, indicator, color);
                    }
                }
                None => {}
            }
        }
    }

    fn draw_body_info(&self, painter: &Painter, rect: Rect, id: BodyId) {
        let (Some(body), Some(screen)) = (self.sim.body(id), self.sim.body_on_screen(id)) else {
            return;
        };

        let position = body.position();
        let lines = [
            format!("Name: {}", body.name()),
            format!("Pos: ({:.0}, {:.0})", position.x, position.y),
            format!("Vel: {}", format_speed_kms(body.speed())),
        ];
        draw_text_block(painter, to_pos2(rect, screen) + vec2(20.0, 20.0), &lines);
    }

    fn draw_overlay(&self, ui: &Ui, painter: &Painter, rect: Rect) {
        let viewport = self.sim.viewport();
        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .map(|pointer| to_screen(rect, pointer))
            .unwrap_or_else(|| viewport.screen_center());
        let world = viewport.screen_to_world(pointer);
        let pan = viewport.pan_offset();

        draw_text_block(
            painter,
            rect.left_top() + vec2(5.0, 5.0),
            &[format!(
                "({}, {}) - ({}, {}) - {:.4}",
                format_kilo(world.x),
                format_kilo(world.y),
                format_kilo(pan.x),
                format_kilo(pan.y),
                viewport.zoom()
            )],
        );

        let clock = self.sim.clock();
        let status = if clock.is_paused() { " (paused)" } else { "" };
        draw_text_block(
            painter,
            pos2(rect.left() + 5.0, rect.bottom() - 28.0),
            &[format!(
                "Time passed: {}{status}",
                format_duration(clock.time_passed())
            )],
        );
    }
}
