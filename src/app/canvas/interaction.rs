use eframe::egui::{self, Rect, Ui};
use glam::DVec2;

use crate::sim::ZoomDirection;

use super::super::OrbitViewApp;
use super::super::render_utils::to_screen;

impl OrbitViewApp {
    pub(in crate::app) fn handle_canvas_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let Some(pointer) = ui.input(|input| input.pointer.hover_pos()) else {
            return;
        };
        let cursor = to_screen(rect, pointer);

        let ticks = ui.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::MouseWheel {
                        delta, modifiers, ..
                    } => {
                        // Some platforms turn shift+wheel into horizontal scrolling.
                        let amount = if delta.y != 0.0 { delta.y } else { delta.x };
                        ZoomDirection::from_wheel(amount as f64)
                            .map(|direction| (direction, modifiers.shift))
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
        });

        for (direction, modifier_held) in ticks {
            self.sim.zoom_at(cursor, direction, modifier_held);
        }
    }

    pub(in crate::app) fn handle_canvas_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            self.sim.pan(DVec2::new(delta.x as f64, delta.y as f64));
        }
    }

    pub(in crate::app) fn handle_canvas_click(
        &mut self,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.clicked_by(egui::PointerButton::Primary) {
            return;
        }

        if let Some(pointer) = response.interact_pointer_pos() {
            self.sim.click(to_screen(rect, pointer));
        }
    }

    pub(in crate::app) fn update_hovered(&mut self, ui: &Ui, rect: Rect) {
        self.hovered = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer))
            .map(|pointer| self.sim.hovered(to_screen(rect, pointer)))
            .unwrap_or_default();
    }
}
