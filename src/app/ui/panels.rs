use eframe::egui::{self, Align, Context, Layout};

use crate::util::format_duration;

use super::super::OrbitViewApp;

impl OrbitViewApp {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("orbit-view");
                    ui.separator();
                    ui.label(format!("bodies: {}", self.sim.bodies().len()));
                    ui.label(format!(
                        "Speed: {} per second",
                        format_duration(self.sim.clock().speed())
                    ))
                    .on_hover_text("Simulated time per wall-clock second. W doubles, S halves.");
                    ui.label(format!("steps/frame: {}", self.last_steps.executed));
                    if self.last_steps.dropped > 0 {
                        ui.colored_label(
                            egui::Color32::from_rgb(241, 146, 94),
                            format!("skipped {} steps", self.last_steps.dropped),
                        );
                    }
                    if self.sim.clock().is_paused() {
                        ui.label("PAUSED");
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_canvas(ui));
    }
}
