use eframe::egui::{RichText, Ui};

use crate::sim::WORLD_SCALE;
use crate::util::{format_kilo, format_speed_kms};

use super::super::OrbitViewApp;

impl OrbitViewApp {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Followed Body");
        ui.add_space(6.0);

        let Some(id) = self.sim.follow_target() else {
            ui.label("Click a body on the canvas or in the list to follow it.");
            ui.add_space(6.0);
            ui.small("Right-drag pans, the wheel zooms (Shift zooms faster).");
            return;
        };

        let Some(body) = self.sim.body(id) else {
            ui.label("The followed body no longer exists.");
            return;
        };

        let position = body.position();
        let velocity = body.velocity();
        let distance_m = position.length() * WORLD_SCALE;
        let on_screen = self.sim.body_on_screen(id).is_some();

        ui.label(RichText::new(body.name()).strong());
        ui.add_space(6.0);
        ui.label(format!("Mass: {:.3e} kg", body.mass()));
        ui.label(format!("Radius: {:.0} km", body.radius() / 1000.0));
        ui.label(format!(
            "Position: ({}, {})",
            format_kilo(position.x),
            format_kilo(position.y)
        ));
        ui.label(format!("Distance from origin: {:.3e} m", distance_m));
        ui.label(format!(
            "Velocity: ({:.0}, {:.0}) m/s",
            velocity.x, velocity.y
        ));
        ui.label(format!("Speed: {}", format_speed_kms(body.speed())));
        if !on_screen {
            ui.label("Off screen at the current zoom.");
        }

        ui.separator();
        if ui.button("Stop following").clicked() {
            self.sim.follow(None);
        }
    }
}
