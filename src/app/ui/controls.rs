use eframe::egui::{self, Align, Layout, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::sim::BodyId;
use crate::util::{format_duration, format_kilo, format_speed_kms};

use super::super::OrbitViewApp;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl OrbitViewApp {
    fn matching_bodies(&self) -> Vec<BodyId> {
        let query = self.search.trim();
        if query.is_empty() {
            return self.sim.body_ids().collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored = self
            .sim
            .body_ids()
            .filter_map(|id| {
                let body = self.sim.body(id)?;
                fuzzy_match_score(&matcher, body.name(), query).map(|score| (id, score))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(id, _)| id).collect()
    }

    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Simulation");
        ui.separator();

        let mut paused = self.sim.clock().is_paused();
        if ui
            .checkbox(&mut paused, "Paused")
            .on_hover_text("Stop integrating bodies. Time passed keeps counting. (Space)")
            .changed()
        {
            self.sim.clock_mut().set_paused(paused);
        }

        ui.horizontal(|ui| {
            if ui.button("Slower").on_hover_text("Halve the timestep. (S)").clicked() {
                self.sim.clock_mut().halve_speed();
            }
            if ui.button("Faster").on_hover_text("Double the timestep. (W)").clicked() {
                self.sim.clock_mut().double_speed();
            }
        });

        let clock = self.sim.clock();
        ui.label(format!(
            "{} per second, {} per step",
            format_duration(clock.speed()),
            format_duration(clock.fixed_step())
        ));
        ui.label(format!("Pending: {}", format_duration(clock.accumulated())))
            .on_hover_text("Simulated time waiting for the next whole physics step.");
        ui.label(match clock.max_steps_per_frame() {
            Some(cap) => format!("Step cap: {cap} per frame"),
            None => "Step cap: none".to_owned(),
        });

        ui.separator();
        ui.heading("View");
        if ui.button("Reset view").on_hover_text("Recenter on the origin. (C)").clicked() {
            self.sim.reset_view();
        }
        ui.checkbox(
            &mut self.show_grid,
            format!("Grid every {} units", format_kilo(self.sim.grid_spacing())),
        );
        ui.checkbox(&mut self.show_indicators, "Off-screen indicators")
            .on_hover_text("Point from the screen center towards bodies out of view.");
        ui.checkbox(&mut self.show_labels, "Body labels")
            .on_hover_text("Show name, position and speed next to followed and hovered bodies.");
        ui.checkbox(&mut self.frame_rate.visible, "FPS display");
        ui.add_enabled_ui(self.frame_rate.visible, |ui| {
            ui.checkbox(&mut self.frame_rate.show_average, "Show average FPS");
            ui.checkbox(&mut self.frame_rate.show_frame_time, "Show frame time");
        });

        ui.separator();
        ui.heading("Bodies");
        ui.label("Search")
            .on_hover_text("Fuzzy-match body names, then click one to follow it.");
        ui.text_edit_singleline(&mut self.search);
        ui.add_space(4.0);

        let followed = self.sim.follow_target();
        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("body_list_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for id in self.matching_bodies() {
                    let Some(body) = self.sim.body(id) else {
                        continue;
                    };

                    let row_clicked = ui
                        .horizontal(|ui| {
                            let clicked =
                                ui.selectable_label(followed == Some(id), body.name()).clicked();
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.label(format_speed_kms(body.speed()));
                            });
                            clicked
                        })
                        .inner;

                    if row_clicked {
                        clicked = Some(id);
                    }
                }
            });

        if let Some(id) = clicked {
            let target = if followed == Some(id) { None } else { Some(id) };
            self.sim.follow(target);
        }
    }
}
