use std::collections::VecDeque;

use eframe::egui::Context;

use super::super::OrbitViewApp;

const FRAME_WINDOW: usize = 180;

#[derive(Debug)]
pub(in crate::app) struct FrameRate {
    frame_times: VecDeque<f32>,
    pub visible: bool,
    pub show_average: bool,
    pub show_frame_time: bool,
}

impl Default for FrameRate {
    fn default() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(FRAME_WINDOW),
            visible: true,
            show_average: true,
            show_frame_time: false,
        }
    }
}

impl FrameRate {
    fn record(&mut self, frame_seconds: f32) {
        if !frame_seconds.is_finite() || frame_seconds <= f32::EPSILON {
            return;
        }
        if self.frame_times.len() == FRAME_WINDOW {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_seconds);
    }

    fn latest(&self) -> Option<f32> {
        self.frame_times.back().copied()
    }

    // Frames over elapsed time, so one long frame weighs as much as the time it took.
    fn average_fps(&self) -> Option<f32> {
        let total: f32 = self.frame_times.iter().sum();
        (total > 0.0).then(|| self.frame_times.len() as f32 / total)
    }

    fn summary(&self) -> Option<String> {
        if !self.visible {
            return None;
        }
        let latest = self.latest()?;

        let mut parts = vec![format!("{:.0} FPS", 1.0 / latest)];
        if let Some(average) = self.average_fps().filter(|_| self.show_average) {
            parts.push(format!("avg {average:.1}"));
        }
        if self.show_frame_time {
            parts.push(format!("{:.1} ms", latest * 1000.0));
        }
        Some(parts.join(" | "))
    }
}

impl OrbitViewApp {
    pub(in crate::app) fn record_frame(&mut self, ctx: &Context) {
        let frame_seconds = ctx.input(|input| input.stable_dt);
        self.frame_rate.record(frame_seconds);
    }

    pub(in crate::app) fn fps_display_text(&self) -> Option<String> {
        self.frame_rate.summary()
    }
}
