use eframe::egui::{self, Context, Key};

use crate::sim::{BodyId, FrameSteps, Simulation};

use self::ui::FrameRate;

mod canvas;
mod render_utils;
mod ui;

pub struct OrbitViewApp {
    sim: Simulation,
    search: String,
    hovered: Vec<BodyId>,
    last_steps: FrameSteps,
    show_grid: bool,
    show_indicators: bool,
    show_labels: bool,
    frame_rate: FrameRate,
}

impl OrbitViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, sim: Simulation) -> Self {
        Self {
            sim,
            search: String::new(),
            hovered: Vec::new(),
            last_steps: FrameSteps::default(),
            show_grid: true,
            show_indicators: true,
            show_labels: true,
            frame_rate: FrameRate::default(),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let (pause, faster, slower, reset, quit) = ctx.input(|input| {
            (
                input.key_pressed(Key::Space),
                input.key_pressed(Key::W),
                input.key_pressed(Key::S),
                input.key_pressed(Key::C),
                input.key_pressed(Key::Escape),
            )
        });

        if pause {
            self.sim.clock_mut().toggle_pause();
        }
        if faster && self.sim.clock_mut().double_speed() {
            log::debug!("speed raised to {}", self.sim.clock().speed());
        }
        if slower && self.sim.clock_mut().halve_speed() {
            log::debug!("speed lowered to {}", self.sim.clock().speed());
        }
        if reset {
            self.sim.reset_view();
        }
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for OrbitViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.record_frame(ctx);
        self.handle_shortcuts(ctx);
        self.show(ctx);
        ctx.request_repaint();
    }
}
