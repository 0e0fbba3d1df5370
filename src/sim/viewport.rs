use glam::DVec2;

use super::body::Body;
use super::force::WORLD_SCALE;

pub const ZOOM_MIN: f64 = 0.001;
pub const ZOOM_MAX: f64 = 25.0;
pub const DEFAULT_ZOOM: f64 = 0.001;

const ZOOM_TICK: f64 = 0.001;
const MODIFIER_ZOOM_SPEED: f64 = 10.0;
/// `(threshold, multiplier)`, highest threshold first. The first band the zoom exceeds wins.
const ZOOM_BANDS: [(f64, f64); 5] = [
    (10.0, 200.0),
    (1.0, 100.0),
    (0.5, 50.0),
    (0.1, 25.0),
    (0.01, 5.0),
];

pub const HOVER_MIN_RADIUS: f64 = 5.0;

const INDICATOR_OFFSET_FRACTION: f64 = 1.0 / 8.0;
const INDICATOR_LENGTH_SCALE: f64 = 1000.0;
const MAX_GRID_LINES: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    pub fn from_wheel(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::In)
        } else if delta < 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }

    fn sign(self) -> f64 {
        match self {
            Self::In => 1.0,
            Self::Out => -1.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLines {
    pub vertical: Vec<f64>,
    pub horizontal: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Indicator {
    pub start: DVec2,
    pub end: DVec2,
}

#[derive(Clone, Debug)]
pub struct Viewport {
    pan: DVec2,
    zoom: f64,
    screen_size: DVec2,
}

impl Viewport {
    pub fn new(screen_size: DVec2) -> Self {
        let mut viewport = Self {
            pan: DVec2::ZERO,
            zoom: DEFAULT_ZOOM,
            screen_size,
        };
        viewport.reset_to_default();
        viewport
    }

    pub fn pan_offset(&self) -> DVec2 {
        self.pan
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn screen_size(&self) -> DVec2 {
        self.screen_size
    }

    pub fn screen_center(&self) -> DVec2 {
        self.screen_size * 0.5
    }

    pub fn reset_to_default(&mut self) {
        self.zoom = DEFAULT_ZOOM;
        self.pan = self.screen_center() / self.zoom;
    }

    pub fn contains_screen(&self, screen: DVec2) -> bool {
        screen.x >= 0.0
            && screen.y >= 0.0
            && screen.x <= self.screen_size.x
            && screen.y <= self.screen_size.y
    }

    pub fn world_to_screen(&self, world: DVec2, allow_offscreen: bool) -> Option<DVec2> {
        let screen = (world + self.pan) * self.zoom;
        if !allow_offscreen && !self.contains_screen(screen) {
            return None;
        }
        Some(screen)
    }

    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        screen / self.zoom - self.pan
    }

    pub fn size_to_screen(&self, meters: f64) -> f64 {
        meters / WORLD_SCALE * self.zoom
    }

    pub fn is_on_screen(&self, world: DVec2) -> bool {
        self.world_to_screen(world, false).is_some()
    }

    pub fn is_hovering(&self, screen_point: DVec2, body: &Body) -> bool {
        let Some(center) = self.world_to_screen(body.position(), false) else {
            return false;
        };

        let hit_radius = self.size_to_screen(body.radius()).max(HOVER_MIN_RADIUS);
        center.distance(screen_point) <= hit_radius
    }

    /// Zoom one wheel tick towards or away from `cursor`, keeping the world point under
    /// the cursor fixed on screen.
    pub fn zoom_at(&mut self, cursor: DVec2, direction: ZoomDirection, modifier_held: bool) {
        let old_zoom = self.zoom;
        let step = ZOOM_TICK * direction.sign() * zoom_speed(old_zoom, modifier_held);
        let new_zoom = (old_zoom + step).clamp(ZOOM_MIN, ZOOM_MAX);

        self.pan -= cursor / old_zoom - cursor / new_zoom;
        self.zoom = new_zoom;
    }

    pub fn pan(&mut self, delta: DVec2) {
        self.pan += delta / self.zoom;
    }

    /// Rescales the pan offset with the screen so the centered content stays put.
    /// Degenerate sizes (a minimized window) are ignored.
    pub fn resize(&mut self, new_size: DVec2) -> bool {
        if new_size.x <= 0.0 || new_size.y <= 0.0 || !new_size.is_finite() {
            return false;
        }

        let old_size = self.screen_size;
        if old_size.x > 0.0 {
            self.pan.x *= new_size.x / old_size.x;
        }
        if old_size.y > 0.0 {
            self.pan.y *= new_size.y / old_size.y;
        }
        self.screen_size = new_size;
        true
    }

    pub fn center_on_screen(&self, world: DVec2) -> DVec2 {
        self.screen_center() / self.zoom - world
    }

    pub fn set_pan_offset(&mut self, pan: DVec2) {
        self.pan = pan;
    }

    pub fn visible_world_bounds(&self) -> (DVec2, DVec2) {
        (
            self.screen_to_world(DVec2::ZERO),
            self.screen_to_world(self.screen_size),
        )
    }

    pub fn grid_lines(&self, spacing: f64) -> GridLines {
        if !spacing.is_finite() || spacing <= 0.0 {
            return GridLines::default();
        }

        let (top_left, bottom_right) = self.visible_world_bounds();
        let vertical = grid_multiples(top_left.x, bottom_right.x, spacing)
            .map(|x| (x + self.pan.x) * self.zoom)
            .filter(|x| (0.0..=self.screen_size.x).contains(x))
            .collect();
        let horizontal = grid_multiples(top_left.y, bottom_right.y, spacing)
            .map(|y| (y + self.pan.y) * self.zoom)
            .filter(|y| (0.0..=self.screen_size.y).contains(y))
            .collect();

        GridLines {
            vertical,
            horizontal,
        }
    }

    /// Segment from near the screen center towards an off-screen `world` point, longer
    /// the further away the point is. `None` when the point is on screen.
    pub fn offscreen_indicator(&self, world: DVec2) -> Option<Indicator> {
        if self.is_on_screen(world) {
            return None;
        }

        let center_screen = self.screen_center();
        let center_world = self.screen_to_world(center_screen);
        let delta = world - center_world;
        let angle = delta.y.atan2(delta.x);
        let direction = DVec2::new(angle.cos(), angle.sin());
        let length = delta.length() / WORLD_SCALE * INDICATOR_LENGTH_SCALE;
        let offset = self.screen_size.x * INDICATOR_OFFSET_FRACTION;

        Some(Indicator {
            start: center_screen + direction * offset,
            end: center_screen + direction * (offset + length) + direction * (offset / 10.0),
        })
    }
}

pub fn zoom_speed(zoom: f64, modifier_held: bool) -> f64 {
    let base = if modifier_held {
        MODIFIER_ZOOM_SPEED
    } else {
        1.0
    };
    let band = ZOOM_BANDS
        .iter()
        .find(|(threshold, _)| zoom > *threshold)
        .map_or(1.0, |(_, multiplier)| *multiplier);
    base * band
}

fn grid_multiples(start: f64, end: f64, spacing: f64) -> impl Iterator<Item = f64> {
    let first = (start / spacing).floor();
    let last = (end / spacing).floor();
    let count = if last >= first {
        ((last - first) as usize + 1).min(MAX_GRID_LINES)
    } else {
        0
    };
    (0..count).map(move |index| (first + index as f64) * spacing)
}
