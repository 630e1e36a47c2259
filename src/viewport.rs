//! Pan/zoom state for a rendered scene.
//!
//! The controller owns a single [`ViewportTransform`]. Every write to the
//! scale goes through the same clamp, and registered listeners are told the
//! new scale after each zoom operation. Re-rendering is the host's job.

use serde::Serialize;

use crate::config::ViewportConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl ViewportTransform {
    /// Value for an SVG `transform` attribute.
    pub fn svg_transform(&self) -> String {
        format!(
            "translate({:.2} {:.2}) scale({:.4})",
            self.translate_x, self.translate_y, self.scale
        )
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.scale + self.translate_x,
            y * self.scale + self.translate_y,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ScaleListener = Box<dyn FnMut(f32)>;

pub struct ViewportController {
    config: ViewportConfig,
    transform: ViewportTransform,
    listeners: Vec<(ListenerId, ScaleListener)>,
    next_listener: u64,
}

impl std::fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportController")
            .field("config", &self.config)
            .field("transform", &self.transform)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ViewportController {
    pub fn new(config: &ViewportConfig) -> Self {
        let config = normalize(config);
        let transform = ViewportTransform {
            scale: config.initial_scale,
            translate_x: 0.0,
            translate_y: 0.0,
        };
        Self {
            config,
            transform,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    /// Current scale as a whole percentage, e.g. `80` for 0.8.
    pub fn scale_percent(&self) -> i32 {
        (self.transform.scale * 100.0).round() as i32
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn subscribe(&mut self, listener: impl FnMut(f32) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn zoom_in(&mut self) {
        let factor = self.config.zoom_in_factor;
        self.set_scale(self.transform.scale * factor);
    }

    pub fn zoom_out(&mut self) {
        let factor = self.config.zoom_out_factor;
        self.set_scale(self.transform.scale * factor);
    }

    pub fn reset(&mut self) {
        self.transform = ViewportTransform {
            scale: self.clamp(self.config.initial_scale),
            translate_x: 0.0,
            translate_y: 0.0,
        };
        self.notify();
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = self.clamp(scale);
        self.notify();
    }

    /// Drag gesture; deltas are in screen units.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() && dy.is_finite() {
            self.transform.translate_x += dx;
            self.transform.translate_y += dy;
        }
    }

    /// Wheel gesture. Negative deltas zoom in. The scene point under the
    /// pointer stays under the pointer unless the scale is clamped.
    pub fn wheel_zoom(&mut self, delta: f32, pointer_x: f32, pointer_y: f32) {
        if !delta.is_finite() || !pointer_x.is_finite() || !pointer_y.is_finite() {
            return;
        }
        let old = self.transform.scale;
        let new = self.clamp(old * (-delta * self.config.wheel_sensitivity).exp());
        let ratio = new / old;
        self.transform.translate_x = pointer_x - (pointer_x - self.transform.translate_x) * ratio;
        self.transform.translate_y = pointer_y - (pointer_y - self.transform.translate_y) * ratio;
        self.transform.scale = new;
        self.notify();
    }

    fn clamp(&self, scale: f32) -> f32 {
        if scale.is_nan() {
            return self.transform.scale;
        }
        scale.clamp(self.config.min_scale, self.config.max_scale)
    }

    fn notify(&mut self) {
        let scale = self.transform.scale;
        for (_, listener) in &mut self.listeners {
            listener(scale);
        }
    }
}

fn normalize(config: &ViewportConfig) -> ViewportConfig {
    let positive = |value: f32, fallback: f32| {
        if value.is_finite() && value > 0.0 {
            value
        } else {
            fallback
        }
    };
    let defaults = ViewportConfig::default();
    let mut min_scale = positive(config.min_scale, defaults.min_scale);
    let mut max_scale = positive(config.max_scale, defaults.max_scale);
    if min_scale > max_scale {
        std::mem::swap(&mut min_scale, &mut max_scale);
    }
    let zoom_in_factor = match positive(config.zoom_in_factor, defaults.zoom_in_factor) {
        f if f > 1.0 => f,
        _ => defaults.zoom_in_factor,
    };
    let zoom_out_factor = match positive(config.zoom_out_factor, defaults.zoom_out_factor) {
        f if f < 1.0 => f,
        _ => defaults.zoom_out_factor,
    };
    ViewportConfig {
        initial_scale: positive(config.initial_scale, defaults.initial_scale)
            .clamp(min_scale, max_scale),
        min_scale,
        max_scale,
        zoom_in_factor,
        zoom_out_factor,
        wheel_sensitivity: if config.wheel_sensitivity.is_finite() {
            config.wheel_sensitivity
        } else {
            defaults.wheel_sensitivity
        },
    }
}
