use std::f32::consts::TAU;

use egui::{epaint::Mesh, Color32, Painter, Pos2, Shape, Stroke, Vec2};

use crate::compositor::{CursorVisual, SpotlightVisual, VisualState};

const SPOTLIGHT_SEGMENTS: u32 = 64;

/// Drawing layers of the overlay. The bottom layer is drawn first, the top layer last.
#[derive(Default)]
pub struct Layers {
    bottom: Vec<Shape>,
    top: Vec<Shape>,
}

impl Layers {
    /// Spotlights go to the bottom layer, the cursor marker on top of them.
    pub fn from_visual_state(state: &VisualState) -> Self {
        let mut layers = Self::default();
        for spotlight in &state.spotlights {
            if let Some(mesh) = spotlight_mesh(spotlight) {
                layers.add(mesh);
            }
        }
        if let Some(cursor) = &state.cursor {
            layers.add_top(cursor_shape(cursor));
        }
        layers
    }

    pub fn add(&mut self, shape: impl Into<Shape>) {
        self.bottom.push(shape.into());
    }

    pub fn add_top(&mut self, shape: impl Into<Shape>) {
        self.top.push(shape.into());
    }

    pub fn is_empty(&self) -> bool {
        self.bottom.is_empty() && self.top.is_empty()
    }

    pub fn draw(self, p: &Painter) {
        self.bottom.into_iter().for_each(|shape| {
            p.add(shape);
        });
        self.top.into_iter().for_each(|shape| {
            p.add(shape);
        });
    }
}

/// Triangle fan approximating a radial gradient: full color at the center, transparent at
/// `radius * fade_stop`. Nothing to draw for a zero opacity or a collapsed gradient.
pub fn spotlight_mesh(visual: &SpotlightVisual) -> Option<Shape> {
    let reach = visual.radius * visual.fade_stop;
    if visual.opacity <= 0. || reach <= 0. {
        return None;
    }

    let [r, g, b, a] = visual.color;
    let alpha = (f32::from(a) * visual.opacity.min(1.)).round() as u8;
    let center_color = Color32::from_rgba_unmultiplied(r, g, b, alpha);

    let mut mesh = Mesh::default();
    mesh.colored_vertex(visual.center, center_color);
    for i in 0..SPOTLIGHT_SEGMENTS {
        let angle = TAU * i as f32 / SPOTLIGHT_SEGMENTS as f32;
        let pos: Pos2 = visual.center + Vec2::angled(angle) * reach;
        mesh.colored_vertex(pos, Color32::TRANSPARENT);
    }
    for i in 0..SPOTLIGHT_SEGMENTS {
        let next = (i + 1) % SPOTLIGHT_SEGMENTS;
        mesh.add_triangle(0, i + 1, next + 1);
    }

    Some(Shape::mesh(mesh))
}

/// Hollow ring centered on the pointer.
pub fn cursor_shape(visual: &CursorVisual) -> Shape {
    let [r, g, b, a] = visual.color;
    let radius = (visual.rect.width() - visual.ring_width) / 2.;

    Shape::circle_stroke(
        visual.center,
        radius.max(0.),
        Stroke::new(
            visual.ring_width,
            Color32::from_rgba_unmultiplied(r, g, b, a),
        ),
    )
}
