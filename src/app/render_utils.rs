use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::scene::NodeVariant;

/// Maps the layout frame onto a screen rect, preserving aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct FrameTransform {
    origin: Pos2,
    scale: f32,
}

impl FrameTransform {
    pub(super) fn fit(rect: Rect, frame: Vec2, padding: f32) -> Self {
        let available = (rect.size() - Vec2::splat(padding * 2.0)).max(Vec2::splat(1.0));
        let scale = (available.x / frame.x).min(available.y / frame.y).max(0.01);
        let origin = rect.center() - frame * scale * 0.5;
        Self { origin, scale }
    }

    pub(super) fn scale(self) -> f32 {
        self.scale
    }

    pub(super) fn to_screen(self, position: Vec2) -> Pos2 {
        self.origin + position * self.scale
    }
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, frame_rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));
    painter.rect_filled(frame_rect, 4.0, Color32::from_rgb(24, 29, 36));
    painter.rect_stroke(
        frame_rect,
        4.0,
        Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 90)),
        eframe::egui::StrokeKind::Inside,
    );
}

pub(super) fn node_color(variant: NodeVariant) -> Color32 {
    match variant {
        NodeVariant::Gene => Color32::from_rgb(96, 170, 120),
        NodeVariant::Compound => Color32::from_rgb(95, 150, 215),
        NodeVariant::Group => Color32::from_rgb(190, 190, 200),
    }
}

pub(super) fn selected_color() -> Color32 {
    Color32::from_rgb(245, 206, 93)
}
