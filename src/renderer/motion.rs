use glam::Vec2;

use super::{Painter, TEXT};
use crate::sim::motion::{Entity, MotionState};

const TRAIL: &str = "rgba(135, 206, 235, 0.8)";

impl Painter {
    /// Slicer playfield: entities, falling halves, blade trail and HUD
    pub fn render_motion(&self, state: &MotionState, best: i64) {
        self.clear();

        for entity in &state.entities {
            self.draw_entity(entity, 2.0);
        }
        for fragment in &state.fragments {
            self.draw_entity(fragment, 1.5);
        }
        self.draw_trail(state.trail.points().copied());

        self.text(&format!("Score: {}", state.score), 16.0, 20.0, 10, TEXT, "left");
        self.text(&format!("High: {}", best), 16.0, 42.0, 10, TEXT, "left");

        if state.is_over() {
            self.banner(
                "GAME OVER",
                &format!("Score {}  -  click to play again, Esc for home", state.score),
            );
        }
    }

    fn draw_entity(&self, entity: &Entity, font_factor: f32) {
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.translate(entity.pos.x as f64, entity.pos.y as f64);
        let _ = ctx.rotate(entity.rotation as f64);
        let _ = ctx.scale(entity.scale as f64, entity.scale as f64);
        ctx.set_font(&format!("{}px Arial", (entity.size() * font_factor) as u32));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let _ = ctx.fill_text(entity.kind.emoji(), 0.0, 0.0);
        ctx.restore();
    }

    fn draw_trail(&self, points: impl Iterator<Item = Vec2>) {
        let ctx = &self.ctx;
        let mut points = points.peekable();
        let Some(first) = points.next() else {
            return;
        };
        if points.peek().is_none() {
            return;
        }
        ctx.begin_path();
        ctx.move_to(first.x as f64, first.y as f64);
        for point in points {
            ctx.line_to(point.x as f64, point.y as f64);
        }
        ctx.set_stroke_style_str(TRAIL);
        ctx.set_line_width(5.0);
        ctx.set_line_cap("round");
        ctx.stroke();
    }
}
