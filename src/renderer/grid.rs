use super::{Painter, TEXT};
use crate::consts::{CANVAS_WIDTH, CELL_SIZE};
use crate::sim::grid::{GridPhase, GridState};

const SNAKE_HEAD: &str = "#4aff4a";
const SNAKE_BODY: &str = "#2ecc2e";
const GHOST_TINT: &str = "rgba(170, 136, 255, 0.6)";
const OBSTACLE: &str = "#666666";
const GRID_LINE: &str = "#262626";
const HUD_HEIGHT: f64 = 60.0;

/// Canvas size needed for a board of `grid_size` cells plus the HUD
pub fn grid_canvas_size(grid_size: i32) -> (u32, u32) {
    let side = (grid_size.max(1) as f32 * CELL_SIZE) as u32;
    (side.max(CANVAS_WIDTH as u32), side + HUD_HEIGHT as u32 + 20)
}

impl Painter {
    /// Snake board with score, level and speed above it
    pub fn render_grid(&self, state: &GridState, best: i64) {
        self.clear();
        let cell = CELL_SIZE as f64;
        let side = state.config.grid_size as f64 * cell;
        let origin_x = ((self.canvas.width() as f64 - side) / 2.0).max(0.0);
        let origin_y = HUD_HEIGHT;

        self.text(&format!("Score: {}", state.score), origin_x, 20.0, 10, TEXT, "left");
        self.text(&format!("High: {}", best), origin_x, 42.0, 10, TEXT, "left");
        self.text(
            &format!("Level {}  {}ms", state.level, state.speed_ms),
            origin_x + side,
            20.0,
            10,
            TEXT,
            "right",
        );
        if state.ghost_active() {
            self.text("Ghost Mode Active!", origin_x + side, 42.0, 8, "#aa88ff", "right");
        }

        self.ctx.set_stroke_style_str(GRID_LINE);
        self.ctx.set_line_width(1.0);
        self.ctx.stroke_rect(origin_x, origin_y, side, side);

        let fill_cell = |x: i32, y: i32, color: &str, inset: f64| {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                origin_x + x as f64 * cell + inset,
                origin_y + y as f64 * cell + inset,
                cell - 2.0 * inset,
                cell - 2.0 * inset,
            );
        };

        for obstacle in &state.obstacles {
            fill_cell(obstacle.x, obstacle.y, OBSTACLE, 0.0);
        }
        if let Some(food) = state.food {
            fill_cell(food.position.x, food.position.y, food.kind.color(), 3.0);
        }
        for (index, segment) in state.snake.iter().enumerate() {
            let color = if index == 0 { SNAKE_HEAD } else { SNAKE_BODY };
            fill_cell(segment.x, segment.y, color, 1.0);
            if state.ghost_active() {
                fill_cell(segment.x, segment.y, GHOST_TINT, 1.0);
            }
        }

        match state.phase {
            GridPhase::Running => {}
            GridPhase::Paused => self.banner("PAUSED", "Space to resume"),
            GridPhase::Over => self.banner(
                "GAME OVER",
                &format!("Score {}  -  Enter to play again, Esc for home", state.score),
            ),
        }
    }
}
