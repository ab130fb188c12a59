//! Canvas 2D rendering module
//!
//! Draws immutable snapshots; never mutates game state.

mod grid;
mod motion;

pub use grid::grid_canvas_size;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::nav::{GAMES, Screen};

pub const BACKGROUND: &str = "#1a1a1a";
pub const TEXT: &str = "#ffffff";
const ACCENT: &str = "#4a9eff";
const ACCENT_DARK: &str = "#2d7cd6";
const FONT: &str = "\"Press Start 2P\", monospace";

const CARD_W: f64 = 260.0;
const CARD_H: f64 = 180.0;
const CARD_GAP: f64 = 40.0;
const CARD_TOP: f64 = 120.0;

/// Canvas painter for all three screens
pub struct Painter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Painter {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Resize the backing store; no-op when unchanged
    pub fn resize(&self, width: u32, height: u32) {
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
    }

    fn clear(&self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn text(&self, text: &str, x: f64, y: f64, size_px: u32, color: &str, align: &str) {
        self.ctx.set_font(&format!("{}px {}", size_px, FONT));
        self.ctx.set_text_align(align);
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x, y);
    }

    /// Centered banner with a dimmed backdrop (pause, game over)
    fn banner(&self, title: &str, subtitle: &str) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.6)");
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.text(title, w / 2.0, h / 2.0 - 16.0, 24, TEXT, "center");
        self.text(subtitle, w / 2.0, h / 2.0 + 20.0, 10, TEXT, "center");
    }

    /// Position and size of the `index`th home card
    fn card_rect(&self, index: usize) -> (f64, f64, f64, f64) {
        let w = self.canvas.width() as f64;
        let count = GAMES.len() as f64;
        let total = count * CARD_W + (count - 1.0) * CARD_GAP;
        let x = (w - total) / 2.0 + index as f64 * (CARD_W + CARD_GAP);
        (x, CARD_TOP, CARD_W, CARD_H)
    }

    /// Which home card, if any, is under a canvas-space point
    pub fn home_card_at(&self, x: f64, y: f64) -> Option<Screen> {
        GAMES.iter().enumerate().find_map(|(index, game)| {
            let (cx, cy, cw, ch) = self.card_rect(index);
            (x >= cx && x < cx + cw && y >= cy && y < cy + ch).then_some(game.screen)
        })
    }

    /// Home screen: title plus one card per game
    pub fn render_home(&self) {
        self.clear();
        let w = self.canvas.width() as f64;
        self.text("ARCADE ZONE", w / 2.0, 60.0, 28, TEXT, "center");

        for (index, game) in GAMES.iter().enumerate() {
            let (x, y, cw, ch) = self.card_rect(index);
            self.ctx
                .set_fill_style_str(if index == 0 { ACCENT } else { ACCENT_DARK });
            self.ctx.fill_rect(x, y, cw, ch);
            let cx = x + cw / 2.0;
            self.ctx.set_font("48px Arial");
            self.ctx.set_text_align("center");
            let _ = self.ctx.fill_text(game.icon, cx, y + 50.0);
            self.text(game.title, cx, y + 105.0, 12, TEXT, "center");
            self.text(game.description, cx, y + 140.0, 7, TEXT, "center");
        }
        self.text(
            "Click a game or press 1 / 2",
            w / 2.0,
            CARD_TOP + CARD_H + 40.0,
            8,
            "#888888",
            "center",
        );
    }
}
