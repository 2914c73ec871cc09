//! Rendering module
//!
//! The game never owns pixels. Every frame is drawn through a [`Surface`]:
//! a canvas 2D context in the browser, a command recorder when headless.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::sim::{GameState, Obstacle, Player};

/// Colours and fonts
pub mod palette {
    pub const PLAYER: &str = "black";
    pub const OBSTACLE: &str = "blue";
    pub const SCORE: &str = "#0095DD";
    pub const SCORE_FONT: &str = "16px Arial";
}

/// Baseline position of the lives counter
pub const SCORE_POS: Vec2 = Vec2::new(8.0, 20.0);

/// A 2D drawing target
pub trait Surface {
    /// Erase a rectangle
    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Fill a circle
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: &str);
    /// Fill text with its baseline starting at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str);
}

pub fn draw_player<S: Surface + ?Sized>(surface: &mut S, player: &Player) {
    surface.draw_circle(player.pos, player.radius, palette::PLAYER);
}

pub fn draw_obstacle<S: Surface + ?Sized>(surface: &mut S, obstacle: &Obstacle) {
    surface.draw_circle(obstacle.pos, obstacle.radius, palette::OBSTACLE);
}

pub fn draw_score<S: Surface + ?Sized>(surface: &mut S, lives: u8) {
    surface.draw_text(
        &format!("Lives: {}", lives),
        SCORE_POS,
        palette::SCORE_FONT,
        palette::SCORE,
    );
}

/// Redraw the whole arena: lives counter, player, then obstacles in spawn order
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.clear(0.0, 0.0, state.arena.width, state.arena.height);
    draw_score(surface, state.lives);
    draw_player(surface, &state.player);
    for obstacle in &state.obstacles {
        draw_obstacle(surface, obstacle);
    }
}
