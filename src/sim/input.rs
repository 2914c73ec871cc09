//! Held-key input state
//!
//! Key events flip flags; the loop reads them once per tick. There is no
//! debouncing or repeat suppression, the flags just mirror what is held.

use super::state::Player;

/// The four steering directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a DOM `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Direction::Up => "ArrowUp",
            Direction::Down => "ArrowDown",
            Direction::Left => "ArrowLeft",
            Direction::Right => "ArrowRight",
        }
    }
}

/// Currently held directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag_mut(&mut self, direction: Direction) -> &mut bool {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    pub fn press(&mut self, direction: Direction) {
        *self.flag_mut(direction) = true;
    }

    pub fn release(&mut self, direction: Direction) {
        *self.flag_mut(direction) = false;
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Handle a key press; returns the direction if the key was recognised
    pub fn key_down(&mut self, key: &str) -> Option<Direction> {
        let direction = Direction::from_key(key)?;
        self.press(direction);
        Some(direction)
    }

    /// Handle a key release; returns the direction if the key was recognised
    pub fn key_up(&mut self, key: &str) -> Option<Direction> {
        let direction = Direction::from_key(key)?;
        self.release(direction);
        Some(direction)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Step the player by its speed for each held axis
    ///
    /// Right wins over left and up wins over down when both are held.
    pub fn apply(&self, player: &mut Player) {
        if self.right {
            player.pos.x += player.speed.x;
        } else if self.left {
            player.pos.x -= player.speed.x;
        }

        if self.up {
            player.pos.y -= player.speed.y;
        } else if self.down {
            player.pos.y += player.speed.y;
        }
    }
}
