//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - The periodic tick timer
//! - End-of-run notification and restart
//! - Drawing surfaces (see `renderer`)
//!
//! [`Runner`] ties a [`GameLoop`] to a timer. Key events and the timer callback
//! share one game loop; both run on the same thread, so a key event is seen by
//! the next tick.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;
use std::rc::Rc;

pub use crate::game::Session;
use crate::game::GameLoop;
use crate::renderer::{Surface, draw_frame};
use crate::settings::Difficulty;
use crate::sim::Direction;

/// A repeating timer
pub trait Timer {
    type Handle;
    type Error;

    /// Call `callback` every `period_ms` until cancelled
    fn schedule(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Result<Self::Handle, Self::Error>;

    /// Stop a scheduled callback; it may be the one currently running
    fn cancel(&self, handle: Self::Handle);
}

struct Shared<H, S, N> {
    game: GameLoop,
    surface: S,
    session: N,
    handle: Option<H>,
}

/// Drives a game loop from a timer
pub struct Runner<T: Timer, S, N> {
    timer: Rc<T>,
    shared: Rc<RefCell<Shared<T::Handle, S, N>>>,
}

impl<T: Timer, S, N> Clone for Runner<T, S, N> {
    fn clone(&self) -> Self {
        Self {
            timer: Rc::clone(&self.timer),
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T, S, N> Runner<T, S, N>
where
    T: Timer + 'static,
    S: Surface + 'static,
    N: Session + 'static,
{
    pub fn new(game: GameLoop, surface: S, session: N, timer: Rc<T>) -> Self {
        Self {
            timer,
            shared: Rc::new(RefCell::new(Shared {
                game,
                surface,
                session,
                handle: None,
            })),
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.borrow().handle.is_some()
    }

    /// Start ticking; does nothing if already running
    pub fn start(&self) -> Result<(), T::Error> {
        if self.is_running() {
            log::warn!("Start requested while already running");
            return Ok(());
        }

        let period_ms = self.shared.borrow().game.settings().tick_period_ms;
        let shared = Rc::clone(&self.shared);
        let timer = Rc::clone(&self.timer);
        let handle = self.timer.schedule(
            period_ms,
            Box::new(move || {
                let mut guard = shared.borrow_mut();
                let Shared {
                    game,
                    surface,
                    session,
                    handle,
                } = &mut *guard;

                if game.tick(surface, session).is_terminal() {
                    if let Some(handle) = handle.take() {
                        timer.cancel(handle);
                    }
                    log::info!("Run over, timer stopped");
                }
            }),
        )?;

        self.shared.borrow_mut().handle = Some(handle);
        log::info!("Game started ({} ms per tick)", period_ms);
        Ok(())
    }

    /// Stop ticking; the session is kept as is
    pub fn pause(&self) {
        let handle = self.shared.borrow_mut().handle.take();
        if let Some(handle) = handle {
            self.timer.cancel(handle);
            log::info!("Game paused");
        }
    }

    /// Stop ticking and start the session over
    pub fn reset(&self) {
        self.pause();
        let mut guard = self.shared.borrow_mut();
        let Shared { game, session, .. } = &mut *guard;
        game.reset();
        session.restart();
    }

    /// Draw the current state without ticking
    pub fn redraw(&self) {
        let mut guard = self.shared.borrow_mut();
        let Shared { game, surface, .. } = &mut *guard;
        draw_frame(surface, game.state());
    }

    pub fn key_down(&self, key: &str) -> Option<Direction> {
        self.shared.borrow_mut().game.key_down(key)
    }

    pub fn key_up(&self, key: &str) -> Option<Direction> {
        self.shared.borrow_mut().game.key_up(key)
    }

    pub fn set_difficulty(&self, difficulty: Difficulty) -> bool {
        self.shared.borrow_mut().game.set_difficulty(difficulty)
    }

    /// Read-only access to the loop, surface and session
    pub fn inspect<R>(&self, f: impl FnOnce(&GameLoop, &S, &N) -> R) -> R {
        let guard = self.shared.borrow();
        f(&guard.game, &guard.surface, &guard.session)
    }
}
