use crate::game::Game;
use crate::renderer::{Input, Surface};
use log::info;
use std::time::Duration;

/// Minimum spacing between two frames: a little under 1/60 s so a
/// display running at exactly 60 Hz never drops a frame.
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(950_000_000 / 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Entities updated and the frame was drawn
    Advanced,
    /// Too soon after the previous frame; nothing happened
    TooSoon,
    /// The window is unfocused
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The input caused a redraw that should be presented
    Redrawn,
    Quit,
}

/// Owns the game and decides when it advances.
///
/// Timestamps are taken from any monotonic clock; only differences matter.
pub struct GameLoop {
    game: Game,
    state: LoopState,
    previous_frame: Option<Duration>,
}

impl GameLoop {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            state: LoopState::Running,
            previous_frame: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Paints the current frame without advancing anything.
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.game.draw(surface);
    }

    pub fn handle_input(&mut self, input: Input, surface: &mut dyn Surface) -> Flow {
        match input {
            Input::Direction(direction) => {
                self.game.move_player(direction);
                Flow::Continue
            }
            Input::Focus(focused) => {
                self.set_focus(focused);
                self.draw(surface);
                Flow::Redrawn
            }
            Input::Quit => Flow::Quit,
        }
    }

    fn set_focus(&mut self, focused: bool) {
        let next = if focused {
            LoopState::Running
        } else {
            LoopState::Paused
        };
        if next != self.state {
            info!("focus {}, loop {:?}", if focused { "gained" } else { "lost" }, next);
        }
        self.state = next;
    }

    pub fn tick(&mut self, now: Duration, surface: &mut dyn Surface) -> Tick {
        if self.state == LoopState::Paused {
            return Tick::Paused;
        }

        if let Some(previous) = self.previous_frame {
            if now.saturating_sub(previous) <= FRAME_INTERVAL {
                return Tick::TooSoon;
            }
        }

        self.game.update();
        self.game.draw(surface);
        self.previous_frame = Some(now);
        Tick::Advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Direction;
    use crate::renderer::{Color, CommandBuffer, DrawCommand};
    use proptest::prelude::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(FRAME_INTERVAL, Duration::from_nanos(15_833_333));
    }

    #[test]
    fn test_first_tick_always_advances() {
        let mut game_loop = GameLoop::new(Game::default());
        let mut surface = CommandBuffer::new();

        assert_eq!(game_loop.tick(Duration::ZERO, &mut surface), Tick::Advanced);
        assert_eq!(game_loop.game().ball.x, 345.0);
        assert_eq!(surface.commands()[0], DrawCommand::Background(Color::Black));
    }

    #[test]
    fn test_ticks_gated_by_interval() {
        let mut game_loop = GameLoop::new(Game::default());
        let mut surface = CommandBuffer::new();

        assert_eq!(game_loop.tick(ms(1000), &mut surface), Tick::Advanced);
        assert_eq!(game_loop.tick(ms(1010), &mut surface), Tick::TooSoon);
        assert_eq!(game_loop.tick(ms(1000) + FRAME_INTERVAL, &mut surface), Tick::TooSoon);
        assert_eq!(game_loop.tick(ms(1016), &mut surface), Tick::Advanced);
        assert_eq!(game_loop.game().ball.x, 350.0);
    }

    #[test]
    fn test_skipped_tick_does_not_draw() {
        let mut game_loop = GameLoop::new(Game::default());
        let mut surface = CommandBuffer::new();

        game_loop.tick(ms(0), &mut surface);
        surface.clear();
        game_loop.tick(ms(5), &mut surface);

        assert!(surface.is_empty());
    }

    #[test]
    fn test_clock_going_backwards_is_skipped() {
        let mut game_loop = GameLoop::new(Game::default());
        let mut surface = CommandBuffer::new();

        game_loop.tick(ms(500), &mut surface);
        assert_eq!(game_loop.tick(ms(100), &mut surface), Tick::TooSoon);
    }

    #[test]
    fn test_focus_loss_pauses_and_redraws() {
        let mut game_loop = GameLoop::new(Game::default());
        let mut surface = CommandBuffer::new();
        game_loop.tick(ms(0), &mut surface);
        surface.clear();

        let flow = game_loop.handle_input(Input::Focus(false), &mut surface);

        assert_eq!(flow, Flow::Redrawn);
        assert_eq!(game_loop.state(), LoopState::Paused);
        assert_eq!(surface.commands().len(), 6);

        surface.clear();
        assert_eq!(game_loop.tick(ms(1000), &mut surface), Tick::Paused);
        assert!(surface.is_empty());
        assert_eq!(game_loop.game().ball.x, 345.0);
    }

    #[test]
    fn test_focus_gain_resumes_immediately() {
        let mut game_loop = GameLoop::new(Game::default());
        let mut surface = CommandBuffer::new();
        game_loop.tick(ms(0), &mut surface);
        game_loop.handle_input(Input::Focus(false), &mut surface);

        let flow = game_loop.handle_input(Input::Focus(true), &mut surface);
        assert_eq!(flow, Flow::Redrawn);
        assert_eq!(game_loop.state(), LoopState::Running);

        // The previous frame is long past, so the next tick fires at once.
        assert_eq!(game_loop.tick(ms(5000), &mut surface), Tick::Advanced);
        assert_eq!(game_loop.game().ball.x, 350.0);
    }

    #[test]
    fn test_direction_applies_between_ticks() {
        let mut game_loop = GameLoop::new(Game::default());
        let mut surface = CommandBuffer::new();
        game_loop.tick(ms(0), &mut surface);
        surface.clear();

        let flow = game_loop.handle_input(Input::Direction(Direction::Up), &mut surface);

        assert_eq!(flow, Flow::Continue);
        assert_eq!(game_loop.game().player.y, 243.0);
        assert!(surface.is_empty(), "input alone does not redraw");
    }

    #[test]
    fn test_quit() {
        let mut game_loop = GameLoop::new(Game::default());
        let mut surface = CommandBuffer::new();
        assert_eq!(game_loop.handle_input(Input::Quit, &mut surface), Flow::Quit);
    }

    proptest! {
        /// Advanced ticks are always more than one interval apart
        #[test]
        fn prop_advanced_ticks_spaced(
            gaps in prop::collection::vec(0u64..40, 1..300)
        ) {
            let mut game_loop = GameLoop::new(Game::default());
            let mut surface = CommandBuffer::new();
            let mut now = Duration::ZERO;
            let mut last_advanced: Option<Duration> = None;
            let mut advanced = 0;

            for gap in gaps {
                now += ms(gap);
                if game_loop.tick(now, &mut surface) == Tick::Advanced {
                    if let Some(last) = last_advanced {
                        prop_assert!(now - last > FRAME_INTERVAL);
                    }
                    last_advanced = Some(now);
                    advanced += 1;
                }
            }

            let expected_x = 340.0 + 5.0 * advanced as f64;
            if advanced < 50 {
                prop_assert_eq!(game_loop.game().ball.x, expected_x);
            }
        }
    }
}
