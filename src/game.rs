use crate::entity::{Ball, BallEvent, Computer, Direction, Field, Player, ScoreBoard, Scorer};
use crate::renderer::{Color, Surface};
use log::debug;

/// Outcome of one `Game::update`, mostly useful for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub ball: BallEvent,
    pub scored: Option<Scorer>,
}

pub struct Game {
    pub field: Field,
    pub player: Player,
    pub computer: Computer,
    pub ball: Ball,
    pub scores: ScoreBoard,
}

impl Game {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            player: Player::new(field),
            computer: Computer::new(field),
            ball: Ball::new(field),
            scores: ScoreBoard::new(),
        }
    }

    pub fn move_player(&mut self, direction: Direction) {
        self.player.handle_input(direction);
    }

    /// Advances every entity once, always in the order player, computer,
    /// ball, scoreboard. Each one only sees the state its predecessors left.
    pub fn update(&mut self) -> Frame {
        self.player.update(self.field);
        self.computer.update(self.field, self.ball.y);

        let ball = self.ball.update(
            self.field,
            self.player.snapshot(),
            self.computer.snapshot(),
        );
        if ball == BallEvent::Reset {
            debug!("ball served again, velocity now {:?}", self.ball.velocity);
        }

        let scored = self.scores.update(self.field, self.ball.x);
        if let Some(scorer) = scored {
            debug!(
                "{:?} scored (computer {}, player {})",
                scorer, self.scores.computer, self.scores.player
            );
        }

        Frame { ball, scored }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_background(Color::Black);
        self.player.draw(surface);
        self.computer.draw(surface);
        self.ball.draw(surface);
        self.scores.draw(surface);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Field::default())
    }
}
