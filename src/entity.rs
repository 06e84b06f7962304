use crate::renderer::{Color, Font, Surface};

pub const FIELD_WIDTH: f64 = 700.0;
pub const FIELD_HEIGHT: f64 = 600.0;

pub const PADDLE_WIDTH: f64 = 20.0;
pub const PADDLE_HEIGHT: f64 = 100.0;
pub const PLAYER_STEP: f64 = 7.0; // per key press
pub const COMPUTER_SPEED: f64 = 4.5;
pub const COMPUTER_X: f64 = 60.0;
pub const PLAYER_INSET: f64 = 80.0; // player x is measured from the right edge

pub const BALL_SIZE: f64 = 20.0;
pub const BALL_ARC: f64 = 30.0;
pub const BALL_SPEED: i32 = 5;
/// Horizontal distance between a paddle's x and the ball's x at contact
pub const CONTACT_OFFSET: i32 = 20;
/// Largest centre-to-centre distance that still counts as a hit
pub const HIT_REACH: i32 = 60;
/// How far past each edge the ball travels before it is served again
pub const LEFT_MARGIN: f64 = 100.0;
pub const RIGHT_MARGIN: f64 = 120.0;

pub const SCORE_FONT: Font = Font {
    family: "Rockwell",
    size: 20.0,
    bold: true,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f64,
    pub height: f64,
}

impl Field {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest y a paddle's top edge may take.
    pub fn paddle_floor(&self) -> f64 {
        self.height - PADDLE_HEIGHT
    }

    fn clamp_paddle(&self, y: f64) -> f64 {
        if y < 0.0 {
            0.0
        } else if y > self.paddle_floor() {
            self.paddle_floor()
        } else {
            y
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What the ball sees of a paddle when it checks for contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleSnapshot {
    pub x: f64,
    pub center_y: f64,
}

fn draw_paddle(surface: &mut dyn Surface, x: f64, y: f64) {
    surface.fill_rect(x, y, PADDLE_WIDTH, PADDLE_HEIGHT, Color::White);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
}

impl Player {
    pub fn new(field: Field) -> Self {
        Self {
            x: field.width - PLAYER_INSET,
            y: field.height / 2.0 - PADDLE_HEIGHT / 2.0,
        }
    }

    pub fn center_y(&self) -> f64 {
        self.y + PADDLE_HEIGHT / 2.0
    }

    pub fn snapshot(&self) -> PaddleSnapshot {
        PaddleSnapshot {
            x: self.x,
            center_y: self.center_y(),
        }
    }

    /// Moves the paddle one step. Bounds are only enforced by the next
    /// `update`, so `y` may sit outside the field until then.
    pub fn handle_input(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.y -= PLAYER_STEP,
            Direction::Down => self.y += PLAYER_STEP,
        }
    }

    pub fn update(&mut self, field: Field) {
        self.y = field.clamp_paddle(self.y);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        draw_paddle(surface, self.x, self.y);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Computer {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

impl Computer {
    pub fn new(field: Field) -> Self {
        Self {
            x: COMPUTER_X,
            y: field.height / 2.0 - PADDLE_HEIGHT / 2.0,
            speed: COMPUTER_SPEED,
        }
    }

    pub fn center_y(&self) -> f64 {
        self.y + PADDLE_HEIGHT / 2.0
    }

    pub fn snapshot(&self) -> PaddleSnapshot {
        PaddleSnapshot {
            x: self.x,
            center_y: self.center_y(),
        }
    }

    /// Steps toward the ball's top edge as seen at the start of the frame.
    /// When the paddle is level with it the previous heading is kept.
    pub fn update(&mut self, field: Field, ball_y: f64) {
        self.y += self.speed;

        if self.y < ball_y {
            self.speed = COMPUTER_SPEED;
        } else if self.y > ball_y {
            self.speed = -COMPUTER_SPEED;
        }

        self.y = field.clamp_paddle(self.y);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        draw_paddle(surface, self.x, self.y);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallEvent {
    Moved,
    PlayerHit,
    ComputerHit,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub velocity: (i32, i32),
}

impl Ball {
    pub fn new(field: Field) -> Self {
        let (x, y) = Self::serve_position(field);
        Self {
            x,
            y,
            velocity: (BALL_SPEED, BALL_SPEED),
        }
    }

    pub fn serve_position(field: Field) -> (f64, f64) {
        (
            field.width / 2.0 - BALL_SIZE / 2.0,
            field.height / 2.0 - BALL_SIZE / 2.0,
        )
    }

    // Offset is the full ball size, not half; paddle reach is tuned to it.
    pub fn center_y(&self) -> f64 {
        self.y + BALL_SIZE
    }

    fn touches(&self, paddle: PaddleSnapshot, offset: i32) -> bool {
        // Both sides are truncated before comparing, so contact only
        // registers on frames where the integer x lines up exactly.
        let dx = self.x as i32 - paddle.x as i32;
        let dy = self.center_y() as i32 - paddle.center_y as i32;
        dx == offset && dy.abs() <= HIT_REACH
    }

    pub fn update(
        &mut self,
        field: Field,
        player: PaddleSnapshot,
        computer: PaddleSnapshot,
    ) -> BallEvent {
        self.x += self.velocity.0 as f64;
        self.y += self.velocity.1 as f64;

        let event = if self.x < -LEFT_MARGIN || self.x > field.width + RIGHT_MARGIN {
            let (x, y) = Self::serve_position(field);
            self.x = x;
            self.y = y;
            self.velocity = (-self.velocity.0, -self.velocity.1);
            BallEvent::Reset
        } else if self.touches(player, -CONTACT_OFFSET) {
            self.velocity.0 = -self.velocity.0;
            BallEvent::PlayerHit
        } else if self.touches(computer, CONTACT_OFFSET) {
            self.velocity.0 = -self.velocity.0;
            BallEvent::ComputerHit
        } else {
            BallEvent::Moved
        };

        // Level-triggered: flips on every frame the ball is past a wall.
        if self.y < 0.0 || self.y > field.height - BALL_SIZE {
            self.velocity.1 = -self.velocity.1;
        }

        event
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_round_rect(
            self.x,
            self.y,
            BALL_SIZE,
            BALL_SIZE,
            BALL_ARC,
            BALL_ARC,
            Color::White,
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scorer {
    Player,
    Computer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub player: u32,
    pub computer: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Awards a point when the ball sits exactly on the left or right edge.
    pub fn update(&mut self, field: Field, ball_x: f64) -> Option<Scorer> {
        if ball_x == 0.0 {
            self.player += 1;
            Some(Scorer::Player)
        } else if ball_x == field.width {
            self.computer += 1;
            Some(Scorer::Computer)
        } else {
            None
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_text(
            &format!("Computer: {}", self.computer),
            150.0,
            50.0,
            SCORE_FONT,
            Color::White,
        );
        surface.fill_text(
            &format!("Player: {}", self.player),
            450.0,
            50.0,
            SCORE_FONT,
            Color::White,
        );
    }
}
