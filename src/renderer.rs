use crate::entity::Direction;
use std::f64::consts::{FRAC_PI_2, PI};
use std::io;

pub const TITLE: &str = "Ping Pong Game";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Direction(Direction),
    Focus(bool), // true when the window gains focus
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: &'static str,
    pub size: f64,
    pub bold: bool,
}

impl Font {
    /// CSS shorthand, e.g. `bold 20px Rockwell, serif`
    pub fn css(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{}{}px {}, serif", weight, self.size, self.family)
    }
}

/// One quarter-ellipse corner of a rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerArc {
    pub center_x: f64,
    pub center_y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Corner arcs of a rounded rectangle, clockwise from the top right.
/// `arc_width`/`arc_height` are diameters; radii never exceed half a side,
/// so an oversized arc turns the shape into an ellipse.
pub fn round_rect_corners(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    arc_width: f64,
    arc_height: f64,
) -> [CornerArc; 4] {
    let rx = (arc_width / 2.0).min(width / 2.0);
    let ry = (arc_height / 2.0).min(height / 2.0);
    let corner = |center_x, center_y, start_angle: f64| CornerArc {
        center_x,
        center_y,
        radius_x: rx,
        radius_y: ry,
        start_angle,
        end_angle: start_angle + FRAC_PI_2,
    };

    [
        corner(x + width - rx, y + ry, -FRAC_PI_2),
        corner(x + width - rx, y + height - ry, 0.0),
        corner(x + rx, y + height - ry, FRAC_PI_2),
        corner(x + rx, y + ry, PI),
    ]
}

/// The drawing primitives the game paints with.
/// Coordinates are logical field units with the origin at the top left.
pub trait Surface {
    fn fill_background(&mut self, color: Color);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    /// Rectangle with rounded corners; `arc_width`/`arc_height` are the
    /// diameters of the corner arcs.
    #[allow(clippy::too_many_arguments)]
    fn fill_round_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        arc_width: f64,
        arc_height: f64,
        color: Color,
    );

    /// `y` is the text baseline.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: Font, color: Color);
}

/// Trait that abstracts the platform backend.
/// A backend is a drawing surface plus an input source.
pub trait Renderer: Surface {
    /// Initialize the renderer
    fn init(&mut self) -> io::Result<()>;

    /// Make the frame painted since the last call visible
    fn present(&mut self) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;

    /// Poll for input from the user
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(Color),
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    RoundRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        arc_width: f64,
        arc_height: f64,
        color: Color,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font: Font,
        color: Color,
    },
}

/// Retained display list. A background fill starts a new frame, so the
/// buffer always holds the most recently painted frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for CommandBuffer {
    fn fill_background(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Background(color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_round_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        arc_width: f64,
        arc_height: f64,
        color: Color,
    ) {
        self.commands.push(DrawCommand::RoundRect {
            x,
            y,
            width,
            height,
            arc_width,
            arc_height,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: Font, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font,
            color,
        });
    }
}
