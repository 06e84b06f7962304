pub mod entity;
pub mod game;
pub mod game_loop;
pub mod renderer;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

#[cfg(target_arch = "wasm32")]
pub mod web_renderer;
#[cfg(target_arch = "wasm32")]
mod web_main;

pub use entity::{Ball, BallEvent, Computer, Direction, Field, Player, ScoreBoard, Scorer};
pub use game::{Frame, Game};
pub use game_loop::{Flow, GameLoop, LoopState, Tick, FRAME_INTERVAL};
pub use renderer::{Color, CommandBuffer, DrawCommand, Font, Input, Renderer, Surface};

#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;
#[cfg(target_arch = "wasm32")]
pub use web_renderer::WebRenderer;
#[cfg(target_arch = "wasm32")]
pub use web_main::start_game;
