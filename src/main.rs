#[cfg(not(target_arch = "wasm32"))]
use pingpong::{CliRenderer, Flow, Game, GameLoop, Renderer, Tick};
#[cfg(not(target_arch = "wasm32"))]
use std::{io, time::Instant};

// The browser build starts through `start_game` instead
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> io::Result<()> {
    let mut renderer = CliRenderer::new();
    renderer.init()?;

    let mut game_loop = GameLoop::new(Game::default());
    game_loop.draw(&mut renderer);
    renderer.present()?;

    let started = Instant::now();

    'running: loop {
        // Drain pending input before the next frame
        while let Some(input) = renderer.poll_input()? {
            match game_loop.handle_input(input, &mut renderer) {
                Flow::Quit => break 'running,
                Flow::Redrawn => renderer.present()?,
                Flow::Continue => {}
            }
        }

        // Skips itself when called too soon or while unfocused
        if game_loop.tick(started.elapsed(), &mut renderer) == Tick::Advanced {
            renderer.present()?;
        }
    }

    renderer.cleanup()?;
    Ok(())
}
