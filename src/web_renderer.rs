use crate::entity::{Direction, FIELD_HEIGHT, FIELD_WIDTH};
use crate::renderer::{round_rect_corners, Color, Font, Input, Renderer, Surface, TITLE};
use log::warn;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent};

const COLOR_BLACK: &str = "#000000";
const COLOR_WHITE: &str = "#FFFFFF";

fn css_color(color: Color) -> &'static str {
    match color {
        Color::Black => COLOR_BLACK,
        Color::White => COLOR_WHITE,
    }
}

fn js_error(e: JsValue) -> io::Error {
    io::Error::other(format!("{:?}", e))
}

pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    window: web_sys::Window,
    device_pixel_ratio: f64,

    // Filled by event listeners, drained by the animation frame
    pending_input: Rc<RefCell<VecDeque<Input>>>,
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        // Get device pixel ratio for high DPI displays
        let device_pixel_ratio = window.device_pixel_ratio();

        Ok(Self {
            canvas,
            context,
            window,
            device_pixel_ratio,
            pending_input: Rc::new(RefCell::new(VecDeque::new())),
        })
    }

    /// Whether the page currently has keyboard focus
    pub fn has_focus(&self) -> bool {
        self.window
            .document()
            .and_then(|document| document.has_focus().ok())
            .unwrap_or(true)
    }

    fn setup_keyboard_listener(&self) -> Result<(), JsValue> {
        let pending_input = self.pending_input.clone();

        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let input = match event.key().as_str() {
                "ArrowUp" => Some(Input::Direction(Direction::Up)),
                "ArrowDown" => Some(Input::Direction(Direction::Down)),
                _ => None,
            };

            if let Some(input) = input {
                pending_input.borrow_mut().push_back(input);
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        self.window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;

        closure.forget(); // Keep listener alive
        Ok(())
    }

    fn setup_focus_listeners(&self) -> Result<(), JsValue> {
        for (event_name, focused) in [("focus", true), ("blur", false)] {
            let pending_input = self.pending_input.clone();
            let closure = Closure::wrap(Box::new(move || {
                pending_input.borrow_mut().push_back(Input::Focus(focused));
            }) as Box<dyn FnMut()>);

            self.window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Fixed-size canvas, scaled for high DPI displays
    fn setup_canvas(&self) -> Result<(), JsValue> {
        let pixel_width = (FIELD_WIDTH * self.device_pixel_ratio) as u32;
        let pixel_height = (FIELD_HEIGHT * self.device_pixel_ratio) as u32;
        self.canvas.set_width(pixel_width);
        self.canvas.set_height(pixel_height);

        let element: &HtmlElement = self.canvas.unchecked_ref();
        element
            .style()
            .set_property("width", &format!("{}px", FIELD_WIDTH))?;
        element
            .style()
            .set_property("height", &format!("{}px", FIELD_HEIGHT))?;

        // Setting the size resets the context transform
        self.context
            .scale(self.device_pixel_ratio, self.device_pixel_ratio)?;
        Ok(())
    }

    fn round_rect_path(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        arc_width: f64,
        arc_height: f64,
    ) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.begin_path();
        for arc in round_rect_corners(x, y, width, height, arc_width, arc_height) {
            // Each ellipse joins the previous corner with a straight edge
            ctx.ellipse(
                arc.center_x,
                arc.center_y,
                arc.radius_x,
                arc.radius_y,
                0.0,
                arc.start_angle,
                arc.end_angle,
            )?;
        }
        ctx.close_path();
        Ok(())
    }
}

impl Surface for WebRenderer {
    fn fill_background(&mut self, color: Color) {
        self.context.set_fill_style_str(css_color(color));
        self.context.fill_rect(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.context.set_fill_style_str(css_color(color));
        self.context.fill_rect(x, y, width, height);
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
        self.context.set_fill_style_str(css_color(color));
        match self.round_rect_path(x, y, width, height, arc_width, arc_height) {
            Ok(()) => self.context.fill(),
            Err(e) => warn!("fill_round_rect failed: {:?}", e),
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: Font, color: Color) {
        self.context.set_fill_style_str(css_color(color));
        self.context.set_font(&font.css());
        self.context.set_text_align("left");
        self.context.set_text_baseline("alphabetic");
        if let Err(e) = self.context.fill_text(text, x, y) {
            warn!("fill_text failed: {:?}", e);
        }
    }
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        if let Some(document) = self.window.document() {
            document.set_title(TITLE);
        }
        self.setup_canvas().map_err(js_error)?;
        self.setup_keyboard_listener().map_err(js_error)?;
        self.setup_focus_listeners().map_err(js_error)?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // The canvas is retained; whatever was painted is already visible
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        // No cleanup needed for web
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending_input.borrow_mut().pop_front())
    }
}
