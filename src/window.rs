//! SDL2 display surface for the color buffer.
//!
//! Only compiled with the `window` feature. The window streams the packed
//! color buffer into an ARGB8888 texture once per frame; all drawing
//! happens on the CPU beforehand.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::render::FrameBuffer;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const FPS: u64 = 60;
const FRAME_TARGET_MS: u64 = 1000 / FPS;

/// Keys the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    OrbitLeft,
    OrbitRight,
    ToggleCulling,
    ToggleVertices,
    ToggleFilter,
    ToggleStraddle,
    ToggleClearMode,
    Screenshot,
}

impl Key {
    fn from_keycode(keycode: Keycode) -> Option<Self> {
        Some(match keycode {
            Keycode::W => Key::Forward,
            Keycode::S => Key::Back,
            Keycode::A => Key::Left,
            Keycode::D => Key::Right,
            Keycode::Left => Key::OrbitLeft,
            Keycode::Right => Key::OrbitRight,
            Keycode::C => Key::ToggleCulling,
            Keycode::V => Key::ToggleVertices,
            Keycode::F => Key::ToggleFilter,
            Keycode::N => Key::ToggleStraddle,
            Keycode::I => Key::ToggleClearMode,
            Keycode::P => Key::Screenshot,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    Key(Key),
}

/// Sleeps to hold the frame rate and reports elapsed time.
pub struct FrameLimiter {
    previous_ticks: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_ticks: window.timer.ticks64(),
        }
    }

    /// Milliseconds since the previous call, after waiting out the rest of
    /// the frame budget.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut now = window.timer.ticks64();
        let elapsed = now - self.previous_ticks;
        if elapsed < FRAME_TARGET_MS {
            std::thread::sleep(std::time::Duration::from_millis(FRAME_TARGET_MS - elapsed));
            now = window.timer.ticks64();
        }
        let delta = now - self.previous_ticks;
        self.previous_ticks = now;
        delta
    }
}

pub struct Window {
    // Field order matters: the texture must drop before its creator.
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    canvas: Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video = sdl_context.video()?;
        let timer = sdl_context.timer()?;

        let window = video
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let texture = streaming_texture(&texture_creator, width, height)?;
        let event_pump = sdl_context.event_pump()?;

        log::info!("opened {width}x{height} window");
        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            timer,
            width,
            height,
        })
    }

    /// Drains pending SDL events.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.event_pump
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => Some(WindowEvent::Quit),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => Some(WindowEvent::Resize(w.max(0) as u32, h.max(0) as u32)),
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => Key::from_keycode(keycode).map(WindowEvent::Key),
                _ => None,
            })
            .collect()
    }

    /// Copies `frame` to the screen. The frame must match the window size.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(format!(
                "frame is {}x{}, window is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            ));
        }
        self.texture
            .update(None, &frame.to_argb_bytes(), (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.texture = streaming_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

fn streaming_texture(
    creator: &TextureCreator<WindowContext>,
    width: u32,
    height: u32,
) -> Result<Texture<'static>, String> {
    // SAFETY: the creator is boxed and owned by the same `Window` as the
    // texture, and the texture field is declared first so it drops first.
    let creator: &'static TextureCreator<WindowContext> = unsafe { &*(creator as *const _) };
    creator
        .create_texture_streaming(PixelFormatEnum::ARGB8888, width.max(1), height.max(1))
        .map_err(|e| e.to_string())
}
