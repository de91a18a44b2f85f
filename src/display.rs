//! Interactive window frontend (`display` feature only).
//!
//! This module is the host frontend, kept outside the core: it owns the
//! window, the pixel blitter, and keyboard-to-controller mapping, and
//! drives [`Nes::step_frame`] once per redraw. The core never depends on
//! anything in this module.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, info};
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use nesquik::ppu::{FrameBuffer, NES_HEIGHT, NES_WIDTH};
use nesquik::Nes;

const SCALE: u32 = 3;
const TARGET_FPS: u32 = 60;

fn button_mask(key: KeyCode) -> Option<u8> {
    Some(match key {
        KeyCode::KeyX => 1 << 7,        // A
        KeyCode::KeyZ => 1 << 6,        // B
        KeyCode::ShiftRight => 1 << 5,  // Select
        KeyCode::Enter => 1 << 4,       // Start
        KeyCode::ArrowUp => 1 << 3,     // Up
        KeyCode::ArrowDown => 1 << 2,   // Down
        KeyCode::ArrowLeft => 1 << 1,   // Left
        KeyCode::ArrowRight => 1 << 0,  // Right
        _ => return None,
    })
}

struct App {
    nes: Nes,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    buttons: u8,
    last_frame: Instant,
    frame_period: Duration,
}

impl App {
    fn new(nes: Nes) -> Self {
        App {
            nes,
            window: None,
            pixels: None,
            buttons: 0,
            last_frame: Instant::now(),
            frame_period: Duration::from_micros(1_000_000 / TARGET_FPS as u64),
        }
    }

    fn render_frame(&mut self) {
        let fb: FrameBuffer = self.nes.render_frame();
        if let Some(pixels) = &mut self.pixels {
            let frame = pixels.frame_mut();
            for (dst, src) in frame.chunks_exact_mut(4).zip(fb.as_rgb().chunks_exact(3)) {
                dst[0] = src[0];
                dst[1] = src[1];
                dst[2] = src[2];
                dst[3] = 0xFF;
            }
            if let Err(err) = pixels.render() {
                error!("pixel buffer render failed: {err}");
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("nesquik")
            .with_inner_size(LogicalSize::new(
                (NES_WIDTH as u32) * SCALE,
                (NES_HEIGHT as u32) * SCALE,
            ))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs).expect("failed to create window"));
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(NES_WIDTH as u32, NES_HEIGHT as u32, surface)
            .expect("failed to create pixel buffer");
        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, .. },
                ..
            } => {
                if let Some(mask) = button_mask(code) {
                    match state {
                        ElementState::Pressed => self.buttons |= mask,
                        ElementState::Released => self.buttons &= !mask,
                    }
                    self.nes.set_controller_state(0, self.buttons);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.last_frame.elapsed() >= self.frame_period {
                    self.last_frame = Instant::now();
                    self.render_frame();
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run the interactive display loop for an already-loaded [`Nes`]. Blocks
/// until the window is closed.
pub fn run(nes: Nes) -> Result<(), Box<dyn std::error::Error>> {
    info!("starting display window at {SCALE}x scale, {TARGET_FPS} fps target");
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new(nes);
    event_loop.run_app(&mut app)?;
    Ok(())
}
