//! Thin host binary: ROM discovery, argument parsing, and logging live
//! here, never inside the library crate.

#[cfg(feature = "display")]
mod display;

use log::info;
use nesquik::Nes;

fn main() {
    env_logger::init();

    let rom_path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: nesquik <rom.nes>");
            std::process::exit(2);
        }
    };

    let mut nes = Nes::new();
    if let Err(err) = nes.load_cartridge(&rom_path) {
        eprintln!("failed to load {rom_path}: {err}");
        std::process::exit(1);
    }
    info!("loaded {rom_path}");

    #[cfg(feature = "display")]
    {
        if let Err(err) = display::run(nes) {
            eprintln!("display error: {err}");
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "display"))]
    {
        run_headless(nes);
    }
}

/// Without the `display` feature there is no window to present frames in;
/// run a bounded number of frames and report basic progress so the binary
/// still does something useful for smoke-testing a ROM load.
#[cfg(not(feature = "display"))]
fn run_headless(mut nes: Nes) {
    const FRAMES: u32 = 60;
    for frame in 0..FRAMES {
        let fb = nes.render_frame();
        let _ = fb.as_rgb();
        if frame % 10 == 0 {
            info!("rendered frame {frame}");
        }
    }
    info!("ran {FRAMES} headless frames; build with --features display for a window");
}
