//! Desktop viewer for the BPM monitor.
//!
//! Runs the full display pipeline against the built-in demo device inside an
//! SDL window: the demo feed publishes snapshots, the controller commits them
//! to the screen model, and the widgets render the result at a fixed frame
//! time. Keyboard input perturbs the feed to exercise the edge paths:
//!
//! - `B`: publish a pulse right now
//! - `C` / `X` / `N`: drop `currentBPM` / `maxBPM` / `realBeat` from the next publish
//! - `E`: inject a subscription error (swallowed silently by the controller)
//! - `F`: toggle the FPS readout
//! - `Esc` / `Q`: quit
//!
//! Debug log entries appended by the controller are mirrored to stdout as
//! they appear.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod screens;
mod timing;

use std::thread;
use std::time::Instant;

use bpm_dashboard::colors::BLACK;
use bpm_dashboard::config::{
    CELL_COL_WIDTH, CELL_HEIGHT, HEADER_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use bpm_dashboard::controller::{DisplayController, Label};
use bpm_dashboard::demo::DemoFeed;
use bpm_dashboard::feed::FeedError;
use bpm_dashboard::render::RenderState;
use bpm_dashboard::screen::MonitorScreen;
use bpm_dashboard::snapshot::Field;
use bpm_dashboard::widgets::{
    draw_current_cell, draw_dividers, draw_header, draw_heart_panel, draw_session_cell,
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use crate::screens::run_connect_screen;
use crate::timing::FRAME_TIME;

fn main() {
    let mut display: SimulatorDisplay<Rgb565> =
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("BPM Monitor", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    if !run_connect_screen(&mut display, &mut window) {
        return;
    }

    let mut controller = DisplayController::new(DemoFeed::new(), MonitorScreen::new());

    // UI state
    let mut show_fps = true;
    let mut last_fps_calc = Instant::now();
    let mut fps_frame_count = 0u32;
    let mut current_fps = 0.0f32;
    let mut frame_count = 0u32;

    // Render state
    let mut render_state = RenderState::new();
    display.clear(BLACK).ok();
    render_state.mark_display_cleared();

    // Stdout mirror position in the debug log
    let mut mirrored_logs = 0u32;

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Escape | Keycode::Q => return,
                        Keycode::B => {
                            controller.feed_mut().force_beat();
                            println!("key: pulse forced");
                        }
                        Keycode::C => {
                            controller.feed_mut().drop_field(Field::CurrentBpm);
                            println!("key: next publish drops currentBPM");
                        }
                        Keycode::X => {
                            controller.feed_mut().drop_field(Field::MaxBpm);
                            println!("key: next publish drops maxBPM");
                        }
                        Keycode::N => {
                            controller.feed_mut().drop_field(Field::RealBeat);
                            println!("key: next publish drops realBeat");
                        }
                        Keycode::E => {
                            let error = FeedError::Unavailable;
                            controller.feed_mut().inject_error(error);
                            println!("key: subscription error injected ({})", error.description());
                        }
                        Keycode::F => {
                            show_fps = !show_fps;
                            println!("key: fps readout {}", if show_fps { "on" } else { "off" });
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Drive the pipeline: device publishes, controller commits, animation advances
        controller.feed_mut().advance();
        controller.poll();
        controller.surface_mut().tick();

        // Mirror fresh debug log entries to stdout
        let log = controller.log();
        if log.total_pushed() > mirrored_logs {
            let fresh = (log.total_pushed() - mirrored_logs) as usize;
            // A burst can evict entries before they are mirrored
            let skip = log.len().saturating_sub(fresh);
            for entry in log.iter().skip(skip) {
                println!("[{}] #{} {}", entry.level.prefix(), entry.seq, entry.message);
            }
            mirrored_logs = log.total_pushed();
        }

        // FPS calculation
        fps_frame_count += 1;
        if last_fps_calc.elapsed().as_secs() >= 1 {
            current_fps = fps_frame_count as f32 / last_fps_calc.elapsed().as_secs_f32();
            fps_frame_count = 0;
            last_fps_calc = Instant::now();
        }

        if render_state.is_first_frame() {
            display.clear(BLACK).ok();
        }

        if render_state.check_header_dirty(show_fps, current_fps) {
            draw_header(&mut display, show_fps, current_fps);
        }

        let blink_on = (frame_count / 6).is_multiple_of(2);
        let screen = controller.surface();

        draw_current_cell(
            &mut display,
            0,
            HEADER_HEIGHT,
            CELL_COL_WIDTH,
            CELL_HEIGHT,
            screen.label(Label::Current),
            blink_on,
        );
        draw_session_cell(
            &mut display,
            0,
            HEADER_HEIGHT + CELL_HEIGHT,
            CELL_COL_WIDTH,
            CELL_HEIGHT,
            "MAX",
            screen.label(Label::Max),
        );
        draw_session_cell(
            &mut display,
            0,
            HEADER_HEIGHT + CELL_HEIGHT * 2,
            CELL_COL_WIDTH,
            CELL_HEIGHT,
            "MIN",
            screen.label(Label::Min),
        );
        draw_heart_panel(&mut display, screen.animation());

        if render_state.need_dividers() {
            draw_dividers(&mut display);
            render_state.mark_dividers_drawn();
        }

        render_state.end_frame();
        window.update(&display);

        frame_count = frame_count.wrapping_add(1);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}
