//! Connect splash shown before the monitor screen takes over.
//!
//! Plays a console-style connection transcript while a pair of small hearts
//! pulse beside the title. Returns `false` if the window is closed mid-splash
//! so the caller can exit without entering the main loop.

use core::fmt::Write;
use std::thread;
use std::time::{Duration, Instant};

use bpm_dashboard::colors::{BLACK, PINK, RED, WHITE};
use bpm_dashboard::styles::{CENTERED, LEFT_ALIGNED};
use bpm_dashboard::widgets::draw_heart;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::{SimulatorDisplay, SimulatorEvent, Window};
use heapless::String;

const TITLE_POS: Point = Point::new(160, 25);
const LINE_START: Point = Point::new(10, 35);
const LINE_END: Point = Point::new(310, 35);
const CONSOLE_X: i32 = 10;
const CONSOLE_START_Y: i32 = 50;
const CONSOLE_LINE_HEIGHT: i32 = 14;

const LEFT_HEART: Point = Point::new(24, 18);
const RIGHT_HEART: Point = Point::new(296, 18);

const TITLE_STYLE: MonoTextStyle<'static, Rgb565> =
    MonoTextStyle::new(&embedded_graphics::mono_font::ascii::FONT_10X20, RED);
const CONSOLE_STYLE: MonoTextStyle<'static, Rgb565> =
    MonoTextStyle::new(&embedded_graphics::mono_font::ascii::FONT_6X10, BLACK);
const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(RED, 1);

pub fn run_connect_screen(
    display: &mut SimulatorDisplay<Rgb565>,
    window: &mut Window,
) -> bool {
    let connect_messages = [
        ("Starting display controller...", 600),
        ("Connecting to telemetry store...", 900),
        ("Subscribing: pulse/live", 700),
        ("HR-320 chest strap | fw 2.4.1", 500),
        ("Waiting for first snapshot...", 600),
        ("Ready.", 400),
    ];

    let mut pulse_frame = 0u32;
    let mut console_lines: Vec<&str> = Vec::new();

    for (msg, duration_ms) in &connect_messages {
        console_lines.push(msg);
        if console_lines.len() > 12 {
            console_lines.remove(0);
        }

        let msg_start = Instant::now();
        let msg_duration = Duration::from_millis(*duration_ms as u64);

        while msg_start.elapsed() < msg_duration {
            for ev in window.events() {
                if matches!(ev, SimulatorEvent::Quit) {
                    return false;
                }
            }

            display.clear(WHITE).ok();

            pulse_frame = pulse_frame.wrapping_add(1);
            let pulse_on = (pulse_frame / 8).is_multiple_of(2);
            let (heart_size, heart_color) = if pulse_on { (22, RED) } else { (18, PINK) };
            draw_heart(display, LEFT_HEART, heart_size, heart_color);
            draw_heart(display, RIGHT_HEART, heart_size, heart_color);

            Text::with_text_style("BPM MONITOR", TITLE_POS, TITLE_STYLE, CENTERED)
                .draw(display)
                .ok();

            Line::new(LINE_START, LINE_END)
                .into_styled(DIVIDER_STYLE)
                .draw(display)
                .ok();

            for (i, line) in console_lines.iter().enumerate() {
                let y_pos = CONSOLE_START_Y + (i as i32 * CONSOLE_LINE_HEIGHT);
                let prefix = if i == console_lines.len() - 1 { "> " } else { "  " };
                let mut full_line: String<64> = String::new();
                let _ = write!(full_line, "{prefix}{line}");
                Text::with_text_style(&full_line, Point::new(CONSOLE_X, y_pos), CONSOLE_STYLE, LEFT_ALIGNED)
                    .draw(display)
                    .ok();
            }

            window.update(display);
            thread::sleep(Duration::from_millis(16));
        }
    }

    thread::sleep(Duration::from_millis(600));
    true
}
