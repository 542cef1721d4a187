use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::pin::Pin;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::trace;

use crate::catalog::{Rgb, TextColor};
use crate::model::Category;
use crate::session::{Mode, Session};
use crate::utils::{column_width, order_total_items};

pub const EMPTY_MESSAGE: &str = "Your bowl is empty. Add some ingredients!";


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { color: true }
    }
}


// A colored button-like label; plain brackets without color
fn swatch(out: &mut impl fmt::Write, label: &str, hex: &str, options: RenderOptions) -> fmt::Result {
    if !options.color {
        return write!(out, "[{label}]");
    }
    let Ok(bg) = Rgb::parse(hex) else {
        return write!(out, "[{label}]");
    };
    let fg = TextColor::for_background(bg).rgb();
    write!(
        out,
        "\x1B[48;2;{};{};{}m\x1B[38;2;{};{};{}m {label} \x1B[0m",
        bg.r, bg.g, bg.b, fg.r, fg.g, fg.b
    )
}


/// Write the whole screen: menu, order summary, modal prompt, status line.
pub fn render_into(out: &mut impl fmt::Write, session: &Session, options: RenderOptions) -> fmt::Result {
    let store = session.store();
    let width = column_width();

    writeln!(out, "Build Your Bowl\n")?;
    writeln!(out, "Choose Your Ingredients:")?;

    let menu = session.menu();
    for category in Category::ALL {
        write!(out, "{:<width$}", format!("{}:", category.label()))?;
        let mut any = false;
        for (number, (_, item)) in menu.iter().enumerate().filter(|(_, (c, _))| *c == category) {
            write!(out, " ")?;
            swatch(out, &format!("{} {}", number + 1, item.name), item.color, options)?;
            any = true;
        }
        if !any {
            write!(out, " -")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "\nMy Order:")?;
    if store.is_empty() {
        writeln!(out, "{EMPTY_MESSAGE}")?;
    } else {
        let mut number = 0;
        for group in store.grouped_view() {
            write!(out, "{:<width$}", format!("{}:", group.category.label()))?;
            for entry in &group.entries {
                number += 1;
                write!(out, " ")?;
                swatch(out, &format!("x{} {}", number, entry.line.name), &entry.line.color, options)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "({} items)", order_total_items(store))?;
    }

    if let Mode::ChoosingPortion { item, .. } = session.mode() {
        writeln!(out, "\nHow much {}? (l)ight (n)ormal (h)eavy (c)ancel", item.name)?;
    }

    if let Some(status) = session.status() {
        writeln!(out, "\n{status}")?;
    }
    write!(out, "> ")
}

pub fn render(session: &Session, options: RenderOptions) -> String {
    let mut frame = String::new();
    // fmt::Write for String never fails
    let _ = render_into(&mut frame, session, options);
    frame
}


// Clear the terminal and print a frame
pub fn redraw_screen(frame: &str) {
    // Move cursor to top-left and clear screen
    print!("\x1B[H\x1B[0J{frame}");
    let _ = io::stdout().flush();
}


/// Print frames as they arrive, coalescing bursts into one redraw.
pub async fn dashboard_task(mut frame_rx: mpsc::UnboundedReceiver<String>) {
    let mut latest: Option<String> = None;
    let debounce = Duration::from_millis(30);

    // Debounce timer: coalesce many frames into one redraw
    let mut pending: Option<Pin<Box<tokio::time::Sleep>>> = None;

    loop {
        tokio::select! {
            frame = frame_rx.recv() => {
                match frame {
                    Some(frame) => {
                        latest = Some(frame);
                        if pending.is_none() {
                            pending = Some(Box::pin(tokio::time::sleep(debounce)));
                        }
                    }
                    None => {
                        // Channel closed; flush the last frame and exit
                        if let Some(frame) = latest.take() {
                            redraw_screen(&frame);
                        }
                        break;
                    }
                }
            }

            _ = async {
                if let Some(s) = &mut pending {
                    s.as_mut().await;
                }
            }, if pending.is_some() => {
                if let Some(frame) = latest.take() {
                    trace!(bytes = frame.len(), "redraw");
                    redraw_screen(&frame);
                }
                pending = None;
            }
        }
    }

    println!();
    let _ = io::stdout().flush();
}
