//! Draws a `CardView` in the terminal.

use crate::presentation::CardView;
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{Write, stdout};

const PRIMARY: Color = Color::Rgb { r: 0xf0, g: 0x5c, b: 0x5c };
const STARS: Color = Color::Rgb { r: 0xff, g: 0x00, b: 0x00 };
const MUTED: Color = Color::Rgb { r: 0x9c, g: 0xa3, b: 0xaf };
const PRICE: Color = Color::Rgb { r: 0xd1, g: 0xd5, b: 0xdb };
const DATE: Color = Color::Rgb { r: 0x64, g: 0xb5, b: 0xf6 };

/// Renders cards with the description clamped to `max_description_chars`.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    max_description_chars: usize,
}

impl CardRenderer {
    pub fn new(max_description_chars: usize) -> Self {
        Self {
            max_description_chars,
        }
    }

    /// Plain-text lines of one card, top to bottom.
    pub fn lines(&self, view: &CardView) -> Vec<String> {
        vec![
            view.title.clone(),
            view.tutor_line.clone(),
            format!(
                "{} {} ({})",
                view.rating_text, view.star_indicator, view.review_count_text
            ),
            truncate(&view.description, self.max_description_chars),
            view.price_text.clone(),
            view.date_text.clone(),
            view.image_url.clone(),
        ]
    }

    pub fn print(&self, view: &CardView) {
        let mut out = stdout();
        let styled: [(Color, bool, String); 7] = [
            (Color::White, true, view.title.clone()),
            (PRIMARY, false, view.tutor_line.clone()),
            (PRIMARY, true, view.rating_text.clone()),
            (MUTED, false, truncate(&view.description, self.max_description_chars)),
            (PRICE, true, view.price_text.clone()),
            (DATE, false, view.date_text.clone()),
            (MUTED, false, view.image_url.clone()),
        ];

        let _ = out.execute(Print("┌──────────────────────────────\r\n"));
        for (i, (color, bold, text)) in styled.iter().enumerate() {
            let _ = out.execute(Print("│ "));
            if *bold {
                let _ = out.execute(SetAttribute(Attribute::Bold));
            }
            let _ = out.execute(SetForegroundColor(*color));
            let _ = out.execute(Print(text));
            let _ = out.execute(SetAttribute(Attribute::Reset));
            // Rating row carries stars and review count after the number.
            if i == 2 {
                let _ = out.execute(SetForegroundColor(STARS));
                let _ = out.execute(Print(format!(" {}", view.star_indicator)));
                let _ = out.execute(SetForegroundColor(MUTED));
                let _ = out.execute(Print(format!(" ({})", view.review_count_text)));
            }
            let _ = out.execute(ResetColor);
            let _ = out.execute(Print("\r\n"));
        }
        let _ = out.execute(Print(format!("└─ {}\r\n", view.detail_route)));
        let _ = out.flush();
    }
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new(crate::shared::config::DEFAULT_DESCRIPTION_MAX_CHARS)
    }
}

/// Clamp text to `max` characters, appending "..." when cut.
fn truncate(text: &str, max: usize) -> String {
    let t = text.trim();
    if t.chars().count() <= max {
        t.to_string()
    } else {
        let cut: String = t.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}
