use terminal_size::{Width, terminal_size};

use crate::ui::ascii::ESC_BYTE;

/// Measures text as the terminal draws it: CSI escapes take no columns.
#[derive(Debug, Default, Clone, Copy)]
pub struct WidthUtil;

impl WidthUtil {
    pub fn strip_ansi(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c as u32 == u32::from(ESC_BYTE) && chars.peek() == Some(&'[') {
                chars.next();
                // parameters run until the final alphabetic byte
                for nc in chars.by_ref() {
                    if nc.is_ascii_alphabetic() {
                        break;
                    }
                }
                continue;
            }
            out.push(c);
        }
        out
    }

    pub fn visible_width(&self, s: &str) -> usize {
        Self::strip_ansi(s).chars().count()
    }

    pub fn pad_visible(&self, s: &str, width: usize) -> String {
        let pad = width.saturating_sub(self.visible_width(s));
        format!("{s}{}", " ".repeat(pad))
    }

    /// Cut plain text to `width` columns, marking the cut with `~`.
    pub fn truncate(&self, s: &str, width: usize) -> String {
        if s.chars().count() <= width {
            return s.to_string();
        }
        if width == 0 {
            return String::new();
        }
        let mut out: String = s.chars().take(width - 1).collect();
        out.push('~');
        out
    }

    /// Best-effort terminal width (defaults to 80).
    pub fn terminal_width(&self) -> usize {
        match terminal_size() {
            Some((Width(w), _)) => w as usize,
            None => 80,
        }
    }
}
