// ANSI styling used by the plain-text views.

/// Reset terminal styling to defaults.
pub const STYLE_RESET: &str = crate::csi!("0m");
/// Bold text.
pub const STYLE_BOLD: &str = crate::csi!("1m");
/// Light gray foreground, used for weekend columns.
pub const FG_LIGHT_GRAY: &str = crate::csi!("37m");

pub fn bold<S: AsRef<str>>(s: S) -> String {
    format!("{STYLE_BOLD}{}{STYLE_RESET}", s.as_ref())
}

pub fn dim<S: AsRef<str>>(s: S) -> String {
    format!("{FG_LIGHT_GRAY}{}{STYLE_RESET}", s.as_ref())
}
