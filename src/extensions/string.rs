pub trait ToDashSeparators {
    /// Returns a copy with all `/` and `.` replaced by `-` and leading/trailing
    /// whitespace trimmed.
    fn to_dash_separators(&self) -> String;
}

impl ToDashSeparators for str {
    fn to_dash_separators(&self) -> String {
        self.trim().replace(['/', '.'], "-")
    }
}

impl ToDashSeparators for String {
    fn to_dash_separators(&self) -> String {
        self.as_str().to_dash_separators()
    }
}

pub trait NonBlank {
    /// `None` for empty or whitespace-only text, otherwise the trimmed value.
    fn non_blank(&self) -> Option<String>;
}

impl NonBlank for str {
    fn non_blank(&self) -> Option<String> {
        let t = self.trim();
        if t.is_empty() { None } else { Some(t.to_string()) }
    }
}

impl NonBlank for Option<String> {
    fn non_blank(&self) -> Option<String> {
        self.as_deref().and_then(NonBlank::non_blank)
    }
}
