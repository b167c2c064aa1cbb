use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

/// A titled grid of already formatted cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Shown instead of the grid when there are no rows.
    pub empty_message: Option<String>,
}

impl Table {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn empty_message(mut self, msg: impl Into<String>) -> Self {
        self.empty_message = Some(msg.into());
        self
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn col_widths(&self, util: &WidthUtil) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| util.visible_width(h)).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(util.visible_width(cell));
            }
        }
        widths
    }

    /// Columns plus ` | ` separators.
    pub fn width(&self, util: &WidthUtil) -> usize {
        let widths = self.col_widths(util);
        widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 3
    }
}

#[derive(Debug, Clone, Default)]
pub struct TablePrinter {
    util: WidthUtil,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    fn rule<W: Write + ?Sized>(&self, out: &mut W, width: usize) -> io::Result<()> {
        writeln!(out, "{}", "-".repeat(width.max(1)))
    }

    pub fn render_banner<W: Write + ?Sized>(
        &self,
        title: &str,
        width: usize,
        out: &mut W,
    ) -> io::Result<()> {
        let width = width.max(self.util.visible_width(title));
        self.rule(out, width)?;
        writeln!(out, "{}", title.to_uppercase())?;
        self.rule(out, width)
    }

    pub fn render<W: Write + ?Sized>(&self, table: &Table, out: &mut W) -> io::Result<()> {
        if table.rows.is_empty() {
            if let Some(msg) = &table.empty_message {
                let width = table.width(&self.util).max(self.util.visible_width(msg));
                self.render_banner(&table.title, width, out)?;
                writeln!(out, "{msg}")?;
                return self.rule(out, width);
            }
        }

        let widths = table.col_widths(&self.util);
        let width = table.width(&self.util).max(self.util.visible_width(&table.title));
        self.render_banner(&table.title, width, out)?;

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| self.util.pad_visible(cell, *w))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        if !table.headers.is_empty() {
            writeln!(out, "{}", line(table.headers.as_slice()))?;
            self.rule(out, width)?;
        }
        for row in &table.rows {
            writeln!(out, "{}", line(row.as_slice()))?;
        }
        self.rule(out, width)
    }

    pub fn print(&self, table: &Table) {
        let _ = self.render(table, &mut io::stdout());
    }
}
