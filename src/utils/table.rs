//! Table rendering utilities for CLI outputs.

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width: width.max(header.len()),
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Renders header, a separator line made of `sep`, then the rows.
    /// Missing cells render empty; extra cells are dropped.
    pub fn render(&self, sep: char) -> String {
        let mut out = String::new();

        let headers: Vec<&str> = self.columns.iter().map(|c| c.header.as_str()).collect();
        render_line(&self.columns, &headers, &mut out);

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&sep.to_string().repeat(total.saturating_sub(1)));
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            render_line(&self.columns, &cells, &mut out);
        }

        out
    }
}

fn render_line(columns: &[Column], cells: &[&str], out: &mut String) {
    let mut rendered = String::new();
    for (i, col) in columns.iter().enumerate() {
        let cell = cells.get(i).copied().unwrap_or("");
        rendered.push_str(&format!("{:<width$} ", cell, width = col.width));
    }
    out.push_str(rendered.trim_end());
    out.push('\n');
}
