//! View rendering: pure mapping from a page of records to a display description.
//!
//! [`render`] produces a [`RenderedView`] which the terminal UI draws and
//! which can also be written out as an HTML table via [`RenderedView::to_html`].

use std::fmt::Write as _;

use crate::remote::User;

/// Placeholder shown when the current page has no records.
pub const EMPTY_PLACEHOLDER: &str = "No users found";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<RenderedRow>),
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedView {
    pub body: TableBody,
    pub page: usize,
    pub page_count: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl Default for RenderedView {
    fn default() -> Self {
        render(&[], 1, 1)
    }
}

pub fn render(slice: &[&User], page: usize, page_count: usize) -> RenderedView {
    let body = if slice.is_empty() {
        TableBody::Empty
    } else {
        TableBody::Rows(
            slice
                .iter()
                .map(|u| RenderedRow {
                    id: u.id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                    phone: u.phone.clone(),
                })
                .collect(),
        )
    };
    RenderedView {
        body,
        page,
        page_count,
        prev_enabled: page != 1,
        next_enabled: page < page_count,
    }
}

impl RenderedView {
    pub fn rows(&self) -> &[RenderedRow] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Empty => &[],
        }
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.page_count)
    }

    /// HTML for the table body and the pagination controls. Every field is
    /// escaped, so user text never becomes markup.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<table class=\"users\">\n<thead><tr><th>ID</th><th>Name</th><th>Email</th><th>Phone</th></tr></thead>\n<tbody>\n");
        match &self.body {
            TableBody::Empty => {
                let _ = writeln!(out, "<tr><td colspan=\"4\">{EMPTY_PLACEHOLDER}</td></tr>");
            }
            TableBody::Rows(rows) => {
                for row in rows {
                    let _ = writeln!(
                        out,
                        "<tr data-user-id=\"{id}\"><td>{id}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                        escape_html(&row.name),
                        escape_html(&row.email),
                        escape_html(&row.phone),
                        id = row.id,
                    );
                }
            }
        }
        out.push_str("</tbody>\n</table>\n<nav class=\"pagination\">");
        let disabled = |enabled: bool| if enabled { "" } else { " disabled" };
        let _ = writeln!(
            out,
            "<button class=\"prev\"{}>Previous</button><span>{}</span><button class=\"next\"{}>Next</button></nav>",
            disabled(self.prev_enabled),
            self.page_label(),
            disabled(self.next_enabled),
        );
        out
    }
}

/// Escape the characters that carry meaning in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
