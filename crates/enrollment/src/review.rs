//! Review Renderer.
//!
//! Read-only two-column summary of everything the user entered. Buttons are
//! skipped, checkboxes are grouped by name and empty values never produce a
//! row.

use std::fmt;

use serde::Serialize;

use crate::field::ControlKind;
use crate::state::FormState;

pub const REVIEW_TITLE: &str = "Your Information:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewTable {
    pub title: String,
    pub rows: Vec<ReviewRow>,
}

impl ReviewTable {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }

    pub fn to_html(&self) -> String {
        let mut out = format!(
            "<table class='output'><th colspan='2'>{}</th>",
            escape_html(&self.title)
        );
        for row in &self.rows {
            out.push_str(&format!(
                "<tr><td align=\"right\">{}</td><td class=\"outputdata\">{}</td></tr>",
                escape_html(&row.label),
                escape_html(&row.value)
            ));
        }
        out.push_str("</table>");
        out
    }
}

impl fmt::Display for ReviewTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        let width = self
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0);
        for row in &self.rows {
            writeln!(f, "{:>width$}  {}", row.label, row.value)?;
        }
        Ok(())
    }
}

/// Build the summary from the current form.
///
/// Plain controls come first in document order, then one row per checkbox
/// group in the order the groups first appear.
pub fn review(form: &FormState) -> ReviewTable {
    let mut rows = Vec::new();
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();

    for control in form.controls() {
        match control.kind {
            kind if kind.is_button() => continue,
            ControlKind::Checkbox => {
                let idx = match groups.iter().position(|(name, _)| *name == control.name) {
                    Some(idx) => idx,
                    None => {
                        groups.push((control.name.clone(), Vec::new()));
                        groups.len() - 1
                    }
                };
                if control.checked {
                    groups[idx].1.push(control.value.clone());
                }
            }
            ControlKind::Radio => {
                if control.checked && !control.value.is_empty() {
                    rows.push(row(&control.name, &control.value));
                }
            }
            _ => {
                if !control.value.is_empty() {
                    rows.push(row(&control.name, &control.value));
                }
            }
        }
    }

    rows.extend(
        groups
            .into_iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(name, values)| row(&name, &values.join(", "))),
    );

    ReviewTable {
        title: REVIEW_TITLE.to_string(),
        rows,
    }
}

fn row(label: &str, value: &str) -> ReviewRow {
    ReviewRow {
        label: label.to_string(),
        value: value.to_string(),
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
