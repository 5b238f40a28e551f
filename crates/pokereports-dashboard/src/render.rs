//! Plain-text rendering of the page for the terminal front end.

use std::fmt::Write as _;

use pokereports_core::Report;

use crate::state::{Modal, PageState};

const HEADERS: [&str; 6] = ["ReportId", "Status", "PokemonType", "Created", "Updated", "Actions"];

pub const AUTH_ERROR_TITLE: &str = "Authentication error";
pub const AUTH_ERROR_BODY: &str = "The report could not be accessed because its download link has \
expired or lacks the required permissions. Refresh the report list and try again.";

pub const DELETE_CONFIRM_TITLE: &str = "Confirm deletion";
pub const DELETE_CONFIRM_BODY: &str =
    "Are you sure you want to delete this report? This action cannot be undone.";

pub const LOADING_PLACEHOLDER: &str = "Loading reports...";

fn row(report: &Report) -> [String; 6] {
    let actions = if report.is_completed() {
        "download, delete"
    } else {
        ""
    };
    [
        report.display_id(),
        report.status_label.clone(),
        report.display_type(),
        report.display_created().to_string(),
        report.display_updated().to_string(),
        actions.to_string(),
    ]
}

/// The report table in display order, with a caption line.
pub fn report_table(state: &PageState) -> String {
    let reports = state.visible_reports();
    let mut out = String::new();

    let _ = writeln!(out, "Reports ({})", state.sort.label());
    if state.loading_reports() {
        out.push_str(LOADING_PLACEHOLDER);
        out.push('\n');
        return out;
    }
    if reports.is_empty() {
        out.push_str("No reports available\n");
        return out;
    }

    let rows: Vec<[String; 6]> = reports.iter().map(row).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for cells in &rows {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

/// Label of the create action for the current state.
pub fn submit_label(state: &PageState) -> &'static str {
    if state.creating_report() {
        "Creating..."
    } else if state.is_loading() {
        "Loading..."
    } else {
        "Catch them all!"
    }
}

/// Banner for the last failed load, if any.
pub fn banner(state: &PageState) -> Option<String> {
    state.error.as_ref().map(|msg| format!("Error: {msg}"))
}

/// Text of the open dialog, if any.
pub fn modal(state: &PageState) -> Option<String> {
    match &state.modal {
        Modal::Closed => None,
        Modal::ConfirmDelete(report) => Some(format!(
            "{DELETE_CONFIRM_TITLE}\n{DELETE_CONFIRM_BODY}\n(report {})",
            report.display_id()
        )),
        Modal::AuthError => Some(format!("{AUTH_ERROR_TITLE}\n{AUTH_ERROR_BODY}")),
    }
}
