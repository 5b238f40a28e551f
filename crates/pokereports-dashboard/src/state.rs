use pokereports_core::{Report, SortDirection, sort_by_updated};
use serde::Serialize;

use crate::input::CountInput;

/// Progress of one load (category list or report list).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateState {
    #[default]
    Idle,
    Creating,
}

/// At most one dialog is open at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "modal", content = "report", rename_all = "snake_case")]
pub enum Modal {
    #[default]
    Closed,
    ConfirmDelete(Report),
    AuthError,
}

/// Everything the page renders from.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageState {
    pub types_load: LoadState,
    pub categories: Vec<String>,
    pub reports_load: LoadState,
    pub create: CreateState,
    /// The table's own refresh spinner, separate from list loading.
    pub refreshing: bool,
    /// Banner message for the last failed load.
    pub error: Option<String>,
    pub selected_type: Option<String>,
    pub count: CountInput,
    pub sort: SortDirection,
    pub modal: Modal,
    reports: Vec<Report>,
    view: Vec<Report>,
}

impl PageState {
    pub fn loading_types(&self) -> bool {
        self.types_load == LoadState::Loading
    }

    pub fn loading_reports(&self) -> bool {
        self.reports_load == LoadState::Loading
    }

    pub fn creating_report(&self) -> bool {
        self.create == CreateState::Creating
    }

    pub fn is_loading(&self) -> bool {
        self.loading_types() || self.loading_reports()
    }

    /// Both selections present and nothing in flight.
    pub fn can_submit(&self) -> bool {
        self.selected_type.is_some()
            && !self.count.value().is_empty()
            && !self.is_loading()
            && !self.creating_report()
    }

    /// The last successfully fetched collection, in API order.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// `reports()` ordered for display.
    pub fn visible_reports(&self) -> &[Report] {
        &self.view
    }

    pub(crate) fn replace_reports(&mut self, reports: Vec<Report>) {
        self.reports = reports;
        self.resort();
    }

    pub(crate) fn set_sort(&mut self, direction: SortDirection) {
        self.sort = direction;
        self.resort();
    }

    fn resort(&mut self) {
        self.view = sort_by_updated(&self.reports, self.sort);
    }
}
