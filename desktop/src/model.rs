use std::collections::BTreeMap;
use std::path::PathBuf;

use ctg_compare_common::{TableComparison, TableKind, WorkbookData};

#[derive(Default)]
pub struct AppState {
    pub workbook: Option<WorkbookData>,
    pub source_path: Option<PathBuf>,
    pub status: String,
}

pub struct PanelState {
    pub title: String,
    pub sheet_left: String,
    pub sheet_right: String,
    pub selected_kind: TableKind,
    pub results: Option<BTreeMap<TableKind, TableComparison>>,
    pub status: String,
    pub filter_enabled: bool,
    pub percent_threshold: f64,
}

impl PanelState {
    pub fn new(index: usize) -> Self {
        Self {
            title: format!("Comparison {}", index + 1),
            sheet_left: String::new(),
            sheet_right: String::new(),
            selected_kind: TableKind::AccaLongTerm,
            results: None,
            status: String::new(),
            filter_enabled: false,
            percent_threshold: 100.0,
        }
    }

    pub fn set_sheet_options(&mut self, sheet_names: &[String]) {
        self.results = None;
        self.status.clear();
        self.sheet_left = sheet_names.first().cloned().unwrap_or_default();
        self.sheet_right = sheet_names
            .get(1)
            .or_else(|| sheet_names.first())
            .cloned()
            .unwrap_or_default();
    }
}
