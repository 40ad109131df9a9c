use eframe::egui::{self, Color32, RichText};

use ctg_compare_common::{compare_sheet_pair, CompareRow, TableComparison, TableKind, WorkbookData};

use crate::io::{save_comparison_excel, save_comparison_json};
use crate::model::PanelState;

pub fn show(ui: &mut egui::Ui, panel: &mut PanelState, workbook: Option<&WorkbookData>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.strong(&panel.title);

        ui.horizontal(|ui| {
            ui.label("Left sheet:");
            sheet_combo(ui, "left_sheet", &mut panel.sheet_left, workbook);
            ui.label("Right sheet:");
            sheet_combo(ui, "right_sheet", &mut panel.sheet_right, workbook);

            let can_compare =
                workbook.is_some() && !panel.sheet_left.is_empty() && !panel.sheet_right.is_empty();
            if ui
                .add_enabled(can_compare, egui::Button::new("Compare"))
                .clicked()
            {
                if let Some(workbook) = workbook {
                    run_compare(panel, workbook);
                }
            }

            let can_export = panel
                .results
                .as_ref()
                .map_or(false, |results| !results.is_empty());
            if ui
                .add_enabled(can_export, egui::Button::new("Export..."))
                .clicked()
            {
                export_results(panel);
            }
        });

        ui.horizontal(|ui| {
            ui.checkbox(&mut panel.filter_enabled, "Only rows loaded at or above");
            ui.add_enabled(
                panel.filter_enabled,
                egui::DragValue::new(&mut panel.percent_threshold)
                    .clamp_range(0.0..=500.0)
                    .speed(1.0)
                    .suffix(" %"),
            );
        });

        ui.horizontal(|ui| {
            for kind in TableKind::ALL {
                let label = match panel.results.as_ref().and_then(|r| r.get(&kind)) {
                    Some(comparison) => format!("{} ({})", kind.label(), comparison.rows.len()),
                    None => kind.label().to_string(),
                };
                ui.selectable_value(&mut panel.selected_kind, kind, label);
            }
        });

        if !panel.status.is_empty() {
            ui.label(RichText::new(&panel.status).color(Color32::from_gray(170)));
        }
        ui.separator();

        let filter_enabled = panel.filter_enabled;
        let threshold = panel.percent_threshold;
        match panel.results.as_ref().and_then(|r| r.get(&panel.selected_kind)) {
            Some(comparison) => result_grid(ui, comparison, filter_enabled, threshold),
            None => {
                ui.label("No comparison for this table yet.");
            }
        }
    });
}

fn run_compare(panel: &mut PanelState, workbook: &WorkbookData) {
    match compare_sheet_pair(workbook, &panel.sheet_left, &panel.sheet_right) {
        Ok(results) => {
            if results.is_empty() {
                panel.status = "No ACCA Long Term / ACCA / DCwAC tables were found on both selected sheets"
                    .to_string();
            } else {
                let duplicates: usize = results
                    .values()
                    .map(|comparison| comparison.duplicate_ids.len())
                    .sum();
                panel.status = if duplicates > 0 {
                    format!(
                        "{} table(s) compared, {} duplicate identifier(s) ignored",
                        results.len(),
                        duplicates
                    )
                } else {
                    format!("{} table(s) compared", results.len())
                };
            }
            panel.results = Some(results);
        }
        Err(err) => panel.status = format!("Comparison failed: {err}"),
    }
}

fn export_results(panel: &mut PanelState) {
    let Some(results) = &panel.results else {
        return;
    };
    let default_name = format!("compare_{}_vs_{}.xlsx", panel.sheet_left, panel.sheet_right);
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(&default_name)
        .add_filter("Excel", &["xlsx"])
        .add_filter("JSON", &["json"])
        .save_file()
    else {
        return;
    };

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    let saved = if is_json {
        save_comparison_json(&path, results)
    } else {
        save_comparison_excel(&path, results)
    };

    match saved {
        Ok(_) => panel.status = format!("Saved {}", path.display()),
        Err(err) => panel.status = format!("Export failed: {err}"),
    }
}

fn sheet_combo(ui: &mut egui::Ui, id: &str, value: &mut String, workbook: Option<&WorkbookData>) {
    let selected = if value.is_empty() {
        "-".to_string()
    } else {
        value.clone()
    };
    egui::ComboBox::from_id_source(id)
        .width(150.0)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            if let Some(workbook) = workbook {
                for name in workbook.sheet_names() {
                    ui.selectable_value(value, name.clone(), name);
                }
            }
        });
}

fn result_grid(ui: &mut egui::Ui, comparison: &TableComparison, filter_enabled: bool, threshold: f64) {
    let rows: Vec<&CompareRow> = comparison
        .rows
        .iter()
        .filter(|row| !filter_enabled || row_passes(row, threshold))
        .collect();
    if rows.is_empty() {
        ui.label("No rows to display.");
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("result_grid")
                .striped(true)
                .min_col_width(60.0)
                .show(ui, |ui| {
                    for header in [
                        "Contingency",
                        "Resulting Issue",
                        "Left %",
                        "Right %",
                        "Δ% (Right - Left)",
                        "Status",
                    ] {
                        ui.label(RichText::new(header).strong());
                    }
                    ui.end_row();

                    for row in rows {
                        ui.label(&row.contingency);
                        ui.label(&row.issue);
                        percent_label(ui, row.percent_left);
                        percent_label(ui, row.percent_right);
                        match row.delta_percent {
                            Some(delta) => ui.label(format!("{delta:+.2}")),
                            None => ui.label(""),
                        };
                        ui.label(row.status.label());
                        ui.end_row();
                    }
                });
        });
}

fn percent_label(ui: &mut egui::Ui, value: Option<f64>) {
    match value {
        // 定格の100%以上は過負荷として強調
        Some(v) if v >= 100.0 => {
            ui.label(RichText::new(format!("{v:.2}")).color(Color32::from_rgb(220, 80, 80)))
        }
        Some(v) => ui.label(format!("{v:.2}")),
        None => ui.label(""),
    };
}

fn row_passes(row: &CompareRow, threshold: f64) -> bool {
    row.percent_left.map_or(false, |v| v >= threshold)
        || row.percent_right.map_or(false, |v| v >= threshold)
}
