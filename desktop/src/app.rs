use std::path::Path;

use eframe::egui::{self, Color32, RichText};
use tracing::{error, info};

use ctg_compare_common::load_workbook;

use crate::layout::panel_rows;
use crate::model::{AppState, PanelState};
use crate::panel;

pub struct CompareApp {
    state: AppState,
    panels: Vec<PanelState>,
    panel_count: usize,
    zoom: f32,
}

impl Default for CompareApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
            panels: (0..2).map(PanelState::new).collect(),
            panel_count: 2,
            zoom: 1.0,
        }
    }
}

impl CompareApp {
    fn open_workbook(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Excel files", &["xlsx", "xlsm", "xls"])
            .pick_file()
        else {
            return;
        };
        self.load_from_path(&path);
    }

    fn reload_workbook(&mut self) {
        let Some(path) = self.state.source_path.clone() else {
            self.state.status = "No workbook loaded".to_string();
            return;
        };
        self.load_from_path(&path);
    }

    fn load_from_path(&mut self, path: &Path) {
        match load_workbook(path) {
            Ok(data) => {
                let file_name = path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("workbook");
                info!(file = file_name, sheets = data.sheet_names().len(), "workbook opened");
                self.state.status =
                    format!("Loaded: {} ({} sheets)", file_name, data.sheet_names().len());
                for panel in &mut self.panels {
                    panel.set_sheet_options(data.sheet_names());
                }
                self.state.workbook = Some(data);
                self.state.source_path = Some(path.to_path_buf());
            }
            Err(err) => {
                error!(path = %path.display(), %err, "workbook load failed");
                self.state.status = format!("Load failed: {err}");
            }
        }
    }

    fn set_panel_count(&mut self, count: usize) {
        self.panel_count = count.clamp(1, 4);
        while self.panels.len() < self.panel_count {
            let mut panel = PanelState::new(self.panels.len());
            if let Some(workbook) = &self.state.workbook {
                panel.set_sheet_options(workbook.sheet_names());
            }
            self.panels.push(panel);
        }
        self.panels.truncate(self.panel_count);
    }
}

impl eframe::App for CompareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Workbook").clicked() {
                    self.open_workbook();
                }
                let reload_enabled = self.state.source_path.is_some();
                if ui
                    .add_enabled(reload_enabled, egui::Button::new("Reload"))
                    .clicked()
                {
                    self.reload_workbook();
                }
                let status = if self.state.status.is_empty() {
                    "No file loaded"
                } else {
                    self.state.status.as_str()
                };
                ui.label(RichText::new(status).color(Color32::from_gray(170)));

                ui.separator();
                ui.label("Comparisons:");
                let mut count = self.panel_count;
                if ui
                    .add(egui::DragValue::new(&mut count).clamp_range(1..=4))
                    .changed()
                {
                    self.set_panel_count(count);
                }

                ui.separator();
                ui.label("Zoom:");
                if ui
                    .add(egui::Slider::new(&mut self.zoom, 0.6..=1.6))
                    .changed()
                {
                    ctx.set_zoom_factor(self.zoom);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let workbook = self.state.workbook.as_ref();
            let panels = &mut self.panels;
            let rows = panel_rows(self.panel_count);
            let row_height = ui.available_height() / rows.len() as f32;

            for slots in &rows {
                ui.allocate_ui(egui::vec2(ui.available_width(), row_height), |ui| {
                    ui.set_min_height(row_height);
                    ui.columns(slots.len(), |columns| {
                        for (column, &slot) in columns.iter_mut().zip(slots) {
                            column.push_id(slot, |ui| {
                                panel::show(ui, &mut panels[slot], workbook);
                            });
                        }
                    });
                });
            }
        });
    }
}
