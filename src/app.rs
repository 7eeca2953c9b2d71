use eframe::egui;

use crate::export;
use crate::state::{AppState, StatusLevel, Tab};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PumpViewApp {
    pub state: AppState,
}

impl eframe::App for PumpViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Login gate: nothing else renders until it opens ----
        if !self.state.logged_in {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::login_screen(ui, &mut self.state);
            });
            return;
        }

        self.state.ensure_loaded();

        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: source selection + cascading filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: export ----
        egui::TopBottomPanel::bottom("export_bar").show(ctx, |ui| {
            self.export_bar(ui);
        });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui: &mut egui::Ui| {
                ui.selectable_value(&mut self.state.tab, Tab::TestData, "Test data");
                ui.selectable_value(&mut self.state.tab, Tab::Visualization, "Data visualization");
            });
            ui.separator();

            match self.state.tab {
                Tab::TestData => table::table_tab(ui, &mut self.state),
                Tab::Visualization => plot::visualization_tab(ui, &mut self.state),
            }
        });
    }
}

impl PumpViewApp {
    fn export_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui: &mut egui::Ui| {
            ui.strong("Export Data");
            let can_export = self.state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export Filtered Data"))
                .clicked()
            {
                if let Some(ds) = &self.state.dataset {
                    match export::export_filtered(ds, &self.state.visible_rows) {
                        Ok(Some(path)) => {
                            let msg = format!(
                                "Exported {} rows to {}",
                                self.state.visible_rows.len(),
                                path.display()
                            );
                            log::info!("{msg}");
                            self.state.status_message = Some((StatusLevel::Info, msg));
                        }
                        Ok(None) => {} // dialog cancelled
                        Err(e) => {
                            log::error!("Export failed: {e:#}");
                            self.state.status_message =
                                Some((StatusLevel::Error, format!("Error: {e:#}")));
                        }
                    }
                }
            }
        });
    }
}
