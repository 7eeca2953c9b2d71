use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};

use crate::data::filter::{stage_options, FILTER_COLUMNS};
use crate::data::loader::{DataSource, DefaultDataset};
use crate::state::{AppState, StatusLevel};

// ---------------------------------------------------------------------------
// Login screen
// ---------------------------------------------------------------------------

/// Render the credential gate shown until login succeeds.
pub fn login_screen(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(60.0);
        ui.heading("Pump Test Data App - Login");
        ui.add_space(12.0);

        ui.add(
            TextEdit::singleline(&mut state.login_username)
                .hint_text("Username")
                .desired_width(220.0),
        );
        let password = ui.add(
            TextEdit::singleline(&mut state.login_password)
                .hint_text("Password")
                .password(true)
                .desired_width(220.0),
        );
        ui.add_space(8.0);

        let submitted = ui.button("Login").clicked()
            || (password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));
        if submitted {
            state.submit_login();
        }

        if let Some(err) = &state.login_error {
            ui.add_space(8.0);
            ui.label(RichText::new(err).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Pump Test Data App");
        ui.separator();

        if let Some(ds) = &state.dataset {
            let origin = if state.source.is_upload() {
                "User Upload"
            } else {
                "Default"
            };
            ui.label(format!(
                "{origin}: {} — {} rows loaded, {} visible",
                state.source.display_name(),
                ds.len(),
                state.visible_rows.len()
            ));
        }

        if let Some((level, msg)) = &state.status_message {
            ui.separator();
            match level {
                StatusLevel::Error => ui.label(RichText::new(msg).color(Color32::RED)),
                StatusLevel::Info => ui.label(msg),
            };
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – data source + cascading filters
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Source");
    ui.separator();

    // ---- Default database selector ----
    let current_default = state.default_choice;
    egui::ComboBox::from_label("Default Database")
        .selected_text(current_default.display_name())
        .show_ui(ui, |ui: &mut Ui| {
            for default in DefaultDataset::ALL {
                let selected = current_default == default && !state.source.is_upload();
                if ui
                    .selectable_label(selected, default.display_name())
                    .clicked()
                {
                    state.default_choice = default;
                    state.source = DataSource::Default(default);
                }
            }
        });

    // ---- Upload control ----
    if ui.button("Upload CSV or Excel…").clicked() {
        open_file_dialog(state);
    }
    if state.source.is_upload() {
        ui.label(format!("Upload: {}", state.source.display_name()));
    }

    // A clicked source selection takes effect immediately.
    state.ensure_loaded();

    ui.add_space(8.0);
    ui.heading("Data Status Selection");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label(super::NO_DATASET_NOTICE);
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (stage, column) in FILTER_COLUMNS.iter().enumerate() {
                let options = stage_options(dataset, &state.filters, stage);
                let current = state.filters.selection(stage).clone();

                egui::ComboBox::from_label(*column)
                    .selected_text(current.label())
                    .show_ui(ui, |ui: &mut Ui| {
                        for option in options {
                            if ui
                                .selectable_label(current == option, option.label())
                                .clicked()
                            {
                                state.filters.set(stage, option.clone());
                            }
                        }
                    });
            }
        });

    // Recompute visible rows after any dropdown change.
    state.refilter();
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload pump test data")
        .add_filter("Supported files", &["csv", "xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx"])
        .pick_file();

    if let Some(path) = file {
        state.source = DataSource::Upload(path);
    }
}
