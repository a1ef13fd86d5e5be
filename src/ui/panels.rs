use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – values for the current year
// ---------------------------------------------------------------------------

/// Render the per-state value table.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("States");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No dataset loaded.");
        return;
    };
    let attribute = session.controller().current_attribute();
    let features = session.dataset().features();
    let layer = session.renderer();

    if let Ok(stats) = session.dataset().statistics_for(attribute) {
        ui.label(format!("Highest {}, lowest {}", stats.max, stats.min));
        ui.add_space(4.0);
    }

    let selected_marker = state.selected_marker;
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(90.0))
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("State");
            });
            header.col(|ui| {
                ui.strong(attribute);
            });
            header.col(|ui| {
                ui.strong("Radius");
            });
        })
        .body(|mut body| {
            for (i, feature) in features.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        let selected = selected_marker == Some(i);
                        if ui.selectable_label(selected, feature.state()).clicked() {
                            clicked = Some(i);
                        }
                    });
                    row.col(|ui| {
                        let value = feature
                            .value(attribute)
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "–".to_string());
                        ui.label(value);
                    });
                    row.col(|ui| {
                        let radius = layer
                            .marker(i)
                            .filter(|m| m.is_drawable())
                            .map(|m| format!("{:.1}", m.radius))
                            .unwrap_or_default();
                        ui.label(radius);
                    });
                });
            }
        });

    if clicked.is_some() {
        state.selected_marker = clicked;
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            let attrs = session.dataset().attributes();
            ui.label(format!(
                "{} states, {} years ({} – {})",
                session.dataset().len(),
                attrs.len(),
                attrs.first(),
                &attrs[attrs.last_index()]
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.shade_by_value, "Shade by value")
            .clicked()
        {
            state.shade_by_value = !state.shade_by_value;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open brewery dataset")
        .add_filter("Supported files", &["geojson", "json", "csv", "parquet", "pq"])
        .add_filter("GeoJSON", &["geojson", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_dataset(&path);
    }
}
