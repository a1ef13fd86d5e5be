use eframe::egui;

use crate::state::AppState;
use crate::ui::controls::{keyboard_input, sequence_controls};
use crate::ui::{legend, map, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct BreweryAtlasApp {
    pub state: AppState,
}

impl BreweryAtlasApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BreweryAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: sequence controls ----
        if let Some(session) = &self.state.session {
            let slider = *session.input();
            let label = session.controller().current_attribute().to_string();
            let clicked = egui::TopBottomPanel::bottom("sequence_controls")
                .show(ctx, |ui| sequence_controls(ui, &slider, &label))
                .inner;

            // Each input is applied, and rendered, on its own.
            for input in clicked.into_iter().chain(keyboard_input(ctx)) {
                self.state.apply_input(input);
            }
        }

        // ---- Left side panel: values ----
        egui::SidePanel::left("value_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            map::symbol_map(ui, &mut self.state);
        });

        // ---- Legend overlay ----
        if let Some(session) = &self.state.session {
            legend::legend_window(ctx, session.legend(), self.state.shade_by_value);
        }
    }
}
