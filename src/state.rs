use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::loader::load_file;
use crate::data::model::Feature;
use crate::symbols::dataset::SymbolDataset;
use crate::symbols::error::SymbolError;
use crate::symbols::session::SymbolSession;
use crate::ui::controls::{SequenceInput, SequenceSlider};
use crate::ui::legend::LegendPanel;
use crate::ui::map::MapLayer;

/// A session wired to the egui surfaces.
pub type AtlasSession = SymbolSession<MapLayer, LegendPanel, SequenceSlider>;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Active session (None until a dataset is loaded).
    pub session: Option<AtlasSession>,

    /// File the session was loaded from.
    pub source: Option<PathBuf>,

    /// Feature whose popup is open.
    pub selected_marker: Option<usize>,

    /// Shade symbols along a light-to-dark ramp instead of one fill.
    pub shade_by_value: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

/// Build a dataset and start a session over the egui surfaces.
pub fn start_session(features: Vec<Feature>) -> Result<AtlasSession> {
    let dataset = SymbolDataset::new(features).context("reading year attributes")?;
    let layer = MapLayer::new(dataset.features());
    SymbolSession::start(
        dataset,
        layer,
        LegendPanel::default(),
        SequenceSlider::default(),
    )
    .context("rendering first year")
}

impl AppState {
    /// Load `path` and replace the current session with a fresh one.
    ///
    /// On failure the previous session is dropped and the error is shown.
    pub fn open_dataset(&mut self, path: &Path) {
        self.loading = true;
        self.session = None;
        self.selected_marker = None;

        let result = load_file(path)
            .with_context(|| format!("loading {}", path.display()))
            .and_then(start_session);

        match result {
            Ok(session) => {
                self.session = Some(session);
                self.source = Some(path.to_path_buf());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to open dataset: {e:#}");
                self.source = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
        self.loading = false;
    }

    /// Forward one input event to the session.
    pub fn apply_input(&mut self, input: SequenceInput) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let result = match input {
            SequenceInput::StepForward => session.on_step_forward(),
            SequenceInput::StepBackward => session.on_step_backward(),
            SequenceInput::Select(index) => session.on_index_selected(index),
        };

        match result {
            Ok(()) => self.status_message = None,
            Err(e @ SymbolError::OutOfRange { .. }) => {
                log::warn!("Ignoring slider input: {e}");
            }
            Err(e) => {
                log::error!("Render failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Attribute currently shown, if any.
    pub fn current_attribute(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|s| s.controller().current_attribute())
    }
}
