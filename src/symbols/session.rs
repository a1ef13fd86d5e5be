use super::dataset::SymbolDataset;
use super::error::{SymbolError, SymbolResult};
use super::present::{present, SymbolFrame};
use super::sequence::{SelectionListener, SequenceController};
use super::surface::{InputControl, LegendSurface, MarkerRenderer};

// ---------------------------------------------------------------------------
// SymbolView – the render half of a session
// ---------------------------------------------------------------------------

/// Dataset plus the surfaces a frame is pushed to.
pub struct SymbolView<R, L, I> {
    dataset: SymbolDataset,
    renderer: R,
    legend: L,
    input: I,
    frame: Option<SymbolFrame>,
}

impl<R, L, I> SymbolView<R, L, I>
where
    R: MarkerRenderer,
    L: LegendSurface,
    I: InputControl,
{
    fn render(&mut self, index: usize, frame: SymbolFrame) {
        log::debug!(
            "render {} (index {index}): {} markers, max {}, min {}",
            frame.attribute,
            frame.markers.len(),
            frame.stats.max,
            frame.stats.min
        );

        for marker in &frame.markers {
            self.renderer.set_radius(marker.feature, marker.radius);
            self.renderer.bind_popup(marker.feature, &marker.popup);
        }
        self.legend.update_legend(&frame.legend);
        self.input.show_index(index);

        self.frame = Some(frame);
    }
}

impl<R, L, I> SelectionListener for SymbolView<R, L, I>
where
    R: MarkerRenderer,
    L: LegendSurface,
    I: InputControl,
{
    /// An attribute nobody carries still moves the legend and slider; the
    /// markers keep what they showed before.
    fn selection_changed(&mut self, index: usize, attribute: &str) -> SymbolResult<()> {
        let frame = match present(attribute, self.dataset.features()) {
            Ok(frame) => frame,
            Err(SymbolError::EmptySet { .. }) => {
                log::warn!("no feature carries {attribute}; markers left unchanged");
                SymbolFrame::uncarried(attribute)
            }
            Err(e) => return Err(e),
        };
        self.render(index, frame);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SymbolSession – controller wired to its view
// ---------------------------------------------------------------------------

/// A loaded dataset being browsed year by year.
pub struct SymbolSession<R, L, I> {
    controller: SequenceController,
    view: SymbolView<R, L, I>,
}

impl<R, L, I> SymbolSession<R, L, I>
where
    R: MarkerRenderer,
    L: LegendSurface,
    I: InputControl,
{
    /// Create markers for every feature and render the first attribute.
    ///
    /// Fails when the first attribute cannot be summarised; no session is
    /// produced in that case.
    pub fn start(
        dataset: SymbolDataset,
        mut renderer: R,
        legend: L,
        mut input: I,
    ) -> SymbolResult<Self> {
        let controller = SequenceController::new(dataset.attributes().clone());
        log::debug!(
            "attribute sequence: {:?}",
            controller.attributes().iter().collect::<Vec<_>>()
        );
        input.configure(controller.len() - 1);
        for feature in 0..dataset.len() {
            renderer.create_marker(feature, 0.0, "");
        }

        let mut view = SymbolView {
            dataset,
            renderer,
            legend,
            input,
            frame: None,
        };
        let frame = present(controller.current_attribute(), view.dataset.features())?;
        view.render(controller.current_index(), frame);

        log::info!(
            "session started: {} features, {} attributes ({}..{})",
            view.dataset.len(),
            controller.len(),
            controller.attributes().first(),
            &controller.attributes()[controller.attributes().last_index()]
        );
        Ok(SymbolSession { controller, view })
    }

    pub fn on_step_forward(&mut self) -> SymbolResult<()> {
        self.controller.step_forward(&mut self.view)
    }

    pub fn on_step_backward(&mut self) -> SymbolResult<()> {
        self.controller.step_backward(&mut self.view)
    }

    pub fn on_index_selected(&mut self, index: i64) -> SymbolResult<()> {
        self.controller.set_index(index, &mut self.view)
    }

    pub fn controller(&self) -> &SequenceController {
        &self.controller
    }

    pub fn dataset(&self) -> &SymbolDataset {
        &self.view.dataset
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> Option<&SymbolFrame> {
        self.view.frame.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.view.renderer
    }

    pub fn legend(&self) -> &L {
        &self.view.legend
    }

    pub fn input(&self) -> &I {
        &self.view.input
    }
}
