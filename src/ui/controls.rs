use eframe::egui::{self, Key, Modifiers, Ui};

use crate::symbols::surface::InputControl;

/// A discrete input event from the sequence controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceInput {
    StepForward,
    StepBackward,
    Select(i64),
}

// ---------------------------------------------------------------------------
// SequenceSlider – slider position mirrored from the controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceSlider {
    pub value: usize,
    pub max: usize,
}

impl InputControl for SequenceSlider {
    fn configure(&mut self, max_index: usize) {
        self.max = max_index;
        self.value = 0;
    }

    fn show_index(&mut self, index: usize) {
        self.value = index.min(self.max);
    }
}

// ---------------------------------------------------------------------------
// Sequence control bar (bottom left)
// ---------------------------------------------------------------------------

/// Render the slider and skip buttons; returns the input the user gave, if any.
pub fn sequence_controls(ui: &mut Ui, slider: &SequenceSlider, label: &str) -> Option<SequenceInput> {
    let mut input = None;

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("⏴ Reverse").on_hover_text("Reverse").clicked() {
            input = Some(SequenceInput::StepBackward);
        }

        let mut value = slider.value;
        let response = ui.add(
            egui::Slider::new(&mut value, 0..=slider.max)
                .step_by(1.0)
                .show_value(false),
        );
        if response.changed() && value != slider.value {
            input = Some(SequenceInput::Select(value as i64));
        }

        if ui.button("Skip ⏵").on_hover_text("Forward").clicked() {
            input = Some(SequenceInput::StepForward);
        }

        ui.separator();
        ui.strong(label);
    });

    input
}

/// Arrow keys step through the sequence, one step per press (repeats included).
pub fn keyboard_input(ctx: &egui::Context) -> Vec<SequenceInput> {
    let (forward, backward) = ctx.input_mut(|i| {
        (
            i.count_and_consume_key(Modifiers::NONE, Key::ArrowRight),
            i.count_and_consume_key(Modifiers::NONE, Key::ArrowLeft),
        )
    });
    step_inputs(forward, backward)
}

fn step_inputs(forward: usize, backward: usize) -> Vec<SequenceInput> {
    let mut inputs = vec![SequenceInput::StepForward; forward];
    inputs.extend(std::iter::repeat(SequenceInput::StepBackward).take(backward));
    inputs
}
