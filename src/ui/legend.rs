use eframe::egui::{self, Align2, FontId, Pos2, Sense, Stroke, Ui, Vec2};

use crate::color::{ramp_color, ramp_fraction, LEGEND_STROKE, SYMBOL_FILL};
use crate::symbols::present::LegendInstruction;
use crate::symbols::surface::LegendSurface;

/// Legend drawing area.
const LEGEND_SIZE: Vec2 = Vec2::new(200.0, 120.0);
/// Shared bottom edge of the nested circles.
const BASELINE_Y: f32 = 99.0;
const CIRCLE_X: f32 = 50.0;
const LABEL_X: f32 = 105.0;
/// Label rows for the max, mean and min circles.
const LABEL_Y: [f32; 3] = [40.0, 70.0, 100.0];

// ---------------------------------------------------------------------------
// LegendPanel – legend surface state
// ---------------------------------------------------------------------------

/// Holds the latest legend instruction until the next frame paints it.
#[derive(Debug, Clone, Default)]
pub struct LegendPanel {
    current: Option<LegendInstruction>,
}

impl LegendPanel {
    pub fn current(&self) -> Option<&LegendInstruction> {
        self.current.as_ref()
    }
}

impl LegendSurface for LegendPanel {
    fn update_legend(&mut self, legend: &LegendInstruction) {
        self.current = Some(legend.clone());
    }
}

// ---------------------------------------------------------------------------
// Legend window (top right)
// ---------------------------------------------------------------------------

/// Render the temporal legend over the top-right corner of the map.
pub fn legend_window(ctx: &egui::Context, panel: &LegendPanel, shade_by_value: bool) {
    let Some(legend) = panel.current() else {
        return;
    };

    egui::Window::new("legend")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
        .show(ctx, |ui: &mut Ui| {
            ui.strong(&legend.header);
            ui.label(legend.caption);
            legend_circles(ui, legend, shade_by_value);
        });
}

/// Three nested circles on a common baseline with their labels.
fn legend_circles(ui: &mut Ui, legend: &LegendInstruction, shade_by_value: bool) {
    let (response, painter) = ui.allocate_painter(LEGEND_SIZE, Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();

    let (min, max) = (legend.min.radius, legend.max.radius);
    for ((_, circle), label_y) in legend.circles().iter().zip(LABEL_Y) {
        let r = circle.radius as f32;
        if r.is_finite() && r > 0.0 {
            let fill = if shade_by_value {
                ramp_color(ramp_fraction(circle.radius, min, max))
            } else {
                SYMBOL_FILL
            };
            let center = origin + circle_center(r).to_vec2();
            painter.circle(center, r, fill, Stroke::new(1.0, LEGEND_STROKE));
        }
        painter.text(
            origin + Vec2::new(LABEL_X, label_y),
            Align2::LEFT_BOTTOM,
            &circle.label,
            FontId::proportional(12.0),
            text_color,
        );
    }
}

/// Centre of a legend circle of radius `r`, relative to the legend origin.
pub fn circle_center(r: f32) -> Pos2 {
    Pos2::new(CIRCLE_X, BASELINE_Y - r)
}
