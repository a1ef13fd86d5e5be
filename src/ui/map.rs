use std::collections::BTreeMap;

use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, StrokeKind, Ui, Vec2};
use egui_plot::{Line, MarkerShape, Plot, PlotPoint, PlotPoints, PlotTransform, Points};

use crate::color::{ramp_color, ramp_fraction, SYMBOL_FILL, SYMBOL_STROKE};
use crate::data::model::{Feature, LonLat};
use crate::state::AppState;
use crate::symbols::surface::MarkerRenderer;

/// Extra pick tolerance around a marker, in screen points.
const PICK_SLACK: f32 = 2.0;
/// Smallest clickable radius, so tiny symbols stay selectable.
const MIN_PICK_RADIUS: f32 = 4.0;
/// Outline width around each symbol.
const STROKE_WIDTH: f32 = 1.0;

// ---------------------------------------------------------------------------
// MapLayer – marker renderer backed by egui_plot
// ---------------------------------------------------------------------------

/// One circle marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub anchor: Option<LonLat>,
    pub radius: f64,
    pub popup: String,
}

impl Marker {
    /// Markers with no anchor or a non-finite / zero radius are not drawn.
    pub fn is_drawable(&self) -> bool {
        self.anchor.is_some() && self.radius.is_finite() && self.radius > 0.0
    }
}

/// Marker state for every feature, plus the outlines drawn underneath.
#[derive(Debug, Clone, Default)]
pub struct MapLayer {
    anchors: Vec<Option<LonLat>>,
    outlines: Vec<Vec<LonLat>>,
    markers: BTreeMap<usize, Marker>,
}

impl MapLayer {
    pub fn new(features: &[Feature]) -> Self {
        MapLayer {
            anchors: features.iter().map(|f| f.geometry.anchor).collect(),
            outlines: features
                .iter()
                .flat_map(|f| f.geometry.outlines.iter().cloned())
                .collect(),
            markers: BTreeMap::new(),
        }
    }

    pub fn marker(&self, feature: usize) -> Option<&Marker> {
        self.markers.get(&feature)
    }

    pub fn markers(&self) -> impl Iterator<Item = (usize, &Marker)> {
        self.markers.iter().map(|(i, m)| (*i, m))
    }

    /// Feature whose drawn circle contains `pointer`; the smallest wins
    /// because small circles are painted on top.
    pub fn pick(&self, pointer: Pos2, to_screen: impl Fn(LonLat) -> Pos2) -> Option<usize> {
        self.markers
            .iter()
            .filter(|(_, m)| m.is_drawable())
            .filter_map(|(i, m)| {
                let center = to_screen(m.anchor?);
                let reach = (m.radius as f32).max(MIN_PICK_RADIUS) + PICK_SLACK;
                (center.distance(pointer) <= reach).then_some((*i, m.radius))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

impl MarkerRenderer for MapLayer {
    fn create_marker(&mut self, feature: usize, radius: f64, popup: &str) {
        let anchor = self.anchors.get(feature).copied().flatten();
        self.markers.insert(
            feature,
            Marker {
                anchor,
                radius,
                popup: popup.to_string(),
            },
        );
    }

    fn set_radius(&mut self, feature: usize, radius: f64) {
        if let Some(marker) = self.markers.get_mut(&feature) {
            marker.radius = radius;
        }
    }

    fn bind_popup(&mut self, feature: usize, popup: &str) {
        if let Some(marker) = self.markers.get_mut(&feature) {
            marker.popup = popup.to_string();
        }
    }
}

// ---------------------------------------------------------------------------
// Map plot (central panel)
// ---------------------------------------------------------------------------

/// Render the proportional-symbol map in the central panel.
pub fn symbol_map(ui: &mut Ui, state: &mut AppState) {
    let session = match &state.session {
        Some(session) => session,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a dataset to map breweries  (File → Open…)");
            });
            return;
        }
    };

    let layer = session.renderer();
    // Shading spans the radii of the current legend extremes.
    let radius_range = session
        .frame()
        .map(|f| (f.legend.min.radius, f.legend.max.radius));
    let shade = state.shade_by_value;
    let fill_for = |radius: f64| match (shade, radius_range) {
        (true, Some((min, max))) => ramp_color(ramp_fraction(radius, min, max)),
        _ => SYMBOL_FILL,
    };

    // Big circles first so small ones stay visible on top.
    let mut drawn: Vec<&Marker> = layer
        .markers()
        .map(|(_, m)| m)
        .filter(|m| m.is_drawable())
        .collect();
    drawn.sort_by(|a, b| b.radius.total_cmp(&a.radius));

    let response = Plot::new("symbol_map")
        .data_aspect(1.3)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for ring in &layer.outlines {
                let points: PlotPoints = ring.iter().copied().collect();
                plot_ui.line(Line::new(points).color(Color32::from_gray(140)).width(0.5));
            }

            for marker in &drawn {
                let Some([lon, lat]) = marker.anchor else {
                    continue;
                };
                let r = marker.radius as f32;
                plot_ui.points(
                    Points::new(vec![[lon, lat]])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(r + STROKE_WIDTH)
                        .color(SYMBOL_STROKE),
                );
                plot_ui.points(
                    Points::new(vec![[lon, lat]])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(r)
                        .color(fill_for(marker.radius)),
                );
            }
        });

    let transform = response.transform;
    let to_screen = |p: LonLat| transform.position_from_point(&PlotPoint::new(p[0], p[1]));

    let mut selected = state.selected_marker;
    if response.response.clicked() {
        selected = response
            .response
            .interact_pointer_pos()
            .and_then(|pointer| layer.pick(pointer, to_screen));
    }

    if let Some(marker) = selected.and_then(|i| layer.marker(i)).filter(|m| m.is_drawable()) {
        draw_popup(ui, &transform, marker, response.response.rect);
    }

    state.selected_marker = selected;
}

/// Popup bubble just above the marker's top edge.
fn draw_popup(ui: &Ui, transform: &PlotTransform, marker: &Marker, clip: Rect) {
    let Some([lon, lat]) = marker.anchor else {
        return;
    };
    let center = transform.position_from_point(&PlotPoint::new(lon, lat));
    let tip = center - Vec2::new(0.0, marker.radius as f32 + 6.0);

    let painter = ui.painter_at(clip);
    let visuals = ui.visuals();
    let galley = painter.layout_no_wrap(
        marker.popup.clone(),
        FontId::proportional(13.0),
        visuals.text_color(),
    );
    let rect = Align2::CENTER_BOTTOM.anchor_size(tip, galley.size());
    painter.rect_filled(rect.expand(5.0), 4.0, visuals.extreme_bg_color);
    painter.rect_stroke(
        rect.expand(5.0),
        4.0,
        Stroke::new(1.0, visuals.weak_text_color()),
        StrokeKind::Outside,
    );
    painter.galley(rect.min, galley, visuals.text_color());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Geometry, Properties};

    fn layer_with(points: &[LonLat]) -> MapLayer {
        let features: Vec<Feature> = points
            .iter()
            .map(|p| Feature::new(Properties::new(), Geometry::point(p[0], p[1])))
            .collect();
        MapLayer::new(&features)
    }

    fn identity(p: LonLat) -> Pos2 {
        Pos2::new(p[0] as f32, p[1] as f32)
    }

    #[test]
    fn markers_take_feature_anchor() {
        let mut layer = layer_with(&[[1.0, 2.0]]);
        layer.create_marker(0, 0.0, "");
        layer.set_radius(0, 5.0);
        layer.bind_popup(0, "hello");

        let marker = layer.marker(0).unwrap();
        assert_eq!(marker.anchor, Some([1.0, 2.0]));
        assert_eq!(marker.radius, 5.0);
        assert_eq!(marker.popup, "hello");
        assert!(marker.is_drawable());
    }

    #[test]
    fn zero_or_nan_radius_is_not_drawn() {
        let mut layer = layer_with(&[[0.0, 0.0], [5.0, 5.0]]);
        layer.create_marker(0, 0.0, "");
        layer.create_marker(1, f64::NAN, "");
        assert!(!layer.marker(0).unwrap().is_drawable());
        assert!(!layer.marker(1).unwrap().is_drawable());
    }

    #[test]
    fn updates_to_unknown_markers_are_ignored() {
        let mut layer = layer_with(&[[0.0, 0.0]]);
        layer.set_radius(3, 9.0);
        layer.bind_popup(3, "x");
        assert!(layer.marker(3).is_none());
    }

    #[test]
    fn pick_prefers_smallest_overlapping_circle() {
        let mut layer = layer_with(&[[0.0, 0.0], [3.0, 0.0], [100.0, 100.0]]);
        layer.create_marker(0, 20.0, "big");
        layer.create_marker(1, 5.0, "small");
        layer.create_marker(2, 5.0, "far");

        assert_eq!(layer.pick(Pos2::new(3.0, 1.0), identity), Some(1));
        assert_eq!(layer.pick(Pos2::new(-15.0, 0.0), identity), Some(0));
        assert_eq!(layer.pick(Pos2::new(50.0, 50.0), identity), None);
    }
}
