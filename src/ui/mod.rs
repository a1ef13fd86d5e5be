/// egui side of the app: the symbol surfaces plus the window chrome.
///
/// ```text
///   map       MapLayer        ← MarkerRenderer
///   legend    LegendPanel     ← LegendSurface
///   controls  SequenceSlider  ← InputControl, SequenceInput out
///   panels    top bar, value table, file dialog
/// ```

pub mod controls;
pub mod legend;
pub mod map;
pub mod panels;
