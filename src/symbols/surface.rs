use super::present::LegendInstruction;

/// Owns the drawn markers, one per feature, addressed by feature index.
pub trait MarkerRenderer {
    fn create_marker(&mut self, feature: usize, radius: f64, popup: &str);
    fn set_radius(&mut self, feature: usize, radius: f64);
    fn bind_popup(&mut self, feature: usize, popup: &str);
}

/// Places the three legend circles, their labels and the header.
pub trait LegendSurface {
    fn update_legend(&mut self, legend: &LegendInstruction);
}

/// The slider the user scrubs; kept in step when buttons move the selection.
pub trait InputControl {
    /// Range becomes `[0, max_index]`, step 1.
    fn configure(&mut self, max_index: usize);
    fn show_index(&mut self, index: usize);
}
