use cubetrainer_core::FaceletState;

/// Consumer of facelet snapshots, such as a renderer.
///
/// A visualizer is refreshed once when the cube becomes ready and again after
/// every completed move.
pub trait Visualizer {
    /// Displays a new snapshot.
    fn refresh(&mut self, state: &FaceletState);
}
impl<F: FnMut(&FaceletState)> Visualizer for F {
    fn refresh(&mut self, state: &FaceletState) {
        self(state);
    }
}
