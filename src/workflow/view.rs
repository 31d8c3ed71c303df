use crate::models::RenderedArtwork;
use crate::workflow::WorkflowState;

/// The presentation side of a workflow: trigger control, loading indicator,
/// result area and alerts. Rendering markdown is the view's business.
pub trait WorkflowView {
    /// Disable the trigger and show the loading indicator, or undo both.
    fn set_busy(&mut self, busy: bool);

    fn set_trigger_label(&mut self, label: &str);

    fn set_state(&mut self, _state: WorkflowState) {}

    fn hide_result(&mut self);

    fn show_story(&mut self, markdown: &str);

    fn show_image_prompt(&mut self, prompt: &str);

    /// Called only once the image bytes are fully loaded.
    fn show_artwork(&mut self, artwork: &RenderedArtwork, image: &[u8]);

    fn alert(&mut self, message: &str);
}
