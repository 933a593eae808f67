use crate::models::state::RecorderState;

/// Live-monitoring hook for a recorder session.
///
/// Called synchronously on the feeding thread; keep implementations cheap.
pub trait SampleObserver: Send + Sync {
    /// Called with the left (or mono) block of every accepted feed.
    fn on_sample_block(&self, block: &[f32]);

    /// Called when the session state changes.
    fn on_state_changed(&self, _state: RecorderState) {}
}
