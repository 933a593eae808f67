/// Recorder session state machine.
///
/// State transitions:
/// ```text
/// idle ⇄ recording
///   ↓        ↓
///    shut down (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    ShutDown,
}

impl RecorderState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ShutDown)
    }
}
