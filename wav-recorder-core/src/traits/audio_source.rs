use std::sync::Arc;

use crate::models::error::RecorderError;

/// Callback invoked when the source has a block ready.
///
/// Receives one slice per channel (left first), all of equal length.
pub type BlockCallback = Arc<dyn Fn(&[&[f32]]) + Send + Sync + 'static>;

/// Live audio source feeding a recorder.
///
/// Implemented by platform backends (or test doubles). The recorder reads
/// `sample_rate` once when it is built and never reconfigures the source.
pub trait AudioSource: Send {
    /// Sample rate of delivered blocks, in Hz.
    fn sample_rate(&self) -> u32;

    /// Start delivering blocks to `callback` until disconnected.
    ///
    /// The callback may fire on a dedicated audio thread.
    fn connect(&mut self, callback: BlockCallback) -> Result<(), RecorderError>;

    /// Stop delivering blocks and release resources.
    fn disconnect(&mut self) -> Result<(), RecorderError>;
}
