use std::sync::Arc;

use crate::models::audio_models::{ChannelMode, RecorderDiagnostics};
use crate::models::config::{ConfigUpdate, RecorderConfig};
use crate::models::error::RecorderError;
use crate::models::state::RecorderState;
use crate::models::wav_blob::WavBlob;
use crate::processing::interleave::interleave;
use crate::processing::sample_buffer::SampleBuffer;
use crate::processing::wav_format;
use crate::traits::export_sink::ExportSink;
use crate::traits::sample_observer::SampleObserver;

/// Recorder session: buffers incoming sample blocks and exports them as WAV.
///
/// Owns one `SampleBuffer` per channel. Data flow on export:
/// ```text
/// [SampleBuffer L] ─ merge ─┐
///                           ├→ interleave (stereo) → quantize → WAV header + data → WavBlob
/// [SampleBuffer R] ─ merge ─┘
/// ```
///
/// Single-threaded; see `ConnectedRecorder` for a session driven by an
/// `AudioSource` on another thread.
pub struct RecorderSession {
    config: RecorderConfig,
    sample_rate: u32,
    state: RecorderState,
    buffers: Vec<SampleBuffer>,
    observer: Option<Arc<dyn SampleObserver>>,
    sink: Option<Arc<dyn ExportSink>>,
    diagnostics: RecorderDiagnostics,
}

impl RecorderSession {
    pub fn new(sample_rate: u32, config: RecorderConfig) -> Result<Self, RecorderError> {
        if sample_rate == 0 {
            return Err(RecorderError::InvalidConfiguration("sample rate must be positive".into()));
        }
        config.validate().map_err(RecorderError::InvalidConfiguration)?;

        let channels = config.channel_mode.channel_count() as usize;
        log::debug!(
            "Created {:?} recorder session at {} Hz (block size {})",
            config.channel_mode,
            sample_rate,
            config.buffer_block_size
        );

        Ok(Self {
            config,
            sample_rate,
            state: RecorderState::Idle,
            buffers: vec![SampleBuffer::new(); channels],
            observer: None,
            sink: None,
            diagnostics: RecorderDiagnostics::default(),
        })
    }

    pub fn set_observer(&mut self, observer: Arc<dyn SampleObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Register the default consumer for `export_wav`.
    pub fn set_export_sink(&mut self, sink: Arc<dyn ExportSink>) {
        self.sink = Some(sink);
    }

    pub fn registered_sink(&self) -> Option<Arc<dyn ExportSink>> {
        self.sink.clone()
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn channel_mode(&self) -> ChannelMode {
        self.config.channel_mode
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> RecorderDiagnostics {
        self.diagnostics.clone()
    }

    /// Samples buffered per channel.
    pub fn len(&self) -> usize {
        self.buffers.first().map_or(0, SampleBuffer::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the buffered audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    /// Begin accepting blocks. Valid from idle or recording.
    pub fn start(&mut self) -> Result<(), RecorderError> {
        if self.state.is_terminal() {
            log::warn!("start() called on a shut down recorder session");
            return Err(RecorderError::ShutDown);
        }
        self.set_state(RecorderState::Recording);
        Ok(())
    }

    /// Stop accepting blocks. Buffered audio is kept.
    pub fn stop(&mut self) -> Result<(), RecorderError> {
        if self.state.is_terminal() {
            log::warn!("stop() called on a shut down recorder session");
            return Err(RecorderError::ShutDown);
        }
        self.set_state(RecorderState::Idle);
        Ok(())
    }

    /// Feed one block per channel (left first for stereo).
    ///
    /// While idle the blocks are dropped without error. While recording, a
    /// wrong block count or unequal block lengths are rejected before anything
    /// is buffered, which keeps the channels in lockstep.
    pub fn feed(&mut self, blocks: &[&[f32]]) -> Result<(), RecorderError> {
        if self.state.is_terminal() {
            log::warn!("Dropping block fed to a shut down recorder session");
            return Err(RecorderError::ShutDown);
        }
        if !self.state.is_recording() {
            self.diagnostics.blocks_discarded += 1;
            return Ok(());
        }

        if blocks.len() != self.buffers.len() {
            return Err(RecorderError::ChannelMismatch {
                expected: self.buffers.len(),
                actual: blocks.len(),
            });
        }
        let frames = blocks[0].len();
        if let Some(block) = blocks.iter().find(|block| block.len() != frames) {
            return Err(RecorderError::ChannelMismatch {
                expected: frames,
                actual: block.len(),
            });
        }

        for (buffer, block) in self.buffers.iter_mut().zip(blocks) {
            buffer.append(block);
        }
        self.diagnostics.blocks_accepted += 1;
        self.diagnostics.samples_buffered += frames as u64;

        if let Some(ref observer) = self.observer {
            observer.on_sample_block(blocks[0]);
        }
        Ok(())
    }

    pub fn feed_mono(&mut self, block: &[f32]) -> Result<(), RecorderError> {
        self.feed(&[block])
    }

    pub fn feed_stereo(&mut self, left: &[f32], right: &[f32]) -> Result<(), RecorderError> {
        self.feed(&[left, right])
    }

    /// Drop all buffered audio. The state is left unchanged.
    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.clear();
        }
        self.diagnostics.samples_buffered = 0;
        log::debug!("Recorder buffers cleared");
    }

    /// Merged per-channel sample arrays (one for mono, two for stereo).
    pub fn get_buffers(&self) -> Result<Vec<Vec<f32>>, RecorderError> {
        self.check_lockstep()?;
        Ok(self.buffers.iter().map(SampleBuffer::merge).collect())
    }

    /// Encode the buffered audio as a WAV blob.
    ///
    /// `mime_type` overrides the configured media type for this blob only.
    pub fn encode_wav(&self, mime_type: Option<&str>) -> Result<WavBlob, RecorderError> {
        let samples = match self.buffers.as_slice() {
            [mono] => mono.merge(),
            [left, right] => interleave(&left.merge(), &right.merge())?,
            other => {
                return Err(RecorderError::ChannelMismatch {
                    expected: self.channel_mode().channel_count() as usize,
                    actual: other.len(),
                })
            }
        };

        let bytes = wav_format::encode_wav(&samples, self.channel_mode(), self.sample_rate)?;
        let mime_type = mime_type.unwrap_or(self.config.mime_type.as_str());
        Ok(WavBlob::new(bytes, mime_type))
    }

    /// Encode the buffered audio and hand it to the registered export sink.
    pub fn export_wav(&mut self, mime_type: Option<&str>) -> Result<(), RecorderError> {
        let sink = self.registered_sink().ok_or(RecorderError::MissingConsumer)?;
        self.export_wav_to(sink.as_ref(), mime_type)
    }

    /// Encode the buffered audio and hand it to `sink`.
    pub fn export_wav_to(&mut self, sink: &dyn ExportSink, mime_type: Option<&str>) -> Result<(), RecorderError> {
        let blob = self.prepare_export(mime_type)?;
        sink.deliver(blob)?;
        self.record_export();
        Ok(())
    }

    /// Encode for export without delivering; pairs with `record_export`.
    pub(crate) fn prepare_export(&self, mime_type: Option<&str>) -> Result<WavBlob, RecorderError> {
        let blob = self.encode_wav(mime_type)?;
        log::info!(
            "Exporting {} bytes ({:.2}s, {:?}, {})",
            blob.len(),
            self.duration_secs(),
            self.channel_mode(),
            blob.mime_type()
        );
        Ok(blob)
    }

    pub(crate) fn record_export(&mut self) {
        self.diagnostics.exports_completed += 1;
    }

    /// Apply a partial configuration.
    ///
    /// The channel mode is fixed for the session's lifetime; a different
    /// mode in `update` is ignored.
    pub fn configure(&mut self, update: ConfigUpdate) -> Result<(), RecorderError> {
        if let Some(mode) = update.channel_mode {
            if mode != self.config.channel_mode {
                log::warn!(
                    "Ignoring channel mode change to {:?}; session is {:?}",
                    mode,
                    self.config.channel_mode
                );
            }
        }

        let next = self.config.merged(&update);
        next.validate().map_err(RecorderError::InvalidConfiguration)?;
        self.config = next;
        Ok(())
    }

    /// `configure` from a JSON object. Unknown keys are ignored.
    pub fn configure_json(&mut self, json: &str) -> Result<(), RecorderError> {
        self.configure(ConfigUpdate::from_json(json)?)
    }

    /// Permanently stop the session. Buffered audio stays exportable.
    pub fn shutdown(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.set_state(RecorderState::ShutDown);
    }

    // --- Internal helpers ---

    fn set_state(&mut self, new_state: RecorderState) {
        if self.state == new_state {
            return;
        }
        log::debug!("Recorder state {:?} -> {:?}", self.state, new_state);
        self.state = new_state;
        if let Some(ref observer) = self.observer {
            observer.on_state_changed(new_state);
        }
    }

    fn check_lockstep(&self) -> Result<(), RecorderError> {
        let expected = self.len();
        match self.buffers.iter().find(|buffer| buffer.len() != expected) {
            Some(buffer) => Err(RecorderError::ChannelMismatch {
                expected,
                actual: buffer.len(),
            }),
            None => Ok(()),
        }
    }
}
