//! # wav-recorder-core
//!
//! Platform-agnostic recorder core.
//!
//! Buffers live `f32` sample blocks per channel, then merges, interleaves,
//! quantizes to 16-bit PCM and encodes a WAV file on demand. Audio sources
//! implement the `AudioSource` trait and plug into `ConnectedRecorder`;
//! finished files go to an `ExportSink`.
//!
//! ## Architecture
//!
//! ```text
//! wav-recorder-core (this crate)
//! ├── traits/       ← AudioSource, SampleObserver, ExportSink
//! ├── models/       ← RecorderError, RecorderState, RecorderConfig, ChannelMode, WavBlob, etc.
//! ├── processing/   ← SampleBuffer, interleave, PCM quantizer, WAV encoding
//! ├── session/      ← RecorderSession (state machine), ConnectedRecorder
//! └── storage/      ← FileSink, MemorySink, metadata sidecars
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::audio_models::{ChannelMode, RecorderDiagnostics};
pub use models::config::{ConfigUpdate, RecorderConfig, DEFAULT_BUFFER_BLOCK_SIZE, WAV_MIME_TYPE};
pub use models::error::RecorderError;
pub use models::export_metadata::ExportMetadata;
pub use models::state::RecorderState;
pub use models::wav_blob::WavBlob;
pub use processing::interleave::interleave;
pub use processing::pcm::{quantize, quantize_sample};
pub use processing::sample_buffer::SampleBuffer;
pub use processing::wav_format::{encode_wav, parse_wav_header, WavHeader};
pub use session::connected::ConnectedRecorder;
pub use session::recorder::RecorderSession;
pub use storage::file_sink::FileSink;
pub use storage::memory_sink::MemorySink;
pub use traits::audio_source::{AudioSource, BlockCallback};
pub use traits::export_sink::ExportSink;
pub use traits::sample_observer::SampleObserver;
