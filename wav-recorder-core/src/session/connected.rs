use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::audio_models::RecorderDiagnostics;
use crate::models::config::{ConfigUpdate, RecorderConfig};
use crate::models::error::RecorderError;
use crate::models::state::RecorderState;
use crate::models::wav_blob::WavBlob;
use crate::session::recorder::RecorderSession;
use crate::traits::audio_source::{AudioSource, BlockCallback};
use crate::traits::export_sink::ExportSink;
use crate::traits::sample_observer::SampleObserver;

/// A `RecorderSession` wired to a live `AudioSource`.
///
/// The source's sample rate is read once at construction. Blocks delivered
/// on the source's thread and calls made through this handle are serialized
/// by a `parking_lot::Mutex` around the session, so an export always sees a
/// whole number of fed blocks.
///
/// Encoding happens under that lock; delivery to the sink does not, so a slow
/// sink never stalls the audio thread. Observers run under the lock and must
/// not call back into the recorder.
pub struct ConnectedRecorder<S: AudioSource> {
    source: S,
    session: Arc<Mutex<RecorderSession>>,
    connected: bool,
}

impl<S: AudioSource> ConnectedRecorder<S> {
    pub fn new(mut source: S, config: RecorderConfig) -> Result<Self, RecorderError> {
        let session = Arc::new(Mutex::new(RecorderSession::new(source.sample_rate(), config)?));

        let shared = Arc::clone(&session);
        let callback: BlockCallback = Arc::new(move |blocks: &[&[f32]]| {
            if let Err(e) = shared.lock().feed(blocks) {
                log::error!("Failed to buffer audio block: {}", e);
            }
        });
        source.connect(callback)?;
        log::info!("Recorder connected to audio source at {} Hz", source.sample_rate());

        Ok(Self {
            source,
            session,
            connected: true,
        })
    }

    /// Run `f` with exclusive access to the underlying session.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut RecorderSession) -> R) -> R {
        f(&mut self.session.lock())
    }

    pub fn state(&self) -> RecorderState {
        self.session.lock().state()
    }

    pub fn sample_rate(&self) -> u32 {
        self.session.lock().sample_rate()
    }

    pub fn diagnostics(&self) -> RecorderDiagnostics {
        self.session.lock().diagnostics()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn set_observer(&self, observer: Arc<dyn SampleObserver>) {
        self.session.lock().set_observer(observer);
    }

    pub fn set_export_sink(&self, sink: Arc<dyn ExportSink>) {
        self.session.lock().set_export_sink(sink);
    }

    pub fn start(&self) -> Result<(), RecorderError> {
        self.session.lock().start()
    }

    pub fn stop(&self) -> Result<(), RecorderError> {
        self.session.lock().stop()
    }

    pub fn reset(&self) {
        self.session.lock().reset();
    }

    pub fn configure(&self, update: ConfigUpdate) -> Result<(), RecorderError> {
        self.session.lock().configure(update)
    }

    pub fn configure_json(&self, json: &str) -> Result<(), RecorderError> {
        self.session.lock().configure_json(json)
    }

    pub fn get_buffers(&self) -> Result<Vec<Vec<f32>>, RecorderError> {
        self.session.lock().get_buffers()
    }

    pub fn encode_wav(&self, mime_type: Option<&str>) -> Result<WavBlob, RecorderError> {
        self.session.lock().encode_wav(mime_type)
    }

    pub fn export_wav(&self, mime_type: Option<&str>) -> Result<(), RecorderError> {
        let (sink, blob) = {
            let session = self.session.lock();
            let sink = session.registered_sink().ok_or(RecorderError::MissingConsumer)?;
            (sink, session.prepare_export(mime_type)?)
        };
        self.deliver(sink.as_ref(), blob)
    }

    pub fn export_wav_to(&self, sink: &dyn ExportSink, mime_type: Option<&str>) -> Result<(), RecorderError> {
        let blob = self.session.lock().prepare_export(mime_type)?;
        self.deliver(sink, blob)
    }

    /// Disconnect the audio source and shut the session down for good.
    ///
    /// Buffered audio can still be exported afterwards.
    pub fn shutdown(&mut self) -> Result<(), RecorderError> {
        self.session.lock().shutdown();
        if !self.connected {
            return Ok(());
        }
        self.connected = false;
        self.source.disconnect()?;
        log::info!("Recorder disconnected from audio source");
        Ok(())
    }

    // Must be called without the session lock held.
    fn deliver(&self, sink: &dyn ExportSink, blob: WavBlob) -> Result<(), RecorderError> {
        sink.deliver(blob)?;
        self.session.lock().record_export();
        Ok(())
    }
}

impl<S: AudioSource> Drop for ConnectedRecorder<S> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("Failed to disconnect audio source: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::audio_models::ChannelMode;
    use crate::processing::wav_format::parse_wav_header;
    use crate::storage::memory_sink::MemorySink;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    /// Test source whose blocks are pushed by hand through a shared handle.
    #[derive(Clone)]
    struct ManualSource {
        sample_rate: u32,
        callback: Arc<Mutex<Option<BlockCallback>>>,
        disconnects: Arc<AtomicUsize>,
    }

    impl ManualSource {
        fn new(sample_rate: u32) -> Self {
            Self {
                sample_rate,
                callback: Arc::new(Mutex::new(None)),
                disconnects: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn emit(&self, blocks: &[&[f32]]) {
            let callback = self.callback.lock().clone();
            if let Some(callback) = callback {
                callback(blocks);
            }
        }
    }

    impl AudioSource for ManualSource {
        fn sample_rate(&self) -> u32 {
            self.sample_rate
        }

        fn connect(&mut self, callback: BlockCallback) -> Result<(), RecorderError> {
            *self.callback.lock() = Some(callback);
            Ok(())
        }

        fn disconnect(&mut self) -> Result<(), RecorderError> {
            *self.callback.lock() = None;
            self.disconnects.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn reads_sample_rate_from_source() {
        let source = ManualSource::new(16000);
        let recorder = ConnectedRecorder::new(source.clone(), RecorderConfig::mono()).unwrap();

        assert_eq!(recorder.sample_rate(), 16000);
        assert!(recorder.is_connected());
        assert!(source.callback.lock().is_some());
    }

    #[test]
    fn zero_rate_source_is_rejected() {
        let source = ManualSource::new(0);
        let result = ConnectedRecorder::new(source.clone(), RecorderConfig::mono());

        assert!(matches!(result, Err(RecorderError::InvalidConfiguration(_))));
        assert!(source.callback.lock().is_none());
    }

    #[test]
    fn routes_blocks_only_while_recording() {
        let source = ManualSource::new(8000);
        let recorder = ConnectedRecorder::new(source.clone(), RecorderConfig::stereo()).unwrap();

        source.emit(&[&[0.9], &[0.9]]);
        recorder.start().unwrap();
        source.emit(&[&[0.1, 0.2], &[0.3, 0.4]]);
        recorder.stop().unwrap();
        source.emit(&[&[0.9], &[0.9]]);

        assert_eq!(recorder.get_buffers().unwrap(), vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
        let diagnostics = recorder.diagnostics();
        assert_eq!(diagnostics.blocks_accepted, 1);
        assert_eq!(diagnostics.blocks_discarded, 2);
    }

    #[test]
    fn malformed_source_blocks_are_logged_not_buffered() {
        let source = ManualSource::new(8000);
        let recorder = ConnectedRecorder::new(source.clone(), RecorderConfig::stereo()).unwrap();
        recorder.start().unwrap();

        source.emit(&[&[0.1, 0.2]]);

        assert_eq!(recorder.get_buffers().unwrap(), vec![Vec::<f32>::new(), Vec::new()]);
    }

    #[test]
    fn blocks_from_audio_thread() {
        let source = ManualSource::new(48000);
        let recorder = ConnectedRecorder::new(source.clone(), RecorderConfig::mono()).unwrap();
        recorder.start().unwrap();

        let producer = source.clone();
        thread::spawn(move || {
            for i in 0..10 {
                let block = vec![i as f32 / 10.0; 480];
                producer.emit(&[block.as_slice()]);
            }
        })
        .join()
        .unwrap();

        let buffers = recorder.get_buffers().unwrap();
        assert_eq!(buffers[0].len(), 4800);
        assert_eq!(buffers[0][0], 0.0);
        assert_eq!(buffers[0][4799], 0.9);
    }

    #[test]
    fn exports_through_registered_sink() {
        let source = ManualSource::new(8000);
        let recorder = ConnectedRecorder::new(source.clone(), RecorderConfig::mono()).unwrap();
        let sink = Arc::new(MemorySink::new());
        recorder.set_export_sink(sink.clone());

        recorder.start().unwrap();
        source.emit(&[&[0.5; 100]]);
        recorder.export_wav(None).unwrap();

        let blob = sink.last().unwrap();
        let header = parse_wav_header(blob.bytes()).unwrap();
        assert_eq!(header.channel_mode(), Some(ChannelMode::Mono));
        assert_eq!(header.sample_rate, 8000);
        assert_eq!(header.data_size, 200);
        assert_eq!(recorder.diagnostics().exports_completed, 1);
    }

    #[test]
    fn sink_delivery_does_not_stall_audio_feed() {
        let source = ManualSource::new(8000);
        let recorder = ConnectedRecorder::new(source.clone(), RecorderConfig::mono()).unwrap();
        recorder.start().unwrap();

        let producer = source.clone();
        let sink = move |_: WavBlob| -> Result<(), RecorderError> {
            let producer = producer.clone();
            let (done_tx, done_rx) = mpsc::channel();
            thread::spawn(move || {
                producer.emit(&[&[0.1; 4]]);
                let _ = done_tx.send(());
            });
            done_rx
                .recv_timeout(Duration::from_millis(500))
                .map_err(|_| RecorderError::StorageError("audio feed stalled during delivery".into()))
        };

        recorder.export_wav_to(&sink, None).unwrap();

        assert_eq!(recorder.with_session(|session| session.len()), 4);
        assert_eq!(recorder.diagnostics().exports_completed, 1);
    }

    #[test]
    fn export_without_sink_fails() {
        let source = ManualSource::new(8000);
        let recorder = ConnectedRecorder::new(source, RecorderConfig::mono()).unwrap();
        assert_eq!(recorder.export_wav(None), Err(RecorderError::MissingConsumer));
    }

    #[test]
    fn shutdown_disconnects_once() {
        let source = ManualSource::new(8000);
        let mut recorder = ConnectedRecorder::new(source.clone(), RecorderConfig::mono()).unwrap();
        recorder.start().unwrap();
        source.emit(&[&[0.25; 8]]);

        recorder.shutdown().unwrap();
        recorder.shutdown().unwrap();

        assert!(!recorder.is_connected());
        assert_eq!(recorder.state(), RecorderState::ShutDown);
        assert_eq!(recorder.start(), Err(RecorderError::ShutDown));
        assert_eq!(source.disconnects.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.encode_wav(None).unwrap().len(), 44 + 16);

        drop(recorder);
        assert_eq!(source.disconnects.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_disconnects_source() {
        let source = ManualSource::new(8000);
        let recorder = ConnectedRecorder::new(source.clone(), RecorderConfig::mono()).unwrap();
        drop(recorder);

        assert_eq!(source.disconnects.load(Ordering::SeqCst), 1);
        assert!(source.callback.lock().is_none());
    }

    #[test]
    fn with_session_gives_direct_access() {
        let source = ManualSource::new(8000);
        let recorder = ConnectedRecorder::new(source, RecorderConfig::mono()).unwrap();

        recorder.with_session(|session| {
            session.start().unwrap();
            session.feed_mono(&[0.1, 0.2]).unwrap();
        });

        assert_eq!(recorder.with_session(|session| session.len()), 2);
    }
}
