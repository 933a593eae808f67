pub mod audio_source;
pub mod export_sink;
pub mod sample_observer;
