pub mod audio_models;
pub mod config;
pub mod error;
pub mod export_metadata;
pub mod state;
pub mod wav_blob;
