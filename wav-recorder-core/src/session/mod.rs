pub mod connected;
pub mod recorder;
