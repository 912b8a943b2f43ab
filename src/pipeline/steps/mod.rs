//! Concrete composition steps, in execution order.

mod captions;
mod mix_audio;
mod mux;
mod probe;
mod trim_music;
mod trim_video;

pub use captions::RenderCaptionsStep;
pub use mix_audio::MixAudioStep;
pub use mux::MuxStep;
pub use probe::ProbeDurationStep;
pub use trim_music::TrimMusicStep;
pub use trim_video::TrimVideoStep;
