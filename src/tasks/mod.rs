mod autosave;

pub use autosave::{autosave_channel, AutosaveHandle, AutosaveTask, SaveRequest};
