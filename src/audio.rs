//! Audio playback capability.

/// Highest volume level the playback module accepts.
pub const MAX_VOLUME: u8 = 30;

/// Trait for abstracting the audio playback module.
///
/// Volumes are whole levels in `0..=MAX_VOLUME`. The sequencer never issues
/// a level above [`MAX_VOLUME`]. Implementations handle transport errors
/// internally; these calls cannot fail.
pub trait AudioOutput {
    /// Starts playing `track` at `volume`.
    fn play_track(&mut self, track: u16, volume: u8);

    /// Changes the volume of whatever is currently playing.
    fn set_volume(&mut self, volume: u8);
}
