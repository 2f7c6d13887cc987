#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`AlarmSequencer`**: Owns all device state and advances it one tick at a time
//! - **`SequencePhase`**: Idle, Dimming, Waiting, Brightening, Done
//! - **`ConfigurationMode`**: Which timed setting the knob adjusts
//! - **`InputDebouncer`**: Turns mode button, pressure and knob lines into stable values
//! - **`SequencerConfig`**: Validated ramp, timing and feedback parameters
//! - **`LightOutput`**: Trait the sequencer drives lights through (`RgbEmitter`, `PixelStrip`, `Light`)
//! - **`NoIndicator`**: Placeholder for the optional PWM brightness indicator
//! - **`AudioOutput`**: Trait to implement for your audio playback module
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Light outputs take `Srgb<u8>` colors. [`RgbEmitter`] converts them to the
//! 0.0-1.0 `Srgb<f32>` format expected by [`RgbLed`] implementations.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

mod fmt;

pub mod audio;
pub mod colors;
pub mod config;
pub mod inputs;
pub mod light;
pub mod sequencer;
pub mod time;
pub mod types;

pub use audio::{AudioOutput, MAX_VOLUME};
pub use colors::Rgb8;
pub use config::{ConfigError, ModeFeedback, SequencerConfig, SequencerConfigBuilder};
pub use inputs::{AnalogInput, InputDebouncer, SensorInputs};
pub use light::{Light, LightOutput, NoIndicator, PixelBus, PixelStrip, RgbEmitter, RgbLed};
pub use sequencer::AlarmSequencer;
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{ConfigurationMode, SequencePhase, SettingRange, TimedSetting, Volume};
