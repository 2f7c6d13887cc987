//! Validated sequencer configuration.
//!
//! Defaults reproduce the bedside device: wake-up time 1-8, red-light time
//! 1-30, a 255-step red fade in steps of 5, a 5 s dwell and a 50-tick
//! sunrise to volume 10.

use crate::audio::MAX_VOLUME;
use crate::colors::{self, Rgb8};
use crate::time::TimeDuration;
use crate::types::{ConfigurationMode, SettingRange, Volume};
use palette::Srgb;

/// Feedback and bounds for one configuration mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeFeedback {
    /// Range the knob is scaled into while the mode is active.
    pub range: SettingRange,

    /// Track played when the mode is entered.
    pub cue_track: u16,

    /// Primary light fill when the mode is entered.
    pub fill_color: Rgb8,

    /// Color of the level indicator when the setting changes.
    pub level_color: Rgb8,
}

/// Configuration errors reported by [`SequencerConfigBuilder::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A setting range has `min > max`.
    InvalidRange {
        /// The offending range.
        range: SettingRange,
    },

    /// A ramp step is zero, so the ramp would never finish.
    ZeroStep {
        /// Which ramp, e.g. "brightness" or "sunrise volume".
        ramp: &'static str,
    },

    /// A volume exceeds what the audio module accepts.
    VolumeOutOfRange {
        /// The offending volume.
        volume: Volume,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidRange { range } => {
                write!(f, "invalid setting range: min {} exceeds max {}", range.min, range.max)
            }
            ConfigError::ZeroStep { ramp } => {
                write!(f, "{} ramp step must be non-zero", ramp)
            }
            ConfigError::VolumeOutOfRange { volume } => {
                write!(f, "volume {} exceeds maximum of {}", volume, MAX_VOLUME)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Timing, ramp and feedback parameters of an [`AlarmSequencer`](crate::AlarmSequencer).
///
/// Built and validated through [`SequencerConfig::builder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerConfig<D: TimeDuration> {
    pub(crate) wakeup: ModeFeedback,
    pub(crate) red_light: ModeFeedback,
    pub(crate) feedback_volume: u8,
    pub(crate) intro_track: Option<u16>,
    pub(crate) engage_track: u16,
    pub(crate) idle_color: Rgb8,
    pub(crate) alert_color: Rgb8,
    pub(crate) start_brightness: u8,
    pub(crate) brightness_step: u8,
    pub(crate) start_volume: Volume,
    pub(crate) dim_volume_step: Volume,
    pub(crate) dwell: D,
    pub(crate) rise_volume_step: Volume,
    pub(crate) rise_color_step: Rgb8,
    pub(crate) volume_cap: Volume,
    pub(crate) sunrise_color: Rgb8,
    pub(crate) mode_guard: D,
    pub(crate) tick_interval: D,
}

impl<D: TimeDuration> SequencerConfig<D> {
    /// Creates a builder preloaded with the device defaults.
    pub fn builder() -> SequencerConfigBuilder<D> {
        SequencerConfigBuilder::new()
    }

    /// Returns the feedback settings of `mode`.
    pub fn feedback(&self, mode: ConfigurationMode) -> &ModeFeedback {
        match mode {
            ConfigurationMode::SettingWakeupTime => &self.wakeup,
            ConfigurationMode::SettingRedLightTime => &self.red_light,
        }
    }

    /// Pause between the end of dimming and the start of the sunrise.
    pub fn dwell(&self) -> D {
        self.dwell
    }

    /// Minimum time between accepted mode button presses.
    ///
    /// Pass this to [`InputDebouncer::new`](crate::InputDebouncer::new).
    pub fn mode_guard(&self) -> D {
        self.mode_guard
    }

    /// Suggested period between ticks. Ramps advance one step per tick.
    pub fn tick_interval(&self) -> D {
        self.tick_interval
    }

    /// Brightness the dimming ramp starts from and Idle returns to.
    pub fn start_brightness(&self) -> u8 {
        self.start_brightness
    }

    /// Volume the sunrise ramp ends on.
    pub fn volume_cap(&self) -> Volume {
        self.volume_cap
    }

    /// Color the sunrise ramp ends on.
    pub fn sunrise_color(&self) -> Rgb8 {
        self.sunrise_color
    }

    /// Secondary light color while idle.
    pub fn idle_color(&self) -> Rgb8 {
        self.idle_color
    }
}

impl<D: TimeDuration> Default for SequencerConfig<D> {
    fn default() -> Self {
        SequencerConfigBuilder::new().config
    }
}

/// Builder for [`SequencerConfig`].
#[derive(Debug)]
pub struct SequencerConfigBuilder<D: TimeDuration> {
    config: SequencerConfig<D>,
}

impl<D: TimeDuration> SequencerConfigBuilder<D> {
    /// Creates a builder holding the device defaults.
    pub fn new() -> Self {
        Self {
            config: SequencerConfig {
                wakeup: ModeFeedback {
                    range: SettingRange::new(1, 8),
                    cue_track: 2,
                    fill_color: colors::WAKEUP_MODE,
                    level_color: colors::BLUE,
                },
                red_light: ModeFeedback {
                    range: SettingRange::new(1, 30),
                    cue_track: 3,
                    fill_color: colors::RED_LIGHT_MODE,
                    level_color: colors::RED,
                },
                feedback_volume: 10,
                intro_track: None,
                engage_track: 1,
                idle_color: colors::WHITE,
                alert_color: colors::RED,
                start_brightness: 255,
                brightness_step: 5,
                start_volume: Volume::from_level(15),
                dim_volume_step: Volume::from_tenths(3),
                dwell: D::from_millis(5000),
                rise_volume_step: Volume::from_tenths(2),
                rise_color_step: Srgb::new(5, 1, 0),
                volume_cap: Volume::from_level(10),
                sunrise_color: colors::SUNRISE,
                mode_guard: D::from_millis(500),
                tick_interval: D::from_millis(100),
            },
        }
    }

    /// Sets the wake-up time mode feedback and range.
    pub fn wakeup_mode(mut self, feedback: ModeFeedback) -> Self {
        self.config.wakeup = feedback;
        self
    }

    /// Sets the red-light time mode feedback and range.
    pub fn red_light_mode(mut self, feedback: ModeFeedback) -> Self {
        self.config.red_light = feedback;
        self
    }

    /// Sets the volume of the mode cue tracks.
    pub fn feedback_volume(mut self, volume: u8) -> Self {
        self.config.feedback_volume = volume;
        self
    }

    /// Sets a cue played at the feedback volume just before the engagement
    /// track. `None` (the default) skips it.
    ///
    /// The cue is not waited for: the engagement track follows in the same
    /// tick, so the audio module decides whether the cue is heard.
    pub fn intro_track(mut self, track: Option<u16>) -> Self {
        self.config.intro_track = track;
        self
    }

    /// Sets the track started when pressure engages.
    pub fn engage_track(mut self, track: u16) -> Self {
        self.config.engage_track = track;
        self
    }

    /// Sets the secondary light color while idle.
    pub fn idle_color(mut self, color: Rgb8) -> Self {
        self.config.idle_color = color;
        self
    }

    /// Sets the color the dimming ramp fades out.
    pub fn alert_color(mut self, color: Rgb8) -> Self {
        self.config.alert_color = color;
        self
    }

    /// Sets the dimming ramp: starting brightness and per-tick decrement.
    pub fn dimming(mut self, start_brightness: u8, step: u8) -> Self {
        self.config.start_brightness = start_brightness;
        self.config.brightness_step = step;
        self
    }

    /// Sets the dimming volume: starting volume and per-tick decrement.
    pub fn dimming_volume(mut self, start: Volume, step: Volume) -> Self {
        self.config.start_volume = start;
        self.config.dim_volume_step = step;
        self
    }

    /// Sets the pause between dimming and sunrise.
    pub fn dwell(mut self, dwell: D) -> Self {
        self.config.dwell = dwell;
        self
    }

    /// Sets the sunrise ramp: per-tick volume and color increments, and the
    /// volume that ends it.
    pub fn sunrise(mut self, volume_step: Volume, color_step: Rgb8, volume_cap: Volume) -> Self {
        self.config.rise_volume_step = volume_step;
        self.config.rise_color_step = color_step;
        self.config.volume_cap = volume_cap;
        self
    }

    /// Sets the color forced when the sunrise completes.
    pub fn sunrise_color(mut self, color: Rgb8) -> Self {
        self.config.sunrise_color = color;
        self
    }

    /// Sets the minimum time between accepted mode button presses.
    pub fn mode_guard(mut self, guard: D) -> Self {
        self.config.mode_guard = guard;
        self
    }

    /// Sets the suggested tick period.
    pub fn tick_interval(mut self, interval: D) -> Self {
        self.config.tick_interval = interval;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `InvalidRange` - A mode range has `min > max`
    /// * `ZeroStep` - The brightness or sunrise volume step is zero
    /// * `VolumeOutOfRange` - A volume exceeds [`MAX_VOLUME`]
    pub fn build(self) -> Result<SequencerConfig<D>, ConfigError> {
        let config = self.config;

        for feedback in [&config.wakeup, &config.red_light] {
            if feedback.range.min > feedback.range.max {
                return Err(ConfigError::InvalidRange {
                    range: feedback.range,
                });
            }
        }

        if config.brightness_step == 0 {
            return Err(ConfigError::ZeroStep { ramp: "brightness" });
        }
        if config.rise_volume_step == Volume::ZERO {
            return Err(ConfigError::ZeroStep {
                ramp: "sunrise volume",
            });
        }

        let max = Volume::from_level(MAX_VOLUME);
        for volume in [
            config.start_volume,
            config.volume_cap,
            Volume::from_level(config.feedback_volume),
        ] {
            if volume > max {
                return Err(ConfigError::VolumeOutOfRange { volume });
            }
        }

        Ok(config)
    }
}

impl<D: TimeDuration> Default for SequencerConfigBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
