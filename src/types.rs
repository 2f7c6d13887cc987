//! Core types shared by the inputs and the sequencer.

/// Which timed setting the knob currently adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigurationMode {
    /// Knob sets the wake-up time.
    #[default]
    SettingWakeupTime,

    /// Knob sets the red-light time.
    SettingRedLightTime,
}

impl ConfigurationMode {
    /// Returns the other mode.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            ConfigurationMode::SettingWakeupTime => ConfigurationMode::SettingRedLightTime,
            ConfigurationMode::SettingRedLightTime => ConfigurationMode::SettingWakeupTime,
        }
    }
}

/// Phase of the pressure-triggered dimming and wake-ramp pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencePhase {
    /// Pressure released. Lights and audio at their idle baseline.
    #[default]
    Idle,

    /// Brightness and volume ramping down from their starting values.
    Dimming,

    /// Lights off and audio muted for the dwell period.
    Waiting,

    /// Sunrise ramp: volume and warm color ramping up.
    Brightening,

    /// Sunrise reached. Final values held until pressure is released.
    Done,
}

impl SequencePhase {
    /// Returns true while a ramp or dwell is in progress.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            SequencePhase::Dimming | SequencePhase::Waiting | SequencePhase::Brightening
        )
    }

    /// Returns true if mode and setting changes get light and audio feedback.
    ///
    /// From the dwell onwards the device is unattended: changes are still
    /// recorded but nothing is shown or played until pressure is released.
    pub fn shows_feedback(self) -> bool {
        matches!(self, SequencePhase::Idle | SequencePhase::Dimming)
    }
}

/// Inclusive bounds of a knob-derived setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingRange {
    /// Smallest value.
    pub min: u8,

    /// Largest value.
    pub max: u8,
}

impl SettingRange {
    /// Creates a range. Validity (`min <= max`) is checked by the config builder.
    #[inline]
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Clamps `value` into the range.
    #[inline]
    pub fn clamp(self, value: u8) -> u8 {
        value.max(self.min).min(self.max)
    }
}

/// A knob-derived value that only changes when the mapped reading changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimedSetting {
    value: u8,
    range: SettingRange,
}

impl TimedSetting {
    /// Creates a setting holding the range minimum.
    pub fn new(range: SettingRange) -> Self {
        Self {
            value: range.min,
            range,
        }
    }

    /// Returns the current value.
    #[inline]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Stores `candidate` clamped to the range.
    ///
    /// Returns true only if the stored value changed.
    pub fn update(&mut self, candidate: u8) -> bool {
        let candidate = self.range.clamp(candidate);
        if candidate == self.value {
            return false;
        }
        self.value = candidate;
        true
    }
}

/// Fixed-point volume in tenths of a level.
///
/// Ramps step by fractions of a level (0.3 down, 0.2 up). Keeping them in
/// tenths makes every ramp land exactly on its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Volume(u16);

impl Volume {
    /// Silence.
    pub const ZERO: Self = Volume(0);

    /// Creates a volume from tenths of a level.
    #[inline]
    pub const fn from_tenths(tenths: u16) -> Self {
        Volume(tenths)
    }

    /// Creates a volume from a whole level.
    #[inline]
    pub const fn from_level(level: u8) -> Self {
        Volume(level as u16 * 10)
    }

    /// Returns the whole level sent to the audio module (truncated).
    #[inline]
    pub fn level(self) -> u8 {
        (self.0 / 10).min(u8::MAX as u16) as u8
    }

    /// Subtracts `step`, flooring at zero.
    #[inline]
    pub fn saturating_sub(self, step: Volume) -> Self {
        Volume(self.0.saturating_sub(step.0))
    }

    /// Adds `step`, saturating at the representable maximum.
    #[inline]
    pub fn saturating_add(self, step: Volume) -> Self {
        Volume(self.0.saturating_add(step.0))
    }
}

impl core::fmt::Display for Volume {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}
