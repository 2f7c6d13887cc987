//! Debounced access to the mode button, pressure sensor and knob.
//!
//! Digital lines are `embedded-hal` input pins. The knob is read through
//! [`AnalogInput`] since `embedded-hal` 1.0 has no ADC trait. Reads never
//! fail: a pin error reads as low and the knob reading is clamped.

use crate::time::TimeInstant;
use embedded_hal::digital::InputPin;

/// Default full-scale reading of a 10-bit ADC.
pub const DEFAULT_ANALOG_MAX: u16 = 1023;

/// Trait for abstracting an analog input channel.
pub trait AnalogInput {
    /// Returns the raw reading, `0..=self.max_raw()`.
    fn read_raw(&mut self) -> u16;

    /// Full-scale raw reading.
    fn max_raw(&self) -> u16 {
        DEFAULT_ANALOG_MAX
    }
}

/// The stable input values the sequencer consumes each tick.
pub trait SensorInputs<I: TimeInstant> {
    /// Returns true at most once per physical press of the mode button.
    fn mode_button_edge(&mut self, now: I) -> bool;

    /// Returns the current level of the pressure sensor.
    fn pressure_engaged(&mut self) -> bool;

    /// Returns the knob position mapped into `min..=max`.
    fn knob_scaled(&mut self, min: u8, max: u8) -> u8;
}

/// Linearly maps `raw` from `0..=raw_max` into `min..=max`, truncating.
///
/// The result is clamped, so out-of-range readings land on a boundary. An
/// inverted range collapses to `min`.
pub fn scale_reading(raw: u16, raw_max: u16, min: u8, max: u8) -> u8 {
    if max <= min || raw_max == 0 {
        return min;
    }
    let raw = raw.min(raw_max) as u32;
    let span = (max - min) as u32;
    let scaled = raw * span / raw_max as u32 + min as u32;
    (scaled as u8).clamp(min, max)
}

/// Samples the three input channels and debounces the mode button.
///
/// The mode button reports a rising edge only when at least `guard` has
/// passed since the previous accepted press. Bounces inside the guard are
/// swallowed, and holding the button never produces a second edge.
pub struct InputDebouncer<I: TimeInstant, M: InputPin, P: InputPin, K: AnalogInput> {
    mode_pin: M,
    pressure_pin: P,
    knob: K,
    guard: I::Duration,
    mode_high: bool,
    last_press: Option<I>,
}

impl<I: TimeInstant, M: InputPin, P: InputPin, K: AnalogInput> InputDebouncer<I, M, P, K> {
    /// Creates a debouncer over the given channels.
    ///
    /// # Arguments
    /// * `guard` - Minimum time between accepted mode button presses
    pub fn new(mode_pin: M, pressure_pin: P, knob: K, guard: I::Duration) -> Self {
        Self {
            mode_pin,
            pressure_pin,
            knob,
            guard,
            mode_high: false,
            last_press: None,
        }
    }

    /// Returns the raw knob reading, clamped to the channel's full scale.
    pub fn knob_raw(&mut self) -> u16 {
        self.knob.read_raw().min(self.knob.max_raw())
    }
}

impl<I, M, P, K> SensorInputs<I> for InputDebouncer<I, M, P, K>
where
    I: TimeInstant,
    M: InputPin,
    P: InputPin,
    K: AnalogInput,
{
    fn mode_button_edge(&mut self, now: I) -> bool {
        let high = self.mode_pin.is_high().unwrap_or(false);

        if !high {
            self.mode_high = false;
            return false;
        }
        if self.mode_high {
            return false;
        }
        self.mode_high = true;

        let clear = match self.last_press {
            Some(last) => now.has_elapsed(last, self.guard),
            None => true,
        };
        if clear {
            self.last_press = Some(now);
            trace!("mode button press accepted");
        }
        clear
    }

    fn pressure_engaged(&mut self) -> bool {
        self.pressure_pin.is_high().unwrap_or(false)
    }

    fn knob_scaled(&mut self, min: u8, max: u8) -> u8 {
        let raw_max = self.knob.max_raw();
        scale_reading(self.knob.read_raw(), raw_max, min, max)
    }
}
