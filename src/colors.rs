//! 8-bit colors used by the light outputs.
//!
//! Light outputs take `Srgb<u8>` so ramps can step channels by whole units
//! (red +5, green +1 per tick) exactly as the hardware sees them.

use palette::Srgb;

/// An 8-bit sRGB color.
pub type Rgb8 = Srgb<u8>;

pub const OFF: Rgb8 = Srgb::new(0, 0, 0);
pub const WHITE: Rgb8 = Srgb::new(255, 255, 255);
pub const RED: Rgb8 = Srgb::new(255, 0, 0);
pub const BLUE: Rgb8 = Srgb::new(0, 0, 255);

/// Primary fill shown after switching to the wake-up time mode.
pub const WAKEUP_MODE: Rgb8 = Srgb::new(0, 0, 100);

/// Primary fill shown after switching to the red-light time mode.
pub const RED_LIGHT_MODE: Rgb8 = Srgb::new(100, 0, 0);

/// Warm orange the sunrise ramp ends on.
pub const SUNRISE: Rgb8 = Srgb::new(250, 50, 0);

/// Scales every channel of `color` by `brightness / 255`.
#[inline]
pub fn scale(color: Rgb8, brightness: u8) -> Rgb8 {
    let channel = |c: u8| ((c as u16 * brightness as u16) / 255) as u8;
    Srgb::new(channel(color.red), channel(color.green), channel(color.blue))
}

/// Adds `step` to `color` channel by channel, saturating at 255.
#[inline]
pub fn saturating_add(color: Rgb8, step: Rgb8) -> Rgb8 {
    Srgb::new(
        color.red.saturating_add(step.red),
        color.green.saturating_add(step.green),
        color.blue.saturating_add(step.blue),
    )
}

/// Converts an 8-bit color to the 0.0-1.0 float format used by PWM drivers.
#[inline]
pub fn to_float(color: Rgb8) -> Srgb {
    color.into_format()
}
