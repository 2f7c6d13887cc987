//! Light output capability and its two hardware variants.
//!
//! The sequencer only sees [`LightOutput`]. A single PWM-driven RGB emitter
//! ([`RgbEmitter`]) and an addressable pixel strip ([`PixelStrip`]) both
//! implement it, and [`Light`] picks one of them at runtime so board setup
//! code can choose the variant from configuration.

use crate::colors::{self, Rgb8};
use core::convert::Infallible;
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use palette::Srgb;

/// Stand-in for a device without a brightness indicator LED.
///
/// Accepts every duty cycle and drives nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoIndicator;

impl ErrorType for NoIndicator {
    type Error = Infallible;
}

impl SetDutyCycle for NoIndicator {
    fn max_duty_cycle(&self) -> u16 {
        u8::MAX as u16
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Trait for abstracting a single RGB LED driven by PWM or similar.
///
/// Implement this for your LED hardware (GPIO, PWM, SPI, etc.).
pub trait RgbLed {
    /// Sets the LED to the specified RGB color.
    ///
    /// Color components are in the range 0.0-1.0. Implementations should
    /// convert these to their hardware's native format (e.g., PWM duty cycles).
    /// Handle any hardware errors internally - this method cannot fail.
    fn set_color(&mut self, color: Srgb);
}

/// Trait for pushing a frame of pixel colors to an addressable strip.
pub trait PixelBus {
    /// Writes all pixels in order, starting at the first pixel on the strip.
    fn write(&mut self, pixels: &[Rgb8]);
}

/// Capability the sequencer uses to drive a light source.
///
/// `set_color` may buffer; `show` latches buffered pixels. `show_all`
/// always takes effect immediately.
pub trait LightOutput {
    /// Number of addressable positions. A single emitter reports 1.
    fn pixel_count(&self) -> usize;

    /// Sets the color of one position. Out-of-range indices are ignored.
    fn set_color(&mut self, index: usize, color: Rgb8);

    /// Sets every position to `color` and shows it.
    fn show_all(&mut self, color: Rgb8);

    /// Makes buffered `set_color` writes visible.
    fn show(&mut self) {}
}

/// Displays `value` out of `max` on `light`.
///
/// On a strip the first `value` pixels are lit with `color` and the rest are
/// turned off. A single emitter shows `color` at an intensity proportional
/// to `value / max`.
pub fn show_level<L: LightOutput + ?Sized>(light: &mut L, color: Rgb8, value: u8, max: u8) {
    let count = light.pixel_count();
    if count <= 1 {
        let brightness = if max == 0 {
            u8::MAX
        } else {
            ((value.min(max) as u16 * u8::MAX as u16) / max as u16) as u8
        };
        light.show_all(colors::scale(color, brightness));
        return;
    }

    for index in 0..count {
        let pixel = if index < value as usize { color } else { colors::OFF };
        light.set_color(index, pixel);
    }
    light.show();
}

/// A single RGB emitter driven through an [`RgbLed`].
pub struct RgbEmitter<L: RgbLed> {
    led: L,
    color: Rgb8,
}

impl<L: RgbLed> RgbEmitter<L> {
    /// Wraps `led` and turns it off.
    pub fn new(mut led: L) -> Self {
        led.set_color(colors::to_float(colors::OFF));
        Self {
            led,
            color: colors::OFF,
        }
    }

    /// Returns the color currently displayed.
    pub fn color(&self) -> Rgb8 {
        self.color
    }

    /// Returns the wrapped LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    fn apply(&mut self, color: Rgb8) {
        self.led.set_color(colors::to_float(color));
        self.color = color;
    }
}

impl<L: RgbLed> LightOutput for RgbEmitter<L> {
    fn pixel_count(&self) -> usize {
        1
    }

    fn set_color(&mut self, index: usize, color: Rgb8) {
        if index == 0 {
            self.apply(color);
        }
    }

    fn show_all(&mut self, color: Rgb8) {
        self.apply(color);
    }
}

/// An addressable strip of `N` pixels with a local frame buffer.
pub struct PixelStrip<B: PixelBus, const N: usize> {
    bus: B,
    frame: [Rgb8; N],
}

impl<B: PixelBus, const N: usize> PixelStrip<B, N> {
    /// Wraps `bus` and clears the strip.
    pub fn new(bus: B) -> Self {
        let mut strip = Self {
            bus,
            frame: [colors::OFF; N],
        };
        strip.show();
        strip
    }

    /// Returns the buffered frame.
    pub fn frame(&self) -> &[Rgb8; N] {
        &self.frame
    }

    /// Returns the wrapped bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }
}

impl<B: PixelBus, const N: usize> LightOutput for PixelStrip<B, N> {
    fn pixel_count(&self) -> usize {
        N
    }

    fn set_color(&mut self, index: usize, color: Rgb8) {
        if let Some(pixel) = self.frame.get_mut(index) {
            *pixel = color;
        }
    }

    fn show_all(&mut self, color: Rgb8) {
        self.frame = [color; N];
        self.show();
    }

    fn show(&mut self) {
        self.bus.write(&self.frame);
    }
}

/// Either light variant, chosen at runtime.
pub enum Light<E: LightOutput, S: LightOutput> {
    /// Single RGB emitter.
    Emitter(E),

    /// Multi-pixel strip.
    Strip(S),
}

impl<E: LightOutput, S: LightOutput> LightOutput for Light<E, S> {
    fn pixel_count(&self) -> usize {
        match self {
            Light::Emitter(light) => light.pixel_count(),
            Light::Strip(light) => light.pixel_count(),
        }
    }

    fn set_color(&mut self, index: usize, color: Rgb8) {
        match self {
            Light::Emitter(light) => light.set_color(index, color),
            Light::Strip(light) => light.set_color(index, color),
        }
    }

    fn show_all(&mut self, color: Rgb8) {
        match self {
            Light::Emitter(light) => light.show_all(color),
            Light::Strip(light) => light.show_all(color),
        }
    }

    fn show(&mut self) {
        match self {
            Light::Emitter(light) => light.show(),
            Light::Strip(light) => light.show(),
        }
    }
}
