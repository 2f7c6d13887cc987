//! Shared test infrastructure for wake-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, InputPin};
use palette::Srgb;
use wake_sequencer::{
    AnalogInput, AudioOutput, PixelBus, Rgb8, RgbLed, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Inputs
// ============================================================================

/// Input levels shared between the test body and the mock pins
pub struct Lines {
    pub mode: Cell<bool>,
    pub pressure: Cell<bool>,
    pub knob: Cell<u16>,
}

impl Lines {
    pub fn new() -> Self {
        Self {
            mode: Cell::new(false),
            pressure: Cell::new(false),
            knob: Cell::new(0),
        }
    }
}

/// Digital pin reading a shared level
pub struct MockPin<'a>(pub &'a Cell<bool>);

impl ErrorType for MockPin<'_> {
    type Error = Infallible;
}

impl InputPin for MockPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

/// Digital pin whose reads always fail
pub struct BrokenPin;

#[derive(Debug)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for BrokenPin {
    type Error = PinFault;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }
}

/// 10-bit analog channel reading a shared value
pub struct MockKnob<'a>(pub &'a Cell<u16>);

impl AnalogInput for MockKnob<'_> {
    fn read_raw(&mut self) -> u16 {
        self.0.get()
    }
}

// ============================================================================
// Mock Outputs
// ============================================================================

/// Mock LED that records all color changes for testing
pub struct MockLed {
    current_color: Srgb,
    color_history: heapless::Vec<Srgb, 256>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            current_color: Srgb::new(0.0, 0.0, 0.0),
            color_history: heapless::Vec::new(),
        }
    }

    pub fn get_last_color(&self) -> Srgb {
        self.current_color
    }

    pub fn color_history(&self) -> &[Srgb] {
        &self.color_history
    }
}

impl RgbLed for MockLed {
    fn set_color(&mut self, color: Srgb) {
        self.current_color = color;
        let _ = self.color_history.push(color);
    }
}

/// Mock pixel bus that keeps the last frame written
pub struct MockBus {
    frame: heapless::Vec<Rgb8, 32>,
    writes: usize,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            frame: heapless::Vec::new(),
            writes: 0,
        }
    }

    pub fn frame(&self) -> &[Rgb8] {
        &self.frame
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Number of pixels that are not off
    pub fn lit(&self) -> usize {
        self.frame
            .iter()
            .filter(|pixel| **pixel != Srgb::new(0u8, 0, 0))
            .count()
    }
}

impl PixelBus for MockBus {
    fn write(&mut self, pixels: &[Rgb8]) {
        self.frame.clear();
        let _ = self.frame.extend_from_slice(pixels);
        self.writes += 1;
    }
}

/// Audio commands recorded by [`MockAudio`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Play { track: u16, volume: u8 },
    Volume(u8),
}

/// Mock audio module recording every command
pub struct MockAudio {
    events: heapless::Vec<AudioEvent, 256>,
}

impl MockAudio {
    pub fn new() -> Self {
        Self {
            events: heapless::Vec::new(),
        }
    }

    pub fn events(&self) -> &[AudioEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<AudioEvent> {
        self.events.last().copied()
    }
}

impl AudioOutput for MockAudio {
    fn play_track(&mut self, track: u16, volume: u8) {
        let _ = self.events.push(AudioEvent::Play { track, volume });
    }

    fn set_volume(&mut self, volume: u8) {
        let _ = self.events.push(AudioEvent::Volume(volume));
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}
