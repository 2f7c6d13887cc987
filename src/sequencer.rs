//! Alarm sequencer: configuration modes and the pressure-triggered ramps.
//!
//! Provides [`AlarmSequencer`], which owns every piece of mutable device
//! state and advances it one tick per call to [`AlarmSequencer::tick`].
//!
//! Each tick reads the inputs once, then:
//! 1. toggles the [`ConfigurationMode`] on a fresh mode button edge,
//! 2. recomputes the active [`TimedSetting`] from the knob,
//! 3. advances the [`SequencePhase`] from the pressure level.
//!
//! Pressure is level-triggered. Releasing it in any phase other than Idle
//! cancels the ramp and restores the idle baseline in the same tick. The
//! dwell between dimming and sunrise is measured against the time source,
//! so release is noticed at once. Mode and knob changes made from the dwell
//! onwards are recorded silently: the dwell stays dark and muted, and the
//! sunrise is not interrupted by cue tracks.

use crate::audio::{AudioOutput, MAX_VOLUME};
use crate::colors::{self, Rgb8};
use crate::config::SequencerConfig;
use crate::inputs::SensorInputs;
use crate::light::{self, LightOutput, NoIndicator};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{ConfigurationMode, SequencePhase, TimedSetting, Volume};
use embedded_hal::pwm::SetDutyCycle;

/// Output devices plus the last value issued to each.
///
/// The cached values only suppress duplicate writes; no sequencing decision
/// reads them.
struct Outputs<P: LightOutput, S: LightOutput, A: AudioOutput, F: SetDutyCycle> {
    primary: P,
    secondary: S,
    audio: A,
    indicator: F,
    primary_fill: Option<Rgb8>,
    secondary_fill: Option<Rgb8>,
    volume: Option<u8>,
}

impl<P: LightOutput, S: LightOutput, A: AudioOutput, F: SetDutyCycle> Outputs<P, S, A, F> {
    fn fill_primary(&mut self, color: Rgb8) {
        if self.primary_fill != Some(color) {
            self.primary.show_all(color);
            self.primary_fill = Some(color);
        }
    }

    fn fill_secondary(&mut self, color: Rgb8) {
        if self.secondary_fill != Some(color) {
            self.secondary.show_all(color);
            self.secondary_fill = Some(color);
        }
    }

    fn primary_level(&mut self, color: Rgb8, value: u8, max: u8) {
        light::show_level(&mut self.primary, color, value, max);
        self.primary_fill = None;
    }

    fn play(&mut self, track: u16, volume: u8) {
        let volume = volume.min(MAX_VOLUME);
        self.audio.play_track(track, volume);
        self.volume = Some(volume);
    }

    fn set_volume(&mut self, volume: Volume) {
        let level = volume.level().min(MAX_VOLUME);
        if self.volume != Some(level) {
            self.audio.set_volume(level);
            self.volume = Some(level);
        }
    }

    // Indicator errors are ignored, like any other output.
    fn indicate(&mut self, brightness: u8) {
        let _ = self
            .indicator
            .set_duty_cycle_fraction(brightness as u16, u8::MAX as u16);
    }
}

/// Drives a wake-up light from a mode button, a pressure sensor and a knob.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `In` - Input source, usually an [`InputDebouncer`](crate::InputDebouncer)
/// * `P` - Primary light: mode fill and setting level indicator
/// * `S` - Secondary light: idle white, red fade and sunrise
/// * `A` - Audio playback module
/// * `F` - PWM indicator that follows the dimming brightness, if fitted
pub struct AlarmSequencer<'t, I, T, In, P, S, A, F = NoIndicator>
where
    I: TimeInstant,
    T: TimeSource<I>,
    In: SensorInputs<I>,
    P: LightOutput,
    S: LightOutput,
    A: AudioOutput,
    F: SetDutyCycle,
{
    config: SequencerConfig<I::Duration>,
    time_source: &'t T,
    inputs: In,
    outputs: Outputs<P, S, A, F>,
    mode: ConfigurationMode,
    wakeup_time: TimedSetting,
    red_light_time: TimedSetting,
    phase: SequencePhase,
    brightness: u8,
    volume: Volume,
    ramp_color: Rgb8,
    dwell_start: Option<I>,
}

impl<'t, I, T, In, P, S, A> AlarmSequencer<'t, I, T, In, P, S, A, NoIndicator>
where
    I: TimeInstant,
    T: TimeSource<I>,
    In: SensorInputs<I>,
    P: LightOutput,
    S: LightOutput,
    A: AudioOutput,
{
    /// Creates a sequencer in its power-on state.
    ///
    /// The primary light is turned off and the secondary light shows the
    /// idle color. The mode starts at [`ConfigurationMode::SettingWakeupTime`]
    /// and the phase at [`SequencePhase::Idle`].
    pub fn new(
        config: SequencerConfig<I::Duration>,
        time_source: &'t T,
        inputs: In,
        primary: P,
        secondary: S,
        audio: A,
    ) -> Self {
        let mut sequencer = Self {
            time_source,
            inputs,
            outputs: Outputs {
                primary,
                secondary,
                audio,
                indicator: NoIndicator,
                primary_fill: None,
                secondary_fill: None,
                volume: None,
            },
            mode: ConfigurationMode::default(),
            wakeup_time: TimedSetting::new(config.wakeup.range),
            red_light_time: TimedSetting::new(config.red_light.range),
            phase: SequencePhase::Idle,
            brightness: config.start_brightness,
            volume: Volume::ZERO,
            ramp_color: config.idle_color,
            dwell_start: None,
            config,
        };

        sequencer.outputs.fill_primary(colors::OFF);
        sequencer.outputs.fill_secondary(sequencer.config.idle_color);
        info!("sequencer started in {}", sequencer.mode);

        sequencer
    }

    /// Attaches a PWM indicator that tracks the dimming brightness.
    ///
    /// The indicator is switched off here and whenever the sequencer returns
    /// to Idle.
    pub fn with_indicator<F: SetDutyCycle>(
        self,
        mut indicator: F,
    ) -> AlarmSequencer<'t, I, T, In, P, S, A, F> {
        let _ = indicator.set_duty_cycle_fully_off();
        let Outputs {
            primary,
            secondary,
            audio,
            primary_fill,
            secondary_fill,
            volume,
            ..
        } = self.outputs;

        AlarmSequencer {
            config: self.config,
            time_source: self.time_source,
            inputs: self.inputs,
            outputs: Outputs {
                primary,
                secondary,
                audio,
                indicator,
                primary_fill,
                secondary_fill,
                volume,
            },
            mode: self.mode,
            wakeup_time: self.wakeup_time,
            red_light_time: self.red_light_time,
            phase: self.phase,
            brightness: self.brightness,
            volume: self.volume,
            ramp_color: self.ramp_color,
            dwell_start: self.dwell_start,
        }
    }
}

impl<'t, I, T, In, P, S, A, F> AlarmSequencer<'t, I, T, In, P, S, A, F>
where
    I: TimeInstant,
    T: TimeSource<I>,
    In: SensorInputs<I>,
    P: LightOutput,
    S: LightOutput,
    A: AudioOutput,
    F: SetDutyCycle,
{
    /// Runs one iteration of the control loop.
    ///
    /// Returns the phase after this tick.
    pub fn tick(&mut self) -> SequencePhase {
        let now = self.time_source.now();

        if self.inputs.mode_button_edge(now) {
            self.switch_mode();
        }
        self.update_setting();

        let engaged = self.inputs.pressure_engaged();
        self.update_phase(engaged, now);

        self.phase
    }

    fn switch_mode(&mut self) {
        self.mode = self.mode.toggled();
        let feedback = *self.config.feedback(self.mode);
        info!("mode switched to {}", self.mode);

        if !self.phase.shows_feedback() {
            return;
        }
        self.outputs.play(feedback.cue_track, self.config.feedback_volume);
        self.outputs.fill_primary(feedback.fill_color);
    }

    fn update_setting(&mut self) {
        let feedback = *self.config.feedback(self.mode);
        let value = self.inputs.knob_scaled(feedback.range.min, feedback.range.max);

        let setting = match self.mode {
            ConfigurationMode::SettingWakeupTime => &mut self.wakeup_time,
            ConfigurationMode::SettingRedLightTime => &mut self.red_light_time,
        };
        if !setting.update(value) {
            return;
        }

        let value = setting.value();
        info!("{} set to {}", self.mode, value);

        if !self.phase.shows_feedback() {
            return;
        }
        self.outputs
            .primary_level(feedback.level_color, value, feedback.range.max);
    }

    fn update_phase(&mut self, engaged: bool, now: I) {
        if !engaged {
            if self.phase != SequencePhase::Idle {
                self.reset();
            }
            return;
        }

        match self.phase {
            SequencePhase::Idle => {
                self.begin_dimming();
                self.dim(now);
            }
            SequencePhase::Dimming => self.dim(now),
            SequencePhase::Waiting => {
                let dwell_over = self
                    .dwell_start
                    .is_none_or(|start| now.has_elapsed(start, self.config.dwell));
                if dwell_over {
                    self.begin_brightening();
                    self.brighten();
                }
            }
            SequencePhase::Brightening => self.brighten(),
            SequencePhase::Done => {}
        }
    }

    fn begin_dimming(&mut self) {
        info!("pressure engaged: dimming");
        self.phase = SequencePhase::Dimming;
        self.brightness = self.config.start_brightness;
        self.volume = self.config.start_volume;
        self.ramp_color = self.config.alert_color;

        if let Some(track) = self.config.intro_track {
            self.outputs.play(track, self.config.feedback_volume);
        }
        self.outputs
            .play(self.config.engage_track, self.volume.level());
        self.outputs.fill_secondary(self.ramp_color);
        self.outputs.fill_primary(colors::OFF);
    }

    fn dim(&mut self, now: I) {
        self.brightness = self.brightness.saturating_sub(self.config.brightness_step);
        self.volume = self.volume.saturating_sub(self.config.dim_volume_step);
        self.ramp_color = colors::scale(self.config.alert_color, self.brightness);
        debug!("dimming: brightness {}, volume {}", self.brightness, self.volume);

        self.outputs.fill_secondary(self.ramp_color);
        self.outputs.set_volume(self.volume);
        self.outputs.indicate(self.brightness);

        if self.brightness == 0 {
            self.volume = Volume::ZERO;
            self.ramp_color = colors::OFF;
            self.outputs.set_volume(self.volume);
            self.outputs.fill_secondary(self.ramp_color);

            self.dwell_start = Some(now);
            self.phase = SequencePhase::Waiting;
            info!("dimming complete: waiting {} ms", self.config.dwell.as_millis());
        }
    }

    fn begin_brightening(&mut self) {
        info!("dwell over: brightening");
        self.phase = SequencePhase::Brightening;
        self.dwell_start = None;
        self.volume = Volume::ZERO;
        self.ramp_color = colors::OFF;
    }

    fn brighten(&mut self) {
        self.volume = self.volume.saturating_add(self.config.rise_volume_step);
        self.ramp_color = colors::saturating_add(self.ramp_color, self.config.rise_color_step);

        if self.volume >= self.config.volume_cap {
            self.volume = self.config.volume_cap;
            self.ramp_color = self.config.sunrise_color;
            self.phase = SequencePhase::Done;
            info!("sunrise complete at volume {}", self.volume);
        } else {
            debug!(
                "brightening: volume {}, red {}, green {}",
                self.volume,
                self.ramp_color.red,
                self.ramp_color.green
            );
        }

        self.outputs.fill_secondary(self.ramp_color);
        self.outputs.set_volume(self.volume);
    }

    fn reset(&mut self) {
        if self.phase.is_active() {
            info!("pressure released during {}: ramp cancelled", self.phase);
        } else {
            info!("pressure released");
        }

        self.phase = SequencePhase::Idle;
        self.dwell_start = None;
        self.brightness = self.config.start_brightness;
        self.volume = Volume::ZERO;
        self.ramp_color = self.config.idle_color;

        self.outputs.fill_secondary(self.ramp_color);
        self.outputs.set_volume(self.volume);
        self.outputs.fill_primary(colors::OFF);
        self.outputs.indicate(0);
    }

    /// Returns the active configuration mode.
    pub fn mode(&self) -> ConfigurationMode {
        self.mode
    }

    /// Returns the current sequence phase.
    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    /// Returns the configured wake-up time.
    pub fn wakeup_time(&self) -> u8 {
        self.wakeup_time.value()
    }

    /// Returns the configured red-light time.
    pub fn red_light_time(&self) -> u8 {
        self.red_light_time.value()
    }

    /// Returns the dimming brightness.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Returns the ramp volume.
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Returns the color of the secondary light.
    pub fn secondary_color(&self) -> Rgb8 {
        self.ramp_color
    }

    /// Returns the time left in the dwell, if waiting.
    pub fn dwell_remaining(&self) -> Option<I::Duration> {
        self.dwell_start.map(|start| {
            let elapsed = self.time_source.now().duration_since(start);
            self.config.dwell.saturating_sub(elapsed)
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SequencerConfig<I::Duration> {
        &self.config
    }

    /// Returns the primary light.
    pub fn primary(&self) -> &P {
        &self.outputs.primary
    }

    /// Returns the secondary light.
    pub fn secondary(&self) -> &S {
        &self.outputs.secondary
    }

    /// Returns the audio module.
    pub fn audio(&self) -> &A {
        &self.outputs.audio
    }

    /// Returns the brightness indicator.
    pub fn indicator(&self) -> &F {
        &self.outputs.indicator
    }
}
