//! ADSR envelope generator.
//!
//! Phase durations come from 4-bit time indices on an exponential scale;
//! the per-sample deltas are resolved once, when the voice parameters are
//! updated, so `next()` is branch-plus-multiply only. A note-on arriving
//! while a phase is active halves the current level and restarts the
//! envelope through Idle (retrigger click suppression).

/// Envelope phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Map a 4-bit time index to seconds: exponential from 2 ms to 8 s.
#[must_use]
pub fn envelope_time(index: u8) -> f32 {
    (2.0_f32.powf(f32::from(index) / 1.5 - 6.0) / 2.0).clamp(0.002, 8.0)
}

/// ADSR envelope for one voice.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    /// 4-bit sustain level (0–15).
    pub sustain: u8,
    phase: Phase,
    step: i32,
    attack_steps: i32,
    decay_steps: i32,
    release_steps: i32,
    attack_delta: f32,
    decay_delta: f32,
    release_delta: f32,
    note_on: bool,
    note_off: bool,
}

impl Envelope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the per-sample deltas for the given 4-bit ADSR indices.
    ///
    /// `step_time` is the output sample period in seconds. Decay and
    /// release run at a third of the attack slope scale.
    pub fn configure(&mut self, attack: u8, decay: u8, sustain: u8, release: u8, step_time: f32) {
        self.sustain = sustain & 0x0F;
        let sustain_level = f32::from(self.sustain) / 15.0;

        let steps = envelope_time(attack & 0x0F) / step_time;
        self.attack_steps = steps as i32;
        self.attack_delta = 1.0 / steps;

        let steps = envelope_time(decay & 0x0F) * 3.0 / step_time;
        self.decay_steps = steps as i32;
        self.decay_delta = (1.0 - sustain_level) / steps;

        let steps = envelope_time(release & 0x0F) * 3.0 / step_time;
        self.release_steps = steps as i32;
        self.release_delta = sustain_level / steps;
    }

    /// Flag a note-on; takes effect on the next `next()` call.
    pub fn trigger(&mut self) {
        self.note_on = true;
    }

    /// Flag a note-off; starts the release phase from sustain.
    pub fn gate_off(&mut self) {
        self.note_off = true;
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Advance one sample and return the envelope level (0.0–1.0).
    pub fn next(&mut self) -> f32 {
        let sustain_level = f32::from(self.sustain) / 15.0;
        match self.phase {
            Phase::Idle => {
                self.note_off = false;
                if self.note_on {
                    self.note_on = false;
                    self.step = 0;
                    self.phase = Phase::Attack;
                }
                0.0
            }
            Phase::Attack => {
                let value = self.step as f32 * self.attack_delta;
                if self.note_on {
                    self.phase = Phase::Idle;
                    value / 2.0
                } else {
                    if self.step >= self.attack_steps {
                        self.step = 0;
                        self.phase = Phase::Decay;
                    } else {
                        self.step += 1;
                    }
                    value
                }
            }
            Phase::Decay => {
                let value = 1.0 - self.step as f32 * self.decay_delta;
                if self.note_on {
                    self.phase = Phase::Idle;
                    value / 2.0
                } else {
                    if self.step >= self.decay_steps {
                        self.phase = Phase::Sustain;
                    } else {
                        self.step += 1;
                    }
                    value
                }
            }
            Phase::Sustain => {
                if self.note_on {
                    self.phase = Phase::Idle;
                    sustain_level / 2.0
                } else {
                    if self.note_off {
                        self.note_off = false;
                        self.step = 0;
                        self.phase = Phase::Release;
                    }
                    sustain_level
                }
            }
            Phase::Release => {
                let value = (sustain_level - self.step as f32 * self.release_delta).max(0.0);
                if self.note_on {
                    self.phase = Phase::Idle;
                    return value / 2.0;
                }
                if self.step >= self.release_steps {
                    self.phase = Phase::Idle;
                } else {
                    self.step += 1;
                }
                value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 44_100.0;

    #[test]
    fn time_scale_is_clamped() {
        assert!((envelope_time(0) - 0.002).abs() < 1e-6);
        assert!((envelope_time(15) - 8.0).abs() < 1e-6);
        assert!(envelope_time(8) > envelope_time(4));
    }

    #[test]
    fn attack_reaches_full_then_decays_to_sustain() {
        let mut env = Envelope::new();
        env.configure(0, 0, 8, 0, STEP);
        env.trigger();
        assert_eq!(env.next(), 0.0); // Idle consumes the trigger

        let mut peak = 0.0_f32;
        for _ in 0..2000 {
            peak = peak.max(env.next());
        }
        assert!(peak > 0.95);
        // decay index 0 is short too; we must settle at sustain
        for _ in 0..2000 {
            env.next();
        }
        assert_eq!(env.phase(), Phase::Sustain);
        assert!((env.next() - 8.0 / 15.0).abs() < 1e-6);
    }

    #[test]
    fn release_returns_to_idle() {
        let mut env = Envelope::new();
        env.configure(0, 0, 15, 0, STEP);
        env.trigger();
        for _ in 0..2000 {
            env.next();
        }
        env.gate_off();
        for _ in 0..2000 {
            env.next();
        }
        assert_eq!(env.phase(), Phase::Idle);
        assert_eq!(env.next(), 0.0);
    }

    #[test]
    fn retrigger_halves_level_and_restarts() {
        let mut env = Envelope::new();
        env.configure(4, 4, 15, 4, STEP);
        env.trigger();
        env.next();
        for _ in 0..500 {
            env.next();
        }
        let before = env.next();
        env.trigger();
        let halved = env.next();
        assert!((halved - before / 2.0).abs() < 0.01);
        assert_eq!(env.phase(), Phase::Idle);
        // the pending trigger restarts the attack on the next sample
        env.next();
        assert_eq!(env.phase(), Phase::Attack);
    }
}
