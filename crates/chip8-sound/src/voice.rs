//! Voice oscillator and parameter block parsing.

#![allow(clippy::cast_possible_truncation)]

use crate::envelope::Envelope;

const PI: f32 = std::f32::consts::PI;

/// Oscillator waveform, selected by the top 3 bits of parameter byte 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    None,
    Sine,
    Pulse,
    Saw,
    Noise,
}

impl Waveform {
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 7 {
            1 => Self::Sine,
            2 => Self::Pulse,
            3 => Self::Saw,
            4 => Self::Noise,
            _ => Self::None,
        }
    }
}

/// One synthesizer voice.
///
/// Parameters arrive as a 7-byte block:
/// tone, pulse width, waveform(3)/control(5), attack(4)/decay(4),
/// sustain(4)/release(4), filter cutoff, filter(4)/resonance(4).
#[derive(Debug, Clone, Default)]
pub struct Voice {
    pub tone: u8,
    pub pulse_width: u8,
    pub waveform: Waveform,
    pub control: u8,
    pub cutoff: u8,
    pub filter: u8,
    pub resonance: u8,
    pub envelope: Envelope,
    frequency: f32,
    sample_length: f32,
    phase: f32,
    noise_acc: i32,
}

impl Voice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a 7-byte parameter block, reset the oscillator and retrigger
    /// the envelope.
    ///
    /// `step_time` is the output sample period in seconds.
    pub fn update_parameters(&mut self, data: &[u8; 7], step_time: f32) {
        self.tone = data[0];
        self.pulse_width = data[1];
        self.waveform = Waveform::from_bits(data[2] >> 5);
        self.control = data[2] & 0x1F;
        self.cutoff = data[5];
        self.filter = data[6] >> 4;
        self.resonance = data[6] & 0x0F;

        // TODO: derive the oscillator frequency from the tone byte
        self.frequency = 440.0;
        self.phase = 0.0;
        self.sample_length = self.frequency * step_time;

        self.envelope
            .configure(data[3] >> 4, data[3] & 0x0F, data[4] >> 4, data[4] & 0x0F, step_time);
        self.envelope.trigger();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.frequency > 0.1
    }

    /// Advance the oscillator one sample and return waveform × envelope.
    pub fn next_sample(&mut self, noise_table: &[i16; 0x10000]) -> f32 {
        self.noise_acc = (self.noise_acc + self.frequency as i32) & 0x0FFF_FFFF;
        let value = self.waveform_value(noise_table) * self.envelope.next();

        self.phase += self.sample_length;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        value
    }

    fn waveform_value(&self, noise_table: &[i16; 0x10000]) -> f32 {
        match self.waveform {
            Waveform::None => 0.0,
            Waveform::Sine => (2.0 * PI * self.phase).sin(),
            Waveform::Pulse => {
                if self.phase <= f32::from(self.pulse_width) / 256.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Saw => 2.0 * (self.phase - (self.phase + 0.5).floor()),
            Waveform::Noise => {
                f32::from(noise_table[((self.noise_acc >> 12) & 0xFFFF) as usize]) / 32768.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_block_unpacks_fields() {
        let mut voice = Voice::new();
        // waveform 2 (pulse) in top 3 bits, control 0x15 in low 5
        let block = [0x45, 0x80, (2 << 5) | 0x15, 0x3C, 0xF0, 0x22, 0x4B];
        voice.update_parameters(&block, 1.0 / 44_100.0);

        assert_eq!(voice.tone, 0x45);
        assert_eq!(voice.pulse_width, 0x80);
        assert_eq!(voice.waveform, Waveform::Pulse);
        assert_eq!(voice.control, 0x15);
        assert_eq!(voice.envelope.sustain, 0x0F);
        assert_eq!(voice.cutoff, 0x22);
        assert_eq!(voice.filter, 4);
        assert_eq!(voice.resonance, 0x0B);
        assert!(voice.is_active());
    }

    #[test]
    fn pulse_waveform_follows_pulse_width() {
        let mut voice = Voice::new();
        voice.pulse_width = 128; // 50% duty
        voice.waveform = Waveform::Pulse;
        voice.phase = 0.25;
        let table = [0i16; 0x10000];
        assert!(voice.waveform_value(&table) > 0.0);
        voice.phase = 0.75;
        assert!(voice.waveform_value(&table) < 0.0);
    }
}
