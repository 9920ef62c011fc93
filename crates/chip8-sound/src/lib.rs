//! Four-voice programmable synthesizer.
//!
//! CHIP-8X style sound extensions expose four voices, each programmed by a
//! 7-byte parameter block (tone, pulse width, waveform/control, ADSR, filter
//! settings). Each voice runs a phase-accumulator oscillator with four
//! waveforms and an ADSR envelope; the mix is clamped to a signed 16-bit
//! sample. Noise comes from a 64 K table filled once by an LCG, indexed by a
//! 28-bit per-voice phase accumulator.

#![allow(clippy::cast_possible_truncation)]

mod envelope;
mod voice;

pub use envelope::{Envelope, Phase, envelope_time};
pub use voice::{Voice, Waveform};

/// Noise LCG parameters and power-on state.
const NOISE_SEED: i32 = 0x007F_FFF8;
const NOISE_MUL: i32 = 196_314_165;
const NOISE_ADD: i32 = 907_633_515;

/// Four-voice synthesizer producing mono i16 samples.
pub struct ChipSound {
    voices: [Voice; 4],
    noise_table: Box<[i16; 0x10000]>,
    step_time: f32,
    sample: i16,
}

impl ChipSound {
    /// Create a synthesizer producing samples at `sample_rate` Hz.
    #[must_use]
    pub fn new(sample_rate: u32) -> Self {
        let mut noise_table = Box::new([0i16; 0x10000]);
        let mut state = NOISE_SEED;
        for entry in noise_table.iter_mut() {
            state = state.wrapping_mul(NOISE_MUL).wrapping_add(NOISE_ADD);
            *entry = state as i16;
        }
        Self {
            voices: [Voice::new(), Voice::new(), Voice::new(), Voice::new()],
            noise_table,
            step_time: 1.0 / sample_rate as f32,
            sample: 0,
        }
    }

    /// Program voice `voice_id & 3` from a 7-byte parameter block and
    /// retrigger its envelope.
    pub fn update_parameters(&mut self, voice_id: u8, data: &[u8; 7]) {
        self.voices[(voice_id & 3) as usize].update_parameters(data, self.step_time);
    }

    /// Release a voice's envelope (note off).
    pub fn gate_off(&mut self, voice_id: u8) {
        self.voices[(voice_id & 3) as usize].envelope.gate_off();
    }

    #[must_use]
    pub fn voice(&self, voice_id: u8) -> &Voice {
        &self.voices[(voice_id & 3) as usize]
    }

    /// Advance all voices one sample and mix.
    pub fn next_sample(&mut self) {
        let mut mix = 0.0_f32;
        for voice in &mut self.voices {
            if voice.is_active() {
                mix += voice.next_sample(&self.noise_table) / 2.0;
            }
        }
        self.sample = (mix.clamp(-1.0, 1.0) * 32767.0) as i16;
    }

    /// The most recent mixed sample.
    #[must_use]
    pub fn sample(&self) -> i16 {
        self.sample
    }

    /// Fill a buffer with mixed samples.
    pub fn render(&mut self, samples: &mut [i16]) {
        for out in samples {
            self.next_sample();
            *out = self.sample;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_until_programmed() {
        let mut sound = ChipSound::new(44_100);
        let mut buffer = [0i16; 256];
        sound.render(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0));
    }

    #[test]
    fn programmed_voice_produces_output() {
        let mut sound = ChipSound::new(44_100);
        // pulse waveform, fast attack, full sustain
        sound.update_parameters(0, &[0x40, 0x80, 2 << 5, 0x00, 0xF0, 0, 0]);
        let mut buffer = [0i16; 4096];
        sound.render(&mut buffer);
        assert!(buffer.iter().any(|&s| s != 0));
    }

    #[test]
    fn noise_table_is_deterministic() {
        let a = ChipSound::new(44_100);
        let b = ChipSound::new(44_100);
        assert_eq!(a.noise_table[..64], b.noise_table[..64]);
        assert!(a.noise_table.iter().any(|&s| s != 0));
    }
}
