//! COSMAC VIP hardware emulation.
//!
//! RCA's 1977 hobby computer: a CDP1802 at 1.76 MHz, a CDP1861 video
//! generator stealing DMA cycles for the display, a 16-key hex pad and the
//! Q line on a buzzer. Joseph Weisbecker's CHIP-8 interpreter lived in the
//! bottom 512 bytes of RAM; that image is installed with
//! [`CosmacVip::patch_interpreter`] and runs on the emulated CPU, with the
//! CHIP-8 register file projected out of the interpreter's scratchpad
//! registers. Without an interpreter the machine runs bare 1802 programs.

mod machine;
mod options;

pub use machine::CosmacVip;
pub use options::CosmacVipOptions;
