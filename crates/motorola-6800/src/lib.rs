//! Cycle-exact Motorola M6800 CPU emulator.
//!
//! Cycle counting happens through the bus: every instruction performs its
//! real and passive (VMA=0) bus accesses at the cycle positions of the
//! physical CPU, one access per cycle, so peripherals that watch the bus
//! (like the DREAM6800's VDG) see accurate timing. Passive accesses arrive
//! as `dummy_read` calls.

mod cpu;
mod disasm;
mod flags;
mod opcodes;

pub use cpu::{M6800, M6800Bus, M6800State};
pub use disasm::disassemble;
pub use flags::{C, H, I, N, V, Z};
pub use opcodes::{Accu, AddrMode, Op, OpcodeInfo, opcode_info};
