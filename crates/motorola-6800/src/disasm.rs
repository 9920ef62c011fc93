//! M6800 disassembler, driven by the opcode table.

use chip8_core::Disassembled;

use crate::opcodes::{Accu, AddrMode, opcode_info};

fn byte_at(code: &[u8], index: usize) -> u8 {
    code.get(index).copied().unwrap_or(0)
}

/// Disassemble the instruction at the start of `code`; `addr` is the
/// instruction's address, needed to resolve relative branch targets.
#[must_use]
pub fn disassemble(code: &[u8], addr: u16) -> Disassembled {
    let info = opcode_info(byte_at(code, 0));
    let mn = info.mnemonic;
    let accu = match info.accu {
        Accu::A => "A",
        Accu::B => "B",
        Accu::None => "",
    };
    match info.mode {
        AddrMode::Inherent => Disassembled { size: 1, text: format!("{mn}{accu}") },
        AddrMode::Immediate => {
            Disassembled { size: 2, text: format!("{mn}{accu} #${:02X}", byte_at(code, 1)) }
        }
        AddrMode::Immediate16 => {
            let value = (u16::from(byte_at(code, 1)) << 8) | u16::from(byte_at(code, 2));
            Disassembled { size: 3, text: format!("{mn}{accu} #${value:04X}") }
        }
        AddrMode::Direct => {
            Disassembled { size: 2, text: format!("{mn}{accu} ${:02X}", byte_at(code, 1)) }
        }
        AddrMode::Extended => {
            let target = (u16::from(byte_at(code, 1)) << 8) | u16::from(byte_at(code, 2));
            Disassembled { size: 3, text: format!("{mn}{accu} ${target:04X}") }
        }
        AddrMode::Relative => {
            let offset = i16::from(byte_at(code, 1) as i8);
            let target = addr.wrapping_add(2).wrapping_add(offset as u16);
            Disassembled { size: 2, text: format!("{mn}  ${target:02X}") }
        }
        AddrMode::Indexed => {
            Disassembled { size: 2, text: format!("{mn}{accu} ${:02X},X", byte_at(code, 1)) }
        }
        AddrMode::Invalid => Disassembled { size: 1, text: "???".into() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_addressing_mode() {
        assert_eq!(disassemble(&[0x01], 0).text, "NOP");
        assert_eq!(disassemble(&[0x86, 0x42], 0).text, "LDAA #$42");
        assert_eq!(disassemble(&[0xCE, 0x12, 0x34], 0).text, "LDX #$1234");
        assert_eq!(disassemble(&[0xD7, 0x40], 0).text, "STAB $40");
        assert_eq!(disassemble(&[0xB6, 0x01, 0x40], 0).text, "LDAA $0140");
        assert_eq!(disassemble(&[0xA7, 0x10], 0).text, "STAA $10,X");
        assert_eq!(disassemble(&[0x20, 0xFE], 0x0200).text, "BRA  $200");
        assert_eq!(disassemble(&[0x02], 0).size, 1);
    }

    #[test]
    fn relative_target_wraps() {
        // branch backwards across the address space
        let d = disassemble(&[0x20, 0x80], 0x0000);
        assert_eq!(d.text, "BRA  $FF82");
    }
}
