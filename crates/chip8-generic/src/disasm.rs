//! CHIP-8 family disassembler.
//!
//! Decodes the superset of all supported variants, so an opcode that is only
//! valid on some bases still renders. Unknown patterns come back as raw data
//! words. Two opcodes are four bytes long (XO-CHIP `LD I, #nnnn` and the
//! MegaChip `LDHI`), everything else is two.

use chip8_core::Disassembled;

fn one(text: impl Into<String>) -> Disassembled {
    Disassembled { size: 2, text: text.into() }
}

fn long(text: String) -> Disassembled {
    Disassembled { size: 4, text }
}

#[must_use]
#[allow(clippy::too_many_lines)]
pub fn disassemble(code: &[u8; 4]) -> Disassembled {
    let opcode = (u16::from(code[0]) << 8) | u16::from(code[1]);
    let word = (u16::from(code[2]) << 8) | u16::from(code[3]);
    let x = (opcode >> 8) & 0xF;
    let y = (opcode >> 4) & 0xF;
    let n = opcode & 0xF;
    let nn = opcode & 0xFF;
    let nnn = opcode & 0xFFF;
    match opcode & 0xF000 {
        0x0000 => match opcode {
            0x0010 => one("MEGAOFF"),
            0x0011 => one("MEGAON"),
            0x00B0..=0x00BF => one(format!("SCRU {n:X}")),
            0x00C0..=0x00CF => one(format!("SCRD {n:X}")),
            0x00D0..=0x00DF => one(format!("SCRU {n:X}")),
            0x00E0 => one("CLS"),
            0x00ED => one("HALT"),
            0x00EE => one("RET"),
            0x00FB => one("SCRR"),
            0x00FC => one("SCRL"),
            0x00FD => one("EXIT"),
            0x00FE => one("LOW"),
            0x00FF => one("HIGH"),
            0x0100..=0x01FF => long(format!("LDHI I, #${nn:02X}{word:04X}")),
            0x02A0 => one("STEPCOL"),
            0x0200..=0x02FF => one(format!("LDPAL {nn}")),
            0x0300..=0x03FF => one(format!("SPRW {nn}")),
            0x0400..=0x04FF => one(format!("SPRH {nn}")),
            0x0500..=0x05FF => one(format!("ALPHA {nn}")),
            0x0600..=0x060F => one(format!("DIGISND {n:X}")),
            0x0700 => one("STOPSND"),
            0x0800..=0x080F => one(format!("BMODE {n:X}")),
            0x0900..=0x09FF => one(format!("CCOL {nn}")),
            _ => one(format!("DW #${opcode:04X}")),
        },
        0x1000 => one(format!("JP ${nnn:03X}")),
        0x2000 => one(format!("CALL ${nnn:03X}")),
        0x3000 => one(format!("SE V{x:X}, #${nn:02X}")),
        0x4000 => one(format!("SNE V{x:X}, #${nn:02X}")),
        0x5000 => match n {
            0 => one(format!("SE V{x:X}, V{y:X}")),
            1 => one(format!("SGT V{x:X}, V{y:X}")),
            2 => one(format!("LD [I], V{x:X}-V{y:X}")),
            3 => one(format!("LD V{x:X}-V{y:X}, [I]")),
            _ => one(format!("DW #${opcode:04X}")),
        },
        0x6000 => one(format!("LD V{x:X}, #${nn:02X}")),
        0x7000 => one(format!("ADD V{x:X}, #${nn:02X}")),
        0x8000 => match n {
            0x0 => one(format!("LD V{x:X}, V{y:X}")),
            0x1 => one(format!("OR V{x:X}, V{y:X}")),
            0x2 => one(format!("AND V{x:X}, V{y:X}")),
            0x3 => one(format!("XOR V{x:X}, V{y:X}")),
            0x4 => one(format!("ADD V{x:X}, V{y:X}")),
            0x5 => one(format!("SUB V{x:X}, V{y:X}")),
            0x6 => one(format!("SHR V{x:X}, V{y:X}")),
            0x7 => one(format!("SUBN V{x:X}, V{y:X}")),
            0xE => one(format!("SHL V{x:X}, V{y:X}")),
            _ => one(format!("DW #${opcode:04X}")),
        },
        0x9000 => match n {
            0 => one(format!("SNE V{x:X}, V{y:X}")),
            _ => one(format!("DW #${opcode:04X}")),
        },
        0xA000 => one(format!("LD I, ${nnn:03X}")),
        0xB000 => one(format!("JP V0, ${nnn:03X}")),
        0xC000 => one(format!("RND V{x:X}, #${nn:02X}")),
        0xD000 => one(format!("DRW V{x:X}, V{y:X}, {n:X}")),
        0xE000 => match nn {
            0x9E => one(format!("SKP V{x:X}")),
            0xA1 => one(format!("SKNP V{x:X}")),
            0xF2 => one(format!("SKP2 V{x:X}")),
            0xF5 => one(format!("SKNP2 V{x:X}")),
            _ => one(format!("DW #${opcode:04X}")),
        },
        0xF000 => match nn {
            0x00 if x == 0 => long(format!("LD I, #${word:04X}")),
            0x01 => one(format!("PLANES {x:X}")),
            0x02 if x == 0 => one("AUDIO"),
            0x07 => one(format!("LD V{x:X}, DT")),
            0x0A => one(format!("LD V{x:X}, K")),
            0x15 => one(format!("LD DT, V{x:X}")),
            0x18 => one(format!("LD ST, V{x:X}")),
            0x1B => one(format!("SKIP V{x:X}")),
            0x1E => one(format!("ADD I, V{x:X}")),
            0x29 => one(format!("LD F, V{x:X}")),
            0x30 => one(format!("LD HF, V{x:X}")),
            0x33 => one(format!("BCD V{x:X}")),
            0x3A => one(format!("PITCH V{x:X}")),
            0x4F => one(format!("WAITDT V{x:X}")),
            0x55 => one(format!("LD [I], V{x:X}")),
            0x65 => one(format!("LD V{x:X}, [I]")),
            0x75 => one(format!("LD R, V{x:X}")),
            0x85 => one(format!("LD V{x:X}, R")),
            0xF8 => one(format!("LD TONE, V{x:X}")),
            _ => one(format!("DW #${opcode:04X}")),
        },
        _ => one(format!("DW #${opcode:04X}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: [u8; 4]) -> String {
        disassemble(&bytes).text
    }

    #[test]
    fn classic_opcodes() {
        assert_eq!(text([0x00, 0xE0, 0, 0]), "CLS");
        assert_eq!(text([0x12, 0x34, 0, 0]), "JP $234");
        assert_eq!(text([0x8A, 0xB4, 0, 0]), "ADD VA, VB");
        assert_eq!(text([0xD1, 0x25, 0, 0]), "DRW V1, V2, 5");
        assert_eq!(text([0xF3, 0x33, 0, 0]), "BCD V3");
    }

    #[test]
    fn four_byte_opcodes_report_their_size() {
        let long_load = disassemble(&[0xF0, 0x00, 0x0A, 0xBC]);
        assert_eq!(long_load.size, 4);
        assert_eq!(long_load.text, "LD I, #$0ABC");

        let ldhi = disassemble(&[0x01, 0x10, 0x20, 0x00]);
        assert_eq!(ldhi.size, 4);
        assert_eq!(ldhi.text, "LDHI I, #$102000");
    }

    #[test]
    fn unknown_patterns_fall_back_to_data_words() {
        assert_eq!(text([0xFF, 0xFF, 0, 0]), "DW #$FFFF");
        assert_eq!(disassemble(&[0xFF, 0xFF, 0, 0]).size, 2);
        assert_eq!(text([0x58, 0x94, 0, 0]), "DW #$5894");
    }
}
