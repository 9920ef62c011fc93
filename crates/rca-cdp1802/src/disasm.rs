//! CDP1802 disassembler, using the standard COSMAC mnemonics.

use chip8_core::Disassembled;

fn byte_at(code: &[u8], index: usize) -> u8 {
    code.get(index).copied().unwrap_or(0)
}

fn one(text: impl Into<String>) -> Disassembled {
    Disassembled { size: 1, text: text.into() }
}

fn two(code: &[u8], mnemonic: &str) -> Disassembled {
    Disassembled { size: 2, text: format!("{mnemonic} 0x{:02X}", byte_at(code, 1)) }
}

fn two_imm(code: &[u8], mnemonic: &str) -> Disassembled {
    Disassembled { size: 2, text: format!("{mnemonic} #0x{:02X}", byte_at(code, 1)) }
}

fn three(code: &[u8], mnemonic: &str) -> Disassembled {
    let target = (u16::from(byte_at(code, 1)) << 8) | u16::from(byte_at(code, 2));
    Disassembled { size: 3, text: format!("{mnemonic} 0x{target:04X}") }
}

/// Disassemble the instruction at the start of `code`.
#[must_use]
pub fn disassemble(code: &[u8]) -> Disassembled {
    let opcode = byte_at(code, 0);
    let n = opcode & 0xF;
    match opcode {
        0x00 => one("IDL"),
        0x01..=0x0F => one(format!("LDN R{n:X}")),
        0x10..=0x1F => one(format!("INC R{n:X}")),
        0x20..=0x2F => one(format!("DEC R{n:X}")),
        0x30 => two(code, "BR"),
        0x31 => two(code, "BQ"),
        0x32 => two(code, "BZ"),
        0x33 => two(code, "BDF"),
        0x34..=0x37 => two(code, &format!("B{}", n - 3)),
        0x38 => one("SKP"),
        0x39 => two(code, "BNQ"),
        0x3A => two(code, "BNZ"),
        0x3B => two(code, "BNF"),
        0x3C..=0x3F => two(code, &format!("BN{}", n - 0xB)),
        0x40..=0x4F => one(format!("LDA R{n:X}")),
        0x50..=0x5F => one(format!("STR R{n:X}")),
        0x60 => one("IRX"),
        0x61..=0x67 => one(format!("OUT {n:X}")),
        0x68 => one("ILLEGAL"),
        0x69..=0x6F => one(format!("INP {:X}", n & 7)),
        0x70 => one("RET"),
        0x71 => one("DIS"),
        0x72 => one("LDXA"),
        0x73 => one("STXD"),
        0x74 => one("ADC"),
        0x75 => one("SDB"),
        0x76 => one("SHRC"),
        0x77 => one("SMB"),
        0x78 => one("SAV"),
        0x79 => one("MARK"),
        0x7A => one("REQ"),
        0x7B => one("SEQ"),
        0x7C => two_imm(code, "ADCI"),
        0x7D => two_imm(code, "SDBI"),
        0x7E => one("SHLC"),
        0x7F => two_imm(code, "SMBI"),
        0x80..=0x8F => one(format!("GLO R{n:X}")),
        0x90..=0x9F => one(format!("GHI R{n:X}")),
        0xA0..=0xAF => one(format!("PLO R{n:X}")),
        0xB0..=0xBF => one(format!("PHI R{n:X}")),
        0xC0 => three(code, "LBR"),
        0xC1 => three(code, "LBQ"),
        0xC2 => three(code, "LBZ"),
        0xC3 => three(code, "LBDF"),
        0xC4 => one("NOP"),
        0xC5 => one("LSNQ"),
        0xC6 => one("LSNZ"),
        0xC7 => one("LSNF"),
        0xC8 => one("LSKP"),
        0xC9 => three(code, "LBNQ"),
        0xCA => three(code, "LBNZ"),
        0xCB => three(code, "LBNF"),
        0xCC => one("LSIE"),
        0xCD => one("LSQ"),
        0xCE => one("LSZ"),
        0xCF => one("LSDF"),
        0xD0..=0xDF => one(format!("SEP R{n:X}")),
        0xE0..=0xEF => one(format!("SEX R{n:X}")),
        0xF0 => one("LDX"),
        0xF1 => one("OR"),
        0xF2 => one("AND"),
        0xF3 => one("XOR"),
        0xF4 => one("ADD"),
        0xF5 => one("SD"),
        0xF6 => one("SHR"),
        0xF7 => one("SM"),
        0xF8 => two_imm(code, "LDI"),
        0xF9 => two_imm(code, "ORI"),
        0xFA => two_imm(code, "ANI"),
        0xFB => two_imm(code, "XRI"),
        0xFC => two_imm(code, "ADI"),
        0xFD => two_imm(code, "SDI"),
        0xFE => one("SHL"),
        0xFF => two_imm(code, "SMI"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_sizes_and_text() {
        assert_eq!(disassemble(&[0x00]).text, "IDL");
        assert_eq!(disassemble(&[0x1A]).text, "INC RA");
        let d = disassemble(&[0x30, 0x80]);
        assert_eq!((d.size, d.text.as_str()), (2, "BR 0x80"));
        let d = disassemble(&[0xC0, 0x12, 0x34]);
        assert_eq!((d.size, d.text.as_str()), (3, "LBR 0x1234"));
        let d = disassemble(&[0xF8, 0x7F]);
        assert_eq!((d.size, d.text.as_str()), (2, "LDI #0x7F"));
        assert_eq!(disassemble(&[0x37, 0x10]).text, "B4 0x10");
        assert_eq!(disassemble(&[0x3C, 0x10]).text, "BN1 0x10");
    }
}
