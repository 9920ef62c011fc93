//! The 256-entry opcode description table.
//!
//! `cycles` is the documented instruction length; actual cycle counting is
//! done by the bus accesses the execution core performs, the table value is
//! used for informational purposes only.

/// Addressing mode of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    Invalid,
    Inherent,
    Immediate,
    Immediate16,
    Direct,
    Extended,
    Relative,
    Indexed,
}

/// Which accumulator an opcode operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accu {
    None,
    A,
    B,
}

/// Operation selector; branches carry their own mnemonic for disassembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Ill,
    Nop,
    Tap,
    Tpa,
    Inx,
    Dex,
    Clv,
    Sev,
    Clc,
    Sec,
    Cli,
    Sei,
    Sba,
    Cba,
    Nba,
    Tab,
    Tba,
    Daa,
    Aba,
    Bra,
    Bhi,
    Bls,
    Bcc,
    Bcs,
    Bne,
    Beq,
    Bvc,
    Bvs,
    Bpl,
    Bmi,
    Bge,
    Blt,
    Bgt,
    Ble,
    Tsx,
    Ins,
    Pul,
    Psh,
    Des,
    Txs,
    Rts,
    Rti,
    Wai,
    Swi,
    Neg,
    Com,
    Lsr,
    Ror,
    Asr,
    Asl,
    Rol,
    Dec,
    Inc,
    Tst,
    Jmp,
    Clr,
    Sub,
    Cmp,
    Sbc,
    And,
    Bit,
    Lda,
    Sta,
    Eor,
    Adc,
    Ora,
    Add,
    Cpx,
    Bsr,
    Lds,
    Sts,
    Ldx,
    Stx,
    Jsr,
}

#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    pub bytes: u8,
    pub cycles: u8,
    pub mode: AddrMode,
    pub accu: Accu,
    pub undoc: bool,
    pub op: Op,
    pub mnemonic: &'static str,
}

const fn ill() -> OpcodeInfo {
    OpcodeInfo {
        bytes: 1,
        cycles: 0,
        mode: AddrMode::Invalid,
        accu: Accu::None,
        undoc: false,
        op: Op::Ill,
        mnemonic: "???",
    }
}

const fn op(bytes: u8, cycles: u8, mode: AddrMode, oper: Op, mnemonic: &'static str) -> OpcodeInfo {
    OpcodeInfo { bytes, cycles, mode, accu: Accu::None, undoc: false, op: oper, mnemonic }
}

const fn opa(bytes: u8, cycles: u8, mode: AddrMode, oper: Op, mnemonic: &'static str) -> OpcodeInfo {
    OpcodeInfo { bytes, cycles, mode, accu: Accu::A, undoc: false, op: oper, mnemonic }
}

const fn opb(bytes: u8, cycles: u8, mode: AddrMode, oper: Op, mnemonic: &'static str) -> OpcodeInfo {
    OpcodeInfo { bytes, cycles, mode, accu: Accu::B, undoc: false, op: oper, mnemonic }
}

const fn undoc(info: OpcodeInfo) -> OpcodeInfo {
    OpcodeInfo { undoc: true, ..info }
}

use AddrMode::{Direct, Extended, Immediate, Immediate16, Indexed, Inherent, Relative};

#[rustfmt::skip]
static OPCODES: [OpcodeInfo; 256] = [
    // 00-07
    ill(), op(1, 2, Inherent, Op::Nop, "NOP"), ill(), ill(),
    ill(), ill(), op(1, 2, Inherent, Op::Tap, "TAP"), op(1, 2, Inherent, Op::Tpa, "TPA"),
    // 08-0F
    op(1, 4, Inherent, Op::Inx, "INX"), op(1, 4, Inherent, Op::Dex, "DEX"),
    op(1, 2, Inherent, Op::Clv, "CLV"), op(1, 2, Inherent, Op::Sev, "SEV"),
    op(1, 2, Inherent, Op::Clc, "CLC"), op(1, 2, Inherent, Op::Sec, "SEC"),
    op(1, 2, Inherent, Op::Cli, "CLI"), op(1, 2, Inherent, Op::Sei, "SEI"),
    // 10-17
    op(1, 2, Inherent, Op::Sba, "SBA"), op(1, 2, Inherent, Op::Cba, "CBA"), ill(), ill(),
    undoc(op(1, 2, Inherent, Op::Nba, "NBA")), ill(),
    op(1, 2, Inherent, Op::Tab, "TAB"), op(1, 2, Inherent, Op::Tba, "TBA"),
    // 18-1F
    ill(), op(1, 2, Inherent, Op::Daa, "DAA"), ill(), op(1, 2, Inherent, Op::Aba, "ABA"),
    ill(), ill(), ill(), ill(),
    // 20-27
    op(2, 4, Relative, Op::Bra, "BRA"), ill(),
    op(2, 4, Relative, Op::Bhi, "BHI"), op(2, 4, Relative, Op::Bls, "BLS"),
    op(2, 4, Relative, Op::Bcc, "BCC"), op(2, 4, Relative, Op::Bcs, "BCS"),
    op(2, 4, Relative, Op::Bne, "BNE"), op(2, 4, Relative, Op::Beq, "BEQ"),
    // 28-2F
    op(2, 4, Relative, Op::Bvc, "BVC"), op(2, 4, Relative, Op::Bvs, "BVS"),
    op(2, 4, Relative, Op::Bpl, "BPL"), op(2, 4, Relative, Op::Bmi, "BMI"),
    op(2, 4, Relative, Op::Bge, "BGE"), op(2, 4, Relative, Op::Blt, "BLT"),
    op(2, 4, Relative, Op::Bgt, "BGT"), op(2, 4, Relative, Op::Ble, "BLE"),
    // 30-37
    op(1, 4, Inherent, Op::Tsx, "TSX"), op(1, 4, Inherent, Op::Ins, "INS"),
    opa(1, 4, Inherent, Op::Pul, "PUL"), opb(1, 4, Inherent, Op::Pul, "PUL"),
    op(1, 4, Inherent, Op::Des, "DES"), op(1, 4, Inherent, Op::Txs, "TXS"),
    opa(1, 4, Inherent, Op::Psh, "PSH"), opb(1, 4, Inherent, Op::Psh, "PSH"),
    // 38-3F
    ill(), op(1, 5, Inherent, Op::Rts, "RTS"), ill(), op(1, 10, Inherent, Op::Rti, "RTI"),
    ill(), ill(), op(1, 9, Inherent, Op::Wai, "WAI"), op(1, 12, Inherent, Op::Swi, "SWI"),
    // 40-47
    opa(1, 2, Inherent, Op::Neg, "NEG"), ill(), ill(), opa(1, 2, Inherent, Op::Com, "COM"),
    opa(1, 2, Inherent, Op::Lsr, "LSR"), ill(),
    opa(1, 2, Inherent, Op::Ror, "ROR"), opa(1, 2, Inherent, Op::Asr, "ASR"),
    // 48-4F
    opa(1, 2, Inherent, Op::Asl, "ASL"), opa(1, 2, Inherent, Op::Rol, "ROL"),
    opa(1, 2, Inherent, Op::Dec, "DEC"), ill(),
    opa(1, 2, Inherent, Op::Inc, "INC"), opa(1, 2, Inherent, Op::Tst, "TST"),
    ill(), opa(1, 2, Inherent, Op::Clr, "CLR"),
    // 50-57
    opb(1, 2, Inherent, Op::Neg, "NEG"), ill(), ill(), opb(1, 2, Inherent, Op::Com, "COM"),
    opb(1, 2, Inherent, Op::Lsr, "LSR"), ill(),
    opb(1, 2, Inherent, Op::Ror, "ROR"), opb(1, 2, Inherent, Op::Asr, "ASR"),
    // 58-5F
    opb(1, 2, Inherent, Op::Asl, "ASL"), opb(1, 2, Inherent, Op::Rol, "ROL"),
    opb(1, 2, Inherent, Op::Dec, "DEC"), ill(),
    opb(1, 2, Inherent, Op::Inc, "INC"), opb(1, 2, Inherent, Op::Tst, "TST"),
    ill(), opb(1, 2, Inherent, Op::Clr, "CLR"),
    // 60-67
    op(2, 7, Indexed, Op::Neg, "NEG"), ill(), ill(), op(2, 7, Indexed, Op::Com, "COM"),
    op(2, 7, Indexed, Op::Lsr, "LSR"), ill(),
    op(2, 7, Indexed, Op::Ror, "ROR"), op(2, 7, Indexed, Op::Asr, "ASR"),
    // 68-6F
    op(2, 7, Indexed, Op::Asl, "ASL"), op(2, 7, Indexed, Op::Rol, "ROL"),
    op(2, 7, Indexed, Op::Dec, "DEC"), ill(),
    op(2, 7, Indexed, Op::Inc, "INC"), op(2, 7, Indexed, Op::Tst, "TST"),
    op(2, 4, Indexed, Op::Jmp, "JMP"), op(2, 7, Indexed, Op::Clr, "CLR"),
    // 70-77
    op(3, 6, Extended, Op::Neg, "NEG"), ill(), ill(), op(3, 6, Extended, Op::Com, "COM"),
    op(3, 6, Extended, Op::Lsr, "LSR"), ill(),
    op(3, 6, Extended, Op::Ror, "ROR"), op(3, 6, Extended, Op::Asr, "ASR"),
    // 78-7F
    op(3, 6, Extended, Op::Asl, "ASL"), op(3, 6, Extended, Op::Rol, "ROL"),
    op(3, 6, Extended, Op::Dec, "DEC"), ill(),
    op(3, 6, Extended, Op::Inc, "INC"), op(3, 6, Extended, Op::Tst, "TST"),
    op(3, 3, Extended, Op::Jmp, "JMP"), op(3, 6, Extended, Op::Clr, "CLR"),
    // 80-87
    opa(2, 2, Immediate, Op::Sub, "SUB"), opa(2, 2, Immediate, Op::Cmp, "CMP"),
    opa(2, 2, Immediate, Op::Sbc, "SBC"), ill(),
    opa(2, 2, Immediate, Op::And, "AND"), opa(2, 2, Immediate, Op::Bit, "BIT"),
    opa(2, 2, Immediate, Op::Lda, "LDA"), undoc(opa(2, 2, Immediate, Op::Sta, "STA")),
    // 88-8F
    opa(2, 2, Immediate, Op::Eor, "EOR"), opa(2, 2, Immediate, Op::Adc, "ADC"),
    opa(2, 2, Immediate, Op::Ora, "ORA"), opa(2, 2, Immediate, Op::Add, "ADD"),
    op(3, 3, Immediate16, Op::Cpx, "CPX"), op(2, 8, Relative, Op::Bsr, "BSR"),
    op(3, 3, Immediate16, Op::Lds, "LDS"), undoc(op(3, 0, Immediate16, Op::Sts, "STS")),
    // 90-97
    opa(2, 3, Direct, Op::Sub, "SUB"), opa(2, 3, Direct, Op::Cmp, "CMP"),
    opa(2, 3, Direct, Op::Sbc, "SBC"), ill(),
    opa(2, 3, Direct, Op::And, "AND"), opa(2, 3, Direct, Op::Bit, "BIT"),
    opa(2, 3, Direct, Op::Lda, "LDA"), opa(2, 4, Direct, Op::Sta, "STA"),
    // 98-9F
    opa(2, 3, Direct, Op::Eor, "EOR"), opa(2, 3, Direct, Op::Adc, "ADC"),
    opa(2, 3, Direct, Op::Ora, "ORA"), opa(2, 3, Direct, Op::Add, "ADD"),
    op(2, 4, Direct, Op::Cpx, "CPX"), ill(),
    op(2, 4, Direct, Op::Lds, "LDS"), op(2, 5, Direct, Op::Sts, "STS"),
    // A0-A7
    opa(2, 5, Indexed, Op::Sub, "SUB"), opa(2, 5, Indexed, Op::Cmp, "CMP"),
    opa(2, 5, Indexed, Op::Sbc, "SBC"), ill(),
    opa(2, 5, Indexed, Op::And, "AND"), opa(2, 5, Indexed, Op::Bit, "BIT"),
    opa(2, 5, Indexed, Op::Lda, "LDA"), opa(2, 6, Indexed, Op::Sta, "STA"),
    // A8-AF
    opa(2, 5, Indexed, Op::Eor, "EOR"), opa(2, 5, Indexed, Op::Adc, "ADC"),
    opa(2, 5, Indexed, Op::Ora, "ORA"), opa(2, 5, Indexed, Op::Add, "ADD"),
    op(2, 6, Indexed, Op::Cpx, "CPX"), op(2, 8, Indexed, Op::Jsr, "JSR"),
    op(2, 6, Indexed, Op::Lds, "LDS"), op(2, 7, Indexed, Op::Sts, "STS"),
    // B0-B7
    opa(3, 4, Extended, Op::Sub, "SUB"), opa(3, 4, Extended, Op::Cmp, "CMP"),
    opa(3, 4, Extended, Op::Sbc, "SBC"), ill(),
    opa(3, 4, Extended, Op::And, "AND"), opa(3, 4, Extended, Op::Bit, "BIT"),
    opa(3, 4, Extended, Op::Lda, "LDA"), opa(3, 5, Extended, Op::Sta, "STA"),
    // B8-BF
    opa(3, 4, Extended, Op::Eor, "EOR"), opa(3, 4, Extended, Op::Adc, "ADC"),
    opa(3, 4, Extended, Op::Ora, "ORA"), opa(3, 4, Extended, Op::Add, "ADD"),
    op(3, 5, Extended, Op::Cpx, "CPX"), op(3, 9, Extended, Op::Jsr, "JSR"),
    op(3, 5, Extended, Op::Lds, "LDS"), op(3, 6, Extended, Op::Sts, "STS"),
    // C0-C7
    opb(2, 2, Immediate, Op::Sub, "SUB"), opb(2, 2, Immediate, Op::Cmp, "CMP"),
    opb(2, 2, Immediate, Op::Sbc, "SBC"), ill(),
    opb(2, 2, Immediate, Op::And, "AND"), opb(2, 2, Immediate, Op::Bit, "BIT"),
    opb(2, 2, Immediate, Op::Lda, "LDA"), undoc(opb(2, 2, Immediate, Op::Sta, "STA")),
    // C8-CF
    opb(2, 2, Immediate, Op::Eor, "EOR"), opb(2, 2, Immediate, Op::Adc, "ADC"),
    opb(2, 2, Immediate, Op::Ora, "ORA"), opb(2, 2, Immediate, Op::Add, "ADD"),
    ill(), ill(),
    op(3, 3, Immediate16, Op::Ldx, "LDX"), undoc(op(3, 0, Immediate16, Op::Stx, "STX")),
    // D0-D7
    opb(2, 3, Direct, Op::Sub, "SUB"), opb(2, 3, Direct, Op::Cmp, "CMP"),
    opb(2, 3, Direct, Op::Sbc, "SBC"), ill(),
    opb(2, 3, Direct, Op::And, "AND"), opb(2, 3, Direct, Op::Bit, "BIT"),
    opb(2, 3, Direct, Op::Lda, "LDA"), opb(2, 4, Direct, Op::Sta, "STA"),
    // D8-DF
    opb(2, 3, Direct, Op::Eor, "EOR"), opb(2, 3, Direct, Op::Adc, "ADC"),
    opb(2, 3, Direct, Op::Ora, "ORA"), opb(2, 3, Direct, Op::Add, "ADD"),
    ill(), ill(),
    op(2, 4, Direct, Op::Ldx, "LDX"), op(2, 5, Direct, Op::Stx, "STX"),
    // E0-E7
    opb(2, 5, Indexed, Op::Sub, "SUB"), opb(2, 5, Indexed, Op::Cmp, "CMP"),
    opb(2, 5, Indexed, Op::Sbc, "SBC"), ill(),
    opb(2, 5, Indexed, Op::And, "AND"), opb(2, 5, Indexed, Op::Bit, "BIT"),
    opb(2, 5, Indexed, Op::Lda, "LDA"), opb(2, 6, Indexed, Op::Sta, "STA"),
    // E8-EF
    opb(2, 5, Indexed, Op::Eor, "EOR"), opb(2, 5, Indexed, Op::Adc, "ADC"),
    opb(2, 5, Indexed, Op::Ora, "ORA"), opb(2, 5, Indexed, Op::Add, "ADD"),
    ill(), ill(),
    op(2, 6, Indexed, Op::Ldx, "LDX"), op(2, 7, Indexed, Op::Stx, "STX"),
    // F0-F7
    opb(3, 4, Extended, Op::Sub, "SUB"), opb(3, 4, Extended, Op::Cmp, "CMP"),
    opb(3, 4, Extended, Op::Sbc, "SBC"), ill(),
    opb(3, 4, Extended, Op::And, "AND"), opb(3, 4, Extended, Op::Bit, "BIT"),
    opb(3, 4, Extended, Op::Lda, "LDA"), opb(3, 5, Extended, Op::Sta, "STA"),
    // F8-FF
    opb(3, 4, Extended, Op::Eor, "EOR"), opb(3, 4, Extended, Op::Adc, "ADC"),
    opb(3, 4, Extended, Op::Ora, "ORA"), opb(3, 4, Extended, Op::Add, "ADD"),
    ill(), ill(),
    op(3, 5, Extended, Op::Ldx, "LDX"), op(3, 6, Extended, Op::Stx, "STX"),
];

/// Look up the description of an opcode.
#[must_use]
pub fn opcode_info(opcode: u8) -> &'static OpcodeInfo {
    &OPCODES[opcode as usize]
}

/// True for documented opcodes (0x3E WAI is excluded as it halts the bus).
#[must_use]
pub fn is_valid_opcode(opcode: u8) -> bool {
    let info = opcode_info(opcode);
    info.mode != AddrMode::Invalid && !info.undoc && opcode != 0x3E
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_spot_checks() {
        assert_eq!(opcode_info(0x01).op, Op::Nop);
        assert_eq!(opcode_info(0x20).mode, AddrMode::Relative);
        assert_eq!(opcode_info(0x86).accu, Accu::A);
        assert_eq!(opcode_info(0xC6).accu, Accu::B);
        assert_eq!(opcode_info(0xBD).op, Op::Jsr);
        assert_eq!(opcode_info(0xBD).bytes, 3);
        assert_eq!(opcode_info(0x00).mode, AddrMode::Invalid);
        assert!(opcode_info(0x14).undoc);
        assert!(is_valid_opcode(0x86));
        assert!(!is_valid_opcode(0x3E));
        assert!(!is_valid_opcode(0x00));
    }
}
