//! Programs running on the emulated board, through a small 1802 test
//! interpreter and as bare machine code.

use chip8_core::{Chip8Core, CpuState, ExecMode};
use emu_cosmac_vip::{CosmacVip, CosmacVipOptions};

/// A hand-assembled interpreter exercising the projection contract: R4
/// holds the fetch loop at 001B, R5 the CHIP-8 PC, R2 the stack pointer,
/// variables at 0EF0. It interprets 6xnn and 1nnn and idles on anything
/// else.
const TEST_INTERPRETER: &[u8] = &[
    0x71, 0x00, // 0000  DIS
    0xF8, 0x00, 0xB4, // 0002  R4.1 = 00
    0xF8, 0x1B, 0xA4, // 0005  R4.0 = 1B
    0xF8, 0x02, 0xB5, // 0008  R5.1 = 02
    0xF8, 0x00, 0xA5, // 000B  R5.0 = 00
    0xF8, 0x0E, 0xB2, // 000E  R2.1 = 0E
    0xF8, 0xCF, 0xA2, // 0011  R2.0 = CF
    0xD4, // 0014  SEP R4 -> fetch loop
    0xC4, 0xC4, 0xC4, 0xC4, 0xC4, 0xC4, // 0015  pad
    // fetch loop, P = 4
    0x45, // 001B  LDA R5        opcode high
    0xB6, // 001C  PHI R6
    0x45, // 001D  LDA R5        opcode low
    0xA6, // 001E  PLO R6
    0x96, // 001F  GHI R6
    0xFA, 0xF0, // 0020  ANI F0
    0xFB, 0x60, // 0022  XRI 60
    0x3A, 0x33, // 0024  BNZ 0033      not 6xnn
    0xF8, 0x0E, // 0026  LDI 0E
    0xB7, // 0028  PHI R7
    0x96, // 0029  GHI R6
    0xFA, 0x0F, // 002A  ANI 0F
    0xF9, 0xF0, // 002C  ORI F0
    0xA7, // 002E  PLO R7        R7 = &V[x]
    0x86, // 002F  GLO R6
    0x57, // 0030  STR R7        V[x] = nn
    0x30, 0x1B, // 0031  BR 001B
    0x96, // 0033  GHI R6
    0xFA, 0xF0, // 0034  ANI F0
    0xFB, 0x10, // 0036  XRI 10
    0x3A, 0x42, // 0038  BNZ 0042      not 1nnn
    0x96, // 003A  GHI R6
    0xFA, 0x0F, // 003B  ANI 0F
    0xB5, // 003D  PHI R5
    0x86, // 003E  GLO R6
    0xA5, // 003F  PLO R5        R5 = nnn
    0x30, 0x1B, // 0040  BR 001B
    0x00, // 0042  IDL           unsupported opcode
];

fn boot(program: &[u8]) -> CosmacVip {
    let mut machine = CosmacVip::new(CosmacVipOptions::default()).unwrap();
    machine.patch_interpreter(TEST_INTERPRETER).unwrap();
    machine.load_data(program, None).unwrap();
    machine
}

#[test]
fn the_interpreter_boots_to_the_program_start() {
    let machine = boot(&[0x12, 0x00]);
    assert_eq!(machine.state().pc, 0x200);
    assert_eq!(machine.state().sp, 0);
    assert_eq!(machine.cpu_state(), CpuState::Normal);
    assert_eq!(machine.cycles(), 0);
}

#[test]
fn register_loads_project_into_the_work_area() {
    let mut machine = boot(&[0x60, 0x05, 0x61, 0x21, 0x12, 0x04]);
    for _ in 0..4 {
        machine.execute_frame();
    }
    assert_eq!(machine.state().v[0], 0x05);
    assert_eq!(machine.state().v[1], 0x21);
    assert_eq!(machine.memory()[0xEF0], 0x05);
    assert_eq!(machine.memory()[0xEF1], 0x21);
}

#[test]
fn a_jump_to_self_pauses_at_the_frame_boundary() {
    let mut machine = boot(&[0x12, 0x00]);
    for _ in 0..4 {
        machine.execute_frame();
    }
    assert_eq!(machine.exec_mode(), ExecMode::Paused);
    assert_eq!(machine.state().pc, 0x200);
    assert_eq!(machine.cpu_state(), CpuState::Normal);
}

#[test]
fn stepping_advances_one_interpreted_instruction() {
    let mut machine = boot(&[0x60, 0x11, 0x61, 0x22, 0x12, 0x04]);
    machine.set_exec_mode(ExecMode::Step);
    machine.execute_frame();
    assert_eq!(machine.exec_mode(), ExecMode::Paused);
    assert_eq!(machine.state().pc, 0x202);
    assert_eq!(machine.state().v[0], 0x11);
    assert_eq!(machine.state().v[1], 0);
}

#[test]
fn the_key_latch_selects_which_key_ef3_reads() {
    // OUT 2 with an inline literal latches key 7, then the program polls
    // EF3 and raises Q once the key goes down
    let program = [
        0x71, 0x00, // 0000  DIS
        0x62, 0x07, // 0002  OUT 2, #07
        0x36, 0x08, // 0004  B3 0008
        0x30, 0x04, // 0006  BR 0004
        0x7B, // 0008  SEQ
        0x30, 0x09, // 0009  BR 0009
    ];
    let mut machine = CosmacVip::new(CosmacVipOptions::default()).unwrap();
    machine.load_data(&program, Some(0)).unwrap();

    let mut keys = [false; 16];
    keys[3] = true; // not the latched key
    machine.set_key_states(keys);
    machine.execute_frame();
    assert!(!machine.backend().q());

    let mut keys = [false; 16];
    keys[7] = true;
    machine.set_key_states(keys);
    machine.execute_frame();
    assert!(machine.backend().q());

    let mut samples = [0i16; 32];
    machine.render_audio(&mut samples, 44_100);
    assert!(samples.iter().any(|&s| s != 0));
}

#[test]
fn the_pixie_paints_what_the_interrupt_handler_points_at() {
    // INP 1 switches the display on; the interrupt handler resets R0 to
    // 0200 every frame, so line 0 shows the bytes there
    let mut program = [0u8; 0x39];
    program[0x00..0x12].copy_from_slice(&[
        0xF8, 0x00, 0xB1, // R1.1 = 00
        0xF8, 0x30, 0xA1, // R1.0 = 30   interrupt handler
        0xF8, 0x03, 0xB2, // R2.1 = 03
        0xF8, 0xF0, 0xA2, // R2.0 = F0   stack scratch
        0xE2, // SEX R2
        0x69, // INP 1       display on
        0xF8, 0x12, 0xA3, // R3.0 = 12
        0xD3, // SEP R3      run off R0, it belongs to the DMA now
    ]);
    program[0x12..0x14].copy_from_slice(&[0x30, 0x12]); // spin
    program[0x30..0x39].copy_from_slice(&[
        0x22, // DEC R2
        0x78, // SAV
        0xF8, 0x02, 0xB0, // R0.1 = 02
        0xF8, 0x00, 0xA0, // R0.0 = 00
        0x70, // RET
    ]);
    let mut machine =
        CosmacVip::new(CosmacVipOptions { clean_ram: true, ..CosmacVipOptions::default() })
            .unwrap();
    machine.load_data(&program, Some(0)).unwrap();
    machine.load_data(&[0xA5; 8], Some(0x200)).unwrap();

    machine.execute_frame();
    machine.execute_frame();
    assert!(machine.is_display_enabled());
    assert!(machine.frames() > 0);
    let screen = machine.screen();
    assert_eq!(screen.width, 64);
    assert_eq!(screen.height, 128);
    let expected = [1, 0, 1, 0, 0, 1, 0, 1];
    for (x, &bit) in expected.iter().enumerate() {
        assert_eq!(screen.pixel(x, 0), bit);
        assert_eq!(screen.pixel(x + 8, 0), bit);
    }
    // the second line fetches the zeroed bytes at 0208
    assert_eq!(screen.pixel(0, 1), 0);
}

#[test]
fn an_unsupported_opcode_idles_the_backend() {
    let mut machine = boot(&[0xD0, 0x11]);
    machine.execute_frame();
    assert_eq!(machine.backend().cpu_state(), CpuState::Waiting);
}
