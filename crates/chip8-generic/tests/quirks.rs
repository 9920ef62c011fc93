//! Pairs of cores that differ in exactly one quirk, each running the same
//! program, to pin down which behavior every quirk actually selects.

use chip8_core::{Chip8Core, CpuState, ExecMode};
use chip8_generic::{Chip8Generic, Preset};

fn run(preset: Preset, rom: &[u8], frames: usize) -> Chip8Generic {
    let mut core = Chip8Generic::from_preset(preset).unwrap();
    core.load_data(rom, None).unwrap();
    for _ in 0..frames {
        core.execute_frame();
    }
    core
}

#[test]
fn shift_source_register() {
    // V0 := 0xF0, V1 := 0x01, V0 := shr
    let rom = [0x60, 0xF0, 0x61, 0x01, 0x80, 0x16, 0x12, 0x06];

    // the original shifts Vy into Vx
    let vip = run(Preset::Chip8, &rom, 1);
    assert_eq!(vip.state().v[0], 0x00);
    assert_eq!(vip.state().v[0xF], 1);

    // CHIP-48 shifts Vx in place
    let hp = run(Preset::Chip48, &rom, 1);
    assert_eq!(hp.state().v[0], 0x78);
    assert_eq!(hp.state().v[0xF], 0);
}

#[test]
fn logic_opcodes_reset_vf_only_on_the_vip() {
    let rom = [0x6F, 0x42, 0x60, 0x0F, 0x61, 0xF0, 0x80, 0x13, 0x12, 0x08];

    let vip = run(Preset::Chip8, &rom, 1);
    assert_eq!(vip.state().v[0], 0xFF);
    assert_eq!(vip.state().v[0xF], 0);

    let schpc = run(Preset::SChipC, &rom, 1);
    assert_eq!(schpc.state().v[0], 0xFF);
    assert_eq!(schpc.state().v[0xF], 0x42);
}

#[test]
fn load_store_index_advance() {
    // V0..V2 := 11/22/33, I := 0x400, store V0-V2
    let rom = [
        0x60, 0x11, 0x61, 0x22, 0x62, 0x33, 0xA4, 0x00, 0xF2, 0x55, 0x12, 0x0A,
    ];

    let vip = run(Preset::Chip8, &rom, 1);
    assert_eq!(&vip.memory()[0x400..0x403], &[0x11, 0x22, 0x33]);
    assert_eq!(vip.state().i, 0x403);

    let hp = run(Preset::Chip48, &rom, 1);
    assert_eq!(&hp.memory()[0x400..0x403], &[0x11, 0x22, 0x33]);
    assert_eq!(hp.state().i, 0x402);

    let schip = run(Preset::SChip11, &rom, 1);
    assert_eq!(&schip.memory()[0x400..0x403], &[0x11, 0x22, 0x33]);
    assert_eq!(schip.state().i, 0x400);
}

#[test]
fn jump_with_offset_register() {
    // V0 := 4, V3 := 0, then B300; spin targets at 0x300 and 0x304
    let mut rom = vec![0u8; 0x106];
    rom[..6].copy_from_slice(&[0x60, 0x04, 0x63, 0x00, 0xB3, 0x00]);
    rom[0x100..0x102].copy_from_slice(&[0x13, 0x00]);
    rom[0x104..0x106].copy_from_slice(&[0x13, 0x04]);

    // Bnnn jumps to nnn + V0
    let vip = run(Preset::Chip8, &rom, 1);
    assert_eq!(vip.state().pc, 0x304);

    // Bxnn jumps to nnn + Vx (x from the high nibble of nnn)
    let hp = run(Preset::Chip48, &rom, 1);
    assert_eq!(hp.state().pc, 0x300);
}

#[test]
fn sprites_wrap_or_clip_at_the_right_edge() {
    // hires on, I := data, draw one 8-pixel line at x = 126
    let rom = [
        0x00, 0xFF, 0xA2, 0x0C, 0x60, 0x7E, 0x61, 0x00, 0xD0, 0x11, 0x12, 0x0A, 0xFF, 0x00,
    ];

    let xo = run(Preset::XoChip, &rom, 1);
    assert_eq!(xo.screen().pixel(126, 0), 1);
    assert_eq!(xo.screen().pixel(0, 0), 1);
    assert_eq!(xo.screen().pixel(5, 0), 1);

    let modern = run(Preset::SChipModern, &rom, 1);
    assert_eq!(modern.screen().pixel(126, 0), 1);
    assert_eq!(modern.screen().pixel(127, 0), 1);
    assert_eq!(modern.screen().pixel(0, 0), 0);
}

#[test]
fn scroll_down_zero_is_invalid_only_where_unsupported() {
    // SCHIP 1.1 accepts 00C1 but treats 00C0 as invalid
    let bad = run(Preset::SChip11, &[0x00, 0xC0], 1);
    assert_eq!(bad.cpu_state(), CpuState::Error);

    let good = run(Preset::SChip11, &[0x00, 0xC1, 0x12, 0x02], 1);
    assert_ne!(good.cpu_state(), CpuState::Error);

    // XO-CHIP masks the whole 00Cn row, n = 0 included
    let xo = run(Preset::XoChip, &[0x00, 0xC0, 0x12, 0x02], 1);
    assert_ne!(xo.cpu_state(), CpuState::Error);
}

#[test]
fn display_wait_retries_until_the_frame_boundary() {
    let mut vip = Chip8Generic::from_preset(Preset::Chip8).unwrap();
    vip.load_data(&[0xD0, 0x01], None).unwrap();
    vip.execute_instructions(5);
    // still retrying: the vblank has not come around yet
    assert_eq!(vip.state().pc, 0x200);

    let mut modern = Chip8Generic::from_preset(Preset::SChipModern).unwrap();
    modern.load_data(&[0xD0, 0x01, 0x12, 0x02], None).unwrap();
    modern.execute_instructions(1);
    assert_eq!(modern.state().pc, 0x202);
}

#[test]
fn mode_change_clears_only_where_the_quirk_says_so() {
    // draw a lores pixel, then switch to lores again via 00FE
    let rom = [
        0xA2, 0x0A, 0x60, 0x00, 0xD0, 0x01, 0x00, 0xFE, 0x12, 0x08, 0x80, 0x00,
    ];

    let schpc = run(Preset::SChipC, &rom, 2);
    assert!(schpc.screen().is_blank());

    let schip11 = run(Preset::SChip11, &rom, 2);
    assert_eq!(schip11.screen().pixel(0, 0), 1);
}

#[test]
fn identical_runs_paint_identical_screens() {
    // draw single-row sprites at random positions, branching on key 0
    let rom = [
        0xC0, 0x3F, 0xC1, 0x1F, 0xA2, 0x0E, 0xD0, 0x11, 0xE4, 0x9E, 0x12, 0x00, 0x12, 0x00,
        0x96,
    ];
    let mut a = Chip8Generic::from_preset(Preset::SChipModern).unwrap();
    let mut b = Chip8Generic::from_preset(Preset::SChipModern).unwrap();
    a.load_data(&rom, None).unwrap();
    b.load_data(&rom, None).unwrap();
    for frame in 0..12 {
        let mut keys = [false; 16];
        keys[0] = frame % 3 == 0;
        a.set_key_states(keys);
        b.set_key_states(keys);
        a.execute_frame();
        b.execute_frame();
    }
    assert_eq!(a.state().v, b.state().v);
    assert_eq!(a.cycles(), b.cycles());
    assert_eq!(a.screen().data, b.screen().data);
}

#[test]
fn same_preset_cores_stay_in_lockstep() {
    let rom = [0xC0, 0xFF, 0xC1, 0x3F, 0x12, 0x00];
    for preset in [Preset::Chip8, Preset::Chip48, Preset::XoChip] {
        let a = run(preset, &rom, 5);
        let b = run(preset, &rom, 5);
        assert_eq!(a.state().v, b.state().v, "{}", preset.name());
        assert_eq!(a.cycles(), b.cycles());
    }
}

#[test]
fn halt_opcode_reports_halted_not_error() {
    let core = run(Preset::SChip11, &[0x00, 0xFD], 1);
    assert_eq!(core.cpu_state(), CpuState::Halted);
    assert_eq!(core.exec_mode(), ExecMode::Paused);
    assert!(core.error_message().is_none());
}
