//! Programs interpreted by the real CHIPOS image on the emulated board.

use chip8_core::{Chip8Core, CpuState, ExecMode};
use emu_dream6800::{Dream6800, Dream6800Options, MonitorRom};

fn boot(rom: &[u8]) -> Dream6800 {
    let mut machine = Dream6800::new(Dream6800Options::default()).unwrap();
    machine.load_data(rom, None).unwrap();
    machine
}

#[test]
fn cold_start_lands_in_the_fetch_loop() {
    let machine = Dream6800::new(Dream6800Options::default()).unwrap();
    assert_eq!(machine.state().pc, 0x200);
    assert_eq!(machine.state().sp, 0);
    assert_eq!(machine.cpu_state(), CpuState::Normal);
    assert!(machine.screen().is_blank());
}

#[test]
fn chipos_interprets_register_loads() {
    let mut machine = boot(&[0x60, 0x05, 0x61, 0x21, 0x12, 0x04]);
    for _ in 0..4 {
        machine.execute_frame();
    }
    assert_eq!(machine.state().v[0], 0x05);
    assert_eq!(machine.state().v[1], 0x21);
}

#[test]
fn chipos_arithmetic_reports_the_carry() {
    // V0 := 200, V1 := 100, V0 += V1 -> 44 with VF = 1
    let mut machine = boot(&[0x60, 0xC8, 0x61, 0x64, 0x80, 0x14, 0x12, 0x06]);
    for _ in 0..4 {
        machine.execute_frame();
    }
    assert_eq!(machine.state().v[0], 0x2C);
    assert_eq!(machine.state().v[0xF], 1);
}

#[test]
fn subroutines_go_through_the_zero_page_stack() {
    // call 0x208, set V2 there, return, then spin
    let rom = [
        0x22, 0x08, 0x12, 0x02, 0x00, 0x00, 0x00, 0x00, 0x62, 0x07, 0x00, 0xEE,
    ];
    let mut machine = boot(&rom);
    for _ in 0..4 {
        machine.execute_frame();
    }
    assert_eq!(machine.state().v[2], 0x07);
    assert_eq!(machine.state().sp, 0);
    assert_eq!(machine.state().pc, 0x202);
}

#[test]
fn a_jump_to_self_pauses_at_the_frame_boundary() {
    let mut machine = boot(&[0x12, 0x00]);
    for _ in 0..3 {
        machine.execute_frame();
    }
    assert_eq!(machine.exec_mode(), ExecMode::Paused);
    assert_eq!(machine.state().pc, 0x200);
    assert_eq!(machine.cpu_state(), CpuState::Normal);
}

#[test]
fn sprites_land_on_the_quadrupled_raster() {
    // I := 0x20A, draw the 4-pixel row 0xF0 at (8, 4), spin
    let rom = [
        0xA2, 0x0A, 0x60, 0x08, 0x61, 0x04, 0xD0, 0x11, 0x12, 0x08, 0xF0, 0x00,
    ];
    let mut machine = boot(&rom);
    for _ in 0..4 {
        machine.execute_frame();
    }
    let screen = machine.screen();
    assert_eq!(screen.width, 64);
    assert_eq!(screen.height, 128);
    // CHIP-8 row 4 covers raster lines 16-19
    for y in 16..20 {
        assert_eq!(screen.pixel(8, y), 1);
        assert_eq!(screen.pixel(11, y), 1);
        assert_eq!(screen.pixel(12, y), 0);
    }
    assert_eq!(screen.pixel(8, 15), 0);
    assert_eq!(machine.state().v[0xF], 0);
}

#[test]
fn the_vsync_interrupt_drives_the_delay_timer() {
    // DT := 30, then spin; the spin is detected one frame later, after
    // exactly one 50 Hz tick has decremented the timer
    let mut machine = boot(&[0x60, 0x1E, 0xF0, 0x15, 0x12, 0x04]);
    for _ in 0..10 {
        machine.execute_frame();
    }
    assert_eq!(machine.exec_mode(), ExecMode::Paused);
    let dt = machine.state().dt;
    assert!(dt < 0x1E, "timer never ticked: {dt}");
    assert!(dt >= 0x1C, "timer ran past the pause: {dt}");
}

#[test]
fn keypad_presses_reach_the_interpreter() {
    let mut machine = boot(&[0xF0, 0x0A, 0x12, 0x02]);
    machine.execute_frame();
    // still inside the key wait
    assert_eq!(machine.state().pc, 0x200);

    let mut keys = [false; 16];
    keys[7] = true;
    machine.set_key_states(keys);
    for _ in 0..8 {
        machine.execute_frame();
    }
    machine.set_key_states([false; 16]);
    for _ in 0..8 {
        machine.execute_frame();
    }
    assert_eq!(machine.state().v[0], 7);
    assert_eq!(machine.state().pc, 0x202);
}

#[test]
fn chiposlo_adds_the_logical_opcodes() {
    let program = [0x60, 0x0F, 0x61, 0x35, 0x80, 0x13, 0x12, 0x06]; // V0 ^= V1
    let options =
        Dream6800Options { rom: MonitorRom::ChiposLo, ..Dream6800Options::default() };
    let mut machine = Dream6800::new(options).unwrap();
    machine.load_data(&program, None).unwrap();
    for _ in 0..4 {
        machine.execute_frame();
    }
    assert_eq!(machine.state().v[0], 0x3A);
}

#[test]
fn stepping_advances_one_chip8_instruction() {
    let mut machine = boot(&[0x60, 0x11, 0x61, 0x22, 0x12, 0x04]);
    machine.set_exec_mode(ExecMode::Step);
    machine.execute_frame();
    assert_eq!(machine.exec_mode(), ExecMode::Paused);
    assert_eq!(machine.state().pc, 0x202);
    assert_eq!(machine.state().v[0], 0x11);
    assert_eq!(machine.state().v[1], 0);
}

#[test]
fn the_power_on_ram_pattern_is_reproducible() {
    let a = Dream6800::new(Dream6800Options::default()).unwrap();
    let b = Dream6800::new(Dream6800Options::default()).unwrap();
    assert_eq!(a.memory()[0x400..0x800], b.memory()[0x400..0x800]);
    // noise, not zeros
    assert!(a.memory()[0x400..0x800].iter().any(|&x| x != 0));

    let clean = Dream6800::new(Dream6800Options {
        clean_ram: true,
        ..Dream6800Options::default()
    })
    .unwrap();
    assert!(clean.memory()[0x400..0x800].iter().all(|&x| x == 0));
}
