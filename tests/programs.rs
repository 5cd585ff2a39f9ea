use chip8vm::{Error, Interpreter};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn load(program: &[u16]) -> Interpreter {
    let mut vm = Interpreter::with_rng(StdRng::seed_from_u64(0));
    let rom: Vec<u8> = program.iter().flat_map(|w| w.to_be_bytes()).collect();
    vm.load_program(&rom).unwrap();
    vm
}

#[test]
fn skip_consumes_the_jump_back() {
    let mut vm = load(&[0x6005, 0x6105, 0x5010, 0x1204, 0x0000]);
    for _ in 0..3 {
        vm.cycle().unwrap();
    }
    assert_eq!(vm.state().pc, 0x208);
    assert_eq!(vm.state().registers[0], 5);
    assert_eq!(vm.state().registers[1], 5);

    for _ in 0..50 {
        vm.cycle().unwrap();
    }
    // 0x0000 is an ignored machine code call and memory is zero past the
    // program, so pc only walks forward through no-ops
    assert_eq!(vm.state().pc, 0x208 + 2 * 50);
    assert_eq!(vm.state().stack_pointer(), 0);
    assert_eq!(vm.state().registers[0], 5);
}

#[test]
fn skip_lands_on_terminal_self_jump() {
    let mut vm = load(&[0x6005, 0x6105, 0x5010, 0x1204, 0x1208]);
    for _ in 0..3 {
        vm.cycle().unwrap();
    }
    assert_eq!(vm.state().pc, 0x208);
    assert!(vm.is_halted());

    for _ in 0..50 {
        vm.cycle().unwrap();
        assert_eq!(vm.state().pc, 0x208);
    }
    assert_eq!(vm.state().registers[..2], [5, 5]);
}

#[test]
fn self_jump_halts() {
    let mut vm = load(&[0x6001, 0x1202]);
    assert!(!vm.is_halted());
    vm.cycle().unwrap();
    assert!(vm.is_halted());
    for _ in 0..10 {
        vm.cycle().unwrap();
    }
    assert_eq!(vm.state().pc, 0x202);
}

#[test]
fn wait_for_key_stalls_until_pressed() {
    let mut vm = load(&[0x6A42, 0xF50A, 0x6B01]);
    vm.cycle().unwrap();
    let registers = vm.state().registers;

    for _ in 0..20 {
        vm.cycle().unwrap();
        assert_eq!(vm.state().pc, 0x202);
        assert_eq!(vm.state().registers, registers);
    }

    vm.set_key(0xE, true);
    vm.cycle().unwrap();
    assert_eq!(vm.state().registers[5], 0xE);
    assert_eq!(vm.state().pc, 0x204);
    vm.cycle().unwrap();
    assert_eq!(vm.state().registers[0xB], 1);
}

#[test]
fn countdown_with_delay_timer() {
    // LD V0, 10; LD DT, V0; loop: LD V1, DT; SE V1, 0; JP loop; JP self
    let mut vm = load(&[0x600A, 0xF015, 0xF107, 0x3100, 0x1204, 0x120A]);
    let mut cycles = 0;
    while !vm.is_halted() {
        vm.cycle().unwrap();
        cycles += 1;
        assert!(cycles < 100, "countdown never finished");
    }
    assert_eq!(vm.state().delay_timer, 0);
    assert_eq!(vm.state().pc, 0x20A);
}

#[test]
fn draws_score_digits() {
    // V0 = 137; BCD at 0x300; load V0..V2; draw each digit glyph
    let mut vm = load(&[
        0x6089, 0xA300, 0xF033, 0xF265, // digits in V0, V1, V2
        0x6300, 0x6400, // x, y
        0xF029, 0xD345, 0x7305, // hundreds
        0xF129, 0xD345, 0x7305, // tens
        0xF229, 0xD345, // ones
    ]);
    for _ in 0..14 {
        vm.cycle().unwrap();
    }
    assert_eq!(vm.state().registers[..3], [1, 3, 7]);
    assert_eq!(vm.state().registers[0xF], 0);

    let fb = vm.framebuffer();
    // "1" glyph starts 0x20: only column 2 lit on the top row
    assert!(!fb.pixel(1, 0) && fb.pixel(2, 0) && !fb.pixel(3, 0));
    // "3" glyph starts 0xF0 at x = 5
    assert!((5..9).all(|x| fb.pixel(x, 0)));
    // "7" glyph starts 0xF0 at x = 10
    assert!((10..14).all(|x| fb.pixel(x, 0)));
}

#[test]
fn sound_timer_runs_down() {
    let mut vm = load(&[0x6002, 0xF018, 0x1204]);
    vm.cycle().unwrap();
    assert!(!vm.is_sound_active());
    vm.cycle().unwrap();
    assert!(vm.is_sound_active());
    vm.cycle().unwrap();
    assert!(!vm.is_sound_active());
}

#[test]
fn errors_report_the_failing_instruction() {
    let mut vm = load(&[0x6001, 0x00EE]);
    vm.cycle().unwrap();
    let err = vm.cycle().unwrap_err();
    assert_eq!(
        err,
        Error::StackUnderflow {
            pc: 0x202,
            opcode: 0x00EE
        }
    );
    assert_eq!(err.to_string(), "stack underflow at 0x202 (opcode 00EE)");
    // the failure is repeatable because nothing moved
    assert_eq!(vm.cycle(), Err(err));
}

#[test]
fn oversized_program_is_rejected() {
    let mut vm = Interpreter::new();
    let err = vm.load_program(&vec![0; 4000]).unwrap_err();
    assert_eq!(
        err,
        Error::ProgramTooLarge {
            size: 4000,
            available: 3584
        }
    );
}
