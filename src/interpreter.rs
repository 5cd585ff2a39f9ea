use crate::consts::{FLAG_REGISTER, FONT_ADDR, FONT_GLYPH_HEIGHT, INITIAL_PC, TOTAL_RAM_SIZE};
use crate::display::Framebuffer;
use crate::keypad::Keypad;
use crate::parser::Instruction;
use crate::state::{Fault, State};
use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

pub struct Interpreter<R = StdRng> {
    state: State,
    display: Framebuffer,
    keypad: Keypad,
    rng: R,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl<R: Rng> Interpreter<R> {
    /// Use `rng` as the source for `CXNN`.
    pub fn with_rng(rng: R) -> Self {
        Interpreter {
            state: State::new(),
            display: Framebuffer::new(),
            keypad: Keypad::new(),
            rng,
        }
    }

    /// Copy `rom` into memory at the program base address.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<()> {
        let available = (TOTAL_RAM_SIZE - INITIAL_PC) as usize;
        if rom.len() > available {
            return Err(Error::ProgramTooLarge {
                size: rom.len(),
                available,
            });
        }
        self.state
            .write(INITIAL_PC, rom)
            .map_err(|_| Error::ProgramTooLarge {
                size: rom.len(),
                available,
            })?;
        debug!(bytes = rom.len(), "program loaded");
        Ok(())
    }

    /// Back to power-on state. The program region is zeroed, so the program
    /// has to be loaded again.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.display.clear();
        self.keypad.release_all();
        debug!("machine reset");
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set(key, pressed);
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.display
    }

    pub fn is_sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// True when the next instruction is a jump to itself, which programs
    /// use to stop.
    pub fn is_halted(&self) -> bool {
        let pc = self.state.pc;
        matches!(
            self.state.read_word(pc).ok().and_then(Instruction::from_opcode),
            Some(Instruction::Jump(target)) if target == pc
        )
    }

    /// Fetch, decode and execute one instruction, then tick both timers.
    ///
    /// On error the machine is left exactly as it was before the call.
    pub fn cycle(&mut self) -> Result<()> {
        let pc = self.state.pc;
        let opcode = self.state.read_word(pc).map_err(|fault| {
            let address = match fault {
                Fault::OutOfRange(address) => address,
                _ => pc as usize,
            };
            warn!(pc, address, "fetch outside of memory");
            Error::FetchOutOfRange { pc, address }
        })?;

        self.state.pc = pc.wrapping_add(2);

        if let Err(fault) = self.step(opcode) {
            self.state.pc = pc;
            let err = fault_to_error(fault, pc, opcode);
            warn!(pc, opcode, %err, "instruction failed");
            return Err(err);
        }

        self.state.tick_timers();
        Ok(())
    }

    fn step(&mut self, opcode: u16) -> std::result::Result<(), Fault> {
        let Some(instruction) = Instruction::from_opcode(opcode) else {
            debug!(opcode, "ignoring unknown instruction");
            return Ok(());
        };
        trace!(pc = self.state.pc.wrapping_sub(2), opcode, %instruction);

        match instruction {
            Instruction::SystemCall(address) => {
                debug!(address, "ignoring machine code call");
            }
            Instruction::ClearScreen => {
                self.display.clear();
            }
            Instruction::ReturnFromSubroutine => {
                self.state.pc = self.state.pop()?;
            }
            Instruction::Jump(address) => {
                self.state.pc = address;
            }
            Instruction::Call(address) => {
                self.state.push(self.state.pc)?;
                self.state.pc = address;
            }
            Instruction::SkipIfEqualByte(register, value) => {
                if self.state.registers[register] == value {
                    self.state.pc += 2
                }
            }
            Instruction::SkipIfNotEqualByte(register, value) => {
                if self.state.registers[register] != value {
                    self.state.pc += 2
                }
            }
            Instruction::SkipIfRegistersEqual(register_x, register_y) => {
                if self.state.registers[register_x] == self.state.registers[register_y] {
                    self.state.pc += 2
                }
            }
            Instruction::SetRegisterToValue(register, value) => {
                self.state.registers[register] = value;
            }
            Instruction::AddToRegister(register, value) => {
                self.state.registers[register] = self.state.registers[register].wrapping_add(value);
            }
            Instruction::SetRegisterToRegisterValue(register_x, register_y) => {
                self.state.registers[register_x] = self.state.registers[register_y];
            }
            Instruction::RegistersBitwiseOr(register_x, register_y) => {
                self.state.registers[register_x] |= self.state.registers[register_y];
            }
            Instruction::RegistersBitwiseAnd(register_x, register_y) => {
                self.state.registers[register_x] &= self.state.registers[register_y];
            }
            Instruction::RegistersBitwiseXor(register_x, register_y) => {
                self.state.registers[register_x] ^= self.state.registers[register_y];
            }
            Instruction::RegistersSumWithOverflow(register_x, register_y) => {
                let vx = self.state.registers[register_x];
                let vy = self.state.registers[register_y];

                let (sum, overflow) = vx.overflowing_add(vy);
                self.set_with_flag(register_x, sum, overflow);
            }
            Instruction::SubtractRegisterFromRegisterValue(register_x, register_y) => {
                let vx = self.state.registers[register_x];
                let vy = self.state.registers[register_y];

                let (diff, borrow) = vx.overflowing_sub(vy);
                self.set_with_flag(register_x, diff, !borrow);
            }
            Instruction::ShiftRegisterBitsRight(register) => {
                let vx = self.state.registers[register];
                self.set_with_flag(register, vx >> 1, vx & 1 == 1);
            }
            Instruction::SubtractRegisterValueFromRegister(register_x, register_y) => {
                let vx = self.state.registers[register_x];
                let vy = self.state.registers[register_y];

                let (diff, borrow) = vy.overflowing_sub(vx);
                self.set_with_flag(register_x, diff, !borrow);
            }
            Instruction::ShiftRegisterBitsLeft(register) => {
                let vx = self.state.registers[register];
                self.set_with_flag(register, vx << 1, vx >> 7 == 1);
            }
            Instruction::SkipIfRegistersNotEqual(register_x, register_y) => {
                if self.state.registers[register_x] != self.state.registers[register_y] {
                    self.state.pc += 2;
                }
            }
            Instruction::SetIndexRegisterToValue(value) => {
                self.state.index_register = value;
            }
            Instruction::JumpByValue(value) => {
                self.state.pc = self.state.registers[0] as u16 + value;
            }
            Instruction::SetRegisterToRandAndValue(register, value) => {
                let n: u8 = self.rng.random();
                self.state.registers[register] = n & value;
            }
            Instruction::DrawSprite(register_x, register_y, height) => {
                let x = self.state.registers[register_x];
                let y = self.state.registers[register_y];
                let sprite = self.state.read(self.state.index_register, height as usize)?;
                let collision = self.display.draw(x, y, sprite);
                self.state.registers[FLAG_REGISTER] = collision as u8;
            }
            Instruction::SkipIfKeyPressed(register) => {
                if self.keypad.is_pressed(self.state.registers[register]) {
                    self.state.pc += 2;
                }
            }
            Instruction::SkipIfKeyNotPressed(register) => {
                if !self.keypad.is_pressed(self.state.registers[register]) {
                    self.state.pc += 2;
                }
            }
            Instruction::SetRegisterToDelayTimerValue(register) => {
                self.state.registers[register] = self.state.delay_timer;
            }
            Instruction::WaitForKeyPress(register) => match self.keypad.first_pressed() {
                Some(key) => self.state.registers[register] = key,
                None => self.state.pc -= 2,
            },
            Instruction::SetDelayTimerToRegisterValue(register) => {
                self.state.delay_timer = self.state.registers[register];
            }
            Instruction::SetSoundTimerToRegisterValue(register) => {
                self.state.sound_timer = self.state.registers[register];
            }
            Instruction::AddRegisterToIndexRegister(register) => {
                self.state.index_register = self
                    .state
                    .index_register
                    .wrapping_add(self.state.registers[register] as u16);
            }
            Instruction::SetIndexRegisterToSpriteForRegister(register) => {
                let character = self.state.registers[register] as u16;
                self.state.index_register = FONT_ADDR + character * FONT_GLYPH_HEIGHT;
            }
            Instruction::StoreBinaryCodedDecimalAtIndexRegisterValue(register) => {
                let num = self.state.registers[register];
                self.state
                    .write(self.state.index_register, &[num / 100, (num / 10) % 10, num % 10])?;
            }
            Instruction::DumpRegistersToMemoryAtIndexRegister(register) => {
                let range = State::span(self.state.index_register, register + 1)?;
                self.state.ram[range].copy_from_slice(&self.state.registers[..=register]);
            }
            Instruction::LoadMemoryToRegistersAtIndexRegister(register) => {
                let range = State::span(self.state.index_register, register + 1)?;
                self.state.registers[..=register].copy_from_slice(&self.state.ram[range]);
            }
        }

        Ok(())
    }

    /// Result first, then VF, so a VF destination ends up holding the flag.
    fn set_with_flag(&mut self, register: usize, value: u8, flag: bool) {
        self.state.registers[register] = value;
        self.state.registers[FLAG_REGISTER] = flag as u8;
    }
}

fn fault_to_error(fault: Fault, pc: u16, opcode: u16) -> Error {
    match fault {
        Fault::StackOverflow => Error::StackOverflow { pc, opcode },
        Fault::StackUnderflow => Error::StackUnderflow { pc, opcode },
        Fault::OutOfRange(address) => Error::MemoryOutOfRange {
            pc,
            opcode,
            address,
        },
    }
}
