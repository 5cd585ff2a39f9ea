use crate::consts::{
    FONT_ADDR, FONT_DATA, INITIAL_PC, REGISTER_COUNT, STACK_DEPTH, TOTAL_RAM_SIZE,
};
use std::ops::Range;

/// Why a memory or stack access was refused. The interpreter attaches the
/// faulting pc and opcode before handing it to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    StackOverflow,
    StackUnderflow,
    /// First address that fell outside of RAM.
    OutOfRange(usize),
}

/// Memory plus the register file.
#[derive(Clone)]
pub struct State {
    pub ram: [u8; TOTAL_RAM_SIZE as usize],
    pub pc: u16,
    pub registers: [u8; REGISTER_COUNT],
    pub index_register: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    stack: [u16; STACK_DEPTH],
    sp: usize,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub fn new() -> Self {
        let mut ram = [0; TOTAL_RAM_SIZE as usize];
        let font = FONT_ADDR as usize;
        ram[font..font + FONT_DATA.len()].copy_from_slice(&FONT_DATA);
        State {
            ram,
            pc: INITIAL_PC,
            registers: [0; REGISTER_COUNT],
            index_register: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    /// Bounds-checked `[addr, addr + len)` as a RAM index range.
    pub fn span(addr: u16, len: usize) -> Result<Range<usize>, Fault> {
        let start = addr as usize;
        let end = start + len;
        if end > TOTAL_RAM_SIZE as usize {
            return Err(Fault::OutOfRange(start.max(TOTAL_RAM_SIZE as usize)));
        }
        Ok(start..end)
    }

    pub fn read(&self, addr: u16, len: usize) -> Result<&[u8], Fault> {
        Ok(&self.ram[Self::span(addr, len)?])
    }

    pub fn write(&mut self, addr: u16, data: &[u8]) -> Result<(), Fault> {
        let range = Self::span(addr, data.len())?;
        self.ram[range].copy_from_slice(data);
        Ok(())
    }

    /// Big-endian instruction word at `addr`.
    pub fn read_word(&self, addr: u16) -> Result<u16, Fault> {
        let word = self.read(addr, 2)?;
        Ok((word[0] as u16) << 8 | word[1] as u16)
    }

    pub fn push(&mut self, value: u16) -> Result<(), Fault> {
        if self.sp >= STACK_DEPTH {
            return Err(Fault::StackOverflow);
        }
        self.stack[self.sp] = value;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }

    pub fn stack_pointer(&self) -> usize {
        self.sp
    }

    /// Live stack entries, oldest first.
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.sp]
    }

    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}
