pub mod consts;
pub mod display;
pub mod interpreter;
pub mod keypad;
pub mod parser;
pub mod state;

pub use display::Framebuffer;
pub use interpreter::Interpreter;
pub use keypad::Keypad;
pub use parser::Instruction;
pub use state::State;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("instruction fetch at {pc:#05x} reads past memory (address {address:#06x})")]
    FetchOutOfRange { pc: u16, address: usize },
    #[error("stack overflow at {pc:#05x} (opcode {opcode:04X})")]
    StackOverflow { pc: u16, opcode: u16 },
    #[error("stack underflow at {pc:#05x} (opcode {opcode:04X})")]
    StackUnderflow { pc: u16, opcode: u16 },
    #[error("address {address:#06x} out of range at {pc:#05x} (opcode {opcode:04X})")]
    MemoryOutOfRange { pc: u16, opcode: u16, address: usize },
    #[error("program of {size} bytes does not fit in {available} bytes of program memory")]
    ProgramTooLarge { size: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
