use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 0NNN - call machine code routine at NNN (ignored)
    SystemCall(u16),
    /// 00E0 - clear screen
    ClearScreen,
    /// 00EE - return from subroutine
    ReturnFromSubroutine,
    /// 1NNN - jump to NNN
    Jump(u16),
    /// 2NNN - call subroutine at NNN
    Call(u16),
    /// 3XNN - skip next if VX equals NN
    SkipIfEqualByte(usize, u8),
    /// 4XNN - skip next if VX does not equal NN
    SkipIfNotEqualByte(usize, u8),
    /// 5XY0 - skip next if VX equals VY
    SkipIfRegistersEqual(usize, usize),
    /// 6XNN - set VX to NN
    SetRegisterToValue(usize, u8),
    /// 7XNN - add NN to VX, VF untouched
    AddToRegister(usize, u8),
    /// 8XY0 - set VX to value of VY
    SetRegisterToRegisterValue(usize, usize),
    /// 8XY1 - set VX | VY
    RegistersBitwiseOr(usize, usize),
    /// 8XY2 - set VX & VY
    RegistersBitwiseAnd(usize, usize),
    /// 8XY3 - set VX ^ VY
    RegistersBitwiseXor(usize, usize),
    /// 8XY4 - add VY to VX, VF = carry
    RegistersSumWithOverflow(usize, usize),
    /// 8XY5 - VX = VX - VY, VF = no borrow
    SubtractRegisterFromRegisterValue(usize, usize),
    /// 8XY6 - VX >>= 1, VF = bit shifted out
    ShiftRegisterBitsRight(usize),
    /// 8XY7 - VX = VY - VX, VF = no borrow
    SubtractRegisterValueFromRegister(usize, usize),
    /// 8XYE - VX <<= 1, VF = bit shifted out
    ShiftRegisterBitsLeft(usize),
    /// 9XY0 - skip next if VX does not equal VY
    SkipIfRegistersNotEqual(usize, usize),
    /// ANNN - set I to NNN
    SetIndexRegisterToValue(u16),
    /// BNNN - jump to V0 + NNN
    JumpByValue(u16),
    /// CXNN - set VX to rand(0, 255) & NN
    SetRegisterToRandAndValue(usize, u8),
    /// DXYN - draw an N byte sprite from I at (VX, VY)
    DrawSprite(usize, usize, u8),
    /// EX9E - skip next if key VX is held
    SkipIfKeyPressed(usize),
    /// EXA1 - skip next if key VX is not held
    SkipIfKeyNotPressed(usize),
    /// FX07 - set VX to delay timer value
    SetRegisterToDelayTimerValue(usize),
    /// FX0A - wait for a key press, store it in VX
    WaitForKeyPress(usize),
    /// FX15 - set delay timer to VX
    SetDelayTimerToRegisterValue(usize),
    /// FX18 - set sound timer to VX
    SetSoundTimerToRegisterValue(usize),
    /// FX1E - add VX to I (don't consider overflow)
    AddRegisterToIndexRegister(usize),
    /// FX29 - set I to location of sprite for character in VX
    SetIndexRegisterToSpriteForRegister(usize),
    /// FX33 - store binary coded decimal at memory under I(I+1)(I+2)
    StoreBinaryCodedDecimalAtIndexRegisterValue(usize),
    /// FX55 - dump registers V0 to VX in memory, starting from I
    DumpRegistersToMemoryAtIndexRegister(usize),
    /// FX65 - load memory starting from I into V0 to VX
    LoadMemoryToRegistersAtIndexRegister(usize),
}

impl Instruction {
    /// Decode a big-endian instruction word. Words that match nothing return
    /// `None`; the interpreter runs those as no-ops.
    pub fn from_opcode(opcode: u16) -> Option<Self> {
        let n1 = ((opcode >> 12) & 0xF) as usize;
        let n2 = ((opcode >> 8) & 0xF) as usize;
        let n3 = ((opcode >> 4) & 0xF) as usize;
        let n4 = (opcode & 0xF) as usize;

        let address = opcode & 0x0FFF;
        let byte_value = (opcode & 0x00FF) as u8;

        let instruction = match (n1, n2, n3, n4) {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::ReturnFromSubroutine,
            (0, _, _, _) => Instruction::SystemCall(address),
            (1, _, _, _) => Instruction::Jump(address),
            (2, _, _, _) => Instruction::Call(address),
            (3, x, _, _) => Instruction::SkipIfEqualByte(x, byte_value),
            (4, x, _, _) => Instruction::SkipIfNotEqualByte(x, byte_value),
            (5, x, y, 0) => Instruction::SkipIfRegistersEqual(x, y),
            (6, x, _, _) => Instruction::SetRegisterToValue(x, byte_value),
            (7, x, _, _) => Instruction::AddToRegister(x, byte_value),
            (8, x, y, 0) => Instruction::SetRegisterToRegisterValue(x, y),
            (8, x, y, 1) => Instruction::RegistersBitwiseOr(x, y),
            (8, x, y, 2) => Instruction::RegistersBitwiseAnd(x, y),
            (8, x, y, 3) => Instruction::RegistersBitwiseXor(x, y),
            (8, x, y, 4) => Instruction::RegistersSumWithOverflow(x, y),
            (8, x, y, 5) => Instruction::SubtractRegisterFromRegisterValue(x, y),
            (8, x, _, 6) => Instruction::ShiftRegisterBitsRight(x),
            (8, x, y, 7) => Instruction::SubtractRegisterValueFromRegister(x, y),
            (8, x, _, 0xE) => Instruction::ShiftRegisterBitsLeft(x),
            (9, x, y, 0) => Instruction::SkipIfRegistersNotEqual(x, y),
            (0xA, _, _, _) => Instruction::SetIndexRegisterToValue(address),
            (0xB, _, _, _) => Instruction::JumpByValue(address),
            (0xC, x, _, _) => Instruction::SetRegisterToRandAndValue(x, byte_value),
            (0xD, x, y, n) => Instruction::DrawSprite(x, y, n as u8),
            (0xE, x, 9, 0xE) => Instruction::SkipIfKeyPressed(x),
            (0xE, x, 0xA, 1) => Instruction::SkipIfKeyNotPressed(x),
            (0xF, x, 0, 7) => Instruction::SetRegisterToDelayTimerValue(x),
            (0xF, x, 0, 0xA) => Instruction::WaitForKeyPress(x),
            (0xF, x, 1, 5) => Instruction::SetDelayTimerToRegisterValue(x),
            (0xF, x, 1, 8) => Instruction::SetSoundTimerToRegisterValue(x),
            (0xF, x, 1, 0xE) => Instruction::AddRegisterToIndexRegister(x),
            (0xF, x, 2, 9) => Instruction::SetIndexRegisterToSpriteForRegister(x),
            (0xF, x, 3, 3) => Instruction::StoreBinaryCodedDecimalAtIndexRegisterValue(x),
            (0xF, x, 5, 5) => Instruction::DumpRegistersToMemoryAtIndexRegister(x),
            (0xF, x, 6, 5) => Instruction::LoadMemoryToRegistersAtIndexRegister(x),
            _ => return None,
        };
        Some(instruction)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            SystemCall(a) => write!(f, "SYS {a:#05x}"),
            ClearScreen => write!(f, "CLS"),
            ReturnFromSubroutine => write!(f, "RET"),
            Jump(a) => write!(f, "JP {a:#05x}"),
            Call(a) => write!(f, "CALL {a:#05x}"),
            SkipIfEqualByte(x, nn) => write!(f, "SE V{x:X}, {nn:#04x}"),
            SkipIfNotEqualByte(x, nn) => write!(f, "SNE V{x:X}, {nn:#04x}"),
            SkipIfRegistersEqual(x, y) => write!(f, "SE V{x:X}, V{y:X}"),
            SetRegisterToValue(x, nn) => write!(f, "LD V{x:X}, {nn:#04x}"),
            AddToRegister(x, nn) => write!(f, "ADD V{x:X}, {nn:#04x}"),
            SetRegisterToRegisterValue(x, y) => write!(f, "LD V{x:X}, V{y:X}"),
            RegistersBitwiseOr(x, y) => write!(f, "OR V{x:X}, V{y:X}"),
            RegistersBitwiseAnd(x, y) => write!(f, "AND V{x:X}, V{y:X}"),
            RegistersBitwiseXor(x, y) => write!(f, "XOR V{x:X}, V{y:X}"),
            RegistersSumWithOverflow(x, y) => write!(f, "ADD V{x:X}, V{y:X}"),
            SubtractRegisterFromRegisterValue(x, y) => write!(f, "SUB V{x:X}, V{y:X}"),
            ShiftRegisterBitsRight(x) => write!(f, "SHR V{x:X}"),
            SubtractRegisterValueFromRegister(x, y) => write!(f, "SUBN V{x:X}, V{y:X}"),
            ShiftRegisterBitsLeft(x) => write!(f, "SHL V{x:X}"),
            SkipIfRegistersNotEqual(x, y) => write!(f, "SNE V{x:X}, V{y:X}"),
            SetIndexRegisterToValue(a) => write!(f, "LD I, {a:#05x}"),
            JumpByValue(a) => write!(f, "JP V0, {a:#05x}"),
            SetRegisterToRandAndValue(x, nn) => write!(f, "RND V{x:X}, {nn:#04x}"),
            DrawSprite(x, y, n) => write!(f, "DRW V{x:X}, V{y:X}, {n}"),
            SkipIfKeyPressed(x) => write!(f, "SKP V{x:X}"),
            SkipIfKeyNotPressed(x) => write!(f, "SKNP V{x:X}"),
            SetRegisterToDelayTimerValue(x) => write!(f, "LD V{x:X}, DT"),
            WaitForKeyPress(x) => write!(f, "LD V{x:X}, K"),
            SetDelayTimerToRegisterValue(x) => write!(f, "LD DT, V{x:X}"),
            SetSoundTimerToRegisterValue(x) => write!(f, "LD ST, V{x:X}"),
            AddRegisterToIndexRegister(x) => write!(f, "ADD I, V{x:X}"),
            SetIndexRegisterToSpriteForRegister(x) => write!(f, "LD F, V{x:X}"),
            StoreBinaryCodedDecimalAtIndexRegisterValue(x) => write!(f, "LD B, V{x:X}"),
            DumpRegistersToMemoryAtIndexRegister(x) => write!(f, "LD [I], V{x:X}"),
            LoadMemoryToRegistersAtIndexRegister(x) => write!(f, "LD V{x:X}, [I]"),
        }
    }
}
