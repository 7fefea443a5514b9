//! Code generation backends
//!
//! The scanner classifies instruction bytes and measures runs; a
//! `CodeGenerator` turns each (instruction, count) pair into target text.

use std::io::{self, Write};

use crate::target::Target;

pub mod bf;
pub mod c;
pub mod c0;

pub use bf::BfGenerator;
pub use c::CGenerator;
pub use c0::C0Generator;

/// The eight Brainfuck instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Right,
    Left,
    Increment,
    Decrement,
    Output,
    Input,
    LoopOpen,
    LoopClose,
}

impl Instruction {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'>' => Some(Self::Right),
            b'<' => Some(Self::Left),
            b'+' => Some(Self::Increment),
            b'-' => Some(Self::Decrement),
            b'.' => Some(Self::Output),
            b',' => Some(Self::Input),
            b'[' => Some(Self::LoopOpen),
            b']' => Some(Self::LoopClose),
            _ => None,
        }
    }

    pub fn symbol(self) -> u8 {
        match self {
            Self::Right => b'>',
            Self::Left => b'<',
            Self::Increment => b'+',
            Self::Decrement => b'-',
            Self::Output => b'.',
            Self::Input => b',',
            Self::LoopOpen => b'[',
            Self::LoopClose => b']',
        }
    }

    /// Pointer moves and cell deltas collapse into one counted statement.
    pub fn is_compactable(self) -> bool {
        matches!(
            self,
            Self::Right | Self::Left | Self::Increment | Self::Decrement
        )
    }
}

/// Emission interface shared by all targets.
///
/// Counts are always at least one. Bracket bookkeeping belongs to the
/// scanner; `tracks_balance` only tells it whether to do so.
pub trait CodeGenerator {
    /// Target this generator writes
    fn target(&self) -> Target;

    /// Whether runs of `>` `<` `+` `-` are collapsed before emission
    fn compacts_runs(&self) -> bool {
        true
    }

    /// Whether `[`/`]` balance is enforced for this target
    fn tracks_balance(&self) -> bool {
        true
    }

    /// Move the tape pointer; positive is rightward.
    fn emit_move(&self, out: &mut dyn Write, offset: isize) -> io::Result<()>;

    /// Add `delta` to the current cell.
    fn emit_delta(&self, out: &mut dyn Write, delta: isize) -> io::Result<()>;

    fn emit_output(&self, out: &mut dyn Write) -> io::Result<()>;

    fn emit_input(&self, out: &mut dyn Write) -> io::Result<()>;

    fn emit_loop_open(&self, out: &mut dyn Write) -> io::Result<()>;

    fn emit_loop_close(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Emit `count` repetitions of `instruction`.
    fn emit(&self, out: &mut dyn Write, instruction: Instruction, count: usize) -> io::Result<()> {
        let count = isize::try_from(count)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "run too long"))?;
        match instruction {
            Instruction::Right => self.emit_move(out, count),
            Instruction::Left => self.emit_move(out, -count),
            Instruction::Increment => self.emit_delta(out, count),
            Instruction::Decrement => self.emit_delta(out, -count),
            Instruction::Output => (0..count).try_for_each(|_| self.emit_output(out)),
            Instruction::Input => (0..count).try_for_each(|_| self.emit_input(out)),
            Instruction::LoopOpen => (0..count).try_for_each(|_| self.emit_loop_open(out)),
            Instruction::LoopClose => (0..count).try_for_each(|_| self.emit_loop_close(out)),
        }
    }
}

/// Create the generator for `target`
pub fn generator_for(target: Target) -> Box<dyn CodeGenerator> {
    match target {
        Target::C => Box::new(CGenerator),
        Target::Bf => Box::new(BfGenerator),
        Target::C0 => Box::new(C0Generator),
    }
}

#[cfg(test)]
pub(crate) fn render(generator: &dyn CodeGenerator, instruction: Instruction, count: usize) -> String {
    let mut out = Vec::new();
    generator.emit(&mut out, instruction, count).unwrap();
    String::from_utf8(out).unwrap()
}
