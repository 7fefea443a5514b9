//! Brainfuck target: instructions are copied through one for one.

use std::io::{self, Write};

use super::{CodeGenerator, Instruction};
use crate::target::Target;

#[derive(Debug, Clone, Copy, Default)]
pub struct BfGenerator;

fn repeat(out: &mut dyn Write, instruction: Instruction, count: usize) -> io::Result<()> {
    let symbol = instruction.symbol();
    (0..count).try_for_each(|_| out.write_all(&[symbol]))
}

impl CodeGenerator for BfGenerator {
    fn target(&self) -> Target {
        Target::Bf
    }

    fn compacts_runs(&self) -> bool {
        false
    }

    fn tracks_balance(&self) -> bool {
        false
    }

    fn emit_move(&self, out: &mut dyn Write, offset: isize) -> io::Result<()> {
        let instruction = if offset < 0 {
            Instruction::Left
        } else {
            Instruction::Right
        };
        repeat(out, instruction, offset.unsigned_abs())
    }

    fn emit_delta(&self, out: &mut dyn Write, delta: isize) -> io::Result<()> {
        let instruction = if delta < 0 {
            Instruction::Decrement
        } else {
            Instruction::Increment
        };
        repeat(out, instruction, delta.unsigned_abs())
    }

    fn emit_output(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(&[Instruction::Output.symbol()])
    }

    fn emit_input(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(&[Instruction::Input.symbol()])
    }

    fn emit_loop_open(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(&[Instruction::LoopOpen.symbol()])
    }

    fn emit_loop_close(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(&[Instruction::LoopClose.symbol()])
    }
}
