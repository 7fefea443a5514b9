//! C target using the header's `w`, `g`, `o` and `f` macros.
//!
//! Every pointer move is followed by `f`, which grows the tape to exactly
//! `p - t + 1` bytes when the pointer runs past its end. Leftward moves are
//! never checked against the start of the tape.

use std::io::{self, Write};

use super::CodeGenerator;
use crate::target::Target;

#[derive(Debug, Clone, Copy, Default)]
pub struct CGenerator;

fn sign(value: isize) -> char {
    if value < 0 {
        '-'
    } else {
        '+'
    }
}

impl CodeGenerator for CGenerator {
    fn target(&self) -> Target {
        Target::C
    }

    fn emit_move(&self, out: &mut dyn Write, offset: isize) -> io::Result<()> {
        write!(out, "p{}={};f;", sign(offset), offset.unsigned_abs())
    }

    fn emit_delta(&self, out: &mut dyn Write, delta: isize) -> io::Result<()> {
        write!(out, "*p{}={};", sign(delta), delta.unsigned_abs())
    }

    fn emit_output(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"o;")
    }

    fn emit_input(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"g;")
    }

    fn emit_loop_open(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"w{")
    }

    fn emit_loop_close(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"}")
    }
}
