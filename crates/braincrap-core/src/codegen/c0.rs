//! C target calling the helper functions `a`..`f` defined in the C0 header.

use std::io::{self, Write};

use super::CodeGenerator;
use crate::target::Target;

#[derive(Debug, Clone, Copy, Default)]
pub struct C0Generator;

impl CodeGenerator for C0Generator {
    fn target(&self) -> Target {
        Target::C0
    }

    fn emit_move(&self, out: &mut dyn Write, offset: isize) -> io::Result<()> {
        let helper = if offset < 0 { 'b' } else { 'a' };
        write!(out, "{helper}({});", offset.unsigned_abs())
    }

    fn emit_delta(&self, out: &mut dyn Write, delta: isize) -> io::Result<()> {
        let helper = if delta < 0 { 'd' } else { 'c' };
        write!(out, "{helper}({});", delta.unsigned_abs())
    }

    fn emit_output(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"e();")
    }

    fn emit_input(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"f();")
    }

    fn emit_loop_open(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"while(*p){")
    }

    fn emit_loop_close(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"}")
    }
}
