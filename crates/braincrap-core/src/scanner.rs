//! Scanner/dispatcher
//!
//! Walks a source buffer once, left to right. At each position it tries, in
//! order: a `#` macro definition, a `$` include, a `;` comment, a macro
//! invocation, and finally an instruction handed to the code generator.
//! Anything else is skipped silently.
//!
//! Macro bodies and included files are scanned by pushing a new frame on an
//! explicit stack rather than by recursion. Each frame carries its own
//! source, display name and bracket counter; all frames share the macro
//! table and the output sink.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::codegen::{generator_for, CodeGenerator, Instruction};
use crate::include::Includer;
use crate::macros::{is_valid_name, MacroTable};
use crate::target::Target;
use crate::{BalanceScope, BraincrapError, Result, TranslateConfig};

#[derive(Debug)]
struct Frame {
    source: Rc<[u8]>,
    display_name: Rc<str>,
    /// Scanning stops at the first NUL byte
    end: usize,
    cursor: usize,
    balance: isize,
    /// Set for included files; released when the frame is popped
    include_key: Option<PathBuf>,
}

impl Frame {
    fn new(source: Rc<[u8]>, display_name: Rc<str>) -> Self {
        let end = source.iter().position(|&b| b == 0).unwrap_or(source.len());
        Self {
            source,
            display_name,
            end,
            cursor: 0,
            balance: 0,
            include_key: None,
        }
    }

    fn file(&self) -> String {
        self.display_name.to_string()
    }

    fn text(&self) -> &[u8] {
        &self.source[..self.end]
    }
}

/// Index of the first `\n` at or after `start`, or the end of `source`.
fn line_end(source: &[u8], start: usize) -> usize {
    let start = start.min(source.len());
    source[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(source.len(), |n| start + n)
}

/// Length of the run of identical bytes starting at `start`.
fn run_length(source: &[u8], start: usize) -> usize {
    let byte = source[start];
    source[start..].iter().take_while(|&&b| b == byte).count()
}

/// Translates Braincrap source into one target dialect.
///
/// Macros defined during one `translate` call stay defined for later calls
/// on the same translator.
pub struct Translator<W: Write> {
    generator: Box<dyn CodeGenerator>,
    macros: MacroTable,
    includer: Includer,
    config: TranslateConfig,
    output: W,
    global_balance: isize,
}

impl<W: Write> Translator<W> {
    pub fn new(target: Target, config: TranslateConfig, output: W) -> Self {
        let includer = Includer::new(config.include_dirs.clone());
        Self {
            generator: generator_for(target),
            macros: MacroTable::new(),
            includer,
            config,
            output,
            global_balance: 0,
        }
    }

    pub fn target(&self) -> Target {
        self.generator.target()
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    fn tracks_balance(&self) -> bool {
        self.generator.tracks_balance() || self.config.strict_brackets
    }

    /// Translate `source`, attributing diagnostics to `display_name`.
    pub fn translate(&mut self, source: impl AsRef<[u8]>, display_name: &str) -> Result<()> {
        let root = Frame::new(Rc::from(source.as_ref()), Rc::from(display_name));
        self.translate_frame(root)
    }

    /// Translate `source` read from `path`. The file counts as open for
    /// cycle detection, so it may not include itself.
    pub fn translate_file(
        &mut self,
        source: impl AsRef<[u8]>,
        display_name: &str,
        path: &Path,
    ) -> Result<()> {
        let mut root = Frame::new(Rc::from(source.as_ref()), Rc::from(display_name));
        let key = Includer::key_for(path);
        self.includer.enter(&key);
        root.include_key = Some(key);
        self.translate_frame(root)
    }

    fn translate_frame(&mut self, root: Frame) -> Result<()> {
        let display_name = root.file();
        debug!(
            "Translating {} ({} bytes) for target {}",
            display_name,
            root.end,
            self.target()
        );

        self.global_balance = 0;
        let mut stack = vec![root];
        let result = self.run(&mut stack, &display_name);

        // Frames left behind by an error still hold include keys.
        for frame in stack.drain(..) {
            if let Some(key) = frame.include_key {
                self.includer.leave(&key);
            }
        }
        result?;

        self.output.flush()?;
        debug!("Finished {} with {} macros defined", display_name, self.macros.len());
        Ok(())
    }

    fn run(&mut self, stack: &mut Vec<Frame>, root_name: &str) -> Result<()> {
        while let Some(frame) = stack.last_mut() {
            if frame.cursor >= frame.end {
                if let Some(frame) = stack.pop() {
                    self.finish_frame(frame)?;
                }
                continue;
            }

            if let Some(child) = self.step(frame)? {
                if stack.len() >= self.config.max_depth {
                    let file = stack.last().map_or_else(|| child.file(), Frame::file);
                    if let Some(key) = &child.include_key {
                        self.includer.leave(key);
                    }
                    return Err(BraincrapError::ExpansionTooDeep {
                        file,
                        depth: self.config.max_depth,
                    });
                }
                trace!("Entering {} at depth {}", child.display_name, stack.len());
                stack.push(child);
            }
        }

        if self.config.balance_scope == BalanceScope::Global
            && self.tracks_balance()
            && self.global_balance != 0
        {
            return Err(BraincrapError::UnmatchedOpenBracket {
                file: root_name.to_string(),
            });
        }
        Ok(())
    }

    fn finish_frame(&mut self, frame: Frame) -> Result<()> {
        if let Some(key) = &frame.include_key {
            self.includer.leave(key);
        }
        trace!("Leaving {}", frame.display_name);

        if self.config.balance_scope == BalanceScope::PerFrame
            && self.tracks_balance()
            && frame.balance != 0
        {
            return Err(BraincrapError::UnmatchedOpenBracket { file: frame.file() });
        }
        Ok(())
    }

    /// Handle the token at the frame's cursor. Returns a frame to push when
    /// the token expands to more source.
    fn step(&mut self, frame: &mut Frame) -> Result<Option<Frame>> {
        let source = Rc::clone(&frame.source);
        let source = &source[..frame.end];
        let offset = frame.cursor;

        match source[offset] {
            b'#' => {
                let name = source.get(offset + 1).copied().unwrap_or(0);
                if !is_valid_name(name) {
                    return Err(BraincrapError::InvalidMacroChar {
                        file: frame.file(),
                        name: char::from(name),
                        offset,
                    });
                }
                let end = line_end(source, offset + 2);
                self.macros.define(name, &source[offset + 2..end]);
                debug!(
                    "Defined macro '{}' in {} at position {}",
                    char::from(name),
                    frame.display_name,
                    offset
                );
                frame.cursor = end;
                Ok(None)
            }
            b'$' => {
                let end = line_end(source, offset + 1);
                let name = String::from_utf8_lossy(&source[offset + 1..end]).into_owned();
                frame.cursor = end;
                self.include(frame, name).map(Some)
            }
            b';' => {
                frame.cursor = line_end(source, offset);
                Ok(None)
            }
            byte => {
                if let Some(body) = self.macros.lookup(byte) {
                    frame.cursor += 1;
                    return Ok(Some(Frame::new(body, Rc::clone(&frame.display_name))));
                }
                match Instruction::from_byte(byte) {
                    Some(instruction) => self.generate(frame, instruction)?,
                    None => frame.cursor += 1,
                }
                Ok(None)
            }
        }
    }

    fn include(&mut self, frame: &Frame, name: String) -> Result<Frame> {
        let file = self
            .includer
            .load(&name)
            .map_err(|source| BraincrapError::IncludeNotFound {
                file: frame.file(),
                path: name.clone(),
                source,
            })?;

        if !self.includer.enter(&file.key) {
            return Err(BraincrapError::IncludeCycle {
                file: frame.file(),
                path: name,
            });
        }

        let mut child = Frame::new(Rc::from(file.content), Rc::from(name));
        child.include_key = Some(file.key);
        Ok(child)
    }

    fn generate(&mut self, frame: &mut Frame, instruction: Instruction) -> Result<()> {
        let offset = frame.cursor;
        let count = if instruction.is_compactable() && self.generator.compacts_runs() {
            run_length(frame.text(), offset)
        } else {
            1
        };

        if self.tracks_balance() {
            let balance = match self.config.balance_scope {
                BalanceScope::PerFrame => &mut frame.balance,
                BalanceScope::Global => &mut self.global_balance,
            };
            match instruction {
                Instruction::LoopOpen => *balance += 1,
                Instruction::LoopClose => {
                    *balance -= 1;
                    if *balance < 0 {
                        return Err(BraincrapError::UnmatchedCloseBracket {
                            file: frame.file(),
                            offset,
                        });
                    }
                }
                _ => {}
            }
        }

        self.generator.emit(&mut self.output, instruction, count)?;
        frame.cursor += count;
        Ok(())
    }
}

/// Translate `source` with the default configuration, writing the body for
/// `target` to `output`.
pub fn translate<W: Write + ?Sized>(
    source: impl AsRef<[u8]>,
    display_name: &str,
    target: Target,
    output: &mut W,
) -> Result<()> {
    Translator::new(target, TranslateConfig::default(), output).translate(source, display_name)
}
