//! Line editor backed by rustyline, with history and a mirror of the line in
//! progress for the redisplay coordinator.
//!
//! On a terminal, repaints go through rustyline's external printer: the
//! editor thread clears its line and redraws prompt and buffer itself, so a
//! repaint never lands in the middle of one of its own refreshes.

use crate::error::ConsoleError;
use crate::ports::{InputBuffer, LineEditor, PromptRepainter, ReadOutcome};
use parking_lot::RwLock;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{ColorMode, Config, Editor, ExternalPrinter, Helper};
use std::borrow::Cow;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Unsent input shared between the editor (writer) and redisplay (reader).
#[derive(Debug, Clone, Default)]
pub struct SharedInputBuffer {
    line: Arc<RwLock<String>>,
}

impl SharedInputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, line: &str) {
        let mut guard = self.line.write();
        if guard.as_str() != line {
            guard.clear();
            guard.push_str(line);
        }
    }

    pub fn clear(&self) {
        self.line.write().clear();
    }
}

impl InputBuffer for SharedInputBuffer {
    fn pending(&self) -> String {
        self.line.read().clone()
    }
}

/// Helper that copies the edited line into the shared buffer on every refresh.
/// rustyline only consults the highlighter when colors are on, so the editor
/// runs with `ColorMode::Forced`; the line is returned unstyled.
struct MirrorHelper {
    buffer: SharedInputBuffer,
}

impl Completer for MirrorHelper {
    type Candidate = String;
}

impl Hinter for MirrorHelper {
    type Hint = String;
}

impl Validator for MirrorHelper {}

impl Highlighter for MirrorHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        self.buffer.replace(line);
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        self.buffer.replace(line);
        true
    }
}

impl Helper for MirrorHelper {}

/// Repaint request delivered to the editor thread. An empty message makes
/// rustyline emit a line break, then redraw the prompt and its live buffer.
struct EditorRepainter<P> {
    printer: P,
}

impl<P: ExternalPrinter + Send> PromptRepainter for EditorRepainter<P> {
    fn repaint(&mut self, _prompt: &str, _pending: &str) -> io::Result<()> {
        self.printer
            .print(String::new())
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    }
}

/// Interactive editor with persistent history.
pub struct RustylineEditor {
    editor: Editor<MirrorHelper, FileHistory>,
    buffer: SharedInputBuffer,
    history_file: Option<PathBuf>,
}

impl RustylineEditor {
    /// Create the editor and load history from `history_file` when given.
    pub fn new(history_file: Option<PathBuf>, history_size: usize) -> Result<Self, ConsoleError> {
        let config = Config::builder()
            .max_history_size(history_size)
            .map_err(editor_error)?
            .auto_add_history(false)
            .color_mode(ColorMode::Forced)
            .build();
        let mut editor: Editor<MirrorHelper, FileHistory> =
            Editor::with_config(config).map_err(editor_error)?;
        let buffer = SharedInputBuffer::new();
        editor.set_helper(Some(MirrorHelper {
            buffer: buffer.clone(),
        }));

        if let Some(path) = &history_file {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    warn!(
                        "Error reading history file {}: {}. No command history available.",
                        path.display(),
                        e
                    );
                }
            }
        }

        Ok(Self {
            editor,
            buffer,
            history_file,
        })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ConsoleError> {
        self.buffer.clear();
        let result = self.editor.readline(prompt);
        self.buffer.clear();
        match result {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::EndOfInput),
            Err(e) => Err(editor_error(e)),
        }
    }

    fn record(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            debug!("Failed to add history entry: {}", e);
        }
    }

    fn input_buffer(&self) -> Arc<dyn InputBuffer> {
        Arc::new(self.buffer.clone())
    }

    fn repainter(&mut self) -> Option<Box<dyn PromptRepainter>> {
        match self.editor.create_external_printer() {
            Ok(printer) => Some(Box::new(EditorRepainter { printer })),
            Err(e) => {
                debug!("No external printer ({}); repainting through the terminal", e);
                None
            }
        }
    }

    fn persist_history(&mut self) -> Result<(), ConsoleError> {
        let Some(path) = &self.history_file else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.editor.save_history(path).map_err(editor_error)
    }
}

fn editor_error(e: ReadlineError) -> ConsoleError {
    ConsoleError::EditorError(e.to_string())
}
