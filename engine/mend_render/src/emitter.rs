//! Output emitter.
//!
//! Abstraction for output production during rendering. The repair core only
//! ever renders to in-memory strings; the artifact is handed to external
//! compile/test collaborators, never written to disk here.

/// Trait for emitting rendered source text.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit a single space.
    fn emit_space(&mut self);
}

/// String-based emitter.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    /// Create a new string emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the rendered output.
    pub fn output(self) -> String {
        self.buffer
    }

    /// Current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Current length of the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_emitter() {
        let mut emitter = StringEmitter::new();
        emitter.emit("return");
        emitter.emit_space();
        emitter.emit("0;");
        emitter.emit_newline();
        assert_eq!(emitter.as_str(), "return 0;\n");
        assert_eq!(emitter.len(), 10);
        assert_eq!(emitter.output(), "return 0;\n");
    }

    #[test]
    fn test_empty() {
        let emitter = StringEmitter::new();
        assert!(emitter.is_empty());
    }
}
