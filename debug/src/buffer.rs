//! Append-only output buffer the walker renders into. A thin, task-specific wrapper over
//! `String` — the explicit Non-goal on "generic allocator, dynamic-array, and buffer
//! utilities" rules out reaching for a general byte-buffer crate here, matching the
//! teacher's own preference for narrow, purpose-built types over generic containers.

#[derive(Debug, Default, Clone)]
pub struct RenderBuffer {
    text: String,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn push_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        use std::fmt::Write;
        // `String`'s `Write` impl is infallible; the `Result` only exists to satisfy the
        // trait signature.
        let _ = self.text.write_fmt(args);
    }

    /// Empties the buffer without freeing its storage, so the next render reuses the
    /// allocation.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_is_idempotent() {
        let mut buf = RenderBuffer::new();
        buf.push_str("hello");
        buf.clear();
        let after_first_clear = buf.as_str().to_string();
        buf.clear();
        assert_eq!(buf.as_str(), after_first_clear);
        assert_eq!(buf.as_str(), "");
    }

    #[test]
    fn push_fmt_appends_formatted_text() {
        let mut buf = RenderBuffer::new();
        buf.push_fmt(format_args!("0x{:x}", 255u32));
        assert_eq!(buf.as_str(), "0xff");
    }
}
