//! The redirectable output channel.
//!
//! Everything the harness prints, and everything a callable under test prints,
//! goes through one [`OutputChannel`]. [`OutputChannel::capture_during_call`]
//! swaps the channel's sink for an in-memory buffer for exactly one invocation
//! and puts the original sink back on every exit path, so a failing submission
//! can never swallow the rest of the report.

use crate::callable::Callable;
use crate::invoke::InvocationError;
use crate::types::Value;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::mem;
use std::rc::Rc;

/// In-memory sink whose contents stay readable after the sink has been handed
/// to a channel.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Returns the contents and empties the buffer.
    pub fn take(&self) -> String {
        let bytes = mem::take(&mut *self.0.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Result of [`OutputChannel::capture_during_call`].
#[derive(Debug)]
pub struct Captured {
    /// Text printed before the call returned or failed.
    pub text: String,
    pub outcome: Result<Value, InvocationError>,
}

impl Captured {
    pub fn error(&self) -> Option<&InvocationError> {
        self.outcome.as_ref().err()
    }
}

pub struct OutputChannel {
    sink: Box<dyn Write>,
    write_error: Option<io::Error>,
}

impl OutputChannel {
    pub fn new<W: Write + 'static>(sink: W) -> Self {
        Self {
            sink: Box::new(sink),
            write_error: None,
        }
    }

    /// A channel over the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Writes one report line.
    ///
    /// Never fails at the call site. The first write error is kept and handed
    /// out by [`OutputChannel::take_error`].
    pub fn emit(&mut self, line: impl fmt::Display) {
        if let Err(err) = writeln!(self.sink, "{line}") {
            tracing::error!("report sink rejected a write: {err}");
            self.write_error.get_or_insert(err);
        }
    }

    /// Returns (and clears) the first write error seen by [`OutputChannel::emit`].
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.write_error.take()
    }

    /// Invokes `callable` with the sink redirected into a fresh buffer.
    ///
    /// The original sink is active again when this returns, whether the call
    /// returned normally, returned an error or panicked. On failure `text`
    /// holds whatever was printed before the failure.
    pub fn capture_during_call(&mut self, callable: &Callable, args: &[Value]) -> Captured {
        let mut redirect = Redirect::begin(self);
        let outcome = callable.invoke(redirect.channel(), args);
        let text = redirect.finish();
        Captured { text, outcome }
    }
}

impl Write for OutputChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

/// Holds the original sink while a buffer stands in for it. Dropping the guard
/// restores the original.
struct Redirect<'a> {
    channel: &'a mut OutputChannel,
    original: Option<Box<dyn Write>>,
    buffer: SharedBuffer,
}

impl<'a> Redirect<'a> {
    fn begin(channel: &'a mut OutputChannel) -> Self {
        let buffer = SharedBuffer::default();
        let original = mem::replace(&mut channel.sink, Box::new(buffer.clone()));
        Self {
            channel,
            original: Some(original),
            buffer,
        }
    }

    fn channel(&mut self) -> &mut OutputChannel {
        &mut *self.channel
    }

    fn finish(self) -> String {
        let _ = self.channel.sink.flush();
        self.buffer.take()
    }
}

impl Drop for Redirect<'_> {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            self.channel.sink = original;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeDesc;
    use anyhow::bail;

    fn printer(text: &'static str) -> Callable {
        Callable::new("printer", vec![], TypeDesc::Void, move |out, _| {
            write!(out, "{text}")?;
            Ok(Value::Null)
        })
    }

    #[test]
    fn test_capture_returns_printed_text() {
        let report = SharedBuffer::default();
        let mut channel = OutputChannel::new(report.clone());

        let captured = channel.capture_during_call(&printer("5\n"), &[]);
        assert_eq!(captured.text, "5\n");
        assert!(captured.error().is_none());
        assert_eq!(report.contents(), "", "captured text must not reach the report");
    }

    #[test]
    fn test_original_sink_restored_after_success() {
        let report = SharedBuffer::default();
        let mut channel = OutputChannel::new(report.clone());

        channel.capture_during_call(&printer("hidden"), &[]);
        channel.emit("after");
        assert_eq!(report.contents(), "after\n");
    }

    #[test]
    fn test_original_sink_restored_after_error() {
        let report = SharedBuffer::default();
        let mut channel = OutputChannel::new(report.clone());
        let failing = Callable::new("half", vec![], TypeDesc::Void, |out, _| {
            write!(out, "partial")?;
            bail!("gave up");
        });

        let captured = channel.capture_during_call(&failing, &[]);
        assert_eq!(captured.text, "partial");
        assert!(matches!(captured.error(), Some(InvocationError::Raised { .. })));

        channel.emit("report continues");
        assert_eq!(report.contents(), "report continues\n");
    }

    #[test]
    fn test_original_sink_restored_after_panic() {
        let report = SharedBuffer::default();
        let mut channel = OutputChannel::new(report.clone());
        let panicking = Callable::new("crash", vec![], TypeDesc::Void, |out, _| {
            write!(out, "before crash")?;
            panic!("crashed mid-print");
        });

        let captured = channel.capture_during_call(&panicking, &[]);
        assert_eq!(captured.text, "before crash");
        assert!(matches!(captured.error(), Some(InvocationError::Panicked { .. })));

        channel.emit("still here");
        assert_eq!(report.contents(), "still here\n");
    }

    #[test]
    fn test_consecutive_captures_do_not_leak() {
        let mut channel = OutputChannel::new(SharedBuffer::default());
        let first = channel.capture_during_call(&printer("one"), &[]);
        let second = channel.capture_during_call(&printer("two"), &[]);
        assert_eq!(first.text, "one");
        assert_eq!(second.text, "two");
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_records_first_write_error() {
        let mut channel = OutputChannel::new(BrokenSink);
        channel.emit("lost");
        channel.emit("also lost");
        let err = channel.take_error().expect("write error recorded");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(channel.take_error().is_none());
    }
}
