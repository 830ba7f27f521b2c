//! CLI channel — stdin/stdout stand-in for the speech engine.
//!
//! Each prompt is printed as a bot line and each typed line is treated as a
//! transcribed utterance. Two sentinels let a tester reproduce recognizer
//! failures by hand: `?` for an unintelligible capture and `!` for a backend
//! error.
//!
//! Lines are read on a dedicated OS thread and handed over through an mpsc
//! channel. A listen that times out or is cancelled only drops its `recv`,
//! so nothing blocks the runtime from shutting down while stdin stays open.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use crate::channels::{CaptureOutcome, InputChannel};
use crate::error::ChannelError;

/// Typed sentinel for an unintelligible capture.
const UNCLEAR_SENTINEL: &str = "?";
/// Typed sentinel for a recognizer backend failure.
const SERVICE_ERROR_SENTINEL: &str = "!";

/// A channel that reads from stdin and writes to stdout.
pub struct CliChannel {
    lines: Mutex<mpsc::UnboundedReceiver<io::Result<String>>>,
}

impl CliChannel {
    pub fn new() -> Self {
        Self::from_reader(io::stdin())
    }

    /// Read lines from `reader` instead of stdin.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let spawned = std::thread::Builder::new()
            .name("cli-input".to_string())
            .spawn(move || {
                for line in BufReader::new(reader).lines() {
                    let failed = line.is_err();
                    if tx.send(line).is_err() || failed {
                        break;
                    }
                }
                // Dropping `tx` here reports EOF to the channel.
            });
        if let Err(e) = spawned {
            // The sender went down with the closure, so the channel reads as closed.
            tracing::error!("Could not start input reader: {}", e);
        }

        Self {
            lines: Mutex::new(rx),
        }
    }

    /// Block until the user presses Enter (the start confirmation).
    pub async fn wait_for_enter(&self) -> Result<(), ChannelError> {
        let mut lines = self.lines.lock().await;
        match lines.recv().await {
            Some(Ok(_)) => Ok(()),
            Some(Err(e)) => Err(disconnected(&e.to_string())),
            None => Err(disconnected("stdin closed before start")),
        }
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a typed line to a capture outcome.
pub fn interpret_line(line: &str) -> CaptureOutcome {
    match line.trim() {
        UNCLEAR_SENTINEL => CaptureOutcome::Unclear,
        SERVICE_ERROR_SENTINEL => CaptureOutcome::ServiceError,
        other => CaptureOutcome::utterance(other),
    }
}

/// Write one bot line.
fn write_bot_line(out: &mut impl Write, text: &str) -> Result<(), ChannelError> {
    writeln!(out, "\nBot: {}", text)
        .and_then(|()| out.flush())
        .map_err(|e| ChannelError::SpeakFailed {
            name: "cli".to_string(),
            reason: e.to_string(),
        })
}

fn disconnected(reason: &str) -> ChannelError {
    ChannelError::Disconnected {
        name: "cli".to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl InputChannel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn speak(&self, text: &str) -> Result<(), ChannelError> {
        write_bot_line(&mut io::stdout().lock(), text)
    }

    async fn listen(&self, timeout: Duration) -> Result<CaptureOutcome, ChannelError> {
        eprintln!("Listening...");
        let mut lines = self.lines.lock().await;

        match tokio::time::timeout(timeout, lines.recv()).await {
            Err(_) => Ok(CaptureOutcome::Timeout),
            Ok(Some(Ok(line))) => Ok(interpret_line(&line)),
            Ok(Some(Err(e))) => {
                tracing::error!("Error reading stdin: {}", e);
                Ok(CaptureOutcome::ServiceError)
            }
            Ok(None) => Err(disconnected("stdin closed")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_is_an_utterance() {
        assert_eq!(
            interpret_line("ABCDE 1234F"),
            CaptureOutcome::Utterance("ABCDE 1234F".to_string())
        );
    }

    #[test]
    fn blank_line_is_unclear() {
        assert_eq!(interpret_line(""), CaptureOutcome::Unclear);
        assert_eq!(interpret_line("   "), CaptureOutcome::Unclear);
    }

    #[test]
    fn sentinels_simulate_recognizer_failures() {
        assert_eq!(interpret_line("?"), CaptureOutcome::Unclear);
        assert_eq!(interpret_line(" ! "), CaptureOutcome::ServiceError);
        // Only the bare sentinel counts.
        assert_eq!(
            interpret_line("yes!"),
            CaptureOutcome::Utterance("yes!".to_string())
        );
    }

    /// A reader that never produces input, like a terminal nobody types into.
    struct Silent;

    impl Read for Silent {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            loop {
                std::thread::park();
            }
        }
    }

    /// A writer whose every write fails, like a closed stdout pipe.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    const TIMEOUT: Duration = Duration::from_millis(500);

    #[tokio::test]
    async fn reads_typed_lines_then_reports_eof() {
        let channel = CliChannel::from_reader(io::Cursor::new("\nJohn Doe\n?\n"));

        channel.wait_for_enter().await.unwrap();
        assert_eq!(
            channel.listen(TIMEOUT).await.unwrap(),
            CaptureOutcome::Utterance("John Doe".to_string())
        );
        assert_eq!(channel.listen(TIMEOUT).await.unwrap(), CaptureOutcome::Unclear);
        let err = channel.listen(TIMEOUT).await.unwrap_err();
        assert!(matches!(err, ChannelError::Disconnected { .. }));
    }

    #[tokio::test]
    async fn silence_times_out_and_channel_stays_usable() {
        let channel = CliChannel::from_reader(Silent);
        let short = Duration::from_millis(20);

        assert_eq!(channel.listen(short).await.unwrap(), CaptureOutcome::Timeout);
        assert_eq!(channel.listen(short).await.unwrap(), CaptureOutcome::Timeout);
    }

    #[tokio::test]
    async fn eof_before_start_is_disconnected() {
        let channel = CliChannel::from_reader(io::empty());
        let err = channel.wait_for_enter().await.unwrap_err();
        assert!(matches!(err, ChannelError::Disconnected { .. }));
    }

    #[test]
    fn bot_line_is_prefixed() {
        let mut out = Vec::new();
        write_bot_line(&mut out, "Hello").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nBot: Hello\n");
    }

    #[test]
    fn failed_write_is_speak_failed() {
        let err = write_bot_line(&mut Broken, "Hello").unwrap_err();
        assert!(matches!(err, ChannelError::SpeakFailed { ref name, .. } if name == "cli"));
    }
}
