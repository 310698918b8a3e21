//! Deadline-aware input arbitration.
//!
//! Reading a line from an interactive stream has no timeout and cannot be
//! interrupted once started. The arbiter therefore never cancels a read: each
//! question's read runs on its own task, which takes ownership of the reader
//! and hands it back together with the line through a oneshot channel. The
//! session deadline is raced against that channel. If the deadline wins, the
//! read is abandoned, not cancelled, and becomes an *orphan*: the arbiter
//! keeps its receiver instead of the reader, so nothing it eventually yields
//! can be written into a problem.
//!
//! On a process-wide stream such as stdin the orphan keeps a blocking thread
//! parked until the user presses enter or the process exits. Callers that
//! keep the stream alive across sessions must call [`InputArbiter::reclaim`]
//! before reusing it; until then every read fails with
//! [`InputError::OrphanedRead`].

use std::io;
use std::mem;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::oneshot;

use crate::error::InputError;
use crate::model::{Deadline, Problem, TerminationReason};

/// Written when the deadline wins a race.
pub const TIME_UP_MESSAGE: &str = "Time's up!";

/// Format the prompt line for a problem.
pub fn prompt_line(problem: &Problem) -> String {
    format!("Q: {}, what's your answer?", problem.prompt)
}

/// A finished read, returned together with the reader that produced it.
struct ReadDone<R> {
    reader: R,
    result: io::Result<Option<String>>,
}

/// A line read running on its own task.
struct PendingRead<R> {
    rx: oneshot::Receiver<ReadDone<R>>,
}

impl<R> PendingRead<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    fn start(mut reader: R) -> Self {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = read_one_line(&mut reader).await;
            // Receiver gone: the arbiter was dropped and the line goes nowhere.
            let _ = tx.send(ReadDone { reader, result });
        });
        Self { rx }
    }
}

enum InputSlot<R> {
    /// The reader is available for the next read.
    Idle(R),
    /// A read abandoned by a timeout still owns the reader.
    Orphaned(PendingRead<R>),
    /// The reader task died without handing the reader back.
    Lost,
}

/// Races one line read per problem against a session deadline.
pub struct InputArbiter<R> {
    slot: InputSlot<R>,
}

impl<R> InputArbiter<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    pub fn new(reader: R) -> Self {
        Self {
            slot: InputSlot::Idle(reader),
        }
    }

    /// Whether a read abandoned by a timeout is still outstanding.
    pub fn has_orphan(&self) -> bool {
        matches!(self.slot, InputSlot::Orphaned(_))
    }

    /// Read one line with no deadline. Returns `None` at end of stream.
    pub async fn read_line_untimed(&mut self) -> Result<Option<String>, InputError> {
        let reader = match &mut self.slot {
            InputSlot::Idle(reader) => reader,
            InputSlot::Orphaned(_) => return Err(InputError::OrphanedRead),
            InputSlot::Lost => return Err(InputError::ReaderLost),
        };
        Ok(read_one_line(reader).await?)
    }

    /// Ask every problem in order until all are answered or `deadline` passes.
    ///
    /// Each prompt is written to `out` before its read starts. Replies are
    /// trimmed and stored in `user_answer`. When the deadline wins, `Time's up!`
    /// is written, the outstanding read is kept as an orphan and the remaining
    /// problems stay unanswered.
    pub async fn ask_all<W>(
        &mut self,
        problems: &mut [Problem],
        deadline: Deadline,
        out: &mut W,
    ) -> Result<TerminationReason, InputError>
    where
        W: AsyncWrite + Unpin,
    {
        for (index, problem) in problems.iter_mut().enumerate() {
            write_line(out, &prompt_line(problem)).await?;

            // A deadline that passed between questions must never start a read.
            if deadline.has_elapsed() {
                tracing::debug!("deadline passed before problem {}", index + 1);
                return time_up(out).await;
            }

            let mut pending = PendingRead::start(self.take_reader()?);

            let raced = tokio::select! {
                biased;
                () = tokio::time::sleep_until(deadline.instant()) => None,
                done = &mut pending.rx => Some(done),
            };

            let Some(done) = raced else {
                tracing::debug!("deadline reached while waiting on problem {}", index + 1);
                self.slot = InputSlot::Orphaned(pending);
                return time_up(out).await;
            };

            let ReadDone { reader, result } = done.map_err(|_| InputError::ReaderLost)?;
            self.slot = InputSlot::Idle(reader);

            // The timer tick can trail the wall clock; the deadline still wins.
            if deadline.has_elapsed() {
                tracing::warn!(
                    "discarding reply to problem {} received at the deadline",
                    index + 1
                );
                return time_up(out).await;
            }

            let line = result?.ok_or(InputError::Closed)?;
            let answer = line.trim().to_string();
            tracing::debug!("problem {} answered: {:?}", index + 1, answer);
            problem.user_answer = Some(answer);
        }

        Ok(TerminationReason::Completed)
    }

    /// Wait for an orphaned read to finish, discard its line, and take the
    /// reader back.
    ///
    /// Returns the discarded line so callers can log it. Does nothing and
    /// returns `None` when no orphan is outstanding. Dropping this future
    /// before it completes loses the reader.
    pub async fn reclaim(&mut self) -> Result<Option<String>, InputError> {
        let pending = match mem::replace(&mut self.slot, InputSlot::Lost) {
            InputSlot::Orphaned(pending) => pending,
            other => {
                self.slot = other;
                return Ok(None);
            }
        };

        let ReadDone { reader, result } = pending.rx.await.map_err(|_| InputError::ReaderLost)?;
        self.slot = InputSlot::Idle(reader);

        let discarded = result?;
        if let Some(line) = &discarded {
            tracing::debug!("discarded late reply {:?}", line.trim_end());
        }
        Ok(discarded)
    }

    fn take_reader(&mut self) -> Result<R, InputError> {
        match mem::replace(&mut self.slot, InputSlot::Lost) {
            InputSlot::Idle(reader) => Ok(reader),
            InputSlot::Orphaned(pending) => {
                self.slot = InputSlot::Orphaned(pending);
                Err(InputError::OrphanedRead)
            }
            InputSlot::Lost => Err(InputError::ReaderLost),
        }
    }
}

async fn read_one_line<R>(reader: &mut R) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let n = reader.read_line(&mut line).await?;
    Ok((n > 0).then_some(line))
}

async fn time_up<W>(out: &mut W) -> Result<TerminationReason, InputError>
where
    W: AsyncWrite + Unpin,
{
    write_line(out, TIME_UP_MESSAGE).await?;
    Ok(TerminationReason::TimedOut)
}

/// Write one line and flush so it shows up before the next blocking read.
pub(crate) async fn write_line<W>(out: &mut W, line: &str) -> Result<(), InputError>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(line.as_bytes())
        .await
        .map_err(InputError::Output)?;
    out.write_all(b"\n").await.map_err(InputError::Output)?;
    out.flush().await.map_err(InputError::Output)
}
