//! This module runs puzzle generation on a background thread.
//!
//! Generating a full grid and carving it takes long enough that a UI thread
//! should not block on it. [spawn_generation] starts the work on a fresh
//! thread and hands back a [GenerationTask], which the caller either polls
//! with [GenerationTask::try_take] once per frame or blocks on with
//! [GenerationTask::wait].

use crate::Difficulty;
use crate::error::{SudokuError, SudokuResult};
use crate::generator::{self, GeneratedSudoku};

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// A handle to a puzzle generation running on a background thread. The
/// result can be taken exactly once; both [GenerationTask::try_take] and
/// [GenerationTask::wait] consume the task.
pub struct GenerationTask {
    receiver: Receiver<SudokuResult<GeneratedSudoku>>
}

impl GenerationTask {

    /// Takes the result if generation has finished, or returns the task
    /// itself so the caller can poll again later.
    ///
    /// A worker that vanished without sending a result, which can only
    /// happen if it panicked, is reported as
    /// `Some(Err(SudokuError::Unsatisfiable))`.
    pub fn try_take(self)
            -> Result<SudokuResult<GeneratedSudoku>, GenerationTask> {
        match self.receiver.try_recv() {
            Ok(result) => Ok(result),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Disconnected) =>
                Ok(Err(SudokuError::Unsatisfiable))
        }
    }

    /// Blocks until generation has finished and returns the generated
    /// game.
    ///
    /// # Errors
    ///
    /// * `SudokuError::Unsatisfiable` if generation failed or the worker
    /// vanished without sending a result.
    pub fn wait(self) -> SudokuResult<GeneratedSudoku> {
        self.receiver.recv()
            .unwrap_or(Err(SudokuError::Unsatisfiable))
    }
}

/// Starts generating a puzzle of the given difficulty on a background
/// thread and returns the task handle immediately.
pub fn spawn_generation(difficulty: Difficulty) -> GenerationTask {
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        // The receiver may be gone if the caller lost interest.
        let _ = sender.send(generator::generate(difficulty));
    });

    GenerationTask {
        receiver
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn wait_yields_a_valid_game() {
        let generated = spawn_generation(Difficulty::Easy).wait().unwrap();

        assert!(generated.solution.is_complete());
        assert!(generated.solution.is_board_valid());
        assert!(generated.puzzle.is_board_valid());
        assert!(!generated.puzzle.is_complete());
    }

    #[test]
    fn try_take_eventually_yields_the_result() {
        let mut task = spawn_generation(Difficulty::Medium);

        let generated = loop {
            match task.try_take() {
                Ok(result) => break result.unwrap(),
                Err(pending) => {
                    task = pending;
                    thread::yield_now();
                }
            }
        };

        assert!(generated.solution.is_complete());
    }

    #[test]
    fn concurrent_tasks_are_independent() {
        let first = spawn_generation(Difficulty::Easy);
        let second = spawn_generation(Difficulty::Hard);

        let first = first.wait().unwrap();
        let second = second.wait().unwrap();

        assert!(first.solution.is_complete());
        assert!(second.solution.is_complete());
    }
}
