// Lexicubes – A daily 3D word-search game
// Copyright (C) 2025  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Ties the path builder, word scoring and cube removal together into
//! the operations driven by pointer input.

use log::debug;
use super::path::{PathBuilder, PathChange};
use super::progress::PuzzleProgress;
use super::puzzle::{FaceId, Puzzle, PuzzleError};
use super::save_state::ProgressRepository;
use super::scoring::{self, WordOutcome};

/// Pointer input after mouse and touch events have been mapped onto
/// the face under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Press(FaceId),
    MoveOver(FaceId),
    Release,
}

/// The state of a play session that isn’t persisted: the path being
/// traced and the outcome of the last submitted word.
#[derive(Clone, Debug, Default)]
pub struct Session {
    path: PathBuilder,
    word_outcome: Option<WordOutcome>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn current_word(&self) -> &str {
        self.path.word()
    }

    pub fn current_path(&self) -> &[FaceId] {
        self.path.faces()
    }

    pub fn word_outcome(&self) -> Option<&WordOutcome> {
        self.word_outcome.as_ref()
    }

    /// Prepares the stored progress for the puzzle. This should be
    /// called when the puzzle is opened, before any pointer events.
    pub fn initialize_puzzle_state_if_absent<'a>(
        &mut self,
        puzzle: &Puzzle,
        repository: &'a mut ProgressRepository,
    ) -> &'a mut PuzzleProgress {
        repository.initialize_if_absent(puzzle)
    }

    /// Forgets everything found in the puzzle along with the path being
    /// traced.
    pub fn reset_puzzle_state(
        &mut self,
        puzzle: &Puzzle,
        repository: &mut ProgressRepository,
    ) {
        repository.reset(puzzle);
        self.path.clear();
        self.word_outcome = None;
    }

    pub fn start_path(
        &mut self,
        puzzle: &Puzzle,
        repository: &mut ProgressRepository,
        face: FaceId,
    ) -> Result<PathChange, PuzzleError> {
        let progress = repository.progress_mut(puzzle);
        let change = self.path.start_path(puzzle, &progress.removed_cubes, face)?;

        debug!("start path on face {}: {:?}", face, change);

        Ok(change)
    }

    pub fn continue_path(
        &mut self,
        puzzle: &Puzzle,
        repository: &mut ProgressRepository,
        face: FaceId,
    ) -> Result<PathChange, PuzzleError> {
        let progress = repository.progress_mut(puzzle);
        let change = self.path.continue_path(
            puzzle,
            &progress.removed_cubes,
            face,
        )?;

        if change != PathChange::Unchanged {
            debug!("path is now “{}”", self.path.word());
        }

        Ok(change)
    }

    /// Scores the traced word and clears the path. Returns the outcome
    /// of this submission, if any. Submitting an empty path does
    /// nothing.
    pub fn submit_path(
        &mut self,
        puzzle: &Puzzle,
        repository: &mut ProgressRepository,
    ) -> Option<WordOutcome> {
        if self.path.is_empty() {
            return None;
        }

        let progress = repository.progress_mut(puzzle);
        let (word, _) = self.path.take();

        self.word_outcome = scoring::submit_word(puzzle, progress, &word);
        progress.update_removed_cubes(puzzle);

        self.word_outcome.clone()
    }

    pub fn cancel_path(&mut self) {
        self.path.clear();
    }

    pub fn handle(
        &mut self,
        puzzle: &Puzzle,
        repository: &mut ProgressRepository,
        event: PointerEvent,
    ) -> Result<(), PuzzleError> {
        match event {
            PointerEvent::Press(face) => {
                self.start_path(puzzle, repository, face)?;
            },
            PointerEvent::MoveOver(face) => {
                self.continue_path(puzzle, repository, face)?;
            },
            PointerEvent::Release => {
                self.submit_path(puzzle, repository);
            },
        }

        Ok(())
    }
}
