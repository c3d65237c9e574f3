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

//! Storage for the progress of every puzzle that has been visited.
//! The repository is loaded once when a session starts and saved when
//! it ends.

use std::collections::btree_map::{self, BTreeMap};
use std::io;
use std::path::Path;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::progress::PuzzleProgress;
use super::puzzle::{Puzzle, PuzzleId};

#[derive(Debug, Error)]
pub enum SaveStateError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("invalid save state: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressRepository {
    puzzles: BTreeMap<PuzzleId, PuzzleProgress>,
}

impl ProgressRepository {
    pub fn new() -> ProgressRepository {
        ProgressRepository::default()
    }

    pub fn progress(&self, puzzle_id: PuzzleId) -> Option<&PuzzleProgress> {
        self.puzzles.get(&puzzle_id)
    }

    pub fn puzzle_ids(&self) -> impl Iterator<Item = PuzzleId> + '_ {
        self.puzzles.keys().copied()
    }

    /// Returns the progress for the puzzle, creating it on the first
    /// visit. Unlike [`initialize_if_absent`](Self::initialize_if_absent)
    /// a stored record is used as it is, so this should only be called
    /// once the puzzle has been initialised.
    pub fn progress_mut(&mut self, puzzle: &Puzzle) -> &mut PuzzleProgress {
        self.puzzles
            .entry(puzzle.id())
            .or_insert_with(|| PuzzleProgress::new(puzzle))
    }

    /// Returns the progress for the puzzle, creating it on the first
    /// visit. A stored record that doesn’t fit the puzzle is replaced
    /// with a fresh one.
    pub fn initialize_if_absent(&mut self, puzzle: &Puzzle) -> &mut PuzzleProgress {
        let progress = self.puzzles
            .entry(puzzle.id())
            .or_insert_with(|| PuzzleProgress::new(puzzle));

        if !progress.matches(puzzle) {
            warn!(
                "stored progress for puzzle {} doesn’t match the puzzle, \
                 starting again",
                puzzle.id(),
            );
            *progress = PuzzleProgress::new(puzzle);
        }

        progress
    }

    pub fn reset(&mut self, puzzle: &Puzzle) -> &mut PuzzleProgress {
        info!("resetting progress for puzzle {}", puzzle.id());

        let progress = PuzzleProgress::new(puzzle);

        match self.puzzles.entry(puzzle.id()) {
            btree_map::Entry::Occupied(mut entry) => {
                entry.insert(progress);
                entry.into_mut()
            },
            btree_map::Entry::Vacant(entry) => {
                entry.insert(progress)
            },
        }
    }

    pub fn from_json(s: &str) -> Result<ProgressRepository, SaveStateError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String, SaveStateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Loads the repository from a file. A missing file is the same as
    /// never having played.
    pub fn load(path: &Path) -> Result<ProgressRepository, SaveStateError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no save state at {}", path.display());
                return Ok(ProgressRepository::new());
            },
            Err(e) => return Err(e.into()),
        };

        let repository = ProgressRepository::from_json(&json)?;

        info!(
            "loaded progress for {} puzzles from {}",
            repository.puzzles.len(),
            path.display(),
        );

        Ok(repository)
    }

    pub fn save(&self, path: &Path) -> Result<(), SaveStateError> {
        let json = self.to_json()?;

        // Write to a temporary file first so that a failed write can’t
        // destroy the previous save
        let mut tmp_path = path.as_os_str().to_owned();
        tmp_path.push(".tmp");

        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;

        info!("saved progress to {}", path.display());

        Ok(())
    }
}
