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

//! Checks that a puzzle can actually be finished by replaying the game
//! engine, and that its solutions are consistent with the cube lattice.

use std::collections::HashSet;
use log::debug;
use thiserror::Error;
use super::puzzle::{CubeId, FaceId, Puzzle, PuzzleError, Solution};
use super::save_state::ProgressRepository;
use super::scoring::WordStatus;
use super::session::Session;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("stuck after finding {found} words, can’t reach: {}", .remaining.join(", "))]
    Unsolvable {
        found: usize,
        remaining: Vec<String>,
    },
    #[error("{0}")]
    Puzzle(#[from] PuzzleError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    #[error("“{word}” has {n_faces} faces")]
    LengthMismatch { word: String, n_faces: usize },
    #[error("“{word}”: face {face} has the letter {letter}")]
    WrongLetter { word: String, face: FaceId, letter: char },
    #[error("“{word}”: faces {a} and {b} aren’t neighbours")]
    NotNeighbours { word: String, a: FaceId, b: FaceId },
}

/// Checks that the faces of a solution spell its word and that each
/// face touches the next one.
pub fn check_trace(
    puzzle: &Puzzle,
    solution: &Solution,
) -> Result<(), TraceError> {
    let n_letters = solution.word.chars().count();

    if n_letters != solution.face_ids.len() {
        return Err(TraceError::LengthMismatch {
            word: solution.word.clone(),
            n_faces: solution.face_ids.len(),
        });
    }

    for (&face_id, expected) in solution.face_ids.iter()
        .zip(solution.word.chars())
    {
        let letter = puzzle.face(face_id).map(|face| face.letter);

        if letter != Some(expected) {
            return Err(TraceError::WrongLetter {
                word: solution.word.clone(),
                face: face_id,
                letter: letter.unwrap_or('?'),
            });
        }
    }

    for pair in solution.face_ids.windows(2) {
        let touching = puzzle.face(pair[0])
            .is_some_and(|face| face.is_neighbour(pair[1]));

        if !touching {
            return Err(TraceError::NotNeighbours {
                word: solution.word.clone(),
                a: pair[0],
                b: pair[1],
            });
        }
    }

    Ok(())
}

// Traces the solution with pointer events and reports whether the
// engine accepted it
fn try_solution(
    puzzle: &Puzzle,
    repository: &mut ProgressRepository,
    session: &mut Session,
    solution: &Solution,
) -> Result<bool, PuzzleError> {
    let Some((&first, rest)) = solution.face_ids.split_first()
    else {
        return Ok(false);
    };

    session.start_path(puzzle, repository, first)?;

    for &face in rest {
        session.continue_path(puzzle, repository, face)?;
    }

    if session.current_path() != solution.face_ids.as_slice() {
        session.cancel_path();
        return Ok(false);
    }

    let Some(outcome) = session.submit_path(puzzle, repository)
    else {
        return Ok(false);
    };

    Ok(outcome.status == WordStatus::Success && outcome.word == solution.word)
}

/// Finds an order in which all of the required words can be found.
/// Finding a word only ever removes cubes whose faces are in no unfound
/// required word, so any word that is traceable stays traceable and
/// finding words greedily never gets stuck unnecessarily.
pub fn find_solve_order(puzzle: &Puzzle) -> Result<Vec<String>, SolveError> {
    let mut repository = ProgressRepository::new();
    let mut session = Session::new();
    let mut order = Vec::new();
    let mut remaining = puzzle.required_solutions().collect::<Vec<_>>();

    session.initialize_puzzle_state_if_absent(puzzle, &mut repository);

    while !remaining.is_empty() {
        let mut found_index = None;

        for (index, solution) in remaining.iter().enumerate() {
            if try_solution(puzzle, &mut repository, &mut session, solution)? {
                found_index = Some(index);
                break;
            }
        }

        let Some(index) = found_index
        else {
            return Err(SolveError::Unsolvable {
                found: order.len(),
                remaining: remaining.iter()
                    .map(|solution| solution.word.clone())
                    .collect(),
            });
        };

        let solution = remaining.remove(index);
        debug!("puzzle {}: found “{}”", puzzle.id(), solution.word);
        order.push(solution.word.clone());
    }

    Ok(order)
}

/// Cubes that can never be removed because one of their faces is in no
/// required word.
pub fn permanent_cubes(puzzle: &Puzzle) -> Vec<CubeId> {
    let used_faces = puzzle.required_solutions()
        .flat_map(|solution| solution.face_ids.iter().copied())
        .collect::<HashSet<FaceId>>();

    puzzle.cubes()
        .iter()
        .filter(|cube| {
            cube.faces().any(|(_, face)| !used_faces.contains(&face.id))
        })
        .map(|cube| cube.id)
        .collect()
}
