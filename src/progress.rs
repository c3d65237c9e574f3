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

//! The persisted per-puzzle state and the cube removal rule that is
//! derived from it.

use std::collections::BTreeMap;
use log::info;
use serde::{Deserialize, Serialize};
use super::puzzle::{CubeId, FaceId, Puzzle, Solution};
use super::scoring;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleProgress {
    pub required_words_found: Vec<String>,
    pub bonus_words_found: Vec<String>,
    pub removed_cubes: Vec<CubeId>,
    /// For each face, the number of required solutions using it that
    /// haven’t been found yet. Faces used by no required solution are
    /// absent.
    pub num_remaining_words_including_face: BTreeMap<FaceId, u32>,
    pub points: u32,
    pub max_points: u32,
}

impl PuzzleProgress {
    pub fn new(puzzle: &Puzzle) -> PuzzleProgress {
        let mut counts = BTreeMap::new();
        let mut max_points = 0;

        for solution in puzzle.required_solutions() {
            max_points += scoring::points_for_word(&solution.word);

            for &face in solution.face_ids.iter() {
                *counts.entry(face).or_insert(0) += 1;
            }
        }

        let mut progress = PuzzleProgress {
            required_words_found: Vec::new(),
            bonus_words_found: Vec::new(),
            removed_cubes: Vec::new(),
            num_remaining_words_including_face: counts,
            points: 0,
            max_points,
        };

        progress.update_removed_cubes(puzzle);

        progress
    }

    pub fn has_found(&self, solution: &Solution) -> bool {
        let found = if solution.is_bonus {
            &self.bonus_words_found
        } else {
            &self.required_words_found
        };

        found.contains(&solution.word)
    }

    pub fn record_required_word(&mut self, solution: &Solution, points: u32) {
        self.required_words_found.push(solution.word.clone());
        self.points += points;

        for face in solution.face_ids.iter() {
            if let Some(count) =
                self.num_remaining_words_including_face.get_mut(face)
            {
                *count = count.saturating_sub(1);
            }
        }
    }

    pub fn record_bonus_word(&mut self, solution: &Solution) {
        self.bonus_words_found.push(solution.word.clone());
    }

    /// Marks every present cube whose three faces have no unfound
    /// required words left as removed. Returns the newly removed cubes.
    pub fn update_removed_cubes(&mut self, puzzle: &Puzzle) -> Vec<CubeId> {
        let mut newly_removed = Vec::new();

        for cube in puzzle.cubes() {
            if self.is_cube_removed(cube.id) {
                continue;
            }

            let finished = cube.faces().all(|(_, face)| {
                self.num_remaining_words_including_face.get(&face.id)
                    == Some(&0)
            });

            if finished {
                self.removed_cubes.push(cube.id);
                newly_removed.push(cube.id);
            }
        }

        if !newly_removed.is_empty() {
            info!(
                "puzzle {}: removed cubes {:?}",
                puzzle.id(),
                newly_removed,
            );
        }

        newly_removed
    }

    pub fn is_cube_removed(&self, cube_id: CubeId) -> bool {
        self.removed_cubes.contains(&cube_id)
    }

    pub fn remaining_words_including_face(&self, face: FaceId) -> Option<u32> {
        self.num_remaining_words_including_face.get(&face).copied()
    }

    pub fn num_required_words_found(&self) -> usize {
        self.required_words_found.len()
    }

    pub fn num_bonus_words_found(&self) -> usize {
        self.bonus_words_found.len()
    }

    /// Percentage of the available points that have been earned.
    pub fn score(&self) -> f64 {
        if self.max_points == 0 {
            0.0
        } else {
            (100.0 * self.points as f64 / self.max_points as f64)
                .clamp(0.0, 100.0)
        }
    }

    pub fn is_complete(&self, puzzle: &Puzzle) -> bool {
        puzzle.required_solutions().all(|solution| self.has_found(solution))
    }

    /// Checks whether a stored record plausibly belongs to the puzzle.
    /// Records that reference faces, cubes or words the puzzle doesn’t
    /// have can’t be replayed.
    pub fn matches(&self, puzzle: &Puzzle) -> bool {
        let words_match = |words: &[String], bonus: bool| {
            words.iter().all(|word| {
                puzzle.solution(word)
                    .is_some_and(|solution| solution.is_bonus == bonus)
            })
        };

        let max_points = puzzle.required_solutions()
            .map(|solution| scoring::points_for_word(&solution.word))
            .sum::<u32>();

        max_points == self.max_points
            && self.points <= self.max_points
            && words_match(&self.required_words_found, false)
            && words_match(&self.bonus_words_found, true)
            && self.removed_cubes.iter().all(|&id| {
                puzzle.cubes().iter().any(|cube| cube.id == id)
            })
            && self.num_remaining_words_including_face.keys().all(|&face| {
                puzzle.face(face).is_some()
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures;

    #[test]
    fn initial_counts() {
        let puzzle = fixtures::punk_puzzle();
        let progress = PuzzleProgress::new(&puzzle);

        assert_eq!(
            progress.num_remaining_words_including_face
                .iter()
                .map(|(&face, &count)| (face, count))
                .collect::<Vec<_>>(),
            &[(0, 2), (1, 2), (3, 1), (4, 1), (5, 2)],
        );
        assert_eq!(progress.max_points, 8);
        assert_eq!(progress.points, 0);
        assert!(progress.removed_cubes.is_empty());
        assert_eq!(progress.score(), 0.0);
        assert!(progress.matches(&puzzle));
    }

    #[test]
    fn remove_cube() {
        let puzzle = fixtures::punk_puzzle();
        let mut progress = PuzzleProgress::new(&puzzle);

        progress.record_required_word(puzzle.solution("PUNK").unwrap(), 4);
        assert!(progress.update_removed_cubes(&puzzle).is_empty());
        assert_eq!(progress.remaining_words_including_face(4), Some(0));
        assert_eq!(progress.remaining_words_including_face(5), Some(1));

        progress.record_required_word(puzzle.solution("KEPU").unwrap(), 4);
        assert_eq!(progress.update_removed_cubes(&puzzle), &[1]);
        assert!(progress.is_cube_removed(1));

        // The first cube has a face that no word uses so it stays
        assert!(!progress.is_cube_removed(0));
        assert_eq!(progress.remaining_words_including_face(2), None);

        // Idempotent
        assert!(progress.update_removed_cubes(&puzzle).is_empty());
        assert_eq!(progress.removed_cubes, &[1]);

        assert_eq!(progress.score(), 100.0);
        assert!(progress.is_complete(&puzzle));
    }

    #[test]
    fn empty_puzzle_score() {
        let puzzle = fixtures::solid_cube(1);
        let progress = PuzzleProgress::new(&puzzle);

        assert_eq!(progress.max_points, 0);
        assert_eq!(progress.score(), 0.0);
    }

    #[test]
    fn mismatched_record() {
        let puzzle = fixtures::punk_puzzle();
        let mut progress = PuzzleProgress::new(&puzzle);

        progress.required_words_found.push("KNUP".to_string());
        assert!(!progress.matches(&puzzle));

        let progress = PuzzleProgress::new(&fixtures::solid_cube(2));
        assert!(!progress.matches(&puzzle));
    }

    #[test]
    fn json_layout() {
        let puzzle = fixtures::punk_puzzle();
        let mut progress = PuzzleProgress::new(&puzzle);

        progress.record_bonus_word(puzzle.solution("KNUP").unwrap());

        let json = serde_json::to_value(&progress).unwrap();

        assert_eq!(json["bonusWordsFound"], serde_json::json!(["KNUP"]));
        assert_eq!(json["numRemainingWordsIncludingFace"]["5"], 2);
        assert_eq!(json["maxPoints"], 8);
        assert!(json["removedCubes"].as_array().unwrap().is_empty());
    }
}
