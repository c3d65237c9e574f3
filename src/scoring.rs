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

use log::debug;
use serde::Serialize;
use super::puzzle::Puzzle;
use super::progress::PuzzleProgress;

pub const MIN_WORD_LENGTH: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WordStatus {
    TooShort,
    NotInList,
    AlreadyFound,
    Success,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordOutcome {
    pub status: WordStatus,
    pub word: String,
    pub points: u32,
    pub is_bonus: bool,
}

pub fn points_for_word(word: &str) -> u32 {
    word.chars().count() as u32
}

/// Classifies a spelled word and records it in the progress when it is
/// a new solution. Returns `None` for words too short to be worth
/// reporting. Doesn’t update the removed cubes.
pub fn submit_word(
    puzzle: &Puzzle,
    progress: &mut PuzzleProgress,
    word: &str,
) -> Option<WordOutcome> {
    let length = word.chars().count();

    if length <= 1 {
        return None;
    }

    let outcome = |status, points, is_bonus| WordOutcome {
        status,
        word: word.to_string(),
        points,
        is_bonus,
    };

    let outcome = if length < MIN_WORD_LENGTH {
        outcome(WordStatus::TooShort, 0, false)
    } else if let Some(solution) = puzzle.solution(word) {
        if progress.has_found(solution) {
            outcome(WordStatus::AlreadyFound, 0, solution.is_bonus)
        } else if solution.is_bonus {
            progress.record_bonus_word(solution);
            outcome(WordStatus::Success, 0, true)
        } else {
            let points = points_for_word(word);
            progress.record_required_word(solution, points);
            outcome(WordStatus::Success, points, false)
        }
    } else {
        outcome(WordStatus::NotInList, 0, false)
    };

    debug!("“{}”: {:?}", word, outcome.status);

    Some(outcome)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures;

    #[test]
    fn classify() {
        let puzzle = fixtures::punk_puzzle();
        let mut progress = PuzzleProgress::new(&puzzle);
        let initial = progress.clone();

        assert_eq!(submit_word(&puzzle, &mut progress, ""), None);
        assert_eq!(submit_word(&puzzle, &mut progress, "P"), None);

        let outcome = submit_word(&puzzle, &mut progress, "PUN").unwrap();
        assert_eq!(outcome.status, WordStatus::TooShort);
        assert_eq!(outcome.points, 0);

        let outcome = submit_word(&puzzle, &mut progress, "PUNE").unwrap();
        assert_eq!(outcome.status, WordStatus::NotInList);

        assert_eq!(progress, initial);

        let outcome = submit_word(&puzzle, &mut progress, "PUNK").unwrap();
        assert_eq!(
            outcome,
            WordOutcome {
                status: WordStatus::Success,
                word: "PUNK".to_string(),
                points: 4,
                is_bonus: false,
            },
        );
        assert_eq!(progress.points, 4);
        assert_eq!(progress.required_words_found, &["PUNK"]);

        for face in [0, 1, 4, 5] {
            assert_eq!(
                progress.remaining_words_including_face(face),
                initial.remaining_words_including_face(face).map(|c| c - 1),
            );
        }
        assert_eq!(progress.remaining_words_including_face(3), Some(1));

        let after_first = progress.clone();
        let outcome = submit_word(&puzzle, &mut progress, "PUNK").unwrap();
        assert_eq!(outcome.status, WordStatus::AlreadyFound);
        assert_eq!(outcome.points, 0);
        assert_eq!(progress, after_first);
    }

    #[test]
    fn bonus_word() {
        let puzzle = fixtures::punk_puzzle();
        let mut progress = PuzzleProgress::new(&puzzle);
        let initial = progress.clone();

        let outcome = submit_word(&puzzle, &mut progress, "KNUP").unwrap();
        assert_eq!(outcome.status, WordStatus::Success);
        assert!(outcome.is_bonus);
        assert_eq!(outcome.points, 0);

        assert_eq!(progress.bonus_words_found, &["KNUP"]);
        assert_eq!(progress.points, 0);
        assert_eq!(
            progress.num_remaining_words_including_face,
            initial.num_remaining_words_including_face,
        );

        let outcome = submit_word(&puzzle, &mut progress, "KNUP").unwrap();
        assert_eq!(outcome.status, WordStatus::AlreadyFound);
        assert!(outcome.is_bonus);
    }

    #[test]
    fn outcome_json() {
        let outcome = WordOutcome {
            status: WordStatus::NotInList,
            word: "PUNE".to_string(),
            points: 0,
            is_bonus: false,
        };

        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            "{\"status\":\"notInList\",\"word\":\"PUNE\",\
             \"points\":0,\"isBonus\":false}",
        );
    }
}
