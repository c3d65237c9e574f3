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

//! The hint panel: the list of solution words with the unfound ones
//! obscured, and the per-face counters once they have been unlocked.

use std::collections::BTreeMap;
use serde::Serialize;
use super::perks::Perk;
use super::progress::PuzzleProgress;
use super::puzzle::{FaceId, Puzzle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordListOptions {
    pub sort_alphabetically: bool,
    /// Only honoured once [`Perk::ShowSomeLetters`] is unlocked
    pub show_some_letters: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordGroup {
    /// `None` for the bonus group
    pub word_length: Option<usize>,
    pub words: Vec<String>,
    pub words_left: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordList {
    pub required: Vec<WordGroup>,
    pub bonus: WordGroup,
}

/// Replaces some or all of the letters of a word with dashes. Longer
/// words give away more letters at the start and the end.
pub fn obscure_word(word: &str, hide_all_letters: bool) -> String {
    let length = word.chars().count();

    if hide_all_letters {
        return "-".repeat(length);
    }

    let n_start = if length > 12 {
        3
    } else if length > 5 {
        2
    } else {
        1
    };

    let n_end = match length {
        10.. => 3,
        8 => 2,
        7 => 1,
        _ => 0,
    };

    word.chars()
        .enumerate()
        .map(|(i, ch)| {
            if i < n_start || i + n_end >= length {
                ch
            } else {
                '-'
            }
        })
        .collect()
}

struct Entry<'a> {
    word: &'a str,
    found: bool,
}

fn sort_entries(entries: &mut [Entry], sort_alphabetically: bool) {
    entries.sort_by(|a, b| {
        if !sort_alphabetically && a.found != b.found {
            // Found words go first
            b.found.cmp(&a.found)
        } else {
            a.word.cmp(b.word)
        }
    });
}

fn words_left(entries: &[Entry]) -> usize {
    entries.iter().filter(|entry| !entry.found).count()
}

pub fn word_list(
    puzzle: &Puzzle,
    progress: &PuzzleProgress,
    options: WordListOptions,
) -> WordList {
    let show_some_letters = options.show_some_letters
        && Perk::ShowSomeLetters.is_unlocked(progress.score());
    let reveal_missing = options.sort_alphabetically || show_some_letters;

    let mut by_length = BTreeMap::<usize, Vec<Entry>>::new();

    for solution in puzzle.required_solutions() {
        by_length.entry(solution.word.chars().count())
            .or_default()
            .push(Entry {
                word: &solution.word,
                found: progress.has_found(solution),
            });
    }

    let required = by_length.into_iter().map(|(word_length, mut entries)| {
        sort_entries(&mut entries, options.sort_alphabetically);

        let words = entries.iter()
            .filter(|entry| reveal_missing || entry.found)
            .map(|entry| {
                if entry.found {
                    entry.word.to_string()
                } else {
                    obscure_word(entry.word, !show_some_letters)
                }
            })
            .collect();

        WordGroup {
            word_length: Some(word_length),
            words,
            words_left: (!reveal_missing).then(|| words_left(&entries)),
        }
    }).collect();

    let mut bonus_entries = puzzle.bonus_solutions()
        .map(|solution| Entry {
            word: &solution.word,
            found: progress.has_found(solution),
        })
        .collect::<Vec<_>>();

    sort_entries(&mut bonus_entries, options.sort_alphabetically);

    let bonus = WordGroup {
        word_length: None,
        words: bonus_entries.iter()
            .filter(|entry| entry.found)
            .map(|entry| entry.word.to_string())
            .collect(),
        words_left: Some(words_left(&bonus_entries)),
    };

    WordList { required, bonus }
}

/// The number of unfound required words using a face, once the perk
/// that reveals it has been unlocked.
pub fn face_hint(progress: &PuzzleProgress, face: FaceId) -> Option<u32> {
    if Perk::ShowRemainingWordsPerFace.is_unlocked(progress.score()) {
        progress.remaining_words_including_face(face)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures;
    use crate::scoring;

    #[test]
    fn obscure() {
        assert_eq!(obscure_word("PUNK", true), "----");
        assert_eq!(obscure_word("PUNK", false), "P---");
        assert_eq!(obscure_word("CUBES", false), "C----");
        assert_eq!(obscure_word("LETTER", false), "LE----");
        assert_eq!(obscure_word("LETTERS", false), "LE----S");
        assert_eq!(obscure_word("ISOMETRY", false), "IS----RY");
        assert_eq!(obscure_word("BLOCKADE", false), "BL----DE");
        assert_eq!(obscure_word("LEXICONS", false), "LE----NS");
        assert_eq!(obscure_word("CROSSWORD", false), "CR-------");
        assert_eq!(obscure_word("PERSPECTIVE", false), "PE------IVE");
        assert_eq!(obscure_word("THREEDIMENSIONAL", false), "THR----------NAL");
        assert_eq!(obscure_word("ÆØÅÆ", false), "Æ---");
    }

    #[test]
    fn default_list() {
        let puzzle = fixtures::punk_puzzle();
        let mut progress = PuzzleProgress::new(&puzzle);

        scoring::submit_word(&puzzle, &mut progress, "KEPU");

        let list = word_list(&puzzle, &progress, WordListOptions::default());

        assert_eq!(
            list.required,
            &[WordGroup {
                word_length: Some(4),
                words: vec!["KEPU".to_string()],
                words_left: Some(1),
            }],
        );
        assert_eq!(
            list.bonus,
            WordGroup {
                word_length: None,
                words: Vec::new(),
                words_left: Some(1),
            },
        );
    }

    #[test]
    fn alphabetical_list() {
        let puzzle = fixtures::punk_puzzle();
        let mut progress = PuzzleProgress::new(&puzzle);

        scoring::submit_word(&puzzle, &mut progress, "PUNK");
        scoring::submit_word(&puzzle, &mut progress, "KNUP");

        let options = WordListOptions {
            sort_alphabetically: true,
            show_some_letters: false,
        };
        let list = word_list(&puzzle, &progress, options);

        assert_eq!(list.required.len(), 1);
        assert_eq!(list.required[0].words, &["----", "PUNK"]);
        assert_eq!(list.required[0].words_left, None);

        assert_eq!(list.bonus.words, &["KNUP"]);
        assert_eq!(list.bonus.words_left, Some(0));
    }

    #[test]
    fn show_some_letters_needs_perk() {
        let puzzle = fixtures::punk_puzzle();
        let mut progress = PuzzleProgress::new(&puzzle);

        let options = WordListOptions {
            sort_alphabetically: false,
            show_some_letters: true,
        };

        // Nothing is unlocked so the option is ignored
        let list = word_list(&puzzle, &progress, options);
        assert!(list.required[0].words.is_empty());
        assert_eq!(list.required[0].words_left, Some(2));

        scoring::submit_word(&puzzle, &mut progress, "PUNK");

        let list = word_list(&puzzle, &progress, options);
        assert_eq!(list.required[0].words, &["PUNK", "K---"]);
        assert_eq!(list.required[0].words_left, None);
    }

    #[test]
    fn face_hints() {
        let puzzle = fixtures::punk_puzzle();
        let mut progress = PuzzleProgress::new(&puzzle);

        assert_eq!(face_hint(&progress, 0), None);

        scoring::submit_word(&puzzle, &mut progress, "PUNK");

        assert_eq!(face_hint(&progress, 0), Some(1));
        assert_eq!(face_hint(&progress, 4), Some(0));
        assert_eq!(face_hint(&progress, 2), None);
    }
}
