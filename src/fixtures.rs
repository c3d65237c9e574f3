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

//! Small puzzles shared by the tests.

use chrono::NaiveDate;
use super::puzzle::{CubeLetters, Puzzle, Solution};

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

/// An n×n×n block of cubes with an A on every face and no solutions.
pub fn solid_cube(n: i32) -> Puzzle {
    let mut cubes = Vec::new();

    for y in 0..n {
        for z in 0..n {
            for x in 0..n {
                cubes.push(CubeLetters {
                    id: cubes.len() as u32,
                    position: (x, y, z),
                    letters: ['A'; 3],
                });
            }
        }
    }

    Puzzle::build(100 + n as u64, date(1), false, &cubes, Vec::new()).unwrap()
}

/// Two cubes side by side:
///
/// ```text
/// face: 0 1 2 | 3 4 5
///       P U S | E N K
/// ```
///
/// The S is hidden behind the second cube. Finding PUNK and KEPU
/// removes the second cube. KNUP is a bonus word.
pub fn punk_puzzle() -> Puzzle {
    Puzzle::build(
        1,
        date(14),
        true,
        &[
            CubeLetters { id: 0, position: (0, 0, 0), letters: ['p', 'u', 's'] },
            CubeLetters { id: 1, position: (1, 0, 0), letters: ['e', 'n', 'k'] },
        ],
        vec![
            Solution::new("PUNK", vec![0, 1, 4, 5], false),
            Solution::new("KEPU", vec![5, 3, 0, 1], false),
            Solution::new("KNUP", vec![5, 4, 1, 0], true),
        ],
    ).unwrap()
}

/// Three cubes in a row along the x axis:
///
/// ```text
/// face: 0 1 2 | 3 4 5 | 6 7 8
///       S E A | T N D | O N E
/// ```
///
/// Finding TONE removes the last cube which uncovers the D needed for
/// SEND.
pub fn row_puzzle() -> Puzzle {
    Puzzle::build(
        2,
        date(15),
        true,
        &[
            CubeLetters { id: 0, position: (0, 0, 0), letters: ['S', 'E', 'A'] },
            CubeLetters { id: 1, position: (1, 0, 0), letters: ['T', 'N', 'D'] },
            CubeLetters { id: 2, position: (2, 0, 0), letters: ['O', 'N', 'E'] },
        ],
        vec![
            Solution::new("SEND", vec![0, 1, 4, 5], false),
            Solution::new("TONE", vec![3, 6, 7, 8], false),
        ],
    ).unwrap()
}
