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

//! Hint features that are unlocked as the player’s score goes up.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Perk {
    ShowSomeLetters,
    ShowRemainingWordsPerFace,
}

pub static PERKS: [Perk; 2] = [
    Perk::ShowSomeLetters,
    Perk::ShowRemainingWordsPerFace,
];

impl Perk {
    /// The score at which the perk becomes available.
    pub fn threshold(self) -> f64 {
        match self {
            Perk::ShowSomeLetters => 25.0,
            Perk::ShowRemainingWordsPerFace => 50.0,
        }
    }

    pub fn is_unlocked(self, score: f64) -> bool {
        score >= self.threshold()
    }
}

/// The lowest perk threshold strictly above the score, or `None` once
/// every perk is available.
pub fn next_perk_threshold(score: f64) -> Option<f64> {
    PERKS.iter()
        .map(|perk| perk.threshold())
        .filter(|&threshold| threshold > score)
        .reduce(f64::min)
}

pub fn unlocked_perks(score: f64) -> impl Iterator<Item = Perk> {
    PERKS.into_iter().filter(move |perk| perk.is_unlocked(score))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn next_threshold() {
        assert_eq!(next_perk_threshold(0.0), Some(25.0));
        assert_eq!(next_perk_threshold(24.9), Some(25.0));
        assert_eq!(next_perk_threshold(25.0), Some(50.0));
        assert_eq!(next_perk_threshold(50.0), None);
        assert_eq!(next_perk_threshold(100.0), None);
    }

    #[test]
    fn unlocked() {
        assert_eq!(unlocked_perks(10.0).count(), 0);
        assert_eq!(
            unlocked_perks(30.0).collect::<Vec<_>>(),
            &[Perk::ShowSomeLetters],
        );
        assert_eq!(unlocked_perks(50.0).count(), 2);
        assert!(!Perk::ShowRemainingWordsPerFace.is_unlocked(49.9));
    }
}
