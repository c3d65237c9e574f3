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

use std::fmt::{self, Write};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: u64,
    pub user_name: String,
    pub num_points: u32,
    pub num_required_words_found: u32,
    pub num_bonus_words_found: u32,
}

/// One page of a leaderboard, best scores first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPage {
    pub items: Vec<LeaderboardEntry>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_page_count: usize,
}

impl LeaderboardPage {
    /// Entries along with their overall rank, counting from 1. Ranks
    /// saturate instead of overflowing on a bogus page number.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &LeaderboardEntry)> {
        let first_rank = self.page_number
            .saturating_mul(self.page_size)
            .saturating_add(1);

        self.items.iter()
            .enumerate()
            .map(move |(index, entry)| (first_rank.saturating_add(index), entry))
    }

    pub fn is_first_page(&self) -> bool {
        self.page_number == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.page_number.saturating_add(1) >= self.total_page_count
    }
}

impl fmt::Display for LeaderboardPage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name_width = self.items.iter()
            .map(|entry| entry.user_name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Player".len());

        writeln!(
            f,
            "{:>4}  {:<name_width$}  {:>6}  {:>5}  {:>5}",
            "#",
            "Player",
            "Points",
            "Words",
            "Bonus",
        )?;

        for (rank, entry) in self.ranked() {
            writeln!(
                f,
                "{:>4}  {:<name_width$}  {:>6}  {:>5}  {:>5}",
                rank,
                entry.user_name,
                entry.num_points,
                entry.num_required_words_found,
                entry.num_bonus_words_found,
            )?;
        }

        let mut footer = String::new();

        write!(
            footer,
            "page {} of {}",
            self.page_number.saturating_add(1),
            self.total_page_count.max(1),
        )?;

        if !self.is_first_page() {
            footer.push_str(", previous pages exist");
        }

        if !self.is_last_page() {
            footer.push_str(", more follow");
        }

        f.write_str(&footer)
    }
}
