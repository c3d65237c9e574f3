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

pub mod puzzle;
pub mod occlusion;
pub mod path;
pub mod scoring;
pub mod progress;
pub mod perks;
pub mod hints;
pub mod save_state;
pub mod session;
pub mod solver;
pub mod catalog;
pub mod score_submission;
pub mod leaderboard;

#[cfg(target_arch = "wasm32")]
mod wasm_game;

#[cfg(test)]
mod fixtures;
