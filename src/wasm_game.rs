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

use wasm_bindgen::prelude::*;
use web_sys::console;
use super::puzzle::{FaceId, Puzzle, PuzzleError};
use super::save_state::ProgressRepository;
use super::session::Session;
use super::path::PathChange;
use super::hints::{self, WordListOptions};
use super::perks;
use super::score_submission::ScoreRequest;

const PROGRESS_KEY: &str = "lexicubesProgress";

fn show_error(message: &str) {
    console::error_1(&message.into());
}

struct Context {
    storage: Option<web_sys::Storage>,
}

impl Context {
    fn new() -> Result<Context, String> {
        let Some(window) = web_sys::window()
        else {
            return Err("failed to get window".to_string());
        };

        // Private browsing can make local storage unavailable. The game
        // still works but the progress is forgotten.
        let storage = window.local_storage().ok().flatten();

        if storage.is_none() {
            show_error("local storage is unavailable");
        }

        Ok(Context { storage })
    }

    fn load_progress(&self) -> ProgressRepository {
        let Some(json) = self.storage
            .as_ref()
            .and_then(|storage| storage.get_item(PROGRESS_KEY).ok().flatten())
        else {
            return ProgressRepository::new();
        };

        match ProgressRepository::from_json(&json) {
            Ok(repository) => repository,
            Err(e) => {
                show_error(&format!("discarding saved progress: {}", e));
                ProgressRepository::new()
            },
        }
    }

    fn save_progress(&self, repository: &ProgressRepository) {
        let Some(storage) = self.storage.as_ref()
        else {
            return;
        };

        match repository.to_json() {
            Ok(json) => {
                if storage.set_item(PROGRESS_KEY, &json).is_err() {
                    show_error("failed to save progress");
                }
            },
            Err(e) => show_error(&e.to_string()),
        }
    }
}

#[wasm_bindgen]
pub struct LexicubesGame {
    context: Context,
    puzzle: Puzzle,
    repository: ProgressRepository,
    session: Session,
}

fn to_js_error<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
impl LexicubesGame {
    #[wasm_bindgen(constructor)]
    pub fn new(puzzle_json: &str) -> Result<LexicubesGame, JsValue> {
        let context = Context::new().map_err(to_js_error)?;
        let puzzle = serde_json::from_str::<Puzzle>(puzzle_json)
            .map_err(to_js_error)?;

        let mut repository = context.load_progress();
        let mut session = Session::new();

        session.initialize_puzzle_state_if_absent(&puzzle, &mut repository);
        context.save_progress(&repository);

        Ok(LexicubesGame {
            context,
            puzzle,
            repository,
            session,
        })
    }

    fn report(&self, result: Result<PathChange, PuzzleError>) -> bool {
        match result {
            Ok(change) => change != PathChange::Unchanged,
            Err(e) => {
                show_error(&e.to_string());
                false
            },
        }
    }

    /// Returns whether a new path was started.
    pub fn press(&mut self, face: FaceId) -> bool {
        let result = self.session.start_path(
            &self.puzzle,
            &mut self.repository,
            face,
        );

        self.report(result)
    }

    pub fn move_over(&mut self, face: FaceId) -> bool {
        let result = self.session.continue_path(
            &self.puzzle,
            &mut self.repository,
            face,
        );

        self.report(result)
    }

    /// Submits the path and returns the outcome as JSON, or `null` if
    /// there is nothing to report.
    pub fn release(&mut self) -> Option<String> {
        let outcome = self.session.submit_path(
            &self.puzzle,
            &mut self.repository,
        );

        self.context.save_progress(&self.repository);

        outcome.and_then(|outcome| serde_json::to_string(&outcome).ok())
    }

    pub fn cancel(&mut self) {
        self.session.cancel_path();
    }

    pub fn reset(&mut self) {
        self.session.reset_puzzle_state(&self.puzzle, &mut self.repository);
        self.context.save_progress(&self.repository);
    }

    pub fn current_word(&self) -> String {
        self.session.current_word().to_string()
    }

    pub fn current_path(&self) -> Vec<u32> {
        self.session.current_path().to_vec()
    }

    fn progress(&mut self) -> &super::progress::PuzzleProgress {
        self.repository.progress_mut(&self.puzzle)
    }

    pub fn removed_cubes(&mut self) -> Vec<u32> {
        self.progress().removed_cubes.clone()
    }

    pub fn score(&mut self) -> f64 {
        self.progress().score()
    }

    /// The score needed for the next perk, or a negative number when
    /// every perk is unlocked.
    pub fn next_perk_score(&mut self) -> f64 {
        perks::next_perk_threshold(self.score()).unwrap_or(-1.0)
    }

    /// Remaining words using the face, or -1 if it isn’t shown yet.
    pub fn face_hint(&mut self, face: FaceId) -> i32 {
        hints::face_hint(self.progress(), face)
            .map(|count| count as i32)
            .unwrap_or(-1)
    }

    pub fn state_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(self.progress()).map_err(to_js_error)
    }

    pub fn word_list_json(
        &mut self,
        sort_alphabetically: bool,
        show_some_letters: bool,
    ) -> Result<String, JsValue> {
        let options = WordListOptions {
            sort_alphabetically,
            show_some_letters,
        };
        let puzzle = &self.puzzle;
        let progress = self.repository.progress_mut(puzzle);

        serde_json::to_string(&hints::word_list(puzzle, progress, options))
            .map_err(to_js_error)
    }

    /// The body of the score submission for the current progress.
    pub fn score_request_json(&mut self) -> Result<String, JsValue> {
        let request = ScoreRequest::new(self.puzzle.id(), self.progress());

        serde_json::to_string(&request).map_err(to_js_error)
    }
}

#[wasm_bindgen]
pub fn init_lexicubes() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}
