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

use super::puzzle::{CubeId, FaceId, Puzzle, PuzzleError};
use super::occlusion;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathChange {
    Unchanged,
    Extended,
    Backtracked,
}

/// The chain of faces that the player is currently dragging across
/// along with the word that it spells. Consecutive faces are always
/// neighbours and no face appears twice.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    faces: Vec<FaceId>,
    word: String,
}

impl PathBuilder {
    pub fn new() -> PathBuilder {
        PathBuilder::default()
    }

    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn clear(&mut self) {
        self.faces.clear();
        self.word.clear();
    }

    /// Empties the path and returns the word and faces that it held.
    pub fn take(&mut self) -> (String, Vec<FaceId>) {
        (
            std::mem::take(&mut self.word),
            std::mem::take(&mut self.faces),
        )
    }

    fn push(
        &mut self,
        puzzle: &Puzzle,
        removed_cubes: &[CubeId],
        face_id: FaceId,
    ) -> Result<PathChange, PuzzleError> {
        if !occlusion::is_face_available(puzzle, face_id, removed_cubes)? {
            return Ok(PathChange::Unchanged);
        }

        let Some(face) = puzzle.face(face_id)
        else {
            return Err(PuzzleError::UnknownFace(face_id));
        };

        self.faces.push(face_id);
        self.word.push(face.letter);

        Ok(PathChange::Extended)
    }

    /// Starts a new path on the pressed face. Pressing while a path is
    /// already being built does nothing.
    pub fn start_path(
        &mut self,
        puzzle: &Puzzle,
        removed_cubes: &[CubeId],
        face_id: FaceId,
    ) -> Result<PathChange, PuzzleError> {
        if !self.is_empty() {
            return Ok(PathChange::Unchanged);
        }

        self.push(puzzle, removed_cubes, face_id)
    }

    pub fn continue_path(
        &mut self,
        puzzle: &Puzzle,
        removed_cubes: &[CubeId],
        face_id: FaceId,
    ) -> Result<PathChange, PuzzleError> {
        let Some(&last_face) = self.faces.last()
        else {
            return Ok(PathChange::Unchanged);
        };

        if last_face == face_id {
            return Ok(PathChange::Unchanged);
        }

        // Dragging back onto the previous face undoes the last step
        if self.faces.len() >= 2 && self.faces[self.faces.len() - 2] == face_id {
            self.faces.pop();
            self.word.pop();
            return Ok(PathChange::Backtracked);
        }

        if self.faces.contains(&face_id) {
            return Ok(PathChange::Unchanged);
        }

        let Some(last_face) = puzzle.face(last_face)
        else {
            return Err(PuzzleError::UnknownFace(last_face));
        };

        if !last_face.is_neighbour(face_id) {
            // Still make sure the face exists so bad input fails loudly
            puzzle.cube_with_face(face_id)?;
            return Ok(PathChange::Unchanged);
        }

        self.push(puzzle, removed_cubes, face_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures;

    fn path_is_connected(puzzle: &Puzzle, path: &PathBuilder) -> bool {
        path.faces().windows(2).all(|pair| {
            puzzle.face(pair[0]).unwrap().is_neighbour(pair[1])
                && puzzle.face(pair[1]).unwrap().is_neighbour(pair[0])
        })
    }

    #[test]
    fn trace_word() {
        let puzzle = fixtures::punk_puzzle();
        let mut path = PathBuilder::new();

        assert_eq!(path.continue_path(&puzzle, &[], 1), Ok(PathChange::Unchanged));
        assert!(path.is_empty());

        assert_eq!(path.start_path(&puzzle, &[], 0), Ok(PathChange::Extended));
        assert_eq!(path.start_path(&puzzle, &[], 3), Ok(PathChange::Unchanged));
        assert_eq!(path.continue_path(&puzzle, &[], 0), Ok(PathChange::Unchanged));

        for face in [1, 4, 5] {
            assert_eq!(
                path.continue_path(&puzzle, &[], face),
                Ok(PathChange::Extended),
            );
            assert!(path_is_connected(&puzzle, &path));
        }

        assert_eq!(path.word(), "PUNK");
        assert_eq!(path.faces(), &[0, 1, 4, 5]);

        let (word, faces) = path.take();
        assert_eq!(word, "PUNK");
        assert_eq!(faces, &[0, 1, 4, 5]);
        assert!(path.is_empty());
        assert_eq!(path.word(), "");
    }

    #[test]
    fn backtrack() {
        let puzzle = fixtures::punk_puzzle();
        let mut path = PathBuilder::new();

        path.start_path(&puzzle, &[], 0).unwrap();
        path.continue_path(&puzzle, &[], 1).unwrap();
        path.continue_path(&puzzle, &[], 4).unwrap();

        assert_eq!(path.continue_path(&puzzle, &[], 1), Ok(PathChange::Backtracked));
        assert_eq!(path.word(), "PU");
        assert_eq!(path.faces(), &[0, 1]);

        assert_eq!(path.continue_path(&puzzle, &[], 0), Ok(PathChange::Backtracked));
        assert_eq!(path.word(), "P");
        assert_eq!(path.faces(), &[0]);

        // The start of the path can’t be undone by dragging
        assert_eq!(path.continue_path(&puzzle, &[], 0), Ok(PathChange::Unchanged));
        assert_eq!(path.faces(), &[0]);
    }

    #[test]
    fn no_jumping_back() {
        let puzzle = fixtures::punk_puzzle();
        let mut path = PathBuilder::new();

        path.start_path(&puzzle, &[], 0).unwrap();
        path.continue_path(&puzzle, &[], 1).unwrap();
        path.continue_path(&puzzle, &[], 4).unwrap();

        // Face 0 is in the path but isn’t the previous face
        assert_eq!(path.continue_path(&puzzle, &[], 0), Ok(PathChange::Unchanged));
        assert_eq!(path.faces(), &[0, 1, 4]);
    }

    #[test]
    fn blocked_and_removed_faces() {
        let puzzle = fixtures::punk_puzzle();
        let mut path = PathBuilder::new();

        // The S is hidden behind the second cube
        assert_eq!(path.start_path(&puzzle, &[], 2), Ok(PathChange::Unchanged));
        assert!(path.is_empty());

        path.start_path(&puzzle, &[], 0).unwrap();
        assert_eq!(path.continue_path(&puzzle, &[], 2), Ok(PathChange::Unchanged));
        assert_eq!(path.word(), "P");

        path.clear();

        // Once the second cube is gone the S is reachable but the N isn’t
        assert_eq!(path.start_path(&puzzle, &[1], 2), Ok(PathChange::Extended));
        assert_eq!(path.continue_path(&puzzle, &[1], 4), Ok(PathChange::Unchanged));
        assert_eq!(path.continue_path(&puzzle, &[1], 0), Ok(PathChange::Extended));
        assert_eq!(path.word(), "SP");
    }

    #[test]
    fn non_neighbour() {
        let puzzle = fixtures::solid_cube(3);
        let top = |x, z| {
            crate::puzzle::face_id(
                puzzle.cube_at((x, 2, z)).unwrap().id,
                crate::puzzle::Side::Top,
            ).unwrap()
        };
        let mut path = PathBuilder::new();

        path.start_path(&puzzle, &[], top(0, 0)).unwrap();
        assert_eq!(
            path.continue_path(&puzzle, &[], top(2, 2)),
            Ok(PathChange::Unchanged),
        );
        assert_eq!(
            path.continue_path(&puzzle, &[], top(1, 1)),
            Ok(PathChange::Extended),
        );
        assert_eq!(path.faces().len(), 2);
    }

    #[test]
    fn unknown_face() {
        let puzzle = fixtures::punk_puzzle();
        let mut path = PathBuilder::new();

        assert_eq!(
            path.start_path(&puzzle, &[], 99),
            Err(PuzzleError::UnknownFace(99)),
        );

        path.start_path(&puzzle, &[], 0).unwrap();

        assert_eq!(
            path.continue_path(&puzzle, &[], 99),
            Err(PuzzleError::UnknownFace(99)),
        );
        assert_eq!(path.faces(), &[0]);
    }
}
