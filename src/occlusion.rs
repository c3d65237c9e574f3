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

//! Decides whether a face can be reached by the player. A face is in
//! play only when no cube that is still present sits in front of it
//! along any of the four diagonal rays starting from its corners.

use super::puzzle::{Coord, CubeId, FaceId, Puzzle, PuzzleError};

// Cells along one diagonal ray, stopping at the edge of the puzzle
fn ray(puzzle: &Puzzle, start: Coord) -> impl Iterator<Item = Coord> + '_ {
    (0..)
        .map(move |i| (start.0 + i, start.1 + i, start.2 + i))
        .take_while(move |&coord| puzzle.dimensions().contains(coord))
}

/// Returns the ids of all present cubes that cover the given face.
pub fn blocking_cubes(
    puzzle: &Puzzle,
    face_id: FaceId,
    removed_cubes: &[CubeId],
) -> Result<Vec<CubeId>, PuzzleError> {
    let (cube, side) = puzzle.cube_with_face(face_id)?;
    let (x, y, z) = cube.coord();

    let mut blockers = Vec::new();

    for (dx, dy, dz) in side.corners() {
        for coord in ray(puzzle, (x + dx, y + dy, z + dz)) {
            let Some(blocker) = puzzle.cube_at(coord)
            else {
                continue;
            };

            if !removed_cubes.contains(&blocker.id)
                && !blockers.contains(&blocker.id)
            {
                blockers.push(blocker.id);
            }
        }
    }

    Ok(blockers)
}

pub fn is_face_blocked(
    puzzle: &Puzzle,
    face_id: FaceId,
    removed_cubes: &[CubeId],
) -> Result<bool, PuzzleError> {
    let (cube, side) = puzzle.cube_with_face(face_id)?;
    let (x, y, z) = cube.coord();

    Ok(side.corners().into_iter().any(|(dx, dy, dz)| {
        ray(puzzle, (x + dx, y + dy, z + dz)).any(|coord| {
            puzzle.cube_at(coord)
                .is_some_and(|blocker| !removed_cubes.contains(&blocker.id))
        })
    }))
}

/// A face can be added to a path when its own cube is still present and
/// nothing covers it.
pub fn is_face_available(
    puzzle: &Puzzle,
    face_id: FaceId,
    removed_cubes: &[CubeId],
) -> Result<bool, PuzzleError> {
    let (cube, _) = puzzle.cube_with_face(face_id)?;

    if removed_cubes.contains(&cube.id) {
        return Ok(false);
    }

    is_face_blocked(puzzle, face_id, removed_cubes).map(|blocked| !blocked)
}
