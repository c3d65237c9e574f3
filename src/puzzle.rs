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

//! The static description of a puzzle: the cube lattice, the letter
//! faces with their precomputed adjacency and the solution words.
//!
//! The lattice uses a right-handed coordinate system viewed in isometric
//! perspective: x points right (south-east), y points up and z points
//! left (south-west). Only the top (+y), left (+z) and right (+x) faces
//! of a cube can ever be seen, so those are the only faces modelled.

use std::collections::{HashMap, HashSet};
use std::fmt;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type PuzzleId = u64;
pub type CubeId = u32;
pub type FaceId = u32;
pub type Coord = (i32, i32, i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Face {
    pub id: FaceId,
    pub letter: char,
    pub neighbour_ids: Vec<FaceId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cube {
    pub id: CubeId,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub top_face: Face,
    pub left_face: Face,
    pub right_face: Face,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub length_x: i32,
    pub length_y: i32,
    pub length_z: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub word: String,
    pub face_ids: Vec<FaceId>,
    pub is_bonus: bool,
}

/// The letters and position of one cube, used to build a puzzle whose
/// face ids, dimensions and adjacency are derived from the lattice.
#[derive(Clone, Copy, Debug)]
pub struct CubeLetters {
    pub id: CubeId,
    pub position: Coord,
    /// Letters of the top, left and right faces in that order
    pub letters: [char; 3],
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("cube {0} appears more than once")]
    DuplicateCubeId(CubeId),
    #[error("more than one cube at {0:?}")]
    DuplicateCoordinate(Coord),
    #[error("cube {0} has a negative coordinate")]
    NegativeCoordinate(CubeId),
    #[error("cube {0} has an id too large to number its faces")]
    CubeIdTooLarge(CubeId),
    #[error("cube {0} is outside the puzzle dimensions")]
    CubeOutOfBounds(CubeId),
    #[error("face {0} appears more than once")]
    DuplicateFaceId(FaceId),
    #[error("face {0} has an invalid letter “{1}”")]
    InvalidLetter(FaceId, char),
    #[error("face {face} lists unknown neighbour {neighbour}")]
    UnknownNeighbour { face: FaceId, neighbour: FaceId },
    #[error("face {0} does not belong to any cube in the puzzle")]
    UnknownFace(FaceId),
    #[error("a solution has an empty word")]
    EmptyWord,
    #[error("“{0}” is not a valid solution word")]
    InvalidWord(String),
    #[error("solution “{0}” appears more than once")]
    DuplicateWord(String),
    #[error("solution “{word}” uses unknown face {face}")]
    UnknownSolutionFace { word: String, face: FaceId },
    #[error("solution “{word}” uses face {face} more than once")]
    RepeatedSolutionFace { word: String, face: FaceId },
}

/// The serialised form of a puzzle as it is served by the puzzle API.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleData {
    id: PuzzleId,
    published_date: NaiveDate,
    #[serde(default)]
    is_daily: bool,
    dimensions: Dimensions,
    cubes: Vec<Cube>,
    solutions: Vec<Solution>,
}

#[derive(Clone, Copy, Debug)]
struct FaceLocation {
    cube_index: usize,
    side: Side,
}

/// A validated puzzle. Every face id referenced by the puzzle resolves
/// to a cube, so lookups for the puzzle’s own ids never fail.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "PuzzleData", into = "PuzzleData")]
pub struct Puzzle {
    data: PuzzleData,
    faces: HashMap<FaceId, FaceLocation>,
    cubes_by_coord: HashMap<Coord, usize>,
    solutions_by_word: HashMap<String, usize>,
}

impl Side {
    pub const ALL: [Side; 3] = [Side::Top, Side::Left, Side::Right];

    pub fn ordinal(self) -> u32 {
        match self {
            Side::Top => 0,
            Side::Left => 1,
            Side::Right => 2,
        }
    }

    /// Corners of the unit square covered by this side of a cube sitting
    /// at the origin.
    pub fn corners(self) -> [Coord; 4] {
        match self {
            Side::Top => [(0, 1, 0), (1, 1, 0), (0, 1, 1), (1, 1, 1)],
            Side::Left => [(0, 0, 1), (1, 0, 1), (1, 1, 1), (0, 1, 1)],
            Side::Right => [(1, 0, 0), (1, 0, 1), (1, 1, 1), (1, 1, 0)],
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Top => write!(f, "top"),
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// The id given to a face by [`Puzzle::build`], or `None` if the cube id
/// is too large for its faces to be numbered.
pub fn face_id(cube_id: CubeId, side: Side) -> Option<FaceId> {
    cube_id.checked_mul(Side::ALL.len() as u32)?.checked_add(side.ordinal())
}

impl Face {
    pub fn is_neighbour(&self, face_id: FaceId) -> bool {
        self.neighbour_ids.contains(&face_id)
    }
}

impl Cube {
    pub fn coord(&self) -> Coord {
        (self.x, self.y, self.z)
    }

    pub fn face(&self, side: Side) -> &Face {
        match side {
            Side::Top => &self.top_face,
            Side::Left => &self.left_face,
            Side::Right => &self.right_face,
        }
    }

    fn face_mut(&mut self, side: Side) -> &mut Face {
        match side {
            Side::Top => &mut self.top_face,
            Side::Left => &mut self.left_face,
            Side::Right => &mut self.right_face,
        }
    }

    pub fn faces(&self) -> impl Iterator<Item = (Side, &Face)> {
        Side::ALL.into_iter().map(move |side| (side, self.face(side)))
    }
}

impl Dimensions {
    pub fn contains(&self, (x, y, z): Coord) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && x < self.length_x
            && y < self.length_y
            && z < self.length_z
    }
}

impl Solution {
    pub fn new(word: &str, face_ids: Vec<FaceId>, is_bonus: bool) -> Solution {
        Solution {
            word: word.to_string(),
            face_ids,
            is_bonus,
        }
    }
}

fn uppercase_letter(ch: char) -> Option<char> {
    if !ch.is_alphabetic() {
        return None;
    }

    let mut uppercase = ch.to_uppercase();
    let letter = uppercase.next()?;

    // Letters like ß that expand to several characters can’t sit on a face
    if uppercase.next().is_some() {
        None
    } else {
        Some(letter)
    }
}

fn uppercase_word(word: &str) -> Result<String, PuzzleError> {
    if word.is_empty() {
        return Err(PuzzleError::EmptyWord);
    }

    word.chars()
        .map(uppercase_letter)
        .collect::<Option<String>>()
        .ok_or_else(|| PuzzleError::InvalidWord(word.to_string()))
}

impl TryFrom<PuzzleData> for Puzzle {
    type Error = PuzzleError;

    fn try_from(mut data: PuzzleData) -> Result<Puzzle, PuzzleError> {
        let mut cube_ids = HashSet::new();
        let mut cubes_by_coord = HashMap::new();
        let mut faces = HashMap::new();

        for (cube_index, cube) in data.cubes.iter_mut().enumerate() {
            if !cube_ids.insert(cube.id) {
                return Err(PuzzleError::DuplicateCubeId(cube.id));
            }

            if !data.dimensions.contains(cube.coord()) {
                return Err(PuzzleError::CubeOutOfBounds(cube.id));
            }

            if cubes_by_coord.insert(cube.coord(), cube_index).is_some() {
                return Err(PuzzleError::DuplicateCoordinate(cube.coord()));
            }

            for side in Side::ALL {
                let face = cube.face_mut(side);

                face.letter = uppercase_letter(face.letter)
                    .ok_or(PuzzleError::InvalidLetter(face.id, face.letter))?;

                let location = FaceLocation { cube_index, side };

                if faces.insert(face.id, location).is_some() {
                    return Err(PuzzleError::DuplicateFaceId(face.id));
                }
            }
        }

        for cube in data.cubes.iter() {
            for (_, face) in cube.faces() {
                let unknown = face.neighbour_ids
                    .iter()
                    .find(|&id| !faces.contains_key(id));

                if let Some(&neighbour) = unknown {
                    return Err(PuzzleError::UnknownNeighbour {
                        face: face.id,
                        neighbour,
                    });
                }
            }
        }

        let mut solutions_by_word = HashMap::new();

        for (solution_index, solution) in data.solutions.iter_mut().enumerate()
        {
            solution.word = uppercase_word(&solution.word)?;

            let mut used_faces = HashSet::new();

            for &face in solution.face_ids.iter() {
                if !faces.contains_key(&face) {
                    return Err(PuzzleError::UnknownSolutionFace {
                        word: solution.word.clone(),
                        face,
                    });
                }

                if !used_faces.insert(face) {
                    return Err(PuzzleError::RepeatedSolutionFace {
                        word: solution.word.clone(),
                        face,
                    });
                }
            }

            if solutions_by_word
                .insert(solution.word.clone(), solution_index)
                .is_some()
            {
                return Err(PuzzleError::DuplicateWord(solution.word.clone()));
            }
        }

        Ok(Puzzle {
            data,
            faces,
            cubes_by_coord,
            solutions_by_word,
        })
    }
}

impl From<Puzzle> for PuzzleData {
    fn from(puzzle: Puzzle) -> PuzzleData {
        puzzle.data
    }
}

// Two faces touch when their squares share at least one corner
fn faces_touch(a: &[Coord; 4], b: &[Coord; 4]) -> bool {
    a.iter().any(|corner| b.contains(corner))
}

fn face_corners(position: Coord, side: Side) -> [Coord; 4] {
    side.corners().map(|(dx, dy, dz)| {
        (position.0 + dx, position.1 + dy, position.2 + dz)
    })
}

impl Puzzle {
    /// Builds a puzzle from bare cube positions and letters. Face ids are
    /// assigned with [`face_id`], the dimensions are the smallest box
    /// holding every cube and two faces are neighbours when they share
    /// an edge or a corner.
    pub fn build(
        id: PuzzleId,
        published_date: NaiveDate,
        is_daily: bool,
        cubes: &[CubeLetters],
        solutions: Vec<Solution>,
    ) -> Result<Puzzle, PuzzleError> {
        if let Some(cube) = cubes.iter().find(|cube| {
            let (x, y, z) = cube.position;
            x < 0 || y < 0 || z < 0
        }) {
            return Err(PuzzleError::NegativeCoordinate(cube.id));
        }

        // The far corner of every cube must still be a valid coordinate
        if let Some(cube) = cubes.iter().find(|cube| {
            let (x, y, z) = cube.position;
            x.max(y).max(z) == i32::MAX
        }) {
            return Err(PuzzleError::CubeOutOfBounds(cube.id));
        }

        let face_ids = cubes.iter().map(|cube| {
            match Side::ALL.map(|side| face_id(cube.id, side)) {
                [Some(top), Some(left), Some(right)] => Ok([top, left, right]),
                _ => Err(PuzzleError::CubeIdTooLarge(cube.id)),
            }
        }).collect::<Result<Vec<[FaceId; 3]>, PuzzleError>>()?;

        let length = |axis: fn(&Coord) -> i32| {
            cubes.iter().map(|cube| axis(&cube.position) + 1).max().unwrap_or(0)
        };

        let dimensions = Dimensions {
            length_x: length(|c| c.0),
            length_y: length(|c| c.1),
            length_z: length(|c| c.2),
        };

        let all_faces = cubes.iter()
            .zip(face_ids.iter())
            .flat_map(|(cube, ids)| {
                Side::ALL.into_iter().map(move |side| {
                    (
                        ids[side.ordinal() as usize],
                        face_corners(cube.position, side),
                    )
                })
            })
            .collect::<Vec<_>>();

        let neighbours_of = |id: FaceId, corners: &[Coord; 4]| {
            all_faces.iter()
                .filter(|(other_id, other_corners)| {
                    *other_id != id && faces_touch(corners, other_corners)
                })
                .map(|&(other_id, _)| other_id)
                .collect::<Vec<FaceId>>()
        };

        let cubes = cubes.iter().zip(face_ids.iter()).map(|(cube, ids)| {
            let make_face = |side: Side| {
                let id = ids[side.ordinal() as usize];
                let corners = face_corners(cube.position, side);

                Face {
                    id,
                    letter: cube.letters[side.ordinal() as usize],
                    neighbour_ids: neighbours_of(id, &corners),
                }
            };

            Cube {
                id: cube.id,
                x: cube.position.0,
                y: cube.position.1,
                z: cube.position.2,
                top_face: make_face(Side::Top),
                left_face: make_face(Side::Left),
                right_face: make_face(Side::Right),
            }
        }).collect::<Vec<Cube>>();

        Puzzle::try_from(PuzzleData {
            id,
            published_date,
            is_daily,
            dimensions,
            cubes,
            solutions,
        })
    }

    pub fn id(&self) -> PuzzleId {
        self.data.id
    }

    pub fn published_date(&self) -> NaiveDate {
        self.data.published_date
    }

    pub fn is_daily(&self) -> bool {
        self.data.is_daily
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.data.dimensions
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.data.cubes
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.data.solutions
    }

    pub fn required_solutions(&self) -> impl Iterator<Item = &Solution> {
        self.data.solutions.iter().filter(|solution| !solution.is_bonus)
    }

    pub fn bonus_solutions(&self) -> impl Iterator<Item = &Solution> {
        self.data.solutions.iter().filter(|solution| solution.is_bonus)
    }

    pub fn solution(&self, word: &str) -> Option<&Solution> {
        self.solutions_by_word
            .get(word)
            .map(|&index| &self.data.solutions[index])
    }

    pub fn face(&self, face_id: FaceId) -> Option<&Face> {
        self.faces.get(&face_id).map(|location| {
            self.data.cubes[location.cube_index].face(location.side)
        })
    }

    /// Finds the cube owning a face along with the side the face is on.
    pub fn cube_with_face(
        &self,
        face_id: FaceId,
    ) -> Result<(&Cube, Side), PuzzleError> {
        let Some(location) = self.faces.get(&face_id)
        else {
            return Err(PuzzleError::UnknownFace(face_id));
        };

        Ok((&self.data.cubes[location.cube_index], location.side))
    }

    pub fn cube_at(&self, coord: Coord) -> Option<&Cube> {
        self.cubes_by_coord
            .get(&coord)
            .map(|&index| &self.data.cubes[index])
    }
}
