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

//! A collection of puzzles loaded from a JSON file, standing in for
//! the puzzle API.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;
use chrono::NaiveDate;
use log::info;
use thiserror::Error;
use super::puzzle::{Puzzle, PuzzleId};

/// How a puzzle is asked for: by its id, as today’s daily puzzle or as
/// the daily puzzle of some other day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleQuery {
    Id(PuzzleId),
    Today,
    Date(NaiveDate),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("invalid puzzle file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no puzzle found for {0}")]
    NotFound(PuzzleQuery),
    #[error("“{0}” is not a puzzle id, date or “today”")]
    InvalidQuery(String),
    #[error("puzzle {0} appears more than once")]
    DuplicatePuzzle(PuzzleId),
}

impl FromStr for PuzzleQuery {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<PuzzleQuery, CatalogError> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("today") || s.eq_ignore_ascii_case("daily") {
            Ok(PuzzleQuery::Today)
        } else if let Ok(id) = s.parse::<PuzzleId>() {
            Ok(PuzzleQuery::Id(id))
        } else if let Ok(date) = s.parse::<NaiveDate>() {
            Ok(PuzzleQuery::Date(date))
        } else {
            Err(CatalogError::InvalidQuery(s.to_string()))
        }
    }
}

impl fmt::Display for PuzzleQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PuzzleQuery::Id(id) => write!(f, "puzzle {}", id),
            PuzzleQuery::Today => write!(f, "today"),
            PuzzleQuery::Date(date) => write!(f, "{}", date),
        }
    }
}

#[derive(Debug)]
pub struct Catalog {
    puzzles: Vec<Puzzle>,
}

impl Catalog {
    pub fn new(puzzles: Vec<Puzzle>) -> Result<Catalog, CatalogError> {
        let mut ids = HashSet::new();

        for puzzle in puzzles.iter() {
            if !ids.insert(puzzle.id()) {
                return Err(CatalogError::DuplicatePuzzle(puzzle.id()));
            }
        }

        Ok(Catalog { puzzles })
    }

    /// Parses either a single puzzle or an array of puzzles.
    pub fn from_json(s: &str) -> Result<Catalog, CatalogError> {
        let value = serde_json::from_str::<serde_json::Value>(s)?;

        let puzzles = if value.is_array() {
            serde_json::from_value::<Vec<Puzzle>>(value)?
        } else {
            vec![serde_json::from_value::<Puzzle>(value)?]
        };

        Catalog::new(puzzles)
    }

    pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Catalog::from_json(&json)?;

        info!(
            "loaded {} puzzles from {}",
            catalog.puzzles.len(),
            path.display(),
        );

        Ok(catalog)
    }

    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    /// Looks up a puzzle. `today` is used to resolve
    /// [`PuzzleQuery::Today`].
    pub fn find(
        &self,
        query: PuzzleQuery,
        today: NaiveDate,
    ) -> Result<&Puzzle, CatalogError> {
        let date = match query {
            PuzzleQuery::Id(id) => {
                return self.puzzles.iter()
                    .find(|puzzle| puzzle.id() == id)
                    .ok_or(CatalogError::NotFound(query));
            },
            PuzzleQuery::Today => today,
            PuzzleQuery::Date(date) => date,
        };

        self.puzzles.iter()
            .find(|puzzle| puzzle.is_daily() && puzzle.published_date() == date)
            .ok_or(CatalogError::NotFound(PuzzleQuery::Date(date)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            fixtures::punk_puzzle(),
            fixtures::row_puzzle(),
            fixtures::solid_cube(2),
        ]).unwrap()
    }

    #[test]
    fn parse_query() {
        assert_eq!("today".parse::<PuzzleQuery>().unwrap(), PuzzleQuery::Today);
        assert_eq!("Daily".parse::<PuzzleQuery>().unwrap(), PuzzleQuery::Today);
        assert_eq!("42".parse::<PuzzleQuery>().unwrap(), PuzzleQuery::Id(42));
        assert_eq!(
            "2025-03-14".parse::<PuzzleQuery>().unwrap(),
            PuzzleQuery::Date(fixtures::date(14)),
        );
        assert_eq!(
            "tomorrow".parse::<PuzzleQuery>().unwrap_err().to_string(),
            "“tomorrow” is not a puzzle id, date or “today”",
        );
    }

    #[test]
    fn find() {
        let catalog = catalog();

        assert_eq!(
            catalog.find(PuzzleQuery::Id(2), fixtures::date(1)).unwrap().id(),
            2,
        );
        assert_eq!(
            catalog.find(PuzzleQuery::Today, fixtures::date(14)).unwrap().id(),
            1,
        );
        assert_eq!(
            catalog.find(PuzzleQuery::Date(fixtures::date(15)), fixtures::date(1))
                .unwrap()
                .id(),
            2,
        );

        // The solid cube puzzle isn’t a daily puzzle
        assert!(matches!(
            catalog.find(PuzzleQuery::Today, fixtures::date(1)),
            Err(CatalogError::NotFound(PuzzleQuery::Date(_))),
        ));
        assert!(matches!(
            catalog.find(PuzzleQuery::Id(7), fixtures::date(1)),
            Err(CatalogError::NotFound(PuzzleQuery::Id(7))),
        ));
    }

    #[test]
    fn json() {
        let puzzle = fixtures::punk_puzzle();
        let single = serde_json::to_string(&puzzle).unwrap();

        let catalog = Catalog::from_json(&single).unwrap();
        assert_eq!(catalog.puzzles().len(), 1);

        let array = format!("[{},{}]", single, single);

        assert!(matches!(
            Catalog::from_json(&array),
            Err(CatalogError::DuplicatePuzzle(1)),
        ));

        assert!(matches!(
            Catalog::from_json("{\"id\":1}"),
            Err(CatalogError::Json(_)),
        ));
    }

    #[test]
    fn load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("puzzles.json");

        assert!(matches!(Catalog::load(&path), Err(CatalogError::Io(_))));

        let puzzles = vec![fixtures::punk_puzzle(), fixtures::row_puzzle()];
        std::fs::write(&path, serde_json::to_string(&puzzles).unwrap()).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.puzzles().len(), 2);
        assert_eq!(catalog.puzzles()[1].solutions().len(), 2);
    }
}
