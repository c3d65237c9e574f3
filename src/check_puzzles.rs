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

use std::process::ExitCode;
use std::sync::{Arc, mpsc, Mutex};
use std::{fmt, thread};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use clap::Parser;
use log::info;
use lexicubes::puzzle::Puzzle;
use lexicubes::solver::{self, SolveError, TraceError};

/// Checks that every puzzle in a file can be solved.
#[derive(Parser)]
#[command(name = "check-puzzles")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file containing an array of puzzles.
    #[arg(default_value = "puzzles.json")]
    puzzles: PathBuf,
}

enum PuzzleMessageKind {
    ParseError(serde_json::Error),
    NoRequiredWords,
    BadTrace(TraceError),
    Unsolvable(SolveError),
}

struct PuzzleMessage {
    puzzle_num: usize,
    kind: PuzzleMessageKind,
}

struct PuzzleQueue {
    data: Mutex<PuzzleQueueData>,
}

struct PuzzleQueueData {
    next_puzzle_num: usize,
    jobs: VecDeque<serde_json::Value>,
}

impl fmt::Display for PuzzleMessageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PuzzleMessageKind::ParseError(e) => write!(f, "{}", e),
            PuzzleMessageKind::NoRequiredWords => {
                write!(f, "puzzle has no required words")
            },
            PuzzleMessageKind::BadTrace(e) => write!(f, "{}", e),
            PuzzleMessageKind::Unsolvable(e) => write!(f, "{}", e),
        }
    }
}

impl PuzzleQueue {
    fn new(jobs: VecDeque<serde_json::Value>) -> PuzzleQueue {
        PuzzleQueue {
            data: Mutex::new(PuzzleQueueData {
                next_puzzle_num: 0,
                jobs,
            })
        }
    }

    fn next(&self) -> Option<(usize, serde_json::Value)> {
        let mut data = self.data.lock().unwrap();

        data.jobs
            .pop_front()
            .map(|job| {
                let puzzle_num = data.next_puzzle_num;
                data.next_puzzle_num += 1;
                (puzzle_num, job)
            })
    }
}

// Each puzzle is kept as a raw JSON value so that one bad puzzle can be
// reported without hiding the problems in the others
fn load_puzzles(filename: &Path) -> Result<VecDeque<serde_json::Value>, ()> {
    let json = match std::fs::read_to_string(filename) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("{}: {}", filename.display(), e);
            return Err(());
        },
    };

    let puzzles = match serde_json::from_str::<VecDeque<serde_json::Value>>(&json) {
        Ok(puzzles) => puzzles,
        Err(e) => {
            eprintln!("{}: {}", filename.display(), e);
            return Err(());
        },
    };

    if puzzles.is_empty() {
        eprintln!("{}: empty file", filename.display());
        return Err(());
    }

    Ok(puzzles)
}

fn check_traces(
    puzzle: &Puzzle,
    puzzle_num: usize,
    tx: &mpsc::Sender<PuzzleMessage>,
) -> Result<bool, mpsc::SendError<PuzzleMessage>> {
    let mut ok = true;

    for solution in puzzle.solutions() {
        if let Err(e) = solver::check_trace(puzzle, solution) {
            tx.send(PuzzleMessage {
                puzzle_num,
                kind: PuzzleMessageKind::BadTrace(e),
            })?;
            ok = false;
        }
    }

    Ok(ok)
}

fn check_puzzles(
    puzzles: &PuzzleQueue,
    tx: mpsc::Sender<PuzzleMessage>,
) -> Result<(), mpsc::SendError<PuzzleMessage>> {
    while let Some((puzzle_num, value)) = puzzles.next() {
        let puzzle = match serde_json::from_value::<Puzzle>(value) {
            Ok(puzzle) => puzzle,
            Err(e) => {
                tx.send(PuzzleMessage {
                    puzzle_num,
                    kind: PuzzleMessageKind::ParseError(e),
                })?;
                continue;
            },
        };

        if puzzle.required_solutions().next().is_none() {
            tx.send(PuzzleMessage {
                puzzle_num,
                kind: PuzzleMessageKind::NoRequiredWords,
            })?;
            continue;
        }

        // Replaying broken traces would only produce confusing errors
        if !check_traces(&puzzle, puzzle_num, &tx)? {
            continue;
        }

        match solver::find_solve_order(&puzzle) {
            Ok(order) => {
                info!(
                    "puzzle {} ({}): {}",
                    puzzle_num + 1,
                    puzzle.id(),
                    order.join(", "),
                );

                let permanent = solver::permanent_cubes(&puzzle);

                if !permanent.is_empty() {
                    info!(
                        "puzzle {}: cubes {:?} can’t be removed",
                        puzzle_num + 1,
                        permanent,
                    );
                }
            },
            Err(e) => {
                tx.send(PuzzleMessage {
                    puzzle_num,
                    kind: PuzzleMessageKind::Unsolvable(e),
                })?;
            },
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let Ok(puzzles) = load_puzzles(&cli.puzzles)
    else {
        return ExitCode::FAILURE;
    };

    let n_puzzles = puzzles.len();

    let puzzles = Arc::new(PuzzleQueue::new(puzzles));

    let (tx, rx) = mpsc::channel();
    let n_threads = Into::<usize>::into(
        thread::available_parallelism().unwrap_or(std::num::NonZeroUsize::MIN)
    ).min(n_puzzles);

    let handles = (0..n_threads).map(|_| {
        let puzzles = Arc::clone(&puzzles);
        let tx = tx.clone();

        thread::spawn(move || check_puzzles(&puzzles, tx))
    }).collect::<Vec<_>>();

    std::mem::drop(tx);

    let mut result = ExitCode::SUCCESS;

    for message in rx {
        result = ExitCode::FAILURE;

        eprintln!("puzzle {}: {}", message.puzzle_num + 1, message.kind);
    }

    for handle in handles {
        if let Err(e) = handle.join() {
            std::panic::resume_unwind(e);
        }
    }

    result
}
