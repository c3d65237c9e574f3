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

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;
use lexicubes::catalog::{Catalog, PuzzleQuery};
use lexicubes::hints::{self, WordListOptions};
use lexicubes::leaderboard::LeaderboardPage;
use lexicubes::perks;
use lexicubes::puzzle::{FaceId, Puzzle};
use lexicubes::save_state::ProgressRepository;
use lexicubes::score_submission::{ScoreRequest, ScoreSink, ScoreSubmitter, User};
use lexicubes::scoring::WordStatus;
use lexicubes::session::{PointerEvent, Session};

/// Plays Lexicubes, the daily 3D word search, from the terminal.
#[derive(Parser)]
#[command(name = "lexicubes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a puzzle with commands read from standard input.
    Play {
        /// JSON file containing a puzzle or an array of puzzles.
        puzzles: PathBuf,
        /// Puzzle id, date or “today”.
        #[arg(short, long, default_value = "today")]
        puzzle: PuzzleQuery,
        /// File where the progress of every puzzle is kept.
        #[arg(short, long, default_value = "progress.json")]
        save: PathBuf,
        /// Id of the logged in user. Scores are only submitted when this
        /// is given.
        #[arg(long)]
        user_id: Option<u64>,
        #[arg(long, default_value = "player")]
        user_name: String,
        /// Submitted scores are appended to this file as JSON lines.
        #[arg(long, default_value = "scores.jsonl")]
        score_log: PathBuf,
    },
    /// Print a leaderboard page fetched from the server.
    Leaderboard {
        file: PathBuf,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum GameCommand {
    Press(FaceId),
    Move(Vec<FaceId>),
    Release,
    Trace(Vec<FaceId>),
    Cancel,
    Reset,
    Show,
    Words(WordListOptions),
    Help,
}

static HELP: &str = "\
press FACE        start a path on a face
move FACE…        drag over faces
release           submit the path
trace FACE…       press, move and release in one go
cancel            abandon the path
reset             forget everything found in this puzzle
show              show the puzzle state
words [sorted] [letters]
                  show the word list
help              show this message";

fn parse_faces<'a, I>(args: I) -> Result<Vec<FaceId>, String>
where
    I: IntoIterator<Item = &'a str>
{
    let faces = args.into_iter().map(|arg| {
        arg.parse::<FaceId>().map_err(|_| format!("invalid face “{}”", arg))
    }).collect::<Result<Vec<_>, _>>()?;

    if faces.is_empty() {
        Err("missing face".to_string())
    } else {
        Ok(faces)
    }
}

fn parse_command(line: &str) -> Result<Option<GameCommand>, String> {
    let line = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };

    let mut parts = line.split_whitespace();

    let Some(name) = parts.next()
    else {
        return Ok(None);
    };

    let command = match name {
        "press" => {
            let faces = parse_faces(parts)?;

            if faces.len() != 1 {
                return Err("press needs exactly one face".to_string());
            }

            GameCommand::Press(faces[0])
        },
        "move" => GameCommand::Move(parse_faces(parts)?),
        "release" => GameCommand::Release,
        "trace" => GameCommand::Trace(parse_faces(parts)?),
        "cancel" => GameCommand::Cancel,
        "reset" => GameCommand::Reset,
        "show" => GameCommand::Show,
        "words" => {
            let mut options = WordListOptions::default();

            for option in parts {
                match option {
                    "sorted" => options.sort_alphabetically = true,
                    "letters" => options.show_some_letters = true,
                    _ => return Err(format!("unknown option “{}”", option)),
                }
            }

            GameCommand::Words(options)
        },
        "help" => GameCommand::Help,
        _ => return Err(format!("unknown command “{}”", name)),
    };

    Ok(Some(command))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreLogLine<'a> {
    user_id: u64,
    user_name: &'a str,
    #[serde(flatten)]
    request: &'a ScoreRequest,
}

/// Stands in for the leaderboard server by appending each submission
/// to a file.
struct JsonLinesSink {
    path: PathBuf,
}

impl ScoreSink for JsonLinesSink {
    type Error = io::Error;

    fn submit(
        &mut self,
        user: &User,
        request: &ScoreRequest,
    ) -> Result<(), io::Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let line = ScoreLogLine {
            user_id: user.id,
            user_name: &user.name,
            request,
        };

        serde_json::to_writer(&mut file, &line)?;
        writeln!(file)
    }
}

struct Game<'a> {
    puzzle: &'a Puzzle,
    repository: ProgressRepository,
    session: Session,
    submitter: ScoreSubmitter,
    sink: JsonLinesSink,
    user: Option<User>,
}

impl<'a> Game<'a> {
    fn pointer(&mut self, event: PointerEvent) -> Result<(), String> {
        self.session.handle(self.puzzle, &mut self.repository, event)
            .map_err(|e| e.to_string())
    }

    fn release(&mut self) -> Result<(), String> {
        let Some(outcome) = self.session.submit_path(
            self.puzzle,
            &mut self.repository,
        )
        else {
            return Ok(());
        };

        match outcome.status {
            WordStatus::TooShort => println!("{}: too short", outcome.word),
            WordStatus::NotInList => println!("{}: not in word list", outcome.word),
            WordStatus::AlreadyFound => println!("{}: already found", outcome.word),
            WordStatus::Success => {
                if outcome.is_bonus {
                    println!("{}: bonus word!", outcome.word);
                } else {
                    println!("{}: +{}", outcome.word, outcome.points);
                }

                let progress = self.repository.progress_mut(self.puzzle);
                let request = ScoreRequest::new(self.puzzle.id(), progress);

                self.submitter.schedule(request, Utc::now());
            },
        }

        Ok(())
    }

    fn show(&mut self) {
        let progress = &*self.repository.progress_mut(self.puzzle);
        let score = progress.score();

        println!("word: {}", self.session.current_word());
        println!("path: {:?}", self.session.current_path());
        print!("score: {:.0}%", score);

        match perks::next_perk_threshold(score) {
            Some(next) => println!(" (next perk at {:.0}%)", next),
            None => println!(),
        }

        let unlocked = perks::unlocked_perks(score).collect::<Vec<_>>();

        if !unlocked.is_empty() {
            println!("perks: {:?}", unlocked);
        }

        if progress.is_complete(self.puzzle) {
            println!("all required words found!");
        }

        println!("removed cubes: {:?}", progress.removed_cubes);

        for cube in self.puzzle.cubes() {
            if progress.is_cube_removed(cube.id) {
                continue;
            }

            let faces = cube.faces().map(|(side, face)| {
                match hints::face_hint(progress, face.id) {
                    Some(count) => {
                        format!("{} {}={}({})", side, face.id, face.letter, count)
                    },
                    None => format!("{} {}={}", side, face.id, face.letter),
                }
            }).collect::<Vec<_>>();

            println!(
                "cube {} at {:?}: {}",
                cube.id,
                cube.coord(),
                faces.join(", "),
            );
        }
    }

    fn words(&mut self, options: WordListOptions) {
        let progress = self.repository.progress_mut(self.puzzle);
        let list = hints::word_list(self.puzzle, progress, options);

        for group in list.required.iter().chain(std::iter::once(&list.bonus)) {
            match group.word_length {
                Some(length) => print!("{} letters:", length),
                None => print!("bonus words:"),
            }

            for word in group.words.iter() {
                print!(" {}", word);
            }

            match group.words_left {
                Some(1) => println!(" (+1 word left)"),
                Some(n) => println!(" (+{} words left)", n),
                None => println!(),
            }
        }
    }

    fn run(&mut self, command: GameCommand) -> Result<(), String> {
        match command {
            GameCommand::Press(face) => self.pointer(PointerEvent::Press(face))?,
            GameCommand::Move(faces) => {
                for face in faces {
                    self.pointer(PointerEvent::MoveOver(face))?;
                }
            },
            GameCommand::Release => self.release()?,
            GameCommand::Trace(faces) => {
                self.session.cancel_path();
                self.pointer(PointerEvent::Press(faces[0]))?;

                for &face in &faces[1..] {
                    self.pointer(PointerEvent::MoveOver(face))?;
                }

                self.release()?;
            },
            GameCommand::Cancel => self.session.cancel_path(),
            GameCommand::Reset => {
                self.session.reset_puzzle_state(self.puzzle, &mut self.repository);
                self.submitter.cancel();
            },
            GameCommand::Show => self.show(),
            GameCommand::Words(options) => self.words(options),
            GameCommand::Help => println!("{}", HELP),
        }

        if !self.session.current_word().is_empty() {
            println!("> {}", self.session.current_word());
        }

        Ok(())
    }

    fn flush_scores(&mut self) -> Result<(), io::Error> {
        self.submitter.flush_due(Utc::now(), self.user.as_ref(), &mut self.sink)
            .map(|_| ())
    }
}

fn play(
    puzzles: &Path,
    query: PuzzleQuery,
    save: &Path,
    user: Option<User>,
    score_log: PathBuf,
) -> Result<(), String> {
    let catalog = Catalog::load(puzzles)
        .map_err(|e| format!("{}: {}", puzzles.display(), e))?;

    let puzzle = catalog.find(query, Utc::now().date_naive())
        .map_err(|e| e.to_string())?;

    let repository = ProgressRepository::load(save)
        .map_err(|e| format!("{}: {}", save.display(), e))?;

    debug!(
        "stored progress for puzzles {:?}",
        repository.puzzle_ids().collect::<Vec<_>>(),
    );

    let mut game = Game {
        puzzle,
        repository,
        session: Session::new(),
        submitter: ScoreSubmitter::new(),
        sink: JsonLinesSink { path: score_log },
        user,
    };

    game.session.initialize_puzzle_state_if_absent(puzzle, &mut game.repository);

    println!(
        "puzzle {} ({}), {} cubes",
        puzzle.id(),
        puzzle.published_date(),
        puzzle.cubes().len(),
    );

    // Reading stdin blocks, so a debounced score is only flushed when the
    // next command arrives or when the input ends.
    for line in io::stdin().lock().lines() {
        let line = line.map_err(|e| e.to_string())?;

        match parse_command(&line) {
            Ok(Some(command)) => {
                if let Err(e) = game.run(command) {
                    eprintln!("{}", e);
                }
            },
            Ok(None) => (),
            Err(e) => eprintln!("{}", e),
        }

        if let Err(e) = game.flush_scores() {
            eprintln!("{}: {}", game.sink.path.display(), e);
        }
    }

    let result = game.submitter.finish(game.user.as_ref(), &mut game.sink);

    if let Err(e) = result {
        eprintln!("{}: {}", game.sink.path.display(), e);
    }

    game.repository.save(save)
        .map_err(|e| format!("{}: {}", save.display(), e))
}

fn show_leaderboard(file: &Path) -> Result<(), String> {
    let page = File::open(file)
        .map_err(|e| e.to_string())
        .and_then(|f| {
            serde_json::from_reader::<_, LeaderboardPage>(io::BufReader::new(f))
                .map_err(|e| e.to_string())
        })
        .map_err(|e| format!("{}: {}", file.display(), e))?;

    println!("{}", page);

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Play {
            puzzles,
            puzzle,
            save,
            user_id,
            user_name,
            score_log,
        } => {
            let user = user_id.map(|id| User { id, name: user_name });
            play(&puzzles, puzzle, &save, user, score_log)
        },
        Command::Leaderboard { file } => show_leaderboard(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn commands() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("  # just a comment"), Ok(None));
        assert_eq!(parse_command("press 3"), Ok(Some(GameCommand::Press(3))));
        assert_eq!(
            parse_command("move 1 4 5 # drag"),
            Ok(Some(GameCommand::Move(vec![1, 4, 5]))),
        );
        assert_eq!(
            parse_command("trace 0 1 4 5"),
            Ok(Some(GameCommand::Trace(vec![0, 1, 4, 5]))),
        );
        assert_eq!(
            parse_command("words letters sorted"),
            Ok(Some(GameCommand::Words(WordListOptions {
                sort_alphabetically: true,
                show_some_letters: true,
            }))),
        );
        assert_eq!(parse_command("release"), Ok(Some(GameCommand::Release)));
    }

    #[test]
    fn bad_commands() {
        assert_eq!(
            parse_command("press"),
            Err("missing face".to_string()),
        );
        assert_eq!(
            parse_command("press 1 2"),
            Err("press needs exactly one face".to_string()),
        );
        assert_eq!(
            parse_command("trace 1 x"),
            Err("invalid face “x”".to_string()),
        );
        assert_eq!(
            parse_command("words shuffled"),
            Err("unknown option “shuffled”".to_string()),
        );
        assert_eq!(
            parse_command("jump"),
            Err("unknown command “jump”".to_string()),
        );
    }

    #[test]
    fn score_log() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonLinesSink { path: dir.path().join("scores.jsonl") };
        let user = User { id: 5, name: "Klara".to_string() };
        let request = ScoreRequest {
            puzzle_id: 1,
            num_points: 8,
            num_required_words_found: 2,
            num_bonus_words_found: 1,
        };

        sink.submit(&user, &request).unwrap();
        sink.submit(&user, &request).unwrap();

        let contents = std::fs::read_to_string(&sink.path).unwrap();
        let lines = contents.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "{\"userId\":5,\"userName\":\"Klara\",\"puzzleId\":1,\
             \"numPoints\":8,\"numRequiredWordsFound\":2,\
             \"numBonusWordsFound\":1}",
        );
    }
}
