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

//! Debounced submission of the player’s score to the leaderboard.
//! Scores are only sent after the player has stopped finding words
//! for a while, and only when someone is logged in.

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use super::progress::PuzzleProgress;
use super::puzzle::PuzzleId;

pub const SUBMIT_SCORE_DELAY_MS: i64 = 30_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub puzzle_id: PuzzleId,
    pub num_points: u32,
    pub num_required_words_found: u32,
    pub num_bonus_words_found: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// Something that can deliver a score to the leaderboard.
pub trait ScoreSink {
    type Error;

    fn submit(
        &mut self,
        user: &User,
        request: &ScoreRequest,
    ) -> Result<(), Self::Error>;
}

#[derive(Clone, Debug)]
pub struct ScoreSubmitter {
    delay: Duration,
    pending: Option<(ScoreRequest, DateTime<Utc>)>,
}

impl ScoreRequest {
    pub fn new(puzzle_id: PuzzleId, progress: &PuzzleProgress) -> ScoreRequest {
        ScoreRequest {
            puzzle_id,
            num_points: progress.points,
            num_required_words_found: progress.num_required_words_found() as u32,
            num_bonus_words_found: progress.num_bonus_words_found() as u32,
        }
    }
}

impl Default for ScoreSubmitter {
    fn default() -> ScoreSubmitter {
        ScoreSubmitter::new()
    }
}

impl ScoreSubmitter {
    pub fn new() -> ScoreSubmitter {
        ScoreSubmitter::with_delay(Duration::milliseconds(SUBMIT_SCORE_DELAY_MS))
    }

    pub fn with_delay(delay: Duration) -> ScoreSubmitter {
        ScoreSubmitter {
            delay,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<&ScoreRequest> {
        self.pending.as_ref().map(|(request, _)| request)
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.as_ref().map(|&(_, deadline)| deadline)
    }

    /// Queues a request to be sent once the delay has passed. Any
    /// request that was already waiting is abandoned and returned.
    pub fn schedule(
        &mut self,
        request: ScoreRequest,
        now: DateTime<Utc>,
    ) -> Option<ScoreRequest> {
        let deadline = now + self.delay;
        let replaced = self.pending
            .replace((request, deadline))
            .map(|(request, _)| request);

        if replaced.is_some() {
            debug!("superseded pending score submission");
        }

        replaced
    }

    pub fn cancel(&mut self) -> Option<ScoreRequest> {
        self.pending.take().map(|(request, _)| request)
    }

    fn send<S: ScoreSink>(
        request: ScoreRequest,
        user: Option<&User>,
        sink: &mut S,
    ) -> Result<Option<ScoreRequest>, S::Error> {
        let Some(user) = user
        else {
            debug!("nobody is logged in, not submitting score");
            return Ok(None);
        };

        sink.submit(user, &request)?;

        info!(
            "submitted {} points for puzzle {} as {}",
            request.num_points,
            request.puzzle_id,
            user.name,
        );

        Ok(Some(request))
    }

    /// Sends the pending request if its deadline has passed. Returns
    /// the request that was delivered.
    pub fn flush_due<S: ScoreSink>(
        &mut self,
        now: DateTime<Utc>,
        user: Option<&User>,
        sink: &mut S,
    ) -> Result<Option<ScoreRequest>, S::Error> {
        if !self.deadline().is_some_and(|deadline| deadline <= now) {
            return Ok(None);
        }

        self.finish(user, sink)
    }

    /// Sends whatever is pending without waiting, for when the session
    /// ends.
    pub fn finish<S: ScoreSink>(
        &mut self,
        user: Option<&User>,
        sink: &mut S,
    ) -> Result<Option<ScoreRequest>, S::Error> {
        match self.pending.take() {
            Some((request, _)) => Self::send(request, user, sink),
            None => Ok(None),
        }
    }
}
