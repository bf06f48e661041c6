use log::info;
use serde_json::Value;

use crate::client::BlockingIcodeClient;
use crate::error::Result;

#[derive(Debug)]
pub enum SongEvent {
    /// The server's answer to one posted line.
    Line(Result<Value>),
    /// Every line has been posted once; the next event starts over.
    Finished,
}

/// Endless iterator posting lyric lines as comments, one per `next()`.
pub struct Singer<'a> {
    api: &'a BlockingIcodeClient,
    work_id: String,
    lines: Vec<String>,
    pos: usize,
    rounds: usize,
}

impl Singer<'_> {
    /// Completed passes over the lyrics.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl Iterator for Singer<'_> {
    type Item = SongEvent;

    fn next(&mut self) -> Option<SongEvent> {
        if self.lines.is_empty() {
            return None;
        }
        if self.pos == self.lines.len() {
            self.pos = 0;
            self.rounds += 1;
            info!("Song finished ({} rounds)", self.rounds);
            return Some(SongEvent::Finished);
        }

        let line = &self.lines[self.pos];
        self.pos += 1;
        Some(SongEvent::Line(self.api.comment(&self.work_id, line)))
    }
}

/// Posts `lyrics` line by line under a work, starting over after the last line.
///
/// Blank lines are skipped. The iterator never ends unless there is nothing
/// to sing, so the caller decides how many events to take and how fast.
pub fn sing<'a>(api: &'a BlockingIcodeClient, work_id: &str, lyrics: &str) -> Singer<'a> {
    let lines = lyrics
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();

    Singer {
        api,
        work_id: work_id.to_owned(),
        lines,
        pos: 0,
        rounds: 0,
    }
}
