use anyhow::Context;
use shared::Action;
use std::collections::VecDeque;
use std::path::Path;
use tablut_core::Side;

const RECORD_MARKER: &str = "Turn: ";

/// Moves recorded for one side in a match log, played back in file order.
#[derive(Debug, Clone, Default)]
pub struct ReplayQueue {
    actions: VecDeque<Action>,
    total: usize,
}

impl ReplayQueue {
    /// Keeps lines of the form `Turn: W Pawn from E3 to B3` whose turn letter
    /// matches `side`. Everything else in the log is ignored.
    #[must_use]
    pub fn parse(log: &str, side: Side) -> Self {
        let letter = side_letter(side);
        let actions: VecDeque<Action> = log
            .lines()
            .filter_map(parse_line)
            .filter(|record| record.turn == letter)
            .map(|record| Action {
                from: record.from.to_owned(),
                to: record.to.to_owned(),
                turn: side.into(),
            })
            .collect();
        Self {
            total: actions.len(),
            actions,
        }
    }

    pub async fn load(path: &Path, side: Side) -> anyhow::Result<Self> {
        let log = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading replay log {}", path.display()))?;
        Ok(Self::parse(&log, side))
    }

    pub fn pop(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of recorded moves already handed out.
    #[must_use]
    pub fn played(&self) -> usize {
        self.total - self.actions.len()
    }
}

const fn side_letter(side: Side) -> char {
    match side {
        Side::Defender => 'W',
        Side::Attacker => 'B',
    }
}

struct Record<'a> {
    turn: char,
    from: &'a str,
    to: &'a str,
}

fn parse_line(line: &str) -> Option<Record<'_>> {
    line.match_indices(RECORD_MARKER)
        .find_map(|(at, marker)| parse_record(line.get(at + marker.len()..)?))
}

fn parse_record(rest: &str) -> Option<Record<'_>> {
    let mut chars = rest.chars();
    let turn = chars.next().filter(|c| matches!(c, 'W' | 'B'))?;
    let rest = chars.as_str().strip_prefix(" Pawn from ")?;
    let (from, rest) = split_square(rest)?;
    let rest = rest.strip_prefix(" to ")?;
    let (to, _) = split_square(rest)?;
    Some(Record { turn, from, to })
}

/// A square label is one word character followed by one digit.
fn split_square(s: &str) -> Option<(&str, &str)> {
    let mut chars = s.char_indices();
    let (_, letter) = chars.next()?;
    let (_, digit) = chars.next()?;
    if !(letter.is_alphanumeric() || letter == '_') || !digit.is_ascii_digit() {
        return None;
    }
    let end = chars.next().map_or(s.len(), |(at, _)| at);
    Some(s.split_at(end))
}
