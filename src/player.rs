use crate::network::{read_message, write_message};
use crate::replay::ReplayQueue;
use anyhow::Context;
use shared::{Action, StateMessage, TurnLabel};
use std::sync::Arc;
use tablut_core::logic::generator::MoveGenerator;
use tablut_core::logic::rules::validate_move;
use tablut_core::{AlphaBetaEngine, Board, EngineConfig, Searcher, Side};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

/// Plays one side of a match: replayed moves first, then the engine.
pub struct Player {
    side: Side,
    engine_config: Arc<EngineConfig>,
    replay: Option<ReplayQueue>,
}

impl Player {
    #[must_use]
    pub const fn new(side: Side, engine_config: Arc<EngineConfig>, replay: Option<ReplayQueue>) -> Self {
        Self {
            side,
            engine_config,
            replay,
        }
    }

    /// Announces `name`, then answers every state addressed to this side until
    /// the game ends. Returns the final turn label, or `None` if the server
    /// hung up first.
    pub async fn play<S>(&mut self, mut stream: S, name: &str) -> anyhow::Result<Option<TurnLabel>>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        write_message(&mut stream, name)
            .await
            .context("sending player name")?;
        info!(player = name, side = %self.side, "registered with server");

        loop {
            let Some(state) = read_message::<_, StateMessage>(&mut stream)
                .await
                .context("reading game state")?
            else {
                return Ok(None);
            };

            if state.turn.is_terminal() {
                info!(result = %state.turn, "game over");
                return Ok(Some(state.turn));
            }
            if state.turn.side() != Some(self.side) {
                debug!(turn = %state.turn, "waiting for opponent");
                continue;
            }

            let action = self.decide(&state).await?;
            info!(from = %action.from, to = %action.to, "sending move");
            write_message(&mut stream, &action)
                .await
                .context("sending action")?;
        }
    }

    pub async fn decide(&mut self, state: &StateMessage) -> anyhow::Result<Action> {
        let board = state.to_board().context("decoding board")?;

        if let Some(action) = self.next_replayed(&board) {
            return Ok(action);
        }

        let side = self.side;
        let config = Arc::clone(&self.engine_config);
        let limit = config.search_limit();
        let search_board = board.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            AlphaBetaEngine::new(config).search(&search_board, side, limit)
        })
        .await
        .context("search task failed")?;

        info!(
            score = outcome.score,
            nodes = outcome.stats.nodes,
            time_ms = outcome.stats.time_ms,
            timed_out = outcome.stats.timed_out,
            "search finished"
        );

        if let Some(mv) = outcome.best_move {
            return Ok(Action::from_move(&mv));
        }
        Ok(fallback(&board, side))
    }

    fn next_replayed(&mut self, board: &Board) -> Option<Action> {
        let queue = self.replay.as_mut()?;
        let Some(action) = queue.pop() else {
            info!(played = queue.total(), "replay finished, switching to engine");
            self.replay = None;
            return None;
        };

        info!(n = queue.played(), of = queue.total(), "replaying recorded move");
        match action.to_move() {
            Ok(mv) => {
                if let Err(err) = validate_move(board, &mv) {
                    warn!(?err, from = %action.from, to = %action.to, "recorded move is not legal here");
                }
            }
            Err(err) => warn!(%err, "recorded move does not parse"),
        }
        Some(action)
    }
}

/// First legal move, or the placeholder when there is none.
fn fallback(board: &Board, side: Side) -> Action {
    let moves = MoveGenerator::new().generate_moves(board, side);
    match moves.first() {
        Some(mv) => {
            warn!(%mv, "engine returned no move, playing first legal move");
            Action::from_move(mv)
        }
        None => {
            warn!("no legal moves, sending placeholder");
            Action::placeholder(side)
        }
    }
}
