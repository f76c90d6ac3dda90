use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tablut_core::{EngineConfig, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Color {
    /// Defenders and the king
    White,
    /// Attackers
    Black,
}

impl Color {
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::White => Side::Defender,
            Self::Black => Side::Attacker,
        }
    }

    const fn default_port(self) -> u16 {
        match self {
            Self::White => 5800,
            Self::Black => 5801,
        }
    }

    const fn default_name(self) -> &'static str {
        match self {
            Self::White => "ReplayAgentW",
            Self::Black => "ReplayAgentB",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tablut", about = "Tablut player: connects to a match server and plays one side")]
pub struct Args {
    /// Side to play
    #[arg(value_enum, ignore_case = true)]
    pub color: Color,

    /// Time budget in whole seconds, or the server host
    pub first: Option<String>,

    /// Server host, when the first extra argument was a time budget
    pub second: Option<String>,

    /// Replay this side's moves from a match log before handing over to the engine
    #[arg(short = 'R', long = "replay", value_name = "LOGFILE")]
    pub replay: Option<PathBuf>,

    /// Time budget per move in seconds (overrides the positional budget)
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Search depth in plies
    #[arg(long)]
    pub depth: Option<u8>,

    /// Player name announced to the server
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// JSON file with engine weights and search settings
    #[arg(long, value_name = "FILE")]
    pub engine_config: Option<PathBuf>,
}

/// Everything the player process needs once the command line is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    pub side: Side,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub replay: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl Args {
    pub fn resolve(self) -> anyhow::Result<PlayerConfig> {
        let mut engine = match &self.engine_config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading engine config {}", path.display()))?;
                EngineConfig::load_from_json(&json)
                    .with_context(|| format!("parsing engine config {}", path.display()))?
            }
            None => EngineConfig::default(),
        };

        // A purely numeric first extra is the time budget; anything else is the host.
        let (budget, host) = match (self.first, self.second) {
            (Some(first), second) if is_whole_seconds(&first) => {
                let secs: u64 = first
                    .parse()
                    .with_context(|| format!("time budget {first:?} is out of range"))?;
                (Some(Duration::from_secs(secs)), second)
            }
            (Some(first), None) => (None, Some(first)),
            (Some(first), Some(second)) => {
                bail!("unexpected argument {second:?} after host {first:?}")
            }
            (None, _) => (None, None),
        };

        let budget = match self.timeout {
            Some(secs) => Some(
                Duration::try_from_secs_f64(secs)
                    .with_context(|| format!("invalid timeout {secs}"))?,
            ),
            None => budget,
        };
        if let Some(budget) = budget {
            engine.time_limit_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        }
        if let Some(depth) = self.depth {
            engine.depth = depth;
        }

        Ok(PlayerConfig {
            side: self.color.side(),
            name: self
                .name
                .unwrap_or_else(|| self.color.default_name().to_owned()),
            host: host.unwrap_or_else(|| "localhost".to_owned()),
            port: self.port.unwrap_or(self.color.default_port()),
            replay: self.replay,
            engine,
        })
    }
}

fn is_whole_seconds(arg: &str) -> bool {
    !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(argv: &[&str]) -> anyhow::Result<PlayerConfig> {
        Args::try_parse_from(std::iter::once("tablut").chain(argv.iter().copied()))?.resolve()
    }

    #[test]
    fn test_defaults_per_side() {
        let white = resolve(&["WHITE"]).unwrap();
        assert_eq!(white.side, Side::Defender);
        assert_eq!(white.port, 5800);
        assert_eq!(white.name, "ReplayAgentW");
        assert_eq!(white.host, "localhost");
        assert_eq!(white.engine, EngineConfig::default());

        let black = resolve(&["black"]).unwrap();
        assert_eq!(black.side, Side::Attacker);
        assert_eq!(black.port, 5801);
        assert_eq!(black.name, "ReplayAgentB");
    }

    #[test]
    fn test_positional_budget_and_host() {
        let config = resolve(&["white", "45"]).unwrap();
        assert_eq!(config.engine.time_limit_ms, 45_000);
        assert_eq!(config.host, "localhost");

        let config = resolve(&["white", "192.168.1.20"]).unwrap();
        assert_eq!(config.host, "192.168.1.20");
        assert_eq!(config.engine.time_limit_ms, 60_000);

        let config = resolve(&["black", "30", "10.0.0.7"]).unwrap();
        assert_eq!(config.engine.time_limit_ms, 30_000);
        assert_eq!(config.host, "10.0.0.7");
        assert_eq!(
            config.engine.search_limit().time_limit,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_flags_override_positionals() {
        let config = resolve(&[
            "black", "30", "-t", "2.5", "--depth", "2", "--name", "bot", "--port", "9000", "-R",
            "match.log",
        ])
        .unwrap();
        assert_eq!(config.engine.time_limit_ms, 2_500);
        assert_eq!(config.engine.depth, 2);
        assert_eq!(config.name, "bot");
        assert_eq!(config.port, 9000);
        assert_eq!(config.replay, Some(PathBuf::from("match.log")));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(resolve(&[]).is_err());
        assert!(resolve(&["green"]).is_err());
        assert!(resolve(&["white", "-t", "-1"]).is_err());
        assert!(resolve(&["white", "host-a", "host-b"]).is_err());
        assert!(resolve(&["white", "--engine-config", "/nonexistent/engine.json"]).is_err());
    }
}
