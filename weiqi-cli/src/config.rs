use std::time::Duration;

use clap::{Parser, Subcommand};
use weiqi_engine::{BoardSize, Difficulty, GameConfig, Stone};

/// Play Go against a heuristic computer opponent in the terminal
#[derive(Parser, Debug)]
#[command(name = "weiqi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Mode>,

    /// Board side: 9, 13 or 19
    #[arg(long, short, global = true, env = "WEIQI_SIZE", default_value_t = 9)]
    pub size: u8,

    /// Handicap stones for Black (2 or more; 0 for an even game)
    #[arg(long, global = true, env = "WEIQI_HANDICAP", default_value_t = 0)]
    pub handicap: u8,

    /// Komi for White; defaults to 7.5, or 0.5 with a handicap
    #[arg(long, global = true, env = "WEIQI_KOMI")]
    pub komi: Option<f64>,

    /// Computer strength: novice, easy, medium, hard, expert (or 1-5)
    #[arg(long, short, global = true, env = "WEIQI_DIFFICULTY", default_value = "medium")]
    pub difficulty: Difficulty,

    /// Fix the computer's random source for a reproducible game
    #[arg(long, global = true, env = "WEIQI_SEED")]
    pub seed: Option<u64>,

    /// Multiplier on the computer's thinking pause; 0 disables it
    #[arg(long, global = true, env = "WEIQI_THINK_SCALE", default_value_t = 1.0)]
    pub think_scale: f64,

    /// Upper bound on one computer decision; the computer passes when exceeded
    #[arg(long, global = true, env = "WEIQI_TIMEOUT_MS", default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Your color when playing the computer: black or white
    #[arg(long, short, global = true, env = "WEIQI_COLOR", default_value = "black")]
    pub color: Stone,

    /// Print the game record as SGF when the game ends
    #[arg(long, global = true, env = "WEIQI_SGF")]
    pub sgf: bool,
}

#[derive(Subcommand, Debug, Clone, Default)]
pub enum Mode {
    /// Play against the computer (default)
    #[default]
    Play,
    /// Let the computer play both sides
    SelfPlay {
        /// Strength of White; defaults to --difficulty
        #[arg(long)]
        white: Option<Difficulty>,

        /// Stop and score after this many moves
        #[arg(long, default_value_t = 400)]
        max_moves: usize,
    },
}

impl Cli {
    pub fn game_config(&self) -> anyhow::Result<GameConfig> {
        anyhow::ensure!(
            self.think_scale.is_finite() && self.think_scale >= 0.0,
            "think scale must be a finite number of zero or more, got {}",
            self.think_scale
        );
        let size = BoardSize::try_from(self.size)?;
        let mut config = GameConfig::new(size).with_handicap(self.handicap);
        if let Some(komi) = self.komi {
            config = config.with_komi(komi);
        }
        // Validates the handicap count for this board.
        config.initial_goban()?;
        Ok(config)
    }

    pub fn mode(&self) -> Mode {
        self.command.clone().unwrap_or_default()
    }

    pub fn decision_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Seed for one computer player. Seeded runs give each side its own stream.
    pub fn seed_for(&self, stone: Stone) -> Option<u64> {
        self.seed.map(|s| match stone {
            Stone::Black => s,
            Stone::White => s.wrapping_add(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("weiqi").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.size, 9);
        assert_eq!(cli.difficulty, Difficulty::Medium);
        assert!(matches!(cli.mode(), Mode::Play));
        assert_eq!(cli.color, Stone::Black);
        let config = cli.game_config().unwrap();
        assert_eq!(config.size, BoardSize::Nine);
        assert_eq!(config.komi, 7.5);
    }

    #[test]
    fn flags_after_subcommand() {
        let cli = parse(&["self-play", "--white", "expert", "-d", "2", "--size", "13"]);
        assert_eq!(cli.difficulty, Difficulty::Easy);
        assert_eq!(cli.size, 13);
        assert!(matches!(
            cli.mode(),
            Mode::SelfPlay {
                white: Some(Difficulty::Expert),
                max_moves: 400
            }
        ));
    }

    #[test]
    fn handicap_lowers_komi_unless_given() {
        let cli = parse(&["--size", "19", "--handicap", "4"]);
        assert_eq!(cli.game_config().unwrap().komi, 0.5);
        let cli = parse(&["--size", "19", "--handicap", "4", "--komi", "3"]);
        assert_eq!(cli.game_config().unwrap().komi, 3.0);
    }

    #[test]
    fn rejects_bad_board_settings() {
        assert!(parse(&["--size", "11"]).game_config().is_err());
        assert!(parse(&["--handicap", "7"]).game_config().is_err());
        assert!(Cli::try_parse_from(["weiqi", "--difficulty", "grandmaster"]).is_err());
    }

    #[test]
    fn color_applies_without_subcommand() {
        let cli = parse(&["--color", "white"]);
        assert!(matches!(cli.mode(), Mode::Play));
        assert_eq!(cli.color, Stone::White);
        assert_eq!(parse(&["play", "-c", "white"]).color, Stone::White);
    }

    #[test]
    fn rejects_unusable_think_scale() {
        assert!(parse(&["--think-scale", "inf"]).game_config().is_err());
        assert!(parse(&["--think-scale", "NaN"]).game_config().is_err());
        assert!(parse(&["--think-scale=-1"]).game_config().is_err());
        assert!(parse(&["--think-scale", "0"]).game_config().is_ok());
    }

    #[test]
    fn seeds_differ_per_side() {
        let cli = parse(&["--seed", "10"]);
        assert_eq!(cli.seed_for(Stone::Black), Some(10));
        assert_eq!(cli.seed_for(Stone::White), Some(11));
        assert_eq!(parse(&[]).seed_for(Stone::Black), None);
    }
}
