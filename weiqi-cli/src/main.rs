//! Terminal Go against the heuristic engine.
//!
//! ## Usage
//!
//! - `weiqi` - play Black against a medium computer on 9x9
//! - `weiqi --color white -d expert --size 13` - pick side, strength and board
//! - `weiqi self-play --seed 7 --think-scale 0 --sgf` - watch a reproducible computer game

mod config;
mod session;

use clap::Parser;
use weiqi_engine::{Engine, Stone};

use config::{Cli, Mode};
use session::{Computer, Seat, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weiqi_cli=info,weiqi_engine=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.game_config()?;
    let engine = Engine::new(config)?;
    let computer = |difficulty, stone| {
        Computer::new(
            difficulty,
            cli.seed_for(stone),
            cli.think_scale,
            cli.decision_timeout(),
        )
    };

    let mut session = match cli.mode() {
        Mode::Play => {
            let color = cli.color;
            let ai = Seat::Computer(computer(cli.difficulty, color.opp()));
            tracing::info!(
                size = %config.size,
                handicap = config.handicap,
                komi = config.komi,
                difficulty = %cli.difficulty,
                human = %color,
                "starting game"
            );
            match color {
                Stone::Black => Session::new(engine, Seat::Human, ai),
                Stone::White => Session::new(engine, ai, Seat::Human),
            }
        }
        Mode::SelfPlay { white, max_moves } => {
            let black = computer(cli.difficulty, Stone::Black);
            let white = computer(white.unwrap_or(cli.difficulty), Stone::White);
            tracing::info!(
                size = %config.size,
                black = %black.difficulty(),
                white = %white.difficulty(),
                max_moves,
                "starting self-play"
            );
            Session::new(engine, Seat::Computer(black), Seat::Computer(white))
                .with_max_moves(max_moves)
        }
    };

    session.run().await?;
    if cli.sgf {
        session.print_sgf();
    }
    Ok(())
}
