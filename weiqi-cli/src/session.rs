use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use weiqi_engine::coord;
use weiqi_engine::{
    AiRequest, Decision, Difficulty, Engine, GoError, HeuristicAi, MoveSelector, Point, Stage,
    Stone, sgf,
};

type SharedSelector = Arc<Mutex<Box<dyn MoveSelector + Send>>>;

/// A computer player. Decisions run on the blocking pool so the pause and the
/// timeout stay on the async side.
pub struct Computer {
    ai: SharedSelector,
    difficulty: Difficulty,
    think_scale: f64,
    limit: Duration,
}

impl Computer {
    pub fn new(difficulty: Difficulty, seed: Option<u64>, think_scale: f64, limit: Duration) -> Self {
        let ai = match seed {
            Some(seed) => HeuristicAi::seeded(difficulty, seed),
            None => HeuristicAi::new(difficulty),
        };
        Computer::with_selector(Box::new(ai), difficulty, think_scale, limit)
    }

    /// A computer driven by any selector. `difficulty` only sets the pause.
    pub fn with_selector(
        selector: Box<dyn MoveSelector + Send>,
        difficulty: Difficulty,
        think_scale: f64,
        limit: Duration,
    ) -> Self {
        Computer {
            ai: Arc::new(Mutex::new(selector)),
            difficulty,
            think_scale,
            limit,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Choose a move for the side to play. Passes if the decision fails or
    /// the selector takes longer than the configured limit. The thinking pause
    /// is not counted against the limit.
    pub async fn decide(&self, engine: &Engine) -> Decision {
        let goban = engine.goban().clone();
        let history = engine.history().clone();
        let to_play = engine.current_turn_stone();
        let last_move = engine.last_play_pos();
        let ai = Arc::clone(&self.ai);
        let started = Instant::now();

        let task = tokio::task::spawn_blocking(move || {
            let mut ai = ai.lock().unwrap_or_else(PoisonError::into_inner);
            let request = AiRequest::new(&goban, to_play)
                .with_last_move(last_move)
                .with_history(&history);
            ai.select_move(&request)
        });

        let decision = match tokio::time::timeout(self.limit, task).await {
            Ok(Ok(decision)) => decision,
            Ok(Err(e)) => {
                tracing::error!("ai task failed: {e}");
                return Decision::Pass;
            }
            Err(_) => {
                tracing::warn!(
                    limit_ms = self.limit.as_millis() as u64,
                    "ai decision timed out, passing"
                );
                return Decision::Pass;
            }
        };

        let pause = self.difficulty.think_delay(self.think_scale);
        tokio::time::sleep(pause.saturating_sub(started.elapsed())).await;
        decision
    }
}

pub enum Seat {
    Human,
    Computer(Computer),
}

/// A line typed by the human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Point),
    Pass,
    Undo,
    Resign,
    Help,
    Quit,
}

pub fn parse_command(line: &str, size: u8) -> Result<Command, String> {
    let word = line.trim();
    match word.to_ascii_lowercase().as_str() {
        "pass" | "p" => Ok(Command::Pass),
        "undo" | "u" => Ok(Command::Undo),
        "resign" => Ok(Command::Resign),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => coord::parse_point(word, size)
            .map(Command::Play)
            .ok_or_else(|| format!("not a move or command: {word:?}")),
    }
}

const HELP: &str = "Moves are given as column letter and row number, e.g. D4.\n\
Commands: pass, undo, resign, help, quit.";

pub struct Session {
    engine: Engine,
    black: Seat,
    white: Seat,
    max_moves: Option<usize>,
}

impl Session {
    pub fn new(engine: Engine, black: Seat, white: Seat) -> Self {
        Session {
            engine,
            black,
            white,
            max_moves: None,
        }
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = Some(max_moves);
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn seat(&self, stone: Stone) -> &Seat {
        match stone {
            Stone::Black => &self.black,
            Stone::White => &self.white,
        }
    }

    /// Play until both sides pass, someone resigns, or the human quits.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        self.show_board();

        loop {
            match self.engine.stage() {
                Stage::Scoring => {
                    self.finish();
                    return Ok(());
                }
                Stage::Done => {
                    self.announce_result();
                    return Ok(());
                }
                _ => {}
            }
            if self
                .max_moves
                .is_some_and(|max| self.engine.moves().len() >= max)
            {
                tracing::info!(moves = self.engine.moves().len(), "move limit reached");
                self.finish();
                return Ok(());
            }

            let stone = self.engine.current_turn_stone();
            match self.seat(stone) {
                Seat::Computer(computer) => {
                    let decision = computer.decide(&self.engine).await;
                    self.apply_computer(stone, decision);
                }
                Seat::Human => {
                    print!("{stone} to play> ");
                    flush_stdout();
                    let Some(line) = lines.next_line().await? else {
                        println!();
                        return Ok(());
                    };
                    match parse_command(&line, self.engine.size()) {
                        Ok(Command::Quit) => return Ok(()),
                        Ok(command) => self.apply_human(stone, command),
                        Err(e) => println!("{e}. Type help for commands."),
                    }
                }
            }
        }
    }

    fn apply_computer(&mut self, stone: Stone, decision: Decision) {
        let size = self.engine.size();
        let outcome = match decision {
            Decision::Play(p) => self.engine.try_play(stone, p),
            Decision::Pass => self.engine.try_pass(stone),
        };
        match outcome {
            Ok(_) => {
                tracing::debug!(%stone, %decision, "computer move");
                println!("{stone} plays {}", decision.display(size));
            }
            Err(e) => {
                // The selector already filters illegal points; passing keeps the game moving.
                tracing::warn!(%stone, %decision, "computer move rejected: {e}");
                let _ = self.engine.try_pass(stone);
                println!("{stone} passes");
            }
        }
        self.show_board();
    }

    fn apply_human(&mut self, stone: Stone, command: Command) {
        let result = match command {
            Command::Play(p) => self.engine.try_play(stone, p).map(|_| ()),
            Command::Pass => self.engine.try_pass(stone).map(|_| ()),
            Command::Resign => {
                self.engine.try_resign(stone);
                Ok(())
            }
            Command::Undo => {
                self.undo_turn();
                Ok(())
            }
            Command::Help => {
                println!("{HELP}");
                return;
            }
            Command::Quit => return,
        };
        match result {
            Ok(()) => self.show_board(),
            Err(GoError::Superko) => {
                println!("Illegal: that move would repeat an earlier board position.")
            }
            Err(e) => println!("Illegal move: {e}."),
        }
    }

    /// Take back moves until it is a human's turn again.
    fn undo_turn(&mut self) {
        if !self.engine.undo() {
            println!("Nothing to undo.");
            return;
        }
        let stone = self.engine.current_turn_stone();
        if matches!(self.seat(stone), Seat::Computer(_)) {
            self.engine.undo();
        }
        self.show_board();
    }

    fn finish(&mut self) {
        let score = self.engine.finish();
        let komi = self.engine.config().komi;
        println!(
            "Black: {} stones + {} territory = {}",
            score.black.stones,
            score.black.territory,
            score.black_total()
        );
        println!(
            "White: {} stones + {} territory + {komi} komi = {}",
            score.white.stones,
            score.white.territory,
            score.white_total(komi)
        );
        self.announce_result();
    }

    fn announce_result(&self) {
        let result = self.engine.result().unwrap_or("no result");
        tracing::info!(result, moves = self.engine.moves().len(), "game over");
        println!("Result: {result}");
    }

    pub fn print_sgf(&self) {
        println!("{}", sgf::export(&self.engine.record()));
    }

    fn show_board(&self) {
        let captures = self.engine.captures();
        println!();
        print!("{}", self.engine.goban());
        let last = self.engine.last_move().map_or_else(
            || "-".to_string(),
            |t| match t.point() {
                Some(p) => format!("{} {}", t.stone, coord::format_point(p, self.engine.size())),
                None => format!("{} pass", t.stone),
            },
        );
        println!(
            "Move {} | last: {last} | captures B {} W {}",
            self.engine.moves().len(),
            captures.get(Stone::Black),
            captures.get(Stone::White)
        );
    }
}

fn flush_stdout() {
    use std::io::Write;
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use weiqi_engine::{BoardSize, GameConfig};

    fn nine() -> Engine {
        Engine::new(GameConfig::new(BoardSize::Nine)).unwrap()
    }

    #[test]
    fn parses_commands_and_points() {
        assert_eq!(parse_command("pass", 9), Ok(Command::Pass));
        assert_eq!(parse_command(" UNDO ", 9), Ok(Command::Undo));
        assert_eq!(parse_command("resign", 9), Ok(Command::Resign));
        assert_eq!(parse_command("d4", 9), Ok(Command::Play((3, 5))));
        assert_eq!(parse_command("A9", 9), Ok(Command::Play((0, 0))));
        assert!(parse_command("Z4", 9).is_err());
        assert!(parse_command("D10", 9).is_err());
        assert!(parse_command("", 9).is_err());
    }

    #[tokio::test]
    async fn computer_decides_without_pause() {
        let engine = nine();
        let computer = Computer::new(Difficulty::Expert, Some(3), 0.0, Duration::from_secs(5));
        assert_eq!(computer.decide(&engine).await, Decision::Play((2, 2)));
    }

    struct Slow(Duration);

    impl MoveSelector for Slow {
        fn select_move(&mut self, _: &AiRequest<'_>) -> Decision {
            std::thread::sleep(self.0);
            Decision::Play((4, 4))
        }
    }

    #[tokio::test]
    async fn computer_passes_when_selector_is_slow() {
        let engine = nine();
        let slow = Box::new(Slow(Duration::from_millis(300)));
        let computer =
            Computer::with_selector(slow, Difficulty::Expert, 0.0, Duration::from_millis(20));
        assert_eq!(computer.decide(&engine).await, Decision::Pass);
    }

    #[tokio::test]
    async fn pause_longer_than_limit_still_plays() {
        let mut engine = nine();
        // White (4,4) is left with a single liberty at (4,5).
        engine.try_play(Stone::Black, (3, 4)).unwrap();
        engine.try_play(Stone::White, (4, 4)).unwrap();
        engine.try_play(Stone::Black, (5, 4)).unwrap();
        engine.try_play(Stone::White, (8, 8)).unwrap();
        engine.try_play(Stone::Black, (4, 3)).unwrap();
        engine.try_play(Stone::White, (8, 0)).unwrap();

        let limit = Duration::from_millis(1000);
        let quick = Computer::new(Difficulty::Expert, Some(3), 0.0, limit);
        let paused = Computer::new(Difficulty::Expert, Some(3), 1.0, limit);
        assert!(Difficulty::Expert.think_delay(1.0) > limit);

        let started = Instant::now();
        assert_eq!(paused.decide(&engine).await, Decision::Play((4, 5)));
        assert!(started.elapsed() >= Difficulty::Expert.think_delay(1.0));
        assert_eq!(quick.decide(&engine).await, Decision::Play((4, 5)));
    }

    #[tokio::test]
    async fn seeded_computers_agree() {
        let mut engine = nine();
        engine.try_play(Stone::Black, (4, 4)).unwrap();
        let a = Computer::new(Difficulty::Easy, Some(8), 0.0, Duration::from_secs(5));
        let b = Computer::new(Difficulty::Easy, Some(8), 0.0, Duration::from_secs(5));
        assert_eq!(a.decide(&engine).await, b.decide(&engine).await);
    }

    #[test]
    fn undo_against_computer_returns_to_human() {
        let mut engine = nine();
        engine.try_play(Stone::Black, (2, 2)).unwrap();
        engine.try_play(Stone::White, (6, 6)).unwrap();
        let computer = Computer::new(Difficulty::Novice, Some(1), 0.0, Duration::from_secs(1));
        let mut session = Session::new(engine, Seat::Human, Seat::Computer(computer));
        session.undo_turn();
        assert!(session.engine().moves().is_empty());
        assert_eq!(session.engine().current_turn_stone(), Stone::Black);
    }
}
