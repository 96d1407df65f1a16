//! Boundary to an external move-selection service.
//!
//! The service sees a plain-text rendering of the position and answers with
//! free text. Only the first JSON object in that text is considered, and it
//! must match one of two shapes exactly:
//!
//! ```json
//! {"x": 3, "y": 4}
//! {"pass": true}
//! ```
//!
//! Anything else is [`DelegateReply::Malformed`]. [`DelegateSelector`] turns
//! every failure into a decision from the local [`HeuristicAi`].

use std::fmt;

use serde::Deserialize;

use super::{AiRequest, Decision, HeuristicAi, MoveSelector};
use crate::Point;
use crate::error::GoError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateError {
    /// No service is configured or it refused the connection.
    Unavailable(String),
    Timeout,
    Transport(String),
}

impl fmt::Display for DelegateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelegateError::Unavailable(why) => write!(f, "delegate unavailable: {why}"),
            DelegateError::Timeout => write!(f, "delegate timed out"),
            DelegateError::Transport(why) => write!(f, "delegate transport error: {why}"),
        }
    }
}

impl std::error::Error for DelegateError {}

/// Transport to the external service. Implementations own the I/O.
pub trait MoveDelegate {
    fn request(&mut self, prompt: &str) -> Result<String, DelegateError>;
}

impl<F> MoveDelegate for F
where
    F: FnMut(&str) -> Result<String, DelegateError>,
{
    fn request(&mut self, prompt: &str) -> Result<String, DelegateError> {
        self(prompt)
    }
}

/// A reply after schema validation. Nothing raw crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateReply {
    Point(Point),
    Pass,
    Malformed(String),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PlayReply {
    x: u8,
    y: u8,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PassReply {
    pass: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireReply {
    Play(PlayReply),
    Pass(PassReply),
}

/// Validate a raw reply against the board side `size`.
pub fn parse_reply(text: &str, size: u8) -> DelegateReply {
    let Some(value) = first_object(text) else {
        return DelegateReply::Malformed("no JSON object in reply".to_string());
    };
    match serde_json::from_value::<WireReply>(value) {
        Ok(WireReply::Play(PlayReply { x, y })) if x < size && y < size => {
            DelegateReply::Point((x, y))
        }
        Ok(WireReply::Play(PlayReply { x, y })) => {
            DelegateReply::Malformed(format!("({x}, {y}) is off a {size}x{size} board"))
        }
        Ok(WireReply::Pass(PassReply { pass: true })) => DelegateReply::Pass,
        Ok(WireReply::Pass(PassReply { pass: false })) => {
            DelegateReply::Malformed("pass must be true".to_string())
        }
        Err(_) => DelegateReply::Malformed(
            "expected {\"x\":..,\"y\":..} or {\"pass\":true}".to_string(),
        ),
    }
}

fn first_object(text: &str) -> Option<serde_json::Value> {
    text.match_indices('{').find_map(|(start, _)| {
        let mut stream =
            serde_json::Deserializer::from_str(&text[start..]).into_iter::<serde_json::Value>();
        match stream.next() {
            Some(Ok(value)) if value.is_object() => Some(value),
            _ => None,
        }
    })
}

/// Text sent to the service: board with zero-based labels, last move, reply format.
pub fn render_prompt(request: &AiRequest<'_>) -> String {
    Prompt(request).to_string()
}

struct Prompt<'r, 'a>(&'r AiRequest<'a>);

impl fmt::Display for Prompt<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let req = self.0;
        let n = req.goban.size();
        writeln!(
            f,
            "You are playing Go as {} on a {n}x{n} board.",
            req.to_play
        )?;
        writeln!(
            f,
            "Coordinates are zero-based: x is the column from the left, y is the row from the top."
        )?;
        writeln!(f, "X = Black, O = White, . = empty.")?;
        writeln!(f)?;

        write!(f, "  ")?;
        for x in 0..n {
            write!(f, "{x:>3}")?;
        }
        writeln!(f)?;
        for y in 0..n {
            write!(f, "{y:>2}")?;
            for x in 0..n {
                let c = req.goban.stone_at((x, y)).map_or('.', |s| s.symbol());
                write!(f, "{c:>3}")?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;

        match req.last_move {
            Some((x, y)) => writeln!(f, "Opponent's last move: x={x}, y={y}.")?,
            None => writeln!(f, "Opponent's last move: none.")?,
        }
        write!(
            f,
            "Reply with one JSON object: {{\"x\": <column>, \"y\": <row>}} to play, or {{\"pass\": true}} to pass."
        )
    }
}

/// Why a delegate answer was not used.
enum Rejection {
    Transport(DelegateError),
    Malformed(String),
    Illegal(Point, GoError),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Transport(e) => write!(f, "{e}"),
            Rejection::Malformed(why) => write!(f, "malformed reply: {why}"),
            Rejection::Illegal((x, y), e) => write!(f, "illegal point ({x}, {y}): {e}"),
        }
    }
}

/// Asks a [`MoveDelegate`] first and falls back to a local [`HeuristicAi`].
pub struct DelegateSelector<D> {
    delegate: D,
    fallback: HeuristicAi,
    fallbacks: u32,
}

impl<D: MoveDelegate> DelegateSelector<D> {
    pub fn new(delegate: D, fallback: HeuristicAi) -> Self {
        DelegateSelector {
            delegate,
            fallback,
            fallbacks: 0,
        }
    }

    /// How many decisions were handed to the local engine so far.
    pub fn fallbacks(&self) -> u32 {
        self.fallbacks
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    fn ask(&mut self, request: &AiRequest<'_>) -> Result<Decision, Rejection> {
        let prompt = render_prompt(request);
        let text = self
            .delegate
            .request(&prompt)
            .map_err(Rejection::Transport)?;

        match parse_reply(&text, request.goban.size()) {
            DelegateReply::Pass => Ok(Decision::Pass),
            DelegateReply::Malformed(why) => Err(Rejection::Malformed(why)),
            DelegateReply::Point(point) => {
                let placement = request
                    .goban
                    .play(point, request.to_play)
                    .map_err(|e| Rejection::Illegal(point, e))?;
                if let Some(history) = request.history {
                    history
                        .check(&placement.goban)
                        .map_err(|e| Rejection::Illegal(point, e))?;
                }
                Ok(Decision::Play(point))
            }
        }
    }
}

impl<D: MoveDelegate> MoveSelector for DelegateSelector<D> {
    fn select_move(&mut self, request: &AiRequest<'_>) -> Decision {
        match self.ask(request) {
            Ok(decision) => decision,
            Err(rejection) => {
                self.fallbacks += 1;
                tracing::warn!(reason = %rejection, "delegate failed, using local engine");
                self.fallback.select_move(request)
            }
        }
    }
}
