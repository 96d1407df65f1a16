//! Local heuristic opponent.
//!
//! Every empty point is simulated with [`Goban::play`] and scored by a sum of
//! independent terms. The best candidates form a shortlist whose length
//! depends on the difficulty, and one of them is drawn at random.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use super::{AiRequest, Decision, Difficulty, MoveSelector, Profile};
use crate::Point;
use crate::goban::{Goban, GroupInfo, Placement};
use crate::stone::Stone;

const CAPTURE_BASE: f64 = 100.0;
const CAPTURE_PER_STONE: f64 = 20.0;
const SNAPBACK_RISK: f64 = 60.0;
const SELF_ATARI: f64 = 500.0;
const TWO_LIBERTY_CAUTION: f64 = 15.0;
const RESCUE_BASE: f64 = 30.0;
const RESCUE_PER_STONE: f64 = 25.0;
const ATARI_BASE: f64 = 35.0;
const ATARI_PER_STONE: f64 = 5.0;
const PRESSURE: f64 = 8.0;
const GOOD_LINE: f64 = 25.0;
const CORNER_POINT: f64 = 15.0;
const FIRST_LINE: f64 = 40.0;
const SECOND_LINE: f64 = 20.0;
const DEEP_CENTER: f64 = 10.0;
const PROXIMITY_RANGE: i32 = 6;
const PROXIMITY_WEIGHT: f64 = 4.0;
const HEAVY_SHAPE: f64 = 15.0;
const HANE: f64 = 20.0;
const EYE_FILL: f64 = 1000.0;
const ENDGAME_LOW_VALUE: f64 = 20.0;
const ENDGAME_DAMPING: f64 = 10.0;
/// Endgame starts once fewer than this share of the points are empty.
const ENDGAME_EMPTY_RATIO: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Opening,
    Middle,
    Endgame,
}

impl Phase {
    pub fn of(goban: &Goban) -> Self {
        let total = goban.board().len();
        let stones = goban.stone_count();
        if stones < total / 8 {
            Phase::Opening
        } else if ((total - stones) as f64) < total as f64 * ENDGAME_EMPTY_RATIO {
            Phase::Endgame
        } else {
            Phase::Middle
        }
    }
}

/// A legal point and its score for one decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub point: Point,
    pub score: f64,
}

#[derive(Debug)]
pub struct HeuristicAi {
    difficulty: Difficulty,
    profile: Profile,
    rng: StdRng,
}

impl HeuristicAi {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::seeded(difficulty, rand::rng().random())
    }

    /// Reproducible opponent: the same seed and inputs give the same moves.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        HeuristicAi {
            difficulty,
            profile: difficulty.profile(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// All legal candidates, best first. Ties keep row-major order.
    pub fn candidates(&mut self, request: &AiRequest<'_>) -> Vec<Candidate> {
        let goban = request.goban;
        let eval = Evaluator {
            goban,
            stone: request.to_play,
            last_move: request.last_move,
            profile: &self.profile,
            phase: Phase::of(goban),
        };

        let mut scored: Vec<(usize, Candidate)> = Vec::new();
        for point in goban.empty_points() {
            let Ok(placement) = goban.play(point, request.to_play) else {
                continue;
            };
            if request
                .history
                .is_some_and(|h| h.contains(&placement.goban))
            {
                continue;
            }
            let mut score = eval.score(point, &placement);
            if self.profile.noise > 0.0 {
                score += self.rng.random_range(0.0..self.profile.noise);
            }
            scored.push((goban.idx(point), Candidate { point, score }));
        }

        scored.sort_by(|(ia, a), (ib, b)| b.score.total_cmp(&a.score).then(ia.cmp(ib)));
        scored.into_iter().map(|(_, c)| c).collect()
    }
}

impl MoveSelector for HeuristicAi {
    fn select_move(&mut self, request: &AiRequest<'_>) -> Decision {
        let candidates = self.candidates(request);
        let Some(best) = candidates.first() else {
            tracing::debug!(difficulty = %self.difficulty, "no legal candidates, passing");
            return Decision::Pass;
        };

        let phase = Phase::of(request.goban);
        let threshold = match phase {
            Phase::Endgame => self.profile.endgame_pass_threshold,
            _ => self.profile.pass_threshold,
        };
        if best.score < threshold {
            tracing::debug!(
                difficulty = %self.difficulty,
                best = best.score,
                threshold,
                "best candidate below pass threshold"
            );
            return Decision::Pass;
        }

        let shortlist = self
            .profile
            .top_n
            .map_or(candidates.len(), |n| n.clamp(1, candidates.len()));
        let pick = if shortlist > 1 {
            self.rng.random_range(0..shortlist)
        } else {
            0
        };
        let chosen = candidates[pick];
        tracing::debug!(
            difficulty = %self.difficulty,
            ?phase,
            candidates = candidates.len(),
            shortlist,
            best = best.score,
            chosen = chosen.score,
            "ai move"
        );
        Decision::Play(chosen.point)
    }
}

/// Scoring context shared by every candidate of one decision.
struct Evaluator<'a> {
    goban: &'a Goban,
    stone: Stone,
    last_move: Option<Point>,
    profile: &'a Profile,
    phase: Phase,
}

impl Evaluator<'_> {
    fn score(&self, point: Point, placement: &Placement) -> f64 {
        let own_libs = placement.goban.liberties(point).len();
        let captured = placement.captured;

        let mut score = self.capture(captured, own_libs)
            + self.safety(captured, own_libs)
            + self.rescue(point, own_libs)
            + self.attack(point, &placement.goban)
            + self.eye_fill(point, captured);

        score += match self.phase {
            Phase::Opening => self.opening(point),
            Phase::Middle | Phase::Endgame => self.proximity(point),
        };
        if self.profile.shape {
            score += self.shape(point, &placement.goban);
        }
        if self.phase == Phase::Endgame && score < ENDGAME_LOW_VALUE {
            score -= ENDGAME_DAMPING;
        }
        score
    }

    fn capture(&self, captured: u32, own_libs: usize) -> f64 {
        if captured == 0 {
            return 0.0;
        }
        let mut score = CAPTURE_BASE + CAPTURE_PER_STONE * captured as f64;
        // Taking one stone and being left in atari invites a snapback.
        if captured == 1 && own_libs == 1 {
            score -= SNAPBACK_RISK;
        }
        score
    }

    fn safety(&self, captured: u32, own_libs: usize) -> f64 {
        if captured > 0 {
            return 0.0;
        }
        match own_libs {
            1 => -SELF_ATARI * self.profile.self_atari_scale,
            2 if self.profile.two_liberty_caution => -TWO_LIBERTY_CAUTION,
            _ => 0.0,
        }
    }

    fn rescue(&self, point: Point, own_libs: usize) -> f64 {
        if own_libs <= 1 {
            return 0.0;
        }
        neighbor_groups(self.goban, point, self.stone)
            .iter()
            .filter(|g| g.liberties.len() == 1)
            .map(|g| RESCUE_BASE + RESCUE_PER_STONE * g.stones.len() as f64)
            .sum()
    }

    fn attack(&self, point: Point, after: &Goban) -> f64 {
        let opp = self.stone.opp();
        neighbor_groups(self.goban, point, opp)
            .iter()
            .map(|g| {
                let rep = g.stones[0];
                if after.stone_at(rep) != Some(opp) {
                    return 0.0;
                }
                let libs = after.liberties(rep).len();
                if libs == 1 {
                    ATARI_BASE + ATARI_PER_STONE * g.stones.len() as f64
                } else if libs < g.liberties.len() {
                    PRESSURE
                } else {
                    0.0
                }
            })
            .sum()
    }

    fn opening(&self, (x, y): Point) -> f64 {
        let n = self.goban.size();
        let edge_x = x.min(n - 1 - x) + 1;
        let edge_y = y.min(n - 1 - y) + 1;
        match edge_x.min(edge_y) {
            1 => -FIRST_LINE,
            2 => -SECOND_LINE,
            3 | 4 => {
                let corner = (3..=4).contains(&edge_x) && (3..=4).contains(&edge_y);
                GOOD_LINE + if corner { CORNER_POINT } else { 0.0 }
            }
            _ => -DEEP_CENTER,
        }
    }

    fn proximity(&self, (x, y): Point) -> f64 {
        let Some((lx, ly)) = self.last_move else {
            return 0.0;
        };
        let dist = (x as i32 - lx as i32).abs() + (y as i32 - ly as i32).abs();
        (PROXIMITY_RANGE - dist).max(0) as f64 * PROXIMITY_WEIGHT
    }

    fn shape(&self, point: Point, after: &Goban) -> f64 {
        let own = after
            .neighbors(point)
            .into_iter()
            .chain(after.diagonals(point))
            .filter(|&p| after.stone_at(p) == Some(self.stone))
            .count();
        let mut score = 0.0;
        if own >= 4 {
            score -= HEAVY_SHAPE * (own - 3) as f64;
        }
        if self.is_hane_at_head(point) {
            score += HANE;
        }
        score
    }

    /// Two enemy stones in a line from `point`, with one of ours beside the near one.
    fn is_hane_at_head(&self, point: Point) -> bool {
        let opp = Some(self.stone.opp());
        let own = Some(self.stone);
        [(1i16, 0i16), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .any(|(dx, dy)| {
                let near = self.goban.offset(point, dx, dy);
                let far = self.goban.offset(point, 2 * dx, 2 * dy);
                let (Some(near), Some(far)) = (near, far) else {
                    return false;
                };
                if self.goban.stone_at(near) != opp || self.goban.stone_at(far) != opp {
                    return false;
                }
                [(dy, dx), (-dy, -dx)].into_iter().any(|(px, py)| {
                    self.goban
                        .offset(near, px, py)
                        .is_some_and(|p| self.goban.stone_at(p) == own)
                })
            })
    }

    fn eye_fill(&self, point: Point, captured: u32) -> f64 {
        if captured == 0 && is_own_eye(self.goban, point, self.stone) {
            -EYE_FILL
        } else {
            0.0
        }
    }
}

/// Simple eye of `stone`: every on-board orthogonal neighbor is `stone` and
/// fewer than two diagonals belong to the opponent.
pub fn is_own_eye(goban: &Goban, point: Point, stone: Stone) -> bool {
    if goban.stone_at(point).is_some() {
        return false;
    }
    let surrounded = goban
        .neighbors(point)
        .iter()
        .all(|&n| goban.stone_at(n) == Some(stone));
    let hostile_diagonals = goban
        .diagonals(point)
        .iter()
        .filter(|&&d| goban.stone_at(d) == Some(stone.opp()))
        .count();
    surrounded && hostile_diagonals < 2
}

/// Distinct groups of `stone` orthogonally adjacent to `point`.
fn neighbor_groups(goban: &Goban, point: Point, stone: Stone) -> Vec<GroupInfo> {
    let mut groups: Vec<GroupInfo> = Vec::new();
    for n in goban.neighbors(point) {
        if goban.stone_at(n) != Some(stone) {
            continue;
        }
        if groups.iter().any(|g| g.stones.contains(&n)) {
            continue;
        }
        groups.push(goban.group_info(n));
    }
    groups
}
