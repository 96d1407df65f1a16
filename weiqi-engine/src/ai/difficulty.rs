use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// AI strength, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Novice,
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

/// Tuning knobs derived from a [`Difficulty`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    /// Upper bound of the uniform noise added to every candidate; `0.0` disables it.
    pub noise: f64,
    /// Size of the shortlist sampled from; `None` samples the whole pool.
    pub top_n: Option<usize>,
    /// Multiplier of the self-atari penalty.
    pub self_atari_scale: f64,
    pub two_liberty_caution: bool,
    pub shape: bool,
    pub pass_threshold: f64,
    pub endgame_pass_threshold: f64,
    pub think_time: Duration,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Novice,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn profile(self) -> Profile {
        match self {
            Difficulty::Novice => Profile {
                noise: 40.0,
                top_n: None,
                self_atari_scale: 0.2,
                two_liberty_caution: false,
                shape: false,
                pass_threshold: -100.0,
                endgame_pass_threshold: -10.0,
                think_time: Duration::from_millis(300),
            },
            Difficulty::Easy => Profile {
                noise: 20.0,
                top_n: Some(8),
                self_atari_scale: 0.5,
                two_liberty_caution: false,
                shape: false,
                pass_threshold: -80.0,
                endgame_pass_threshold: -5.0,
                think_time: Duration::from_millis(500),
            },
            Difficulty::Medium => Profile {
                noise: 10.0,
                top_n: Some(4),
                self_atari_scale: 0.8,
                two_liberty_caution: false,
                shape: false,
                pass_threshold: -60.0,
                endgame_pass_threshold: 0.0,
                think_time: Duration::from_millis(700),
            },
            Difficulty::Hard => Profile {
                noise: 4.0,
                top_n: Some(2),
                self_atari_scale: 1.0,
                two_liberty_caution: true,
                shape: true,
                pass_threshold: -50.0,
                endgame_pass_threshold: 2.0,
                think_time: Duration::from_millis(900),
            },
            Difficulty::Expert => Profile {
                noise: 0.0,
                top_n: Some(1),
                self_atari_scale: 1.0,
                two_liberty_caution: true,
                shape: true,
                pass_threshold: -40.0,
                endgame_pass_threshold: 5.0,
                think_time: Duration::from_millis(1100),
            },
        }
    }

    /// Cosmetic pause before a move is shown, scaled by `scale` (`0.0` for none).
    /// Scales that are negative, not a number or infinite give no pause. A
    /// product too large for a `Duration` is capped at `Duration::MAX`.
    pub fn think_delay(self, scale: f64) -> Duration {
        if !scale.is_finite() || scale <= 0.0 {
            return Duration::ZERO;
        }
        let secs = self.profile().think_time.as_secs_f64() * scale;
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Novice => write!(f, "novice"),
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Expert => write!(f, "expert"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "novice" | "1" => Ok(Difficulty::Novice),
            "easy" | "2" => Ok(Difficulty::Easy),
            "medium" | "3" => Ok(Difficulty::Medium),
            "hard" | "4" => Ok(Difficulty::Hard),
            "expert" | "5" => Ok(Difficulty::Expert),
            _ => Err(format!("unknown difficulty: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stronger_levels_are_less_noisy_and_narrower() {
        for pair in Difficulty::ALL.windows(2) {
            let (weak, strong) = (pair[0].profile(), pair[1].profile());
            assert!(strong.noise < weak.noise);
            let width = |p: &Profile| p.top_n.unwrap_or(usize::MAX);
            assert!(width(&strong) < width(&weak));
            assert!(strong.self_atari_scale >= weak.self_atari_scale);
        }
    }

    #[test]
    fn expert_is_deterministic() {
        let p = Difficulty::Expert.profile();
        assert_eq!(p.noise, 0.0);
        assert_eq!(p.top_n, Some(1));
    }

    #[test]
    fn novice_samples_everything() {
        assert_eq!(Difficulty::Novice.profile().top_n, None);
    }

    #[test]
    fn endgame_passes_more_readily() {
        for d in Difficulty::ALL {
            let p = d.profile();
            assert!(p.endgame_pass_threshold > p.pass_threshold, "{d}");
        }
    }

    #[test]
    fn think_delay_scales() {
        assert_eq!(Difficulty::Hard.think_delay(0.0), Duration::ZERO);
        assert!(Difficulty::Novice.think_delay(2.0) > Difficulty::Novice.think_delay(1.0));
        assert!(Difficulty::Expert.think_delay(1.0) > Difficulty::Novice.think_delay(1.0));
        assert_eq!(Difficulty::Easy.think_delay(-1.0), Duration::ZERO);
    }

    #[test]
    fn think_delay_survives_extreme_scales() {
        assert_eq!(Difficulty::Medium.think_delay(f64::INFINITY), Duration::ZERO);
        assert_eq!(Difficulty::Medium.think_delay(f64::NEG_INFINITY), Duration::ZERO);
        assert_eq!(Difficulty::Medium.think_delay(f64::NAN), Duration::ZERO);
        assert_eq!(Difficulty::Expert.think_delay(1e300), Duration::MAX);
    }

    #[test]
    fn parses_names_and_levels() {
        assert_eq!("Expert".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert_eq!("2".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("grandmaster".parse::<Difficulty>().is_err());
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
    }
}
