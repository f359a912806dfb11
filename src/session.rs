use crate::difficulty::{Difficulty, RoundSettings};
use crate::prompt::Prompt;
use crate::scores::ScoreStore;
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::time::Instant;

/// Uniform draw from `[low, high]` inclusive. Pluggable so tests can fix the
/// secret.
pub trait SecretSource {
    fn pick(&mut self, low: i64, high: i64) -> i64;
}

/// Production source backed by the thread-local rng.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSecret;

impl SecretSource for RandomSecret {
    fn pick(&mut self, low: i64, high: i64) -> i64 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Hint annotation derived from distance relative to range width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closeness {
    VeryClose,
    Close,
    Far,
}

impl Closeness {
    /// Threshold arithmetic kept exactly as shipped: integer division of the
    /// width, floored at 1. For narrow ranges every miss can classify as
    /// close or very close. Distance and width are u64 so extreme custom
    /// bounds cannot overflow.
    pub fn classify(distance: u64, width: u64) -> Self {
        if distance <= (width / 20).max(1) {
            Closeness::VeryClose
        } else if distance <= (width / 5).max(1) {
            Closeness::Close
        } else {
            Closeness::Far
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Closeness::VeryClose => " (very close!)",
            Closeness::Close => " (close)",
            Closeness::Far => "",
        }
    }
}

/// Outcome of a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    Correct,
    Miss {
        hint: &'static str,
        closeness: Closeness,
    },
}

/// One round in progress: secret, bounds, attempt budget, elapsed clock.
/// Transient; survives only as a ScoreRecord on a win.
#[derive(Debug)]
pub struct GuessSession {
    settings: RoundSettings,
    secret: i64,
    attempts: u32,
    started_at: Instant,
}

impl GuessSession {
    pub fn new(settings: RoundSettings, secrets: &mut dyn SecretSource) -> Self {
        let secret = secrets.pick(settings.low, settings.high);
        Self {
            settings,
            secret,
            attempts: 0,
            started_at: Instant::now(),
        }
    }

    /// Consume one attempt and judge the guess.
    pub fn guess(&mut self, n: i64) -> Guess {
        self.attempts += 1;
        if n == self.secret {
            return Guess::Correct;
        }
        let hint = if n < self.secret { "higher" } else { "lower" };
        let width = self.settings.low.abs_diff(self.settings.high);
        Guess::Miss {
            hint,
            closeness: Closeness::classify(self.secret.abs_diff(n), width),
        }
    }

    pub fn out_of_attempts(&self) -> bool {
        self.attempts >= self.settings.max_attempts
    }

    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn secret(&self) -> i64 {
        self.secret
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

/// Summary of a finished round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub won: bool,
    pub attempts: u32,
    pub time_taken: f64,
    pub difficulty: Difficulty,
}

/// Run one full round: guess loop, hints, outcome report, and on a win one
/// leaderboard save. A `name` of `Some` skips the interactive name prompt;
/// an empty entered name falls back to "Anon".
pub fn play_round<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    settings: RoundSettings,
    secrets: &mut dyn SecretSource,
    scores: &dyn ScoreStore,
    name: Option<&str>,
) -> io::Result<RoundResult> {
    let mut session = GuessSession::new(settings, secrets);
    let (low, high, max_attempts) = {
        let s = session.settings();
        (s.low, s.high, s.max_attempts)
    };
    prompt.say_blank()?;
    prompt.say(&format!(
        "I've picked a number between {} and {}. You have {} attempts. Good luck!",
        low, high, max_attempts
    ))?;
    prompt.say_blank()?;

    let mut won = false;
    while !session.out_of_attempts() {
        let guess = prompt.ask_int(
            &format!(
                "[Attempt {}/{}] Your guess: ",
                session.attempts() + 1,
                max_attempts
            ),
            Some(low),
            Some(high),
        )?;
        match session.guess(guess) {
            Guess::Correct => {
                won = true;
                break;
            }
            Guess::Miss { hint, closeness } => {
                prompt.say(&format!("Nope - try {}.{}", hint, closeness.suffix()))?;
                prompt.say_blank()?;
            }
        }
    }

    let time_taken = session.elapsed_secs();
    let difficulty = session.settings().difficulty;
    if won {
        prompt.say_blank()?;
        prompt.say(&format!("Correct! The number was {}.", session.secret()))?;
        prompt.say(&format!(
            "Attempts: {}, Time: {:.2}s, Difficulty: {}",
            session.attempts(),
            time_taken,
            difficulty
        ))?;
        let player = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => {
                let entered = prompt.ask_line(
                    "Enter your name for the leaderboard (or press Enter to stay anonymous): ",
                )?;
                if entered.is_empty() {
                    "Anon".to_string()
                } else {
                    entered
                }
            }
        };
        // fail-open like load: a broken score file never spoils a won round
        if scores
            .save(
                &player,
                session.attempts(),
                time_taken,
                &difficulty.to_string(),
            )
            .is_err()
        {
            prompt.say("Could not update the leaderboard.")?;
        }
    } else {
        prompt.say_blank()?;
        prompt.say(&format!(
            "Out of attempts! The number was {}. Better luck next time.",
            session.secret()
        ))?;
    }
    prompt.say_blank()?;

    Ok(RoundResult {
        won,
        attempts: session.attempts(),
        time_taken,
        difficulty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSecret(i64);

    impl SecretSource for FixedSecret {
        fn pick(&mut self, low: i64, high: i64) -> i64 {
            assert!((low..=high).contains(&self.0));
            self.0
        }
    }

    fn settings(low: i64, high: i64, max_attempts: u32) -> RoundSettings {
        RoundSettings {
            difficulty: Difficulty::Custom,
            low,
            high,
            max_attempts,
        }
    }

    #[test]
    fn random_secret_stays_in_range() {
        let mut src = RandomSecret;
        for _ in 0..200 {
            let n = src.pick(3, 9);
            assert!((3..=9).contains(&n));
        }
        // degenerate single-value range
        assert_eq!(src.pick(5, 5), 5);
    }

    #[test]
    fn closeness_thresholds_for_wide_range() {
        // width 100: very close <= 5, close <= 20
        assert_eq!(Closeness::classify(1, 100), Closeness::VeryClose);
        assert_eq!(Closeness::classify(5, 100), Closeness::VeryClose);
        assert_eq!(Closeness::classify(6, 100), Closeness::Close);
        assert_eq!(Closeness::classify(20, 100), Closeness::Close);
        assert_eq!(Closeness::classify(21, 100), Closeness::Far);
    }

    #[test]
    fn closeness_floors_thresholds_at_one() {
        // width 3: both thresholds floor to 1, so distance 2 has no qualifier
        assert_eq!(Closeness::classify(1, 3), Closeness::VeryClose);
        assert_eq!(Closeness::classify(2, 3), Closeness::Far);
    }

    #[test]
    fn extreme_custom_bounds_do_not_overflow() {
        // full i64 range: width and distance only fit in u64
        let mut src = FixedSecret(0);
        let mut session = GuessSession::new(settings(i64::MIN, i64::MAX, 3), &mut src);
        match session.guess(i64::MIN + 1) {
            Guess::Miss { hint, closeness } => {
                assert_eq!(hint, "higher");
                assert_eq!(closeness, Closeness::Far);
            }
            other => panic!("expected miss, got {:?}", other),
        }
        match session.guess(i64::MAX) {
            Guess::Miss { hint, .. } => assert_eq!(hint, "lower"),
            other => panic!("expected miss, got {:?}", other),
        }
    }

    #[test]
    fn guess_reports_direction() {
        let mut src = FixedSecret(7);
        let mut session = GuessSession::new(settings(1, 10, 3), &mut src);
        match session.guess(2) {
            Guess::Miss { hint, .. } => assert_eq!(hint, "higher"),
            other => panic!("expected miss, got {:?}", other),
        }
        match session.guess(9) {
            Guess::Miss { hint, .. } => assert_eq!(hint, "lower"),
            other => panic!("expected miss, got {:?}", other),
        }
    }

    #[test]
    fn correct_guess_wins_and_counts_attempt() {
        let mut src = FixedSecret(4);
        let mut session = GuessSession::new(settings(1, 10, 3), &mut src);
        assert_eq!(session.guess(4), Guess::Correct);
        assert_eq!(session.attempts(), 1);
        assert!(!session.out_of_attempts());
    }

    #[test]
    fn budget_exhausts_after_max_attempts() {
        let mut src = FixedSecret(10);
        let mut session = GuessSession::new(settings(1, 10, 2), &mut src);
        session.guess(1);
        assert!(!session.out_of_attempts());
        session.guess(2);
        assert!(session.out_of_attempts());
    }
}
