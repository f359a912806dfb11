use crate::prompt::Prompt;
use std::io::{self, BufRead, Write};

/// Difficulty labels as they appear on the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Custom,
}

/// Range and attempt budget for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSettings {
    pub difficulty: Difficulty,
    pub low: i64,
    pub high: i64,
    pub max_attempts: u32,
}

impl Difficulty {
    /// Fixed (low, high, max_attempts) table for the preset difficulties.
    /// Custom has no preset; its values come from the player.
    pub fn preset(self) -> Option<RoundSettings> {
        let (low, high, max_attempts) = match self {
            Difficulty::Easy => (1, 10, 6),
            Difficulty::Medium => (1, 50, 7),
            Difficulty::Hard => (1, 100, 8),
            Difficulty::Custom => return None,
        };
        Some(RoundSettings {
            difficulty: self,
            low,
            high,
            max_attempts,
        })
    }
}

/// Present the difficulty menu and return the chosen settings.
///
/// An unrecognized choice reprompts the menu itself. In custom mode a high
/// bound that is not strictly greater than the low bound rejects the whole
/// pair and falls back to the menu prompt.
pub fn choose_difficulty<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
) -> io::Result<RoundSettings> {
    prompt.say("Choose difficulty:")?;
    prompt.say("  1) Easy   (range 1-10, attempts 6)")?;
    prompt.say("  2) Medium (range 1-50, attempts 7)")?;
    prompt.say("  3) Hard   (range 1-100, attempts 8)")?;
    prompt.say("  4) Custom (you choose range and attempts)")?;
    loop {
        let choice = prompt.ask_line("Enter 1/2/3/4: ")?;
        let preset = match choice.as_str() {
            "1" => Difficulty::Easy.preset(),
            "2" => Difficulty::Medium.preset(),
            "3" => Difficulty::Hard.preset(),
            "4" => {
                let low = prompt.ask_int("Enter lower bound (integer): ", None, None)?;
                let high = prompt.ask_int("Enter upper bound (integer, > lower): ", None, None)?;
                if high <= low {
                    prompt.say("Upper bound must be greater than lower bound.")?;
                    continue;
                }
                // upper bound keeps the u32 cast lossless
                let max_attempts = prompt.ask_int(
                    "Enter max attempts (>=1): ",
                    Some(1),
                    Some(u32::MAX as i64),
                )? as u32;
                return Ok(RoundSettings {
                    difficulty: Difficulty::Custom,
                    low,
                    high,
                    max_attempts,
                });
            }
            _ => {
                prompt.say("Invalid choice, try again.")?;
                continue;
            }
        };
        if let Some(settings) = preset {
            return Ok(settings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn preset_table_matches_labels() {
        let easy = Difficulty::Easy.preset().unwrap();
        assert_eq!((easy.low, easy.high, easy.max_attempts), (1, 10, 6));
        let medium = Difficulty::Medium.preset().unwrap();
        assert_eq!((medium.low, medium.high, medium.max_attempts), (1, 50, 7));
        let hard = Difficulty::Hard.preset().unwrap();
        assert_eq!((hard.low, hard.high, hard.max_attempts), (1, 100, 8));
        assert!(Difficulty::Custom.preset().is_none());
    }

    #[test]
    fn display_matches_leaderboard_labels() {
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
        assert_eq!(Difficulty::Custom.to_string(), "Custom");
    }

    #[test]
    fn menu_choices_return_presets() {
        for (choice, expected) in [
            ("1\n", Difficulty::Easy),
            ("2\n", Difficulty::Medium),
            ("3\n", Difficulty::Hard),
        ] {
            let mut p = scripted(choice);
            let settings = choose_difficulty(&mut p).unwrap();
            assert_eq!(settings.difficulty, expected);
            assert_eq!(settings, expected.preset().unwrap());
        }
    }

    #[test]
    fn invalid_menu_choice_reprompts_menu() {
        let mut p = scripted("x\n9\n2\n");
        let settings = choose_difficulty(&mut p).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        let out = String::from_utf8(p.into_writer()).unwrap();
        assert_eq!(out.matches("Invalid choice, try again.").count(), 2);
    }

    #[test]
    fn custom_collects_range_and_attempts() {
        let mut p = scripted("4\n-5\n30\n9\n");
        let settings = choose_difficulty(&mut p).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Custom);
        assert_eq!((settings.low, settings.high, settings.max_attempts), (-5, 30, 9));
    }

    #[test]
    fn custom_rejects_high_not_above_low() {
        // 10..=10 and 10..=3 both rejected; the whole pair is re-entered
        let mut p = scripted("4\n10\n10\n4\n10\n3\n4\n1\n2\n5\n");
        let settings = choose_difficulty(&mut p).unwrap();
        assert_eq!((settings.low, settings.high, settings.max_attempts), (1, 2, 5));
        let out = String::from_utf8(p.into_writer()).unwrap();
        assert_eq!(
            out.matches("Upper bound must be greater than lower bound.")
                .count(),
            2
        );
    }

    #[test]
    fn custom_rejects_attempts_below_one() {
        let mut p = scripted("4\n1\n100\n0\n-2\n3\n");
        let settings = choose_difficulty(&mut p).unwrap();
        assert_eq!(settings.max_attempts, 3);
    }

    #[test]
    fn custom_rejects_attempts_beyond_u32() {
        // 4294967296 fits in i64 but not u32; it must re-prompt, never wrap
        let mut p = scripted("4\n1\n10\n4294967296\n7\n");
        let settings = choose_difficulty(&mut p).unwrap();
        assert_eq!(settings.max_attempts, 7);
        let out = String::from_utf8(p.into_writer()).unwrap();
        assert!(out.contains("Enter an integer between 1 and 4294967295."));
    }
}
