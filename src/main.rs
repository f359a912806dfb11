use clap::Parser;
use hilow::difficulty::choose_difficulty;
use hilow::prompt::Prompt;
use hilow::scores::{FileScoreStore, ScoreStore};
use hilow::session::{play_round, RandomSecret, SecretSource};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// terminal number-guessing game with closeness hints and a persisted leaderboard
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the secret number in a limited number of attempts. Hints tell you \
higher/lower and how close you are; winning rounds land on a persisted leaderboard."
)]
struct Cli {
    /// path of the leaderboard file (defaults to scores.json next to the program)
    #[clap(long)]
    scores_file: Option<PathBuf>,

    /// player name for the leaderboard, skipping the interactive prompt
    #[clap(long)]
    name: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let scores = match &cli.scores_file {
        Some(path) => FileScoreStore::with_path(path),
        None => FileScoreStore::new(),
    };
    let mut secrets = RandomSecret;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompt = Prompt::new(stdin.lock(), stdout.lock());

    run(&mut prompt, &scores, &mut secrets, cli.name)?;
    Ok(())
}

/// Top-level menu loop. End of input quits as cleanly as the Exit choice.
fn run<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    scores: &dyn ScoreStore,
    secrets: &mut dyn SecretSource,
    name: Option<String>,
) -> io::Result<()> {
    prompt.say("=== Number Guessing Game ===")?;
    let player = match name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => match prompt.ask_line("What's your name? (press Enter for 'Player'): ") {
            Ok(entered) if !entered.is_empty() => entered,
            Ok(_) => "Player".to_string(),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(e) => return Err(e),
        },
    };

    loop {
        prompt.say_blank()?;
        prompt.say("Menu:")?;
        prompt.say("  1) Play")?;
        prompt.say("  2) Leaderboard")?;
        prompt.say("  3) About / Help")?;
        prompt.say("  4) Exit")?;
        let choice = match prompt.ask_line("Choose 1/2/3/4: ") {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        };

        match choice.as_str() {
            "1" => match play_menu_round(prompt, scores, secrets, &player) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            },
            "2" => scores.show(prompt.writer_mut())?,
            "3" => {
                prompt.say_blank()?;
                prompt.say("About:")?;
                prompt.say(
                    "  Guess the secret number in limited attempts. Hints will tell you higher/lower.",
                )?;
                prompt.say(
                    "  Leaderboard stores best scores in 'scores.json' in the same folder.",
                )?;
                prompt.say(
                    "  Tip: choosing a smaller range makes it easier; custom mode lets you practice.",
                )?;
            }
            "4" => {
                prompt.say("Goodbye - thanks for playing!")?;
                break;
            }
            _ => prompt.say("Invalid choice, try again.")?,
        }
    }
    Ok(())
}

fn play_menu_round<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    scores: &dyn ScoreStore,
    secrets: &mut dyn SecretSource,
    player: &str,
) -> io::Result<()> {
    let settings = choose_difficulty(prompt)?;
    play_round(prompt, settings, secrets, scores, Some(player))?;
    Ok(())
}
