//! Play command - interactive game on the terminal
//!
//! Line-based: type a piece glyph to select it, then the number of a
//! destination. Typing the glyph again deselects, `q` quits.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use jungle_core::{render_with_hints, GameState, Piece, Player, Pos};

use crate::load_game;

#[derive(Args)]
pub struct PlayArgs {
    /// Setup JSON file (defaults to the standard opening)
    #[arg(long, value_name = "FILE")]
    pub setup: Option<PathBuf>,
}

/// How a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Won(Player),
    Surrendered(Player),
    InputClosed,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let mut game = load_game(args.setup.as_deref())?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let end = run_session(&mut game, &mut input, &mut output)?;
    tracing::info!("Session ended: {:?}", end);

    match end {
        SessionEnd::Won(winner) => {
            writeln!(output, "{}\nThe {} player has won!", game, winner)?;
        }
        SessionEnd::Surrendered(loser) => writeln!(output, "{} player surrenders.", loser)?,
        SessionEnd::InputClosed => {}
    }
    Ok(())
}

/// Run the turn loop until someone wins, quits, or input runs out
pub fn run_session<R: BufRead, W: Write>(
    game: &mut GameState,
    input: &mut R,
    output: &mut W,
) -> Result<SessionEnd> {
    loop {
        if let Some(winner) = game.winner() {
            return Ok(SessionEnd::Won(winner));
        }

        writeln!(output, "{}", game)?;
        let mut glyphs: Vec<char> = game.active_pieces().iter().map(|p| p.glyph()).collect();
        glyphs.sort_unstable();
        writeln!(
            output,
            "{} player's turn. {} to select animal, q to quit.",
            game.current_player(),
            join(&glyphs)
        )?;

        let piece = loop {
            let Some(token) = next_token(input)? else {
                return Ok(SessionEnd::InputClosed);
            };
            if token == "q" {
                return Ok(SessionEnd::Surrendered(game.current_player()));
            }
            let selected = single_char(&token)
                .filter(|c| glyphs.contains(c))
                .and_then(|c| game.piece_by_glyph(c).copied());
            if let Some(piece) = selected {
                break piece;
            }
        };

        match select_destination(game, &piece, input, output)? {
            Selection::Destination(to) => {
                game.apply_move(piece.pos, to)?;
                writeln!(output)?;
            }
            Selection::Deselect => {}
            Selection::InputClosed => return Ok(SessionEnd::InputClosed),
        }
    }
}

enum Selection {
    Destination(Pos),
    Deselect,
    InputClosed,
}

/// Show numbered destinations and read the choice
fn select_destination<R: BufRead, W: Write>(
    game: &GameState,
    piece: &Piece,
    input: &mut R,
    output: &mut W,
) -> Result<Selection> {
    let hints: Vec<(char, Pos)> = piece
        .legal_destinations(game)
        .into_iter()
        .zip('1'..='9')
        .map(|(pos, key)| (key, pos))
        .collect();
    let keys: Vec<char> = hints.iter().map(|&(key, _)| key).collect();

    writeln!(output, "{}", render_with_hints(game, &hints))?;
    writeln!(
        output,
        "{} to select destination, {} to deselect animal.",
        join(&keys),
        piece.glyph()
    )?;

    loop {
        let Some(token) = next_token(input)? else {
            return Ok(Selection::InputClosed);
        };
        let Some(c) = single_char(&token) else {
            continue;
        };
        if c == piece.glyph() {
            return Ok(Selection::Deselect);
        }
        if let Some(&(_, pos)) = hints.iter().find(|&&(key, _)| key == c) {
            return Ok(Selection::Destination(pos));
        }
    }
}

/// Next non-empty trimmed line, `None` at end of input
fn next_token<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let token = line.trim();
        if !token.is_empty() {
            return Ok(Some(token.to_string()));
        }
    }
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn join(chars: &[char]) -> String {
    chars.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
}
