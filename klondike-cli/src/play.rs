use anyhow::Result;
use klondike_common::{
    Game, TalonCardState,
    action::{Action, format_actions, parse_actions},
    pile::PileId,
};

use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  D, 3D        draw from the stock, recycling the talon once it runs out
  R            turn the talon back into an empty stock
  W:F1 T3:T5@2 move cards, @N moves a run of N tableau cards
  U            undo the last move
  H            suggest a move
  A            play every remaining card to the foundations
  N            new game
  Q            quit";

/// Runs the command loop until `Q` or end of input.
pub fn play<R: BufRead, W: Write>(game: &mut Game, input: R, mut output: W) -> Result<()> {
    writeln!(output, "{HELP}\n")?;
    print_state(game, &mut output)?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim().to_ascii_uppercase();
        match command.as_str() {
            "" => continue,
            "Q" | "QUIT" => break,
            "N" => game.new_game(),
            "H" => match find_hint(game) {
                Some(action) => write!(output, "Hint: {}", format_actions(&[action]))?,
                None => writeln!(output, "No moves left")?,
            },
            "A" => {
                if !game.can_autofinish() {
                    writeln!(output, "Cannot autofinish yet")?;
                }
                while game.can_autofinish() && game.autofinish_step().is_some() {}
            }
            _ => match parse_actions(&command) {
                Ok(actions) => {
                    for action in actions {
                        apply(game, action, &mut output)?;
                    }
                }
                Err(err) => writeln!(output, "{err:#}")?,
            },
        }
        print_state(game, &mut output)?;
    }

    Ok(())
}

fn apply<W: Write>(game: &mut Game, action: Action, output: &mut W) -> Result<()> {
    match action {
        Action::Redeal => {
            if !game.board().stock.is_empty() {
                writeln!(output, "The stock still has cards to draw")?;
            } else if !game.redeal() {
                writeln!(output, "Nothing left to recycle")?;
            }
        }
        Action::Draw => match game.draw() {
            TalonCardState::Normal => {}
            TalonCardState::DeckPlayed => writeln!(output, "Talon turned over")?,
            TalonCardState::Empty => writeln!(output, "Nothing left to draw")?,
        },
        Action::Undo => {
            if game.undo().is_none() {
                writeln!(output, "Nothing to undo")?;
            }
        }
        Action::Move { .. } => {
            if !game.apply(action) {
                writeln!(output, "Illegal move: {}", format_actions(&[action]).trim_end())?;
            }
        }
    }
    Ok(())
}

fn print_state<W: Write>(game: &Game, output: &mut W) -> Result<()> {
    writeln!(output, "{}", game.pretty_print())?;
    writeln!(
        output,
        "Score: {} | Moves: {} | Passes: {}",
        game.score(),
        game.moves(),
        game.passes()
    )?;
    if game.is_won() {
        writeln!(output, "Congratulations, you won the game!")?;
    } else if game.can_autofinish() {
        writeln!(output, "All cards are face up, type A to autofinish.")?;
    }
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}

/// Picks a useful legal move, preferring foundation plays.
pub fn find_hint(game: &Game) -> Option<Action> {
    let sources = || std::iter::once(PileId::Talon).chain(PileId::tableaus());
    for from in sources() {
        if let Some(to) = game.find_move_to_foundation(from) {
            return Some(Action::single(from, to));
        }
    }
    if let Some(to) = game.find_move_to_tableau(PileId::Talon, 1) {
        return Some(Action::single(PileId::Talon, to));
    }
    for from in PileId::tableaus() {
        let Some(pile) = game.board().pile(from) else {
            continue;
        };
        for count in (1..=pile.face_up_count()).rev() {
            if let Some(to) = game.find_move_to_tableau(from, count) {
                // Shifting a whole pile onto an empty tableau gains nothing.
                let target_empty = game.board().pile(to).is_some_and(|p| p.is_empty());
                if count == pile.len() && target_empty {
                    continue;
                }
                return Some(Action::Move { from, to, count });
            }
        }
    }
    let board = game.board();
    if !board.stock.is_empty() || !board.talon.is_empty() {
        return Some(Action::Draw);
    }
    None
}
