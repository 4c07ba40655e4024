use crate::card::{Card, MAX_CARD, Rank, full_deck};
use crate::error::BoardError;
use crate::pile::{Pile, PileId, PileKind, TOTAL_FOUNDATIONS, TOTAL_TABLEAUS};

use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub stock: Pile,
    pub talon: Pile,
    pub foundations: [Pile; TOTAL_FOUNDATIONS],
    pub tableaus: [Pile; TOTAL_TABLEAUS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board with no cards.
    pub fn new() -> Self {
        Self {
            stock: Pile::new(PileKind::Stock),
            talon: Pile::new(PileKind::Talon),
            foundations: std::array::from_fn(|_| Pile::new(PileKind::Foundation)),
            tableaus: std::array::from_fn(|_| Pile::new(PileKind::Tableau)),
        }
    }

    /// Shuffles a fresh deck and deals it: tableau `i` gets `i + 1` cards
    /// with only the top one face up, the rest goes face down to the stock.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = full_deck();
        deck.shuffle(rng);

        let mut board = Self::new();
        let mut cards = deck.into_iter();
        for (i, tableau) in board.tableaus.iter_mut().enumerate() {
            tableau.extend(cards.by_ref().take(i + 1));
            tableau.flip_top_up();
        }
        board.stock.extend(cards);
        board
    }

    pub fn pile(&self, id: PileId) -> Option<&Pile> {
        match id {
            PileId::Stock => Some(&self.stock),
            PileId::Talon => Some(&self.talon),
            PileId::Foundation(idx) => self.foundations.get(idx),
            PileId::Tableau(idx) => self.tableaus.get(idx),
        }
    }

    pub fn pile_mut(&mut self, id: PileId) -> Option<&mut Pile> {
        match id {
            PileId::Stock => Some(&mut self.stock),
            PileId::Talon => Some(&mut self.talon),
            PileId::Foundation(idx) => self.foundations.get_mut(idx),
            PileId::Tableau(idx) => self.tableaus.get_mut(idx),
        }
    }

    pub fn piles(&self) -> impl Iterator<Item = (PileId, &Pile)> {
        [(PileId::Stock, &self.stock), (PileId::Talon, &self.talon)]
            .into_iter()
            .chain(PileId::foundations().zip(self.foundations.iter()))
            .chain(PileId::tableaus().zip(self.tableaus.iter()))
    }

    pub fn foundation_count(&self) -> usize {
        self.foundations.iter().map(|f| f.len()).sum()
    }

    /// Checks that the board holds each of the 52 cards exactly once.
    pub fn verify(&self) -> Result<(), BoardError> {
        let mut seen = [false; MAX_CARD as usize];
        let mut count = 0;
        for (_, pile) in self.piles() {
            for card in pile.cards() {
                let id = card.id() as usize;
                if seen[id] {
                    return Err(BoardError::DuplicateCard(card.pretty_print()));
                }
                seen[id] = true;
                count += 1;
            }
        }
        if count != MAX_CARD as usize {
            return Err(BoardError::CardCount(count));
        }
        Ok(())
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut board = Self::new();

        for line in content
            .split('\n')
            .map(|v| v.trim())
            .filter(|l| !l.is_empty())
        {
            let line_context = || format!("Failed to parse at '{line}'");
            if let Some(rest) = line.strip_prefix("Stock:") {
                let cards = parse_cards(rest.trim()).with_context(line_context)?;
                board.stock.extend(cards);
            } else if let Some(rest) = line.strip_prefix("Talon:") {
                let cards = parse_cards(rest.trim()).with_context(line_context)?;
                board.talon.extend(cards.into_iter().map(face_up));
            } else if let Some(rest) = line.strip_prefix("Foundation") {
                let (idx, rest) = parse_index(rest, TOTAL_FOUNDATIONS)
                    .context("Invalid foundation index")
                    .with_context(line_context)?;
                let cards = parse_cards(rest).with_context(line_context)?;
                if let Some(top) = cards.last() {
                    for rank in Rank::ALL.into_iter().take_while(|&r| r <= top.rank()) {
                        board.foundations[idx].push(Card::new_face_up(rank, top.suit()));
                    }
                }
            } else if let Some(rest) = line.strip_prefix("Tableau") {
                let (idx, rest) = parse_index(rest, TOTAL_TABLEAUS)
                    .context("Invalid tableau index")
                    .with_context(line_context)?;
                let (before, after) = match rest.find('|') {
                    Some(split_idx) => (&rest[..split_idx], &rest[split_idx + 1..]),
                    None => (rest, ""),
                };
                let face_down_cards = parse_cards(before.trim()).with_context(line_context)?;
                let face_up_cards = parse_cards(after.trim()).with_context(line_context)?;
                board.tableaus[idx].extend(face_down_cards);
                board.tableaus[idx].extend(face_up_cards.into_iter().map(face_up));
            }
        }

        Ok(board)
    }

    pub fn pretty_print(&self) -> String {
        let mut output = String::new();

        if !self.stock.is_empty() {
            output.push_str("Stock: ");
            for card in self.stock.cards() {
                output.push_str(&card.pretty_print());
            }
            output.push('\n');
        }

        if !self.talon.is_empty() {
            output.push_str("Talon: ");
            for card in self.talon.cards() {
                output.push_str(&card.pretty_print());
            }
            output.push('\n');
        }

        for (i, foundation) in self.foundations.iter().enumerate() {
            if let Some(card) = foundation.peek_top() {
                output.push_str(&format!("Foundation{}: {}\n", i + 1, card.pretty_print()));
            }
        }

        for (i, tableau) in self.tableaus.iter().enumerate() {
            if tableau.is_empty() {
                continue;
            }
            output.push_str(&format!("Tableau{}: ", i + 1));
            let sep = tableau.len() - tableau.face_up_count();
            for (j, card) in tableau.cards().iter().enumerate() {
                if j == sep {
                    output.push('|');
                }
                output.push_str(&card.pretty_print());
            }
            output.push('\n');
        }

        output
    }
}

fn face_up(mut card: Card) -> Card {
    card.set_face_up(true);
    card
}

fn parse_index(s: &str, total: usize) -> Result<(usize, &str)> {
    let mut parts = s.splitn(2, ':');
    let idx = parts.next().unwrap_or("").trim().parse::<usize>()?;
    if idx == 0 || idx > total {
        anyhow::bail!("Index {idx} out of range 1..={total}");
    }
    Ok((idx - 1, parts.next().unwrap_or("").trim()))
}

fn parse_cards(s: &str) -> Result<Vec<Card>> {
    let mut cards = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(&c1) = chars.peek() {
        if c1.is_whitespace() || c1 == '|' {
            chars.next();
            continue;
        }
        let rank = c1;
        chars.next();
        let suit = match chars.next() {
            Some(s) => s,
            None => anyhow::bail!("Missing suit after '{rank}'"),
        };
        cards.push(Card::parse(rank, suit)?);
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BOARD_STR: &str = r#"Stock: 5♦2♥8♦K♣7♥J♣
Talon: 7♦Q♥K♥T♦6♣9♥K♦J♠T♣Q♣3♣2♦Q♦8♥6♥7♠8♠
Foundation1: 2♣
Foundation3: A♠
Tableau1: |5♣
Tableau2: J♥|6♠
Tableau3: T♠5♥|Q♠
Tableau4: 9♠T♥2♠|9♣
Tableau5: 7♣4♥3♠|A♦
Tableau6: 3♥3♦4♣5♠4♦|8♣
Tableau7: 6♦4♠A♥9♦K♠|J♦
"#;

    #[test]
    fn test_parse_board() {
        let board = Board::parse(BOARD_STR).unwrap();
        assert!(board.verify().is_ok());
        assert_eq!(BOARD_STR, board.pretty_print());
        assert_eq!(board.foundations[0].len(), 2);
        assert_eq!(board.tableaus[6].face_up_count(), 1);
        assert!(board.talon.cards().iter().all(|c| c.is_face_up()));
        assert!(board.stock.cards().iter().all(|c| !c.is_face_up()));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Board::parse("Tableau8: |5♣").is_err());
        assert!(Board::parse("Foundation0: A♣").is_err());
        assert!(Board::parse("Stock: 5").is_err());
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.foundation_count(), 0);
        assert_eq!(board.verify(), Err(BoardError::CardCount(0)));
    }

    #[test]
    fn test_verify_duplicate() {
        let mut board = Board::parse(BOARD_STR).unwrap();
        let dup = *board.tableaus[0].peek_top().unwrap();
        board.tableaus[1].push(dup);
        assert_eq!(
            board.verify(),
            Err(BoardError::DuplicateCard("5♣".to_string()))
        );
    }

    #[test]
    fn test_deal() {
        let mut rng = StdRng::seed_from_u64(670334786);
        let board = Board::deal(&mut rng);
        assert!(board.verify().is_ok());
        assert_eq!(board.stock.len(), 24);
        assert!(board.talon.is_empty());
        for (i, tableau) in board.tableaus.iter().enumerate() {
            assert_eq!(tableau.len(), i + 1);
            assert_eq!(tableau.face_up_count(), 1);
        }
        assert!(board.stock.cards().iter().all(|c| !c.is_face_up()));
    }

    #[test]
    fn test_pile_lookup() {
        let board = Board::new();
        assert!(board.pile(PileId::Tableau(6)).is_some());
        assert!(board.pile(PileId::Tableau(7)).is_none());
        assert!(board.pile(PileId::Foundation(4)).is_none());
        assert_eq!(board.piles().count(), 13);
    }
}
