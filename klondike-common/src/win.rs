use crate::card::{MAX_RANK, Rank};
use crate::pile::{Pile, TOTAL_FOUNDATIONS};

/// True when every foundation holds Ace through King of a single suit.
pub fn scan_for_win(foundations: &[Pile; TOTAL_FOUNDATIONS]) -> bool {
    foundations.iter().all(is_complete)
}

fn is_complete(foundation: &Pile) -> bool {
    let cards = foundation.cards();
    let Some(first) = cards.first() else {
        return false;
    };
    cards.len() == MAX_RANK as usize
        && cards
            .iter()
            .zip(Rank::ALL)
            .all(|(card, rank)| card.rank() == rank && card.is_same_suit(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Suit};
    use crate::pile::PileKind;

    fn completed() -> [Pile; TOTAL_FOUNDATIONS] {
        std::array::from_fn(|i| {
            let mut pile = Pile::new(PileKind::Foundation);
            pile.extend(Rank::ALL.map(|rank| Card::new_face_up(rank, Suit::ALL[i])));
            pile
        })
    }

    #[test]
    fn test_complete_foundations_win() {
        assert!(scan_for_win(&completed()));
    }

    #[test]
    fn test_short_foundation() {
        let mut foundations = completed();
        foundations[2].take(1);
        assert!(!scan_for_win(&foundations));
        assert!(!scan_for_win(&std::array::from_fn(|_| Pile::new(PileKind::Foundation))));
    }

    #[test]
    fn test_gap_or_mixed_suit() {
        let mut foundations = completed();
        // Thirteen cards but the Five is missing and a Six repeats.
        let mut cards = foundations[0].take_all();
        cards[4] = Card::new_face_up(Rank::Six, Suit::Clubs);
        foundations[0].extend(cards);
        assert!(!scan_for_win(&foundations));

        let mut foundations = completed();
        let mut cards = foundations[1].take_all();
        cards[12] = Card::new_face_up(Rank::King, Suit::Hearts);
        foundations[1].extend(cards);
        assert!(!scan_for_win(&foundations));
    }
}
