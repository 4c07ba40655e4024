use crate::card::Card;
use crate::rules;

use smallvec::SmallVec;
use std::fmt;

pub const TOTAL_FOUNDATIONS: usize = 4;
pub const TOTAL_TABLEAUS: usize = 7;
pub const TALON_SIZE: usize = 24;

pub type Cards = SmallVec<[Card; TALON_SIZE]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PileKind {
    Stock,
    Talon,
    Foundation,
    Tableau,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PileId {
    Stock,
    Talon,
    Foundation(usize),
    Tableau(usize),
}

impl PileId {
    pub fn kind(&self) -> PileKind {
        match self {
            PileId::Stock => PileKind::Stock,
            PileId::Talon => PileKind::Talon,
            PileId::Foundation(_) => PileKind::Foundation,
            PileId::Tableau(_) => PileKind::Tableau,
        }
    }

    pub fn foundations() -> impl Iterator<Item = PileId> {
        (0..TOTAL_FOUNDATIONS).map(PileId::Foundation)
    }

    pub fn tableaus() -> impl Iterator<Item = PileId> {
        (0..TOTAL_TABLEAUS).map(PileId::Tableau)
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileId::Stock => write!(f, "S"),
            PileId::Talon => write!(f, "W"),
            PileId::Foundation(idx) => write!(f, "F{}", idx + 1),
            PileId::Tableau(idx) => write!(f, "T{}", idx + 1),
        }
    }
}

/// An ordered stack of cards, bottom first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pile {
    kind: PileKind,
    cards: Cards,
}

impl Pile {
    pub fn new(kind: PileKind) -> Self {
        Self {
            kind,
            cards: SmallVec::new(),
        }
    }

    pub fn kind(&self) -> PileKind {
        self.kind
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn face_up_count(&self) -> usize {
        self.cards.iter().rev().take_while(|c| c.is_face_up()).count()
    }

    /// Whether `card` may be dropped onto this pile as it stands.
    /// A face-down top card takes nothing.
    pub fn can_accept(&self, card: &Card) -> bool {
        if self.peek_top().is_some_and(|top| !top.is_face_up()) {
            return false;
        }
        rules::can_accept(self.kind, card, self.peek_top())
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }

    /// Removes the top `count` cards, keeping their order.
    ///
    /// Callers check `count <= len()` first.
    pub fn take(&mut self, count: usize) -> Cards {
        let start = self.cards.len() - count;
        self.cards.drain(start..).collect()
    }

    pub fn take_all(&mut self) -> Cards {
        std::mem::take(&mut self.cards)
    }

    /// Turns the top card face up. Returns true if it was face down.
    pub fn flip_top_up(&mut self) -> bool {
        match self.cards.last_mut() {
            Some(card) if !card.is_face_up() => {
                card.set_face_up(true);
                true
            }
            _ => false,
        }
    }

    pub fn snapshot(&self) -> Cards {
        self.cards.clone()
    }

    pub fn restore(&mut self, cards: Cards) {
        self.cards = cards;
    }
}
