use anyhow::{Context, Result};
use std::fmt;

pub const MAX_RANK: u8 = 13;
pub const MAX_SUIT: u8 = 4;
pub const MAX_CARD: u8 = MAX_SUIT * MAX_RANK;

const SUITS: [char; 4] = ['♣', '♦', '♠', '♥'];
const RANKS: [char; 13] = [
    'A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs,
    Diamonds,
    Spades,
    Hearts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Spades, Suit::Hearts];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    pub fn symbol(self) -> char {
        SUITS[self as usize]
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        SUITS
            .iter()
            .position(|&s| s == symbol)
            .map(|idx| Suit::ALL[idx])
    }
}

/// Card rank, ordered Ace (ordinal 0) through King (ordinal 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Rank::ALL.get(ordinal as usize).copied()
    }

    pub fn symbol(self) -> char {
        RANKS[self as usize]
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        RANKS
            .iter()
            .position(|&r| r == symbol)
            .map(|idx| Rank::ALL[idx])
    }
}

/// A playing card. Suit and rank are fixed at construction, only the
/// face-up state changes while the card travels between piles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    suit: Suit,
    rank: Rank,
    face_up: bool,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    pub fn new_face_up(rank: Rank, suit: Suit) -> Self {
        Self {
            suit,
            rank,
            face_up: true,
        }
    }

    /// Builds the card with the given id (`suit * 13 + rank`).
    pub fn new_with_id(id: u8) -> Option<Self> {
        if id >= MAX_CARD {
            return None;
        }
        let rank = Rank::from_ordinal(id % MAX_RANK)?;
        let suit = Suit::ALL[(id / MAX_RANK) as usize];
        Some(Self::new(rank, suit))
    }

    pub fn parse(rank: char, suit: char) -> Result<Self> {
        let rank = Rank::from_symbol(rank)
            .with_context(|| format!("Invalid rank at card {rank}{suit}"))?;
        let suit = Suit::from_symbol(suit)
            .with_context(|| format!("Invalid suit at card {}{suit}", rank.symbol()))?;
        Ok(Card::new(rank, suit))
    }

    pub fn id(&self) -> u8 {
        self.suit.index() * MAX_RANK + self.rank.ordinal()
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn color(&self) -> Color {
        self.suit.color()
    }

    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    pub fn is_same_suit(&self, other: &Card) -> bool {
        self.suit == other.suit
    }

    pub fn is_opposite_color(&self, other: &Card) -> bool {
        self.color() != other.color()
    }

    /// True when `self` sits one rank directly below `other`.
    pub fn is_ranked_directly_before(&self, other: &Card) -> bool {
        self.rank.ordinal() + 1 == other.rank.ordinal()
    }

    pub fn pretty_print(&self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

/// All 52 cards, face down, ordered by id.
pub fn full_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}
