//! Placement rules for player drops.

use crate::card::Card;
use crate::pile::PileKind;

/// Whether `moving` may be dropped on a pile of `kind` whose top card is `top`.
///
/// Tableaus build down in alternating colors and take only a King when
/// empty. Foundations build up in suit from the Ace. The stock and talon
/// are filled by the draw cycle only and never accept a drop.
pub fn can_accept(kind: PileKind, moving: &Card, top: Option<&Card>) -> bool {
    match (kind, top) {
        (PileKind::Tableau, None) => moving.is_king(),
        (PileKind::Tableau, Some(top)) => {
            moving.is_opposite_color(top) && moving.is_ranked_directly_before(top)
        }
        (PileKind::Foundation, None) => moving.is_ace(),
        (PileKind::Foundation, Some(top)) => {
            moving.is_same_suit(top) && top.is_ranked_directly_before(moving)
        }
        (PileKind::Talon | PileKind::Stock, _) => false,
    }
}
