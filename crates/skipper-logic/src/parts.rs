//! Boat part catalogue: texture keys, friendly names, snapped layering.
//!
//! Every piece a level can hand the player is one of these kinds. The key is
//! the stable identifier shared with the renderer's texture atlas.

use serde::{Deserialize, Serialize};

/// The kind of a draggable boat piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    Hull,
    HullCat,
    HullLarge,
    Mast,
    Sail,
    SailSmall,
    Cabin,
    Console,
    Outboard,
    Seat,
    TTop,
    Cooler,
    Bridge,
    Smokestack,
    Deck,
    DeckLarge,
    Bumper,
    Flag,
    Antenna,
    Cargo,
    Crane,
    ShipBridge,
    Funnel,
    Lifeboat,
}

impl PartKind {
    pub const ALL: [PartKind; 24] = [
        PartKind::Hull,
        PartKind::HullCat,
        PartKind::HullLarge,
        PartKind::Mast,
        PartKind::Sail,
        PartKind::SailSmall,
        PartKind::Cabin,
        PartKind::Console,
        PartKind::Outboard,
        PartKind::Seat,
        PartKind::TTop,
        PartKind::Cooler,
        PartKind::Bridge,
        PartKind::Smokestack,
        PartKind::Deck,
        PartKind::DeckLarge,
        PartKind::Bumper,
        PartKind::Flag,
        PartKind::Antenna,
        PartKind::Cargo,
        PartKind::Crane,
        PartKind::ShipBridge,
        PartKind::Funnel,
        PartKind::Lifeboat,
    ];

    /// Texture key used by the renderer.
    pub fn key(self) -> &'static str {
        match self {
            PartKind::Hull => "hull",
            PartKind::HullCat => "hull-cat",
            PartKind::HullLarge => "hull-large",
            PartKind::Mast => "mast",
            PartKind::Sail => "sail",
            PartKind::SailSmall => "sail-small",
            PartKind::Cabin => "cabin",
            PartKind::Console => "console",
            PartKind::Outboard => "outboard",
            PartKind::Seat => "seat",
            PartKind::TTop => "ttop",
            PartKind::Cooler => "cooler",
            PartKind::Bridge => "bridge",
            PartKind::Smokestack => "smokestack",
            PartKind::Deck => "deck",
            PartKind::DeckLarge => "deck-large",
            PartKind::Bumper => "bumper",
            PartKind::Flag => "flag",
            PartKind::Antenna => "antenna",
            PartKind::Cargo => "cargo",
            PartKind::Crane => "crane",
            PartKind::ShipBridge => "ship-bridge",
            PartKind::Funnel => "funnel",
            PartKind::Lifeboat => "lifeboat",
        }
    }

    pub fn from_key(key: &str) -> Option<PartKind> {
        PartKind::ALL.iter().copied().find(|k| k.key() == key)
    }

    /// Name read out to the player when a level doesn't author its own.
    pub fn friendly_name(self) -> &'static str {
        match self {
            PartKind::Hull | PartKind::HullCat => "boat body",
            PartKind::HullLarge => "big boat body",
            PartKind::Mast => "tall mast",
            PartKind::Sail => "windy sail",
            PartKind::SailSmall => "small sail",
            PartKind::Cabin => "cozy cabin",
            PartKind::Console => "steering wheel",
            PartKind::Outboard => "motor",
            PartKind::Seat => "comfy seat",
            PartKind::TTop => "sun shade",
            PartKind::Cooler => "cooler box",
            PartKind::Bridge => "deck bridge",
            PartKind::Smokestack => "smoke pipe",
            PartKind::Deck => "boat deck",
            PartKind::DeckLarge => "big deck",
            PartKind::Bumper => "bumper",
            PartKind::Flag => "flutter flag",
            PartKind::Antenna => "antenna",
            PartKind::Cargo => "cargo box",
            PartKind::Crane => "big crane",
            PartKind::ShipBridge => "captain bridge",
            PartKind::Funnel => "big chimney",
            PartKind::Lifeboat => "rescue boat",
        }
    }

    /// Render layer once snapped: hulls at the bottom, flags and antennas on top.
    pub fn layer(self) -> u8 {
        match self {
            PartKind::Hull | PartKind::HullCat | PartKind::HullLarge => 1,
            PartKind::Bumper | PartKind::Outboard => 2,
            PartKind::Deck | PartKind::DeckLarge | PartKind::Bridge | PartKind::Lifeboat => 3,
            PartKind::Seat | PartKind::Cooler | PartKind::Cargo => 4,
            PartKind::Console => 5,
            PartKind::Cabin | PartKind::ShipBridge => 6,
            PartKind::Mast | PartKind::Crane | PartKind::TTop => 7,
            PartKind::Smokestack | PartKind::Funnel => 8,
            PartKind::Sail | PartKind::SailSmall => 9,
            PartKind::Antenna | PartKind::Flag => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique_and_parse_back() {
        for kind in PartKind::ALL {
            assert_eq!(PartKind::from_key(kind.key()), Some(kind));
        }
        let mut keys: Vec<_> = PartKind::ALL.iter().map(|k| k.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), PartKind::ALL.len());
    }

    #[test]
    fn test_unknown_key_is_none() {
        assert_eq!(PartKind::from_key("propeller"), None);
        assert_eq!(PartKind::from_key(""), None);
    }

    #[test]
    fn test_hulls_sit_below_rigging() {
        assert!(PartKind::Hull.layer() < PartKind::Deck.layer());
        assert!(PartKind::Deck.layer() < PartKind::Cabin.layer());
        assert!(PartKind::Mast.layer() < PartKind::Sail.layer());
        assert_eq!(PartKind::Flag.layer(), 10);
    }
}
