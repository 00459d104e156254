//! Hand-authored boat assembly levels.
//!
//! Ten levels, looked up by 1-based id. Levels 9 and 10 reuse the cargo and
//! cruise ship layouts. Any id outside the table degrades to level 1.
//!
//! Start positions are anchored to the screen edges so the pieces scatter
//! around the play area; targets are anchored to the horizontal centre and
//! the water line so the finished boat floats on the waves.

use serde::{Deserialize, Serialize};

use crate::geometry::AnchorX::{Center as C, Left as L, Right as R};
use crate::geometry::AnchorY::{Bottom as B, Top as T, Water as W};
use crate::geometry::{Anchor, AnchorX, AnchorY};
use crate::parts::PartKind;

/// Number of levels in the table.
pub const LEVEL_COUNT: u32 = 10;

/// Level served when a requested id is outside the table.
pub const FALLBACK_LEVEL_ID: u32 = 1;

/// Boat-type tag shown next to the level name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoatType {
    Sailboat,
    Outboard,
    Fishing,
    Catamaran,
    Tugboat,
    Yacht,
    Cargo,
    Cruise,
}

impl BoatType {
    pub fn tag(self) -> &'static str {
        match self {
            BoatType::Sailboat => "sailboat",
            BoatType::Outboard => "outboard",
            BoatType::Fishing => "fishing",
            BoatType::Catamaran => "catamaran",
            BoatType::Tugboat => "tugboat",
            BoatType::Yacht => "yacht",
            BoatType::Cargo => "cargo",
            BoatType::Cruise => "cruise",
        }
    }
}

/// One authored piece: where it starts and where it belongs.
#[derive(Debug, Clone, Copy)]
pub struct PartTemplate {
    pub kind: PartKind,
    pub start: Anchor,
    /// `None` means the piece is decorative and never snaps.
    pub target: Option<Anchor>,
    /// Overrides [`PartKind::friendly_name`] when two pieces share a kind.
    pub label: Option<&'static str>,
}

impl PartTemplate {
    pub fn label(&self) -> &'static str {
        self.label.unwrap_or_else(|| self.kind.friendly_name())
    }
}

/// Immutable template for one boat.
#[derive(Debug)]
pub struct LevelTemplate {
    pub name: &'static str,
    pub boat_type: BoatType,
    pub parts: &'static [PartTemplate],
}

const fn part(
    kind: PartKind,
    sx: AnchorX,
    sy: AnchorY,
    tx: AnchorX,
    ty: AnchorY,
    label: Option<&'static str>,
) -> PartTemplate {
    PartTemplate {
        kind,
        start: Anchor::new(sx, sy),
        target: Some(Anchor::new(tx, ty)),
        label,
    }
}

static SMALL_SAILBOAT: LevelTemplate = LevelTemplate {
    name: "Small Sailboat",
    boat_type: BoatType::Sailboat,
    parts: &[
        part(PartKind::Hull, L(100.0), B(150.0), C(0.0), W(0.0), None),
        part(PartKind::Mast, R(150.0), T(180.0), C(-10.0), W(-70.0), None),
        part(PartKind::Sail, L(150.0), T(220.0), C(12.0), W(-60.0), None),
    ],
};

static OUTBOARD_BOAT: LevelTemplate = LevelTemplate {
    name: "Outboard Boat",
    boat_type: BoatType::Outboard,
    parts: &[
        part(PartKind::Hull, L(100.0), B(150.0), C(0.0), W(2.0), None),
        part(PartKind::Console, R(180.0), T(220.0), C(8.0), W(-20.0), None),
        part(PartKind::Seat, R(130.0), B(200.0), C(-30.0), W(-10.0), None),
        part(PartKind::Outboard, L(120.0), B(250.0), C(-80.0), W(12.0), None),
    ],
};

static FISHING_BOAT: LevelTemplate = LevelTemplate {
    name: "Fishing Boat",
    boat_type: BoatType::Fishing,
    parts: &[
        part(PartKind::Hull, L(100.0), B(150.0), C(0.0), W(2.0), None),
        part(PartKind::Console, R(180.0), T(250.0), C(5.0), W(-20.0), None),
        part(PartKind::TTop, R(130.0), T(170.0), C(5.0), W(-50.0), None),
        part(PartKind::Cooler, L(150.0), B(200.0), C(-40.0), W(-8.0), None),
        part(PartKind::Outboard, L(120.0), B(250.0), C(-80.0), W(12.0), None),
    ],
};

static CATAMARAN: LevelTemplate = LevelTemplate {
    name: "Catamaran",
    boat_type: BoatType::Catamaran,
    parts: &[
        part(PartKind::HullCat, L(100.0), B(150.0), C(-50.0), W(5.0), Some("left hull")),
        part(PartKind::HullCat, R(150.0), B(150.0), C(50.0), W(5.0), Some("right hull")),
        part(PartKind::Bridge, L(150.0), B(250.0), C(0.0), W(-12.0), None),
        part(PartKind::Mast, R(180.0), T(180.0), C(0.0), W(-70.0), None),
        part(PartKind::SailSmall, L(100.0), T(200.0), C(10.0), W(-60.0), Some("left sail")),
        part(PartKind::SailSmall, R(120.0), T(200.0), C(25.0), W(-45.0), Some("right sail")),
    ],
};

static TUGBOAT: LevelTemplate = LevelTemplate {
    name: "Tugboat",
    boat_type: BoatType::Tugboat,
    parts: &[
        part(PartKind::Hull, L(100.0), B(150.0), C(0.0), W(0.0), None),
        part(PartKind::Deck, R(180.0), B(200.0), C(0.0), W(-22.0), None),
        part(PartKind::Cabin, L(150.0), T(250.0), C(0.0), W(-52.0), None),
        part(PartKind::Smokestack, R(130.0), T(180.0), C(12.0), W(-96.0), None),
        part(PartKind::Bumper, L(120.0), B(250.0), C(-65.0), W(-5.0), None),
        part(PartKind::Flag, R(100.0), T(150.0), C(20.0), W(-125.0), None),
    ],
};

static FANCY_YACHT: LevelTemplate = LevelTemplate {
    name: "Fancy Yacht",
    boat_type: BoatType::Yacht,
    parts: &[
        part(PartKind::Hull, L(100.0), B(150.0), C(0.0), W(0.0), None),
        part(PartKind::Deck, R(180.0), B(250.0), C(0.0), W(-22.0), None),
        part(PartKind::Cabin, L(150.0), T(250.0), C(8.0), W(-52.0), None),
        part(PartKind::Mast, R(130.0), T(180.0), C(-32.0), W(-72.0), None),
        part(PartKind::Sail, L(120.0), T(200.0), C(-15.0), W(-62.0), None),
        part(PartKind::Antenna, R(100.0), B(200.0), C(28.0), W(-86.0), None),
        part(PartKind::Flag, L(180.0), T(150.0), C(-40.0), W(-110.0), None),
    ],
};

static CARGO_SHIP: LevelTemplate = LevelTemplate {
    name: "Cargo Ship",
    boat_type: BoatType::Cargo,
    parts: &[
        part(PartKind::HullLarge, L(100.0), B(150.0), C(0.0), W(0.0), None),
        part(PartKind::Deck, R(180.0), B(280.0), C(-15.0), W(-32.0), None),
        part(PartKind::Cargo, L(120.0), B(250.0), C(-58.0), W(-54.0), Some("cargo box 1")),
        part(PartKind::Cargo, R(130.0), B(200.0), C(10.0), W(-54.0), Some("cargo box 2")),
        part(PartKind::Cargo, L(150.0), T(200.0), C(-58.0), W(-99.0), Some("cargo box 3")),
        part(PartKind::Crane, R(100.0), T(180.0), C(15.0), W(-97.0), None),
        part(PartKind::ShipBridge, L(180.0), T(250.0), C(62.0), W(-68.0), None),
        part(PartKind::Smokestack, R(150.0), T(150.0), C(70.0), W(-108.0), None),
    ],
};

static CRUISE_SHIP: LevelTemplate = LevelTemplate {
    name: "Cruise Ship",
    boat_type: BoatType::Cruise,
    parts: &[
        part(PartKind::HullLarge, L(100.0), B(150.0), C(0.0), W(0.0), None),
        part(PartKind::DeckLarge, R(180.0), T(300.0), C(0.0), W(-30.0), Some("deck 1")),
        part(PartKind::DeckLarge, L(120.0), B(300.0), C(0.0), W(-45.0), Some("deck 2")),
        part(PartKind::DeckLarge, R(130.0), B(250.0), C(0.0), W(-60.0), Some("deck 3")),
        part(PartKind::Lifeboat, L(150.0), B(200.0), C(-65.0), W(-50.0), None),
        part(PartKind::ShipBridge, R(150.0), T(220.0), C(45.0), W(-88.0), None),
        part(PartKind::Funnel, R(100.0), T(180.0), C(38.0), W(-120.0), Some("big chimney 1")),
        part(PartKind::Funnel, L(180.0), T(150.0), C(62.0), W(-120.0), Some("big chimney 2")),
        part(PartKind::Antenna, L(110.0), B(180.0), C(50.0), W(-114.0), None),
    ],
};

/// Indexed by `id - 1`. The last two slots reuse earlier layouts.
static LEVELS: [&LevelTemplate; LEVEL_COUNT as usize] = [
    &SMALL_SAILBOAT,
    &OUTBOARD_BOAT,
    &FISHING_BOAT,
    &CATAMARAN,
    &TUGBOAT,
    &FANCY_YACHT,
    &CARGO_SHIP,
    &CRUISE_SHIP,
    &CARGO_SHIP,
    &CRUISE_SHIP,
];

/// Whether `id` names an entry in the table.
pub fn is_defined(id: u32) -> bool {
    (1..=LEVEL_COUNT).contains(&id)
}

/// Look up a level template, degrading unknown ids to [`FALLBACK_LEVEL_ID`].
///
/// Returns the id actually served alongside the template.
pub fn level_template(id: u32) -> (u32, &'static LevelTemplate) {
    let resolved = if is_defined(id) {
        id
    } else {
        log::warn!(
            "Level {} not found, falling back to level {}",
            id,
            FALLBACK_LEVEL_ID
        );
        FALLBACK_LEVEL_ID
    };
    (resolved, LEVELS[(resolved - 1) as usize])
}

/// Whether an "advance" transition should be offered after finishing `id`.
pub fn has_next(id: u32) -> bool {
    id < LEVEL_COUNT
}

/// All level ids with their templates, in table order.
pub fn all_levels() -> impl Iterator<Item = (u32, &'static LevelTemplate)> {
    LEVELS.iter().enumerate().map(|(i, t)| (i as u32 + 1, *t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_counts_grow_with_level() {
        let counts: Vec<usize> = all_levels().map(|(_, t)| t.parts.len()).collect();
        assert_eq!(counts, vec![3, 4, 5, 6, 6, 7, 8, 9, 8, 9]);
    }

    #[test]
    fn test_unknown_ids_fall_back_to_first_level() {
        for id in [0, 11, 99, u32::MAX] {
            let (resolved, template) = level_template(id);
            assert_eq!(resolved, FALLBACK_LEVEL_ID);
            assert!(std::ptr::eq(template, &SMALL_SAILBOAT));
        }
    }

    #[test]
    fn test_late_levels_reuse_ship_layouts() {
        assert!(std::ptr::eq(level_template(9).1, level_template(7).1));
        assert!(std::ptr::eq(level_template(10).1, level_template(8).1));
    }

    #[test]
    fn test_every_part_has_a_target() {
        for (id, t) in all_levels() {
            for p in t.parts {
                assert!(p.target.is_some(), "level {} {:?} has no target", id, p.kind);
            }
        }
    }

    #[test]
    fn test_labels_override_friendly_names() {
        let (_, cat) = level_template(4);
        assert_eq!(cat.parts[0].label(), "left hull");
        assert_eq!(cat.parts[2].label(), "deck bridge");
    }

    #[test]
    fn test_advance_stops_at_table_end() {
        assert!(has_next(1));
        assert!(has_next(9));
        assert!(!has_next(10));
    }
}
