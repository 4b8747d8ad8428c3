//! Enumeration types for the Pencil Village state core.
//!
//! [`Terrain`] and [`BuildingState`] are persisted by their variant name
//! (`"Woods"`, `"PartOfBuilding"`), so both expose [`as_str`] and a
//! [`FromStr`] that rejects unknown tags with [`UnknownTag`].
//!
//! [`as_str`]: Terrain::as_str
//! [`FromStr`]: core::str::FromStr

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A stockpiled resource tracked by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Resource {
    /// Lumber cut from the woods.
    Wood,
    /// Stone quarried from rocky ground.
    Stone,
    /// Gold.
    Gold,
}

impl Resource {
    /// All resources, in ledger order.
    pub const ALL: [Self; 3] = [Self::Wood, Self::Stone, Self::Gold];
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// The terrain of a single grid cell.
///
/// Assigned once when the default grid is generated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum Terrain {
    /// Open farmland. Also the fallback for columns outside every band.
    #[default]
    Field,
    /// Forest.
    Woods,
    /// Broken, stony ground.
    Rocky,
    /// Low brush.
    Scrub,
    /// Cliffs and outcrops.
    Crag,
}

impl Terrain {
    /// Every terrain, in declaration order.
    pub const ALL: [Self; 5] = [Self::Field, Self::Woods, Self::Rocky, Self::Scrub, Self::Crag];

    /// The persisted tag for this terrain.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Field => "Field",
            Self::Woods => "Woods",
            Self::Rocky => "Rocky",
            Self::Scrub => "Scrub",
            Self::Crag => "Crag",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Terrain {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTag::new("terrain", s))
    }
}

// ---------------------------------------------------------------------------
// Building state
// ---------------------------------------------------------------------------

/// Whether a cell is covered by a building.
///
/// Placement logic lives in the UI layer; the core only reads this to
/// count depots.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum BuildingState {
    /// Nothing built here.
    #[default]
    None,
    /// The cell is one square of a placed building.
    PartOfBuilding,
}

impl BuildingState {
    /// Every building state, in declaration order.
    pub const ALL: [Self; 2] = [Self::None, Self::PartOfBuilding];

    /// The persisted tag for this building state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::PartOfBuilding => "PartOfBuilding",
        }
    }
}

impl fmt::Display for BuildingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildingState {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| UnknownTag::new("building", s))
    }
}

// ---------------------------------------------------------------------------
// Parse error
// ---------------------------------------------------------------------------

/// A persisted tag did not name any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} tag: {tag:?}")]
pub struct UnknownTag {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The offending tag.
    pub tag: String,
}

impl UnknownTag {
    fn new(kind: &'static str, tag: &str) -> Self {
        Self {
            kind,
            tag: tag.to_owned(),
        }
    }
}
