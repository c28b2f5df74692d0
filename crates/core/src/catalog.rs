//! Chip family catalog.
//!
//! Categories and their variant rules are plain static tables. Rule
//! precedence is the order of declaration: the classifier takes the first
//! rule that matches, so more specific rules sit above broader ones.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::text::FoldedText;

/// Terms marking non-original parts, vetoing a match in every category.
pub const GLOBAL_EXCLUSIONS: &[&str] = &["replacement", "replica", "clone", "fpga", "emulator"];

/// Identifier of the catch-all discovery category.
pub const DISCOVERY_ID: &str = "discover";

/// Selection keyword meaning every named category.
pub const ALL_SELECTOR: &str = "all";

/// A sub-classification rule within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantRule {
    /// Label reported for listings matching this rule.
    pub label: &'static str,
    /// At least one of these must occur in the title. Never empty.
    pub include: &'static [&'static str],
    /// None of these may occur in the title.
    pub exclude: &'static [&'static str],
}

impl VariantRule {
    /// Rule with include keywords only.
    pub const fn new(label: &'static str, include: &'static [&'static str]) -> Self {
        Self {
            label,
            include,
            exclude: &[],
        }
    }

    /// Rule with include and exclude keywords.
    pub const fn excluding(
        label: &'static str,
        include: &'static [&'static str],
        exclude: &'static [&'static str],
    ) -> Self {
        Self {
            label,
            include,
            exclude,
        }
    }

    /// Check whether this rule matches a folded title.
    pub fn matches(&self, title: &FoldedText) -> bool {
        title.contains_any(self.include) && !title.contains_any(self.exclude)
    }
}

/// A named class of items listings are sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Identifier (e.g. "sid").
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Marketplace search queries; used by the fetch layer only.
    pub queries: &'static [&'static str],
    /// Category-specific exclusion keywords.
    pub exclude: &'static [&'static str],
    /// At least one must occur for a listing to be relevant. Empty accepts all.
    pub must_match: &'static [&'static str],
    /// Ordered variant rules. Empty means one undivided bucket.
    pub variants: &'static [VariantRule],
}

impl Category {
    /// Whether this category accepts every title (no must-match gate).
    pub fn is_catch_all(&self) -> bool {
        self.must_match.is_empty()
    }

    /// Whether this category sub-classifies its listings.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }
}

const BOARD_PRODUCTS: &[&str] = &["breakout board", "module", "synth"];

/// All categories, in report order.
pub const CATALOG: &[Category] = &[
    Category {
        id: "sid",
        name: "MOS SID",
        queries: &[
            "MOS 6581 SID",
            "MOS 8580 SID",
            "SID chip Commodore 64",
            "6581 sound chip",
            "8580 sound chip",
            "MOS 6581R4",
            "MOS 8580R5",
        ],
        exclude: &[
            "sidkick", "swinsid", "armsid", "fpgasid", "arm2sid", "nano sid", "nanosid", "x-sid",
            "xsid", "mixsid",
        ],
        must_match: &["sid", "6581", "8580"],
        variants: &[
            VariantRule::excluding("6581", &["6581"], &["8580"]),
            VariantRule::excluding("8580", &["8580"], &["6581"]),
        ],
    },
    Category {
        id: "vic-ii",
        name: "MOS VIC-II",
        queries: &[
            "MOS 6567 VIC",
            "MOS 6569 VIC",
            "MOS 8562",
            "MOS 8565",
            "VIC-II chip",
        ],
        exclude: &["vic-20"],
        must_match: &["vic-ii", "vic ii", "6567", "6569", "8562", "8565"],
        variants: &[
            VariantRule::new("6567", &["6567"]),
            VariantRule::new("6569", &["6569"]),
            VariantRule::new("8562", &["8562"]),
            VariantRule::new("8565", &["8565"]),
        ],
    },
    Category {
        id: "denise",
        name: "Amiga Denise",
        queries: &[
            "Amiga Denise 8362",
            "Amiga Denise 8373",
            "Super Denise",
            "MOS 8362",
            "MOS 8373",
        ],
        exclude: &[],
        must_match: &["denise", "8362", "8373", "391081"],
        variants: &[
            // 391081 is the Commodore part number printed on Super Denise.
            VariantRule::new("8373 (Super)", &["391081", "8373", "super denise"]),
            VariantRule::excluding("8362", &["8362"], &["391081"]),
        ],
    },
    Category {
        id: "paula",
        name: "Amiga Paula",
        queries: &["Amiga Paula 8364", "MOS 8364 Paula"],
        exclude: &[],
        must_match: &["paula", "8364"],
        variants: &[VariantRule::new("8364", &["8364"])],
    },
    Category {
        id: "agnus",
        name: "Amiga Agnus",
        queries: &[
            "Amiga Agnus 8361",
            "Amiga Agnus 8370",
            "Amiga Agnus 8372",
            "Amiga Agnus 8375",
            "Fat Agnus",
            "MOS 8372",
        ],
        exclude: &[],
        must_match: &["agnus", "8361", "8370", "8372", "8375"],
        variants: &[
            // PLCC 8375 boards often list 8372 compatibility too.
            VariantRule::new("8375", &["8375"]),
            VariantRule::excluding("8372", &["8372"], &["8375"]),
            VariantRule::new("8370", &["8370"]),
            VariantRule::new("8361", &["8361"]),
        ],
    },
    Category {
        id: "ym2151",
        name: "Yamaha YM2151",
        queries: &["Yamaha YM2151", "YM2151 OPM", "YM2151 sound chip"],
        exclude: BOARD_PRODUCTS,
        must_match: &["ym2151"],
        variants: &[],
    },
    Category {
        id: "ym2612",
        name: "Yamaha YM2612",
        queries: &["Yamaha YM2612", "YM2612 OPN2", "YM2612 Sega"],
        exclude: BOARD_PRODUCTS,
        must_match: &["ym2612"],
        variants: &[],
    },
    Category {
        id: "sn76489",
        name: "TI SN76489",
        queries: &["SN76489 sound chip", "TI SN76489", "SN76489AN"],
        exclude: &[],
        must_match: &["sn76489", "76489"],
        variants: &[VariantRule::new("SN76489AN", &["sn76489an"])],
    },
    Category {
        id: "2a03",
        name: "Ricoh 2A03",
        queries: &["Ricoh 2A03", "RP2A03 NES", "2A03 NES chip", "Ricoh 2A07"],
        exclude: &[],
        must_match: &["2a03", "2a07"],
        variants: &[
            VariantRule::new("2A03", &["2a03"]),
            VariantRule::new("2A07", &["2a07"]),
        ],
    },
    Category {
        id: DISCOVERY_ID,
        name: "Discovery",
        queries: &[
            "vintage sound chip IC",
            "retro computer chip IC",
            "vintage game chip",
            "MOS custom chip",
            "Amiga custom chip",
        ],
        exclude: &[],
        must_match: &[],
        variants: &[],
    },
];

/// Look up a category by identifier.
pub fn category(id: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|c| c.id == id)
}

/// Identifiers of all categories, in catalog order.
pub fn ids() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|c| c.id)
}

/// Resolve a selection of identifiers to categories.
///
/// `"all"` anywhere in the selection means every category except the
/// catch-all. Otherwise each identifier must exist, and order is kept.
pub fn resolve<S: AsRef<str>>(selection: &[S]) -> Result<Vec<&'static Category>> {
    if selection.iter().any(|s| s.as_ref() == ALL_SELECTOR) {
        return Ok(CATALOG.iter().filter(|c| !c.is_catch_all()).collect());
    }

    selection
        .iter()
        .map(|s| {
            let id = s.as_ref();
            category(id).ok_or_else(|| {
                Error::unknown_category(format!(
                    "{} (valid: {}, {})",
                    id,
                    ids().collect::<Vec<_>>().join(", "),
                    ALL_SELECTOR
                ))
            })
        })
        .collect()
}
