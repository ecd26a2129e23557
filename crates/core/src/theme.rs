//! Static theme catalog.
//!
//! A theme is a named style pack: an ordered prompt list (one prompt per
//! shot) plus, for the lookbook theme, a set of selectable style names.
//! The catalog is compiled in, immutable, and not user-editable. The one
//! runtime exception is the hair-styler theme, whose *active* prompt list
//! is a filtered subset of this catalog plus an optional synthesized
//! custom prompt (see [`crate::prompt::resolve_prompts`]).

use serde::Serialize;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Theme keys
-------------------------------------------------------------------------- */

/// Decade-by-decade restyle of the same portrait.
pub const THEME_DECADES: &str = "decades";

/// Physically impossible selfie scenes.
pub const THEME_IMPOSSIBLE_SELFIES: &str = "impossible-selfies";

/// Hairstyle try-on; prompt list is user-selected.
pub const THEME_HAIR_STYLER: &str = "hair-styler";

/// Professional headshot pack.
pub const THEME_HEADSHOTS: &str = "headshots";

/// 1980s mall studio photoshoot with one shared generated style.
pub const THEME_EIGHTIES_MALL: &str = "eighties-mall";

/// High-fashion lookbook in a single chosen style.
pub const THEME_STYLE_LOOKBOOK: &str = "style-lookbook";

/// Miniature collectible figurine renditions.
pub const THEME_FIGURINES: &str = "figurines";

/// All recognized theme keys, in catalog order.
pub const ALL_THEME_KEYS: &[&str] = &[
    THEME_DECADES,
    THEME_IMPOSSIBLE_SELFIES,
    THEME_HAIR_STYLER,
    THEME_HEADSHOTS,
    THEME_EIGHTIES_MALL,
    THEME_STYLE_LOOKBOOK,
    THEME_FIGURINES,
];

/// Themes whose exports carry no per-shot label (the shot id is an
/// internal prompt handle there, not a display caption).
const UNLABELED_THEMES: &[&str] = &[
    THEME_HEADSHOTS,
    THEME_EIGHTIES_MALL,
    THEME_STYLE_LOOKBOOK,
    THEME_FIGURINES,
];

/* --------------------------------------------------------------------------
Catalog types
-------------------------------------------------------------------------- */

/// One catalog prompt: `id` doubles as the shot's display label.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogPrompt {
    pub id: &'static str,
    pub base: &'static str,
}

/// A static catalog entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Theme {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Icon identifier resolved by the frontend.
    pub icon: &'static str,
    pub prompts: &'static [CatalogPrompt],
    /// Selectable style names (lookbook only; empty elsewhere).
    pub styles: &'static [&'static str],
}

/* --------------------------------------------------------------------------
Catalog data
-------------------------------------------------------------------------- */

/// The full theme catalog, in display order.
pub const THEMES: &[Theme] = &[
    Theme {
        key: THEME_DECADES,
        name: "Time Traveler",
        description: "See yourself through the decades",
        icon: "clock",
        prompts: &[
            CatalogPrompt { id: "1950s", base: "a classic 1950s portrait" },
            CatalogPrompt { id: "1960s", base: "a 1960s mod-era portrait" },
            CatalogPrompt { id: "1970s", base: "a 1970s disco-era portrait" },
            CatalogPrompt { id: "1980s", base: "a bold 1980s portrait" },
            CatalogPrompt { id: "1990s", base: "a 1990s grunge-era portrait" },
            CatalogPrompt { id: "2000s", base: "an early-2000s portrait" },
        ],
        styles: &[],
    },
    Theme {
        key: THEME_IMPOSSIBLE_SELFIES,
        name: "Impossible Selfies",
        description: "Selfies from places you could never be",
        icon: "rocket",
        prompts: &[
            CatalogPrompt {
                id: "Moonwalk",
                base: "a selfie taken on the surface of the moon, Earth rising in the black sky behind",
            },
            CatalogPrompt {
                id: "Deep Sea",
                base: "a selfie inside a deep-sea submersible, bioluminescent creatures drifting past the porthole",
            },
            CatalogPrompt {
                id: "Dino Era",
                base: "a selfie in a prehistoric jungle with a towering dinosaur looking on curiously",
            },
            CatalogPrompt {
                id: "Summit",
                base: "a selfie at the summit of Mount Everest at dawn, prayer flags snapping in the wind",
            },
            CatalogPrompt {
                id: "Red Planet",
                base: "a selfie standing on the rust-red dunes of Mars beside a planetary rover",
            },
            CatalogPrompt {
                id: "Royal Ball",
                base: "a selfie in the middle of a candle-lit 18th-century royal ballroom in full period dress",
            },
        ],
        styles: &[],
    },
    Theme {
        key: THEME_HAIR_STYLER,
        name: "Hair Styler",
        description: "Try up to six new hairstyles",
        icon: "scissors",
        prompts: &[
            CatalogPrompt { id: "Short", base: "a short haircut" },
            CatalogPrompt { id: "Medium", base: "a medium-length haircut" },
            CatalogPrompt { id: "Long", base: "long hair" },
            CatalogPrompt { id: "Pixie Cut", base: "a cropped pixie cut" },
            CatalogPrompt { id: "Bob Cut", base: "a chin-length bob cut" },
            CatalogPrompt { id: "Ponytail", base: "hair pulled back in a high ponytail" },
            CatalogPrompt { id: "Top Knot", base: "hair tied up in a neat top knot" },
            CatalogPrompt { id: "Tight Curls", base: "a head of tight, springy curls" },
            CatalogPrompt { id: "Braids", base: "intricately braided hair" },
            CatalogPrompt { id: "Buzz Cut", base: "a uniform buzz cut" },
        ],
        styles: &[],
    },
    Theme {
        key: THEME_HEADSHOTS,
        name: "Pro Headshots",
        description: "Studio-quality professional portraits",
        icon: "briefcase",
        prompts: &[
            CatalogPrompt { id: "Charcoal Suit", base: "wearing a tailored charcoal suit" },
            CatalogPrompt { id: "Navy Blazer", base: "wearing a navy blazer over a crisp white shirt" },
            CatalogPrompt { id: "Black Turtleneck", base: "wearing a simple black turtleneck" },
            CatalogPrompt { id: "Soft Knit", base: "wearing a soft neutral-toned knit sweater" },
            CatalogPrompt { id: "Open Collar", base: "wearing a light blue shirt with an open collar" },
        ],
        styles: &[],
    },
    Theme {
        key: THEME_EIGHTIES_MALL,
        name: "'80s Mall Shoot",
        description: "One totally tubular studio session",
        icon: "sparkles",
        prompts: &[
            CatalogPrompt {
                id: "Classic Pose",
                base: "a classic straight-on studio pose, hands folded",
            },
            CatalogPrompt {
                id: "Over the Shoulder",
                base: "an over-the-shoulder glance back at the camera",
            },
            CatalogPrompt {
                id: "Leaning In",
                base: "leaning an elbow on a white prop column",
            },
            CatalogPrompt {
                id: "Double Exposure",
                base: "a dreamy double-exposure profile composite",
            },
            CatalogPrompt {
                id: "Laser Grid",
                base: "a three-quarter pose in front of the laser grid backdrop",
            },
            CatalogPrompt {
                id: "Glamour Close-Up",
                base: "a soft-focus glamour close-up with wind-blown hair",
            },
        ],
        styles: &[],
    },
    Theme {
        key: THEME_STYLE_LOOKBOOK,
        name: "Style Lookbook",
        description: "A fashion lookbook in your chosen style",
        icon: "hanger",
        prompts: &[
            CatalogPrompt { id: "Look 1", base: "a full-body shot walking towards the camera" },
            CatalogPrompt { id: "Look 2", base: "a three-quarter shot leaning against a textured wall" },
            CatalogPrompt { id: "Look 3", base: "a seated pose on a minimalist chair" },
            CatalogPrompt { id: "Look 4", base: "a candid mid-stride street shot" },
            CatalogPrompt { id: "Look 5", base: "a close-up editorial portrait with strong styling" },
            CatalogPrompt { id: "Look 6", base: "a playful jumping shot caught mid-air" },
        ],
        styles: &[
            "Streetwear",
            "Old Money",
            "Minimalist",
            "Bohemian",
            "Y2K",
            "Business Casual",
        ],
    },
    Theme {
        key: THEME_FIGURINES,
        name: "Figurines",
        description: "Become a collectible miniature",
        icon: "box",
        prompts: &[
            CatalogPrompt {
                id: "Desk Figurine",
                base: "a detailed vinyl desk figurine standing on a wooden desk beside a keyboard",
            },
            CatalogPrompt {
                id: "Boxed Collectible",
                base: "a mint-in-box action figure inside a printed blister pack on a store shelf",
            },
            CatalogPrompt {
                id: "Garage Kit",
                base: "a hand-painted resin garage kit displayed in a glass collector's cabinet",
            },
            CatalogPrompt {
                id: "Claw Machine",
                base: "a plush-style figure sitting among prizes inside an arcade claw machine",
            },
        ],
        styles: &[],
    },
];

/* --------------------------------------------------------------------------
Lookups
-------------------------------------------------------------------------- */

/// Find a theme by key.
pub fn theme_by_key(key: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.key == key)
}

/// Validate that a theme key names a catalog entry.
pub fn validate_theme_key(key: &str) -> Result<&'static Theme, CoreError> {
    theme_by_key(key).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unknown theme '{key}'. Valid themes: {}",
            ALL_THEME_KEYS.join(", ")
        ))
    })
}

/// Whether exports for this theme stamp the per-shot label onto the image.
pub fn shows_shot_labels(key: &str) -> bool {
    !UNLABELED_THEMES.contains(&key)
}

/// Title printed on a stitched album for this theme.
pub fn album_title(key: &str) -> String {
    match theme_by_key(key) {
        Some(theme) => format!("Pictura: {}", theme.name),
        None => "My Pictura Album".to_string(),
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
