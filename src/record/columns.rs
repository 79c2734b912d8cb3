//! Column names of a catalog record

pub const NAME: &str = "name";
pub const SHORT_DESCRIPTION: &str = "short_description";
pub const DETAILED_DESCRIPTION: &str = "detailed_description";
pub const HEADER_IMAGE: &str = "header_image";
pub const SUPPORTED_LANGUAGES: &str = "supported_languages";
pub const CATEGORIES: &str = "categories";
pub const GENRES: &str = "genres";
pub const TAGS: &str = "tags";
pub const RELEASE_DATE: &str = "release_date";
pub const ESTIMATED_OWNERS: &str = "estimated_owners";
pub const DEVELOPERS: &str = "developers";
pub const PUBLISHERS: &str = "publishers";

/// Platform flags coerced to real booleans
pub const PLATFORMS: &[&str] = &["windows", "mac", "linux"];

/// Columns whose empty values are normalized to null
pub const CREDIT_COLUMNS: &[&str] = &[DEVELOPERS, PUBLISHERS];

// Derived columns
pub const ALL_TAGS: &str = "all_tags";
pub const SHORT_DESCRIPTION_CLEAN: &str = "short_description_clean";
pub const DETAILED_DESCRIPTION_CLEAN: &str = "detailed_description_clean";
pub const SHORT_DESCRIPTION_LANG: &str = "short_description_lang";
pub const DETAILED_DESCRIPTION_LANG: &str = "detailed_description_lang";

/// (raw column, detected-language column, cleaned column) per description
pub const DESCRIPTIONS: &[(&str, &str, &str)] = &[
    (
        SHORT_DESCRIPTION,
        SHORT_DESCRIPTION_LANG,
        SHORT_DESCRIPTION_CLEAN,
    ),
    (
        DETAILED_DESCRIPTION,
        DETAILED_DESCRIPTION_LANG,
        DETAILED_DESCRIPTION_CLEAN,
    ),
];

/// Storefront columns with no use downstream
pub const DEFAULT_DROPPED: &[&str] = &[
    "price",
    "dlc_count",
    "about_the_game",
    "reviews",
    "website",
    "support_url",
    "support_email",
    "metacritic_score",
    "metacritic_url",
    "achievements",
    "recommendations",
    "notes",
    "full_audio_languages",
    "packages",
    "user_score",
    "score_rank",
    "screenshots",
    "movies",
    "average_playtime_forever",
    "average_playtime_2weeks",
    "median_playtime_forever",
    "median_playtime_2weeks",
    "peak_ccu",
];
