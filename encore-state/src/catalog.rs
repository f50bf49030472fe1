use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};

use crate::Song;

/// One bucket of the catalog: the songs offered to groups whose mean age
/// is at least `min_mean_age` (and below the next tier up).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// The bucket key, e.g. `1990s`.
    pub bucket: String,
    /// The lowest mean age, inclusive, that maps to this bucket.
    pub min_mean_age: u32,
    /// The songs in the bucket. Never empty.
    pub songs: Vec<Song>,
}

#[derive(Debug)]
/// An error that can occur when building or loading a [`Catalog`].
pub enum CatalogError {
    /// The catalog has no tiers at all.
    NoTiers,
    /// A tier has no songs.
    EmptyTier {
        /// The offending bucket.
        bucket: String,
    },
    /// Two tiers share a bucket key.
    DuplicateBucket {
        /// The repeated bucket.
        bucket: String,
    },
    /// Two tiers share a threshold, so one of them could never be chosen.
    DuplicateThreshold {
        /// The repeated threshold.
        min_mean_age: u32,
    },
    /// No tier starts at zero, so young enough groups would have no bucket.
    NoCatchAll,
    /// The catalog file could not be read.
    Io(std::io::Error),
    /// The catalog file is not valid TOML for a catalog.
    Parse(toml::de::Error),
}
impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NoTiers => write!(f, "catalog has no tiers"),
            CatalogError::EmptyTier { bucket } => write!(f, "bucket `{bucket}` has no songs"),
            CatalogError::DuplicateBucket { bucket } => {
                write!(f, "bucket `{bucket}` appears more than once")
            }
            CatalogError::DuplicateThreshold { min_mean_age } => {
                write!(f, "more than one tier starts at mean age {min_mean_age}")
            }
            CatalogError::NoCatchAll => write!(f, "no tier has `min_mean_age = 0`"),
            CatalogError::Io(e) => write!(f, "failed to read catalog: {e}"),
            CatalogError::Parse(e) => write!(f, "failed to parse catalog: {e}"),
        }
    }
}
impl std::error::Error for CatalogError {}
impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}
impl From<toml::de::Error> for CatalogError {
    fn from(e: toml::de::Error) -> Self {
        CatalogError::Parse(e)
    }
}

/// On-disk form: a list of `[[tier]]` tables.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(rename = "tier")]
    tiers: Vec<Tier>,
}

/// The song table the local picker draws from, partitioned into buckets by
/// mean-age threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Sorted by `min_mean_age`, highest first.
    tiers: Vec<Tier>,
}
impl Catalog {
    /// Build a catalog from `tiers`, in any order.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no tiers, a tier is empty, buckets or
    /// thresholds repeat, or no tier starts at zero.
    pub fn new(mut tiers: Vec<Tier>) -> Result<Self, CatalogError> {
        if tiers.is_empty() {
            return Err(CatalogError::NoTiers);
        }

        let mut buckets = HashSet::new();
        let mut thresholds = HashSet::new();
        for tier in &tiers {
            if tier.songs.is_empty() {
                return Err(CatalogError::EmptyTier {
                    bucket: tier.bucket.clone(),
                });
            }
            if !buckets.insert(tier.bucket.as_str()) {
                return Err(CatalogError::DuplicateBucket {
                    bucket: tier.bucket.clone(),
                });
            }
            if !thresholds.insert(tier.min_mean_age) {
                return Err(CatalogError::DuplicateThreshold {
                    min_mean_age: tier.min_mean_age,
                });
            }
        }
        if !thresholds.contains(&0) {
            return Err(CatalogError::NoCatchAll);
        }

        tiers.sort_by(|a, b| b.min_mean_age.cmp(&a.min_mean_age));
        Ok(Self { tiers })
    }

    /// Parse a catalog from TOML made of `[[tier]]` tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the tiers are invalid.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        Self::new(file.tiers)
    }

    /// Load a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or isn't a valid catalog.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// The built-in table: three songs per decade, with the thresholds
    /// 45 / 35 / 25.
    pub fn builtin() -> Self {
        let song = |title: &str, artist: &str, year, genre: &str| Song {
            title: title.to_string(),
            artist: artist.to_string(),
            year,
            genre: genre.to_string(),
        };
        let tier = |bucket: &str, min_mean_age, songs| Tier {
            bucket: bucket.to_string(),
            min_mean_age,
            songs,
        };

        Self {
            tiers: vec![
                tier(
                    "1990s",
                    45,
                    vec![
                        song("LOVEマシーン", "モーニング娘。", 1999, "J-Pop"),
                        song("TSUNAMI", "サザンオールスターズ", 2000, "J-Pop"),
                        song("CAN YOU CELEBRATE?", "安室奈美恵", 1997, "J-Pop"),
                    ],
                ),
                tier(
                    "2000s",
                    35,
                    vec![
                        song("世界に一つだけの花", "SMAP", 2003, "J-Pop"),
                        song("Flavor Of Life", "宇多田ヒカル", 2007, "J-Pop"),
                        song("千の風になって", "秋川雅史", 2006, "Ballad"),
                    ],
                ),
                tier(
                    "2010s",
                    25,
                    vec![
                        song("恋", "星野源", 2016, "J-Pop"),
                        song("Pretender", "Official髭男dism", 2019, "J-Pop"),
                        song("Lemon", "米津玄師", 2018, "J-Pop"),
                    ],
                ),
                tier(
                    "2020s",
                    0,
                    vec![
                        song("ドライフラワー", "優里", 2020, "J-Pop"),
                        song("KICK BACK", "米津玄師", 2022, "Rock"),
                        song("アイドル", "YOASOBI", 2023, "J-Pop"),
                    ],
                ),
            ],
        }
    }

    /// Serialize the catalog in the same form [`Self::from_toml_str`] reads.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(&CatalogFile {
            tiers: self.tiers.clone(),
        })
    }

    /// The tiers, highest threshold first.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Look up a tier by bucket key.
    pub fn tier(&self, bucket: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.bucket == bucket)
    }

    /// The tier for a group whose ages add up to `age_sum` over `count`
    /// members: the first tier whose threshold the mean reaches.
    ///
    /// Compares `age_sum >= min_mean_age * count` so fractional means are
    /// placed exactly. Returns `None` for an empty group.
    pub fn tier_for_ages(&self, age_sum: u64, count: usize) -> Option<&Tier> {
        if count == 0 {
            return None;
        }
        self.tiers
            .iter()
            .find(|t| age_sum >= u64::from(t.min_mean_age) * count as u64)
    }
}
impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
