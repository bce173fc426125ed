use clap::ValueEnum;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Kinds of media mirrored for a hero. Declaration order is the canonical
/// processing order; the first configured variant-level kind is the primary
/// asset of a skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum AssetKind {
    SkinBig,
    SkinSmall,
    Loading,
    Source,
    Avatar,
    Audio,
}

impl AssetKind {
    pub const VARIANT_KINDS: [AssetKind; 4] = [
        AssetKind::SkinBig,
        AssetKind::SkinSmall,
        AssetKind::Loading,
        AssetKind::Source,
    ];

    /// Name of the per-hero subdirectory holding this kind.
    pub fn dir_name(self) -> &'static str {
        match self {
            AssetKind::SkinBig => "skin_big",
            AssetKind::SkinSmall => "skin_small",
            AssetKind::Loading => "loading",
            AssetKind::Source => "source",
            AssetKind::Avatar => "avatar",
            AssetKind::Audio => "audio",
        }
    }

    pub fn is_variant_level(self) -> bool {
        Self::VARIANT_KINDS.contains(&self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success { bytes: u64 },
    NotFound,
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

#[derive(Debug, Clone)]
pub struct EntityIndex {
    pub version: String,
    pub file_time: String,
    pub heroes: Vec<EntitySummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntitySummary {
    pub hero_id: String,
    pub alias: String,
}

#[derive(Debug, Clone)]
pub struct EntityDetail {
    pub version: String,
    pub file_time: String,
    pub info: EntityInfo,
    pub skins: Vec<SkinVariant>,
}

#[derive(Debug, Clone)]
pub struct EntityInfo {
    pub hero_id: String,
    pub name: String,
    pub title: String,
    pub alias: String,
    pub pick_audio_url: String,
    pub ban_audio_url: String,
    pub avatar_url: String,
}

impl EntityInfo {
    /// Folder name of the hero under the `hero` directory.
    pub fn folder_name(&self) -> String {
        format!("{} {}", self.name, self.title)
    }
}

#[derive(Debug, Clone)]
pub struct SkinVariant {
    pub skin_id: String,
    pub name: String,
    pub chroma: bool,
    /// One resolved URL per variant-level asset kind.
    pub urls: BTreeMap<AssetKind, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotFoundEntry {
    pub path: PathBuf,
    pub url: String,
}

#[derive(Debug, Default)]
pub struct RunStats {
    pub entities_processed: usize,
    pub skins_downloaded: usize,
    pub bytes_downloaded: u64,
    pub not_found: Vec<NotFoundEntry>,
}

impl RunStats {
    pub fn not_found_count(&self) -> usize {
        self.not_found.len()
    }

    pub fn record_not_found(&mut self, url: &str, path: PathBuf) {
        self.not_found.push(NotFoundEntry {
            path,
            url: url.to_string(),
        });
    }
}
