use crate::config::UrlTemplates;
use crate::error::MirrorError;
use crate::types::{AssetKind, EntityDetail, EntityIndex, EntityInfo, EntitySummary, SkinVariant};
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Identifiers come as strings in current documents and as numbers in some
/// older ones.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Id {
    Text(String),
    Number(u64),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Text(s) => f.write_str(s),
            Id::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(u8),
    Text(String),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Number(n) => *n == 1,
            Flag::Text(s) => s == "1",
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawIndex {
    version: String,
    file_time: String,
    hero: Vec<RawSummary>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawSummary {
    #[serde(alias = "id")]
    hero_id: Id,
    alias: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawDetail {
    version: String,
    file_time: String,
    hero: RawHero,
    skins: Vec<RawSkin>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawHero {
    #[serde(alias = "id")]
    hero_id: Id,
    name: String,
    title: String,
    alias: String,
    #[serde(default)]
    select_audio: Option<String>,
    #[serde(default)]
    ban_audio: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawSkin {
    #[serde(alias = "id")]
    skin_id: Id,
    name: String,
    chromas: Flag,
    #[serde(default)]
    main_img: Option<String>,
    #[serde(default)]
    loading_img: Option<String>,
    #[serde(default)]
    source_img: Option<String>,
}

impl RawSkin {
    /// URL given directly by the document, if the schema carries one.
    fn direct_url(&self, kind: AssetKind) -> Option<&str> {
        let url = match kind {
            AssetKind::SkinBig => self.main_img.as_deref(),
            AssetKind::Loading => self.loading_img.as_deref(),
            AssetKind::Source => self.source_img.as_deref(),
            _ => None,
        };
        url.filter(|u| !u.is_empty())
    }
}

fn non_empty(url: Option<String>) -> Option<String> {
    url.filter(|u| !u.is_empty())
}

pub fn decode_index(contents: &str, path: &Path) -> Result<EntityIndex, MirrorError> {
    let raw: RawIndex = serde_json::from_str(contents).map_err(|source| {
        MirrorError::MalformedDocument {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(EntityIndex {
        version: raw.version,
        file_time: raw.file_time,
        heroes: raw
            .hero
            .into_iter()
            .map(|h| EntitySummary {
                hero_id: h.hero_id.to_string(),
                alias: h.alias,
            })
            .collect(),
    })
}

/// Decodes either detail schema and resolves every asset URL, preferring the
/// URLs embedded in the document over the templated ones.
pub fn decode_detail(
    contents: &str,
    path: &Path,
    urls: &UrlTemplates,
) -> Result<EntityDetail, MirrorError> {
    let raw: RawDetail = serde_json::from_str(contents).map_err(|source| {
        MirrorError::MalformedDocument {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let hero_id = raw.hero.hero_id.to_string();
    let info = EntityInfo {
        pick_audio_url: non_empty(raw.hero.select_audio)
            .unwrap_or_else(|| urls.pick_audio(&hero_id)),
        ban_audio_url: non_empty(raw.hero.ban_audio).unwrap_or_else(|| urls.ban_audio(&hero_id)),
        avatar_url: urls.avatar(&raw.hero.alias),
        hero_id,
        name: raw.hero.name,
        title: raw.hero.title,
        alias: raw.hero.alias,
    };

    let skins = raw
        .skins
        .into_iter()
        .map(|skin| {
            let mut resolved = BTreeMap::new();
            let chroma = skin.chromas.is_set();
            let skin_id = skin.skin_id.to_string();
            for kind in AssetKind::VARIANT_KINDS {
                let url = skin
                    .direct_url(kind)
                    .map(str::to_string)
                    .or_else(|| urls.skin_asset(kind, &skin_id));
                if let Some(url) = url {
                    resolved.insert(kind, url);
                }
            }
            SkinVariant {
                skin_id,
                name: skin.name,
                chroma,
                urls: resolved,
            }
        })
        .collect();

    let detail = EntityDetail {
        version: raw.version,
        file_time: raw.file_time,
        info,
        skins,
    };
    debug!(
        "Decoded {} with {} skins",
        path.display(),
        detail.skins.len()
    );
    Ok(detail)
}

pub async fn parse_index(path: &Path) -> Result<EntityIndex, MirrorError> {
    let contents = tokio::fs::read_to_string(path).await?;
    decode_index(&contents, path)
}

pub async fn parse_detail(path: &Path, urls: &UrlTemplates) -> Result<EntityDetail, MirrorError> {
    let contents = tokio::fs::read_to_string(path).await?;
    decode_detail(&contents, path, urls)
}
