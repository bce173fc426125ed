use crate::types::AssetKind;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://game.gtimg.cn/images/lol/act/img";

/// Characters that may not appear in a file name stem.
const RESERVED_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Builds every remote URL the mirror touches from a single base.
#[derive(Debug, Clone)]
pub struct UrlTemplates {
    base: String,
}

impl UrlTemplates {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn index(&self) -> String {
        format!("{}/js/heroList/hero_list.js", self.base)
    }

    pub fn hero(&self, hero_id: &str) -> String {
        format!("{}/js/hero/{}.js", self.base, hero_id)
    }

    pub fn avatar(&self, alias: &str) -> String {
        format!("{}/champion/{}.png", self.base, alias)
    }

    pub fn pick_audio(&self, hero_id: &str) -> String {
        format!("{}/vo/choose/{}.ogg", self.base, hero_id)
    }

    pub fn ban_audio(&self, hero_id: &str) -> String {
        format!("{}/vo/ban/{}.ogg", self.base, hero_id)
    }

    /// Templated URL of a variant-level asset, or `None` for entity-level kinds.
    pub fn skin_asset(&self, kind: AssetKind, skin_id: &str) -> Option<String> {
        let url = match kind {
            AssetKind::SkinBig => format!("{}/skin/big{}.jpg", self.base, skin_id),
            AssetKind::SkinSmall => format!("{}/skin/small{}.jpg", self.base, skin_id),
            AssetKind::Loading => format!("{}/skinloading/{}.jpg", self.base, skin_id),
            AssetKind::Source => format!("{}/guidetop/guide{}.jpg", self.base, skin_id),
            AssetKind::Avatar | AssetKind::Audio => return None,
        };
        Some(url)
    }
}

/// Local directory layout of a mirror.
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    pub log_file: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, log_file_name: &str) -> Self {
        let root = root.into();
        let log_file = root.join(log_file_name);
        Self { root, log_file }
    }

    pub fn js_dir(&self) -> PathBuf {
        self.root.join("js")
    }

    pub fn hero_dir(&self, folder_name: &str) -> PathBuf {
        self.root.join("hero").join(sanitize_name(folder_name))
    }

    pub fn asset_dir(&self, folder_name: &str, kind: AssetKind) -> PathBuf {
        self.hero_dir(folder_name).join(kind.dir_name())
    }

    pub fn detail_document(&self, hero_id: &str, alias: &str) -> PathBuf {
        self.js_dir().join(format!("{}-{}.js", hero_id, alias))
    }

    pub fn not_found_report(&self) -> PathBuf {
        self.root.join("notfound.csv")
    }
}

#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub layout: Layout,
    pub urls: UrlTemplates,
    /// Sorted into canonical order and deduplicated.
    pub assets: Vec<AssetKind>,
    pub show_progress: bool,
}

impl MirrorConfig {
    pub fn new(layout: Layout, urls: UrlTemplates, mut assets: Vec<AssetKind>) -> Self {
        assets.sort();
        assets.dedup();
        Self {
            layout,
            urls,
            assets,
            show_progress: true,
        }
    }

    pub fn variant_kinds(&self) -> impl Iterator<Item = AssetKind> + '_ {
        self.assets.iter().copied().filter(|k| k.is_variant_level())
    }

    pub fn wants(&self, kind: AssetKind) -> bool {
        self.assets.contains(&kind)
    }
}

pub fn sanitize_name(name: &str) -> String {
    name.chars().filter(|c| !RESERVED_CHARS.contains(c)).collect()
}

/// Final path segment of a URL, ignoring any query or fragment.
pub fn default_file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

pub fn url_extension(url: &str) -> Option<&str> {
    let name = default_file_name(url);
    name.rsplit_once('.').map(|(_, ext)| ext).filter(|e| !e.is_empty())
}

/// `stem` plus the extension carried by `url`, if any.
pub fn asset_file_name(stem: &str, url: &str) -> String {
    match url_extension(url) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_only_reserved_characters() {
        assert_eq!(sanitize_name(r#"K/DA: "Pop" <Star>?*|\"#), "KDA Pop Star");
        assert_eq!(sanitize_name("源计划：风暴 艾希"), "源计划：风暴 艾希");
        assert_eq!(sanitize_name("Mecha-Kingdoms (2020)"), "Mecha-Kingdoms (2020)");
    }

    #[test]
    fn sanitized_names_never_contain_reserved_characters() {
        let samples = ["a/b", "c\\d", "e:f", "g*h", "i?j", "k\"l", "m<n", "o>p", "q|r"];
        for sample in samples {
            let clean = sanitize_name(sample);
            assert!(!clean.contains(RESERVED_CHARS), "{clean}");
            assert_eq!(clean.chars().count(), 2);
        }
    }

    #[test]
    fn file_names_come_from_last_segment() {
        assert_eq!(default_file_name("https://x/js/heroList/hero_list.js"), "hero_list.js");
        assert_eq!(default_file_name("https://x/vo/ban/1.ogg?v=3"), "1.ogg");
        assert_eq!(url_extension("https://x/skin/big1001.jpg"), Some("jpg"));
        assert_eq!(url_extension("https://x/noext"), None);
        assert_eq!(asset_file_name("Classic", "https://x/a/b.png"), "Classic.png");
    }

    #[test]
    fn templates_trim_trailing_slash() {
        let urls = UrlTemplates::new("http://cdn.test/img/");
        assert_eq!(urls.index(), "http://cdn.test/img/js/heroList/hero_list.js");
        assert_eq!(urls.hero("22"), "http://cdn.test/img/js/hero/22.js");
        assert_eq!(
            urls.skin_asset(AssetKind::SkinBig, "22001").as_deref(),
            Some("http://cdn.test/img/skin/big22001.jpg")
        );
        assert_eq!(
            urls.skin_asset(AssetKind::Source, "22001").as_deref(),
            Some("http://cdn.test/img/guidetop/guide22001.jpg")
        );
        assert_eq!(urls.skin_asset(AssetKind::Audio, "22001"), None);
        assert_eq!(urls.pick_audio("22"), "http://cdn.test/img/vo/choose/22.ogg");
    }

    #[test]
    fn layout_paths() {
        let layout = Layout::new("lolhero", "skins.log");
        assert_eq!(layout.js_dir(), PathBuf::from("lolhero/js"));
        assert_eq!(layout.log_file, PathBuf::from("lolhero/skins.log"));
        assert_eq!(
            layout.detail_document("1", "Annie"),
            PathBuf::from("lolhero/js/1-Annie.js")
        );
        assert_eq!(
            layout.asset_dir("黑暗之女 安妮", AssetKind::Loading),
            PathBuf::from("lolhero/hero/黑暗之女 安妮/loading")
        );
    }

    #[test]
    fn config_orders_and_dedups_assets() {
        let config = MirrorConfig::new(
            Layout::new("out", "skins.log"),
            UrlTemplates::new(DEFAULT_BASE_URL),
            vec![AssetKind::Audio, AssetKind::Loading, AssetKind::SkinBig, AssetKind::Loading],
        );
        assert_eq!(
            config.assets,
            vec![AssetKind::SkinBig, AssetKind::Loading, AssetKind::Audio]
        );
        assert_eq!(
            config.variant_kinds().collect::<Vec<_>>(),
            vec![AssetKind::SkinBig, AssetKind::Loading]
        );
        assert!(config.wants(AssetKind::Audio));
        assert!(!config.wants(AssetKind::Avatar));
    }
}
