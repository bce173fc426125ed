use crate::config::{Layout, MirrorConfig, UrlTemplates, DEFAULT_BASE_URL};
use crate::types::AssetKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory of the mirror
    #[arg(short, long, default_value = "lolhero")]
    pub output_dir: PathBuf,

    /// Base URL the index, hero documents and assets are served from
    #[arg(short, long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Asset kinds to mirror
    #[arg(
        short,
        long,
        value_enum,
        value_delimiter = ',',
        default_values = ["skin-big", "loading", "audio"]
    )]
    pub assets: Vec<AssetKind>,

    /// Run log file name, relative to the output directory
    #[arg(long, default_value = "skins.log")]
    pub log_file: String,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    pub fn into_config(self) -> MirrorConfig {
        let layout = Layout::new(self.output_dir, &self.log_file);
        let mut config = MirrorConfig::new(layout, UrlTemplates::new(&self.base_url), self.assets);
        config.show_progress = !self.no_progress;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_layout() {
        let config = Cli::parse_from(["lolhero-mirror"]).into_config();

        assert_eq!(config.layout.root, PathBuf::from("lolhero"));
        assert_eq!(config.layout.log_file, PathBuf::from("lolhero/skins.log"));
        assert_eq!(
            config.assets,
            vec![AssetKind::SkinBig, AssetKind::Loading, AssetKind::Audio]
        );
        assert!(config.show_progress);
        assert_eq!(
            config.urls.index(),
            "https://game.gtimg.cn/images/lol/act/img/js/heroList/hero_list.js"
        );
    }

    #[test]
    fn asset_list_is_comma_separated() {
        let config = Cli::parse_from([
            "lolhero-mirror",
            "-o",
            "/tmp/mirror",
            "--assets",
            "source,avatar,skin-small",
            "--no-progress",
        ])
        .into_config();

        assert_eq!(
            config.assets,
            vec![AssetKind::SkinSmall, AssetKind::Source, AssetKind::Avatar]
        );
        assert!(!config.show_progress);
        assert_eq!(config.layout.root, PathBuf::from("/tmp/mirror"));
    }

    #[test]
    fn unknown_asset_kind_is_rejected() {
        assert!(Cli::try_parse_from(["lolhero-mirror", "--assets", "video"]).is_err());
    }
}
