use crate::config::{asset_file_name, default_file_name, sanitize_name, MirrorConfig};
use crate::error::MirrorError;
use crate::fetcher::Fetcher;
use crate::parser;
use crate::runlog::RunLog;
use crate::types::{AssetKind, EntityIndex, EntitySummary, FetchOutcome, RunStats};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::Path;

/// Everything a single run accumulates.
struct RunContext {
    stats: RunStats,
    log: RunLog,
}

pub struct Mirror {
    fetcher: Fetcher,
    config: MirrorConfig,
}

impl Mirror {
    pub fn new(config: MirrorConfig) -> Self {
        Self {
            fetcher: Fetcher::new(),
            config,
        }
    }

    /// Mirrors every hero listed in the index, in index order.
    ///
    /// Stops at the first fatal error. Files written before that point are
    /// left in place.
    pub async fn run(&self) -> Result<RunStats, MirrorError> {
        let layout = &self.config.layout;
        tokio::fs::create_dir_all(layout.js_dir()).await?;
        if let Some(parent) = layout.log_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut ctx = RunContext {
            stats: RunStats::default(),
            log: RunLog::create(&layout.log_file).await?,
        };

        let index = self.fetch_index(&mut ctx).await?;
        let pb = self.create_progress_bar(index.heroes.len());

        for (i, summary) in index.heroes.iter().enumerate() {
            ctx.stats.entities_processed += 1;
            if let Err(e) = self.mirror_hero(&mut ctx, i, summary, &pb).await {
                pb.abandon_with_message("aborted");
                return Err(e);
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        self.finalize(ctx).await
    }

    async fn fetch_index(&self, ctx: &mut RunContext) -> Result<EntityIndex, MirrorError> {
        let url = self.config.urls.index();
        let path = self.config.layout.js_dir().join(default_file_name(&url));

        if !self.fetch_recorded(ctx, &url, &path).await?.is_success() {
            return Err(MirrorError::MissingDocument(url));
        }

        let index = parser::parse_index(&path).await?;
        ctx.log.line(&format!("update {}", index.file_time)).await?;
        ctx.log
            .line(&format!(
                "{} heroes detected, ver {}",
                index.heroes.len(),
                index.version
            ))
            .await?;
        Ok(index)
    }

    async fn mirror_hero(
        &self,
        ctx: &mut RunContext,
        i: usize,
        summary: &EntitySummary,
        pb: &ProgressBar,
    ) -> Result<(), MirrorError> {
        let layout = &self.config.layout;
        let url = self.config.urls.hero(&summary.hero_id);
        let doc_path = layout.detail_document(&summary.hero_id, &summary.alias);

        if !self.fetch_recorded(ctx, &url, &doc_path).await?.is_success() {
            ctx.log
                .line(&format!(
                    "[{}] heroid: {}, alias: {} skipped, no detail document",
                    i + 1,
                    summary.hero_id,
                    summary.alias
                ))
                .await?;
            return Ok(());
        }

        let detail = parser::parse_detail(&doc_path, &self.config.urls).await?;
        let info = &detail.info;
        debug!(
            "{} document ver {}, updated {}",
            info.alias, detail.version, detail.file_time
        );
        ctx.log
            .line(&format!(
                "[{}] heroid: {}, name: {}, title: {}, alias: {}",
                i + 1,
                info.hero_id,
                info.name,
                info.title,
                info.alias
            ))
            .await?;

        let folder = info.folder_name();
        pb.set_message(folder.clone());
        for kind in &self.config.assets {
            tokio::fs::create_dir_all(layout.asset_dir(&folder, *kind)).await?;
        }

        let mut downloaded = 0;
        for skin in detail.skins.iter().filter(|s| !s.chroma) {
            ctx.log
                .line(&format!("    skinid: {}, name: {}", skin.skin_id, skin.name))
                .await?;
            let stem = sanitize_name(&skin.name);
            if stem.is_empty() {
                warn!("Skin {} has no usable file name", skin.skin_id);
                ctx.log
                    .line(&format!(
                        "    warning: skin {} name {:?} is empty once sanitized",
                        skin.skin_id, skin.name
                    ))
                    .await?;
            }

            // Only the first configured kind decides whether the skin counts.
            let mut primary: Option<bool> = None;
            for kind in self.config.variant_kinds() {
                let Some(url) = skin.urls.get(&kind) else {
                    continue;
                };
                let dest = layout
                    .asset_dir(&folder, kind)
                    .join(asset_file_name(&stem, url));
                let outcome = self.fetch_asset(ctx, url, &dest).await?;
                primary.get_or_insert(outcome.is_success());
            }
            if primary == Some(true) {
                downloaded += 1;
            }
        }
        ctx.stats.skins_downloaded += downloaded;

        if self.config.wants(AssetKind::Audio) {
            let dir = layout.asset_dir(&folder, AssetKind::Audio);
            for (prefix, url) in [("pick_", &info.pick_audio_url), ("ban_", &info.ban_audio_url)] {
                let dest = dir.join(format!("{}{}", prefix, default_file_name(url)));
                self.fetch_asset(ctx, url, &dest).await?;
            }
        }

        if self.config.wants(AssetKind::Avatar) {
            let dest = layout
                .asset_dir(&folder, AssetKind::Avatar)
                .join(asset_file_name(&sanitize_name(&info.alias), &info.avatar_url));
            self.fetch_asset(ctx, &info.avatar_url, &dest).await?;
        }

        ctx.log
            .line(&format!("    ===> {} skins downloaded", downloaded))
            .await?;
        Ok(())
    }

    /// Fetches one resource, recording a 404 against the run.
    async fn fetch_recorded(
        &self,
        ctx: &mut RunContext,
        url: &str,
        dest: &Path,
    ) -> Result<FetchOutcome, MirrorError> {
        let outcome = self.fetcher.fetch(url, dest).await?;
        if outcome == FetchOutcome::NotFound {
            warn!("404 for {}", url);
            ctx.stats.record_not_found(url, dest.to_path_buf());
            ctx.log
                .line(&format!("    not found: {} -> {}", url, dest.display()))
                .await?;
        }
        Ok(outcome)
    }

    /// Like `fetch_recorded`, also counting the bytes of a downloaded asset.
    /// Index and detail documents are not assets.
    async fn fetch_asset(
        &self,
        ctx: &mut RunContext,
        url: &str,
        dest: &Path,
    ) -> Result<FetchOutcome, MirrorError> {
        let outcome = self.fetch_recorded(ctx, url, dest).await?;
        if let FetchOutcome::Success { bytes } = outcome {
            ctx.stats.bytes_downloaded += bytes;
        }
        Ok(outcome)
    }

    async fn finalize(&self, mut ctx: RunContext) -> Result<RunStats, MirrorError> {
        ctx.log
            .line(&format!(
                "\n{} heroes, {} skins downloaded",
                ctx.stats.entities_processed, ctx.stats.skins_downloaded
            ))
            .await?;

        if ctx.stats.not_found_count() > 0 {
            ctx.log
                .line(&format!("{} files not found", ctx.stats.not_found_count()))
                .await?;
            for entry in &ctx.stats.not_found {
                ctx.log
                    .line(&format!("    {} <- {}", entry.path.display(), entry.url))
                    .await?;
            }
        }

        self.write_not_found_csv(&ctx.stats)?;

        let RunContext { stats, log } = ctx;
        log.close().await?;
        info!(
            "Run finished: {} heroes, {} skins, {} not found",
            stats.entities_processed,
            stats.skins_downloaded,
            stats.not_found_count()
        );
        Ok(stats)
    }

    fn write_not_found_csv(&self, stats: &RunStats) -> Result<(), MirrorError> {
        let mut wtr = csv::WriterBuilder::new().from_path(self.config.layout.not_found_report())?;
        wtr.write_record(["path", "url"])?;
        for entry in &stats.not_found {
            wtr.write_record([entry.path.display().to_string(), entry.url.clone()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn create_progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb
    }
}
