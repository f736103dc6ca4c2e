//! `repolens cache`

use crate::console::CliConsole;
use repolens_core::cache::RepoCache;
use repolens_core::config::Config;
use repolens_core::error::{RepolensResult, ResultExt};

pub async fn stats(config: &Config) -> RepolensResult<()> {
    let console = CliConsole::new(true);
    let cache = RepoCache::new(&config.cache);
    let stats = cache
        .stats()
        .await
        .with_context(|| format!("Reading cache directory {}", cache.dir().display()))?;

    console.print_header("Repository Cache");
    console.field("Directory", cache.dir().display());
    console.field("TTL", humanize(cache.ttl()));
    console.field("Entries", format!("{} / {}", stats.entries, cache.max_entries()));
    console.field("Size", format!("{} bytes", stats.size_bytes));
    console.field("Expired", stats.expired);
    if stats.corrupt > 0 {
        console.warn(&format!("{} unreadable entries", stats.corrupt));
    }
    Ok(())
}

pub async fn clear(config: &Config) -> RepolensResult<()> {
    let console = CliConsole::new(true);
    let cache = RepoCache::new(&config.cache);
    let removed = cache
        .clear()
        .await
        .with_context(|| format!("Clearing cache directory {}", cache.dir().display()))?;
    console.success(&format!("Removed {} cache entries", removed));
    Ok(())
}

fn humanize(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    match secs {
        s if s % 3600 == 0 => format!("{}h", s / 3600),
        s if s % 60 == 0 => format!("{}m", s / 60),
        s => format!("{}s", s),
    }
}
