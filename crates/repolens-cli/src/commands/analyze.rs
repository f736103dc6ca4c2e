//! `repolens analyze`

use repolens_core::config::Config;
use repolens_core::error::{RepolensResult, ResultExt};
use repolens_core::tree::to_indented_text;
use repolens_core::{RepoId, build_orchestrator};

/// Analyze one repository and print the result to stdout.
pub async fn analyze(config: &Config, url: &str, as_tree: bool) -> RepolensResult<()> {
    let repo = RepoId::parse_with_base(url, &config.github.web_base_url)?;
    let orchestrator = build_orchestrator(config)?;

    let result = orchestrator.analyze(&repo).await?;

    if as_tree {
        print!("{}", to_indented_text(&result.structure));
        println!();
        println!("default branch: {}", result.default_branch);
        for commit in &result.recent_commits {
            let short = commit.sha.get(..7).unwrap_or(&commit.sha);
            println!("{} {} ({})", short, commit.message.lines().next().unwrap_or(""), commit.author);
        }
    } else {
        let json = serde_json::to_string_pretty(&result).context("Serializing analysis result")?;
        println!("{}", json);
    }
    Ok(())
}
