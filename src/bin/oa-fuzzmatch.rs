//! oa-fuzzmatch -- standalone fuzzy-matching MCP server.
//!
//! Usage: oa-fuzzmatch [--scorer <name>] [--cutoff <0-100>] [--limit <n>] [--parallel]

use anyhow::{Context, bail};
use oa_fuzzmatch::{MatchOptions, Scorer, ServerConfig};

/// Value following `flag` on the command line, if the flag is present.
///
/// A flag followed by nothing or by another `--flag` is an error.
fn flag_value(args: &[String], flag: &str) -> anyhow::Result<Option<String>> {
    let mut rest = args.iter().skip_while(|a| *a != flag);
    if rest.next().is_none() {
        return Ok(None);
    }
    match rest.next() {
        Some(value) if !value.starts_with("--") => Ok(Some(value.clone())),
        _ => bail!("{flag} expects a value"),
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr so it does not interfere with MCP stdio.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config = ServerConfig::default();

    if let Some(name) = flag_value(&args, "--scorer")? {
        config.default_scorer = name.parse::<Scorer>()?;
    }
    if let Some(raw) = flag_value(&args, "--cutoff")? {
        let raw: i64 = raw
            .parse()
            .with_context(|| format!("--cutoff expects an integer, got {raw:?}"))?;
        config.default_cutoff = MatchOptions::cutoff_from_i64(raw)?;
    }
    if let Some(raw) = flag_value(&args, "--limit")? {
        let limit: usize = raw
            .parse()
            .with_context(|| format!("--limit expects a positive integer, got {raw:?}"))?;
        config.default_limit = Some(limit);
    }
    config.parallel = args.iter().any(|a| a == "--parallel");

    oa_fuzzmatch::run_mcp_server(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_flag_value_present() {
        let argv = args(&["oa-fuzzmatch", "--scorer", "ratio", "--parallel"]);
        assert_eq!(flag_value(&argv, "--scorer").ok().flatten().as_deref(), Some("ratio"));
        assert_eq!(flag_value(&argv, "--limit").ok().flatten(), None);
    }

    #[test]
    fn test_flag_value_rejects_following_flag() {
        let argv = args(&["oa-fuzzmatch", "--scorer", "--parallel"]);
        assert!(flag_value(&argv, "--scorer").is_err());

        let argv = args(&["oa-fuzzmatch", "--cutoff"]);
        assert!(flag_value(&argv, "--cutoff").is_err());
    }
}
