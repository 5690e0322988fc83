//! 来源列表的整理

use std::collections::HashSet;

/// 去掉行首的 `[n]` 编号，返回剩余的来源文本
fn source_text(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('[')
        && let Some(end) = rest.find(']')
        && !rest[..end].is_empty()
        && rest[..end].chars().all(|c| c.is_ascii_digit())
    {
        return rest[end + 1..].trim();
    }
    line
}

/// 按出现顺序去重，空行丢弃
///
/// 编号之后的文本相同即视为同一来源，保留第一次出现的那一行。
pub fn dedupe_sources(sources: &str) -> String {
    let mut seen = HashSet::new();
    sources
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .filter(|line| seen.insert(source_text(line).to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_text_strips_marker() {
        assert_eq!(source_text("[12] https://a.dev"), "https://a.dev");
        assert_eq!(source_text("  [3]   Paper  "), "Paper");
        assert_eq!(source_text("[x] not a marker"), "[x] not a marker");
        assert_eq!(source_text("plain line"), "plain line");
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let sources = "[1] https://a.dev\n[2] https://b.dev\n[3] https://a.dev";
        assert_eq!(dedupe_sources(sources), "[1] https://a.dev\n[2] https://b.dev");
    }

    #[test]
    fn test_dedupe_drops_blank_lines() {
        let sources = "[1] A\n\n   \n[2] B\n";
        assert_eq!(dedupe_sources(sources), "[1] A\n[2] B");
    }
}
