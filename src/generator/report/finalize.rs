//! 最终报告组装

use crate::generator::report::sources::dedupe_sources;

/// 各部分之间的分隔线
pub const SEP: &str = "\n\n---\n\n";

const INSIGHTS_HEADER: &str = "## Insights";
const SOURCES_HEADER: &str = "## Sources";
const SOURCES_MARKER: &str = "\n## Sources\n";

/// 正文与来源列表的拆分结果
#[derive(Debug, PartialEq, Eq)]
enum SourcesSplit<'a> {
    Found { body: &'a str, sources: &'a str },
    Missing,
    /// 出现了来源标题，但格式不符合预期
    Anomaly(&'static str),
}

fn split_sources(content: &str) -> SourcesSplit<'_> {
    match content.split_once(SOURCES_MARKER) {
        Some((_, sources)) if sources.trim().is_empty() => {
            SourcesSplit::Anomaly("sources section is empty")
        }
        Some((body, sources)) => SourcesSplit::Found { body, sources },
        None if content.contains(SOURCES_HEADER) => {
            SourcesSplit::Anomaly("sources header is not on its own line")
        }
        None => SourcesSplit::Missing,
    }
}

/// 拼接引言、正文、结论和来源列表
///
/// 纯函数：去掉正文开头的 `## Insights` 标题，拆出 `## Sources`，
/// 再用 [`SEP`] 连接各部分。来源格式异常时只记录警告，正文保持原样。
pub fn finalize_report(content: &str, introduction: &str, conclusion: &str) -> String {
    // 标题所在行的换行符留到拆分之后再去掉，紧跟标题的来源列表仍然能被识别
    let (content, had_header) = match content.strip_prefix(INSIGHTS_HEADER) {
        Some(rest) => (rest, true),
        None => (content, false),
    };

    let (body, sources) = match split_sources(content) {
        SourcesSplit::Found { body, sources } => (body, Some(dedupe_sources(sources))),
        SourcesSplit::Missing => (content, None),
        SourcesSplit::Anomaly(reason) => {
            tracing::warn!(reason, "report sources could not be extracted, keeping content as is");
            (content, None)
        }
    };
    let body = if had_header {
        strip_line_break(body)
    } else {
        body
    };

    let mut report = format!("{introduction}{SEP}{body}{SEP}{conclusion}");
    if let Some(sources) = sources {
        report.push_str(SEP);
        report.push_str("## Sources\n\n");
        report.push_str(&sources);
    }
    report
}

fn strip_line_break(text: &str) -> &str {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text)
}
