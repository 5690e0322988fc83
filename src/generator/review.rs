//! 人工审核关口

/// 审核之后的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// 根据反馈重新生成分析师
    Regenerate,
    /// 进入访谈阶段
    Proceed,
}

/// 去掉首尾空白，空反馈视为没有反馈
pub fn normalize_feedback(feedback: Option<String>) -> Option<String> {
    feedback
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

pub fn route(feedback: Option<&str>) -> GateDecision {
    match feedback {
        Some(text) if !text.trim().is_empty() => GateDecision::Regenerate,
        _ => GateDecision::Proceed,
    }
}
