use crate::error::{ResearchError, Result};
use crate::generator::prompts::{ANALYST_USER_PROMPT, analyst_instructions};
use crate::llm::LanguageModel;
use crate::types::{Analyst, Perspectives};

/// 生成分析师小组
///
/// 一次结构化输出调用，随后做显式校验；本层不重试。
/// 每次都绕过缓存，重复相同的反馈也会得到新的小组。
pub async fn create_analysts<M>(
    model: &M,
    topic: &str,
    max_analysts: usize,
    human_feedback: Option<&str>,
) -> Result<Vec<Analyst>>
where
    M: LanguageModel,
{
    let system_prompt = analyst_instructions(topic, human_feedback, max_analysts);
    let perspectives: Perspectives = model
        .extract_fresh(&system_prompt, ANALYST_USER_PROMPT)
        .await?;
    validate_panel(perspectives.analysts, max_analysts)
}

/// 校验分析师小组：不能为空、字段不能为空白，超过上限时截断
pub fn validate_panel(mut analysts: Vec<Analyst>, max_analysts: usize) -> Result<Vec<Analyst>> {
    if analysts.is_empty() {
        return Err(ResearchError::structured_output("model returned no analysts"));
    }

    for (index, analyst) in analysts.iter().enumerate() {
        if let Some(field) = analyst.first_blank_field() {
            return Err(ResearchError::structured_output(format!(
                "analyst #{} has an empty `{}` field",
                index + 1,
                field
            )));
        }
    }

    if analysts.len() > max_analysts {
        tracing::warn!(
            returned = analysts.len(),
            max_analysts,
            "model returned more analysts than requested, truncating"
        );
        analysts.truncate(max_analysts);
    }

    Ok(analysts)
}
