use crate::config::LLMConfig;

/// 超过该长度（字符数）的prompt直接使用高质量模型
const EFFICIENT_PROMPT_LIMIT: usize = 32 * 1024;

/// 根据prompt长度选择模型，返回（首选模型，兜底模型）
pub fn evaluate_befitting_model(
    llm_config: &LLMConfig,
    system_prompt: &str,
    user_prompt: &str,
) -> (String, Option<String>) {
    if system_prompt.len() + user_prompt.len() <= EFFICIENT_PROMPT_LIMIT
        && llm_config.model_efficient != llm_config.model_powerful
    {
        return (
            llm_config.model_efficient.clone(),
            Some(llm_config.model_powerful.clone()),
        );
    }
    if system_prompt.len() + user_prompt.len() <= EFFICIENT_PROMPT_LIMIT {
        return (llm_config.model_efficient.clone(), None);
    }
    (llm_config.model_powerful.clone(), None)
}

/// 缓存键：模型 + 两段prompt
pub fn cache_key(model: &str, system_prompt: &str, user_prompt: &str) -> String {
    format!("{}\n---\n{}\n---\n{}", model, system_prompt, user_prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config() -> LLMConfig {
        LLMConfig {
            model_efficient: "small".to_string(),
            model_powerful: "large".to_string(),
            ..LLMConfig::default()
        }
    }

    #[test]
    fn test_short_prompt_uses_efficient_with_fallover() {
        let (model, fallover) = evaluate_befitting_model(&llm_config(), "sys", "user");
        assert_eq!(model, "small");
        assert_eq!(fallover.as_deref(), Some("large"));
    }

    #[test]
    fn test_long_prompt_uses_powerful() {
        let long = "x".repeat(EFFICIENT_PROMPT_LIMIT + 1);
        let (model, fallover) = evaluate_befitting_model(&llm_config(), "sys", &long);
        assert_eq!(model, "large");
        assert!(fallover.is_none());
    }

    #[test]
    fn test_same_models_have_no_fallover() {
        let config = LLMConfig {
            model_efficient: "same".to_string(),
            model_powerful: "same".to_string(),
            ..LLMConfig::default()
        };
        let (model, fallover) = evaluate_befitting_model(&config, "sys", "user");
        assert_eq!(model, "same");
        assert!(fallover.is_none());
    }

    #[test]
    fn test_cache_key_distinguishes_models() {
        assert_ne!(cache_key("a", "s", "u"), cache_key("b", "s", "u"));
        assert_ne!(cache_key("a", "s", "u"), cache_key("a", "s\nu", ""));
    }
}
