#[cfg(test)]
mod tests {
    use crate::config::{
        CacheConfig, CheckpointBackend, Config, InterviewFailurePolicy, LLMConfig, LLMProvider,
        WorkflowConfig,
    };
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.output_path, PathBuf::from("./research.reports"));
        assert_eq!(config.checkpoint.backend, CheckpointBackend::File);
        assert_eq!(config.checkpoint.dir, PathBuf::from(".research/threads"));
        assert!(!config.verbose);
    }

    #[test]
    fn test_workflow_config_default() {
        let config = WorkflowConfig::default();

        assert_eq!(config.max_analysts, 3);
        assert_eq!(config.max_interview_turns, 2);
        assert_eq!(config.max_parallels, 4);
        assert_eq!(config.interview_failure, InterviewFailurePolicy::Partial);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!(
            "openai".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            "DeepSeek".parse::<LLMProvider>().unwrap(),
            LLMProvider::DeepSeek
        );
        assert_eq!(
            "openrouter".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenRouter
        );
        assert_eq!(
            "anthropic".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );
        assert_eq!(
            "ollama".parse::<LLMProvider>().unwrap(),
            LLMProvider::Ollama
        );

        assert!("gemini".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display() {
        assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
        assert_eq!(LLMProvider::DeepSeek.to_string(), "deepseek");
        assert_eq!(LLMProvider::OpenRouter.to_string(), "openrouter");
        assert_eq!(LLMProvider::Anthropic.to_string(), "anthropic");
        assert_eq!(LLMProvider::Ollama.to_string(), "ollama");
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        assert_eq!(config.provider, LLMProvider::OpenAI);
        // api_key may be empty if env var is not set
        assert_eq!(config.api_base_url, "https://api.openai.com/v1");
        assert_eq!(config.model_efficient, "gpt-4o-mini");
        assert!(!config.model_powerful.is_empty());
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_delay_ms, 2000);
        assert_eq!(config.timeout_seconds, 180);
    }

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();

        assert!(config.enabled);
        assert_eq!(config.cache_dir, PathBuf::from(".research/cache"));
        assert_eq!(config.expire_hours, 168);
    }

    #[test]
    fn test_interview_failure_policy_from_str() {
        assert_eq!(
            "partial".parse::<InterviewFailurePolicy>().unwrap(),
            InterviewFailurePolicy::Partial
        );
        assert_eq!(
            "fail-fast".parse::<InterviewFailurePolicy>().unwrap(),
            InterviewFailurePolicy::FailFast
        );
        assert!("retry".parse::<InterviewFailurePolicy>().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
output_path = "/tmp/reports"

[workflow]
max_analysts = 5
interview_failure = "fail_fast"

[llm]
provider = "anthropic"
model_efficient = "claude-haiku"
"#,
        )
        .unwrap();

        assert_eq!(config.output_path, PathBuf::from("/tmp/reports"));
        assert_eq!(config.workflow.max_analysts, 5);
        assert_eq!(config.workflow.max_interview_turns, 2);
        assert_eq!(
            config.workflow.interview_failure,
            InterviewFailurePolicy::FailFast
        );
        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.llm.model_efficient, "claude-haiku");
        assert_eq!(config.llm.retry_attempts, 3);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("research.toml");
        std::fs::write(
            &path,
            r#"
verbose = true

[checkpoint]
backend = "memory"
dir = "threads"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.verbose);
        assert_eq!(config.checkpoint.backend, CheckpointBackend::Memory);
        assert_eq!(config.checkpoint.dir, PathBuf::from("threads"));
    }

    #[test]
    fn test_load_with_explicit_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_toml_fails() {
        assert!(Config::from_toml_str("[workflow]\nmax_analysts = \"many\"").is_err());
    }
}
