#[cfg(test)]
mod tests {
    use crate::cli::{Args, Command};
    use crate::config::{InterviewFailurePolicy, LLMProvider};
    use clap::Parser;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_start_command() {
        let args = Args::try_parse_from(["panel-research", "start", "LLM agents", "-n", "4"]).unwrap();

        assert_eq!(
            args.command,
            Command::Start {
                topic: "LLM agents".to_string(),
                max_analysts: Some(4)
            }
        );
        assert!(!args.verbose);
        assert!(!args.no_cache);
    }

    #[test]
    fn test_resume_with_feedback() {
        let args = Args::try_parse_from([
            "panel-research",
            "resume",
            "abc-123",
            "--feedback",
            "Add a startup founder",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            Command::Resume {
                thread_id: "abc-123".to_string(),
                feedback: Some("Add a startup founder".to_string())
            }
        );
    }

    #[test]
    fn test_resume_without_feedback() {
        let args = Args::try_parse_from(["panel-research", "resume", "abc-123"]).unwrap();
        assert_eq!(
            args.command,
            Command::Resume {
                thread_id: "abc-123".to_string(),
                feedback: None
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "panel-research",
            "threads",
            "--verbose",
            "--no-cache",
            "--checkpoint-dir",
            "/tmp/threads",
        ])
        .unwrap();

        assert_eq!(args.command, Command::Threads);
        assert!(args.verbose);
        assert!(args.no_cache);
        assert_eq!(args.checkpoint_dir, Some(PathBuf::from("/tmp/threads")));
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Args::try_parse_from(["panel-research"]).is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[workflow]\nmax_parallels = 2\n\n[llm]\nmodel_efficient = \"from-file\"").unwrap();

        let args = Args::try_parse_from([
            "panel-research",
            "--config",
            file.path().to_str().unwrap(),
            "--llm-provider",
            "anthropic",
            "--max-parallels",
            "8",
            "--interview-failure",
            "fail_fast",
            "--no-cache",
            "-o",
            "/tmp/reports",
            "result",
            "t1",
        ])
        .unwrap();
        let config = args.to_config().unwrap();

        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.llm.model_efficient, "from-file");
        assert_eq!(config.workflow.max_parallels, 8);
        assert_eq!(config.workflow.interview_failure, InterviewFailurePolicy::FailFast);
        assert!(!config.cache.enabled);
        assert_eq!(config.output_path, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        let args = Args::try_parse_from([
            "panel-research",
            "--config",
            file.path().to_str().unwrap(),
            "--llm-provider",
            "mystery",
            "threads",
        ])
        .unwrap();

        assert!(args.to_config().is_err());
    }
}
