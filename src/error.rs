use std::time::Duration;

use thiserror::Error;

/// 调研工作流的错误类型
#[derive(Debug, Error)]
pub enum ResearchError {
    /// 模型输出无法映射为期望的结构化数据
    #[error("structured output error: {0}")]
    StructuredOutput(String),

    /// 模型调用失败（网络、限流、服务端错误等）
    #[error("model call failed: {0}")]
    ModelCall(String),

    /// 模型调用超时
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    /// 单个访谈失败
    #[error("interview with {analyst} failed: {source}")]
    Interview {
        analyst: String,
        #[source]
        source: Box<ResearchError>,
    },

    /// 所有访谈都失败了
    #[error("all {0} interviews failed")]
    AllInterviewsFailed(usize),

    /// 并发任务panic或被取消
    #[error("task aborted: {0}")]
    TaskAborted(String),

    #[error("thread not found: {0}")]
    ThreadNotFound(String),

    #[error("invalid thread id: {0:?}")]
    InvalidThreadId(String),

    #[error("checkpoint error: {0}")]
    Checkpoint(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ResearchError {
    pub fn structured_output(message: impl Into<String>) -> Self {
        Self::StructuredOutput(message.into())
    }

    pub fn model_call(message: impl Into<String>) -> Self {
        Self::ModelCall(message.into())
    }

    pub fn checkpoint_error(message: impl Into<String>) -> Self {
        Self::Checkpoint(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn interview(analyst: impl Into<String>, source: ResearchError) -> Self {
        Self::Interview {
            analyst: analyst.into(),
            source: Box::new(source),
        }
    }

    /// 是否值得在LLM客户端层重试
    ///
    /// 结构化输出错误不重试，直接交给调用方处理。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ModelCall(_) | Self::Timeout(_))
    }
}

pub type Result<T, E = ResearchError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ResearchError::model_call("429").is_retryable());
        assert!(ResearchError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!ResearchError::structured_output("missing field").is_retryable());
        assert!(!ResearchError::ThreadNotFound("t".into()).is_retryable());
    }

    #[test]
    fn test_interview_error_keeps_source() {
        let err = ResearchError::interview("Ada", ResearchError::model_call("boom"));
        assert_eq!(err.to_string(), "interview with Ada failed: model call failed: boom");
        assert!(std::error::Error::source(&err).is_some());
    }
}
