use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// 工作流依赖的模型能力
///
/// 所有步骤只依赖这个trait，生产环境由 [`crate::llm::client::LLMClient`] 实现，
/// 测试中可以替换为脚本化的实现。
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// 单轮对话，返回模型的文本输出
    async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// 结构化提取，输出必须能映射为 `T`，否则返回 `StructuredOutput` 错误
    async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static;

    /// 同 [`LanguageModel::extract`]，但不读缓存
    ///
    /// 同一提示词需要得到新结果时使用，例如用相同反馈重新生成分析师小组。
    async fn extract_fresh<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        self.extract(system_prompt, user_prompt).await
    }
}
