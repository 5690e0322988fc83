//! LLM客户端 - 基于rig的 [`LanguageModel`] 实现

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheManager;
use crate::config::{Config, LLMConfig};
use crate::error::{ResearchError, Result};
use crate::llm::model::LanguageModel;

mod providers;
pub mod utils;

use providers::ProviderClient;
use utils::{cache_key, evaluate_befitting_model};

/// LLM客户端，进程启动时创建一次，通过Arc注入各个步骤
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
    cache: Arc<CacheManager>,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = ProviderClient::new(&config.llm)?;
        Ok(Self {
            config: config.llm.clone(),
            client,
            cache: Arc::new(CacheManager::new(config.cache.clone())),
        })
    }

    /// 检查模型连接是否正常
    pub async fn check_connection(&self) -> Result<()> {
        tracing::info!(provider = %self.config.provider, "🔄 正在检查模型连接...");
        let agent = self.client.create_agent(
            &self.config.model_efficient,
            "You are a helpful assistant.",
            &self.config,
        );
        match self.with_timeout(agent.prompt("Hello")).await {
            Ok(_) => {
                tracing::info!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "❌ 模型连接失败");
                Err(e)
            }
        }
    }

    async fn with_timeout<T, Fut>(&self, fut: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let limit = Duration::from_secs(self.config.timeout_seconds);
        tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| ResearchError::Timeout(limit))?
    }

    /// 通用重试逻辑，只重试可重试的错误
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_retries = self.config.retry_attempts.max(1);
        let retry_delay_ms = self.config.retry_delay_ms;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) if err.is_retryable() => {
                    retries += 1;
                    tracing::warn!(
                        attempt = retries,
                        max_retries,
                        error = %err,
                        "❌ 调用模型服务出错，重试中"
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(Duration::from_millis(retry_delay_ms)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn prompt_with_model(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        let agent = self.client.create_agent(model, system_prompt, &self.config);
        self.retry_with_backoff(|| async { self.with_timeout(agent.prompt(user_prompt)).await })
            .await
    }

    async fn extract_with_model<T>(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let extractor = self
            .client
            .create_extractor::<T>(model, system_prompt, &self.config);
        self.retry_with_backoff(|| async {
            self.with_timeout(extractor.extract(user_prompt)).await
        })
        .await
    }
}

#[async_trait]
impl LanguageModel for LLMClient {
    async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let (model, fallover_model) =
            evaluate_befitting_model(&self.config, system_prompt, user_prompt);
        let key = cache_key(&model, system_prompt, user_prompt);

        if let Some(cached) = self.cache.get::<String>("prompt", &key).await {
            return Ok(cached);
        }

        tracing::debug!(model = %model, "calling model");
        let response = match self
            .prompt_with_model(&model, system_prompt, user_prompt)
            .await
        {
            Ok(response) => response,
            Err(err) if err.is_retryable() => match fallover_model {
                Some(ref fallover) => {
                    tracing::warn!(
                        model = %model,
                        fallover = %fallover,
                        error = %err,
                        "❌ 多次重试均失败，尝试使用备选模型"
                    );
                    self.prompt_with_model(fallover, system_prompt, user_prompt)
                        .await?
                }
                None => return Err(err),
            },
            Err(err) => return Err(err),
        };

        if let Err(e) = self
            .cache
            .set("prompt", &key, &response, Some(model.as_str()))
            .await
        {
            tracing::warn!(error = %e, "⚠️ 写入缓存失败");
        }
        Ok(response)
    }

    async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let (model, _) = evaluate_befitting_model(&self.config, system_prompt, user_prompt);
        let category = format!("extract/{}", std::any::type_name::<T>().replace("::", "."));
        let key = cache_key(&model, system_prompt, user_prompt);

        if let Some(cached) = self.cache.get::<T>(&category, &key).await {
            return Ok(cached);
        }

        tracing::debug!(model = %model, target = std::any::type_name::<T>(), "extracting");
        let result: T = self
            .extract_with_model(&model, system_prompt, user_prompt)
            .await?;

        if let Err(e) = self.cache.set(&category, &key, &result, Some(model.as_str())).await {
            tracing::warn!(error = %e, "⚠️ 写入缓存失败");
        }
        Ok(result)
    }

    async fn extract_fresh<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let (model, _) = evaluate_befitting_model(&self.config, system_prompt, user_prompt);
        tracing::debug!(model = %model, target = std::any::type_name::<T>(), "extracting without cache");
        self.extract_with_model(&model, system_prompt, user_prompt).await
    }
}
