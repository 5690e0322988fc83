//! 各模型服务商的rig客户端，统一包装成枚举

use anyhow::Result;
use rig::{
    agent::Agent,
    client::CompletionClient,
    completion::{Prompt, PromptError},
    extractor::{ExtractionError, Extractor},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::{LLMConfig, LLMProvider};
use crate::error::ResearchError;

/// 对每个服务商变体执行同一段代码
macro_rules! for_each_provider {
    ($value:expr, $enum:ident, $inner:ident => $body:expr) => {
        match $value {
            $enum::OpenAI($inner) => $body,
            $enum::DeepSeek($inner) => $body,
            $enum::OpenRouter($inner) => $body,
            $enum::Anthropic($inner) => $body,
            $enum::Ollama($inner) => $body,
        }
    };
}

#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(rig::providers::openai::Client),
    DeepSeek(rig::providers::deepseek::Client),
    OpenRouter(rig::providers::openrouter::Client),
    Anthropic(rig::providers::anthropic::Client),
    Ollama(rig::providers::ollama::Client),
}

impl ProviderClient {
    pub fn new(config: &LLMConfig) -> Result<Self> {
        let key = config.api_key.as_str();
        let client = match config.provider {
            LLMProvider::OpenAI => ProviderClient::OpenAI(
                rig::providers::openai::Client::builder(key)
                    .base_url(&config.api_base_url)
                    .build(),
            ),
            LLMProvider::DeepSeek => ProviderClient::DeepSeek(
                rig::providers::deepseek::Client::builder(key)
                    .base_url(&config.api_base_url)
                    .build(),
            ),
            // OpenRouter和Ollama使用各自的默认地址
            LLMProvider::OpenRouter => {
                ProviderClient::OpenRouter(rig::providers::openrouter::Client::builder(key).build())
            }
            LLMProvider::Anthropic => ProviderClient::Anthropic(
                rig::providers::anthropic::ClientBuilder::new(key).build()?,
            ),
            LLMProvider::Ollama => {
                ProviderClient::Ollama(rig::providers::ollama::Client::builder().build())
            }
        };
        Ok(client)
    }

    pub fn create_agent(&self, model: &str, system_prompt: &str, config: &LLMConfig) -> ProviderAgent {
        let max_tokens = u64::from(config.max_tokens);
        match self {
            ProviderClient::OpenAI(client) => ProviderAgent::OpenAI(
                client
                    .completion_model(model)
                    .completions_api()
                    .into_agent_builder()
                    .preamble(system_prompt)
                    .max_tokens(max_tokens)
                    .temperature(config.temperature)
                    .build(),
            ),
            // deepseek和openrouter不传max_tokens，由服务端决定
            ProviderClient::DeepSeek(client) => ProviderAgent::DeepSeek(
                client
                    .agent(model)
                    .preamble(system_prompt)
                    .temperature(config.temperature)
                    .build(),
            ),
            ProviderClient::OpenRouter(client) => ProviderAgent::OpenRouter(
                client
                    .agent(model)
                    .preamble(system_prompt)
                    .temperature(config.temperature)
                    .build(),
            ),
            ProviderClient::Anthropic(client) => ProviderAgent::Anthropic(
                client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(max_tokens)
                    .temperature(config.temperature)
                    .build(),
            ),
            ProviderClient::Ollama(client) => ProviderAgent::Ollama(
                client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(max_tokens)
                    .temperature(config.temperature)
                    .build(),
            ),
        }
    }

    pub fn create_extractor<T>(
        &self,
        model: &str,
        system_prompt: &str,
        config: &LLMConfig,
    ) -> ProviderExtractor<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let max_tokens = u64::from(config.max_tokens);
        macro_rules! extractor {
            ($variant:ident, $client:expr) => {
                ProviderExtractor::$variant(
                    $client
                        .extractor::<T>(model)
                        .preamble(system_prompt)
                        .max_tokens(max_tokens)
                        .build(),
                )
            };
        }
        match self {
            ProviderClient::OpenAI(client) => ProviderExtractor::OpenAI(
                client
                    .extractor_completions_api::<T>(model)
                    .preamble(system_prompt)
                    .max_tokens(max_tokens)
                    .build(),
            ),
            ProviderClient::DeepSeek(client) => extractor!(DeepSeek, client),
            ProviderClient::OpenRouter(client) => extractor!(OpenRouter, client),
            ProviderClient::Anthropic(client) => extractor!(Anthropic, client),
            ProviderClient::Ollama(client) => extractor!(Ollama, client),
        }
    }
}

fn map_prompt_error(err: PromptError) -> ResearchError {
    ResearchError::model_call(err.to_string())
}

/// 传输层失败可重试，解析失败归为结构化输出错误
fn map_extraction_error(err: ExtractionError) -> ResearchError {
    match err {
        ExtractionError::CompletionError(e) => ResearchError::model_call(e.to_string()),
        other => ResearchError::structured_output(other.to_string()),
    }
}

pub enum ProviderAgent {
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    DeepSeek(Agent<rig::providers::deepseek::CompletionModel>),
    OpenRouter(Agent<rig::providers::openrouter::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
    Ollama(Agent<rig::providers::ollama::CompletionModel<reqwest::Client>>),
}

impl ProviderAgent {
    pub async fn prompt(&self, prompt: &str) -> Result<String, ResearchError> {
        for_each_provider!(self, ProviderAgent, agent => {
            agent.prompt(prompt).await.map_err(map_prompt_error)
        })
    }
}

pub enum ProviderExtractor<T>
where
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
{
    OpenAI(Extractor<rig::providers::openai::CompletionModel, T>),
    DeepSeek(Extractor<rig::providers::deepseek::CompletionModel, T>),
    OpenRouter(Extractor<rig::providers::openrouter::CompletionModel, T>),
    Anthropic(Extractor<rig::providers::anthropic::completion::CompletionModel, T>),
    Ollama(Extractor<rig::providers::ollama::CompletionModel<reqwest::Client>, T>),
}

impl<T> ProviderExtractor<T>
where
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
{
    pub async fn extract(&self, prompt: &str) -> Result<T, ResearchError> {
        for_each_provider!(self, ProviderExtractor, extractor => {
            extractor.extract(prompt).await.map_err(map_extraction_error)
        })
    }
}
