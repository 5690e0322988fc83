use crate::config::{Config, InterviewFailurePolicy, LLMProvider};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Panel Research - 由分析师小组、专家访谈与人工审核驱动的调研报告生成器
#[derive(Parser, Debug)]
#[command(name = "panel-research")]
#[command(
    about = "Generates research reports by interviewing a panel of AI analysts, with a human review step before the interviews start."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 报告输出目录
    #[arg(short, long, global = true)]
    pub output_path: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// LLM Provider (openai, deepseek, openrouter, anthropic, ollama)
    #[arg(long, global = true)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long, global = true)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long, global = true)]
    pub llm_api_base_url: Option<String>,

    /// 高能效模型，用于常规调用
    #[arg(long, global = true)]
    pub model_efficient: Option<String>,

    /// 高质量模型，用于长上下文调用，以及efficient失效情况下的兜底
    #[arg(long, global = true)]
    pub model_powerful: Option<String>,

    /// 温度参数
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// 并发访谈数量上限
    #[arg(long, global = true)]
    pub max_parallels: Option<usize>,

    /// 访谈失败处理策略 (partial, fail_fast)
    #[arg(long, global = true)]
    pub interview_failure: Option<String>,

    /// 是否禁用缓存
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// 检查点目录
    #[arg(long, global = true)]
    pub checkpoint_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 开始新的调研，生成分析师小组后等待审核
    Start {
        topic: String,

        /// 分析师数量上限
        #[arg(short = 'n', long)]
        max_analysts: Option<usize>,
    },
    /// 提交反馈；不带反馈表示接受当前分析师小组
    Resume {
        thread_id: String,

        #[arg(short, long)]
        feedback: Option<String>,
    },
    /// 查看调研报告
    Result { thread_id: String },
    /// 列出所有调研线程
    Threads,
    /// 交互式完成一次调研
    Run {
        topic: String,

        #[arg(short = 'n', long)]
        max_analysts: Option<usize>,
    },
}

impl Args {
    /// 将CLI参数转换为配置，命令行参数覆盖配置文件
    pub fn to_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(output_path) = &self.output_path {
            config.output_path = output_path.clone();
        }

        if let Some(provider_str) = &self.llm_provider {
            config.llm.provider = provider_str
                .parse::<LLMProvider>()
                .map_err(anyhow::Error::msg)
                .context("Invalid --llm-provider")?;
        }
        if let Some(llm_api_base_url) = &self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url.clone();
        }
        if let Some(llm_api_key) = &self.llm_api_key {
            config.llm.api_key = llm_api_key.clone();
        }
        if let Some(model_efficient) = &self.model_efficient {
            config.llm.model_efficient = model_efficient.clone();
        }
        if let Some(model_powerful) = &self.model_powerful {
            config.llm.model_powerful = model_powerful.clone();
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        if let Some(max_parallels) = self.max_parallels {
            config.workflow.max_parallels = max_parallels;
        }
        if let Some(policy_str) = &self.interview_failure {
            config.workflow.interview_failure = policy_str
                .parse::<InterviewFailurePolicy>()
                .map_err(anyhow::Error::msg)
                .context("Invalid --interview-failure")?;
        }

        if self.no_cache {
            config.cache.enabled = false;
        }
        if let Some(checkpoint_dir) = &self.checkpoint_dir {
            config.checkpoint.dir = checkpoint_dir.clone();
        }
        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }
}

#[cfg(test)]
mod tests;
