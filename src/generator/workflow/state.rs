use serde::{Deserialize, Serialize};

use crate::types::Analyst;

/// 工作流阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    /// 生成（或重新生成）分析师
    Generating,
    /// 挂起，等待人工审核
    AwaitingFeedback,
    /// 并发访谈
    FanningOut,
    /// 撰写正文、引言、结论并组装
    Reducing,
    Done,
}

impl std::fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WorkflowPhase::Generating => "generating",
            WorkflowPhase::AwaitingFeedback => "awaiting_feedback",
            WorkflowPhase::FanningOut => "fanning_out",
            WorkflowPhase::Reducing => "reducing",
            WorkflowPhase::Done => "done",
        };
        f.pad(name)
    }
}

/// 访谈产出的备忘录集合，只能追加
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sections(Vec<String>);

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并一批备忘录
    pub fn merge<I>(&mut self, memos: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.0.extend(memos);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 归约步骤使用的上下文
    pub fn as_context(&self) -> String {
        self.0.join("\n\n")
    }
}

/// 一次调研的完整状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchState {
    pub topic: String,
    pub max_analysts: usize,
    #[serde(default)]
    pub human_feedback: Option<String>,
    #[serde(default)]
    pub analysts: Vec<Analyst>,
    /// 分析师小组的版本号，每次重新生成加一
    #[serde(default)]
    pub panel_revision: u32,
    #[serde(default)]
    pub sections: Sections,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub final_report: Option<String>,
}

impl ResearchState {
    pub fn new(topic: impl Into<String>, max_analysts: usize) -> Self {
        Self {
            topic: topic.into(),
            max_analysts,
            human_feedback: None,
            analysts: Vec::new(),
            panel_revision: 0,
            sections: Sections::new(),
            introduction: String::new(),
            content: String::new(),
            conclusion: String::new(),
            final_report: None,
        }
    }
}

/// `start` / `resume` 的返回
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    /// 已挂起，等待对分析师小组的反馈
    AwaitingFeedback {
        thread_id: String,
        analysts: Vec<Analyst>,
        revision: u32,
    },
    Completed {
        thread_id: String,
        final_report: String,
    },
}

impl RunStatus {
    pub fn thread_id(&self) -> &str {
        match self {
            RunStatus::AwaitingFeedback { thread_id, .. } => thread_id,
            RunStatus::Completed { thread_id, .. } => thread_id,
        }
    }
}
