use serde::{Deserialize, Serialize};

use crate::types::analyst::Analyst;

/// 访谈轮次的发言方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// 分析师提问
    Question,
    /// 专家回答
    Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn question(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Question,
            content: content.into(),
        }
    }

    pub fn answer(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Answer,
            content: content.into(),
        }
    }
}

/// 访谈记录，只追加不修改
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// 专家回答的轮数
    pub fn answer_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|turn| turn.role == TurnRole::Answer)
            .count()
    }

    /// 渲染为对话文本，作为下一次模型调用的上下文
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|turn| match turn.role {
                TurnRole::Question => format!("Analyst: {}", turn.content),
                TurnRole::Answer => format!("Expert: {}", turn.content),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// 单次访谈的输入
#[derive(Debug, Clone)]
pub struct InterviewRequest {
    pub topic: String,
    pub analyst: Analyst,
    pub opening: Turn,
}

impl InterviewRequest {
    pub fn new(topic: &str, analyst: Analyst) -> Self {
        Self {
            topic: topic.to_string(),
            analyst,
            opening: Turn::question(format!(
                "So you said you were writing an article on {}?",
                topic
            )),
        }
    }
}

/// 单次访谈的产出：完整记录 + 一份备忘录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewOutcome {
    pub transcript: Transcript,
    pub memo: String,
}
