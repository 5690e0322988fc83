use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 分析师人设
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Analyst {
    /// Name of the analyst.
    pub name: String,
    /// Primary affiliation of the analyst.
    pub affiliation: String,
    /// Role of the analyst in the context of the topic.
    pub role: String,
    /// Description of the analyst focus, concerns, and motives.
    pub description: String,
}

impl Analyst {
    pub fn new(
        name: impl Into<String>,
        affiliation: impl Into<String>,
        role: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            affiliation: affiliation.into(),
            role: role.into(),
            description: description.into(),
        }
    }

    /// 用于prompt的人设描述
    pub fn persona(&self) -> String {
        format!(
            "Name: {}\nRole: {}\nAffiliation: {}\nDescription: {}\n",
            self.name, self.role, self.affiliation, self.description
        )
    }

    /// 返回第一个为空的字段名
    pub fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("affiliation", &self.affiliation),
            ("role", &self.role),
            ("description", &self.description),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// 模型结构化输出的分析师列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Perspectives {
    /// Comprehensive list of analysts with their roles and affiliations.
    pub analysts: Vec<Analyst>,
}
