//! 报告归约：正文、引言、结论，以及最终组装

use crate::error::Result;
use crate::generator::prompts::{REPORT_USER_PROMPT, bookend_instructions, report_writer_instructions};
use crate::llm::LanguageModel;

pub mod finalize;
pub mod sources;

pub use finalize::{SEP, finalize_report};

/// 报告首尾两部分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bookend {
    Introduction,
    Conclusion,
}

impl Bookend {
    fn instruction(&self) -> &'static str {
        match self {
            Bookend::Introduction => "Write the report introduction",
            Bookend::Conclusion => "Write the report conclusion",
        }
    }
}

/// 根据全部备忘录撰写报告正文，输出不做处理
pub async fn write_report<M: LanguageModel>(model: &M, topic: &str, sections_context: &str) -> Result<String> {
    let system_prompt = report_writer_instructions(topic, sections_context);
    model.prompt(&system_prompt, REPORT_USER_PROMPT).await
}

pub async fn write_bookend<M: LanguageModel>(
    model: &M,
    topic: &str,
    sections_context: &str,
    bookend: Bookend,
) -> Result<String> {
    let system_prompt = bookend_instructions(topic, sections_context);
    model.prompt(&system_prompt, bookend.instruction()).await
}
