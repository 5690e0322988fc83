//! 访谈子流程：分析师与专家多轮问答，再整理成带引用的备忘录

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::generator::prompts::{
    EXPERT_INSTRUCTIONS, INTERVIEW_CLOSING, SECTION_WRITER_INSTRUCTIONS, question_instructions,
};
use crate::llm::LanguageModel;
use crate::types::{InterviewOutcome, InterviewRequest, Transcript, Turn};

/// 访谈执行者，研究工作流只依赖这个契约
#[async_trait]
pub trait InterviewRunner: Send + Sync {
    async fn conduct(&self, request: InterviewRequest) -> Result<InterviewOutcome>;
}

/// 基于模型的访谈实现
pub struct ExpertInterview<M: LanguageModel> {
    model: Arc<M>,
    max_turns: usize,
}

impl<M: LanguageModel> ExpertInterview<M> {
    pub fn new(model: Arc<M>, max_turns: usize) -> Self {
        Self { model, max_turns }
    }

    async fn ask_question(&self, request: &InterviewRequest, transcript: &Transcript) -> Result<String> {
        let system_prompt = question_instructions(&request.analyst);
        let user_prompt = format!(
            "Conversation so far:\n\n{}\n\nAsk your next question.",
            transcript.render()
        );
        self.model.prompt(&system_prompt, &user_prompt).await
    }

    async fn answer_question(&self, request: &InterviewRequest, transcript: &Transcript) -> Result<String> {
        let user_prompt = format!(
            "Topic: {}\n\nConversation so far:\n\n{}\n\nAnswer the last question.",
            request.topic,
            transcript.render()
        );
        self.model.prompt(EXPERT_INSTRUCTIONS, &user_prompt).await
    }

    async fn write_section(&self, request: &InterviewRequest, transcript: &Transcript) -> Result<String> {
        let user_prompt = format!(
            "Focus area of the analyst: {}\n\nInterview transcript:\n\n{}",
            request.analyst.description,
            transcript.render()
        );
        self.model.prompt(SECTION_WRITER_INSTRUCTIONS, &user_prompt).await
    }
}

#[async_trait]
impl<M: LanguageModel> InterviewRunner for ExpertInterview<M> {
    async fn conduct(&self, request: InterviewRequest) -> Result<InterviewOutcome> {
        let mut transcript = Transcript::new();
        transcript.push(request.opening.clone());

        // 开场问题直接交给专家回答
        let answer = self.answer_question(&request, &transcript).await?;
        transcript.push(Turn::answer(answer));

        while transcript.answer_count() < self.max_turns.max(1) {
            let question = self.ask_question(&request, &transcript).await?;
            let finished = question.contains(INTERVIEW_CLOSING);
            transcript.push(Turn::question(question));
            if finished {
                tracing::debug!(analyst = %request.analyst.name, "analyst closed the interview");
                break;
            }

            let answer = self.answer_question(&request, &transcript).await?;
            transcript.push(Turn::answer(answer));
        }

        let memo = self.write_section(&request, &transcript).await?;
        tracing::info!(
            analyst = %request.analyst.name,
            turns = transcript.len(),
            "interview finished"
        );
        Ok(InterviewOutcome { transcript, memo })
    }
}
