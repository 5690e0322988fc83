//! 调研工作流：显式持久化的状态机
//!
//! 阶段：`Generating` → `AwaitingFeedback` →（`Generating` | `FanningOut`）→ `Reducing` → `Done`。
//! 每次阶段迁移后都会保存检查点，挂起之后可以在另一个进程中通过 `resume` 继续。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::checkpoint::{Checkpoint, CheckpointStore};
use crate::config::{InterviewFailurePolicy, WorkflowConfig};
use crate::error::{ResearchError, Result};
use crate::generator::analysts::create_analysts;
use crate::generator::interview::InterviewRunner;
use crate::generator::report::{Bookend, finalize_report, write_bookend, write_report};
use crate::generator::review::{GateDecision, normalize_feedback, route};
use crate::llm::LanguageModel;
use crate::types::InterviewRequest;
use crate::utils::threads::do_parallel_with_limit;

pub mod state;

pub use state::{ResearchState, RunStatus, Sections, WorkflowPhase};

pub struct ResearchWorkflow<M: LanguageModel> {
    model: Arc<M>,
    interviewer: Arc<dyn InterviewRunner>,
    store: Arc<dyn CheckpointStore>,
    settings: WorkflowConfig,
    /// 每个线程一把锁，同一线程上的 `resume` 依次执行
    thread_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<M: LanguageModel> ResearchWorkflow<M> {
    pub fn new(
        model: Arc<M>,
        interviewer: Arc<dyn InterviewRunner>,
        store: Arc<dyn CheckpointStore>,
        settings: WorkflowConfig,
    ) -> Self {
        Self {
            model,
            interviewer,
            store,
            settings,
            thread_locks: Mutex::new(HashMap::new()),
        }
    }

    async fn lock_thread(&self, thread_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .thread_locks
            .lock()
            .await
            .entry(thread_id.to_string())
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    /// 开始新的调研线程，生成第一版分析师后挂起
    pub async fn start(&self, topic: &str, max_analysts: usize) -> Result<RunStatus> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ResearchError::invalid_input("topic must not be empty"));
        }
        if max_analysts == 0 {
            return Err(ResearchError::invalid_input("max_analysts must be at least 1"));
        }

        let thread_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(thread_id = %thread_id, topic, max_analysts, "starting research thread");

        // 第一版分析师生成成功后才落盘，失败时不留下无主的线程
        let checkpoint = Checkpoint::new(&thread_id, ResearchState::new(topic, max_analysts));
        self.drive(checkpoint).await
    }

    /// 提交对分析师小组的反馈并继续执行
    ///
    /// 空白反馈等同于没有反馈，表示接受当前小组。已完成的线程直接返回保存的报告。
    pub async fn resume(&self, thread_id: &str, feedback: Option<String>) -> Result<RunStatus> {
        let _guard = self.lock_thread(thread_id).await;
        let mut checkpoint = self.load_existing(thread_id).await?;
        let feedback = normalize_feedback(feedback);

        match checkpoint.phase {
            WorkflowPhase::Done => {
                if feedback.is_some() {
                    tracing::warn!(thread_id, "thread already completed, feedback ignored");
                }
                return completed_status(&checkpoint);
            }
            WorkflowPhase::AwaitingFeedback => {
                match route(feedback.as_deref()) {
                    GateDecision::Regenerate => {
                        tracing::info!(thread_id, "feedback received, regenerating analysts");
                        let state = &mut checkpoint.state;
                        state.human_feedback = feedback;
                        state.analysts.clear();
                        state.panel_revision += 1;
                        checkpoint.advance(WorkflowPhase::Generating);
                    }
                    GateDecision::Proceed => {
                        tracing::info!(
                            thread_id,
                            analysts = checkpoint.state.analysts.len(),
                            "analysts accepted"
                        );
                        checkpoint.state.human_feedback = None;
                        checkpoint.advance(WorkflowPhase::FanningOut);
                    }
                }
                self.store.save(&checkpoint).await?;
            }
            phase => {
                if feedback.is_some() {
                    tracing::warn!(thread_id, %phase, "thread is not awaiting feedback, feedback ignored");
                }
                tracing::info!(thread_id, %phase, "continuing interrupted thread");
            }
        }

        self.drive(checkpoint).await
    }

    /// 已完成线程的最终报告，未完成时返回 `None`
    pub async fn get_result(&self, thread_id: &str) -> Result<Option<String>> {
        let checkpoint = self.load_existing(thread_id).await?;
        if checkpoint.phase != WorkflowPhase::Done {
            return Ok(None);
        }
        Ok(checkpoint.state.final_report)
    }

    pub async fn snapshot(&self, thread_id: &str) -> Result<Checkpoint> {
        self.load_existing(thread_id).await
    }

    pub async fn threads(&self) -> Result<Vec<String>> {
        self.store.list().await
    }

    async fn load_existing(&self, thread_id: &str) -> Result<Checkpoint> {
        self.store
            .load(thread_id)
            .await?
            .ok_or_else(|| ResearchError::ThreadNotFound(thread_id.to_string()))
    }

    /// 从当前阶段一直执行到挂起或完成
    async fn drive(&self, mut checkpoint: Checkpoint) -> Result<RunStatus> {
        loop {
            match checkpoint.phase {
                WorkflowPhase::Generating => {
                    let state = &mut checkpoint.state;
                    state.analysts = create_analysts(
                        self.model.as_ref(),
                        &state.topic,
                        state.max_analysts,
                        state.human_feedback.as_deref(),
                    )
                    .await?;
                    checkpoint.advance(WorkflowPhase::AwaitingFeedback);
                    self.store.save(&checkpoint).await?;
                }
                WorkflowPhase::AwaitingFeedback => {
                    return Ok(RunStatus::AwaitingFeedback {
                        thread_id: checkpoint.thread_id,
                        analysts: checkpoint.state.analysts,
                        revision: checkpoint.state.panel_revision,
                    });
                }
                WorkflowPhase::FanningOut => {
                    let memos = self.run_interviews(&checkpoint.state).await?;
                    checkpoint.state.sections.merge(memos);
                    checkpoint.advance(WorkflowPhase::Reducing);
                    self.store.save(&checkpoint).await?;
                }
                WorkflowPhase::Reducing => {
                    self.reduce(&mut checkpoint.state).await?;
                    checkpoint.advance(WorkflowPhase::Done);
                    self.store.save(&checkpoint).await?;
                }
                WorkflowPhase::Done => return completed_status(&checkpoint),
            }
        }
    }

    /// 每个分析师一次访谈，并发执行，返回成功访谈的备忘录
    async fn run_interviews(&self, state: &ResearchState) -> Result<Vec<String>> {
        let total = state.analysts.len();
        if total == 0 {
            return Err(ResearchError::AllInterviewsFailed(0));
        }
        tracing::info!(
            interviews = total,
            max_parallels = self.settings.max_parallels,
            "🚀 starting interviews"
        );

        let interview_futures: Vec<_> = state
            .analysts
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, analyst)| {
                let interviewer = self.interviewer.clone();
                let request = InterviewRequest::new(&state.topic, analyst);
                async move { (index, interviewer.conduct(request).await) }
            })
            .collect();

        let results = do_parallel_with_limit(interview_futures, self.settings.max_parallels).await;

        let mut finished = HashSet::new();
        let mut failures = Vec::new();
        let mut memos = Vec::new();
        for (index, result) in results {
            finished.insert(index);
            let analyst = &state.analysts[index].name;
            match result {
                Ok(outcome) => {
                    tracing::info!(analyst = %analyst, "✅ interview completed");
                    memos.push(outcome.memo);
                }
                Err(e) => failures.push((index, ResearchError::interview(analyst, e))),
            }
        }
        for index in (0..total).filter(|index| !finished.contains(index)) {
            let analyst = &state.analysts[index].name;
            let aborted = ResearchError::TaskAborted("interview task panicked".to_string());
            failures.push((index, ResearchError::interview(analyst, aborted)));
        }
        failures.sort_by_key(|(index, _)| *index);

        if !failures.is_empty() && self.settings.interview_failure == InterviewFailurePolicy::FailFast {
            let (_, first) = failures.remove(0);
            tracing::error!(error = %first, "interview failed, aborting run");
            return Err(first);
        }
        for (_, failure) in &failures {
            tracing::warn!(error = %failure, "⚠️ interview skipped");
        }
        if memos.is_empty() {
            return Err(ResearchError::AllInterviewsFailed(total));
        }
        Ok(memos)
    }

    /// 正文、引言、结论并发撰写，再组装最终报告
    async fn reduce(&self, state: &mut ResearchState) -> Result<()> {
        let context = state.sections.as_context();
        let model = self.model.as_ref();
        let topic = state.topic.as_str();

        let (content, introduction, conclusion) = tokio::try_join!(
            write_report(model, topic, &context),
            write_bookend(model, topic, &context, Bookend::Introduction),
            write_bookend(model, topic, &context, Bookend::Conclusion),
        )?;

        state.final_report = Some(finalize_report(&content, &introduction, &conclusion));
        state.content = content;
        state.introduction = introduction;
        state.conclusion = conclusion;
        Ok(())
    }
}

fn completed_status(checkpoint: &Checkpoint) -> Result<RunStatus> {
    let final_report = checkpoint.state.final_report.clone().ok_or_else(|| {
        ResearchError::checkpoint_error(format!(
            "thread {} is done but has no report",
            checkpoint.thread_id
        ))
    })?;
    Ok(RunStatus::Completed {
        thread_id: checkpoint.thread_id.clone(),
        final_report,
    })
}
