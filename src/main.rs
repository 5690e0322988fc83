use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, prelude::*};

use panel_research::checkpoint;
use panel_research::cli::{Args, Command};
use panel_research::config::Config;
use panel_research::generator::interview::ExpertInterview;
use panel_research::generator::workflow::{ResearchWorkflow, RunStatus};
use panel_research::llm::LLMClient;
use panel_research::outlet::save_report;
use panel_research::types::Analyst;

type Workflow = ResearchWorkflow<LLMClient>;

fn init_tracing(verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        EnvFilter::try_new("warn,panel_research=debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn,panel_research=info"))?
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();
    Ok(())
}

fn print_panel(analysts: &[Analyst], revision: u32) {
    println!("\n👥 分析师小组（第{}版）：", revision + 1);
    for (index, analyst) in analysts.iter().enumerate() {
        println!("{}. {} - {} @ {}", index + 1, analyst.name, analyst.role, analyst.affiliation);
        println!("   {}", analyst.description);
    }
}

/// 输出挂起或完成的状态，完成时把报告写入输出目录
async fn report_status(config: &Config, status: &RunStatus) -> Result<()> {
    match status {
        RunStatus::AwaitingFeedback {
            thread_id,
            analysts,
            revision,
        } => {
            print_panel(analysts, *revision);
            println!("\n🧵 线程: {}", thread_id);
            println!("💡 接受: panel-research resume {}", thread_id);
            println!("💡 修改: panel-research resume {} -f \"<反馈>\"", thread_id);
        }
        RunStatus::Completed {
            thread_id,
            final_report,
        } => {
            let path = save_report(&config.output_path, thread_id, final_report).await?;
            println!("\n💾 报告已保存: {}", path.display());
        }
    }
    Ok(())
}

/// 交互式运行：展示分析师小组，读取反馈，直到接受为止
async fn run_interactive(config: &Config, workflow: &Workflow, topic: &str, max_analysts: usize) -> Result<()> {
    let mut status = workflow.start(topic, max_analysts).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let RunStatus::AwaitingFeedback {
        thread_id,
        analysts,
        revision,
    } = &status
    {
        print_panel(analysts, *revision);
        println!("\n✏️ 输入反馈以重新生成分析师，直接回车接受：");
        let feedback = lines.next_line().await.context("Failed to read feedback")?;
        status = workflow.resume(thread_id, feedback).await?;
    }

    report_status(config, &status).await?;
    if let RunStatus::Completed { final_report, .. } = &status {
        println!("\n{}", final_report);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = args.to_config()?;
    init_tracing(config.verbose)?;

    let llm_client = Arc::new(LLMClient::new(&config)?);
    let interviewer = Arc::new(ExpertInterview::new(
        llm_client.clone(),
        config.workflow.max_interview_turns,
    ));
    let store = checkpoint::from_config(&config.checkpoint);
    let workflow = ResearchWorkflow::new(llm_client.clone(), interviewer, store, config.workflow.clone());

    match args.command {
        Command::Start { topic, max_analysts } => {
            llm_client.check_connection().await?;
            let max_analysts = max_analysts.unwrap_or(config.workflow.max_analysts);
            let status = workflow.start(&topic, max_analysts).await?;
            report_status(&config, &status).await?;
        }
        Command::Resume {
            thread_id,
            feedback,
        } => {
            llm_client.check_connection().await?;
            let status = workflow.resume(&thread_id, feedback).await?;
            report_status(&config, &status).await?;
        }
        Command::Result { thread_id } => match workflow.get_result(&thread_id).await? {
            Some(report) => println!("{}", report),
            None => println!("⏳ 线程 {} 尚未完成", thread_id),
        },
        Command::Threads => {
            for thread_id in workflow.threads().await? {
                let snapshot = workflow.snapshot(&thread_id).await?;
                println!(
                    "{}  {:<18} {}  {}",
                    thread_id,
                    snapshot.phase,
                    snapshot.updated_at.format("%Y-%m-%d %H:%M"),
                    snapshot.state.topic
                );
            }
        }
        Command::Run { topic, max_analysts } => {
            llm_client.check_connection().await?;
            let max_analysts = max_analysts.unwrap_or(config.workflow.max_analysts);
            run_interactive(&config, &workflow, &topic, max_analysts).await?;
        }
    }

    Ok(())
}
