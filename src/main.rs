use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use portal_mirror::config::SyncConfig;
use portal_mirror::states::ProgressState;
use portal_mirror::sync::{EXIT_FATAL, SyncReport};
use portal_mirror::sync_portal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// 把学习门户上的课程文件同步到本地目录，只下载本地还没有的文件
#[derive(Parser)]
#[command(name = "portal-mirror")]
#[command(version, about)]
struct Cli {
    /// 配置文件路径（dotenv 格式），默认读取当前目录的 portal_mirror.env
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// 只同步指定课程，可重复；不指定时同步全部课程
    #[arg(long = "module", short = 'm', value_name = "ID")]
    modules: Vec<String>,

    /// 同时同步的课程数
    #[arg(long)]
    workers: Option<usize>,

    /// 单个文件的最长等待时间（秒）
    #[arg(long)]
    timeout: Option<u64>,

    /// 输出调试日志
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_summary(report: &SyncReport) {
    for branch in &report.branches {
        if let Some(err) = &branch.error {
            warn!("{}: 中止（{}）", branch.id, err);
        }
        for file in branch.files.iter().filter(|f| f.outcome.is_problem()) {
            warn!("{}: {} -> {:?}", branch.id, file.name, file.outcome);
        }
    }

    let elapsed = report.finished_at - report.started_at;
    info!(
        "同步结束：{} 门课程，下载 {} 个文件，用时 {} 秒",
        report.branches.len(),
        report.downloaded(),
        elapsed.num_seconds()
    );
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match SyncConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return ExitCode::from(EXIT_FATAL as u8);
        }
    };
    if let Some(workers) = cli.workers {
        config.branch_workers = workers.max(1);
    }
    if let Some(timeout) = cli.timeout {
        config.download_timeout_secs = timeout;
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("收到中断信号，正在结束当前下载");
            ctrl_c.cancel();
        }
    });

    let selection = (!cli.modules.is_empty()).then_some(cli.modules.as_slice());
    let progress = ProgressState::new();

    match sync_portal(&config, selection, cancel, progress.clone()).await {
        Ok(report) => {
            print_summary(&report);
            let current = progress.get_current();
            if current.has_problems() {
                warn!(
                    "被拦截 {} 个，超时 {} 个，失败 {} 个",
                    current.blocked, current.timed_out, current.failed
                );
            }
            ExitCode::from(report.exit_code() as u8)
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::from(EXIT_FATAL as u8)
        }
    }
}
