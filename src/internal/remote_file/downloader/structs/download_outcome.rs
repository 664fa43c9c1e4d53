/// 单个文件的下载结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// 目标文件已出现在下载目录
    Succeeded,
    /// 浏览器安全拦截：没有出现下载中的临时文件，目标文件也不存在
    Blocked,
    /// 临时文件出现了，但在限定时间内没有完成
    TimedOut,
    /// 触发下载本身就失败了（网络错误等），与被拦截区分开
    Failed(String),
    /// 同步被取消时尚未完成
    Cancelled,
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Succeeded)
    }

    /// 需要用户关注、影响退出码的结果
    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            DownloadOutcome::Blocked
                | DownloadOutcome::TimedOut
                | DownloadOutcome::Failed(_)
        )
    }
}

/// 一个文件的下载报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub name: String,
    pub url: String,
    pub outcome: DownloadOutcome,
}
