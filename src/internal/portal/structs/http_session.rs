use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, Response};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::internal::local_file::functions::sanitize_name::sanitize_name;
use crate::internal::portal::functions::download_name::{
    content_disposition_filename, name_from_url,
};
use crate::internal::portal::functions::parse_page::parse_page;
use crate::internal::portal::structs::page::Page;
use crate::internal::portal::structs::session_error::SessionError;
use crate::internal::portal::traits::portal_session::PortalSession;

/// 后台进行中的一次下载
struct Transfer {
    handle: JoinHandle<()>,
    partial_path: PathBuf,
}

/// 已登录的 HTTP 会话，下载目录在创建时确定
pub struct HttpSession {
    client: Client,
    download_dir: PathBuf,
    partial_suffix: String,
    transfers: Vec<Transfer>,
}

impl HttpSession {
    pub(crate) fn new(client: Client, download_dir: PathBuf, partial_suffix: &str) -> Self {
        Self {
            client,
            download_dir,
            partial_suffix: partial_suffix.to_string(),
            transfers: Vec::new(),
        }
    }

    /// 服务器给出的文件名，只用于日志
    fn served_name(resp: &Response) -> Option<String> {
        resp.headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(content_disposition_filename)
            .or_else(|| name_from_url(resp.url()))
    }

    /// 中止未完成的下载，返回需要删除的临时文件
    fn abort_unfinished(&mut self) -> Vec<PathBuf> {
        self.transfers
            .drain(..)
            .filter(|transfer| !transfer.handle.is_finished())
            .map(|transfer| {
                transfer.handle.abort();
                transfer.partial_path
            })
            .collect()
    }
}

async fn write_body(resp: Response, mut file: File) -> Result<(), SessionError> {
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;
    Ok(())
}

#[async_trait]
impl PortalSession for HttpSession {
    fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    async fn navigate(&mut self, url: &str) -> Result<Page, SessionError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SessionError::Status(status.as_u16()));
        }
        let final_url = resp.url().clone();
        let html = resp.text().await?;
        Ok(parse_page(final_url, &html))
    }

    async fn trigger_download(&mut self, url: &str, name: &str) -> Result<(), SessionError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SessionError::Status(status.as_u16()));
        }

        let name = sanitize_name(name)
            .ok_or_else(|| SessionError::ElementNotFound("下载文件名".to_string()))?;
        if let Some(served) = Self::served_name(&resp).filter(|served| *served != name) {
            debug!(name = %name, served = %served, "服务器文件名与列表不同，按列表名保存");
        }
        let final_path = self.download_dir.join(&name);
        let partial_path = self
            .download_dir
            .join(format!("{}{}", name, self.partial_suffix));

        // 临时文件在返回前创建好，调用方据此判断下载已开始
        let file = File::create(&partial_path).await?;
        debug!(name = %name, "开始写入");

        let task_partial = partial_path.clone();
        let handle = tokio::spawn(async move {
            match write_body(resp, file).await {
                Ok(()) => {
                    if let Err(err) = tokio::fs::rename(&task_partial, &final_path).await {
                        warn!("重命名 {} 失败: {}", task_partial.display(), err);
                    }
                }
                Err(err) => {
                    warn!("下载 {} 中断: {}", final_path.display(), err);
                    let _ = tokio::fs::remove_file(&task_partial).await;
                }
            }
        });

        self.transfers.retain(|t| !t.handle.is_finished());
        self.transfers.push(Transfer {
            handle,
            partial_path,
        });
        Ok(())
    }

    async fn close(self: Box<Self>) {
        let mut session = self;
        for partial in session.abort_unfinished() {
            let _ = tokio::fs::remove_file(&partial).await;
        }
    }
}

impl Drop for HttpSession {
    fn drop(&mut self) {
        // 未经 close 直接丢弃时没有运行时可等待，只能同步删除
        for partial in self.abort_unfinished() {
            let _ = std::fs::remove_file(&partial);
        }
    }
}
