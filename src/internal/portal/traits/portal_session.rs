//! 门户会话相关 trait：同步引擎与具体浏览器驱动之间的接缝。

use std::path::Path;

use async_trait::async_trait;

use crate::internal::portal::structs::page::Page;
use crate::internal::portal::structs::session_error::SessionError;

/// 一个已登录的门户会话
///
/// 会话在创建时绑定下载目录，之后不可更改：
/// 需要下载到别的目录时，必须关闭当前会话并重新打开一个。
#[async_trait]
pub trait PortalSession: Send {
    /// 该会话触发的下载会落到的目录
    fn download_dir(&self) -> &Path;

    /// 打开页面并返回渲染后的快照
    async fn navigate(&mut self, url: &str) -> Result<Page, SessionError>;

    /// 访问下载地址，触发下载；不等待下载完成
    ///
    /// 文件保存为 `download_dir()/name`，下载期间为 `name` 加临时后缀。
    /// `name` 即文件列表中的显示名，下次同步时按它判断文件是否已存在。
    async fn trigger_download(&mut self, url: &str, name: &str) -> Result<(), SessionError>;

    /// 释放会话
    async fn close(self: Box<Self>);
}

/// 会话提供者：每次调用都会打开一个新的、已登录的会话
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// `download_dir` 为 `None` 时使用进程默认下载目录
    async fn open(
        &self,
        download_dir: Option<&Path>,
    ) -> Result<Box<dyn PortalSession>, SessionError>;
}
