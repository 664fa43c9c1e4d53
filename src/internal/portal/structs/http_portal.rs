use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::internal::auth::structs::portal_credentials::PortalCredentials;
use crate::internal::portal::functions::download_name::default_download_dir;
use crate::internal::portal::functions::parse_page::parse_page;
use crate::internal::portal::structs::http_session::HttpSession;
use crate::internal::portal::structs::page::Page;
use crate::internal::portal::structs::session_error::SessionError;
use crate::internal::portal::traits::portal_session::{PortalSession, SessionFactory};

/// 登录表单字段名，默认值对应 ASP.NET 门户的登录页
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username_field: String,
    pub password_field: String,
    pub submit_field: String,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username_field: "ctl00$ctl00$ContentPlaceHolder1$userid".to_string(),
            password_field: "ctl00$ctl00$ContentPlaceHolder1$password".to_string(),
            submit_field: "ctl00$ctl00$ContentPlaceHolder1$btnSignIn".to_string(),
        }
    }
}

/// 基于 HTTP 的门户会话提供者
///
/// 每次 `open` 都创建独立的 cookie 存储并重新登录，会话之间互不影响。
/// 下载行为模拟浏览器：先写临时文件，完成后改名。
#[derive(Debug, Clone)]
pub struct HttpPortal {
    credentials: PortalCredentials,
    login_form: LoginForm,
    partial_suffix: String,
    default_dir: PathBuf,
}

impl HttpPortal {
    pub fn new(credentials: PortalCredentials, partial_suffix: &str) -> Self {
        Self {
            credentials,
            login_form: LoginForm::default(),
            partial_suffix: partial_suffix.to_string(),
            default_dir: default_download_dir(),
        }
    }

    pub fn with_login_form(mut self, login_form: LoginForm) -> Self {
        self.login_form = login_form;
        self
    }

    pub fn with_default_dir(mut self, dir: &Path) -> Self {
        self.default_dir = dir.to_path_buf();
        self
    }

    pub fn landing_url(&self) -> &str {
        self.credentials.base_url.as_str()
    }

    async fn fetch(request: reqwest::RequestBuilder) -> Result<Page, SessionError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SessionError::Status(status.as_u16()));
        }
        let url = resp.url().clone();
        let html = resp.text().await?;
        Ok(parse_page(url, &html))
    }

    /// 提交登录表单；登录后页面仍有密码输入框即视为失败
    async fn login(&self, client: &Client) -> Result<Page, SessionError> {
        let base = self.credentials.base_url.as_ref().clone();
        let login_page = Self::fetch(client.get(base)).await?;

        let form = &self.login_form;
        if !login_page.has_input(&form.password_field) {
            return Err(SessionError::Auth(format!(
                "登录页中找不到输入框 {}",
                form.password_field
            )));
        }

        let mut fields: Vec<(String, String)> = login_page
            .hidden_inputs()
            .map(|i| (i.name.clone(), i.value.clone()))
            .collect();
        fields.push((form.username_field.clone(), self.credentials.username().to_string()));
        fields.push((form.password_field.clone(), self.credentials.password.to_string()));
        if let Some(submit) = login_page.inputs.iter().find(|i| i.name == form.submit_field) {
            fields.push((submit.name.clone(), submit.value.clone()));
        }

        let landing = Self::fetch(client.post(login_page.url.clone()).form(&fields)).await?;
        if landing.has_input(&form.password_field) {
            return Err(SessionError::Auth("账号或密码错误".to_string()));
        }

        debug!(user = %self.credentials.username(), "登录成功");
        Ok(landing)
    }
}

#[async_trait]
impl SessionFactory for HttpPortal {
    async fn open(
        &self,
        download_dir: Option<&Path>,
    ) -> Result<Box<dyn PortalSession>, SessionError> {
        let dir = download_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_dir.clone());
        tokio::fs::create_dir_all(&dir).await?;

        let client = Client::builder().cookie_store(true).build()?;
        self.login(&client).await?;

        Ok(Box::new(HttpSession::new(client, dir, &self.partial_suffix)))
    }
}
