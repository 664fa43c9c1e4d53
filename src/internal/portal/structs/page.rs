use std::collections::HashSet;

use url::Url;

/// 页面中的一个 `<a>` 链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// 页面上原样的 href（未解析）
    pub raw_href: String,
    /// 相对页面地址解析后的绝对地址；解析失败时与 raw_href 相同
    pub href: String,
    /// 链接文字，连续空白已合并
    pub text: String,
    /// 从外到内包住该链接的标签名（小写）
    pub enclosing_tags: Vec<String>,
    /// 包住该链接的元素上出现过的 id
    pub container_ids: Vec<String>,
}

impl Anchor {
    /// `#`、`javascript:` 之类不指向任何资源的占位链接
    pub fn is_placeholder(&self) -> bool {
        let raw = self.raw_href.trim();
        raw.is_empty()
            || raw.starts_with('#')
            || raw.to_ascii_lowercase().starts_with("javascript:")
    }

    pub fn is_enclosed_by(&self, tag: &str) -> bool {
        self.enclosing_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn is_inside(&self, container_id: &str) -> bool {
        self.container_ids.iter().any(|id| id == container_id)
    }
}

/// 页面中的一个 `<input>`，登录表单使用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub value: String,
    pub input_type: String,
}

/// 渲染后的页面快照：只保留同步需要的链接、输入框和元素 id
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub anchors: Vec<Anchor>,
    pub inputs: Vec<FormInput>,
    pub element_ids: HashSet<String>,
}

impl Page {
    pub fn empty(url: Url) -> Self {
        Self {
            url,
            anchors: Vec::new(),
            inputs: Vec::new(),
            element_ids: HashSet::new(),
        }
    }

    pub fn has_element(&self, id: &str) -> bool {
        self.element_ids.contains(id)
    }

    /// 指定容器内的链接，保持页面顺序
    pub fn links_in<'a>(
        &'a self,
        container_id: &'a str,
    ) -> impl Iterator<Item = &'a Anchor> + 'a {
        self.anchors.iter().filter(move |a| a.is_inside(container_id))
    }

    /// 被指定标签包住的链接，保持页面顺序
    pub fn links_enclosed_by<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a Anchor> + 'a {
        self.anchors.iter().filter(move |a| a.is_enclosed_by(tag))
    }

    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|i| i.name == name)
    }

    pub fn hidden_inputs(&self) -> impl Iterator<Item = &FormInput> {
        self.inputs
            .iter()
            .filter(|i| i.input_type.eq_ignore_ascii_case("hidden"))
    }
}
