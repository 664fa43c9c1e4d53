//! 门户页面的宽松解析：只抽取链接、输入框和元素 id。
//!
//! 门户页面是 ASP.NET 生成的 HTML，并不保证是合法 XML，所以这里关闭了
//! quick-xml 的结束标签校验，并自行处理 void 元素和未闭合的标签。

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use url::Url;

use crate::internal::portal::structs::page::{Anchor, FormInput, Page};

/// 不会有结束标签的 HTML 元素
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link",
    "meta", "param", "source", "track", "wbr",
];

/// 连续解析错误的上限，超过后放弃剩余内容
const MAX_PARSE_ERRORS: usize = 256;

struct OpenElement {
    name: String,
    id: Option<String>,
}

struct OpenAnchor {
    raw_href: String,
    text: String,
    enclosing_tags: Vec<String>,
    container_ids: Vec<String>,
}

/// 将页面源码解析为 [`Page`]
pub fn parse_page(url: Url, html: &str) -> Page {
    let cleaned = escape_dangling_amps(&strip_raw_blocks(html));

    let mut reader = Reader::from_str(&cleaned);
    {
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.expand_empty_elements = false;
    }

    let base = url.clone();
    let mut page = Page::empty(url);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut anchor: Option<OpenAnchor> = None;
    let mut errors = 0usize;
    let mut last_error_pos = u64::MAX;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = element_name(&e);
                handle_element(&base, &e, &name, &stack, &mut anchor, &mut page);
                if !VOID_ELEMENTS.contains(&name.as_str()) {
                    let id = attribute(&e, "id");
                    if let Some(id) = &id {
                        page.element_ids.insert(id.clone());
                    }
                    stack.push(OpenElement { name, id });
                }
            }
            Ok(Event::Empty(e)) => {
                let name = element_name(&e);
                if let Some(id) = attribute(&e, "id") {
                    page.element_ids.insert(id);
                }
                handle_element(&base, &e, &name, &stack, &mut anchor, &mut page);
                if name == "a" {
                    close_anchor(&base, &mut anchor, &mut page.anchors);
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref())
                    .to_ascii_lowercase();
                if name == "a" {
                    close_anchor(&base, &mut anchor, &mut page.anchors);
                }
                // 只有栈中确实存在同名元素时才出栈，多余的结束标签直接忽略
                if let Some(pos) = stack.iter().rposition(|el| el.name == name) {
                    stack.truncate(pos);
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(open) = anchor.as_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(open) = anchor.as_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Ok(Event::GeneralRef(r)) => {
                if let Some(open) = anchor.as_mut() {
                    let entity = String::from_utf8_lossy(&r).to_string();
                    open.text.push_str(&decode_entity(&entity));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => {
                let pos = reader.buffer_position() as u64;
                errors += 1;
                if errors > MAX_PARSE_ERRORS || pos == last_error_pos {
                    break;
                }
                last_error_pos = pos;
            }
        }
    }

    close_anchor(&base, &mut anchor, &mut page.anchors);
    page
}

fn handle_element(
    base: &Url,
    e: &BytesStart<'_>,
    name: &str,
    stack: &[OpenElement],
    anchor: &mut Option<OpenAnchor>,
    page: &mut Page,
) {
    match name {
        "a" => {
            // 链接不能嵌套，遇到新的 <a> 时先结束上一个
            close_anchor(base, anchor, &mut page.anchors);
            if let Some(raw_href) = attribute(e, "href") {
                *anchor = Some(OpenAnchor {
                    raw_href,
                    text: String::new(),
                    enclosing_tags: stack.iter().map(|el| el.name.clone()).collect(),
                    container_ids: stack.iter().filter_map(|el| el.id.clone()).collect(),
                });
            }
        }
        "input" => {
            if let Some(input_name) = attribute(e, "name") {
                page.inputs.push(FormInput {
                    name: input_name,
                    value: attribute(e, "value").unwrap_or_default(),
                    input_type: attribute(e, "type").unwrap_or_else(|| "text".to_string()),
                });
            }
        }
        _ => {}
    }
}

fn close_anchor(base: &Url, anchor: &mut Option<OpenAnchor>, out: &mut Vec<Anchor>) {
    if let Some(open) = anchor.take() {
        let href = base
            .join(open.raw_href.trim())
            .map(|u| u.to_string())
            .unwrap_or_else(|_| open.raw_href.clone());
        out.push(Anchor {
            raw_href: open.raw_href,
            href,
            text: collapse_whitespace(&open.text),
            enclosing_tags: open.enclosing_tags,
            container_ids: open.container_ids,
        });
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.html_attributes()
        .filter_map(Result::ok)
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(key.as_bytes()))
        .map(|attr| unescape_basic(&String::from_utf8_lossy(&attr.value)))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entity(entity: &str) -> String {
    if let Some(code) = entity.strip_prefix('#') {
        let parsed = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        return parsed
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default();
    }

    match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        _ => "",
    }
    .to_string()
}

/// 属性值里最常见的几个实体，href 中的 `&amp;` 必须还原
fn unescape_basic(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// 去掉注释、`<script>`、`<style>` 块，这些内容里的 `<` 会干扰解析
fn strip_raw_blocks(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let lower = html.to_ascii_lowercase();
    let mut i = 0;

    while i < html.len() {
        let rest = &lower[i..];
        let skip = [
            ("<!--", "-->"),
            ("<script", "</script>"),
            ("<style", "</style>"),
        ]
        .iter()
        .find(|(open, _)| rest.starts_with(open))
        .map(|(_, close)| {
            rest.find(close)
                .map(|end| end + close.len())
                .unwrap_or(rest.len())
        });

        match skip {
            Some(len) => i += len,
            None => {
                let next = rest.find('<').map(|p| if p == 0 { 1 } else { p }).unwrap_or(rest.len());
                let next = ceil_char_boundary(html, i + next);
                out.push_str(&html[i..next]);
                i = next;
            }
        }
    }

    out
}

/// 把不构成实体引用的 `&` 转义，避免 `Q&A` 之类的文字中断解析
fn escape_dangling_amps(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    for (i, ch) in html.char_indices() {
        if ch == '&' && !starts_entity(&html[i + 1..]) {
            out.push_str("&amp;");
        } else {
            out.push(ch);
        }
    }
    out
}

fn starts_entity(rest: &str) -> bool {
    let body_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'#')
        .count();
    body_len > 0 && rest.as_bytes().get(body_len) == Some(&b';')
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    while index < s.len() && !s.is_char_boundary(index) {
        index += 1;
    }
    index.min(s.len())
}
