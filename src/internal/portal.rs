//! 门户访问接缝：会话 trait、链接分类，以及基于 HTTP 的默认实现。

pub mod functions;
pub mod structs;
pub mod traits;
