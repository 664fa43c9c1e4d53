//! 下载完成检测：触发下载后轮询下载目录，给出每个文件的结果。
//!
//! 对外导出以 [`crate::remote_file`] 为准，此处仅做模块划分。

pub mod structs;
