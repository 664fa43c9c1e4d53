/// 内部导出的模块
mod internal;


/// 导出核心入口函数
pub use internal::entrance::local::*;
pub use internal::entrance::remote::*;

pub mod auth {
    use crate::internal;
    pub use internal::auth::structs::portal_credentials::PortalCredentials;
}

pub mod config {
    use crate::internal;
    pub use internal::config::structs::*;
    pub use internal::config::structs::sync_config::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
}

/// 门户访问能力：会话 trait、链接分类与 HTTP 实现，自定义浏览器驱动时实现这里的 trait
pub mod portal {
    pub mod traits {
        use crate::internal;
        pub use internal::portal::traits::node_classifier::NodeClassifier;
        pub use internal::portal::traits::portal_session::{PortalSession, SessionFactory};
    }

    pub mod structs {
        use crate::internal;
        pub use internal::portal::structs::aspx_classifier::AspxClassifier;
        pub use internal::portal::structs::http_portal::{HttpPortal, LoginForm};
        pub use internal::portal::structs::http_session::HttpSession;
        pub use internal::portal::structs::page::{Anchor, FormInput, Page};
        pub use internal::portal::structs::session_error::SessionError;
    }

    pub mod functions {
        use crate::internal;
        pub use internal::portal::functions::download_name::*;
        pub use internal::portal::functions::parse_page::parse_page;
    }
}

pub mod remote_file {
    use crate::internal;
    // 结构体模型
    pub use internal::remote_file::structs::branch::{Branch, BranchMap};
    pub use internal::remote_file::structs::pending_download::PendingDownload;
    pub use internal::remote_file::structs::remote_node::{BranchEntry, RemoteEntry, RemoteNode};
    // 下载完成检测
    pub use internal::remote_file::downloader::structs::*;
    pub use internal::remote_file::functions::list_branches::list_branches;
}

pub mod local_file {
    use crate::internal;
    pub use internal::local_file::functions::ensure_folder::ensure_folder;
    pub use internal::local_file::functions::sanitize_name::sanitize_name;
    pub use internal::local_file::structs::local_directory::LocalDirectory;
}

pub mod states {
    use crate::internal;
    pub use internal::states::progress_state::*;
}

pub mod sync {
    use crate::internal;
    pub use internal::sync::structs::*;
    pub use internal::sync::structs::sync_report::{EXIT_FATAL, EXIT_OK, EXIT_PARTIAL};
}
