//! 本地目录相关测试：目录创建、名称清洗、目录读取

use tempfile::TempDir;

use crate::get_local_files;
use crate::internal::local_file::functions::ensure_folder::ensure_folder;
use crate::internal::local_file::functions::sanitize_name::sanitize_name;
use crate::internal::local_file::structs::local_directory::LocalDirectory;

#[tokio::test]
async fn ensure_folder_creates_once() {
    let dir = TempDir::new().unwrap();

    let (path, created) = ensure_folder(dir.path(), "Week 1").await.unwrap();
    assert!(created);
    assert!(path.is_dir());
    assert_eq!(path, dir.path().join("Week 1"));

    let (again, created) = ensure_folder(dir.path(), "Week 1").await.unwrap();
    assert!(!created);
    assert_eq!(again, path);
}

#[tokio::test]
async fn ensure_folder_needs_existing_parent() {
    let dir = TempDir::new().unwrap();
    assert!(ensure_folder(&dir.path().join("missing"), "x").await.is_err());
}

#[test]
fn sanitize_replaces_reserved_characters() {
    assert_eq!(sanitize_name("a/b\\c").as_deref(), Some("a_b_c"));
    assert_eq!(sanitize_name("Q: what?").as_deref(), Some("Q_ what_"));
    assert_eq!(sanitize_name("<x>|\"y\"*").as_deref(), Some("_x___y__"));
    assert_eq!(sanitize_name("tab\there").as_deref(), Some("tab_here"));
    assert_eq!(sanitize_name("  讲义 1.pdf ").as_deref(), Some("讲义 1.pdf"));
}

#[test]
fn sanitize_rejects_unusable_names() {
    assert_eq!(sanitize_name(""), None);
    assert_eq!(sanitize_name("   "), None);
    assert_eq!(sanitize_name("."), None);
    assert_eq!(sanitize_name(".."), None);
}

#[tokio::test]
async fn local_directory_snapshot() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.pdf"), b"").unwrap();
    std::fs::write(dir.path().join("b.pdf.crdownload"), b"").unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    let listing = LocalDirectory::read(dir.path()).await.unwrap();
    assert_eq!(listing.len(), 3);
    assert!(listing.contains("a.pdf"));
    assert!(listing.contains("sub"));
    assert!(!listing.contains("b.pdf"));
    assert!(listing.contains("b.pdf.crdownload"));

    // 快照不会随目录变化
    std::fs::write(dir.path().join("c.pdf"), b"").unwrap();
    assert!(!listing.contains("c.pdf"));
}

#[tokio::test]
async fn get_local_files_sorted() {
    let dir = TempDir::new().unwrap();
    for name in ["b.txt", "a.txt", "c"] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }

    let names = get_local_files(dir.path()).await.unwrap();
    assert_eq!(names, ["a.txt", "b.txt", "c"]);

    assert!(get_local_files(&dir.path().join("missing")).await.is_err());
}
