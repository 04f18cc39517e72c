use std::path::PathBuf;

use filament::store::{FileStore, StoreError};
use tokio::io::AsyncReadExt;

/// Fresh scratch directory per test so parallel tests never collide.
fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("filament-store-{}-{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

async fn read_all(store: &FileStore, name: &str) -> (Vec<u8>, u64) {
    let (mut file, len) = store.open(name).await.unwrap();
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).await.unwrap();
    (contents, len)
}

#[tokio::test]
async fn test_save_then_open_round_trips() {
    let store = FileStore::new(scratch_dir("round-trip"));
    let data = b"alpha\x00beta\xffgamma";

    store.save("blob.bin", data).await.unwrap();

    let (contents, len) = read_all(&store, "blob.bin").await;
    assert_eq!(contents, data);
    assert_eq!(len, data.len() as u64);
}

#[tokio::test]
async fn test_save_overwrites_existing_content() {
    let store = FileStore::new(scratch_dir("overwrite"));

    store.save("note.txt", b"first version, quite long").await.unwrap();
    store.save("note.txt", b"second").await.unwrap();

    // Truncate-on-create: no tail of the longer first version survives.
    let (contents, len) = read_all(&store, "note.txt").await;
    assert_eq!(contents, b"second");
    assert_eq!(len, 6);
}

#[tokio::test]
async fn test_open_missing_file_is_io_error() {
    let store = FileStore::new(scratch_dir("missing"));
    let err = store.open("absent.txt").await.unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
}

#[tokio::test]
async fn test_open_directory_is_refused() {
    let root = scratch_dir("subdir");
    std::fs::create_dir(root.join("sub")).unwrap();

    let store = FileStore::new(root);
    let err = store.open("sub").await.unwrap_err();
    assert!(matches!(err, StoreError::Refused));
}

#[tokio::test]
async fn test_traversal_names_are_refused_on_open() {
    let store = FileStore::new(scratch_dir("traversal-open"));

    for name in ["", "../etc/passwd", "a/../../b", "/etc/passwd"] {
        let err = store.open(name).await.unwrap_err();
        assert!(matches!(err, StoreError::Refused), "name {name:?}");
    }
}

#[tokio::test]
async fn test_traversal_names_are_refused_on_save() {
    // Root is one level down so an accepted `..` would land in parent.
    let parent = scratch_dir("traversal-save");
    let root = parent.join("root");
    std::fs::create_dir(&root).unwrap();

    let store = FileStore::new(root);
    let err = store.save("../escaped.txt", b"nope").await.unwrap_err();

    assert!(matches!(err, StoreError::Refused));
    assert!(!parent.join("escaped.txt").exists());
}

#[tokio::test]
async fn test_curdir_components_are_collapsed() {
    let store = FileStore::new(scratch_dir("curdir"));

    store.save("./plain.txt", b"data").await.unwrap();

    let (contents, _) = read_all(&store, "plain.txt").await;
    assert_eq!(contents, b"data");
}

#[tokio::test]
async fn test_save_into_absent_subdirectory_is_io_error() {
    // Nested names are accepted but the directory is never created for
    // them; the create fails and surfaces as a filesystem error.
    let store = FileStore::new(scratch_dir("nested"));
    let err = store.save("sub/child.txt", b"data").await.unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
}

#[test]
fn test_root_accessor() {
    let dir = scratch_dir("root-accessor");
    let store = FileStore::new(dir.clone());
    assert_eq!(store.root(), dir.as_path());
}
