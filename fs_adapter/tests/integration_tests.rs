//! End-to-end tests over a real scratch directory

use std::fs;
use std::io::{Read, Write};

use fs_adapter::{FilesystemRepository, FILE_CONTENT_FIELD};
use repo_api::{Node, NodeError, Repository, TypeKind};

fn scratch_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let mut note = fs::File::create(dir.path().join("note.txt")).unwrap();
    note.write_all(b"someText").unwrap();
    drop(note);

    fs::create_dir(dir.path().join("docs")).unwrap();
    let mut readme = fs::File::create(dir.path().join("docs").join("readme.md")).unwrap();
    readme.write_all(b"# hello").unwrap();
    dir
}

#[test]
fn root_contract_holds() {
    let dir = scratch_tree();
    let repo = FilesystemRepository::mount(dir.path()).unwrap();

    contract_tests::assert_root_contract(&repo);
    contract_tests::assert_absence_signal(repo.root().as_ref());
    contract_tests::assert_children_restartable(repo.root().as_ref());
}

#[test]
fn note_file_scenario() {
    let dir = scratch_tree();
    let repo = FilesystemRepository::mount(dir.path()).unwrap();
    let root = repo.root();

    let names: Vec<String> = root
        .children()
        .map(|child| child.unwrap().name().to_string())
        .collect();
    assert!(names.contains(&"note.txt".to_string()));
    assert!(names.contains(&"docs".to_string()));

    let note = root.child("note.txt").unwrap().unwrap();
    assert_eq!(note.type_of(), TypeKind::Object);
    assert!(note.is_object());

    let content = note.child(FILE_CONTENT_FIELD).unwrap().unwrap();
    assert_eq!(content.type_of(), TypeKind::Binary);
    let mut bytes = Vec::new();
    content.as_binary().unwrap().read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes, b"someText");

    let size = note.child("size").unwrap().unwrap();
    assert_eq!(size.type_of(), TypeKind::Long);
    assert_eq!(size.as_long().unwrap(), 8);

    let regular = note.child("isRegularFile").unwrap().unwrap();
    assert!(regular.as_boolean().unwrap());

    let modified = note.child("lastModifiedTime").unwrap().unwrap();
    assert_eq!(modified.type_of(), TypeKind::DateTime);
    assert!(modified.as_datetime().is_ok());

    let created = note.child("creationTime").unwrap().unwrap();
    assert_eq!(created.type_of(), TypeKind::DateTime);
}

#[test]
fn scalar_accessors_are_exclusive() {
    let dir = scratch_tree();
    let repo = FilesystemRepository::mount(dir.path()).unwrap();
    let note = repo.root().child("note.txt").unwrap().unwrap();

    let size = note.child("size").unwrap().unwrap();
    contract_tests::assert_scalar_accessor_exclusivity(size.as_ref());

    let content = note.child(FILE_CONTENT_FIELD).unwrap().unwrap();
    contract_tests::assert_scalar_accessor_exclusivity(content.as_ref());

    let flag = note.child("isDirectory").unwrap().unwrap();
    contract_tests::assert_scalar_accessor_exclusivity(flag.as_ref());
}

#[test]
fn addresses_round_trip() {
    let dir = scratch_tree();
    let repo = FilesystemRepository::mount(dir.path()).unwrap();
    let root = repo.root();

    contract_tests::assert_address_round_trip(root.as_ref(), &["docs", "readme.md"]);
    contract_tests::assert_address_round_trip(
        root.as_ref(),
        &["docs", "readme.md", FILE_CONTENT_FIELD],
    );
    contract_tests::assert_address_round_trip(root.as_ref(), &["note.txt", "size"]);
}

#[test]
fn directories_are_directory_category() {
    let dir = scratch_tree();
    let repo = FilesystemRepository::mount(dir.path()).unwrap();
    let docs = repo.root().child("docs").unwrap().unwrap();

    // Directory category: collection-classified, but looked up by entry name.
    assert_eq!(docs.type_of(), TypeKind::Array);
    assert!(docs.is_object());
    assert!(!docs.is_array());
    assert!(docs.as_string().unwrap().is_none());
    assert!(matches!(
        docs.as_long(),
        Err(NodeError::TypeMismatch { .. })
    ));
}

#[test]
fn visitor_walks_the_whole_tree() {
    let dir = scratch_tree();
    let repo = FilesystemRepository::mount(dir.path()).unwrap();

    let counts = contract_tests::census(repo.root().as_ref());
    // root dir + docs dir + two file nodes
    assert_eq!(counts.objects, 4);
    assert_eq!(counts.arrays, 0);
    // one fileContent scalar per file
    assert_eq!(counts.scalars, 2);
}

#[test]
fn node_at_stays_inside_the_root() {
    let dir = scratch_tree();
    let repo = FilesystemRepository::mount(dir.path()).unwrap();

    let readme = repo.node_at("docs/readme.md").unwrap().unwrap();
    assert_eq!(readme.address().to_string(), "/docs/readme.md");

    assert!(repo.node_at("docs/missing.md").unwrap().is_none());
    assert!(matches!(
        repo.node_at("../outside"),
        Err(NodeError::OutsideRoot { .. })
    ));
}

#[test]
fn children_reflect_live_backend_state() {
    let dir = scratch_tree();
    let repo = FilesystemRepository::mount(dir.path()).unwrap();
    let root = repo.root();

    let count_before = root.children().count();
    fs::File::create(dir.path().join("late.txt")).unwrap();
    let count_after = root.children().count();
    assert_eq!(count_after, count_before + 1);

    // The already-handed-out node also re-reads the backend.
    let late = root.child("late.txt").unwrap().unwrap();
    assert_eq!(late.type_of(), TypeKind::Object);
    fs::remove_file(dir.path().join("late.txt")).unwrap();
    assert_eq!(late.type_of(), TypeKind::Undefined);
}
