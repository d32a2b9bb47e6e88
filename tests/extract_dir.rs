use std::fs::{create_dir_all, File};
use std::io::Write;

use tempfile::tempdir;

use autodoc::extract::extract_dir;

#[test]
fn extracts_nested_files_with_forward_slash_keys() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    let subdir = root.join("src/module");
    create_dir_all(&subdir).unwrap();

    {
        let mut f1 = File::create(root.join("root.txt")).unwrap();
        writeln!(f1, "hello root").unwrap();
        let mut f2 = File::create(subdir.join("nested.md")).unwrap();
        writeln!(f2, "hello nested").unwrap();
    }

    let contents = extract_dir(root);

    assert_eq!(contents.len(), 2);
    assert!(contents["root.txt"].contains("hello root"));
    assert!(contents["src/module/nested.md"].contains("hello nested"));
}

#[test]
fn never_descends_into_ignored_directories() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();

    {
        let mut f = File::create(root.join("keepme.txt")).unwrap();
        writeln!(f, "should be present").unwrap();
    }

    for dir in [".git/info", "node_modules/dep", "target/debug", "bin"] {
        let ignored = root.join(dir);
        create_dir_all(&ignored).unwrap();
        let mut f = File::create(ignored.join("buried.txt")).unwrap();
        writeln!(f, "should never appear").unwrap();
    }

    let contents = extract_dir(root);

    assert_eq!(contents.len(), 1);
    assert!(contents.contains_key("keepme.txt"));
    for key in contents.keys() {
        assert!(
            !key.starts_with(".git/")
                && !key.starts_with("node_modules/")
                && !key.starts_with("target/")
                && !key.starts_with("bin/"),
            "ignored directory leaked into result: {}",
            key
        );
    }
}

#[test]
fn excludes_denylisted_files_by_name_and_extension() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_dir_all(root.join("src")).unwrap();

    {
        let mut f = File::create(root.join("src/a.py")).unwrap();
        writeln!(f, "print('hi')").unwrap();
        File::create(root.join("image.png"))
            .unwrap()
            .write_all(&[0x89, 0x50, 0x4e, 0x47])
            .unwrap();
        let mut f = File::create(root.join("package-lock.json")).unwrap();
        writeln!(f, "{{}}").unwrap();
    }

    let contents = extract_dir(root);

    assert_eq!(contents.len(), 1);
    assert!(contents.contains_key("src/a.py"));
}

#[test]
fn decodes_invalid_utf8_permissively_instead_of_failing() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();

    File::create(root.join("mixed.txt"))
        .unwrap()
        .write_all(&[b'h', b'i', 0xff, 0xfe, b'!'])
        .unwrap();

    let contents = extract_dir(root);

    assert_eq!(contents.len(), 1);
    let text = &contents["mixed.txt"];
    assert!(text.starts_with("hi"));
    assert!(text.ends_with('!'));
}

#[test]
fn empty_tree_yields_empty_map() {
    let tmp = tempdir().unwrap();
    let contents = extract_dir(tmp.path());
    assert!(contents.is_empty());
}
