use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::ZipWriter;

use autodoc::extract::extract_zip;

/// Builds an in-memory archive shaped like a GitHub branch download: all
/// content wrapped in a single synthetic top-level folder.
fn build_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buf);
        for (name, content) in entries {
            if name.ends_with('/') {
                zip.add_directory(name.to_string(), FileOptions::default())
                    .unwrap();
            } else {
                zip.start_file(name.to_string(), FileOptions::default())
                    .unwrap();
                zip.write_all(content).unwrap();
            }
        }
        zip.finish().unwrap();
    }
    buf.into_inner()
}

#[test]
fn strips_exactly_one_leading_segment_from_every_entry() {
    let bytes = build_archive(&[
        ("widget-main/", b""),
        ("widget-main/README.md", b"# Widget"),
        ("widget-main/src/", b""),
        ("widget-main/src/a.py", b"print('hi')"),
    ]);

    let contents = extract_zip(&bytes).unwrap();

    assert_eq!(contents.len(), 2);
    assert_eq!(contents["README.md"], "# Widget");
    assert_eq!(contents["src/a.py"], "print('hi')");
}

#[test]
fn drops_entries_with_no_segment_after_stripping() {
    let bytes = build_archive(&[
        ("orphan", b"top-level metadata"),
        ("widget-main/kept.txt", b"kept"),
    ]);

    let contents = extract_zip(&bytes).unwrap();

    assert_eq!(contents.len(), 1);
    assert_eq!(contents["kept.txt"], "kept");
}

#[test]
fn applies_ignore_rules_to_the_stripped_path() {
    let bytes = build_archive(&[
        ("widget-main/src/a.py", b"print('hi')"),
        ("widget-main/image.png", &[0x89u8, 0x50, 0x4e, 0x47]),
        ("widget-main/yarn.lock", b"lockfile"),
        ("widget-main/node_modules/dep/index.js", b"module.exports = 1"),
    ]);

    let contents = extract_zip(&bytes).unwrap();

    assert_eq!(contents.len(), 2);
    assert!(contents.contains_key("src/a.py"));
    // Directory denylists apply to tree walks; for archives the path-level
    // rules decide, so a dependency-dir file survives only if its filename
    // and extension pass.
    assert!(contents.contains_key("node_modules/dep/index.js"));
    assert!(!contents.contains_key("image.png"));
    assert!(!contents.contains_key("yarn.lock"));
}

#[test]
fn corrupt_archive_is_an_error() {
    assert!(extract_zip(b"definitely not a zip").is_err());
}

#[test]
fn empty_archive_yields_empty_map() {
    let bytes = build_archive(&[]);
    let contents = extract_zip(&bytes).unwrap();
    assert!(contents.is_empty());
}
