use autodoc::download::{acquire, archive_candidate_urls};

#[test]
fn candidate_urls_strip_git_suffix_and_try_main_before_master() {
    let urls = archive_candidate_urls("https://github.com/acme/widget.git");
    assert_eq!(
        urls,
        vec![
            "https://github.com/acme/widget/archive/refs/heads/main.zip",
            "https://github.com/acme/widget/archive/refs/heads/master.zip",
        ]
    );
}

#[test]
fn candidate_urls_pass_suffixless_urls_through() {
    let urls = archive_candidate_urls("https://github.com/acme/widget");
    assert_eq!(
        urls[0],
        "https://github.com/acme/widget/archive/refs/heads/main.zip"
    );
    assert_eq!(urls.len(), 2);
}

#[test]
fn git_suffix_is_only_stripped_from_the_end() {
    let urls = archive_candidate_urls("https://github.com/acme/my.github.mirror");
    assert_eq!(
        urls[0],
        "https://github.com/acme/my.github.mirror/archive/refs/heads/main.zip"
    );
}

/// Both strategies failing (unresolvable host for clone and download alike)
/// collapses into an empty map rather than an error.
#[tokio::test]
async fn unreachable_repository_yields_an_empty_map() {
    let contents = acquire("https://invalid.invalid/acme/widget").await;
    assert!(contents.is_empty());
}
