use std::fs;
use std::path::Path;

use docsite_core::config::Config;
use docsite_core::{DocSite, NavTree, RenderOptions, ResolveError, SiteScanner, build_site};
use pretty_assertions::assert_eq;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn course_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "a/b.md", "---\ntitle: Hello\n---\n# Hi");
    write(root, "1-SOLID-Principles/0-README.md", "# SOLID\n\nFive principles.");
    write(
        root,
        "1-SOLID-Principles/frontend/1-srp.md",
        "---\ntitle: \"Single Responsibility\"\norder: 1\n---\nOne reason to change.\n",
    );
    write(root, "2-Domain-Driven-Design/0-README.md", "# DDD");
    write(root, "2-Domain-Driven-Design/code-samples/java/Customer.java", "class Customer {}");
    dir
}

#[test]
fn scan_then_resolve_is_total() {
    let dir = course_root();
    fs::write(dir.path().join("a/latin1.md"), b"# Caf\xe9\n").unwrap();
    let site = DocSite::new(dir.path(), RenderOptions::default());

    let slugs: Vec<_> = site.slugs().collect();
    assert_eq!(slugs.len(), 5);

    for slug in &slugs {
        let page = site.page_for_slug(slug);
        assert!(page.is_ok(), "{slug} did not resolve");
    }
}

#[test]
fn example_document_round_trip() {
    let dir = course_root();
    let scanner = SiteScanner::new(dir.path());

    let slug = scanner
        .slugs()
        .find(|slug| slug.segments() == ["a", "b"])
        .expect("a/b scanned");

    let site = DocSite::new(dir.path(), RenderOptions::default());
    let page = site.page_for_slug(&slug).unwrap();
    assert_eq!(page.title, "Hello");
    assert!(page.html.contains("<h1>Hi</h1>"));
}

#[test]
fn titles_come_from_frontmatter_or_filename() {
    let dir = course_root();
    let site = DocSite::new(dir.path(), RenderOptions::default());

    let srp = site.document(&["1-SOLID-Principles", "frontend", "1-srp"]).unwrap();
    assert_eq!(srp.title, "Single Responsibility");

    let readme = site.document(&["1-SOLID-Principles", "0-README"]).unwrap();
    assert_eq!(readme.title, "0-README");
}

#[test]
fn unknown_and_hostile_slugs_are_not_found() {
    let dir = course_root();
    let site = DocSite::new(dir.path().join("a"), RenderOptions::default());

    assert!(matches!(site.page(&["missing"]), Err(ResolveError::NotFound(_))));
    assert!(site.page(&["..", "1-SOLID-Principles", "0-README"]).is_err());
    assert!(site.page::<&str>(&[]).is_err());
}

#[test]
fn navigation_mirrors_directories() {
    let dir = course_root();
    let site = DocSite::new(dir.path(), RenderOptions::default());

    let items = site.navigation().items();
    let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["1-SOLID-Principles", "2-Domain-Driven-Design", "a"]);

    let solid: Vec<_> = items[0].children.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(solid, vec!["0-README", "frontend"]);
    assert_eq!(items[0].children[1].children[0].href, "/docs/1-SOLID-Principles/frontend/1-srp");

    // Directories holding no markdown never appear
    let ddd: Vec<_> = items[1].children.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(ddd, vec!["0-README"]);
}

#[test]
fn missing_root_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let site = DocSite::new(dir.path().join("courses"), RenderOptions::default());

    assert_eq!(site.navigation(), NavTree::new());
    assert!(matches!(site.page(&["x"]), Err(ResolveError::NotFound(_))));
}

#[test]
fn static_build_writes_every_page() {
    let dir = course_root();
    let out = tempfile::tempdir().unwrap();
    let theme = dir.path().join("no-theme");

    let report = build_site(&Config::default(), dir.path(), out.path(), &theme).unwrap();
    assert_eq!(report.pages, 4);

    let home = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(home.contains("Engineering 101"));

    let page = fs::read_to_string(out.path().join("docs/a/b/index.html")).unwrap();
    assert!(page.contains("<h1 class=\"page-title\">Hello</h1>"));
    assert!(page.contains("<h1>Hi</h1>"));
    assert!(out.path().join("docs/1-SOLID-Principles/frontend/1-srp/index.html").is_file());
}

#[test]
fn static_build_of_empty_root_writes_home_only() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    let report = build_site(
        &Config::default(),
        &src.path().join("absent"),
        out.path(),
        &src.path().join("theme"),
    )
    .unwrap();

    assert_eq!(report.pages, 0);
    assert!(out.path().join("index.html").is_file());
    assert!(!out.path().join("docs").exists());
}
