//! End-to-end tests for Collectify.
//!
//! These tests build a small site on disk and load it through the standard registry.

use std::{fs, path::Path, sync::Arc};

use collectify_core::{Config, TeamVariant};
use collectify_loader::{ContentLoader, LoadReport};
use collectify_schema::{
    CollectionRegistry, ReferenceResolver, Resource, Tag, TeamMember, collections,
};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dir");
    fs::write(path, content).expect("write");
}

fn sample_site(root: &Path) {
    write(
        root,
        "team/jane.yaml",
        r#"name: Jane Doe
bio: Builds the docs pipeline.
email: jane@example.com
role: Content
headshot: ./jane.png
"#,
    );
    write(root, "team/jane.png", "");
    write(
        root,
        "team/sam.json",
        r#"{
  "name": "Sam Roe",
  "bio": "Design systems.",
  "email": "sam@example.com",
  "role": "Design",
  "headshot": "https://example.com/sam.png"
}"#,
    );

    write(root, "tags/rust.yaml", "name: Rust\ncolor: \"#dea584\"\n");
    write(root, "tags/web.toml", "name = \"Web\"\ncolor = \"steelblue\"\n");

    write(
        root,
        "posts/hello-world.md",
        r#"---
title: Hello, World!
description: The first post.
date: 2024-01-14
author: jane
tags:
  - rust
  - web
relatedPosts: []
---

# Hello

Welcome."#,
    );
    write(
        root,
        "posts/follow-up/index.mdx",
        r#"+++
title = "Follow up"
description = "The second post."
date = 2024-02-01T09:30:00Z
author = "sam"
relatedPosts = ["hello-world"]
+++

More."#,
    );

    write(
        root,
        "resources/style-guide.md",
        r#"---
title: Style guide
description: How we write.
date: 2023-11-05
author: { collection: team, id: sam }
---
"#,
    );
}

fn load(root: &Path) -> LoadReport {
    let mut config = Config::default();
    config.content.dir = root.to_path_buf();
    ContentLoader::from_config(config)
        .expect("loader")
        .load()
        .expect("load")
}

#[test]
fn test_sample_site_loads_cleanly() {
    let dir = tempfile::tempdir().expect("create temp dir");
    sample_site(dir.path());

    let report = load(dir.path());
    let problems: Vec<String> = report.diagnostics.iter().map(ToString::to_string).collect();
    assert!(problems.is_empty(), "unexpected diagnostics: {problems:?}");

    let store = &report.store;
    assert_eq!(store.collection_len("team"), 2);
    assert_eq!(store.collection_len("tags"), 2);
    assert_eq!(store.collection_len("posts"), 2);
    assert_eq!(store.collection_len("resources"), 1);
}

#[test]
fn test_typed_views_and_resolution() {
    let dir = tempfile::tempdir().expect("create temp dir");
    sample_site(dir.path());
    let report = load(dir.path());
    let store = &report.store;

    let hello = store.get("posts", "hello-world").expect("hello");
    let post = Resource::try_from(hello).expect("resource");
    assert_eq!(post.title, "Hello, World!");
    assert!(post.related_posts.is_empty());
    assert_eq!(post.body.as_deref(), Some("# Hello\n\nWelcome."));

    let author = TeamMember::try_from(store.resolve(&post.author).expect("author"))
        .expect("member");
    assert_eq!(author.name, "Jane Doe");
    assert_eq!(author.role, "Content");

    let tags: Vec<Tag> = store
        .resolve_all(&post.tags)
        .expect("tags")
        .into_iter()
        .map(|e| Tag::try_from(e).expect("tag"))
        .collect();
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Rust", "Web"]);

    let follow_up = Resource::try_from(store.get("posts", "follow-up").expect("follow-up"))
        .expect("resource");
    assert_eq!(follow_up.date.to_string(), "2024-02-01");
    let related = store.resolve_all(&follow_up.related_posts).expect("related");
    assert_eq!(related[0].id, "hello-world");
    assert!(follow_up.tags.is_empty());
}

#[test]
fn test_dangling_author_is_an_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    sample_site(dir.path());
    write(
        dir.path(),
        "posts/orphan.md",
        "---\ntitle: Orphan\ndescription: No author.\ndate: 2024-05-05\nauthor: ghost\n---\n",
    );

    let report = load(dir.path());
    let errors: Vec<String> = report.errors().map(ToString::to_string).collect();
    assert_eq!(errors.len(), 1, "errors: {errors:?}");
    assert!(errors[0].contains("orphan.md"));
    assert!(errors[0].contains("author: reference not found"));
    assert!(errors[0].contains("'ghost'"));
    assert!(errors[0].contains("'team'"));

    let orphan = report.store.get("posts", "orphan").expect("validated");
    let author = orphan.reference("author").expect("reference");
    assert!(report.store.resolve(author).is_err());
}

#[test]
fn test_validation_messages_reach_the_report() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let title = "t".repeat(101);
    let description = "d".repeat(201);
    write(
        dir.path(),
        "posts/too-long.md",
        &format!(
            "---\ntitle: {title}\ndescription: {description}\ndate: 2024-01-01\nauthor: jane\n---\n"
        ),
    );

    let report = load(dir.path());
    let messages: Vec<&str> = report.errors().map(|d| d.message.as_str()).collect();
    assert!(messages.contains(&"title: Title must be 100 characters or less"));
    assert!(messages.contains(&"description: Description must be 200 characters or less"));
    assert!(report.store.get("posts", "too-long").is_none());
}

#[test]
fn test_author_variant_rejects_team_roles() {
    let dir = tempfile::tempdir().expect("create temp dir");
    sample_site(dir.path());

    let mut config = Config::default();
    config.content.dir = dir.path().to_path_buf();
    config.schema.team_variant = TeamVariant::Author;
    let report = ContentLoader::from_config(config)
        .expect("loader")
        .load()
        .expect("load");

    assert_eq!(report.store.collection_len("team"), 0);
    assert!(
        report
            .errors()
            .any(|d| d.message.starts_with("role: Invalid enum value"))
    );
}

#[test]
fn test_custom_registry_warns_on_unregistered_target() {
    let dir = tempfile::tempdir().expect("create temp dir");
    sample_site(dir.path());

    let registry = CollectionRegistry::builder()
        .register(collections::TEAM, collections::team_schema(TeamVariant::Team))
        .expect("team")
        .register(collections::RESOURCES, collections::resource_schema())
        .expect("resources")
        .build();

    let mut config = Config::default();
    config.content.dir = dir.path().to_path_buf();
    let report = ContentLoader::new(config, Arc::new(registry))
        .load()
        .expect("load");

    let warnings: Vec<&str> = report.warnings().map(|d| d.message.as_str()).collect();
    assert!(
        warnings
            .iter()
            .any(|w| w.contains("references unregistered collection 'tags'"))
    );
    assert!(warnings.iter().any(|w| w.contains("directory 'posts'")));
    assert!(!report.has_errors());
}

#[test]
fn test_bare_optional_key_is_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    sample_site(dir.path());
    write(
        dir.path(),
        "posts/bare.md",
        "---\ntitle: Bare\ndescription: Empty key.\ndate: 2024-06-01\nauthor: jane\nrelatedPosts:\n---\n",
    );

    let report = load(dir.path());
    let errors: Vec<String> = report.errors().map(ToString::to_string).collect();
    assert_eq!(errors.len(), 1, "errors: {errors:?}");
    assert!(errors[0].contains("bare.md"));
    assert!(errors[0].contains("relatedPosts: Expected array, received null"));
    assert!(report.store.get("posts", "bare").is_none());
}
