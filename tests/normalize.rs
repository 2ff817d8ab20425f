// Canonical path rule guard rails: every collector depends on these exact
// boundaries, so they are pinned here rather than inferred.
mod support;
#[path = "support/common.rs"]
mod common;

use endpoint_census::{CanonicalPath, normalize};

use common::{USER_ID, UUID};

const SAMPLES: &[&str] = &[
    "",
    "/",
    "?",
    "api/v4/users",
    "//api//v4///users//",
    "/api/v4/users/me?page=0&per_page=60",
    "/api/v4/users/4xp9fdt4pbgd1kzsgqbehxnf8e/teams",
    "/api/v4/files/6f1d3c6e-2b4a-4c1e-9f0a-8d7e6c5b4a39/preview",
    "/api/v4/files/6f1d3c6e-2b4a-4c1e-9f0a-8d7e6c5b4a391234567-1234-1234-1234-123456789012",
    "/api/v4/users/:id",
    "/plugins/com.example.plugin/api/v1/hooks",
    "websocket",
    "/api/v4/a/abcdefghijklmnopqrstuvwxyz/abcdefghijklmnopqrstuvwxyz",
    "no-slash?with=query/and//slashes",
    "/ünïcödé//päth",
];

#[test]
fn normalize_is_idempotent() {
    for raw in SAMPLES {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
    }
}

#[test]
fn canonical_paths_are_rooted_without_query_or_slash_runs() {
    for raw in SAMPLES {
        let canonical = normalize(raw);
        assert!(canonical.starts_with('/'), "{canonical:?}");
        assert!(!canonical.contains('?'), "{canonical:?}");
        assert!(!canonical.contains("//"), "{canonical:?}");
    }
}

#[test]
fn query_is_stripped() {
    assert_eq!(normalize("/a/b?x=1"), normalize("/a/b"));
    assert_eq!(normalize("/a/b?x=1?y=2"), "/a/b");
}

#[test]
fn slash_runs_collapse() {
    assert_eq!(normalize("/a//b"), "/a/b");
    assert_eq!(normalize("a///b"), "/a/b");
}

#[test]
fn uuid_segment_becomes_placeholder() {
    assert_eq!(
        normalize(&format!("/api/v4/files/{UUID}/preview")),
        "/api/v4/files/:id/preview"
    );
    assert_eq!(
        normalize(&format!("/api/v4/files/{}", UUID.to_uppercase())),
        format!("/api/v4/files/{}", UUID.to_uppercase()),
        "uppercase hex is not a UUID match"
    );
}

#[test]
fn twenty_six_character_segment_boundaries() {
    assert_eq!(
        normalize(&format!("/api/v4/users/{USER_ID}")),
        "/api/v4/users/:id"
    );
    assert_eq!(
        normalize(&format!("/api/v4/users/{USER_ID}/teams/{USER_ID}/channels")),
        "/api/v4/users/:id/teams/:id/channels"
    );

    let short = &USER_ID[..25];
    assert_eq!(
        normalize(&format!("/api/v4/users/{short}")),
        format!("/api/v4/users/{short}")
    );
    let long = format!("{USER_ID}0");
    assert_eq!(
        normalize(&format!("/api/v4/users/{long}")),
        format!("/api/v4/users/{long}")
    );
}

#[test]
fn literal_twenty_six_character_segment_is_a_false_positive() {
    // A real route word with the id shape is still replaced.
    assert_eq!(
        normalize("/api/v4/abcdefghijklmnopqrstuvwxyz"),
        "/api/v4/:id"
    );
}

#[test]
fn canonical_path_wraps_the_rule() {
    let path = CanonicalPath::new(&format!("api/v4//users/{USER_ID}?x=1"));
    assert_eq!(path.as_str(), "/api/v4/users/:id");
    assert_eq!(path.to_string(), "/api/v4/users/:id");
    assert!(path.ends_with(&CanonicalPath::new("/users/:id")));
    assert!(!path.ends_with(&CanonicalPath::new("/teams/:id")));
}
