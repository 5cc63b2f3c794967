use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn structdata() -> Command {
    let mut cmd = Command::cargo_bin("structdata").unwrap();
    cmd.env_remove("STRUCTDATA_IMAGE_WIDTH")
        .env_remove("STRUCTDATA_MAILGUARD")
        .env_remove("STRUCTDATA_USE_HEADING")
        .env_remove("STRUCTDATA_LANG_BEFORE_TRANSLATION")
        .env_remove("STRUCTDATA_DATETIME_FORMAT");
    cmd
}

fn write_aliases(dir: &Path) -> String {
    let path = dir.join("aliases.json");
    std::fs::write(
        &path,
        r#"[
            {"name": "user", "type": "page", "prefix": "people:"},
            {"name": "state", "type": "", "enum": "open, closed"},
            {"name": "mine", "type": "", "prefix": "%user%/"}
        ]"#,
    )
    .unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_column_descriptor() {
    structdata()
        .args(["column", "Authors_pages"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""key": "authors""#))
        .stdout(predicate::str::contains(r#""original_key": "Authors""#))
        .stdout(predicate::str::contains(r#""type": "page""#))
        .stdout(predicate::str::contains(r#""multi": true"#));
}

#[test]
fn test_column_with_alias() {
    let temp_dir = tempfile::tempdir().unwrap();
    let aliases = write_aliases(temp_dir.path());

    structdata()
        .args(["--aliases", &aliases, "column", "owner_user"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""orig_type": "user""#))
        .stdout(predicate::str::contains(r#""prefix": "people:""#));
}

#[test]
fn test_clean_values() {
    structdata()
        .args(["clean", "dt", "2024-3-5"])
        .assert()
        .success()
        .stdout("2024-03-05\n");

    structdata()
        .args(["clean", "url", "example.com"])
        .assert()
        .success()
        .stdout("http://example.com\n");

    structdata()
        .args(["clean", "dt", "tomorrow"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_clean_enum_alias() {
    let temp_dir = tempfile::tempdir().unwrap();
    let aliases = write_aliases(temp_dir.path());

    structdata()
        .args(["--aliases", &aliases, "clean", "state", "closed"])
        .assert()
        .success()
        .stdout("closed\n");

    structdata()
        .args(["--aliases", &aliases, "clean", "state", "pending"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_filter_reports_bad_lines() {
    structdata()
        .args(["filter", "price>=10", "name!!x", "tags~~a, b"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""sql": "price >= '10'""#))
        .stdout(predicate::str::contains(r#""sql": "tag IN('a','b')""#))
        .stdout(predicate::str::contains(r#""comparator": "IN(""#))
        .stderr(predicate::str::contains(r#"Failed to parse comparison "!!""#));
}

#[test]
fn test_filter_fails_when_nothing_parses() {
    structdata()
        .args(["filter", "broken", "name!!x"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains(r#"Failed to parse filter "broken""#));
}

#[test]
fn test_format_pageid_carries_id() {
    structdata()
        .args(["format", "ref_pageids", "wiki:a|Alpha\nBeta"])
        .assert()
        .success()
        .stdout(
            "<a href=\"/wiki:a\" class=\"wikilink1\" title=\"wiki:a\">Alpha</a>, \
             <a href=\"/wiki:a\" class=\"wikilink1\" title=\"wiki:a\">Beta</a>\n",
        );
}

#[test]
fn test_format_alias_prefix_and_placeholders() {
    let temp_dir = tempfile::tempdir().unwrap();
    let aliases = write_aliases(temp_dir.path());

    structdata()
        .args(["--aliases", &aliases, "format", "author_user", "jane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("href=\"/people:jane\""));

    structdata()
        .args(["--aliases", &aliases, "--user", "bob", "format", "note_mine", "x <y>"])
        .assert()
        .success()
        .stdout("bob/x &lt;y&gt;\n");
}

#[test]
fn test_format_image_uses_configured_width() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = temp_dir.path().join("structdata.toml");
    std::fs::write(&config, "image_width = 120\n").unwrap();

    structdata()
        .args(["--config", config.to_str().unwrap(), "format", "photo_img", "pics:cat.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("width=\"120\""))
        .stdout(predicate::str::contains("rel=\"lightbox\" href=\"/_media/pics/cat.jpg\""))
        .stdout(predicate::str::contains("alt=\"photo: cat.jpg\""));
}

#[test]
fn test_format_mail_hex_guard() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = temp_dir.path().join("structdata.toml");
    std::fs::write(&config, "mailguard = \"hex\"\n").unwrap();

    structdata()
        .args(["--config", config.to_str().unwrap(), "format", "contact_mail", "a@b.c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mailto:&#x61;&#x40;&#x62;&#x2e;&#x63;"));
}

#[test]
fn test_bad_alias_file_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("aliases.json");
    std::fs::write(&path, "not json").unwrap();

    structdata()
        .args(["--aliases", path.to_str().unwrap(), "column", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_version() {
    structdata()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("structdata 0.3.2"));
}

#[test]
fn test_invalid_datetime_format_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = temp_dir.path().join("structdata.toml");
    std::fs::write(&config, "datetime_format = \"%Q\"\n").unwrap();

    structdata()
        .args(["--config", config.to_str().unwrap(), "column", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
