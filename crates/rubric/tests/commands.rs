/*
 * commands.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for the CLI commands.
 */

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rubric_cli::commands::check::{self, CheckArgs};
use rubric_cli::commands::render::{self, OutputFormat, RenderArgs};
use rubric_cli::commands::transform::{self, TransformArgs};
use tempfile::TempDir;

const SOURCE: &str = "> [!tip] Remember\n> Read [漢字|かんじ]{kanji} ==twice==.\n\nThen ::relax::.\n";

fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write input");
    path
}

fn render_args(input: PathBuf) -> RenderArgs {
    RenderArgs {
        input,
        output: None,
        config: None,
        to: OutputFormat::Html,
    }
}

#[test]
fn test_render_to_stdout() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, "doc.md", SOURCE);

    let mut out = Vec::new();
    render::run(&render_args(input), &mut out).unwrap();
    let html = String::from_utf8(out).unwrap();

    assert!(html.starts_with("<div class=\"callout callout-tip\" data-callout=\"tip\""));
    assert!(html.contains("<span class=\"highlight-mark\">twice</span>"));
    assert!(html.contains("<span class=\"hover-reveal-tooltip\">kanji</span>"));
    assert!(html.ends_with(
        "<p>Then <span class=\"weakened-text\" data-weakened=\"true\">relax</span>.</p>\n"
    ));
}

#[test]
fn test_render_to_file() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, "doc.md", "a ==b==\n");
    let output = temp.path().join("doc.html");

    let mut args = render_args(input);
    args.output = Some(output.clone());
    let mut out = Vec::new();
    render::run(&args, &mut out).unwrap();

    assert!(out.is_empty());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "<p>a <span class=\"highlight-mark\">b</span></p>\n"
    );
}

#[test]
fn test_render_picks_up_config_next_to_input() {
    let temp = TempDir::new().unwrap();
    write_input(
        &temp,
        "rubric.yml",
        "transforms:\n  highlight: false\ncallout:\n  base-class: note-box\n",
    );
    let input = write_input(&temp, "doc.md", ":::note\n==kept==\n:::\n");

    let mut out = Vec::new();
    render::run(&render_args(input), &mut out).unwrap();
    let html = String::from_utf8(out).unwrap();

    assert!(html.starts_with("<div class=\"note-box callout-note\""));
    assert!(html.contains("<p>==kept==</p>"));
}

#[test]
fn test_render_explicit_config_error_names_file() {
    let temp = TempDir::new().unwrap();
    let config = write_input(&temp, "custom.yml", "transforms:\n  sparkle: true\n");
    let input = write_input(&temp, "doc.md", "x\n");

    let mut args = render_args(input);
    args.config = Some(config);
    let err = render::run(&args, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("custom.yml"));
}

#[test]
fn test_render_missing_input() {
    let temp = TempDir::new().unwrap();
    let err = render::run(&render_args(temp.path().join("missing.md")), &mut Vec::new())
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn test_render_json_then_transform_is_stable() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, "doc.md", SOURCE);

    let mut args = render_args(input);
    args.to = OutputFormat::Json;
    let mut tree = Vec::new();
    render::run(&args, &mut tree).unwrap();
    let tree = String::from_utf8(tree).unwrap();
    assert!(tree.contains("\"type\""));

    // Everything is already rewritten, so a second run changes nothing
    let mut again = Vec::new();
    transform::run(
        &TransformArgs {
            input: None,
            config: None,
        },
        &mut tree.as_bytes(),
        &mut again,
    )
    .unwrap();
    assert_eq!(String::from_utf8(again).unwrap(), tree);
}

#[test]
fn test_transform_reads_file() {
    let temp = TempDir::new().unwrap();
    let tree = rubric_core::document_to_json(&rubric_core::render_markdown(
        "",
        &rubric_core::RubricConfig::default(),
    )
    .document)
    .unwrap();
    let input = write_input(&temp, "tree.json", &tree);

    let mut out = Vec::new();
    transform::run(
        &TransformArgs {
            input: Some(input),
            config: None,
        },
        &mut std::io::empty(),
        &mut out,
    )
    .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), format!("{tree}\n"));
}

#[test]
fn test_transform_rejects_invalid_tree() {
    let err = transform::run(
        &TransformArgs {
            input: None,
            config: None,
        },
        &mut "[1, 2]".as_bytes(),
        &mut Vec::new(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Failed to parse document tree"));
}

#[test]
fn test_check_summary() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, "doc.md", SOURCE);

    let mut out = Vec::new();
    check::run(
        &CheckArgs {
            input: input.clone(),
            config: None,
        },
        &mut out,
    )
    .unwrap();

    let expected = format!(
        "{}\n  callout       1\n  hover-reveal  1\n  highlight     1\n  weaken        1\n  total         4\n",
        input.display()
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}
