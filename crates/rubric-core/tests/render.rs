/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests: markdown source to HTML body.
 */

use pretty_assertions::assert_eq;
use rubric_ast::Node;
use rubric_core::{RubricConfig, render_markdown, render_markdown_to_html};

fn render(source: &str) -> String {
    render_markdown_to_html(source, &RubricConfig::default())
}

#[test]
fn test_plain_text_round_trips() {
    assert_eq!(
        render("Nothing special here: a = b, x :: y, [link-ish].\n"),
        "<p>Nothing special here: a = b, x :: y, [link-ish].</p>\n"
    );
}

#[test]
fn test_bare_alert_stays_a_block_quote() {
    insta::assert_snapshot!(render("> [!note]\n> Just a note.\n"), @r"
    <blockquote>
    <p>[!note]
    Just a note.</p>
    </blockquote>
    ");
}

#[test]
fn test_plain_directive_callout() {
    insta::assert_snapshot!(render(":::plain[Aside]\nBody\n:::\n"), @r#"
    <div class="callout callout-plain" data-callout="plain" data-collapsible="false">
    <div class="callout-title">
    <span class="callout-title-inner">Aside</span>
    </div>
    <div class="callout-content">
    <p>Body</p>
    </div>
    </div>
    "#);
}

#[test]
fn test_collapsible_warning_callout() {
    insta::assert_snapshot!(render("> [!warning]+ Be Careful\n> Do not ==touch== this.\n"), @r#"
    <div class="callout callout-warning is-collapsible" data-callout="warning" data-collapsible="true">
    <div class="callout-title">
    <svg class="fold-icon" xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polyline points="6 9 12 15 18 9"></polyline></svg><svg class="callout-icon" xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z"></path></svg><span class="callout-title-inner">Be Careful</span>
    </div>
    <div class="callout-content">
    <p>Do not <span class="highlight-mark">touch</span> this.</p>
    </div>
    </div>
    "#);
}

#[test]
fn test_inline_annotations() {
    let html = render("Read [漢字|かんじ]{kanji} and *[猫|neko]*{a cat} then ::aside:: done.\n");
    insta::assert_snapshot!(html, @r#"<p>Read <span class="hover-reveal"><ruby>漢字<rt>かんじ</rt></ruby><span class="hover-reveal-tooltip">kanji</span></span> and <em><span class="hover-reveal"><ruby>猫<rt>neko</rt></ruby><span class="hover-reveal-tooltip">a cat</span></span></em> then <span class="weakened-text" data-weakened="true">aside</span> done.</p>"#);
}

#[test]
fn test_ruby_without_tooltip_after_emphasis() {
    assert_eq!(
        render("*[猫|neko]* sat.\n"),
        "<p><em><ruby>猫<rt>neko</rt></ruby></em> sat.</p>\n"
    );
}

#[test]
fn test_inline_code_is_never_rewritten() {
    assert_eq!(
        render("Use `==x==` and `::y::` and `[a|b]`.\n"),
        "<p>Use <code>==x==</code> and <code>::y::</code> and <code>[a|b]</code>.</p>\n"
    );
}

#[test]
fn test_annotations_inside_callout_content() {
    let html = render(":::note\nA ==key== point with [漢|kan].\n:::\n");
    assert!(html.contains("data-callout=\"note\""));
    assert!(html.contains("<span class=\"callout-title-inner\">Note</span>"));
    assert!(html.contains(
        "<p>A <span class=\"highlight-mark\">key</span> point with <ruby>漢<rt>kan</rt></ruby>.</p>"
    ));
}

#[test]
fn test_annotations_in_list_items() {
    assert_eq!(
        render("- ==one==\n- ::two::\n"),
        "<ul>\n<li><span class=\"highlight-mark\">one</span></li>\n<li><span class=\"weakened-text\" data-weakened=\"true\">two</span></li>\n</ul>\n"
    );
}

#[test]
fn test_directive_fold_and_title_attribute() {
    let html = render(":::tip[Label]{title=\"Better title\" fold}\nBody\n:::\n");
    assert!(html.starts_with(
        "<div class=\"callout callout-tip is-collapsible is-collapsed\" data-callout=\"tip\" data-collapsible=\"true\">"
    ));
    assert!(html.contains("<span class=\"callout-title-inner\">Better title</span>"));
    assert!(!html.contains("Label"));
}

#[test]
fn test_directive_label_markup_is_not_literal() {
    let html = render(":::note[**Bold** label]\nBody\n:::\n");
    assert!(html.contains("<span class=\"callout-title-inner\">Bold label</span>"));
    assert!(!html.contains("**"));
}

#[test]
fn test_base_class_from_config() {
    let config: RubricConfig = serde_yaml::from_str("callout:\n  base-class: directive-callout\n")
        .expect("valid config");
    let html = render_markdown_to_html(":::info\nx\n:::\n", &config);
    assert!(html.starts_with("<div class=\"directive-callout callout-info\""));
}

#[test]
fn test_no_pending_annotation_reaches_the_tree() {
    let output = render_markdown(
        "**[a|b]** *[c|d]*{e} [f|g]\n\n> [!tip] T\n> *x [h|i]*\n",
        &RubricConfig::default(),
    );
    // Every ruby is a finished element with a reading
    let rubies = output
        .document
        .count(|n| matches!(n, Node::Element(e) if e.name == "ruby"));
    let readings = output
        .document
        .count(|n| matches!(n, Node::Element(e) if e.name == "rt"));
    assert_eq!(rubies, 4);
    assert_eq!(readings, 4);
    assert_eq!(output.context.rewrites("hover-reveal"), 4);
    assert_eq!(output.context.rewrites("callout"), 1);
}
