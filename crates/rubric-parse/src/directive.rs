/*
 * directive.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Directive container fences.
 *
 * CommonMark has no container syntax, so `:::name[label]{attrs}` fences are
 * split out of the source line by line before the remaining markdown is
 * handed to comrak. Fences inside fenced code blocks are left alone.
 */

use std::sync::LazyLock;

use regex::Regex;
use rubric_ast::Attributes;

/// Opening fence: three or more colons, a name, optional label and attributes.
static OPEN_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<fence>:{3,})(?P<name>[A-Za-z][\w-]*)(?:\[(?P<label>[^\]]*)\])?(?:\{(?P<attrs>[^}]*)\})?[ \t]*$",
    )
    .expect("invalid directive open regex")
});

/// Closing fence: colons only.
static CLOSE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<fence>:{3,})[ \t]*$").expect("invalid directive close regex"));

/// Opening or closing fence of a fenced code block.
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(?P<fence>`{3,}|~{3,})(?P<rest>.*)$").expect("invalid code fence regex")
});

/// One attribute inside `{...}`: `.class`, `#id`, `key`, `key=value`,
/// `key="value"` or `key='value'`.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\.(?P<class>[\w-]+)|#(?P<id>[\w-]+)|(?P<key>[\w-]+)(?:=(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s"']+)))?"#,
    )
    .expect("invalid attribute regex")
});

/// A piece of source: either plain markdown or a directive container.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    Markdown(String),
    Directive(DirectiveBlock),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveBlock {
    pub name: String,
    pub label: Option<String>,
    pub attributes: Attributes,
    pub body: Vec<Chunk>,
}

struct Frame {
    /// None for the document root
    open: Option<OpenFence>,
    chunks: Vec<Chunk>,
    buffer: String,
}

struct OpenFence {
    colons: usize,
    line: usize,
    name: String,
    label: Option<String>,
    attributes: Attributes,
}

impl Frame {
    fn new(open: Option<OpenFence>) -> Self {
        Frame {
            open,
            chunks: Vec::new(),
            buffer: String::new(),
        }
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.chunks
                .push(Chunk::Markdown(std::mem::take(&mut self.buffer)));
        }
    }

    fn into_directive(mut self) -> Option<Chunk> {
        self.flush();
        let open = self.open?;
        Some(Chunk::Directive(DirectiveBlock {
            name: open.name,
            label: open.label,
            attributes: open.attributes,
            body: self.chunks,
        }))
    }
}

/// Split source into markdown runs and directive containers.
///
/// A closing fence closes the innermost open container whose opening fence
/// has no more colons than the closing one. Containers still open at the
/// end of input are closed there.
pub fn split(source: &str) -> Vec<Chunk> {
    let mut stack = vec![Frame::new(None)];
    // (fence char, fence length) of the open fenced code block
    let mut code_fence: Option<(char, usize)> = None;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let content = line.trim_end_matches(['\n', '\r']);

        if let Some((fence_char, fence_len)) = code_fence {
            if closes_code_fence(content, fence_char, fence_len) {
                code_fence = None;
            }
            push_line(&mut stack, line);
            continue;
        }

        if let Some(caps) = CODE_FENCE.captures(content) {
            let fence = &caps["fence"];
            let fence_char = fence.chars().next().unwrap_or('`');
            // Backtick fences may not have backticks in the info string
            if fence_char != '`' || !caps["rest"].contains('`') {
                code_fence = Some((fence_char, fence.len()));
                push_line(&mut stack, line);
                continue;
            }
        }

        if let Some(caps) = OPEN_FENCE.captures(content) {
            if let Some(top) = stack.last_mut() {
                top.flush();
            }
            stack.push(Frame::new(Some(OpenFence {
                colons: caps["fence"].len(),
                line: index + 1,
                name: caps["name"].to_string(),
                label: caps.name("label").map(|m| m.as_str().to_string()),
                attributes: caps
                    .name("attrs")
                    .map(|m| parse_attributes(m.as_str()))
                    .unwrap_or_default(),
            })));
            continue;
        }

        if let Some(caps) = CLOSE_FENCE.captures(content) {
            let colons = caps["fence"].len();
            let closes = stack
                .last()
                .and_then(|frame| frame.open.as_ref())
                .is_some_and(|open| colons >= open.colons);
            if closes {
                close_top(&mut stack);
                continue;
            }
        }

        push_line(&mut stack, line);
    }

    while stack.len() > 1 {
        if let Some(open) = stack.last().and_then(|frame| frame.open.as_ref()) {
            tracing::warn!(
                directive = %open.name,
                line = open.line,
                "Directive container is never closed; closing at end of input"
            );
        }
        close_top(&mut stack);
    }

    match stack.pop() {
        Some(mut root) => {
            root.flush();
            root.chunks
        }
        None => Vec::new(),
    }
}

fn push_line(stack: &mut [Frame], line: &str) {
    if let Some(top) = stack.last_mut() {
        top.buffer.push_str(line);
    }
}

fn close_top(stack: &mut Vec<Frame>) {
    if stack.len() < 2 {
        return;
    }
    let Some(frame) = stack.pop() else {
        return;
    };
    if let (Some(directive), Some(parent)) = (frame.into_directive(), stack.last_mut()) {
        parent.chunks.push(directive);
    }
}

fn closes_code_fence(content: &str, fence_char: char, fence_len: usize) -> bool {
    let trimmed = content.trim_start_matches(' ');
    if content.len() - trimmed.len() > 3 {
        return false;
    }
    let run = trimmed.chars().take_while(|&c| c == fence_char).count();
    run >= fence_len && trimmed[run * fence_char.len_utf8()..].trim().is_empty()
}

/// Parse the inside of a `{...}` attribute block.
///
/// Classes accumulate into a space-separated `class` attribute. A bare key
/// gets the empty string as its value.
pub fn parse_attributes(source: &str) -> Attributes {
    let mut attributes = Attributes::new();
    for caps in ATTRIBUTE.captures_iter(source) {
        if let Some(class) = caps.name("class") {
            match attributes.get_mut("class") {
                Some(existing) => {
                    existing.push(' ');
                    existing.push_str(class.as_str());
                }
                None => {
                    attributes.insert("class".to_string(), class.as_str().to_string());
                }
            }
        } else if let Some(id) = caps.name("id") {
            attributes.replace("id".to_string(), id.as_str().to_string());
        } else if let Some(key) = caps.name("key") {
            let value = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .or_else(|| caps.name("bare"))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            attributes.replace(key.as_str().to_string(), value);
        }
    }
    attributes
}
