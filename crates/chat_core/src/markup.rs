//! Restricted markdown-like formatter for bot responses.
//!
//! Only the handful of constructs the recommendation backend emits are
//! recognised: `###`/`####` headings, `**strong**` runs, `* ` bullet lists and
//! `---` rules. Everything else becomes paragraphs. The output is HTML block
//! markup and is *not* escaped; the backend is trusted, and plain text that
//! skips this formatter must be escaped by the renderer instead.

/// Substrings whose presence marks a response as worth formatting.
const FORMAT_MARKERS: [&str; 5] = ["###", "####", "**", "* ", "---"];

/// Open/close pairs of the block lines this formatter emits.
const BLOCK_MARKUP_TAGS: [(&str, &str); 4] = [
    ("<h3>", "</h3>"),
    ("<h4>", "</h4>"),
    ("<ul>", "</ul>"),
    ("<p>", "</p>"),
];

/// Cheap pre-filter: true iff the text contains any structural marker.
pub fn needs_formatting(text: &str) -> bool {
    FORMAT_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Converts the text into block markup.
pub fn format_text(text: &str) -> String {
    render_blocks(&parse_blocks(text))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H3,
    H4,
}

impl HeadingLevel {
    fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: HeadingLevel,
        inlines: Vec<Inline>,
    },
    /// One `<ul>`; each item is its own inline run.
    List { items: Vec<Vec<Inline>> },
    Rule,
    Paragraph { inlines: Vec<Inline> },
    /// A complete line of formatter output, kept verbatim.
    Markup(String),
}

/// Scans the text line by line into typed blocks, in document order.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut scanner = BlockScanner::default();
    for line in text.lines() {
        scanner.push_line(line);
    }
    scanner.finish()
}

/// Serializes blocks as markup, one block per line.
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits a single line into plain and `**strong**` runs.
///
/// Matching is non-greedy and needs at least one character between the
/// markers; an unclosed `**` stays literal.
pub fn parse_inlines(line: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut rest = line;
    while let Some(open) = rest.find("**") {
        let inner_start = open + 2;
        let Some(first) = rest[inner_start..].chars().next() else {
            break;
        };
        let search_from = inner_start + first.len_utf8();
        let Some(close_offset) = rest[search_from..].find("**") else {
            break;
        };
        let close = search_from + close_offset;
        push_text(&mut inlines, &rest[..open]);
        inlines.push(Inline::Strong(rest[inner_start..close].to_string()));
        rest = &rest[close + 2..];
    }
    push_text(&mut inlines, rest);
    inlines
}

fn push_text(inlines: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = inlines.last_mut() {
        last.push_str(text);
    } else {
        inlines.push(Inline::Text(text.to_string()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Heading(HeadingLevel, &'a str),
    Rule,
    ListItem(&'a str),
    Markup(&'a str),
    Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    // The longer marker goes first so `####` never reads as `###`.
    if let Some(rest) = heading_remainder(line, "####") {
        return Line::Heading(HeadingLevel::H4, rest);
    }
    if let Some(rest) = heading_remainder(line, "###") {
        return Line::Heading(HeadingLevel::H3, rest);
    }
    if line == "---" {
        return Line::Rule;
    }
    if let Some(rest) = line.strip_prefix("* ") {
        let rest = rest.trim();
        if !rest.is_empty() {
            return Line::ListItem(rest);
        }
    }
    if is_block_markup(line) {
        return Line::Markup(line);
    }
    Line::Text(line)
}

/// True only for whole lines shaped like formatter output; partial tags are text.
fn is_block_markup(line: &str) -> bool {
    line == "<hr>"
        || BLOCK_MARKUP_TAGS.iter().any(|(open, close)| {
            line.len() >= open.len() + close.len()
                && line.starts_with(open)
                && line.ends_with(close)
        })
}

fn heading_remainder<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

/// At most one of `paragraph` and `list` is open at a time.
#[derive(Debug, Default)]
struct BlockScanner {
    blocks: Vec<Block>,
    paragraph: Option<Vec<Inline>>,
    list: Option<Vec<Vec<Inline>>>,
}

impl BlockScanner {
    fn push_line(&mut self, line: &str) {
        match classify(line) {
            // Blank lines end a paragraph but not a list.
            Line::Blank => self.close_paragraph(),
            Line::ListItem(text) => {
                self.close_paragraph();
                self.list
                    .get_or_insert_with(Vec::new)
                    .push(parse_inlines(text));
            }
            Line::Heading(level, text) => {
                self.close_open_blocks();
                self.blocks.push(Block::Heading {
                    level,
                    inlines: parse_inlines(text),
                });
            }
            Line::Rule => {
                self.close_open_blocks();
                self.blocks.push(Block::Rule);
            }
            Line::Markup(raw) => {
                self.close_open_blocks();
                self.blocks.push(Block::Markup(raw.to_string()));
            }
            Line::Text(text) => {
                self.close_list();
                let paragraph = self.paragraph.get_or_insert_with(Vec::new);
                if !paragraph.is_empty() {
                    push_text(paragraph, " ");
                }
                for inline in parse_inlines(text) {
                    match inline {
                        Inline::Text(text) => push_text(paragraph, &text),
                        strong @ Inline::Strong(_) => paragraph.push(strong),
                    }
                }
            }
        }
    }

    fn close_paragraph(&mut self) {
        if let Some(inlines) = self.paragraph.take() {
            self.blocks.push(Block::Paragraph { inlines });
        }
    }

    fn close_list(&mut self) {
        if let Some(items) = self.list.take() {
            self.blocks.push(Block::List { items });
        }
    }

    fn close_open_blocks(&mut self) {
        self.close_paragraph();
        self.close_list();
    }

    fn finish(mut self) -> Vec<Block> {
        self.close_open_blocks();
        self.blocks
    }
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { level, inlines } => {
            let tag = level.tag();
            format!("<{tag}>{}</{tag}>", render_inlines(inlines))
        }
        Block::List { items } => {
            let mut out = String::from("<ul>");
            for item in items {
                out.push_str("<li>");
                out.push_str(&render_inlines(item));
                out.push_str("</li>");
            }
            out.push_str("</ul>");
            out
        }
        Block::Rule => "<hr>".to_string(),
        Block::Paragraph { inlines } => format!("<p>{}</p>", render_inlines(inlines)),
        Block::Markup(raw) => raw.clone(),
    }
}

fn render_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Strong(text) => {
                out.push_str("<strong>");
                out.push_str(text);
                out.push_str("</strong>");
            }
        }
    }
    out
}
