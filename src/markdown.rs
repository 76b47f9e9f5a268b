use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use regex::{Captures, Regex};

// Docs-site constructs that only work on the interactive site. Each pair is
// matched from its opening tag to the first matching close, case-insensitive.
// Order matters: the bare `<Tab` pattern must only run once `<Tabs>` blocks
// are gone.
static TABS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<Tabs.*?</Tabs>").unwrap());
static TAB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<Tab.*?</Tab>").unwrap());
static DESIGN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<Design.*?</Design>").unwrap());
static IMG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img[^>]*>").unwrap());

static HTML_HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(/?)h([1-5])(\s|>)").unwrap());

/// Remove tabbed-content blocks, design callouts, and image tags from
/// markdown body text.
///
/// These rely on the docs site's rendering environment and would come out
/// broken or irrelevant in the aggregated document. Matching is regex-based
/// and non-greedy, not a structural parse, so nested or malformed occurrences
/// may strip too much or too little.
pub fn strip_doc_tags(markdown: &str) -> String {
    let stripped = TABS_RE.replace_all(markdown, "");
    let stripped = TAB_RE.replace_all(&stripped, "");
    let stripped = DESIGN_RE.replace_all(&stripped, "");
    IMG_RE.replace_all(&stripped, "").into_owned()
}

/// Render markdown to HTML, stripping docs-site constructs first.
pub fn markdown_to_html(markdown: &str) -> String {
    let cleaned = strip_doc_tags(markdown);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(&cleaned, options);
    let mut out = String::with_capacity(cleaned.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Shift every `<h1>`..`<h5>` open and close tag down one rank.
///
/// A single pass over one combined pattern keyed by the original rank, so a
/// shifted heading can never be re-matched within the same call. `<h6>` has no
/// lower rank and is left alone.
pub fn shift_headings_html(html: &str) -> String {
    HTML_HEADING_RE
        .replace_all(html, |caps: &Captures| {
            // The captured rank is a single digit 1-5.
            let rank: u32 = caps[2].parse().unwrap();
            format!("<{}h{}{}", &caps[1], rank + 1, &caps[3])
        })
        .into_owned()
}

/// Shift every markdown heading line down one rank.
///
/// A line classifier: a line opening with one to five `#` followed by a space
/// gains one `#`; six or more are left unchanged. Lines inside fenced code
/// blocks that look like headings are shifted too, a documented limitation of
/// the line rule.
pub fn shift_headings_markdown(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());

    for line in markdown.split_inclusive('\n') {
        let hashes = line.bytes().take_while(|b| *b == b'#').count();
        if (1..=5).contains(&hashes) && line.as_bytes().get(hashes) == Some(&b' ') {
            out.push('#');
        }
        out.push_str(line);
    }

    out
}

/// Minimal HTML escaping for text interpolated into HTML fragments.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
