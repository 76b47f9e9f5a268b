use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

/// Metadata carried in a leading `---`-delimited YAML block.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub excerpt: Option<String>,
}

// Opening marker at the very start, block body, closing marker on its own line.
static FRONT_MATTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A---\r?\n(?s)(.*?)(?:\r?\n)---(?:\r?\n|\z)").unwrap()
});

/// Split a leading front-matter block from `content`.
///
/// Returns the parsed metadata and the remaining body. Without a block the
/// metadata is empty and the body is the input, byte-identical. A
/// well-delimited block whose YAML does not parse is still removed from the
/// body; its metadata falls back to the defaults.
pub fn split_front_matter(content: &str) -> (FrontMatter, &str) {
    let Some(captures) = FRONT_MATTER_RE.captures(content) else {
        return (FrontMatter::default(), content);
    };

    let block = captures.get(1).map(|m| m.as_str()).unwrap_or("");
    let body = &content[captures.get(0).unwrap().end()..];

    let attrs = match serde_yaml::from_str::<FrontMatter>(block) {
        Ok(attrs) => attrs,
        Err(e) => {
            debug!("Ignoring malformed front matter: {}", e);
            FrontMatter::default()
        }
    };

    (attrs, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_title_and_excerpt() {
        let input = "---\ntitle: Intro\nexcerpt: short\n---\n# Hello\n";
        let (attrs, body) = split_front_matter(input);

        assert_eq!(attrs.title.as_deref(), Some("Intro"));
        assert_eq!(attrs.excerpt.as_deref(), Some("short"));
        assert_eq!(body, "# Hello\n");
    }

    #[test]
    fn no_block_is_identity() {
        let input = "# Just a document\n\nSome text.\n";
        let (attrs, body) = split_front_matter(input);

        assert!(attrs.title.is_none());
        assert!(attrs.excerpt.is_none());
        assert_eq!(body, input);
    }

    #[test]
    fn dashes_mid_document_are_not_front_matter() {
        let input = "intro\n---\ntitle: nope\n---\nrest\n";
        let (attrs, body) = split_front_matter(input);

        assert!(attrs.title.is_none());
        assert_eq!(body, input);
    }

    #[test]
    fn malformed_yaml_falls_back_to_defaults() {
        let input = "---\ntitle: [unterminated\n---\nbody\n";
        let (attrs, body) = split_front_matter(input);

        assert!(attrs.title.is_none());
        assert!(attrs.excerpt.is_none());
        assert_eq!(body, "body\n");
    }

    #[test]
    fn extra_keys_are_ignored() {
        let input = "---\ntitle: T\nauthor: someone\ntags:\n  - a\n---\nbody";
        let (attrs, body) = split_front_matter(input);

        assert_eq!(attrs.title.as_deref(), Some("T"));
        assert_eq!(body, "body");
    }

    #[test]
    fn unterminated_block_is_left_in_the_body() {
        let input = "---\ntitle: T\nno closing marker";
        let (attrs, body) = split_front_matter(input);

        assert!(attrs.title.is_none());
        assert_eq!(body, input);
    }
}
