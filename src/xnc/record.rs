//! Record splitter for the embedded machining mini-language.
//!
//! A program is a sequence of bracketed records:
//! `<keyword k1="v1" k2="v2"/><keyword .../>`. Splitting on the `><`
//! delimiter after stripping the outer brackets yields the record stream.

/// One record: an action keyword plus its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    /// Action keyword, the record's first token.
    pub keyword: &'a str,
    attrs: Vec<(&'a str, &'a str)>,
}

impl<'a> Record<'a> {
    /// Raw value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// Whether an attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }
}

/// Split a program into its records.
///
/// Malformed fragments (no keyword, unterminated attribute) are dropped;
/// record-level recovery is the caller's concern, not the splitter's.
pub fn split_records(program: &str) -> Vec<Record<'_>> {
    let trimmed = program.trim();
    let trimmed = trimmed.strip_prefix('<').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('>').unwrap_or(trimmed);

    trimmed
        .split("><")
        .filter_map(|chunk| parse_record(chunk.trim().trim_end_matches('/').trim()))
        .collect()
}

/// Parse one record body: `keyword k1="v1" k2="v2"`.
fn parse_record(body: &str) -> Option<Record<'_>> {
    if body.is_empty() {
        return None;
    }

    let keyword_end = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    let keyword = &body[..keyword_end];
    if !keyword.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let mut attrs = Vec::new();
    let mut rest = body[keyword_end..].trim_start();

    while !rest.is_empty() {
        let Some(eq_pos) = rest.find('=') else { break };
        let key = rest[..eq_pos].trim();
        let after_eq = rest[eq_pos + 1..].trim_start();

        let Some(value_body) = after_eq.strip_prefix('"') else {
            break;
        };
        let Some(quote_end) = value_body.find('"') else {
            break;
        };

        attrs.push((key, &value_body[..quote_end]));
        rest = value_body[quote_end + 1..].trim_start();
    }

    Some(Record { keyword, attrs })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_bracketed_records() {
        let program = r#"<tool name="t8" d="8"/><ms x="10" y="20" c="0" dp="5"/><ml x="100"/>"#;
        let records = split_records(program);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].keyword, "tool");
        assert_eq!(records[0].attr("name"), Some("t8"));
        assert_eq!(records[0].attr("d"), Some("8"));
        assert_eq!(records[1].keyword, "ms");
        assert_eq!(records[1].attr("dp"), Some("5"));
        assert_eq!(records[2].keyword, "ml");
        assert_eq!(records[2].attr("x"), Some("100"));
    }

    #[test]
    fn keyword_only_record() {
        let records = split_records("<mf/>");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].keyword, "mf");
        assert!(!records[0].has_attr("x"));
    }

    #[test]
    fn empty_program_yields_no_records() {
        assert!(split_records("").is_empty());
        assert!(split_records("   ").is_empty());
    }

    #[test]
    fn unterminated_attribute_is_dropped() {
        let records = split_records(r#"<ms x="10" y="#);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attr("x"), Some("10"));
        assert!(records[0].attr("y").is_none());
    }

    #[test]
    fn variable_names_pass_through_as_raw_values() {
        let records = split_records(r#"<bf x="w2" y="50" dp="gl" name="t5"/>"#);
        assert_eq!(records[0].attr("x"), Some("w2"));
        assert_eq!(records[0].attr("dp"), Some("gl"));
    }
}
