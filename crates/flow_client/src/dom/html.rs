//! Minimal HTML fragment parsing and serialization.

use super::DomError;

pub(crate) const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Parsed but not yet attached markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FragmentKind {
    Element {
        tag_name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

/// One parsed node, listed in document order. `parent` indexes an earlier
/// entry of the same list; `None` marks a top-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FragmentNode {
    pub parent: Option<usize>,
    pub kind: FragmentKind,
}

pub(crate) fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

pub(crate) fn is_raw_text_tag(tag: &str) -> bool {
    RAW_TEXT_TAGS.contains(&tag)
}

pub(crate) fn parse_fragment(html: &str) -> Result<Vec<FragmentNode>, DomError> {
    let bytes = html.as_bytes();
    let mut nodes: Vec<FragmentNode> = Vec::new();
    // Indices of the currently open elements.
    let mut stack: Vec<usize> = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        if starts_with_at(bytes, i, b"<!--") {
            let end = find_subslice(bytes, i + 4, b"-->")
                .ok_or_else(|| DomError::HtmlParse("unclosed HTML comment".into()))?;
            i = end + 3;
            continue;
        }

        if starts_with_at(bytes, i, b"<!") {
            let end = find_subslice(bytes, i, b">")
                .ok_or_else(|| DomError::HtmlParse("unclosed markup declaration".into()))?;
            i = end + 1;
            continue;
        }

        if bytes[i] == b'<' && starts_with_at(bytes, i, b"</") {
            let (tag, next) = parse_end_tag(html, i)?;
            i = next;
            if let Some(pos) = stack
                .iter()
                .rposition(|open| tag_of(&nodes[*open]) == Some(tag.as_str()))
            {
                stack.truncate(pos);
            }
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            let (tag_name, attrs, self_closing, next) = parse_start_tag(html, i)?;
            i = next;

            if is_raw_text_tag(&tag_name) {
                let close = find_end_tag_ci(bytes, i, tag_name.as_bytes())
                    .ok_or_else(|| DomError::HtmlParse(format!("unclosed <{}>", tag_name)))?;
                let body = html.get(i..close).unwrap_or_default().to_string();
                let (_, after) = parse_end_tag(html, close)?;
                i = after;
                let element = push_node(&mut nodes, &stack, FragmentKind::Element { tag_name, attrs });
                if !body.is_empty() {
                    nodes.push(FragmentNode {
                        parent: Some(element),
                        kind: FragmentKind::Text(body),
                    });
                }
                continue;
            }

            let void = self_closing || is_void_tag(&tag_name);
            let element = push_node(&mut nodes, &stack, FragmentKind::Element { tag_name, attrs });
            if !void {
                stack.push(element);
            }
            continue;
        }

        // Text runs until the next tag opener. A lone '<' is literal text.
        let text_start = i;
        i += 1;
        while i < bytes.len() && !is_markup_start(bytes, i) {
            i += 1;
        }
        if let Some(text) = html.get(text_start..i) {
            push_node(&mut nodes, &stack, FragmentKind::Text(decode_entities(text)));
        }
    }

    // Elements still open at the end are closed implicitly, as a browser would.
    Ok(nodes)
}

fn tag_of(node: &FragmentNode) -> Option<&str> {
    match &node.kind {
        FragmentKind::Element { tag_name, .. } => Some(tag_name),
        FragmentKind::Text(_) => None,
    }
}

fn is_markup_start(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'<'
        && bytes
            .get(i + 1)
            .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'/' || *b == b'!')
}

fn push_node(nodes: &mut Vec<FragmentNode>, stack: &[usize], kind: FragmentKind) -> usize {
    let parent = stack.last().copied();
    // The newest node is always the last child of its parent, so adjacent
    // text runs merge here.
    if let (FragmentKind::Text(new), Some(last)) = (&kind, nodes.last_mut()) {
        if let (FragmentKind::Text(prev), true) = (&mut last.kind, last.parent == parent) {
            prev.push_str(new);
            return nodes.len() - 1;
        }
    }
    nodes.push(FragmentNode { parent, kind });
    nodes.len() - 1
}

type StartTag = (String, Vec<(String, String)>, bool, usize);

fn parse_start_tag(html: &str, at: usize) -> Result<StartTag, DomError> {
    let bytes = html.as_bytes();
    let mut i = at + 1;

    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag_name = html
        .get(tag_start..i)
        .ok_or_else(|| DomError::HtmlParse("invalid tag name".into()))?
        .to_ascii_lowercase();

    let mut attrs: Vec<(String, String)> = Vec::new();
    let mut self_closing = false;

    loop {
        skip_ws(bytes, &mut i);
        if i >= bytes.len() {
            return Err(DomError::HtmlParse(format!("unclosed start tag <{}", tag_name)));
        }
        if bytes[i] == b'>' {
            i += 1;
            break;
        }
        if bytes[i] == b'/' {
            if bytes.get(i + 1) == Some(&b'>') {
                self_closing = true;
                i += 2;
                break;
            }
            i += 1;
            continue;
        }

        let name_start = i;
        while i < bytes.len() && is_attr_name_char(bytes[i]) {
            i += 1;
        }
        let name = html
            .get(name_start..i)
            .ok_or_else(|| DomError::HtmlParse("invalid attribute name".into()))?
            .to_ascii_lowercase();
        if name.is_empty() {
            return Err(DomError::HtmlParse(format!(
                "unexpected character in <{}> tag",
                tag_name
            )));
        }

        skip_ws(bytes, &mut i);
        let value = if bytes.get(i) == Some(&b'=') {
            i += 1;
            skip_ws(bytes, &mut i);
            parse_attr_value(html, &mut i)?
        } else {
            String::new()
        };

        // First occurrence wins.
        if !attrs.iter().any(|(existing, _)| *existing == name) {
            attrs.push((name, value));
        }
    }

    Ok((tag_name, attrs, self_closing, i))
}

fn parse_end_tag(html: &str, at: usize) -> Result<(String, usize), DomError> {
    let bytes = html.as_bytes();
    let mut i = at + 2;
    skip_ws(bytes, &mut i);

    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag = html
        .get(tag_start..i)
        .ok_or_else(|| DomError::HtmlParse("invalid end tag".into()))?
        .to_ascii_lowercase();

    while i < bytes.len() && bytes[i] != b'>' {
        i += 1;
    }
    if i >= bytes.len() {
        return Err(DomError::HtmlParse(format!("unclosed end tag </{}", tag)));
    }
    Ok((tag, i + 1))
}

fn parse_attr_value(html: &str, i: &mut usize) -> Result<String, DomError> {
    let bytes = html.as_bytes();
    if *i >= bytes.len() {
        return Err(DomError::HtmlParse("missing attribute value".into()));
    }

    if bytes[*i] == b'"' || bytes[*i] == b'\'' {
        let quote = bytes[*i];
        *i += 1;
        let start = *i;
        while *i < bytes.len() && bytes[*i] != quote {
            *i += 1;
        }
        if *i >= bytes.len() {
            return Err(DomError::HtmlParse("unclosed quoted attribute value".into()));
        }
        let value = html.get(start..*i).unwrap_or_default();
        *i += 1;
        return Ok(decode_entities(value));
    }

    let start = *i;
    while *i < bytes.len() && !bytes[*i].is_ascii_whitespace() && bytes[*i] != b'>' {
        if bytes[*i] == b'/' && bytes.get(*i + 1) == Some(&b'>') {
            break;
        }
        *i += 1;
    }
    Ok(decode_entities(html.get(start..*i).unwrap_or_default()))
}

fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b':'
}

fn is_attr_name_char(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'>' | b'/' | b'=' | b'"' | b'\'' | b'<')
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn starts_with_at(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes.get(at..at + needle.len()) == Some(needle)
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from > bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| from + pos)
}

fn find_end_tag_ci(bytes: &[u8], from: usize, tag: &[u8]) -> Option<usize> {
    let mut i = from;
    while i + 2 + tag.len() <= bytes.len() {
        if bytes[i] == b'<'
            && bytes[i + 1] == b'/'
            && bytes[i + 2..i + 2 + tag.len()].eq_ignore_ascii_case(tag)
        {
            return Some(i);
        }
        i += 1;
    }
    None
}

pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            decode_entity(entity).map(|ch| (ch, semi + 1))
        });
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = entity.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

pub(crate) fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

pub(crate) fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compact rendering of the parsed list: `tag[attrs]{children}` and
    /// quoted text.
    fn outline(nodes: &[FragmentNode]) -> String {
        fn render(nodes: &[FragmentNode], parent: Option<usize>, out: &mut String) {
            let mut first = true;
            for (index, node) in nodes.iter().enumerate().filter(|(_, n)| n.parent == parent) {
                if !first {
                    out.push(' ');
                }
                first = false;
                match &node.kind {
                    FragmentKind::Text(text) => out.push_str(&format!("{:?}", text)),
                    FragmentKind::Element { tag_name, attrs } => {
                        out.push_str(tag_name);
                        if !attrs.is_empty() {
                            let pairs: Vec<String> =
                                attrs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                            out.push_str(&format!("[{}]", pairs.join(",")));
                        }
                        out.push('{');
                        render(nodes, Some(index), out);
                        out.push('}');
                    }
                }
            }
        }

        let mut out = String::new();
        render(nodes, None, &mut out);
        out
    }

    fn parsed(html: &str) -> String {
        outline(&parse_fragment(html).unwrap())
    }

    #[test]
    fn test_parse_nested_elements() {
        assert_eq!(
            parsed("<ul><li>One</li><li>Two</li></ul>"),
            r#"ul{li{"One"} li{"Two"}}"#
        );
    }

    #[test]
    fn test_parse_multiple_top_level_nodes() {
        assert_eq!(parsed("hello <b>world</b>!"), r#""hello " b{"world"} "!""#);
    }

    #[test]
    fn test_parse_attributes_keep_order_and_colons() {
        assert_eq!(
            parsed(r##"<form flow:target="#result" flow:swap='beforeend' data-x=1 hidden></form>"##),
            "form[flow:target=#result,flow:swap=beforeend,data-x=1,hidden=]{}"
        );
    }

    #[test]
    fn test_parse_void_and_self_closing() {
        assert_eq!(
            parsed(r#"<p>a<br>b<img src="x.png"/>c</p>"#),
            r#"p{"a" br{} "b" img[src=x.png]{} "c"}"#
        );
    }

    #[test]
    fn test_parse_skips_comments_and_doctype() {
        assert_eq!(parsed("<!DOCTYPE html><!-- note --><p>x</p>"), r#"p{"x"}"#);
    }

    #[test]
    fn test_parse_decodes_entities() {
        assert_eq!(
            parsed("<p title=\"a &amp; b\">1 &lt; 2 &#65;&#x42; &bogus;</p>"),
            r#"p[title=a & b]{"1 < 2 AB &bogus;"}"#
        );
    }

    #[test]
    fn test_parse_closes_unclosed_elements() {
        assert_eq!(parsed("<div><span>open"), r#"div{span{"open"}}"#);
    }

    #[test]
    fn test_parse_ignores_stray_end_tag() {
        assert_eq!(parsed("<p>x</span>y</p>"), r#"p{"xy"}"#);
    }

    #[test]
    fn test_parse_raw_text_script() {
        assert_eq!(
            parsed("<script>if (a < b) {}</script>"),
            r#"script{"if (a < b) {}"}"#
        );
    }

    #[test]
    fn test_parse_lone_angle_is_text() {
        assert_eq!(parsed("a < b"), r#""a < b""#);
    }

    #[test]
    fn test_parse_parents_precede_children() {
        let nodes = parse_fragment("<a><b></b><c><d>t</d></c></a><e></e>").unwrap();
        for (index, node) in nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                assert!(parent < index);
            }
        }
        assert_eq!(nodes.len(), 6);
    }

    #[test]
    fn test_parse_deep_nesting() {
        let depth = 10_000;
        let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let nodes = parse_fragment(&html).unwrap();
        assert_eq!(nodes.len(), depth + 1);
        assert_eq!(nodes[depth].parent, Some(depth - 1));
        assert_eq!(nodes[depth].kind, FragmentKind::Text("x".into()));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_fragment("<div class=\"x></div>"),
            Err(DomError::HtmlParse(_))
        ));
        assert!(matches!(
            parse_fragment("<!-- never closed"),
            Err(DomError::HtmlParse(_))
        ));
        assert!(matches!(parse_fragment("<div"), Err(DomError::HtmlParse(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_fragment("").unwrap().is_empty());
    }

    #[test]
    fn test_escape_helpers() {
        let mut out = String::new();
        escape_text("<a & b>", &mut out);
        assert_eq!(out, "&lt;a &amp; b&gt;");

        let mut out = String::new();
        escape_attr("say \"hi\" & go", &mut out);
        assert_eq!(out, "say &quot;hi&quot; &amp; go");
    }
}
