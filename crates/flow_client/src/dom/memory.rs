use super::html::{self, FragmentKind, FragmentNode};
use super::selector::{self, Combinator, Compound, SelectorPart};
use super::{Document, DomError};
use crate::SwapStrategy;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeType {
    Root,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Element {
    tag_name: String,
    attrs: Vec<(String, String)>,
}

impl Element {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node_type: NodeType,
}

/// Arena-backed document tree.
///
/// Nodes are never freed. Swapped-out subtrees are detached but stay
/// addressable: a trigger removed by its own swap can still be read, and
/// sibling or outer swaps on it fail with [`DomError::Detached`] instead of
/// touching unrelated nodes. The arena grows with every swap, so a
/// long-lived document should be compacted by re-parsing its serialized
/// form (`MemoryDocument::parse(&doc.to_html())`), which drops every
/// detached node and invalidates all outstanding `NodeId`s.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                node_type: NodeType::Root,
            }],
            root: NodeId(0),
        }
    }

    pub fn parse(html: &str) -> Result<Self, DomError> {
        let mut doc = Self::new();
        let fragments = html::parse_fragment(html)?;
        let root = doc.root;
        doc.insert_fragments(root, 0, fragments);
        Ok(doc)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Serialized markup of the whole document.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in &self.nodes[self.root.0].children {
            self.write_node(*child, &mut out);
        }
        out
    }

    pub fn inner_html(&self, node: NodeId) -> Result<String, DomError> {
        self.element(node)?;
        let mut out = String::new();
        for child in &self.nodes[node.0].children {
            self.write_node(*child, &mut out);
        }
        Ok(out)
    }

    pub fn outer_html(&self, node: NodeId) -> Result<String, DomError> {
        self.element(node)?;
        let mut out = String::new();
        self.write_node(node, &mut out);
        Ok(out)
    }

    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let Some(entry) = self.nodes.get(current.0) else {
                continue;
            };
            match &entry.node_type {
                NodeType::Text(text) => out.push_str(text),
                NodeType::Root | NodeType::Element(_) => {
                    stack.extend(entry.children.iter().rev().copied())
                }
            }
        }
        out
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).ok().map(|e| e.tag_name.as_str())
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).ok()?.attr(&name.to_ascii_lowercase())
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let name = name.to_ascii_lowercase();
        let element = self.element_mut(node)?;
        match element.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => element.attrs.push((name, value.to_string())),
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        let name = name.to_ascii_lowercase();
        self.element_mut(node)?.attrs.retain(|(key, _)| *key != name);
        Ok(())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let list = selector::parse(selector)?;
        let mut out = Vec::new();
        self.collect_elements(self.root, &mut out);
        out.retain(|node| {
            list.groups
                .iter()
                .any(|group| self.matches_chain(*node, group))
        });
        Ok(out)
    }

    fn element(&self, node: NodeId) -> Result<&Element, DomError> {
        match self.nodes.get(node.0).map(|n| &n.node_type) {
            Some(NodeType::Element(element)) => Ok(element),
            _ => Err(DomError::InvalidNode),
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut Element, DomError> {
        match self.nodes.get_mut(node.0).map(|n| &mut n.node_type) {
            Some(NodeType::Element(element)) => Ok(element),
            _ => Err(DomError::InvalidNode),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        id
    }

    /// Attaches parsed nodes under `parent`, top-level ones starting at
    /// `index`. Fragment parents always precede their children.
    fn insert_fragments(&mut self, parent: NodeId, index: usize, fragments: Vec<FragmentNode>) {
        let mut ids: Vec<NodeId> = Vec::with_capacity(fragments.len());
        let mut top: Vec<NodeId> = Vec::new();
        for fragment in fragments {
            let owner = fragment.parent.and_then(|i| ids.get(i).copied());
            let node_type = match fragment.kind {
                FragmentKind::Text(text) => NodeType::Text(text),
                FragmentKind::Element { tag_name, attrs } => {
                    NodeType::Element(Element { tag_name, attrs })
                }
            };
            let id = self.create_node(Some(owner.unwrap_or(parent)), node_type);
            match owner {
                Some(owner) => self.nodes[owner.0].children.push(id),
                None => top.push(id),
            }
            ids.push(id);
        }
        self.nodes[parent.0].children.splice(index..index, top);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != node);
        }
    }

    fn position_in_parent(&self, node: NodeId) -> Result<(NodeId, usize), DomError> {
        let parent = self.parent(node).ok_or(DomError::Detached)?;
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|child| *child == node)
            .ok_or(DomError::Detached)?;
        Ok((parent, index))
    }

    /// Element descendants of `node` in document order.
    fn collect_elements(&self, node: NodeId, out: &mut Vec<NodeId>) {
        let mut stack: Vec<NodeId> = self.nodes[node.0].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.element(current).is_ok() {
                out.push(current);
                stack.extend(self.nodes[current.0].children.iter().rev().copied());
            }
        }
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|parent| self.element(*parent).is_ok())
    }

    fn matches_chain(&self, node: NodeId, parts: &[SelectorPart]) -> bool {
        let Some((last, rest)) = parts.split_last() else {
            return true;
        };
        if !self.matches_step(node, &last.step) {
            return false;
        }
        if rest.is_empty() {
            return true;
        }
        match last.combinator {
            Combinator::Child => self
                .parent_element(node)
                .is_some_and(|parent| self.matches_chain(parent, rest)),
            Combinator::Descendant => {
                let mut cursor = self.parent_element(node);
                while let Some(ancestor) = cursor {
                    if self.matches_chain(ancestor, rest) {
                        return true;
                    }
                    cursor = self.parent_element(ancestor);
                }
                false
            }
        }
    }

    fn matches_step(&self, node: NodeId, step: &Compound) -> bool {
        let Ok(element) = self.element(node) else {
            return false;
        };
        if step.tag.as_ref().is_some_and(|tag| *tag != element.tag_name) {
            return false;
        }
        if step
            .id
            .as_ref()
            .is_some_and(|id| element.attr("id") != Some(id.as_str()))
        {
            return false;
        }
        if !step.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        step.attrs.iter().all(|cond| match (&cond.value, element.attr(&cond.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        enum Step {
            Open(NodeId),
            Close(NodeId),
        }

        let mut stack = vec![Step::Open(node)];
        while let Some(step) = stack.pop() {
            let current = match step {
                Step::Open(current) => current,
                Step::Close(current) => {
                    if let Ok(element) = self.element(current) {
                        out.push_str("</");
                        out.push_str(&element.tag_name);
                        out.push('>');
                    }
                    continue;
                }
            };

            let children = &self.nodes[current.0].children;
            match &self.nodes[current.0].node_type {
                NodeType::Root => {}
                NodeType::Text(text) => {
                    let raw = self
                        .parent_element(current)
                        .and_then(|parent| self.tag_name(parent))
                        .is_some_and(html::is_raw_text_tag);
                    if raw {
                        out.push_str(text);
                    } else {
                        html::escape_text(text, out);
                    }
                    continue;
                }
                NodeType::Element(element) => {
                    out.push('<');
                    out.push_str(&element.tag_name);
                    for (key, value) in &element.attrs {
                        out.push(' ');
                        out.push_str(key);
                        out.push_str("=\"");
                        html::escape_attr(value, out);
                        out.push('"');
                    }
                    out.push('>');
                    if html::is_void_tag(&element.tag_name) {
                        continue;
                    }
                    stack.push(Step::Close(current));
                }
            }
            stack.extend(children.iter().rev().map(|child| Step::Open(*child)));
        }
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements(node, &mut out);
        out
    }

    fn select_value(&self, select: NodeId) -> Option<String> {
        let options: Vec<NodeId> = self
            .descendants(select)
            .into_iter()
            .filter(|node| self.tag_name(*node) == Some("option"))
            .collect();
        let chosen = options
            .iter()
            .copied()
            .find(|option| self.get_attribute(*option, "selected").is_some())
            .or_else(|| options.first().copied())?;
        Some(self.option_value(chosen))
    }

    fn option_value(&self, option: NodeId) -> String {
        match self.get_attribute(option, "value") {
            Some(value) => value.to_string(),
            None => self.text_content(option).trim().to_string(),
        }
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.get_attribute(*node, name).map(str::to_string)
    }

    fn swap(
        &mut self,
        node: &NodeId,
        strategy: SwapStrategy,
        markup: &str,
    ) -> Result<(), DomError> {
        let node = *node;
        self.element(node)?;
        // Parse and locate everything before the first mutation.
        let fragments = html::parse_fragment(markup)?;

        match strategy {
            SwapStrategy::InnerHtml => {
                let old = std::mem::take(&mut self.nodes[node.0].children);
                for child in old {
                    self.nodes[child.0].parent = None;
                }
                self.insert_fragments(node, 0, fragments);
            }
            SwapStrategy::OuterHtml => {
                let (parent, index) = self.position_in_parent(node)?;
                self.detach(node);
                self.insert_fragments(parent, index, fragments);
            }
            SwapStrategy::BeforeEnd => {
                let end = self.nodes[node.0].children.len();
                self.insert_fragments(node, end, fragments);
            }
            SwapStrategy::AfterBegin => self.insert_fragments(node, 0, fragments),
            SwapStrategy::BeforeBegin => {
                let (parent, index) = self.position_in_parent(node)?;
                self.insert_fragments(parent, index, fragments);
            }
            SwapStrategy::AfterEnd => {
                let (parent, index) = self.position_in_parent(node)?;
                self.insert_fragments(parent, index + 1, fragments);
            }
        }
        Ok(())
    }

    fn form_data(&self, node: &NodeId) -> Map<String, Value> {
        let mut data = Map::new();
        for control in self.descendants(*node) {
            let Some(name) = self.get_attribute(control, "name") else {
                continue;
            };
            if name.is_empty() || self.get_attribute(control, "disabled").is_some() {
                continue;
            }

            let value = match self.tag_name(control) {
                Some("input") => {
                    let kind = self
                        .get_attribute(control, "type")
                        .unwrap_or("text")
                        .to_ascii_lowercase();
                    match kind.as_str() {
                        "submit" | "button" | "reset" | "image" | "file" => continue,
                        "checkbox" | "radio" => {
                            if self.get_attribute(control, "checked").is_none() {
                                continue;
                            }
                            self.get_attribute(control, "value").unwrap_or("on").to_string()
                        }
                        _ => self.get_attribute(control, "value").unwrap_or_default().to_string(),
                    }
                }
                Some("textarea") => self.text_content(control),
                Some("select") => match self.select_value(control) {
                    Some(value) => value,
                    None => continue,
                },
                _ => continue,
            };

            data.insert(name.to_string(), Value::String(value));
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(html: &str) -> MemoryDocument {
        MemoryDocument::parse(html).unwrap()
    }

    fn find(doc: &MemoryDocument, selector: &str) -> NodeId {
        doc.query_selector(selector).unwrap().unwrap()
    }

    #[test]
    fn test_parse_and_serialize() {
        let html = r#"<main id="app"><p class="lead">Hi &amp; bye</p><br><input name="q" value="x"></main>"#;
        assert_eq!(doc(html).to_html(), html);
    }

    #[test]
    fn test_query_selector_document_order() {
        let d = doc(r#"<ul><li class="a">1</li><li class="a">2</li></ul>"#);
        let first = find(&d, "li.a");
        assert_eq!(d.text_content(first), "1");
        assert_eq!(d.query_selector_all(".a").unwrap().len(), 2);
    }

    #[test]
    fn test_query_selector_combinators() {
        let d = doc(r#"<main><section><p id="deep">x</p></section><p id="shallow">y</p></main>"#);
        let shallow = d.query_selector_all("main > p").unwrap();
        assert_eq!(shallow.len(), 1);
        assert_eq!(d.get_attribute(shallow[0], "id"), Some("shallow"));
        assert_eq!(d.query_selector_all("main p").unwrap().len(), 2);
        assert_eq!(d.query_selector_all("section > p, #shallow").unwrap().len(), 2);
    }

    #[test]
    fn test_query_selector_attributes() {
        let d = doc(r##"<form flow:target="#out"></form><form></form>"##);
        assert_eq!(d.query_selector_all(r"[flow\:target]").unwrap().len(), 1);
        assert_eq!(
            d.query_selector_all(r##"form[flow\:target="#out"]"##).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_query_selector_no_match() {
        let d = doc("<div></div>");
        assert_eq!(d.query_selector("#missing").unwrap(), None);
    }

    #[test]
    fn test_query_selector_invalid() {
        let d = doc("<div></div>");
        assert!(matches!(
            d.query_selector("div:hover"),
            Err(DomError::UnsupportedSelector(_))
        ));
    }

    #[test]
    fn test_swap_inner_html() {
        let mut d = doc("<div>X</div>");
        let div = find(&d, "div");
        d.swap(&div, SwapStrategy::InnerHtml, "<p>Y</p>").unwrap();
        assert_eq!(d.to_html(), "<div><p>Y</p></div>");
    }

    #[test]
    fn test_swap_outer_html() {
        let mut d = doc(r#"<main><div id="t">X</div><hr></main>"#);
        let div = find(&d, "#t");
        d.swap(&div, SwapStrategy::OuterHtml, "<p>Y</p><p>Z</p>").unwrap();
        assert_eq!(d.to_html(), "<main><p>Y</p><p>Z</p><hr></main>");
        assert_eq!(d.parent(div), None);
        assert_eq!(d.query_selector("#t").unwrap(), None);
        assert_eq!(d.outer_html(div).unwrap(), r#"<div id="t">X</div>"#);
    }

    #[test]
    fn test_swap_before_end() {
        let mut d = doc(r#"<ul id="r"><li>1</li></ul>"#);
        let ul = find(&d, "#r");
        d.swap(&ul, SwapStrategy::BeforeEnd, "<li>2</li><li>3</li>").unwrap();
        assert_eq!(d.to_html(), r#"<ul id="r"><li>1</li><li>2</li><li>3</li></ul>"#);
    }

    #[test]
    fn test_swap_after_begin_keeps_order() {
        let mut d = doc(r#"<ul id="r"><li>3</li></ul>"#);
        let ul = find(&d, "#r");
        d.swap(&ul, SwapStrategy::AfterBegin, "<li>1</li><li>2</li>").unwrap();
        assert_eq!(d.to_html(), r#"<ul id="r"><li>1</li><li>2</li><li>3</li></ul>"#);
    }

    #[test]
    fn test_swap_before_begin() {
        let mut d = doc(r#"<main><div id="t">X</div></main>"#);
        let div = find(&d, "#t");
        d.swap(&div, SwapStrategy::BeforeBegin, "<p>Y</p>").unwrap();
        assert_eq!(d.to_html(), r#"<main><p>Y</p><div id="t">X</div></main>"#);
    }

    #[test]
    fn test_swap_after_end() {
        let mut d = doc(r#"<main><div id="t">X</div><hr></main>"#);
        let div = find(&d, "#t");
        d.swap(&div, SwapStrategy::AfterEnd, "<p>Y</p>").unwrap();
        assert_eq!(d.to_html(), r#"<main><div id="t">X</div><p>Y</p><hr></main>"#);
    }

    #[test]
    fn test_swap_sibling_of_top_level_element() {
        let mut d = doc(r#"<div id="t">X</div>"#);
        let div = find(&d, "#t");
        d.swap(&div, SwapStrategy::AfterEnd, "<p>Y</p>").unwrap();
        assert_eq!(d.to_html(), r#"<div id="t">X</div><p>Y</p>"#);
    }

    #[test]
    fn test_swap_plain_text_markup() {
        let mut d = doc("<span>0</span>");
        let span = find(&d, "span");
        d.swap(&span, SwapStrategy::InnerHtml, "42 items").unwrap();
        assert_eq!(d.to_html(), "<span>42 items</span>");
    }

    #[test]
    fn test_swap_parse_error_leaves_document_untouched() {
        let mut d = doc(r#"<div id="t">X</div>"#);
        let div = find(&d, "#t");
        let before = d.to_html();
        let err = d
            .swap(&div, SwapStrategy::InnerHtml, "<p class=\"oops>Y</p>")
            .unwrap_err();
        assert!(matches!(err, DomError::HtmlParse(_)));
        assert_eq!(d.to_html(), before);
    }

    #[test]
    fn test_swap_on_detached_node_fails() {
        let mut d = doc(r#"<main><div id="t">X</div></main>"#);
        let div = find(&d, "#t");
        d.swap(&div, SwapStrategy::OuterHtml, "<p>Y</p>").unwrap();
        let before = d.to_html();

        for strategy in [
            SwapStrategy::OuterHtml,
            SwapStrategy::BeforeBegin,
            SwapStrategy::AfterEnd,
        ] {
            assert_eq!(d.swap(&div, strategy, "<b>Z</b>"), Err(DomError::Detached));
        }
        assert_eq!(d.to_html(), before);
    }

    #[test]
    fn test_swap_rejects_non_element() {
        let mut d = doc("<div></div>");
        let root = d.root();
        assert_eq!(
            d.swap(&root, SwapStrategy::InnerHtml, "<p></p>"),
            Err(DomError::InvalidNode)
        );
    }

    #[test]
    fn test_swapped_in_content_is_queryable() {
        let mut d = doc(r#"<div id="t"></div>"#);
        let div = find(&d, "#t");
        d.swap(&div, SwapStrategy::InnerHtml, r#"<span id="new">n</span>"#)
            .unwrap();
        let span = find(&d, "#new");
        assert_eq!(d.parent(span), Some(div));
    }

    #[test]
    fn test_attributes() {
        let mut d = doc(r#"<button flow:swap="afterend">Go</button>"#);
        let button = find(&d, "button");
        assert_eq!(d.attribute(&button, "flow:swap").as_deref(), Some("afterend"));
        assert_eq!(d.attribute(&button, "FLOW:SWAP").as_deref(), Some("afterend"));
        assert_eq!(d.attribute(&button, "flow:target"), None);

        d.set_attribute(button, "flow:target", "#out").unwrap();
        assert_eq!(d.get_attribute(button, "flow:target"), Some("#out"));
        d.remove_attribute(button, "flow:swap").unwrap();
        assert_eq!(
            d.outer_html(button).unwrap(),
            r##"<button flow:target="#out">Go</button>"##
        );
    }

    #[test]
    fn test_inner_and_outer_html() {
        let d = doc(r#"<div id="t"><em>a</em>b</div>"#);
        let div = find(&d, "#t");
        assert_eq!(d.inner_html(div).unwrap(), "<em>a</em>b");
        assert_eq!(d.outer_html(div).unwrap(), r#"<div id="t"><em>a</em>b</div>"#);
        assert_eq!(d.inner_html(d.root()), Err(DomError::InvalidNode));
    }

    #[test]
    fn test_trigger_inside_replaced_region_stays_readable() {
        let mut d = doc(r##"<div id="t"><button flow:target="#t" flow:swap="beforeend">Go</button></div>"##);
        let button = find(&d, "button");
        let div = find(&d, "#t");
        d.swap(&div, SwapStrategy::InnerHtml, "<p>1</p>").unwrap();

        assert_eq!(d.parent(button), None);
        assert_eq!(d.attribute(&button, "flow:target").as_deref(), Some("#t"));
        assert_eq!(d.attribute(&button, "flow:swap").as_deref(), Some("beforeend"));
        assert_eq!(d.text_content(button), "Go");

        // The stale trigger still resolves a live target.
        let target = find(&d, "#t");
        d.swap(&target, SwapStrategy::BeforeEnd, "<p>2</p>").unwrap();
        assert_eq!(d.to_html(), r#"<div id="t"><p>1</p><p>2</p></div>"#);
    }

    #[test]
    fn test_reparse_compacts_detached_nodes() {
        let mut d = doc(r#"<div id="t"></div>"#);
        let div = find(&d, "#t");
        for n in 0..50 {
            d.swap(&div, SwapStrategy::InnerHtml, &format!("<p>{}</p>", n))
                .unwrap();
        }
        let compacted = doc(&d.to_html());
        assert_eq!(compacted.to_html(), r#"<div id="t"><p>49</p></div>"#);
        assert!(compacted.nodes.len() < d.nodes.len());
        assert_eq!(compacted.nodes.len(), 4);
    }

    #[test]
    fn test_deeply_nested_document() {
        let depth = 10_000;
        let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let mut d = doc(&html);

        assert_eq!(d.to_html(), html);
        let divs = d.query_selector_all("div").unwrap();
        assert_eq!(divs.len(), depth);
        assert_eq!(d.text_content(divs[0]), "x");

        let innermost = divs[depth - 1];
        d.swap(&innermost, SwapStrategy::InnerHtml, &html).unwrap();
        assert_eq!(d.query_selector_all("div").unwrap().len(), depth * 2);
        assert_eq!(d.inner_html(innermost).unwrap(), html);

        let outermost = divs[0];
        d.swap(&outermost, SwapStrategy::OuterHtml, "<p>flat</p>").unwrap();
        assert_eq!(d.to_html(), "<p>flat</p>");
        assert_eq!(d.text_content(d.root()), "flat");
    }

    #[test]
    fn test_form_data() {
        let d = doc(
            r#"<form id="f">
                <input name="name" value="Widget">
                <input name="price" type="number" value="9.5">
                <input name="featured" type="checkbox" checked>
                <input name="archived" type="checkbox">
                <input name="size" type="radio" value="s">
                <input name="size" type="radio" value="m" checked>
                <input name="locked" value="x" disabled>
                <input type="submit" name="go" value="Add">
                <textarea name="notes">Line &amp; more</textarea>
                <select name="color"><option value="r">Red</option><option selected>Blue</option></select>
                <select name="shape"><option>Square</option></select>
                <input value="unnamed">
            </form>"#,
        );
        let form = find(&d, "#f");
        assert_eq!(
            Value::Object(d.form_data(&form)),
            json!({
                "name": "Widget",
                "price": "9.5",
                "featured": "on",
                "size": "m",
                "notes": "Line & more",
                "color": "Blue",
                "shape": "Square"
            })
        );
    }

    #[test]
    fn test_form_data_last_duplicate_wins() {
        let d = doc(r#"<form><input name="tag" value="a"><input name="tag" value="b"></form>"#);
        let form = find(&d, "form");
        assert_eq!(Value::Object(d.form_data(&form)), json!({"tag": "b"}));
    }
}
