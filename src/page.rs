//! In-memory page model
//!
//! The controller never owns the markup it drives. It talks to a small element
//! tree that carries the same contract a rendered page would: elements with
//! optional ids, marker classes, `data-*` attributes, text content and a parent
//! link. Lookups return `Option` so callers decide what an absent element means.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use tracing::debug;

use crate::{KinError, Result};

/// Marker class shared by every screen
pub const SCREEN_CLASS: &str = "screen";
/// Marker class for bottom navigation buttons
pub const NAV_CLASS: &str = "bottom-nav-item";
/// Class toggled on the visible screen and its nav button
pub const ACTIVE_CLASS: &str = "is-active";

pub const ATTR_SCREEN_TARGET: &str = "screen-target";
pub const ATTR_FORMAT: &str = "format";
pub const ATTR_CATEGORY: &str = "category";

pub const HOME_SCREEN: &str = "home-screen";
pub const CAPTURE_SCREEN: &str = "share-memory-capture";
pub const PROMPT_VIEWER_SCREEN: &str = "prompts-viewer";

pub const CAPTURE_PLACEHOLDER: &str = "capture-placeholder";
pub const CAPTURE_SUBTITLE: &str = "capture-subtitle";
pub const PROMPT_TEXT: &str = "prompt-text";
pub const PROMPT_CATEGORY_LABEL: &str = "prompt-category-label";
pub const NEXT_PROMPT: &str = "next-prompt";
pub const PREV_PROMPT: &str = "prev-prompt";

/// Index of an element inside its [`Page`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    /// `data-*` attributes, keyed without the `data-` prefix
    pub data: BTreeMap<String, String>,
    pub text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Buttons and anything carrying a screen target react to clicks
    pub fn is_clickable(&self) -> bool {
        self.tag == "button" || self.data.contains_key(ATTR_SCREEN_TARGET)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Declarative element description, used for built-in and YAML layouts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn data(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// Element tree rooted at a synthetic `body` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    nodes: Vec<Element>,
}

impl Default for Page {
    fn default() -> Self {
        Self::empty()
    }
}

impl Page {
    /// A page holding only the root element
    pub fn empty() -> Self {
        Self {
            nodes: vec![Element {
                tag: "body".to_string(),
                id: None,
                classes: BTreeSet::new(),
                data: BTreeMap::new(),
                text: String::new(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Build a page from top-level element specs, rejecting duplicate ids
    pub fn from_specs(specs: Vec<ElementSpec>) -> Result<Self> {
        let mut page = Self::empty();
        let root = page.root();
        for spec in specs {
            page.append(root, spec);
        }
        page.validate()?;
        Ok(page)
    }

    /// Load a layout from YAML: a list of top-level [`ElementSpec`]s
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            KinError::Layout(format!("Failed to read layout {}: {}", path.display(), e))
        })?;
        let specs: Vec<ElementSpec> = serde_yaml_ng::from_str(&contents)?;
        let page = Self::from_specs(specs)?;
        debug!(
            path = %path.display(),
            elements = page.nodes.len(),
            screens = page.screens().len(),
            "Loaded page layout"
        );
        Ok(page)
    }

    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for element in &self.nodes {
            if let Some(id) = &element.id {
                if !ids.insert(id.as_str()) {
                    return Err(KinError::Layout(format!("Duplicate element id '{}'", id)));
                }
            }
        }
        Ok(())
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `spec` (and its subtree) under `parent`
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let node = NodeId(self.nodes.len());
        self.nodes.push(Element {
            tag: spec.tag,
            id: spec.id,
            classes: spec.classes.into_iter().collect(),
            data: spec.data,
            text: spec.text,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(node);
        for child in spec.children {
            self.append(node, child);
        }
        node
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(NodeId)
    }

    /// First element, in document order, whose data attributes include every pair
    pub fn find_by_data(&self, pairs: &[(&str, &str)]) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|e| pairs.iter().all(|(k, v)| e.data(k) == Some(*v)))
            .map(NodeId)
    }

    /// All elements carrying `class`, in document order
    pub fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, e)| e.has_class(class))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    pub fn screens(&self) -> Vec<NodeId> {
        self.query_class(SCREEN_CLASS)
    }

    pub fn nav_buttons(&self) -> Vec<NodeId> {
        self.query_class(NAV_CLASS)
    }

    /// Nearest element, starting at `node` itself, that carries data attribute `key`
    pub fn closest_with_data(&self, node: NodeId, key: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            let element = self.element(id)?;
            if element.data.contains_key(key) {
                return Some(id);
            }
            current = element.parent;
        }
        None
    }

    /// Nearest screen containing `node`, inclusive
    pub fn enclosing_screen(&self, node: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            let element = self.element(id)?;
            if element.has_class(SCREEN_CLASS) {
                return Some(id);
            }
            current = element.parent;
        }
        None
    }

    /// Id of the first screen carrying the active class
    pub fn active_screen(&self) -> Option<&str> {
        self.screens()
            .into_iter()
            .filter_map(|n| self.element(n))
            .find(|e| e.has_class(ACTIVE_CLASS))
            .and_then(|e| e.id.as_deref())
    }

    pub fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        if let Some(element) = self.nodes.get_mut(node.0) {
            if on {
                element.classes.insert(class.to_string());
            } else {
                element.classes.remove(class);
            }
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.nodes.get_mut(node.0) {
            element.text = text.to_string();
        }
    }

    /// Text of the element with `id`, if present
    pub fn text_of(&self, id: &str) -> Option<&str> {
        self.get_element_by_id(id)
            .and_then(|n| self.element(n))
            .map(|e| e.text.as_str())
    }

    /// Elements under `scope` that a user can click: anything with an id or a screen target
    pub fn clickables_in(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_clickables(scope, &mut out);
        out
    }

    fn collect_clickables(&self, node: NodeId, out: &mut Vec<NodeId>) {
        let Some(element) = self.element(node) else {
            return;
        };
        for &child in &element.children {
            if self.element(child).is_some_and(Element::is_clickable) {
                out.push(child);
                continue;
            }
            self.collect_clickables(child, out);
        }
    }

    /// The prototype's screens: home, share-memory flow, prompts flow and family
    pub fn kin_default() -> Self {
        let nav_item = |target: &str, label: &str| {
            ElementSpec::new("button")
                .id(&format!("nav-{}", target))
                .class(NAV_CLASS)
                .data(ATTR_SCREEN_TARGET, target)
                .text(label)
        };
        let format_card = |format: &str, title: &str, hint: &str| {
            ElementSpec::new("button")
                .id(&format!("format-{}", format))
                .class("format-card")
                .data(ATTR_SCREEN_TARGET, CAPTURE_SCREEN)
                .data(ATTR_FORMAT, format)
                .child(ElementSpec::new("span").class("card-title").text(title))
                .child(ElementSpec::new("span").class("card-hint").text(hint))
        };
        let category_card = |category: &str, title: &str| {
            ElementSpec::new("button")
                .id(&format!("category-{}", category))
                .class("category-card")
                .data(ATTR_SCREEN_TARGET, PROMPT_VIEWER_SCREEN)
                .data(ATTR_CATEGORY, category)
                .child(ElementSpec::new("span").class("card-title").text(title))
        };

        let specs = vec![
            ElementSpec::new("section")
                .id(HOME_SCREEN)
                .class(SCREEN_CLASS)
                .child(ElementSpec::new("h1").text("Kin"))
                .child(ElementSpec::new("p").text("Keep your family's stories close."))
                .child(
                    ElementSpec::new("button")
                        .class("primary")
                        .data(ATTR_SCREEN_TARGET, "share-memory")
                        .text("Share a memory"),
                )
                .child(
                    ElementSpec::new("button")
                        .class("secondary")
                        .data(ATTR_SCREEN_TARGET, "prompts")
                        .text("Need inspiration? Try a prompt"),
                ),
            ElementSpec::new("section")
                .id("share-memory")
                .class(SCREEN_CLASS)
                .child(ElementSpec::new("h2").text("How do you want to share?"))
                .child(format_card("photo", "Photo / Video", "Show a moment"))
                .child(format_card("audio", "Audio", "Tell it in your own voice"))
                .child(format_card("text", "Text", "Write it down")),
            ElementSpec::new("section")
                .id(CAPTURE_SCREEN)
                .class(SCREEN_CLASS)
                .child(ElementSpec::new("h2").text("Capture your memory"))
                .child(ElementSpec::new("p").id(CAPTURE_SUBTITLE))
                .child(ElementSpec::new("pre").id(CAPTURE_PLACEHOLDER))
                .child(
                    ElementSpec::new("button")
                        .data(ATTR_SCREEN_TARGET, "share-memory")
                        .text("Choose another format"),
                )
                .child(
                    ElementSpec::new("button")
                        .class("primary")
                        .data(ATTR_SCREEN_TARGET, HOME_SCREEN)
                        .text("Done"),
                ),
            ElementSpec::new("section")
                .id("prompts")
                .class(SCREEN_CLASS)
                .child(ElementSpec::new("h2").text("Pick a prompt category"))
                .child(category_card("childhood", "Childhood"))
                .child(category_card("traditions", "Traditions"))
                .child(category_card("funny", "Funny Stories"))
                .child(category_card("lessons", "Life Lessons"))
                .child(category_card("culture", "Culture"))
                .child(category_card("random", "Random Fun")),
            ElementSpec::new("section")
                .id(PROMPT_VIEWER_SCREEN)
                .class(SCREEN_CLASS)
                .child(ElementSpec::new("p").id(PROMPT_CATEGORY_LABEL))
                .child(ElementSpec::new("blockquote").id(PROMPT_TEXT))
                .child(ElementSpec::new("button").id(PREV_PROMPT).text("Previous"))
                .child(ElementSpec::new("button").id(NEXT_PROMPT).text("Next"))
                .child(
                    ElementSpec::new("button")
                        .class("primary")
                        .data(ATTR_SCREEN_TARGET, "share-memory")
                        .text("Answer this prompt"),
                )
                .child(
                    ElementSpec::new("button")
                        .data(ATTR_SCREEN_TARGET, "prompts")
                        .text("Back to categories"),
                ),
            ElementSpec::new("section")
                .id("family")
                .class(SCREEN_CLASS)
                .child(ElementSpec::new("h2").text("Your family circle"))
                .child(
                    ElementSpec::new("p")
                        .text("Invite relatives to listen and add their own stories."),
                ),
            ElementSpec::new("nav")
                .class("bottom-nav")
                .child(nav_item(HOME_SCREEN, "Home"))
                .child(nav_item("share-memory", "Share"))
                .child(nav_item("prompts", "Prompts"))
                .child(nav_item("family", "Family")),
        ];

        let mut page = Self::empty();
        let root = page.root();
        for spec in specs {
            page.append(root, spec);
        }
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_page_contract() {
        let page = Page::kin_default();
        assert_eq!(page.screens().len(), 6);
        assert_eq!(page.nav_buttons().len(), 4);
        for id in [
            CAPTURE_PLACEHOLDER,
            CAPTURE_SUBTITLE,
            PROMPT_TEXT,
            PROMPT_CATEGORY_LABEL,
            NEXT_PROMPT,
            PREV_PROMPT,
        ] {
            assert!(page.get_element_by_id(id).is_some(), "missing #{}", id);
        }
        assert!(page.validate().is_ok());
    }

    #[test]
    fn test_closest_with_data_is_inclusive_and_walks_up() {
        let page = Page::kin_default();
        let card = page
            .query_class("format-card")
            .into_iter()
            .find(|&n| page.element(n).and_then(|e| e.data(ATTR_FORMAT)) == Some("audio"))
            .unwrap();
        assert_eq!(page.closest_with_data(card, ATTR_SCREEN_TARGET), Some(card));

        let title = page.element(card).unwrap().children()[0];
        assert_eq!(page.closest_with_data(title, ATTR_SCREEN_TARGET), Some(card));

        let heading = page.get_element_by_id(PROMPT_TEXT).unwrap();
        assert_eq!(page.closest_with_data(heading, ATTR_SCREEN_TARGET), None);
    }

    #[test]
    fn test_clickables_skip_card_internals() {
        let page = Page::kin_default();
        let share = page.get_element_by_id("share-memory").unwrap();
        assert_eq!(page.clickables_in(share).len(), 3);
        let viewer = page.get_element_by_id(PROMPT_VIEWER_SCREEN).unwrap();
        assert_eq!(page.clickables_in(viewer).len(), 4);
    }

    #[test]
    fn test_find_by_data() {
        let page = Page::kin_default();
        let node = page
            .find_by_data(&[(ATTR_SCREEN_TARGET, PROMPT_VIEWER_SCREEN), (ATTR_CATEGORY, "funny")])
            .unwrap();
        assert_eq!(
            page.element(node).unwrap().id.as_deref(),
            Some("category-funny")
        );
        assert_eq!(page.find_by_data(&[(ATTR_FORMAT, "smell")]), None);
    }

    #[test]
    fn test_set_class_and_text() {
        let mut page = Page::kin_default();
        let home = page.get_element_by_id(HOME_SCREEN).unwrap();
        page.set_class(home, ACTIVE_CLASS, true);
        assert_eq!(page.active_screen(), Some(HOME_SCREEN));
        page.set_class(home, ACTIVE_CLASS, false);
        assert_eq!(page.active_screen(), None);

        let text = page.get_element_by_id(PROMPT_TEXT).unwrap();
        page.set_text(text, "hello");
        assert_eq!(page.text_of(PROMPT_TEXT), Some("hello"));
    }

    #[test]
    fn test_load_layout_from_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
- tag: section
  id: home-screen
  classes: [screen]
  children:
    - tag: button
      data: {{ screen-target: other }}
      text: Go
- id: other
  classes: [screen]
"#
        )
        .unwrap();

        let page = Page::load(file.path()).unwrap();
        assert_eq!(page.screens().len(), 2);
        let other = page.get_element_by_id("other").unwrap();
        assert_eq!(page.element(other).unwrap().tag, "div");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Page::from_specs(vec![
            ElementSpec::new("section").id("a"),
            ElementSpec::new("section").id("a"),
        ]);
        assert!(matches!(result, Err(KinError::Layout(_))));
    }
}
