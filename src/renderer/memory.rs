//! In-memory backend for tests.
//!
//! Nodes live in an arena indexed by [`NodeId`]. Every structural mutation is
//! appended to an operation log so tests can assert minimality (how many
//! nodes were created, moved or removed) next to the final tree shape.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::{
    AttributeApi, Backend, ClassApi, EventApi, FrameCallback, Listener, PropertyApi, StyleApi,
    TransitionEndCallback,
};
use crate::error::{Error, Result};
use crate::types::AttrValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub usize);

/// One logged backend mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Op {
    Create(NodeId),
    Insert { parent: NodeId, node: NodeId, moved: bool },
    Remove { parent: NodeId, node: NodeId },
    SetText(NodeId),
    Mutate { node: NodeId, what: &'static str },
}

enum Kind {
    Element { tag: String, ns: Option<String> },
    Text,
    Comment,
}

struct Record {
    kind: Kind,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: BTreeMap<String, String>,
    ns_attrs: BTreeMap<String, (String, String)>,
    props: BTreeMap<String, AttrValue>,
    style: BTreeMap<String, String>,
    listeners: Vec<(String, Listener<MemoryBackend>)>,
    transition_properties: Vec<String>,
    transition_end: Vec<TransitionEndCallback<NodeId>>,
}

impl Record {
    fn new(kind: Kind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
            parent: None,
            children: Vec::new(),
            attrs: BTreeMap::new(),
            ns_attrs: BTreeMap::new(),
            props: BTreeMap::new(),
            style: BTreeMap::new(),
            listeners: Vec::new(),
            transition_properties: Vec::new(),
            transition_end: Vec::new(),
        }
    }

    fn classes(&self) -> Vec<&str> {
        self.attrs
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }
}

#[derive(Default)]
pub(crate) struct MemoryBackend {
    nodes: RefCell<Vec<Record>>,
    ops: RefCell<Vec<Op>>,
    frames: RefCell<Vec<FrameCallback>>,
    reflows: Cell<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, record: Record) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(record);
        self.ops.borrow_mut().push(Op::Create(id));
        id
    }

    fn log(&self, op: Op) {
        self.ops.borrow_mut().push(op);
    }

    fn detach(nodes: &mut [Record], node: NodeId) -> bool {
        let Some(parent) = nodes[node.0].parent.take() else {
            return false;
        };
        nodes[parent.0].children.retain(|&c| c != node);
        true
    }

    // =========================================================================
    // Inspection helpers
    // =========================================================================

    pub fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    pub fn clear_ops(&self) {
        self.ops.borrow_mut().clear();
    }

    pub fn creations(&self) -> usize {
        self.ops.borrow().iter().filter(|op| matches!(op, Op::Create(_))).count()
    }

    pub fn removal_count(&self) -> usize {
        self.ops.borrow().iter().filter(|op| matches!(op, Op::Remove { .. })).count()
    }

    pub fn moves(&self) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, Op::Insert { moved: true, .. }))
            .count()
    }

    pub fn child_ids(&self, parent: &NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[parent.0].children.clone()
    }

    pub fn style_of(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].style.get(name).cloned()
    }

    pub fn listener_count(&self, node: &NodeId) -> usize {
        self.nodes.borrow()[node.0].listeners.len()
    }

    pub fn has_class(&self, node: &NodeId, name: &str) -> bool {
        self.nodes.borrow()[node.0].classes().contains(&name)
    }

    pub fn reflows(&self) -> usize {
        self.reflows.get()
    }

    /// Fire an event at `node`'s listeners registered under `name`.
    pub fn dispatch(&self, node: &NodeId, name: &str, event: &str) {
        let listeners: Vec<Listener<Self>> = self.nodes.borrow()[node.0]
            .listeners
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, l)| l.clone())
            .collect();
        let event = event.to_string();
        for listener in listeners {
            listener(name, &event);
        }
    }

    /// Run the callbacks queued for the next animation frame. Callbacks they
    /// queue wait for the following call.
    pub fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        let count = frames.len();
        for frame in frames {
            frame();
        }
        count
    }

    pub fn set_transition_properties(&self, node: &NodeId, properties: &[&str]) {
        self.nodes.borrow_mut()[node.0].transition_properties =
            properties.iter().map(|p| p.to_string()).collect();
    }

    /// Deliver a transition-end event for `target` to the callbacks on `node`.
    pub fn end_transition(&self, node: &NodeId, target: &NodeId) {
        let mut callbacks = std::mem::take(&mut self.nodes.borrow_mut()[node.0].transition_end);
        for callback in callbacks.iter_mut() {
            callback(target);
        }
        let mut nodes = self.nodes.borrow_mut();
        let added = std::mem::take(&mut nodes[node.0].transition_end);
        callbacks.extend(added);
        nodes[node.0].transition_end = callbacks;
    }

    /// Canonical markup of a subtree: sorted attributes and classes, styles
    /// as `name:value;`, comments as `<!--text-->`.
    pub fn serialize(&self, node: &NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        Self::write_node(&nodes, *node, &mut out);
        out
    }

    fn write_node(nodes: &[Record], id: NodeId, out: &mut String) {
        let record = &nodes[id.0];
        match &record.kind {
            Kind::Text => out.push_str(&record.text),
            Kind::Comment => {
                out.push_str("<!--");
                out.push_str(&record.text);
                out.push_str("-->");
            }
            Kind::Element { tag, .. } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in &record.attrs {
                    if name == "class" {
                        let mut classes = record.classes();
                        classes.sort_unstable();
                        out.push_str(&format!(" class=\"{}\"", classes.join(" ")));
                    } else {
                        out.push_str(&format!(" {name}=\"{value}\""));
                    }
                }
                for (name, (_, value)) in &record.ns_attrs {
                    out.push_str(&format!(" {name}=\"{value}\""));
                }
                if !record.style.is_empty() {
                    let style: String = record.style.iter().map(|(k, v)| format!("{k}:{v};")).collect();
                    out.push_str(&format!(" style=\"{style}\""));
                }
                out.push('>');
                for &child in &record.children {
                    Self::write_node(nodes, child, out);
                }
                out.push_str(&format!("</{tag}>"));
            }
        }
    }

    fn text_of(nodes: &[Record], id: NodeId, out: &mut String) {
        let record = &nodes[id.0];
        match record.kind {
            Kind::Element { .. } => {
                for &child in &record.children {
                    Self::text_of(nodes, child, out);
                }
            }
            _ => out.push_str(&record.text),
        }
    }
}

impl Backend for MemoryBackend {
    type Node = NodeId;
    type Event = String;

    fn create_element(&self, tag: &str) -> Result<NodeId> {
        Ok(self.push(Record::new(Kind::Element { tag: tag.to_string(), ns: None }, "")))
    }

    fn create_element_ns(&self, namespace: &str, tag: &str) -> Result<NodeId> {
        let kind = Kind::Element {
            tag: tag.to_string(),
            ns: Some(namespace.to_string()),
        };
        Ok(self.push(Record::new(kind, "")))
    }

    fn create_text_node(&self, text: &str) -> Result<NodeId> {
        Ok(self.push(Record::new(Kind::Text, text)))
    }

    fn create_comment(&self, text: &str) -> Result<NodeId> {
        Ok(self.push(Record::new(Kind::Comment, text)))
    }

    fn insert_before(&self, parent: &NodeId, node: &NodeId, reference: Option<&NodeId>) -> Result<()> {
        if reference == Some(node) {
            return Ok(());
        }
        let mut nodes = self.nodes.borrow_mut();
        if let Some(reference) = reference {
            if nodes[reference.0].parent != Some(*parent) {
                return Err(Error::backend("insert_before", format!("{reference:?} is not a child of {parent:?}")));
            }
        }
        let moved = Self::detach(&mut nodes, *node);
        let index = match reference {
            Some(reference) => nodes[parent.0]
                .children
                .iter()
                .position(|c| c == reference)
                .unwrap_or(nodes[parent.0].children.len()),
            None => nodes[parent.0].children.len(),
        };
        nodes[parent.0].children.insert(index, *node);
        nodes[node.0].parent = Some(*parent);
        drop(nodes);
        self.log(Op::Insert {
            parent: *parent,
            node: *node,
            moved,
        });
        Ok(())
    }

    fn remove_child(&self, parent: &NodeId, node: &NodeId) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        if nodes[node.0].parent != Some(*parent) {
            return Err(Error::backend("remove_child", format!("{node:?} is not a child of {parent:?}")));
        }
        Self::detach(&mut nodes, *node);
        drop(nodes);
        self.log(Op::Remove {
            parent: *parent,
            node: *node,
        });
        Ok(())
    }

    fn append_child(&self, parent: &NodeId, node: &NodeId) -> Result<()> {
        self.insert_before(parent, node, None)
    }

    fn parent_node(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let parent = nodes[node.0].parent?;
        let siblings = &nodes[parent.0].children;
        let index = siblings.iter().position(|c| c == node)?;
        siblings.get(index + 1).copied()
    }

    fn first_child(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].children.first().copied()
    }

    fn tag_name(&self, node: &NodeId) -> String {
        match &self.nodes.borrow()[node.0].kind {
            Kind::Element { tag, ns: None } => tag.to_uppercase(),
            Kind::Element { tag, ns: Some(_) } => tag.clone(),
            Kind::Text => "#text".into(),
            Kind::Comment => "#comment".into(),
        }
    }

    fn set_text_content(&self, node: &NodeId, text: Option<&str>) -> Result<()> {
        let text = text.unwrap_or_default();
        let is_element = self.is_element(node);
        if is_element {
            let children = std::mem::take(&mut self.nodes.borrow_mut()[node.0].children);
            for child in children {
                self.nodes.borrow_mut()[child.0].parent = None;
            }
            if !text.is_empty() {
                let child = self.create_text_node(text)?;
                let mut nodes = self.nodes.borrow_mut();
                nodes[child.0].parent = Some(*node);
                nodes[node.0].children.push(child);
            }
        } else {
            self.nodes.borrow_mut()[node.0].text = text.to_string();
        }
        self.log(Op::SetText(*node));
        Ok(())
    }

    fn text_content(&self, node: &NodeId) -> Option<String> {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        Self::text_of(&nodes, *node, &mut out);
        Some(out)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<()> {
        self.nodes.borrow_mut()[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
        self.log(Op::Mutate { node: *node, what: "attr" });
        Ok(())
    }

    fn get_attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        let record = &nodes[node.0];
        record
            .attrs
            .get(name)
            .or_else(|| record.ns_attrs.get(name).map(|(_, v)| v))
            .cloned()
    }

    fn is_element(&self, node: &NodeId) -> bool {
        matches!(self.nodes.borrow()[node.0].kind, Kind::Element { .. })
    }

    fn is_text(&self, node: &NodeId) -> bool {
        matches!(self.nodes.borrow()[node.0].kind, Kind::Text)
    }

    fn is_comment(&self, node: &NodeId) -> bool {
        matches!(self.nodes.borrow()[node.0].kind, Kind::Comment)
    }
}

impl AttributeApi for MemoryBackend {
    fn set_attribute_ns(&self, node: &NodeId, namespace: &str, name: &str, value: &str) -> Result<()> {
        self.nodes.borrow_mut()[node.0]
            .ns_attrs
            .insert(name.to_string(), (namespace.to_string(), value.to_string()));
        self.log(Op::Mutate { node: *node, what: "attr" });
        Ok(())
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        nodes[node.0].attrs.remove(name);
        nodes[node.0].ns_attrs.remove(name);
        drop(nodes);
        self.log(Op::Mutate { node: *node, what: "attr" });
        Ok(())
    }

    fn attributes(&self, node: &NodeId) -> Vec<(String, String)> {
        let nodes = self.nodes.borrow();
        let record = &nodes[node.0];
        record
            .attrs
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .chain(record.ns_attrs.iter().map(|(k, (_, v))| (k.clone(), v.clone())))
            .collect()
    }
}

impl ClassApi for MemoryBackend {
    fn add_class(&self, node: &NodeId, name: &str) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        let record = &mut nodes[node.0];
        if !record.classes().contains(&name) {
            let mut classes: Vec<String> = record.classes().into_iter().map(String::from).collect();
            classes.push(name.to_string());
            record.attrs.insert("class".into(), classes.join(" "));
        }
        drop(nodes);
        self.log(Op::Mutate { node: *node, what: "class" });
        Ok(())
    }

    fn remove_class(&self, node: &NodeId, name: &str) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        let record = &mut nodes[node.0];
        let classes: Vec<String> = record
            .classes()
            .into_iter()
            .filter(|&c| c != name)
            .map(String::from)
            .collect();
        if classes.is_empty() {
            record.attrs.remove("class");
        } else {
            record.attrs.insert("class".into(), classes.join(" "));
        }
        drop(nodes);
        self.log(Op::Mutate { node: *node, what: "class" });
        Ok(())
    }
}

impl PropertyApi for MemoryBackend {
    fn set_property(&self, node: &NodeId, name: &str, value: &AttrValue) -> Result<()> {
        self.nodes.borrow_mut()[node.0]
            .props
            .insert(name.to_string(), value.clone());
        self.log(Op::Mutate { node: *node, what: "prop" });
        Ok(())
    }

    fn remove_property(&self, node: &NodeId, name: &str) -> Result<()> {
        self.nodes.borrow_mut()[node.0].props.remove(name);
        self.log(Op::Mutate { node: *node, what: "prop" });
        Ok(())
    }

    fn property(&self, node: &NodeId, name: &str) -> Option<AttrValue> {
        self.nodes.borrow()[node.0].props.get(name).cloned()
    }
}

impl StyleApi for MemoryBackend {
    fn set_style(&self, node: &NodeId, name: &str, value: &str) -> Result<()> {
        self.nodes.borrow_mut()[node.0]
            .style
            .insert(name.to_string(), value.to_string());
        self.log(Op::Mutate { node: *node, what: "style" });
        Ok(())
    }

    fn remove_style(&self, node: &NodeId, name: &str) -> Result<()> {
        self.nodes.borrow_mut()[node.0].style.remove(name);
        self.log(Op::Mutate { node: *node, what: "style" });
        Ok(())
    }

    fn transition_properties(&self, node: &NodeId) -> Vec<String> {
        self.nodes.borrow()[node.0].transition_properties.clone()
    }

    fn force_reflow(&self) {
        self.reflows.set(self.reflows.get() + 1);
    }

    fn request_animation_frame(&self, callback: FrameCallback) {
        self.frames.borrow_mut().push(callback);
    }

    fn on_transition_end(&self, node: &NodeId, callback: TransitionEndCallback<NodeId>) {
        self.nodes.borrow_mut()[node.0].transition_end.push(callback);
    }
}

impl EventApi for MemoryBackend {
    fn add_event_listener(&self, node: &NodeId, name: &str, listener: Listener<Self>) {
        self.nodes.borrow_mut()[node.0]
            .listeners
            .push((name.to_string(), listener));
    }

    fn remove_event_listener(&self, node: &NodeId, name: &str, listener: &Listener<Self>) {
        let mut nodes = self.nodes.borrow_mut();
        let listeners = &mut nodes[node.0].listeners;
        if let Some(index) = listeners
            .iter()
            .position(|(n, l)| n == name && std::rc::Rc::ptr_eq(l, listener))
        {
            listeners.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_before_moves_attached_node() {
        let backend = MemoryBackend::new();
        let ul = backend.create_element("ul").unwrap();
        let a = backend.create_element("li").unwrap();
        let b = backend.create_element("li").unwrap();
        backend.append_child(&ul, &a).unwrap();
        backend.append_child(&ul, &b).unwrap();

        backend.insert_before(&ul, &b, Some(&a)).unwrap();
        assert_eq!(backend.child_ids(&ul), vec![b, a]);
        assert_eq!(backend.moves(), 1);
    }

    #[test]
    fn test_foreign_reference_is_an_error() {
        let backend = MemoryBackend::new();
        let ul = backend.create_element("ul").unwrap();
        let a = backend.create_element("li").unwrap();
        let stray = backend.create_element("li").unwrap();
        assert!(backend.insert_before(&ul, &a, Some(&stray)).is_err());
        assert!(backend.remove_child(&ul, &a).is_err());
    }

    #[test]
    fn test_serialize_is_canonical() {
        let backend = MemoryBackend::new();
        let div = backend.create_element("div").unwrap();
        backend.set_attribute(&div, "id", "x").unwrap();
        backend.add_class(&div, "b").unwrap();
        backend.add_class(&div, "a").unwrap();
        backend.set_style(&div, "color", "red").unwrap();
        let text = backend.create_text_node("hi").unwrap();
        let comment = backend.create_comment("c").unwrap();
        backend.append_child(&div, &text).unwrap();
        backend.append_child(&div, &comment).unwrap();

        assert_eq!(
            backend.serialize(&div),
            "<div class=\"a b\" id=\"x\" style=\"color:red;\">hi<!--c--></div>"
        );
        assert_eq!(backend.text_content(&div).as_deref(), Some("hic"));
    }

    #[test]
    fn test_set_text_content_replaces_children() {
        let backend = MemoryBackend::new();
        let div = backend.create_element("div").unwrap();
        let span = backend.create_element("span").unwrap();
        backend.append_child(&div, &span).unwrap();

        backend.set_text_content(&div, Some("x")).unwrap();
        assert_eq!(backend.serialize(&div), "<div>x</div>");
        assert_eq!(backend.parent_node(&span), None);

        backend.set_text_content(&div, Some("")).unwrap();
        assert!(backend.child_ids(&div).is_empty());
    }

    #[test]
    fn test_frames_run_one_generation_at_a_time() {
        let backend = std::rc::Rc::new(MemoryBackend::new());
        let hits = std::rc::Rc::new(Cell::new(0));
        let (b, h) = (backend.clone(), hits.clone());
        backend.request_animation_frame(Box::new(move || {
            let h = h.clone();
            b.request_animation_frame(Box::new(move || h.set(h.get() + 1)));
        }));

        assert_eq!(backend.run_frame(), 1);
        assert_eq!(hits.get(), 0);
        assert_eq!(backend.run_frame(), 1);
        assert_eq!(hits.get(), 1);
    }
}
