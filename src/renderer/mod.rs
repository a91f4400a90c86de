//! Renderer Backend - capability interface over native render objects.
//!
//! The engine never touches native objects directly. Everything it needs is
//! expressed by [`Backend`]: creating nodes, querying tree structure and
//! mutating it. The concrete modules need more than that (attributes, classes,
//! styles, listeners), so their requirements live in separate capability
//! traits that a backend implements only if it wants those modules:
//!
//! - [`AttributeApi`] - namespaced attributes, removal, listing
//! - [`ClassApi`] - class list toggling
//! - [`PropertyApi`] - native object properties
//! - [`StyleApi`] - inline styles, transitions and animation frames
//! - [`EventApi`] - event listener registration
//!
//! # Pattern: Interior Mutability
//!
//! All methods take `&self`. The engine shares its backend as `Rc<B>` because
//! removal completions may run after a patch pass has returned and still need
//! to detach nodes. Backends keep their mutable state behind `RefCell`/`Cell`.

use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::error::Result;
use crate::types::AttrValue;

#[cfg(test)]
pub(crate) mod memory;

// =============================================================================
// Core capability set
// =============================================================================

/// Operations the reconciliation engine performs on native render objects.
///
/// Mutations return [`Result`] so that backend failures propagate out of a
/// patch pass; queries are infallible.
pub trait Backend {
    /// Handle to a live native object. Cheap to clone.
    type Node: Clone + Eq + Hash + Debug;

    /// Event payload delivered to listeners. Use `()` if the backend has no events.
    type Event;

    /// Create an element with the given tag.
    fn create_element(&self, tag: &str) -> Result<Self::Node>;

    /// Create an element inside a markup namespace.
    fn create_element_ns(&self, namespace: &str, tag: &str) -> Result<Self::Node>;

    /// Create a text node.
    fn create_text_node(&self, text: &str) -> Result<Self::Node>;

    /// Create a comment node.
    fn create_comment(&self, text: &str) -> Result<Self::Node>;

    /// Insert `node` into `parent` before `reference`, or at the end when
    /// `reference` is `None`. A node that already has a parent is moved.
    fn insert_before(
        &self,
        parent: &Self::Node,
        node: &Self::Node,
        reference: Option<&Self::Node>,
    ) -> Result<()>;

    /// Detach `node` from `parent`.
    fn remove_child(&self, parent: &Self::Node, node: &Self::Node) -> Result<()>;

    /// Append `node` as the last child of `parent`.
    fn append_child(&self, parent: &Self::Node, node: &Self::Node) -> Result<()>;

    /// Parent of `node`, if attached.
    fn parent_node(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Following sibling of `node`.
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// First child of `node`.
    fn first_child(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Tag name of an element, in the backend's own casing.
    fn tag_name(&self, node: &Self::Node) -> String;

    /// Replace the text content of `node`. On elements this drops every child.
    fn set_text_content(&self, node: &Self::Node, text: Option<&str>) -> Result<()>;

    /// Text content of `node`.
    fn text_content(&self, node: &Self::Node) -> Option<String>;

    /// Set an attribute. Used for the id and class parts of a selector.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

    /// Read an attribute.
    fn get_attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn is_element(&self, node: &Self::Node) -> bool;

    fn is_text(&self, node: &Self::Node) -> bool;

    fn is_comment(&self, node: &Self::Node) -> bool;
}

// =============================================================================
// Module capabilities
// =============================================================================

/// Attribute operations beyond [`Backend::set_attribute`].
pub trait AttributeApi: Backend {
    /// Set an attribute inside a namespace (`xml:*`, `xlink:*`).
    fn set_attribute_ns(
        &self,
        node: &Self::Node,
        namespace: &str,
        name: &str,
        value: &str,
    ) -> Result<()>;

    /// Remove an attribute. Removing a missing attribute is not an error.
    fn remove_attribute(&self, node: &Self::Node, name: &str) -> Result<()>;

    /// All attributes of an element, in backend order.
    fn attributes(&self, node: &Self::Node) -> Vec<(String, String)>;
}

/// Class list operations.
pub trait ClassApi: Backend {
    fn add_class(&self, node: &Self::Node, name: &str) -> Result<()>;

    fn remove_class(&self, node: &Self::Node, name: &str) -> Result<()>;
}

/// Native object properties.
pub trait PropertyApi: Backend {
    fn set_property(&self, node: &Self::Node, name: &str, value: &AttrValue) -> Result<()>;

    fn remove_property(&self, node: &Self::Node, name: &str) -> Result<()>;

    /// Current live value, used to avoid clobbering user-edited `value`s.
    fn property(&self, node: &Self::Node, name: &str) -> Option<AttrValue>;
}

/// Callback run on an animation frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Callback run when a transition ends; receives the event target.
pub type TransitionEndCallback<N> = Box<dyn FnMut(&N)>;

/// Inline styles and transition plumbing.
pub trait StyleApi: Backend {
    /// Set a style. Names starting with `--` are custom properties.
    fn set_style(&self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

    /// Clear a style.
    fn remove_style(&self, node: &Self::Node, name: &str) -> Result<()>;

    /// Names of the properties the computed style transitions on.
    fn transition_properties(&self, node: &Self::Node) -> Vec<String>;

    /// Flush pending style changes so that following changes transition.
    fn force_reflow(&self);

    /// Run `callback` on the next animation frame.
    fn request_animation_frame(&self, callback: FrameCallback);

    /// Subscribe to transition-end events bubbling through `node`.
    fn on_transition_end(&self, node: &Self::Node, callback: TransitionEndCallback<Self::Node>);
}

/// Listener registered on a native object; receives the event name and payload.
pub type Listener<B> = Rc<dyn Fn(&str, &<B as Backend>::Event)>;

/// Event listener registration.
pub trait EventApi: Backend + Sized {
    fn add_event_listener(&self, node: &Self::Node, name: &str, listener: Listener<Self>);

    /// Remove a listener previously added under `name`, matched by `Rc` identity.
    fn remove_event_listener(&self, node: &Self::Node, name: &str, listener: &Listener<Self>);
}
