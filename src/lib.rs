//! # spark-vdom
//!
//! Renderer-agnostic virtual tree reconciliation.
//!
//! Callers describe the UI as a fresh [`VNode`] tree every pass. The
//! [`Engine`] compares it against the tree of the previous pass and applies
//! the minimal set of mutations to a live tree owned by a [`Backend`].
//! Cross-cutting concerns (attributes, classes, styles, listeners) are
//! applied by [`Module`]s plugged into the engine at construction.
//!
//! ## Architecture
//!
//! ```text
//! h(..) / thunk(..) / to_vnode(..)     → VNode tree
//! Engine::patch(old, new)              → create_elm / patch_vnode / update_children / remove_vnodes
//!   └─ ModuleSet (pre, create, update, destroy, remove, post)
//!   └─ Backend (+ AttributeApi, ClassApi, PropertyApi, StyleApi, EventApi)
//! ```
//!
//! ## Modules
//!
//! - [`vnode`] - VNode model and the `same_node` identity oracle
//! - [`types`] - Keys, attribute values, style phases
//! - [`hooks`] - Per-node lifecycle hooks
//! - [`renderer`] - Backend capability traits
//! - [`pipeline`] - Module trait, phase table, removal completion
//! - [`engine`] - Mount, patch, keyed differ, removal
//! - [`primitives`] - `h` builder, thunks, live-tree adapter
//! - [`modules`] - Attributes, class, props, dataset, style, event listeners
//!
//! ## Example
//!
//! ```ignore
//! use spark_vdom::{Engine, h};
//! use spark_vdom::modules::{AttributesModule, ClassModule};
//!
//! let engine = Engine::new(backend.clone(), vec![Box::new(ClassModule), Box::new(AttributesModule)]);
//! let tree = engine.patch_element(&root, h("div#app").class("ready", true).text("hi").build())?;
//! let tree = engine.patch(tree, h("div#app").text("bye").build())?;
//! ```

pub mod engine;
pub mod error;
pub mod hooks;
pub mod modules;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod types;
pub mod vnode;

pub use engine::{Config, Engine};
pub use error::{Error, Result};
pub use hooks::Hooks;
pub use pipeline::{Module, ModuleSet, Phases, RemoveDone};
pub use primitives::{VNodeBuilder, comment, h, text, thunk, to_vnode};
pub use renderer::{AttributeApi, Backend, ClassApi, EventApi, PropertyApi, StyleApi};
pub use types::{AttrValue, Key, VNodeStyle};
pub use vnode::{VNode, VNodeData, same_node, vnode};
