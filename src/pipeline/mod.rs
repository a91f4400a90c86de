//! Module Hook Pipeline
//!
//! Modules apply one cross-cutting concern (attributes, classes, styles,
//! listeners, ...) to every node of a patch pass. The pipeline is built once
//! when the engine is constructed and never changes afterwards.
//!
//! # Phases
//!
//! ```text
//! pre ─┬─ create(empty, new)   mounting an element
//!      ├─ update(old, new)     patching a reused node
//!      ├─ destroy(node)        node or ancestor leaving the tree
//!      └─ remove(node, done)   node itself leaving; may delay detachment
//! post
//! ```
//!
//! `pre` and `post` fire once per pass. The others fire per affected node.
//! Within a phase, modules run in registration order.
//!
//! A module declares the callbacks it provides through [`Module::phases`];
//! only those are dispatched. This matters for `remove`, where the number of
//! participating modules decides how many completions a removal waits for.

mod remove;

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use crate::error::Result;
use crate::renderer::Backend;
use crate::vnode::VNode;

pub use remove::RemoveDone;

// =============================================================================
// Phases
// =============================================================================

bitflags! {
    /// Set of module callbacks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Phases: u8 {
        const PRE = 1 << 0;
        const CREATE = 1 << 1;
        const UPDATE = 1 << 2;
        const DESTROY = 1 << 3;
        const REMOVE = 1 << 4;
        const POST = 1 << 5;
    }
}

const PHASE_COUNT: usize = 6;

impl Phases {
    /// Slot of a single phase in the dispatch table.
    fn slot(self) -> usize {
        debug_assert_eq!(self.bits().count_ones(), 1, "slot() takes a single phase");
        self.bits().trailing_zeros() as usize
    }
}

// =============================================================================
// Module
// =============================================================================

/// A side-effect module.
///
/// Every callback has a no-op default; implement the ones listed in
/// [`phases`](Module::phases). State a module needs across passes lives in
/// the module instance itself (use `Cell`/`RefCell`), so several engines can
/// run side by side.
pub trait Module<B: Backend> {
    /// Callbacks this module provides.
    fn phases(&self) -> Phases;

    fn pre(&self, _api: &Rc<B>) -> Result<()> {
        Ok(())
    }

    /// An element was created. `empty` is the engine's canonical empty node.
    fn create(&self, _api: &Rc<B>, _empty: &VNode<B>, _vnode: &VNode<B>) -> Result<()> {
        Ok(())
    }

    fn update(&self, _api: &Rc<B>, _old: &VNode<B>, _vnode: &VNode<B>) -> Result<()> {
        Ok(())
    }

    fn destroy(&self, _api: &Rc<B>, _vnode: &VNode<B>) -> Result<()> {
        Ok(())
    }

    /// The node is being removed. Call `done` once the module's side effect
    /// has finished; detachment waits for it.
    fn remove(&self, _api: &Rc<B>, _vnode: &VNode<B>, done: RemoveDone<B>) -> Result<()> {
        done.done();
        Ok(())
    }

    fn post(&self, _api: &Rc<B>) -> Result<()> {
        Ok(())
    }
}

// =============================================================================
// ModuleSet
// =============================================================================

/// Immutable phase → modules table, in registration order.
pub struct ModuleSet<B: Backend> {
    modules: Vec<Box<dyn Module<B>>>,
    by_phase: [Vec<usize>; PHASE_COUNT],
}

impl<B: Backend> ModuleSet<B> {
    pub fn new(modules: Vec<Box<dyn Module<B>>>) -> Self {
        let mut by_phase: [Vec<usize>; PHASE_COUNT] = Default::default();
        for (index, module) in modules.iter().enumerate() {
            for phase in module.phases().iter() {
                by_phase[phase.slot()].push(index);
            }
        }
        Self { modules, by_phase }
    }

    /// Modules providing `phase`, in registration order.
    pub fn for_phase(&self, phase: Phases) -> impl Iterator<Item = &dyn Module<B>> + '_ {
        self.by_phase[phase.slot()]
            .iter()
            .map(|&index| self.modules[index].as_ref())
    }

    /// Number of modules providing `phase`.
    pub fn count(&self, phase: Phases) -> usize {
        self.by_phase[phase.slot()].len()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<B: Backend> fmt::Debug for ModuleSet<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phases: Vec<Phases> = self.modules.iter().map(|m| m.phases()).collect();
        f.debug_struct("ModuleSet").field("modules", &phases).finish()
    }
}
