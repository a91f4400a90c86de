//! Keyed List Differ - reconciles two ordered sibling sequences.
//!
//! # Algorithm
//!
//! Four pointers converge over the old and new windows. Each step, first
//! match wins:
//!
//! 1. old start slot consumed → advance
//! 2. old end slot consumed → retreat
//! 3. same(old start, new start) → patch, advance both
//! 4. same(old end, new end) → patch, retreat both
//! 5. same(old start, new end) → patch, move after old end ("moved right")
//! 6. same(old end, new start) → patch, move before old start ("moved left")
//! 7. key lookup (map built once, lazily, over the remaining old window):
//!    - miss → create, insert before old start
//!    - hit with a different selector → create fresh
//!    - hit → patch, consume the old slot, move before old start
//!
//! When the old window runs out the rest of the new window is inserted;
//! when the new window runs out the rest of the old window is removed.
//!
//! Positional matches are tried before the key map even when a key match
//! exists: they need no move.
//!
//! New children are a plain `Vec`, so only old slots can be consumed.

use std::collections::{HashMap, HashSet};

use super::{Engine, InsertQueue};
use crate::error::Result;
use crate::renderer::Backend;
use crate::types::Key;
use crate::vnode::{VNode, same_node};

impl<B: Backend> Engine<B> {
    pub(crate) fn update_children(
        &self,
        parent: &B::Node,
        old_ch: &[VNode<B>],
        new_ch: &mut [VNode<B>],
        queue: &mut InsertQueue<B>,
    ) -> Result<()> {
        if self.config.check_duplicate_keys {
            warn_duplicate_keys(new_ch);
        }

        let api = &self.backend;
        let mut old: Vec<Option<&VNode<B>>> = old_ch.iter().map(Some).collect();
        let (mut old_start, mut old_end) = (0, old.len());
        let (mut new_start, mut new_end) = (0, new_ch.len());
        let mut key_map: Option<HashMap<&Key, usize>> = None;

        while old_start < old_end && new_start < new_end {
            let Some(old_start_node) = old[old_start] else {
                old_start += 1;
                continue;
            };
            let Some(old_end_node) = old[old_end - 1] else {
                old_end -= 1;
                continue;
            };

            if same_node(old_start_node, &new_ch[new_start]) {
                self.patch_vnode(old_start_node, &mut new_ch[new_start], queue)?;
                old_start += 1;
                new_start += 1;
            } else if same_node(old_end_node, &new_ch[new_end - 1]) {
                self.patch_vnode(old_end_node, &mut new_ch[new_end - 1], queue)?;
                old_end -= 1;
                new_end -= 1;
            } else if same_node(old_start_node, &new_ch[new_end - 1]) {
                // Moved right
                self.patch_vnode(old_start_node, &mut new_ch[new_end - 1], queue)?;
                let after = api.next_sibling(old_end_node.handle()?);
                api.insert_before(parent, old_start_node.handle()?, after.as_ref())?;
                old_start += 1;
                new_end -= 1;
            } else if same_node(old_end_node, &new_ch[new_start]) {
                // Moved left
                self.patch_vnode(old_end_node, &mut new_ch[new_start], queue)?;
                api.insert_before(parent, old_end_node.handle()?, Some(old_start_node.handle()?))?;
                old_end -= 1;
                new_start += 1;
            } else {
                let map = key_map.get_or_insert_with(|| {
                    tracing::trace!(window = old_end - old_start, "building key map");
                    key_to_old_index(&old, old_start, old_end)
                });

                // Consumed slots and slots outside the window are terminal
                let found = new_ch[new_start]
                    .key
                    .as_ref()
                    .and_then(|key| map.get(key).copied())
                    .filter(|index| (old_start..old_end).contains(index))
                    .and_then(|index| old[index].map(|node| (index, node)));

                let reference = old_start_node.handle()?;
                match found {
                    Some((index, to_move)) if to_move.sel == new_ch[new_start].sel => {
                        self.patch_vnode(to_move, &mut new_ch[new_start], queue)?;
                        old[index] = None;
                        api.insert_before(parent, to_move.handle()?, Some(reference))?;
                    }
                    _ => {
                        let elm = self.create_elm(&mut new_ch[new_start], queue)?;
                        api.insert_before(parent, &elm, Some(reference))?;
                    }
                }
                new_start += 1;
            }
        }

        if old_start >= old_end {
            if new_start < new_end {
                let before = new_ch.get(new_end).and_then(|node| node.elm.clone());
                self.add_vnodes(parent, before.as_ref(), &mut new_ch[new_start..new_end], queue)?;
            }
        } else if new_start >= new_end {
            self.remove_vnodes(parent, old[old_start..old_end].iter().flatten().copied())?;
        }

        Ok(())
    }
}

/// Key → index over `children[start..end]`; the last occurrence of a key wins.
fn key_to_old_index<'a, B: Backend>(children: &[Option<&'a VNode<B>>], start: usize, end: usize) -> HashMap<&'a Key, usize> {
    children[start..end]
        .iter()
        .enumerate()
        .filter_map(|(offset, slot)| {
            let node: &'a VNode<B> = (*slot)?;
            Some((node.key.as_ref()?, start + offset))
        })
        .collect()
}

fn warn_duplicate_keys<B: Backend>(children: &[VNode<B>]) {
    let mut seen = HashSet::new();
    for key in children.iter().filter_map(|child| child.key.as_ref()) {
        if !seen.insert(key) {
            tracing::warn!(%key, "duplicate key among siblings; reconciliation of this list is undefined");
        }
    }
}
