//! VNode Primitives - building blocks for description trees.
//!
//! - [`h`] - element builder, plus [`text`] and [`comment`] leaves
//! - [`thunk`] - memoized subtree, re-rendered only when its arguments change
//! - [`to_vnode`] - describe a live backend subtree, for the first patch
//!
//! # Example
//!
//! ```ignore
//! fn row(item: &Item) -> VNode<Dom> {
//!     h("tr").child(h("td").text(&item.name)).build()
//! }
//!
//! let table = h("table")
//!     .children(items.iter().map(|item| thunk("tr", item.id, row, item.clone())))
//!     .build();
//! ```

mod adapter;
mod h;
mod thunk;

pub use adapter::to_vnode;
pub use h::{SVG_NAMESPACE, VNodeBuilder, comment, h, text};
pub use thunk::{THUNK_EXTENSION, thunk};
