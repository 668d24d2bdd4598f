#![doc = r#"
The in-memory tree served by the operation layer.

The tree is strictly owned: a [`DirNode`] owns its children, [`FsTree`]
owns the root. It is built once, bottom-up, and never changes afterwards.
"#]

mod metadata;
pub use metadata::*;

mod tree;
pub use tree::*;
