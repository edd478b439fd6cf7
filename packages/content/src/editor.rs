//! Block sequence editing operations.
//!
//! The block editor component owns a `Vec<Block>` and mutates it only
//! through [`BlockList`]; after each successful call it hands the whole new
//! sequence to its host.

use uuid::Uuid;

use crate::block::{Block, BlockPatch, BlockType};

/// A fresh block identifier. Identifiers are never reused.
pub fn new_block_id() -> String {
    Uuid::new_v4().to_string()
}

pub trait BlockList {
    /// Add an empty block of `kind` at the end and return its id.
    fn add_block(&mut self, kind: BlockType) -> String;

    /// Merge `patch` into the block with `id`. Returns false if absent.
    fn update_block(&mut self, id: &str, patch: BlockPatch) -> bool;

    /// Delete the block with `id`. Returns false if absent.
    fn remove_block(&mut self, id: &str) -> bool;

    /// Move the block at `from` to `to`, keeping every other block's relative
    /// order. An unresolved target (`None`) or an out-of-range index leaves
    /// the order unchanged.
    fn reorder_block(&mut self, from: usize, to: Option<usize>) -> bool;

    /// Drag-and-drop form of [`BlockList::reorder_block`]: move the block `active`
    /// to the position currently held by `over`.
    fn move_block(&mut self, active: &str, over: Option<&str>) -> bool;

    fn block_position(&self, id: &str) -> Option<usize>;
}

impl BlockList for Vec<Block> {
    fn add_block(&mut self, kind: BlockType) -> String {
        let id = new_block_id();
        self.push(Block::empty(id.clone(), kind));
        id
    }

    fn update_block(&mut self, id: &str, patch: BlockPatch) -> bool {
        let Some(block) = self.iter_mut().find(|b| b.id == id) else {
            return false;
        };
        if let Some(text) = patch.text {
            block.text = Some(text);
        }
        if let Some(src) = patch.src {
            block.src = Some(src);
        }
        if let Some(alt) = patch.alt {
            block.alt = Some(alt);
        }
        if let Some(caption) = patch.caption {
            block.caption = Some(caption);
        }
        if let Some(items) = patch.items {
            set_items(block, items);
        }
        true
    }

    fn remove_block(&mut self, id: &str) -> bool {
        let before = self.len();
        self.retain(|b| b.id != id);
        self.len() != before
    }

    fn reorder_block(&mut self, from: usize, to: Option<usize>) -> bool {
        let Some(to) = to else {
            return false;
        };
        if from >= self.len() || to >= self.len() {
            return false;
        }
        if from != to {
            let block = self.remove(from);
            self.insert(to, block);
        }
        true
    }

    fn move_block(&mut self, active: &str, over: Option<&str>) -> bool {
        let Some(from) = self.block_position(active) else {
            return false;
        };
        let to = over.and_then(|id| self.block_position(id));
        self.reorder_block(from, to)
    }

    fn block_position(&self, id: &str) -> Option<usize> {
        self.iter().position(|b| b.id == id)
    }
}

/// Replace a list's items, keeping existing child ids by position so item
/// identity survives ordinary typing.
fn set_items(block: &mut Block, items: Vec<String>) {
    let mut children = Vec::with_capacity(items.len());
    for (i, text) in items.into_iter().enumerate() {
        let id = block
            .children
            .get(i)
            .map(|c| c.id.clone())
            .unwrap_or_else(new_block_id);
        children.push(Block::item(id, text));
    }
    block.children = children;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(blocks: &[Block]) -> Vec<String> {
        blocks.iter().map(|b| b.id.clone()).collect()
    }

    fn sample() -> Vec<Block> {
        ["a", "b", "c", "d"]
            .iter()
            .map(|id| Block::empty(id.to_string(), BlockType::Paragraph))
            .collect()
    }

    #[test]
    fn append_creates_empty_block_with_fresh_id() {
        let mut blocks = sample();
        let id = blocks.add_block(BlockType::Code);
        assert_eq!(blocks.len(), 5);
        let last = blocks.last().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.kind, BlockType::Code);
        assert_eq!(last.text.as_deref(), Some(""));
    }

    #[test]
    fn remove_then_append_never_reuses_the_id() {
        let mut blocks: Vec<Block> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let id = blocks.add_block(BlockType::Paragraph);
            assert!(seen.insert(id.clone()));
            assert!(blocks.remove_block(&id));
        }
        assert!(blocks.is_empty());
    }

    #[test]
    fn update_merges_partial_payload() {
        let mut blocks = sample();
        assert!(blocks.update_block("b", BlockPatch::text("hello")));
        assert!(blocks.update_block("b", BlockPatch::caption("cap")));
        let b = &blocks[1];
        assert_eq!(b.text.as_deref(), Some("hello"));
        assert_eq!(b.caption.as_deref(), Some("cap"));
        assert_eq!(b.kind, BlockType::Paragraph);
    }

    #[test]
    fn update_of_missing_id_is_a_no_op() {
        let mut blocks = sample();
        let before = blocks.clone();
        assert!(!blocks.update_block("zzz", BlockPatch::text("x")));
        assert_eq!(blocks, before);
    }

    #[test]
    fn list_items_keep_ids_by_position() {
        let mut blocks = vec![Block::empty("l".into(), BlockType::BulletList)];
        blocks.update_block("l", BlockPatch::items(["one", "two"]));
        let first_ids = ids(&blocks[0].children);
        blocks.update_block("l", BlockPatch::items(["one!", "two", "three"]));
        let children = &blocks[0].children;
        assert_eq!(children.len(), 3);
        assert_eq!(ids(&children[..2]), first_ids);
        assert!(!first_ids.contains(&children[2].id));
        assert_eq!(children[0].text.as_deref(), Some("one!"));
    }

    #[test]
    fn reorder_moves_block_and_keeps_others_in_order() {
        let mut blocks = sample();
        assert!(blocks.reorder_block(0, Some(2)));
        assert_eq!(ids(&blocks), ["b", "c", "a", "d"]);
        assert!(blocks.reorder_block(3, Some(0)));
        assert_eq!(ids(&blocks), ["d", "b", "c", "a"]);
    }

    #[test]
    fn reorder_round_trip_restores_order() {
        let original = sample();
        for i in 0..original.len() {
            for j in 0..original.len() {
                let mut blocks = original.clone();
                blocks.reorder_block(i, Some(j));
                blocks.reorder_block(j, Some(i));
                assert_eq!(blocks, original, "{i} -> {j}");
            }
        }
    }

    #[test]
    fn unresolved_drop_target_is_a_no_op() {
        let mut blocks = sample();
        assert!(!blocks.reorder_block(1, None));
        assert!(!blocks.move_block("b", None));
        assert!(!blocks.move_block("b", Some("nope")));
        assert!(!blocks.reorder_block(9, Some(0)));
        assert_eq!(ids(&blocks), ["a", "b", "c", "d"]);
    }

    #[test]
    fn move_to_uses_target_position() {
        let mut blocks = sample();
        assert!(blocks.move_block("d", Some("b")));
        assert_eq!(ids(&blocks), ["a", "d", "b", "c"]);
    }
}
