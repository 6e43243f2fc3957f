//! Auto-fix model: edits, patches and patch application.
//!
//! A rule builds a [`Patch`] through a [`Fixer`]. A patch is an immutable,
//! sorted list of disjoint edits; [`Fixer::finish`] refuses to build one
//! whose edits overlap. [`apply_patches`] merges the patches of one lint
//! pass, skipping any patch that intersects one already accepted.

use serde::Serialize;
use tracing::debug;
use zod_v4_syntax::{NodeId, NodeKind, SyntaxTree};

use crate::error::FixError;

/// Replace `source[start..end]` with `replacement`. An empty range is an
/// insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    fn is_insertion(&self) -> bool {
        self.start == self.end
    }

    /// Whether two edits cannot both be applied unambiguously. `self` must
    /// not start after `other`.
    fn conflicts_with(&self, other: &Edit) -> bool {
        other.start < self.end
            || (other.start == self.start && self.is_insertion() && other.is_insertion())
    }
}

/// An ordered set of disjoint edits implementing one auto-fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patch {
    edits: Vec<Edit>,
}

impl Patch {
    /// Build a patch from edits in any order.
    pub fn new(mut edits: Vec<Edit>) -> Result<Self, FixError> {
        if edits.is_empty() {
            return Err(FixError::Empty);
        }
        edits.sort_by_key(|edit| (edit.start, edit.end));
        for pair in edits.windows(2) {
            if pair[0].conflicts_with(&pair[1]) {
                return Err(FixError::Overlap {
                    first: pair[0].start..pair[0].end,
                    second: pair[1].start..pair[1].end,
                });
            }
        }
        Ok(Self { edits })
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Smallest range covering every edit.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.edits.first().map_or(0, |edit| edit.start);
        let end = self.edits.iter().map(|edit| edit.end).max().unwrap_or(start);
        start..end
    }

    /// Apply this patch alone to `source`.
    pub fn apply(&self, source: &str) -> Result<String, FixError> {
        let mut output = source.to_string();
        for edit in self.edits.iter().rev() {
            if !valid_range(source, edit.start, edit.end) {
                return Err(FixError::OutOfBounds {
                    range: edit.start..edit.end,
                    len: source.len(),
                });
            }
            output.replace_range(edit.start..edit.end, &edit.replacement);
        }
        Ok(output)
    }
}

fn valid_range(source: &str, start: usize, end: usize) -> bool {
    start <= end
        && end <= source.len()
        && source.is_char_boundary(start)
        && source.is_char_boundary(end)
}

/// Edit builder handed to fix-producing rule code.
pub struct Fixer<'t> {
    tree: &'t SyntaxTree,
    edits: Vec<Edit>,
}

impl<'t> Fixer<'t> {
    pub fn new(tree: &'t SyntaxTree) -> Self {
        Self {
            tree,
            edits: Vec::new(),
        }
    }

    /// Replace the text of `node`.
    pub fn replace_text(&mut self, node: NodeId, text: impl Into<String>) -> &mut Self {
        let span = self.tree.span(node);
        self.replace_text_range(span.start..span.end, text)
    }

    pub fn replace_text_range(
        &mut self,
        range: std::ops::Range<usize>,
        text: impl Into<String>,
    ) -> &mut Self {
        self.edits.push(Edit {
            start: range.start,
            end: range.end,
            replacement: text.into(),
        });
        self
    }

    /// Insert `text` right after `range`.
    pub fn insert_text_after_range(
        &mut self,
        range: std::ops::Range<usize>,
        text: impl Into<String>,
    ) -> &mut Self {
        self.replace_text_range(range.end..range.end, text)
    }

    /// Rename the key of an object literal property. Shorthand `{ a }`
    /// becomes `{ b: a }` so the value keeps referring to `a`.
    pub fn rename_property_key(&mut self, property: NodeId, new_key: &str) -> &mut Self {
        let tree = self.tree;
        let NodeKind::Property { key, shorthand, .. } = tree.kind(property) else {
            return self;
        };
        match tree.identifier_name(*key) {
            Some(name) if *shorthand => {
                let replacement = format!("{new_key}: {name}");
                self.replace_text(*key, replacement)
            }
            _ => self.replace_text(*key, new_key),
        }
    }

    /// Validate the collected edits into a patch.
    pub fn finish(self) -> Result<Patch, FixError> {
        Patch::new(self.edits)
    }

    /// Like [`finish`](Self::finish), but logs and drops a rejected patch
    /// so the rule can still report without a fix.
    pub fn finish_or_withhold(self, rule: &str) -> Option<Patch> {
        match self.finish() {
            Ok(patch) => Some(patch),
            Err(err) => {
                debug!(rule, %err, "fix withheld");
                None
            }
        }
    }
}

/// Result of merging one pass worth of patches into a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub output: String,
    pub applied: usize,
    pub skipped: usize,
}

/// Apply `patches` to `source`. Patches are considered in source order; a
/// patch whose range intersects an accepted patch, or that does not fit
/// the source, is skipped.
pub fn apply_patches<'p>(
    source: &str,
    patches: impl IntoIterator<Item = &'p Patch>,
) -> FixOutcome {
    let mut sorted: Vec<&Patch> = patches.into_iter().collect();
    sorted.sort_by_key(|patch| (patch.range().start, patch.range().end));

    let mut accepted: Vec<&Patch> = Vec::new();
    let mut skipped = 0;
    let mut last_end: Option<usize> = None;

    for patch in sorted {
        let range = patch.range();
        let fits = patch
            .edits()
            .iter()
            .all(|edit| valid_range(source, edit.start, edit.end));
        let overlaps = last_end.is_some_and(|end| range.start < end);
        if !fits || overlaps {
            debug!(start = range.start, end = range.end, fits, "patch skipped");
            skipped += 1;
            continue;
        }
        last_end = Some(range.end);
        accepted.push(patch);
    }

    let mut output = source.to_string();
    for edit in accepted
        .iter()
        .rev()
        .flat_map(|patch| patch.edits().iter().rev())
    {
        output.replace_range(edit.start..edit.end, &edit.replacement);
    }

    FixOutcome {
        output,
        applied: accepted.len(),
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(start: usize, end: usize, text: &str) -> Edit {
        Edit {
            start,
            end,
            replacement: text.to_string(),
        }
    }

    #[test]
    fn test_patch_sorts_edits() {
        let patch = Patch::new(vec![edit(10, 12, "b"), edit(0, 2, "a")]).unwrap();
        assert_eq!(patch.edits()[0].start, 0);
        assert_eq!(patch.range(), 0..12);
    }

    #[test]
    fn test_patch_rejects_overlap() {
        let err = Patch::new(vec![edit(0, 5, "a"), edit(3, 8, "b")]).unwrap_err();
        assert!(matches!(err, FixError::Overlap { .. }));
    }

    #[test]
    fn test_patch_rejects_double_insertion() {
        let err = Patch::new(vec![edit(4, 4, "a"), edit(4, 4, "b")]).unwrap_err();
        assert!(matches!(err, FixError::Overlap { .. }));
    }

    #[test]
    fn test_adjacent_edits_are_disjoint() {
        let patch = Patch::new(vec![edit(0, 3, "x"), edit(3, 3, "y"), edit(3, 5, "z")]).unwrap();
        assert_eq!(patch.apply("abcde").unwrap(), "xyz");
    }

    #[test]
    fn test_empty_patch_rejected() {
        assert_eq!(Patch::new(vec![]).unwrap_err(), FixError::Empty);
    }

    #[test]
    fn test_rename_property_key() {
        let source = "f({ message, required_error: 'x' })";
        let tree = zod_v4_syntax::parse(source).unwrap();
        let properties: Vec<_> = tree
            .preorder()
            .filter(|&id| matches!(tree.kind(id), NodeKind::Property { .. }))
            .collect();
        let mut fixer = Fixer::new(&tree);
        fixer
            .rename_property_key(properties[0], "error")
            .rename_property_key(properties[1], "error");
        let patch = fixer.finish().unwrap();
        assert_eq!(patch.apply(source).unwrap(), "f({ error: message, error: 'x' })");
    }

    #[test]
    fn test_apply_patches_skips_conflicts() {
        let first = Patch::new(vec![edit(0, 3, "one")]).unwrap();
        let second = Patch::new(vec![edit(2, 5, "two")]).unwrap();
        let third = Patch::new(vec![edit(6, 7, "three")]).unwrap();
        let outcome = apply_patches("abcdefg", [&second, &third, &first]);
        assert_eq!(outcome.output, "onedefthree");
        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_apply_patches_rejects_out_of_bounds() {
        let patch = Patch::new(vec![edit(2, 40, "x")]).unwrap();
        let outcome = apply_patches("abc", [&patch]);
        assert_eq!(outcome.output, "abc");
        assert_eq!(outcome.skipped, 1);
    }
}
