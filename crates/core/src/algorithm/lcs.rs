use crate::algorithm::{self, Opcode, SequenceAligner};

/// Longest-common-subsequence aligner producing a minimal edit script
#[derive(Debug, Clone, Default)]
pub struct LcsAligner;

impl LcsAligner {
    pub fn new() -> Self {
        Self
    }
}

impl SequenceAligner for LcsAligner {
    fn align(&self, source: &[String], target: &[String]) -> Vec<Opcode> {
        let matches = algorithm::longest_common_subsequence(source, target);
        algorithm::opcodes_from_matches(source.len(), target.len(), &matches)
    }

    fn name(&self) -> &str {
        "lcs"
    }

    fn clone_box(&self) -> Box<dyn SequenceAligner> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::OpTag;

    fn keys(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identical_sequences() {
        let seq = keys(&["a", "b", "c"]);
        let ops = LcsAligner::new().align(&seq, &seq);
        assert_eq!(ops, vec![Opcode::new(OpTag::Equal, 0..3, 0..3)]);
    }

    #[test]
    fn test_all_deletions() {
        let ops = LcsAligner::new().align(&keys(&["hello", "world"]), &[]);
        assert_eq!(ops, vec![Opcode::new(OpTag::Delete, 0..2, 0..0)]);
    }

    #[test]
    fn test_all_insertions() {
        let ops = LcsAligner::new().align(&[], &keys(&["hello", "world"]));
        assert_eq!(ops, vec![Opcode::new(OpTag::Insert, 0..0, 0..2)]);
    }

    #[test]
    fn test_replace_run_with_uneven_lengths() {
        let ops = LcsAligner::new().align(
            &keys(&["hello world", "goodbye"]),
            &keys(&["hello wrold"]),
        );
        assert_eq!(ops, vec![Opcode::new(OpTag::Replace, 0..2, 0..1)]);
    }

    #[test]
    fn test_repeated_boilerplate_participates() {
        // Frequent elements are still matched
        let source = keys(&["the", "the", "the", "end"]);
        let target = keys(&["the", "the", "x", "the", "end"]);
        let ops = LcsAligner::new().align(&source, &target);

        let equal: usize = ops
            .iter()
            .filter(|op| op.tag == OpTag::Equal)
            .map(Opcode::source_len)
            .sum();
        assert_eq!(equal, 4);
        assert!(ops.iter().any(|op| op.tag == OpTag::Insert && op.target == (2..3)));
    }

    #[test]
    fn test_deterministic() {
        let source = keys(&["a", "b", "a", "c", "b"]);
        let target = keys(&["b", "a", "c", "a", "b"]);
        let aligner = LcsAligner::new();
        assert_eq!(aligner.align(&source, &target), aligner.align(&source, &target));
    }
}
