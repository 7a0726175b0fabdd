//! Contig identifiers and strand handling
//!
//! Canu names its contigs `tig00000123`. Every segment becomes two graph nodes,
//! `<name>_start` and `<name>_end`, and edges attach to one of them depending on
//! the strand they leave from or arrive on.

use lazy_static::lazy_static;
use regex::Regex;

/// Suffix of the node holding a segment's forward-strand start
pub const START_SUFFIX: &str = "_start";
/// Suffix of the node holding a segment's forward-strand end
pub const END_SUFFIX: &str = "_end";

/// Derive the `tigID` of a segment or node name.
///
/// Strips every `tig` prefix together with its zero padding, then a trailing
/// `_start`/`_end`, so `tig00000042_end` becomes `42`. Anything that does not
/// match is left as is.
pub fn normalize(name: &str) -> String {
    lazy_static! {
        static ref RE_TIG: Regex = Regex::new(r"tig0*").unwrap();
        static ref RE_SIDE: Regex = Regex::new(r"(_start|_end)$").unwrap();
    }
    let stripped = RE_TIG.replace_all(name, "");
    RE_SIDE.replace(&stripped, "").into_owned()
}

/// Name of the start node of a segment
pub fn start_node(segment: &str) -> String {
    format!("{}{}", segment, START_SUFFIX)
}

/// Name of the end node of a segment
pub fn end_node(segment: &str) -> String {
    format!("{}{}", segment, END_SUFFIX)
}

/// Strand a link leaves from or arrives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse a raw strand field. Anything other than `+` or `-` has no strand.
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// Node an edge leaves from.
///
/// Leaving on the minus strand exits where the plus strand begins, so a
/// reverse origin uses the start node; a forward origin uses the end node.
pub fn origin_node(segment: &str, strand: Option<Strand>) -> String {
    match strand {
        Some(Strand::Reverse) => start_node(segment),
        Some(Strand::Forward) => end_node(segment),
        None => segment.to_string(),
    }
}

/// Node an edge arrives at.
///
/// Arriving on the minus strand enters at the end of the forward strand.
pub fn dest_node(segment: &str, strand: Option<Strand>) -> String {
    match strand {
        Some(Strand::Reverse) => end_node(segment),
        Some(Strand::Forward) => start_node(segment),
        None => segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_padded() {
        assert_eq!(normalize("tig00000042"), "42");
        assert_eq!(normalize("tig7_start"), "7");
        assert_eq!(normalize("tig00000123_end"), "123");
    }

    #[test]
    fn test_normalize_side_independent() {
        for name in ["tig001", "tigA", "ctg5", "tig0", "", "tig10_start"] {
            assert_eq!(normalize(&start_node(name)), normalize(&end_node(name)));
        }
    }

    #[test]
    fn test_normalize_unmatched() {
        assert_eq!(normalize("contig_1"), "contig_1");
        assert_eq!(normalize("s1"), "s1");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_only_trailing_side() {
        assert_eq!(normalize("x_start_y"), "x_start_y");
        assert_eq!(normalize("tig100_end"), "100");
    }

    #[test]
    fn test_strand_parse() {
        assert_eq!(Strand::parse("+"), Some(Strand::Forward));
        assert_eq!(Strand::parse("-"), Some(Strand::Reverse));
        assert_eq!(Strand::parse("?"), None);
        assert_eq!(format!("{}", Strand::Reverse), "-");
    }

    #[test]
    fn test_endpoint_resolution() {
        assert_eq!(origin_node("a", Some(Strand::Forward)), "a_end");
        assert_eq!(origin_node("a", Some(Strand::Reverse)), "a_start");
        assert_eq!(dest_node("b", Some(Strand::Forward)), "b_start");
        assert_eq!(dest_node("b", Some(Strand::Reverse)), "b_end");
        assert_eq!(dest_node("b", None), "b");
    }
}
