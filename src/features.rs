//! Per-contig feature tables
//!
//! Canu writes a `<prefix>.layout.tigInfo` file next to `<prefix>.gfa`. It is a
//! tab-separated table whose header line starts with `#`; the first column of each
//! row is a tigID. Any column it declares becomes a node attribute.

use crate::attrs::{segment_defaults, AttrValue, Attributes};
use crate::error::Result;
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Suffix replacing `.gfa` to locate the feature table
pub const FEATURE_SUFFIX: &str = ".layout.tigInfo";

/// Feature table path for a GFA file: a trailing `.gfa` is replaced by
/// `.layout.tigInfo`; other names just get the suffix appended.
pub fn feature_path_for<P: AsRef<Path>>(gfa_path: P) -> PathBuf {
    let raw = gfa_path.as_ref().to_string_lossy();
    let prefix = raw.strip_suffix(".gfa").unwrap_or(&raw);
    PathBuf::from(format!("{}{}", prefix, FEATURE_SUFFIX))
}

#[derive(Debug, Clone)]
struct Row {
    /// Index into `FeatureTable::headers` of the header in effect for this row
    header: Option<usize>,
    values: Vec<String>,
}

/// A loaded feature table
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    headers: Vec<Vec<String>>,
    rows: Vec<Row>,
}

impl FeatureTable {
    /// Load the table at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Load the feature table belonging to `gfa_path`.
    ///
    /// Returns `Ok(None)` and logs a notice when the file does not exist.
    /// The table is looked up once per build, so the notice appears once
    /// rather than once per node.
    pub fn for_gfa<P: AsRef<Path>>(gfa_path: P) -> Result<Option<Self>> {
        let path = feature_path_for(gfa_path);
        if !path.is_file() {
            info!("No file called: {}", path.display());
            return Ok(None);
        }
        Self::from_file(&path).map(Some)
    }

    /// Parse a feature table from a buffered reader
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = FeatureTable::default();

        for line_result in reader.lines() {
            let line = line_result?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('#') {
                table
                    .headers
                    .push(header.split('\t').map(String::from).collect());
            } else {
                let header = table.headers.len().checked_sub(1);
                table.rows.push(Row {
                    header,
                    values: line.split('\t').map(String::from).collect(),
                });
            }
        }

        Ok(table)
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Features of the first row whose first column equals `tig_id`.
    ///
    /// Header names are zipped with the row values; a row shorter than its
    /// header (or the reverse) yields only the overlapping columns.
    pub fn lookup(&self, tig_id: &str) -> Option<Attributes> {
        let row = self
            .rows
            .iter()
            .find(|r| r.values.first().map(String::as_str) == Some(tig_id))?;

        let header: &[String] = match row.header {
            Some(h) => &self.headers[h][..],
            None => &[][..],
        };
        Some(
            header
                .iter()
                .zip(row.values.iter())
                .map(|(k, v)| (k.clone(), AttrValue::Str(v.clone())))
                .collect(),
        )
    }

    /// Defaults merged with the features for `tig_id`; table values win on
    /// key collisions.
    pub fn enrich(table: Option<&FeatureTable>, tig_id: &str) -> Attributes {
        let mut feats = segment_defaults();
        if let Some(found) = table.and_then(|t| t.lookup(tig_id)) {
            feats.extend(found);
        }
        feats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    const TABLE: &str = "#tigID\ttigLen\tcoverage\tcolor\n\
                         1\t5000\t30.5\tred\n\
                         2\t1200\t12.0\tblue\n\
                         1\t9999\t99.9\tpurple\n";

    #[test]
    fn test_feature_path() {
        assert_eq!(
            feature_path_for("asm/canu.contigs.gfa"),
            PathBuf::from("asm/canu.contigs.layout.tigInfo")
        );
        assert_eq!(
            feature_path_for("graph.txt"),
            PathBuf::from("graph.txt.layout.tigInfo")
        );
    }

    #[test]
    fn test_lookup_first_match() {
        let table = FeatureTable::parse(Cursor::new(TABLE)).unwrap();
        assert_eq!(table.len(), 3);

        let feats = table.lookup("1").unwrap();
        assert_eq!(feats["tigID"], AttrValue::from("1"));
        assert_eq!(feats["tigLen"], AttrValue::from("5000"));
        assert_eq!(feats["color"], AttrValue::from("red"));
        assert!(table.lookup("3").is_none());
    }

    #[test]
    fn test_enrich_overrides_defaults() {
        let table = FeatureTable::parse(Cursor::new(TABLE)).unwrap();
        let feats = FeatureTable::enrich(Some(&table), "2");

        assert_eq!(feats["weight"], AttrValue::Int(5));
        assert_eq!(feats["color"], AttrValue::from("blue"));
        assert_eq!(feats["coverage"], AttrValue::from("12.0"));
    }

    #[test]
    fn test_enrich_without_match_or_table() {
        let table = FeatureTable::parse(Cursor::new(TABLE)).unwrap();
        assert_eq!(FeatureTable::enrich(Some(&table), "77"), segment_defaults());
        assert_eq!(FeatureTable::enrich(None, "1"), segment_defaults());
    }

    #[test]
    fn test_short_row() {
        let table = FeatureTable::parse(Cursor::new("#tigID\ttigLen\tcoverage\n4\t100\n")).unwrap();
        let feats = table.lookup("4").unwrap();
        assert_eq!(feats.len(), 2);
        assert!(!feats.contains_key("coverage"));
    }

    #[test]
    fn test_row_before_header() {
        let table = FeatureTable::parse(Cursor::new("5\t100\n#tigID\ttigLen\n")).unwrap();
        assert_eq!(table.lookup("5").unwrap().len(), 0);
    }

    #[test]
    fn test_for_gfa_missing_and_present() {
        let dir = tempdir().unwrap();
        let gfa = dir.path().join("asm.gfa");
        assert!(FeatureTable::for_gfa(&gfa).unwrap().is_none());

        std::fs::write(dir.path().join("asm.layout.tigInfo"), TABLE).unwrap();
        let table = FeatureTable::for_gfa(&gfa).unwrap().unwrap();
        assert_eq!(table.len(), 3);
    }
}
