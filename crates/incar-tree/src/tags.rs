//! Parsed INCAR document.

use std::fmt;

use incar_format::{FormatOptions, write_tags};
use incar_parse::TagMap;

/// Tags of an INCAR document, keyed by uppercase tag path.
///
/// Lookups are case-insensitive, matching how the parser normalizes names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct Tags {
    map: TagMap,
}

impl Tags {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INCAR text.
    pub fn parse(source: &str) -> Self {
        Self {
            map: incar_parse::parse(source),
        }
    }

    /// Value of `tag`, in any case.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.map.get(&tag.to_uppercase()).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.map.contains_key(&tag.to_uppercase())
    }

    /// Set `tag` (uppercased) to `value`, returning the previous value.
    pub fn insert(&mut self, tag: &str, value: impl Into<String>) -> Option<String> {
        self.map.insert(tag.to_uppercase(), value.into())
    }

    pub fn remove(&mut self, tag: &str) -> Option<String> {
        self.map.remove(&tag.to_uppercase())
    }

    /// Tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(tag, value)| (tag.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn as_map(&self) -> &TagMap {
        &self.map
    }

    pub fn into_map(self) -> TagMap {
        self.map
    }

    /// Write the document as INCAR text.
    pub fn to_incar(&self, options: FormatOptions) -> Result<String, incar_format::FormatError> {
        write_tags(&self.map, options)
    }
}

impl From<TagMap> for Tags {
    fn from(map: TagMap) -> Self {
        map.into_iter().collect()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for (tag, value) in iter {
            tags.insert(tag.as_ref(), value);
        }
        tags
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_incar(FormatOptions::default()).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_case_insensitive_access() {
        let mut tags = Tags::parse("Encut = 520\nrelax { nsw = 50 }");
        assert_eq!(tags.get("encut"), Some("520"));
        assert_eq!(tags.get("ENCUT"), Some("520"));
        assert_eq!(tags.get("Relax/Nsw"), Some("50"));
        assert!(tags.contains("relax/NSW"));
        assert!(!tags.contains("relax"));

        assert_eq!(tags.insert("ismear", "0"), None);
        assert_eq!(tags.insert("ISMEAR", "-5"), Some("0".to_string()));
        assert_eq!(tags.get("ismear"), Some("-5"));
        assert_eq!(tags.remove("Ismear"), Some("-5".to_string()));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_iter_is_sorted() {
        let tags: Tags = [("b", "2"), ("a", "1"), ("c/d", "3")].into_iter().collect();
        let keys: Vec<_> = tags.iter().map(|(tag, _)| tag).collect();
        assert_eq!(keys, ["A", "B", "C/D"]);
    }

    #[test]
    fn test_from_map_uppercases() {
        let mut map = TagMap::new();
        map.insert("sigma".to_string(), "0.05".to_string());
        let tags = Tags::from(map);
        assert_eq!(tags.as_map().keys().next().map(String::as_str), Some("SIGMA"));
    }

    #[test]
    fn test_display() {
        let tags = Tags::parse("system = \"Si; bulk\"\nencut = 400");
        assert_eq!(tags.to_string(), "ENCUT = 400\nSYSTEM = Si\\; bulk\n");
        assert_eq!(Tags::parse(&tags.to_string()), tags);
    }

    #[test]
    fn test_empty() {
        let tags = Tags::parse("# nothing here\n");
        assert!(tags.is_empty());
        assert_eq!(tags.to_string(), "");
        assert_eq!(tags, Tags::new());
    }
}
