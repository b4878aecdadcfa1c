//! Risk categories, the question-keyword table, and the classifier label space.
//!
//! Category codes are the integers written to the training table. The label
//! space is the dense index space a trained model predicts over; the two are
//! kept separate so the corpus can carry categories the deployed model was
//! never trained on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CorpusRow;

/// Risk category assigned to a chunk or paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Category {
    #[default]
    Safe,
    Indemnification,
    Termination,
    NonCompete,
}

impl Category {
    /// All categories in code order.
    pub const ALL: [Category; 4] = [
        Category::Safe,
        Category::Indemnification,
        Category::Termination,
        Category::NonCompete,
    ];

    /// Integer code written to the corpus `label` column.
    pub fn code(self) -> u8 {
        match self {
            Self::Safe => 0,
            Self::Indemnification => 1,
            Self::Termination => 2,
            Self::NonCompete => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Display name, shared by the training report and the serving API.
    pub fn name(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Indemnification => "Indemnification",
            Self::Termination => "Termination",
            Self::NonCompete => "Non-Compete",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn is_risky(self) -> bool {
        self != Self::Safe
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown risk category: {name}")))
    }
}

/// Ordered keyword table mapping annotation questions to categories.
///
/// Matching is case-insensitive substring containment. The table is scanned
/// in order and the first matching keyword wins, so order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<(String, Category)>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new([
            ("Indemni", Category::Indemnification),
            ("Termination for C", Category::Termination),
            ("Non-Compete", Category::NonCompete),
        ])
    }
}

impl KeywordTable {
    /// Build a table from `(keyword, category)` pairs, preserving order.
    pub fn new<K: Into<String>>(entries: impl IntoIterator<Item = (K, Category)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, c)| (k.into().to_lowercase(), c))
                .collect(),
        }
    }

    /// Resolve a question to its category, or `None` when no keyword matches.
    pub fn resolve(&self, question: &str) -> Option<Category> {
        let question = question.to_lowercase();
        for (keyword, category) in &self.entries {
            if question.contains(keyword.as_str()) {
                return Some(*category);
            }
        }
        None
    }

    /// Categories reachable through this table, in table order, deduplicated.
    pub fn categories(&self) -> Vec<Category> {
        let mut out = Vec::new();
        for (_, c) in &self.entries {
            if !out.contains(c) {
                out.push(*c);
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Categories a trained classifier predicts, indexed by model output position.
///
/// The deployed model was trained without the indemnification class, so the
/// default space is `[Safe, Termination, NonCompete]` -> `LABEL_0..LABEL_2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpace {
    categories: Vec<Category>,
}

impl Default for LabelSpace {
    fn default() -> Self {
        Self {
            categories: vec![Category::Safe, Category::Termination, Category::NonCompete],
        }
    }
}

impl LabelSpace {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Model output index for a category.
    pub fn index_of(&self, category: Category) -> Option<usize> {
        self.categories.iter().position(|&c| c == category)
    }

    /// Category at a model output index.
    pub fn category_at(&self, index: usize) -> Option<Category> {
        self.categories.get(index).copied()
    }

    /// Parse a Hugging Face style label (`LABEL_1`) into a category.
    pub fn parse_model_label(&self, label: &str) -> Option<Category> {
        let index = label.strip_prefix("LABEL_")?.parse::<usize>().ok()?;
        self.category_at(index)
    }

    /// Keep rows whose category is in this space, relabelled to model indices.
    ///
    /// Returns `(text, index)` pairs in input order.
    pub fn remap_rows<'a>(
        &'a self,
        rows: &'a [CorpusRow],
    ) -> impl Iterator<Item = (&'a str, usize)> + 'a {
        rows.iter()
            .filter_map(|row| self.index_of(row.label).map(|i| (row.text.as_str(), i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for c in Category::ALL {
            assert_eq!(Category::from_code(c.code()), Some(c));
        }
        assert_eq!(Category::from_code(9), None);
    }

    #[test]
    fn default_table_matches_cuad_questions() {
        let table = KeywordTable::default();
        assert_eq!(
            table.resolve("Highlight the parts (if any) of this contract related to \"Termination For Convenience\""),
            Some(Category::Termination)
        );
        assert_eq!(table.resolve("Indemnification"), Some(Category::Indemnification));
        assert_eq!(table.resolve("non-compete clause"), Some(Category::NonCompete));
        assert_eq!(table.resolve("Governing Law"), None);
    }

    #[test]
    fn first_keyword_in_table_order_wins() {
        let table = KeywordTable::new([
            ("compete", Category::NonCompete),
            ("termination", Category::Termination),
        ]);
        assert_eq!(
            table.resolve("Termination of non-compete obligations"),
            Some(Category::NonCompete)
        );
    }

    #[test]
    fn table_categories_deduplicated() {
        let table = KeywordTable::new([
            ("indemnify", Category::Indemnification),
            ("hold harmless", Category::Indemnification),
            ("compete", Category::NonCompete),
        ]);
        assert_eq!(
            table.categories(),
            vec![Category::Indemnification, Category::NonCompete]
        );
    }

    #[test]
    fn category_serializes_by_name() {
        let json = serde_json::to_string(&Category::NonCompete).unwrap();
        assert_eq!(json, "\"Non-Compete\"");
        let parsed: Category = serde_json::from_str("\"Termination\"").unwrap();
        assert_eq!(parsed, Category::Termination);
        assert!(serde_json::from_str::<Category>("\"Force Majeure\"").is_err());
    }

    #[test]
    fn label_space_maps_model_labels() {
        let space = LabelSpace::default();
        assert_eq!(space.parse_model_label("LABEL_0"), Some(Category::Safe));
        assert_eq!(space.parse_model_label("LABEL_1"), Some(Category::Termination));
        assert_eq!(space.parse_model_label("LABEL_2"), Some(Category::NonCompete));
        assert_eq!(space.parse_model_label("LABEL_3"), None);
        assert_eq!(space.parse_model_label("Termination"), None);
    }

    #[test]
    fn remap_drops_categories_outside_space() {
        let rows = vec![
            CorpusRow::new("a", Category::Safe),
            CorpusRow::new("b", Category::Indemnification),
            CorpusRow::new("c", Category::Termination),
            CorpusRow::new("d", Category::NonCompete),
        ];
        let space = LabelSpace::default();
        let remapped: Vec<_> = space.remap_rows(&rows).collect();
        assert_eq!(remapped, vec![("a", 0), ("c", 1), ("d", 2)]);
    }
}
