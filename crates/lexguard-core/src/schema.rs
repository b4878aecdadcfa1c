/// Arrow schema definitions for the training corpus.
pub mod corpus {
    use arrow::datatypes::{DataType, Field, Schema};

    pub const TEXT: &str = "text";
    pub const LABEL: &str = "label";

    /// Schema for the balanced training table: one row per retained chunk.
    pub fn corpus_schema() -> Schema {
        Schema::new(vec![
            Field::new(TEXT, DataType::Utf8, false),
            Field::new(LABEL, DataType::UInt8, false),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::corpus;

    #[test]
    fn corpus_schema_has_text_and_label() {
        let schema = corpus::corpus_schema();
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.field(0).name(), "text");
        assert_eq!(schema.field(1).name(), "label");
    }
}
