use std::sync::LazyLock;

use regex::Regex;

use crate::turtle::Literal;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO date pattern"));
static SLASH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})/(\d{2})/(\d{2})$").expect("valid slash date pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    Taxonomy,
    CrossReference(&'static str),
    Date,
    Value,
}

const COLUMN_RULES: &[(&str, ColumnRule)] = &[
    ("gtdb_taxonomy", ColumnRule::Taxonomy),
    ("ncbi_taxid", ColumnRule::CrossReference("taxid")),
    ("ncbi_bioproject", ColumnRule::CrossReference("bioproject")),
    ("ncbi_biosample", ColumnRule::CrossReference("biosample")),
    ("ncbi_date", ColumnRule::Date),
    ("ncbi_seq_rel_date", ColumnRule::Date),
];

impl ColumnRule {
    pub fn for_column(name: &str) -> Self {
        COLUMN_RULES
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, rule)| *rule)
            .unwrap_or(ColumnRule::Value)
    }
}

pub fn date_literal(value: &str) -> Literal {
    if ISO_DATE.is_match(value) {
        return Literal::Date(value.to_string());
    }
    if let Some(caps) = SLASH_DATE.captures(value) {
        return Literal::Date(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]));
    }
    Literal::Plain(value.to_string())
}

pub fn value_literal(value: &str) -> Literal {
    let numeric_chars =
        !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit() || ch == '.');
    if numeric_chars {
        let has_digit = value.chars().any(|ch| ch.is_ascii_digit());
        if has_digit && value.matches('.').count() <= 1 {
            return Literal::Numeric(value.to_string());
        }
        return Literal::Plain(value.to_string());
    }
    Literal::string(value)
}
