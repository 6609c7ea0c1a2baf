//! Ready-made patterns for common token shapes.
//!
//! Each constant is a bare regular expression; [`crate::TokenDef::new`]
//! anchors it at the current position.


pub const DIGITS: &str = r"\d+";
pub const INT: &str = r"0|[1-9]\d*";
pub const FLOAT: &str = r"(?:0|[1-9]\d*)\.\d+";
pub const NUMBER: &str = r"(?:0|[1-9]\d*)(?:\.\d+)?";
pub const KEYWORD: &str = r"(?i)[a-z][-_\w]*";
pub const DOUBLE_QUOTED_STRING: &str = r#""(?:\\.|[^"\\])*""#;
pub const WHITESPACE: &str = r"\s+";
pub const OPERATOR: &str = r"[-+/*=]";
pub const OPEN_BRACE: &str = r"[(\[{]";
pub const CLOSE_BRACE: &str = r"[)\]}]";
pub const PUNCTUATION: &str = r"[,;:.]";

/// Look a pattern up by its short name (`"int"`, `"keyword"`, ...).
pub fn named(name: &str) -> Option<&'static str> {
    let pattern = match name {
        "digits" => DIGITS,
        "int" => INT,
        "float" => FLOAT,
        "number" => NUMBER,
        "keyword" => KEYWORD,
        "string" => DOUBLE_QUOTED_STRING,
        "space" | "whitespace" => WHITESPACE,
        "operator" => OPERATOR,
        "open" => OPEN_BRACE,
        "close" => CLOSE_BRACE,
        "punctuation" => PUNCTUATION,
        _ => return None,
    };
    Some(pattern)
}
