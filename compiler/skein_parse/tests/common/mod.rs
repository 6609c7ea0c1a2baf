//! Grammars shared by the integration tests.

#![allow(dead_code, reason = "Not every test file uses every fixture")]

use skein_lexer::patterns;
use skein_parse::{Grammar, GrammarConfig, GrammarError, RuleId};

/// A JSON grammar: strings, numbers, booleans, arrays, and objects.
pub fn json() -> Result<(Grammar, RuleId), GrammarError> {
    let mut g = Grammar::with_config(GrammarConfig::default().root_name("Json"));
    g.define_ignored_token("SPACE", patterns::WHITESPACE)?;
    g.define_token("NUMBER", patterns::NUMBER)?;
    g.define_token("BOOLEAN", "true|false")?;
    g.define_token("STRING", patterns::DOUBLE_QUOTED_STRING)?;
    g.define_token("OPEN_BRACE", r"\{")?;
    g.define_token("CLOSE_BRACE", r"\}")?;
    g.define_token("OPEN_BRACKET", r"\[")?;
    g.define_token("CLOSE_BRACKET", r"\]")?;
    g.define_token("COLON", ":")?;
    g.define_token("COMMA", ",")?;

    let value = g.declare("Value");
    let string = g.token_type("String", "STRING");
    let number = g.token_type("Number", "NUMBER");
    let boolean = g.token_type("Boolean", "BOOLEAN");
    let comma = g.token_type("Comma", "COMMA");
    let colon = g.token_type("Colon", "COLON");

    let entry = g.seq("ObjectEntry", [string, colon, value]);
    let object_body = g.many_with_separator("ObjectBody", entry, comma);
    let array_body = g.many_with_separator("ArrayBody", value, comma);

    let open_bracket = g.token_type("OpenBracket", "OPEN_BRACKET");
    let close_bracket = g.token_type("CloseBracket", "CLOSE_BRACKET");
    let array = g.seq("Array", [open_bracket, array_body, close_bracket]);

    let open_brace = g.token_type("OpenBraces", "OPEN_BRACE");
    let close_brace = g.token_type("CloseBraces", "CLOSE_BRACE");
    let object = g.seq("Object", [open_brace, object_body, close_brace]);

    let choice = g.or("Value", [string, number, boolean, array, object])?;
    g.define(value, choice)?;
    Ok((g, value))
}
