use crate::css::extractor::extract;
use crate::css::parser::{CssParser, Dialect};
use crate::css::token::{Token, TokenKind, TokenRange};
use crate::error::IntelError;

fn extract_with(dialect: Dialect, content: &str) -> Result<Vec<Token>, IntelError> {
    let mut parser = CssParser::new(dialect).unwrap();
    let tree = parser.parse(content).unwrap();
    extract(&tree, content)
}

fn extract_source(content: &str) -> Result<Vec<Token>, IntelError> {
    extract_with(Dialect::Css, content)
}

fn extract_scss(content: &str) -> Result<Vec<Token>, IntelError> {
    extract_with(Dialect::Scss, content)
}

fn summary(tokens: &[Token]) -> Vec<(TokenKind, &str, u32, u32)> {
    tokens
        .iter()
        .map(|t| (t.kind, t.text.as_str(), t.range.start_line, t.range.start_column))
        .collect()
}

#[test]
fn test_property_and_color_spans() {
    let tokens = extract_source(".a {\ncolor: #fff;\n}").unwrap();
    assert_eq!(tokens.len(), 2);

    assert_eq!(tokens[0].kind, TokenKind::PropertyName);
    assert_eq!(tokens[0].text, "color");
    assert_eq!(
        tokens[0].range,
        TokenRange {
            start_line: 2,
            start_column: 1,
            start_offset: 5,
            end_line: 2,
            end_column: 5,
            end_offset: 10,
        }
    );

    assert_eq!(tokens[1].kind, TokenKind::ColorLiteral);
    assert_eq!(tokens[1].text, "#fff");
    assert_eq!(
        tokens[1].range,
        TokenRange {
            start_line: 2,
            start_column: 8,
            start_offset: 12,
            end_line: 2,
            end_column: 11,
            end_offset: 16,
        }
    );
}

#[test]
fn test_token_text_matches_source_span() {
    let content = ".a {\n  margin: var(--gap) 0;\n  border: 1px solid rgb(0, 0, 0);\n}";
    let tokens = extract_source(content).unwrap();
    assert!(!tokens.is_empty());

    for token in &tokens {
        assert_eq!(&content[token.range.start_offset..token.range.end_offset], token.text);
        assert_eq!(token.range.len(), token.text.len());
    }
}

#[test]
fn test_variable_reference_is_inner_identifier() {
    let tokens = extract_source(".a {\n  width: var(--gap);\n}").unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::PropertyName, "width", 2, 3),
            (TokenKind::VariableReference, "--gap", 2, 14),
        ]
    );
}

#[test]
fn test_separator_variants() {
    let tokens = extract_source(".a {\n  color:#fff;\n  color :  #000;\n}").unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::PropertyName, "color", 2, 3),
            (TokenKind::ColorLiteral, "#fff", 2, 9),
            (TokenKind::PropertyName, "color", 3, 3),
            (TokenKind::ColorLiteral, "#000", 3, 12),
        ]
    );
}

#[test]
fn test_multi_line_value() {
    let content = ".a {\n  box-shadow: 0 0 1px #000,\n    0 0 2px rgba(0, 0, 0, 0.5);\n}";
    let tokens = extract_source(content).unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::PropertyName, "box-shadow", 2, 3),
            (TokenKind::ColorLiteral, "#000", 2, 23),
            (TokenKind::ColorLiteral, "rgba(0, 0, 0, 0.5)", 3, 13),
        ]
    );
}

#[test]
fn test_multi_byte_text_before_token() {
    // "é" is two bytes but one column
    let content = r#".a { content: "é"; color: #fff; }"#;
    let tokens = extract_source(content).unwrap();

    let color = tokens.iter().find(|t| t.text == "color").unwrap();
    assert_eq!(color.range.start_offset, 20);
    assert_eq!(color.range.start_column, 20);

    let literal = tokens.iter().find(|t| t.kind == TokenKind::ColorLiteral).unwrap();
    assert_eq!(literal.range.start_offset, 27);
    assert_eq!((literal.range.start_column, literal.range.end_column), (27, 30));
}

#[test]
fn test_declarations_inside_at_rules() {
    let content = "@media (min-width: 600px) {\n  .a {\n    color: #000;\n  }\n}";
    let tokens = extract_source(content).unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::PropertyName, "color", 3, 5),
            (TokenKind::ColorLiteral, "#000", 3, 12),
        ]
    );
}

#[test]
fn test_comments_are_ignored() {
    let content = ".a {\n  /* color: #fff; */\n  width: 1px;\n}";
    let tokens = extract_source(content).unwrap();
    assert_eq!(summary(&tokens), vec![(TokenKind::PropertyName, "width", 3, 3)]);
}

#[test]
fn test_important_is_not_part_of_value() {
    let tokens = extract_source(".a { color: #fff !important; }").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::PropertyName, TokenKind::ColorLiteral]);
}

#[test]
fn test_custom_property_declaration() {
    let tokens = extract_source(":root {\n  --accent: #ff0000;\n}").unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::PropertyName, "--accent", 2, 3),
            (TokenKind::ColorLiteral, "#ff0000", 2, 13),
        ]
    );
}

#[test]
fn test_incomplete_color_yields_no_color_literal() {
    // Malformed input must not panic; whatever is extracted has no color
    let tokens = extract_source(".a {\n  color: #\n}").unwrap_or_default();
    assert!(tokens.iter().all(|t| t.kind != TokenKind::ColorLiteral));
}

#[test]
fn test_syntax_error_yields_parse_error() {
    let result = extract_source(".a { color: red; ");
    assert!(matches!(result, Err(IntelError::Parse { .. })));
}

#[test]
fn test_scss_variable_declaration() {
    let tokens = extract_scss("$primary: #fff;\n.a { color: $primary; }").unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::PropertyName, "$primary", 1, 1),
            (TokenKind::ColorLiteral, "#fff", 1, 11),
            (TokenKind::PropertyName, "color", 2, 6),
        ]
    );
    assert_eq!(tokens[0].range.end_column, 8);
}

#[test]
fn test_scss_syntax_is_a_parse_error_for_css() {
    let result = extract_source("$primary: #fff;");
    assert!(matches!(result, Err(IntelError::Parse { .. })));
}

#[test]
fn test_scss_include_arguments() {
    let content = "@mixin m($x) { color: $x; }\n.a { @include m(#fff); color: red; }";
    let tokens = extract_scss(content).unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::PropertyName, "color", 1, 16),
            (TokenKind::ColorLiteral, "#fff", 2, 17),
            (TokenKind::PropertyName, "color", 2, 24),
        ]
    );
}

#[test]
fn test_scss_include_content_block() {
    let tokens = extract_scss(".a { @include hover { color: rgb(0, 0, 0); } }").unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::PropertyName, "color", 1, 23),
            (TokenKind::ColorLiteral, "rgb(0, 0, 0)", 1, 30),
        ]
    );
}

#[test]
fn test_scss_nested_properties() {
    let content = ".a {\n  border: {\n    color: #c0ffee;\n    width: 1px;\n  }\n}";
    let tokens = extract_scss(content).unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::PropertyName, "border", 2, 3),
            (TokenKind::PropertyName, "color", 3, 5),
            (TokenKind::ColorLiteral, "#c0ffee", 3, 12),
            (TokenKind::PropertyName, "width", 4, 5),
        ]
    );
}

#[test]
fn test_scss_line_comments_are_ignored() {
    let tokens = extract_scss("// palette\n$accent: #0af; // brand\n").unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::PropertyName, "$accent", 2, 1),
            (TokenKind::ColorLiteral, "#0af", 2, 10),
        ]
    );
}
