use super::*;
use logos::Logos;

#[test]
fn test_basic_tokens() {
    let input = "var int x = 2";
    let mut lexer = Token::lexer(input);

    assert_eq!(lexer.next(), Some(Ok(Token::Keyword("var".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::Keyword("int".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::Identifier("x".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::Assign)));
    assert_eq!(lexer.next(), Some(Ok(Token::Number("2".to_string()))));
    assert_eq!(lexer.next(), None);
}

#[test]
fn test_statement_split_at_semicolons() {
    let groups = scan_statements("x=2+2;ret 0;");

    assert_eq!(groups.len(), 2);
    assert_eq!(
        groups[0].tokens,
        vec![
            Token::Identifier("x".to_string()),
            Token::Assign,
            Token::Number("2".to_string()),
            Token::Plus,
            Token::Number("2".to_string()),
        ]
    );
    assert_eq!(
        groups[1].tokens,
        vec![
            Token::Keyword("ret".to_string()),
            Token::Number("0".to_string()),
        ]
    );
}

#[test]
fn test_equality_is_one_token() {
    let groups = scan_statements("a==b");

    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].tokens,
        vec![
            Token::Identifier("a".to_string()),
            Token::Operator,
            Token::Identifier("b".to_string()),
        ]
    );
}

#[test]
fn test_keyword_classification() {
    for word in ["var", "int", "void", "ret", "const"] {
        let mut lexer = Token::lexer(word);
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::Keyword(word.to_string()))),
            "'{word}' must lex as a keyword"
        );
    }

    // A keyword prefix of a longer word is still an identifier.
    let mut lexer = Token::lexer("variable");
    assert_eq!(
        lexer.next(),
        Some(Ok(Token::Identifier("variable".to_string())))
    );
}

#[test]
fn test_number_first_character_heuristic() {
    let mut lexer = Token::lexer("2abc x2");
    assert_eq!(lexer.next(), Some(Ok(Token::Number("2abc".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::Identifier("x2".to_string()))));
}

#[test]
fn test_empty_group_kept_between_semicolons() {
    let groups = scan_statements("a;;b");

    assert_eq!(groups.len(), 3);
    assert!(groups[1].is_empty());
}

#[test]
fn test_scanner_never_fails() {
    let groups = scan_statements("x @ y");

    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].tokens,
        vec![
            Token::Identifier("x".to_string()),
            Token::Unknown("@".to_string()),
            Token::Identifier("y".to_string()),
        ]
    );
}

#[test]
fn test_declaration_tokens() {
    let mut lexer = Token::lexer("func add(a, b) -> int {");

    assert_eq!(lexer.next(), Some(Ok(Token::KeywordFunc)));
    assert_eq!(lexer.next(), Some(Ok(Token::Identifier("add".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::LParen)));
    assert_eq!(lexer.next(), Some(Ok(Token::Identifier("a".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::Comma)));
    assert_eq!(lexer.next(), Some(Ok(Token::Identifier("b".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::RParen)));
    assert_eq!(lexer.next(), Some(Ok(Token::Arrow)));
    assert_eq!(lexer.next(), Some(Ok(Token::Keyword("int".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::LBrace)));
    assert_eq!(lexer.next(), None);
}
