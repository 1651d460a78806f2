use logos::Logos;

#[cfg(test)]
pub mod test;

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \n\r\t\f]+")] // Ignore this regex pattern between tokens
#[derive(Clone)]
pub enum Token {
    #[regex(r"var|int|void|ret|const", |lex| {
        lex.slice().to_string()
    }, priority = 3)]
    Keyword(String),

    // First-character heuristic: anything starting with a digit is a
    // number, even `2abc`. There is no full numeric-literal grammar.
    #[regex(r"[0-9][a-zA-Z0-9_.]*", |lex| {
        lex.slice().to_string()
    })]
    Number(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex|{
        lex.slice().to_string()
    })]
    Identifier(String),

    #[token("func")]
    KeywordFunc,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("==")]
    Operator,

    #[token("=")]
    Assign,

    #[token("->")]
    Arrow,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    // Catch-all so scanning is total; a later stage rejects these.
    #[regex(r".", |lex| {
        lex.slice().to_string()
    }, priority = 1)]
    Unknown(String),
}

impl Token {
    pub fn text(&self) -> &str {
        match self {
            Token::Keyword(s) | Token::Number(s) | Token::Identifier(s) | Token::Unknown(s) => s,
            Token::KeywordFunc => "func",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Operator => "==",
            Token::Assign => "=",
            Token::Arrow => "->",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Comma => ",",
            Token::Semicolon => ";",
        }
    }
}

/// One statement's token stream, delimited by `;` or end of input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementGroup {
    pub tokens: Vec<Token>,
}

impl StatementGroup {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn render(&self) -> String {
        self.tokens
            .iter()
            .map(Token::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Splits one line of body text into statement groups at `;`. A `;` always
/// closes the current group, empty or not; the trailing group is kept only
/// if it holds tokens. Callers filter empty groups.
pub fn scan_statements(line: &str) -> Vec<StatementGroup> {
    let mut groups = Vec::new();
    let mut current = StatementGroup::default();

    for (token, span) in Token::lexer(line).spanned() {
        match token {
            Ok(Token::Semicolon) => groups.push(std::mem::take(&mut current)),
            Ok(token) => current.tokens.push(token),
            Err(()) => current.tokens.push(Token::Unknown(line[span].to_string())),
        }
    }

    if !current.tokens.is_empty() {
        groups.push(current);
    }
    groups
}
