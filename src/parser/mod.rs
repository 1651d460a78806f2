use logos::Logos;


use crate::diagnostics::Diagnostic;
use crate::lexer::Token;
use crate::types;

/// A successfully parsed function header. Parameter types are not modeled
/// in this language version; only names are captured.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub return_type_name: String,
}

/// The parsed, successfully typed function, kept for diagnostics.
/// `source_offset` is the 1-based line the declaration appeared on.
#[derive(Debug, Clone)]
pub struct FunctionRecord {
    pub name: String,
    pub params: Vec<String>,
    pub return_type_name: String,
    pub source_offset: usize,
}

/// Parses one declaration line as a state machine over the token stream:
/// `func name ( params ) [-> type] [{ ...]`. A missing piece is a tagged
/// failure the caller reports and skips past; it never aborts the build.
pub fn parse_declaration(
    line: &str,
    line_no: usize,
    file: &str,
) -> Result<FunctionDecl, Diagnostic> {
    let mut tokens = Token::lexer(line).spanned().peekable();
    let fail = |column: usize, message: String| {
        Err(Diagnostic::error(file, line_no, column, line.trim(), message))
    };
    let end = line.len().max(1);

    match tokens.next() {
        Some((Ok(Token::KeywordFunc), _)) => {}
        Some((_, span)) => {
            return fail(
                span.start + 1,
                "function declaration must start with 'func'".to_string(),
            );
        }
        None => return fail(1, "empty function declaration".to_string()),
    }

    let name = match tokens.next() {
        Some((Ok(Token::Identifier(name)), _)) => name,
        Some((_, span)) => {
            return fail(span.start + 1, "expected function name after 'func'".to_string());
        }
        None => return fail(end, "expected function name after 'func'".to_string()),
    };

    match tokens.next() {
        Some((Ok(Token::LParen), _)) => {}
        Some((_, span)) => {
            return fail(
                span.start + 1,
                format!("missing opening parenthesis in declaration of '{name}'"),
            );
        }
        None => {
            return fail(
                end,
                format!("missing opening parenthesis in declaration of '{name}'"),
            );
        }
    }

    let mut params = Vec::new();
    loop {
        match tokens.next() {
            Some((Ok(Token::RParen), _)) => break,
            Some((Ok(Token::Comma), _)) => continue,
            Some((Ok(Token::Identifier(param)), _)) => params.push(param),
            Some((_, span)) => {
                return fail(
                    span.start + 1,
                    format!("unexpected token in parameter list of '{name}'"),
                );
            }
            None => {
                return fail(
                    end,
                    format!("missing closing parenthesis in declaration of '{name}'"),
                );
            }
        }
    }

    let return_type_name = match tokens.peek() {
        Some((Ok(Token::Arrow), _)) => {
            tokens.next();
            match tokens.next() {
                Some((Ok(token @ (Token::Identifier(_) | Token::Keyword(_))), _)) => {
                    token.text().to_string()
                }
                Some((_, span)) => {
                    return fail(
                        span.start + 1,
                        format!("expected return type after '->' in declaration of '{name}'"),
                    );
                }
                None => {
                    return fail(
                        end,
                        format!("expected return type after '->' in declaration of '{name}'"),
                    );
                }
            }
        }
        _ => types::DEFAULT_RETURN_TYPE.to_string(),
    };

    // Anything after the return type (the `{`, an inline body) belongs to
    // the body extractor, which works from the raw line.
    Ok(FunctionDecl {
        name,
        params,
        return_type_name,
    })
}

/// Returns the function body as a flat sequence of statement lines.
///
/// Inline form: the declaration line holds both `{` and a later `}`, and
/// the text between them splits into statements at `;`. Multi-line form:
/// scan forward counting brace depth per character; a `}` at depth zero
/// closes the function and that line is excluded. Every harvested line has
/// everything from its first `;` onward removed and is kept only if
/// non-empty after trimming.
pub fn extract_body(lines: &[String], decl_index: usize) -> Vec<String> {
    let decl = &lines[decl_index];
    if let (Some(open), Some(close)) = (decl.find('{'), decl.rfind('}')) {
        if close > open {
            return split_statements(&decl[open + 1..close]);
        }
    }

    let mut body = Vec::new();
    let mut depth: u32 = 0;
    for line in &lines[decl_index + 1..] {
        let mut closes_function = false;
        for ch in line.chars() {
            match ch {
                '{' => depth += 1,
                '}' if depth == 0 => {
                    closes_function = true;
                    break;
                }
                '}' => depth -= 1,
                _ => {}
            }
        }
        if closes_function {
            break;
        }

        let statement = line.split(';').next().unwrap_or(line).trim();
        if !statement.is_empty() {
            body.push(statement.to_string());
        }
    }
    body
}

/// Splits inline body text into statements at `;`, trimming each piece and
/// dropping empties.
pub fn split_statements(source: &str) -> Vec<String> {
    source
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
        .collect()
}
