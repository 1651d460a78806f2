use std::collections::HashMap;

#[cfg(test)]
pub mod test;

use crate::diagnostics::Diagnostic;
use crate::ir::{
    Constant, Function, FunctionBuilder, Instruction, IrType, Terminator, Value,
};
use crate::lexer::{self, StatementGroup, Token};
use crate::parser::FunctionRecord;

/// Lowers one function body into its entry block.
///
/// Statements are tokenized line by line into statement groups and lowered
/// in order: `ret` becomes the terminator, `var` declarations and
/// assignments become alloca/store with expressions folded left-to-right
/// (no operator precedence in this language version). Anything else is
/// reported as a warning, uniformly. If no explicit return was lowered, a
/// zero-valued (or void) return is synthesized and one warning names the
/// function and its declaration line.
pub fn lower_function(
    record: &FunctionRecord,
    body: &[String],
    return_type: IrType,
    file: &str,
) -> (Function, Vec<Diagnostic>) {
    let mut lowering = FunctionLowering {
        builder: FunctionBuilder::new(&record.name, &record.params, return_type),
        locals: HashMap::new(),
        diagnostics: Vec::new(),
        record,
        file,
    };

    'body: for line in body {
        for group in lexer::scan_statements(line) {
            if group.is_empty() {
                continue;
            }
            lowering.lower_statement(&group);
            if lowering.builder.is_terminated() {
                // Everything past an explicit return is unreachable.
                break 'body;
            }
        }
    }

    if !lowering.builder.is_terminated() {
        lowering.insert_default_return();
    }

    (lowering.builder.finish(), lowering.diagnostics)
}

struct FunctionLowering<'a> {
    builder: FunctionBuilder,
    locals: HashMap<String, Value>,
    diagnostics: Vec<Diagnostic>,
    record: &'a FunctionRecord,
    file: &'a str,
}

impl FunctionLowering<'_> {
    fn lower_statement(&mut self, group: &StatementGroup) {
        match group.tokens.as_slice() {
            [Token::Keyword(word), rest @ ..] if word == "ret" => {
                self.lower_return(rest, group);
            }
            [Token::Keyword(word), rest @ ..] if word == "var" => {
                self.lower_declaration(rest, group);
            }
            [Token::Identifier(name), Token::Assign, expr @ ..] if !expr.is_empty() => {
                if let Some(value) = self.eval_expr(expr, group) {
                    self.store_local(name.clone(), value);
                }
            }
            _ => self.warn(
                group,
                format!("statement not recognized: '{}'", group.render()),
            ),
        }
    }

    fn lower_return(&mut self, operands: &[Token], group: &StatementGroup) {
        let return_type = self.builder.return_type();

        if return_type == IrType::Void {
            if !operands.is_empty() {
                self.warn(
                    group,
                    format!(
                        "void function '{}' cannot return a value",
                        self.record.name
                    ),
                );
            }
            self.builder.terminate(Terminator::Ret {
                ty: IrType::Void,
                value: None,
            });
            return;
        }

        let value = if operands.is_empty() {
            // Bare `ret` returns the zero value of the return type.
            Some(Value::Constant(return_type.zero().expect("non-void")))
        } else if return_type.is_float() {
            match operands {
                [Token::Number(literal)] => match literal.parse::<f64>() {
                    Ok(parsed) => Some(Value::Constant(Constant::Float(parsed))),
                    Err(_) => {
                        self.warn(group, format!("malformed numeric literal '{literal}'"));
                        None
                    }
                },
                _ => {
                    self.warn(
                        group,
                        format!(
                            "unsupported return expression: '{}'",
                            group.render()
                        ),
                    );
                    None
                }
            }
        } else {
            self.eval_expr(operands, group)
        };

        if let Some(value) = value {
            self.builder.terminate(Terminator::Ret {
                ty: return_type,
                value: Some(value),
            });
        }
    }

    fn lower_declaration(&mut self, rest: &[Token], group: &StatementGroup) {
        let (type_name, name, expr) = match rest {
            [type_token, Token::Identifier(name), Token::Assign, expr @ ..]
                if matches!(type_token, Token::Keyword(_) | Token::Identifier(_))
                    && !expr.is_empty() =>
            {
                (Some(type_token.text()), name.clone(), expr)
            }
            [Token::Identifier(name), Token::Assign, expr @ ..] if !expr.is_empty() => {
                (None, name.clone(), expr)
            }
            _ => {
                return self.warn(
                    group,
                    format!("statement not recognized: '{}'", group.render()),
                );
            }
        };

        if let Some(type_name) = type_name {
            if crate::types::scalar_type(type_name).is_none() {
                return self.warn(
                    group,
                    format!("unknown type '{type_name}' in declaration of '{name}'"),
                );
            }
        }

        if let Some(value) = self.eval_expr(expr, group) {
            self.store_local(name, value);
        }
    }

    /// Folds an operand chain left-to-right into SSA arithmetic. Operands
    /// are numbers, parameters or locals; locals read through a load.
    fn eval_expr(&mut self, tokens: &[Token], group: &StatementGroup) -> Option<Value> {
        let mut iter = tokens.iter();
        let mut acc = self.operand(iter.next()?, group)?;

        while let Some(op) = iter.next() {
            let Some(rhs_token) = iter.next() else {
                self.warn(
                    group,
                    format!("expression ends with an operator: '{}'", group.render()),
                );
                return None;
            };
            let rhs = self.operand(rhs_token, group)?;
            let dest = self.builder.fresh_register();
            let instruction = match op {
                Token::Plus => Instruction::Add {
                    dest: dest.clone(),
                    lhs: acc,
                    rhs,
                    ty: IrType::I64,
                },
                Token::Minus => Instruction::Sub {
                    dest: dest.clone(),
                    lhs: acc,
                    rhs,
                    ty: IrType::I64,
                },
                Token::Star => Instruction::Mul {
                    dest: dest.clone(),
                    lhs: acc,
                    rhs,
                    ty: IrType::I64,
                },
                Token::Slash => Instruction::Div {
                    dest: dest.clone(),
                    lhs: acc,
                    rhs,
                    ty: IrType::I64,
                },
                other => {
                    self.warn(
                        group,
                        format!("unsupported operator '{}' in expression", other.text()),
                    );
                    return None;
                }
            };
            self.builder.push(instruction);
            acc = Value::Register(dest);
        }

        Some(acc)
    }

    fn operand(&mut self, token: &Token, group: &StatementGroup) -> Option<Value> {
        match token {
            Token::Number(literal) => match literal.parse::<i64>() {
                Ok(parsed) => Some(Value::Constant(Constant::Int(parsed))),
                Err(_) => {
                    self.warn(group, format!("malformed numeric literal '{literal}'"));
                    None
                }
            },
            Token::Identifier(name) => {
                if self.builder.is_param(name) {
                    return Some(Value::Argument(name.clone()));
                }
                if let Some(slot) = self.locals.get(name).cloned() {
                    let dest = self.builder.fresh_register();
                    self.builder.push(Instruction::Load {
                        dest: dest.clone(),
                        ptr: slot,
                        ty: IrType::I64,
                    });
                    return Some(Value::Register(dest));
                }
                self.warn(group, format!("use of undefined variable '{name}'"));
                None
            }
            other => {
                self.warn(
                    group,
                    format!("unexpected token '{}' in expression", other.text()),
                );
                None
            }
        }
    }

    fn store_local(&mut self, name: String, value: Value) {
        let slot = match self.locals.get(&name) {
            Some(slot) => slot.clone(),
            None => {
                let dest = self.builder.fresh_register();
                self.builder.push(Instruction::Alloca {
                    dest: dest.clone(),
                    ty: IrType::I64,
                });
                let slot = Value::Register(dest);
                self.locals.insert(name, slot.clone());
                slot
            }
        };
        self.builder.push(Instruction::Store {
            value,
            ptr: slot,
            ty: IrType::I64,
        });
    }

    fn insert_default_return(&mut self) {
        let return_type = self.builder.return_type();
        self.builder.terminate(Terminator::Ret {
            ty: return_type,
            value: return_type.zero().map(Value::Constant),
        });
        self.diagnostics.push(Diagnostic::warning(
            self.file,
            self.record.source_offset,
            1,
            "",
            format!(
                "function '{}' has no return statement (default '{}' return inserted)",
                self.record.name, return_type
            ),
        ));
    }

    fn warn(&mut self, group: &StatementGroup, message: String) {
        self.diagnostics.push(Diagnostic::warning(
            self.file,
            self.record.source_offset,
            1,
            group.render(),
            message,
        ));
    }
}
