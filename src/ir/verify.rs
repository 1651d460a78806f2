use std::collections::HashSet;

use super::{Function, Module, Terminator, Value};

/// Structural verification of a finished module. Checks that every function
/// has at least one block, every block is terminated, returned values match
/// the declared return type, and every register is defined before use.
pub fn verify_module(module: &Module) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for function in &module.functions {
        verify_function(function, &mut errors);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn verify_function(function: &Function, errors: &mut Vec<String>) {
    if function.blocks.is_empty() {
        errors.push(format!("function '@{}' has no basic blocks", function.name));
        return;
    }

    let params: HashSet<&str> = function
        .params
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    let mut defined: HashSet<&str> = HashSet::new();

    let check_value = |value: &Value, defined: &HashSet<&str>, errors: &mut Vec<String>| {
        match value {
            Value::Constant(_) => {}
            Value::Register(name) => {
                if !defined.contains(name.as_str()) {
                    errors.push(format!(
                        "register '{}' used before definition in '@{}'",
                        name, function.name
                    ));
                }
            }
            Value::Argument(name) => {
                if !params.contains(name.as_str()) {
                    errors.push(format!(
                        "unknown argument '%{}' referenced in '@{}'",
                        name, function.name
                    ));
                }
            }
        }
    };

    for block in &function.blocks {
        for instruction in &block.instructions {
            for operand in instruction.operands() {
                check_value(operand, &defined, errors);
            }
            if let Some(dest) = instruction.dest() {
                defined.insert(dest);
            }
        }

        match &block.terminator {
            None => errors.push(format!(
                "block '{}' of '@{}' has no terminator",
                block.label, function.name
            )),
            Some(Terminator::Ret { ty, value }) => {
                if *ty != function.return_type {
                    errors.push(format!(
                        "'@{}' returns {} but is declared {}",
                        function.name, ty, function.return_type
                    ));
                }
                match value {
                    Some(value) => {
                        if function.return_type == super::IrType::Void {
                            errors.push(format!(
                                "void function '@{}' returns a value",
                                function.name
                            ));
                        }
                        check_value(value, &defined, errors);
                    }
                    None => {
                        if function.return_type != super::IrType::Void {
                            errors.push(format!(
                                "non-void function '@{}' returns no value",
                                function.name
                            ));
                        }
                    }
                }
            }
        }
    }
}
