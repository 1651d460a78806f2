use super::*;
use crate::diagnostics::Severity;

fn record(name: &str, params: &[&str]) -> FunctionRecord {
    FunctionRecord {
        name: name.to_string(),
        params: params.iter().map(|p| p.to_string()).collect(),
        return_type_name: "int".to_string(),
        source_offset: 3,
    }
}

fn body(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

#[test]
fn default_return_is_inserted_exactly_once() {
    let record = record("empty", &[]);
    let (function, diagnostics) = lower_function(&record, &[], IrType::I64, "test.nl");

    let entry = &function.blocks[0];
    assert!(entry.instructions.is_empty());
    assert!(matches!(
        entry.terminator,
        Some(Terminator::Ret {
            ty: IrType::I64,
            value: Some(Value::Constant(Constant::Int(0))),
        })
    ));

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert!(diagnostics[0].message.contains("empty"));
    assert_eq!(diagnostics[0].line, 3);
}

#[test]
fn void_function_gets_ret_void() {
    let record = record("noop", &[]);
    let (function, diagnostics) = lower_function(&record, &[], IrType::Void, "test.nl");

    assert!(matches!(
        function.blocks[0].terminator,
        Some(Terminator::Ret {
            ty: IrType::Void,
            value: None,
        })
    ));
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn float_function_gets_zero_float_default() {
    let record = record("f", &[]);
    let (function, diagnostics) = lower_function(&record, &[], IrType::F64, "test.nl");

    assert!(matches!(
        function.blocks[0].terminator,
        Some(Terminator::Ret {
            ty: IrType::F64,
            value: Some(Value::Constant(Constant::Float(_))),
        })
    ));
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn explicit_return_suppresses_the_warning() {
    let record = record("seven", &[]);
    let (function, diagnostics) =
        lower_function(&record, &body(&["ret 7;"]), IrType::I64, "test.nl");

    assert!(matches!(
        function.blocks[0].terminator,
        Some(Terminator::Ret {
            ty: IrType::I64,
            value: Some(Value::Constant(Constant::Int(7))),
        })
    ));
    assert!(diagnostics.is_empty());
}

#[test]
fn bare_return_yields_zero() {
    let record = record("zero", &[]);
    let (function, diagnostics) =
        lower_function(&record, &body(&["ret;"]), IrType::I32, "test.nl");

    assert!(matches!(
        function.blocks[0].terminator,
        Some(Terminator::Ret {
            ty: IrType::I32,
            value: Some(Value::Constant(Constant::Int(0))),
        })
    ));
    assert!(diagnostics.is_empty());
}

#[test]
fn float_literal_return() {
    let record = record("half", &[]);
    let (function, diagnostics) =
        lower_function(&record, &body(&["ret 2.5;"]), IrType::F64, "test.nl");

    match &function.blocks[0].terminator {
        Some(Terminator::Ret {
            ty: IrType::F64,
            value: Some(Value::Constant(Constant::Float(value))),
        }) => assert_eq!(*value, 2.5),
        other => panic!("unexpected terminator: {other:?}"),
    }
    assert!(diagnostics.is_empty());
}

#[test]
fn assignment_lowers_to_alloca_store() {
    let record = record("main", &[]);
    let (function, diagnostics) = lower_function(
        &record,
        &body(&["var x = 2 + 2;", "ret x;"]),
        IrType::I64,
        "test.nl",
    );
    assert!(diagnostics.is_empty());

    let entry = &function.blocks[0];
    assert!(matches!(entry.instructions[0], Instruction::Add { .. }));
    assert!(matches!(entry.instructions[1], Instruction::Alloca { .. }));
    assert!(matches!(entry.instructions[2], Instruction::Store { .. }));
    assert!(matches!(entry.instructions[3], Instruction::Load { .. }));
    assert!(matches!(
        entry.terminator,
        Some(Terminator::Ret {
            ty: IrType::I64,
            value: Some(Value::Register(_)),
        })
    ));
}

#[test]
fn typed_declaration_checks_the_type_name() {
    let record = record("main", &[]);
    let (_, diagnostics) = lower_function(
        &record,
        &body(&["var bignum x = 1;"]),
        IrType::I64,
        "test.nl",
    );

    // One warning for the unknown type, one for the synthesized return.
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].message.contains("bignum"));
}

#[test]
fn parameters_are_arguments() {
    let record = record("add", &["a", "b"]);
    let (function, diagnostics) =
        lower_function(&record, &body(&["ret a + b;"]), IrType::I64, "test.nl");
    assert!(diagnostics.is_empty());

    let entry = &function.blocks[0];
    match &entry.instructions[0] {
        Instruction::Add { lhs, rhs, .. } => {
            assert_eq!(*lhs, Value::Argument("a".to_string()));
            assert_eq!(*rhs, Value::Argument("b".to_string()));
        }
        other => panic!("unexpected instruction: {other:?}"),
    }
}

#[test]
fn unrecognized_statement_is_diagnosed() {
    let record = record("main", &[]);
    let (_, diagnostics) = lower_function(
        &record,
        &body(&["wibble wobble;", "ret 0;"]),
        IrType::I64,
        "test.nl",
    );

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert!(diagnostics[0].message.contains("not recognized"));
}

#[test]
fn undefined_variable_is_diagnosed() {
    let record = record("main", &[]);
    let (_, diagnostics) =
        lower_function(&record, &body(&["ret y;"]), IrType::I64, "test.nl");

    assert!(
        diagnostics
            .iter()
            .any(|d| d.message.contains("undefined variable 'y'"))
    );
}

#[test]
fn statements_after_return_are_unreachable() {
    let record = record("main", &[]);
    let (function, diagnostics) = lower_function(
        &record,
        &body(&["ret 0;", "wibble wobble;"]),
        IrType::I64,
        "test.nl",
    );

    assert!(diagnostics.is_empty());
    assert!(function.blocks[0].instructions.is_empty());
}

#[test]
fn generated_function_verifies() {
    let record = record("main", &["a"]);
    let (function, _) = lower_function(
        &record,
        &body(&["var x = a * 2;", "x = x - 1;", "ret x;"]),
        IrType::I64,
        "test.nl",
    );
    let module = crate::ir::Module {
        name: "test".to_string(),
        functions: vec![function],
        ..Default::default()
    };

    assert!(crate::ir::verify_module(&module).is_ok());
}
