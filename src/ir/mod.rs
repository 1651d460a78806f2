use std::fmt::{self, Display, Formatter};

pub mod builder;
pub mod verify;

pub use builder::FunctionBuilder;
pub use verify::verify_module;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrType {
    Void,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl IrType {
    pub fn is_integer(&self) -> bool {
        matches!(self, IrType::I8 | IrType::I16 | IrType::I32 | IrType::I64)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, IrType::F32 | IrType::F64)
    }

    /// Zero value of this type; `None` for void.
    pub fn zero(&self) -> Option<Constant> {
        match self {
            IrType::Void => None,
            ty if ty.is_float() => Some(Constant::Float(0.0)),
            _ => Some(Constant::Int(0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Constant(Constant),
    Register(String),
    Argument(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone)]
pub enum Instruction {
    // Memory operations
    Alloca {
        dest: String,
        ty: IrType,
    },
    Load {
        dest: String,
        ptr: Value,
        ty: IrType,
    },
    Store {
        value: Value,
        ptr: Value,
        ty: IrType,
    },

    // Arithmetic operations
    Add {
        dest: String,
        lhs: Value,
        rhs: Value,
        ty: IrType,
    },
    Sub {
        dest: String,
        lhs: Value,
        rhs: Value,
        ty: IrType,
    },
    Mul {
        dest: String,
        lhs: Value,
        rhs: Value,
        ty: IrType,
    },
    Div {
        dest: String,
        lhs: Value,
        rhs: Value,
        ty: IrType,
    },
}

impl Instruction {
    pub fn dest(&self) -> Option<&str> {
        match self {
            Instruction::Alloca { dest, .. }
            | Instruction::Load { dest, .. }
            | Instruction::Add { dest, .. }
            | Instruction::Sub { dest, .. }
            | Instruction::Mul { dest, .. }
            | Instruction::Div { dest, .. } => Some(dest),
            Instruction::Store { .. } => None,
        }
    }

    pub fn operands(&self) -> Vec<&Value> {
        match self {
            Instruction::Alloca { .. } => vec![],
            Instruction::Load { ptr, .. } => vec![ptr],
            Instruction::Store { value, ptr, .. } => vec![value, ptr],
            Instruction::Add { lhs, rhs, .. }
            | Instruction::Sub { lhs, rhs, .. }
            | Instruction::Mul { lhs, rhs, .. }
            | Instruction::Div { lhs, rhs, .. } => vec![lhs, rhs],
        }
    }
}

#[derive(Debug, Clone)]
pub enum Terminator {
    Ret { ty: IrType, value: Option<Value> },
}

#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub label: String,
    pub instructions: Vec<Instruction>,
    pub terminator: Option<Terminator>,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub params: Vec<(String, IrType)>,
    pub return_type: IrType,
    pub blocks: Vec<BasicBlock>,
}

#[derive(Debug, Default)]
pub struct Module {
    pub name: String,
    pub source_filename: String,
    pub target_triple: String,
    pub data_layout: String,
    pub functions: Vec<Function>,
}

// Display implementations

impl Display for IrType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Void => write!(f, "void"),
            IrType::I8 => write!(f, "i8"),
            IrType::I16 => write!(f, "i16"),
            IrType::I32 => write!(f, "i32"),
            IrType::I64 => write!(f, "i64"),
            IrType::F32 => write!(f, "float"),
            IrType::F64 => write!(f, "double"),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Constant(c) => write!(f, "{}", c),
            Value::Register(name) => write!(f, "{}", name),
            Value::Argument(name) => write!(f, "%{}", name),
        }
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(i) => write!(f, "{}", i),
            Constant::Float(fl) => write!(f, "{:.6}", fl),
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Alloca { dest, ty } => {
                write!(f, "  {} = alloca {}", dest, ty)
            }
            Instruction::Load { dest, ptr, ty } => {
                write!(f, "  {} = load {}, ptr {}", dest, ty, ptr)
            }
            Instruction::Store { value, ptr, ty } => {
                write!(f, "  store {} {}, ptr {}", ty, value, ptr)
            }
            Instruction::Add { dest, lhs, rhs, ty } => {
                write!(f, "  {} = add {} {}, {}", dest, ty, lhs, rhs)
            }
            Instruction::Sub { dest, lhs, rhs, ty } => {
                write!(f, "  {} = sub {} {}, {}", dest, ty, lhs, rhs)
            }
            Instruction::Mul { dest, lhs, rhs, ty } => {
                write!(f, "  {} = mul {} {}, {}", dest, ty, lhs, rhs)
            }
            Instruction::Div { dest, lhs, rhs, ty } => {
                write!(f, "  {} = sdiv {} {}, {}", dest, ty, lhs, rhs)
            }
        }
    }
}

impl Display for Terminator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Ret {
                ty,
                value: Some(val),
            } => {
                write!(f, "  ret {} {}", ty, val)
            }
            Terminator::Ret { value: None, .. } => {
                write!(f, "  ret void")
            }
        }
    }
}

impl Display for BasicBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        for instruction in &self.instructions {
            writeln!(f, "{}", instruction)?;
        }
        if let Some(term) = &self.terminator {
            writeln!(f, "{}", term)?;
        }
        Ok(())
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "define {} @{}(", self.return_type, self.name)?;
        for (i, (param_name, param_type)) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} %{}", param_type, param_name)?;
        }
        writeln!(f, ") {{")?;
        for block in &self.blocks {
            write!(f, "{}", block)?;
        }
        writeln!(f, "}}")?;
        Ok(())
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name)?;
        writeln!(f, "source_filename = \"{}\"", self.source_filename)?;
        writeln!(f, "target datalayout = \"{}\"", self.data_layout)?;
        writeln!(f, "target triple = \"{}\"", self.target_triple)?;

        for function in &self.functions {
            writeln!(f)?;
            write!(f, "{}", function)?;
        }
        Ok(())
    }
}
