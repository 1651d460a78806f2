use crate::ir::IrType;

/// Maps a source type name to its backend scalar type. `int` is the
/// language default and is 64-bit signed. Unknown names return `None` and
/// are fatal for the function being generated.
pub fn scalar_type(name: &str) -> Option<IrType> {
    match name {
        "int" => Some(IrType::I64),
        "void" => Some(IrType::Void),
        "i8" => Some(IrType::I8),
        "i16" => Some(IrType::I16),
        "i32" => Some(IrType::I32),
        "i64" => Some(IrType::I64),
        "float" => Some(IrType::F32),
        "double" => Some(IrType::F64),
        _ => None,
    }
}

/// Default return type name used when a declaration carries no arrow.
pub const DEFAULT_RETURN_TYPE: &str = "int";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_scalars() {
        assert_eq!(scalar_type("int"), Some(IrType::I64));
        assert_eq!(scalar_type("void"), Some(IrType::Void));
        assert_eq!(scalar_type("i8"), Some(IrType::I8));
        assert_eq!(scalar_type("i16"), Some(IrType::I16));
        assert_eq!(scalar_type("i32"), Some(IrType::I32));
        assert_eq!(scalar_type("i64"), Some(IrType::I64));
        assert_eq!(scalar_type("float"), Some(IrType::F32));
        assert_eq!(scalar_type("double"), Some(IrType::F64));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(scalar_type("bignum"), None);
        assert_eq!(scalar_type(""), None);
        assert_eq!(scalar_type("Int"), None);
    }
}
