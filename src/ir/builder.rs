use super::*;

/// Single-owner builder for one function: the entry block plus a register
/// counter. All statement lowering lands in the entry block.
pub struct FunctionBuilder {
    function: Function,
    register_counter: usize,
}

impl FunctionBuilder {
    pub fn new(name: &str, params: &[String], return_type: IrType) -> Self {
        let function = Function {
            name: name.to_string(),
            // Parameter types are not modeled in the source language;
            // every parameter lowers to the default integer.
            params: params
                .iter()
                .map(|param| (param.clone(), IrType::I64))
                .collect(),
            return_type,
            blocks: vec![BasicBlock {
                label: "entry".to_string(),
                instructions: Vec::new(),
                terminator: None,
            }],
        };

        Self {
            function,
            register_counter: 0,
        }
    }

    pub fn fresh_register(&mut self) -> String {
        let register = format!("%{}", self.register_counter);
        self.register_counter += 1;
        register
    }

    pub fn return_type(&self) -> IrType {
        self.function.return_type
    }

    pub fn is_param(&self, name: &str) -> bool {
        self.function.params.iter().any(|(param, _)| param == name)
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.entry_mut().instructions.push(instruction);
    }

    pub fn terminate(&mut self, terminator: Terminator) {
        self.entry_mut().terminator = Some(terminator);
    }

    pub fn is_terminated(&self) -> bool {
        self.function.blocks[0].terminator.is_some()
    }

    pub fn finish(self) -> Function {
        self.function
    }

    fn entry_mut(&mut self) -> &mut BasicBlock {
        &mut self.function.blocks[0]
    }
}
