macro_rules! assemble {
    ($instructions:ident {}) => ();
    // no operands
    ($instructions:ident { $name:ident ; $($rest:tt)* }) => {
        $instructions.push(AsmInstruction::$name);
        assemble!($instructions { $($rest)* });
    };
    // Binary OP %REG, exp
    ($instructions:ident { Binary $op:ident %$dst:ident, $src:expr ; $($rest:tt)* }) => {
        $instructions.push(AsmInstruction::Binary(BinaryOp::$op, Operand::Reg(Register::$dst), $src));
        assemble!($instructions { $($rest)* });
    };
    // %REG, #IMM
    ($instructions:ident { $name:ident %$dst:ident, #$imm:expr ; $($rest:tt)* }) => {
        $instructions.push(AsmInstruction::$name(Operand::Reg(Register::$dst), Operand::Imm($imm)));
        assemble!($instructions { $($rest)* });
    };
    // %REG, %REG
    ($instructions:ident { $name:ident %$dst:ident, %$src:ident ; $($rest:tt)* }) => {
        $instructions.push(AsmInstruction::$name(Operand::Reg(Register::$dst), Operand::Reg(Register::$src)));
        assemble!($instructions { $($rest)* });
    };
    // %REG, exp
    ($instructions:ident { $name:ident %$dst:ident, $src:expr ; $($rest:tt)* }) => {
        $instructions.push(AsmInstruction::$name(Operand::Reg(Register::$dst), $src));
        assemble!($instructions { $($rest)* });
    };
    // %REG
    ($instructions:ident { $name:ident %$reg:ident ; $($rest:tt)* }) => {
        $instructions.push(AsmInstruction::$name(Operand::Reg(Register::$reg)));
        assemble!($instructions { $($rest)* });
    };
    // #IMM
    ($instructions:ident { $name:ident #$imm:expr ; $($rest:tt)* }) => {
        $instructions.push(AsmInstruction::$name(Operand::Imm($imm)));
        assemble!($instructions { $($rest)* });
    };
    // exp, %REG
    ($instructions:ident { $name:ident $dst:expr, %$src:ident ; $($rest:tt)* }) => {
        $instructions.push(AsmInstruction::$name($dst, Operand::Reg(Register::$src)));
        assemble!($instructions { $($rest)* });
    };
    // exp [, exp]*
    ($instructions:ident { $name:ident $($args:expr),+ ; $($rest:tt)* }) => {
        $instructions.push(AsmInstruction::$name($($args),+));
        assemble!($instructions { $($rest)* });
    };
}
pub(super) use assemble;
