//! Child-use classification.
//!
//! Classifies *how* a parent node uses a direct child, so renaming and
//! feature walks can tag variable occurrences with their context ("used as
//! switch discriminant", "used as loop bound").

/// How a parent node uses a direct child.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UseKind {
    /// Controlling expression of a switch.
    Discriminant,
    /// Statement nested in a switch body.
    SwitchBody,
    /// Label expression of a switch case.
    CaseLabel,
    /// Condition of an `if` or ternary.
    Branch,
    /// Then/else statement of a conditional.
    BranchBody,
    /// Condition of a `while` or `for`.
    LoopBound,
    /// Step expression of a `for`.
    LoopStep,
    /// Body of a loop.
    LoopBody,
    /// Value of a `return`.
    ReturnValue,
    /// Value of a `throw`.
    Thrown,
    /// Left-hand side of an assignment.
    AssignTarget,
    /// Right-hand side of an assignment.
    AssignSource,
    /// Receiver of a method call or field access.
    CallReceiver,
    /// Argument of a call.
    CallArgument,
    /// Index expression of a subscript.
    IndexKey,
    /// Initializer of a declaration or `for` header.
    Initializer,
    /// Any other position (block statement, operand, ...).
    Plain,
}
