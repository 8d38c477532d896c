/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Program` root
/// - expressions: The closed set of expression nodes
/// - statements: The closed set of statement nodes
///
/// `Display` on every node is the canonical, byte-exact rendering. Increment
/// nodes render as `(x++)` and `(++x)`; a rendered increment is never a valid
/// increment target itself.
pub mod ast;
pub mod expressions;
pub mod statements;
