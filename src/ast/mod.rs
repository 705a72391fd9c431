/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node kinds and the `Expression` / `Statement` / `Pattern` enums
/// - expressions: Literal, operator and left-hand-side expression nodes
/// - patterns: Destructuring and assignment targets
/// - statements: Statement nodes and the `Program` root
/// - declarations: Variables, functions, classes and module items
/// - factory: One constructor per node, plus declaration/expression reshaping
/// - visitor: Borrowed node views and depth-first traversal
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod factory;
pub mod patterns;
pub mod statements;
pub mod visitor;
