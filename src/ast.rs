use std::{fmt, rc::Rc};

use crate::interpreter::lexer::Token;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code. Arrays and functions are not literals; they are built at runtime from
/// their own expression nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `nil`
    Nil,
    /// `true` or `false`.
    Bool(bool),
    /// A double-precision number. Integer-looking literals are stored as
    /// floats too.
    Number(f64),
    /// A string literal, without its quotes.
    Str(Rc<str>),
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(Rc::from(value))
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every variant that can fault at runtime keeps the token the fault should
/// be reported at.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant.
    Literal {
        /// The constant value.
        value: LiteralValue,
    },
    /// An arithmetic, comparison or equality operation. Both operands are
    /// always evaluated, left first.
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// The operator token, for error positions.
        operator: Token,
        /// Right operand.
        right:    Box<Self>,
    },
    /// `-x` or `!x`.
    Unary {
        /// The operator.
        op:       UnaryOperator,
        /// The operator token, for error positions.
        operator: Token,
        /// The operand expression.
        right:    Box<Self>,
    },
    /// Reference to a variable by name.
    Variable {
        /// The identifier token.
        name: Token,
    },
    /// A parenthesized expression.
    Grouping {
        /// The wrapped expression.
        expression: Box<Self>,
    },
    /// `name = value`. Evaluates to the assigned value.
    Assign {
        /// The target identifier.
        name:  Token,
        /// The value being assigned.
        value: Box<Self>,
    },
    /// Short-circuiting `and` / `or`.
    Logical {
        /// Left operand, always evaluated.
        left:     Box<Self>,
        /// The operator.
        op:       LogicalOperator,
        /// The operator token.
        operator: Token,
        /// Right operand, evaluated only when the left one does not decide
        /// the result.
        right:    Box<Self>,
    },
    /// Function call expression (e.g. `f(1, 2)`).
    Call {
        /// The expression producing the callable.
        callee:    Box<Self>,
        /// Arguments, evaluated left to right.
        arguments: Vec<Self>,
        /// The closing parenthesis, for error positions.
        paren:     Token,
    },
    /// Array literal expression (e.g. `[1, "two", nil]`).
    Array {
        /// Elements of the array.
        elements: Vec<Self>,
    },
    /// Indexing expression (e.g. `xs[2]`).
    Index {
        /// The array or string being indexed.
        collection: Box<Self>,
        /// The index to access.
        index:      Box<Self>,
        /// The opening bracket, for error positions.
        bracket:    Token,
    },
    /// An anonymous function literal, `fn (a, b) { ... }`.
    Function(Rc<FunctionDecl>),
}

/// A function declaration shared between statement and expression position.
///
/// `fn name(...) { ... }` as a statement binds `name` in the current scope;
/// `fn (...) { ... }` as an expression evaluates to an anonymous closure. Both
/// point at the same node type, and closures keep an `Rc` to it instead of
/// copying the body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The function's name; `None` for anonymous functions.
    pub name:   Option<Token>,
    /// The parameter names, in declaration order.
    pub params: Vec<Token>,
    /// The body statements.
    pub body:   Vec<Stmt>,
}

impl FunctionDecl {
    /// The declared arity.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `var name = initializer;` or `var name;`.
    Var {
        /// The declared name.
        name:        Token,
        /// Optional initial value; `nil` when absent.
        initializer: Option<Expr>,
    },
    /// `print expression;`
    Print {
        /// The value to print.
        expression: Expr,
        /// The `print` keyword.
        keyword:    Token,
    },
    /// `if (condition) then_branch else else_branch`
    If {
        /// The condition, tested for truthiness.
        condition:   Expr,
        /// Executed when the condition is truthy.
        then_branch: Box<Self>,
        /// Executed otherwise, if present.
        else_branch: Option<Box<Self>>,
    },
    /// `while (condition) body`. `for` loops are desugared into this.
    While {
        /// The loop condition, tested before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
    },
    /// An expression evaluated for its side effects.
    Expression {
        /// The expression to evaluate.
        expression: Expr,
    },
    /// `return value;` or `return;`.
    Return {
        /// The `return` keyword.
        keyword: Token,
        /// The returned value; `nil` when absent.
        value:   Option<Expr>,
    },
    /// `{ ... }`, executed in a fresh child scope.
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
    },
    /// A named function declaration.
    Function(Rc<FunctionDecl>),
    /// `break;`
    Break {
        /// The `break` keyword.
        keyword: Token,
    },
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

/// Represents a short-circuiting logical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Writes `items` separated by single spaces, each preceded by a space.
fn write_spaced<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for item in items {
        write!(f, " {item}")?;
    }
    Ok(())
}

impl fmt::Display for FunctionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(fn")?;
        if let Some(name) = &self.name {
            write!(f, " {}", name.lexeme)?;
        }
        write!(f, " (")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", param.lexeme)?;
        }
        write!(f, ")")?;
        write_spaced(f, &self.body)?;
        write!(f, ")")
    }
}

/// Renders the tree as an S-expression, e.g. `(+ 1 (* 2 3))`.
///
/// # Example
/// ```
/// use probe::{ast::Expr, error::Diagnostics, parse_program};
///
/// let mut diagnostics = Diagnostics::new();
/// let program = parse_program("print 1 + 2 * 3;", &mut diagnostics).unwrap();
///
/// assert_eq!(program[0].to_string(), "(print (+ 1 (* 2 3)))");
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value } => write!(f, "{value}"),
            Self::Binary { left, op, right, .. } => write!(f, "({op} {left} {right})"),
            Self::Unary { op, right, .. } => write!(f, "({op} {right})"),
            Self::Variable { name } => write!(f, "{}", name.lexeme),
            Self::Grouping { expression } => write!(f, "(group {expression})"),
            Self::Assign { name, value } => write!(f, "(= {} {value})", name.lexeme),
            Self::Logical { left, op, right, .. } => write!(f, "({op} {left} {right})"),
            Self::Call { callee, arguments, .. } => {
                write!(f, "(call {callee}")?;
                write_spaced(f, arguments)?;
                write!(f, ")")
            },
            Self::Array { elements } => {
                write!(f, "(array")?;
                write_spaced(f, elements)?;
                write!(f, ")")
            },
            Self::Index { collection, index, .. } => write!(f, "(index {collection} {index})"),
            Self::Function(declaration) => write!(f, "{declaration}"),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var { name, initializer } => match initializer {
                Some(value) => write!(f, "(var {} {value})", name.lexeme),
                None => write!(f, "(var {})", name.lexeme),
            },
            Self::Print { expression, .. } => write!(f, "(print {expression})"),
            Self::If { condition,
                       then_branch,
                       else_branch, } => match else_branch {
                Some(else_branch) => write!(f, "(if {condition} {then_branch} {else_branch})"),
                None => write!(f, "(if {condition} {then_branch})"),
            },
            Self::While { condition, body } => write!(f, "(while {condition} {body})"),
            Self::Expression { expression } => write!(f, "(; {expression})"),
            Self::Return { value, .. } => match value {
                Some(value) => write!(f, "(return {value})"),
                None => write!(f, "(return)"),
            },
            Self::Block { statements } => {
                write!(f, "(block")?;
                write_spaced(f, statements)?;
                write!(f, ")")
            },
            Self::Function(declaration) => write!(f, "{declaration}"),
            Self::Break { .. } => write!(f, "(break)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::TokenKind;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, 1, 1)
    }

    fn number(n: f64) -> Expr {
        Expr::Literal { value: n.into() }
    }

    #[test]
    fn nested_expressions_render_as_s_expressions() {
        let expr = Expr::Binary { left:     Box::new(number(1.0)),
                                  op:       BinaryOperator::Add,
                                  operator: token(TokenKind::Plus, "+"),
                                  right:    Box::new(Expr::Grouping { expression:
                                                                          Box::new(Expr::Unary {
                                                                              op: UnaryOperator::Negate,
                                                                              operator: token(TokenKind::Minus, "-"),
                                                                              right: Box::new(number(2.5)),
                                                                          }) }), };
        assert_eq!(expr.to_string(), "(+ 1 (group (- 2.5)))");
    }

    #[test]
    fn functions_render_name_params_and_body() {
        let declaration = FunctionDecl { name:   Some(token(TokenKind::Identifier, "id")),
                                         params: vec![token(TokenKind::Identifier, "x")],
                                         body:   vec![Stmt::Return { keyword:
                                                                         token(TokenKind::Return,
                                                                               "return"),
                                                                     value:
                                                                         Some(Expr::Variable {
                                                                             name: token(TokenKind::Identifier, "x"),
                                                                         }), }], };
        assert_eq!(declaration.arity(), 1);
        assert_eq!(Stmt::Function(Rc::new(declaration)).to_string(),
                   "(fn id (x) (return x))");
    }

    #[test]
    fn string_literals_keep_their_quotes() {
        let stmt = Stmt::Var { name:        token(TokenKind::Identifier, "s"),
                               initializer: Some(Expr::Literal { value: "hi".into() }), };
        assert_eq!(stmt.to_string(), "(var s \"hi\")");
    }
}
