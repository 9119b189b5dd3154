//! The node model consumed by the interpreter.
//!
//! Trees are produced by an external concrete-syntax parser; the interpreter
//! only reads them. Constructs the interpreter deliberately does not model
//! (object instantiation, arbitrary function calls, I/O) are mapped to the
//! `Unknown` variants by the parser and resolve to nothing.

/// One piece of an interpolated string: literal text or a variable reference.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpPart {
    Lit(String),
    Var(String),
}

/// One entry of an array-construction expression. A missing key means the
/// entry takes the next auto-incremented index.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayEntry {
    pub key: Option<Expr>,
    pub value: Expr,
}

impl ArrayEntry {
    pub fn keyed(key: Expr, value: Expr) -> Self {
        ArrayEntry { key: Some(key), value }
    }

    pub fn unkeyed(value: Expr) -> Self {
        ArrayEntry { key: None, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Var(String),
    /// Double-quoted string with embedded variables: `"got $n items"`.
    Interp(Vec<InterpPart>),
    /// `base[index]`.
    Subscript { base: Box<Expr>, index: Box<Expr> },
    /// Unary numeric negation.
    Neg(Box<Expr>),
    Bin { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Ternary { cond: Box<Expr>, then: Box<Expr>, otherwise: Box<Expr> },
    Array(Vec<ArrayEntry>),
    /// A function or method call. Calls with a receiver (method chains) are
    /// never invoked; receiverless calls dispatch to the builtin table.
    Call { name: String, args: Vec<Expr>, receiver: Option<Box<Expr>> },
    /// `self::NAME` and friends; resolved against the enclosing class body.
    ClassConst { class: String, name: String },
    /// `$target = value` and the compound forms.
    Assign { target: String, op: AssignOp, value: Box<Expr> },
    /// `$target++` / `$target--`.
    Update { target: String, op: UpdateOp },
    /// Inline closure or arrow function. Opaque as a value; usable as a
    /// data-provider source.
    Closure { body: Vec<Stmt> },
    /// Any construct the parser does not map onto the kinds above.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Concat,
    Add,
    Sub,
    Mul,
    Mod,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Identical,
    Ne,
    NotIdentical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Incr,
    Decr,
}

/// A body is a list of statements.
pub type Body = Vec<Stmt>;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Return(Option<Expr>),
    /// `yield value` / `yield key => value`. The value is carried for the
    /// contract's sake; labels derive from the key alone.
    Yield { key: Option<Expr>, value: Option<Expr> },
    If { cond: Expr, then: Body, otherwise: Option<Body> },
    For { init: Vec<Expr>, cond: Option<Expr>, update: Vec<Expr>, body: Body },
    Foreach { source: Expr, key_var: Option<String>, value_var: String, body: Body },
    While { cond: Expr, body: Body },
    Break,
    Continue,
    Unknown,
}

/// The class enclosing a provider method, as far as the interpreter cares:
/// an ordered member list it can scan for constants.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassBody {
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Const { name: String, value: Expr },
    Method(MethodDef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub name: String,
    pub body: Body,
}

impl ClassBody {
    pub fn new(members: Vec<ClassMember>) -> Self {
        ClassBody { members }
    }

    /// Linear scan for a constant declaration with the given name.
    pub fn find_const(&self, name: &str) -> Option<&Expr> {
        self.members.iter().find_map(|m| match m {
            ClassMember::Const { name: n, value } if n == name => Some(value),
            _ => None,
        })
    }

    /// Linear scan for a method with the given name.
    pub fn find_method(&self, name: &str) -> Option<&MethodDef> {
        self.members.iter().find_map(|m| match m {
            ClassMember::Method(def) if def.name == name => Some(def),
            _ => None,
        })
    }
}

// Constructor shorthands so parsers and tests can build trees without
// spelling out every Box.
impl Expr {
    pub fn num(n: f64) -> Expr {
        Expr::Num(n)
    }

    pub fn str(s: impl Into<String>) -> Expr {
        Expr::Str(s.into())
    }

    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    pub fn array(entries: Vec<ArrayEntry>) -> Expr {
        Expr::Array(entries)
    }

    /// Array of unkeyed entries.
    pub fn list(values: Vec<Expr>) -> Expr {
        Expr::Array(values.into_iter().map(ArrayEntry::unkeyed).collect())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call { name: name.into(), args, receiver: None }
    }

    pub fn method_call(receiver: Expr, name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call { name: name.into(), args, receiver: Some(Box::new(receiver)) }
    }

    pub fn bin(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        Expr::Bin { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn subscript(base: Expr, index: Expr) -> Expr {
        Expr::Subscript { base: Box::new(base), index: Box::new(index) }
    }

    pub fn ternary(cond: Expr, then: Expr, otherwise: Expr) -> Expr {
        Expr::Ternary {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn assign(target: impl Into<String>, value: Expr) -> Expr {
        Expr::Assign { target: target.into(), op: AssignOp::Set, value: Box::new(value) }
    }

    pub fn compound(target: impl Into<String>, op: AssignOp, value: Expr) -> Expr {
        Expr::Assign { target: target.into(), op, value: Box::new(value) }
    }

    pub fn class_const(class: impl Into<String>, name: impl Into<String>) -> Expr {
        Expr::ClassConst { class: class.into(), name: name.into() }
    }
}

impl Stmt {
    pub fn ret(value: Expr) -> Stmt {
        Stmt::Return(Some(value))
    }

    pub fn yield_value(value: Expr) -> Stmt {
        Stmt::Yield { key: None, value: Some(value) }
    }

    pub fn yield_keyed(key: Expr, value: Expr) -> Stmt {
        Stmt::Yield { key: Some(key), value: Some(value) }
    }
}
