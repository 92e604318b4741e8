use std::fmt;

/// Head of a reference expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Root {
    /// `p<N>`: the Nth call argument, zero-indexed.
    Param(usize),
    /// `r`: the produced result.
    Result,
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Param(i) => write!(f, "p{}", i),
            Self::Result => f.write_str("r"),
        }
    }
}

/// An argument of a method call or an index accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Another root marker, resolved against the same call context.
    Root(Root),
    /// An integer literal: `-1`, `42`.
    Int(i64),
}

/// One step of a chain, applied to the value the previous step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// `.name`
    Member(String),
    /// `.name(args)`
    Call { name: String, args: Vec<Arg> },
    /// `[arg]`
    Index(Arg),
}

/// A parsed reference expression: `<root><chain>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub root: Root,
    pub chain: Vec<Accessor>,
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root(root) => write!(f, "{}", root),
            Self::Int(i) => write!(f, "{}", i),
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(name) => write!(f, ".{}", name),
            Self::Call { name, args } => {
                write!(f, ".{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Self::Index(arg) => write!(f, "[{}]", arg),
        }
    }
}

/// Canonical text: no whitespace, `", "` between call arguments.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for accessor in &self.chain {
            write!(f, "{}", accessor)?;
        }
        Ok(())
    }
}
