//! The Sable type algebra: construction, structural equality, promotion,
//! and canonical rendering.

use std::fmt;

/// Fixed set of built-in scalar and resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Int,
    Long,
    Double,
    Char,
    Str,
    Bool,
    Byte,
    Void,
    Nil,
    Any,
    TextFile,
    BinaryFile,
    Date,
    Time,
    Process,
    TcpListener,
    TcpStream,
    UdpSocket,
}

impl PrimitiveKind {
    /// The source-language keyword for this kind
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Str => "str",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Void => "void",
            PrimitiveKind::Nil => "nil",
            PrimitiveKind::Any => "any",
            PrimitiveKind::TextFile => "TextFile",
            PrimitiveKind::BinaryFile => "BinaryFile",
            PrimitiveKind::Date => "Date",
            PrimitiveKind::Time => "Time",
            PrimitiveKind::Process => "Process",
            PrimitiveKind::TcpListener => "TcpListener",
            PrimitiveKind::TcpStream => "TcpStream",
            PrimitiveKind::UdpSocket => "UdpSocket",
        }
    }
}

/// Memory-passing qualifier for parameters (`as val` / `as ref`).
/// Never participates in type equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamMode {
    #[default]
    Default,
    /// `as val` - explicit copy semantics
    ByValue,
    /// `as ref` - heap cell for primitives, allows shared mutation
    ByRef,
}

/// A function type: return type, ordered parameter types, and optional
/// per-parameter memory qualifiers.
///
/// Absent slots (`None`) stand for not-yet-resolved types; they propagate
/// and are reported by whichever checker first needs a concrete type.
#[derive(Debug, Clone)]
pub struct FunctionType {
    pub return_type: Option<Box<Type>>,
    pub params: Vec<Option<Type>>,
    pub param_modes: Option<Vec<ParamMode>>,
}

impl PartialEq for FunctionType {
    fn eq(&self, other: &Self) -> bool {
        // Qualifiers are calling-convention metadata, not part of identity
        self.return_type == other.return_type && self.params == other.params
    }
}

/// An immutable Sable type value.
///
/// Equality is structural and recursive: arrays compare by element type,
/// functions by return type and parameter list (qualifiers ignored),
/// primitives by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(PrimitiveKind),
    /// Element type may be absent for empty array literals pending context
    Array(Option<Box<Type>>),
    Function(FunctionType),
}

impl Type {
    pub fn primitive(kind: PrimitiveKind) -> Type {
        Type::Primitive(kind)
    }

    pub fn array(element: Option<Type>) -> Type {
        Type::Array(element.map(Box::new))
    }

    pub fn array_of(element: Type) -> Type {
        Type::Array(Some(Box::new(element)))
    }

    pub fn function(return_type: Option<Type>, params: Vec<Option<Type>>) -> Type {
        Type::Function(FunctionType {
            return_type: return_type.map(Box::new),
            params,
            param_modes: None,
        })
    }

    pub fn int() -> Type {
        Type::Primitive(PrimitiveKind::Int)
    }

    pub fn long() -> Type {
        Type::Primitive(PrimitiveKind::Long)
    }

    pub fn double() -> Type {
        Type::Primitive(PrimitiveKind::Double)
    }

    pub fn char_() -> Type {
        Type::Primitive(PrimitiveKind::Char)
    }

    pub fn str_() -> Type {
        Type::Primitive(PrimitiveKind::Str)
    }

    pub fn bool_() -> Type {
        Type::Primitive(PrimitiveKind::Bool)
    }

    pub fn byte() -> Type {
        Type::Primitive(PrimitiveKind::Byte)
    }

    pub fn void() -> Type {
        Type::Primitive(PrimitiveKind::Void)
    }

    pub fn nil() -> Type {
        Type::Primitive(PrimitiveKind::Nil)
    }

    /// Canonical head name used in diagnostics: `"int"`, `"array"`,
    /// `"function"`, ...
    pub fn name(&self) -> &'static str {
        match self {
            Type::Primitive(kind) => kind.name(),
            Type::Array(_) => "array",
            Type::Function(_) => "function",
        }
    }

    /// Head name of an optional type; an absent type renders `"unknown"`
    pub fn name_of(ty: Option<&Type>) -> &'static str {
        ty.map_or("unknown", Type::name)
    }

    /// int, long, or double
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Type::Primitive(PrimitiveKind::Int | PrimitiveKind::Long | PrimitiveKind::Double)
        )
    }

    /// Types accepted by string interpolation and the print surface
    pub fn is_printable(&self) -> bool {
        matches!(
            self,
            Type::Primitive(
                PrimitiveKind::Int
                    | PrimitiveKind::Long
                    | PrimitiveKind::Double
                    | PrimitiveKind::Char
                    | PrimitiveKind::Str
                    | PrimitiveKind::Bool
                    | PrimitiveKind::Byte
            ) | Type::Array(_)
        )
    }

    /// Value types not owned by an allocation region. Only these may
    /// escape a private block (strings and arrays are region-owned).
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Type::Primitive(
                PrimitiveKind::Int
                    | PrimitiveKind::Long
                    | PrimitiveKind::Double
                    | PrimitiveKind::Char
                    | PrimitiveKind::Bool
                    | PrimitiveKind::Byte
                    | PrimitiveKind::Void
            )
        )
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    /// Element type of an array type, if the receiver is one
    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::Array(element) => element.as_deref(),
            _ => None,
        }
    }
}

/// Structural equality over optional types: absent equals absent,
/// absent vs. present is unequal.
pub fn types_equal(a: Option<&Type>, b: Option<&Type>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Widest of {int, long, double} among two numeric types, using the
/// ordering int < long < double. Two equal types promote to themselves
/// (whatever their kind); anything else does not promote.
pub fn promote(a: &Type, b: &Type) -> Option<Type> {
    if a == b {
        return Some(a.clone());
    }
    if a.is_numeric() && b.is_numeric() {
        let double = Type::Primitive(PrimitiveKind::Double);
        if *a == double || *b == double {
            return Some(double);
        }
        let long = Type::Primitive(PrimitiveKind::Long);
        if *a == long || *b == long {
            return Some(long);
        }
        return Some(a.clone());
    }
    None
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(kind) => f.write_str(kind.name()),
            Type::Array(element) => match element {
                Some(element) => write!(f, "array of {element}"),
                None => f.write_str("array of unknown"),
            },
            Type::Function(func) => {
                f.write_str("function(")?;
                for (i, param) in func.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match param {
                        Some(param) => write!(f, "{param}")?,
                        None => f.write_str("unknown")?,
                    }
                }
                f.write_str(") -> ")?;
                match &func.return_type {
                    Some(ret) => write!(f, "{ret}"),
                    None => f.write_str("unknown"),
                }
            }
        }
    }
}
