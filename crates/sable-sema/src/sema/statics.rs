//! Static namespace surface (`TextFile.open(...)`, `Time.now()`, ...).

use crate::ast::{PrimitiveKind, Type};

pub const NAMESPACES: &[&str] = &[
    "TextFile",
    "BinaryFile",
    "Time",
    "Stdin",
    "Stdout",
    "Stderr",
    "Bytes",
    "Path",
    "Directory",
];

/// Signature of a static method
#[derive(Debug, Clone, PartialEq)]
pub enum StaticMethod {
    Fixed { params: Vec<Type>, ret: Type },
    /// `Path.join`: any number of string arguments at or above `min`
    VariadicStr { min: usize, ret: Type },
}

fn fixed(params: Vec<Type>, ret: Type) -> Option<StaticMethod> {
    Some(StaticMethod::Fixed { params, ret })
}

pub fn namespace_exists(namespace: &str) -> bool {
    NAMESPACES.contains(&namespace)
}

/// Signature of `namespace.method`, if the namespace defines it
pub fn resolve(namespace: &str, method: &str) -> Option<StaticMethod> {
    match namespace {
        "TextFile" => resolve_file(method, Type::primitive(PrimitiveKind::TextFile), Type::str_()),
        "BinaryFile" => resolve_file(
            method,
            Type::primitive(PrimitiveKind::BinaryFile),
            Type::array_of(Type::byte()),
        ),
        "Time" => resolve_time(method),
        "Stdin" => resolve_stdin(method),
        "Stdout" | "Stderr" => resolve_out_stream(method),
        "Bytes" => resolve_bytes(method),
        "Path" => resolve_path(method),
        "Directory" => resolve_directory(method),
        _ => None,
    }
}

/// TextFile and BinaryFile share shape; they differ in the handle type
/// and the payload type moved by readAll/writeAll.
fn resolve_file(method: &str, handle: Type, payload: Type) -> Option<StaticMethod> {
    match method {
        "open" => fixed(vec![Type::str_()], handle),
        "exists" => fixed(vec![Type::str_()], Type::bool_()),
        "readAll" => fixed(vec![Type::str_()], payload),
        "writeAll" => fixed(vec![Type::str_(), payload], Type::void()),
        "delete" => fixed(vec![Type::str_()], Type::void()),
        "copy" | "move" => fixed(vec![Type::str_(), Type::str_()], Type::void()),
        _ => None,
    }
}

fn resolve_time(method: &str) -> Option<StaticMethod> {
    let time = Type::primitive(PrimitiveKind::Time);
    match method {
        "now" | "utc" => fixed(vec![], time),
        "fromMillis" | "fromSeconds" => fixed(vec![Type::int()], time),
        "sleep" => fixed(vec![Type::int()], Type::void()),
        _ => None,
    }
}

fn resolve_stdin(method: &str) -> Option<StaticMethod> {
    match method {
        "readLine" | "readWord" => fixed(vec![], Type::str_()),
        "readChar" => fixed(vec![], Type::int()),
        "hasChars" | "hasLines" | "isEof" => fixed(vec![], Type::bool_()),
        _ => None,
    }
}

fn resolve_out_stream(method: &str) -> Option<StaticMethod> {
    match method {
        "write" | "writeLine" => fixed(vec![Type::str_()], Type::void()),
        "flush" => fixed(vec![], Type::void()),
        _ => None,
    }
}

fn resolve_bytes(method: &str) -> Option<StaticMethod> {
    match method {
        "fromHex" | "fromBase64" => fixed(vec![Type::str_()], Type::array_of(Type::byte())),
        _ => None,
    }
}

fn resolve_path(method: &str) -> Option<StaticMethod> {
    match method {
        "directory" | "filename" | "extension" | "absolute" => {
            fixed(vec![Type::str_()], Type::str_())
        }
        "join" => Some(StaticMethod::VariadicStr { min: 2, ret: Type::str_() }),
        "exists" | "isFile" | "isDirectory" => fixed(vec![Type::str_()], Type::bool_()),
        _ => None,
    }
}

fn resolve_directory(method: &str) -> Option<StaticMethod> {
    match method {
        "list" | "listRecursive" => fixed(vec![Type::str_()], Type::array_of(Type::str_())),
        "create" | "delete" | "deleteRecursive" => fixed(vec![Type::str_()], Type::void()),
        _ => None,
    }
}
