//! Instance member resolution.
//!
//! Members are resolved by (receiver category, name): each category has a
//! synthesizing function that builds the member's type on demand, plus a
//! fixed name list feeding spelling suggestions. Method members resolve to
//! function types; `length` and the file handle properties are bare values.

use crate::ast::{PrimitiveKind, Type};

/// Receiver families that expose members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Array,
    Str,
    TextFile,
    BinaryFile,
    Time,
}

pub fn category_of(ty: &Type) -> Option<Category> {
    match ty {
        Type::Array(_) => Some(Category::Array),
        Type::Primitive(PrimitiveKind::Str) => Some(Category::Str),
        Type::Primitive(PrimitiveKind::TextFile) => Some(Category::TextFile),
        Type::Primitive(PrimitiveKind::BinaryFile) => Some(Category::BinaryFile),
        Type::Primitive(PrimitiveKind::Time) => Some(Category::Time),
        _ => None,
    }
}

/// Known member names for a category, in resolution order
pub fn known_members(category: Category) -> &'static [&'static str] {
    match category {
        Category::Array => &[
            "length", "push", "pop", "clear", "concat", "indexOf", "contains", "clone", "join",
            "reverse", "insert", "remove", "toString", "toStringLatin1", "toHex", "toBase64",
        ],
        Category::Str => &[
            "length",
            "substring",
            "indexOf",
            "split",
            "trim",
            "toUpper",
            "toLower",
            "splitWhitespace",
            "splitLines",
            "startsWith",
            "endsWith",
            "contains",
            "replace",
            "charAt",
            "toBytes",
            "isBlank",
        ],
        Category::TextFile => &[
            "readChar", "readWord", "readLine", "readAll", "readLines", "readInto", "writeChar",
            "write", "writeLine", "print", "println", "hasChars", "hasWords", "hasLines", "isEof",
            "position", "seek", "rewind", "flush", "close", "path", "name", "size",
        ],
        Category::BinaryFile => &[
            "readByte", "readBytes", "readAll", "readInto", "writeByte", "writeBytes", "hasBytes",
            "isEof", "position", "seek", "rewind", "flush", "close", "path", "name", "size",
        ],
        Category::Time => &[
            "millis", "seconds", "year", "month", "day", "hour", "minute", "second", "weekday",
            "format", "toIso", "toDate", "toTime", "add", "addSeconds", "addMinutes", "addHours",
            "addDays", "diff", "isBefore", "isAfter", "equals",
        ],
    }
}

/// Type of `receiver.name`, if the receiver's category defines it
pub fn resolve(receiver: &Type, name: &str) -> Option<Type> {
    match receiver {
        Type::Array(element) => {
            let element = element.as_deref().cloned().unwrap_or(Type::nil());
            resolve_array(&element, name)
        }
        Type::Primitive(PrimitiveKind::Str) => resolve_str(name),
        Type::Primitive(PrimitiveKind::TextFile) => resolve_text_file(name),
        Type::Primitive(PrimitiveKind::BinaryFile) => resolve_binary_file(name),
        Type::Primitive(PrimitiveKind::Time) => resolve_time(name),
        _ => None,
    }
}

fn method(params: Vec<Type>, ret: Type) -> Type {
    Type::function(Some(ret), params.into_iter().map(Some).collect())
}

fn resolve_array(element: &Type, name: &str) -> Option<Type> {
    if *element == Type::byte() {
        // byte arrays add encoding views on top of the generic surface
        match name {
            "toString" | "toStringLatin1" | "toHex" | "toBase64" => {
                return Some(method(vec![], Type::str_()));
            }
            _ => {}
        }
    }
    match name {
        "length" => Some(Type::int()),
        "push" => Some(method(vec![element.clone()], Type::void())),
        "pop" => Some(method(vec![], element.clone())),
        "clear" => Some(method(vec![], Type::void())),
        "concat" => Some(method(
            vec![Type::array_of(element.clone())],
            Type::array_of(element.clone()),
        )),
        "indexOf" => Some(method(vec![element.clone()], Type::int())),
        "contains" => Some(method(vec![element.clone()], Type::bool_())),
        "clone" => Some(method(vec![], Type::array_of(element.clone()))),
        "join" => Some(method(vec![Type::str_()], Type::str_())),
        "reverse" => Some(method(vec![], Type::void())),
        "insert" => Some(method(vec![element.clone(), Type::int()], Type::void())),
        "remove" => Some(method(vec![Type::int()], element.clone())),
        _ => None,
    }
}

fn resolve_str(name: &str) -> Option<Type> {
    match name {
        "length" => Some(Type::int()),
        "substring" => Some(method(vec![Type::int(), Type::int()], Type::str_())),
        "indexOf" => Some(method(vec![Type::str_()], Type::int())),
        "split" => Some(method(vec![Type::str_()], Type::array_of(Type::str_()))),
        "trim" | "toUpper" | "toLower" => Some(method(vec![], Type::str_())),
        "splitWhitespace" | "splitLines" => {
            Some(method(vec![], Type::array_of(Type::str_())))
        }
        "startsWith" | "endsWith" | "contains" => {
            Some(method(vec![Type::str_()], Type::bool_()))
        }
        "replace" => Some(method(vec![Type::str_(), Type::str_()], Type::str_())),
        "charAt" => Some(method(vec![Type::int()], Type::char_())),
        "toBytes" => Some(method(vec![], Type::array_of(Type::byte()))),
        "isBlank" => Some(method(vec![], Type::bool_())),
        _ => None,
    }
}

fn resolve_text_file(name: &str) -> Option<Type> {
    match name {
        "readChar" => Some(method(vec![], Type::int())),
        "readWord" | "readLine" | "readAll" => Some(method(vec![], Type::str_())),
        "readLines" => Some(method(vec![], Type::array_of(Type::str_()))),
        "readInto" => Some(method(vec![Type::array_of(Type::char_())], Type::int())),
        "writeChar" => Some(method(vec![Type::char_()], Type::void())),
        "write" | "writeLine" | "print" | "println" => {
            Some(method(vec![Type::str_()], Type::void()))
        }
        "hasChars" | "hasWords" | "hasLines" | "isEof" => Some(method(vec![], Type::bool_())),
        "position" => Some(method(vec![], Type::int())),
        "seek" => Some(method(vec![Type::int()], Type::void())),
        "rewind" | "flush" | "close" => Some(method(vec![], Type::void())),
        // properties, not methods
        "path" | "name" => Some(Type::str_()),
        "size" => Some(Type::int()),
        _ => None,
    }
}

fn resolve_binary_file(name: &str) -> Option<Type> {
    match name {
        "readByte" => Some(method(vec![], Type::int())),
        "readBytes" => Some(method(vec![Type::int()], Type::array_of(Type::byte()))),
        "readAll" => Some(method(vec![], Type::array_of(Type::byte()))),
        "readInto" => Some(method(vec![Type::array_of(Type::byte())], Type::int())),
        "writeByte" => Some(method(vec![Type::int()], Type::void())),
        "writeBytes" => Some(method(vec![Type::array_of(Type::byte())], Type::void())),
        "hasBytes" | "isEof" => Some(method(vec![], Type::bool_())),
        "position" => Some(method(vec![], Type::int())),
        "seek" => Some(method(vec![Type::int()], Type::void())),
        "rewind" | "flush" | "close" => Some(method(vec![], Type::void())),
        "path" | "name" => Some(Type::str_()),
        "size" => Some(Type::int()),
        _ => None,
    }
}

fn resolve_time(name: &str) -> Option<Type> {
    let time = Type::primitive(PrimitiveKind::Time);
    match name {
        "millis" | "seconds" | "year" | "month" | "day" | "hour" | "minute" | "second"
        | "weekday" => Some(method(vec![], Type::int())),
        "format" => Some(method(vec![Type::str_()], Type::str_())),
        "toIso" | "toDate" | "toTime" => Some(method(vec![], Type::str_())),
        "add" | "addSeconds" | "addMinutes" | "addHours" | "addDays" => {
            Some(method(vec![Type::int()], time))
        }
        "diff" => Some(method(vec![time], Type::int())),
        "isBefore" | "isAfter" | "equals" => Some(method(vec![time], Type::bool_())),
        _ => None,
    }
}
