use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A class or interface type, identified by its fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassType {
    package: Name,
    name: Name,
}

impl ClassType {
    pub fn new(package: impl Into<Name>, name: impl Into<Name>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Parse a dotted (`java.lang.String`) or internal (`java/lang/String`) name.
    pub fn parse(qualified: &str) -> Self {
        let qualified = qualified.replace('/', ".");
        match qualified.rsplit_once('.') {
            Some((package, name)) => Self::new(package, name),
            None => Self::new("", qualified),
        }
    }

    /// `java.lang.Object`, the root of every class hierarchy.
    pub fn object() -> Self {
        Self::new("java.lang", "Object")
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_name(&self) -> &str {
        &self.name
    }

    pub fn fully_qualified_name(&self) -> String {
        self.to_string()
    }

    pub fn is_object(&self) -> bool {
        self.package == "java.lang" && self.name == "Object"
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(Box<Type>),
    Void,
    /// The type of the `null` constant.
    Null,
    Unknown,
}

impl Type {
    pub fn class(qualified: &str) -> Self {
        Type::Class(ClassType::parse(qualified))
    }

    pub fn array_of(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Class(_) | Type::Array(_) | Type::Null)
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            Type::Class(ty) => Some(ty),
            _ => None,
        }
    }

    /// Element type after stripping one array dimension.
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array(elem) => Some(elem),
            _ => None,
        }
    }
}

impl From<PrimitiveType> for Type {
    fn from(value: PrimitiveType) -> Self {
        Type::Primitive(value)
    }
}

impl From<ClassType> for Type {
    fn from(value: ClassType) -> Self {
        Type::Class(value)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => p.fmt(f),
            Type::Class(c) => c.fmt(f),
            Type::Array(elem) => write!(f, "{elem}[]"),
            Type::Void => f.write_str("void"),
            Type::Null => f.write_str("null_type"),
            Type::Unknown => f.write_str("unknown"),
        }
    }
}
