//! JVM access flags for classes and methods.

use std::fmt;

bitflags::bitflags! {
    /// Class access flags (`ACC_*` from the class file format).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassModifiers: u16 {
        const PUBLIC = 0x0001;
        const FINAL = 0x0010;
        /// Set by every modern compiler; never rendered.
        const SUPER = 0x0020;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
    }
}

bitflags::bitflags! {
    /// Method access flags (`ACC_*` from the class file format).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodModifiers: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
    }
}

/// Source keyword for a flag name, `None` for flags with no keyword.
fn keyword(flag: &str) -> Option<&'static str> {
    Some(match flag {
        "PUBLIC" => "public",
        "PRIVATE" => "private",
        "PROTECTED" => "protected",
        "STATIC" => "static",
        "FINAL" => "final",
        "SYNCHRONIZED" => "synchronized",
        "BRIDGE" => "bridge",
        "VARARGS" => "varargs",
        "NATIVE" => "native",
        "INTERFACE" => "interface",
        "ABSTRACT" => "abstract",
        "STRICT" => "strictfp",
        "SYNTHETIC" => "synthetic",
        "ANNOTATION" => "annotation",
        "ENUM" => "enum",
        _ => return None,
    })
}

fn write_keywords<'a>(
    f: &mut fmt::Formatter<'_>,
    names: impl Iterator<Item = &'a str>,
) -> fmt::Result {
    for (i, word) in names.filter_map(keyword).enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        f.write_str(word)?;
    }
    Ok(())
}

impl fmt::Display for ClassModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_keywords(f, self.iter_names().map(|(name, _)| name))
    }
}

impl fmt::Display for MethodModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_keywords(f, self.iter_names().map(|(name, _)| name))
    }
}
