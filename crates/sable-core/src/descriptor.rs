use crate::{ClassType, MethodSubSignature, PrimitiveType, Type};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("invalid descriptor: {0}")]
    Invalid(String),
}

type Result<T> = std::result::Result<T, DescriptorError>;

/// Parse a JVM field descriptor (`I`, `[Ljava/lang/String;`, ...).
pub fn parse_field_descriptor(desc: &str) -> Result<Type> {
    let (ty, rest) = parse_field_type(desc)?;
    if !rest.is_empty() {
        return Err(DescriptorError::Invalid(desc.to_string()));
    }
    Ok(ty)
}

/// Parse a JVM method descriptor into `(parameter types, return type)`.
pub fn parse_method_descriptor(desc: &str) -> Result<(Vec<Type>, Type)> {
    let Some(mut rest) = desc.strip_prefix('(') else {
        return Err(DescriptorError::Invalid(desc.to_string()));
    };

    let mut params = Vec::new();
    loop {
        if let Some(after) = rest.strip_prefix(')') {
            rest = after;
            break;
        }
        if rest.is_empty() {
            return Err(DescriptorError::Invalid(desc.to_string()));
        }
        let (param, after) = parse_field_type(rest)?;
        params.push(param);
        rest = after;
    }

    if rest.is_empty() {
        return Err(DescriptorError::Invalid(desc.to_string()));
    }
    let (return_type, rest) = match rest.strip_prefix('V') {
        Some(after) => (Type::Void, after),
        None => parse_field_type(rest)?,
    };
    if !rest.is_empty() {
        return Err(DescriptorError::Invalid(desc.to_string()));
    }

    Ok((params, return_type))
}

impl MethodSubSignature {
    /// Build a sub-signature from a method name and its JVM descriptor.
    pub fn from_descriptor(name: &str, descriptor: &str) -> Result<Self> {
        let (params, return_type) = parse_method_descriptor(descriptor)?;
        Ok(MethodSubSignature::new(name, params, return_type))
    }
}

fn parse_field_type(input: &str) -> Result<(Type, &str)> {
    let Some(first) = input.chars().next() else {
        return Err(DescriptorError::Invalid(input.to_string()));
    };
    let primitive = |p: PrimitiveType| Ok((Type::Primitive(p), &input[1..]));
    match first {
        'B' => primitive(PrimitiveType::Byte),
        'C' => primitive(PrimitiveType::Char),
        'D' => primitive(PrimitiveType::Double),
        'F' => primitive(PrimitiveType::Float),
        'I' => primitive(PrimitiveType::Int),
        'J' => primitive(PrimitiveType::Long),
        'S' => primitive(PrimitiveType::Short),
        'Z' => primitive(PrimitiveType::Boolean),
        'L' => match input.find(';') {
            Some(end) if end > 1 => Ok((
                Type::Class(ClassType::parse(&input[1..end])),
                &input[end + 1..],
            )),
            _ => Err(DescriptorError::Invalid(input.to_string())),
        },
        '[' => {
            let (component, rest) = parse_field_type(&input[1..])?;
            Ok((Type::array_of(component), rest))
        }
        _ => Err(DescriptorError::Invalid(input.to_string())),
    }
}
