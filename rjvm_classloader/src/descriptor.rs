//! The descriptor decoder: parses JVM field and method descriptors into the
//! `FieldType` AST defined in `rjvm_classfile`.

use std::iter::Peekable;
use std::str::Chars;

use rjvm_classfile::{BaseType, FieldType};

use crate::{Error, Result};

/// Consume one descriptor token from the front of `chars`: a base type, an
/// object type `L<name>;`, or an array of either. Never silently
/// truncates: an incomplete token is a `BadDescriptor` error.
pub fn parse_field_type(chars: &mut Peekable<Chars<'_>>) -> Result<FieldType> {
    let ch = chars
        .next()
        .ok_or_else(|| Error::BadDescriptor("unexpected end of descriptor".to_string()))?;

    match ch {
        '[' => {
            let inner = parse_field_type(chars)?;
            Ok(FieldType::Array(Box::new(inner)))
        }
        'L' => {
            let mut name = String::new();
            loop {
                match chars.next() {
                    Some(';') => break,
                    Some(c) => name.push(c),
                    None => {
                        return Err(Error::BadDescriptor(
                            "unterminated object type descriptor".to_string(),
                        ))
                    }
                }
            }
            Ok(FieldType::Object(name))
        }
        other => BaseType::parse(other)
            .map(FieldType::Base)
            .map_err(|error| Error::BadDescriptor(error.to_string())),
    }
}

/// Parse a complete field descriptor: exactly one type token, and nothing
/// left over.
pub fn parse_field_descriptor(descriptor: &str) -> Result<FieldType> {
    let mut chars = descriptor.chars().peekable();
    let field_type = parse_field_type(&mut chars)?;
    if chars.next().is_some() {
        return Err(Error::BadDescriptor(format!(
            "trailing characters in field descriptor {descriptor}"
        )));
    }
    Ok(field_type)
}

/// Parse a method descriptor `"(P1P2…Pn)R"` into its parameter types and
/// return type (`None` for `V`, void).
pub fn parse_method_descriptor(descriptor: &str) -> Result<(Vec<FieldType>, Option<FieldType>)> {
    let mut chars = descriptor.chars().peekable();
    if chars.next() != Some('(') {
        return Err(Error::BadDescriptor(format!(
            "method descriptor must start with '(': {descriptor}"
        )));
    }

    let mut param_types = Vec::new();
    loop {
        match chars.peek() {
            Some(')') => {
                chars.next();
                break;
            }
            Some(_) => param_types.push(parse_field_type(&mut chars)?),
            None => {
                return Err(Error::BadDescriptor(format!(
                    "unterminated parameter list in {descriptor}"
                )))
            }
        }
    }

    let return_type = match chars.next() {
        Some('V') => {
            if chars.next().is_some() {
                return Err(Error::BadDescriptor(format!(
                    "trailing characters after void return in {descriptor}"
                )));
            }
            None
        }
        Some(first) => {
            let mut rest = String::new();
            rest.push(first);
            rest.extend(chars);
            Some(parse_field_descriptor(&rest)?)
        }
        None => {
            return Err(Error::BadDescriptor(format!(
                "missing return type in {descriptor}"
            )))
        }
    };

    Ok((param_types, return_type))
}

/// Re-encode a parameter list and return type into a method descriptor,
/// the inverse of `parse_method_descriptor`.
#[must_use]
pub fn encode_method_descriptor(param_types: &[FieldType], return_type: Option<&FieldType>) -> String {
    let mut descriptor = String::from("(");
    for param_type in param_types {
        descriptor.push_str(&param_type.to_descriptor());
    }
    descriptor.push(')');
    match return_type {
        Some(return_type) => descriptor.push_str(&return_type.to_descriptor()),
        None => descriptor.push('V'),
    }
    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_descriptor_with_mixed_param_types() -> Result<()> {
        let (param_types, return_type) =
            parse_method_descriptor("(IJLjava/lang/String;[D)V")?;
        assert_eq!(
            param_types,
            vec![
                FieldType::Base(BaseType::Int),
                FieldType::Base(BaseType::Long),
                FieldType::Object("java/lang/String".to_string()),
                FieldType::Array(Box::new(FieldType::Base(BaseType::Double))),
            ]
        );
        assert_eq!(return_type, None);
        Ok(())
    }

    #[test]
    fn test_parse_method_descriptor_object_return() -> Result<()> {
        let (param_types, return_type) =
            parse_method_descriptor("([Ljava/lang/Object;)Ljava/lang/Object;")?;
        assert_eq!(
            param_types,
            vec![FieldType::Array(Box::new(FieldType::Object(
                "java/lang/Object".to_string()
            )))]
        );
        assert_eq!(
            return_type,
            Some(FieldType::Object("java/lang/Object".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_parse_field_descriptor_array_of_arrays() -> Result<()> {
        let field_type = parse_field_descriptor("[[I")?;
        assert_eq!(field_type.array_depth(), 2);
        Ok(())
    }

    #[test]
    fn test_parse_invalid_descriptor_missing_semicolon() {
        assert!(parse_field_descriptor("Ljava/lang/String").is_err());
    }

    #[test]
    fn test_parse_invalid_descriptor_unknown_leading_char() {
        assert!(parse_field_descriptor("Q").is_err());
    }

    #[test]
    fn test_parse_method_descriptor_missing_open_paren() {
        assert!(parse_method_descriptor("I)V").is_err());
    }

    #[test]
    fn test_field_descriptor_round_trip() -> Result<()> {
        for descriptor in ["I", "[D", "Ljava/lang/String;", "[[Ljava/lang/Object;"] {
            let field_type = parse_field_descriptor(descriptor)?;
            assert_eq!(field_type.to_descriptor(), descriptor);
        }
        Ok(())
    }

    #[test]
    fn test_method_descriptor_round_trip() -> Result<()> {
        for descriptor in [
            "()V",
            "(IJLjava/lang/String;[D)V",
            "([Ljava/lang/Object;)Ljava/lang/Object;",
        ] {
            let (param_types, return_type) = parse_method_descriptor(descriptor)?;
            assert_eq!(
                encode_method_descriptor(&param_types, return_type.as_ref()),
                descriptor
            );
        }
        Ok(())
    }
}
