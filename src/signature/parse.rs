use super::{ScalarCode, TypeNode};
use crate::error::{Error, Result};

/// The maximum number of nested containers in a signature
pub const MAX_DEPTH: usize = 128;

struct Parser<'a> {
    signature: &'a str,
    rest: &'a [u8],
}

impl<'a> Parser<'a> {
    fn offset(&self) -> usize {
        self.signature.len() - self.rest.len()
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::malformed(self.signature, self.offset(), reason)
    }

    fn peek(&self) -> Option<u8> {
        self.rest.first().copied()
    }

    fn advance(&mut self) {
        self.rest = &self.rest[1..];
    }

    fn parse_type(&mut self, depth_limit: usize) -> Result<TypeNode> {
        let char = self
            .peek()
            .ok_or_else(|| self.error("expected a type, found end of signature"))?;

        if let Some(code) = ScalarCode::from_tag(char) {
            self.advance();
            return Ok(TypeNode::Scalar(code));
        }

        if depth_limit == 0 {
            return Err(self.error(format!(
                "containers nested deeper than {} levels",
                MAX_DEPTH
            )));
        }

        match char {
            TypeNode::CLASS_ARRAY => {
                self.advance();
                let element = self.parse_type(depth_limit - 1)?;
                Ok(TypeNode::array(element))
            }
            TypeNode::CLASS_STRUCT => {
                self.advance();
                let mut fields = Vec::new();

                loop {
                    match self.peek() {
                        None => return Err(self.error("unterminated struct")),
                        Some(TypeNode::CLASS_STRUCT_END) => break,
                        Some(_) => fields.push(self.parse_type(depth_limit - 1)?),
                    }
                }

                if fields.is_empty() {
                    return Err(self.error("struct without fields"));
                }

                self.advance();
                Ok(TypeNode::Struct(fields))
            }
            TypeNode::CLASS_DICT_ENTRY => {
                self.advance();
                if self.peek() == Some(TypeNode::CLASS_DICT_ENTRY_END) {
                    return Err(self.error("dict entry without key type"));
                }

                let key = self.parse_type(depth_limit - 1)?;
                if self.peek() == Some(TypeNode::CLASS_DICT_ENTRY_END) {
                    return Err(self.error("dict entry without value type"));
                }

                let value = self.parse_type(depth_limit - 1)?;
                match self.peek() {
                    Some(TypeNode::CLASS_DICT_ENTRY_END) => {
                        self.advance();
                        Ok(TypeNode::dict_entry(key, value))
                    }
                    Some(_) => Err(self.error("dict entry with more than two types")),
                    None => Err(self.error("unterminated dict entry")),
                }
            }
            TypeNode::CLASS_STRUCT_END | TypeNode::CLASS_DICT_ENTRY_END => {
                Err(self.error(format!("unbalanced '{}'", char as char)))
            }
            _ => Err(self.error(format!("unknown type character '{}'", char as char))),
        }
    }
}

/// Parse a signature string into a type tree.
///
/// The signature must describe exactly one complete type.
pub fn parse(signature: &str) -> Result<TypeNode> {
    let mut parser = Parser {
        signature,
        rest: signature.as_bytes(),
    };

    if parser.rest.is_empty() {
        return Err(parser.error("empty signature"));
    }

    let node = parser.parse_type(MAX_DEPTH)?;

    if !parser.rest.is_empty() {
        return Err(parser.error("trailing characters after complete type"));
    }

    tracing::trace!(signature, depth = node.depth(), "parsed signature");
    Ok(node)
}

/// Return whether `signature` is a valid signature string
pub fn is_valid(signature: &str) -> bool {
    parse(signature).is_ok()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use matches::assert_matches;

    #[test]
    fn signature_is_valid() {
        // basic types
        for tag in ["b", "y", "n", "q", "i", "u", "x", "t", "d", "s"] {
            assert!(is_valid(tag), "{}", tag);
        }

        assert!(!is_valid(""));
        assert!(!is_valid("z"));
        assert!(!is_valid("c"));
        assert!(!is_valid("v"));
        for excluded in ["o", "g", "h", "*", "a{sv}", "ao", "(ig)", "a*"] {
            assert!(!is_valid(excluded), "{}", excluded);
        }
        assert!(!is_valid("by"));
        assert!(!is_valid("dsa"));

        // array
        assert!(is_valid("ay"));
        assert!(is_valid("au"));
        assert!(is_valid("aai"));
        assert!(is_valid("aaas"));

        assert!(!is_valid("abc"));
        assert!(!is_valid("aqq"));
        assert!(!is_valid("a"));
        assert!(!is_valid("aa"));

        // struct
        assert!(is_valid("(uus)"));
        assert!(is_valid("(isby)"));

        assert!(!is_valid("()"));
        assert!(!is_valid("(uus"));
        assert!(!is_valid("(uus))"));
        assert!(!is_valid("((uus)"));
        assert!(!is_valid(")"));

        // dict entry
        assert!(is_valid("{uu}"));
        assert!(is_valid("{sd}"));
        assert!(is_valid("a{us}"));
        assert!(is_valid("a{u(us)}"));
        assert!(is_valid("{aai(yxd)}"));
        assert!(is_valid("{(ii)s}"));

        assert!(!is_valid("a{u}"));
        assert!(!is_valid("a{}"));
        assert!(!is_valid("a{"));
        assert!(!is_valid("a}"));
        assert!(!is_valid("a{uuu}"));
        assert!(!is_valid("{su"));

        // complex
        assert!(is_valid("(u(u(yu)))"));
        assert!(is_valid("(aaay(uay))"));
        assert!(is_valid("(u(yxd)sd(yxd)iq(yxd)b)"));
        assert!(is_valid("(a{u(usa{us})}su)"));

        assert!(!is_valid("(uusa(uu)()"));
        assert!(!is_valid("(a{u(usa{us})su)"));
        assert!(!is_valid("(u(u(yu)))u"));
    }

    #[test]
    fn parse_tree() {
        let node = parse("(isby)").unwrap();
        assert_eq!(
            node,
            TypeNode::Struct(vec![
                TypeNode::Scalar(ScalarCode::Int32),
                TypeNode::Scalar(ScalarCode::String),
                TypeNode::Scalar(ScalarCode::Boolean),
                TypeNode::Scalar(ScalarCode::Byte),
            ])
        );

        let node = parse("aai").unwrap();
        assert_eq!(
            node,
            TypeNode::array(TypeNode::array(TypeNode::Scalar(ScalarCode::Int32)))
        );
    }

    #[test]
    fn round_trip_string() {
        for signature in [
            "b",
            "as",
            "aai",
            "(isby)",
            "{sd}",
            "a{s(ii)}",
            "(u(yxd)sd(yxd)iq(yxd)b)",
            "{aai(yxd)}",
        ] {
            assert_eq!(parse(signature).unwrap().to_string(), signature);
        }
    }

    #[test]
    fn error_offsets() {
        let err = parse("(ii").unwrap_err();
        assert_matches!(err, Error::MalformedSignature { offset: 3, .. });
        assert!(err.to_string().contains("unterminated struct"));

        let err = parse("(iz)").unwrap_err();
        assert_matches!(err, Error::MalformedSignature { offset: 2, .. });
        assert!(err.to_string().contains("'z'"));

        let err = parse("{iii}").unwrap_err();
        assert_matches!(err, Error::MalformedSignature { offset: 3, .. });

        let err = parse("ii").unwrap_err();
        assert_matches!(err, Error::MalformedSignature { offset: 1, .. });

        let err = parse("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedSignature);
    }

    #[test]
    fn depth_limit() {
        let ok = format!("{}i", "a".repeat(MAX_DEPTH));
        assert_eq!(parse(&ok).unwrap().dimensions(), MAX_DEPTH);

        let too_deep = format!("{}i", "a".repeat(MAX_DEPTH + 1));
        assert_eq!(
            parse(&too_deep).unwrap_err().kind(),
            ErrorKind::MalformedSignature
        );

        let nested_structs = format!("{}i{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(!is_valid(&nested_structs));
    }
}
