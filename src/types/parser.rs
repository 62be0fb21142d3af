//! Nom-based parser for type expressions
//!
//! Parses the canonical `Display` grammar of [`AttributeType`]:
//!
//! ```text
//! type       := primitive | collection | object
//! primitive  := "bool" | "string" | "number" | "int64" | "float64"
//! collection := ("list" | "set" | "map") "(" type ")"
//! object     := "object" "(" "{" [ attr ("," attr)* [","] ] "}" ")"
//! attr       := identifier "=" type
//! ```
//!
//! Whitespace is permitted between tokens. Trailing input and duplicate
//! object attribute names are errors.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{map, map_res, opt, recognize, value},
    error::{convert_error, VerboseError},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
    Finish, IResult,
};

use std::collections::BTreeMap;

use crate::error::TypeParseError;
use crate::types::AttributeType;

/// Parser error type with context information
pub type NomTypeError<'a> = VerboseError<&'a str>;
pub type ParseResult<'a, T> = IResult<&'a str, T, NomTypeError<'a>>;

/// Parse a complete type expression
pub fn parse_type(input: &str) -> Result<AttributeType, TypeParseError> {
    let result = delimited(multispace0, type_expr, multispace0)(input).finish();

    match result {
        Ok((remaining, ty)) => {
            if !remaining.is_empty() {
                return Err(TypeParseError::TrailingInput {
                    rest: remaining.to_string(),
                });
            }
            Ok(ty)
        }
        Err(error) => Err(TypeParseError::Syntax {
            message: convert_error(input, error),
        }),
    }
}

/// Parse a type: primitive | collection | object
fn type_expr(input: &str) -> ParseResult<'_, AttributeType> {
    alt((object_type, collection_type, primitive_type))(input)
}

/// Parse a primitive type keyword
fn primitive_type(input: &str) -> ParseResult<'_, AttributeType> {
    // int64/float64 before the bare keywords so "int64" does not stop at
    // a shorter prefix match
    alt((
        value(AttributeType::Int64, tag("int64")),
        value(AttributeType::Float64, tag("float64")),
        value(AttributeType::Bool, tag("bool")),
        value(AttributeType::String, tag("string")),
        value(AttributeType::Number, tag("number")),
    ))(input)
}

/// Parse a collection type: list(T), set(T), map(T)
fn collection_type(input: &str) -> ParseResult<'_, AttributeType> {
    let (input, constructor) = alt((tag("list"), tag("set"), tag("map")))(input)?;
    let (input, element) = delimited(
        preceded(multispace0, char('(')),
        delimited(multispace0, type_expr, multispace0),
        char(')'),
    )(input)?;

    let ty = match constructor {
        "list" => AttributeType::List(Box::new(element)),
        "set" => AttributeType::Set(Box::new(element)),
        _ => AttributeType::Map(Box::new(element)),
    };
    Ok((input, ty))
}

/// Parse an object type: object({name = type, ...})
fn object_type(input: &str) -> ParseResult<'_, AttributeType> {
    let (input, _) = tag("object")(input)?;
    let (input, _) = preceded(multispace0, char('('))(input)?;
    let (input, _) = preceded(multispace0, char('{'))(input)?;

    let (input, attrs) = map_res(
        terminated(
            separated_list0(
                preceded(multispace0, char(',')),
                preceded(multispace0, attribute_pair),
            ),
            // allow a trailing comma before the closing brace
            preceded(multispace0, opt(char(','))),
        ),
        collect_attributes,
    )(input)?;

    let (input, _) = preceded(multispace0, char('}'))(input)?;
    let (input, _) = preceded(multispace0, char(')'))(input)?;

    Ok((input, AttributeType::Object(attrs)))
}

/// Parse one `identifier = type` pair
fn attribute_pair(input: &str) -> ParseResult<'_, (String, AttributeType)> {
    separated_pair(
        parse_identifier,
        delimited(multispace0, char('='), multispace0),
        type_expr,
    )(input)
}

/// Parse an identifier: [A-Za-z_][A-Za-z0-9_]*
fn parse_identifier(input: &str) -> ParseResult<'_, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
        |ident: &str| ident.to_string(),
    )(input)
}

/// Fold parsed pairs into the attribute map, rejecting duplicates
fn collect_attributes(
    pairs: Vec<(String, AttributeType)>,
) -> Result<BTreeMap<String, AttributeType>, String> {
    let mut attrs = BTreeMap::new();
    for (name, ty) in pairs {
        if attrs.insert(name.clone(), ty).is_some() {
            return Err(format!("duplicate attribute '{}'", name));
        }
    }
    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives() {
        assert_eq!(parse_type("bool").unwrap(), AttributeType::Bool);
        assert_eq!(parse_type("string").unwrap(), AttributeType::String);
        assert_eq!(parse_type("number").unwrap(), AttributeType::Number);
        assert_eq!(parse_type("int64").unwrap(), AttributeType::Int64);
        assert_eq!(parse_type("float64").unwrap(), AttributeType::Float64);
    }

    #[test]
    fn test_parse_collections() {
        assert_eq!(
            parse_type("list(string)").unwrap(),
            AttributeType::list_of(AttributeType::String)
        );
        assert_eq!(
            parse_type("set( number )").unwrap(),
            AttributeType::set_of(AttributeType::Number)
        );
        assert_eq!(
            parse_type("map(list(bool))").unwrap(),
            AttributeType::map_of(AttributeType::list_of(AttributeType::Bool))
        );
    }

    #[test]
    fn test_parse_objects() {
        let parsed = parse_type("object({name = string, port = int64})").unwrap();
        assert_eq!(
            parsed,
            AttributeType::object_of([
                ("name", AttributeType::String),
                ("port", AttributeType::Int64),
            ])
        );

        assert_eq!(
            parse_type("object({})").unwrap(),
            AttributeType::Object(BTreeMap::new())
        );

        // nested, with a trailing comma
        let nested = parse_type("object({ services = list(object({ id = string })), })").unwrap();
        assert!(matches!(nested, AttributeType::Object(_)));
    }

    #[test]
    fn test_display_parses_back() {
        let ty = AttributeType::object_of([
            ("labels", AttributeType::map_of(AttributeType::String)),
            ("weights", AttributeType::list_of(AttributeType::Float64)),
        ]);
        assert_eq!(parse_type(&ty.to_string()).unwrap(), ty);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_type("list()"),
            Err(TypeParseError::Syntax { .. })
        ));
        assert!(matches!(
            parse_type("gauge"),
            Err(TypeParseError::Syntax { .. })
        ));
        assert!(matches!(
            parse_type("bool extra"),
            Err(TypeParseError::TrailingInput { .. })
        ));
        // duplicate attribute names are rejected
        assert!(parse_type("object({a = bool, a = string})").is_err());
    }
}
