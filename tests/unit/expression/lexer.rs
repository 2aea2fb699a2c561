use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn lexes_numbers_identifiers_and_operators() {
    assert_eq!(
        kinds("x*100 >= .5e1"),
        vec![
            TokenKind::Ident("x".to_owned()),
            TokenKind::Star,
            TokenKind::Number(100.0),
            TokenKind::Ge,
            TokenKind::Number(5.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lexes_string_literals_with_either_quote() {
    assert_eq!(
        kinds(r#"'a}b' + "c""#),
        vec![
            TokenKind::Str("a}b".to_owned()),
            TokenKind::Plus,
            TokenKind::Str("c".to_owned()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn strict_equality_is_an_alias() {
    assert_eq!(
        kinds("frame === 0"),
        vec![
            TokenKind::Ident("frame".to_owned()),
            TokenKind::EqEq,
            TokenKind::Number(0.0),
            TokenKind::Eof,
        ]
    );
    assert_eq!(kinds("a !== b")[1], TokenKind::Ne);
}

#[test]
fn rejects_bad_input_with_offsets() {
    let err = lex("x + 1e").unwrap_err();
    assert_eq!(err.offset, 5);

    let err = lex("x # 2").unwrap_err();
    assert_eq!(err.offset, 2);
    assert!(err.message.contains('#'));

    let err = lex("'open").unwrap_err();
    assert!(err.message.contains("unterminated"));
}

#[test]
fn non_ascii_input_does_not_panic() {
    assert!(lex("x + é").is_err());
    assert_eq!(kinds("'é'")[0], TokenKind::Str("é".to_owned()));
}
