use wskc::scanner::Scanner;
use wskc::token::{Literal, TokenKind};

fn case(code: &str, expects: Vec<TokenKind>) {
    let tokens = Scanner::new(code).scan().expect("scan failed");

    println!(" {code}");
    for (idx, token) in tokens.iter().enumerate() {
        println!("{:>2}: {:?}", idx, token.kind);
    }

    assert_eq!(tokens.len(), expects.len());
    for (idx, expect) in expects.iter().enumerate() {
        assert_eq!(tokens[idx].kind, *expect);
    }
}

#[test]
fn entity_tokens() {
    use TokenKind::*;
    case(
        "entity Rat { float hsp; on_create { self.hsp = 1; } }",
        vec![
            KwEntity, Ident, LBrace, KwFloat, Ident, Semicolon, KwOnCreate, LBrace, KwSelf, Dot,
            Ident, Equal, Number, Semicolon, RBrace, RBrace, Eof,
        ],
    );
}

#[test]
fn game_tokens() {
    use TokenKind::*;
    case(
        "game { spawn Rat(5, 5); }",
        vec![
            KwGame, LBrace, KwSpawn, Ident, LParen, Number, Comma, Number, RParen, Semicolon,
            RBrace, Eof,
        ],
    );
}

#[test]
fn operator_tokens() {
    use TokenKind::*;
    case(
        "+ - * / ! != = == > >= < <= and or",
        vec![
            Plus, Minus, Star, Slash, Bang, BangEqual, Equal, EqualEqual, Greater, GreaterEqual,
            Less, LessEqual, KwAnd, KwOr, Eof,
        ],
    );
}

#[test]
fn component_keywords() {
    use TokenKind::*;
    case(
        "transform renderable collision uint32 on_collision",
        vec![KwTransform, KwRenderable, KwCollision, KwUint32, KwOnCollision, Eof],
    );
}

#[test]
fn number_literals_decode() {
    let tokens = Scanner::new("4.25 10").scan().expect("scan failed");
    assert_eq!(tokens[0].literal, Literal::Number(4.25));
    assert_eq!(tokens[0].lexeme, "4.25");
    assert_eq!(tokens[1].literal, Literal::Number(10.0));
}

#[test]
fn trailing_dot_is_not_a_fraction() {
    use TokenKind::*;
    // `1.x` scans as number, dot, identifier
    case("1.x", vec![Number, Dot, Ident, Eof]);
}

#[test]
fn string_literal_drops_quotes() {
    let tokens = Scanner::new("\"hello\"").scan().expect("scan failed");
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].lexeme, "\"hello\"");
    assert_eq!(tokens[0].literal, Literal::Text("hello".to_string()));
}

#[test]
fn comments_are_skipped_and_lines_counted() {
    let tokens = Scanner::new("var x = 1; // trailing comment\nvar y = 2;")
        .scan()
        .expect("scan failed");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    use TokenKind::*;
    assert_eq!(
        kinds,
        vec![KwVar, Ident, Equal, Number, Semicolon, KwVar, Ident, Equal, Number, Semicolon, Eof]
    );
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[5].line, 2);
}

#[test]
fn underscored_identifiers() {
    let tokens = Scanner::new("my_var _x on_created").scan().expect("scan failed");
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    // longer identifier does not collapse into the keyword
    assert_eq!(tokens[2].kind, TokenKind::Ident);
    assert_eq!(tokens[2].lexeme, "on_created");
}

#[test]
fn unexpected_character_is_an_error() {
    assert!(Scanner::new("var x = #;").scan().is_err());
}

#[test]
fn unterminated_string_is_an_error() {
    assert!(Scanner::new("\"oops").scan().is_err());
}
