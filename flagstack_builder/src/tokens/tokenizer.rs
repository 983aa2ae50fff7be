#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::constant::*;
use crate::registry::FlagRegistry;
use crate::tokens::{Token, TokenKind};

/// Turn the raw Cli input into classified tokens.
///
/// Each stage runs over the whole input before the next begins:
/// 1. Wrap each raw string as an unclassified token.
/// 2. Explode bundled short flags (`-abc` into `-a -b -c`).
/// 3. Classify each token as a key, value, or terminator, resolving short names to long names.
pub(crate) fn tokenize<S: AsRef<str>>(
    raw: impl IntoIterator<Item = S>,
    registry: &FlagRegistry,
) -> Vec<Token> {
    let stack = create_stack(raw);
    let stack = split_singles(stack, registry);
    let tokens = name_parameters(stack, registry);

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Tokenized: {tokens:?}");
    }

    tokens
}

fn create_stack<S: AsRef<str>>(raw: impl IntoIterator<Item = S>) -> Vec<Token> {
    raw.into_iter().map(|s| Token::new(s.as_ref())).collect()
}

fn split_singles(stack: Vec<Token>, registry: &FlagRegistry) -> Vec<Token> {
    let mut out = Vec::with_capacity(stack.len());

    for token in stack {
        match bundled_shorts(token.raw()) {
            // A single dash form of a declared long name is left whole.
            Some(bundle) if !registry.is_declared(bundle) => {
                out.extend(
                    bundle
                        .chars()
                        .map(|single| Token::new(format!("{SHORT_PREFIX}{single}"))),
                );
            }
            _ => out.push(token),
        }
    }

    out
}

fn name_parameters(stack: Vec<Token>, registry: &FlagRegistry) -> Vec<Token> {
    stack
        .into_iter()
        .map(|token| classify(token, registry))
        .collect()
}

fn classify(token: Token, registry: &FlagRegistry) -> Token {
    if token.kind() != TokenKind::Unclassified {
        return token;
    }

    let raw = token.into_raw();

    if raw == TERMINATOR {
        return Token::terminator();
    }

    if let Some(single) = short_name(&raw) {
        let name = match registry.resolve_short(single) {
            Some(long) => long.to_string(),
            None => single.to_string(),
        };
        return Token::key(raw, name);
    }

    match long_name(&raw) {
        Some(name) => {
            let name = name.to_string();
            Token::key(raw, name)
        }
        None => Token::value(raw),
    }
}

// `-abc`: a single dash followed by two or more letters.
fn bundled_shorts(raw: &str) -> Option<&str> {
    let body = raw.strip_prefix(SHORT_PREFIX)?;

    if body.chars().count() >= 2 && body.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(body)
    } else {
        None
    }
}

// `-a`: a single dash followed by a single alphanumeric.
fn short_name(raw: &str) -> Option<char> {
    let mut characters = raw.strip_prefix(SHORT_PREFIX)?.chars();

    match (characters.next(), characters.next()) {
        (Some(single), None) if single.is_ascii_alphanumeric() => Some(single),
        _ => None,
    }
}

// `--name`: a double dash followed by a word of alphanumerics and `-_.`.
fn long_name(raw: &str) -> Option<&str> {
    let body = raw.strip_prefix(LONG_PREFIX)?;

    if !body.is_empty()
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LONG_NAME_PUNCTUATION.contains(&c))
    {
        Some(body)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FlagDefinition;
    use crate::model::FlagType;
    use rstest::rstest;

    fn registry() -> FlagRegistry {
        FlagRegistry::new([
            FlagDefinition::new("alpha", Some('a'), FlagType::Boolean),
            FlagDefinition::new("foxtrot", Some('f'), FlagType::Untyped).with_default("dance"),
            FlagDefinition::new("xray", Some('x'), FlagType::Untyped),
            FlagDefinition::new("pack", None, FlagType::String),
        ])
    }

    fn raws(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::raw).collect()
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec!["-a"], vec!["-a"])]
    #[case(vec!["-af"], vec!["-a", "-f"])]
    #[case(vec!["-axbf", "ballroom"], vec!["-a", "-x", "-b", "-f", "ballroom"])]
    #[case(vec!["-vvv"], vec!["-v", "-v", "-v"])]
    #[case(vec!["--af"], vec!["--af"])]
    #[case(vec!["-a1"], vec!["-a1"])]
    #[case(vec!["-15"], vec!["-15"])]
    #[case(vec!["-pack"], vec!["-pack"])]
    #[case(vec!["-packs"], vec!["-p", "-a", "-c", "-k", "-s"])]
    #[case(vec!["af"], vec!["af"])]
    fn split(#[case] input: Vec<&str>, #[case] expected: Vec<&str>) {
        // Setup
        let registry = registry();

        // Execute
        let stack = split_singles(create_stack(input), &registry);

        // Verify
        assert_eq!(raws(&stack), expected);
        assert!(stack
            .iter()
            .all(|token| token.kind() == TokenKind::Unclassified));
    }

    #[rstest]
    #[case("--", TokenKind::Terminator, None)]
    #[case("-a", TokenKind::Key, Some("alpha"))]
    #[case("-x", TokenKind::Key, Some("xray"))]
    #[case("-n", TokenKind::Key, Some("n"))]
    #[case("-5", TokenKind::Key, Some("5"))]
    #[case("--alpha", TokenKind::Key, Some("alpha"))]
    #[case("--has-value", TokenKind::Key, Some("has-value"))]
    #[case("--snake_case.v2", TokenKind::Key, Some("snake_case.v2"))]
    #[case("--a", TokenKind::Key, Some("a"))]
    #[case("---", TokenKind::Key, Some("-"))]
    #[case("--key=value", TokenKind::Value, None)]
    #[case("-", TokenKind::Value, None)]
    #[case("-?", TokenKind::Value, None)]
    #[case("-15", TokenKind::Value, None)]
    #[case("-pack", TokenKind::Value, None)]
    #[case("ballroom", TokenKind::Value, None)]
    #[case("who@where.com", TokenKind::Value, None)]
    #[case("", TokenKind::Value, None)]
    fn classify_name(
        #[case] raw: &str,
        #[case] kind: TokenKind,
        #[case] expected_name: Option<&str>,
    ) {
        let tokens = tokenize([raw], &registry());

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].raw(), raw);
        assert_eq!(tokens[0].kind(), kind);
        assert_eq!(tokens[0].name(), expected_name);
        assert_eq!(tokens[0].bound(), None);
    }

    #[test]
    fn tokenize_sequence() {
        // Setup
        let input = vec!["node", ".", "-axbf", "ballroom", "--", "--pack"];

        // Execute
        let tokens = tokenize(input, &registry());

        // Verify
        assert_eq!(
            tokens,
            vec![
                Token::value("node"),
                Token::value("."),
                Token::key("-a", "alpha"),
                Token::key("-x", "xray"),
                Token::key("-b", "b"),
                Token::key("-f", "foxtrot"),
                Token::value("ballroom"),
                Token::terminator(),
                // Classification is context free; the terminator takes effect during assignment.
                Token::key("--pack", "pack"),
            ]
        );
    }

    #[test]
    fn tokenize_owned() {
        let input: Vec<String> = vec!["-v".to_string(), "3".to_string()];

        let tokens = tokenize(&input, &FlagRegistry::default());

        assert_eq!(tokens, vec![Token::key("-v", "v"), Token::value("3")]);
    }
}
