//! Small English helpers shared by every narration and query.

/// Indefinite article for `word`: "an" before a lowercase vowel, else "a".
pub fn indefinite_article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// `word` preceded by its indefinite article.
pub fn with_article(word: &str) -> String {
    format!("{} {word}", indefinite_article(word))
}

/// Join phrases as an English list: "x", "x and y", "x, y, and z".
pub fn join_with_and(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// English list of names, each with its indefinite article.
pub fn list_with_articles<S: AsRef<str>>(names: &[S]) -> String {
    let parts: Vec<String> = names.iter().map(|n| with_article(n.as_ref())).collect();
    join_with_and(&parts)
}

/// Ordinal word for a level number: 1st, 2nd, 3rd, 4th, 11th, 22nd.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// `text` with its first character upper-cased.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Planning-format symbol for a display name: lowercase alphanumerics with
/// every other run of characters collapsed to a single dash.
pub fn symbolize(name: &str) -> String {
    let mut symbol = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !symbol.is_empty() {
                symbol.push('-');
            }
            pending_dash = false;
            symbol.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    symbol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn articles() {
        assert_eq!(with_article("overhead light"), "an overhead light");
        assert_eq!(with_article("table"), "a table");
        assert_eq!(with_article("TV"), "a TV");
    }

    #[test]
    fn english_lists() {
        let one = vec![String::from("x")];
        let two = vec![String::from("x"), String::from("y")];
        let three = vec![String::from("x"), String::from("y"), String::from("z")];
        assert_eq!(join_with_and(&[]), "");
        assert_eq!(join_with_and(&one), "x");
        assert_eq!(join_with_and(&two), "x and y");
        assert_eq!(join_with_and(&three), "x, y, and z");
        assert_eq!(list_with_articles(&["apple", "red pen"]), "an apple and a red pen");
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
    }

    #[test]
    fn capitalization() {
        assert_eq!(capitalize_first("the kitchen"), "The kitchen");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn symbols() {
        assert_eq!(symbolize("The Old Man and the Sea"), "the-old-man-and-the-sea");
        assert_eq!(symbolize("overhead light"), "overhead-light");
        assert_eq!(symbolize("  Catch-22!"), "catch-22");
        assert_eq!(symbolize("TV"), "tv");
    }
}
