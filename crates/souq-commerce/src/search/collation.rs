//! Arabic-aware name ordering.
//!
//! Names are compared on a folded key: harakat and tatweel are dropped,
//! alef forms collapse to bare alef, alef maqsura to ya, ta marbuta to ha,
//! Arabic-Indic digits to ASCII digits, and Latin text is lowercased. Each
//! folded character is weighed by script first, so spaces and punctuation
//! come before digits, digits before Arabic letters and Arabic before Latin.
//! Equal keys are ordered lowercase first, then by raw text so the ordering
//! stays total.

use std::cmp::Ordering;

/// Compare two names for display ordering.
pub fn compare(a: &str, b: &str) -> Ordering {
    weights(a)
        .cmp(weights(b))
        .then_with(|| case_marks(a).cmp(case_marks(b)))
        .then_with(|| a.cmp(b))
}

/// Folded collation key.
pub fn sort_key(text: &str) -> String {
    fold(text).collect()
}

fn weights(text: &str) -> impl Iterator<Item = (Script, char)> + '_ {
    fold(text).map(|c| (Script::of(c), c))
}

/// Uppercase sorts after lowercase on otherwise equal names.
fn case_marks(text: &str) -> impl Iterator<Item = bool> + '_ {
    text.chars()
        .filter(|c| !is_ignorable(*c))
        .map(char::is_uppercase)
}

fn fold(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(|c| !is_ignorable(*c))
        .flat_map(char::to_lowercase)
        .map(fold_letter)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Script {
    Separator,
    Digit,
    Arabic,
    Latin,
    Other,
}

impl Script {
    fn of(c: char) -> Self {
        match c {
            c if c.is_whitespace() || c.is_ascii_punctuation() => Script::Separator,
            '0'..='9' => Script::Digit,
            '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}' => Script::Arabic,
            c if c.is_alphabetic() && (c.is_ascii() || ('\u{00C0}'..='\u{024F}').contains(&c)) => {
                Script::Latin
            }
            _ => Script::Other,
        }
    }
}

fn is_ignorable(c: char) -> bool {
    matches!(c,
        '\u{0610}'..='\u{061A}'
        | '\u{064B}'..='\u{065F}'
        | '\u{0670}'
        | '\u{06D6}'..='\u{06ED}'
        | '\u{0640}'
    )
}

fn fold_letter(c: char) -> char {
    match c {
        'آ' | 'أ' | 'إ' | 'ٱ' => 'ا',
        'ى' => 'ي',
        'ة' => 'ه',
        'ؤ' => 'و',
        'ئ' => 'ي',
        '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
        '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted<'a>(mut names: Vec<&'a str>) -> Vec<&'a str> {
        names.sort_by(|a, b| compare(a, b));
        names
    }

    #[test]
    fn test_diacritics_and_tatweel_are_ignored() {
        assert_eq!(sort_key("عَسَل"), sort_key("عسل"));
        assert_eq!(sort_key("عســل"), "عسل");
    }

    #[test]
    fn test_letter_variants_fold() {
        assert_eq!(sort_key("أحمد"), sort_key("احمد"));
        assert_eq!(sort_key("إبريق"), sort_key("ابريق"));
        assert_eq!(sort_key("قهوة"), "قهوه");
        assert_eq!(sort_key("مصطفى"), "مصطفي");
        assert_eq!(sort_key("٢كغ"), "2كغ");
    }

    #[test]
    fn test_alphabetical_order() {
        assert_eq!(
            sorted(vec!["زيت", "تمر", "أرز", "بن"]),
            vec!["أرز", "بن", "تمر", "زيت"]
        );
    }

    #[test]
    fn test_arabic_before_latin() {
        assert_eq!(sorted(vec!["Honey", "عسل", "زيت"]), vec!["زيت", "عسل", "Honey"]);
        assert_eq!(
            sorted(vec!["Honey", "apple", "عسل", "1kg", "Apple", "زيت"]),
            vec!["1kg", "زيت", "عسل", "apple", "Apple", "Honey"]
        );
    }

    #[test]
    fn test_digits_lead_within_a_name() {
        assert_eq!(compare("Tea 2", "Tea b"), Ordering::Less);
        assert_eq!(compare("زيت ٥", "زيت ب"), Ordering::Less);
    }

    #[test]
    fn test_latin_is_case_insensitive() {
        assert_eq!(compare("apple", "Banana"), Ordering::Less);
        assert_eq!(compare("tea", "Tea"), Ordering::Less);
        assert_eq!(compare("Tea", "tea"), Ordering::Greater);
        assert_eq!(compare("tea", "tea"), Ordering::Equal);
    }
}
