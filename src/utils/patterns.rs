use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Free-text fields: letters, digits, and basic punctuation only.
    /// Keeping angle brackets and ampersands out of the class means
    /// validated text can be substituted into email HTML verbatim.
    pub static ref TEXT: Regex = Regex::new(r"^[a-zA-Z0-9 .,\n!]+$").unwrap();
    pub static ref POSITIVE_INTEGER: Regex = Regex::new(r"^[0-9]+$").unwrap();
    pub static ref DECIMAL: Regex = Regex::new(r"^-?[0-9]+\.[0-9]+$").unwrap();
    pub static ref EMAIL: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    pub static ref PERSON_NAME: Regex =
        Regex::new(r"^[a-zA-Z]+(([',. -][a-zA-Z ])?[a-zA-Z]*)*$").unwrap();
    pub static ref COLLEGE_ID: Regex = Regex::new(r"^[0-9]{1,10}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_accepts_plain_sentences() {
        assert!(TEXT.is_match("We ordered too much pizza! Drop by to pick it up"));
        assert!(TEXT.is_match("Line one\nline two"));
    }

    #[test]
    fn text_rejects_markup_characters() {
        assert!(!TEXT.is_match("<script>alert(1)</script>"));
        assert!(!TEXT.is_match("free food & drinks"));
        assert!(!TEXT.is_match(""));
    }

    #[test]
    fn positive_integer_rejects_signs_and_words() {
        assert!(POSITIVE_INTEGER.is_match("42"));
        assert!(!POSITIVE_INTEGER.is_match("-3"));
        assert!(!POSITIVE_INTEGER.is_match("tuesday"));
        assert!(!POSITIVE_INTEGER.is_match("4.5"));
    }

    #[test]
    fn decimal_requires_a_fractional_part() {
        assert!(DECIMAL.is_match("37.3476132"));
        assert!(DECIMAL.is_match("-121.9394005"));
        assert!(!DECIMAL.is_match("37"));
        assert!(!DECIMAL.is_match("37."));
    }

    #[test]
    fn email_matches_common_addresses() {
        assert!(EMAIL.is_match("student@scu.edu"));
        assert!(EMAIL.is_match("first.last+tag@example.co"));
        assert!(!EMAIL.is_match("not-an-email"));
        assert!(!EMAIL.is_match("missing@tld"));
    }

    #[test]
    fn person_name_allows_separators() {
        assert!(PERSON_NAME.is_match("Ada Lovelace"));
        assert!(PERSON_NAME.is_match("O'Brien"));
        assert!(!PERSON_NAME.is_match("1337"));
    }

    #[test]
    fn college_id_is_a_short_number() {
        assert!(COLLEGE_ID.is_match("122931"));
        assert!(!COLLEGE_ID.is_match("scu"));
        assert!(!COLLEGE_ID.is_match("12345678901"));
    }
}
