/// Identifier characters. Identifiers may start with a digit.
pub fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

pub fn is_keyword(s: &str) -> bool {
    matches!(s, "object" | "thread" | "sleep" | "sleepr" | "dump")
}
