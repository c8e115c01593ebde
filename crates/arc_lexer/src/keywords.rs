use arc_syntax::TokenKind;

pub(crate) static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "object" => TokenKind::KwObject,
    "thread" => TokenKind::KwThread,
    "sleep" => TokenKind::KwSleep,
    "sleepr" => TokenKind::KwSleepr,
    "dump" => TokenKind::KwDump,
};
