//! Common regex patterns for statement narrative extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // VD (court order / writ) patterns, in rule order
    pub static ref VD_SERIES: Regex = Regex::new(
        r"(?i)\b(?P<prefix>ВС|ФС)\s*[№#:\-]?\s*(?P<num>\d{9})"
    ).unwrap();

    pub static ref VD_WRIT_REFERENCE: Regex = Regex::new(
        r"(?i)\bпо\s+и/д\s*№?\s*(?P<num>\d[\d/\-]*)(?P<suffix>ип)?"
    ).unwrap();

    pub static ref VD_GENERIC: Regex = Regex::new(
        r"(?i)(?:судов\p{L}*\s+наказ\p{L}*|судебн\p{L}*\s+приказ\p{L}*|виконавч\p{L}*\s+(?:лист\p{L}*|документ\p{L}*|напис\p{L}*)|исполнительн\p{L}*\s+(?:лист\p{L}*|документ\p{L}*|надпис\p{L}*)|\bВ\.\s?Д\.|\bВД\b)\s*[№#:]?\s*(?P<num>\d+(?:[-/]\d+){0,3})"
    ).unwrap();

    // Enforcement-proceeding markers that disqualify a generic VD match
    pub static ref PROCEEDING_MARKER: Regex = Regex::new(
        r"(?i)\b(?:іп|ип|исп|вп)\b"
    ).unwrap();

    // A marker directly introducing its own number
    pub static ref OWN_NUMBER_LEAD: Regex = Regex::new(
        r"^\s*[№#:]?\s*\d"
    ).unwrap();

    // VP (enforcement proceeding) patterns
    pub static ref VP_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:ВП|ІП|ИП)\s*[№#:]?\s*(?P<num>\d{2,5}(?:[-/]\d{1,4}){1,5}|\d{6,20})"
    ).unwrap();

    pub static ref VP_COMPOUND: Regex = Regex::new(
        r"\b(?P<num>\d{1,2}-\d{2}-\d{3,6}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref VP_LEGACY_KEYWORD: Regex = Regex::new(
        r"(?i)\bВП\s*№?\s*(?P<num>\d{8})"
    ).unwrap();

    pub static ref VP_LEGACY_SEMICOLON: Regex = Regex::new(
        r";\s*(?P<num>6\d{7})\s*;"
    ).unwrap();

    // Any run of ASCII digits (IPN candidates are the runs of length 10)
    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"[0-9]+"
    ).unwrap();

    // Case identifier after an "identification" word
    pub static ref CASE_ID: Regex = Regex::new(
        r"(?i)\p{L}*(?:[іiи]ден|iden)\p{L}*\.?[\s:;#№\-]*(?P<num>[12]\d{5})"
    ).unwrap();

    // Debtor name after an explicit label; all-caps tokens are matched so
    // company markers can be seen
    pub static ref NAME_LABELLED: Regex = Regex::new(
        r"(?i:\b(?:ПІБ|Боржник|Платник|Стягувач|Отримувач)\p{L}*)\s*[:\-–—]\s*(?P<name>[А-ЯЁІЇЄҐ][А-ЯЁІЇЄҐа-яёіїєґ'’ʼ\-]+\d*(?:\s+[А-ЯЁІЇЄҐ][А-ЯЁІЇЄҐа-яёіїєґ'’ʼ\-]+\d*){1,2})\b"
    ).unwrap();

    // Capitalized 2-3 word sequence anchored at the slice start
    pub static ref NAME_SEQUENCE_AT: Regex = Regex::new(
        r"^[А-ЯЁІЇЄҐ][А-ЯЁІЇЄҐа-яёіїєґ'’ʼ\-]+\d*(?:\s+[А-ЯЁІЇЄҐ][А-ЯЁІЇЄҐа-яёіїєґ'’ʼ\-]+\d*){1,2}\b"
    ).unwrap();

    pub static ref NAME_TOKEN_START: Regex = Regex::new(
        r"\b[А-ЯЁІЇЄҐ]"
    ).unwrap();

    pub static ref WORD: Regex = Regex::new(
        r"\S+"
    ).unwrap();

    // Date patterns, anchored; anything after whitespace or 'T' is a time part
    pub static ref DATE_DMY: Regex = Regex::new(
        r"^(\d{1,2})[./\-](\d{1,2})[./\-](\d{4}|\d{2})(?:[\sT].*)?$"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"^(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})(?:[\sT].*)?$"
    ).unwrap();
}

/// Tokens that mark a company or bank rather than a person.
pub const COMPANY_MARKERS: &[&str] = &[
    "ТОВ", "АТ", "ПАТ", "ПРАТ", "ПАО", "ДП", "КП", "ПП", "ФОП", "ООО", "ОАО", "ЗАО", "АО",
    "ЧП", "БАНК", "ПРИВАТБАНК", "ОЩАДБАНК", "МОНОБАНК", "УКРСИББАНК", "УКРГАЗБАНК",
    "РАЙФФАЙЗЕН", "ПУМБ", "УНІВЕРСАЛ", "КРЕДОБАНК", "ОТП",
];
