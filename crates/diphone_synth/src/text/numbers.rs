//! Reading numbers, days and years out as English words
//!
//! Dates follow British conventions (`DD/MM/YYYY`), and years are read in
//! two-digit groups ("nineteen ninety nine") except for millennial years
//! ("two thousand and six").

use std::sync::LazyLock;

use chrono::{Month, NaiveDate};
use regex::Regex;

use crate::error::NormalizeError;

/// Longest number that can be read out
pub const MAX_NUMBER_DIGITS: usize = 4;

/// Full date token, with the year group optional
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with a valid static pattern
    Regex::new(r"^(\d+)/(\d+)(?:/(\d+))?$").expect("Failed to compile date pattern")
});

/// Year assumed for `DD/MM` when checking the day exists (a leap year)
const YEARLESS_CHECK_YEAR: i32 = 2000;

fn digit_word(digit: u8) -> Option<&'static str> {
    match digit {
        1 => Some("one"),
        2 => Some("two"),
        3 => Some("three"),
        4 => Some("four"),
        5 => Some("five"),
        6 => Some("six"),
        7 => Some("seven"),
        8 => Some("eight"),
        9 => Some("nine"),
        _ => None,
    }
}

fn teen_word(value: u8) -> Option<&'static str> {
    match value {
        11 => Some("eleven"),
        12 => Some("twelve"),
        13 => Some("thirteen"),
        14 => Some("fourteen"),
        15 => Some("fifteen"),
        16 => Some("sixteen"),
        17 => Some("seventeen"),
        18 => Some("eighteen"),
        19 => Some("nineteen"),
        _ => None,
    }
}

/// Tens digit as a word; zero reads "o" as in "nineteen o five"
fn tens_word(digit: u8) -> &'static str {
    match digit {
        1 => "ten",
        2 => "twenty",
        3 => "thirty",
        4 => "forty",
        5 => "fifty",
        6 => "sixty",
        7 => "seventy",
        8 => "eighty",
        9 => "ninety",
        _ => "o",
    }
}

fn ordinal_word(value: u8) -> Option<&'static str> {
    match value {
        1 => Some("first"),
        2 => Some("second"),
        3 => Some("third"),
        4 => Some("fourth"),
        5 => Some("fifth"),
        6 => Some("sixth"),
        7 => Some("seventh"),
        8 => Some("eighth"),
        9 => Some("ninth"),
        10 => Some("tenth"),
        11 => Some("eleventh"),
        12 => Some("twelfth"),
        13 => Some("thirteenth"),
        14 => Some("fourteenth"),
        15 => Some("fifteenth"),
        16 => Some("sixteenth"),
        17 => Some("seventeenth"),
        18 => Some("eighteenth"),
        19 => Some("nineteenth"),
        20 => Some("twentieth"),
        30 => Some("thirtieth"),
        _ => None,
    }
}

/// Ordinals that cannot be built from a tens word and a ones ordinal
fn irregular_ordinal(value: u8) -> Option<&'static str> {
    if (10..=20).contains(&value) || value == 30 {
        ordinal_word(value)
    } else {
        None
    }
}

/// Push the cardinal words for a two-digit group; `00` pushes nothing
fn push_two_digits(tens: u8, ones: u8, words: &mut Vec<&'static str>) {
    match (tens, ones) {
        (0, 0) => {},
        (0, _) => words.extend(digit_word(ones)),
        (1, 0) => words.push("ten"),
        (1, _) => words.extend(teen_word(10 + ones)),
        (_, 0) => words.push(tens_word(tens)),
        _ => {
            words.push(tens_word(tens));
            words.extend(digit_word(ones));
        },
    }
}

fn ascii_digits(text: &str) -> Option<Vec<u8>> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(text.bytes().map(|b| b - b'0').collect())
}

/// Read a whole number of up to four digits as cardinal words
///
/// `"145"` reads "one hundred and forty five".
pub fn number_words(number: &str) -> Result<String, NormalizeError> {
    let digits = ascii_digits(number)
        .ok_or_else(|| NormalizeError::number(number, "not a whole number"))?;

    if digits.len() > MAX_NUMBER_DIGITS {
        return Err(NormalizeError::number(
            number,
            format!("more than {MAX_NUMBER_DIGITS} digits"),
        ));
    }

    let n = digits.len();
    let mut words = Vec::new();

    if n == 4 {
        if let Some(word) = digit_word(digits[0]) {
            words.extend([word, "thousand"]);
        }
    }

    if n >= 3 {
        if let Some(word) = digit_word(digits[n - 3]) {
            words.extend([word, "hundred"]);
        }
    }

    let (tens, ones) = if n >= 2 {
        (digits[n - 2], digits[n - 1])
    } else {
        (0, digits[0])
    };

    if !words.is_empty() && (tens, ones) != (0, 0) {
        words.push("and");
    }
    push_two_digits(tens, ones, &mut words);

    if words.is_empty() {
        words.push("zero");
    }

    Ok(words.join(" "))
}

/// Read a day of the month as an ordinal
///
/// `"06"` reads "sixth", `"21"` reads "twenty first".
pub fn day_words(day: &str) -> Result<String, NormalizeError> {
    let digits = ascii_digits(day)
        .filter(|digits| digits.len() <= 2)
        .ok_or_else(|| NormalizeError::date(day, "day is not a one or two digit number"))?;

    let (tens, ones) = match digits.as_slice() {
        [ones] => (0, *ones),
        [tens, ones] => (*tens, *ones),
        _ => return Err(NormalizeError::date(day, "day is not a one or two digit number")),
    };
    let value = tens * 10 + ones;
    if !(1..=31).contains(&value) {
        return Err(NormalizeError::date(day, "day out of range"));
    }

    if let Some(word) = irregular_ordinal(value) {
        return Ok(word.to_string());
    }

    let ones_ordinal =
        ordinal_word(ones).ok_or_else(|| NormalizeError::date(day, "day has no ordinal"))?;

    if tens == 0 {
        Ok(ones_ordinal.to_string())
    } else {
        Ok(format!("{} {ones_ordinal}", tens_word(tens)))
    }
}

/// Read a four digit year
///
/// `"1999"` reads "nineteen ninety nine", `"2006"` reads
/// "two thousand and six", `"1900"` reads "nineteen hundred". Years with a
/// leading zero are rejected.
pub fn year_words(year: &str) -> Result<String, NormalizeError> {
    let d = ascii_digits(year)
        .filter(|digits| digits.len() == 4)
        .ok_or_else(|| NormalizeError::date(year, "year is not four digits"))?;
    if d[0] == 0 {
        return Err(NormalizeError::date(year, "year before 1000"));
    }

    let millennial = d[1] == 0 && d[2] == 0;
    let last_two = d[2] * 10 + d[3];

    let teen_suffix = teen_word(last_two);
    let last_digit = if teen_suffix.is_none() {
        digit_word(d[3])
    } else {
        None
    };

    let mut words: Vec<&'static str> = Vec::new();

    if millennial {
        words.extend(digit_word(d[0]));
        words.push("thousand");
        if let Some(digit) = last_digit {
            words.extend(["and", digit]);
        }
        return Ok(words.join(" "));
    }

    match teen_word(d[0] * 10 + d[1]) {
        Some(teens) => words.push(teens),
        None => push_two_digits(d[0], d[1], &mut words),
    }

    if last_two == 0 {
        words.push("hundred");
    } else if d[3] == 0 {
        words.push(tens_word(d[2]));
    } else if let Some(teens) = teen_suffix {
        words.push(teens);
    } else {
        words.push(tens_word(d[2]));
        words.extend(last_digit);
    }

    Ok(words.join(" "))
}

/// Read a `DD/MM/YYYY`, `DD/MM/YY` or `DD/MM` date
///
/// The year is left out when the token has none. Two digit years below 69
/// fall in the 2000s, the rest in the 1900s.
pub fn date_words(token: &str) -> Result<String, NormalizeError> {
    let captures = DATE_PATTERN
        .captures(token)
        .ok_or_else(|| NormalizeError::date(token, "expected DD/MM/YYYY, DD/MM/YY or DD/MM"))?;

    let day_text = &captures[1];
    let month_text = &captures[2];

    let day: u32 = parse_field(token, day_text, 2, "day")?;
    let month: u32 = parse_field(token, month_text, 2, "month")?;

    let year = match captures.get(3).map(|m| m.as_str()) {
        None => None,
        Some(text) if text.len() == 4 => Some(parse_field::<i32>(token, text, 4, "year")?),
        Some(text) if text.len() == 2 => {
            let short: i32 = parse_field(token, text, 2, "year")?;
            Some(if short < 69 { 2000 + short } else { 1900 + short })
        },
        Some(_) => return Err(NormalizeError::date(token, "year must have two or four digits")),
    };

    if NaiveDate::from_ymd_opt(year.unwrap_or(YEARLESS_CHECK_YEAR), month, day).is_none() {
        return Err(NormalizeError::date(token, "no such calendar day"));
    }

    let month_name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| NormalizeError::date(token, "month out of range"))?
        .name()
        .to_lowercase();

    let mut words = vec![month_name, day_words(&format!("{day:02}"))?];
    if let Some(year) = year {
        words.push(year_words(&format!("{year:04}"))?);
    }

    Ok(words.join(" "))
}

fn parse_field<T: std::str::FromStr>(
    token: &str,
    text: &str,
    max_len: usize,
    field: &str,
) -> Result<T, NormalizeError> {
    if text.len() > max_len {
        return Err(NormalizeError::date(token, format!("{field} has too many digits")));
    }
    text.parse()
        .map_err(|_| NormalizeError::date(token, format!("{field} is not a number")))
}
