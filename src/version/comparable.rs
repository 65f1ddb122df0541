//! Structured comparison key for version strings
//!
//! A version is split into items at `.` and `-` separators and at every
//! transition between digits and letters. Numeric items compare numerically,
//! alphabetic items compare by qualifier rank and then lexically. Trailing
//! "null" items (`0`, empty or release qualifiers) are dropped so that `1.0`,
//! `1.0.0` and `1.0.0.RELEASE` all compare equal.

use std::cmp::Ordering;
use std::fmt;

/// Well-known qualifiers, from oldest to newest
const QUALIFIERS: [&str; 7] = ["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];

/// Position of the release qualifier in [`QUALIFIERS`]
const RELEASE_INDEX: usize = 5;

#[derive(Debug, Clone)]
enum Item {
    /// Digits with leading zeroes removed ("0" for zero)
    Int(String),
    /// Lowercased, alias-resolved qualifier
    Str(String),
    List(Vec<Item>),
}

impl Item {
    fn int(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Item::Int("0".to_string())
        } else {
            Item::Int(trimmed.to_string())
        }
    }

    fn string(value: &str, followed_by_digit: bool) -> Self {
        let value = if followed_by_digit && value.len() == 1 {
            match value {
                "a" => "alpha",
                "b" => "beta",
                "m" => "milestone",
                other => other,
            }
        } else {
            value
        };
        let value = match value {
            "ga" | "final" | "release" => "",
            "cr" => "rc",
            other => other,
        };
        Item::Str(value.to_string())
    }

    fn is_null(&self) -> bool {
        match self {
            Item::Int(digits) => digits == "0",
            Item::Str(value) => qualifier_rank(value) == (RELEASE_INDEX, ""),
            Item::List(items) => items.is_empty(),
        }
    }

    /// Compares this item against another one, `None` standing for padding
    fn compare(&self, other: Option<&Item>) -> Ordering {
        match (self, other) {
            (Item::Int(digits), None) => {
                if digits == "0" {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Item::Int(left), Some(Item::Int(right))) => compare_digits(left, right),
            (Item::Int(_), Some(_)) => Ordering::Greater,

            (Item::Str(value), None) => qualifier_rank(value).cmp(&(RELEASE_INDEX, "")),
            (Item::Str(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::Str(left), Some(Item::Str(right))) => {
                qualifier_rank(left).cmp(&qualifier_rank(right))
            }
            (Item::Str(_), Some(Item::List(_))) => Ordering::Less,

            (Item::List(items), None) => match items.first() {
                Some(first) => first.compare(None),
                None => Ordering::Equal,
            },
            (Item::List(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::List(_), Some(Item::Str(_))) => Ordering::Greater,
            (Item::List(left), Some(Item::List(right))) => compare_lists(left, right),
        }
    }
}

fn compare_digits(left: &str, right: &str) -> Ordering {
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn compare_lists(left: &[Item], right: &[Item]) -> Ordering {
    for i in 0..left.len().max(right.len()) {
        let ordering = match (left.get(i), right.get(i)) {
            (Some(l), r) => l.compare(r),
            (None, Some(r)) => r.compare(None).reverse(),
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Rank of a qualifier: known qualifiers by position, unknown ones after all
/// known qualifiers and then alphabetically
fn qualifier_rank(value: &str) -> (usize, &str) {
    match QUALIFIERS.iter().position(|q| *q == value) {
        Some(index) => (index, ""),
        None => (QUALIFIERS.len(), value),
    }
}

fn normalize(items: &mut Vec<Item>) {
    let mut i = items.len();
    while i > 0 {
        i -= 1;
        if items[i].is_null() {
            items.remove(i);
        } else if !matches!(items[i], Item::List(_)) {
            break;
        }
    }
}

/// Builder stack: the innermost list is last
struct Parser {
    stack: Vec<Vec<Item>>,
}

impl Parser {
    fn push(&mut self, item: Item) {
        if let Some(list) = self.stack.last_mut() {
            list.push(item);
        }
    }

    fn open_list(&mut self) {
        self.stack.push(Vec::new());
    }

    fn finish(mut self) -> Vec<Item> {
        while self.stack.len() > 1 {
            let mut list = self.stack.pop().unwrap_or_default();
            normalize(&mut list);
            self.push(Item::List(list));
        }
        let mut root = self.stack.pop().unwrap_or_default();
        normalize(&mut root);
        root
    }
}

/// Totally ordered comparison key derived from a version string
#[derive(Debug, Clone)]
pub struct ComparableVersion {
    items: Vec<Item>,
}

impl ComparableVersion {
    /// Build the comparison key for `version`
    pub fn parse(version: &str) -> Self {
        let version = version.to_lowercase();
        let chars: Vec<char> = version.chars().collect();
        let mut parser = Parser {
            stack: vec![Vec::new()],
        };
        let mut is_digit = false;
        let mut start = 0;
        let slice = |from: usize, to: usize| chars[from..to].iter().collect::<String>();

        for (i, &c) in chars.iter().enumerate() {
            match c {
                '.' | '-' => {
                    if i == start {
                        parser.push(Item::int("0"));
                    } else {
                        parser.push(parse_item(is_digit, &slice(start, i)));
                    }
                    start = i + 1;
                    if c == '-' {
                        parser.open_list();
                    }
                }
                c if c.is_ascii_digit() => {
                    if !is_digit && i > start {
                        parser.push(Item::string(&slice(start, i), true));
                        start = i;
                        parser.open_list();
                    }
                    is_digit = true;
                }
                _ => {
                    if is_digit && i > start {
                        parser.push(parse_item(true, &slice(start, i)));
                        start = i;
                        parser.open_list();
                    }
                    is_digit = false;
                }
            }
        }
        if chars.len() > start {
            parser.push(parse_item(is_digit, &slice(start, chars.len())));
        }

        Self {
            items: parser.finish(),
        }
    }
}

fn parse_item(is_digit: bool, text: &str) -> Item {
    if is_digit {
        Item::int(text)
    } else {
        Item::string(text, false)
    }
}

impl Ord for ComparableVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_lists(&self.items, &other.items)
    }
}

impl PartialOrd for ComparableVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ComparableVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComparableVersion {}

impl fmt::Display for ComparableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_items(items: &[Item], f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    let separator = if matches!(item, Item::List(_)) { '-' } else { '.' };
                    write!(f, "{}", separator)?;
                }
                match item {
                    Item::Int(digits) => write!(f, "{}", digits)?,
                    Item::Str(value) => write!(f, "{}", value)?,
                    Item::List(inner) => write_items(inner, f)?,
                }
            }
            Ok(())
        }
        write_items(&self.items, f)
    }
}
