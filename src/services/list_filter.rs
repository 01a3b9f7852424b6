//! Client-side search, category filter and sort over an in-memory item list.
//!
//! Everything here is pure: the input slice is never copied or mutated and
//! the returned view borrows from it. Malformed years and ratings degrade to
//! zero instead of failing.

use std::{cmp::Ordering, collections::BTreeSet};

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::{CategoryFilter, FilterCriteria, Item, SortMode};

/// Filtered and sorted view over a borrowed item slice
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    pub items: Vec<&'a Item>,
    pub result_count: usize,
    pub total_count: usize,
}

impl FilteredView<'_> {
    /// Human-readable result line, e.g. "Showing 2 of 5 items"
    pub fn summary(&self) -> String {
        let noun = if self.total_count == 1 { "item" } else { "items" };
        format!(
            "Showing {} of {} {}",
            self.result_count, self.total_count, noun
        )
    }

    /// True when there was something to filter but nothing matched
    pub fn no_results(&self) -> bool {
        self.result_count == 0 && self.total_count > 0
    }
}

/// Applies the criteria to `items` and returns the resulting view
pub fn apply<'a>(items: &'a [Item], criteria: &FilterCriteria) -> FilteredView<'a> {
    let query = criteria.search_query.trim().to_lowercase();

    let mut matched: Vec<&Item> = items
        .iter()
        .filter(|item| matches_query(item, &query))
        .filter(|item| matches_category(item, &criteria.selected_category))
        .collect();

    // sort_by is stable, so equal keys keep their input order
    matched.sort_by(|a, b| compare(a, b, criteria.sort_mode));

    FilteredView {
        result_count: matched.len(),
        total_count: items.len(),
        items: matched,
    }
}

/// Distinct present categories in ascending order
pub fn distinct_categories(items: &[Item]) -> Vec<&str> {
    items
        .iter()
        .filter_map(Item::category)
        .filter(|category| !category.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether any item carries a rating worth sorting by
pub fn rating_sort_available(items: &[Item]) -> bool {
    items.iter().any(|item| item.rating().is_some())
}

/// `query` must already be trimmed and lower-cased
fn matches_query(item: &Item, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    item.title.to_lowercase().contains(query)
        || item
            .role()
            .is_some_and(|role| role.to_lowercase().contains(query))
        || item
            .year()
            .is_some_and(|year| year.to_lowercase().contains(query))
}

fn matches_category(item: &Item, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Exact(selected) => item.category() == Some(selected.as_str()),
    }
}

fn compare(a: &Item, b: &Item, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Newest => year_key(b).cmp(&year_key(a)),
        SortMode::Oldest => year_key(a).cmp(&year_key(b)),
        SortMode::AlphabeticalAsc => compare_titles(&a.title, &b.title),
        SortMode::AlphabeticalDesc => compare_titles(&b.title, &a.title),
        SortMode::RatingDesc => rating_key(b)
            .partial_cmp(&rating_key(a))
            .unwrap_or(Ordering::Equal),
    }
}

fn year_key(item: &Item) -> i64 {
    item.year().and_then(parse_leading_int).unwrap_or(0)
}

fn rating_key(item: &Item) -> f64 {
    item.rating().and_then(parse_leading_float).unwrap_or(0.0)
}

/// Splits off leading whitespace and an optional sign
fn split_sign(value: &str) -> (&str, &str) {
    let value = value.trim_start();
    match value.as_bytes().first() {
        Some(b'+' | b'-') => value.split_at(1),
        _ => ("", value),
    }
}

fn digit_run(value: &str) -> usize {
    value.bytes().take_while(u8::is_ascii_digit).count()
}

/// Integer value of the longest numeric prefix, e.g. `"2010-2012"` is 2010
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let (sign, rest) = split_sign(value);
    let digits = digit_run(rest);
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if sign == "-" { -magnitude } else { magnitude })
}

/// Float value of the longest numeric prefix, e.g. `"8.5/10"` is 8.5
pub fn parse_leading_float(value: &str) -> Option<f64> {
    let (sign, rest) = split_sign(value);
    let bytes = rest.as_bytes();

    let int_digits = digit_run(rest);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(&rest[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let (exp_sign, exp_rest) = split_sign(&rest[end + 1..]);
        let exp_digits = digit_run(exp_rest);
        // no whitespace allowed between the mantissa and the exponent sign
        if exp_digits > 0 && !rest[end + 1..].starts_with(char::is_whitespace) {
            end += 1 + exp_sign.len() + exp_digits;
        }
    }

    let parsed = rest[..end].parse::<f64>().ok()?;
    let parsed = if sign == "-" { -parsed } else { parsed };
    parsed.is_finite().then_some(parsed)
}

/// Locale-style title ordering.
///
/// Titles compare on their letters first, ignoring accents and case. Ties
/// then go to the unaccented form, then to the lower-case letter, and code
/// points break whatever is left.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| lower_case_first(a, b))
        .then_with(|| a.cmp(b))
}

/// Lower-cased letters with combining accents stripped
fn base_letters(title: &str) -> impl Iterator<Item = char> + '_ {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lower_case_first(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }
    }
    Ordering::Equal
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn optional_field(values: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            proptest::sample::select(values).prop_map(|v| Some(v.to_string())),
        ]
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        (
            "[A-Za-z][A-Za-z ]{0,8}",
            optional_field(&["1999", "2005", "2020", "N/A", "unknown", "2005"]),
            optional_field(&["Director", "Writer", "N/A", "Editor"]),
            optional_field(&["Film", "TV", "N/A", "Short", ""]),
            optional_field(&["7.5", "9", "N/A", "x", "7.5"]),
        )
            .prop_map(|(title, year, role, category, rating)| Item {
                title,
                year,
                role,
                category,
                rating,
            })
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (
            proptest::sample::select(vec!["", " ", "a", "dir", "20", "N/A"]),
            proptest::sample::select(vec!["all", "Film", "TV", "N/A"]),
            proptest::sample::select(SortMode::ALL.to_vec()),
        )
            .prop_map(|(query, category, mode)| {
                FilterCriteria::new(query, CategoryFilter::from_selection(category), mode)
            })
    }

    fn key_equal(a: &Item, b: &Item, mode: SortMode) -> bool {
        compare(a, b, mode) == Ordering::Equal
    }

    proptest! {
        #[test]
        fn test_default_filters_keep_everything(
            items in prop::collection::vec(arb_item(), 0..20),
            mode in proptest::sample::select(SortMode::ALL.to_vec()),
        ) {
            let criteria = FilterCriteria::new("", CategoryFilter::All, mode);
            prop_assert_eq!(apply(&items, &criteria).result_count, items.len());
        }

        #[test]
        fn test_apply_is_idempotent(
            items in prop::collection::vec(arb_item(), 0..20),
            criteria in arb_criteria(),
        ) {
            let once: Vec<Item> = apply(&items, &criteria).items.into_iter().cloned().collect();
            let twice: Vec<Item> = apply(&once, &criteria).items.into_iter().cloned().collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_sort_is_stable(
            items in prop::collection::vec(arb_item(), 0..20),
            mode in proptest::sample::select(SortMode::ALL.to_vec()),
        ) {
            let criteria = FilterCriteria::new("", CategoryFilter::All, mode);
            let view = apply(&items, &criteria);
            let position = |target: &Item| {
                items.iter().position(|i| std::ptr::eq(i, target)).unwrap()
            };
            for pair in view.items.windows(2) {
                prop_assert_ne!(compare(pair[0], pair[1], mode), Ordering::Greater);
                if key_equal(pair[0], pair[1], mode) {
                    prop_assert!(position(pair[0]) < position(pair[1]));
                }
            }
        }

        #[test]
        fn test_missing_keys_sort_last(
            items in prop::collection::vec(arb_item(), 0..20),
            mode in proptest::sample::select(vec![SortMode::Newest, SortMode::RatingDesc]),
        ) {
            let criteria = FilterCriteria::new("", CategoryFilter::All, mode);
            let view = apply(&items, &criteria);
            let is_missing = |item: &Item| match mode {
                SortMode::Newest => item.year().and_then(parse_leading_int).is_none(),
                _ => item.rating().and_then(parse_leading_float).is_none(),
            };
            // every year/rating in the generator is non-negative
            if let Some(first_missing) = view.items.iter().position(|i| is_missing(*i)) {
                for later in &view.items[first_missing..] {
                    prop_assert!(key_equal(later, view.items[first_missing], mode));
                }
            }
        }

        #[test]
        fn test_categories_are_clean(items in prop::collection::vec(arb_item(), 0..20)) {
            let categories = distinct_categories(&items);
            prop_assert!(!categories.contains(&crate::models::NOT_AVAILABLE));
            prop_assert!(!categories.contains(&""));
            prop_assert!(categories.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
