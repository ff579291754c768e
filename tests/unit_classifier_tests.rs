mod common;

use chrono::{NaiveDate, NaiveTime};
use common::{instant, make_at};
use discount_ledger::discount::Quote;
use discount_ledger::filter::HistoryFilter;
use discount_ledger::models::meal::classify;
use discount_ledger::models::MealPeriod;
use rust_decimal_macros::dec;

#[test]
fn test_every_minute_of_the_day_is_classified() {
    let mut counts = std::collections::HashMap::new();
    for minute_of_day in 0..24 * 60 {
        let time = NaiveTime::from_hms_opt(minute_of_day / 60, minute_of_day % 60, 0).unwrap();
        *counts.entry(MealPeriod::of(time)).or_insert(0u32) += 1;
    }

    assert_eq!(counts[&MealPeriod::Breakfast], 4 * 60);
    assert_eq!(counts[&MealPeriod::Lunch], 3 * 60);
    // 16:00 through 18:30 inclusive
    assert_eq!(counts[&MealPeriod::Snacks], 2 * 60 + 31);
    // 19:00 through 21:30 inclusive
    assert_eq!(counts[&MealPeriod::Dinner], 2 * 60 + 31);
    assert_eq!(counts.values().sum::<u32>(), 24 * 60);
}

#[test]
fn test_string_classification_matches_typed() {
    for text in ["07:00:00", "11:59:59", "16:45:10", "21:30:59", "23:59:59"] {
        let typed = NaiveTime::parse_from_str(text, "%H:%M:%S").unwrap();
        assert_eq!(classify(text), MealPeriod::of(typed), "{}", text);
    }
}

#[test]
fn test_garbage_is_other() {
    assert_eq!(classify("not-a-time"), MealPeriod::Other);
    assert_eq!(classify("12:00"), MealPeriod::Other);
}

#[test]
fn test_filter_by_date_and_label_case_insensitive() {
    let all = vec![
        make_at("2024-01-01", "12:00:00"),
        make_at("2024-01-01", "19:30:00"),
        make_at("2023-12-31", "12:00:00"),
        make_at("2024-01-01", "13:45:00"),
    ];
    let filter = HistoryFilter::new()
        .on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .meal("lunch");

    let matched: Vec<_> = filter.apply(&all).collect();

    assert_eq!(matched, vec![&all[0], &all[3]]);
}

#[test]
fn test_quote_into_transaction() {
    let quote = Quote::from_input("80", "25").unwrap();
    let tx = quote.into_transaction(instant("2024-06-01 08:30:00"));

    assert_eq!(tx.final_amount, dec!(60));
    assert_eq!(tx.meal_period(), MealPeriod::Breakfast);
    assert_eq!(tx.date, "2024-06-01");
}
