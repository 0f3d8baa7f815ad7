use super::*;

#[test]
fn currency_groups_thousands_without_cents() {
    assert_eq!(format_currency(1_000_000.0), "$1,000,000");
    assert_eq!(format_currency(500_000.0), "$500,000");
    assert_eq!(format_currency(999.0), "$999");
    assert_eq!(format_currency(0.0), "$0");
}

#[test]
fn currency_rounds_to_whole_dollars() {
    assert_eq!(format_currency(1_234.49), "$1,234");
    assert_eq!(format_currency(1_234.5), "$1,235");
}

#[test]
fn currency_keeps_sign_outside_symbol() {
    assert_eq!(format_currency(-2_500.0), "-$2,500");
}

#[test]
fn currency_non_finite_falls_back_to_zero() {
    assert_eq!(format_currency(f64::NAN), "$0");
    assert_eq!(format_currency(f64::INFINITY), "$0");
}

#[test]
fn number_groups_and_trims_fraction() {
    assert_eq!(format_number(11_000.0), "11,000");
    assert_eq!(format_number(1_234.5), "1,234.5");
    assert_eq!(format_number(1.23456), "1.235");
    assert_eq!(format_number(100.0), "100");
}

#[test]
fn number_negative_and_negative_zero() {
    assert_eq!(format_number(-1_500.0), "-1,500");
    assert_eq!(format_number(-0.0001), "0");
}

#[test]
fn date_formats_month_day_year() {
    assert_eq!(format_date("2024-03-07T15:04:05.000Z"), "3/7/2024");
    assert_eq!(format_date("2023-12-25T00:00:00Z"), "12/25/2023");
}

#[test]
fn date_passes_through_garbage() {
    assert_eq!(format_date("yesterday"), "yesterday");
}

#[test]
fn range_labels() {
    assert_eq!(format_currency_range((1_000_000.0, 10_000_000.0)), "$1,000,000 - $10,000,000");
    assert_eq!(format_area_range((1_000.0, 11_000.0)), "1,000 - 11,000 sq ft");
}
