//! Custom field validators shared by catalog input models.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

/// Genre names: letters, spaces and hyphens.
pub static GENRE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s-]+$").expect("valid genre name pattern"));

/// Person names: letters (including Spanish accents), spaces, periods,
/// hyphens and apostrophes.
pub static PERSON_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑüÜ\s.'-]+$").expect("valid person name pattern")
});

/// Earliest accepted release year.
pub const FIRST_RELEASE_YEAR: i32 = 1888;

/// Highest accepted rental price.
pub const MAX_RENTAL_PRICE: Decimal = Decimal::from_parts(99999, 0, 0, false, 2);

/// Maximum number of genres per movie.
pub const MAX_GENRES_PER_MOVIE: usize = 5;

fn error(code: &'static str, message: impl Into<String>) -> ValidationError {
    let message: String = message.into();
    ValidationError::new(code).with_message(message.into())
}

/// Reject whitespace-only values for required text.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "Value cannot be blank"));
    }
    Ok(())
}

/// Reject text that looks like markup.
pub fn no_html(value: &str) -> Result<(), ValidationError> {
    if value.contains('<') && value.contains('>') {
        return Err(error("html", "HTML tags are not allowed"));
    }
    Ok(())
}

/// Required text without markup.
pub fn required_plain_text(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    no_html(value)
}

/// Release years run from the first film ever made up to five years ahead.
pub fn release_year(year: i32) -> Result<(), ValidationError> {
    let last = Utc::now().year() + 5;
    if !(FIRST_RELEASE_YEAR..=last).contains(&year) {
        return Err(error(
            "release_year",
            format!("Release year must be between {FIRST_RELEASE_YEAR} and {last}"),
        ));
    }
    Ok(())
}

/// Positive, at most 999.99, at most two decimal places.
pub fn rental_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.is_zero() {
        return Err(error("rental_price", "Rental price must be greater than $0"));
    }
    if *price > MAX_RENTAL_PRICE {
        return Err(error("rental_price", "Rental price cannot exceed $999.99"));
    }
    if price.normalize().scale() > 2 {
        return Err(error(
            "rental_price",
            "Rental price can have at most 2 decimal places",
        ));
    }
    Ok(())
}

/// Birth dates must be after 1850-01-01 and not in the future.
pub fn birth_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Utc::now().date_naive() {
        return Err(error("birth_date", "Birth date cannot be in the future"));
    }
    let earliest = NaiveDate::from_ymd_opt(1850, 1, 1).unwrap_or(NaiveDate::MIN);
    if *date <= earliest {
        return Err(error("birth_date", "Birth date seems invalid"));
    }
    Ok(())
}

/// A movie needs between one and five genres.
pub fn genre_selection(ids: &[i32]) -> Result<(), ValidationError> {
    if ids.is_empty() {
        return Err(error("genre_ids", "Please select at least one genre"));
    }
    if ids.len() > MAX_GENRES_PER_MOVIE {
        return Err(error("genre_ids", "A movie cannot have more than 5 genres"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn html_is_rejected() {
        assert!(no_html("<script>alert(1)</script>").is_err());
        assert!(no_html("a < b").is_ok());
        assert!(no_html("plain synopsis").is_ok());
    }

    #[test]
    fn blank_is_rejected() {
        assert!(not_blank("  \t").is_err());
        assert!(not_blank(" Drama ").is_ok());
    }

    #[test]
    fn required_plain_text_checks_both() {
        assert!(required_plain_text(" ").is_err());
        assert!(required_plain_text("<i>x</i>").is_err());
        assert!(required_plain_text("Alien").is_ok());
    }

    #[test]
    fn release_year_bounds() {
        let next = Utc::now().year() + 5;
        assert!(release_year(1887).is_err());
        assert!(release_year(1888).is_ok());
        assert!(release_year(next).is_ok());
        assert!(release_year(next + 1).is_err());
    }

    #[test]
    fn rental_price_bounds_and_scale() {
        assert!(rental_price(&dec("0")).is_err());
        assert!(rental_price(&dec("-1.00")).is_err());
        assert!(rental_price(&dec("0.01")).is_ok());
        assert!(rental_price(&dec("999.99")).is_ok());
        assert!(rental_price(&dec("1000.00")).is_err());
        assert!(rental_price(&dec("3.999")).is_err());
        assert!(rental_price(&dec("3.900")).is_ok());
    }

    #[test]
    fn birth_date_bounds() {
        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        assert!(birth_date(&tomorrow).is_err());
        assert!(birth_date(&NaiveDate::from_ymd_opt(1850, 1, 1).unwrap()).is_err());
        assert!(birth_date(&NaiveDate::from_ymd_opt(1970, 7, 30).unwrap()).is_ok());
    }

    #[test]
    fn genre_selection_bounds() {
        assert!(genre_selection(&[]).is_err());
        assert!(genre_selection(&[1]).is_ok());
        assert!(genre_selection(&[1, 2, 3, 4, 5]).is_ok());
        assert!(genre_selection(&[1, 2, 3, 4, 5, 6]).is_err());
    }

    #[test]
    fn name_patterns() {
        assert!(GENRE_NAME.is_match("Science-Fiction"));
        assert!(GENRE_NAME.is_match("Film Noir"));
        assert!(!GENRE_NAME.is_match("Sci-Fi 2"));

        assert!(PERSON_NAME.is_match("Guillermo del Toro"));
        assert!(PERSON_NAME.is_match("Penélope Cruz"));
        assert!(PERSON_NAME.is_match("Lupita Nyong'o"));
        assert!(PERSON_NAME.is_match("Robert Downey Jr."));
        assert!(!PERSON_NAME.is_match("R2-D2"));
    }
}
