//! Default error messages.

pub const BLANK: &str = "can't be blank";
pub const ACCEPTED: &str = "must be accepted";
pub const NOT_A_NUMBER: &str = "is not a number";
pub const NOT_AN_INTEGER: &str = "must be an integer";
pub const ODD: &str = "must be odd";
pub const EVEN: &str = "must be even";
pub const NOT_A_URL: &str = "must be a url";
pub const NOT_AN_EMAIL: &str = "must be an email";
pub const INVALID: &str = "is invalid";
pub const CONFIRMATION: &str = "doesn't match confirmation";
pub const INCLUSION: &str = "is not included in the list";
pub const EXCLUSION: &str = "is reserved";

pub fn wrong_length(n: usize) -> String {
    format!("is the wrong length (should be {n} characters)")
}

pub fn too_short(n: usize) -> String {
    format!("is too short (minimum is {n} characters)")
}

pub fn too_long(n: usize) -> String {
    format!("is too long (maximum is {n} characters)")
}

pub fn equal_to(bound: f64) -> String {
    format!("must be equal to {}", number(bound))
}

pub fn less_than(bound: f64) -> String {
    format!("must be less than {}", number(bound))
}

pub fn less_than_or_equal_to(bound: f64) -> String {
    format!("must be less than or equal to {}", number(bound))
}

pub fn greater_than(bound: f64) -> String {
    format!("must be greater than {}", number(bound))
}

pub fn greater_than_or_equal_to(bound: f64) -> String {
    format!("must be greater than or equal to {}", number(bound))
}

/// Integral bounds print without a fractional part.
fn number(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        x.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_format_naturally() {
        assert_eq!(less_than(10.0), "must be less than 10");
        assert_eq!(greater_than(2.5), "must be greater than 2.5");
        assert_eq!(too_short(3), "is too short (minimum is 3 characters)");
    }
}
