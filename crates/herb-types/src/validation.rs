use crate::error::TypeError;

/// Input-boundary check for operator-entered values.
///
/// Core operations accept any well-typed value; callers that take input from
/// a person run `validate` first and surface the error as a message.
pub trait Validate {
    fn validate(&self) -> Result<(), TypeError>;
}

/// Inclusive range check. NaN never passes.
pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), TypeError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(TypeError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(check_range("x", 1.0, 1.0, 2.0).is_ok());
        assert!(check_range("x", 2.0, 1.0, 2.0).is_ok());
    }

    #[test]
    fn outside_bounds_reports_field() {
        let err = check_range("temperature", 120.0, 20.0, 100.0).unwrap_err();
        assert_eq!(
            err,
            TypeError::OutOfRange {
                field: "temperature",
                value: 120.0,
                min: 20.0,
                max: 100.0,
            }
        );
        assert!(err.is_out_of_range());
    }

    #[test]
    fn nan_is_rejected() {
        assert!(check_range("x", f64::NAN, 0.0, 1.0).is_err());
    }
}
