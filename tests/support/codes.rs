use std::convert::Infallible;
use std::str::FromStr;

/// Wrapper for code lists supplied via behaviour-driven test steps.
///
/// Accepts `"155", "150", "EU"`, `155, 150, EU` or `none` for an empty list.
#[derive(Clone, Debug)]
pub struct StepCodes {
    codes: Vec<String>,
}

impl FromStr for StepCodes {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Ok(Self { codes: Vec::new() });
        }

        let codes = trimmed
            .split(',')
            .map(unquote)
            .filter(|code| !code.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self { codes })
    }
}

impl StepCodes {
    /// Consumes the step value, yielding the parsed codes.
    pub fn into_inner(self) -> Vec<String> {
        self.codes
    }
}

/// Strip surrounding whitespace and quotes from a step parameter.
pub fn unquote(value: &str) -> &str {
    value
        .trim()
        .trim_matches(|candidate| matches!(candidate, '"' | '\''))
}
