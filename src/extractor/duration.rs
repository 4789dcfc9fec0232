// ISO 8601 duration codec (`PT1H2M3S`)

use regex::Regex;

/// Parsed duration: seconds plus its clock rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDuration {
    pub total_seconds: u64,
    pub formatted: String,
}

/// Parse an ISO 8601 time duration such as `PT1H2M3S`.
///
/// Every component is optional. Input without the `PT` marker, or whose total does not
/// fit in `u64`, yields `0` / `"0:00"`.
pub fn parse(token: &str) -> ParsedDuration {
    lazy_static::lazy_static! {
        static ref DURATION_RE: Regex =
            Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap();
    }

    DURATION_RE
        .captures(token)
        .and_then(|caps| {
            // A present component that does not fit in u64 invalidates the token
            let component = |idx: usize| -> Option<u64> {
                caps.get(idx).map_or(Some(0), |m| m.as_str().parse().ok())
            };
            component(1)?
                .checked_mul(3600)?
                .checked_add(component(2)?.checked_mul(60)?)?
                .checked_add(component(3)?)
        })
        .map_or_else(ParsedDuration::zero, |total_seconds| ParsedDuration {
            total_seconds,
            formatted: format(total_seconds),
        })
}

impl ParsedDuration {
    fn zero() -> Self {
        Self {
            total_seconds: 0,
            formatted: "0:00".to_string(),
        }
    }
}

/// Render seconds as `H:MM:SS` when there is at least one hour, else `M:SS`
pub fn format(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
