//! Duration parsing utilities.

use anyhow::Context;
use std::time::Duration;

/// Parse a duration string like "150ms", "1s", "2m" or "150" into a [`Duration`].
/// Supports:
/// - Plain numbers (interpreted as milliseconds): "150"
/// - Milliseconds suffix: "150ms"
/// - Seconds suffix: "1s"
/// - Minutes suffix: "2m"
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    // "ms" must be checked before "m" and "s"
    if let Some(num_str) = s.strip_suffix("ms") {
        let millis: u64 = num_str
            .trim()
            .parse()
            .with_context(|| format!("Invalid milliseconds value: {num_str}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(num_str) = s.strip_suffix('m') {
        let minutes: u64 = num_str
            .trim()
            .parse()
            .with_context(|| format!("Invalid minutes value: {num_str}"))?;
        let Some(secs) = minutes.checked_mul(60) else {
            anyhow::bail!("Minutes value out of range: {minutes}");
        };
        return Ok(Duration::from_secs(secs));
    }
    if let Some(num_str) = s.strip_suffix('s') {
        let secs: u64 = num_str
            .trim()
            .parse()
            .with_context(|| format!("Invalid seconds value: {num_str}"))?;
        return Ok(Duration::from_secs(secs));
    }

    let millis: u64 = s
        .parse()
        .with_context(|| format!("Invalid duration value: {s}"))?;
    Ok(Duration::from_millis(millis))
}

/// Parse a latency range of the form "min-max" ("50ms-150ms", "0-20") or a
/// single fixed value ("100ms").
pub fn parse_range(s: &str) -> anyhow::Result<(Duration, Duration)> {
    match s.split_once('-') {
        Some((min, max)) => {
            let min = parse_duration(min).context("Invalid lower latency bound")?;
            let max = parse_duration(max).context("Invalid upper latency bound")?;
            Ok((min, max))
        }
        None => {
            let fixed = parse_duration(s)?;
            Ok((fixed, fixed))
        }
    }
}

/// `serde(with = ...)` adapter that reads durations as strings or bare
/// millisecond integers and writes them as "<n>ms".
pub mod serde_millis {
    use super::parse_duration;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(u64),
        Text(String),
    }

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}ms", value.as_millis()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => Ok(Duration::from_millis(ms)),
            Raw::Text(s) => parse_duration(&s).map_err(|e| de::Error::custom(format!("{e:#}"))),
        }
    }
}
