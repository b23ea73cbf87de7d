use std::time::Duration;

const NANOS_PER_MICROSECOND: u128 = 1_000;
const NANOS_PER_MILLISECOND: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
}

/// Largest unit first, at most two components: `1s 250ms`, `3m 2s`, `15µs`.
pub fn format_duration(duration: Duration) -> String {
    let total_nanos = duration.as_nanos();
    if total_nanos == 0 {
        return format!("<1{}", unit_suffix(TimeUnit::Nanosecond));
    }

    let (first_unit, first_unit_nanos) = select_largest_unit(total_nanos);
    let first_value = total_nanos / first_unit_nanos;
    let remainder = total_nanos % first_unit_nanos;
    if remainder == 0 {
        return format!("{first_value}{}", unit_suffix(first_unit));
    }

    let (second_unit, second_unit_nanos) = select_largest_unit(remainder);
    let second_value = remainder / second_unit_nanos;
    format!(
        "{first_value}{} {second_value}{}",
        unit_suffix(first_unit),
        unit_suffix(second_unit)
    )
}

fn select_largest_unit(total_nanos: u128) -> (TimeUnit, u128) {
    if total_nanos >= NANOS_PER_HOUR {
        return (TimeUnit::Hour, NANOS_PER_HOUR);
    }
    if total_nanos >= NANOS_PER_MINUTE {
        return (TimeUnit::Minute, NANOS_PER_MINUTE);
    }
    if total_nanos >= NANOS_PER_SECOND {
        return (TimeUnit::Second, NANOS_PER_SECOND);
    }
    if total_nanos >= NANOS_PER_MILLISECOND {
        return (TimeUnit::Millisecond, NANOS_PER_MILLISECOND);
    }
    if total_nanos >= NANOS_PER_MICROSECOND {
        return (TimeUnit::Microsecond, NANOS_PER_MICROSECOND);
    }
    (TimeUnit::Nanosecond, 1)
}

fn unit_suffix(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Nanosecond => "ns",
        TimeUnit::Microsecond => "µs",
        TimeUnit::Millisecond => "ms",
        TimeUnit::Second => "s",
        TimeUnit::Minute => "m",
        TimeUnit::Hour => "h",
    }
}
