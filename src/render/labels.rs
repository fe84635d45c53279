/// Label shown when a tick interval has no entry of its own
pub const DEFAULT_SPEED_LABEL: &str = "Medium";

/// Human-readable name for a tick interval
pub fn speed_label(tick_interval_ms: u64) -> &'static str {
    match tick_interval_ms {
        50 => "Extremely fast",
        75 => "Fast",
        100 => "Fairly fast",
        125 => "Medium-fast",
        150 => "Medium",
        175 => "Medium-slow",
        200 => "Slow",
        225 => "Fairly slow",
        250 => "Very slow",
        275 => "Extremely slow",
        300 => "Ultra slow",
        _ => DEFAULT_SPEED_LABEL,
    }
}
