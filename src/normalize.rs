//! Symbolic key normalization.
//!
//! Every symbolic name used as a lookup key in the compiled descriptor (enum names, enum
//! entries, message names, field names) is normalized the same way: lowercased, with `_`
//! replaced by `-`. MAVLink base-type names are never normalized; they are matched verbatim
//! against the [primitive registry](crate::protocol::MavType).

/// Normalizes a symbolic name into its lookup-key form.
///
/// # Examples
///
/// ```
/// use mavcodec::normalize::normalize_key;
///
/// assert_eq!(normalize_key("MAV_AUTOPILOT"), "mav-autopilot");
/// assert_eq!(normalize_key("target_system"), "target-system");
/// ```
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_replaces_underscores() {
        assert_eq!(normalize_key("HEARTBEAT"), "heartbeat");
        assert_eq!(normalize_key("GLOBAL_POSITION_INT"), "global-position-int");
        assert_eq!(normalize_key("already-kebab"), "already-kebab");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize_key("MAV_CMD_DO_SET_MODE");
        let twice = normalize_key(&once);
        assert_eq!(once, twice);
    }
}
