use crate::error::{Result, SchemaError};

/// Guard used when no capability is required.
pub const ALWAYS_TRUE: &str = "1";

const NEGATION_PREFIX: &str = "NOT_";

/// Capability tags and the preprocessor condition each one stands for.
pub const CAPABILITY_GUARDS: &[(&str, &str)] = &[
    ("PLATFORM_APLITE", "defined(PBL_PLATFORM_APLITE)"),
    ("PLATFORM_BASALT", "defined(PBL_PLATFORM_BASALT)"),
    ("PLATFORM_CHALK", "defined(PBL_PLATFORM_CHALK)"),
    ("PLATFORM_DIORITE", "defined(PBL_PLATFORM_DIORITE)"),
    ("PLATFORM_EMERY", "defined(PBL_PLATFORM_EMERY)"),
    ("BW", "defined(PBL_BW)"),
    ("COLOR", "defined(PBL_COLOR)"),
    ("MICROPHONE", "defined(PBL_MICROPHONE)"),
    ("SMARTSTRAP", "defined(PBL_SMARTSTRAP)"),
    ("SMARTSTRAP_POWER", "defined(PBL_SMARTSTRAP_POWER)"),
    ("HEALTH", "defined(PBL_HEALTH)"),
    ("RECT", "defined(PBL_RECT)"),
    ("ROUND", "defined(PBL_ROUND)"),
    (
        "DISPLAY_144x168",
        "(PBL_DISPLAY_WIDTH == 144 && PBL_DISPLAY_HEIGHT == 168)",
    ),
    (
        "DISPLAY_180x180_ROUND",
        "(PBL_DISPLAY_WIDTH == 180 && PBL_DISPLAY_HEIGHT == 180)",
    ),
    (
        "DISPLAY_200x228",
        "(PBL_DISPLAY_WIDTH == 200 && PBL_DISPLAY_HEIGHT == 228)",
    ),
];

/// Condition for a single tag. `NOT_<TAG>` negates a known tag.
pub fn capability_guard(tag: &str) -> Result<String> {
    if let Some(guard) = lookup(tag) {
        return Ok(guard.to_string());
    }
    if let Some(guard) = tag.strip_prefix(NEGATION_PREFIX).and_then(lookup) {
        return Ok(format!("!({guard})"));
    }
    Err(SchemaError::UnknownCapability(tag.to_string()))
}

/// Conjunction of the conditions for every tag, in the order given.
///
/// A tag listed twice contributes once. An empty list is always true.
pub fn capability_guard_expression<S: AsRef<str>>(tags: &[S]) -> Result<String> {
    let mut seen: Vec<&str> = Vec::with_capacity(tags.len());
    let mut guards = Vec::with_capacity(tags.len());

    for tag in tags.iter().map(AsRef::as_ref) {
        if seen.contains(&tag) {
            continue;
        }
        seen.push(tag);
        guards.push(capability_guard(tag)?);
    }

    if guards.is_empty() {
        return Ok(ALWAYS_TRUE.to_string());
    }
    Ok(guards.join(" && "))
}

fn lookup(tag: &str) -> Option<&'static str> {
    CAPABILITY_GUARDS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, guard)| *guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_true() {
        let tags: [&str; 0] = [];
        assert_eq!(capability_guard_expression(&tags).unwrap(), "1");
    }

    #[test]
    fn test_single_and_negated() {
        assert_eq!(
            capability_guard_expression(&["COLOR"]).unwrap(),
            "defined(PBL_COLOR)"
        );
        assert_eq!(
            capability_guard_expression(&["NOT_ROUND"]).unwrap(),
            "!(defined(PBL_ROUND))"
        );
    }

    #[test]
    fn test_conjunction_keeps_order() {
        assert_eq!(
            capability_guard_expression(&["PLATFORM_BASALT", "NOT_BW", "DISPLAY_144x168"]).unwrap(),
            "defined(PBL_PLATFORM_BASALT) && !(defined(PBL_BW)) && \
             (PBL_DISPLAY_WIDTH == 144 && PBL_DISPLAY_HEIGHT == 168)"
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(
            capability_guard_expression(&["COLOR", "COLOR"]).unwrap(),
            "defined(PBL_COLOR)"
        );
    }

    #[test]
    fn test_unknown_tag() {
        let err = capability_guard_expression(&["COLOR", "NOT_TELEPORT"]).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownCapability(ref tag) if tag == "NOT_TELEPORT"));
        assert!(capability_guard("NOT_NOT_COLOR").is_err());
    }

    #[test]
    fn test_every_tag_resolves() {
        for (tag, guard) in CAPABILITY_GUARDS {
            assert_eq!(capability_guard(tag).unwrap(), *guard);
            assert_eq!(
                capability_guard(&format!("NOT_{tag}")).unwrap(),
                format!("!({guard})")
            );
        }
    }
}
