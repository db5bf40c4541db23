//! Templates compiled into the binary.
//!
//! Paths are relative to this file. Partials recurse into sections, so each
//! one handles both a section and a leaf.

pub const HEADER_NAME: &str = "enamel.h";
pub const SOURCE_NAME: &str = "enamel.c";

pub const HEADER: &str = include_str!("../../templates/enamel.h.hbs");
pub const SOURCE: &str = include_str!("../../templates/enamel.c.hbs");

/// Top level templates, by registration name.
pub const TEMPLATES: &[(&str, &str)] = &[(HEADER_NAME, HEADER), (SOURCE_NAME, SOURCE)];

/// Partials, by the name templates include them with.
pub const PARTIALS: &[(&str, &str)] = &[
    (
        "declaration",
        include_str!("../../templates/partials/declaration.hbs"),
    ),
    ("values", include_str!("../../templates/partials/values.hbs")),
    (
        "registration",
        include_str!("../../templates/partials/registration.hbs"),
    ),
    (
        "dict_size",
        include_str!("../../templates/partials/dict_size.hbs"),
    ),
    (
        "inbox_size",
        include_str!("../../templates/partials/inbox_size.hbs"),
    ),
    (
        "definition",
        include_str!("../../templates/partials/definition.hbs"),
    ),
];
