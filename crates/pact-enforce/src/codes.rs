//! Rule codes. Every code is `CATEGORY` followed by digits; a bare category
//! or the wildcard [`ALL`] may appear in ignore directives and config.

pub const ALL: &str = "ALL";

pub const IMMUTABLE: &str = "IMM";
pub const IMM_FIELD_WRITE: &str = "IMM01";
pub const IMM_ELEMENT_WRITE: &str = "IMM02";
pub const IMM_INC_DEC: &str = "IMM03";
pub const IMM_COMPOUND: &str = "IMM04";
pub const IMM_RECEIVER_REBIND: &str = "IMM05";

pub const CONSTRUCTOR: &str = "CTOR";
pub const CTOR_LITERAL: &str = "CTOR01";
pub const CTOR_NEW: &str = "CTOR02";

pub const TEST_ONLY: &str = "TEST";
pub const TEST_ONLY_USE: &str = "TEST01";

pub const PACKAGE_ONLY: &str = "PKG";
pub const PACKAGE_ONLY_USE: &str = "PKG01";

pub const IMPLEMENTS: &str = "IMPL";
pub const IMPL_MISSING_METHODS: &str = "IMPL01";
pub const IMPL_MODULE_NOT_FOUND: &str = "IMPL02";
pub const IMPL_INTERFACE_NOT_FOUND: &str = "IMPL03";
pub const IMPL_TYPE_NOT_FOUND: &str = "IMPL04";

/// Non-numeric prefix of a code: `"IMM01"` -> `"IMM"`. A bare category is its
/// own category.
pub fn category(code: &str) -> &str {
    code.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// Conformance violations can only be fixed by editing the requirement, so
/// nothing may hide them.
pub fn is_suppressible(code: &str) -> bool {
    category(code) != IMPLEMENTS
}

/// Human-readable rule family for a code.
pub fn family(code: &str) -> &'static str {
    match category(code) {
        IMMUTABLE => "immutable",
        CONSTRUCTOR => "constructor",
        TEST_ONLY => "test_only",
        PACKAGE_ONLY => "package_only",
        IMPLEMENTS => "implements",
        _ => "unknown",
    }
}

/// Canonical spelling of a user-written code: uppercase, trimmed.
pub fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// `CATEGORY+digits`, a bare category, or `ALL`.
pub fn is_well_formed(code: &str) -> bool {
    let cat = category(code);
    !cat.is_empty() && cat.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}
