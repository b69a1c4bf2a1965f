// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Screw head class taxonomy and raw label normalization
//!
//! Owns the fixed set of output classes, their display labels and colors,
//! and the mapping from free-text predictor labels into that set. The two
//! cascade stages use different rule-sets: the primary model only ever emits
//! Phillips/Pozidriv spellings, the fallback model covers the full taxonomy
//! with many raw label variants.

/// Canonical class names, ordered. A class id is its position in this list.
pub const CLASS_NAMES: [&str; 10] = [
    "phillips",
    "pozidriv",
    "torx",
    "hex_allen",
    "slotted",
    "security_torx",
    "pentalobe",
    "tri_wing",
    "spanner",
    "triangle",
];

/// Which normalization rule-set to apply to a raw predictor label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    /// Stage 1 model: Phillips/Pozidriv spellings only.
    Primary,
    /// Stage 2 model: full taxonomy, many raw spellings.
    Full,
}

/// Normalize a raw predictor class label into a canonical class name.
///
/// The label is trimmed and lower-cased first. Substring rules are applied
/// in a fixed priority order; the first matching rule wins. A label no rule
/// matches is returned as-is (lower-cased, trimmed) and may fall outside
/// [`CLASS_NAMES`]; callers decide what to do with it via [`index_for`].
pub fn normalize(raw: &str, rules: RuleSet) -> String {
    let label = raw.trim().to_lowercase();

    match rules {
        RuleSet::Primary => {
            if label.contains("phillips") {
                "phillips".to_string()
            } else if label.contains("pozidriv") {
                "pozidriv".to_string()
            } else {
                label
            }
        }
        RuleSet::Full => {
            if label.contains("phillips") {
                "phillips".to_string()
            } else if label.contains("pozidriv") {
                "pozidriv".to_string()
            } else if label.contains("torx") && label.contains("security") {
                "security_torx".to_string()
            } else if label.contains("torx") {
                "torx".to_string()
            } else if label.contains("hex") || label.contains("allen") {
                "hex_allen".to_string()
            } else if label.contains("slotted") {
                "slotted".to_string()
            } else if label.contains("pentalobe") {
                "pentalobe".to_string()
            } else if label.contains("tri") && label.contains("wing") {
                "tri_wing".to_string()
            } else if label.contains("spanner") {
                "spanner".to_string()
            } else if label.contains("triangle") {
                "triangle".to_string()
            } else {
                label
            }
        }
    }
}

/// Display label (Turkish UI strings) for a canonical class name.
/// Unknown names fall back to the name itself.
pub fn label_for(class_name: &str) -> &str {
    match class_name {
        "phillips" => "Phillips",
        "pozidriv" => "Pozidriv",
        "torx" => "Torx",
        "hex_allen" => "Hex/Allen",
        "slotted" => "Slotted",
        "security_torx" => "Security Torx",
        "pentalobe" => "Pentalobe",
        "tri_wing" => "Tri-wing",
        "spanner" => "Spanner",
        "triangle" => "Triangle",
        other => other,
    }
}

/// Display color (hex) for a canonical class name. Unknown names are white.
pub fn color_for(class_name: &str) -> &'static str {
    match class_name {
        "phillips" => "#E74C3C",
        "pozidriv" => "#3498DB",
        "torx" => "#F39C12",
        "hex_allen" => "#9B59B6",
        "slotted" => "#1ABC9C",
        "security_torx" => "#E67E22",
        "pentalobe" => "#34495E",
        "tri_wing" => "#16A085",
        "spanner" => "#C0392B",
        "triangle" => "#27AE60",
        _ => "#FFFFFF",
    }
}

/// Stable class id for a canonical class name, or `None` if the name is not
/// part of the taxonomy. Labels that normalize outside the taxonomy are
/// rejected by the cascade filter rather than mapped to a default class.
pub fn index_for(class_name: &str) -> Option<usize> {
    CLASS_NAMES.iter().position(|&name| name == class_name)
}
