// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Translation between the kernel's UpperCamel names and lower snake_case.
//!
//! `to_camel` capitalizes the first letter and every lowercase letter that
//! follows an underscore, dropping that underscore. `to_snake` lowercases the
//! first character and turns every later uppercase letter into `_` plus its
//! lowercase form. The two are inverses on identifiers valid in both
//! conventions; other inputs are translated mechanically, never rejected.

/// `comp_solid` → `CompSolid`.
pub fn to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    let mut at_start = true;

    while let Some(c) = chars.next() {
        if at_start && c.is_ascii_lowercase() {
            out.push(c.to_ascii_uppercase());
        } else if c == '_' && chars.peek().is_some_and(|n| n.is_ascii_lowercase()) {
            if let Some(next) = chars.next() {
                out.push(next.to_ascii_uppercase());
            }
        } else {
            out.push(c);
        }
        at_start = false;
    }
    out
}

/// `CompSolid` → `comp_solid`.
pub fn to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut chars = name.chars();

    if let Some(first) = chars.next() {
        out.push(first.to_ascii_lowercase());
    }
    for c in chars {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Name under which a kernel builder symbol is exposed, or `None` if the
/// symbol is not a builder.
///
/// A builder symbol starts with `prefix` (e.g. `PrimAPI_Make`) and does not
/// end in the kernel's `helper_suffix`. Its name is the snake form of the last segment of
/// the prefix joined with the symbol's remaining stem: `PrimAPI_MakeBox` →
/// `make_box`.
pub fn builder_function_name(prefix: &str, helper_suffix: &str, symbol: &str) -> Option<String> {
    if !helper_suffix.is_empty() && symbol.ends_with(helper_suffix) {
        return None;
    }
    let rest = symbol.strip_prefix(prefix)?;
    let stem = rest.split('_').next().filter(|s| !s.is_empty())?;
    let head = prefix.rsplit('_').next().unwrap_or(prefix);
    Some(to_snake(&format!("{head}{stem}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_from_snake() {
        assert_eq!(to_camel("comp_solid"), "CompSolid");
        assert_eq!(to_camel("face"), "Face");
        assert_eq!(to_camel("make_box"), "MakeBox");
        assert_eq!(to_camel("nb_children"), "NbChildren");
    }

    #[test]
    fn snake_from_camel() {
        assert_eq!(to_snake("CompSolid"), "comp_solid");
        assert_eq!(to_snake("IsNull"), "is_null");
        assert_eq!(to_snake("MakeBox"), "make_box");
        assert_eq!(to_snake("Vertex"), "vertex");
    }

    #[test]
    fn round_trips() {
        for snake in ["compound", "comp_solid", "shape_type", "is_same", "nb_children"] {
            assert_eq!(to_snake(&to_camel(snake)), snake);
        }
        for camel in ["Compound", "CompSolid", "ShapeType", "HashCode", "NbEdges"] {
            assert_eq!(to_camel(&to_snake(camel)), camel);
        }
    }

    #[test]
    fn mechanical_on_unusual_input() {
        assert_eq!(to_camel(""), "");
        assert_eq!(to_snake(""), "");
        // Digits and doubled underscores pass through.
        assert_eq!(to_camel("edge_2d"), "Edge_2d");
        assert_eq!(to_camel("a__b"), "A_B");
        assert_eq!(to_snake("_Key"), "__key");
    }

    #[test]
    fn builder_names() {
        let name = |symbol| builder_function_name("PrimAPI_Make", "_register", symbol);
        assert_eq!(name("PrimAPI_MakeBox").as_deref(), Some("make_box"));
        assert_eq!(
            name("PrimAPI_MakeRevolSweep").as_deref(),
            Some("make_revol_sweep")
        );
        assert_eq!(name("PrimAPI_MakeBox_register"), None);
        assert_eq!(name("PrimAPI_Make"), None);
        assert_eq!(name("Topo_Face"), None);
    }

    #[test]
    fn helper_suffix_comes_from_the_caller() {
        assert_eq!(
            builder_function_name("PrimAPI_Make", "_hook", "PrimAPI_MakeBox_hook"),
            None
        );
        // Another kernel's helper suffix is just part of the stem.
        assert_eq!(
            builder_function_name("PrimAPI_Make", "_hook", "PrimAPI_MakeBox_register").as_deref(),
            Some("make_box")
        );
        assert_eq!(
            builder_function_name("PrimAPI_Make", "", "PrimAPI_MakeBox").as_deref(),
            Some("make_box")
        );
    }
}
