//! File and identifier naming for generated TypeScript modules.
//! Examples: "a/b/c.proto" -> "a/b/c.pb.ts", imported as "../../a/b/c.pb".

const PROTO_EXTENSION: &str = ".proto";
const OUTPUT_EXTENSION: &str = ".pb.ts";

/// Output file for a proto source file
pub fn output_file_name(proto_name: &str) -> String {
    let stem = proto_name.strip_suffix(PROTO_EXTENSION).unwrap_or(proto_name);
    format!("{}{}", stem, OUTPUT_EXTENSION)
}

/// Module specifier that `from_file` uses to import `to_file`.
/// Both are output paths relative to the same root.
pub fn relative_module_path(from_file: &str, to_file: &str) -> String {
    let from_dirs: Vec<&str> = split_path(from_file);
    let from_dirs = &from_dirs[..from_dirs.len().saturating_sub(1)];
    let to_parts: Vec<&str> = split_path(to_file);

    let common = from_dirs
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count()
        // never swallow the file name itself
        .min(to_parts.len().saturating_sub(1));

    let ups = from_dirs.len() - common;
    let rest = to_parts[common..].join("/");
    let rest = rest.strip_suffix(".ts").unwrap_or(&rest);

    if ups == 0 {
        format!("./{}", rest)
    } else {
        format!("{}{}", "../".repeat(ups), rest)
    }
}

/// Namespace alias for an imported proto file:
/// "google/protobuf/empty.proto" -> "GoogleProtobufEmpty"
pub fn import_alias(proto_name: &str) -> String {
    let stem = proto_name.strip_suffix(PROTO_EXTENSION).unwrap_or(proto_name);
    let alias: String = stem
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(upper_first)
        .collect();

    if alias.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", alias)
    } else {
        alias
    }
}

/// TypeScript name of a message or enum: its full name without the package,
/// nested scopes concatenated ("demo.v1.Outer.Inner" -> "OuterInner")
pub fn local_type_name(full_name: &str, package: &str) -> String {
    let local = if package.is_empty() {
        full_name
    } else {
        full_name
            .strip_prefix(package)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(full_name)
    };
    local.replace('.', "")
}

/// protoc's json_name rule: drop underscores, uppercase the letter after each
pub fn lower_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut capitalize_next = false;
    for c in name.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            out.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

fn upper_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("a/b/c.proto"), "a/b/c.pb.ts");
        assert_eq!(output_file_name("service.proto"), "service.pb.ts");
        assert_eq!(output_file_name("odd/name"), "odd/name.pb.ts");
    }

    #[test]
    fn test_relative_module_paths() {
        assert_eq!(relative_module_path("a/b/c.pb.ts", "fetch.pb.ts"), "../../fetch.pb");
        assert_eq!(relative_module_path("c.pb.ts", "fetch.pb.ts"), "./fetch.pb");
        assert_eq!(
            relative_module_path("a/b/c.pb.ts", "a/common/types.pb.ts"),
            "../common/types.pb"
        );
        assert_eq!(relative_module_path("a/b/c.pb.ts", "a/b/d.pb.ts"), "./d.pb");
        assert_eq!(relative_module_path("lib/x.pb.ts", "./lib/fetch.ts"), "./fetch");
    }

    #[test]
    fn test_import_alias() {
        assert_eq!(import_alias("google/protobuf/timestamp.proto"), "GoogleProtobufTimestamp");
        assert_eq!(import_alias("common/user_types.proto"), "CommonUserTypes");
        assert_eq!(import_alias("3d/mesh.proto"), "_3dMesh");
    }

    #[test]
    fn test_local_type_name() {
        assert_eq!(local_type_name("demo.v1.Outer.Inner", "demo.v1"), "OuterInner");
        assert_eq!(local_type_name("demo.v1.User", "demo.v1"), "User");
        assert_eq!(local_type_name("Holder.LabelsEntry", ""), "HolderLabelsEntry");
        assert_eq!(local_type_name("demonstration.Thing", "demo"), "demonstrationThing");
    }

    #[test]
    fn test_lower_camel_case() {
        assert_eq!(lower_camel_case("user_id"), "userId");
        assert_eq!(lower_camel_case("already"), "already");
        assert_eq!(lower_camel_case("a_b_c"), "aBC");
    }
}
