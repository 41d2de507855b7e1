//! REST path assembly

/// Join path components with `/`, dropping empty ones.
///
/// The result always has exactly one leading `/` and never a doubled
/// separator. A component may itself hold several `/`-separated segments.
/// Numeric ids should be passed as strings; `"0"` is kept.
pub fn make_path<I, S>(components: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = String::from("/");
    for component in components {
        for segment in component.as_ref().split('/').filter(|s| !s.is_empty()) {
            if path.len() > 1 {
                path.push('/');
            }
            path.push_str(segment);
        }
    }
    path
}

/// Comma-join a multi-valued segment, falling back to `_all` when empty
pub fn join_or_all<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        "_all".to_string()
    } else {
        join(names)
    }
}

/// Comma-join a multi-valued segment; empty input yields an empty segment
pub fn join<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Prefix a raw path with `/` when missing
pub fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_make_path_drops_empty() {
        assert_eq!(make_path(["a", "", "b"]), "/a/b");
        assert_eq!(make_path(["logs", "", "_search"]), "/logs/_search");
    }

    #[test]
    fn test_make_path_empty_input() {
        assert_eq!(make_path(Vec::<String>::new()), "/");
        assert_eq!(make_path(["", ""]), "/");
    }

    #[test]
    fn test_make_path_keeps_zero_id() {
        let id = 0.to_string();
        assert_eq!(make_path(["idx", "type", id.as_str()]), "/idx/type/0");
    }

    #[test]
    fn test_make_path_no_duplicate_separators() {
        assert_eq!(make_path(["/idx/", "/type"]), "/idx/type");
    }

    #[test]
    fn test_join_or_all() {
        assert_eq!(join_or_all::<&str>(&[]), "_all");
        assert_eq!(join_or_all(&["a", "b"]), "a,b");
        assert_eq!(join::<&str>(&[]), "");
    }

    #[test]
    fn test_ensure_leading_slash() {
        assert_eq!(ensure_leading_slash("idx"), "/idx");
        assert_eq!(ensure_leading_slash("/idx"), "/idx");
    }

    proptest! {
        #[test]
        fn test_make_path_shape(components in prop::collection::vec("[a-z0-9_/]{0,6}", 0..8)) {
            let path = make_path(&components);
            prop_assert!(path.starts_with('/'));
            prop_assert!(!path.contains("//"));
            prop_assert!(path.len() == 1 || !path.ends_with('/'));
            let expected: Vec<&str> = components
                .iter()
                .flat_map(|c| c.split('/'))
                .filter(|s| !s.is_empty())
                .collect();
            let actual: Vec<&str> = path[1..].split('/').filter(|s| !s.is_empty()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
