//! Table name derivation for nested arrays

/// Lower-case a name and replace every character outside `[a-z0-9_]` with `_`.
///
/// Lower-casing happens first, so `A-Z` survive as `a-z`. Every other
/// character, including non-ASCII letters and digits, becomes one `_` per
/// Unicode scalar value.
pub fn sanitize_table_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' => c,
            _ => '_',
        })
        .collect()
}

/// Name of the child table holding the array found under `key` in a row of `parent`
pub fn child_table_name(parent: &str, key: &str) -> String {
    sanitize_table_name(&format!("{}_{}", parent, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_pass_through() {
        assert_eq!(child_table_name("users", "tags"), "users_tags");
        assert_eq!(sanitize_table_name("order_items_2"), "order_items_2");
    }

    #[test]
    fn test_lower_cases() {
        assert_eq!(child_table_name("Users", "OrderItems"), "users_orderitems");
    }

    #[test]
    fn test_replaces_every_other_character() {
        assert_eq!(child_table_name("users", "first-name"), "users_first_name");
        assert_eq!(child_table_name("a", "b c.d/e"), "a_b_c_d_e");
        assert_eq!(sanitize_table_name("\"x\";"), "_x__");
        assert_eq!(sanitize_table_name("café"), "caf_");
        assert_eq!(sanitize_table_name("日本"), "__");
    }

    #[test]
    fn test_idempotent() {
        let once = sanitize_table_name("Mixed Case-Name!");
        assert_eq!(sanitize_table_name(&once), once);
    }
}
