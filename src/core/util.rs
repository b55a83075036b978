//! Small shared helpers.

use super::model::ActionItem;

/// Generate initials from a full name, e.g. "John Smith" -> "JS".
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Distinct non-null assignees among the given items, in order of first
/// appearance.
pub fn unique_assignees(items: &[ActionItem]) -> Vec<String> {
    let mut seen = Vec::new();
    for item in items {
        if let Some(assignee) = &item.assignee {
            if !seen.iter().any(|s| s == assignee) {
                seen.push(assignee.clone());
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, assignee: Option<&str>) -> ActionItem {
        ActionItem {
            id: id.to_string(),
            title: String::new(),
            assignee: assignee.map(String::from),
            due_date: String::new(),
            selected: true,
            overdue: false,
        }
    }

    #[test]
    fn test_initials_two_part_name() {
        assert_eq!(initials("John Smith"), "JS");
    }

    #[test]
    fn test_initials_single_name() {
        assert_eq!(initials("Muthu"), "M");
    }

    #[test]
    fn test_initials_lowercase_input() {
        assert_eq!(initials("anita patel"), "AP");
    }

    #[test]
    fn test_initials_empty() {
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_unique_assignees_first_appearance_order() {
        let items = vec![
            item("1", Some("Sarah Lee")),
            item("2", Some("Raj Kumar")),
            item("3", Some("Sarah Lee")),
            item("4", Some("Anita Patel")),
        ];
        assert_eq!(unique_assignees(&items), vec!["Sarah Lee", "Raj Kumar", "Anita Patel"]);
    }

    #[test]
    fn test_unique_assignees_skips_unassigned() {
        let items = vec![item("1", None), item("2", Some("Raj Kumar")), item("3", None)];
        assert_eq!(unique_assignees(&items), vec!["Raj Kumar"]);
    }

    #[test]
    fn test_unique_assignees_empty() {
        assert!(unique_assignees(&[]).is_empty());
    }
}
