//! Form input validation: trimming, length bounds and list-title uniqueness.

use crate::models::{TodoLists, MAX_TITLE_CHARS};

/// Which form field a title came from; decides the wording of error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleField {
    TodoList,
    Todo,
}

impl TitleField {
    fn required(self) -> &'static str {
        match self {
            Self::TodoList => "The list title is required.",
            Self::Todo => "The todo title is required.",
        }
    }

    fn length(self) -> &'static str {
        match self {
            Self::TodoList => "List title must be between 1 and 100 characters.",
            Self::Todo => "Todo title must be between 1 and 100 characters.",
        }
    }
}

pub const DUPLICATE_LIST_TITLE: &str = "List title must be unique.";

/// Trim `raw` and check its length. Returns the trimmed title or error messages.
pub fn validate_title(raw: &str, field: TitleField) -> Result<String, Vec<String>> {
    let title = raw.trim();
    let len = title.chars().count();

    if len == 0 {
        return Err(vec![field.required().to_string()]);
    }
    if len > MAX_TITLE_CHARS {
        return Err(vec![field.length().to_string()]);
    }
    Ok(title.to_string())
}

/// Validate a list title, also requiring that no list already uses it.
pub fn validate_list_title(raw: &str, todo_lists: &TodoLists) -> Result<String, Vec<String>> {
    let title = validate_title(raw, TitleField::TodoList)?;
    if todo_lists.find_by_title(&title).is_some() {
        return Err(vec![DUPLICATE_LIST_TITLE.to_string()]);
    }
    Ok(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_before_checking() {
        assert_eq!(
            validate_title("  Groceries \n", TitleField::TodoList),
            Ok("Groceries".to_string())
        );
        assert_eq!(
            validate_title("   ", TitleField::Todo),
            Err(vec!["The todo title is required.".to_string()])
        );
    }

    #[test]
    fn rejects_overlong_titles() {
        let long = "x".repeat(101);
        assert_eq!(
            validate_title(&long, TitleField::TodoList),
            Err(vec!["List title must be between 1 and 100 characters.".to_string()])
        );
    }

    #[test]
    fn list_titles_must_be_unique_case_sensitively() {
        let mut lists = TodoLists::new();
        lists.create_list("Groceries").unwrap();

        assert_eq!(
            validate_list_title(" Groceries", &lists),
            Err(vec![DUPLICATE_LIST_TITLE.to_string()])
        );
        assert_eq!(
            validate_list_title("groceries", &lists),
            Ok("groceries".to_string())
        );
    }
}
