use super::TodoError;

/// Longest title accepted for lists and todos, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Check that `title` holds between 1 and [`MAX_TITLE_CHARS`] characters.
///
/// Trimming is the caller's job; the model stores exactly what it is given.
pub fn check_title(title: &str) -> Result<(), TodoError> {
    let len = title.chars().count();
    if len == 0 || len > MAX_TITLE_CHARS {
        return Err(TodoError::InvalidTitle { len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(check_title("a").is_ok());
        assert!(check_title(&"x".repeat(MAX_TITLE_CHARS)).is_ok());
    }

    #[test]
    fn rejects_empty_and_overlong() {
        assert_eq!(check_title(""), Err(TodoError::InvalidTitle { len: 0 }));
        assert_eq!(
            check_title(&"x".repeat(MAX_TITLE_CHARS + 1)),
            Err(TodoError::InvalidTitle { len: 101 })
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 100 two-byte characters
        assert!(check_title(&"é".repeat(MAX_TITLE_CHARS)).is_ok());
    }
}
