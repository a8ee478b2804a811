/// Strip invisible marks and collapse inner whitespace. Case is preserved.
pub(crate) fn normalize_cell(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| normalize_cell(&raw))
        .filter(|cleaned| !cleaned.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_marks_and_collapses_spaces() {
        assert_eq!(normalize_cell("\u{feff} high\u{200b}   growth "), "high growth");
        assert_eq!(normalize_cell("IND001"), "IND001");
    }

    #[test]
    fn blank_cells_become_absent() {
        assert_eq!(non_empty(Some(" \u{200b} ".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" roe".to_string())), Some("roe".to_string()));
    }
}
