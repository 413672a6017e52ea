/// Clamp page/limit query values: page starts at 1, limit within 1..=100.
pub fn validate_pagination(page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    (page, limit)
}

/// Vehicle plates are matched case-insensitively and without surrounding or inner spaces.
pub fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        assert_eq!(validate_pagination(None, None), (1, 20));
        assert_eq!(validate_pagination(Some(0), Some(500)), (1, 100));
        assert_eq!(validate_pagination(Some(4), Some(0)), (4, 1));
    }

    #[test]
    fn plates_are_normalized() {
        assert_eq!(normalize_plate(" ab 123 c "), "AB123C");
        assert_eq!(normalize_plate("KA-01"), "KA-01");
    }
}
