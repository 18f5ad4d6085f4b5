use crate::request::PartSearchRequest;

const INTENT_TOKEN: &str = "buy";

/// Builds the search string for a request.
///
/// Order is fixed: intent token, part name, part number, manufacturer, location,
/// joined by single spaces. Empty optional fields are skipped. No escaping is
/// applied; transport encoding belongs to the HTTP clients.
#[must_use]
pub fn build_search_query(request: &PartSearchRequest, location: &str) -> String {
    let mut parts: Vec<&str> = vec![INTENT_TOKEN, request.part_name.trim()];

    for optional in [&request.part_number, &request.manufacturer] {
        if let Some(value) = optional.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            parts.push(value);
        }
    }

    let location = location.trim();
    if !location.is_empty() {
        parts.push(location);
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_minimal_query() {
        let request = PartSearchRequest::new("SKF 6205-2RS bearing");
        assert_eq!(
            build_search_query(&request, "Sri Lanka"),
            "buy SKF 6205-2RS bearing Sri Lanka"
        );
    }

    #[test]
    fn includes_part_number_then_manufacturer() {
        let mut request = PartSearchRequest::new("deep groove ball bearing");
        request.part_number = Some("6205-2RS".to_owned());
        request.manufacturer = Some("SKF".to_owned());
        assert_eq!(
            build_search_query(&request, "India"),
            "buy deep groove ball bearing 6205-2RS SKF India"
        );
    }

    #[test]
    fn skips_blank_optional_fields() {
        let mut request = PartSearchRequest::new("contactor");
        request.part_number = Some("  ".to_owned());
        request.manufacturer = Some("Schneider".to_owned());
        assert_eq!(
            build_search_query(&request, "USA"),
            "buy contactor Schneider USA"
        );
    }

    #[test]
    fn is_deterministic() {
        let mut request = PartSearchRequest::new("relay");
        request.part_number = Some("G2R-1".to_owned());
        assert_eq!(
            build_search_query(&request, "UK"),
            build_search_query(&request, "UK")
        );
    }
}
