use partfinder_core::Availability;

const PROMPT_HEADER: &str = "You are a product data extraction expert. \
Analyze the following HTML content and extract product information.

Return a JSON object with these fields (use null if not found):
- vendor_name: The seller/store name
- product_title: The product title/name
- price: The price as a number (without currency symbol)
- currency: The currency code (e.g., \"LKR\", \"USD\", \"EUR\")
";

const PROMPT_RULES: &str = "- description: A brief product description (max 200 chars)

IMPORTANT:
- Extract ONLY factual data from the page
- If price is shown as a range, use the lowest price
- If multiple currencies shown, prefer LKR or USD
- Return ONLY valid JSON, no markdown or explanations

HTML Content:
";

/// Builds the single-turn extraction prompt around sanitized page content.
#[must_use]
pub fn build_prompt(page: &str) -> String {
    let labels: Vec<String> = Availability::ALL
        .iter()
        .map(|a| format!("\"{}\"", a.label()))
        .collect();
    let availability = match labels.split_last() {
        Some((last, rest)) => format!("- availability: One of {}, or {last}\n", rest.join(", ")),
        None => String::new(),
    };

    format!("{PROMPT_HEADER}{availability}{PROMPT_RULES}{page}\n\nJSON Response:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_page_after_instructions() {
        let prompt = build_prompt("<h1>Relay</h1>");
        let page_at = prompt.find("<h1>Relay</h1>").expect("page embedded");
        let rules_at = prompt.find("Return ONLY valid JSON").expect("rules present");
        assert!(rules_at < page_at);
        assert!(prompt.ends_with("JSON Response:"));
    }

    #[test]
    fn prompt_lists_every_availability_label() {
        let prompt = build_prompt("");
        assert!(prompt.contains(
            "One of \"In Stock\", \"Out of Stock\", \"Limited Stock\", \"Pre-Order\", or \"Unknown\""
        ));
    }

    #[test]
    fn prompt_names_every_field() {
        let prompt = build_prompt("");
        for field in [
            "vendor_name",
            "product_title",
            "price",
            "currency",
            "availability",
            "description",
        ] {
            assert!(prompt.contains(&format!("- {field}:")), "missing {field}");
        }
    }
}
