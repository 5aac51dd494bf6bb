use scraper::{Html, Selector};
use tracing::debug;

// Substring match on the class attribute, same as an XPath contains().
const AMOUNT_SELECTOR: &str = r#"div[class*="cp-heading-large"][class*="branded-text"]"#;

fn amount_selector() -> Selector {
    Selector::parse(AMOUNT_SELECTOR).expect("AMOUNT_SELECTOR is valid CSS")
}

pub fn extract_amount(html: &str) -> String {
    let selector = amount_selector();
    let document = Html::parse_document(html);
    match document.select(&selector).next() {
        Some(node) => {
            let amount = node.text().collect::<String>().trim().to_string();
            debug!("AmountRaised: {}", amount);
            amount
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_selector_parses() {
        assert!(Selector::parse(AMOUNT_SELECTOR).is_ok());
        let _ = amount_selector();
    }

    #[test]
    fn test_extract_amount_trims_text() {
        let html = r#"<html><body>
            <div class="cp-heading-large branded-text">  £1,234  </div>
        </body></html>"#;

        assert_eq!(extract_amount(html), "£1,234");
    }

    #[test]
    fn test_extract_amount_first_match_wins() {
        let html = r#"<div>
            <div class="header">£0</div>
            <div class="x branded-text y cp-heading-large-extra"><span>£50</span> raised</div>
            <div class="cp-heading-large branded-text">£99</div>
        </div>"#;

        assert_eq!(extract_amount(html), "£50 raised");
    }

    #[test]
    fn test_extract_amount_requires_both_classes() {
        let html = r#"<div class="cp-heading-large">£10</div><div class="branded-text">£20</div>"#;
        assert_eq!(extract_amount(html), "");
    }

    #[test]
    fn test_extract_amount_is_case_sensitive() {
        let html = r#"<div class="CP-HEADING-LARGE Branded-Text">£10</div>"#;
        assert_eq!(extract_amount(html), "");
    }

    #[test]
    fn test_extract_amount_no_match() {
        assert_eq!(extract_amount("<p>nothing to see</p>"), "");
        assert_eq!(extract_amount(""), "");
    }
}
