use scraper::{ElementRef, Html, Node, Selector};

use crate::types::Profile;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Profile page has no main content container")]
    MissingContainer,
    #[error("Missing required field: {0}")]
    MissingField(String),
}

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Every anchor href inside the element with the given id, in document
/// order. A missing container is the valid "no results" outcome and
/// yields an empty list.
pub fn extract_links(html: &str, container_id: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let container_selector = Selector::parse(&format!("#{}", container_id)).unwrap();
    let anchor_selector = Selector::parse("a").unwrap();

    let Some(container) = document.select(&container_selector).next() else {
        return Vec::new();
    };

    container
        .select(&anchor_selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Parse one detail page into a [`Profile`]. Only the name is guaranteed
/// by the page; the stats table and biography are taken when present and
/// the net worth falls back to `"0"`.
pub fn parse_profile(html: &str, include_description: bool) -> Result<Profile, ParseError> {
    let document = Html::parse_document(html);
    let container_selector = Selector::parse("#single__main").unwrap();
    let container = document
        .select(&container_selector)
        .next()
        .ok_or(ParseError::MissingContainer)?;

    let name_selector = Selector::parse("[itemprop='name']").unwrap();
    let name = container
        .select(&name_selector)
        .find_map(|e| e.value().attr("content"))
        .ok_or_else(|| ParseError::MissingField("name".to_string()))?
        .to_string();

    let mut stats = vec![(Profile::NAME.to_string(), name)];

    let row_selector = Selector::parse("table.celeb_stats_table tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    for row in container.select(&row_selector) {
        let mut cells = row.select(&cell_selector);
        let (Some(label), Some(value)) = (cells.next(), cells.next()) else {
            continue;
        };
        let label_text = elem_text(label);
        let key = label_text.trim().trim_end_matches(':').trim_end();
        if key.is_empty() {
            continue;
        }
        upsert(&mut stats, key.to_string(), elem_text(value).trim().to_string());
    }

    // The price metadata carries the raw figure; the table cell only has
    // a display string with currency symbols.
    let price_selector = Selector::parse("meta[itemprop='price']").unwrap();
    let worth = container
        .select(&price_selector)
        .find_map(|e| e.value().attr("content"))
        .unwrap_or("0")
        .to_string();
    upsert(&mut stats, Profile::NET_WORTH.to_string(), worth);

    let description = if include_description {
        extract_description(container)
    } else {
        String::new()
    };

    Ok(Profile::new(stats, description))
}

/// Locate the lead search-result snippet and accept it only if every
/// whitespace token of the sanitized query appears in its text. Returns
/// the snippet's profile link.
pub fn match_search_lead(html: &str, sanitized_name: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let lead_selector = Selector::parse(".search_result.lead").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();

    let lead = document.select(&lead_selector).next()?;
    let text = elem_text(lead).to_lowercase();
    let query = sanitized_name.to_lowercase();
    if !query.split_whitespace().all(|token| text.contains(token)) {
        return None;
    }

    lead.select(&anchor_selector)
        .find_map(|a| a.value().attr("href"))
        .map(str::to_string)
}

fn upsert(stats: &mut Vec<(String, String)>, key: String, value: String) {
    match stats.iter_mut().find(|(k, _)| *k == key) {
        Some((_, v)) => *v = value,
        None => stats.push((key, value)),
    }
}

// Walks the description container's direct children in order: structural
// and media nodes are junk, list items become their own paragraphs,
// anything else contributes its text as one paragraph.
fn extract_description(container: ElementRef) -> String {
    let description_selector = Selector::parse("[itemprop='description']").unwrap();
    let li_selector = Selector::parse("li").unwrap();

    let Some(description) = container.select(&description_selector).next() else {
        return String::new();
    };

    let mut paragraphs: Vec<String> = Vec::new();
    for node in description.children() {
        match node.value() {
            Node::Element(element) => {
                let tag = element.name();
                if matches!(tag, "div" | "img" | "table" | "style") {
                    continue;
                }
                let Some(child) = ElementRef::wrap(node) else {
                    continue;
                };
                if matches!(tag, "ul" | "ol") {
                    for item in child.select(&li_selector) {
                        push_paragraph(&mut paragraphs, &elem_text(item));
                    }
                } else {
                    push_paragraph(&mut paragraphs, &elem_text(child));
                }
            }
            Node::Text(text) => push_paragraph(&mut paragraphs, &text.text),
            _ => {}
        }
    }
    paragraphs.join("\n\n")
}

fn push_paragraph(paragraphs: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        paragraphs.push(text.to_string());
    }
}
