use web_sys as web;

const HINT_ID: &str = "hint-overlay";

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    let Some(el) = document.get_element_by_id(HINT_ID) else {
        return false;
    };
    el.class_list().contains("hidden")
        || el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Round and flip counter shown in the hint overlay.
pub fn hint_text(round: u32, flips: u32, flips_before_reset: u32) -> String {
    format!(
        "Round {} • Flips {}/{} • click a card • R: new deck • H: hide",
        round, flips, flips_before_reset
    )
}

pub fn update_hint(document: &web::Document, round: u32, flips: u32, flips_before_reset: u32) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        let hint_html = format!(
            "<div style='color: #e8e4ff; font: 13px system-ui; background: rgba(12, 10, 24, 0.75); padding: 8px 12px; border-radius: 6px; border: 1px solid rgba(140, 120, 200, 0.35);'>{}</div>",
            hint_text(round, flips, flips_before_reset)
        );
        el.set_inner_html(&hint_html);
    }
}
