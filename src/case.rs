//! Case conversion for deriving entity labels from table names.

/// Convert a snake_case identifier to PascalCase.
/// e.g. "order_items" -> "OrderItems", "widgets" -> "Widgets"
pub fn to_pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
